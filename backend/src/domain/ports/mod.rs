//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`ImageStore`], [`BoxGenerator`]) are
//! implemented by outbound adapters. Driving ports (`*Query`, `*Command`) are
//! implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod annotation_command;
mod annotation_query;
mod annotation_repository;
mod box_generator;
mod image_store;
mod logistics_query;
mod logistics_repository;

#[cfg(test)]
pub use annotation_command::MockAnnotationCommand;
pub use annotation_command::AnnotationCommand;
#[cfg(test)]
pub use annotation_query::MockAnnotationQuery;
pub use annotation_query::AnnotationQuery;
#[cfg(test)]
pub use annotation_repository::MockAnnotationRepository;
pub use annotation_repository::{AnnotationRepository, AnnotationRepositoryError};
#[cfg(test)]
pub use box_generator::MockBoxGenerator;
pub use box_generator::BoxGenerator;
#[cfg(test)]
pub use image_store::MockImageStore;
pub use image_store::{ImageStore, ImageStoreError, StoredImage};
#[cfg(test)]
pub use logistics_query::MockLogisticsQuery;
pub use logistics_query::LogisticsQuery;
#[cfg(test)]
pub use logistics_repository::MockLogisticsRepository;
pub use logistics_repository::{
    FixtureLogisticsRepository, LogisticsRepository, LogisticsRepositoryError,
};
