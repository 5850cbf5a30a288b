//! Driving port for logistics reads.
//!
//! HTTP handlers depend on this port; absence of a record surfaces as a
//! `not_found` [`Error`] rather than an empty option.

use async_trait::async_trait;

use crate::domain::{BodyWeight, CargoType, Distance, Equipment, Error, Location, Shipment};

/// Domain use-case port for reading fleet tracking records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogisticsQuery: Send + Sync {
    /// All equipment in ascending id order.
    async fn list_equipment(&self) -> Result<Vec<Equipment>, Error>;
    /// One piece of equipment.
    async fn get_equipment(&self, id: i32) -> Result<Equipment, Error>;
    /// All locations in ascending id order.
    async fn list_locations(&self) -> Result<Vec<Location>, Error>;
    /// One location.
    async fn get_location(&self, id: i32) -> Result<Location, Error>;
    /// All distances in ascending id order.
    async fn list_distances(&self) -> Result<Vec<Distance>, Error>;
    /// One distance.
    async fn get_distance(&self, id: i32) -> Result<Distance, Error>;
    /// All body weight records in ascending id order.
    async fn list_body_weights(&self) -> Result<Vec<BodyWeight>, Error>;
    /// One body weight record.
    async fn get_body_weight(&self, id: i32) -> Result<BodyWeight, Error>;
    /// All cargo types in ascending id order.
    async fn list_cargo_types(&self) -> Result<Vec<CargoType>, Error>;
    /// One cargo type.
    async fn get_cargo_type(&self, id: i32) -> Result<CargoType, Error>;
    /// All shipments in ascending id order.
    async fn list_shipments(&self) -> Result<Vec<Shipment>, Error>;
    /// One shipment.
    async fn get_shipment(&self, id: i32) -> Result<Shipment, Error>;
}
