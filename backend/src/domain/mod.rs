//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed entities used by the HTTP and persistence
//! adapters and the services that coordinate them through [`ports`]. Domain
//! types carry no transport or storage annotations; adapters own their DTOs.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure payload.
//! - [`TraceId`]: request-scoped correlation identifier.
//! - Logistics read models and [`LogisticsService`].
//! - Annotation manager entities and [`AnnotationService`].

pub mod annotations;
pub mod error;
pub mod logistics;
pub mod ports;
pub mod trace_id;

pub use self::annotations::{
    Annotation, AnnotationInput, AnnotationService, BoxDraft, ClassName, DEFAULT_IMAGE_FILENAME,
    EmptyClassName, Image, ImageUpload, NewImage, PREDICTED_BOX_COUNT, PREDICTED_CLASS_RANGE,
    PREDICTED_SIZE_RANGE, Project, ProjectName, ProjectNameError, RandomBoxGenerator,
    generate_boxes,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::logistics::{
    BodyWeight, CargoType, Distance, Equipment, Location, LogisticsService, Shipment,
};
pub use self::trace_id::TraceId;
