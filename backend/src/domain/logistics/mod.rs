//! Fleet tracking read models.
//!
//! Every reference between logistics records is resolved eagerly by the
//! repository, so the structs below carry their related rows inline rather
//! than bare foreign keys (except where clients also expect the key).

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};

mod service;

pub use service::LogisticsService;

/// A vehicle or machine in the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    /// Primary key.
    pub id: i32,
    /// Display name (at most 100 characters).
    pub name: String,
    /// Free-form equipment category, such as `"dump truck"`.
    pub kind: Option<String>,
    /// Operational status label.
    pub status: Option<String>,
    /// Longer description.
    pub description: Option<String>,
}

/// A named place where cargo is loaded or unloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Primary key.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Location category, such as `"quarry"` or `"warehouse"`.
    pub kind: String,
    /// Opaque coordinate string.
    pub coordinates: Option<String>,
}

/// Road distance between two locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distance {
    /// Primary key.
    pub id: i32,
    /// Origin.
    pub from_location: Location,
    /// Destination.
    pub to_location: Location,
    /// Distance in kilometres with two decimal places.
    pub distance_km: BigDecimal,
    /// Estimated travel time in minutes.
    pub estimated_time_min: Option<i32>,
}

/// Weight characteristics of one piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyWeight {
    /// Primary key.
    pub id: i32,
    /// Key of the owning equipment.
    pub equipment_id: i32,
    /// Unladen weight in kilograms.
    pub empty_weight_kg: i32,
    /// Maximum payload in kilograms.
    pub max_load_kg: i32,
    /// Date from which the figures apply.
    pub effective_date: Option<NaiveDate>,
    /// The owning equipment.
    pub equipment: Equipment,
}

/// A kind of material that can be shipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoType {
    /// Primary key.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: Option<String>,
    /// Bulk density in kg/m³.
    pub density_kg_m3: Option<BigDecimal>,
}

/// A planned or completed haul of cargo between two locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    /// Primary key.
    pub id: i32,
    /// Equipment performing the haul.
    pub equipment: Equipment,
    /// Material hauled.
    pub cargo_type: CargoType,
    /// Where the cargo is loaded.
    pub load_location: Location,
    /// Where the cargo is unloaded.
    pub unload_location: Location,
    /// Planned departure, local time.
    pub planned_datetime: Option<NaiveDateTime>,
    /// Actual departure, local time.
    pub actual_datetime: Option<NaiveDateTime>,
    /// Weight hauled in kilograms.
    pub weight_kg: Option<i32>,
    /// Status label.
    pub status: Option<String>,
}
