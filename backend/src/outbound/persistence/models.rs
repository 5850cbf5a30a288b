//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live here so
//! the repositories stay thin.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Annotation, CargoType, Equipment, Image, Location, Project};

use super::schema::{
    annotations, body_weights, cargo_types, distances, equipment, images, locations, projects,
    shipments,
};

// ---------------------------------------------------------------------------
// Logistics models
// ---------------------------------------------------------------------------

/// Row struct for reading from the equipment table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = equipment)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EquipmentRow {
    pub id: i32,
    pub name: String,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            kind: row.kind,
            status: row.status,
            description: row.description,
        }
    }
}

/// Row struct for reading from the locations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LocationRow {
    pub id: i32,
    pub name: String,
    pub kind: String,
    pub coordinates: Option<String>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            kind: row.kind,
            coordinates: row.coordinates,
        }
    }
}

/// Row struct for reading from the distances table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = distances)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DistanceRow {
    pub id: i32,
    pub location_from_id: i32,
    pub location_to_id: i32,
    pub distance_km: BigDecimal,
    pub estimated_time_min: Option<i32>,
}

/// Row struct for reading from the body_weights table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = body_weights)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BodyWeightRow {
    pub id: i32,
    pub equipment_id: i32,
    pub empty_weight_kg: i32,
    pub max_load_kg: i32,
    pub effective_date: Option<NaiveDate>,
}

/// Row struct for reading from the cargo_types table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cargo_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CargoTypeRow {
    pub id: i32,
    pub name: String,
    pub code: Option<String>,
    pub density_kg_m3: Option<BigDecimal>,
}

impl From<CargoTypeRow> for CargoType {
    fn from(row: CargoTypeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            code: row.code,
            density_kg_m3: row.density_kg_m3,
        }
    }
}

/// Row struct for reading from the shipments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shipments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShipmentRow {
    pub id: i32,
    pub equipment_id: i32,
    pub cargo_type_id: i32,
    pub load_location_id: i32,
    pub unload_location_id: i32,
    pub planned_datetime: Option<NaiveDateTime>,
    pub actual_datetime: Option<NaiveDateTime>,
    pub weight_kg: Option<i32>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Annotation manager models
// ---------------------------------------------------------------------------

/// Row struct for reading from the projects table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for creating projects.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub name: &'a str,
}

/// Row struct for reading from the images table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ImageRow {
    pub id: i32,
    pub project_id: i32,
    pub filename: String,
    pub mime_type: String,
    pub size: i64,
    pub storage_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            filename: row.filename,
            mime_type: row.mime_type,
            size: row.size,
            storage_name: row.storage_name,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for recording a stored image.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = images)]
pub(crate) struct NewImageRow<'a> {
    pub project_id: i32,
    pub filename: &'a str,
    pub mime_type: &'a str,
    pub size: i64,
    pub storage_name: &'a str,
}

/// Row struct for reading from the annotations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = annotations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnnotationRow {
    pub id: i32,
    pub image_id: i32,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub class_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<AnnotationRow> for Annotation {
    fn from(row: AnnotationRow) -> Self {
        Self {
            id: row.id,
            image_id: row.image_id,
            x: row.x,
            y: row.y,
            w: row.w,
            h: row.h,
            class_name: row.class_name,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for creating annotations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = annotations)]
pub(crate) struct NewAnnotationRow<'a> {
    pub image_id: i32,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub class_name: &'a str,
}
