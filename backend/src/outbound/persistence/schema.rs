//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When the
//! migrations change, regenerate this file with `diesel print-schema` or edit
//! it by hand.

diesel::table! {
    /// Vehicles and machines in the fleet.
    equipment (id) {
        /// Primary key.
        id -> Int4,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Equipment category (max 50 characters).
        #[sql_name = "type"]
        kind -> Nullable<Varchar>,
        /// Operational status (max 20 characters).
        status -> Nullable<Varchar>,
        /// Free-form description.
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Loading and unloading points.
    locations (id) {
        /// Primary key.
        id -> Int4,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Location category (max 20 characters).
        #[sql_name = "type"]
        kind -> Varchar,
        /// Opaque coordinate string (max 50 characters).
        coordinates -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Road distances between pairs of locations.
    distances (id) {
        /// Primary key.
        id -> Int4,
        /// Origin location.
        location_from_id -> Int4,
        /// Destination location.
        location_to_id -> Int4,
        /// Distance in kilometres, numeric(10,2).
        distance_km -> Numeric,
        /// Estimated travel time in minutes.
        estimated_time_min -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Weight characteristics per piece of equipment.
    body_weights (id) {
        /// Primary key.
        id -> Int4,
        /// Owning equipment.
        equipment_id -> Int4,
        /// Unladen weight in kilograms.
        empty_weight_kg -> Int4,
        /// Maximum payload in kilograms.
        max_load_kg -> Int4,
        /// Date from which the figures apply.
        effective_date -> Nullable<Date>,
    }
}

diesel::table! {
    /// Kinds of material that can be shipped.
    cargo_types (id) {
        /// Primary key.
        id -> Int4,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Short code (max 20 characters).
        code -> Nullable<Varchar>,
        /// Bulk density, numeric(10,2).
        density_kg_m3 -> Nullable<Numeric>,
    }
}

diesel::table! {
    /// Hauls of cargo between two locations.
    shipments (id) {
        /// Primary key.
        id -> Int4,
        /// Equipment performing the haul.
        equipment_id -> Int4,
        /// Material hauled.
        cargo_type_id -> Int4,
        /// Loading location.
        load_location_id -> Int4,
        /// Unloading location.
        unload_location_id -> Int4,
        /// Planned departure, without time zone.
        planned_datetime -> Nullable<Timestamp>,
        /// Actual departure, without time zone.
        actual_datetime -> Nullable<Timestamp>,
        /// Weight hauled in kilograms.
        weight_kg -> Nullable<Int4>,
        /// Status label (max 20 characters).
        status -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Annotation projects.
    projects (id) {
        /// Primary key.
        id -> Int4,
        /// Trimmed project name (max 200 characters).
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Uploaded images. Rows cascade when their project is deleted.
    images (id) {
        /// Primary key.
        id -> Int4,
        /// Owning project.
        project_id -> Int4,
        /// Client-supplied filename.
        filename -> Text,
        /// Client-supplied MIME type.
        mime_type -> Text,
        /// Stored file size in bytes.
        size -> Int8,
        /// Unique name of the stored file.
        storage_name -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bounding boxes. Rows cascade when their image is deleted.
    annotations (id) {
        /// Primary key.
        id -> Int4,
        /// Annotated image.
        image_id -> Int4,
        /// Normalised left edge.
        x -> Float8,
        /// Normalised top edge.
        y -> Float8,
        /// Normalised width.
        w -> Float8,
        /// Normalised height.
        h -> Float8,
        /// Trimmed label.
        class_name -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(body_weights -> equipment (equipment_id));
diesel::joinable!(images -> projects (project_id));
diesel::joinable!(annotations -> images (image_id));

diesel::allow_tables_to_appear_in_same_query!(
    equipment,
    locations,
    distances,
    body_weights,
    cargo_types,
    shipments,
    projects,
    images,
    annotations,
);
