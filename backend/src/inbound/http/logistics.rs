//! Read-only fleet tracking HTTP handlers.
//!
//! ```text
//! GET /equipment       GET /equipment/{id}
//! GET /locations       GET /locations/{id}
//! GET /distances       GET /distances/{id}
//! GET /body_weights    GET /body_weights/{id}
//! GET /cargo_types     GET /cargo_types/{id}
//! GET /shipments       GET /shipments/{id}
//! ```
//!
//! Field names stay snake_case and the `kind` columns are exposed as `type`
//! for compatibility with existing dashboard clients. Decimal columns are
//! serialised as strings to keep their scale.

use actix_web::{HttpResponse, get, web};
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{BodyWeight, CargoType, Distance, Equipment, Location, Shipment};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// A truck, trailer or other piece of equipment.
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentDto {
    pub id: i32,
    #[schema(example = "KamAZ-6520")]
    pub name: String,
    #[serde(rename = "type")]
    #[schema(example = "dump truck")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

impl From<Equipment> for EquipmentDto {
    fn from(value: Equipment) -> Self {
        Self {
            id: value.id,
            name: value.name,
            kind: value.kind,
            status: value.status,
            description: value.description,
        }
    }
}

/// A loading or unloading point.
#[derive(Debug, Serialize, ToSchema)]
pub struct LocationDto {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    #[schema(example = "quarry")]
    pub kind: String,
    pub coordinates: Option<String>,
}

impl From<Location> for LocationDto {
    fn from(value: Location) -> Self {
        Self {
            id: value.id,
            name: value.name,
            kind: value.kind,
            coordinates: value.coordinates,
        }
    }
}

/// Road distance between two locations.
#[derive(Debug, Serialize, ToSchema)]
pub struct DistanceDto {
    pub id: i32,
    pub from_location: LocationDto,
    pub to_location: LocationDto,
    #[schema(value_type = String, example = "12.50")]
    pub distance_km: BigDecimal,
    pub estimated_time_min: Option<i32>,
}

impl From<Distance> for DistanceDto {
    fn from(value: Distance) -> Self {
        Self {
            id: value.id,
            from_location: value.from_location.into(),
            to_location: value.to_location.into(),
            distance_km: value.distance_km,
            estimated_time_min: value.estimated_time_min,
        }
    }
}

/// Weight limits of one piece of equipment.
#[derive(Debug, Serialize, ToSchema)]
pub struct BodyWeightDto {
    pub id: i32,
    pub equipment_id: i32,
    pub empty_weight_kg: i32,
    pub max_load_kg: i32,
    pub effective_date: Option<NaiveDate>,
    pub equipment: EquipmentDto,
}

impl From<BodyWeight> for BodyWeightDto {
    fn from(value: BodyWeight) -> Self {
        Self {
            id: value.id,
            equipment_id: value.equipment_id,
            empty_weight_kg: value.empty_weight_kg,
            max_load_kg: value.max_load_kg,
            effective_date: value.effective_date,
            equipment: value.equipment.into(),
        }
    }
}

/// A kind of transported material.
#[derive(Debug, Serialize, ToSchema)]
pub struct CargoTypeDto {
    pub id: i32,
    pub name: String,
    pub code: Option<String>,
    #[schema(value_type = Option<String>, example = "1600.00")]
    pub density_kg_m3: Option<BigDecimal>,
}

impl From<CargoType> for CargoTypeDto {
    fn from(value: CargoType) -> Self {
        Self {
            id: value.id,
            name: value.name,
            code: value.code,
            density_kg_m3: value.density_kg_m3,
        }
    }
}

/// A planned or completed haul with its references resolved.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShipmentDto {
    pub id: i32,
    pub equipment: EquipmentDto,
    pub cargo_type: CargoTypeDto,
    pub load_location: LocationDto,
    pub unload_location: LocationDto,
    pub planned_datetime: Option<NaiveDateTime>,
    pub actual_datetime: Option<NaiveDateTime>,
    pub weight_kg: Option<i32>,
    pub status: Option<String>,
}

impl From<Shipment> for ShipmentDto {
    fn from(value: Shipment) -> Self {
        Self {
            id: value.id,
            equipment: value.equipment.into(),
            cargo_type: value.cargo_type.into(),
            load_location: value.load_location.into(),
            unload_location: value.unload_location.into(),
            planned_datetime: value.planned_datetime,
            actual_datetime: value.actual_datetime,
            weight_kg: value.weight_kg,
            status: value.status,
        }
    }
}

fn ok_list<T, D>(items: Vec<T>) -> HttpResponse
where
    D: From<T> + Serialize,
{
    HttpResponse::Ok().json(items.into_iter().map(D::from).collect::<Vec<_>>())
}

/// List all equipment.
#[utoipa::path(
    get,
    path = "/equipment",
    responses(
        (status = 200, description = "Equipment in ascending id order", body = [EquipmentDto]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "listEquipment"
)]
#[get("/equipment")]
pub async fn list_equipment(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let items = state.logistics.list_equipment().await?;
    Ok(ok_list::<_, EquipmentDto>(items))
}

/// Fetch one piece of equipment.
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    params(("id" = i32, Path, description = "Equipment id")),
    responses(
        (status = 200, description = "Equipment", body = EquipmentDto),
        (status = 404, description = "Equipment not found", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "getEquipment"
)]
#[get("/equipment/{id}")]
pub async fn get_equipment(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let item = state.logistics.get_equipment(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(EquipmentDto::from(item)))
}

/// List all locations.
#[utoipa::path(
    get,
    path = "/locations",
    responses(
        (status = 200, description = "Locations in ascending id order", body = [LocationDto]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "listLocations"
)]
#[get("/locations")]
pub async fn list_locations(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let items = state.logistics.list_locations().await?;
    Ok(ok_list::<_, LocationDto>(items))
}

/// Fetch one location.
#[utoipa::path(
    get,
    path = "/locations/{id}",
    params(("id" = i32, Path, description = "Location id")),
    responses(
        (status = 200, description = "Location", body = LocationDto),
        (status = 404, description = "Location not found", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "getLocation"
)]
#[get("/locations/{id}")]
pub async fn get_location(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let item = state.logistics.get_location(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LocationDto::from(item)))
}

/// List all distances with both endpoints resolved.
#[utoipa::path(
    get,
    path = "/distances",
    responses(
        (status = 200, description = "Distances in ascending id order", body = [DistanceDto]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "listDistances"
)]
#[get("/distances")]
pub async fn list_distances(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let items = state.logistics.list_distances().await?;
    Ok(ok_list::<_, DistanceDto>(items))
}

/// Fetch one distance.
#[utoipa::path(
    get,
    path = "/distances/{id}",
    params(("id" = i32, Path, description = "Distance id")),
    responses(
        (status = 200, description = "Distance", body = DistanceDto),
        (status = 404, description = "Distance not found", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "getDistance"
)]
#[get("/distances/{id}")]
pub async fn get_distance(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let item = state.logistics.get_distance(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DistanceDto::from(item)))
}

/// List all body weight records.
#[utoipa::path(
    get,
    path = "/body_weights",
    responses(
        (status = 200, description = "Body weights in ascending id order", body = [BodyWeightDto]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "listBodyWeights"
)]
#[get("/body_weights")]
pub async fn list_body_weights(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let items = state.logistics.list_body_weights().await?;
    Ok(ok_list::<_, BodyWeightDto>(items))
}

/// Fetch one body weight record.
#[utoipa::path(
    get,
    path = "/body_weights/{id}",
    params(("id" = i32, Path, description = "Body weight id")),
    responses(
        (status = 200, description = "Body weight", body = BodyWeightDto),
        (status = 404, description = "Body weight not found", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "getBodyWeight"
)]
#[get("/body_weights/{id}")]
pub async fn get_body_weight(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let item = state.logistics.get_body_weight(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(BodyWeightDto::from(item)))
}

/// List all cargo types.
#[utoipa::path(
    get,
    path = "/cargo_types",
    responses(
        (status = 200, description = "Cargo types in ascending id order", body = [CargoTypeDto]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "listCargoTypes"
)]
#[get("/cargo_types")]
pub async fn list_cargo_types(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let items = state.logistics.list_cargo_types().await?;
    Ok(ok_list::<_, CargoTypeDto>(items))
}

/// Fetch one cargo type.
#[utoipa::path(
    get,
    path = "/cargo_types/{id}",
    params(("id" = i32, Path, description = "Cargo type id")),
    responses(
        (status = 200, description = "Cargo type", body = CargoTypeDto),
        (status = 404, description = "Cargo type not found", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "getCargoType"
)]
#[get("/cargo_types/{id}")]
pub async fn get_cargo_type(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let item = state.logistics.get_cargo_type(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CargoTypeDto::from(item)))
}

/// List all shipments with equipment, cargo and locations resolved.
#[utoipa::path(
    get,
    path = "/shipments",
    responses(
        (status = 200, description = "Shipments in ascending id order", body = [ShipmentDto]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "listShipments"
)]
#[get("/shipments")]
pub async fn list_shipments(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let items = state.logistics.list_shipments().await?;
    Ok(ok_list::<_, ShipmentDto>(items))
}

/// Fetch one shipment.
#[utoipa::path(
    get,
    path = "/shipments/{id}",
    params(("id" = i32, Path, description = "Shipment id")),
    responses(
        (status = 200, description = "Shipment", body = ShipmentDto),
        (status = 404, description = "Shipment not found", body = ErrorSchema)
    ),
    tags = ["logistics"],
    operation_id = "getShipment"
)]
#[get("/shipments/{id}")]
pub async fn get_shipment(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let item = state.logistics.get_shipment(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ShipmentDto::from(item)))
}

#[cfg(test)]
#[path = "logistics_tests.rs"]
mod tests;
