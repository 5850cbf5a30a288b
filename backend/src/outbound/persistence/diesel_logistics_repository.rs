//! PostgreSQL-backed `LogisticsRepository` implementation using Diesel ORM.
//!
//! Related rows are loaded eagerly. Body weights join their equipment inline;
//! distances and shipments reference the same table more than once, so their
//! targets are fetched with batched `IN (...)` look-ups inside one read-only
//! transaction and stitched together in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{LogisticsRepository, LogisticsRepositoryError};
use crate::domain::{BodyWeight, CargoType, Distance, Equipment, Location, Shipment};
use crate::{query_all, query_optional};

use super::diesel_helpers::logistics::{map_diesel_error, map_pool_error};
use super::models::{
    BodyWeightRow, CargoTypeRow, DistanceRow, EquipmentRow, LocationRow, ShipmentRow,
};
use super::pool::DbPool;
use super::schema::{body_weights, cargo_types, distances, equipment, locations, shipments};

/// Diesel-backed implementation of the `LogisticsRepository` port.
#[derive(Clone)]
pub struct DieselLogisticsRepository {
    pool: DbPool,
}

impl DieselLogisticsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Rows resolved by id for in-memory stitching.
struct Lookup<T> {
    entity: &'static str,
    rows: HashMap<i32, T>,
}

impl<T: Clone> Lookup<T> {
    fn new<R>(entity: &'static str, rows: Vec<R>, id: impl Fn(&R) -> i32) -> Self
    where
        R: Into<T>,
    {
        let rows = rows
            .into_iter()
            .map(|row| (id(&row), row.into()))
            .collect();
        Self { entity, rows }
    }

    fn resolve(&self, id: i32, owner: &str) -> Result<T, LogisticsRepositoryError> {
        self.rows.get(&id).cloned().ok_or_else(|| {
            LogisticsRepositoryError::query(format!(
                "{owner} references missing {} {id}",
                self.entity
            ))
        })
    }
}

fn row_to_body_weight((row, owner): (BodyWeightRow, EquipmentRow)) -> BodyWeight {
    BodyWeight {
        id: row.id,
        equipment_id: row.equipment_id,
        empty_weight_kg: row.empty_weight_kg,
        max_load_kg: row.max_load_kg,
        effective_date: row.effective_date,
        equipment: owner.into(),
    }
}

fn assemble_distances(
    rows: Vec<DistanceRow>,
    places: Vec<LocationRow>,
) -> Result<Vec<Distance>, LogisticsRepositoryError> {
    let places: Lookup<Location> = Lookup::new("location", places, |row| row.id);
    rows.into_iter()
        .map(|row| {
            let owner = format!("distance {}", row.id);
            Ok(Distance {
                id: row.id,
                from_location: places.resolve(row.location_from_id, &owner)?,
                to_location: places.resolve(row.location_to_id, &owner)?,
                distance_km: row.distance_km,
                estimated_time_min: row.estimated_time_min,
            })
        })
        .collect()
}

struct ShipmentRefs {
    fleet: Vec<EquipmentRow>,
    cargo: Vec<CargoTypeRow>,
    places: Vec<LocationRow>,
}

fn assemble_shipments(
    rows: Vec<ShipmentRow>,
    refs: ShipmentRefs,
) -> Result<Vec<Shipment>, LogisticsRepositoryError> {
    let fleet: Lookup<Equipment> = Lookup::new("equipment", refs.fleet, |row| row.id);
    let cargo: Lookup<CargoType> = Lookup::new("cargo type", refs.cargo, |row| row.id);
    let places: Lookup<Location> = Lookup::new("location", refs.places, |row| row.id);
    rows.into_iter()
        .map(|row| {
            let owner = format!("shipment {}", row.id);
            Ok(Shipment {
                id: row.id,
                equipment: fleet.resolve(row.equipment_id, &owner)?,
                cargo_type: cargo.resolve(row.cargo_type_id, &owner)?,
                load_location: places.resolve(row.load_location_id, &owner)?,
                unload_location: places.resolve(row.unload_location_id, &owner)?,
                planned_datetime: row.planned_datetime,
                actual_datetime: row.actual_datetime,
                weight_kg: row.weight_kg,
                status: row.status,
            })
        })
        .collect()
}

impl DieselLogisticsRepository {
    async fn load_distances(
        &self,
        only: Option<i32>,
    ) -> Result<Vec<Distance>, LogisticsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (rows, places) = conn
            .build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let mut query = distances::table
                        .select(DistanceRow::as_select())
                        .order_by(distances::id.asc())
                        .into_boxed();
                    if let Some(id) = only {
                        query = query.filter(distances::id.eq(id));
                    }
                    let rows: Vec<DistanceRow> = query.load(conn).await?;

                    let ids: Vec<i32> = rows
                        .iter()
                        .flat_map(|row| [row.location_from_id, row.location_to_id])
                        .collect();
                    let places: Vec<LocationRow> = locations::table
                        .filter(locations::id.eq_any(ids))
                        .select(LocationRow::as_select())
                        .load(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>((rows, places))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        assemble_distances(rows, places)
    }

    async fn load_body_weights(
        &self,
        only: Option<i32>,
    ) -> Result<Vec<BodyWeight>, LogisticsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = body_weights::table
            .inner_join(equipment::table)
            .select((BodyWeightRow::as_select(), EquipmentRow::as_select()))
            .order_by(body_weights::id.asc())
            .into_boxed();
        if let Some(id) = only {
            query = query.filter(body_weights::id.eq(id));
        }

        let rows: Vec<(BodyWeightRow, EquipmentRow)> =
            query.load(&mut conn).await.map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_body_weight).collect())
    }

    async fn load_shipments(
        &self,
        only: Option<i32>,
    ) -> Result<Vec<Shipment>, LogisticsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (rows, refs) = conn
            .build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let mut query = shipments::table
                        .select(ShipmentRow::as_select())
                        .order_by(shipments::id.asc())
                        .into_boxed();
                    if let Some(id) = only {
                        query = query.filter(shipments::id.eq(id));
                    }
                    let rows: Vec<ShipmentRow> = query.load(conn).await?;

                    let equipment_ids: Vec<i32> = rows.iter().map(|row| row.equipment_id).collect();
                    let cargo_ids: Vec<i32> = rows.iter().map(|row| row.cargo_type_id).collect();
                    let location_ids: Vec<i32> = rows
                        .iter()
                        .flat_map(|row| [row.load_location_id, row.unload_location_id])
                        .collect();

                    let fleet: Vec<EquipmentRow> = equipment::table
                        .filter(equipment::id.eq_any(equipment_ids))
                        .select(EquipmentRow::as_select())
                        .load(conn)
                        .await?;
                    let cargo: Vec<CargoTypeRow> = cargo_types::table
                        .filter(cargo_types::id.eq_any(cargo_ids))
                        .select(CargoTypeRow::as_select())
                        .load(conn)
                        .await?;
                    let places: Vec<LocationRow> = locations::table
                        .filter(locations::id.eq_any(location_ids))
                        .select(LocationRow::as_select())
                        .load(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>((
                        rows,
                        ShipmentRefs {
                            fleet,
                            cargo,
                            places,
                        },
                    ))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        assemble_shipments(rows, refs)
    }
}

#[async_trait]
impl LogisticsRepository for DieselLogisticsRepository {
    async fn list_equipment(&self) -> Result<Vec<Equipment>, LogisticsRepositoryError> {
        query_all!(
            self,
            logistics,
            equipment::table,
            equipment::id.asc(),
            EquipmentRow,
            Equipment::from
        )
    }

    async fn find_equipment(
        &self,
        id: i32,
    ) -> Result<Option<Equipment>, LogisticsRepositoryError> {
        query_optional!(
            self,
            logistics,
            equipment::table,
            equipment::id.eq(id),
            EquipmentRow,
            Equipment::from
        )
    }

    async fn list_locations(&self) -> Result<Vec<Location>, LogisticsRepositoryError> {
        query_all!(
            self,
            logistics,
            locations::table,
            locations::id.asc(),
            LocationRow,
            Location::from
        )
    }

    async fn find_location(&self, id: i32) -> Result<Option<Location>, LogisticsRepositoryError> {
        query_optional!(
            self,
            logistics,
            locations::table,
            locations::id.eq(id),
            LocationRow,
            Location::from
        )
    }

    async fn list_distances(&self) -> Result<Vec<Distance>, LogisticsRepositoryError> {
        self.load_distances(None).await
    }

    async fn find_distance(&self, id: i32) -> Result<Option<Distance>, LogisticsRepositoryError> {
        Ok(self.load_distances(Some(id)).await?.into_iter().next())
    }

    async fn list_body_weights(&self) -> Result<Vec<BodyWeight>, LogisticsRepositoryError> {
        self.load_body_weights(None).await
    }

    async fn find_body_weight(
        &self,
        id: i32,
    ) -> Result<Option<BodyWeight>, LogisticsRepositoryError> {
        Ok(self.load_body_weights(Some(id)).await?.into_iter().next())
    }

    async fn list_cargo_types(&self) -> Result<Vec<CargoType>, LogisticsRepositoryError> {
        query_all!(
            self,
            logistics,
            cargo_types::table,
            cargo_types::id.asc(),
            CargoTypeRow,
            CargoType::from
        )
    }

    async fn find_cargo_type(
        &self,
        id: i32,
    ) -> Result<Option<CargoType>, LogisticsRepositoryError> {
        query_optional!(
            self,
            logistics,
            cargo_types::table,
            cargo_types::id.eq(id),
            CargoTypeRow,
            CargoType::from
        )
    }

    async fn list_shipments(&self) -> Result<Vec<Shipment>, LogisticsRepositoryError> {
        self.load_shipments(None).await
    }

    async fn find_shipment(&self, id: i32) -> Result<Option<Shipment>, LogisticsRepositoryError> {
        Ok(self.load_shipments(Some(id)).await?.into_iter().next())
    }
}
