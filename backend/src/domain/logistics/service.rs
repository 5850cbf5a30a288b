//! Logistics read service implementing the [`LogisticsQuery`] driving port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LogisticsQuery, LogisticsRepository, LogisticsRepositoryError};
use crate::domain::{BodyWeight, CargoType, Distance, Equipment, Error, Location, Shipment};

pub(super) const EQUIPMENT_NOT_FOUND: &str = "Equipment not found";
pub(super) const LOCATION_NOT_FOUND: &str = "Location not found";
pub(super) const DISTANCE_NOT_FOUND: &str = "Distance not found";
pub(super) const BODY_WEIGHT_NOT_FOUND: &str = "Body weight record not found";
pub(super) const CARGO_TYPE_NOT_FOUND: &str = "Cargo type not found";
pub(super) const SHIPMENT_NOT_FOUND: &str = "Shipment not found";

/// Logistics query service backed by a [`LogisticsRepository`].
#[derive(Clone)]
pub struct LogisticsService<R> {
    repo: Arc<R>,
}

impl<R> LogisticsService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repository_error(error: LogisticsRepositoryError) -> Error {
    match error {
        LogisticsRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("logistics repository unavailable: {message}"))
        }
        LogisticsRepositoryError::Query { message } => {
            Error::internal(format!("logistics repository error: {message}"))
        }
    }
}

fn require<T>(
    found: Result<Option<T>, LogisticsRepositoryError>,
    id: i32,
    message: &'static str,
) -> Result<T, Error> {
    found
        .map_err(map_repository_error)?
        .ok_or_else(|| Error::not_found(message).with_details(serde_json::json!({ "id": id })))
}

#[async_trait]
impl<R> LogisticsQuery for LogisticsService<R>
where
    R: LogisticsRepository,
{
    async fn list_equipment(&self) -> Result<Vec<Equipment>, Error> {
        self.repo.list_equipment().await.map_err(map_repository_error)
    }

    async fn get_equipment(&self, id: i32) -> Result<Equipment, Error> {
        require(self.repo.find_equipment(id).await, id, EQUIPMENT_NOT_FOUND)
    }

    async fn list_locations(&self) -> Result<Vec<Location>, Error> {
        self.repo.list_locations().await.map_err(map_repository_error)
    }

    async fn get_location(&self, id: i32) -> Result<Location, Error> {
        require(self.repo.find_location(id).await, id, LOCATION_NOT_FOUND)
    }

    async fn list_distances(&self) -> Result<Vec<Distance>, Error> {
        self.repo.list_distances().await.map_err(map_repository_error)
    }

    async fn get_distance(&self, id: i32) -> Result<Distance, Error> {
        require(self.repo.find_distance(id).await, id, DISTANCE_NOT_FOUND)
    }

    async fn list_body_weights(&self) -> Result<Vec<BodyWeight>, Error> {
        self.repo
            .list_body_weights()
            .await
            .map_err(map_repository_error)
    }

    async fn get_body_weight(&self, id: i32) -> Result<BodyWeight, Error> {
        require(
            self.repo.find_body_weight(id).await,
            id,
            BODY_WEIGHT_NOT_FOUND,
        )
    }

    async fn list_cargo_types(&self) -> Result<Vec<CargoType>, Error> {
        self.repo
            .list_cargo_types()
            .await
            .map_err(map_repository_error)
    }

    async fn get_cargo_type(&self, id: i32) -> Result<CargoType, Error> {
        require(self.repo.find_cargo_type(id).await, id, CARGO_TYPE_NOT_FOUND)
    }

    async fn list_shipments(&self) -> Result<Vec<Shipment>, Error> {
        self.repo.list_shipments().await.map_err(map_repository_error)
    }

    async fn get_shipment(&self, id: i32) -> Result<Shipment, Error> {
        require(self.repo.find_shipment(id).await, id, SHIPMENT_NOT_FOUND)
    }
}
