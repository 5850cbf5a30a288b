//! Read-side port for fleet tracking records.
//!
//! Adapters resolve every reference eagerly; callers never issue follow-up
//! queries for related rows.

use async_trait::async_trait;

use crate::domain::{BodyWeight, CargoType, Distance, Equipment, Location, Shipment};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading logistics records.
    pub enum LogisticsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "logistics repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "logistics repository query failed: {message}",
    }
}

/// Port for reading logistics records.
///
/// Lists are ordered by ascending identifier. A missing row yields
/// `Ok(None)`; deciding whether that is an error is the caller's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogisticsRepository: Send + Sync {
    /// All equipment.
    async fn list_equipment(&self) -> Result<Vec<Equipment>, LogisticsRepositoryError>;

    /// One piece of equipment.
    async fn find_equipment(&self, id: i32)
    -> Result<Option<Equipment>, LogisticsRepositoryError>;

    /// All locations.
    async fn list_locations(&self) -> Result<Vec<Location>, LogisticsRepositoryError>;

    /// One location.
    async fn find_location(&self, id: i32) -> Result<Option<Location>, LogisticsRepositoryError>;

    /// All distances with both endpoints resolved.
    async fn list_distances(&self) -> Result<Vec<Distance>, LogisticsRepositoryError>;

    /// One distance with both endpoints resolved.
    async fn find_distance(&self, id: i32) -> Result<Option<Distance>, LogisticsRepositoryError>;

    /// All body weight records with their equipment resolved.
    async fn list_body_weights(&self) -> Result<Vec<BodyWeight>, LogisticsRepositoryError>;

    /// One body weight record with its equipment resolved.
    async fn find_body_weight(
        &self,
        id: i32,
    ) -> Result<Option<BodyWeight>, LogisticsRepositoryError>;

    /// All cargo types.
    async fn list_cargo_types(&self) -> Result<Vec<CargoType>, LogisticsRepositoryError>;

    /// One cargo type.
    async fn find_cargo_type(&self, id: i32)
    -> Result<Option<CargoType>, LogisticsRepositoryError>;

    /// All shipments with equipment, cargo type and both locations resolved.
    async fn list_shipments(&self) -> Result<Vec<Shipment>, LogisticsRepositoryError>;

    /// One shipment with equipment, cargo type and both locations resolved.
    async fn find_shipment(&self, id: i32) -> Result<Option<Shipment>, LogisticsRepositoryError>;
}

/// Fixture implementation describing an empty fleet.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLogisticsRepository;

#[async_trait]
impl LogisticsRepository for FixtureLogisticsRepository {
    async fn list_equipment(&self) -> Result<Vec<Equipment>, LogisticsRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_equipment(
        &self,
        _id: i32,
    ) -> Result<Option<Equipment>, LogisticsRepositoryError> {
        Ok(None)
    }

    async fn list_locations(&self) -> Result<Vec<Location>, LogisticsRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_location(&self, _id: i32) -> Result<Option<Location>, LogisticsRepositoryError> {
        Ok(None)
    }

    async fn list_distances(&self) -> Result<Vec<Distance>, LogisticsRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_distance(&self, _id: i32) -> Result<Option<Distance>, LogisticsRepositoryError> {
        Ok(None)
    }

    async fn list_body_weights(&self) -> Result<Vec<BodyWeight>, LogisticsRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_body_weight(
        &self,
        _id: i32,
    ) -> Result<Option<BodyWeight>, LogisticsRepositoryError> {
        Ok(None)
    }

    async fn list_cargo_types(&self) -> Result<Vec<CargoType>, LogisticsRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_cargo_type(
        &self,
        _id: i32,
    ) -> Result<Option<CargoType>, LogisticsRepositoryError> {
        Ok(None)
    }

    async fn list_shipments(&self) -> Result<Vec<Shipment>, LogisticsRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_shipment(&self, _id: i32) -> Result<Option<Shipment>, LogisticsRepositoryError> {
        Ok(None)
    }
}
