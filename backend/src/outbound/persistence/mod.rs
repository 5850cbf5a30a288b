//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Explicit pooling**: a [`DbPool`] is built once at startup and handed
//!   to each repository; there is no global connection handle.
//!
//! # Example
//!
//! ```ignore
//! use depot::outbound::persistence::{DbPool, DieselLogisticsRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/depot")).await?;
//! let repo = DieselLogisticsRepository::new(pool);
//! ```

mod diesel_annotation_repository;
pub(crate) mod diesel_helpers;
mod diesel_logistics_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_annotation_repository::DieselAnnotationRepository;
pub use diesel_logistics_repository::DieselLogisticsRepository;
pub use migrations::{MIGRATIONS, MigrationError, MigrationRetry, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
