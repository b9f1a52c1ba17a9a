//! PostgreSQL persistence adapter for activities.
//!
//! Diesel row structs and the table definition stay private to this module;
//! the domain only sees [`DieselActivityRepository`] through the
//! `ActivityRepository` port.
//!
//! # Example
//!
//! ```ignore
//! use activity_service::outbound::persistence::{
//!     DbPool, DieselActivityRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! run_pending_migrations(&database_url).await?;
//! let pool = DbPool::new(PoolConfig::new(database_url)).await?;
//! let repository = DieselActivityRepository::new(pool);
//! ```

mod diesel_activity_repository;
mod diesel_basic_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_activity_repository::DieselActivityRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
