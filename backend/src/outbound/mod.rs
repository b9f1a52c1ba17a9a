//! Outbound adapters implementing the driven ports.
//!
//! - **identity**: HTTP client for the user identity service
//! - **persistence**: PostgreSQL activity store using Diesel ORM
//! - **memory**: process-local activity store for development and tests
//! - **queue**: Redis and logging activity event publishers
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod identity;
pub mod memory;
pub mod persistence;
pub mod queue;
