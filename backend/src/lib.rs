//! Activity ingestion service library.
//!
//! The [`domain`] module holds the ingestion core and its ports. The
//! [`inbound`] and [`outbound`] modules adapt it to HTTP, PostgreSQL, the
//! identity service, and Redis.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
