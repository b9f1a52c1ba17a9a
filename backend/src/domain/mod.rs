//! Domain primitives, ports, and services.
//!
//! Purpose: define the activity entity, the ports the ingestion core talks
//! through, and the service orchestrating them. Nothing in this module knows
//! about HTTP, SQL, or the message broker.
//!
//! Public surface:
//! - [`Activity`], [`NewActivity`], [`ActivityId`], [`ActivityType`],
//!   [`AdditionalMetrics`]: the activity record and its value types.
//! - [`UserId`]: owning user identifier.
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failures.
//! - [`TraceId`]: request correlation identifier.
//! - [`ActivityService`]: ingestion and query orchestration.

pub mod activity;
pub mod activity_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::activity::{
    Activity, ActivityDraft, ActivityId, ActivityType, AdditionalMetrics, NewActivity,
    UnknownActivityType,
};
pub use self::activity_service::{ActivityService, ActivityServicePorts};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserIdValidationError};
