//! Activity event publisher adapters.
//!
//! - [`RedisActivityEventPublisher`] pushes JSON events onto Redis lists via a
//!   `bb8-redis` pool.
//! - [`LoggingActivityEventPublisher`] only records the event in the logs and
//!   is used when no broker is configured.
//!
//! Event payloads are the full persisted record in the camelCase shape the
//! HTTP API returns.

mod logging_publisher;
mod redis_publisher;

pub use logging_publisher::LoggingActivityEventPublisher;
pub use redis_publisher::{RedisActivityEventPublisher, RedisPublisherConfig};

use crate::domain::Activity;
use crate::domain::ports::{ActivityEventRoute, ActivityResponse, PublishError};

/// Serialise `activity` into the event payload.
fn encode_event(activity: &Activity) -> Result<String, PublishError> {
    serde_json::to_string(&ActivityResponse::from(activity.clone()))
        .map_err(|error| PublishError::rejected(format!("event encoding failed: {error}")))
}

/// Redis list key receiving events for `route`.
fn list_key(route: &ActivityEventRoute) -> String {
    format!("{}:{}", route.destination(), route.routing_key())
}
