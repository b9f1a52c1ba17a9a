//! Port for best-effort activity notifications.
//!
//! Publishing happens after an activity is persisted. Callers treat every
//! [`PublishError`] as non-fatal.

use async_trait::async_trait;

use crate::domain::Activity;

use super::define_port_error;

define_port_error! {
    /// Errors raised by activity event publisher adapters.
    pub enum PublishError {
        /// The broker could not be reached.
        Unavailable { message: String } =>
            "activity event broker unavailable: {message}",
        /// The broker refused the event.
        Rejected { message: String } =>
            "activity event was rejected: {message}",
        /// Delivery did not complete within the configured deadline.
        Timeout { message: String } =>
            "activity event publish timed out: {message}",
    }
}

/// Where activity events are delivered.
///
/// # Examples
/// ```
/// use activity_service::domain::ports::ActivityEventRoute;
///
/// let route = ActivityEventRoute::new("fitness.exchange", "activity.tracking");
/// assert_eq!(route.destination(), "fitness.exchange");
/// assert_eq!(route.routing_key(), "activity.tracking");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEventRoute {
    destination: String,
    routing_key: String,
}

impl ActivityEventRoute {
    /// Build a route from its destination and routing key.
    pub fn new(destination: impl Into<String>, routing_key: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            routing_key: routing_key.into(),
        }
    }

    /// Exchange, topic, or queue family receiving the event.
    #[must_use]
    pub fn destination(&self) -> &str {
        self.destination.as_str()
    }

    /// Key selecting the binding within the destination.
    #[must_use]
    pub fn routing_key(&self) -> &str {
        self.routing_key.as_str()
    }
}

/// Port delivering persisted activities to downstream consumers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityEventPublisher: Send + Sync {
    /// Deliver `activity` to `route`. At most one attempt is made.
    async fn publish(
        &self,
        route: &ActivityEventRoute,
        activity: &Activity,
    ) -> Result<(), PublishError>;
}
