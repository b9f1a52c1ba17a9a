//! Publisher that records activity events in the log only.

use async_trait::async_trait;
use tracing::info;

use crate::domain::Activity;
use crate::domain::ports::{ActivityEventPublisher, ActivityEventRoute, PublishError};

/// Event publisher that logs events instead of delivering them.
///
/// Nothing downstream receives the event; the log line is the only trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingActivityEventPublisher;

#[async_trait]
impl ActivityEventPublisher for LoggingActivityEventPublisher {
    async fn publish(
        &self,
        route: &ActivityEventRoute,
        activity: &Activity,
    ) -> Result<(), PublishError> {
        info!(
            activity_id = %activity.id(),
            user_id = %activity.user_id(),
            destination = route.destination(),
            routing_key = route.routing_key(),
            "activity event not delivered: no broker configured"
        );
        Ok(())
    }
}
