//! Port for durable activity storage.

use async_trait::async_trait;

use crate::domain::{Activity, ActivityId, NewActivity, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by activity repository adapters.
    pub enum ActivityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "activity repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "activity repository query failed: {message}",
    }
}

/// Port for inserting activities and reading them back by id or owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Persist a new activity and return the stored record with its
    /// generated identifier and timestamps.
    async fn insert(&self, activity: &NewActivity) -> Result<Activity, ActivityRepositoryError>;

    /// Find an activity by its identifier.
    async fn find_by_id(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Option<Activity>, ActivityRepositoryError>;

    /// Read every activity owned by `user_id`, in store order.
    async fn find_by_owner(&self, user_id: &UserId)
    -> Result<Vec<Activity>, ActivityRepositoryError>;
}
