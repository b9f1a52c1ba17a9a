//! Activity ingestion service.
//!
//! Implements the [`ActivityCommand`] and [`ActivityQuery`] driving ports by
//! composing the user validator, activity repository, and event publisher.
//! Tracking runs strictly in order: validate, persist, publish, map. The
//! publish step is fire-and-forget; its failures are logged and dropped.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    ActivityCommand, ActivityEventPublisher, ActivityEventRoute, ActivityQuery,
    ActivityRepository, ActivityRepositoryError, ActivityResponse, TrackActivityRequest,
    UserValidationError, UserValidator,
};
use crate::domain::{Activity, ActivityId, Error, NewActivity, UserId};

fn map_repository_error(error: ActivityRepositoryError) -> Error {
    error!(%error, "activity repository failure");
    match error {
        ActivityRepositoryError::Connection { message } => {
            Error::store_unavailable(format!("activity store unavailable: {message}"))
        }
        ActivityRepositoryError::Query { message } => {
            Error::store_unavailable(format!("activity store error: {message}"))
        }
    }
}

fn map_validation_error(user_id: &UserId, error: UserValidationError) -> Error {
    error!(%error, user_id = %user_id, "user validation failed");
    Error::validation_unavailable(format!("could not validate user {user_id}: {error}"))
}

/// Collaborators required by [`ActivityService`].
pub struct ActivityServicePorts<V: ?Sized, R: ?Sized, P: ?Sized> {
    pub validator: Arc<V>,
    pub repository: Arc<R>,
    pub publisher: Arc<P>,
}

/// Activity service implementing both the command and query driving ports.
///
/// Holds only shared collaborator handles and the event route; requests do
/// not share mutable state. The collaborators may be concrete adapters or
/// trait objects chosen at startup.
pub struct ActivityService<V: ?Sized, R: ?Sized, P: ?Sized> {
    validator: Arc<V>,
    repository: Arc<R>,
    publisher: Arc<P>,
    route: ActivityEventRoute,
}

impl<V: ?Sized, R: ?Sized, P: ?Sized> Clone for ActivityService<V, R, P> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
            repository: Arc::clone(&self.repository),
            publisher: Arc::clone(&self.publisher),
            route: self.route.clone(),
        }
    }
}

impl<V: ?Sized, R: ?Sized, P: ?Sized> ActivityService<V, R, P> {
    /// Create a service publishing tracked activities to `route`.
    pub fn new(ports: ActivityServicePorts<V, R, P>, route: ActivityEventRoute) -> Self {
        let ActivityServicePorts {
            validator,
            repository,
            publisher,
        } = ports;
        Self {
            validator,
            repository,
            publisher,
            route,
        }
    }
}

impl<V, R, P> ActivityService<V, R, P>
where
    V: UserValidator + ?Sized,
    R: ActivityRepository + ?Sized,
    P: ActivityEventPublisher + ?Sized,
{
    async fn ensure_valid_user(&self, user_id: &UserId) -> Result<(), Error> {
        let valid = self
            .validator
            .validate(user_id)
            .await
            .map_err(|err| map_validation_error(user_id, err))?;
        if valid {
            Ok(())
        } else {
            info!(user_id = %user_id, "rejected activity for invalid user");
            Err(Error::invalid_user(format!("invalid user: {user_id}")))
        }
    }

    async fn notify(&self, activity: &Activity) {
        if let Err(error) = self.publisher.publish(&self.route, activity).await {
            warn!(
                %error,
                activity_id = %activity.id(),
                destination = self.route.destination(),
                routing_key = self.route.routing_key(),
                "failed to publish activity event"
            );
        }
    }
}

#[async_trait]
impl<V, R, P> ActivityCommand for ActivityService<V, R, P>
where
    V: UserValidator + ?Sized,
    R: ActivityRepository + ?Sized,
    P: ActivityEventPublisher + ?Sized,
{
    async fn track(&self, request: TrackActivityRequest) -> Result<ActivityResponse, Error> {
        self.ensure_valid_user(&request.user_id).await?;

        let draft = NewActivity::from(request);
        let activity = self
            .repository
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;

        self.notify(&activity).await;

        info!(
            activity_id = %activity.id(),
            user_id = %activity.user_id(),
            activity_type = %activity.activity_type(),
            "activity tracked"
        );
        Ok(activity.into())
    }
}

#[async_trait]
impl<V, R, P> ActivityQuery for ActivityService<V, R, P>
where
    V: UserValidator + ?Sized,
    R: ActivityRepository + ?Sized,
    P: ActivityEventPublisher + ?Sized,
{
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<ActivityResponse>, Error> {
        let activities = self
            .repository
            .find_by_owner(user_id)
            .await
            .map_err(map_repository_error)?;
        Ok(activities.into_iter().map(ActivityResponse::from).collect())
    }

    async fn get_by_id(&self, activity_id: &ActivityId) -> Result<ActivityResponse, Error> {
        self.repository
            .find_by_id(activity_id)
            .await
            .map_err(map_repository_error)?
            .map(ActivityResponse::from)
            .ok_or_else(|| Error::not_found(format!("activity {activity_id} not found")))
    }
}

#[cfg(test)]
#[path = "activity_service_tests.rs"]
mod tests;
