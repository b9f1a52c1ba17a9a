//! Driving port for recording activities.
//!
//! Inbound adapters submit tracking requests through this port and receive
//! the persisted record projected as an [`ActivityResponse`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Activity, ActivityId, ActivityType, AdditionalMetrics, Error, NewActivity, UserId,
};

/// Read-only projection of a persisted activity.
///
/// Every field is copied verbatim from the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: ActivityId,
    #[schema(value_type = String, example = "u1")]
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    #[schema(example = 30)]
    pub duration: i32,
    #[schema(example = 300)]
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub additional_metrics: AdditionalMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Activity> for ActivityResponse {
    fn from(value: Activity) -> Self {
        let id = value.id();
        let created_at = value.created_at();
        let updated_at = value.updated_at();
        let NewActivity {
            user_id,
            activity_type,
            duration,
            calories_burned,
            start_time,
            additional_metrics,
        } = value.into_content();
        Self {
            id,
            user_id,
            activity_type,
            duration,
            calories_burned,
            start_time,
            additional_metrics,
            created_at,
            updated_at,
        }
    }
}

/// Request to record a new activity for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackActivityRequest {
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub duration: i32,
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub additional_metrics: AdditionalMetrics,
}

impl From<TrackActivityRequest> for NewActivity {
    fn from(value: TrackActivityRequest) -> Self {
        Self {
            user_id: value.user_id,
            activity_type: value.activity_type,
            duration: value.duration,
            calories_burned: value.calories_burned,
            start_time: value.start_time,
            additional_metrics: value.additional_metrics,
        }
    }
}

/// Driving port for activity ingestion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityCommand: Send + Sync {
    /// Validate the owning user, persist the activity, and emit a
    /// best-effort notification.
    ///
    /// Fails with [`crate::domain::ErrorCode::InvalidUser`] when the identity
    /// service rejects the user, and with
    /// [`crate::domain::ErrorCode::StoreUnavailable`] when persistence fails.
    /// Notification failures never surface here.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use chrono::Utc;
    /// # use activity_service::domain::{ActivityType, AdditionalMetrics, UserId};
    /// # use activity_service::domain::ports::{
    /// #     ActivityCommand, FixtureActivityCommand, TrackActivityRequest,
    /// # };
    /// # async fn example() -> Result<(), activity_service::domain::Error> {
    /// let command = FixtureActivityCommand;
    /// let response = command
    ///     .track(TrackActivityRequest {
    ///         user_id: UserId::new("u1").expect("valid user id"),
    ///         activity_type: ActivityType::Running,
    ///         duration: 30,
    ///         calories_burned: 300,
    ///         start_time: Utc::now(),
    ///         additional_metrics: AdditionalMetrics::default(),
    ///     })
    ///     .await?;
    /// assert_eq!(response.duration, 30);
    /// # Ok(())
    /// # }
    /// ```
    async fn track(&self, request: TrackActivityRequest) -> Result<ActivityResponse, Error>;
}

/// Fixture command echoing the request back with generated identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActivityCommand;

#[async_trait]
impl ActivityCommand for FixtureActivityCommand {
    async fn track(&self, request: TrackActivityRequest) -> Result<ActivityResponse, Error> {
        let now = Utc::now();
        let activity = Activity::new(crate::domain::ActivityDraft {
            id: ActivityId::random(),
            content: request.into(),
            created_at: now,
            updated_at: now,
        });
        Ok(activity.into())
    }
}
