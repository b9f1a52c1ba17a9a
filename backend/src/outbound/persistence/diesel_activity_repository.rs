//! PostgreSQL-backed `ActivityRepository` implementation using Diesel ORM.
//!
//! The database assigns identifiers and timestamps on insert; the stored row
//! is read back with `RETURNING` so callers always see the authoritative
//! record.

use std::collections::BTreeMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ActivityRepository, ActivityRepositoryError};
use crate::domain::{
    Activity, ActivityDraft, ActivityId, ActivityType, AdditionalMetrics, NewActivity, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ActivityRow, NewActivityRow};
use super::pool::{DbPool, PoolError};
use super::schema::activities;

/// Diesel-backed implementation of the activity repository port.
#[derive(Clone)]
pub struct DieselActivityRepository {
    pool: DbPool,
}

impl DieselActivityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ActivityRepositoryError {
    map_basic_pool_error(error, ActivityRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ActivityRepositoryError {
    map_basic_diesel_error(
        error,
        ActivityRepositoryError::query,
        ActivityRepositoryError::connection,
    )
}

fn encode_metrics(
    metrics: &AdditionalMetrics,
) -> Result<serde_json::Value, ActivityRepositoryError> {
    serde_json::to_value(metrics).map_err(|err| {
        ActivityRepositoryError::query(format!("serialise additional metrics: {err}"))
    })
}

fn decode_metrics(
    value: serde_json::Value,
) -> Result<AdditionalMetrics, ActivityRepositoryError> {
    serde_json::from_value::<BTreeMap<String, serde_json::Value>>(value)
        .map(AdditionalMetrics::from)
        .map_err(|err| ActivityRepositoryError::query(format!("decode additional metrics: {err}")))
}

/// Convert a database row into a domain activity.
fn row_to_activity(row: ActivityRow) -> Result<Activity, ActivityRepositoryError> {
    let ActivityRow {
        id,
        user_id,
        activity_type,
        duration,
        calories_burned,
        start_time,
        additional_metrics,
        created_at,
        updated_at,
    } = row;

    let user_id = UserId::new(&user_id)
        .map_err(|err| ActivityRepositoryError::query(format!("stored user id: {err}")))?;
    let activity_type = activity_type
        .parse::<ActivityType>()
        .map_err(|err| ActivityRepositoryError::query(err.to_string()))?;

    Ok(Activity::new(ActivityDraft {
        id: ActivityId::from_uuid(id),
        content: NewActivity {
            user_id,
            activity_type,
            duration,
            calories_burned,
            start_time,
            additional_metrics: decode_metrics(additional_metrics)?,
        },
        created_at,
        updated_at,
    }))
}

#[async_trait]
impl ActivityRepository for DieselActivityRepository {
    async fn insert(&self, activity: &NewActivity) -> Result<Activity, ActivityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let additional_metrics = encode_metrics(&activity.additional_metrics)?;

        let new_row = NewActivityRow {
            user_id: activity.user_id.as_ref(),
            activity_type: activity.activity_type.as_str(),
            duration: activity.duration,
            calories_burned: activity.calories_burned,
            start_time: activity.start_time,
            additional_metrics: &additional_metrics,
        };

        let row = diesel::insert_into(activities::table)
            .values(&new_row)
            .returning(ActivityRow::as_returning())
            .get_result::<ActivityRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_activity(row)
    }

    async fn find_by_id(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Option<Activity>, ActivityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = activities::table
            .filter(activities::id.eq(activity_id.as_uuid()))
            .select(ActivityRow::as_select())
            .first::<ActivityRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_activity).transpose()
    }

    async fn find_by_owner(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Activity>, ActivityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ActivityRow> = activities::table
            .filter(activities::user_id.eq(user_id.as_ref()))
            .order((activities::created_at.asc(), activities::id.asc()))
            .select(ActivityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_activity).collect()
    }
}
