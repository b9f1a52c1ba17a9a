//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::activities;

/// Row struct for reading from the activities table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ActivityRow {
    pub id: Uuid,
    pub user_id: String,
    pub activity_type: String,
    pub duration: i32,
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    pub additional_metrics: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating activity records.
///
/// Identifier and timestamps are left to column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activities)]
pub(crate) struct NewActivityRow<'a> {
    pub user_id: &'a str,
    pub activity_type: &'a str,
    pub duration: i32,
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    pub additional_metrics: &'a serde_json::Value,
}
