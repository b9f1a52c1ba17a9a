//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Recorded fitness activities.
    ///
    /// One row per successful tracking request. Rows are never updated or
    /// deleted by the service.
    activities (id) {
        /// Primary key generated by the database (`gen_random_uuid()`).
        id -> Uuid,
        /// Owning user identifier as issued by the identity service.
        user_id -> Text,
        /// Snake_case activity category label.
        activity_type -> Text,
        /// Duration in minutes.
        duration -> Int4,
        /// Calories burned during the activity.
        calories_burned -> Int4,
        /// When the activity started.
        start_time -> Timestamptz,
        /// Caller-supplied metrics stored verbatim.
        additional_metrics -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
