//! Activity entity and its supporting value types.
//!
//! An [`Activity`] is created once per successful tracking request. The
//! store assigns the identifier and timestamps; everything else is supplied
//! by the caller and carried through untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Store-assigned identifier of an activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(Uuid);

impl ActivityId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ActivityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Category of a recorded activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Running,
    Walking,
    Cycling,
    Swimming,
    WeightTraining,
    Yoga,
    Hiit,
    Cardio,
    Stretching,
    Other,
}

/// Error returned when parsing an unknown [`ActivityType`] label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown activity type: {label}")]
pub struct UnknownActivityType {
    label: String,
}

impl ActivityType {
    /// Stable snake_case label used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::Swimming => "swimming",
            Self::WeightTraining => "weight_training",
            Self::Yoga => "yoga",
            Self::Hiit => "hiit",
            Self::Cardio => "cardio",
            Self::Stretching => "stretching",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "running" => Self::Running,
            "walking" => Self::Walking,
            "cycling" => Self::Cycling,
            "swimming" => Self::Swimming,
            "weight_training" => Self::WeightTraining,
            "yoga" => Self::Yoga,
            "hiit" => Self::Hiit,
            "cardio" => Self::Cardio,
            "stretching" => Self::Stretching,
            "other" => Self::Other,
            _ => {
                return Err(UnknownActivityType {
                    label: s.to_owned(),
                });
            }
        };
        Ok(kind)
    }
}

/// Open mapping of caller-supplied metric names to arbitrary JSON values.
///
/// The contents are never interpreted; they are stored and returned exactly
/// as received.
///
/// # Examples
/// ```
/// use activity_service::domain::AdditionalMetrics;
/// use serde_json::json;
///
/// let metrics = AdditionalMetrics::from_iter([("pace".to_owned(), json!("5:00"))]);
/// assert_eq!(metrics.get("pace"), Some(&json!("5:00")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdditionalMetrics(BTreeMap<String, Value>);

impl AdditionalMetrics {
    /// Look up a metric by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Number of metrics carried.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no metrics were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.0
    }
}

impl FromIterator<(String, Value)> for AdditionalMetrics {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, Value>> for AdditionalMetrics {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self(value)
    }
}

impl From<AdditionalMetrics> for BTreeMap<String, Value> {
    fn from(value: AdditionalMetrics) -> Self {
        value.0
    }
}

/// Caller-supplied activity content prior to persistence.
///
/// Has no identifier or timestamps; the store assigns those on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub user_id: UserId,
    pub activity_type: ActivityType,
    pub duration: i32,
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    pub additional_metrics: AdditionalMetrics,
}

/// Draft used to rebuild a persisted [`Activity`] inside store adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDraft {
    pub id: ActivityId,
    pub content: NewActivity,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persisted activity record as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    id: ActivityId,
    content: NewActivity,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Activity {
    /// Assemble an activity from store-provided parts.
    #[must_use]
    pub fn new(draft: ActivityDraft) -> Self {
        let ActivityDraft {
            id,
            content,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            content,
            created_at,
            updated_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.content.user_id
    }

    #[must_use]
    pub const fn activity_type(&self) -> ActivityType {
        self.content.activity_type
    }

    #[must_use]
    pub const fn duration(&self) -> i32 {
        self.content.duration
    }

    #[must_use]
    pub const fn calories_burned(&self) -> i32 {
        self.content.calories_burned
    }

    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.content.start_time
    }

    #[must_use]
    pub const fn additional_metrics(&self) -> &AdditionalMetrics {
        &self.content.additional_metrics
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Split the record back into its caller-supplied content.
    #[must_use]
    pub fn into_content(self) -> NewActivity {
        self.content
    }
}
