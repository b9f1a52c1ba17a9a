//! In-process activity store used when no database is configured.
//!
//! Records live in a mutex-guarded vector so per-owner reads come back in
//! insertion order. Timestamps are taken from an injected clock.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{ActivityRepository, ActivityRepositoryError};
use crate::domain::{Activity, ActivityDraft, ActivityId, NewActivity, UserId};

/// Activity repository holding records in memory.
#[derive(Clone)]
pub struct InMemoryActivityRepository {
    records: Arc<Mutex<Vec<Activity>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryActivityRepository {
    /// Create an empty repository stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            clock,
        }
    }

    fn records(&self) -> Result<MutexGuard<'_, Vec<Activity>>, ActivityRepositoryError> {
        self.records
            .lock()
            .map_err(|_| ActivityRepositoryError::connection("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn insert(&self, activity: &NewActivity) -> Result<Activity, ActivityRepositoryError> {
        let now = self.clock.utc();
        let stored = Activity::new(ActivityDraft {
            id: ActivityId::random(),
            content: activity.clone(),
            created_at: now,
            updated_at: now,
        });
        self.records()?.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Option<Activity>, ActivityRepositoryError> {
        Ok(self
            .records()?
            .iter()
            .find(|activity| activity.id() == *activity_id)
            .cloned())
    }

    async fn find_by_owner(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Activity>, ActivityRepositoryError> {
        Ok(self
            .records()?
            .iter()
            .filter(|activity| activity.user_id() == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::domain::{ActivityType, AdditionalMetrics};

    #[fixture]
    fn repository() -> InMemoryActivityRepository {
        let now = Utc
            .with_ymd_and_hms(2026, 4, 2, 9, 0, 0)
            .single()
            .expect("fixture timestamp");
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(now);
        InMemoryActivityRepository::new(Arc::new(clock))
    }

    fn draft(owner: &str, activity_type: ActivityType) -> NewActivity {
        NewActivity {
            user_id: UserId::new(owner).expect("valid user id"),
            activity_type,
            duration: 25,
            calories_burned: 200,
            start_time: Utc::now(),
            additional_metrics: AdditionalMetrics::from_iter([(
                "laps".to_owned(),
                json!(12),
            )]),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_identity_and_clock_timestamps(repository: InMemoryActivityRepository) {
        let first = repository
            .insert(&draft("u1", ActivityType::Swimming))
            .await
            .expect("insert succeeds");
        let second = repository
            .insert(&draft("u1", ActivityType::Swimming))
            .await
            .expect("insert succeeds");

        assert_ne!(first.id(), second.id());
        assert_eq!(first.created_at(), first.updated_at());
        assert_eq!(
            first.created_at(),
            Utc.with_ymd_and_hms(2026, 4, 2, 9, 0, 0)
                .single()
                .expect("fixture timestamp")
        );
        assert_eq!(first.additional_metrics().get("laps"), Some(&json!(12)));
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_id_returns_stored_copy(repository: InMemoryActivityRepository) {
        let stored = repository
            .insert(&draft("u1", ActivityType::Hiit))
            .await
            .expect("insert succeeds");

        let found = repository
            .find_by_id(&stored.id())
            .await
            .expect("lookup succeeds");
        let missing = repository
            .find_by_id(&ActivityId::random())
            .await
            .expect("lookup succeeds");

        assert_eq!(found, Some(stored));
        assert!(missing.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_owner_keeps_insertion_order(repository: InMemoryActivityRepository) {
        let kinds = [ActivityType::Running, ActivityType::Yoga, ActivityType::Cycling];
        for kind in kinds {
            repository
                .insert(&draft("u1", kind))
                .await
                .expect("insert succeeds");
            repository
                .insert(&draft("u2", ActivityType::Other))
                .await
                .expect("insert succeeds");
        }

        let owned = repository
            .find_by_owner(&UserId::new("u1").expect("valid user id"))
            .await
            .expect("lookup succeeds");
        let none = repository
            .find_by_owner(&UserId::new("u3").expect("valid user id"))
            .await
            .expect("lookup succeeds");

        let observed: Vec<ActivityType> = owned.iter().map(Activity::activity_type).collect();
        assert_eq!(observed, kinds);
        assert!(none.is_empty());
    }
}
