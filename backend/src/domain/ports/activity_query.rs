//! Driving port for activity read operations.

use async_trait::async_trait;

use crate::domain::{ActivityId, Error, UserId};

use super::activity_command::ActivityResponse;

/// Driving port for reading recorded activities.
///
/// # Examples
///
/// ```rust,no_run
/// # use activity_service::domain::UserId;
/// # use activity_service::domain::ports::{ActivityQuery, FixtureActivityQuery};
/// # async fn example() -> Result<(), activity_service::domain::Error> {
/// let query = FixtureActivityQuery;
/// let user_id = UserId::new("u1").expect("valid user id");
/// let activities = query.list_by_user(&user_id).await?;
/// assert!(activities.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityQuery: Send + Sync {
    /// List every activity owned by `user_id` in store order.
    ///
    /// A user without activities yields an empty list rather than an error.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<ActivityResponse>, Error>;

    /// Fetch one activity by identifier, failing with
    /// [`crate::domain::ErrorCode::NotFound`] when it does not exist.
    async fn get_by_id(&self, activity_id: &ActivityId) -> Result<ActivityResponse, Error>;
}

/// Fixture query backed by no data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActivityQuery;

#[async_trait]
impl ActivityQuery for FixtureActivityQuery {
    async fn list_by_user(&self, _user_id: &UserId) -> Result<Vec<ActivityResponse>, Error> {
        Ok(Vec::new())
    }

    async fn get_by_id(&self, activity_id: &ActivityId) -> Result<ActivityResponse, Error> {
        Err(Error::not_found(format!("activity {activity_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[tokio::test]
    async fn fixture_query_reports_missing_activity() {
        let id = ActivityId::random();

        let error = FixtureActivityQuery
            .get_by_id(&id)
            .await
            .expect_err("fixture has no activities");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert!(error.message().contains(&id.to_string()));
    }
}
