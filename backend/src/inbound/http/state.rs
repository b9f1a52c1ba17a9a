//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ActivityCommand, ActivityQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub activities: Arc<dyn ActivityCommand>,
    pub activities_query: Arc<dyn ActivityQuery>,
}

impl HttpState {
    /// Construct state from the activity driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use activity_service::domain::ports::{FixtureActivityCommand, FixtureActivityQuery};
    /// use activity_service::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureActivityCommand),
    ///     Arc::new(FixtureActivityQuery),
    /// );
    /// let _query = state.activities_query.clone();
    /// ```
    pub fn new(
        activities: Arc<dyn ActivityCommand>,
        activities_query: Arc<dyn ActivityQuery>,
    ) -> Self {
        Self {
            activities,
            activities_query,
        }
    }

    /// Share one service implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ActivityCommand + ActivityQuery + 'static,
    {
        Self::new(service.clone(), service)
    }
}
