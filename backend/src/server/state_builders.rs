//! Builders selecting activity adapters and wiring them into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use activity_service::domain::ports::{
    ActivityEventPublisher, ActivityRepository, FixtureUserValidator, UserValidator,
};
use activity_service::domain::{ActivityService, ActivityServicePorts};
use activity_service::inbound::http::state::HttpState;
use activity_service::outbound::memory::InMemoryActivityRepository;
use activity_service::outbound::persistence::DieselActivityRepository;
use activity_service::outbound::queue::LoggingActivityEventPublisher;

use super::ServerConfig;

/// Activity service over adapters chosen at startup.
type ConfiguredActivityService =
    ActivityService<dyn UserValidator, dyn ActivityRepository, dyn ActivityEventPublisher>;

fn build_repository(config: &ServerConfig) -> Arc<dyn ActivityRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselActivityRepository::new(pool.clone())),
        None => Arc::new(InMemoryActivityRepository::new(Arc::new(DefaultClock))),
    }
}

fn build_validator(config: &ServerConfig) -> Arc<dyn UserValidator> {
    config
        .user_validator
        .clone()
        .unwrap_or_else(|| Arc::new(FixtureUserValidator))
}

fn build_publisher(config: &ServerConfig) -> Arc<dyn ActivityEventPublisher> {
    config
        .publisher
        .clone()
        .unwrap_or_else(|| Arc::new(LoggingActivityEventPublisher))
}

fn build_activity_service(config: &ServerConfig) -> Arc<ConfiguredActivityService> {
    Arc::new(ActivityService::new(
        ActivityServicePorts {
            validator: build_validator(config),
            repository: build_repository(config),
            publisher: build_publisher(config),
        },
        config.route.clone(),
    ))
}

/// Build the shared HTTP state. Called once so every worker shares the same
/// adapters, including the in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_service(build_activity_service(config)))
}
