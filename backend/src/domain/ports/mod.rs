//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`UserValidator`], [`ActivityRepository`],
//! [`ActivityEventPublisher`]) are implemented by outbound adapters. Driving
//! ports ([`ActivityCommand`], [`ActivityQuery`]) are implemented by domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod activity_command;
mod activity_event_publisher;
mod activity_query;
mod activity_repository;
mod user_validator;

#[cfg(test)]
pub use activity_command::MockActivityCommand;
pub use activity_command::{
    ActivityCommand, ActivityResponse, FixtureActivityCommand, TrackActivityRequest,
};
#[cfg(test)]
pub use activity_event_publisher::MockActivityEventPublisher;
pub use activity_event_publisher::{
    ActivityEventPublisher, ActivityEventRoute, PublishError,
};
#[cfg(test)]
pub use activity_query::MockActivityQuery;
pub use activity_query::{ActivityQuery, FixtureActivityQuery};
#[cfg(test)]
pub use activity_repository::MockActivityRepository;
pub use activity_repository::{ActivityRepository, ActivityRepositoryError};
#[cfg(test)]
pub use user_validator::MockUserValidator;
pub use user_validator::{FixtureUserValidator, UserValidationError, UserValidator};
