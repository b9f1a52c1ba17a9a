//! Port for checking users against the external identity service.

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user validator adapters.
    ///
    /// An unknown user is not an error; adapters report it as `Ok(false)`.
    pub enum UserValidationError {
        /// The identity service could not be reached or answered with a
        /// server-side failure.
        Unavailable { message: String } =>
            "identity service unavailable: {message}",
        /// The identity service answered with a payload that could not be
        /// interpreted.
        InvalidResponse { message: String } =>
            "identity service returned an invalid response: {message}",
    }
}

/// Port answering whether a user identifier is currently valid.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserValidator: Send + Sync {
    /// Return `true` when the identity service recognises `user_id`.
    async fn validate(&self, user_id: &UserId) -> Result<bool, UserValidationError>;
}

/// Fixture validator accepting every user.
///
/// Used when no identity service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserValidator;

#[async_trait]
impl UserValidator for FixtureUserValidator {
    async fn validate(&self, _user_id: &UserId) -> Result<bool, UserValidationError> {
        Ok(true)
    }
}
