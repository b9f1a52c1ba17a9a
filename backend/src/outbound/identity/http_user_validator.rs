//! Reqwest-backed user validator.
//!
//! Asks the identity service `GET {base}/api/users/{userId}/validate` and
//! expects a bare JSON boolean. A 404 means the user is unknown, which is a
//! negative answer rather than a failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::domain::UserId;
use crate::domain::ports::{UserValidationError, UserValidator};

/// User validator calling the identity service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUserValidator {
    client: Client,
    base_url: Url,
}

impl HttpUserValidator {
    /// Build a validator using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl UserValidator for HttpUserValidator {
    async fn validate(&self, user_id: &UserId) -> Result<bool, UserValidationError> {
        let url = validation_url(&self.base_url, user_id)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(user_id = %user_id, status = status.as_u16(), "identity service answered");
        interpret_response(status, body.as_ref())
    }
}

fn validation_url(base_url: &Url, user_id: &UserId) -> Result<Url, UserValidationError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            UserValidationError::unavailable(format!(
                "identity service base URL cannot carry a path: {base_url}"
            ))
        })?
        .pop_if_empty()
        .extend(["api", "users", user_id.as_ref(), "validate"]);
    Ok(url)
}

fn interpret_response(status: StatusCode, body: &[u8]) -> Result<bool, UserValidationError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(false);
    }
    if !status.is_success() {
        return Err(UserValidationError::unavailable(format!(
            "status {}",
            status.as_u16()
        )));
    }
    serde_json::from_slice::<bool>(body).map_err(|error| {
        UserValidationError::invalid_response(format!("expected a JSON boolean: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> UserValidationError {
    if error.is_timeout() {
        UserValidationError::unavailable(format!("request timed out: {error}"))
    } else {
        UserValidationError::unavailable(error.to_string())
    }
}

#[cfg(test)]
#[path = "http_user_validator_tests.rs"]
mod tests;
