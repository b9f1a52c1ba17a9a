//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope, branching on
//! [`ErrorCode`] rather than message text.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The identity service rejected the originating user.
    InvalidUser,
    /// The requested resource does not exist.
    NotFound,
    /// The activity store could not complete the operation.
    StoreUnavailable,
    /// The identity service could not be reached to validate the user.
    ValidationUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// Captures the trace identifier in scope at construction time so failures
/// can be correlated with request logs.
///
/// # Examples
/// ```
/// use activity_service::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("activity 42 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "activity 42 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct Error {
    #[schema(example = "invalid_user")]
    code: ErrorCode,
    #[schema(example = "invalid user: u1")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error bound to the current trace identifier, if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was raised.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use activity_service::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "userId" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidUser`].
    pub fn invalid_user(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidUser, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::StoreUnavailable`].
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::ValidationUnavailable`].
    pub fn validation_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    #[rstest]
    #[case::invalid_request(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
    #[case::invalid_user(Error::invalid_user("x"), ErrorCode::InvalidUser)]
    #[case::not_found(Error::not_found("x"), ErrorCode::NotFound)]
    #[case::store_unavailable(Error::store_unavailable("x"), ErrorCode::StoreUnavailable)]
    #[case::validation_unavailable(
        Error::validation_unavailable("x"),
        ErrorCode::ValidationUnavailable
    )]
    #[case::internal(Error::internal("x"), ErrorCode::InternalError)]
    fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn serialises_with_snake_case_code_and_camel_case_fields() {
        let error = Error::invalid_user("invalid user: u1")
            .with_trace_id("abc")
            .with_details(json!({ "userId": "u1" }));

        let value = serde_json::to_value(&error).expect("serialises");
        assert_eq!(
            value,
            json!({
                "code": "invalid_user",
                "message": "invalid user: u1",
                "traceId": "abc",
                "details": { "userId": "u1" }
            })
        );
    }

    #[rstest]
    fn optional_fields_are_omitted() {
        let value = serde_json::to_value(Error::not_found("gone")).expect("serialises");
        assert_eq!(value, json!({ "code": "not_found", "message": "gone" }));
    }

    #[tokio::test]
    async fn captures_trace_id_in_scope() {
        let trace_id = TraceId::from_uuid(Uuid::nil());
        let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(error.trace_id(), Some(Uuid::nil().to_string().as_str()));
    }

    #[tokio::test]
    async fn omits_trace_id_out_of_scope() {
        assert!(Error::internal("boom").trace_id().is_none());
    }
}
