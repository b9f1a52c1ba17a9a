//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, UserId, UserIdValidationError};

/// Validation error codes carried in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    BlankUserId,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            ValidationCode::MissingField => "missing_field",
            ValidationCode::BlankUserId => "blank_user_id",
            ValidationCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field and header names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("missing required field: {name}"),
        ValidationCode::MissingField,
    )
}

pub(crate) fn malformed_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("malformed request body: {reason}")).with_details(json!({
        "code": ValidationCode::MalformedBody.as_str(),
    }))
}

/// Parse a caller-supplied user identifier.
pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|err| match err {
        UserIdValidationError::Empty => field_error(
            field,
            format!("{} must not be blank", field.as_str()),
            ValidationCode::BlankUserId,
        ),
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ErrorCode;

    const USER_ID: FieldName = FieldName::new("userId");

    fn detail_code(error: &Error) -> Option<&str> {
        error
            .details()
            .and_then(|details| details.get("code"))
            .and_then(Value::as_str)
    }

    #[rstest]
    #[case::plain("u1")]
    #[case::surrounding_whitespace(" u1 ")]
    fn non_blank_user_ids_parse_verbatim(#[case] raw: &str) {
        let user_id = parse_user_id(raw, USER_ID).expect("valid user id");
        assert_eq!(user_id.as_ref(), raw);
    }

    #[rstest]
    #[case::empty("", "blank_user_id")]
    #[case::whitespace("   ", "blank_user_id")]
    fn bad_user_ids_are_invalid_requests(#[case] raw: &str, #[case] code: &str) {
        let error = parse_user_id(raw, USER_ID).expect_err("rejected");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail_code(&error), Some(code));
        assert!(error.message().starts_with("userId"));
    }

    #[rstest]
    fn missing_field_names_the_field() {
        let error = missing_field_error(FieldName::new("X-User-ID"));

        assert_eq!(error.message(), "missing required field: X-User-ID");
        assert_eq!(detail_code(&error), Some("missing_field"));
    }
}
