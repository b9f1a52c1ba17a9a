//! Owning user identifier for activity records.
//!
//! User identifiers are issued by the external identity service and are
//! treated as opaque strings here. The only local rule is that they carry
//! visible content.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned when constructing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdValidationError {
    /// The identifier was empty or contained only whitespace.
    #[error("user id must not be empty")]
    Empty,
}

/// Identifier of the user owning an activity.
///
/// # Examples
/// ```
/// use activity_service::domain::UserId;
///
/// let id = UserId::new("u1").expect("valid user id");
/// assert_eq!(id.as_ref(), "u1");
/// assert!(UserId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserIdValidationError> {
        if id.trim().is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain("u1")]
    #[case::uuid("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[case::email_like("ada@example.com")]
    #[case::surrounding_whitespace(" u1 ")]
    fn accepts_opaque_identifiers(#[case] raw: &str) {
        let id = UserId::new(raw).expect("identifier accepted");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    #[case::empty("", UserIdValidationError::Empty)]
    #[case::blank("   ", UserIdValidationError::Empty)]
    fn rejects_blank_identifiers(
        #[case] raw: &str,
        #[case] expected: UserIdValidationError,
    ) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    fn deserialisation_applies_validation() {
        let parsed: Result<UserId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let id: UserId = serde_json::from_str("\"u1\"").expect("valid json id");
        assert_eq!(id.as_ref(), "u1");

        let kept: UserId = serde_json::from_str("\"u1 \"").expect("whitespace is kept");
        assert_eq!(kept.as_ref(), "u1 ");
    }
}
