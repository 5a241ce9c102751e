//! Correlation token linking an authorization request to its callback.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Opaque, non-empty token carried through the provider round trip as the
/// OAuth `state` parameter.
///
/// Its value is the name of the tool that is waiting for authentication,
/// so two callers asking to authorize the same tool share a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CorrelationToken(String);

impl CorrelationToken {
    /// Creates a token from the trimmed value, rejecting empty or
    /// whitespace-only input.
    ///
    /// Trimming keeps the token recorded by `auth` equal to the one parsed
    /// from the callback query.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("correlation_token"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CorrelationToken {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CorrelationToken> for String {
    fn from(token: CorrelationToken) -> Self {
        token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_tool_name() {
        let token = CorrelationToken::new("list_events").unwrap();
        assert_eq!(token.as_str(), "list_events");
        assert_eq!(token.to_string(), "list_events");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let padded = CorrelationToken::new(" list_events\n").unwrap();
        assert_eq!(padded.as_str(), "list_events");
        assert_eq!(padded, CorrelationToken::new("list_events").unwrap());
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(CorrelationToken::new("").is_err());
        assert!(CorrelationToken::new("   ").is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: CorrelationToken = serde_json::from_str("\"get_event\"").unwrap();
        assert_eq!(ok.as_str(), "get_event");
        assert!(serde_json::from_str::<CorrelationToken>("\"\"").is_err());
    }
}
