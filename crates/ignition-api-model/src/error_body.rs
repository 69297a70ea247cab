//! Structured error body returned by the gateway on failed requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured failure reported by the gateway.
///
/// Every part is optional on the wire. A body only counts as structured when
/// at least one of `messages`, `field_messages` or `problem` is populated; see
/// [`ApiErrorBody::is_structured`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Success flag (always false in practice)
    #[serde(default)]
    pub success: bool,
    /// Top-level messages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
    /// Per-field validation messages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_messages: Vec<FieldMessages>,
    /// Server-side exception details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<Problem>,
}

/// Validation messages attached to one field path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMessages {
    /// Dotted path of the offending field (e.g. `config.port`)
    #[serde(default)]
    pub field_name: String,
    /// Messages for this field
    #[serde(default)]
    pub messages: Vec<String>,
}

/// Exception details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Exception message
    #[serde(default)]
    pub message: String,
    /// Stack trace lines, when the gateway exposes them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stacktrace: Vec<String>,
}

impl ApiErrorBody {
    /// Try to read a structured error from a raw response body.
    ///
    /// Returns `None` when the body is not JSON of this shape or carries none
    /// of the informative parts.
    #[must_use]
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .filter(Self::is_structured)
    }

    /// Whether any informative part is present.
    #[must_use]
    pub fn is_structured(&self) -> bool {
        self.problem.is_some() || !self.messages.is_empty() || !self.field_messages.is_empty()
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(problem) = &self.problem {
            write!(f, "API error: {}", problem.message)?;
        } else if !self.messages.is_empty() {
            write!(f, "API error: {}", self.messages.join("; "))?;
        } else {
            f.write_str("API error: unknown API error")?;
        }

        if !self.field_messages.is_empty() {
            let groups: Vec<String> = self.field_messages.iter().map(ToString::to_string).collect();
            write!(f, " (Field Errors: {})", groups.join("; "))?;
        }
        Ok(())
    }
}

impl fmt::Display for FieldMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_name, self.messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_messages_and_field_errors() {
        let body = br#"{
            "success": false,
            "messages": ["Top level error"],
            "fieldMessages": [{"fieldName": "config.port", "messages": ["Must be integer"]}]
        }"#;

        let err = ApiErrorBody::parse(body).unwrap();
        assert_eq!(
            err.to_string(),
            "API error: Top level error (Field Errors: config.port: Must be integer)"
        );
    }

    #[test]
    fn problem_takes_precedence_over_messages() {
        let body = br#"{
            "messages": ["ignored"],
            "problem": {"message": "NullPointerException", "stacktrace": ["at Foo.bar"]}
        }"#;

        let err = ApiErrorBody::parse(body).unwrap();
        assert_eq!(err.to_string(), "API error: NullPointerException");
        assert_eq!(err.problem.unwrap().stacktrace, vec!["at Foo.bar"]);
    }

    #[test]
    fn field_errors_alone_keep_api_error_prefix() {
        let err = ApiErrorBody {
            field_messages: vec![FieldMessages {
                field_name: "name".to_string(),
                messages: vec!["Required".to_string(), "Too short".to_string()],
            }],
            ..Default::default()
        };

        assert_eq!(
            err.to_string(),
            "API error: unknown API error (Field Errors: name: Required, Too short)"
        );

        let parsed =
            ApiErrorBody::parse(br#"{"fieldMessages":[{"fieldName":"name","messages":["Required"]}]}"#)
                .unwrap();
        assert!(parsed.to_string().starts_with("API error: "));
    }

    #[test]
    fn bare_success_flag_is_not_structured() {
        assert!(ApiErrorBody::parse(br#"{"success": false}"#).is_none());
        assert!(ApiErrorBody::parse(b"Critical System Failure").is_none());
        assert!(ApiErrorBody::parse(b"").is_none());
    }
}
