//! Normalization of the gateway's reply shapes.
//!
//! A successful mutation may answer with the envelope itself, an array of
//! envelopes, or a change-set naming the affected resource. The body is
//! parsed once into a neutral JSON value, classified into a [`Reply`], and
//! only then projected onto the caller's payload type. Nothing here depends
//! on the payload type until that last step.

use crate::error::ClientError;
use ignition_api_model::{ChangeSet, ResourceEnvelope};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Classified mutation reply.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Reply {
    /// `{"changes": [...]}`: the resource must be read back
    ChangeSet(ChangeSet),
    /// A single envelope object
    Single(Value),
    /// An array of envelope objects
    Many(Vec<Value>),
}

/// What a mutation reply resolves to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Resolution<C> {
    /// The reply carried the envelope
    Envelope(ResourceEnvelope<C>),
    /// The envelope must be fetched under this name
    FollowUp(String),
}

/// Parse and classify a mutation reply body.
pub(crate) fn classify(body: &[u8]) -> Result<Reply, ClientError> {
    if is_blank(body) {
        return Err(ClientError::EmptyBody);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ClientError::Unmarshal(e.to_string()))?;

    let is_change_set = value.get("changes").is_some_and(Value::is_array);
    match value {
        Value::Object(_) if is_change_set => {
            let changes: ChangeSet =
                serde_json::from_value(value).map_err(|e| ClientError::Unmarshal(e.to_string()))?;
            Ok(Reply::ChangeSet(changes))
        }
        Value::Object(_) => Ok(Reply::Single(value)),
        Value::Array(items) => Ok(Reply::Many(items)),
        other => Err(ClientError::Unmarshal(format!(
            "expected an object or array, got {}",
            json_type(&other)
        ))),
    }
}

impl Reply {
    /// Project the reply onto payload type `C`.
    pub(crate) fn resolve<C>(self) -> Result<Resolution<C>, ClientError>
    where
        C: DeserializeOwned + Default,
    {
        match self {
            Self::ChangeSet(changes) => {
                let first = changes.first().ok_or(ClientError::EmptyChangeSet)?;
                if first.name.is_empty() {
                    return Err(ClientError::UnnamedChange);
                }
                Ok(Resolution::FollowUp(first.name.clone()))
            }
            Self::Single(value) => envelope_from_value(value).map(Resolution::Envelope),
            Self::Many(items) => {
                let first = items
                    .into_iter()
                    .next()
                    .ok_or_else(|| ClientError::Unmarshal("no resources returned".to_string()))?;
                envelope_from_value(first).map(Resolution::Envelope)
            }
        }
    }
}

/// Decode the body of a read as a single envelope.
pub(crate) fn decode_envelope<C: DeserializeOwned + Default>(
    body: &[u8],
) -> Result<ResourceEnvelope<C>, ClientError> {
    decode_json(body)
}

/// Decode a non-empty JSON body into `T`.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    if is_blank(body) {
        return Err(ClientError::EmptyBody);
    }
    serde_json::from_slice(body).map_err(|e| ClientError::Unmarshal(e.to_string()))
}

fn envelope_from_value<C: DeserializeOwned + Default>(
    value: Value,
) -> Result<ResourceEnvelope<C>, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Unmarshal(e.to_string()))
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};

    type Env = ResourceEnvelope<Map<String, Value>>;

    fn resolve(body: &str) -> Result<Resolution<Map<String, Value>>, ClientError> {
        classify(body.as_bytes())?.resolve()
    }

    #[test]
    fn empty_body() {
        let err = classify(b"").unwrap_err();
        assert_eq!(err.to_string(), "empty response body");

        let err = decode_envelope::<Value>(b"  \n").unwrap_err();
        assert_eq!(err.to_string(), "empty response body");
    }

    #[test]
    fn change_set_requests_follow_up() {
        let body = r#"{"success":true,"changes":[
            {"name":"new-resource","type":"test","collection":"tests","newSignature":"sig-789"},
            {"name":"other","type":"test","collection":"tests","newSignature":"sig-790"}
        ]}"#;

        assert_eq!(
            resolve(body).unwrap(),
            Resolution::FollowUp("new-resource".to_string())
        );
    }

    #[test]
    fn empty_change_set_fails() {
        let err = resolve(r#"{"success":true,"changes":[]}"#).unwrap_err();
        assert!(matches!(err, ClientError::EmptyChangeSet));
    }

    #[test]
    fn unnamed_change_fails() {
        let err = resolve(r#"{"success":true,"changes":[{"type":"test"}]}"#).unwrap_err();
        assert!(matches!(err, ClientError::UnnamedChange));
    }

    #[test]
    fn single_object_decodes_directly() {
        let body = r#"{"name":"test-name","enabled":true,"signature":"sig-1","config":{"key":"value"}}"#;
        let Resolution::Envelope(env) = resolve(body).unwrap() else {
            panic!("expected envelope");
        };

        assert_eq!(env.name, "test-name");
        assert_eq!(env.enabled, Some(true));
        assert_eq!(env.config["key"], "value");
    }

    #[test]
    fn array_takes_first_entry() {
        let body = r#"[{"name":"first","signature":"sig-123"},{"name":"second"}]"#;
        let Resolution::Envelope(env) = resolve(body).unwrap() else {
            panic!("expected envelope");
        };

        assert_eq!(env.name, "first");
        assert_eq!(env.signature, "sig-123");
    }

    #[test]
    fn empty_array_fails() {
        let err = resolve("[]").unwrap_err();
        assert!(err.to_string().contains("failed to unmarshal response"));
    }

    #[test]
    fn scalars_and_garbage_fail() {
        for body in ["42", r#""text""#, "null", r#"{"incomplete": "#] {
            let err = resolve(body).unwrap_err();
            assert!(
                err.to_string().starts_with("failed to unmarshal response"),
                "{body}: {err}"
            );
        }
    }

    #[test]
    fn changes_key_must_be_an_array() {
        let reply = classify(br#"{"name":"x","changes":"none"}"#).unwrap();
        assert!(matches!(reply, Reply::Single(_)));
    }

    #[test]
    fn typed_payload_mismatch_is_unmarshal_error() {
        #[derive(Debug, Default, serde::Deserialize)]
        struct Port {
            #[allow(dead_code)]
            port: u16,
        }

        let err = classify(br#"{"name":"x","config":{"port":"high"}}"#)
            .unwrap()
            .resolve::<Port>()
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to unmarshal response"));

        let ok: Env = decode_envelope(br#"{"name":"x"}"#).unwrap();
        assert_eq!(ok.name, "x");
    }
}
