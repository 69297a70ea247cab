//! Secret envelope placed in payload fields that accept secrets.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the gateway stores a secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecretKind {
    /// Ciphertext embedded in the resource (JWE-shaped `data`)
    Embedded,
    /// Reference to a secret held by a secret provider
    Referenced,
}

/// A secret value as the gateway expects it inside resource payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    /// Storage kind
    #[serde(rename = "type")]
    pub kind: SecretKind,
    /// Opaque payload, round-tripped as-is
    pub data: Value,
}

impl Secret {
    /// Wrap the gateway's encryption result as an embedded secret.
    #[must_use]
    pub fn embedded(data: Value) -> Self {
        Self {
            kind: SecretKind::Embedded,
            data,
        }
    }
}
