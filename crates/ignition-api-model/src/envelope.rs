//! Resource envelope and change-set reply.
//!
//! The gateway addresses every configurable resource by `(module, type, name)`
//! and wraps its attributes in the same outer shape. Only `config` varies per
//! resource kind.

use serde::{Deserialize, Serialize};

/// Module that owns the resource kinds shipped with the gateway itself.
pub const DEFAULT_MODULE: &str = "ignition";

/// Universal wrapper around a resource configuration.
///
/// `signature` is issued by the gateway on every create/update and must be
/// echoed verbatim on the next update or delete. It is never synthesized on
/// the client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEnvelope<C> {
    /// Module owning the resource (e.g. `ignition`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub module: String,
    /// Resource kind inside its module
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Unique name within `(module, type)`; empty addresses the singleton
    #[serde(default)]
    pub name: String,
    /// Enabled flag; `None` leaves the gateway default in place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Free-text description; empty is omitted on send
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Optimistic-concurrency token issued by the gateway
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub signature: String,
    /// Kind-specific attributes
    #[serde(default)]
    pub config: C,
}

impl<C: Default> ResourceEnvelope<C> {
    /// Create an envelope with the given name and a default payload.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, C::default())
    }
}

impl<C> ResourceEnvelope<C> {
    /// Create an envelope carrying `config` under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            module: String::new(),
            kind: String::new(),
            name: name.into(),
            enabled: None,
            description: String::new(),
            signature: String::new(),
            config,
        }
    }

    /// Set the enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Carry over the signature last observed from the gateway.
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Whether the envelope addresses the singleton of its `(module, type)`.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.name.is_empty()
    }
}

/// Reply to a mutation that lists affected resources instead of returning them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Success flag reported by the gateway
    #[serde(default)]
    pub success: bool,
    /// Affected resources, in gateway order
    #[serde(default)]
    pub changes: Vec<ChangeRecord>,
}

impl ChangeSet {
    /// The first affected resource, the only one a follow-up read looks at.
    #[must_use]
    pub fn first(&self) -> Option<&ChangeRecord> {
        self.changes.first()
    }
}

/// One entry of a [`ChangeSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    /// Resource name
    #[serde(default)]
    pub name: String,
    /// Resource type
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Collection the resource was written to
    #[serde(default)]
    pub collection: String,
    /// Signature issued for the new revision
    #[serde(default)]
    pub new_signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    #[test]
    fn optional_fields_omitted_on_send() {
        let env: ResourceEnvelope<Value> = ResourceEnvelope::new("db1", json!({"driver": "pg"}));
        let wire = serde_json::to_value(&env).unwrap();

        assert_eq!(wire, json!({"name": "db1", "config": {"driver": "pg"}}));
    }

    #[test]
    fn present_fields_use_wire_names() {
        let mut env = ResourceEnvelope::new("db1", Map::new())
            .with_enabled(false)
            .with_description("primary")
            .with_signature("sig-1");
        env.module = DEFAULT_MODULE.to_string();
        env.kind = "database-connection".to_string();

        let wire = serde_json::to_value(&env).unwrap();
        assert_eq!(wire["module"], "ignition");
        assert_eq!(wire["type"], "database-connection");
        assert_eq!(wire["enabled"], false);
        assert_eq!(wire["description"], "primary");
        assert_eq!(wire["signature"], "sig-1");
    }

    #[test]
    fn missing_config_defaults() {
        let env: ResourceEnvelope<Map<String, Value>> =
            serde_json::from_str(r#"{"name":"new-resource","signature":"sig-789"}"#).unwrap();

        assert_eq!(env.name, "new-resource");
        assert_eq!(env.signature, "sig-789");
        assert!(env.config.is_empty());
        assert!(env.enabled.is_none());
        assert!(env.description.is_empty());
    }

    #[test]
    fn change_set_reads_new_signature() {
        let body = r#"{"success":true,"changes":[{"name":"a","type":"t","collection":"c","newSignature":"s"}]}"#;
        let set: ChangeSet = serde_json::from_str(body).unwrap();

        assert!(set.success);
        let first = set.first().unwrap();
        assert_eq!(first.name, "a");
        assert_eq!(first.kind, "t");
        assert_eq!(first.new_signature, "s");
    }

    #[test]
    fn empty_name_is_singleton() {
        let env: ResourceEnvelope<Value> = ResourceEnvelope::named("");
        assert!(env.is_singleton());
    }
}
