//! Project model. Projects use their own endpoints instead of the generic
//! resource surface.

use serde::{Deserialize, Serialize};

/// A gateway project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project name, also its address
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Display title
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Whether the project is enabled
    #[serde(default)]
    pub enabled: bool,
    /// Parent project to inherit from
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent: String,
    /// Whether other projects may inherit from this one
    #[serde(default)]
    pub inheritable: bool,
    /// Default database connection
    #[serde(rename = "defaultDb", default, skip_serializing_if = "String::is_empty")]
    pub default_db: String,
    /// Default tag provider
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag_provider: String,
    /// User source
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_source: String,
    /// Identity provider
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub identity_provider: String,
}

impl Project {
    /// Create an enabled project with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_names() {
        let project = Project {
            default_db: "main".to_string(),
            tag_provider: "default".to_string(),
            ..Project::new("hmi")
        };

        let wire = serde_json::to_value(&project).unwrap();
        assert_eq!(
            wire,
            json!({
                "name": "hmi",
                "enabled": true,
                "inheritable": false,
                "defaultDb": "main",
                "tagProvider": "default"
            })
        );
    }
}
