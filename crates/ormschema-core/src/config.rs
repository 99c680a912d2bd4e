//! Schema construction configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How a table resolves a second column claiming a single-slot role
/// (auto-increment, updated, deleted, version).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleConflictPolicy {
    /// The most recently added column takes the slot.
    #[default]
    LastWins,
    /// `Table::try_add_column` refuses the second column.
    Reject,
}

/// Configuration applied to tables built during schema discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Conflict policy for single-slot roles.
    pub role_conflict: RoleConflictPolicy,

    /// Storage engine assigned to new tables (MySQL `ENGINE=`), if any.
    pub default_store_engine: Option<String>,

    /// Character set assigned to new tables, if any.
    pub default_charset: Option<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            role_conflict: RoleConflictPolicy::LastWins,
            default_store_engine: None,
            default_charset: None,
        }
    }
}

impl SchemaConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config that rejects duplicate single-slot roles.
    pub fn strict() -> Self {
        Self {
            role_conflict: RoleConflictPolicy::Reject,
            ..Default::default()
        }
    }

    /// Set the role conflict policy.
    pub fn with_role_conflict(mut self, policy: RoleConflictPolicy) -> Self {
        self.role_conflict = policy;
        self
    }

    /// Set the default storage engine.
    pub fn with_store_engine(mut self, engine: impl Into<String>) -> Self {
        self.default_store_engine = Some(engine.into());
        self
    }

    /// Set the default character set.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.default_charset = Some(charset.into());
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SchemaConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Whether duplicate single-slot roles are rejected.
    pub fn is_strict(&self) -> bool {
        self.role_conflict == RoleConflictPolicy::Reject
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;

    #[test]
    fn test_default_is_last_wins() {
        let config = SchemaConfig::default();
        assert_eq!(config.role_conflict, RoleConflictPolicy::LastWins);
        assert!(!config.is_strict());
        assert!(config.default_store_engine.is_none());
    }

    #[test]
    fn test_builder() {
        let config = SchemaConfig::strict()
            .with_store_engine("InnoDB")
            .with_charset("utf8mb4");

        assert!(config.is_strict());
        assert_eq!(config.default_store_engine.as_deref(), Some("InnoDB"));
        assert_eq!(config.default_charset.as_deref(), Some("utf8mb4"));
    }

    #[test]
    fn test_from_json_partial() {
        let config = SchemaConfig::from_json(r#"{"role_conflict": "reject"}"#).unwrap();
        assert!(config.is_strict());
        assert!(config.default_charset.is_none());

        let empty = SchemaConfig::from_json("{}").unwrap();
        assert_eq!(empty, SchemaConfig::default());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = SchemaConfig::from_json(r#"{"role_conflict": "sometimes"}"#).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidConfig(_)));
    }
}
