//! Schema error types.
//!
//! Lookups never fail with an error; a missing column, index, or role is
//! reported as `None`. Errors are reserved for the opt-in strict role mode,
//! the registry, and configuration parsing.

use thiserror::Error;

use crate::schema::ColumnRole;

/// Result alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A second column claimed a single-slot role under the reject policy.
    #[error("table `{table}` already has {role} column `{existing}`, rejecting `{column}`")]
    DuplicateRole {
        /// Table name.
        table: String,
        /// The contested role.
        role: ColumnRole,
        /// Column currently holding the role.
        existing: String,
        /// Column that was rejected.
        column: String,
    },

    /// A table with this name is already registered.
    #[error("table `{0}` is already registered")]
    DuplicateTable(String),

    /// Configuration could not be parsed.
    #[error("invalid schema config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_role_message() {
        let err = SchemaError::DuplicateRole {
            table: "user".into(),
            role: ColumnRole::AutoIncrement,
            existing: "id".into(),
            column: "seq".into(),
        };

        assert_eq!(
            err.to_string(),
            "table `user` already has auto_increment column `id`, rejecting `seq`"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SchemaError = json_err.into();
        assert!(matches!(err, SchemaError::InvalidConfig(_)));
    }
}
