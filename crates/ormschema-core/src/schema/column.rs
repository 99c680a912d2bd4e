//! Column definitions for mapped tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A semantic tag on a column that drives a derived table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Part of the primary key.
    PrimaryKey,
    /// Database-generated sequence value.
    AutoIncrement,
    /// Set once on insert.
    Created,
    /// Refreshed on every update.
    Updated,
    /// Soft-delete marker.
    Deleted,
    /// Optimistic-lock version counter.
    Version,
}

impl ColumnRole {
    /// All roles, in declaration order.
    pub const ALL: [ColumnRole; 6] = [
        ColumnRole::PrimaryKey,
        ColumnRole::AutoIncrement,
        ColumnRole::Created,
        ColumnRole::Updated,
        ColumnRole::Deleted,
        ColumnRole::Version,
    ];

    /// Whether a table tracks at most one column for this role.
    pub fn is_single_slot(&self) -> bool {
        matches!(
            self,
            ColumnRole::AutoIncrement
                | ColumnRole::Updated
                | ColumnRole::Deleted
                | ColumnRole::Version
        )
    }

    /// Lowercase name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::PrimaryKey => "primary_key",
            ColumnRole::AutoIncrement => "auto_increment",
            ColumnRole::Created => "created",
            ColumnRole::Updated => "updated",
            ColumnRole::Deleted => "deleted",
            ColumnRole::Version => "version",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mapped column.
///
/// Only the name and role flags are interpreted by [`Table`](super::Table);
/// the remaining attributes are carried for SQL generation in higher layers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Column {
    /// Column name as it appears in the database.
    pub name: String,
    /// Name of the source struct field, if it differs from `name`.
    pub field_name: Option<String>,
    /// SQL type, rendered verbatim by the dialect layer.
    pub sql_type: String,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// Raw SQL default expression.
    pub default: Option<String>,
    /// Column comment.
    pub comment: Option<String>,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub is_created: bool,
    pub is_updated: bool,
    pub is_deleted: bool,
    pub is_version: bool,
}

impl Column {
    /// Create a non-nullable column with no roles.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            ..Default::default()
        }
    }

    /// Set the source field name.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Allow NULL.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the default expression.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Mark as part of the primary key.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark as auto-increment.
    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    /// Mark as the created-at timestamp.
    pub fn created(mut self) -> Self {
        self.is_created = true;
        self
    }

    /// Mark as the updated-at timestamp.
    pub fn updated(mut self) -> Self {
        self.is_updated = true;
        self
    }

    /// Mark as the soft-delete timestamp.
    pub fn deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }

    /// Mark as the optimistic-lock version.
    pub fn version(mut self) -> Self {
        self.is_version = true;
        self
    }

    /// Set a role flag.
    pub fn with_role(self, role: ColumnRole) -> Self {
        match role {
            ColumnRole::PrimaryKey => self.primary_key(),
            ColumnRole::AutoIncrement => self.auto_increment(),
            ColumnRole::Created => self.created(),
            ColumnRole::Updated => self.updated(),
            ColumnRole::Deleted => self.deleted(),
            ColumnRole::Version => self.version(),
        }
    }

    /// Check whether the column carries a role.
    pub fn has_role(&self, role: ColumnRole) -> bool {
        match role {
            ColumnRole::PrimaryKey => self.is_primary_key,
            ColumnRole::AutoIncrement => self.is_auto_increment,
            ColumnRole::Created => self.is_created,
            ColumnRole::Updated => self.is_updated,
            ColumnRole::Deleted => self.is_deleted,
            ColumnRole::Version => self.is_version,
        }
    }

    /// Roles carried by this column, in [`ColumnRole::ALL`] order.
    pub fn roles(&self) -> Vec<ColumnRole> {
        ColumnRole::ALL
            .into_iter()
            .filter(|role| self.has_role(*role))
            .collect()
    }

    /// The source field name, falling back to the column name.
    pub fn field_name(&self) -> &str {
        self.field_name.as_deref().unwrap_or(&self.name)
    }
}
