//! Index and unique-constraint definitions.

use serde::{Deserialize, Serialize};

/// Kind of index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Plain secondary index.
    #[default]
    Index,
    /// Unique constraint.
    Unique,
}

/// A named index over one or more columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name (unique within a table).
    pub name: String,
    /// Index kind.
    pub kind: IndexKind,
    /// Indexed column names, in key order.
    pub columns: Vec<String>,
}

impl Index {
    /// Create a plain index with no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: IndexKind::Index,
            columns: Vec::new(),
        }
    }

    /// Create a unique constraint with no columns.
    pub fn unique(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: IndexKind::Unique,
            columns: Vec::new(),
        }
    }

    /// Append a column to the key.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Append several columns to the key.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Check if this is a unique constraint.
    pub fn is_unique(&self) -> bool {
        self.kind == IndexKind::Unique
    }

    /// Check if this index covers more than one column.
    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_index() {
        let index = Index::new("idx_user_name").with_column("name");

        assert!(!index.is_unique());
        assert!(!index.is_composite());
        assert_eq!(index.columns, vec!["name"]);
    }

    #[test]
    fn test_composite_unique() {
        let index = Index::unique("uq_user_org").with_columns(["user_id", "org_id"]);

        assert!(index.is_unique());
        assert!(index.is_composite());
        assert_eq!(index.columns, vec!["user_id", "org_id"]);
    }
}
