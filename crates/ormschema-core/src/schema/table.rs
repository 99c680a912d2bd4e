//! Table definitions.
//!
//! A [`Table`] is built once during schema discovery by feeding it columns
//! and indexes in declaration order, then frozen and shared behind an `Arc`.
//!
//! ## Derived views
//!
//! ```text
//! add_column(col)
//!   ├─ columns / columns_seq      append (declaration order)
//!   ├─ column_index[lower(name)]  append position (duplicates kept)
//!   ├─ primary_keys               append if primary key
//!   ├─ created                    insert if created
//!   └─ auto_increment / updated / deleted / version
//!                                 overwrite (last column wins)
//! ```
//!
//! Name lookups are case-insensitive. Several columns may share a
//! lowercased name; [`Table::get_column`] returns the first and
//! [`Table::get_column_idx`] selects by position.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::{Cacher, Column, ColumnRole, Dialect, Index, MappedType};
use crate::config::{RoleConflictPolicy, SchemaConfig};
use crate::error::{Result, SchemaError};

/// Mapping between one entity type and one relational table.
#[derive(Clone)]
pub struct Table {
    name: String,
    mapped_type: Option<MappedType>,
    columns: Vec<Column>,
    columns_seq: Vec<String>,
    /// Lowercased name to positions in `columns`, in insertion order.
    column_index: HashMap<String, Vec<usize>>,
    primary_keys: Vec<String>,
    auto_increment: Option<String>,
    created: HashSet<String>,
    updated: Option<String>,
    deleted: Option<String>,
    version: Option<String>,
    indexes: HashMap<String, Index>,
    cacher: Option<Arc<dyn Cacher>>,
    store_engine: Option<String>,
    charset: Option<String>,
    role_conflict: RoleConflictPolicy,
    /// Quoted name, filled by the first `checked_name` call whatever the dialect.
    checked_name: OnceLock<String>,
}

impl Table {
    /// Create an empty table with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mapped_type: None,
            columns: Vec::new(),
            columns_seq: Vec::new(),
            column_index: HashMap::new(),
            primary_keys: Vec::new(),
            auto_increment: None,
            created: HashSet::new(),
            updated: None,
            deleted: None,
            version: None,
            indexes: HashMap::new(),
            cacher: None,
            store_engine: None,
            charset: None,
            role_conflict: RoleConflictPolicy::LastWins,
            checked_name: OnceLock::new(),
        }
    }

    /// Create an unnamed table with no mapped type.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Create an empty table mapped from `T`.
    pub fn for_type<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        let mut table = Self::new(name);
        table.mapped_type = Some(MappedType::of::<T>());
        table
    }

    /// Create an empty table using the discovery config.
    pub fn with_config(name: impl Into<String>, config: &SchemaConfig) -> Self {
        let mut table = Self::new(name);
        table.role_conflict = config.role_conflict;
        table.store_engine = config.default_store_engine.clone();
        table.charset = config.default_charset.clone();
        table
    }

    /// Set the mapped entity type.
    pub fn set_mapped_type(&mut self, mapped_type: MappedType) {
        self.mapped_type = Some(mapped_type);
    }

    /// Set the role conflict policy used by [`Table::try_add_column`].
    pub fn set_role_conflict(&mut self, policy: RoleConflictPolicy) {
        self.role_conflict = policy;
    }

    pub fn set_store_engine(&mut self, engine: impl Into<String>) {
        self.store_engine = Some(engine.into());
    }

    pub fn set_charset(&mut self, charset: impl Into<String>) {
        self.charset = Some(charset.into());
    }

    /// Attach a cacher for higher layers.
    pub fn set_cacher(&mut self, cacher: Arc<dyn Cacher>) {
        self.cacher = Some(cacher);
    }

    /// Add a column.
    ///
    /// Duplicate names are accepted. Single-slot roles (auto-increment,
    /// updated, deleted, version) are overwritten by the latest column that
    /// carries them.
    pub fn add_column(&mut self, col: Column) {
        trace!(table = %self.name, column = %col.name, "adding column");

        let position = self.columns.len();
        self.columns_seq.push(col.name.clone());
        self.column_index
            .entry(col.name.to_lowercase())
            .or_default()
            .push(position);

        if col.is_primary_key {
            self.primary_keys.push(col.name.clone());
        }
        if col.is_auto_increment {
            fill_slot(
                &self.name,
                &mut self.auto_increment,
                ColumnRole::AutoIncrement,
                &col.name,
            );
        }
        if col.is_created {
            self.created.insert(col.name.clone());
        }
        if col.is_updated {
            fill_slot(&self.name, &mut self.updated, ColumnRole::Updated, &col.name);
        }
        if col.is_deleted {
            fill_slot(&self.name, &mut self.deleted, ColumnRole::Deleted, &col.name);
        }
        if col.is_version {
            fill_slot(&self.name, &mut self.version, ColumnRole::Version, &col.name);
        }

        self.columns.push(col);
    }

    /// Add a column, honouring the table's role conflict policy.
    ///
    /// Under [`RoleConflictPolicy::Reject`] a column claiming an already
    /// filled single-slot role is refused and the table is left unchanged.
    /// Under [`RoleConflictPolicy::LastWins`] this never fails.
    pub fn try_add_column(&mut self, col: Column) -> Result<()> {
        if self.role_conflict == RoleConflictPolicy::Reject {
            if let Some((role, existing)) = self.conflicting_role(&col) {
                warn!(
                    table = %self.name,
                    %role,
                    existing,
                    column = %col.name,
                    "rejecting column with duplicate role"
                );
                return Err(SchemaError::DuplicateRole {
                    table: self.name.clone(),
                    role,
                    existing: existing.to_string(),
                    column: col.name,
                });
            }
        }

        self.add_column(col);
        Ok(())
    }

    /// Add an index or unique constraint, replacing any index of the same name.
    pub fn add_index(&mut self, index: Index) {
        let name = index.name.clone();
        if self.indexes.insert(name.clone(), index).is_some() {
            debug!(table = %self.name, index = %name, "index replaced");
        } else {
            trace!(table = %self.name, index = %name, "adding index");
        }
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entity type this table was mapped from, if known.
    pub fn mapped_type(&self) -> Option<MappedType> {
        self.mapped_type
    }

    /// The dialect-quoted table name.
    ///
    /// Rendered by the first call and reused afterwards, even when a
    /// different dialect is passed. Concurrent first calls are safe; one
    /// rendering wins and every caller sees it.
    pub fn checked_name(&self, dialect: &dyn Dialect) -> &str {
        self.checked_name.get_or_init(|| {
            let quoted = dialect.quote_identifier(&self.name);
            debug!(table = %self.name, dialect = dialect.name(), %quoted, "cached quoted name");
            quoted
        })
    }

    /// All columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// All column names in declaration order.
    pub fn columns_seq(&self) -> &[String] {
        &self.columns_seq
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// First column whose name matches case-insensitively.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.get_column_idx(name, 0)
    }

    /// The `idx`-th column whose name matches case-insensitively.
    pub fn get_column_idx(&self, name: &str, idx: usize) -> Option<&Column> {
        self.column_index
            .get(&name.to_lowercase())
            .and_then(|positions| positions.get(idx))
            .map(|&position| &self.columns[position])
    }

    /// Check if any column matches the name case-insensitively.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index.contains_key(&name.to_lowercase())
    }

    /// Primary key column names, in the order they were added.
    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    /// Primary key columns, in the order they were added.
    pub fn pk_columns(&self) -> Vec<&Column> {
        self.primary_keys
            .iter()
            .filter_map(|name| self.get_column(name))
            .collect()
    }

    pub fn auto_increment_name(&self) -> Option<&str> {
        self.auto_increment.as_deref()
    }

    pub fn updated_name(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    pub fn deleted_name(&self) -> Option<&str> {
        self.deleted.as_deref()
    }

    pub fn version_name(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The most recently added auto-increment column.
    pub fn auto_incr_column(&self) -> Option<&Column> {
        self.resolve(self.auto_increment.as_deref())
    }

    /// The most recently added version column.
    pub fn version_column(&self) -> Option<&Column> {
        self.resolve(self.version.as_deref())
    }

    /// The most recently added updated-at column.
    pub fn updated_column(&self) -> Option<&Column> {
        self.resolve(self.updated.as_deref())
    }

    /// The most recently added deleted-at column.
    pub fn deleted_column(&self) -> Option<&Column> {
        self.resolve(self.deleted.as_deref())
    }

    /// Names of every created-at column.
    pub fn created_names(&self) -> &HashSet<String> {
        &self.created
    }

    /// Check if a column name is registered as created-at. Case-sensitive.
    pub fn is_created(&self, name: &str) -> bool {
        self.created.contains(name)
    }

    /// Created-at columns in declaration order.
    pub fn created_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_created).collect()
    }

    /// All indexes keyed by name.
    pub fn indexes(&self) -> &HashMap<String, Index> {
        &self.indexes
    }

    /// Get an index by name.
    pub fn get_index(&self, name: &str) -> Option<&Index> {
        self.indexes.get(name)
    }

    pub fn cacher(&self) -> Option<&Arc<dyn Cacher>> {
        self.cacher.as_ref()
    }

    pub fn store_engine(&self) -> Option<&str> {
        self.store_engine.as_deref()
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub fn role_conflict(&self) -> RoleConflictPolicy {
        self.role_conflict
    }

    /// Serializable view of the table definition.
    pub fn snapshot(&self) -> TableSnapshot {
        let mut created: Vec<String> = self.created.iter().cloned().collect();
        created.sort();

        let mut indexes: Vec<Index> = self.indexes.values().cloned().collect();
        indexes.sort_by(|a, b| a.name.cmp(&b.name));

        TableSnapshot {
            name: self.name.clone(),
            mapped_type: self.mapped_type.map(|t| t.type_name().to_string()),
            columns: self.columns.clone(),
            primary_keys: self.primary_keys.clone(),
            auto_increment: self.auto_increment.clone(),
            created,
            updated: self.updated.clone(),
            deleted: self.deleted.clone(),
            version: self.version.clone(),
            indexes,
            store_engine: self.store_engine.clone(),
            charset: self.charset.clone(),
        }
    }

    fn resolve(&self, slot: Option<&str>) -> Option<&Column> {
        slot.and_then(|name| self.get_column(name))
    }

    fn slot(&self, role: ColumnRole) -> Option<&str> {
        match role {
            ColumnRole::AutoIncrement => self.auto_increment.as_deref(),
            ColumnRole::Updated => self.updated.as_deref(),
            ColumnRole::Deleted => self.deleted.as_deref(),
            ColumnRole::Version => self.version.as_deref(),
            ColumnRole::PrimaryKey | ColumnRole::Created => None,
        }
    }

    fn conflicting_role(&self, col: &Column) -> Option<(ColumnRole, &str)> {
        ColumnRole::ALL
            .into_iter()
            .filter(|role| role.is_single_slot() && col.has_role(*role))
            .find_map(|role| self.slot(role).map(|existing| (role, existing)))
    }
}

fn fill_slot(table: &str, slot: &mut Option<String>, role: ColumnRole, column: &str) {
    if let Some(previous) = slot.replace(column.to_string()) {
        debug!(table, %role, %previous, column, "role reassigned to later column");
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("mapped_type", &self.mapped_type)
            .field("columns", &self.columns_seq)
            .field("primary_keys", &self.primary_keys)
            .field("auto_increment", &self.auto_increment)
            .field("created", &self.created)
            .field("updated", &self.updated)
            .field("deleted", &self.deleted)
            .field("version", &self.version)
            .field("indexes", &self.indexes.keys().collect::<Vec<_>>())
            .field("has_cacher", &self.cacher.is_some())
            .field("store_engine", &self.store_engine)
            .field("charset", &self.charset)
            .finish()
    }
}

/// Point-in-time, serializable copy of a table definition.
///
/// Created names are sorted and indexes are ordered by name so snapshots of
/// equal tables compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub name: String,
    pub mapped_type: Option<String>,
    pub columns: Vec<Column>,
    pub primary_keys: Vec<String>,
    pub auto_increment: Option<String>,
    pub created: Vec<String>,
    pub updated: Option<String>,
    pub deleted: Option<String>,
    pub version: Option<String>,
    pub indexes: Vec<Index>,
    pub store_engine: Option<String>,
    pub charset: Option<String>,
}
