//! Registry of frozen table definitions.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

use super::{MappedType, Table};
use crate::error::{Result, SchemaError};

/// Owns every discovered table, keyed by table name.
///
/// Tables are frozen on registration: the registry hands out `Arc<Table>`
/// and offers no way to mutate a registered table.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    tables: DashMap<String, Arc<Table>>,
    by_type: RwLock<HashMap<MappedType, String>>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze and register a table.
    ///
    /// Fails if a table with the same name is already registered.
    pub fn register(&self, table: Table) -> Result<Arc<Table>> {
        let name = table.name().to_string();
        let table = match self.tables.entry(name.clone()) {
            Entry::Occupied(_) => return Err(SchemaError::DuplicateTable(name)),
            Entry::Vacant(slot) => Arc::clone(slot.insert(Arc::new(table)).value()),
        };

        if let Some(mapped_type) = table.mapped_type() {
            self.by_type.write().insert(mapped_type, name.clone());
        }

        debug!(
            table = %name,
            columns = table.column_count(),
            indexes = table.indexes().len(),
            "registered table"
        );
        Ok(table)
    }

    /// Get a table by name.
    pub fn get(&self, name: &str) -> Option<Arc<Table>> {
        self.tables.get(name).map(|t| Arc::clone(t.value()))
    }

    /// Get the table mapped from `T`.
    pub fn get_for<T: ?Sized + 'static>(&self) -> Option<Arc<Table>> {
        let name = self.by_type.read().get(&MappedType::of::<T>()).cloned()?;
        self.get(&name)
    }

    /// Check if a table name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// All registered table names, sorted.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.iter().map(|t| t.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
