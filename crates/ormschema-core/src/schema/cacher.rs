//! Row and result caching association.
//!
//! A [`Table`](super::Table) only holds a cacher for higher layers to use;
//! it never reads or writes through it. Two spaces are cached per table:
//! id lists keyed by SQL text, and rows ("beans") keyed by primary key.

use dashmap::DashMap;
use serde_json::Value;

/// Cache backend for query results and rows.
pub trait Cacher: Send + Sync {
    /// Cached primary keys for a query.
    fn get_ids(&self, table: &str, sql: &str) -> Option<Vec<String>>;

    /// Cache primary keys for a query.
    fn put_ids(&self, table: &str, sql: &str, ids: Vec<String>);

    /// Drop one cached query.
    fn del_ids(&self, table: &str, sql: &str);

    /// Drop all cached queries of a table.
    fn clear_ids(&self, table: &str);

    /// Cached row by primary key.
    fn get_bean(&self, table: &str, id: &str) -> Option<Value>;

    /// Cache a row.
    fn put_bean(&self, table: &str, id: &str, bean: Value);

    /// Drop one cached row.
    fn del_bean(&self, table: &str, id: &str);

    /// Drop all cached rows of a table.
    fn clear_beans(&self, table: &str);
}

type CacheKey = (String, String);

/// Unbounded in-process cacher.
#[derive(Debug, Default)]
pub struct MemoryCacher {
    ids: DashMap<CacheKey, Vec<String>>,
    beans: DashMap<CacheKey, Value>,
}

impl MemoryCacher {
    /// Create an empty cacher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached id lists.
    pub fn ids_len(&self) -> usize {
        self.ids.len()
    }

    /// Number of cached rows.
    pub fn beans_len(&self) -> usize {
        self.beans.len()
    }
}

fn key(table: &str, k: &str) -> CacheKey {
    (table.to_string(), k.to_string())
}

impl Cacher for MemoryCacher {
    fn get_ids(&self, table: &str, sql: &str) -> Option<Vec<String>> {
        self.ids.get(&key(table, sql)).map(|ids| ids.clone())
    }

    fn put_ids(&self, table: &str, sql: &str, ids: Vec<String>) {
        self.ids.insert(key(table, sql), ids);
    }

    fn del_ids(&self, table: &str, sql: &str) {
        self.ids.remove(&key(table, sql));
    }

    fn clear_ids(&self, table: &str) {
        self.ids.retain(|(t, _), _| t != table);
    }

    fn get_bean(&self, table: &str, id: &str) -> Option<Value> {
        self.beans.get(&key(table, id)).map(|bean| bean.clone())
    }

    fn put_bean(&self, table: &str, id: &str, bean: Value) {
        self.beans.insert(key(table, id), bean);
    }

    fn del_bean(&self, table: &str, id: &str) {
        self.beans.remove(&key(table, id));
    }

    fn clear_beans(&self, table: &str) {
        self.beans.retain(|(t, _), _| t != table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids_roundtrip_and_clear() {
        let cacher = MemoryCacher::new();
        cacher.put_ids("user", "SELECT id FROM user", vec!["1".into(), "2".into()]);
        cacher.put_ids("post", "SELECT id FROM post", vec!["9".into()]);

        assert_eq!(
            cacher.get_ids("user", "SELECT id FROM user"),
            Some(vec!["1".to_string(), "2".to_string()])
        );
        assert!(cacher.get_ids("user", "SELECT id FROM post").is_none());

        cacher.clear_ids("user");
        assert!(cacher.get_ids("user", "SELECT id FROM user").is_none());
        assert_eq!(cacher.ids_len(), 1);

        cacher.del_ids("post", "SELECT id FROM post");
        assert_eq!(cacher.ids_len(), 0);
    }

    #[test]
    fn test_beans() {
        let cacher = MemoryCacher::new();
        cacher.put_bean("user", "1", json!({"id": 1, "name": "ada"}));
        cacher.put_bean("user", "2", json!({"id": 2}));

        assert_eq!(cacher.get_bean("user", "1").unwrap()["name"], "ada");

        cacher.del_bean("user", "1");
        assert!(cacher.get_bean("user", "1").is_none());
        assert_eq!(cacher.beans_len(), 1);

        cacher.clear_beans("user");
        assert_eq!(cacher.beans_len(), 0);
    }
}
