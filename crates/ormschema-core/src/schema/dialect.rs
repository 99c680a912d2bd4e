//! SQL dialect identifier quoting.
//!
//! The table only needs one capability from a dialect: turning a raw
//! identifier into its quoted form. The built-in dialects below cover the
//! common quoting styles; embedded closing quote characters are doubled.

/// Renders identifiers for a specific database.
pub trait Dialect: Send + Sync {
    /// Short dialect name, used in logs.
    fn name(&self) -> &str;

    /// Quote a raw identifier.
    fn quote_identifier(&self, raw: &str) -> String;
}

fn quote_with(raw: &str, open: char, close: char) -> String {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push(open);
    for ch in raw.chars() {
        if ch == close {
            quoted.push(close);
        }
        quoted.push(ch);
    }
    quoted.push(close);
    quoted
}

/// PostgreSQL: `"name"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &str {
        "postgres"
    }

    fn quote_identifier(&self, raw: &str) -> String {
        quote_with(raw, '"', '"')
    }
}

/// SQLite: `"name"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn quote_identifier(&self, raw: &str) -> String {
        quote_with(raw, '"', '"')
    }
}

/// MySQL: `` `name` ``.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlDialect;

impl Dialect for MysqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn quote_identifier(&self, raw: &str) -> String {
        quote_with(raw, '`', '`')
    }
}

/// SQL Server: `[name]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlDialect;

impl Dialect for MssqlDialect {
    fn name(&self) -> &str {
        "mssql"
    }

    fn quote_identifier(&self, raw: &str) -> String {
        quote_with(raw, '[', ']')
    }
}
