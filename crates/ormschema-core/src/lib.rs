//! ormschema core - table schema registry for ORM mapping layers.
//!
//! This crate records, for each mapped entity type, the table name, the
//! ordered columns, derived column roles, and named indexes that query
//! builders, migrators, and caches consult.

pub mod config;
pub mod error;
pub mod schema;

pub use config::{RoleConflictPolicy, SchemaConfig};
pub use error::{Result, SchemaError};
pub use schema::{
    Cacher, Column, ColumnRole, Dialect, Index, IndexKind, MappedType, MemoryCacher,
    MssqlDialect, MysqlDialect, PostgresDialect, SchemaRegistry, SqliteDialect, Table,
    TableSnapshot,
};
