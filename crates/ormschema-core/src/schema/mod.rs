//! Table schema definitions for mapped entity types.
//!
//! A [`Table`] records the columns, column roles, and indexes of one mapped
//! type. [`Column`] and [`Index`] are the value objects it is built from,
//! [`Dialect`] renders its quoted name, and [`SchemaRegistry`] owns the
//! frozen tables once discovery is done.

mod cacher;
mod column;
mod dialect;
mod index;
mod mapped_type;
mod registry;
mod table;

pub use cacher::{Cacher, MemoryCacher};
pub use column::{Column, ColumnRole};
pub use dialect::{Dialect, MssqlDialect, MysqlDialect, PostgresDialect, SqliteDialect};
pub use index::{Index, IndexKind};
pub use mapped_type::MappedType;
pub use registry::SchemaRegistry;
pub use table::{Table, TableSnapshot};
