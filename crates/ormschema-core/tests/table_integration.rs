//! Integration tests for schema discovery and shared reads.

use std::sync::{Arc, Barrier};
use std::thread;

use ormschema_core::{
    Column, Index, MemoryCacher, MysqlDialect, PostgresDialect, SchemaConfig, SchemaError,
    SchemaRegistry, SqliteDialect, Table,
};

struct Account;
struct Membership;

fn discover_account(config: &SchemaConfig) -> Table {
    let mut table = Table::with_config("account", config);
    table.set_mapped_type(ormschema_core::MappedType::of::<Account>());
    table.add_column(Column::new("id", "BIGINT").primary_key().auto_increment());
    table.add_column(Column::new("email", "VARCHAR(255)"));
    table.add_column(Column::new("Email", "VARCHAR(255)").with_field_name("EmailAlias"));
    table.add_column(Column::new("created_at", "TIMESTAMP").created());
    table.add_column(Column::new("inserted_at", "TIMESTAMP").created());
    table.add_column(Column::new("updated_at", "TIMESTAMP").updated());
    table.add_column(Column::new("deleted_at", "TIMESTAMP").nullable().deleted());
    table.add_column(Column::new("version", "INTEGER").with_default("1").version());
    table.add_index(Index::unique("uq_account_email").with_column("email"));
    table.add_index(Index::new("idx_account_created").with_column("created_at"));
    table
}

fn discover_membership() -> Table {
    let mut table = Table::for_type::<Membership>("membership");
    table.add_column(Column::new("org_id", "BIGINT").primary_key());
    table.add_column(Column::new("account_id", "BIGINT").primary_key());
    table.add_column(Column::new("role", "VARCHAR(32)"));
    table.add_index(Index::unique("uq_membership").with_columns(["org_id", "account_id"]));
    table
}

#[test]
fn test_discovery_then_registry_lookup() {
    let registry = SchemaRegistry::new();
    registry
        .register(discover_account(&SchemaConfig::default()))
        .unwrap();
    registry.register(discover_membership()).unwrap();

    let account = registry.get_for::<Account>().unwrap();
    assert_eq!(account.auto_incr_column().unwrap().name, "id");
    assert_eq!(account.updated_column().unwrap().name, "updated_at");
    assert_eq!(account.deleted_column().unwrap().name, "deleted_at");
    assert_eq!(account.version_column().unwrap().default.as_deref(), Some("1"));
    assert_eq!(account.created_names().len(), 2);
    assert_eq!(account.get_column_idx("EMAIL", 1).unwrap().field_name(), "EmailAlias");
    assert!(account.get_index("uq_account_email").unwrap().is_unique());

    let membership = registry.get("membership").unwrap();
    let pks: Vec<&str> = membership
        .pk_columns()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(pks, vec!["org_id", "account_id"]);
    assert!(membership.auto_incr_column().is_none());
    assert!(membership.version_column().is_none());
}

#[test]
fn test_strict_discovery_surfaces_conflict() {
    let mut table = Table::with_config("ledger", &SchemaConfig::strict());
    table
        .try_add_column(Column::new("rev", "INTEGER").version())
        .unwrap();
    let err = table
        .try_add_column(Column::new("revision", "INTEGER").version())
        .unwrap_err();

    assert!(matches!(err, SchemaError::DuplicateRole { .. }));
    assert_eq!(table.version_name(), Some("rev"));
}

#[test]
fn test_concurrent_first_checked_name() {
    let table = Arc::new(discover_account(&SchemaConfig::default()));
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let table = Arc::clone(&table);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let quoted = if i % 2 == 0 {
                    table.checked_name(&PostgresDialect).to_string()
                } else {
                    table.checked_name(&MysqlDialect).to_string()
                };
                assert!(table.get_column("id").is_some());
                quoted
            })
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let first = &results[0];
    assert!(first == "\"account\"" || first == "`account`");
    assert!(results.iter().all(|r| r == first));
    assert_eq!(table.checked_name(&SqliteDialect), first);
}

#[test]
fn test_cacher_shared_across_tables() {
    let cacher = Arc::new(MemoryCacher::new());

    let mut account = discover_account(&SchemaConfig::default());
    account.set_cacher(cacher.clone());
    let mut membership = discover_membership();
    membership.set_cacher(cacher.clone());

    let registry = SchemaRegistry::new();
    let account = registry.register(account).unwrap();
    let membership = registry.register(membership).unwrap();

    let via_account = account.cacher().unwrap();
    via_account.put_ids("account", "SELECT id FROM account", vec!["7".into()]);

    let via_membership = membership.cacher().unwrap();
    assert_eq!(
        via_membership.get_ids("account", "SELECT id FROM account"),
        Some(vec!["7".to_string()])
    );
    assert_eq!(cacher.ids_len(), 1);
}

#[test]
fn test_snapshot_json_shape() {
    let table = discover_membership();
    let json = serde_json::to_value(table.snapshot()).unwrap();

    assert_eq!(json["name"], "membership");
    assert_eq!(json["primary_keys"][1], "account_id");
    assert_eq!(json["indexes"][0]["kind"], "unique");
    assert!(json["auto_increment"].is_null());
    assert!(json["mapped_type"].as_str().unwrap().ends_with("Membership"));
}
