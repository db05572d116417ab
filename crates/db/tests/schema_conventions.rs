//! Schema checks for the migrations.

use sqlx::PgPool;

/// Every entity table uses UUID primary keys.
#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn all_ids_are_uuid(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name::TEXT, data_type::TEXT
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), 4);
    for (table, data_type) in &rows {
        assert_eq!(data_type, "uuid", "Table {table}.id should be uuid");
    }
}

/// No table carries foreign keys: readers tolerate missing jobs and accounts.
#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn no_foreign_keys(pool: PgPool) {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM information_schema.table_constraints
         WHERE constraint_type = 'FOREIGN KEY' AND table_schema = 'public'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 0);
}

/// Unique constraints are named `uq_*` so violations classify as conflicts.
#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn unique_indexes_use_uq_prefix(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT indexname::TEXT FROM pg_indexes
         WHERE schemaname = 'public'
           AND indexdef LIKE 'CREATE UNIQUE INDEX%'
           AND indexname NOT LIKE '%_pkey'
           AND tablename != '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!names.is_empty());
    for (name,) in &names {
        assert!(name.starts_with("uq_"), "unique index {name} should start with uq_");
    }
}
