//! Embedded SQL migrations
//!
//! Ledger names are part of the on-disk contract and must never be renamed.

/// Migration metadata
pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

/// Get all embedded migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            name: "create-table-user",
            sql: include_str!("../../migrations/001_create_table_user.sql"),
        },
        Migration {
            name: "create-table-box",
            sql: include_str!("../../migrations/002_create_table_box.sql"),
        },
        Migration {
            name: "create-table-version",
            sql: include_str!("../../migrations/003_create_table_version.sql"),
        },
        Migration {
            name: "create-table-provider",
            sql: include_str!("../../migrations/004_create_table_provider.sql"),
        },
    ]
}
