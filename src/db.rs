use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::PathBuf;
use tokio::fs;

/// First id handed out by the products sequence.
pub const PRODUCT_ID_START: i32 = 100_000;

const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    price REAL NOT NULL,
    stock INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

// AUTOINCREMENT hands out `seq + 1`, so seed the sequence one below the first id.
fn sqlite_sequence_seed() -> String {
    format!(
        "INSERT INTO sqlite_sequence (name, seq) \
         SELECT 'products', {} \
         WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'products')",
        PRODUCT_ID_START - 1
    )
}

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url);
    // An in-memory SQLite database lives and dies with its only connection.
    if database_url.starts_with("sqlite") {
        options.max_connections(1).min_connections(1);
    }
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Bring the schema up to date for whichever backend `conn` talks to.
///
/// Postgres runs the SQL files in `migrations/` in filename order. SQLite gets
/// an equivalent inline schema whose id sequence starts at the same value.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    match conn.get_database_backend() {
        DatabaseBackend::Sqlite => {
            execute_script(conn, SQLITE_SCHEMA).await?;
            execute_script(conn, &sqlite_sequence_seed()).await
        }
        _ => run_sql_files(conn).await,
    }
}

async fn run_sql_files(conn: &DatabaseConnection) -> Result<()> {
    let mut entries = fs::read_dir("migrations").await?;
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();

    for file in files {
        tracing::info!(file = %file.display(), "applying migration");
        let sql = fs::read_to_string(&file).await?;
        execute_script(conn, &sql).await?;
    }

    Ok(())
}

// Prepared statements cannot contain multiple commands, so run each one on its own.
async fn execute_script(conn: &DatabaseConnection, sql: &str) -> Result<()> {
    let backend = conn.get_database_backend();
    for stmt in sql.split(';') {
        let stmt = stmt.trim();
        if stmt.is_empty() {
            continue;
        }
        conn.execute(Statement::from_string(backend, format!("{stmt};")))
            .await?;
    }
    Ok(())
}
