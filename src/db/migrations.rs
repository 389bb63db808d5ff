use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

/// Schema version written to `PRAGMA user_version` once migrations finish
pub const SCHEMA_VERSION: i64 = 2;

const CREATE_JOBS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS jobs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        dropoff_date TEXT NOT NULL,
        customer_name TEXT,
        customer_phone TEXT,
        item_type TEXT NOT NULL,
        work_hem INTEGER NOT NULL DEFAULT 0,
        work_sleeve INTEGER NOT NULL DEFAULT 0,
        work_width INTEGER NOT NULL DEFAULT 0,
        work_other TEXT,
        price INTEGER NOT NULL,
        payment_method TEXT NOT NULL,
        is_prepaid INTEGER NOT NULL DEFAULT 1,
        pickup_date TEXT,
        picked_up INTEGER NOT NULL DEFAULT 0,
        memo TEXT,
        printed_count INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
"#;

/// Columns that older databases may lack, with the definition used to add them
const ADDITIVE_COLUMNS: &[(&str, &str)] = &[
    ("customer_name", "TEXT"),
    ("customer_phone", "TEXT"),
    ("work_hem", "INTEGER NOT NULL DEFAULT 0"),
    ("work_sleeve", "INTEGER NOT NULL DEFAULT 0"),
    ("work_width", "INTEGER NOT NULL DEFAULT 0"),
    ("work_other", "TEXT"),
    ("is_prepaid", "INTEGER NOT NULL DEFAULT 1"),
    ("pickup_date", "TEXT"),
    ("picked_up", "INTEGER NOT NULL DEFAULT 0"),
    ("memo", "TEXT"),
    ("printed_count", "INTEGER NOT NULL DEFAULT 0"),
];

/// Bring the `jobs` table up to the current schema
///
/// Creates the table on a fresh database. On a database written by an
/// earlier version, every missing column is added with its default so
/// existing rows read back as if the column had always been there. Nothing
/// is dropped or rewritten, and running it again changes nothing.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");

    let mut tx = pool.begin().await?;

    sqlx::query(CREATE_JOBS_TABLE).execute(&mut *tx).await?;

    let existing: Vec<String> = sqlx::query("PRAGMA table_info(jobs)")
        .fetch_all(&mut *tx)
        .await?
        .iter()
        .map(|row| row.try_get::<String, _>("name"))
        .collect::<Result<_, _>>()?;

    for (column, definition) in ADDITIVE_COLUMNS {
        if existing.iter().any(|name| name == column) {
            continue;
        }
        info!("Adding missing column jobs.{}", column);
        sqlx::query(&format!("ALTER TABLE jobs ADD COLUMN {column} {definition}"))
            .execute(&mut *tx)
            .await?;
    }

    // PRAGMA does not accept bound parameters.
    sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    debug!("Schema at version {}", SCHEMA_VERSION);
    info!("Database migrations completed successfully");
    Ok(())
}

/// Read the schema version recorded by the last migration run
pub async fn schema_version(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("PRAGMA user_version").fetch_one(pool).await
}
