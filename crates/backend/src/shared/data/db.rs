use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Create the table if sqlite_master does not know it yet
async fn ensure_table(
    conn: &DatabaseConnection,
    table: &str,
    create_sql: &str,
) -> anyhow::Result<()> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        table
    );
    let existing = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;

    if existing.is_empty() {
        tracing::info!("Creating {} table", table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/metrics.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    ensure_table(
        &conn,
        "a001_indicator",
        r#"
        CREATE TABLE a001_indicator (
            id TEXT PRIMARY KEY NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_kr INTEGER NOT NULL DEFAULT 0,
            priority INTEGER NOT NULL DEFAULT 0,
            name TEXT NOT NULL,
            acronym TEXT NOT NULL,
            indicator_type TEXT,
            category TEXT NOT NULL,
            description TEXT,
            objective TEXT,
            calculation_formula TEXT,
            action_when_bad TEXT,
            result_when_good TEXT,
            suggested_target TEXT,
            default_granularity TEXT,
            segmentation TEXT,
            integration_source TEXT,
            base_query TEXT,
            created_at TEXT,
            updated_at TEXT,
            created_by TEXT,
            updated_by TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        &conn,
        "a002_indicator_value",
        r#"
        CREATE TABLE a002_indicator_value (
            id TEXT PRIMARY KEY NOT NULL,
            indicator_id TEXT NOT NULL,
            value REAL,
            text_value TEXT,
            period_type TEXT NOT NULL,
            period_start TEXT NOT NULL,
            period_end TEXT NOT NULL,
            squad_id TEXT,
            product_name TEXT,
            comparison_value REAL,
            comparison_percentage REAL,
            status TEXT NOT NULL DEFAULT 'neutral',
            source TEXT NOT NULL DEFAULT 'manual',
            import_batch_id TEXT,
            created_at TEXT,
            updated_at TEXT,
            created_by TEXT,
            updated_by TEXT,
            FOREIGN KEY (indicator_id) REFERENCES a001_indicator (id) ON DELETE CASCADE
        );
    "#,
    )
    .await?;

    ensure_table(
        &conn,
        "a003_squad",
        r#"
        CREATE TABLE a003_squad (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            area TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            manager_id TEXT,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            created_by TEXT,
            updated_by TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        &conn,
        "a004_professional",
        r#"
        CREATE TABLE a004_professional (
            id TEXT PRIMARY KEY NOT NULL,
            profile_id TEXT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            job_role TEXT NOT NULL DEFAULT '',
            squad_id TEXT,
            seniority TEXT NOT NULL DEFAULT '',
            profile_type TEXT NOT NULL DEFAULT 'colaborador',
            avatar TEXT,
            manager_id TEXT,
            managed_squads_json TEXT NOT NULL DEFAULT '[]',
            created_at TEXT,
            updated_at TEXT,
            created_by TEXT,
            updated_by TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        &conn,
        "a005_job_role",
        r#"
        CREATE TABLE a005_job_role (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            is_management INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            created_by TEXT,
            updated_by TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        &conn,
        "a006_import_batch",
        r#"
        CREATE TABLE a006_import_batch (
            id TEXT PRIMARY KEY NOT NULL,
            filename TEXT,
            record_count INTEGER NOT NULL DEFAULT 0,
            success_count INTEGER NOT NULL DEFAULT 0,
            error_count INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'processing',
            errors_json TEXT NOT NULL DEFAULT '[]',
            created_at TEXT,
            updated_at TEXT,
            created_by TEXT,
            updated_by TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        &conn,
        "d400_dashboard_data",
        r#"
        CREATE TABLE d400_dashboard_data (
            id TEXT PRIMARY KEY NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT,
            updated_at TEXT
        );
    "#,
    )
    .await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
