use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NULL,
            phone TEXT NULL,
            slot_id TEXT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            location TEXT NULL,
            session_type TEXT NULL,
            status VARCHAR(32) NOT NULL,
            price INTEGER NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_rules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_rules (
            id TEXT PRIMARY KEY,
            rule_date VARCHAR(16) NOT NULL,
            start_time VARCHAR(16) NOT NULL DEFAULT '',
            end_time VARCHAR(16) NOT NULL DEFAULT '',
            duration INTEGER NULL,
            slot_interval INTEGER NULL,
            location TEXT NOT NULL DEFAULT '',
            session_type TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_bookings_start_time ON bookings(start_time);
        CREATE INDEX IF NOT EXISTS idx_bookings_user_id ON bookings(user_id);
        CREATE INDEX IF NOT EXISTS idx_schedule_rules_rule_date ON schedule_rules(rule_date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
