use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create mentor_time_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mentor_time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            mentor_id VARCHAR(255) NOT NULL,
            mentor_application_id VARCHAR(255) NULL,
            session_kind VARCHAR(32) NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            is_recurring BOOLEAN NOT NULL DEFAULT FALSE,
            recurring_days TEXT[] NOT NULL DEFAULT '{}',
            capacity INTEGER NOT NULL,
            booked_count INTEGER NOT NULL DEFAULT 0,
            price BIGINT NOT NULL,
            meeting_link TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            is_booked BOOLEAN NOT NULL DEFAULT FALSE,
            booked_by VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT valid_booked_count CHECK (booked_count >= 0 AND booked_count <= capacity),
            CONSTRAINT valid_price CHECK (price >= 0),
            CONSTRAINT unique_mentor_start UNIQUE (mentor_id, start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_mentor_time_slots_mentor_active_booked ON mentor_time_slots(mentor_id, is_active, is_booked);
        CREATE INDEX IF NOT EXISTS idx_mentor_time_slots_active_start ON mentor_time_slots(is_active, start_time);
        CREATE INDEX IF NOT EXISTS idx_mentor_time_slots_recurring_end ON mentor_time_slots(is_recurring, end_time);
        CREATE INDEX IF NOT EXISTS idx_mentor_time_slots_booked_by ON mentor_time_slots(booked_by);
        CREATE INDEX IF NOT EXISTS idx_mentor_time_slots_mentor_kind_active ON mentor_time_slots(mentor_id, session_kind, is_active);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
