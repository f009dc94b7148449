#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::SqlitePool;

use fitstreak_infrastructure::persistence::Database;

/// Fresh in-memory store with migrations applied
pub async fn setup_in_memory_db() -> SqlitePool {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    db.pool().clone()
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid test date")
}
