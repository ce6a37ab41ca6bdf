use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use crate::error::Result;

/// Opens (or creates) the SQLite database at `path`, configures WAL mode,
/// and applies schema migrations via the `schema_version` table.
///
/// This is the single entry point for all database connections. `busy_timeout`
/// is set through the `Connection` method rather than a PRAGMA string.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, WAL configuration fails, or
/// schema DDL fails.
pub async fn open_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path).await?;

    conn.call(|db| {
        db.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;",
        )?;
        db.busy_timeout(Duration::from_secs(5))?;
        crate::schema::migrate(db)?;
        Ok::<_, rusqlite::Error>(())
    })
    .await?;

    tracing::debug!(path, "client database ready");
    Ok(conn)
}

/// Returns the current Unix timestamp in seconds.
fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Reads the value stored under `key`, or `None` if the slot is empty.
pub async fn load_slot(conn: &Connection, key: &str) -> Result<Option<String>> {
    let key = key.to_owned();

    let value = conn
        .call(move |db| {
            db.query_row(
                "SELECT value FROM client_state WHERE key = ?1",
                rusqlite::params![&key],
                |r| r.get::<_, String>(0),
            )
            .optional()
        })
        .await?;
    Ok(value)
}

/// Writes `value` under `key`, replacing any previous value.
///
/// Upsert inside `BEGIN IMMEDIATE` so a concurrent reader never sees a
/// half-written slot.
pub async fn store_slot(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let key = key.to_owned();
    let value = value.to_owned();

    conn.call(move |db| {
        let tx = db.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO client_state (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key)
             DO UPDATE SET value = excluded.value,
                           updated_at = excluded.updated_at",
            rusqlite::params![&key, &value, now_secs()],
        )?;
        tx.commit()
    })
    .await?;
    Ok(())
}

/// Empties the slot under `key`. A missing slot is not an error.
pub async fn clear_slot(conn: &Connection, key: &str) -> Result<()> {
    let key = key.to_owned();

    conn.call(move |db| {
        db.execute(
            "DELETE FROM client_state WHERE key = ?1",
            rusqlite::params![&key],
        )
        .map(|_| ())
    })
    .await?;
    Ok(())
}
