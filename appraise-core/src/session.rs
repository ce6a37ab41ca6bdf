//! Process-wide authentication session.
//!
//! The token lives in memory for fast reads and in the `client_state` table so
//! it survives a restart. It is read once at startup ([`SessionStore::open`])
//! and only changes through [`SessionStore::set`] and [`SessionStore::clear`].

use tokio_rusqlite::Connection;

use crate::db;
use crate::error::Result;

/// Slot key under which the bearer token is persisted.
pub const SESSION_TOKEN_KEY: &str = "session_token";

/// Holds the optional bearer token. Token present ⇔ reviews may be submitted.
pub struct SessionStore {
    token: Option<String>,
    conn: Connection,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl SessionStore {
    /// Loads the persisted token (if any) from `conn`.
    pub async fn open(conn: Connection) -> Result<Self> {
        let token = db::load_slot(&conn, SESSION_TOKEN_KEY).await?;
        tracing::info!(authenticated = token.is_some(), "session restored");
        Ok(Self { token, conn })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Persists `token` and makes it the active session.
    ///
    /// The in-memory token is only replaced once the write succeeds, so memory
    /// and disk never disagree after an error.
    pub async fn set(&mut self, token: String) -> Result<()> {
        db::store_slot(&self.conn, SESSION_TOKEN_KEY, &token).await?;
        self.token = Some(token);
        Ok(())
    }

    /// Forgets the token in memory and on disk.
    pub async fn clear(&mut self) -> Result<()> {
        self.token = None;
        db::clear_slot(&self.conn, SESSION_TOKEN_KEY).await
    }
}
