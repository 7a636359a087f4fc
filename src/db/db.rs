use crate::libs::messages::Message;
use crate::msg_debug;
use rusqlite::{Connection, Result};
use std::path::Path;

/// Owned SQLite connection backing the store.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open(path: &Path) -> Result<Db> {
        let conn = Connection::open(path)?;
        Self::configure(&conn)?;
        msg_debug!(Message::DatabaseOpened(path.display().to_string()));

        Ok(Db { conn })
    }

    pub fn open_in_memory() -> Result<Db> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;

        Ok(Db { conn })
    }

    fn configure(conn: &Connection) -> Result<()> {
        // References are declared in the schema but not enforced: rewards must
        // outlive a deleted activity, and orphans are reconciled by cleanup.
        conn.pragma_update(None, "foreign_keys", false)
    }
}
