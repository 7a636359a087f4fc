//! Key-value settings.
//!
//! The table is generic; the keys the application understands are listed in
//! [`crate::libs::preferences`].

use crate::libs::error::Result;
use rusqlite::{params, Connection, OptionalExtension};

const UPSERT_SETTING: &str = "INSERT INTO settings (key, value) VALUES (?1, ?2)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const SELECT_SETTING: &str = "SELECT value FROM settings WHERE key = ?1";
const SELECT_ALL_SETTINGS: &str = "SELECT key, value FROM settings ORDER BY key";

pub struct Settings<'a> {
    conn: &'a Connection,
}

impl<'a> Settings<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The stored value, or `None` if the key was never saved.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<Option<String>> = self
            .conn
            .query_row(SELECT_SETTING, params![key], |row| row.get(0))
            .optional()?;
        Ok(value.flatten())
    }

    /// Inserts the key or replaces its value.
    pub fn save(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(UPSERT_SETTING, params![key, value])?;
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_SETTINGS)?;
        let setting_iter = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?.unwrap_or_default()))
        })?;

        let mut settings = Vec::new();
        for setting in setting_iter {
            settings.push(setting?);
        }
        Ok(settings)
    }
}
