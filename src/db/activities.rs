//! Activities: the recurring tasks assigned to a child.

use crate::db::children::Children;
use crate::libs::error::{Result, StoreError};
use crate::libs::messages::Message;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_ACTIVITY: &str = "INSERT INTO activities (childId, title) VALUES (?1, ?2)";
const SELECT_BY_CHILD: &str = "SELECT id, childId, title FROM activities WHERE childId = ?1";
const SELECT_BY_ID: &str = "SELECT id, childId, title FROM activities WHERE id = ?1";
const COUNT_BY_CHILD: &str = "SELECT COUNT(*) FROM activities WHERE childId = ?1";
const DELETE_ACTIVITY_CHECKS: &str = "DELETE FROM daily_checks WHERE activityId = ?1";
const DELETE_ACTIVITY: &str = "DELETE FROM activities WHERE id = ?1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub child_id: i64,
    pub title: String,
}

impl Activity {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Activity {
            id: row.get(0)?,
            child_id: row.get(1)?,
            title: row.get(2)?,
        })
    }
}

pub struct Activities<'a> {
    conn: &'a Connection,
}

impl<'a> Activities<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list_for_child(&self, child_id: i64) -> Result<Vec<Activity>> {
        let mut stmt = self.conn.prepare(SELECT_BY_CHILD)?;
        let activity_iter = stmt.query_map(params![child_id], Activity::from_row)?;

        let mut activities = Vec::new();
        for activity in activity_iter {
            activities.push(activity?);
        }
        Ok(activities)
    }

    pub fn get(&self, id: i64) -> Result<Option<Activity>> {
        self.conn
            .query_row(SELECT_BY_ID, params![id], Activity::from_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn count_for_child(&self, child_id: i64) -> Result<u32> {
        let count: u32 = self.conn.query_row(COUNT_BY_CHILD, params![child_id], |row| row.get(0))?;
        Ok(count)
    }

    /// Adds an activity with the trimmed `title` for an existing child.
    pub fn insert(&self, child_id: i64, title: &str) -> Result<i64> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::InvalidInput(Message::ActivityTitleEmpty.to_string()));
        }
        if !Children::new(self.conn).exists(child_id)? {
            return Err(StoreError::NotFound {
                entity: "child",
                id: child_id,
            });
        }

        self.conn.execute(INSERT_ACTIVITY, params![child_id, title])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Deletes the activity and its daily checks.
    ///
    /// Rewards earned through the activity stay in the ledger so past monthly
    /// totals do not change.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(DELETE_ACTIVITY_CHECKS, params![id])?;
        let deleted = tx.execute(DELETE_ACTIVITY, params![id])?;
        tx.commit()?;

        Ok(deleted)
    }
}
