//! Children: the root entity every other row hangs off.

use crate::libs::error::{Result, StoreError};
use crate::libs::messages::Message;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_CHILD: &str = "INSERT INTO children (name) VALUES (?1)";
const SELECT_CHILDREN: &str = "SELECT id, name FROM children";
const SELECT_CHILD_BY_ID: &str = "SELECT id, name FROM children WHERE id = ?1";

// Cascade, in dependency order. Every statement is keyed by the child id.
const DELETE_CHILD_CHECKS: &str = "DELETE FROM daily_checks WHERE activityId IN (SELECT id FROM activities WHERE childId = ?1)";
const DELETE_CHILD_ACTIVITIES: &str = "DELETE FROM activities WHERE childId = ?1";
const DELETE_CHILD: &str = "DELETE FROM children WHERE id = ?1";
const DELETE_CHILD_REWARDS: &str = "DELETE FROM rewards WHERE childId = ?1";
const DELETE_CHILD_MILESTONES: &str = "DELETE FROM milestones WHERE childId = ?1";
const DELETE_CHILD_COMPLETIONS: &str = "DELETE FROM milestone_completions WHERE childId = ?1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: i64,
    pub name: String,
}

impl Child {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Child {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

pub struct Children<'a> {
    conn: &'a Connection,
}

impl<'a> Children<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All children in the store's native order.
    pub fn list(&self) -> Result<Vec<Child>> {
        let mut stmt = self.conn.prepare(SELECT_CHILDREN)?;
        let child_iter = stmt.query_map([], Child::from_row)?;

        let mut children = Vec::new();
        for child in child_iter {
            children.push(child?);
        }
        Ok(children)
    }

    pub fn get(&self, id: i64) -> Result<Option<Child>> {
        self.conn
            .query_row(SELECT_CHILD_BY_ID, params![id], Child::from_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// Inserts a child with the trimmed `name` and returns its id.
    pub fn insert(&self, name: &str) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput(Message::ChildNameEmpty.to_string()));
        }

        self.conn.execute(INSERT_CHILD, params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Deletes the child together with its activities, their daily checks,
    /// and the child's rewards, milestones and milestone completions.
    ///
    /// All six deletions commit together or not at all. Returns the number of
    /// rows removed across every table.
    pub fn delete_cascade(&self, id: i64) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;

        let mut deleted = 0;
        for statement in [
            DELETE_CHILD_CHECKS,
            DELETE_CHILD_ACTIVITIES,
            DELETE_CHILD,
            DELETE_CHILD_REWARDS,
            DELETE_CHILD_MILESTONES,
            DELETE_CHILD_COMPLETIONS,
        ] {
            deleted += tx.execute(statement, params![id])?;
        }

        tx.commit()?;
        Ok(deleted)
    }
}
