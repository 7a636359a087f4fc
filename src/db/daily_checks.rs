//! Daily checks and the reward side effect of marking them.
//!
//! Each `(activity, date)` key is in one of three states: unset, not done, or
//! done. Moving into "done" writes exactly one reward row for the key, and
//! leaving it removes the reward again. Both tables change in the same
//! transaction, so a failure leaves the previous state untouched.
//!
//! ## Usage
//!
//! ```rust
//! use littlewins::db::{children::Children, activities::Activities, daily_checks::DailyChecks, schema};
//! use chrono::NaiveDate;
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! schema::init_schema(&mut conn)?;
//! let child = Children::new(&conn).insert("Ava")?;
//! let activity = Activities::new(&conn).insert(child, "Brush teeth")?;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! DailyChecks::new(&conn).mark(activity, child, date, true, 1)?;
//! assert!(DailyChecks::new(&conn).get(activity, date)?.unwrap().done);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::db::activities::Activities;
use crate::db::rewards::{delete_rewards, insert_reward};
use crate::libs::error::{Result, StoreError};
use crate::libs::messages::Message;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const SELECT_CHECK: &str = "SELECT id, activityId, date, done FROM daily_checks WHERE activityId = ?1 AND date = ?2 ORDER BY id LIMIT 1";
const UPDATE_CHECK: &str = "UPDATE daily_checks SET done = ?3 WHERE activityId = ?1 AND date = ?2";
const INSERT_CHECK: &str = "INSERT INTO daily_checks (activityId, date, done) VALUES (?1, ?2, ?3)";

// Activities without any check still appear, with NULL date and done.
const SELECT_HISTORY: &str = "
    SELECT a.id, a.title, d.date, d.done
    FROM activities a
    LEFT JOIN daily_checks d ON a.id = d.activityId
    WHERE a.childId = ?1
    ORDER BY d.date DESC
";
const COUNT_DONE_FOR_DATE: &str = "
    SELECT COUNT(DISTINCT a.id)
    FROM activities a
    JOIN daily_checks d ON a.id = d.activityId
    WHERE a.childId = ?1 AND d.date = ?2 AND d.done = 1
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCheck {
    pub id: i64,
    pub activity_id: i64,
    pub date: NaiveDate,
    pub done: bool,
}

impl DailyCheck {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(DailyCheck {
            id: row.get(0)?,
            activity_id: row.get(1)?,
            date: row.get(2)?,
            done: row.get(3)?,
        })
    }
}

/// One row of a child's activity history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub activity_id: i64,
    pub title: String,
    /// `None` when the activity was never checked.
    pub date: Option<NaiveDate>,
    pub done: Option<bool>,
}

/// How many of a child's activities are done on one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub done: u32,
    pub total: u32,
}

impl DailyProgress {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done >= self.total
    }
}

pub struct DailyChecks<'a> {
    conn: &'a Connection,
}

impl<'a> DailyChecks<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, activity_id: i64, date: NaiveDate) -> Result<Option<DailyCheck>> {
        self.conn
            .query_row(SELECT_CHECK, params![activity_id, date], DailyCheck::from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Records `done` for `(activity_id, date)` and keeps the reward ledger in step.
    ///
    /// Marking done replaces any reward already stored for the key with a
    /// single row worth `points`, so repeating the call never adds points
    /// twice. Marking not done removes the key's rewards. `child_id` must own
    /// the activity.
    pub fn mark(&self, activity_id: i64, child_id: i64, date: NaiveDate, done: bool, points: i64) -> Result<()> {
        if points < 0 {
            return Err(StoreError::InvalidInput(Message::RewardPointsNegative(points).to_string()));
        }
        let Some(activity) = Activities::new(self.conn).get(activity_id)? else {
            return Err(StoreError::NotFound {
                entity: "activity",
                id: activity_id,
            });
        };
        // Rewards are only ever booked to the activity's owner.
        if activity.child_id != child_id {
            return Err(StoreError::InvalidInput(Message::ActivityNotOwned { activity_id, child_id }.to_string()));
        }

        let tx = self.conn.unchecked_transaction()?;

        let existing = tx
            .query_row(SELECT_CHECK, params![activity_id, date], DailyCheck::from_row)
            .optional()?;
        match existing {
            Some(_) => tx.execute(UPDATE_CHECK, params![activity_id, date, done])?,
            None => tx.execute(INSERT_CHECK, params![activity_id, date, done])?,
        };

        delete_rewards(&tx, child_id, activity_id, date)?;
        if done {
            insert_reward(&tx, child_id, activity_id, date, points)?;
        }

        tx.commit()?;
        Ok(())
    }

    /// The child's activities joined with their checks, newest date first.
    pub fn history_for_child(&self, child_id: i64) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(SELECT_HISTORY)?;
        let entry_iter = stmt.query_map(params![child_id], |row| {
            Ok(HistoryEntry {
                activity_id: row.get(0)?,
                title: row.get(1)?,
                date: row.get(2)?,
                done: row.get(3)?,
            })
        })?;

        let mut history = Vec::new();
        for entry in entry_iter {
            history.push(entry?);
        }
        Ok(history)
    }

    /// Done versus total activity count for the child on `date`.
    pub fn progress_for_child(&self, child_id: i64, date: NaiveDate) -> Result<DailyProgress> {
        let total = Activities::new(self.conn).count_for_child(child_id)?;
        let done: u32 = self.conn.query_row(COUNT_DONE_FOR_DATE, params![child_id, date], |row| row.get(0))?;
        Ok(DailyProgress { done, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_serialize_dates_as_iso_days() {
        let check = DailyCheck {
            id: 1,
            activity_id: 2,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            done: true,
        };
        let json = serde_json::to_string(&check).unwrap();
        assert!(json.contains("\"date\":\"2024-05-01\""));

        let back: DailyCheck = serde_json::from_str(&json).unwrap();
        assert_eq!(back, check);
    }
}
