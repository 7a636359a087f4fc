//! Reward ledger.
//!
//! One row per completed activity and day. Point totals are always summed
//! from this table; nothing caches them.

use crate::libs::clock::YearMonth;
use crate::libs::error::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

const INSERT_REWARD: &str = "INSERT INTO rewards (childId, activityId, date, points) VALUES (?1, ?2, ?3, ?4)";
const DELETE_REWARDS_FOR_CHECK: &str = "DELETE FROM rewards WHERE childId = ?1 AND activityId = ?2 AND date = ?3";
const SELECT_BY_CHILD: &str = "SELECT id, childId, activityId, date, points FROM rewards WHERE childId = ?1 ORDER BY date DESC, id DESC";
const SUM_BY_CHILD_AND_MONTH: &str = "SELECT COALESCE(SUM(points), 0) FROM rewards WHERE childId = ?1 AND substr(date, 1, 7) = ?2";
const SUM_BY_CHILD: &str = "SELECT COALESCE(SUM(points), 0) FROM rewards WHERE childId = ?1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: i64,
    pub child_id: i64,
    /// `None` for rewards not tied to an activity.
    pub activity_id: Option<i64>,
    pub date: NaiveDate,
    pub points: i64,
}

impl Reward {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Reward {
            id: row.get(0)?,
            child_id: row.get(1)?,
            activity_id: row.get(2)?,
            date: row.get(3)?,
            points: row.get(4)?,
        })
    }
}

/// Writes one reward row. Runs inside the caller's transaction.
pub(crate) fn insert_reward(conn: &Connection, child_id: i64, activity_id: i64, date: NaiveDate, points: i64) -> Result<()> {
    conn.execute(INSERT_REWARD, params![child_id, activity_id, date, points])?;
    Ok(())
}

/// Removes every reward row for one `(child, activity, date)` key.
pub(crate) fn delete_rewards(conn: &Connection, child_id: i64, activity_id: i64, date: NaiveDate) -> Result<usize> {
    Ok(conn.execute(DELETE_REWARDS_FOR_CHECK, params![child_id, activity_id, date])?)
}

pub struct Rewards<'a> {
    conn: &'a Connection,
}

impl<'a> Rewards<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The child's ledger, newest first.
    pub fn list_for_child(&self, child_id: i64) -> Result<Vec<Reward>> {
        let mut stmt = self.conn.prepare(SELECT_BY_CHILD)?;
        let reward_iter = stmt.query_map(params![child_id], Reward::from_row)?;

        let mut rewards = Vec::new();
        for reward in reward_iter {
            rewards.push(reward?);
        }
        Ok(rewards)
    }

    /// Sum of the child's points for rewards dated inside `month`.
    pub fn monthly_points(&self, child_id: i64, month: YearMonth) -> Result<i64> {
        let total: i64 = self
            .conn
            .query_row(SUM_BY_CHILD_AND_MONTH, params![child_id, month.to_string()], |row| row.get(0))?;
        Ok(total)
    }

    /// Sum of every point the child has earned.
    pub fn total_points(&self, child_id: i64) -> Result<i64> {
        let total: i64 = self.conn.query_row(SUM_BY_CHILD, params![child_id], |row| row.get(0))?;
        Ok(total)
    }
}
