//! Milestones and their per-month completions.
//!
//! A milestone is a point threshold. Reaching it within a calendar month
//! records a completion for `(child, milestone, month)`. Completions are
//! sticky: once recorded they stay for that month even if the child's points
//! later drop below the threshold.

use crate::db::children::Children;
use crate::libs::clock::YearMonth;
use crate::libs::error::{Result, StoreError};
use crate::libs::messages::Message;
use crate::msg_info;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_MILESTONE: &str = "INSERT INTO milestones (childId, title, pointsRequired) VALUES (?1, ?2, ?3)";
const SELECT_BY_CHILD: &str = "SELECT id, childId, title, pointsRequired FROM milestones WHERE childId = ?1 ORDER BY pointsRequired ASC";
const SELECT_BY_ID: &str = "SELECT id, childId, title, pointsRequired FROM milestones WHERE id = ?1";
const DELETE_MILESTONE: &str = "DELETE FROM milestones WHERE id = ?1";
const DELETE_MILESTONE_COMPLETIONS: &str = "DELETE FROM milestone_completions WHERE milestoneId = ?1";

const SELECT_COMPLETION: &str = "SELECT id FROM milestone_completions WHERE childId = ?1 AND milestoneId = ?2 AND month = ?3 LIMIT 1";
const INSERT_COMPLETION: &str = "INSERT INTO milestone_completions (childId, milestoneId, month) VALUES (?1, ?2, ?3)";
const SELECT_COMPLETIONS_BY_CHILD: &str =
    "SELECT id, milestoneId, childId, month FROM milestone_completions WHERE childId = ?1 ORDER BY month DESC, id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: i64,
    pub child_id: i64,
    pub title: String,
    pub points_required: i64,
}

impl Milestone {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Milestone {
            id: row.get(0)?,
            child_id: row.get(1)?,
            title: row.get(2)?,
            points_required: row.get(3)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneCompletion {
    pub id: i64,
    pub milestone_id: i64,
    pub child_id: i64,
    pub month: YearMonth,
}

/// A milestone together with whether it is completed for the evaluated month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneStatus {
    pub milestone: Milestone,
    pub completed: bool,
}

pub struct Milestones<'a> {
    conn: &'a Connection,
}

impl<'a> Milestones<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The child's milestones, cheapest first.
    pub fn list_for_child(&self, child_id: i64) -> Result<Vec<Milestone>> {
        let mut stmt = self.conn.prepare(SELECT_BY_CHILD)?;
        let milestone_iter = stmt.query_map(params![child_id], Milestone::from_row)?;

        let mut milestones = Vec::new();
        for milestone in milestone_iter {
            milestones.push(milestone?);
        }
        Ok(milestones)
    }

    pub fn get(&self, id: i64) -> Result<Option<Milestone>> {
        self.conn
            .query_row(SELECT_BY_ID, params![id], Milestone::from_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn insert(&self, child_id: i64, title: &str, points_required: i64) -> Result<i64> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::InvalidInput(Message::MilestoneTitleEmpty.to_string()));
        }
        if points_required < 0 {
            return Err(StoreError::InvalidInput(Message::MilestonePointsNegative(points_required).to_string()));
        }
        if !Children::new(self.conn).exists(child_id)? {
            return Err(StoreError::NotFound {
                entity: "child",
                id: child_id,
            });
        }

        self.conn.execute(INSERT_MILESTONE, params![child_id, title, points_required])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Deletes the milestone and every completion recorded for it.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let deleted = tx.execute(DELETE_MILESTONE, params![id])?;
        tx.execute(DELETE_MILESTONE_COMPLETIONS, params![id])?;
        tx.commit()?;

        Ok(deleted)
    }

    pub fn is_completed(&self, child_id: i64, milestone_id: i64, month: YearMonth) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(SELECT_COMPLETION, params![child_id, milestone_id, month.to_string()], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    /// Records the completion unless it already exists.
    ///
    /// Returns `true` when a new row was written.
    pub fn mark_completed(&self, child_id: i64, milestone_id: i64, month: YearMonth) -> Result<bool> {
        let Some(milestone) = self.get(milestone_id)? else {
            return Err(StoreError::NotFound {
                entity: "milestone",
                id: milestone_id,
            });
        };
        if milestone.child_id != child_id {
            return Err(StoreError::InvalidInput(Message::MilestoneNotOwned { milestone_id, child_id }.to_string()));
        }

        let tx = self.conn.unchecked_transaction()?;
        let month_key = month.to_string();

        let existing: Option<i64> = tx
            .query_row(SELECT_COMPLETION, params![child_id, milestone_id, month_key], |row| row.get(0))
            .optional()?;
        if existing.is_some() {
            return Ok(false);
        }

        tx.execute(INSERT_COMPLETION, params![child_id, milestone_id, month_key])?;
        tx.commit()?;
        Ok(true)
    }

    pub fn completions_for_child(&self, child_id: i64) -> Result<Vec<MilestoneCompletion>> {
        let mut stmt = self.conn.prepare(SELECT_COMPLETIONS_BY_CHILD)?;
        let rows = stmt.query_map(params![child_id], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, i64>(2)?, row.get::<_, String>(3)?))
        })?;

        let mut completions = Vec::new();
        for row in rows {
            let (id, milestone_id, child_id, month) = row?;
            completions.push(MilestoneCompletion {
                id,
                milestone_id,
                child_id,
                month: month.parse()?,
            });
        }
        Ok(completions)
    }

    /// Marks every milestone whose threshold `points` meets and reports the
    /// completion state of all of the child's milestones for `month`.
    ///
    /// Already completed milestones stay completed regardless of `points`.
    pub fn evaluate(&self, child_id: i64, month: YearMonth, points: i64) -> Result<Vec<MilestoneStatus>> {
        let mut statuses = Vec::new();
        for milestone in self.list_for_child(child_id)? {
            let mut completed = self.is_completed(child_id, milestone.id, month)?;
            if !completed && points >= milestone.points_required {
                self.mark_completed(child_id, milestone.id, month)?;
                msg_info!(Message::MilestoneReached {
                    child_id,
                    milestone_id: milestone.id,
                    month: month.to_string(),
                });
                completed = true;
            }
            statuses.push(MilestoneStatus { milestone, completed });
        }
        Ok(statuses)
    }
}
