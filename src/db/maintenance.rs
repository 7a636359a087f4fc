//! Whole-store maintenance: full reset and orphan cleanup.

use crate::libs::error::Result;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

// Children of the dependency graph go first.
const RESET_STATEMENTS: [&str; 7] = [
    "DELETE FROM milestone_completions",
    "DELETE FROM milestones",
    "DELETE FROM rewards",
    "DELETE FROM daily_checks",
    "DELETE FROM activities",
    "DELETE FROM children",
    "DELETE FROM settings",
];

const DELETE_ORPHAN_ACTIVITIES: &str = "DELETE FROM activities WHERE childId NOT IN (SELECT id FROM children)";
const DELETE_ORPHAN_CHECKS: &str = "DELETE FROM daily_checks WHERE activityId NOT IN (SELECT id FROM activities)";
const DELETE_ORPHAN_REWARDS: &str = "DELETE FROM rewards
    WHERE childId NOT IN (SELECT id FROM children)
       OR (activityId IS NOT NULL AND activityId NOT IN (SELECT id FROM activities))";
const DELETE_ORPHAN_MILESTONES: &str = "DELETE FROM milestones WHERE childId NOT IN (SELECT id FROM children)";
const DELETE_ORPHAN_COMPLETIONS: &str = "DELETE FROM milestone_completions
    WHERE milestoneId NOT IN (SELECT id FROM milestones)
       OR childId NOT IN (SELECT id FROM children)";

/// Rows removed by one [`Maintenance::clean_orphans`] run, per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanReport {
    pub activities: usize,
    pub daily_checks: usize,
    pub rewards: usize,
    pub milestones: usize,
    pub milestone_completions: usize,
}

impl OrphanReport {
    pub fn total(&self) -> usize {
        self.activities + self.daily_checks + self.rewards + self.milestones + self.milestone_completions
    }
}

pub struct Maintenance<'a> {
    conn: &'a Connection,
}

impl<'a> Maintenance<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Deletes every row of every table. Irreversible.
    pub fn reset_all(&self) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for statement in RESET_STATEMENTS {
            tx.execute(statement, [])?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Removes rows whose parent no longer exists.
    ///
    /// Parents are cleaned before their dependents (activities before checks
    /// and rewards, milestones before completions), so one run removes whole
    /// orphaned subtrees and a second run always reports zero.
    pub fn clean_orphans(&self) -> Result<OrphanReport> {
        let tx = self.conn.unchecked_transaction()?;

        let activities = tx.execute(DELETE_ORPHAN_ACTIVITIES, [])?;
        let daily_checks = tx.execute(DELETE_ORPHAN_CHECKS, [])?;
        let rewards = tx.execute(DELETE_ORPHAN_REWARDS, [])?;
        let milestones = tx.execute(DELETE_ORPHAN_MILESTONES, [])?;
        let milestone_completions = tx.execute(DELETE_ORPHAN_COMPLETIONS, [])?;

        tx.commit()?;
        Ok(OrphanReport {
            activities,
            daily_checks,
            rewards,
            milestones,
            milestone_completions,
        })
    }
}
