//! The store: one owned database handle and every operation the UI calls.
//!
//! A [`Store`] is built once at startup and lives as long as the process.
//! Opening it creates the schema; if that fails the store stays
//! *unavailable* and every operation returns [`StoreError::Unavailable`]
//! without touching the database. Any other fault is logged here, at the
//! operation boundary, and returned to the caller. UI code that prefers an
//! empty list over an error can use [`crate::libs::error::Degrade`].
//!
//! ## Usage
//!
//! ```rust
//! use littlewins::store::Store;
//! use littlewins::libs::clock::FixedClock;
//! use chrono::NaiveDate;
//!
//! let may_first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let mut store = Store::open_in_memory().with_clock(FixedClock(may_first));
//!
//! let ava = store.add_child("Ava")?;
//! let teeth = store.add_activity(ava, "Brush teeth")?;
//! store.mark_daily_check(teeth, ava, may_first, true)?;
//!
//! assert_eq!(store.get_monthly_points(ava)?, 1);
//! # Ok::<(), littlewins::libs::error::StoreError>(())
//! ```

use crate::db::activities::{Activities, Activity};
use crate::db::children::{Child, Children};
use crate::db::daily_checks::{DailyCheck, DailyChecks, DailyProgress, HistoryEntry};
use crate::db::db::Db;
use crate::db::maintenance::{Maintenance, OrphanReport};
use crate::db::milestones::{Milestone, MilestoneCompletion, MilestoneStatus, Milestones};
use crate::db::rewards::{Reward, Rewards};
use crate::db::schema::SchemaManager;
use crate::db::settings::Settings;
use crate::libs::clock::{Clock, SystemClock, YearMonth};
use crate::libs::config::{Config, DEFAULT_POINTS_PER_CHECK};
use crate::libs::data_storage::DataStorage;
use crate::libs::error::{Result, StoreError};
use crate::libs::messages::Message;
use crate::libs::preferences::{self, Preferences};
use crate::{msg_debug, msg_error, msg_info, msg_warning};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A child with how far along they are on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildProgress {
    pub child: Child,
    pub progress: DailyProgress,
}

pub struct Store {
    db: Option<Db>,
    ready: bool,
    clock: Box<dyn Clock>,
    points_per_check: i64,
}

impl Store {
    /// Opens (or creates) the database file at `path` and initializes the schema.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let db = Db::open(path.as_ref()).map_err(|e| {
            msg_error!(Message::OperationFailed("open database".to_string(), e.to_string()));
        });
        Self::from_db(db.ok())
    }

    pub fn open_in_memory() -> Self {
        let db = Db::open_in_memory().map_err(|e| {
            msg_error!(Message::OperationFailed("open in-memory database".to_string(), e.to_string()));
        });
        Self::from_db(db.ok())
    }

    /// Opens the database named by `config`, inside `storage` unless the
    /// config gives an explicit path.
    pub fn from_config(config: &Config, storage: &DataStorage) -> Self {
        let store = match config.database_path(storage) {
            Ok(path) => Self::open(path),
            Err(e) => {
                msg_error!(Message::OperationFailed("resolve database path".to_string(), e.to_string()));
                Self::from_db(None)
            }
        };
        store.with_points_per_check(config.points_per_check)
    }

    fn from_db(db: Option<Db>) -> Self {
        let mut store = Self {
            db,
            ready: false,
            clock: Box::new(SystemClock),
            points_per_check: DEFAULT_POINTS_PER_CHECK,
        };
        // Failure is recorded in `ready`; callers see it as `Unavailable`.
        let _ = store.initialize();
        store
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_points_per_check(mut self, points: i64) -> Self {
        self.points_per_check = points;
        self
    }

    /// Creates any missing table. Safe to call again on a live store.
    pub fn initialize(&mut self) -> Result<()> {
        let Some(db) = self.db.as_mut() else {
            self.ready = false;
            msg_error!(Message::SchemaInitFailed("no database connection".to_string()));
            return Err(StoreError::Unavailable);
        };

        let manager = SchemaManager::new();
        match manager.apply(&mut db.conn) {
            Ok(()) => {
                self.ready = true;
                msg_debug!(Message::SchemaReady(manager.table_names().len()));
                Ok(())
            }
            Err(e) => {
                self.ready = false;
                msg_error!(Message::SchemaInitFailed(e.to_string()));
                Err(StoreError::Unavailable)
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.ready
    }

    /// Raw connection, for diagnostics and tooling that needs to inspect the file.
    pub fn connection(&self) -> Option<&Connection> {
        self.db.as_ref().map(|db| &db.conn)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn current_month(&self) -> YearMonth {
        self.clock.current_month()
    }

    /// Runs `f` against the connection, short-circuiting when unavailable
    /// and logging any failure under `op`.
    fn run<T>(&self, op: &str, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = match (&self.db, self.ready) {
            (Some(db), true) => &db.conn,
            _ => {
                msg_debug!(Message::StoreUnavailable(op.to_string()));
                return Err(StoreError::Unavailable);
            }
        };

        match f(conn) {
            Ok(value) => Ok(value),
            Err(e) => {
                msg_error!(Message::OperationFailed(op.to_string(), e.to_string()));
                Err(e)
            }
        }
    }

    // === CHILDREN ===

    pub fn list_children(&self) -> Result<Vec<Child>> {
        self.run("list children", |conn| Children::new(conn).list())
    }

    pub fn add_child(&mut self, name: &str) -> Result<i64> {
        self.run("add child", |conn| {
            let id = Children::new(conn).insert(name)?;
            msg_info!(Message::ChildAdded(id, name.trim().to_string()));
            Ok(id)
        })
    }

    /// Deletes the child and everything that belongs to them, atomically.
    pub fn delete_child_cascade(&mut self, child_id: i64) -> Result<()> {
        self.run("delete child", |conn| {
            Children::new(conn).delete_cascade(child_id)?;
            msg_info!(Message::ChildDeleted(child_id));
            Ok(())
        })
    }

    /// Every child with their done/total activity count for `date`.
    pub fn children_with_progress(&self, date: NaiveDate) -> Result<Vec<ChildProgress>> {
        self.run("load children progress", |conn| {
            let checks = DailyChecks::new(conn);
            let mut result = Vec::new();
            for child in Children::new(conn).list()? {
                let progress = checks.progress_for_child(child.id, date)?;
                result.push(ChildProgress { child, progress });
            }
            Ok(result)
        })
    }

    // === ACTIVITIES ===

    pub fn list_activities_for_child(&self, child_id: i64) -> Result<Vec<Activity>> {
        self.run("list activities", |conn| Activities::new(conn).list_for_child(child_id))
    }

    pub fn add_activity(&mut self, child_id: i64, title: &str) -> Result<i64> {
        self.run("add activity", |conn| {
            let id = Activities::new(conn).insert(child_id, title)?;
            msg_info!(Message::ActivityAdded(id, title.trim().to_string()));
            Ok(id)
        })
    }

    /// Deletes the activity and its daily checks. Its rewards are kept.
    pub fn delete_activity(&mut self, activity_id: i64) -> Result<()> {
        self.run("delete activity", |conn| {
            Activities::new(conn).delete(activity_id)?;
            msg_info!(Message::ActivityDeleted(activity_id));
            Ok(())
        })
    }

    // === DAILY CHECKS ===

    pub fn get_daily_check(&self, activity_id: i64, date: NaiveDate) -> Result<Option<DailyCheck>> {
        self.run("get daily check", |conn| DailyChecks::new(conn).get(activity_id, date))
    }

    /// Marks the activity done or not done for `date`, earning the configured
    /// points per completion.
    pub fn mark_daily_check(&mut self, activity_id: i64, child_id: i64, date: NaiveDate, done: bool) -> Result<()> {
        let points = self.points_per_check;
        self.mark_daily_check_with_points(activity_id, child_id, date, done, points)
    }

    pub fn mark_daily_check_with_points(
        &mut self,
        activity_id: i64,
        child_id: i64,
        date: NaiveDate,
        done: bool,
        points: i64,
    ) -> Result<()> {
        self.run("mark daily check", |conn| {
            DailyChecks::new(conn).mark(activity_id, child_id, date, done, points)?;
            msg_debug!(Message::DailyCheckMarked {
                activity_id,
                date: date.to_string(),
                done,
            });
            Ok(())
        })
    }

    /// Full history of the child's activities, newest first, including
    /// activities that were never checked.
    pub fn get_daily_checks_for_child(&self, child_id: i64) -> Result<Vec<HistoryEntry>> {
        self.run("load history", |conn| DailyChecks::new(conn).history_for_child(child_id))
    }

    pub fn daily_progress(&self, child_id: i64, date: NaiveDate) -> Result<DailyProgress> {
        self.run("load daily progress", |conn| DailyChecks::new(conn).progress_for_child(child_id, date))
    }

    // === REWARDS & POINTS ===

    pub fn list_rewards_for_child(&self, child_id: i64) -> Result<Vec<Reward>> {
        self.run("list rewards", |conn| Rewards::new(conn).list_for_child(child_id))
    }

    /// Points earned in the current month.
    pub fn get_monthly_points(&self, child_id: i64) -> Result<i64> {
        self.get_monthly_points_for(child_id, self.current_month())
    }

    pub fn get_monthly_points_for(&self, child_id: i64, month: YearMonth) -> Result<i64> {
        self.run("sum monthly points", |conn| Rewards::new(conn).monthly_points(child_id, month))
    }

    pub fn get_total_points(&self, child_id: i64) -> Result<i64> {
        self.run("sum total points", |conn| Rewards::new(conn).total_points(child_id))
    }

    // === MILESTONES ===

    pub fn list_milestones_for_child(&self, child_id: i64) -> Result<Vec<Milestone>> {
        self.run("list milestones", |conn| Milestones::new(conn).list_for_child(child_id))
    }

    pub fn add_milestone(&mut self, child_id: i64, title: &str, points_required: i64) -> Result<i64> {
        self.run("add milestone", |conn| {
            let id = Milestones::new(conn).insert(child_id, title, points_required)?;
            msg_info!(Message::MilestoneAdded(id, title.trim().to_string()));
            Ok(id)
        })
    }

    pub fn delete_milestone(&mut self, milestone_id: i64) -> Result<()> {
        self.run("delete milestone", |conn| {
            Milestones::new(conn).delete(milestone_id)?;
            msg_info!(Message::MilestoneDeleted(milestone_id));
            Ok(())
        })
    }

    pub fn is_milestone_completed(&self, child_id: i64, milestone_id: i64) -> Result<bool> {
        let month = self.current_month();
        self.run("check milestone", |conn| Milestones::new(conn).is_completed(child_id, milestone_id, month))
    }

    /// Records the milestone as reached this month. Returns `false` when it
    /// was already recorded.
    pub fn mark_milestone_completed(&mut self, child_id: i64, milestone_id: i64) -> Result<bool> {
        let month = self.current_month();
        self.run("mark milestone", |conn| {
            let inserted = Milestones::new(conn).mark_completed(child_id, milestone_id, month)?;
            if inserted {
                msg_info!(Message::MilestoneReached {
                    child_id,
                    milestone_id,
                    month: month.to_string(),
                });
            }
            Ok(inserted)
        })
    }

    pub fn list_milestone_completions(&self, child_id: i64) -> Result<Vec<MilestoneCompletion>> {
        self.run("list milestone completions", |conn| Milestones::new(conn).completions_for_child(child_id))
    }

    /// Compares this month's points with every milestone of the child,
    /// records newly reached ones, and reports each milestone's state.
    pub fn evaluate_milestones(&mut self, child_id: i64) -> Result<Vec<MilestoneStatus>> {
        let month = self.current_month();
        self.run("evaluate milestones", |conn| {
            let points = Rewards::new(conn).monthly_points(child_id, month)?;
            Milestones::new(conn).evaluate(child_id, month, points)
        })
    }

    // === SETTINGS ===

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.run("get setting", |conn| Settings::new(conn).get(key))
    }

    pub fn save_setting(&mut self, key: &str, value: &str) -> Result<()> {
        self.run("save setting", |conn| {
            Settings::new(conn).save(key, value)?;
            msg_debug!(Message::SettingSaved(key.to_string()));
            Ok(())
        })
    }

    pub fn list_settings(&self) -> Result<Vec<(String, String)>> {
        self.run("list settings", |conn| Settings::new(conn).list())
    }

    pub fn preferences(&self) -> Result<Preferences> {
        self.run("load preferences", |conn| Preferences::load(&Settings::new(conn)))
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) -> Result<()> {
        self.save_setting(preferences::SOUND_ENABLED, preferences::flag_value(enabled))
    }

    pub fn set_monthly_retention(&mut self, enabled: bool) -> Result<()> {
        self.save_setting(preferences::MONTHLY_RETENTION, preferences::flag_value(enabled))
    }

    // === MAINTENANCE ===

    /// Deletes every row in every table.
    pub fn reset_all_data(&mut self) -> Result<()> {
        self.run("reset all data", |conn| {
            Maintenance::new(conn).reset_all()?;
            msg_info!(Message::AllDataReset);
            Ok(())
        })
    }

    pub fn clean_orphans(&mut self) -> Result<OrphanReport> {
        self.run("clean orphans", |conn| {
            let report = Maintenance::new(conn).clean_orphans()?;
            msg_info!(Message::OrphansCleaned(report.total()));
            Ok(report)
        })
    }

    /// Startup housekeeping: runs orphan cleanup when monthly retention is on.
    ///
    /// Never fails; returns whether a cleanup ran to completion.
    pub fn startup(&mut self) -> bool {
        let retention = match self.preferences() {
            Ok(preferences) => preferences.monthly_retention,
            Err(e) => {
                msg_warning!(Message::StartupCleanupFailed(e.to_string()));
                return false;
            }
        };
        if !retention {
            msg_debug!(Message::StartupCleanupSkipped);
            return false;
        }

        match self.clean_orphans() {
            Ok(_) => true,
            Err(e) => {
                msg_warning!(Message::StartupCleanupFailed(e.to_string()));
                false
            }
        }
    }
}
