//! Database layer for the littlewins store.
//!
//! One borrowing repository per table family, each built from a
//! `&Connection`: [`children::Children`], [`activities::Activities`],
//! [`daily_checks::DailyChecks`], [`rewards::Rewards`],
//! [`milestones::Milestones`], [`settings::Settings`] and
//! [`maintenance::Maintenance`]. Operations that touch several tables run in a
//! single transaction.
//!
//! ## Usage
//!
//! ```rust
//! use littlewins::db::{children::Children, milestones::Milestones, schema};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! schema::init_schema(&mut conn)?;
//!
//! let child = Children::new(&conn).insert("Ava")?;
//! Milestones::new(&conn).insert(child, "Ice cream", 10)?;
//! assert_eq!(Milestones::new(&conn).list_for_child(child)?.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod activities;
pub mod children;
pub mod daily_checks;
pub mod db;
pub mod maintenance;
pub mod milestones;
pub mod rewards;
pub mod schema;
pub mod settings;
