//! # LittleWins - local persistence for a children's habit tracker
//!
//! Children, their recurring activities, the daily check for each activity,
//! the reward points those checks earn, and the monthly milestones unlocked by
//! points, all kept in one local SQLite file.
//!
//! ## Features
//!
//! - **Tracking**: Children, activities and per-day completion checks
//! - **Rewards**: One reward row per completed check, summed per month or lifetime
//! - **Milestones**: Monthly point thresholds with sticky completions
//! - **Maintenance**: Full reset and orphan cleanup
//! - **Settings**: Key/value preferences such as sound and monthly retention
//!
//! ## Usage
//!
//! ```rust,no_run
//! use littlewins::libs::config::Config;
//! use littlewins::libs::data_storage::DataStorage;
//! use littlewins::libs::error::Degrade;
//! use littlewins::Store;
//!
//! let config = Config::read().unwrap_or_default();
//! let mut store = Store::from_config(&config, &DataStorage::new());
//! store.startup();
//!
//! for child in store.list_children().or_empty() {
//!     println!("{}: {} points this month", child.name, store.get_monthly_points(child.id).or_empty());
//! }
//! ```

pub mod db;
pub mod libs;
pub mod store;

pub use libs::error::{Result, StoreError};
pub use store::Store;
