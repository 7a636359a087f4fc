//! Display implementation for littlewins messages.
//!
//! All log wording lives here so the store modules only ever name a
//! [`Message`] variant and its parameters.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SCHEMA MESSAGES ===
            Message::SchemaReady(count) => format!("Schema ready ({} tables)", count),
            Message::SchemaInitFailed(error) => format!("Failed to initialize schema: {}", error),
            Message::StoreUnavailable(op) => format!("Store unavailable, skipping {}", op),
            Message::DatabaseOpened(path) => format!("Opened database at {}", path),

            // === CHILD MESSAGES ===
            Message::ChildAdded(id, name) => format!("Child '{}' added with id {}", name, id),
            Message::ChildDeleted(id) => format!("Child {} and all related data deleted", id),
            Message::ChildNameEmpty => "Child name must not be empty".to_string(),

            // === ACTIVITY MESSAGES ===
            Message::ActivityAdded(id, title) => format!("Activity '{}' added with id {}", title, id),
            Message::ActivityDeleted(id) => format!("Activity {} deleted", id),
            Message::ActivityTitleEmpty => "Activity title must not be empty".to_string(),

            // === DAILY CHECK MESSAGES ===
            Message::DailyCheckMarked { activity_id, date, done } => {
                format!("Activity {} marked {} for {}", activity_id, if *done { "done" } else { "not done" }, date)
            }
            Message::RewardPointsNegative(points) => format!("Reward points must not be negative, got {}", points),
            Message::ActivityNotOwned { activity_id, child_id } => {
                format!("Activity {} does not belong to child {}", activity_id, child_id)
            }

            // === MILESTONE MESSAGES ===
            Message::MilestoneAdded(id, title) => format!("Milestone '{}' added with id {}", title, id),
            Message::MilestoneDeleted(id) => format!("Milestone {} deleted", id),
            Message::MilestoneTitleEmpty => "Milestone title must not be empty".to_string(),
            Message::MilestonePointsNegative(points) => format!("Milestone points must not be negative, got {}", points),
            Message::MilestoneNotOwned { milestone_id, child_id } => {
                format!("Milestone {} does not belong to child {}", milestone_id, child_id)
            }
            Message::MilestoneReached { child_id, milestone_id, month } => {
                format!("Child {} reached milestone {} in {}", child_id, milestone_id, month)
            }

            // === SETTINGS MESSAGES ===
            Message::SettingSaved(key) => format!("Setting '{}' saved", key),
            Message::SettingInvalidBool(key, value) => format!("Setting '{}' holds '{}', expected true or false", key, value),

            // === MAINTENANCE MESSAGES ===
            Message::AllDataReset => "All data has been reset".to_string(),
            Message::OrphansCleaned(count) => format!("Removed {} orphaned row(s)", count),
            Message::StartupCleanupSkipped => "Monthly retention disabled, skipping cleanup".to_string(),
            Message::StartupCleanupFailed(error) => format!("Startup cleanup failed: {}", error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigFileNotFound => "Configuration file not found, using defaults".to_string(),
            Message::ConfigLoaded(path) => format!("Configuration loaded from {}", path),
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigInvalidPoints(points) => format!("points_per_check must not be negative, got {}", points),

            // === ERROR MESSAGES ===
            Message::OperationFailed(op, error) => format!("{} failed: {}", op, error),
            Message::Degraded(error) => format!("Returning an empty result after: {}", error),
            Message::InvalidMonth(value) => format!("Invalid month '{}', expected YYYY-MM", value),
        };

        write!(f, "{}", text)
    }
}
