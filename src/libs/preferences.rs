//! Application preferences stored in the `settings` table.
//!
//! Values are persisted as the strings `"true"` and `"false"`. A missing key
//! falls back to its default: sound is on, monthly retention is off.

use crate::db::settings::Settings;
use crate::libs::error::Result;
use crate::libs::messages::Message;
use crate::msg_warning;
use serde::{Deserialize, Serialize};

pub const SOUND_ENABLED: &str = "soundEnabled";
pub const MONTHLY_RETENTION: &str = "monthlyRetention";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub sound_enabled: bool,
    /// Run orphan cleanup every time the store starts.
    pub monthly_retention: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            monthly_retention: false,
        }
    }
}

impl Preferences {
    pub fn load(settings: &Settings<'_>) -> Result<Self> {
        let sound = settings.get(SOUND_ENABLED)?;
        let retention = settings.get(MONTHLY_RETENTION)?;

        Ok(Self {
            sound_enabled: parse_flag(SOUND_ENABLED, sound.as_deref(), true),
            monthly_retention: parse_flag(MONTHLY_RETENTION, retention.as_deref(), false),
        })
    }

    pub fn save(&self, settings: &Settings<'_>) -> Result<()> {
        settings.save(SOUND_ENABLED, flag_value(self.sound_enabled))?;
        settings.save(MONTHLY_RETENTION, flag_value(self.monthly_retention))
    }
}

pub fn flag_value(enabled: bool) -> &'static str {
    if enabled {
        "true"
    } else {
        "false"
    }
}

/// Reads a stored `"true"`/`"false"` flag, keeping `default` when the key is
/// missing or holds anything else.
fn parse_flag(key: &str, value: Option<&str>, default: bool) -> bool {
    match value {
        None => default,
        Some("true") => true,
        Some("false") => false,
        Some(other) => {
            msg_warning!(Message::SettingInvalidBool(key.to_string(), other.to_string()));
            default
        }
    }
}
