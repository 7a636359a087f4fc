/// Every message the store can log.
///
/// Parameters carry the identifiers or values needed to make the line useful
/// when reading logs after the fact.
#[derive(Debug, Clone)]
pub enum Message {
    // === SCHEMA MESSAGES ===
    SchemaReady(usize), // table count
    SchemaInitFailed(String),
    StoreUnavailable(String), // operation name
    DatabaseOpened(String),   // path

    // === CHILD MESSAGES ===
    ChildAdded(i64, String), // id, name
    ChildDeleted(i64),
    ChildNameEmpty,

    // === ACTIVITY MESSAGES ===
    ActivityAdded(i64, String), // id, title
    ActivityDeleted(i64),
    ActivityTitleEmpty,

    // === DAILY CHECK MESSAGES ===
    DailyCheckMarked {
        activity_id: i64,
        date: String,
        done: bool,
    },
    RewardPointsNegative(i64),
    ActivityNotOwned {
        activity_id: i64,
        child_id: i64,
    },

    // === MILESTONE MESSAGES ===
    MilestoneAdded(i64, String), // id, title
    MilestoneDeleted(i64),
    MilestoneTitleEmpty,
    MilestonePointsNegative(i64),
    MilestoneNotOwned {
        milestone_id: i64,
        child_id: i64,
    },
    MilestoneReached {
        child_id: i64,
        milestone_id: i64,
        month: String,
    },

    // === SETTINGS MESSAGES ===
    SettingSaved(String), // key
    SettingInvalidBool(String, String), // key, stored value

    // === MAINTENANCE MESSAGES ===
    AllDataReset,
    OrphansCleaned(usize), // deleted rows
    StartupCleanupSkipped,
    StartupCleanupFailed(String),

    // === CONFIGURATION MESSAGES ===
    ConfigFileNotFound,
    ConfigLoaded(String), // path
    ConfigSaved(String),  // path
    ConfigInvalidPoints(i64),

    // === ERROR MESSAGES ===
    OperationFailed(String, String), // operation, error
    Degraded(String),
    InvalidMonth(String),
}
