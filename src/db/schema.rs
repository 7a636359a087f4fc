//! Table definitions and idempotent schema creation.
//!
//! The store has a single schema version. Every table is created with
//! `CREATE TABLE IF NOT EXISTS`, so [`SchemaManager::apply`] is safe to run on
//! every process start against a new or an existing database file.
//!
//! ## Usage
//!
//! ```rust
//! use littlewins::db::schema::SchemaManager;
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! let manager = SchemaManager::new();
//! manager.apply(&mut conn)?;
//! assert_eq!(manager.existing_tables(&conn)?.len(), 7);
//! # Ok::<(), rusqlite::Error>(())
//! ```

use rusqlite::{Connection, Result};

/// One table of the store: its name and the statement that creates it.
#[derive(Debug, Clone)]
struct TableDef {
    name: &'static str,
    create: &'static str,
}

/// Registry of the seven tables, in creation order.
///
/// Parents are registered before the tables that reference them so the
/// declared foreign keys always name an existing table.
pub struct SchemaManager {
    tables: Vec<TableDef>,
    indices: Vec<&'static str>,
}

impl SchemaManager {
    pub fn new() -> Self {
        let mut manager = Self {
            tables: Vec::new(),
            indices: Vec::new(),
        };
        manager.register_tables();
        manager
    }

    fn register_tables(&mut self) {
        self.add_table(
            "children",
            "CREATE TABLE IF NOT EXISTS children (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            )",
        );

        self.add_table(
            "activities",
            "CREATE TABLE IF NOT EXISTS activities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                childId INTEGER NOT NULL,
                title TEXT NOT NULL,
                FOREIGN KEY (childId) REFERENCES children(id)
            )",
        );

        // (activityId, date) is kept unique by the marking transaction, not by a constraint.
        self.add_table(
            "daily_checks",
            "CREATE TABLE IF NOT EXISTS daily_checks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                activityId INTEGER NOT NULL,
                date TEXT NOT NULL,
                done INTEGER NOT NULL,
                FOREIGN KEY (activityId) REFERENCES activities(id)
            )",
        );

        self.add_table(
            "rewards",
            "CREATE TABLE IF NOT EXISTS rewards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                childId INTEGER NOT NULL,
                activityId INTEGER,
                date TEXT NOT NULL,
                points INTEGER NOT NULL,
                FOREIGN KEY (childId) REFERENCES children(id),
                FOREIGN KEY (activityId) REFERENCES activities(id)
            )",
        );

        self.add_table(
            "settings",
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT
            )",
        );

        self.add_table(
            "milestones",
            "CREATE TABLE IF NOT EXISTS milestones (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                childId INTEGER NOT NULL,
                title TEXT NOT NULL,
                pointsRequired INTEGER NOT NULL,
                FOREIGN KEY (childId) REFERENCES children(id)
            )",
        );

        self.add_table(
            "milestone_completions",
            "CREATE TABLE IF NOT EXISTS milestone_completions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                milestoneId INTEGER NOT NULL,
                childId INTEGER NOT NULL,
                month TEXT NOT NULL,
                FOREIGN KEY (milestoneId) REFERENCES milestones(id),
                FOREIGN KEY (childId) REFERENCES children(id)
            )",
        );

        self.add_index("CREATE INDEX IF NOT EXISTS idx_activities_child ON activities(childId)");
        self.add_index("CREATE INDEX IF NOT EXISTS idx_daily_checks_activity_date ON daily_checks(activityId, date)");
        self.add_index("CREATE INDEX IF NOT EXISTS idx_rewards_child_date ON rewards(childId, date)");
        self.add_index("CREATE INDEX IF NOT EXISTS idx_milestones_child ON milestones(childId)");
        self.add_index(
            "CREATE INDEX IF NOT EXISTS idx_milestone_completions_key ON milestone_completions(childId, milestoneId, month)",
        );
    }

    fn add_table(&mut self, name: &'static str, create: &'static str) {
        self.tables.push(TableDef { name, create });
    }

    fn add_index(&mut self, create: &'static str) {
        self.indices.push(create);
    }

    /// Names of the tables this manager creates, in creation order.
    pub fn table_names(&self) -> Vec<&'static str> {
        self.tables.iter().map(|t| t.name).collect()
    }

    /// Creates every missing table and index in one transaction.
    pub fn apply(&self, conn: &mut Connection) -> Result<()> {
        let tx = conn.transaction()?;
        for table in &self.tables {
            tx.execute(table.create, [])?;
        }
        for index in &self.indices {
            tx.execute(index, [])?;
        }
        tx.commit()
    }

    /// Tables of this schema that currently exist in `conn`.
    pub fn existing_tables(&self, conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
        let mut existing = Vec::new();
        for name in self.table_names() {
            let mut rows = stmt.query([name])?;
            if rows.next()?.is_some() {
                existing.push(name.to_string());
            }
        }
        Ok(existing)
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the full schema to `conn`.
pub fn init_schema(conn: &mut Connection) -> Result<()> {
    SchemaManager::new().apply(conn)
}
