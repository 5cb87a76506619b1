//! # Database State
//!
//! Wraps the `Database` handle for use in commands. The pool inside is
//! thread-safe, so no extra locking is needed here.

use storefront_db::{CollectionRepository, Database};

/// Wrapper around `Database` for command state.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Shorthand for `inner().collections()`.
    pub fn collections(&self) -> CollectionRepository {
        self.db.collections()
    }
}
