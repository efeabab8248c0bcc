//! Test fixtures and database helpers.
//!
//! Provides an in-memory [`LocalDatabase`] and convenience functions for
//! setting up common replication configurations.

use litesync_replicator::{
    DatabaseRef, LocalDatabase, ReplicationTarget, ReplicatorConfiguration,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Default remote address used by fixtures.
pub const TEST_REMOTE_ADDRESS: &str = "ws://localhost:4984/db";

/// An in-memory stand-in for a local database.
///
/// Holds no documents; it only tracks its name and whether it is open.
pub struct MemoryDatabase {
    name: String,
    is_open: RwLock<bool>,
}

impl MemoryDatabase {
    /// Opens a database with the given name.
    pub fn open(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            is_open: RwLock::new(true),
        })
    }

    /// Opens a database with a unique generated name.
    pub fn open_anonymous() -> Arc<Self> {
        Self::open(format!("testdb-{}", Uuid::new_v4()))
    }

    /// Closes the database. Closing twice is a no-op.
    pub fn close(&self) {
        let mut is_open = self.is_open.write();
        if *is_open {
            tracing::trace!(database = %self.name, "closed test database");
        }
        *is_open = false;
    }

    /// Returns a replication handle to this database.
    pub fn handle(self: &Arc<Self>) -> DatabaseRef {
        DatabaseRef::new(Arc::clone(self))
    }
}

impl LocalDatabase for MemoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_open(&self) -> bool {
        *self.is_open.read()
    }
}

impl fmt::Debug for MemoryDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDatabase")
            .field("name", &self.name)
            .field("is_open", &self.is_open())
            .finish()
    }
}

/// Runs a test with a freshly opened database, closing it afterwards.
///
/// # Example
///
/// ```rust,ignore
/// use litesync_testkit::with_open_db;
///
/// #[test]
/// fn my_test() {
///     with_open_db(|db| {
///         let target = ReplicationTarget::from_database(db.handle()).unwrap();
///         // ... test operations
///     });
/// }
/// ```
pub fn with_open_db<F, R>(f: F) -> R
where
    F: FnOnce(&Arc<MemoryDatabase>) -> R,
{
    let db = MemoryDatabase::open_anonymous();
    let result = f(&db);
    db.close();
    result
}

/// Runs a test with a local database and a second database to replicate with.
pub fn with_db_pair<F, R>(f: F) -> R
where
    F: FnOnce(&Arc<MemoryDatabase>, &Arc<MemoryDatabase>) -> R,
{
    let db = MemoryDatabase::open("db");
    let other = MemoryDatabase::open("otherdb");
    let result = f(&db, &other);
    other.close();
    db.close();
    result
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// A valid configuration replicating `db` with [`TEST_REMOTE_ADDRESS`].
    pub fn remote_configuration(db: &Arc<MemoryDatabase>) -> ReplicatorConfiguration {
        ReplicatorConfiguration::new()
            .with_database(db.handle())
            .with_target(
                ReplicationTarget::from_address(TEST_REMOTE_ADDRESS)
                    .expect("Fixture address must parse"),
            )
    }

    /// A valid configuration replicating `db` with the local database `other`.
    pub fn local_configuration(
        db: &Arc<MemoryDatabase>,
        other: &Arc<MemoryDatabase>,
    ) -> ReplicatorConfiguration {
        ReplicatorConfiguration::new()
            .with_database(db.handle())
            .with_target(
                ReplicationTarget::from_database(other.handle())
                    .expect("Fixture target database must be open"),
            )
    }
}

/// Installs a `tracing` subscriber for test output.
///
/// Honors `RUST_LOG` and otherwise shows debug events from
/// `litesync_replicator`. Safe to call from every test; only the first call
/// installs anything.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("litesync_replicator=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
