//! Opaque handles to local databases.
//!
//! Replication never reads or writes documents through these handles. A
//! configuration only needs to know which database it refers to and whether
//! that database is still open.

use std::fmt;
use std::sync::Arc;

/// A local database that can take part in replication.
///
/// Implemented by the host's database type. Both methods must be cheap and
/// must not perform I/O.
pub trait LocalDatabase: Send + Sync {
    /// The database name, used in diagnostics.
    fn name(&self) -> &str;

    /// Returns true until the database has been closed.
    fn is_open(&self) -> bool;
}

/// A shared reference to a local database.
///
/// Cloning a `DatabaseRef` shares the same database; equality is identity,
/// so two handles compare equal only when they point at the same instance.
#[derive(Clone)]
pub struct DatabaseRef {
    inner: Arc<dyn LocalDatabase>,
}

impl DatabaseRef {
    /// Wraps a shared database.
    pub fn new<D: LocalDatabase + 'static>(db: Arc<D>) -> Self {
        Self { inner: db }
    }

    /// Wraps an already type-erased database.
    pub fn from_dyn(db: Arc<dyn LocalDatabase>) -> Self {
        Self { inner: db }
    }

    /// The database name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Whether the database is still open.
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Returns true if both handles refer to the same database instance.
    pub fn same_database(&self, other: &DatabaseRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Borrows the underlying database.
    pub fn as_database(&self) -> &dyn LocalDatabase {
        self.inner.as_ref()
    }
}

impl<D: LocalDatabase + 'static> From<Arc<D>> for DatabaseRef {
    fn from(db: Arc<D>) -> Self {
        Self::new(db)
    }
}

impl PartialEq for DatabaseRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_database(other)
    }
}

impl Eq for DatabaseRef {}

impl fmt::Debug for DatabaseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseRef")
            .field("name", &self.name())
            .field("is_open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Minimal database for unit tests.
    pub(crate) struct FakeDb {
        name: String,
        open: AtomicBool,
    }

    impl FakeDb {
        pub(crate) fn open(name: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                open: AtomicBool::new(true),
            })
        }

        pub(crate) fn close(&self) {
            self.open.store(false, Ordering::SeqCst);
        }
    }

    impl LocalDatabase for FakeDb {
        fn name(&self) -> &str {
            &self.name
        }

        fn is_open(&self) -> bool {
            self.open.load(Ordering::SeqCst)
        }
    }

    pub(crate) fn db_ref(name: &str) -> DatabaseRef {
        DatabaseRef::new(FakeDb::open(name))
    }
}
