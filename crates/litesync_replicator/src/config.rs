//! Configuration for a replication session.

use crate::database::DatabaseRef;
use crate::error::{ConfigError, ConfigResult, RequiredField};
use crate::options::{BasicAuth, OptionValue, ReplicatorOptions};
use crate::replicator_type::ReplicatorType;
use crate::resolver::ConflictResolver;
use crate::snapshot::ReplicationSnapshot;
use crate::target::ReplicationTarget;
use std::fmt;
use std::sync::Arc;

/// Configuration for a replication session.
///
/// Fields can be set in any order and are not checked against each other
/// until [`validate`](Self::validate) or [`snapshot`](Self::snapshot) runs.
///
/// Cloning copies the options and shares the database, target and conflict
/// resolver, which name external resources rather than owned data.
#[derive(Clone, Default)]
pub struct ReplicatorConfiguration {
    /// The local database to replicate. Required.
    pub database: Option<DatabaseRef>,
    /// The peer to replicate with. Required.
    pub target: Option<ReplicationTarget>,
    /// Direction of replication.
    pub replicator_type: ReplicatorType,
    /// Keep running and watching for changes after the initial sync.
    pub continuous: bool,
    /// Resolver for conflicting revisions; `None` selects the engine's default.
    pub conflict_resolver: Option<Arc<dyn ConflictResolver>>,
    /// Extra options for the engine.
    pub options: ReplicatorOptions,
}

impl ReplicatorConfiguration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the local database.
    #[must_use]
    pub fn with_database(mut self, database: DatabaseRef) -> Self {
        self.database = Some(database);
        self
    }

    /// Sets the target.
    #[must_use]
    pub fn with_target(mut self, target: ReplicationTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the replicator type.
    #[must_use]
    pub fn with_replicator_type(mut self, replicator_type: ReplicatorType) -> Self {
        self.replicator_type = replicator_type;
        self
    }

    /// Sets continuous mode.
    #[must_use]
    pub fn with_continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    /// Sets the conflict resolver.
    #[must_use]
    pub fn with_conflict_resolver<R: ConflictResolver + 'static>(self, resolver: R) -> Self {
        self.with_shared_conflict_resolver(Arc::new(resolver))
    }

    /// Sets a conflict resolver that is shared with other configurations.
    #[must_use]
    pub fn with_shared_conflict_resolver(mut self, resolver: Arc<dyn ConflictResolver>) -> Self {
        self.conflict_resolver = Some(resolver);
        self
    }

    /// Sets a single option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key, value);
        self
    }

    /// Sets the authentication option.
    #[must_use]
    pub fn with_authentication(mut self, auth: &BasicAuth) -> Self {
        self.options.set_authentication(auth);
        self
    }

    /// Borrows the conflict resolver, if any.
    pub fn conflict_resolver(&self) -> Option<&dyn ConflictResolver> {
        self.conflict_resolver.as_deref()
    }

    /// Checks that the configuration can start a session.
    ///
    /// The database is checked before the target, so an empty configuration
    /// reports the database as missing.
    pub fn validate(&self) -> ConfigResult<()> {
        self.required_fields().map(|_| ())
    }

    fn required_fields(&self) -> ConfigResult<(&DatabaseRef, &ReplicationTarget)> {
        let database = self
            .database
            .as_ref()
            .ok_or(ConfigError::missing(RequiredField::Database))?;
        let target = self
            .target
            .as_ref()
            .ok_or(ConfigError::missing(RequiredField::Target))?;
        Ok((database, target))
    }

    /// Validates the configuration and takes a frozen copy of it.
    ///
    /// Replication engines should keep the snapshot, not the configuration.
    /// Edits made to the configuration afterwards never reach the snapshot.
    pub fn snapshot(&self) -> ConfigResult<ReplicationSnapshot> {
        let (database, target) = self.required_fields()?;
        Ok(ReplicationSnapshot::new(
            database.clone(),
            target.clone(),
            self.replicator_type,
            self.continuous,
            self.conflict_resolver.clone(),
            self.options.clone(),
        ))
    }
}

impl fmt::Debug for ReplicatorConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplicatorConfiguration")
            .field("database", &self.database)
            .field("target", &self.target)
            .field("replicator_type", &self.replicator_type)
            .field("continuous", &self.continuous)
            .field("conflict_resolver", &self.conflict_resolver.is_some())
            .field("options", &self.options.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}
