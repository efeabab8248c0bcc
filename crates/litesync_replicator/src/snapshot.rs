//! Frozen configurations handed to a replication engine.

use crate::config::ReplicatorConfiguration;
use crate::database::DatabaseRef;
use crate::options::{BasicAuth, ReplicatorOptions};
use crate::replicator_type::ReplicatorType;
use crate::resolver::ConflictResolver;
use crate::target::ReplicationTarget;
use std::fmt;
use std::sync::Arc;

/// A validated, read-only copy of a [`ReplicatorConfiguration`].
///
/// Obtained from [`ReplicatorConfiguration::snapshot`]. The database and
/// target are guaranteed present. A running session reads only its snapshot,
/// so the caller may keep editing (or drop) the configuration it came from.
#[derive(Clone)]
pub struct ReplicationSnapshot {
    database: DatabaseRef,
    target: ReplicationTarget,
    replicator_type: ReplicatorType,
    continuous: bool,
    conflict_resolver: Option<Arc<dyn ConflictResolver>>,
    options: ReplicatorOptions,
}

impl ReplicationSnapshot {
    pub(crate) fn new(
        database: DatabaseRef,
        target: ReplicationTarget,
        replicator_type: ReplicatorType,
        continuous: bool,
        conflict_resolver: Option<Arc<dyn ConflictResolver>>,
        options: ReplicatorOptions,
    ) -> Self {
        if options.has_malformed_authentication() {
            tracing::warn!(
                database = database.name(),
                "`auth` option is not a username/password map; passing it through unchanged"
            );
        }
        tracing::debug!(
            database = database.name(),
            peer = %target,
            replicator_type = %replicator_type,
            continuous,
            custom_resolver = conflict_resolver.is_some(),
            options = options.len(),
            "took replication snapshot"
        );
        Self {
            database,
            target,
            replicator_type,
            continuous,
            conflict_resolver,
            options,
        }
    }

    /// The local database.
    pub fn database(&self) -> &DatabaseRef {
        &self.database
    }

    /// The replication target.
    pub fn target(&self) -> &ReplicationTarget {
        &self.target
    }

    /// Direction of replication.
    pub fn replicator_type(&self) -> ReplicatorType {
        self.replicator_type
    }

    /// Whether the session keeps running after the initial sync.
    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    /// The conflict resolver, or `None` for the engine's default policy.
    pub fn conflict_resolver(&self) -> Option<&dyn ConflictResolver> {
        self.conflict_resolver.as_deref()
    }

    /// Extra options.
    pub fn options(&self) -> &ReplicatorOptions {
        &self.options
    }

    /// Credentials for the target, if well-formed ones are configured.
    pub fn authentication(&self) -> Option<BasicAuth> {
        self.options.authentication()
    }

    /// Returns true if local changes are sent to the target.
    pub fn pushes(&self) -> bool {
        self.replicator_type.pushes()
    }

    /// Returns true if target changes are fetched.
    pub fn pulls(&self) -> bool {
        self.replicator_type.pulls()
    }

    /// Converts back into an editable configuration.
    pub fn to_configuration(&self) -> ReplicatorConfiguration {
        ReplicatorConfiguration {
            database: Some(self.database.clone()),
            target: Some(self.target.clone()),
            replicator_type: self.replicator_type,
            continuous: self.continuous,
            conflict_resolver: self.conflict_resolver.clone(),
            options: self.options.clone(),
        }
    }
}

impl fmt::Debug for ReplicationSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplicationSnapshot")
            .field("database", &self.database)
            .field("target", &self.target)
            .field("replicator_type", &self.replicator_type)
            .field("continuous", &self.continuous)
            .field("conflict_resolver", &self.conflict_resolver.is_some())
            .field("options", &self.options.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::db_ref;
    use crate::error::{ConfigError, RequiredField};
    use crate::options::{OptionValue, AUTH_OPTION, AUTH_USER_NAME};
    use crate::resolver::MostHistoryWins;

    fn configured() -> ReplicatorConfiguration {
        ReplicatorConfiguration::new()
            .with_database(db_ref("db"))
            .with_target(ReplicationTarget::from_address("wss://example.com/db").unwrap())
            .with_replicator_type(ReplicatorType::Pull)
            .with_continuous(true)
            .with_conflict_resolver(MostHistoryWins)
            .with_authentication(&BasicAuth::new("alice", "secret"))
    }

    #[test]
    fn snapshot_requires_database_and_target() {
        let err = ReplicatorConfiguration::new().snapshot().unwrap_err();
        assert_eq!(err, ConfigError::missing(RequiredField::Database));

        let err = ReplicatorConfiguration::new()
            .with_database(db_ref("db"))
            .snapshot()
            .unwrap_err();
        assert_eq!(err, ConfigError::missing(RequiredField::Target));
    }

    #[test]
    fn snapshot_mirrors_configuration() {
        let config = configured();
        let snapshot = config.snapshot().unwrap();

        assert_eq!(Some(snapshot.database()), config.database.as_ref());
        assert_eq!(Some(snapshot.target()), config.target.as_ref());
        assert_eq!(snapshot.replicator_type(), ReplicatorType::Pull);
        assert!(snapshot.is_continuous());
        assert!(snapshot.pulls());
        assert!(!snapshot.pushes());
        assert!(snapshot.conflict_resolver().is_some());
        assert_eq!(snapshot.authentication().unwrap().username, "alice");
    }

    #[test]
    fn snapshot_ignores_later_edits() {
        let mut config = configured();
        let snapshot = config.snapshot().unwrap();

        config.continuous = false;
        config.replicator_type = ReplicatorType::Push;
        config.target = None;
        config.conflict_resolver = None;
        *config
            .options
            .get_mut(AUTH_OPTION)
            .and_then(|auth| auth.get_mut(AUTH_USER_NAME))
            .unwrap() = OptionValue::from("bob");

        assert!(snapshot.is_continuous());
        assert_eq!(snapshot.replicator_type(), ReplicatorType::Pull);
        assert!(snapshot.target().is_remote());
        assert!(snapshot.conflict_resolver().is_some());
        assert_eq!(snapshot.authentication().unwrap().username, "alice");
    }

    #[test]
    fn back_to_configuration() {
        let snapshot = configured().snapshot().unwrap();
        let mut config = snapshot.to_configuration();
        assert!(config.validate().is_ok());
        assert_eq!(config.options, *snapshot.options());

        config.options.insert("extra", true);
        assert!(!snapshot.options().contains_key("extra"));
    }

    #[test]
    fn malformed_auth_still_snapshots() {
        let snapshot = configured()
            .with_option(AUTH_OPTION, "alice:secret")
            .snapshot()
            .unwrap();
        assert!(snapshot.authentication().is_none());
        assert!(snapshot.options().contains_key(AUTH_OPTION));
    }
}
