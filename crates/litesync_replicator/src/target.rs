//! Replication targets.

use crate::database::DatabaseRef;
use crate::error::{ConfigError, ConfigResult};
use std::fmt;
use url::Url;

/// The peer a replication session syncs against.
///
/// A target is either a remote endpoint reached over the network or another
/// database opened in the same process. Build one with
/// [`ReplicationTarget::from_address`] or [`ReplicationTarget::from_database`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationTarget {
    /// A remote database, identified by its URL.
    Url(Url),
    /// A local database.
    Database(DatabaseRef),
}

impl ReplicationTarget {
    /// Creates a remote target from a URL string.
    ///
    /// The address must parse as a URL and name a host.
    pub fn from_address(address: &str) -> ConfigResult<Self> {
        let url = Url::parse(address).map_err(|e| {
            ConfigError::invalid_argument(format!("malformed target address `{address}`: {e}"))
        })?;
        Self::from_url(url)
    }

    /// Creates a remote target from an already parsed URL.
    pub fn from_url(url: Url) -> ConfigResult<Self> {
        // file:/// URLs report an empty host rather than none
        if matches!(url.host_str(), None | Some("")) {
            return Err(ConfigError::invalid_argument(format!(
                "target address `{url}` has no host"
            )));
        }
        tracing::trace!(target_url = %url, "created remote replication target");
        Ok(Self::Url(url))
    }

    /// Creates a local target from an open database.
    pub fn from_database(database: DatabaseRef) -> ConfigResult<Self> {
        if !database.is_open() {
            return Err(ConfigError::invalid_argument(format!(
                "target database `{}` is closed",
                database.name()
            )));
        }
        tracing::trace!(database = database.name(), "created local replication target");
        Ok(Self::Database(database))
    }

    /// The remote URL, or `None` for a local target.
    pub fn address(&self) -> Option<&Url> {
        match self {
            ReplicationTarget::Url(url) => Some(url),
            ReplicationTarget::Database(_) => None,
        }
    }

    /// The local database, or `None` for a remote target.
    pub fn database(&self) -> Option<&DatabaseRef> {
        match self {
            ReplicationTarget::Url(_) => None,
            ReplicationTarget::Database(db) => Some(db),
        }
    }

    /// Returns true for a remote target.
    pub fn is_remote(&self) -> bool {
        matches!(self, ReplicationTarget::Url(_))
    }

    /// Returns true for a local target.
    pub fn is_local(&self) -> bool {
        matches!(self, ReplicationTarget::Database(_))
    }
}

impl fmt::Display for ReplicationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplicationTarget::Url(url) => write!(f, "{url}"),
            ReplicationTarget::Database(db) => write!(f, "db:{}", db.name()),
        }
    }
}
