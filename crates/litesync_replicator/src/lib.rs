//! # LiteSync Replicator
//!
//! Configuration model for LiteSync replication sessions.
//!
//! This crate provides:
//! - `ReplicationTarget`, a remote URL or a local database
//! - `ReplicatorConfiguration` with deferred validation
//! - `ReplicationSnapshot`, the frozen copy a session runs from
//! - The `ConflictResolver` capability and reference resolvers
//! - The open options bag with typed access to credentials
//!
//! ## Usage
//!
//! ```rust,ignore
//! use litesync_replicator::{BasicAuth, ReplicationTarget, ReplicatorConfiguration, ReplicatorType};
//!
//! let config = ReplicatorConfiguration::new()
//!     .with_database(db)
//!     .with_target(ReplicationTarget::from_address("wss://sync.example.com/db")?)
//!     .with_replicator_type(ReplicatorType::Pull)
//!     .with_authentication(&BasicAuth::new("alice", "secret"));
//!
//! let snapshot = config.snapshot()?;
//! engine.start(snapshot);
//! ```
//!
//! ## Key Invariants
//!
//! - A target is exactly one of URL or database
//! - Database and target are both required, checked once at validation
//! - Option keys are never validated; only `auth` has a documented shape
//! - Copies share database, target and resolver, and deep-copy options
//!
//! No operation here performs I/O or blocks. The replication engine that
//! consumes a snapshot lives elsewhere.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod error;
mod options;
mod replicator_type;
mod resolver;
mod snapshot;
mod target;

pub use config::ReplicatorConfiguration;
pub use database::{DatabaseRef, LocalDatabase};
pub use error::{ConfigError, ConfigResult, RequiredField};
pub use options::{
    BasicAuth, OptionValue, ReplicatorOptions, AUTH_OPTION, AUTH_PASSWORD, AUTH_USER_NAME,
};
pub use replicator_type::ReplicatorType;
pub use resolver::{ConflictResolver, DocumentVersion, LocalWins, MostHistoryWins, RemoteWins};
pub use snapshot::ReplicationSnapshot;
pub use target::ReplicationTarget;

pub use url::Url;
