//! Replication direction.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which way documents flow between the local database and the target.
///
/// The numeric codes are stable and may be persisted or sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplicatorType {
    /// Bidirectional; both push and pull.
    #[default]
    PushAndPull,
    /// Push local changes to the target.
    Push,
    /// Pull changes from the target.
    Pull,
}

impl ReplicatorType {
    /// Picks the type matching a pair of direction flags.
    ///
    /// Returns `None` when neither direction is requested.
    pub fn from_directions(push: bool, pull: bool) -> Option<Self> {
        match (push, pull) {
            (true, true) => Some(ReplicatorType::PushAndPull),
            (true, false) => Some(ReplicatorType::Push),
            (false, true) => Some(ReplicatorType::Pull),
            (false, false) => None,
        }
    }

    /// Returns true if local changes are sent to the target.
    pub fn pushes(&self) -> bool {
        matches!(self, ReplicatorType::PushAndPull | ReplicatorType::Push)
    }

    /// Returns true if target changes are fetched.
    pub fn pulls(&self) -> bool {
        matches!(self, ReplicatorType::PushAndPull | ReplicatorType::Pull)
    }

    /// Converts to a code.
    pub fn to_code(&self) -> u8 {
        match self {
            ReplicatorType::PushAndPull => 0,
            ReplicatorType::Push => 1,
            ReplicatorType::Pull => 2,
        }
    }

    /// Converts from a code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ReplicatorType::PushAndPull),
            1 => Some(ReplicatorType::Push),
            2 => Some(ReplicatorType::Pull),
            _ => None,
        }
    }

    /// Converts from a code, failing on unknown values.
    pub fn try_from_code(code: u8) -> ConfigResult<Self> {
        Self::from_code(code)
            .ok_or_else(|| ConfigError::invalid_argument(format!("unknown replicator type code {code}")))
    }

    /// The canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplicatorType::PushAndPull => "pushAndPull",
            ReplicatorType::Push => "push",
            ReplicatorType::Pull => "pull",
        }
    }
}

impl fmt::Display for ReplicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplicatorType {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "pushAndPull" => Ok(Self::PushAndPull),
            "push" => Ok(Self::Push),
            "pull" => Ok(Self::Pull),
            _ => Err(ConfigError::invalid_argument(format!(
                "invalid replicator type: {raw}"
            ))),
        }
    }
}
