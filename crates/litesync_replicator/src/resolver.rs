//! Pluggable conflict resolution.
//!
//! A conflict arises when the same document was changed on both sides of a
//! replication since they last agreed. The replication engine hands both
//! versions to the configured [`ConflictResolver`] and stores whichever
//! version it returns. This crate only carries the resolver to the engine; it
//! never calls it.

/// One version of a document taking part in a conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentVersion {
    /// Document ID.
    pub doc_id: String,
    /// Revision ID, conventionally `"<generation>-<digest>"`.
    pub rev_id: String,
    /// Document body, or `None` if this version is a deletion.
    pub body: Option<Vec<u8>>,
}

impl DocumentVersion {
    /// Creates a live document version.
    pub fn new(doc_id: impl Into<String>, rev_id: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            doc_id: doc_id.into(),
            rev_id: rev_id.into(),
            body: Some(body),
        }
    }

    /// Creates a deletion (tombstone) version.
    pub fn deleted(doc_id: impl Into<String>, rev_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            rev_id: rev_id.into(),
            body: None,
        }
    }

    /// Returns true if this version deletes the document.
    pub fn is_deleted(&self) -> bool {
        self.body.is_none()
    }

    /// The generation number of the revision ID.
    ///
    /// Returns 0 if the revision ID has no numeric prefix.
    pub fn generation(&self) -> u64 {
        self.rev_id
            .split_once('-')
            .map_or(self.rev_id.as_str(), |(generation, _)| generation)
            .parse()
            .unwrap_or(0)
    }
}

/// Chooses the winner between two conflicting document versions.
///
/// Implementations must be deterministic and free of side effects. The
/// engine may call a resolver from any thread.
pub trait ConflictResolver: Send + Sync {
    /// Returns the version to keep.
    ///
    /// The result may be either input or a new, merged version.
    fn resolve(&self, local: &DocumentVersion, remote: &DocumentVersion) -> DocumentVersion;
}

impl<F> ConflictResolver for F
where
    F: Fn(&DocumentVersion, &DocumentVersion) -> DocumentVersion + Send + Sync,
{
    fn resolve(&self, local: &DocumentVersion, remote: &DocumentVersion) -> DocumentVersion {
        self(local, remote)
    }
}

/// Always keeps the local version.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalWins;

impl ConflictResolver for LocalWins {
    fn resolve(&self, local: &DocumentVersion, _remote: &DocumentVersion) -> DocumentVersion {
        local.clone()
    }
}

/// Always accepts the remote version.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteWins;

impl ConflictResolver for RemoteWins {
    fn resolve(&self, _local: &DocumentVersion, remote: &DocumentVersion) -> DocumentVersion {
        remote.clone()
    }
}

/// Keeps the version with the longer revision history.
///
/// Equal generations fall back to comparing revision IDs, so both peers of a
/// replication pick the same winner without talking to each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostHistoryWins;

impl ConflictResolver for MostHistoryWins {
    fn resolve(&self, local: &DocumentVersion, remote: &DocumentVersion) -> DocumentVersion {
        let local_key = (local.generation(), local.rev_id.as_str());
        let remote_key = (remote.generation(), remote.rev_id.as_str());
        if remote_key > local_key {
            remote.clone()
        } else {
            local.clone()
        }
    }
}
