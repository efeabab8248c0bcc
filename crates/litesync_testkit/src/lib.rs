//! # LiteSync Testkit
//!
//! Test utilities for LiteSync.
//!
//! This crate provides:
//! - An in-memory `LocalDatabase` and configuration fixtures
//! - Property-based test generators using proptest
//! - A `tracing` subscriber for test output
//!
//! ## Usage
//!
//! ```rust,ignore
//! use litesync_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_database() {
//!     with_open_db(|db| {
//!         let config = scenarios::remote_configuration(db);
//!         // ... test operations
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
