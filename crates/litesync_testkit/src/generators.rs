//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random replication settings
//! that maintain required invariants.

use litesync_replicator::{
    BasicAuth, DocumentVersion, OptionValue, ReplicatorOptions, ReplicatorType,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Strategy for generating well-formed remote addresses.
///
/// Produces `scheme://host[:port]/path` with a lowercase host. Every
/// generated string parses as a URL with a host, though parsing may drop a
/// default port such as `:80` for `ws`.
pub fn address_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["ws", "wss", "http", "https"]),
        prop::collection::vec(
            prop::string::string_regex("[a-z][a-z0-9]{0,11}").expect("Invalid regex"),
            1..4,
        ),
        prop::option::of(1u16..=65535),
        prop::collection::vec(
            prop::string::string_regex("[a-z0-9_]{1,12}").expect("Invalid regex"),
            0..3,
        ),
    )
        .prop_map(|(scheme, labels, port, segments)| {
            let mut address = format!("{scheme}://{}", labels.join("."));
            if let Some(port) = port {
                address.push_str(&format!(":{port}"));
            }
            address.push('/');
            address.push_str(&segments.join("/"));
            address
        })
}

/// Strategy for generating replicator types.
pub fn replicator_type_strategy() -> impl Strategy<Value = ReplicatorType> {
    prop_oneof![
        Just(ReplicatorType::PushAndPull),
        Just(ReplicatorType::Push),
        Just(ReplicatorType::Pull),
    ]
}

/// Strategy for generating option keys.
pub fn option_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_-]{0,15}").expect("Invalid regex")
}

/// Strategy for generating scalar option values.
pub fn option_scalar_strategy() -> impl Strategy<Value = OptionValue> {
    prop_oneof![
        Just(OptionValue::Null),
        any::<bool>().prop_map(OptionValue::Bool),
        any::<i64>().prop_map(OptionValue::Integer),
        (i64::MAX as u64 + 1..=u64::MAX).prop_map(OptionValue::UInteger),
        (-1.0e9f64..1.0e9).prop_map(OptionValue::Float),
        ".{0,24}".prop_map(OptionValue::Text),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(OptionValue::Bytes),
    ]
}

/// Strategy for generating nested option values.
pub fn option_value_strategy() -> impl Strategy<Value = OptionValue> {
    option_scalar_strategy().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(OptionValue::Array),
            prop::collection::btree_map(option_key_strategy(), inner, 0..6)
                .prop_map(OptionValue::Map),
        ]
    })
}

/// Strategy for generating whole option bags.
pub fn options_strategy() -> impl Strategy<Value = ReplicatorOptions> {
    prop::collection::btree_map(option_key_strategy(), option_value_strategy(), 0..8)
        .prop_map(|entries: BTreeMap<String, OptionValue>| ReplicatorOptions::from(entries))
}

/// Strategy for generating credentials.
pub fn basic_auth_strategy() -> impl Strategy<Value = BasicAuth> {
    ("[a-z][a-z0-9._]{0,15}", ".{0,32}")
        .prop_map(|(username, password)| BasicAuth::new(username, password))
}

/// Strategy for generating document versions with `<gen>-<digest>` revisions.
pub fn document_version_strategy() -> impl Strategy<Value = DocumentVersion> {
    (
        "[a-z0-9]{1,8}",
        1u64..1000,
        "[0-9a-f]{8}",
        prop::option::of(prop::collection::vec(any::<u8>(), 0..64)),
    )
        .prop_map(|(doc_id, generation, digest, body)| DocumentVersion {
            doc_id,
            rev_id: format!("{generation}-{digest}"),
            body,
        })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
