//! Extra replication options.
//!
//! Options are an open, string-keyed bag for settings that are not promoted to
//! first-class fields of [`ReplicatorConfiguration`](crate::ReplicatorConfiguration).
//! Keys are never checked against a schema; unknown keys are passed to the
//! replication engine untouched.
//!
//! One entry has a documented shape: [`AUTH_OPTION`] holds a map with
//! [`AUTH_USER_NAME`] and [`AUTH_PASSWORD`] strings. [`ReplicatorOptions::authentication`]
//! reads it without string-keyed lookups at the call site.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Options key for the authentication map.
pub const AUTH_OPTION: &str = "auth";

/// Authentication map key for the username string.
pub const AUTH_USER_NAME: &str = "username";

/// Authentication map key for the password string.
pub const AUTH_PASSWORD: &str = "password";

/// A dynamic option value.
///
/// Serializes untagged, so it maps one-to-one onto JSON. Byte strings have no
/// JSON form and come back as arrays of integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Unsigned integer above `i64::MAX`.
    UInteger(u64),
    /// Floating point number.
    Float(f64),
    /// Text string.
    Text(String),
    /// Array of values.
    Array(Vec<OptionValue>),
    /// String-keyed map.
    Map(BTreeMap<String, OptionValue>),
    /// Byte string.
    Bytes(Vec<u8>),
}

impl OptionValue {
    /// Returns true if this is null.
    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Null)
    }

    /// Returns the boolean value, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value, if this is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as an unsigned integer, if it is a non-negative one.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            OptionValue::Integer(i) => u64::try_from(*i).ok(),
            OptionValue::UInteger(u) => Some(*u),
            _ => None,
        }
    }

    /// Returns the float value. Integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Float(f) => Some(*f),
            OptionValue::Integer(i) => Some(*i as f64),
            OptionValue::UInteger(u) => Some(*u as f64),
            _ => None,
        }
    }

    /// Returns the text value, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the bytes, if this is a byte string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            OptionValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the elements, if this is an array.
    pub fn as_array(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the entries, if this is a map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, OptionValue>> {
        match self {
            OptionValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the entries mutably, if this is a map.
    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<String, OptionValue>> {
        match self {
            OptionValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up a key in a map value.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.as_map()?.get(key)
    }

    /// Looks up a key in a map value, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut OptionValue> {
        self.as_map_mut()?.get_mut(key)
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Integer(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        OptionValue::Integer(i64::from(v))
    }
}

impl From<u32> for OptionValue {
    fn from(v: u32) -> Self {
        OptionValue::Integer(i64::from(v))
    }
}

impl From<u64> for OptionValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => OptionValue::Integer(i),
            Err(_) => OptionValue::UInteger(v),
        }
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Float(v)
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Text(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(v.to_string())
    }
}

impl From<&[u8]> for OptionValue {
    fn from(v: &[u8]) -> Self {
        OptionValue::Bytes(v.to_vec())
    }
}

impl From<Vec<OptionValue>> for OptionValue {
    fn from(v: Vec<OptionValue>) -> Self {
        OptionValue::Array(v)
    }
}

impl From<BTreeMap<String, OptionValue>> for OptionValue {
    fn from(v: BTreeMap<String, OptionValue>) -> Self {
        OptionValue::Map(v)
    }
}

impl From<()> for OptionValue {
    fn from(_: ()) -> Self {
        OptionValue::Null
    }
}

/// Username and password credentials for a remote target.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

impl BasicAuth {
    /// Creates credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads credentials from an `auth` option value.
    ///
    /// Returns `None` unless the value is a map holding text under both
    /// [`AUTH_USER_NAME`] and [`AUTH_PASSWORD`].
    pub fn from_option(value: &OptionValue) -> Option<Self> {
        let username = value.get(AUTH_USER_NAME)?.as_str()?;
        let password = value.get(AUTH_PASSWORD)?.as_str()?;
        Some(Self::new(username, password))
    }

    /// Converts to the `auth` option map.
    pub fn to_option(&self) -> OptionValue {
        let mut map = BTreeMap::new();
        map.insert(AUTH_USER_NAME.to_string(), OptionValue::from(self.username.as_str()));
        map.insert(AUTH_PASSWORD.to_string(), OptionValue::from(self.password.as_str()));
        OptionValue::Map(map)
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The options bag of a replicator configuration.
///
/// Cloning copies every entry; no value is shared between clones. `Debug`
/// redacts the password under [`AUTH_OPTION`].
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplicatorOptions {
    entries: BTreeMap<String, OptionValue>,
}

impl ReplicatorOptions {
    /// Creates an empty options bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets an option.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    /// Gets an option mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut OptionValue> {
        self.entries.get_mut(key)
    }

    /// Sets an option, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes an option.
    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.entries.remove(key)
    }

    /// Returns true if the option is set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of options set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no option is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, OptionValue> {
        &self.entries
    }

    /// Reads the credentials under [`AUTH_OPTION`].
    ///
    /// Returns `None` when the entry is absent or not shaped as documented.
    pub fn authentication(&self) -> Option<BasicAuth> {
        self.get(AUTH_OPTION).and_then(BasicAuth::from_option)
    }

    /// Stores credentials under [`AUTH_OPTION`], replacing any previous entry.
    pub fn set_authentication(&mut self, auth: &BasicAuth) {
        self.entries.insert(AUTH_OPTION.to_string(), auth.to_option());
    }

    /// Returns true if [`AUTH_OPTION`] is set to something other than a
    /// well-formed credential map.
    pub fn has_malformed_authentication(&self) -> bool {
        self.contains_key(AUTH_OPTION) && self.authentication().is_none()
    }
}

impl fmt::Debug for ReplicatorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = self.entries.clone();
        if let Some(auth) = entries.get_mut(AUTH_OPTION) {
            // A malformed entry may still hold the password in some other shape.
            if auth.as_map().is_none() {
                *auth = OptionValue::from("[REDACTED]");
            } else if let Some(password) = auth.get_mut(AUTH_PASSWORD) {
                *password = OptionValue::from("[REDACTED]");
            }
        }
        f.debug_struct("ReplicatorOptions")
            .field("entries", &entries)
            .finish()
    }
}

impl From<BTreeMap<String, OptionValue>> for ReplicatorOptions {
    fn from(entries: BTreeMap<String, OptionValue>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for ReplicatorOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for ReplicatorOptions {
    type Item = (String, OptionValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> ReplicatorOptions {
        let mut options = ReplicatorOptions::new();
        options.set_authentication(&BasicAuth::new("alice", "secret"));
        options
    }

    #[test]
    fn authentication_round_trip() {
        let options = alice();
        let auth = options.authentication().unwrap();
        assert_eq!(auth.username, "alice");
        assert_eq!(auth.password, "secret");

        let raw = options.get(AUTH_OPTION).unwrap();
        assert_eq!(raw.get(AUTH_USER_NAME).and_then(OptionValue::as_str), Some("alice"));
        assert_eq!(raw.get(AUTH_PASSWORD).and_then(OptionValue::as_str), Some("secret"));
    }

    #[test]
    fn malformed_authentication_is_kept() {
        let mut options = ReplicatorOptions::new();
        options.insert(AUTH_OPTION, "alice:secret");
        assert!(options.authentication().is_none());
        assert!(options.has_malformed_authentication());
        assert_eq!(
            options.get(AUTH_OPTION).and_then(OptionValue::as_str),
            Some("alice:secret")
        );

        let mut map = BTreeMap::new();
        map.insert(AUTH_USER_NAME.to_string(), OptionValue::from("alice"));
        map.insert(AUTH_PASSWORD.to_string(), OptionValue::from(42i64));
        options.insert(AUTH_OPTION, map);
        assert!(options.authentication().is_none());
    }

    #[test]
    fn absent_authentication() {
        let options = ReplicatorOptions::new();
        assert!(options.authentication().is_none());
        assert!(!options.has_malformed_authentication());
    }

    #[test]
    fn unknown_keys_pass_through() {
        let options: ReplicatorOptions = [
            ("heartbeat", OptionValue::from(30i64)),
            ("channels", OptionValue::Array(vec![OptionValue::from("a"), OptionValue::from("b")])),
            ("x-vendor", OptionValue::Null),
        ]
        .into_iter()
        .collect();

        assert_eq!(options.len(), 3);
        assert_eq!(options.get("heartbeat").and_then(OptionValue::as_i64), Some(30));
        assert_eq!(options.get("channels").and_then(OptionValue::as_array).map(<[_]>::len), Some(2));
        assert!(options.get("x-vendor").unwrap().is_null());
        let keys: Vec<_> = options.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["channels", "heartbeat", "x-vendor"]);
    }

    #[test]
    fn clone_is_deep() {
        let original = alice();
        let mut copy = original.clone();

        *copy
            .get_mut(AUTH_OPTION)
            .and_then(|auth| auth.get_mut(AUTH_USER_NAME))
            .unwrap() = OptionValue::from("bob");

        assert_eq!(copy.authentication().unwrap().username, "bob");
        assert_eq!(original.authentication().unwrap().username, "alice");
    }

    #[test]
    fn debug_redacts_password() {
        let text = format!("{:?}", BasicAuth::new("alice", "secret"));
        assert!(text.contains("alice"));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn options_debug_redacts_password() {
        let text = format!("{:?}", alice());
        assert!(text.contains("alice"));
        assert!(text.contains("[REDACTED]"));
        assert!(!text.contains("secret"));

        let mut options = ReplicatorOptions::new();
        options.insert(AUTH_OPTION, "alice:secret");
        options.insert("heartbeat", 30i64);
        let text = format!("{options:?}");
        assert!(!text.contains("secret"));
        assert!(text.contains("heartbeat"));
    }

    #[test]
    fn large_unsigned_integers_stay_exact() {
        assert_eq!(OptionValue::from(7u64), OptionValue::Integer(7));
        assert_eq!(OptionValue::from(u64::MAX), OptionValue::UInteger(u64::MAX));
        assert_eq!(OptionValue::from(u64::MAX).as_u64(), Some(u64::MAX));
        assert_eq!(OptionValue::from(u64::MAX).as_i64(), None);
        assert_eq!(OptionValue::from(-1i64).as_u64(), None);
    }

    #[test]
    fn value_accessors() {
        assert_eq!(OptionValue::from(true).as_bool(), Some(true));
        assert_eq!(OptionValue::from(2i64).as_f64(), Some(2.0));
        assert_eq!(OptionValue::from(0.5).as_f64(), Some(0.5));
        assert_eq!(OptionValue::from(&b"\x01\x02"[..]).as_bytes(), Some(&[1u8, 2][..]));
        assert_eq!(OptionValue::from("x").as_i64(), None);
        assert!(OptionValue::from(()).is_null());
        assert!(OptionValue::from(1i64).get("k").is_none());
    }
}
