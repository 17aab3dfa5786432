use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors from constructing a [`ResourceKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceKeyError {
    /// The input was empty or contained only whitespace.
    #[error("resource name cannot be empty or whitespace")]
    Empty,
    /// The name contains characters other than ASCII letters, digits, `_` and `-`.
    #[error("resource name contains invalid characters (only letters, digits, _ and - allowed)")]
    InvalidCharacters,
    /// The name starts with a digit or `-`.
    #[error("resource name must start with a letter or underscore")]
    MustStartWithLetter,
}

/// A validated resource type name such as `aws_vpc` or `x509_certificate`.
///
/// The name is kept exactly as the author wrote it: `etc-hosts` and
/// `etc_hosts` are distinct keys, and so are `file` and `File`. A valid name
/// is non-empty, contains only ASCII letters, digits, `_` and `-`, and starts
/// with a letter or `_`.
///
/// # Examples
///
/// ```
/// use vigil_core::ResourceKey;
///
/// let key: ResourceKey = "azure_generic_resource".parse().unwrap();
/// assert_eq!(key.as_str(), "azure_generic_resource");
///
/// assert!("etc-hosts".parse::<ResourceKey>().unwrap() != "etc_hosts");
/// assert!("aws vpc".parse::<ResourceKey>().is_err());
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Create a new `ResourceKey`, validating the input without rewriting it.
    pub fn new(raw: &str) -> Result<Self, ResourceKeyError> {
        if raw.trim().is_empty() {
            return Err(ResourceKeyError::Empty);
        }
        if !raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            return Err(ResourceKeyError::InvalidCharacters);
        }
        if !raw.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            return Err(ResourceKeyError::MustStartWithLetter);
        }

        Ok(Self(raw.to_owned()))
    }

    /// Return the inner string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name with its first letter uppercased, as used in report messages
    /// (`aws_vpc` becomes `Aws_vpc`).
    pub fn capitalized(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResourceKey {
    type Err = ResourceKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ResourceKey {
    type Error = ResourceKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ResourceKey {
    type Error = ResourceKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<ResourceKey> for String {
    fn from(key: ResourceKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ResourceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ResourceKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResourceKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for ResourceKey {
    fn eq(&self, other: &String) -> bool {
        self.0 == *other
    }
}
