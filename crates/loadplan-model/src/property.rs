//! Per-request key/value data and response matchers

use serde::{Deserialize, Serialize};

/// Key/value pair attached to a request
///
/// Keys are not unique across a model; each transformer decides which keys it
/// understands. Values are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: String,
}

impl Property {
    /// Create new property
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Named request parameter (query or form field)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    /// Create new parameter
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Expected-response matcher
///
/// A response passes when it contains `pattern_to_test`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assertion {
    pub pattern_to_test: String,
}

impl Assertion {
    /// Create new assertion
    #[inline]
    #[must_use]
    pub fn new(pattern_to_test: impl Into<String>) -> Self {
        Self {
            pattern_to_test: pattern_to_test.into(),
        }
    }

    /// Pattern the response must contain
    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern_to_test
    }
}

impl From<&str> for Assertion {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for Assertion {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}
