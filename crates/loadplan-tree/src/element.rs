//! Test-plan elements
//!
//! A [`TestElement`] is one node payload of an [`ArtifactTree`](crate::ArtifactTree):
//! a kind, a display name and an ordered property bag.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Kind of a test-plan element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Root of an executable plan
    TestPlan,

    /// Pool of virtual users
    ThreadGroup,

    /// SOAP call sampler
    SoapSampler,

    /// HTTP call sampler
    HttpSampler,

    /// Response body matcher
    ResponseAssertion,

    /// Default request headers
    HeaderManager,

    /// Per-user cookie store
    CookieManager,

    /// Gaussian-distributed delay
    GaussianRandomTimer,

    /// Result listener
    ResultCollector,
}

impl ElementKind {
    /// Stable identifier
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TestPlan => "test_plan",
            Self::ThreadGroup => "thread_group",
            Self::SoapSampler => "soap_sampler",
            Self::HttpSampler => "http_sampler",
            Self::ResponseAssertion => "response_assertion",
            Self::HeaderManager => "header_manager",
            Self::CookieManager => "cookie_manager",
            Self::GaussianRandomTimer => "gaussian_random_timer",
            Self::ResultCollector => "result_collector",
        }
    }

    /// Name given to freshly created elements
    #[inline]
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::TestPlan => "Test Plan",
            Self::ThreadGroup => "Thread Group",
            Self::SoapSampler => "SOAP/XML-RPC Request",
            Self::HttpSampler => "HTTP Request",
            Self::ResponseAssertion => "Response Assertion",
            Self::HeaderManager => "HTTP Header Manager",
            Self::CookieManager => "HTTP Cookie Manager",
            Self::GaussianRandomTimer => "Gaussian Random Timer",
            Self::ResultCollector => "View Results Tree",
        }
    }

    /// Whether elements of this kind issue requests
    #[inline]
    #[must_use]
    pub const fn is_sampler(self) -> bool {
        matches!(self, Self::SoapSampler | Self::HttpSampler)
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Property value of an element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    List(Vec<String>),
    Table(Vec<(String, String)>),
}

impl PropertyValue {
    /// Borrow as text if this is a text value
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as list if this is a list value
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Copy out integer value
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Borrow as name/value table
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&[(String, String)]> {
        match self {
            Self::Table(rows) => Some(rows),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<(String, String)>> for PropertyValue {
    fn from(value: Vec<(String, String)>) -> Self {
        Self::Table(value)
    }
}

/// Node payload of a test-plan tree
///
/// # Invariants
/// - Property order is insertion order; overwriting a key keeps its position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestElement {
    kind: ElementKind,
    name: String,
    #[serde(default)]
    properties: IndexMap<String, PropertyValue>,
}

impl TestElement {
    /// Create element with the kind's default name and no properties
    #[inline]
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            name: kind.default_name().to_string(),
            properties: IndexMap::new(),
        }
    }

    /// Builder-style rename
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder-style property setter
    #[inline]
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set_property(key, value);
        self
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set property, replacing any previous value under `key`
    ///
    /// Returns the replaced value.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    #[inline]
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Text property shortcut
    #[inline]
    #[must_use]
    pub fn text_property(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(PropertyValue::as_text)
    }

    #[inline]
    #[must_use]
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Remove property, preserving the order of the remaining ones
    #[inline]
    pub fn remove_property(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.shift_remove(key)
    }

    /// Properties in insertion order
    #[inline]
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}
