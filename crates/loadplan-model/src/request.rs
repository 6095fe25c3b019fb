//! Request variants
//!
//! [`Request`] is a closed set of variants. [`RequestKind`] is its tag and is
//! what transformer registries dispatch on. [`RequestVariant`] lets generic
//! code narrow a [`Request`] to one concrete variant.

use crate::model::ThinkTime;
use crate::property::{Assertion, Parameter, Property};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};

/// Variant tag of a [`Request`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// SOAP call
    Soap,

    /// Plain HTTP call
    Http,
}

impl RequestKind {
    /// Every request kind, in declaration order
    pub const ALL: [RequestKind; 2] = [RequestKind::Soap, RequestKind::Http];

    /// Type name used in diagnostics
    #[inline]
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Soap => "SoapRequest",
            Self::Http => "HttpRequest",
        }
    }
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A single request of the workload model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Soap(SoapRequest),
    Http(HttpRequest),
}

impl Request {
    /// Runtime variant tag
    #[inline]
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Soap(_) => RequestKind::Soap,
            Self::Http(_) => RequestKind::Http,
        }
    }

    /// Element identifier
    #[inline]
    #[must_use]
    pub fn e_id(&self) -> &str {
        match self {
            Self::Soap(r) => &r.e_id,
            Self::Http(r) => &r.e_id,
        }
    }

    /// Ordered properties
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        match self {
            Self::Soap(r) => &r.properties,
            Self::Http(r) => &r.properties,
        }
    }

    /// Ordered assertions
    #[inline]
    #[must_use]
    pub fn assertions(&self) -> &[Assertion] {
        match self {
            Self::Soap(r) => &r.assertions,
            Self::Http(r) => &r.assertions,
        }
    }

    /// Per-request think time override
    #[inline]
    #[must_use]
    pub fn think_time(&self) -> Option<ThinkTime> {
        match self {
            Self::Soap(r) => r.think_time,
            Self::Http(r) => r.think_time,
        }
    }

    /// Narrow to a concrete variant
    #[inline]
    #[must_use]
    pub fn narrow<V: RequestVariant>(&self) -> Option<&V> {
        V::narrow(self)
    }
}

impl From<SoapRequest> for Request {
    fn from(request: SoapRequest) -> Self {
        Self::Soap(request)
    }
}

impl From<HttpRequest> for Request {
    fn from(request: HttpRequest) -> Self {
        Self::Http(request)
    }
}

/// Concrete request variant
///
/// This trait is **sealed**: the variant set is closed and lives in this crate.
pub trait RequestVariant: Debug + private::Sealed {
    /// Tag of this variant
    const KIND: RequestKind;

    /// Borrow `request` as `Self` if its runtime variant matches
    fn narrow(request: &Request) -> Option<&Self>;
}

mod private {
    pub trait Sealed {}

    impl Sealed for super::SoapRequest {}
    impl Sealed for super::HttpRequest {}
}

/// SOAP request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SoapRequest {
    pub e_id: String,

    #[serde(default)]
    pub properties: Vec<Property>,

    #[serde(default)]
    pub assertions: Vec<Assertion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub think_time: Option<ThinkTime>,
}

impl SoapRequest {
    /// Create request with the given element identifier
    #[inline]
    #[must_use]
    pub fn new(e_id: impl Into<String>) -> Self {
        Self {
            e_id: e_id.into(),
            ..Self::default()
        }
    }

    /// Append property
    #[inline]
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(Property::new(key, value));
        self
    }

    /// Append assertion
    #[inline]
    #[must_use]
    pub fn with_assertion(mut self, assertion: impl Into<Assertion>) -> Self {
        self.assertions.push(assertion.into());
        self
    }

    /// Set think time override
    #[inline]
    #[must_use]
    pub fn with_think_time(mut self, think_time: ThinkTime) -> Self {
        self.think_time = Some(think_time);
        self
    }
}

impl RequestVariant for SoapRequest {
    const KIND: RequestKind = RequestKind::Soap;

    fn narrow(request: &Request) -> Option<&Self> {
        match request {
            Request::Soap(r) => Some(r),
            Request::Http(_) => None,
        }
    }
}

/// HTTP request
///
/// Unlike SOAP calls, HTTP calls carry named parameters next to their
/// properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HttpRequest {
    pub e_id: String,

    #[serde(default)]
    pub properties: Vec<Property>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub assertions: Vec<Assertion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub think_time: Option<ThinkTime>,
}

impl HttpRequest {
    /// Create request with the given element identifier
    #[inline]
    #[must_use]
    pub fn new(e_id: impl Into<String>) -> Self {
        Self {
            e_id: e_id.into(),
            ..Self::default()
        }
    }

    /// Append property
    #[inline]
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(Property::new(key, value));
        self
    }

    /// Append parameter
    #[inline]
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, value));
        self
    }

    /// Append assertion
    #[inline]
    #[must_use]
    pub fn with_assertion(mut self, assertion: impl Into<Assertion>) -> Self {
        self.assertions.push(assertion.into());
        self
    }

    /// Set think time override
    #[inline]
    #[must_use]
    pub fn with_think_time(mut self, think_time: ThinkTime) -> Self {
        self.think_time = Some(think_time);
        self
    }
}

impl RequestVariant for HttpRequest {
    const KIND: RequestKind = RequestKind::Http;

    fn narrow(request: &Request) -> Option<&Self> {
        match request {
            Request::Http(r) => Some(r),
            Request::Soap(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let soap: Request = SoapRequest::new("a").into();
        let http: Request = HttpRequest::new("b").into();
        assert_eq!(soap.kind(), RequestKind::Soap);
        assert_eq!(http.kind(), RequestKind::Http);
    }

    #[test]
    fn narrow_to_matching_variant() {
        let request: Request = SoapRequest::new("a").into();
        assert!(request.narrow::<SoapRequest>().is_some());
        assert!(request.narrow::<HttpRequest>().is_none());
    }

    #[test]
    fn variant_kind_constants() {
        assert_eq!(SoapRequest::KIND, RequestKind::Soap);
        assert_eq!(HttpRequest::KIND, RequestKind::Http);
    }

    #[test]
    fn common_accessors() {
        let request: Request = HttpRequest::new("login")
            .with_property("HTTPSampler.path", "/login")
            .with_parameter("user", "alice")
            .with_assertion("Welcome")
            .into();

        assert_eq!(request.e_id(), "login");
        assert_eq!(request.properties().len(), 1);
        assert_eq!(request.assertions()[0].pattern(), "Welcome");
        assert!(request.think_time().is_none());
    }

    #[test]
    fn kind_display_uses_type_name() {
        assert_eq!(RequestKind::Soap.to_string(), "SoapRequest");
        assert_eq!(RequestKind::Http.to_string(), "HttpRequest");
    }

    #[test]
    fn tagged_serde_representation() {
        let request: Request = SoapRequest::new("req1").into();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "soap");
        assert_eq!(json["e_id"], "req1");
    }
}
