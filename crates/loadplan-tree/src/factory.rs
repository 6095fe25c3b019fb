//! Element factory
//!
//! [`ArtifactFactory`] is the narrow creation contract transformers and
//! filters use to obtain fresh elements. [`DefaultArtifactFactory`] stamps
//! configurable per-kind default properties onto every element it creates.

use crate::element::{ElementKind, PropertyValue, TestElement};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Creates test-plan elements
///
/// Implementors only provide [`create`](ArtifactFactory::create); the
/// per-kind methods exist so call sites read as the element they need.
pub trait ArtifactFactory {
    /// Create a fresh element of `kind`
    fn create(&self, kind: ElementKind) -> TestElement;

    fn create_test_plan(&self) -> TestElement {
        self.create(ElementKind::TestPlan)
    }

    fn create_thread_group(&self) -> TestElement {
        self.create(ElementKind::ThreadGroup)
    }

    fn create_soap_sampler(&self) -> TestElement {
        self.create(ElementKind::SoapSampler)
    }

    fn create_http_sampler(&self) -> TestElement {
        self.create(ElementKind::HttpSampler)
    }

    fn create_response_assertion(&self) -> TestElement {
        self.create(ElementKind::ResponseAssertion)
    }

    fn create_header_manager(&self) -> TestElement {
        self.create(ElementKind::HeaderManager)
    }

    fn create_cookie_manager(&self) -> TestElement {
        self.create(ElementKind::CookieManager)
    }

    fn create_gaussian_random_timer(&self) -> TestElement {
        self.create(ElementKind::GaussianRandomTimer)
    }

    fn create_result_collector(&self) -> TestElement {
        self.create(ElementKind::ResultCollector)
    }
}

/// Default properties per element kind
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementDefaults(BTreeMap<ElementKind, IndexMap<String, PropertyValue>>);

impl ElementDefaults {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style default setter
    #[inline]
    #[must_use]
    pub fn with(
        mut self,
        kind: ElementKind,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.set(kind, key, value);
        self
    }

    /// Register default `key = value` for elements of `kind`
    pub fn set(&mut self, kind: ElementKind, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0
            .entry(kind)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Defaults registered for `kind`, in registration order
    pub fn for_kind(&self, kind: ElementKind) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0
            .get(&kind)
            .into_iter()
            .flat_map(|props| props.iter().map(|(k, v)| (k.as_str(), v)))
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(IndexMap::is_empty)
    }
}

/// Factory applying [`ElementDefaults`] to every created element
#[derive(Debug, Clone, Default)]
pub struct DefaultArtifactFactory {
    defaults: ElementDefaults,
}

impl DefaultArtifactFactory {
    /// Factory without defaults
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_defaults(defaults: ElementDefaults) -> Self {
        Self { defaults }
    }

    #[inline]
    #[must_use]
    pub fn defaults(&self) -> &ElementDefaults {
        &self.defaults
    }
}

impl ArtifactFactory for DefaultArtifactFactory {
    fn create(&self, kind: ElementKind) -> TestElement {
        let mut element = TestElement::new(kind);
        for (key, value) in self.defaults.for_kind(kind) {
            element.set_property(key, value.clone());
        }
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_factory_creates_bare_elements() {
        let factory = DefaultArtifactFactory::new();
        let sampler = factory.create_soap_sampler();
        assert_eq!(sampler.kind(), ElementKind::SoapSampler);
        assert_eq!(sampler.property_count(), 0);
    }

    #[test]
    fn per_kind_methods_create_matching_kinds() {
        let factory = DefaultArtifactFactory::new();
        assert_eq!(factory.create_test_plan().kind(), ElementKind::TestPlan);
        assert_eq!(factory.create_thread_group().kind(), ElementKind::ThreadGroup);
        assert_eq!(factory.create_http_sampler().kind(), ElementKind::HttpSampler);
        assert_eq!(
            factory.create_response_assertion().kind(),
            ElementKind::ResponseAssertion
        );
        assert_eq!(factory.create_header_manager().kind(), ElementKind::HeaderManager);
        assert_eq!(factory.create_cookie_manager().kind(), ElementKind::CookieManager);
        assert_eq!(
            factory.create_gaussian_random_timer().kind(),
            ElementKind::GaussianRandomTimer
        );
        assert_eq!(
            factory.create_result_collector().kind(),
            ElementKind::ResultCollector
        );
    }

    #[test]
    fn defaults_applied_only_to_their_kind() {
        let defaults = ElementDefaults::new()
            .with(ElementKind::HttpSampler, "HTTPSampler.protocol", "https")
            .with(ElementKind::HttpSampler, "HTTPSampler.port", 443_i64);
        let factory = DefaultArtifactFactory::with_defaults(defaults);

        let http = factory.create_http_sampler();
        assert_eq!(http.text_property("HTTPSampler.protocol"), Some("https"));
        assert_eq!(
            http.property("HTTPSampler.port").and_then(PropertyValue::as_integer),
            Some(443)
        );

        let soap = factory.create_soap_sampler();
        assert_eq!(soap.property_count(), 0);
    }

    #[test]
    fn defaults_deserialize_from_kind_keyed_map() {
        let defaults: ElementDefaults = serde_json::from_str(
            r#"{"thread_group": {"ThreadGroup.on_sample_error": "continue"}}"#,
        )
        .unwrap();

        let props: Vec<_> = defaults.for_kind(ElementKind::ThreadGroup).collect();
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].0, "ThreadGroup.on_sample_error");
        assert!(!defaults.is_empty());
        assert!(ElementDefaults::new().is_empty());
    }
}
