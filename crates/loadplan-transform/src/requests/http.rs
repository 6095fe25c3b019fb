//! HTTP request transformer

use super::{apply_request_properties, ensure_valid_request_type, request_fragment, RequestTransformer};
use crate::error::TransformationError;
use loadplan_model::{HttpRequest, Request, RequestKind};
use loadplan_tree::{ArtifactFactory, TreeNode};

/// Sampler property holding the HTTP method
pub const HTTP_METHOD: &str = "HTTPSampler.method";

/// Sampler property holding the request parameters
pub const HTTP_ARGUMENTS: &str = "HTTPsampler.Arguments";

/// Method used when neither the factory nor the request sets one
pub const DEFAULT_HTTP_METHOD: &str = "GET";

/// Property keys an HTTP sampler understands
pub const HTTP_PROPERTY_KEYS: &[&str] = &[
    "HTTPSampler.domain",
    "HTTPSampler.port",
    "HTTPSampler.protocol",
    "HTTPSampler.path",
    HTTP_METHOD,
    "HTTPSampler.contentEncoding",
    "HTTPSampler.follow_redirects",
    "HTTPSampler.use_keepalive",
];

/// Builds HTTP sampler fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpRequestTransformer;

impl HttpRequestTransformer {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RequestTransformer for HttpRequestTransformer {
    fn kind(&self) -> RequestKind {
        RequestKind::Http
    }

    fn transform(
        &self,
        request: &Request,
        factory: &dyn ArtifactFactory,
    ) -> Result<TreeNode, TransformationError> {
        let http = ensure_valid_request_type::<HttpRequest>(request)?;

        let mut sampler = factory.create_http_sampler();
        if !sampler.has_property(HTTP_METHOD) {
            sampler.set_property(HTTP_METHOD, DEFAULT_HTTP_METHOD);
        }
        apply_request_properties(&mut sampler, &http.e_id, &http.properties, HTTP_PROPERTY_KEYS);

        if !http.parameters.is_empty() {
            let arguments: Vec<(String, String)> = http
                .parameters
                .iter()
                .map(|p| (p.name.clone(), p.value.clone()))
                .collect();
            sampler.set_property(HTTP_ARGUMENTS, arguments);
        }

        Ok(request_fragment(sampler, request, factory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadplan_model::SoapRequest;
    use loadplan_tree::{DefaultArtifactFactory, ElementDefaults, ElementKind, PropertyValue};

    fn transform(request: impl Into<Request>, factory: &DefaultArtifactFactory) -> TreeNode {
        HttpRequestTransformer::new()
            .transform(&request.into(), factory)
            .unwrap()
    }

    #[test]
    fn defaults_method_to_get() {
        let node = transform(HttpRequest::new("home"), &DefaultArtifactFactory::new());
        let sampler = node.element();
        assert_eq!(sampler.kind(), ElementKind::HttpSampler);
        assert_eq!(sampler.name(), "home");
        assert_eq!(sampler.text_property(HTTP_METHOD), Some("GET"));
    }

    #[test]
    fn request_method_overrides_default() {
        let node = transform(
            HttpRequest::new("login").with_property(HTTP_METHOD, "POST"),
            &DefaultArtifactFactory::new(),
        );
        let sampler = node.element();
        assert_eq!(sampler.text_property(HTTP_METHOD), Some("POST"));
    }

    #[test]
    fn factory_method_default_is_kept() {
        let factory = DefaultArtifactFactory::with_defaults(
            ElementDefaults::new().with(ElementKind::HttpSampler, HTTP_METHOD, "HEAD"),
        );
        let sampler = transform(HttpRequest::new("probe"), &factory);
        assert_eq!(
            sampler.element().text_property(HTTP_METHOD),
            Some("HEAD")
        );
    }

    #[test]
    fn parameters_become_argument_table() {
        let sampler = transform(
            HttpRequest::new("login")
                .with_parameter("user", "alice")
                .with_parameter("pass", "secret"),
            &DefaultArtifactFactory::new(),
        );

        let arguments = sampler
            .element()
            .property(HTTP_ARGUMENTS)
            .and_then(PropertyValue::as_table)
            .unwrap()
            .to_vec();
        assert_eq!(
            arguments,
            vec![
                ("user".to_string(), "alice".to_string()),
                ("pass".to_string(), "secret".to_string()),
            ]
        );
    }

    #[test]
    fn no_argument_table_without_parameters() {
        let sampler = transform(HttpRequest::new("home"), &DefaultArtifactFactory::new());
        assert!(!sampler.element().has_property(HTTP_ARGUMENTS));
    }

    #[test]
    fn shares_assertion_policy() {
        let sampler = transform(
            HttpRequest::new("home").with_assertion("Welcome").with_assertion("Cart"),
            &DefaultArtifactFactory::new(),
        );
        assert_eq!(sampler.children().len(), 1);
        assert_eq!(
            sampler.children()[0].element().kind(),
            ElementKind::ResponseAssertion
        );
    }

    #[test]
    fn rejects_soap_request() {
        let request: Request = SoapRequest::new("s").into();
        let err = HttpRequestTransformer::new()
            .transform(&request, &DefaultArtifactFactory::new())
            .unwrap_err();
        assert_eq!(err.expected(), Some(RequestKind::Http));
        assert_eq!(err.actual(), RequestKind::Soap);
    }
}
