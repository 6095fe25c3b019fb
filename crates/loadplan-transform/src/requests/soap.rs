//! SOAP request transformer

use super::{apply_request_properties, ensure_valid_request_type, request_fragment, RequestTransformer};
use crate::error::TransformationError;
use loadplan_model::{Request, RequestKind, SoapRequest};
use loadplan_tree::{ArtifactFactory, TreeNode};

/// Property keys a SOAP sampler understands
///
/// SOAP samplers take no parameters; everything travels as a property.
pub const SOAP_PROPERTY_KEYS: &[&str] = &[
    "URL",
    "SoapSampler.URL_DATA",
    "SoapSampler.xml_data",
    "SoapSampler.SOAP_ACTION",
    "SoapSampler.SEND_SOAP_ACTION",
];

/// Builds SOAP sampler fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct SoapRequestTransformer;

impl SoapRequestTransformer {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RequestTransformer for SoapRequestTransformer {
    fn kind(&self) -> RequestKind {
        RequestKind::Soap
    }

    fn transform(
        &self,
        request: &Request,
        factory: &dyn ArtifactFactory,
    ) -> Result<TreeNode, TransformationError> {
        let soap = ensure_valid_request_type::<SoapRequest>(request)?;

        let mut sampler = factory.create_soap_sampler();
        apply_request_properties(&mut sampler, &soap.e_id, &soap.properties, SOAP_PROPERTY_KEYS);

        Ok(request_fragment(sampler, request, factory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::ASSERTION_TEST_STRINGS;
    use loadplan_model::HttpRequest;
    use loadplan_tree::{DefaultArtifactFactory, ElementKind, PropertyValue};

    #[test]
    fn single_request_with_assertion() {
        let request: Request = SoapRequest::new("req1")
            .with_property("URL", "http://x")
            .with_assertion("OK")
            .into();

        let root = SoapRequestTransformer::new()
            .transform(&request, &DefaultArtifactFactory::new())
            .unwrap();

        assert_eq!(root.element().kind(), ElementKind::SoapSampler);
        assert_eq!(root.element().name(), "req1");
        assert_eq!(root.element().text_property("URL"), Some("http://x"));
        assert_eq!(root.children().len(), 1);

        let assertion = root.children()[0].element();
        assert_eq!(assertion.kind(), ElementKind::ResponseAssertion);
        assert_eq!(
            assertion
                .property(ASSERTION_TEST_STRINGS)
                .and_then(PropertyValue::as_list),
            Some(&["OK".to_string()][..])
        );
    }

    #[test]
    fn single_request_without_assertion_has_no_children() {
        let request: Request = SoapRequest::new("req1").with_property("URL", "http://x").into();

        let root = SoapRequestTransformer::new()
            .transform(&request, &DefaultArtifactFactory::new())
            .unwrap();

        assert_eq!(root.node_count(), 1);
        assert!(root.children().is_empty());
    }

    #[test]
    fn rejects_http_request() {
        let request: Request = HttpRequest::new("h").into();
        let err = SoapRequestTransformer::new()
            .transform(&request, &DefaultArtifactFactory::new())
            .unwrap_err();

        assert_eq!(err.expected(), Some(RequestKind::Soap));
        assert_eq!(err.actual(), RequestKind::Http);
    }
}
