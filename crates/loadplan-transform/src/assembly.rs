//! Fragment assembly shared by core structures

use crate::error::TransformationError;
use crate::requests::RequestTransformerRegistry;
use loadplan_model::WorkloadModel;
use loadplan_tree::{ArtifactFactory, TreeNode};

/// Transform every request of `model`, in model order
///
/// Returns exactly one fragment per request. Stops at the first failing
/// request.
///
/// # Errors
/// Propagates the first dispatch error
pub fn transform_requests(
    model: &WorkloadModel,
    factory: &dyn ArtifactFactory,
    registry: &RequestTransformerRegistry,
) -> Result<Vec<TreeNode>, TransformationError> {
    model
        .requests()
        .iter()
        .map(|request| registry.transform(request, factory))
        .collect()
}

/// Append `fragments` below `parent`, in order
///
/// Returns the number of attached fragments.
pub fn attach_fragments(parent: &mut TreeNode, fragments: Vec<TreeNode>) -> usize {
    let count = fragments.len();
    for fragment in fragments {
        parent.push_child(fragment);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::RequestTransformer;
    use loadplan_model::{HttpRequest, Request, RequestKind, SoapRequest};
    use loadplan_tree::{DefaultArtifactFactory, ElementKind, TestElement};

    /// Transformer producing a bare, childless node per request
    #[derive(Debug)]
    struct BareSoap;

    impl RequestTransformer for BareSoap {
        fn kind(&self) -> RequestKind {
            RequestKind::Soap
        }

        fn transform(
            &self,
            request: &Request,
            _factory: &dyn ArtifactFactory,
        ) -> Result<TreeNode, TransformationError> {
            Ok(TreeNode::new(
                TestElement::new(ElementKind::ResultCollector).with_name(request.e_id()),
            ))
        }
    }

    #[test]
    fn requests_transformed_in_order() {
        let model = WorkloadModel::new("m")
            .with_request(SoapRequest::new("a"))
            .with_request(HttpRequest::new("b"))
            .with_request(SoapRequest::new("c"));

        let fragments = transform_requests(
            &model,
            &DefaultArtifactFactory::new(),
            &RequestTransformerRegistry::with_defaults(),
        )
        .unwrap();

        let names: Vec<_> = fragments
            .iter()
            .map(|f| f.element().name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn custom_transformer_keeps_every_request() {
        let mut registry = RequestTransformerRegistry::with_defaults();
        registry.register(RequestKind::Soap, Box::new(BareSoap));
        let model = WorkloadModel::new("m")
            .with_request(SoapRequest::new("a"))
            .with_request(SoapRequest::new("b"));

        let fragments =
            transform_requests(&model, &DefaultArtifactFactory::new(), &registry).unwrap();
        let mut group = TreeNode::new(TestElement::new(ElementKind::ThreadGroup));

        assert_eq!(attach_fragments(&mut group, fragments), 2);
        let names: Vec<_> = group
            .children()
            .iter()
            .map(|c| c.element().name())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn first_failure_propagates() {
        let model = WorkloadModel::new("m")
            .with_request(SoapRequest::new("a"))
            .with_request(HttpRequest::new("b"));
        let mut registry = RequestTransformerRegistry::with_defaults();
        registry.remove(RequestKind::Http);

        let err = transform_requests(&model, &DefaultArtifactFactory::new(), &registry).unwrap_err();
        assert_eq!(err.e_id(), "b");
    }

    #[test]
    fn attach_keeps_order() {
        let mut parent = TreeNode::new(TestElement::new(ElementKind::ThreadGroup));
        let fragments = vec![
            TreeNode::new(TestElement::new(ElementKind::SoapSampler)),
            TreeNode::new(TestElement::new(ElementKind::HttpSampler)),
        ];

        assert_eq!(attach_fragments(&mut parent, fragments), 2);
        let kinds: Vec<_> = parent.children().iter().map(|c| c.element().kind()).collect();
        assert_eq!(kinds, vec![ElementKind::SoapSampler, ElementKind::HttpSampler]);
    }
}
