//! Request transformers
//!
//! One [`RequestTransformer`] per request variant turns a model request into
//! a tree fragment. Every variant follows the same policy, implemented once
//! here:
//!
//! 1. [`ensure_valid_request_type`] checks the runtime variant before narrowing
//! 2. the primary element is named after the request's `eId` and receives
//!    every request property verbatim ([`apply_request_properties`])
//! 3. a single response assertion aggregating all assertion strings is
//!    attached below the primary element, only if the request has any
//!    ([`transform_request_assertions`])
//!
//! Variants differ only in the element they create, the property keys they
//! recognise and their defaults.

mod http;
mod registry;
mod soap;

pub use http::{
    HttpRequestTransformer, DEFAULT_HTTP_METHOD, HTTP_ARGUMENTS, HTTP_METHOD, HTTP_PROPERTY_KEYS,
};
pub use registry::RequestTransformerRegistry;
pub use soap::{SoapRequestTransformer, SOAP_PROPERTY_KEYS};

use crate::error::TransformationError;
use loadplan_model::{Property, Request, RequestKind, RequestVariant};
use loadplan_tree::{ArtifactFactory, ArtifactTree, TestElement, TreeNode};
use std::fmt::Debug;

/// Response assertion property holding the aggregated patterns
pub const ASSERTION_TEST_STRINGS: &str = "Assertion.test_strings";

/// Response assertion property naming the tested response field
pub const ASSERTION_TEST_FIELD: &str = "Assertion.test_field";

/// Response assertion property holding the match rule
pub const ASSERTION_TEST_TYPE: &str = "Assertion.test_type";

/// Substring match rule
const SUBSTRING_MATCH: i64 = 16;

/// Converts one request variant into a tree fragment
///
/// A fragment is a [`TreeNode`], never an empty tree, so every request the
/// dispatch accepts ends up in the plan. Implementations are stateless and
/// may be shared across threads.
pub trait RequestTransformer: Send + Sync + Debug {
    /// Variant this transformer handles
    fn kind(&self) -> RequestKind;

    /// Build the fragment for `request`
    ///
    /// # Errors
    /// Returns [`TransformationError::UnexpectedRequestType`] if `request` is
    /// not of the variant returned by [`kind`](RequestTransformer::kind)
    fn transform(
        &self,
        request: &Request,
        factory: &dyn ArtifactFactory,
    ) -> Result<TreeNode, TransformationError>;
}

/// Validate the runtime variant of `request` and narrow it to `V`
///
/// # Errors
/// Returns error naming both variants if `request` is not a `V`
pub fn ensure_valid_request_type<V: RequestVariant>(
    request: &Request,
) -> Result<&V, TransformationError> {
    request.narrow::<V>().ok_or_else(|| {
        TransformationError::unexpected_request_type(request.e_id(), V::KIND, request.kind())
    })
}

/// Name `element` after `e_id` and copy every property onto it
///
/// Values pass through untouched. Keys outside `known_keys` are still copied;
/// they are only reported at debug level.
pub fn apply_request_properties(
    element: &mut TestElement,
    e_id: &str,
    properties: &[Property],
    known_keys: &[&str],
) {
    element.set_name(e_id);

    for property in properties {
        if !known_keys.contains(&property.key.as_str()) {
            tracing::debug!(
                e_id,
                key = %property.key,
                kind = %element.kind(),
                "passing through unrecognised property"
            );
        }
        element.set_property(property.key.clone(), property.value.clone());
    }
}

/// Build the response-assertion fragment of `request`
///
/// Returns `None` if the request has no assertions, so no inert assertion
/// element is ever created.
#[must_use]
pub fn transform_request_assertions(
    request: &Request,
    factory: &dyn ArtifactFactory,
) -> Option<ArtifactTree> {
    let assertions = request.assertions();
    if assertions.is_empty() {
        return None;
    }

    let patterns: Vec<String> = assertions
        .iter()
        .map(|a| a.pattern().to_string())
        .collect();

    let mut assertion = factory.create_response_assertion();
    assertion.set_property(ASSERTION_TEST_FIELD, "Assertion.response_data");
    assertion.set_property(ASSERTION_TEST_TYPE, SUBSTRING_MATCH);
    assertion.set_property(ASSERTION_TEST_STRINGS, patterns);

    Some(ArtifactTree::new(assertion))
}

/// Wrap the primary element of `request` into its fragment
pub(crate) fn request_fragment(
    primary: TestElement,
    request: &Request,
    factory: &dyn ArtifactFactory,
) -> TreeNode {
    let mut node = TreeNode::new(primary);
    if let Some(assertions) = transform_request_assertions(request, factory) {
        node.attach(assertions);
    }
    node
}
