//! Shared request headers

use super::{scope_path, Filter};
use indexmap::IndexMap;
use loadplan_model::WorkloadModel;
use loadplan_tree::{ArtifactFactory, ArtifactTree, TreeNode};

/// Header manager property holding `(name, value)` pairs
pub const HEADER_MANAGER_HEADERS: &str = "HeaderManager.headers";

/// Inserts a header manager as the first child of the thread group
///
/// Falls back to the root if the tree has no thread group. Does nothing if no
/// headers are configured or the tree is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderDefaultsFilter {
    headers: IndexMap<String, String>,
}

impl HeaderDefaultsFilter {
    #[inline]
    #[must_use]
    pub fn new(headers: IndexMap<String, String>) -> Self {
        Self { headers }
    }

    /// Add or replace one header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }
}

impl Filter for HeaderDefaultsFilter {
    fn name(&self) -> &'static str {
        "header_defaults"
    }

    fn modify_test_plan(
        &self,
        mut tree: ArtifactTree,
        _model: &WorkloadModel,
        factory: &dyn ArtifactFactory,
    ) -> ArtifactTree {
        if self.headers.is_empty() {
            return tree;
        }
        let Some(scope) = scope_path(&tree) else {
            return tree;
        };

        let table: Vec<(String, String)> = self
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let manager = factory
            .create_header_manager()
            .with_property(HEADER_MANAGER_HEADERS, table);

        if let Err(err) = tree.insert(&scope, 0, TreeNode::new(manager)) {
            tracing::warn!(%scope, %err, "could not insert header manager");
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadplan_tree::{DefaultArtifactFactory, ElementKind, PropertyValue, TestElement, TreePath};

    fn plan_with_group() -> ArtifactTree {
        let mut tree = ArtifactTree::new(TestElement::new(ElementKind::TestPlan));
        let mut group = TreeNode::new(TestElement::new(ElementKind::ThreadGroup));
        group.push_child(TreeNode::new(TestElement::new(ElementKind::SoapSampler)));
        tree.attach(&TreePath::root(), ArtifactTree::from(group)).unwrap();
        tree
    }

    #[test]
    fn inserted_first_in_thread_group() {
        let filter = HeaderDefaultsFilter::default()
            .with_header("Content-Type", "text/xml")
            .with_header("Accept", "*/*");

        let out = filter.modify_test_plan(
            plan_with_group(),
            &WorkloadModel::default(),
            &DefaultArtifactFactory::new(),
        );

        let first = out.get(&TreePath::new(&[0, 0])).unwrap().element();
        assert_eq!(first.kind(), ElementKind::HeaderManager);
        assert_eq!(
            first.property(HEADER_MANAGER_HEADERS).and_then(PropertyValue::as_table),
            Some(
                &[
                    ("Content-Type".to_string(), "text/xml".to_string()),
                    ("Accept".to_string(), "*/*".to_string()),
                ][..]
            )
        );
        assert_eq!(
            out.get(&TreePath::new(&[0, 1])).unwrap().element().kind(),
            ElementKind::SoapSampler
        );
    }

    #[test]
    fn no_headers_leaves_tree_alone() {
        let tree = plan_with_group();
        let out = HeaderDefaultsFilter::default().modify_test_plan(
            tree.clone(),
            &WorkloadModel::default(),
            &DefaultArtifactFactory::new(),
        );
        assert_eq!(out, tree);
    }

    #[test]
    fn empty_tree_stays_empty() {
        let out = HeaderDefaultsFilter::default()
            .with_header("A", "b")
            .modify_test_plan(
                ArtifactTree::empty(),
                &WorkloadModel::default(),
                &DefaultArtifactFactory::new(),
            );
        assert!(out.is_empty());
    }
}
