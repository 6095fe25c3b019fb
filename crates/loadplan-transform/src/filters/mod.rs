//! Test-plan filters
//!
//! A [`Filter`] rewrites a finished tree without knowing how it was built.
//! [`FilterChain`] applies filters in caller order, handing each one the
//! previous filter's output by value.

mod header_defaults;
mod identity;
mod result_collector;
mod think_time;

pub use header_defaults::{HeaderDefaultsFilter, HEADER_MANAGER_HEADERS};
pub use identity::IdentityFilter;
pub use result_collector::{ResultCollectorFilter, RESULT_COLLECTOR_FILENAME};
pub use think_time::{ThinkTimeFilter, TIMER_DELAY, TIMER_RANGE};

use crate::config::FilterSpec;
use loadplan_model::WorkloadModel;
use loadplan_tree::{ArtifactFactory, ArtifactTree, ElementKind, TreePath};
use std::fmt::Debug;

/// Post-processing step over a complete tree
///
/// # Contract
/// - Must not assume any other filter ran before it
/// - May add, remove, reorder or replace subtrees
/// - Must return a single-rooted tree (or the empty tree)
pub trait Filter: Send + Sync + Debug {
    /// Filter name (for logging)
    fn name(&self) -> &'static str;

    /// Rewrite `tree`
    ///
    /// `model` is the model the tree was built from; `factory` is the factory
    /// used to build it.
    fn modify_test_plan(
        &self,
        tree: ArtifactTree,
        model: &WorkloadModel,
        factory: &dyn ArtifactFactory,
    ) -> ArtifactTree;
}

/// Ordered sequence of filters
#[derive(Debug, Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Create empty chain
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Build chain from configured filter specs, keeping their order
    #[must_use]
    pub fn from_specs(specs: &[FilterSpec]) -> Self {
        specs.iter().map(FilterSpec::build).collect()
    }

    /// Append filter
    #[inline]
    #[must_use]
    pub fn with(mut self, filter: impl Filter + 'static) -> Self {
        self.push(Box::new(filter));
        self
    }

    /// Append boxed filter
    #[inline]
    pub fn push(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filter names in application order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Thread `tree` through every filter in order
    #[must_use]
    pub fn apply(
        &self,
        tree: ArtifactTree,
        model: &WorkloadModel,
        factory: &dyn ArtifactFactory,
    ) -> ArtifactTree {
        self.filters.iter().fold(tree, |tree, filter| {
            let before = tree.node_count();
            let tree = filter.modify_test_plan(tree, model, factory);
            tracing::debug!(
                filter = filter.name(),
                nodes_before = before,
                nodes_after = tree.node_count(),
                digest = %tree.digest().short(),
                "applied filter"
            );
            tree
        })
    }
}

impl FromIterator<Box<dyn Filter>> for FilterChain {
    fn from_iter<I: IntoIterator<Item = Box<dyn Filter>>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

/// Path of the node that owns the per-user elements: the first thread group,
/// or the root if the tree has none
pub(crate) fn scope_path(tree: &ArtifactTree) -> Option<TreePath> {
    if tree.is_empty() {
        return None;
    }
    tree.find_by_kind(ElementKind::ThreadGroup)
        .into_iter()
        .next()
        .or_else(|| Some(TreePath::root()))
}
