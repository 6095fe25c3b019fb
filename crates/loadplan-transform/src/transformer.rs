//! Test-plan transformer
//!
//! [`TestPlanTransformer`] turns one workload model into one tree. It owns a
//! [`CoreStructure`] strategy and a [`RequestTransformerRegistry`]; the
//! orchestration in [`transform`](TestPlanTransformer::transform) is fixed:
//!
//! 1. build the core structure
//! 2. if a filter chain was supplied, thread the tree through it in order

use crate::config::PlanConfig;
use crate::error::TransformationError;
use crate::filters::FilterChain;
use crate::requests::RequestTransformerRegistry;
use crate::structure::{CoreStructure, SimpleTestPlanStructure};
use loadplan_model::WorkloadModel;
use loadplan_tree::{ArtifactFactory, ArtifactTree};

/// Model-to-tree transformer
///
/// # Example
/// ```
/// use loadplan_model::{SoapRequest, WorkloadModel};
/// use loadplan_transform::TestPlanTransformer;
/// use loadplan_tree::DefaultArtifactFactory;
///
/// let model = WorkloadModel::new("m").with_request(SoapRequest::new("req1"));
/// let tree = TestPlanTransformer::default()
///     .transform(&model, &DefaultArtifactFactory::new(), None)
///     .unwrap();
/// assert!(!tree.is_empty());
/// ```
#[derive(Debug)]
pub struct TestPlanTransformer<S = SimpleTestPlanStructure> {
    structure: S,
    registry: RequestTransformerRegistry,
}

impl Default for TestPlanTransformer {
    fn default() -> Self {
        Self::new(SimpleTestPlanStructure::default())
    }
}

impl TestPlanTransformer {
    /// Transformer with the scaffolding described by `config`
    #[must_use]
    pub fn from_config(config: &PlanConfig) -> Self {
        Self::new(SimpleTestPlanStructure::from_config(config))
    }
}

impl<S: CoreStructure> TestPlanTransformer<S> {
    /// Transformer using `structure` and the default request transformers
    #[must_use]
    pub fn new(structure: S) -> Self {
        Self {
            structure,
            registry: RequestTransformerRegistry::with_defaults(),
        }
    }

    /// Replace the request transformer registry
    #[inline]
    #[must_use]
    pub fn with_registry(mut self, registry: RequestTransformerRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[inline]
    #[must_use]
    pub fn structure(&self) -> &S {
        &self.structure
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &RequestTransformerRegistry {
        &self.registry
    }

    /// Build the unfiltered tree
    ///
    /// # Errors
    /// Propagates the first request dispatch error
    pub fn build_core_structure(
        &self,
        model: &WorkloadModel,
        factory: &dyn ArtifactFactory,
    ) -> Result<ArtifactTree, TransformationError> {
        self.structure
            .build_core_structure(model, factory, &self.registry)
    }

    /// Transform `model` and apply `filters`, if any
    ///
    /// `None` skips filtering; an empty chain is a no-op. Either way the core
    /// structure is returned unchanged.
    ///
    /// # Errors
    /// Returns error if a request cannot be dispatched. Filters are never
    /// reached in that case.
    pub fn transform(
        &self,
        model: &WorkloadModel,
        factory: &dyn ArtifactFactory,
        filters: Option<&FilterChain>,
    ) -> Result<ArtifactTree, TransformationError> {
        tracing::info!(
            model = model.name(),
            requests = model.requests().len(),
            "transforming workload model"
        );

        let mut tree = self.build_core_structure(model, factory)?;

        if let Some(chain) = filters {
            tree = chain.apply(tree, model, factory);
        }

        tracing::info!(
            model = model.name(),
            nodes = tree.node_count(),
            filters = filters.map_or(0, FilterChain::len),
            "test plan built"
        );
        Ok(tree)
    }
}
