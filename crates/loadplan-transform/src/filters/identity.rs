use super::Filter;
use loadplan_model::WorkloadModel;
use loadplan_tree::{ArtifactFactory, ArtifactTree};

/// Returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFilter;

impl Filter for IdentityFilter {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn modify_test_plan(
        &self,
        tree: ArtifactTree,
        _model: &WorkloadModel,
        _factory: &dyn ArtifactFactory,
    ) -> ArtifactTree {
        tree
    }
}
