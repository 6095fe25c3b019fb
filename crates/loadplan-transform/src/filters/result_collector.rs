use super::Filter;
use loadplan_model::WorkloadModel;
use loadplan_tree::{ArtifactFactory, ArtifactTree, TreeNode};

/// Result collector property holding the output file
pub const RESULT_COLLECTOR_FILENAME: &str = "filename";

/// Appends a result collector as the last child of the root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultCollectorFilter {
    filename: Option<String>,
}

impl ResultCollectorFilter {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { filename: None }
    }

    /// Write collected results to `filename`
    #[inline]
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

impl Filter for ResultCollectorFilter {
    fn name(&self) -> &'static str {
        "result_collector"
    }

    fn modify_test_plan(
        &self,
        mut tree: ArtifactTree,
        _model: &WorkloadModel,
        factory: &dyn ArtifactFactory,
    ) -> ArtifactTree {
        if let Some(root) = tree.root_mut() {
            let mut collector = factory.create_result_collector();
            if let Some(filename) = &self.filename {
                collector.set_property(RESULT_COLLECTOR_FILENAME, filename.as_str());
            }
            root.push_child(TreeNode::new(collector));
        }
        tree
    }
}
