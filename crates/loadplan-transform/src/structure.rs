//! Core-structure strategies
//!
//! A [`CoreStructure`] builds the unfiltered tree for a model: scaffolding
//! plus one fragment per request, in model order. The orchestration around it
//! (logging, filtering) lives in [`TestPlanTransformer`](crate::TestPlanTransformer)
//! and cannot be changed by a strategy.

use crate::assembly::{attach_fragments, transform_requests};
use crate::config::{PlanConfig, ThreadGroupConfig};
use crate::error::TransformationError;
use crate::requests::RequestTransformerRegistry;
use loadplan_model::WorkloadModel;
use loadplan_tree::{ArtifactFactory, ArtifactTree, TreeNode};

/// Thread group property: number of virtual users
pub const THREAD_GROUP_NUM_THREADS: &str = "ThreadGroup.num_threads";

/// Thread group property: ramp-up period in seconds
pub const THREAD_GROUP_RAMP_TIME: &str = "ThreadGroup.ramp_time";

/// Thread group property: iterations per user
pub const THREAD_GROUP_LOOPS: &str = "LoopController.loops";

/// Strategy building the unfiltered tree of a model
///
/// # Contract
/// The result contains exactly one fragment per model request, in model
/// order, each produced by `requests`.
pub trait CoreStructure: Send + Sync {
    /// Build scaffolding and insert request fragments
    ///
    /// # Errors
    /// Propagates the first request dispatch error
    fn build_core_structure(
        &self,
        model: &WorkloadModel,
        factory: &dyn ArtifactFactory,
        requests: &RequestTransformerRegistry,
    ) -> Result<ArtifactTree, TransformationError>;
}

/// [`CoreStructure`] backed by a closure
///
/// Created with [`structure_fn`].
#[derive(Clone, Copy)]
pub struct FnStructure<F>(F);

impl<F> std::fmt::Debug for FnStructure<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnStructure")
    }
}

/// Wrap a closure as a [`CoreStructure`]
#[inline]
#[must_use]
pub fn structure_fn<F>(f: F) -> FnStructure<F>
where
    F: Fn(
            &WorkloadModel,
            &dyn ArtifactFactory,
            &RequestTransformerRegistry,
        ) -> Result<ArtifactTree, TransformationError>
        + Send
        + Sync,
{
    FnStructure(f)
}

impl<F> CoreStructure for FnStructure<F>
where
    F: Fn(
            &WorkloadModel,
            &dyn ArtifactFactory,
            &RequestTransformerRegistry,
        ) -> Result<ArtifactTree, TransformationError>
        + Send
        + Sync,
{
    fn build_core_structure(
        &self,
        model: &WorkloadModel,
        factory: &dyn ArtifactFactory,
        requests: &RequestTransformerRegistry,
    ) -> Result<ArtifactTree, TransformationError> {
        (self.0)(model, factory, requests)
    }
}

/// Plan with a single thread group running every request in order
///
/// ```text
/// TestPlan
/// └── ThreadGroup
///     ├── CookieManager   (optional)
///     ├── fragment 1
///     └── fragment n
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTestPlanStructure {
    test_plan_name: Option<String>,
    thread_group: ThreadGroupConfig,
    cookie_manager: bool,
}

impl Default for SimpleTestPlanStructure {
    fn default() -> Self {
        Self {
            test_plan_name: None,
            thread_group: ThreadGroupConfig::default(),
            cookie_manager: true,
        }
    }
}

impl SimpleTestPlanStructure {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scaffolding settings from `config`
    #[must_use]
    pub fn from_config(config: &PlanConfig) -> Self {
        Self {
            test_plan_name: config.test_plan_name.clone(),
            thread_group: config.thread_group.clone(),
            cookie_manager: config.cookie_manager,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_test_plan_name(mut self, name: impl Into<String>) -> Self {
        self.test_plan_name = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_thread_group(mut self, thread_group: ThreadGroupConfig) -> Self {
        self.thread_group = thread_group;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_cookie_manager(mut self, enabled: bool) -> Self {
        self.cookie_manager = enabled;
        self
    }

    fn thread_group_node(&self, factory: &dyn ArtifactFactory) -> TreeNode {
        let group = &self.thread_group;
        let element = factory
            .create_thread_group()
            .with_name(group.name.as_str())
            .with_property(THREAD_GROUP_NUM_THREADS, i64::from(group.num_threads))
            .with_property(THREAD_GROUP_RAMP_TIME, i64::from(group.ramp_up_secs))
            .with_property(THREAD_GROUP_LOOPS, i64::from(group.loops));

        let mut node = TreeNode::new(element);
        if self.cookie_manager {
            node.push_child(TreeNode::new(factory.create_cookie_manager()));
        }
        node
    }
}

impl CoreStructure for SimpleTestPlanStructure {
    fn build_core_structure(
        &self,
        model: &WorkloadModel,
        factory: &dyn ArtifactFactory,
        requests: &RequestTransformerRegistry,
    ) -> Result<ArtifactTree, TransformationError> {
        let fragments = transform_requests(model, factory, requests)?;

        let mut plan = factory.create_test_plan();
        match self.test_plan_name.as_deref() {
            Some(name) => plan.set_name(name),
            None if !model.name().is_empty() => plan.set_name(model.name()),
            None => {}
        }

        let mut group = self.thread_group_node(factory);
        let attached = attach_fragments(&mut group, fragments);
        tracing::debug!(fragments = attached, "assembled thread group");

        let mut root = TreeNode::new(plan);
        root.push_child(group);
        Ok(ArtifactTree::from(root))
    }
}
