//! Think-time timers

use super::Filter;
use loadplan_model::{ThinkTime, WorkloadModel};
use loadplan_tree::{ArtifactFactory, ArtifactTree, TreeNode};

/// Timer property holding the constant delay in milliseconds
pub const TIMER_DELAY: &str = "ConstantTimer.delay";

/// Timer property holding the Gaussian deviation in milliseconds
pub const TIMER_RANGE: &str = "RandomTimer.range";

/// Adds a Gaussian random timer below every sampler
///
/// Samplers appear in model order, so the n-th sampler belongs to the n-th
/// request. If the request at that position has a different `eId` (the tree
/// was rearranged), the sampler falls back to the first request with its name.
///
/// The request's own think time wins, then the model default, then the
/// filter default. Samplers without any think time get no timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThinkTimeFilter {
    default: Option<ThinkTime>,
}

impl ThinkTimeFilter {
    #[inline]
    #[must_use]
    pub fn new(default: Option<ThinkTime>) -> Self {
        Self { default }
    }

    #[inline]
    #[must_use]
    pub fn default_think_time(&self) -> Option<ThinkTime> {
        self.default
    }
}

fn millis(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl Filter for ThinkTimeFilter {
    fn name(&self) -> &'static str {
        "think_time"
    }

    fn modify_test_plan(
        &self,
        mut tree: ArtifactTree,
        model: &WorkloadModel,
        factory: &dyn ArtifactFactory,
    ) -> ArtifactTree {
        let requests = model.requests();
        let mut position = 0usize;
        let mut added = 0usize;
        tree.for_each_mut(|_, node| {
            let element = node.element();
            if !element.kind().is_sampler() {
                return;
            }
            let name = element.name();
            let request = requests
                .get(position)
                .filter(|r| r.e_id() == name)
                .or_else(|| model.find_request(name));
            position += 1;

            let think = match request {
                Some(request) => model.think_time_of(request),
                None => model.think_time(),
            };
            let Some(think) = think.or(self.default) else {
                return;
            };

            let timer = factory
                .create_gaussian_random_timer()
                .with_property(TIMER_DELAY, millis(think.mean_ms))
                .with_property(TIMER_RANGE, millis(think.deviation_ms));
            node.push_child(TreeNode::new(timer));
            added += 1;
        });

        tracing::debug!(timers = added, "added think-time timers");
        tree
    }
}
