//! Testing utilities for the loadplan workspace
//!
//! Shared fixtures, a recording filter and a counting factory.

#![allow(missing_docs)]

use loadplan_model::{HttpRequest, SoapRequest, ThinkTime, WorkloadModel};
use loadplan_transform::Filter;
use loadplan_tree::{
    ArtifactFactory, ArtifactTree, DefaultArtifactFactory, ElementKind, TestElement, TreeDigest,
    TreeNode,
};
use std::collections::BTreeMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honouring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn soap_request(e_id: &str) -> SoapRequest {
    SoapRequest::new(e_id)
        .with_property("URL", format!("http://svc/{e_id}"))
        .with_property("SoapSampler.xml_data", "<Envelope/>")
        .with_assertion("OK")
}

pub fn http_request(e_id: &str) -> HttpRequest {
    HttpRequest::new(e_id)
        .with_property("HTTPSampler.path", format!("/{e_id}"))
        .with_parameter("q", e_id)
}

/// Model with one request of each variant, alternating, `n` requests total
pub fn mixed_model(n: usize) -> WorkloadModel {
    (0..n).fold(WorkloadModel::new("mixed"), |model, i| {
        let e_id = format!("req{i}");
        if i % 2 == 0 {
            model.with_request(soap_request(&e_id))
        } else {
            model.with_request(http_request(&e_id))
        }
    })
}

/// Small checkout scenario with model-wide think time
pub fn sample_model() -> WorkloadModel {
    WorkloadModel::new("checkout")
        .with_think_time(ThinkTime::new(500, 100))
        .with_request(soap_request("login"))
        .with_request(http_request("browse").with_think_time(ThinkTime::new(1500, 300)))
        .with_request(soap_request("purchase").with_assertion("<orderId>"))
}

/// What a [`RecordingFilter`] saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub filter: &'static str,
    pub digest: TreeDigest,
    pub node_count: usize,
    /// Names of markers already present under the root
    pub markers: Vec<String>,
}

/// Shared log of observations
pub type ObservationLog = Arc<Mutex<Vec<Observation>>>;

/// Marker element name prefix
pub const MARKER_PREFIX: &str = "marker:";

/// Filter that records its input and appends a marker below the root
#[derive(Debug, Clone)]
pub struct RecordingFilter {
    label: &'static str,
    log: ObservationLog,
}

impl RecordingFilter {
    pub fn new(label: &'static str, log: ObservationLog) -> Self {
        Self { label, log }
    }

    pub fn log() -> ObservationLog {
        Arc::new(Mutex::new(Vec::new()))
    }
}

/// Names of marker children of the root, in order
pub fn markers(tree: &ArtifactTree) -> Vec<String> {
    tree.root()
        .map(|root| {
            root.children()
                .iter()
                .map(|c| c.element().name())
                .filter(|name| name.starts_with(MARKER_PREFIX))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl Filter for RecordingFilter {
    fn name(&self) -> &'static str {
        self.label
    }

    fn modify_test_plan(
        &self,
        mut tree: ArtifactTree,
        _model: &WorkloadModel,
        factory: &dyn ArtifactFactory,
    ) -> ArtifactTree {
        let observation = Observation {
            filter: self.label,
            digest: tree.digest(),
            node_count: tree.node_count(),
            markers: markers(&tree),
        };
        self.log.lock().push(observation);

        if let Some(root) = tree.root_mut() {
            let marker = factory
                .create_result_collector()
                .with_name(format!("{MARKER_PREFIX}{}", self.label));
            root.push_child(TreeNode::new(marker));
        }
        tree
    }
}

/// Factory counting how many elements of each kind it created
#[derive(Debug, Default)]
pub struct CountingFactory {
    inner: DefaultArtifactFactory,
    counts: Mutex<BTreeMap<ElementKind, usize>>,
}

impl CountingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        self.counts.lock().get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.lock().values().sum()
    }
}

impl ArtifactFactory for CountingFactory {
    fn create(&self, kind: ElementKind) -> TestElement {
        *self.counts.lock().entry(kind).or_default() += 1;
        self.inner.create(kind)
    }
}
