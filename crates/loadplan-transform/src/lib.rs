//! loadplan transformation framework
//!
//! Compiles a [`WorkloadModel`](loadplan_model::WorkloadModel) into an
//! [`ArtifactTree`](loadplan_tree::ArtifactTree) ready for a load-testing
//! engine.
//!
//! # Core Concepts
//!
//! - [`TestPlanTransformer`]: Fixed orchestration (core structure, then filters)
//! - [`CoreStructure`]: Strategy building the scaffolding and inserting fragments
//! - [`RequestTransformer`]: Per-variant fragment builder, dispatched through
//!   [`RequestTransformerRegistry`]
//! - [`Filter`] / [`FilterChain`]: Ordered post-processing of finished trees
//! - [`PlanConfig`]: TOML/YAML description of scaffolding, defaults and filters
//!
//! # Example
//!
//! ```rust,ignore
//! use loadplan_model::{SoapRequest, WorkloadModel};
//! use loadplan_transform::{compile, PlanConfig};
//!
//! let model = WorkloadModel::new("checkout").with_request(
//!     SoapRequest::new("req1")
//!         .with_property("URL", "http://x")
//!         .with_assertion("OK"),
//! );
//! let config = PlanConfig::from_toml_str("[[filters]]\nkind = \"result_collector\"\n")?;
//!
//! let tree = compile(&model, &config)?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod assembly;
pub mod config;
pub mod error;
pub mod filters;
pub mod requests;
pub mod structure;
pub mod transformer;

pub use config::{ConfigError, FilterSpec, PlanConfig, ThreadGroupConfig};
pub use error::TransformationError;
pub use filters::{
    Filter, FilterChain, HeaderDefaultsFilter, IdentityFilter, ResultCollectorFilter,
    ThinkTimeFilter,
};
pub use requests::{
    HttpRequestTransformer, RequestTransformer, RequestTransformerRegistry, SoapRequestTransformer,
};
pub use structure::{structure_fn, CoreStructure, FnStructure, SimpleTestPlanStructure};
pub use transformer::TestPlanTransformer;

use loadplan_model::WorkloadModel;
use loadplan_tree::ArtifactTree;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile `model` with everything `config` describes
///
/// Uses the default request transformers, the configured scaffolding and
/// element defaults, and applies the configured filters in order.
///
/// # Errors
/// Returns error if a request cannot be dispatched
pub fn compile(
    model: &WorkloadModel,
    config: &PlanConfig,
) -> Result<ArtifactTree, TransformationError> {
    let factory = config.factory();
    let filters = config.filter_chain();
    TestPlanTransformer::from_config(config).transform(model, &factory, Some(&filters))
}

/// Common imports
pub mod prelude {
    pub use crate::{
        compile, CoreStructure, Filter, FilterChain, PlanConfig, RequestTransformer,
        RequestTransformerRegistry, TestPlanTransformer, TransformationError,
    };
    pub use loadplan_model::{HttpRequest, Request, RequestKind, SoapRequest, WorkloadModel};
    pub use loadplan_tree::{ArtifactFactory, ArtifactTree, DefaultArtifactFactory, ElementKind};
}
