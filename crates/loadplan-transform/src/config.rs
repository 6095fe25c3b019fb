//! Compiler configuration
//!
//! [`PlanConfig`] collects everything outside the workload model that shapes
//! the output: the plan skeleton, factory defaults and the filter chain.
//! Every field has a default, so an empty document is a valid config.

use crate::filters::{
    Filter, FilterChain, HeaderDefaultsFilter, IdentityFilter, ResultCollectorFilter,
    ThinkTimeFilter,
};
use indexmap::IndexMap;
use loadplan_model::ThinkTime;
use loadplan_tree::{DefaultArtifactFactory, ElementDefaults};
use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed TOML document
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed YAML document
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Thread group settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadGroupConfig {
    pub name: String,

    /// Concurrent virtual users
    pub num_threads: u32,

    /// Seconds until all users are started
    pub ramp_up_secs: u32,

    /// Iterations per user; `-1` loops forever
    pub loops: i32,
}

impl Default for ThreadGroupConfig {
    fn default() -> Self {
        Self {
            name: "Thread Group".to_string(),
            num_threads: 1,
            ramp_up_secs: 1,
            loops: 1,
        }
    }
}

/// One configured filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpec {
    Identity,

    HeaderDefaults {
        #[serde(default)]
        headers: IndexMap<String, String>,
    },

    ThinkTime {
        #[serde(default)]
        default: Option<ThinkTime>,
    },

    ResultCollector {
        #[serde(default)]
        filename: Option<String>,
    },
}

impl FilterSpec {
    /// Instantiate the filter
    #[must_use]
    pub fn build(&self) -> Box<dyn Filter> {
        match self {
            Self::Identity => Box::new(IdentityFilter),
            Self::HeaderDefaults { headers } => Box::new(HeaderDefaultsFilter::new(headers.clone())),
            Self::ThinkTime { default } => Box::new(ThinkTimeFilter::new(*default)),
            Self::ResultCollector { filename } => {
                let filter = ResultCollectorFilter::new();
                Box::new(match filename {
                    Some(name) => filter.with_filename(name.clone()),
                    None => filter,
                })
            }
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Test plan name; falls back to the model name
    pub test_plan_name: Option<String>,

    pub thread_group: ThreadGroupConfig,

    /// Add a cookie manager to the thread group
    pub cookie_manager: bool,

    /// Properties the factory applies to every element of a kind
    pub element_defaults: ElementDefaults,

    /// Filters, in application order
    pub filters: Vec<FilterSpec>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            test_plan_name: None,
            thread_group: ThreadGroupConfig::default(),
            cookie_manager: true,
            element_defaults: ElementDefaults::new(),
            filters: Vec::new(),
        }
    }
}

impl PlanConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML
    ///
    /// # Errors
    /// Returns error if the document is malformed or has wrongly typed fields
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    /// Parse from YAML
    ///
    /// # Errors
    /// Returns error if the document is malformed or has wrongly typed fields
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
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

    #[inline]
    #[must_use]
    pub fn with_element_defaults(mut self, defaults: ElementDefaults) -> Self {
        self.element_defaults = defaults;
        self
    }

    /// Append filter
    #[inline]
    #[must_use]
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    /// Factory applying the configured element defaults
    #[must_use]
    pub fn factory(&self) -> DefaultArtifactFactory {
        DefaultArtifactFactory::with_defaults(self.element_defaults.clone())
    }

    /// Filter chain in configured order
    #[must_use]
    pub fn filter_chain(&self) -> FilterChain {
        FilterChain::from_specs(&self.filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadplan_tree::{ArtifactFactory, PropertyValue};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(PlanConfig::from_toml_str("").unwrap(), PlanConfig::default());
        assert_eq!(PlanConfig::from_yaml_str("{}").unwrap(), PlanConfig::default());
    }

    #[test]
    fn toml_full_document() {
        let config = PlanConfig::from_toml_str(
            r#"
            test_plan_name = "Checkout"
            cookie_manager = false

            [thread_group]
            num_threads = 25
            ramp_up_secs = 10

            [element_defaults.soap_sampler]
            "SoapSampler.SEND_SOAP_ACTION" = true

            [[filters]]
            kind = "header_defaults"
            headers = { "Content-Type" = "text/xml" }

            [[filters]]
            kind = "think_time"
            default = { mean_ms = 300, deviation_ms = 100 }

            [[filters]]
            kind = "result_collector"
            "#,
        )
        .unwrap();

        assert_eq!(config.test_plan_name.as_deref(), Some("Checkout"));
        assert!(!config.cookie_manager);
        assert_eq!(config.thread_group.num_threads, 25);
        assert_eq!(config.thread_group.loops, 1);
        assert_eq!(
            config.filters,
            vec![
                FilterSpec::HeaderDefaults {
                    headers: IndexMap::from([("Content-Type".to_string(), "text/xml".to_string())]),
                },
                FilterSpec::ThinkTime {
                    default: Some(ThinkTime::new(300, 100)),
                },
                FilterSpec::ResultCollector { filename: None },
            ]
        );

        let sampler = config.factory().create_soap_sampler();
        assert_eq!(
            sampler.property("SoapSampler.SEND_SOAP_ACTION"),
            Some(&PropertyValue::Bool(true))
        );
        assert_eq!(
            config.filter_chain().names(),
            vec!["header_defaults", "think_time", "result_collector"]
        );
    }

    #[test]
    fn yaml_filters_keep_order() {
        let config = PlanConfig::from_yaml_str(
            "filters:\n  - kind: result_collector\n    filename: out.jtl\n  - kind: identity\n",
        )
        .unwrap();
        assert_eq!(config.filter_chain().names(), vec!["result_collector", "identity"]);
    }

    #[test]
    fn unknown_filter_kind_rejected() {
        let err = PlanConfig::from_yaml_str("filters:\n  - kind: nope\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn builder_matches_document() {
        let built = PlanConfig::new()
            .with_test_plan_name("Checkout")
            .with_filter(FilterSpec::Identity);
        let parsed = PlanConfig::from_toml_str(
            "test_plan_name = \"Checkout\"\n[[filters]]\nkind = \"identity\"\n",
        )
        .unwrap();
        assert_eq!(built, parsed);
        assert!(built.factory().defaults().is_empty());
    }
}
