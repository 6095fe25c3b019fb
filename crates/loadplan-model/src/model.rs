//! Workload model root

use crate::error::ModelError;
use crate::request::Request;
use serde::{Deserialize, Serialize};

/// Think time between consecutive requests of a session
///
/// Interpreted as a Gaussian distribution: `mean_ms` is the constant offset and
/// `deviation_ms` the spread around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ThinkTime {
    pub mean_ms: u64,

    #[serde(default)]
    pub deviation_ms: u64,
}

impl ThinkTime {
    /// Create new think time
    #[inline]
    #[must_use]
    pub const fn new(mean_ms: u64, deviation_ms: u64) -> Self {
        Self {
            mean_ms,
            deviation_ms,
        }
    }
}

/// Root of the workload model
///
/// # Invariants
/// - Immutable once handed to a transformer
/// - Request order is significant and preserved by every transformer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkloadModel {
    #[serde(default)]
    name: String,

    #[serde(default)]
    requests: Vec<Request>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    think_time: Option<ThinkTime>,
}

impl WorkloadModel {
    /// Create empty model
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requests: Vec::new(),
            think_time: None,
        }
    }

    /// Append request
    #[inline]
    #[must_use]
    pub fn with_request(mut self, request: impl Into<Request>) -> Self {
        self.requests.push(request.into());
        self
    }

    /// Set model-wide think time
    #[inline]
    #[must_use]
    pub fn with_think_time(mut self, think_time: ThinkTime) -> Self {
        self.think_time = Some(think_time);
        self
    }

    /// Decode model from a JSON document
    ///
    /// # Errors
    /// Returns error if the document is not a valid model
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode model from a YAML document
    ///
    /// # Errors
    /// Returns error if the document is not a valid model
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ModelError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Model name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Requests in model order
    #[inline]
    #[must_use]
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Model-wide think time
    #[inline]
    #[must_use]
    pub fn think_time(&self) -> Option<ThinkTime> {
        self.think_time
    }

    /// Find first request with the given element identifier
    #[must_use]
    pub fn find_request(&self, e_id: &str) -> Option<&Request> {
        self.requests.iter().find(|r| r.e_id() == e_id)
    }

    /// Effective think time for the first request named `e_id`
    ///
    /// Element identifiers need not be unique; use
    /// [`think_time_of`](Self::think_time_of) when the request itself is known.
    #[must_use]
    pub fn think_time_for(&self, e_id: &str) -> Option<ThinkTime> {
        match self.find_request(e_id) {
            Some(request) => self.think_time_of(request),
            None => self.think_time,
        }
    }

    /// Effective think time of `request`: its own override, else the model default
    #[inline]
    #[must_use]
    pub fn think_time_of(&self, request: &Request) -> Option<ThinkTime> {
        request.think_time().or(self.think_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpRequest, RequestKind, SoapRequest};

    #[test]
    fn requests_keep_insertion_order() {
        let model = WorkloadModel::new("m")
            .with_request(SoapRequest::new("a"))
            .with_request(HttpRequest::new("b"))
            .with_request(SoapRequest::new("c"));

        let ids: Vec<_> = model.requests().iter().map(Request::e_id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn find_request_by_e_id() {
        let model = WorkloadModel::new("m").with_request(HttpRequest::new("login"));
        assert_eq!(
            model.find_request("login").map(Request::kind),
            Some(RequestKind::Http)
        );
        assert!(model.find_request("missing").is_none());
    }

    #[test]
    fn think_time_override_wins() {
        let model = WorkloadModel::new("m")
            .with_think_time(ThinkTime::new(1000, 100))
            .with_request(SoapRequest::new("a").with_think_time(ThinkTime::new(50, 0)))
            .with_request(SoapRequest::new("b"));

        assert_eq!(model.think_time_for("a"), Some(ThinkTime::new(50, 0)));
        assert_eq!(model.think_time_for("b"), Some(ThinkTime::new(1000, 100)));
        assert_eq!(model.think_time_for("zzz"), Some(ThinkTime::new(1000, 100)));
    }

    #[test]
    fn think_time_of_duplicate_ids() {
        let model = WorkloadModel::new("m")
            .with_think_time(ThinkTime::new(500, 0))
            .with_request(SoapRequest::new("a"))
            .with_request(SoapRequest::new("a").with_think_time(ThinkTime::new(100, 0)));

        let times: Vec<_> = model
            .requests()
            .iter()
            .map(|r| model.think_time_of(r))
            .collect();
        assert_eq!(
            times,
            vec![Some(ThinkTime::new(500, 0)), Some(ThinkTime::new(100, 0))]
        );
        assert_eq!(model.think_time_for("a"), Some(ThinkTime::new(500, 0)));
    }

    #[test]
    fn empty_model_has_no_think_time() {
        let model = WorkloadModel::default();
        assert!(model.think_time_for("a").is_none());
        assert!(model.requests().is_empty());
    }
}
