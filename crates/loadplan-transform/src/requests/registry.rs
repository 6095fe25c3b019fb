//! Request transformer registry
//!
//! Provides [`RequestTransformerRegistry`], the dispatch table from request
//! variant to the transformer that builds its fragment.

use super::{HttpRequestTransformer, RequestTransformer, SoapRequestTransformer};
use crate::error::TransformationError;
use loadplan_model::{Request, RequestKind};
use loadplan_tree::{ArtifactFactory, TreeNode};
use std::collections::BTreeMap;

/// Dispatch table from [`RequestKind`] to [`RequestTransformer`]
///
/// Lookup misses are reported as
/// [`TransformationError::UnregisteredRequestType`]; a transformer registered
/// under the wrong kind reports
/// [`TransformationError::UnexpectedRequestType`] when invoked.
#[derive(Debug, Default)]
pub struct RequestTransformerRegistry {
    transformers: BTreeMap<RequestKind, Box<dyn RequestTransformer>>,
}

impl RequestTransformerRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            transformers: BTreeMap::new(),
        }
    }

    /// Create registry with a transformer for every request kind
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in RequestKind::ALL {
            let transformer: Box<dyn RequestTransformer> = match kind {
                RequestKind::Soap => Box::new(SoapRequestTransformer::new()),
                RequestKind::Http => Box::new(HttpRequestTransformer::new()),
            };
            registry.register(kind, transformer);
        }
        registry
    }

    /// Register `transformer` for `kind`, returning the one it replaces
    pub fn register(
        &mut self,
        kind: RequestKind,
        transformer: Box<dyn RequestTransformer>,
    ) -> Option<Box<dyn RequestTransformer>> {
        self.transformers.insert(kind, transformer)
    }

    /// Register `transformer` under the kind it reports
    pub fn register_transformer(
        &mut self,
        transformer: Box<dyn RequestTransformer>,
    ) -> Option<Box<dyn RequestTransformer>> {
        self.register(transformer.kind(), transformer)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, kind: RequestKind) -> Option<&dyn RequestTransformer> {
        self.transformers.get(&kind).map(|t| &**t)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, kind: RequestKind) -> bool {
        self.transformers.contains_key(&kind)
    }

    #[inline]
    pub fn remove(&mut self, kind: RequestKind) -> Option<Box<dyn RequestTransformer>> {
        self.transformers.remove(&kind)
    }

    /// Registered kinds, in [`RequestKind`] order
    #[must_use]
    pub fn kinds(&self) -> Vec<RequestKind> {
        self.transformers.keys().copied().collect()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Build the fragment of `request` with the transformer registered for its kind
    ///
    /// # Errors
    /// Returns error if no transformer is registered for the request's kind,
    /// or if the registered transformer handles a different kind
    pub fn transform(
        &self,
        request: &Request,
        factory: &dyn ArtifactFactory,
    ) -> Result<TreeNode, TransformationError> {
        let kind = request.kind();
        let transformer =
            self.get(kind)
                .ok_or_else(|| TransformationError::UnregisteredRequestType {
                    e_id: request.e_id().to_string(),
                    kind,
                })?;

        tracing::debug!(e_id = request.e_id(), %kind, "transforming request");
        transformer.transform(request, factory)
    }
}
