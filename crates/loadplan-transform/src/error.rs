//! Transformation errors
//!
//! [`TransformationError`] is the only error the transformation core raises.
//! It always signals a dispatch misconfiguration: a request reached a
//! transformer built for another variant, or no transformer was registered
//! for the request's variant. It is never retried.

use loadplan_model::RequestKind;

/// Request dispatched to the wrong transformer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformationError {
    /// Runtime variant differs from the variant the transformer handles
    #[error("invalid request type for '{e_id}': expected {expected}, got {actual}")]
    UnexpectedRequestType {
        /// Element identifier of the offending request
        e_id: String,
        /// Variant the transformer handles
        expected: RequestKind,
        /// Variant the request actually is
        actual: RequestKind,
    },

    /// Dispatch table has no entry for the request's variant
    #[error("no transformer registered for {kind} '{e_id}'")]
    UnregisteredRequestType {
        /// Element identifier of the offending request
        e_id: String,
        /// Variant without a transformer
        kind: RequestKind,
    },
}

impl TransformationError {
    /// Create wrong-variant error
    #[inline]
    #[must_use]
    pub fn unexpected_request_type(
        e_id: impl Into<String>,
        expected: RequestKind,
        actual: RequestKind,
    ) -> Self {
        Self::UnexpectedRequestType {
            e_id: e_id.into(),
            expected,
            actual,
        }
    }

    /// Variant the failing transformer expected, if any
    #[inline]
    #[must_use]
    pub fn expected(&self) -> Option<RequestKind> {
        match self {
            Self::UnexpectedRequestType { expected, .. } => Some(*expected),
            Self::UnregisteredRequestType { .. } => None,
        }
    }

    /// Variant of the request that failed
    #[inline]
    #[must_use]
    pub fn actual(&self) -> RequestKind {
        match self {
            Self::UnexpectedRequestType { actual, .. } => *actual,
            Self::UnregisteredRequestType { kind, .. } => *kind,
        }
    }

    /// Element identifier of the request that failed
    #[inline]
    #[must_use]
    pub fn e_id(&self) -> &str {
        match self {
            Self::UnexpectedRequestType { e_id, .. } | Self::UnregisteredRequestType { e_id, .. } => {
                e_id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_both_types() {
        let err = TransformationError::unexpected_request_type(
            "req1",
            RequestKind::Soap,
            RequestKind::Http,
        );
        let msg = err.to_string();
        assert!(msg.contains("SoapRequest"));
        assert!(msg.contains("HttpRequest"));
        assert!(msg.contains("req1"));
    }

    #[test]
    fn accessors() {
        let err = TransformationError::unexpected_request_type("a", RequestKind::Http, RequestKind::Soap);
        assert_eq!(err.expected(), Some(RequestKind::Http));
        assert_eq!(err.actual(), RequestKind::Soap);
        assert_eq!(err.e_id(), "a");

        let err = TransformationError::UnregisteredRequestType {
            e_id: "b".to_string(),
            kind: RequestKind::Http,
        };
        assert_eq!(err.expected(), None);
        assert_eq!(err.actual(), RequestKind::Http);
        assert!(err.to_string().contains("no transformer registered"));
    }
}
