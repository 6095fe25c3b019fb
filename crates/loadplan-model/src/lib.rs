//! loadplan workload model
//!
//! Immutable description of the requests a load test exercises, independent of
//! the engine that will eventually run them.
//!
//! # Core Concepts
//!
//! - [`WorkloadModel`]: Root of the model, owns an ordered list of requests
//! - [`Request`]: Closed set of request variants ([`SoapRequest`], [`HttpRequest`])
//! - [`RequestKind`]: Variant tag used for transformer dispatch
//! - [`Property`] / [`Assertion`]: Ordered per-request key/value pairs and
//!   expected-response matchers
//!
//! # Example
//!
//! ```rust,ignore
//! use loadplan_model::{SoapRequest, WorkloadModel};
//!
//! let model = WorkloadModel::new("checkout")
//!     .with_request(
//!         SoapRequest::new("req1")
//!             .with_property("URL", "http://x")
//!             .with_assertion("OK"),
//!     );
//!
//! assert_eq!(model.requests().len(), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod model;
mod property;
mod request;

pub use error::ModelError;
pub use model::{ThinkTime, WorkloadModel};
pub use property::{Assertion, Parameter, Property};
pub use request::{HttpRequest, Request, RequestKind, RequestVariant, SoapRequest};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
