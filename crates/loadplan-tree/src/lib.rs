//! loadplan test-plan trees
//!
//! Typed, ordered trees of test-plan elements produced by the loadplan
//! compiler and consumed by a load-testing engine.
//!
//! # Core Concepts
//!
//! - [`TestElement`]: Node payload (kind, name, ordered properties)
//! - [`ArtifactTree`]: Empty or single-rooted tree of [`TreeNode`]s
//! - [`TreePath`]: Child-index addressing within a tree
//! - [`TreeDigest`]: Blake3 structural digest for cheap equality checks
//! - [`ArtifactFactory`]: Narrow creation contract for fresh elements
//!
//! # Example
//!
//! ```rust,ignore
//! use loadplan_tree::{ArtifactFactory, ArtifactTree, DefaultArtifactFactory, TreePath};
//!
//! let factory = DefaultArtifactFactory::new();
//! let mut tree = ArtifactTree::new(factory.create_test_plan());
//! tree.attach(&TreePath::root(), ArtifactTree::new(factory.create_thread_group()))?;
//!
//! assert_eq!(tree.node_count(), 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod digest;
mod element;
mod factory;
mod path;
mod tree;

pub use digest::{DigestError, TreeDigest};
pub use element::{ElementKind, PropertyValue, TestElement};
pub use factory::{ArtifactFactory, DefaultArtifactFactory, ElementDefaults};
pub use path::{PathError, TreePath};
pub use tree::{ArtifactTree, DepthFirst, TreeError, TreeNode};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
