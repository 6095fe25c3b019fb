//! Structural digests of artifact trees
//!
//! Provides [`TreeDigest`], a 32-byte Blake3 digest over the shape and content
//! of an [`ArtifactTree`](crate::ArtifactTree). Two trees have equal digests
//! iff they have the same nodes, in the same order, with the same properties
//! in the same order.

use crate::element::{PropertyValue, TestElement};
use crate::tree::TreeNode;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 32-byte structural digest (Blake3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TreeDigest([u8; 32]);

impl TreeDigest {
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Digest of the empty tree
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self(*blake3::hash(b"loadplan.tree.empty").as_bytes())
    }

    /// Digest of the subtree rooted at `node`
    #[must_use]
    pub fn of_node(node: &TreeNode) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"loadplan.tree");
        feed_node(&mut hasher, node);
        Self(*hasher.finalize().as_bytes())
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

// Length-prefix every variable field so distinct trees never share an encoding.
fn feed_str(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

fn feed_element(hasher: &mut blake3::Hasher, element: &TestElement) {
    feed_str(hasher, element.kind().as_str());
    feed_str(hasher, element.name());
    hasher.update(&(element.property_count() as u64).to_le_bytes());
    for (key, value) in element.properties() {
        feed_str(hasher, key);
        feed_value(hasher, value);
    }
}

fn feed_value(hasher: &mut blake3::Hasher, value: &PropertyValue) {
    match value {
        PropertyValue::Text(s) => {
            hasher.update(&[0]);
            feed_str(hasher, s);
        }
        PropertyValue::Integer(i) => {
            hasher.update(&[1]);
            hasher.update(&i.to_le_bytes());
        }
        PropertyValue::Bool(b) => {
            hasher.update(&[2, u8::from(*b)]);
        }
        PropertyValue::List(items) => {
            hasher.update(&[3]);
            hasher.update(&(items.len() as u64).to_le_bytes());
            for item in items {
                feed_str(hasher, item);
            }
        }
        PropertyValue::Table(rows) => {
            hasher.update(&[4]);
            hasher.update(&(rows.len() as u64).to_le_bytes());
            for (name, value) in rows {
                feed_str(hasher, name);
                feed_str(hasher, value);
            }
        }
    }
}

fn feed_node(hasher: &mut blake3::Hasher, node: &TreeNode) {
    feed_element(hasher, node.element());
    hasher.update(&(node.children().len() as u64).to_le_bytes());
    for child in node.children() {
        feed_node(hasher, child);
    }
}

impl Display for TreeDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for TreeDigest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| DigestError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

/// Errors that can occur when parsing digests
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    /// Invalid digest length
    #[error("invalid digest length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Hex encoding error
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}
