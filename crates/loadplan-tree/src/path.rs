//! Tree paths for addressing nodes within an artifact tree
//!
//! Provides [`TreePath`], the sequence of child indices leading from the root
//! to a node.

use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Path from the root of an [`ArtifactTree`](crate::ArtifactTree) to one node
///
/// The root itself is the empty path. Each segment is a child index.
///
/// # Examples
/// - `/` → the root
/// - `/0/2` → third child of the root's first child
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TreePath(SmallVec<[usize; 8]>);

impl TreePath {
    /// Path of the root node
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// Create path from child indices
    #[inline]
    #[must_use]
    pub fn new(indices: &[usize]) -> Self {
        Self(SmallVec::from_slice(indices))
    }

    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Depth below the root
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Parent path (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(SmallVec::from_slice(&self.0[..self.0.len() - 1])))
        }
    }

    /// Index within the parent (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Append a child index, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut new = self.clone();
        new.0.push(index);
        new
    }

    /// Check if this path is an ancestor of another (strict prefix)
    #[inline]
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && self.0[..] == other.0[..self.0.len()]
    }
}

impl Display for TreePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl FromStr for TreePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix('/').ok_or(PathError::NotAbsolute)?;
        if rest.is_empty() {
            return Ok(Self::root());
        }

        let indices = rest
            .split('/')
            .map(|seg| {
                if seg.is_empty() {
                    Err(PathError::EmptySegment)
                } else {
                    seg.parse::<usize>()
                        .map_err(|_| PathError::InvalidSegment(seg.to_string()))
                }
            })
            .collect::<Result<SmallVec<[usize; 8]>, _>>()?;

        Ok(Self(indices))
    }
}

impl From<&[usize]> for TreePath {
    fn from(indices: &[usize]) -> Self {
        Self::new(indices)
    }
}

/// Errors related to tree paths
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    /// Path does not start at the root
    #[error("path must start with '/'")]
    NotAbsolute,

    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Segment is not a child index
    #[error("invalid segment: {0} (must be a child index)")]
    InvalidSegment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path() {
        let path = TreePath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert!(path.parent().is_none());
        assert_eq!(path.to_string(), "/");
    }

    #[test]
    fn child_and_parent() {
        let path = TreePath::root().child(0).child(3);
        assert_eq!(path.indices(), &[0, 3]);
        assert_eq!(path.last(), Some(3));
        assert_eq!(path.parent(), Some(TreePath::new(&[0])));
    }

    #[test]
    fn ancestor_is_strict_prefix() {
        let a = TreePath::new(&[0]);
        let b = TreePath::new(&[0, 1]);
        assert!(a.is_ancestor_of(&b));
        assert!(!b.is_ancestor_of(&a));
        assert!(!a.is_ancestor_of(&a));
        assert!(TreePath::root().is_ancestor_of(&a));
    }

    #[test]
    fn display_and_parse() {
        let path = TreePath::new(&[0, 2, 1]);
        assert_eq!(path.to_string(), "/0/2/1");
        assert_eq!("/0/2/1".parse::<TreePath>().unwrap(), path);
        assert_eq!("/".parse::<TreePath>().unwrap(), TreePath::root());
    }

    #[test]
    fn parse_errors() {
        assert_eq!("0/1".parse::<TreePath>(), Err(PathError::NotAbsolute));
        assert_eq!("/0//1".parse::<TreePath>(), Err(PathError::EmptySegment));
        assert!(matches!(
            "/0/x".parse::<TreePath>(),
            Err(PathError::InvalidSegment(_))
        ));
    }
}
