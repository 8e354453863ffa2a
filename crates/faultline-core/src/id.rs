//! Strongly-typed vertex identifiers.

use std::fmt;

/// Identifies a fault-surface vertex within a fault section.
///
/// `VertexId(n)` is the n-th vertex in the order the host supplied the
/// raw property arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl VertexId {
    /// The vertex index as a `usize`, for slicing per-vertex storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_index() {
        let v = VertexId::from(17);
        assert_eq!(v.to_string(), "17");
        assert_eq!(v.index(), 17);
    }

    #[test]
    fn ordering_follows_raw_index() {
        assert!(VertexId(3) < VertexId(4));
    }
}
