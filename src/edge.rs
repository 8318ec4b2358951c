//! A module for working with edges.

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// An unordered pair of node ids. Edges don't have a direction, despite the `source`-`target`
/// nomenclature used: `Edge::new(a, b) == Edge::new(b, a)` and both hash identically.
#[derive(Clone, Copy, Debug, Eq)]
pub struct Edge<T> {
    source: T,
    target: T,
}

impl<T> Edge<T> {
    /// Creates a new edge from two endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use disnet::edge::Edge;
    ///
    /// let edge = Edge::new(0, 1);
    /// assert_eq!(edge, Edge::new(1, 0));
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self { source, target }
    }

    /// Returns the first endpoint, as it was given on construction.
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the second endpoint, as it was given on construction.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns whether the edge touches the given node.
    ///
    /// # Examples
    ///
    /// ```
    /// use disnet::edge::Edge;
    ///
    /// let edge = Edge::new(0, 1);
    ///
    /// assert!(edge.contains(&0));
    /// assert!(edge.contains(&1));
    /// assert!(!edge.contains(&2));
    /// ```
    pub fn contains(&self, node: &T) -> bool
    where
        T: PartialEq,
    {
        self.source() == node || self.target() == node
    }

    /// Returns the endpoint opposite `node`, or `None` if the edge doesn't touch it.
    ///
    /// # Examples
    ///
    /// ```
    /// use disnet::edge::Edge;
    ///
    /// let edge = Edge::new(3, 5);
    /// assert_eq!(edge.opposite(&3), Some(&5));
    /// assert_eq!(edge.opposite(&4), None);
    /// ```
    pub fn opposite(&self, node: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        if self.source() == node {
            Some(self.target())
        } else if self.target() == node {
            Some(self.source())
        } else {
            None
        }
    }

    /// Returns whether both endpoints are the same node.
    pub fn is_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }
}

impl<T: Copy> Edge<T> {
    /// Returns the endpoints as a `(source, target)` tuple.
    pub fn pair(&self) -> (T, T) {
        (self.source, self.target)
    }
}

impl<T: Copy + Ord> Edge<T> {
    /// Returns the endpoints ordered `(low, high)`, the canonical form of the unordered pair.
    pub fn sorted(&self) -> (T, T) {
        match self.source.cmp(&self.target) {
            Ordering::Greater => (self.target, self.source),
            _ => (self.source, self.target),
        }
    }
}

//
// Trait implementations
//

impl<T: PartialEq> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.source, &self.target);
        let (c, d) = (&other.source, &other.target);

        a == d && b == c || a == c && b == d
    }
}

impl<T: Hash + Ord> Hash for Edge<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (a, b) = (&self.source, &self.target);

        // This ensures the hash is the same for (a, b) as it is for (b, a).
        match a.cmp(b) {
            Ordering::Greater => {
                b.hash(state);
                a.hash(state);
            }
            _ => {
                a.hash(state);
                b.hash(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        assert_eq!(
            Edge::new(4, 2),
            Edge {
                source: 4,
                target: 2
            }
        )
    }

    #[test]
    fn endpoints() {
        let edge = Edge::new(4, 2);

        assert_eq!(edge.source(), &4);
        assert_eq!(edge.target(), &2);
        assert_eq!(edge.pair(), (4, 2));
        assert_eq!(edge.sorted(), (2, 4));
    }

    #[test]
    fn opposite() {
        let edge = Edge::new(1, 2);

        assert_eq!(edge.opposite(&1), Some(&2));
        assert_eq!(edge.opposite(&2), Some(&1));
        assert_eq!(edge.opposite(&3), None);
    }

    #[test]
    fn is_loop() {
        assert!(Edge::new(1, 1).is_loop());
        assert!(!Edge::new(1, 2).is_loop());
    }

    //
    // Trait implementations
    //

    #[test]
    fn partial_eq() {
        assert_eq!(Edge::new(0, 1), Edge::new(0, 1));
        assert_eq!(Edge::new(0, 1), Edge::new(1, 0));
        assert_ne!(Edge::new(0, 1), Edge::new(0, 2));
    }

    #[test]
    fn hash() {
        use std::collections::hash_map::DefaultHasher;

        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();

        let k1 = Edge::new(3, 8);
        let k2 = Edge::new(8, 3);

        k1.hash(&mut h1);
        k2.hash(&mut h2);

        // Verify k1 == k2 => hash(k1) == hash(k2).
        assert_eq!(h1.finish(), h2.finish());
    }
}
