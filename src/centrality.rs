//! A module for ranking nodes and edges by centrality.
//!
//! Every measure implements [`Centrality`], which only requires a score map over the alive
//! elements of a [`Graph`]. The ranking queries (`ascending`, `descending`, `maximum`, `minimum`
//! and `mean`) are derived from it. Measures are stateless: the graph is passed on every query and
//! scores are always recomputed from its current alive view, so a ranking can never go stale while
//! the graph is being disintegrated.

use std::{collections::BTreeMap, fmt::Debug};

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::{
    betweenness::{compute_betweenness, compute_edge_betweenness},
    edge::Edge,
    graph::{CompactGraph, EdgeIndex, Graph, NodeId},
};

pub use crate::betweenness::{MAX_NUM_THREADS, MIN_NUM_THREADS};

/// A centrality measure over the alive nodes or edges of a graph.
pub trait Centrality {
    /// The element being ranked, a [`NodeId`] or an [`EdgeIndex`].
    ///
    /// Elements are ordered by id, which is also their insertion order.
    type Element: Copy + Ord + Debug;

    /// Scores every alive element of the graph.
    fn score_map(&self, graph: &Graph) -> BTreeMap<Self::Element, f64>;

    /// Returns the alive elements sorted by increasing score, ties kept in insertion order.
    fn ascending(&self, graph: &Graph) -> Vec<Self::Element> {
        let mut scores: Vec<(Self::Element, f64)> = self.score_map(graph).into_iter().collect();
        scores.sort_by(|(_, a), (_, b)| a.total_cmp(b));

        scores.into_iter().map(|(element, _)| element).collect()
    }

    /// Returns the alive elements sorted by decreasing score, ties kept in insertion order.
    fn descending(&self, graph: &Graph) -> Vec<Self::Element> {
        let mut scores: Vec<(Self::Element, f64)> = self.score_map(graph).into_iter().collect();
        scores.sort_by(|(_, a), (_, b)| b.total_cmp(a));

        scores.into_iter().map(|(element, _)| element).collect()
    }

    /// Returns the highest scoring element, the earliest inserted one on ties.
    ///
    /// The result holds exactly one element, or none if nothing is alive.
    ///
    /// # Examples
    ///
    /// ```
    /// use disnet::centrality::{Centrality, Degree};
    /// use disnet::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// let hub = graph.add_node();
    /// for _ in 0..3 {
    ///     let leaf = graph.add_node();
    ///     graph.add_edge(hub, leaf).unwrap();
    /// }
    ///
    /// assert_eq!(Degree.maximum(&graph), vec![hub]);
    /// assert!(Degree.maximum(&Graph::new()).is_empty());
    /// ```
    fn maximum(&self, graph: &Graph) -> Vec<Self::Element> {
        first_by(self.score_map(graph), |candidate, best| candidate > best)
    }

    /// Returns the lowest scoring element, the earliest inserted one on ties.
    fn minimum(&self, graph: &Graph) -> Vec<Self::Element> {
        first_by(self.score_map(graph), |candidate, best| candidate < best)
    }

    /// Returns the element whose score is closest to the mean score, the earliest inserted one
    /// on ties.
    fn mean(&self, graph: &Graph) -> Vec<Self::Element> {
        let scores = self.score_map(graph);
        if scores.is_empty() {
            return vec![];
        }

        let mean = scores.values().sum::<f64>() / scores.len() as f64;
        let distances = scores
            .into_iter()
            .map(|(element, score)| (element, (score - mean).abs()))
            .collect();

        first_by(distances, |candidate, best| candidate < best)
    }
}

impl<C: Centrality + ?Sized> Centrality for &C {
    type Element = C::Element;

    fn score_map(&self, graph: &Graph) -> BTreeMap<Self::Element, f64> {
        (**self).score_map(graph)
    }
}

/// Returns the first element, in key order, that no later element beats.
fn first_by<E: Copy>(scores: BTreeMap<E, f64>, beats: impl Fn(f64, f64) -> bool) -> Vec<E> {
    let mut best: Option<(E, f64)> = None;

    for (element, score) in scores {
        match best {
            Some((_, best_score)) if !beats(score, best_score) => {}
            _ => best = Some((element, score)),
        }
    }

    best.map(|(element, _)| element).into_iter().collect()
}

/// Degree centrality, the fraction of the other alive nodes each node is connected to.
///
/// A lone alive node scores `1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degree;

impl Centrality for Degree {
    type Element = NodeId;

    fn score_map(&self, graph: &Graph) -> BTreeMap<NodeId, f64> {
        let nodes = graph.alive_nodes();
        if nodes.len() <= 1 {
            return nodes.into_iter().map(|id| (id, 1.0)).collect();
        }

        let degree_vector = graph.degree_vector();
        let scale = 1.0 / (nodes.len() - 1) as f64;

        nodes
            .into_iter()
            .map(|id| (id, degree_vector[id] * scale))
            .collect()
    }
}

/// Betweenness centrality over the alive subgraph, computed with Brandes' algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Betweenness {
    /// Divide by `(n - 1)(n - 2)`, the number of ordered pairs excluding the node itself.
    pub normalized: bool,
    /// Worker threads used for the single-source passes, clamped to
    /// `MIN_NUM_THREADS..=MAX_NUM_THREADS`.
    pub num_threads: usize,
}

impl Default for Betweenness {
    fn default() -> Self {
        Self {
            normalized: true,
            num_threads: MIN_NUM_THREADS,
        }
    }
}

impl Centrality for Betweenness {
    type Element = NodeId;

    fn score_map(&self, graph: &Graph) -> BTreeMap<NodeId, f64> {
        let CompactGraph { nodes, indices, .. } = graph.compact();
        let values = compute_betweenness(indices, self.num_threads, self.normalized);

        nodes.into_iter().zip(values).collect()
    }
}

/// Semi-local centrality: the sum of the degrees of a node's alive neighbours.
///
/// Computed as `A (A 1)` from the adjacency matrix, no shortest paths involved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemiLocal;

impl Centrality for SemiLocal {
    type Element = NodeId;

    fn score_map(&self, graph: &Graph) -> BTreeMap<NodeId, f64> {
        let adjacency_matrix = graph.adjacency_matrix();
        let ones = DVector::<f64>::from_element(adjacency_matrix.ncols(), 1.0);

        let degree = &adjacency_matrix * ones;
        let semi_local = &adjacency_matrix * degree;

        graph
            .alive_nodes()
            .into_iter()
            .map(|id| (id, semi_local[id]))
            .collect()
    }
}

/// Edge betweenness centrality over the alive subgraph.
///
/// Parallel edges between the same pair of nodes share the same score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeBetweenness {
    /// Divide by `n(n - 1)`.
    pub normalized: bool,
    pub num_threads: usize,
}

impl Default for EdgeBetweenness {
    fn default() -> Self {
        Self {
            normalized: true,
            num_threads: MIN_NUM_THREADS,
        }
    }
}

impl Centrality for EdgeBetweenness {
    type Element = EdgeIndex;

    fn score_map(&self, graph: &Graph) -> BTreeMap<EdgeIndex, f64> {
        let CompactGraph {
            position, indices, ..
        } = graph.compact();
        let values = compute_edge_betweenness(indices, self.num_threads, self.normalized);

        graph
            .alive_edge_indices()
            .into_iter()
            .filter_map(|index| graph.edge(index).map(|edge| (index, edge.pair())))
            .map(|(index, (a, b))| {
                let score = match (position[a], position[b]) {
                    (Some(i), Some(j)) => {
                        let pair = Edge::new(i as usize, j as usize).sorted();
                        values.get(&pair).copied().unwrap_or(0.0)
                    }
                    _ => 0.0,
                };

                (index, score)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_scores(actual: BTreeMap<usize, f64>, expected: &[(usize, f64)]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?}");
        for (id, score) in expected {
            let value = actual[id];
            assert!((value - score).abs() < 1e-9, "{id}: {value} != {score}");
        }
    }

    #[test]
    fn degree() {
        let mut graph = graph!(4; [0, 1], [0, 2], [0, 3]);

        assert_scores(
            Degree.score_map(&graph),
            &[(0, 1.0), (1, 1.0 / 3.0), (2, 1.0 / 3.0), (3, 1.0 / 3.0)],
        );

        // Only the alive view is scored, and normalized by the alive node count.
        graph.kill_node(3);
        assert_scores(
            Degree.score_map(&graph),
            &[(0, 1.0), (1, 0.5), (2, 0.5)],
        );
    }

    #[test]
    fn degree_small_graphs() {
        assert!(Degree.score_map(&Graph::new()).is_empty());
        assert_scores(Degree.score_map(&graph!(1;)), &[(0, 1.0)]);
    }

    #[test]
    fn degree_counts_parallel_edges_once() {
        let graph = graph!(3; [0, 1], [1, 0], [1, 2]);

        assert_scores(
            Degree.score_map(&graph),
            &[(0, 0.5), (1, 1.0), (2, 0.5)],
        );
    }

    #[test]
    fn betweenness() {
        let mut graph = graph!(5; [0, 1, 2, 3], [3, 4]);

        let unnormalized = Betweenness {
            normalized: false,
            ..Default::default()
        };
        assert_scores(
            unnormalized.score_map(&graph),
            &[(0, 0.0), (1, 3.0), (2, 4.0), (3, 3.0), (4, 0.0)],
        );

        // Killing the middle splits the path, nothing lies between anything anymore.
        graph.kill_node(2);
        assert_scores(
            Betweenness::default().score_map(&graph),
            &[(0, 0.0), (1, 0.0), (3, 0.0), (4, 0.0)],
        );
    }

    #[test]
    fn betweenness_normalized() {
        let graph = graph!(4; [0, 1, 2, 3]);

        assert_scores(
            Betweenness::default().score_map(&graph),
            &[(0, 0.0), (1, 2.0 / 3.0), (2, 2.0 / 3.0), (3, 0.0)],
        );
    }

    #[test]
    fn semi_local() {
        // A star with an extra leaf hanging off of leaf 1.
        let mut graph = graph!(5; [0, 1], [0, 2], [0, 3], [1, 4]);

        assert_scores(
            SemiLocal.score_map(&graph),
            &[(0, 4.0), (1, 4.0), (2, 3.0), (3, 3.0), (4, 2.0)],
        );

        graph.kill_node(0);
        assert_scores(
            SemiLocal.score_map(&graph),
            &[(1, 1.0), (2, 0.0), (3, 0.0), (4, 1.0)],
        );
    }

    #[test]
    fn edge_betweenness() {
        let mut graph = graph!(4; [0, 1, 2, 3], [1, 2]);

        let unnormalized = EdgeBetweenness {
            normalized: false,
            ..Default::default()
        };
        assert_scores(
            unnormalized.score_map(&graph),
            &[(0, 3.0), (1, 4.0), (2, 3.0), (3, 4.0)],
        );

        graph.kill_edge(1);
        graph.kill_node(3);
        assert_scores(
            EdgeBetweenness::default().score_map(&graph),
            &[(0, 4.0 / 6.0), (3, 4.0 / 6.0)],
        );
    }

    #[test]
    fn edge_betweenness_of_reversed_edges() {
        // Edges stored high to low, over compact indices shifted by the dead node 0.
        let mut graph = graph!(4; [3, 2, 1]);
        graph.kill_node(0);

        let unnormalized = EdgeBetweenness {
            normalized: false,
            ..Default::default()
        };
        assert_scores(unnormalized.score_map(&graph), &[(0, 2.0), (1, 2.0)]);
    }

    #[test]
    fn ascending_and_descending() {
        let graph = graph!(5; [0, 1], [0, 2], [0, 3], [1, 4]);

        // Degrees: 3, 2, 1, 1, 1. Ties stay in insertion order both ways.
        assert_eq!(Degree.ascending(&graph), vec![2, 3, 4, 1, 0]);
        assert_eq!(Degree.descending(&graph), vec![0, 1, 2, 3, 4]);

        assert!(Degree.ascending(&Graph::new()).is_empty());
        assert!(Degree.descending(&Graph::new()).is_empty());
    }

    #[test]
    fn maximum_and_minimum() {
        let mut graph = graph!(4; [0, 1, 2, 3]);

        assert_eq!(Degree.maximum(&graph), vec![1]);
        assert_eq!(Degree.minimum(&graph), vec![0]);

        graph.kill_node(1);
        assert_eq!(Degree.maximum(&graph), vec![2]);
        assert_eq!(Degree.minimum(&graph), vec![0]);

        assert!(Degree.maximum(&Graph::new()).is_empty());
        assert!(Degree.minimum(&Graph::new()).is_empty());
    }

    #[test]
    fn mean() {
        // Degree centralities: 1, 0.5, 0.5, 0.25, 0.25, the mean is 0.5.
        let graph = graph!(5; [0, 1], [0, 2], [0, 3], [0, 4], [1, 2]);
        assert_eq!(Degree.mean(&graph), vec![1]);

        // Semi-local scores: 0, 0, 0, 2, 2, 2. Everything is equidistant from the mean of 1 so
        // the lowest id wins.
        let graph = graph!(6; [3, 4, 5]);
        assert_eq!(SemiLocal.mean(&graph), vec![0]);

        assert!(Degree.mean(&Graph::new()).is_empty());
    }

    #[test]
    fn edge_rankings() {
        let graph = graph!(4; [0, 1, 2, 3]);

        assert_eq!(EdgeBetweenness::default().maximum(&graph), vec![1]);
        assert_eq!(EdgeBetweenness::default().minimum(&graph), vec![0]);
        assert_eq!(
            EdgeBetweenness::default().descending(&graph),
            vec![1, 0, 2]
        );
    }

    #[test]
    fn config_from_json() {
        let config: Betweenness = serde_json::from_str(r#"{"num_threads": 4}"#).unwrap();

        assert_eq!(
            config,
            Betweenness {
                normalized: true,
                num_threads: 4
            }
        );
    }
}
