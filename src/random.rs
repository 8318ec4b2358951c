//! Random network generators, used to produce benchmark and training inputs.
//!
//! Generators take the random number generator as an argument so callers control seeding, e.g.
//! with `SmallRng::seed_from_u64` for reproducible networks.

use std::collections::HashSet;

use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    edge::Edge,
    graph::{Graph, NodeId},
};

/// Parameters of [`random_centralized_network`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralizedParams {
    /// Number of nodes.
    pub n: usize,
    /// Probability of the hub connecting to each other node.
    pub high: f64,
    /// Probability of any other node connecting to each other node.
    pub low: f64,
}

impl Default for CentralizedParams {
    fn default() -> Self {
        Self {
            n: 100,
            high: 0.8,
            low: 0.2,
        }
    }
}

/// Creates a graph of `n` alive nodes without any edges.
fn empty_network(n: usize) -> Graph {
    let mut graph = Graph::new();
    for _ in 0..n {
        graph.add_node();
    }

    graph
}

/// Generates an Erdős–Rényi `G(n, p)` network: every pair of the `n` nodes is connected with
/// probability `p`.
///
/// # Examples
///
/// ```
/// use rand::{rngs::SmallRng, SeedableRng};
/// use disnet::random::random_network;
///
/// let mut rng = SmallRng::seed_from_u64(1234);
/// let graph = random_network(10, 1.0, &mut rng);
///
/// assert_eq!(graph.edge_count(), 45);
/// ```
pub fn random_network<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Graph {
    let mut graph = empty_network(n);

    for (a, b) in (0..n).tuple_combinations() {
        if rng.gen::<f64>() < p {
            graph.push_edge(a, b);
        }
    }

    graph
}

/// Generates `d` independent [`random_network`]s.
pub fn random_networks<R: Rng + ?Sized>(d: usize, n: usize, p: f64, rng: &mut R) -> Vec<Graph> {
    (0..d).map(|_| random_network(n, p, rng)).collect()
}

/// Generates a network with one uniformly chosen hub.
///
/// Every node draws a connection to each other node, with probability `high` for the hub and
/// `low` for the rest. A pair drawn from both of its ends is only connected once.
pub fn random_centralized_network<R: Rng + ?Sized>(params: &CentralizedParams, rng: &mut R) -> Graph {
    let n = params.n;
    let mut graph = empty_network(n);
    if n == 0 {
        return graph;
    }

    let hub = rng.gen_range(0..n);
    let mut connected: HashSet<Edge<NodeId>> = HashSet::new();

    for i in 0..n {
        let p = if i == hub { params.high } else { params.low };

        for j in (0..n).filter(|&j| j != i) {
            if rng.gen::<f64>() < p && connected.insert(Edge::new(i, j)) {
                graph.push_edge(i, j);
            }
        }
    }

    graph
}

/// Generates `d` independent [`random_centralized_network`]s.
pub fn random_centralized_networks<R: Rng + ?Sized>(
    d: usize,
    params: &CentralizedParams,
    rng: &mut R,
) -> Vec<Graph> {
    (0..d)
        .map(|_| random_centralized_network(params, rng))
        .collect()
}
