//! Labelled samples for learning which node a disintegration removes first.
//!
//! A sample pairs a random centralized network with the node each centrality ranks highest. Its
//! JSON form is:
//!
//! ```json
//! {
//!   "size": 3,
//!   "labels": { "degree": [1], "betweenness": [1], "semi_local": [1] },
//!   "network": { "nodes": [0, 1, 2], "edges": [[0, 1], [1, 2]] }
//! }
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    centrality::{Betweenness, Centrality, Degree, SemiLocal},
    error::{Error, Result},
    graph::{Graph, NodeId},
    random::{random_centralized_network, CentralizedParams},
    snapshot::Snapshot,
};

const HUB_PROBABILITY: f64 = 0.9;
const NOISE_PROBABILITY: f64 = 0.05;

/// The [`Centrality::maximum`] of each node centrality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub degree: Vec<NodeId>,
    pub betweenness: Vec<NodeId>,
    pub semi_local: Vec<NodeId>,
}

impl Labels {
    /// Labels the visible part of `graph`.
    pub fn of(graph: &Graph) -> Self {
        Self {
            degree: Degree.maximum(graph),
            betweenness: Betweenness::default().maximum(graph),
            semi_local: SemiLocal.maximum(graph),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDisintegrationSample {
    pub size: usize,
    pub labels: Labels,
    pub network: Snapshot,
}

impl NodeDisintegrationSample {
    /// Generates a centralized network of `size` nodes and labels it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{rngs::SmallRng, SeedableRng};
    /// use disnet::dataset::NodeDisintegrationSample;
    ///
    /// let mut rng = SmallRng::seed_from_u64(2024);
    /// let sample = NodeDisintegrationSample::generate(30, &mut rng);
    ///
    /// assert_eq!(sample.network.nodes.len(), 30);
    /// assert_eq!(sample.labels.degree.len(), 1);
    /// ```
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let params = CentralizedParams {
            n: size,
            high: HUB_PROBABILITY,
            low: NOISE_PROBABILITY,
        };
        let graph = random_centralized_network(&params, rng);

        Self {
            size,
            labels: Labels::of(&graph),
            network: graph.export_snapshot(),
        }
    }

    /// Rebuilds the labelled network.
    pub fn graph(&self) -> Result<Graph> {
        Graph::import_snapshot(&self.network)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes a sample, reporting any schema violation as [`Error::MalformedInput`].
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::MalformedInput(e.to_string()))
    }
}
