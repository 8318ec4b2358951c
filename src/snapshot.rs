//! A module for exporting and importing the visible part of a graph.
//!
//! A [`Snapshot`] only records alive nodes and alive edges, the soft-delete history of a graph is
//! not preserved. Its JSON form is:
//!
//! ```json
//! {
//!   "nodes": [0, 1, 3],
//!   "edges": [[0, 1], [1, 3]]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    graph::{Graph, NodeId},
};

/// The largest id range an imported snapshot may span.
pub const MAX_SNAPSHOT_NODES: usize = 1 << 24;

/// The alive nodes and edges of a graph, by node id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId)>,
}

impl Snapshot {
    /// Decodes a snapshot from JSON. Missing fields and type mismatches are reported as
    /// [`Error::MalformedInput`].
    ///
    /// # Examples
    ///
    /// ```
    /// use disnet::snapshot::Snapshot;
    ///
    /// let snapshot = Snapshot::from_json(r#"{"nodes": [0, 1], "edges": [[0, 1]]}"#).unwrap();
    /// assert_eq!(snapshot.edges, vec![(0, 1)]);
    ///
    /// assert!(Snapshot::from_json(r#"{"nodes": [0, 1]}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::MalformedInput(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Graph {
    /// Captures the alive nodes and edges of the graph.
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            nodes: self.alive_nodes(),
            edges: self.alive_edges().iter().map(|edge| edge.pair()).collect(),
        }
    }

    /// Rebuilds a graph from a snapshot.
    ///
    /// Nodes `0..=max(nodes)` are created and the ids missing from the snapshot are killed, so the
    /// imported ids are kept as they are. Every edge is then added in order, duplicates included.
    ///
    /// Fails with [`Error::MalformedInput`] if the ids span more than [`MAX_SNAPSHOT_NODES`], or if
    /// an edge is a self-loop or references an id that is outside of the reconstructed range or
    /// missing from the node list.
    ///
    /// # Examples
    ///
    /// ```
    /// use disnet::graph::Graph;
    /// use disnet::snapshot::Snapshot;
    ///
    /// let snapshot = Snapshot {
    ///     nodes: vec![0, 2],
    ///     edges: vec![(0, 2)],
    /// };
    /// let graph = Graph::import_snapshot(&snapshot).unwrap();
    ///
    /// assert_eq!(graph.total_node_count(), 3);
    /// assert_eq!(graph.alive_nodes(), vec![0, 2]);
    /// assert_eq!(graph.export_snapshot(), snapshot);
    /// ```
    pub fn import_snapshot(snapshot: &Snapshot) -> Result<Graph> {
        let mut graph = Graph::new();

        let Some(&max) = snapshot.nodes.iter().max() else {
            return match snapshot.edges.first() {
                Some((a, b)) => Err(Error::MalformedInput(format!(
                    "edge ({a}, {b}) references a node but the node list is empty"
                ))),
                None => Ok(graph),
            };
        };

        let range = max
            .checked_add(1)
            .filter(|&range| range <= MAX_SNAPSHOT_NODES)
            .ok_or_else(|| {
                Error::MalformedInput(format!(
                    "node id {max} exceeds the supported range of {MAX_SNAPSHOT_NODES} ids"
                ))
            })?;

        let mut present = vec![false; range];
        for &id in &snapshot.nodes {
            present[id] = true;
        }

        for _ in 0..range {
            graph.add_node();
        }

        for (id, _) in present.iter().enumerate().filter(|(_, &listed)| !listed) {
            graph.kill_node(id);
        }

        for &(a, b) in &snapshot.edges {
            if a > max || b > max {
                return Err(Error::MalformedInput(format!(
                    "edge ({a}, {b}) references a node outside of 0..={max}"
                )));
            }

            graph
                .add_edge(a, b)
                .map_err(|e| Error::MalformedInput(e.to_string()))?;
        }

        Ok(graph)
    }
}
