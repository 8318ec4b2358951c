//! Conversions between [`Graph`] and [`petgraph`] graphs.

use std::collections::HashMap;

use petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};

use crate::{
    error::Result,
    graph::{Graph, NodeId},
};

impl Graph {
    /// Builds a graph from a petgraph undirected graph, every element alive.
    ///
    /// Node ids are assigned in `node_indices()` order and edges are added in
    /// `edge_references()` order. Weights are dropped. Fails with
    /// [`Error::InvalidReference`](crate::error::Error::InvalidReference) on a self-loop.
    ///
    /// # Examples
    ///
    /// ```
    /// use petgraph::graph::UnGraph;
    /// use disnet::graph::Graph;
    ///
    /// let external = UnGraph::<&str, ()>::from_edges([(0, 1), (1, 2)]);
    /// let graph = Graph::from_petgraph(&external).unwrap();
    ///
    /// assert_eq!(graph.alive_nodes(), vec![0, 1, 2]);
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn from_petgraph<N, E>(external: &UnGraph<N, E>) -> Result<Graph> {
        let mut graph = Graph::new();

        let ids: HashMap<NodeIndex, NodeId> = external
            .node_indices()
            .map(|index| (index, graph.add_node()))
            .collect();

        for edge in external.edge_references() {
            graph.add_edge(ids[&edge.source()], ids[&edge.target()])?;
        }

        Ok(graph)
    }

    /// Builds a petgraph graph of the visible subgraph, weighted by node id.
    ///
    /// Petgraph indices are compact, use the node weights to map back to ids.
    pub fn to_petgraph(&self) -> UnGraph<NodeId, ()> {
        let mut external = UnGraph::with_capacity(self.node_count(), self.edge_count());

        let indices: HashMap<NodeId, NodeIndex> = self
            .alive_nodes()
            .into_iter()
            .map(|id| (id, external.add_node(id)))
            .collect();

        for edge in self.alive_edges() {
            let (a, b) = edge.pair();
            external.add_edge(indices[&a], indices[&b], ());
        }

        external
    }
}

#[cfg(test)]
mod tests {
    use petgraph::algo::connected_components;

    use super::*;
    use crate::{edge::Edge, error::Error};

    #[test]
    fn from_petgraph() {
        let mut external = UnGraph::<char, u32>::new_undirected();
        let a = external.add_node('a');
        let b = external.add_node('b');
        let c = external.add_node('c');
        external.add_edge(c, a, 7);
        external.add_edge(a, b, 3);

        let graph = Graph::from_petgraph(&external).unwrap();

        assert_eq!(graph.alive_nodes(), vec![0, 1, 2]);
        assert_eq!(graph.alive_edges(), vec![Edge::new(2, 0), Edge::new(0, 1)]);
    }

    #[test]
    fn from_petgraph_self_loop() {
        let external = UnGraph::<(), ()>::from_edges([(0, 1), (1, 1)]);

        assert!(matches!(
            Graph::from_petgraph(&external),
            Err(Error::InvalidReference { from: 1, to: 1, .. })
        ));
    }

    #[test]
    fn to_petgraph() {
        let mut graph = graph!(5; [0, 1, 2], [3, 4]);
        graph.kill_node(1);

        let external = graph.to_petgraph();

        assert_eq!(external.node_count(), 4);
        assert_eq!(external.edge_count(), 1);
        assert_eq!(
            external.node_weights().copied().collect::<Vec<_>>(),
            vec![0, 2, 3, 4]
        );
        // {0}, {2}, {3, 4}
        assert_eq!(connected_components(&external), 3);
    }
}
