//! Disnet is a small toolkit for studying how undirected networks fall apart when their most (or
//! least) central elements are removed one at a time.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure, an undirected graph
//! whose nodes and edges are soft-deleted: killing an element hides it from every measurement
//! while its id stays valid. Centralities rank the visible elements and a
//! [`Disintegration`](disintegration::Disintegration) engine repeatedly kills the element selected
//! by a [`Strategy`](disintegration::Strategy) until its budget runs out.
//!
//! ```rust
//! use disnet::centrality::{Betweenness, Centrality};
//! use disnet::disintegration::{Disintegration, NodeDisintegration, Strategy};
//! use disnet::graph::Graph;
//!
//! // Construct a path 0 - 1 - 2 - 3 - 4.
//! let mut graph = Graph::new();
//! for _ in 0..5 {
//!     graph.add_node();
//! }
//! for i in 0..4 {
//!     graph.add_edge(i, i + 1).unwrap();
//! }
//!
//! // The middle of the path is the most central node...
//! assert_eq!(Betweenness::default().maximum(&graph), vec![2]);
//!
//! // ...so removing it first splits the network in two.
//! let graph = NodeDisintegration::new(&mut graph, Betweenness::default(), Strategy::Max)
//!     .run(1)
//!     .unwrap();
//!
//! assert_eq!(graph.alive_nodes(), vec![0, 1, 3, 4]);
//! assert_eq!(graph.edge_count(), 2);
//!
//! // Matrices can be pretty printed.
//! println!("{}", graph.reachability_matrix());
//! ```

/// Builds a graph of `$n` alive nodes, adding an edge between consecutive ids of every path.
#[cfg(test)]
macro_rules! graph {
    ($n:expr; $($path:expr),* $(,)?) => {{
        let mut graph = $crate::graph::Graph::new();
        for _ in 0..$n {
            graph.add_node();
        }
        $(
            let mut iter = $path.into_iter().peekable();
            while let (Some(a), Some(&b)) = (iter.next(), iter.peek()) {
                graph.add_edge(a, b).unwrap();
            }
        )*
        graph
    }};
}

mod betweenness;
pub mod centrality;
pub mod convert;
pub mod dataset;
pub mod disintegration;
pub mod edge;
pub mod error;
pub mod graph;
pub mod random;
pub mod render;
pub mod snapshot;
