//! A module for disintegrating graphs.
//!
//! A disintegration repeatedly asks a [`Centrality`] measure for the node (or edge) picked by a
//! [`Strategy`] and kills it, until the removal budget is spent or nothing is left alive. The
//! ranking is recomputed from the current state of the graph before every selection.
//!
//! ```
//! use disnet::centrality::Degree;
//! use disnet::disintegration::{Disintegration, NodeDisintegration, Strategy};
//! use disnet::graph::Graph;
//!
//! // A star: node 0 is connected to 1, 2 and 3.
//! let mut graph = Graph::new();
//! let hub = graph.add_node();
//! for _ in 0..3 {
//!     let leaf = graph.add_node();
//!     graph.add_edge(hub, leaf).unwrap();
//! }
//!
//! let graph = NodeDisintegration::new(&mut graph, Degree, Strategy::Max)
//!     .run(1)
//!     .unwrap();
//!
//! assert_eq!(graph.alive_nodes(), vec![1, 2, 3]);
//! assert!(graph.alive_edges().is_empty());
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    centrality::Centrality,
    error::{Error, Result},
    graph::{EdgeIndex, Graph, NodeId},
};

/// The selection policy applied to a ranking on every iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Remove the highest ranked element.
    Max,
    /// Remove the lowest ranked element.
    Min,
    /// Remove the element ranked closest to the mean score.
    Mean,
}

impl Strategy {
    /// Selects the elements to remove next from the current state of `graph`.
    pub fn select<C: Centrality>(&self, centrality: &C, graph: &Graph) -> Vec<C::Element> {
        match self {
            Strategy::Max => centrality.maximum(graph),
            Strategy::Min => centrality.minimum(graph),
            Strategy::Mean => centrality.mean(graph),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Max => "max",
            Strategy::Min => "min",
            Strategy::Mean => "mean",
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    /// Parses a strategy name, case-insensitively. `maximum` and `minimum` are accepted too.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "max" | "maximum" => Ok(Strategy::Max),
            "min" | "minimum" => Ok(Strategy::Min),
            "mean" => Ok(Strategy::Mean),
            _ => Err(Error::InvalidStrategy(s.to_owned())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A budget-bounded, greedy removal of ranked elements from a graph.
///
/// Implementors only describe their target element type; the removal loop is shared.
pub trait Disintegration<'g>: Sized {
    type Element: Copy + fmt::Debug;

    /// Number of elements of the target type still alive.
    fn alive_count(&self) -> usize;

    /// The next batch of elements to remove, per the strategy.
    fn select(&self) -> Vec<Self::Element>;

    fn kill(&mut self, element: Self::Element);

    /// Kills every alive element of the target type.
    fn kill_all(&mut self);

    /// Releases the graph.
    fn into_graph(self) -> &'g mut Graph;

    /// Removes `cost` elements, or every alive element if `cost` exceeds their number, and
    /// returns the mutated graph.
    ///
    /// Fails with [`Error::InvalidBudget`] if `cost` is negative, in which case the graph is left
    /// untouched.
    fn run(mut self, cost: i64) -> Result<&'g mut Graph> {
        if cost < 0 {
            return Err(Error::InvalidBudget(cost));
        }

        let mut cost = usize::try_from(cost).unwrap_or(usize::MAX);
        let alive = self.alive_count();
        debug!(cost, alive, "starting disintegration");

        if cost > alive {
            self.kill_all();
            debug!(removed = alive, "disintegration drained the graph");

            return Ok(self.into_graph());
        }

        let mut removed = 0;
        while cost > 0 {
            let selected = self.select();
            if selected.is_empty() {
                break;
            }

            for element in selected {
                if cost == 0 {
                    break;
                }

                trace!(?element, remaining = cost, "removing element");
                self.kill(element);
                removed += 1;
                cost -= 1;
            }
        }

        if cost == 0 {
            debug!(removed, "disintegration exhausted its budget");
        } else {
            debug!(removed, "disintegration drained the graph");
        }

        Ok(self.into_graph())
    }
}

/// Disintegrates a graph by killing nodes, and with them their edges.
#[derive(Debug)]
pub struct NodeDisintegration<'g, C> {
    graph: &'g mut Graph,
    centrality: C,
    strategy: Strategy,
}

impl<'g, C: Centrality<Element = NodeId>> NodeDisintegration<'g, C> {
    pub fn new(graph: &'g mut Graph, centrality: C, strategy: Strategy) -> Self {
        Self {
            graph,
            centrality,
            strategy,
        }
    }

    /// Like [`NodeDisintegration::new`], with the strategy given by name.
    ///
    /// Fails with [`Error::InvalidStrategy`] if the name isn't recognised.
    pub fn with_strategy_name(graph: &'g mut Graph, centrality: C, name: &str) -> Result<Self> {
        Ok(Self::new(graph, centrality, name.parse()?))
    }
}

impl<'g, C: Centrality<Element = NodeId>> Disintegration<'g> for NodeDisintegration<'g, C> {
    type Element = NodeId;

    fn alive_count(&self) -> usize {
        self.graph.node_count()
    }

    fn select(&self) -> Vec<NodeId> {
        self.strategy.select(&self.centrality, self.graph)
    }

    fn kill(&mut self, id: NodeId) {
        self.graph.kill_node(id)
    }

    fn kill_all(&mut self) {
        for id in self.graph.alive_nodes() {
            self.graph.kill_node(id);
        }
    }

    fn into_graph(self) -> &'g mut Graph {
        self.graph
    }
}

/// Disintegrates a graph by killing edges; nodes stay alive.
///
/// Parallel edges are separate elements: each copy is ranked with the score of its node pair and
/// costs one unit of budget, so cutting a doubled link takes two removals.
#[derive(Debug)]
pub struct EdgeDisintegration<'g, C> {
    graph: &'g mut Graph,
    centrality: C,
    strategy: Strategy,
}

impl<'g, C: Centrality<Element = EdgeIndex>> EdgeDisintegration<'g, C> {
    pub fn new(graph: &'g mut Graph, centrality: C, strategy: Strategy) -> Self {
        Self {
            graph,
            centrality,
            strategy,
        }
    }

    /// Like [`EdgeDisintegration::new`], with the strategy given by name.
    pub fn with_strategy_name(graph: &'g mut Graph, centrality: C, name: &str) -> Result<Self> {
        Ok(Self::new(graph, centrality, name.parse()?))
    }
}

impl<'g, C: Centrality<Element = EdgeIndex>> Disintegration<'g> for EdgeDisintegration<'g, C> {
    type Element = EdgeIndex;

    fn alive_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn select(&self) -> Vec<EdgeIndex> {
        self.strategy.select(&self.centrality, self.graph)
    }

    fn kill(&mut self, index: EdgeIndex) {
        self.graph.kill_edge(index)
    }

    fn kill_all(&mut self) {
        for index in self.graph.alive_edge_indices() {
            self.graph.kill_edge(index);
        }
    }

    fn into_graph(self) -> &'g mut Graph {
        self.graph
    }
}
