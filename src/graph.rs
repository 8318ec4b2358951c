//! A module for working with soft-delete graphs.

use std::{
    collections::{BTreeSet, VecDeque},
    fmt,
};

use nalgebra::{DMatrix, DVector};

use crate::{
    edge::Edge,
    error::{Error, Result},
};

/// A node handle. Ids are dense, assigned in creation order and never reused.
pub type NodeId = usize;

/// The storage position of an edge. Distinguishes edges that connect the same pair of nodes.
pub type EdgeIndex = usize;

/// Index into a [`CompactGraph`], i.e. a position among the alive nodes only.
pub(crate) type GraphIndex = u32;

/// An undirected graph whose nodes and edges are never physically removed.
///
/// Every node and edge ever created stays in storage, alongside a flag recording whether it is
/// still alive. Killing an element flips its flag, which makes removal O(1) for edges and O(E) for
/// nodes (incident edges are killed with them), and keeps every id stable for the lifetime of the
/// graph. The *visible* graph is made up of the alive nodes and the alive edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    /// One flag per created node, indexed by [`NodeId`].
    node_alive: Vec<bool>,
    /// Every edge ever created, in insertion order.
    edges: Vec<Edge<NodeId>>,
    /// One flag per stored edge, indexed by [`EdgeIndex`].
    edge_alive: Vec<bool>,
}

impl Graph {
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use disnet::graph::Graph;
    ///
    /// let graph = Graph::new();
    /// assert_eq!(graph.node_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new alive node and returns its id.
    pub fn add_node(&mut self) -> NodeId {
        self.node_alive.push(true);
        self.node_alive.len() - 1
    }

    /// Appends a new alive edge between two alive nodes and returns its storage index.
    ///
    /// Fails with [`Error::InvalidReference`] if either endpoint isn't a live node or if both
    /// endpoints are the same node. Parallel edges are stored as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use disnet::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// let (a, b) = (graph.add_node(), graph.add_node());
    ///
    /// assert_eq!(graph.add_edge(a, b).unwrap(), 0);
    /// assert!(graph.add_edge(a, 42).is_err());
    /// assert!(graph.add_edge(a, a).is_err());
    /// ```
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<EdgeIndex> {
        if a == b {
            return Err(Error::InvalidReference {
                from: a,
                to: b,
                reason: "self-loops are not permitted",
            });
        }

        if !self.is_node_alive(a) || !self.is_node_alive(b) {
            return Err(Error::InvalidReference {
                from: a,
                to: b,
                reason: "endpoint is not a live node",
            });
        }

        Ok(self.push_edge(a, b))
    }

    /// Appends an edge the caller knows to be valid, skipping the checks done by `add_edge`.
    pub(crate) fn push_edge(&mut self, a: NodeId, b: NodeId) -> EdgeIndex {
        debug_assert!(a != b && self.is_node_alive(a) && self.is_node_alive(b));

        self.edges.push(Edge::new(a, b));
        self.edge_alive.push(true);

        self.edges.len() - 1
    }

    /// Kills a node along with every stored edge that touches it.
    ///
    /// Out of range ids are ignored. Edges killed this way are never revived.
    ///
    /// # Examples
    ///
    /// ```
    /// use disnet::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// let (a, b) = (graph.add_node(), graph.add_node());
    /// graph.add_edge(a, b).unwrap();
    ///
    /// graph.kill_node(a);
    /// assert_eq!(graph.alive_nodes(), vec![b]);
    /// assert!(graph.alive_edges().is_empty());
    /// ```
    pub fn kill_node(&mut self, id: NodeId) {
        let Some(flag) = self.node_alive.get_mut(id) else {
            return;
        };
        *flag = false;

        for (edge, alive) in self.edges.iter().zip(self.edge_alive.iter_mut()) {
            if edge.contains(&id) {
                *alive = false;
            }
        }
    }

    /// Kills the edge stored at `index`. Out of range indices are ignored.
    pub fn kill_edge(&mut self, index: EdgeIndex) {
        if let Some(flag) = self.edge_alive.get_mut(index) {
            *flag = false;
        }
    }

    /// Returns whether `id` names a created node that is still alive.
    pub fn is_node_alive(&self, id: NodeId) -> bool {
        self.node_alive.get(id).copied().unwrap_or(false)
    }

    /// Returns whether `index` names a stored edge that is still alive.
    pub fn is_edge_alive(&self, index: EdgeIndex) -> bool {
        self.edge_alive.get(index).copied().unwrap_or(false)
    }

    /// Returns the stored edge at `index`, dead or alive.
    pub fn edge(&self, index: EdgeIndex) -> Option<&Edge<NodeId>> {
        self.edges.get(index)
    }

    /// Returns the alive nodes in creation order.
    pub fn alive_nodes(&self) -> Vec<NodeId> {
        self.node_alive
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the storage indices of the alive edges in insertion order.
    pub fn alive_edge_indices(&self) -> Vec<EdgeIndex> {
        self.edge_alive
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(index, _)| index)
            .collect()
    }

    /// Returns the alive edges in insertion order.
    pub fn alive_edges(&self) -> Vec<Edge<NodeId>> {
        self.edges
            .iter()
            .zip(&self.edge_alive)
            .filter(|(_, &alive)| alive)
            .map(|(edge, _)| *edge)
            .collect()
    }

    /// Returns the number of alive nodes.
    pub fn node_count(&self) -> usize {
        self.node_alive.iter().filter(|&&alive| alive).count()
    }

    /// Returns the number of alive edges.
    pub fn edge_count(&self) -> usize {
        self.edge_alive.iter().filter(|&&alive| alive).count()
    }

    /// Returns the number of nodes ever created, dead ones included.
    pub fn total_node_count(&self) -> usize {
        self.node_alive.len()
    }

    /// Returns the number of edges ever stored, dead ones included.
    pub fn total_edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the distinct alive neighbours of a node in ascending order.
    pub fn neighbours(&self, id: NodeId) -> Vec<NodeId> {
        let neighbours: BTreeSet<NodeId> = self
            .alive_edges()
            .iter()
            .filter_map(|edge| edge.opposite(&id).copied())
            .collect();

        neighbours.into_iter().collect()
    }

    /// Constructs the adjacency matrix of the visible graph.
    ///
    /// The matrix is sized to the total number of created nodes and indexed by [`NodeId`], so rows
    /// and columns of dead nodes are kept (all zeros) rather than compacted away.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use disnet::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// let (a, b, c) = (graph.add_node(), graph.add_node(), graph.add_node());
    /// graph.add_edge(a, b).unwrap();
    /// graph.add_edge(b, c).unwrap();
    /// graph.kill_node(c);
    ///
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     dmatrix![0.0, 1.0, 0.0;
    ///              1.0, 0.0, 0.0;
    ///              0.0, 0.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.total_node_count();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        // The graph is undirected so both triangles are written for each edge. Parallel edges
        // write the same cells, which keeps the matrix a 0/1 matrix.
        for edge in self.alive_edges() {
            let (i, j) = edge.pair();
            matrix[(i, j)] = 1.0;
            matrix[(j, i)] = 1.0;
        }

        matrix
    }

    /// Returns the degree of every node in the visible graph, indexed by [`NodeId`].
    ///
    /// Parallel edges count once.
    pub fn degree_vector(&self) -> DVector<f64> {
        let adjacency_matrix = self.adjacency_matrix();

        DVector::from_iterator(
            adjacency_matrix.nrows(),
            adjacency_matrix.row_iter().map(|row| row.sum()),
        )
    }

    /// Returns the alive edges as a `2 x E` matrix, sources on the first row and targets on the
    /// second.
    pub fn edge_index(&self) -> DMatrix<usize> {
        let edges = self.alive_edges();

        DMatrix::from_fn(2, edges.len(), |row, col| match row {
            0 => *edges[col].source(),
            _ => *edges[col].target(),
        })
    }

    /// Constructs the reachability matrix of the visible graph.
    ///
    /// Cell `(u, v)` is `1.0` iff a path joins `u` and `v` through alive nodes and edges. Alive
    /// nodes reach themselves, dead nodes reach nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use disnet::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// let (a, b, c) = (graph.add_node(), graph.add_node(), graph.add_node());
    /// graph.add_edge(a, b).unwrap();
    /// graph.add_edge(b, c).unwrap();
    /// assert_eq!(graph.reachability_matrix()[(a, c)], 1.0);
    ///
    /// graph.kill_node(b);
    /// assert_eq!(graph.reachability_matrix()[(a, c)], 0.0);
    /// assert_eq!(graph.reachability_matrix()[(a, a)], 1.0);
    /// ```
    pub fn reachability_matrix(&self) -> DMatrix<f64> {
        let n = self.total_node_count();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        let compact = self.compact();
        for source in 0..compact.len() {
            for target in compact.reachable_from(source) {
                matrix[(compact.nodes[source], compact.nodes[target])] = 1.0;
            }
        }

        matrix
    }

    /// Builds the visible graph re-indexed over the alive nodes only.
    pub(crate) fn compact(&self) -> CompactGraph {
        let nodes = self.alive_nodes();

        let mut position: Vec<Option<GraphIndex>> = vec![None; self.total_node_count()];
        for (i, &id) in nodes.iter().enumerate() {
            position[id] = Some(i as GraphIndex);
        }

        let mut neighbours: Vec<BTreeSet<GraphIndex>> = vec![BTreeSet::new(); nodes.len()];
        for edge in self.alive_edges() {
            let (a, b) = edge.pair();
            if let (Some(i), Some(j)) = (position[a], position[b]) {
                neighbours[i as usize].insert(j);
                neighbours[j as usize].insert(i);
            }
        }

        CompactGraph {
            nodes,
            position,
            indices: neighbours
                .into_iter()
                .map(|set| set.into_iter().collect())
                .collect(),
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "graph with {} nodes and {} edges",
            self.node_count(),
            self.edge_count()
        )
    }
}

/// The visible part of a [`Graph`] as deduplicated adjacency lists over `0..nodes.len()`.
///
/// This is the frozen, read-only view the shortest-path computations work on.
#[derive(Clone, Debug)]
pub(crate) struct CompactGraph {
    /// Compact index to node id.
    pub(crate) nodes: Vec<NodeId>,
    /// Node id to compact index, `None` for dead nodes.
    pub(crate) position: Vec<Option<GraphIndex>>,
    /// Sorted neighbour lists per compact index.
    pub(crate) indices: Vec<Vec<GraphIndex>>,
}

impl CompactGraph {
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Breadth-first search from `source`, returning every compact index reached (itself
    /// included) in discovery order.
    pub(crate) fn reachable_from(&self, source: usize) -> Vec<usize> {
        let mut visited = vec![false; self.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        visited[source] = true;
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            order.push(v);

            for &w in &self.indices[v] {
                let w = w as usize;
                if !visited[w] {
                    visited[w] = true;
                    queue.push_back(w);
                }
            }
        }

        order
    }
}
