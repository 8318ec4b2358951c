//! A module for performing the multi-threaded computation of node and edge betweenness.

use std::{
    collections::{HashMap, VecDeque},
    panic,
    sync::Arc,
    thread,
    time::Instant,
};

use tracing::debug;

use crate::graph::GraphIndex;

pub const MIN_NUM_THREADS: usize = 1;
pub const MAX_NUM_THREADS: usize = 128;

/// An unordered pair of compact indices, stored `(low, high)`.
pub type IndexPair = (usize, usize);

/// The shortest path DAG rooted at one source vertex.
struct ShortestPaths {
    /// Vertices in non-decreasing distance from the source.
    stack: Vec<usize>,
    /// Predecessors of each vertex on the shortest paths from the source.
    predecessors: Vec<Vec<usize>>,
    /// Number of shortest paths from the source to each vertex.
    sigma: Vec<f64>,
}

/// This is an implementation of Ulrik Brandes's
/// A Faster Algorithm for Betweenness Centrality
/// http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf
/// page 10, "Algorithm 1: Betweenness centrality in unweighted graphs", single-source stage.
fn shortest_paths(index: usize, indices: &[Vec<GraphIndex>]) -> ShortestPaths {
    let num_nodes = indices.len();

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<usize> = vec![num_nodes + 1; num_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut stack: Vec<usize> = Vec::with_capacity(num_nodes);

    sigma[index] = 1.0;
    distance[index] = 0;
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);

        for w in &indices[v] {
            let w = *w as usize;
            if distance[w] == num_nodes + 1 {
                distance[w] = distance[v] + 1;
                queue.push_back(w);
            }
            if distance[w] == distance[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    ShortestPaths {
        stack,
        predecessors,
        sigma,
    }
}

/// Accumulates the dependencies of `index` onto every other vertex.
fn betweenness_for_node(index: usize, indices: &[Vec<GraphIndex>], betweenness_count: &mut Vec<f64>) {
    let ShortestPaths {
        mut stack,
        predecessors,
        sigma,
    } = shortest_paths(index, indices);
    let mut delta: Vec<f64> = vec![0.0; indices.len()];

    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != index {
            betweenness_count[w] += delta[w];
        }
    }
}

/// Accumulates the dependencies of `index` onto every edge of its shortest path DAG.
fn betweenness_for_edges(
    index: usize,
    indices: &[Vec<GraphIndex>],
    betweenness_count: &mut HashMap<IndexPair, f64>,
) {
    let ShortestPaths {
        mut stack,
        predecessors,
        sigma,
    } = shortest_paths(index, indices);
    let mut delta: Vec<f64> = vec![0.0; indices.len()];

    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            let c = sigma[v] / sigma[w] * (1.0 + delta[w]);
            *betweenness_count.entry(ordered(v, w)).or_insert(0.0) += c;
            delta[v] += c;
        }
    }
}

fn ordered(a: usize, b: usize) -> IndexPair {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Spawns the worker threads, each one processing every `num_threads`-th source vertex starting
/// at its own offset, and returns their partial results in spawn order.
///
/// Sources are partitioned statically so the floating point summation order, and therefore the
/// result, only depends on the thread count.
fn run_workers<T: Send + 'static>(
    indices: Vec<Vec<GraphIndex>>,
    num_threads: usize,
    init: fn(usize) -> T,
    task: fn(usize, &[Vec<GraphIndex>], &mut T),
) -> Vec<T> {
    let num_threads = num_threads.clamp(MIN_NUM_THREADS, MAX_NUM_THREADS);
    let wrapped_indices = Arc::new(indices);

    let handles: Vec<_> = (0..num_threads)
        .map(|offset| {
            let aindices = Arc::clone(&wrapped_indices);
            thread::spawn(move || {
                // Each worker thread keeps its own partial sums, these are returned when the
                // thread finishes and then summed by the caller.
                let mut partial = init(aindices.len());
                for index in (offset..aindices.len()).step_by(num_threads) {
                    task(index, &aindices, &mut partial);
                }
                partial
            })
        })
        .collect();

    handles
        .into_iter()
        .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
        .collect()
}

/// Computes the betweenness of every vertex of the compact graph described by `indices`.
///
/// When normalizing, values are divided by `(n - 1)(n - 2)`; otherwise every pair is counted twice
/// by the single-source passes so the raw sums are halved.
pub fn compute_betweenness(
    indices: Vec<Vec<GraphIndex>>,
    num_threads: usize,
    normalize: bool,
) -> Vec<f64> {
    let start = Instant::now();
    let num_nodes = indices.len();

    let divisor: f64 = match (normalize, num_nodes) {
        (true, n) if n > 2 => ((n - 1) * (n - 2)) as f64,
        (true, _) => 1.0,
        (false, _) => 2.0,
    };

    let mut betweenness_count: Vec<f64> = vec![0.0; num_nodes];
    for partial in run_workers(
        indices,
        num_threads,
        |n| vec![0.0; n],
        betweenness_for_node,
    ) {
        for (total, b) in betweenness_count.iter_mut().zip(partial) {
            *total += b / divisor;
        }
    }

    debug!(num_nodes, num_threads, elapsed = ?start.elapsed(), "computed betweenness");

    betweenness_count
}

/// Computes the betweenness of every edge of the compact graph described by `indices`, keyed by
/// the `(low, high)` pair of its endpoints.
///
/// When normalizing, values are divided by `n(n - 1)`; otherwise the raw sums are halved.
pub fn compute_edge_betweenness(
    indices: Vec<Vec<GraphIndex>>,
    num_threads: usize,
    normalize: bool,
) -> HashMap<IndexPair, f64> {
    let start = Instant::now();
    let num_nodes = indices.len();

    let divisor: f64 = match (normalize, num_nodes) {
        (true, n) if n > 1 => (n * (n - 1)) as f64,
        (true, _) => 1.0,
        (false, _) => 2.0,
    };

    let mut betweenness_count: HashMap<IndexPair, f64> = HashMap::new();
    for partial in run_workers(
        indices,
        num_threads,
        |_| HashMap::new(),
        betweenness_for_edges,
    ) {
        for (pair, b) in partial {
            *betweenness_count.entry(pair).or_insert(0.0) += b / divisor;
        }
    }

    debug!(num_nodes, num_threads, elapsed = ?start.elapsed(), "computed edge betweenness");

    betweenness_count
}
