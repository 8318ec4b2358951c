use disnet::{
    centrality::{Betweenness, Centrality, Degree, EdgeBetweenness, SemiLocal},
    disintegration::{Disintegration, EdgeDisintegration, NodeDisintegration, Strategy},
    error::Error,
    graph::Graph,
    snapshot::Snapshot,
};

fn star() -> Graph {
    Graph::import_snapshot(&Snapshot {
        nodes: vec![0, 1, 2, 3],
        edges: vec![(0, 1), (0, 2), (0, 3)],
    })
    .unwrap()
}

#[test]
fn star_loses_its_hub_first() {
    let mut graph = star();

    let graph = NodeDisintegration::new(&mut graph, Degree, Strategy::Max)
        .run(1)
        .unwrap();

    assert_eq!(graph.alive_nodes(), vec![1, 2, 3]);
    assert!(graph.alive_edges().is_empty());
}

#[test]
fn star_drained_by_a_large_budget() {
    let mut graph = star();

    let graph = NodeDisintegration::with_strategy_name(&mut graph, Degree, "max")
        .unwrap()
        .run(10)
        .unwrap();

    assert!(graph.alive_nodes().is_empty());
    assert!(graph.alive_edges().is_empty());
    assert_eq!(graph.total_node_count(), 4);
}

#[test]
fn empty_graph_is_a_no_op() {
    let mut graph = Graph::new();

    let graph = NodeDisintegration::new(&mut graph, Degree, Strategy::Max)
        .run(5)
        .unwrap();

    assert_eq!(*graph, Graph::new());
}

#[test]
fn edge_to_a_missing_node() {
    let mut graph = Graph::new();
    let a = graph.add_node();

    assert!(matches!(
        graph.add_edge(a, 1),
        Err(Error::InvalidReference { from: 0, to: 1, .. })
    ));
    assert_eq!(graph.total_edge_count(), 0);
}

#[test]
fn negative_budget() {
    let mut graph = star();

    let result = NodeDisintegration::new(&mut graph, Degree, Strategy::Max).run(-1);

    assert!(matches!(result, Err(Error::InvalidBudget(-1))));
    assert_eq!(graph, star());
}

#[test]
fn unknown_strategy_name() {
    let mut graph = star();

    let result =
        EdgeDisintegration::with_strategy_name(&mut graph, EdgeBetweenness::default(), "median");

    assert!(matches!(result, Err(Error::InvalidStrategy(name)) if name == "median"));
}

#[test]
fn bridge_edge_goes_first() {
    // Two triangles joined by the (2, 3) bridge, edge index 6.
    let mut graph = Graph::import_snapshot(&Snapshot {
        nodes: (0..6).collect(),
        edges: vec![(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)],
    })
    .unwrap();

    assert_eq!(EdgeBetweenness::default().maximum(&graph), vec![6]);

    let graph = EdgeDisintegration::new(&mut graph, EdgeBetweenness::default(), Strategy::Max)
        .run(1)
        .unwrap();

    assert!(!graph.is_edge_alive(6));
    assert_eq!(graph.reachability_matrix()[(0, 5)], 0.0);
    assert_eq!(graph.node_count(), 6);
}

#[test]
fn centralities_agree_on_a_hub() {
    // A hub with three branches of two nodes each.
    let graph = Graph::import_snapshot(&Snapshot {
        nodes: (0..7).collect(),
        edges: vec![(0, 1), (0, 2), (0, 3), (1, 4), (2, 5), (3, 6)],
    })
    .unwrap();

    assert_eq!(Degree.maximum(&graph), vec![0]);
    assert_eq!(Betweenness::default().maximum(&graph), vec![0]);
    assert_eq!(SemiLocal.maximum(&graph), vec![0]);

    let threaded = Betweenness {
        num_threads: 4,
        ..Default::default()
    };
    let sequential = Betweenness::default().score_map(&graph);
    for (id, score) in threaded.score_map(&graph) {
        assert!((score - sequential[&id]).abs() < 1e-12);
    }
}

#[test]
fn rankings_follow_kills() {
    let mut graph = star();
    let ranking = Degree;

    assert_eq!(ranking.maximum(&graph), vec![0]);

    graph.kill_node(0);

    // Every survivor is now isolated, the tie goes to the lowest id.
    assert_eq!(ranking.maximum(&graph), vec![1]);
    assert_eq!(ranking.descending(&graph), vec![1, 2, 3]);
}
