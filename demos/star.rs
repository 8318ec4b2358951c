use disnet::{
    centrality::{Betweenness, Centrality, Degree},
    disintegration::{Disintegration, NodeDisintegration, Strategy},
    graph::{Graph, NodeId},
};

// Two stars whose hubs are bridged by a single edge.
fn twin_stars(leaves: usize) -> (Graph, NodeId, NodeId) {
    let mut graph = Graph::new();

    let star = |graph: &mut Graph| {
        let hub = graph.add_node();
        for _ in 0..leaves {
            let leaf = graph.add_node();
            graph.add_edge(hub, leaf).expect("hub and leaf are alive");
        }
        hub
    };

    let left = star(&mut graph);
    let right = star(&mut graph);
    graph
        .add_edge(left, right)
        .expect("both hubs are alive");

    (graph, left, right)
}

fn main() {
    const LEAVES: usize = 4;
    let (mut graph, left, right) = twin_stars(LEAVES);

    println!("\nBuilt {graph}, hubs {left} and {right}");
    println!("Degree ranking: {:?}", Degree.descending(&graph));
    println!(
        "Betweenness ranking: {:?}",
        Betweenness::default().descending(&graph)
    );
    println!("Reachability matrix: {}", graph.reachability_matrix());

    // Remove the two most central nodes, one at a time.
    println!("Disintegrating by maximum betweenness...");
    let graph = NodeDisintegration::new(&mut graph, Betweenness::default(), Strategy::Max)
        .run(2)
        .expect("budget is non-negative");

    println!(
        "Left with {graph}, alive nodes: {:?}",
        graph.alive_nodes()
    );
    println!("Reachability matrix: {}", graph.reachability_matrix());
}
