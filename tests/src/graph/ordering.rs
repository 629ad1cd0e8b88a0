use serpent_graph::{CyclicGraphError, DirectedGraph};

/// Whether every node of `ordering` comes after all of its dependencies.
fn respects_arcs(graph: &DirectedGraph<&str>, ordering: &[&str]) -> bool {
    ordering.iter().enumerate().all(|(position, node)| {
        graph.dependencies_of(node).is_some_and(|dependencies| {
            dependencies
                .iter()
                .all(|dependency| ordering[..position].contains(dependency))
        })
    })
}

#[test]
fn test_add_node_is_idempotent() {
    let mut graph = DirectedGraph::new();
    graph.add_node("a");
    graph.add_arc("a", "b");
    graph.add_node("a");
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.dependencies_of(&"a").map(|deps| deps.len()), Some(1));
}

#[test]
fn test_add_arc_adds_both_ends() {
    let mut graph = DirectedGraph::new();
    graph.add_arc("app", "util");
    assert!(graph.contains(&"app"));
    assert!(graph.contains(&"util"));
    assert_eq!(graph.nodes().copied().collect::<Vec<_>>(), ["util", "app"]);
}

#[test]
fn test_ordering_respects_arcs() {
    let mut graph = DirectedGraph::new();
    graph.add_arc("app", "views");
    graph.add_arc("app", "models");
    graph.add_arc("views", "models");
    graph.add_arc("models", "db");
    graph.add_arc("views", "templates");
    let ordering = graph.topological_ordering().unwrap();
    assert_eq!(ordering.len(), graph.len());
    assert!(respects_arcs(&graph, &ordering));
}

#[test]
fn test_ties_follow_insertion_order() {
    let mut graph = DirectedGraph::new();
    graph.add_node("c");
    graph.add_node("a");
    graph.add_node("b");
    assert_eq!(graph.topological_ordering().unwrap(), ["c", "a", "b"]);

    graph.add_arc("c", "b");
    assert_eq!(graph.topological_ordering().unwrap(), ["a", "b", "c"]);
}

#[test]
fn test_empty_graph() {
    let graph: DirectedGraph<&str> = DirectedGraph::new();
    assert!(graph.is_empty());
    assert_eq!(graph.topological_ordering().unwrap(), Vec::<&str>::new());
}

#[test]
fn test_two_cycle_is_an_error() {
    let mut graph = DirectedGraph::new();
    graph.add_arc("a", "b");
    graph.add_arc("b", "a");
    let Err(CyclicGraphError { residual }) = graph.topological_ordering() else {
        panic!("expected a cycle");
    };
    assert_eq!(residual.len(), 2);
}

#[test]
fn test_acyclic_subset_orders() {
    let mut graph = DirectedGraph::new();
    graph.add_arc("a", "b");
    assert_eq!(graph.topological_ordering().unwrap(), ["b", "a"]);
}

#[test]
fn test_self_loop_is_a_cycle() {
    let mut graph = DirectedGraph::new();
    graph.add_arc("a", "a");
    assert!(graph.topological_ordering().is_err());
}

#[test]
fn test_ordering_leaves_graph_intact() {
    let mut graph = DirectedGraph::new();
    graph.add_arc("a", "b");
    graph.add_arc("b", "c");
    let before = graph.clone();
    graph.topological_ordering().unwrap();
    assert_eq!(graph, before);
    assert_eq!(graph.topological_ordering().unwrap(), ["c", "b", "a"]);
}

#[test]
fn test_residual_keeps_blocked_nodes() {
    let mut graph = DirectedGraph::new();
    graph.add_arc("leaf", "base");
    graph.add_arc("x", "y");
    graph.add_arc("y", "z");
    graph.add_arc("z", "x");
    graph.add_arc("top", "x");
    let err = graph.topological_ordering().unwrap_err();

    let mut blocked: Vec<&str> = err.nodes().copied().collect();
    blocked.sort_unstable();
    assert_eq!(blocked, ["top", "x", "y", "z"]);
    assert!(err.to_string().contains("cycle"));
}
