use echonet::algo::crossing::{ProtectedEdges, crossing_pairs, find_crossing, repair_crossings};
use echonet::config::RepairConfig;
use echonet::{Edge, Graph, NodeId, NodeKind, Point, XorShift64Star};

/// Unit square with every side and both diagonals, plus an isolated node near one corner.
fn square_with_diagonals() -> (Graph, [NodeId; 5]) {
    let mut g = Graph::new(200.0, 200.0);
    let a = g.add_node("a", NodeKind::Hub, Point::new(0.0, 0.0));
    let b = g.add_node("b", NodeKind::Data, Point::new(100.0, 0.0));
    let c = g.add_node("c", NodeKind::Data, Point::new(0.0, 100.0));
    let d = g.add_node("d", NodeKind::Data, Point::new(100.0, 100.0));
    let e = g.add_node("e", NodeKind::Data, Point::new(50.0, 50.0));
    for (x, y) in [(a, b), (b, d), (d, c), (c, a), (a, d), (b, c)] {
        assert!(g.connect(x, y));
    }
    (g, [a, b, c, d, e])
}

#[test]
fn one_diagonal_goes_and_the_cycle_survives() {
    for seed in 1..16 {
        let (mut g, [a, b, c, d, _]) = square_with_diagonals();
        assert_eq!(crossing_pairs(&g), vec![(Edge::new(a, d), Edge::new(b, c))]);

        let mut rng = XorShift64Star::new(seed);
        let mut protected = ProtectedEdges::default();
        let stats = repair_crossings(&mut g, &RepairConfig::default(), 3, &mut protected, &mut rng);

        assert_eq!(stats.iterations, 1);
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.restored, 0);
        assert_eq!(stats.unresolved, 0);
        assert!(!stats.exhausted);
        assert!(g.has_edge(a, d) ^ g.has_edge(b, c));
        for (x, y) in [(a, b), (b, d), (d, c), (c, a)] {
            assert!(g.has_edge(x, y));
        }
        assert!(crossing_pairs(&g).is_empty());
        assert!(g.ids().all(|id| g.degree(id) <= 3));
        assert!(protected.is_empty());
        g.assert_symmetric();
    }
}

#[test]
fn both_diagonal_choices_occur_across_seeds() {
    let mut kept_ad = false;
    let mut kept_bc = false;
    for seed in 1..64 {
        let (mut g, [a, b, c, d, _]) = square_with_diagonals();
        let mut rng = XorShift64Star::new(seed);
        let mut protected = ProtectedEdges::default();
        repair_crossings(&mut g, &RepairConfig::default(), 3, &mut protected, &mut rng);
        kept_ad |= g.has_edge(a, d);
        kept_bc |= g.has_edge(b, c);
    }
    assert!(kept_ad && kept_bc);
}

#[test]
fn crossing_free_graph_is_untouched() {
    let (mut g, [a, _, _, d, _]) = square_with_diagonals();
    g.disconnect(a, d);
    let before = g.edges();

    let mut rng = XorShift64Star::new(5);
    let mut protected = ProtectedEdges::default();
    let stats = repair_crossings(&mut g, &RepairConfig::default(), 3, &mut protected, &mut rng);

    assert_eq!(stats.iterations, 0);
    assert_eq!(stats.removed, 0);
    assert_eq!(g.edges(), before);
}

#[test]
fn bridges_are_restored_and_protected() {
    // `a-b` crosses `c-d` and the graph is a path, so every edge is a bridge. A degree cap of
    // one leaves no reroute target.
    let mut g = Graph::new(400.0, 400.0);
    let a = g.add_node("a", NodeKind::Hub, Point::new(0.0, 100.0));
    let b = g.add_node("b", NodeKind::Data, Point::new(200.0, 100.0));
    let c = g.add_node("c", NodeKind::Data, Point::new(100.0, 0.0));
    let d = g.add_node("d", NodeKind::Data, Point::new(100.0, 200.0));
    g.connect(a, b);
    g.connect(c, d);
    g.connect(b, d);
    let before = g.edges();

    let mut rng = XorShift64Star::new(9);
    let mut protected = ProtectedEdges::default();
    let stats = repair_crossings(&mut g, &RepairConfig::default(), 1, &mut protected, &mut rng);

    assert!(g.is_connected());
    assert_eq!(stats.restored, 2);
    assert_eq!(stats.removed, 0);
    assert_eq!(stats.unresolved, 1);
    assert!(!stats.exhausted);
    assert!(protected.contains(&Edge::new(a, b)));
    assert!(protected.contains(&Edge::new(c, d)));
    let mut after = g.edges();
    let mut expected = before;
    after.sort();
    expected.sort();
    assert_eq!(after, expected);
}

#[test]
fn pairs_of_protected_edges_are_skipped() {
    let (g, [a, b, c, d, _]) = square_with_diagonals();
    let edges = g.edges();
    let mut protected = ProtectedEdges::default();
    protected.insert(Edge::new(a, d));
    assert_eq!(
        find_crossing(&g, &edges, &protected),
        Some((Edge::new(a, d), Edge::new(b, c)))
    );
    protected.insert(Edge::new(b, c));
    assert_eq!(find_crossing(&g, &edges, &protected), None);
}

#[test]
fn protected_edge_is_never_the_one_removed() {
    for seed in 1..16 {
        let (mut g, [a, b, c, d, _]) = square_with_diagonals();
        let mut protected = ProtectedEdges::default();
        protected.insert(Edge::new(b, c));
        let mut rng = XorShift64Star::new(seed);
        let stats = repair_crossings(&mut g, &RepairConfig::default(), 3, &mut protected, &mut rng);
        assert_eq!(stats.removed, 1);
        assert!(g.has_edge(b, c));
        assert!(!g.has_edge(a, d));
    }
}

#[test]
fn zero_iteration_budget_reports_exhaustion() {
    let (mut g, _) = square_with_diagonals();
    let config = RepairConfig {
        max_iterations: 0,
        ..RepairConfig::default()
    };
    let mut rng = XorShift64Star::new(1);
    let mut protected = ProtectedEdges::default();
    let stats = repair_crossings(&mut g, &config, 3, &mut protected, &mut rng);
    assert!(stats.exhausted);
    assert_eq!(stats.unresolved, 1);
    assert_eq!(g.edge_count(), 6);
}
