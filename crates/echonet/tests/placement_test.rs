use echonet::algo::placement::{HUB_NAME, place_nodes, random_node_count};
use echonet::config::PlacementConfig;
use echonet::geom::distance;
use echonet::{NodeKind, XorShift64Star};
use std::f64::consts::TAU;

#[test]
fn zero_count_places_only_the_hub() {
    let mut rng = XorShift64Star::new(1);
    let (g, stats) = place_nodes(1200.0, 800.0, 0, &PlacementConfig::default(), &mut rng);
    assert_eq!(g.len(), 1);
    assert_eq!(stats.placed, 0);
    let hub = g.hub().unwrap();
    assert_eq!(g.node(hub).name(), HUB_NAME);
    assert_eq!(g.node(hub).kind, NodeKind::Hub);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn node_count_stays_in_range() {
    let config = PlacementConfig::default();
    let mut rng = XorShift64Star::new(77);
    let mut seen = Vec::new();
    for _ in 0..500 {
        let n = random_node_count(&config, &mut rng);
        assert!((25..=35).contains(&n), "{n}");
        seen.push(n);
    }
    assert!(seen.contains(&25));
    assert!(seen.contains(&35));

    let fixed = PlacementConfig {
        node_count: Some(3),
        ..config
    };
    assert_eq!(random_node_count(&fixed, &mut rng), 3);
}

#[test]
fn nodes_are_named_and_kept_inside_the_margin() {
    let config = PlacementConfig::default();
    for seed in 1..20 {
        let mut rng = XorShift64Star::new(seed);
        let (g, stats) = place_nodes(1200.0, 800.0, 30, &config, &mut rng);
        assert_eq!(g.len(), 31);
        assert_eq!(stats.placed, 30);

        let names: Vec<&str> = g.nodes().map(|n| n.name()).collect();
        assert_eq!(names[0], HUB_NAME);
        for (i, name) in names[1..].iter().enumerate() {
            assert_eq!(*name, format!("node{i}"));
        }
        assert_eq!(
            g.nodes().filter(|n| n.kind == NodeKind::Hub).count(),
            1
        );

        for n in g.nodes() {
            assert!(n.pos.x >= config.margin && n.pos.x <= 1200.0 - config.margin);
            assert!(n.pos.y >= config.margin && n.pos.y <= 800.0 - config.margin);
            assert!((10..=50).contains(&n.state.resistance));
            assert!((0.0..TAU).contains(&n.state.random_phase));
            assert_eq!(n.state.max_shield_health, 100.0);
            assert!(n.state.program.is_none());
        }
    }
}

#[test]
fn separation_holds_unless_placement_fell_back() {
    let config = PlacementConfig::default();
    for seed in 1..20 {
        let mut rng = XorShift64Star::new(seed);
        let (g, stats) = place_nodes(1200.0, 800.0, 35, &config, &mut rng);
        let nodes: Vec<_> = g.nodes().collect();
        let crowded = nodes
            .iter()
            .enumerate()
            .flat_map(|(i, a)| nodes[i + 1..].iter().map(move |b| distance(a.pos, b.pos)))
            .filter(|d| *d < config.min_separation)
            .count();
        assert!(crowded <= stats.fallbacks * g.len(), "seed {seed}");
        if stats.fallbacks == 0 {
            assert_eq!(crowded, 0);
        }
    }
}

#[test]
fn packed_canvas_falls_back_instead_of_looping() {
    let config = PlacementConfig {
        margin: 10.0,
        min_separation: 500.0,
        max_tries: 5,
        ..PlacementConfig::default()
    };
    let mut rng = XorShift64Star::new(3);
    let (g, stats) = place_nodes(100.0, 100.0, 10, &config, &mut rng);
    assert_eq!(g.len(), 11);
    assert_eq!(stats.fallbacks, 10);
}

#[test]
fn same_seed_places_identically() {
    let config = PlacementConfig::default();
    let (a, _) = place_nodes(1200.0, 800.0, 30, &config, &mut XorShift64Star::new(5));
    let (b, _) = place_nodes(1200.0, 800.0, 30, &config, &mut XorShift64Star::new(5));
    let pa: Vec<_> = a.nodes().map(|n| (n.pos, n.state.resistance)).collect();
    let pb: Vec<_> = b.nodes().map(|n| (n.pos, n.state.resistance)).collect();
    assert_eq!(pa, pb);
}
