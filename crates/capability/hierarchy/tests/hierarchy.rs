use domain::{MetricKey, Space, SpaceId, ThresholdEntry};
use envwatch_hierarchy::{HierarchyError, SpaceTree};

fn id(value: &str) -> SpaceId {
    SpaceId::from(value)
}

fn campus() -> SpaceTree {
    SpaceTree::from_spaces([
        Space::new("building", None)
            .with_children(["floor-1", "floor-2"])
            .with_threshold("CO2cal", ThresholdEntry::new(0.0, 1000.0))
            .with_threshold("Noise", ThresholdEntry::new(0.0, 85.0)),
        Space::new("floor-1", Some(id("building"))).with_children(["room-101", "room-102"]),
        Space::new("floor-2", Some(id("building")))
            .with_children(["room-201"])
            .with_threshold("CO2cal", ThresholdEntry::new(0.0, 800.0)),
        Space::new("room-101", Some(id("floor-1"))).with_children(["desk-a"]),
        Space::new("room-102", Some(id("floor-1"))),
        Space::new("room-201", Some(id("floor-2"))),
        Space::new("desk-a", Some(id("room-101"))),
    ])
    .expect("tree")
}

#[test]
fn descendants_include_self_and_nested_spaces() {
    let tree = campus();
    let set = tree.descendants(&id("floor-1")).expect("descendants");
    let names: Vec<&str> = set.iter().map(|space| space.as_str()).collect();
    assert_eq!(names, vec!["desk-a", "floor-1", "room-101", "room-102"]);

    let leaf = tree.descendants(&id("room-102")).expect("leaf");
    assert_eq!(leaf.len(), 1);
}

#[test]
fn descendants_of_unknown_space_fail() {
    let tree = campus();
    let err = tree.descendants(&id("nowhere")).expect_err("unknown");
    assert_eq!(err, HierarchyError::UnknownSpace(id("nowhere")));
}

#[test]
fn descendants_terminate_on_cycle() {
    let tree = SpaceTree::from_spaces([
        Space::new("a", None).with_children(["b"]),
        Space::new("b", Some(id("a"))).with_children(["c"]),
        Space::new("c", Some(id("b"))).with_children(["a"]),
    ])
    .expect("tree");
    let err = tree.descendants(&id("a")).expect_err("cycle");
    assert!(matches!(err, HierarchyError::MalformedHierarchy { .. }));
}

#[test]
fn leaf_inherits_root_thresholds_through_unconfigured_levels() {
    let tree = campus();
    let resolver = tree.resolver();
    let leaf = resolver.effective_config(&id("desk-a")).expect("leaf");
    let root = resolver.effective_config(&id("building")).expect("root");
    assert_eq!(leaf, root);
    assert_eq!(leaf.origin, Some(id("building")));
    assert_eq!(leaf.for_metric(MetricKey::Co2).map(|entry| entry.max), Some(1000.0));
}

#[test]
fn nearest_configured_ancestor_wins_without_merging() {
    let tree = campus();
    let config = tree.resolver().effective_config(&id("room-201")).expect("config");
    assert_eq!(config.origin, Some(id("floor-2")));
    assert_eq!(config.get("CO2cal").map(|entry| entry.max), Some(800.0));
    // floor-2 does not define Noise, and the building's Noise entry is not merged in.
    assert!(config.get("Noise").is_none());
}

#[test]
fn missing_thresholds_everywhere_yield_empty_config() {
    let tree = SpaceTree::from_spaces([
        Space::new("root", None).with_children(["child"]),
        Space::new("child", Some(id("root"))),
    ])
    .expect("tree");
    let config = tree.resolver().effective_config(&id("child")).expect("config");
    assert!(config.is_empty());
    assert!(config.origin.is_none());
}

#[test]
fn dangling_parent_is_treated_as_root() {
    let tree = SpaceTree::from_spaces([Space::new("orphan", Some(id("gone")))]).expect("tree");
    assert!(tree.ancestors(&id("orphan")).expect("ancestors").is_empty());
    assert!(tree.resolver().effective_config(&id("orphan")).expect("config").is_empty());
}

#[test]
fn resolver_detects_parent_cycle() {
    let tree = SpaceTree::from_spaces([
        Space::new("x", Some(id("y"))),
        Space::new("y", Some(id("x"))),
    ])
    .expect("tree");
    let err = tree.resolver().effective_config(&id("x")).expect_err("cycle");
    assert!(matches!(err, HierarchyError::MalformedHierarchy { .. }));
}

#[test]
fn configured_ancestor_below_a_cycle_still_resolves() {
    let tree = SpaceTree::from_spaces([
        Space::new("leaf", Some(id("mid"))),
        Space::new("mid", Some(id("top")))
            .with_threshold("CO2cal", ThresholdEntry::new(0.0, 1000.0)),
        Space::new("top", Some(id("mid"))),
    ])
    .expect("tree");
    let config = tree.resolver().effective_config(&id("leaf")).expect("config");
    assert_eq!(config.origin, Some(id("mid")));
    assert_eq!(config.get("CO2cal").map(|entry| entry.max), Some(1000.0));

    let top = tree.resolver().effective_config(&id("top")).expect("top");
    assert_eq!(top.origin, Some(id("mid")));
}

#[test]
fn roots_lists_spaces_without_parent() {
    let tree = campus();
    let roots: Vec<&str> = tree.roots().map(|space| space.id.as_str()).collect();
    assert_eq!(roots, vec!["building"]);
    assert_eq!(tree.len(), 7);
}
