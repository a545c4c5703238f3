//! End-to-end tests for the containment hierarchy.
//!
//! Tests construction, identity assignment, lookup and removal through
//! Graph -> Cluster -> Index, plus the bond scenario from a small social graph.

use graphkit::{Bond, Cluster, Entity, Error, Graph, Index, NodeClass, NodeId, Value};

// ============================================================================
// 1. Fresh nodes are unindexed
// ============================================================================

#[test]
fn test_fresh_nodes_unindexed() {
    let e = Entity::new("User").unwrap();
    let b = Bond::new("Friend").unwrap();

    assert_eq!(e.id(), NodeId(0));
    assert!(!e.is_indexed());
    assert_eq!(b.id(), NodeId::UNINDEXED);
    assert_eq!(e.class(), NodeClass::Entity);
    assert_eq!(b.class(), NodeClass::Bond);
}

// ============================================================================
// 2. Construction without a type fails
// ============================================================================

#[test]
fn test_construction_requires_type() {
    assert!(matches!(Entity::new(""), Err(Error::Construction(_))));
    assert!(matches!(Bond::new(""), Err(Error::Construction(_))));
    assert!(matches!(graphkit::Action::new(""), Err(Error::Construction(_))));
}

// ============================================================================
// 3. Users and a friendship bond
// ============================================================================

#[test]
fn test_friend_bond_scenario() {
    let mut g = Graph::new();
    let e1 = g.create_entity("User").unwrap();
    assert_eq!(e1.id(), NodeId(1));
    let e2 = g.create_entity("User").unwrap();
    assert_eq!(e2.id(), NodeId(2));

    let b = g.create_bond("Friend").unwrap();
    b.set_subject(&e1);
    b.set_object(&e2);

    assert_eq!(b.subject().map(|n| n.node_type().to_string()), Some("User".into()));
    assert_eq!(b.object().map(|n| n.id()), Some(NodeId(2)));

    assert!(g.remove_node(&e1));
    assert!(g.find(NodeClass::Entity, "User", NodeId(1)).is_none());
    assert!(g.find(NodeClass::Entity, "User", NodeId(2)).is_some());
}

// ============================================================================
// 4. Ids are never reused within an Index
// ============================================================================

#[test]
fn test_ids_not_reused_after_removal() {
    let mut g = Graph::new();
    let a = g.create_entity("User").unwrap();
    let b = g.create_entity("User").unwrap();
    assert!(g.remove_node(&b));
    assert!(g.remove_node(&a));

    let c = g.create_entity("User").unwrap();
    assert_eq!(c.id(), NodeId(3));
    assert_eq!(g[NodeClass::Entity]["User"].last_id(), NodeId(3));
}

// ============================================================================
// 5. Each (class, type) pair counts independently
// ============================================================================

#[test]
fn test_independent_counters() {
    let mut g = Graph::new();
    let user = g.create_entity("User").unwrap();
    let book = g.create_entity("Book").unwrap();
    let read = g.create_action("User").unwrap();

    assert_eq!(user.id(), NodeId(1));
    assert_eq!(book.id(), NodeId(1));
    assert_eq!(read.id(), NodeId(1));
    assert_eq!(g.node_count(), 3);
}

// ============================================================================
// 6. Index size accounting and type enforcement
// ============================================================================

#[test]
fn test_index_size_accounting() {
    let mut idx = Index::new(NodeClass::Entity, "Book").unwrap();
    let books: Vec<Entity> = (0..5).map(|_| Entity::new("Book").unwrap()).collect();
    for b in &books {
        assert!(idx.insert(b).unwrap());
    }
    assert_eq!(idx.len(), 5);

    assert!(idx.remove(books[2].id()));
    assert_eq!(idx.len(), 4);
    assert!(!idx.remove(books[2].id()));
    assert_eq!(idx.len(), 4);

    let user = Entity::new("User").unwrap();
    assert!(matches!(idx.insert(&user), Err(Error::TypeMismatch { .. })));
    assert_eq!(idx.len(), 4);

    let ids: Vec<u64> = idx.iter().map(|n| n.id().0).collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
}

// ============================================================================
// 7. Cluster rejects foreign classes
// ============================================================================

#[test]
fn test_cluster_class_enforced() {
    let mut c = Cluster::new(NodeClass::Action);
    let e = Entity::new("Read").unwrap();
    assert!(matches!(c.insert(&e), Err(Error::TypeMismatch { .. })));
    assert_eq!(c.len(), 0);
    assert!(!e.is_indexed());
}

// ============================================================================
// 8. Already-indexed nodes are never re-keyed
// ============================================================================

#[test]
fn test_indexed_node_not_rekeyed_elsewhere() {
    let mut g1 = Graph::new();
    let mut g2 = Graph::new();
    g2.create_entity("User").unwrap();

    let e = g1.create_entity("User").unwrap();
    assert!(!g2.insert(&e).unwrap());
    assert_eq!(e.id(), NodeId(1));
    assert_eq!(g2.node_count(), 1);
}

// ============================================================================
// 9. Breadth and nested positional inspection
// ============================================================================

#[test]
fn test_nested_positional_counts() {
    let mut g = Graph::new();
    assert_eq!(g.len(), 0);
    for _ in 0..10 {
        g.create_entity("Book").unwrap();
    }
    for _ in 0..4 {
        g.create_entity("User").unwrap();
    }
    g.create_bond("Friend").unwrap();

    assert_eq!(g.len(), 2);
    assert_eq!(g[0].len(), 2);
    assert_eq!(g[0][0].len(), 10);
    assert_eq!(g[0][1].len(), 4);
    assert_eq!(g[1][0].len(), 1);
    assert_eq!(g[0][1][3].id(), NodeId(4));

    g.clear();
    assert_eq!(g.len(), 0);
    assert_eq!(g.node_count(), 0);
}

// ============================================================================
// 10. Properties survive indexing and lookup
// ============================================================================

#[test]
fn test_properties_through_lookup() {
    let mut g = Graph::new();
    let book = Entity::new("Book").unwrap();
    book.set_property("title", "Title 1");
    book.set_property("pages", 320);
    g.insert(&book).unwrap();

    let found = g.find(NodeClass::Entity, "Book", book.id()).unwrap();
    assert_eq!(found.property("title"), Some(Value::from("Title 1")));
    assert_eq!(found.property("pages").and_then(|v| v.as_int()), Some(320));
    assert_eq!(found.property("author"), None);

    found.remove_property("pages");
    assert!(!book.has_property("pages"));
}
