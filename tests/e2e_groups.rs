//! End-to-end tests for group tags and graph-wide group queries.
//!
//! Builds a small book recommendation graph: users, books, friendship bonds
//! and read actions, then tags and untags across node classes.

use graphkit::{Entity, Graph, NodeClass};

// ============================================================================
// Helper: users read books and befriend each other.
// ============================================================================

fn recommendation_graph(n: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        let book = Entity::new("Book").unwrap();
        book.set_property("title", format!("Title {}", i + 1));
        g.insert(&book).unwrap();
    }
    for i in 0..n {
        let user = g.create_entity("User").unwrap();
        user.set_property("name", format!("Name {}", i + 1));
        user.add_group(if i % 3 == 0 { "female" } else { "male" });
    }

    let users: Vec<_> = g[NodeClass::Entity]["User"].iter().cloned().collect();
    let books: Vec<_> = g[NodeClass::Entity]["Book"].iter().cloned().collect();
    for (i, user) in users.iter().enumerate() {
        let friend = g.create_bond("Friend").unwrap();
        friend.set_subject(user);
        friend.set_object(&users[(i + 1) % users.len()]);

        let read = g.create_action("Read").unwrap();
        read.add_subject(user).unwrap();
        read.add_object(&books[(i * 7) % books.len()]).unwrap();
    }
    g
}

// ============================================================================
// 1. Tags across classes, with removals
// ============================================================================

#[test]
fn test_group_across_classes() {
    let mut g = recommendation_graph(20);

    let user0 = g[NodeClass::Entity]["User"][0].clone();
    let book0 = g[NodeClass::Entity]["Book"][0].clone();
    let read0 = g[NodeClass::Action]["Read"][0].clone();
    let read1 = g[NodeClass::Action]["Read"][1].clone();
    let friend0 = g[NodeClass::Bond]["Friend"][0].clone();

    user0.add_group("test");
    book0.add_group("test");
    read0.add_group("test");
    read1.add_group("test");
    read1.remove_group("test");
    user0.remove_group("test");
    friend0.add_group("test");

    assert!(g.remove_node(&book0));
    assert!(g.remove_node(&friend0));

    let tagged = g.group("test");
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0], read0);

    // Tags stay on the removed nodes.
    assert!(book0.has_group("test"));
    assert!(friend0.has_group("test"));
}

// ============================================================================
// 2. Partitioning by tag
// ============================================================================

#[test]
fn test_group_partition() {
    let g = recommendation_graph(30);

    let female = g.group("female");
    let male = g.group("male");
    assert_eq!(female.len(), 10);
    assert_eq!(male.len(), 20);
    assert!(female.iter().all(|n| n.class() == NodeClass::Entity && n.node_type() == "User"));
    assert!(g.group("unknown").is_empty());
}

// ============================================================================
// 3. Group follows containment, not tags alone
// ============================================================================

#[test]
fn test_group_follows_containment_not_tags() {
    let mut g = Graph::new();
    let e = g.create_entity("User").unwrap();
    e.add_group("vip");
    assert_eq!(g.group("vip").len(), 1);

    g.remove_node(&e);
    assert!(g.group("vip").is_empty());
    assert!(e.has_group("vip"));
    assert_eq!(e.group_len(), 1);
}

// ============================================================================
// 4. Read actions link users to books both ways
// ============================================================================

#[test]
fn test_recommendation_links() {
    let g = recommendation_graph(10);

    for read in g[NodeClass::Action]["Read"].iter() {
        let action = read.as_action().unwrap();
        let subjects = action.subjects();
        assert_eq!(subjects.len(), 1);
        assert!(subjects.get(0).is_some_and(|u| u.actions().contains(read)));
        for book in action.objects().iter() {
            assert!(book.actions().contains(read));
        }
    }
    assert_eq!(g[NodeClass::Bond]["Friend"].len(), 10);
}
