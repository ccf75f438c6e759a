extern crate scene_tree;

use std::cell::RefCell;

use scene_tree::prelude::*;

struct Testbed {
    world: HandlePool<Entity>,
    tree: SceneTree<&'static str>,
}

impl Testbed {
    fn new() -> Testbed {
        Testbed {
            world: HandlePool::new(),
            tree: SceneTree::new(),
        }
    }

    fn create(&mut self, name: &'static str) -> Entity {
        let ent = self.world.create();
        self.tree.add(ent, name);
        ent
    }
}

impl ::std::ops::Deref for Testbed {
    type Target = SceneTree<&'static str>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

impl ::std::ops::DerefMut for Testbed {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tree
    }
}

/// root <- (a <- (a1, a2), b)
fn fixture() -> (Testbed, Entity, Entity, Entity, Entity, Entity) {
    let mut testbed = Testbed::new();
    let root = testbed.create("root");
    let a = testbed.create("a");
    let a1 = testbed.create("a1");
    let a2 = testbed.create("a2");
    let b = testbed.create("b");

    testbed.insert_many(root, None, vec![a, b]).unwrap();
    testbed.insert_many(a, None, vec![a1, a2]).unwrap();
    (testbed, root, a, a1, a2, b)
}

#[test]
fn visits_in_preorder() {
    let (testbed, root, a, a1, a2, b) = fixture();

    let mut out = Vec::new();
    {
        let mut visitor = Visitor::new(&testbed.tree, root, |visit, _| {
            out.push((visit.ent, visit.depth, visit.index));
        });
        visitor.all();
        assert!(visitor.finished());
    }

    assert_eq!(
        out,
        [
            (root, 0, 0),
            (a, 1, 0),
            (a1, 2, 0),
            (a2, 2, 1),
            (b, 1, 1),
        ]
    );
}

#[test]
fn callback_receives_payloads() {
    let (testbed, root, _a, _a1, _a2, _b) = fixture();

    let mut out = Vec::new();
    testbed.visit(root, |_, name| out.push(*name));
    assert_eq!(out, ["root", "a", "a1", "a2", "b"]);
}

#[test]
fn skip_children_command() {
    let (testbed, root, a, _a1, _a2, b) = fixture();

    let mut out = Vec::new();
    testbed.visit(root, |visit, _| {
        if visit.ent == a {
            visit.skip_children();
        }
        out.push(visit.ent);
    });

    assert_eq!(out, [root, a, b]);
}

#[test]
fn skip_siblings_command() {
    let mut testbed = Testbed::new();
    let root = testbed.create("root");
    let a = testbed.create("a");
    let a1 = testbed.create("a1");
    let b = testbed.create("b");
    let c = testbed.create("c");

    testbed.insert_many(root, None, vec![a, b, c]).unwrap();
    testbed.push_back(a, a1).unwrap();

    let mut out = Vec::new();
    testbed.visit(root, |visit, _| {
        if visit.ent == a {
            visit.skip_siblings();
        }
        out.push(visit.ent);
    });

    // Skipping siblings prunes the node's children and everything after
    // it at its level.
    assert_eq!(out, [root, a]);
}

#[test]
fn all_command_drains_from_the_callback() {
    let (testbed, root, _a, _a1, _a2, _b) = fixture();

    let out = RefCell::new(Vec::new());
    let mut visitor = Visitor::new(&testbed.tree, root, |visit, _| {
        out.borrow_mut().push(visit.ent);
        visit.all();
    });

    // A single step is enough: the command issued during the first visit
    // drains the rest of the traversal.
    visitor.next();
    assert!(visitor.finished());
    assert_eq!(out.borrow().len(), 5);
}

#[test]
fn children_command_keeps_preorder() {
    let (testbed, root, a, a1, a2, b) = fixture();

    let mut out = Vec::new();
    testbed.visit(root, |visit, _| {
        if visit.ent == a {
            visit.children();
        }
        out.push(visit.ent);
    });

    // Draining the subtree from inside the callback must not change the
    // visitation order, nor visit anything twice.
    assert_eq!(out, [root, a, a1, a2, b]);
}

#[test]
fn driven_children() {
    let (testbed, root, a, a1, a2, b) = fixture();

    let out = RefCell::new(Vec::new());
    let mut visitor = Visitor::new(&testbed.tree, root, |visit, _| {
        out.borrow_mut().push(visit.ent);
    });

    // Step to `a`: visit root, advance into the children, visit `a`.
    visitor.next();
    visitor.next();
    visitor.next();
    assert_eq!(*out.borrow(), [root, a]);

    // Drain the subtree below `a`. The walk stops on `b` without
    // visiting it.
    visitor.children();
    assert_eq!(*out.borrow(), [root, a, a1, a2]);
    assert!(!visitor.finished());

    visitor.all();
    assert_eq!(*out.borrow(), [root, a, a1, a2, b]);
    assert!(visitor.finished());
}

#[test]
fn driven_children_of_a_leaf() {
    let (testbed, root, _a, a1, a2, _b) = fixture();

    let out = RefCell::new(Vec::new());
    let mut visitor = Visitor::new(&testbed.tree, root, |visit, _| {
        out.borrow_mut().push(visit.ent);
    });

    // Step to `a1`, a leaf.
    for _ in 0..5 {
        visitor.next();
    }
    assert_eq!(out.borrow().last().cloned(), Some(a1));

    // Nothing below a leaf: the drain stops on the next sibling without
    // visiting it.
    let visited = out.borrow().len();
    visitor.children();
    assert_eq!(out.borrow().len(), visited);

    visitor.next();
    assert_eq!(out.borrow().last().cloned(), Some(a2));
}

#[test]
fn driver_skip_children() {
    let (testbed, root, a, _a1, _a2, b) = fixture();

    let out = RefCell::new(Vec::new());
    let mut visitor = Visitor::new(&testbed.tree, root, |visit, _| {
        out.borrow_mut().push(visit.ent);
    });

    visitor.next();
    visitor.next();
    visitor.next();
    assert_eq!(*out.borrow(), [root, a]);

    visitor.skip_children();
    visitor.all();
    assert_eq!(*out.borrow(), [root, a, b]);
}

#[test]
fn reset_restarts_the_walk() {
    let (testbed, root, _a, _a1, _a2, _b) = fixture();

    let out = RefCell::new(Vec::new());
    let mut visitor = Visitor::new(&testbed.tree, root, |visit, _| {
        out.borrow_mut().push(visit.ent);
    });

    visitor.all();
    assert!(visitor.finished());
    assert_eq!(out.borrow().len(), 5);

    visitor.reset();
    assert!(!visitor.finished());

    visitor.all();
    assert_eq!(out.borrow().len(), 10);
}

#[test]
fn single_node() {
    let mut testbed = Testbed::new();
    let root = testbed.create("root");

    let mut out = Vec::new();
    testbed.visit(root, |visit, _| out.push((visit.ent, visit.depth)));
    assert_eq!(out, [(root, 0)]);
}

#[test]
fn started_below_the_root() {
    let (testbed, _root, a, a1, a2, b) = fixture();

    // The walk is not bounded to the start node's subtree: it proceeds
    // with the start node's siblings at the same level.
    let mut out = Vec::new();
    testbed.visit(a, |visit, _| out.push(visit.ent));
    assert_eq!(out, [a, a1, a2, b]);

    // It does finish once it would have to climb above the start node,
    // since no frame on the stack corresponds to those levels.
    let mut out = Vec::new();
    testbed.visit(a1, |visit, _| out.push(visit.ent));
    assert_eq!(out, [a1, a2]);
}

#[test]
fn unknown_start_is_finished() {
    let mut testbed = Testbed::new();
    let _root = testbed.create("root");
    let stray = testbed.world.create();

    let visitor = Visitor::new(&testbed.tree, stray, |_, _: &&'static str| {});
    assert!(visitor.finished());
}
