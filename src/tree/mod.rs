//! The intrusive scene hierarchy and its mutation operations.

mod node;
use self::node::Node;

pub mod iter;
pub mod visit;

pub use self::iter::{Ancestors, Cast, Children, Cursor, Descendants, Payloads, Prune, Recurse};
pub use self::visit::{Visit, Visitor};

use std::collections::{HashMap, HashSet};

use crate::errors::*;

impl_handle!(Entity);

/// `SceneTree` keeps a tree relationship between externally owned objects.
/// A node may have many children but only a single parent, with the effect
/// of a parent applied to all its child nodes.
///
/// Node identities are `Entity` handles minted by an external `HandlePool`;
/// the tree itself never creates or destroys them. Every registered node
/// carries an opaque payload `T`, the user-level object it represents,
/// which the tree stores but never interprets.
///
/// ```rust,ignore
/// let mut world = HandlePool::new();
/// let mut tree = SceneTree::new();
///
/// let parent = world.create();
/// let child = world.create();
/// tree.add(parent, "parent");
/// tree.add(child, "child");
/// tree.set_parent(child, parent)?;
/// ```
///
/// The tree is a forest of finite depth. No operation may introduce a
/// cycle; keeping a node from becoming its own descendant is the caller's
/// responsibility (`is_ancestor` is provided for exactly that check).
pub struct SceneTree<T> {
    remap: HashMap<Entity, usize>,
    entities: Vec<Entity>,
    nodes: Vec<Node>,
    payloads: Vec<T>,
    roots: HashSet<Entity>,
}

impl<T> Default for SceneTree<T> {
    fn default() -> Self {
        SceneTree::new()
    }
}

impl<T> SceneTree<T> {
    /// Creates a new, empty `SceneTree`.
    pub fn new() -> Self {
        SceneTree {
            remap: HashMap::new(),
            entities: Vec::new(),
            nodes: Vec::new(),
            payloads: Vec::new(),
            roots: HashSet::new(),
        }
    }

    /// Creates a new `SceneTree` with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        SceneTree {
            remap: HashMap::with_capacity(capacity),
            entities: Vec::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            payloads: Vec::with_capacity(capacity),
            roots: HashSet::new(),
        }
    }

    /// Adds a node with its payload. The node starts detached, as a root.
    pub fn add(&mut self, ent: Entity, payload: T) {
        assert!(
            !self.remap.contains_key(&ent),
            "Ent already has a node in SceneTree."
        );

        self.remap.insert(ent, self.entities.len());
        self.entities.push(ent);
        self.nodes.push(Node::default());
        self.payloads.push(payload);
        self.roots.insert(ent);

        debug!("Adds node {:?}.", ent);
    }

    /// Removes a node and releases its slot, returning the payload. The
    /// node is detached from its parent first; its direct children are
    /// orphaned: their `parent` is cleared, while their links to each other
    /// are left untouched.
    pub fn remove(&mut self, ent: Entity) -> Option<T> {
        if !self.contains(ent) {
            return None;
        }

        let _ = self.remove_from_parent(ent);

        let orphans = self.child_count(ent);
        if orphans > 0 {
            warn!("Removing {:?} orphans {} children.", ent, orphans);
        }

        let _ = self.clear(ent);
        self.roots.remove(&ent);

        let index = self.remap.remove(&ent)?;
        self.entities.swap_remove(index);
        self.nodes.swap_remove(index);
        let payload = self.payloads.swap_remove(index);

        if index < self.entities.len() {
            let moved = self.entities[index];
            self.remap.insert(moved, index);
        }

        debug!("Removes node {:?}.", ent);
        Some(payload)
    }

    /// Returns true if `ent` has a node in this tree.
    #[inline]
    pub fn contains(&self, ent: Entity) -> bool {
        self.remap.contains_key(&ent)
    }

    /// Returns the number of registered nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the tree has no registered nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Gets the reference to the payload of `ent`.
    #[inline]
    pub fn payload(&self, ent: Entity) -> Option<&T> {
        self.remap.get(&ent).map(move |&index| &self.payloads[index])
    }

    /// Gets the mutable reference to the payload of `ent`.
    #[inline]
    pub fn payload_mut(&mut self, ent: Entity) -> Option<&mut T> {
        match self.remap.get(&ent) {
            Some(&index) => Some(&mut self.payloads[index]),
            None => None,
        }
    }

    /// Returns an iterator over the nodes that currently have no parent,
    /// in unspecified order.
    pub fn roots<'a>(&'a self) -> impl Iterator<Item = Entity> + 'a {
        self.roots.iter().cloned()
    }

    #[inline]
    fn index(&self, ent: Entity) -> Result<usize> {
        self.remap.get(&ent).cloned().ok_or(Error::NonNodeFound(ent))
    }

    #[inline]
    fn index_of(&self, ent: Entity) -> Option<usize> {
        self.remap.get(&ent).cloned()
    }

    #[inline]
    fn node(&self, ent: Entity) -> Option<&Node> {
        self.remap.get(&ent).map(move |&index| &self.nodes[index])
    }
}

impl<T> SceneTree<T> {
    /// Gets the parent node.
    #[inline]
    pub fn parent(&self, ent: Entity) -> Option<Entity> {
        self.node(ent).and_then(|v| v.parent)
    }

    /// Gets the first child of `ent`.
    #[inline]
    pub fn first_child(&self, ent: Entity) -> Option<Entity> {
        self.node(ent).and_then(|v| v.first_child)
    }

    /// Gets the last child of `ent`.
    #[inline]
    pub fn last_child(&self, ent: Entity) -> Option<Entity> {
        self.node(ent).and_then(|v| v.last_child)
    }

    /// Gets the previous sibling of `ent`.
    #[inline]
    pub fn prev_sibling(&self, ent: Entity) -> Option<Entity> {
        self.node(ent).and_then(|v| v.prev_sib)
    }

    /// Gets the next sibling of `ent`.
    #[inline]
    pub fn next_sibling(&self, ent: Entity) -> Option<Entity> {
        self.node(ent).and_then(|v| v.next_sib)
    }

    /// Returns the number of direct children of `ent`.
    #[inline]
    pub fn child_count(&self, ent: Entity) -> usize {
        self.node(ent).map(|v| v.children as usize).unwrap_or(0)
    }

    /// Returns true if this is the leaf of a hierarchy, aka. has no child.
    #[inline]
    pub fn is_leaf(&self, ent: Entity) -> bool {
        self.node(ent).map(|v| v.is_leaf()).unwrap_or(false)
    }

    /// Returns true if this is the root of a hierarchy, aka. has no parent.
    #[inline]
    pub fn is_root(&self, ent: Entity) -> bool {
        self.node(ent).map(|v| v.is_root()).unwrap_or(false)
    }

    /// Returns true if `rhs` is one of the ancestors of `lhs`.
    pub fn is_ancestor(&self, lhs: Entity, rhs: Entity) -> bool {
        for v in self.ancestors(lhs) {
            if v == rhs {
                return true;
            }
        }

        false
    }
}

impl<T> SceneTree<T> {
    /// Inserts `item` as a child of `parent`, immediately before the
    /// sibling `pos`, or at the back when `pos` is `None`. An `item` that
    /// is attached elsewhere, including under `parent` itself, is detached
    /// first; cut-and-splice reparenting is a single logical operation.
    /// Inserting an item at its own position is a no-op.
    pub fn insert(&mut self, parent: Entity, pos: Option<Entity>, item: Entity) -> Result<()> {
        let parent_index = self.index(parent)?;
        let item_index = self.index(item)?;

        if item == parent {
            return Err(Error::CanNotAttachSelfAsParent);
        }

        if let Some(pos) = pos {
            if pos == item {
                return Ok(());
            }

            if self.parent(pos) != Some(parent) {
                return Err(Error::ForeignPosition(pos, parent));
            }
        }

        debug_assert!(
            !self.is_ancestor(parent, item),
            "Attaching a node below one of its own descendants."
        );

        self.detach(item_index, item);

        let (prev, next) = match pos {
            Some(pos) => (self.prev_sibling(pos), Some(pos)),
            None => (self.nodes[parent_index].last_child, None),
        };

        {
            let node = &mut self.nodes[item_index];
            node.parent = Some(parent);
            node.prev_sib = prev;
            node.next_sib = next;
        }

        match prev {
            Some(prev) => {
                if let Some(index) = self.index_of(prev) {
                    self.nodes[index].next_sib = Some(item);
                }
            }
            None => self.nodes[parent_index].first_child = Some(item),
        }

        match next {
            Some(next) => {
                if let Some(index) = self.index_of(next) {
                    self.nodes[index].prev_sib = Some(item);
                }
            }
            None => self.nodes[parent_index].last_child = Some(item),
        }

        self.nodes[parent_index].children += 1;
        self.roots.remove(&item);
        Ok(())
    }

    /// Inserts the items before `pos` one after another, preserving the
    /// given order.
    pub fn insert_many<I>(&mut self, parent: Entity, pos: Option<Entity>, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Entity>,
    {
        for item in items {
            self.insert(parent, pos, item)?;
        }

        Ok(())
    }

    /// Replaces the children of `parent` with the given items. The old
    /// children are orphaned the same way `clear` orphans them.
    pub fn assign<I>(&mut self, parent: Entity, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Entity>,
    {
        self.clear(parent)?;
        self.insert_many(parent, None, items)
    }

    /// Inserts `item` as the first child of `parent`.
    pub fn push_front(&mut self, parent: Entity, item: Entity) -> Result<()> {
        let pos = self.first_child(parent);
        self.insert(parent, pos, item)
    }

    /// Inserts `item` as the last child of `parent`.
    pub fn push_back(&mut self, parent: Entity, item: Entity) -> Result<()> {
        self.insert(parent, None, item)
    }

    /// Attaches `child` to a new parent, before its existing children.
    /// Passing `None` detaches `child` from its current parent instead.
    pub fn set_parent<P>(&mut self, child: Entity, parent: P) -> Result<()>
    where
        P: Into<Option<Entity>>,
    {
        match parent.into() {
            Some(parent) => self.push_front(parent, child),
            None => self.remove_from_parent(child).map(|_| ()),
        }
    }

    /// Attaches `child` to a new parent, after its existing children.
    /// Passing `None` detaches `child` from its current parent instead.
    pub fn append_to<P>(&mut self, child: Entity, parent: P) -> Result<()>
    where
        P: Into<Option<Entity>>,
    {
        match parent.into() {
            Some(parent) => self.push_back(parent, child),
            None => self.remove_from_parent(child).map(|_| ()),
        }
    }

    /// Detaches `child` from its parent and siblings. Children are not
    /// affected.
    ///
    /// Returns a cursor positioned at what was the pre-order successor of
    /// `child` at the time of removal, so a walk that is erasing its
    /// current node can be resumed through [`SceneTree::resume`]. Detaching
    /// a node that has no parent is a no-op returning the end cursor.
    pub fn remove_from_parent(&mut self, child: Entity) -> Result<Cursor> {
        let index = self.index(child)?;

        if self.nodes[index].parent.is_none() {
            return Ok(Cursor::end());
        }

        let mut successor = Cursor::new(child);
        successor.advance(self);

        self.detach(index, child);
        Ok(successor)
    }

    /// Detaches and returns the first child of `parent`, or `None` if it
    /// has no children.
    pub fn pop_front(&mut self, parent: Entity) -> Result<Option<Entity>> {
        let index = self.index(parent)?;

        match self.nodes[index].first_child {
            Some(child) => {
                self.remove_from_parent(child)?;
                Ok(Some(child))
            }
            None => Ok(None),
        }
    }

    /// Detaches and returns the last child of `parent`, or `None` if it
    /// has no children.
    pub fn pop_back(&mut self, parent: Entity) -> Result<Option<Entity>> {
        let index = self.index(parent)?;

        match self.nodes[index].last_child {
            Some(child) => {
                self.remove_from_parent(child)?;
                Ok(Some(child))
            }
            None => Ok(None),
        }
    }

    /// Detaches all direct children of `parent`. Each orphan's `parent` is
    /// cleared and it becomes a root, while its links to its former
    /// siblings are left untouched.
    pub fn clear(&mut self, parent: Entity) -> Result<()> {
        let index = self.index(parent)?;

        let mut cursor = self.nodes[index].first_child;
        while let Some(child) = cursor {
            match self.index_of(child) {
                Some(ci) => {
                    self.nodes[ci].parent = None;
                    self.roots.insert(child);
                    cursor = self.nodes[ci].next_sib;
                }
                None => break,
            }
        }

        let node = &mut self.nodes[index];
        node.first_child = None;
        node.last_child = None;
        node.children = 0;
        Ok(())
    }

    /// Cuts `ent` out of its parent's child list and nulls its own
    /// parent/sibling links. The parent's boundary links and child count
    /// are patched up; `ent` becomes a root.
    fn detach(&mut self, ent_index: usize, ent: Entity) {
        let (parent, prev_sib, next_sib) = {
            let node = &mut self.nodes[ent_index];
            (
                node.parent.take(),
                node.prev_sib.take(),
                node.next_sib.take(),
            )
        };

        if let Some(next_sib) = next_sib {
            if let Some(index) = self.index_of(next_sib) {
                self.nodes[index].prev_sib = prev_sib;
            }
        }

        if let Some(prev_sib) = prev_sib {
            if let Some(index) = self.index_of(prev_sib) {
                self.nodes[index].next_sib = next_sib;
            }
        }

        if let Some(parent) = parent {
            if let Some(index) = self.index_of(parent) {
                let node = &mut self.nodes[index];

                // Without a previous sibling `ent` was the first child, and
                // likewise for the last.
                if node.first_child == Some(ent) {
                    node.first_child = next_sib;
                }

                if node.last_child == Some(ent) {
                    node.last_child = prev_sib;
                }

                node.children -= 1;
            }

            self.roots.insert(ent);
        }
    }
}

impl<T> SceneTree<T> {
    /// Returns an iterator over the direct children of `ent`.
    #[inline]
    pub fn children(&self, ent: Entity) -> Children<T> {
        Children::new(self, self.first_child(ent))
    }

    /// Returns an iterator over the ancestors of `ent`, nearest first.
    #[inline]
    pub fn ancestors(&self, ent: Entity) -> Ancestors<T> {
        Ancestors::new(self, self.parent(ent))
    }

    /// Returns an iterator over the strict descendants of `ent` in
    /// pre-order, bounded to the subtree below `ent`.
    #[inline]
    pub fn descendants(&self, ent: Entity) -> Descendants<T> {
        Descendants::new(self, ent, self.first_child(ent))
    }

    /// Returns a controllable pre-order iterator that starts at `ent`
    /// itself. Unlike [`SceneTree::descendants`] the walk is not bounded:
    /// after finishing the subtree below `ent` it moves on to `ent`'s
    /// siblings and those of its ancestors, finishing only at the end of
    /// the whole tree.
    #[inline]
    pub fn recurse(&self, ent: Entity) -> Recurse<T> {
        let cursor = if self.contains(ent) {
            Cursor::new(ent)
        } else {
            Cursor::end()
        };

        Recurse::new(self, cursor)
    }

    /// Re-anchors a saved `Cursor` as a pre-order iterator, yielding the
    /// cursor's current node first.
    #[inline]
    pub fn resume(&self, cursor: Cursor) -> Recurse<T> {
        Recurse::new(self, cursor)
    }

    /// Adapts any entity iterator into one over the payloads of the
    /// visited nodes.
    #[inline]
    pub fn payloads<I>(&self, inner: I) -> Payloads<T, I>
    where
        I: Iterator<Item = Entity>,
    {
        Payloads::new(self, inner)
    }

    /// Visits `ent` and every node after it in pre-order, driving `cb`
    /// once per node until the traversal finishes.
    pub fn visit<F>(&self, ent: Entity, cb: F)
    where
        F: FnMut(&mut Visit, &T),
    {
        Visitor::new(self, ent, cb).all();
    }
}
