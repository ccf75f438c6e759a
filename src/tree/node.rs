use super::Entity;

/// The intrusive linkage record of one tree node. `Entity` handles are used
/// to record the tree relationships, so every access requires going through
/// the arena. It not only keeps the record `Copy` and compact, but also
/// rules out dangling references when a node is freed and its slot reused.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub parent: Option<Entity>,
    pub first_child: Option<Entity>,
    pub last_child: Option<Entity>,
    pub prev_sib: Option<Entity>,
    pub next_sib: Option<Entity>,
    pub children: u32,
}

impl Default for Node {
    fn default() -> Self {
        Node {
            parent: None,
            first_child: None,
            last_child: None,
            prev_sib: None,
            next_sib: None,
            children: 0,
        }
    }
}

impl Node {
    /// Returns true if this is the leaf of a hierarchy, aka. has no child.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    /// Returns true if this is the root of a hierarchy, aka. has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
