//! An externally drivable pre-order visitation engine.

use smallvec::SmallVec;

use super::iter::Cursor;
use super::{Entity, SceneTree};

/// A steering command recorded by a callback during a visit. Commands take
/// effect after the callback returns, on the next advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    All,
    Children,
    SkipChildren,
    SkipSiblings,
}

/// The context handed to the visitation callback, describing the node
/// being visited and accepting steering commands for the rest of the walk.
pub struct Visit {
    /// The node being visited.
    pub ent: Entity,
    /// Depth of the node, relative to the walk's start node.
    pub depth: i32,
    /// 0-based index of the node among its siblings at this traversal
    /// level.
    pub index: usize,
    command: Option<Command>,
}

impl Visit {
    /// Keeps visiting until every remaining node has been visited.
    #[inline]
    pub fn all(&mut self) {
        self.command = Some(Command::All);
    }

    /// Visits the remaining descendants of this node, then returns control
    /// to the outer drive.
    #[inline]
    pub fn children(&mut self) {
        self.command = Some(Command::Children);
    }

    /// Skips the children of this node.
    #[inline]
    pub fn skip_children(&mut self) {
        self.command = Some(Command::SkipChildren);
    }

    /// Skips the children of this node along with the rest of its sibling
    /// chain.
    #[inline]
    pub fn skip_siblings(&mut self) {
        self.command = Some(Command::SkipSiblings);
    }
}

/// One open level of the ancestor chain the traversal is currently inside.
#[derive(Debug, Clone, Copy)]
struct Frame {
    cursor: Cursor,
    depth: i32,
    index: usize,
    invoked: bool,
}

/// `Visitor` reproduces recursive pre-order visitation without a native
/// call stack, by keeping an explicit stack of frames, one per open depth
/// level. The caller drives it one step at a time with [`Visitor::next`],
/// drains it with [`Visitor::all`] or [`Visitor::children`], and prunes it
/// with [`Visitor::skip_children`] and [`Visitor::skip_siblings`]; the
/// callback may issue the same four commands through [`Visit`].
pub struct Visitor<'a, T: 'a, F> {
    tree: &'a SceneTree<T>,
    cb: F,
    begin: Cursor,
    stack: SmallVec<[Frame; 8]>,
}

impl<'a, T, F> Visitor<'a, T, F>
where
    F: FnMut(&mut Visit, &T),
{
    /// Creates a visitor positioned at `ent`, which has not been visited
    /// yet.
    pub fn new(tree: &'a SceneTree<T>, ent: Entity, cb: F) -> Self {
        let begin = if tree.contains(ent) {
            Cursor::new(ent)
        } else {
            Cursor::end()
        };

        let mut visitor = Visitor {
            tree,
            cb,
            begin,
            stack: SmallVec::new(),
        };

        visitor.reset();
        visitor
    }

    /// Returns true once every reachable node has been visited.
    #[inline]
    pub fn finished(&self) -> bool {
        self.stack.is_empty()
    }

    /// Rewinds the traversal back to its start node.
    pub fn reset(&mut self) {
        self.stack.clear();

        if !self.begin.is_end() {
            self.stack.push(Frame {
                cursor: self.begin,
                depth: 0,
                index: 0,
                invoked: false,
            });
        }
    }

    /// Visits the current node if it has not been visited yet; otherwise
    /// advances the traversal by one step.
    pub fn next(&mut self) {
        let invoked = match self.stack.last() {
            Some(frame) => frame.invoked,
            None => return,
        };

        if !invoked {
            self.invoke();
        } else {
            self.advance();
        }
    }

    /// Visits every remaining node exactly once, in pre-order.
    pub fn all(&mut self) {
        while !self.stack.is_empty() {
            self.next();
        }
    }

    /// Drains the traversal until it leaves the current node's subtree,
    /// i.e. arrives at a sibling of that node or of one of its ancestors.
    /// The node it stops on is positioned but not yet visited.
    pub fn children(&mut self) {
        let (depth, index) = match self.stack.last() {
            Some(frame) => (frame.depth, frame.index),
            None => return,
        };

        while !self.stack.is_empty() {
            self.next();

            let frame = match self.stack.last() {
                Some(frame) => frame,
                None => return,
            };

            if frame.depth > depth {
                continue;
            }

            if frame.depth < depth || frame.index > index {
                return;
            }
        }
    }

    /// Suppresses descent below the current node, for its next advance
    /// only.
    pub fn skip_children(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.cursor.skip_children();
        }
    }

    /// Prunes the rest of the current node's sibling chain at its level,
    /// as well as its own children.
    pub fn skip_siblings(&mut self) {
        if self.stack.pop().is_some() {
            self.skip_children();
        }
    }

    fn invoke(&mut self) {
        let (ent, depth, index) = match self.stack.last_mut() {
            Some(frame) => match frame.cursor.entity() {
                Some(ent) => {
                    frame.invoked = true;
                    (ent, frame.depth, frame.index)
                }
                None => return,
            },
            None => return,
        };

        let tree = self.tree;
        let payload = match tree.payload(ent) {
            Some(payload) => payload,
            None => return,
        };

        let mut visit = Visit {
            ent,
            depth,
            index,
            command: None,
        };

        (self.cb)(&mut visit, payload);

        match visit.command {
            Some(Command::All) => self.all(),
            Some(Command::Children) => self.children(),
            Some(Command::SkipChildren) => self.skip_children(),
            Some(Command::SkipSiblings) => self.skip_siblings(),
            None => {}
        }
    }

    fn advance(&mut self) {
        let mut cursor = match self.stack.last() {
            Some(frame) => frame.cursor,
            None => return,
        };

        let depth = cursor.depth();
        cursor.advance(self.tree);

        if cursor.is_end() {
            self.stack.clear();
            return;
        }

        if cursor.depth() > depth {
            self.stack.push(Frame {
                cursor,
                depth: cursor.depth(),
                index: 0,
                invoked: false,
            });
            return;
        }

        if cursor.depth() < 0 {
            // The walk escaped above the start node; no frame on the stack
            // corresponds to that level.
            self.stack.clear();
            return;
        }

        // The step stayed at the current level, or returned to a shallower
        // one. Frames below it are closed, and the surviving frame moves to
        // the next sibling at its level.
        self.stack.truncate(cursor.depth() as usize + 1);

        let frame = &mut self.stack[cursor.depth() as usize];
        frame.cursor = cursor;
        frame.invoked = false;
        frame.index += 1;
    }
}
