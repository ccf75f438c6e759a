//! A small, embeddable intrusive scene hierarchy.
//!
//! `scene-tree` keeps the parent/child relationships of many independently
//! owned objects, the way a scene graph does. A tree `Node` may have many
//! children but only a single parent, with the effect of a parent applied
//! to all its child nodes. The crate stores nothing but the linkage and an
//! opaque per-node payload: node identities are generational handles
//! minted by an external [`HandlePool`], so creation and destruction of
//! the objects themselves stay entirely in the hands of the application.
//!
//! On top of the linkage it provides a controllable pre-order traversal:
//! plain iterators over children, ancestors and descendants, a prunable
//! [`Recurse`] walk with a resumable [`Cursor`], typed-handle and payload
//! view adapters, and a stack-driven [`Visitor`] that turns the walk into
//! an externally drivable visitation with steering commands.
//!
//! ```rust,ignore
//! let mut world = HandlePool::new();
//! let mut tree = SceneTree::new();
//!
//! let root = world.create();
//! tree.add(root, "root");
//!
//! tree.visit(root, |visit, name| {
//!     if *name == "door" {
//!         visit.skip_children();
//!     }
//! });
//! ```
//!
//! [`HandlePool`]: utils/handle_pool/struct.HandlePool.html
//! [`Recurse`]: tree/iter/struct.Recurse.html
//! [`Cursor`]: tree/iter/struct.Cursor.html
//! [`Visitor`]: tree/visit/struct.Visitor.html

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate smallvec;

pub mod errors;
#[macro_use]
pub mod utils;
pub mod tree;

pub use self::errors::{Error, Result};
pub use self::tree::{Entity, SceneTree};

pub mod prelude {
    pub use crate::errors::{Error, Result};
    pub use crate::tree::iter::{Cursor, Prune};
    pub use crate::tree::visit::{Visit, Visitor};
    pub use crate::tree::{Entity, SceneTree};
    pub use crate::utils::handle::{Handle, HandleIndex, HandleLike};
    pub use crate::utils::handle_pool::HandlePool;
}
