//! Commonly used utilities like handles and handle pools.

#[macro_use]
pub mod handle;
pub mod handle_pool;

pub use self::handle::{Handle, HandleIndex, HandleLike};
pub use self::handle_pool::{HandleIter, HandlePool};

pub mod prelude {
    pub use super::handle::{Handle, HandleIndex, HandleLike};
    pub use super::handle_pool::HandlePool;
}
