//! Read-only queries over a loaded [`crate::occurrence::Dataset`].
pub mod nearest;
pub mod species;
pub mod stats;
pub mod window;

pub use nearest::*;
pub use species::*;
pub use stats::*;
pub use window::*;
