//! Per-species classifiers persisted as JSON artifacts.
pub mod classifier;
pub mod repository;

pub use classifier::*;
pub use repository::*;
