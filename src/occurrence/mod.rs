pub mod dataset;
pub mod loader;
pub mod point;
pub mod record;
pub mod timestamp;

pub use dataset::*;
pub use loader::*;
pub use point::*;
pub use record::*;
pub use timestamp::Timestamp;
