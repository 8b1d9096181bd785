pub mod cli;
pub mod command;

pub use cli::*;
pub use command::*;
