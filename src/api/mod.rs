pub mod api;
pub mod request;
pub mod response;

pub use api::*;
pub use request::*;
pub use response::*;
