pub mod adapter;
pub mod types;

pub use adapter::{RequestAdapter, HTTP_REQUEST_COMMAND};
pub use types::*;
