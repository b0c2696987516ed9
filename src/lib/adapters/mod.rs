pub mod assets;
pub mod http;

pub use http::*;
