pub mod error;
pub mod handlers;
pub mod models;
pub mod rollup;
pub mod service;

pub use error::*;
pub use handlers::*;
pub use models::*;
pub use service::*;
