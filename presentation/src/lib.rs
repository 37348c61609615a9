pub mod cli;
pub mod error;
pub mod http;
pub mod report;

pub use error::ApiError;
pub use http::{create_router, AppState};
