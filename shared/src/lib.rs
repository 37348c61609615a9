pub mod json_path;
pub mod telemetry;
pub mod types;
pub mod utils;
