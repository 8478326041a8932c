mod app_config;
pub mod loader;
pub mod paths;

pub use app_config::*;
