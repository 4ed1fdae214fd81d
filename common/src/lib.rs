pub mod config;
pub mod error;
pub mod loader;
pub mod plot;
pub mod record;
pub mod util;

/// Extension of the benchmark documents picked up by the loader
pub const DOCUMENT_EXTENSION: &str = ".json";
