mod loader;
mod types;

pub use loader::{load_from_path, validate_config};
pub use types::{Config, LoggingConfig, TransportConfig};
