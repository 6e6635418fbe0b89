use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::ConfigError;

pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config, ConfigError> {
    let txt = fs::read_to_string(p)?;
    let cfg: Config = toml::from_str(&txt)?;

    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("output_dir cannot be empty".into()));
    }
    if cfg.user_agent.trim().is_empty() {
        return Err(ConfigError::Invalid("user_agent cannot be empty".into()));
    }
    if cfg.transport.connect_timeout_ms == 0 {
        return Err(ConfigError::Invalid("connect_timeout_ms must be > 0".into()));
    }
    Ok(())
}
