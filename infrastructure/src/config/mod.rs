//! Configuration file loading for SAGE
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SAGE_`-prefixed environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./sage.toml` or `./.sage.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/sage/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDataConfig, FileLlmConfig, FileLoggingConfig,
    FileOutputConfig, FileReplConfig, FileTurnConfig,
};
pub use loader::ConfigLoader;
