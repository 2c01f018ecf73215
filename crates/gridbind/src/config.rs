//! Data source configuration.
//!
//! ```
//! use gridbind::config::DataSourceConfig;
//!
//! let config = DataSourceConfig::new()
//!     .strict_bounds(false)
//!     .show_section_headers(true);
//!
//! assert!(!config.strict_bounds);
//! assert!(config.show_section_headers);
//! ```
//!
//! The same settings can be loaded from TOML; missing keys keep their defaults:
//!
//! ```
//! use gridbind::config::DataSourceConfig;
//!
//! let config = DataSourceConfig::from_toml_str("show_section_footers = true").unwrap();
//! assert!(config.show_section_footers);
//! assert!(!config.show_section_headers);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings applied by a `TableDataSource`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
    /// Panic on out-of-bounds inserts instead of rejecting them.
    ///
    /// Defaults to `true` in debug builds and `false` in release builds.
    pub strict_bounds: bool,
    /// Initial value broadcast to sections as their header flag.
    pub show_section_headers: bool,
    /// Initial value broadcast to sections as their footer flag.
    pub show_section_footers: bool,
    /// Whether the adapter should show a table header. Not interpreted by the core.
    pub show_table_header: bool,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            strict_bounds: cfg!(debug_assertions),
            show_section_headers: false,
            show_section_footers: false,
            show_table_header: false,
        }
    }
}

impl DataSourceConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether out-of-bounds inserts panic.
    pub fn strict_bounds(mut self, strict: bool) -> Self {
        self.strict_bounds = strict;
        self
    }

    /// Sets the section header flag.
    pub fn show_section_headers(mut self, show: bool) -> Self {
        self.show_section_headers = show;
        self
    }

    /// Sets the section footer flag.
    pub fn show_section_footers(mut self, show: bool) -> Self {
        self.show_section_footers = show;
        self
    }

    /// Sets the table header flag.
    pub fn show_table_header(mut self, show: bool) -> Self {
        self.show_table_header = show;
        self
    }

    /// Parses a configuration from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
