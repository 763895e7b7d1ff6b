//! Configuration for oidstore
//!
//! Centralized configuration with sensible defaults.

/// Configuration used when initializing a new database
///
/// The name and description are written into the metadata file at
/// initialization time and are immutable afterwards; no API rewrites
/// them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Human-readable database name (metadata line 1)
    pub name: String,

    /// Free-form description (metadata line 2)
    pub description: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "Database Name".to_string(),
            description: "Database Description".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the database name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the database description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.config.description = description.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
