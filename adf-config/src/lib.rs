//! Shared configuration loader for the ADF tools.
//!
//! `defaults/adf.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`AdfConfig`].

use adf_doc::{HardBreakStyle, RenderRules};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/adf.default.toml");

/// Top-level configuration consumed by ADF applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AdfConfig {
    pub render: RenderConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub rules: RenderRulesConfig,
}

/// Mirrors the knobs exposed by the Markdown serializer.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderRulesConfig {
    pub ignore_errors: bool,
    pub hard_break: HardBreakConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum HardBreakConfig {
    #[serde(rename = "spaces")]
    Spaces,
    #[serde(rename = "empty")]
    Empty,
}

impl From<RenderRulesConfig> for RenderRules {
    fn from(config: RenderRulesConfig) -> Self {
        RenderRules {
            ignore_errors: config.ignore_errors,
            hard_break: match config.hard_break {
                HardBreakConfig::Spaces => HardBreakStyle::Spaces,
                HardBreakConfig::Empty => HardBreakStyle::Empty,
            },
        }
    }
}

impl From<&RenderRulesConfig> for RenderRules {
    fn from(config: &RenderRulesConfig) -> Self {
        config.clone().into()
    }
}

/// Where the CLI keeps documents stored for reuse.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub dir: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AdfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AdfConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(!config.render.rules.ignore_errors);
        assert_eq!(config.render.rules.hard_break, HardBreakConfig::Spaces);
        assert_eq!(config.cache.dir, ".adf-cache");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("render.rules.hard_break", "empty")
            .expect("override to apply")
            .set_override("render.rules.ignore_errors", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.render.rules.hard_break, HardBreakConfig::Empty);
        assert!(config.render.rules.ignore_errors);
    }

    #[test]
    fn rules_config_converts_to_render_rules() {
        let config = load_defaults().expect("defaults to deserialize");
        let rules: RenderRules = config.render.rules.into();
        assert_eq!(rules, RenderRules::default());
    }
}
