//! Configuration management for the compiler
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (jnc.toml)
//! - Environment variables (JNC__*)
//!
//! ## Example config file (jnc.toml):
//! ```toml
//! [output]
//! root_package = "gen"
//! runtime_package = "com.tailf.jnc"
//! directory = "src/gen"
//! classpath_schema_loading = false
//!
//! [resolver]
//! max_derivation_depth = 32
//!
//! [generation]
//! classes = true
//! schema = true
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for a compilation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Output placement
    #[serde(default)]
    pub output: OutputConfig,

    /// Type resolution limits
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// What to generate
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Package every generated class lives under
    #[serde(default = "default_root_package")]
    pub root_package: String,

    /// Package of the runtime library
    #[serde(default = "default_runtime_package")]
    pub runtime_package: String,

    /// Directory the renderer writes to; also where `.schema` files are loaded from
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Load `.schema` files from the classpath instead of the file system
    #[serde(default)]
    pub classpath_schema_loading: bool,
}

/// Resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Maximum number of derived/leafref hops before giving up
    #[serde(default = "default_max_derivation_depth")]
    pub max_derivation_depth: usize,
}

/// Generation switches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Build the class model
    #[serde(default = "default_true")]
    pub classes: bool,

    /// Build the tree metadata
    #[serde(default = "default_true")]
    pub schema: bool,
}

// Default value functions
fn default_root_package() -> String {
    "gen".to_string()
}

fn default_runtime_package() -> String {
    "com.tailf.jnc".to_string()
}

fn default_directory() -> PathBuf {
    PathBuf::from("gen")
}

fn default_max_derivation_depth() -> usize {
    32
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_package: default_root_package(),
            runtime_package: default_runtime_package(),
            directory: default_directory(),
            classpath_schema_loading: false,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_derivation_depth: default_max_derivation_depth(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            classes: true,
            schema: true,
        }
    }
}

impl CompilerConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = [
            "jnc.toml",
            ".jnc.toml",
            "config/jnc.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("com", "tailf", "jnc") {
            let xdg_config = config_dir.config_dir().join("jnc.toml");
            if xdg_config.exists() {
                builder = builder.add_source(
                    File::from(xdg_config).required(false)
                );
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // JNC__RESOLVER__MAX_DERIVATION_DEPTH=8
        builder = builder.add_source(
            Environment::with_prefix("JNC")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Root package joined with a module's camelized name
    pub fn module_package(&self, camelized_module: &str) -> String {
        if self.output.root_package.is_empty() {
            camelized_module.to_string()
        } else {
            format!("{}.{}", self.output.root_package, camelized_module)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert_eq!(config.output.root_package, "gen");
        assert_eq!(config.output.runtime_package, "com.tailf.jnc");
        assert_eq!(config.resolver.max_derivation_depth, 32);
        assert!(config.generation.classes);
        assert!(config.generation.schema);
    }

    #[test]
    fn test_serialize_config() {
        let config = CompilerConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("[resolver]"));
        assert!(toml_str.contains("[generation]"));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[output]\nroot_package = \"net.example\"\n\n[resolver]\nmax_derivation_depth = 4").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = CompilerConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.output.root_package, "net.example");
        assert_eq!(config.output.runtime_package, "com.tailf.jnc");
        assert_eq!(config.resolver.max_derivation_depth, 4);
        assert!(config.generation.schema);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jnc.toml");
        let path = path.to_str().unwrap();

        let mut config = CompilerConfig::default();
        config.output.classpath_schema_loading = true;
        config.save(path).unwrap();

        let loaded = CompilerConfig::load_from(Some(path)).unwrap();
        assert!(loaded.output.classpath_schema_loading);
    }

    #[test]
    fn test_module_package() {
        let mut config = CompilerConfig::default();
        assert_eq!(config.module_package("ietfInterfaces"), "gen.ietfInterfaces");
        config.output.root_package.clear();
        assert_eq!(config.module_package("m"), "m");
    }
}
