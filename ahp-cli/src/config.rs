/// Config file loading and creation for the ahp CLI.
///
/// Config lives at ~/.config/ahp/config.toml.
/// All fields are optional. CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

/// Decimal places used in tables when neither flag nor config sets one.
pub const DEFAULT_PRECISION: usize = 4;

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AhpConfig {
    pub json: Option<bool>,
    pub precision: Option<usize>,
    pub chart: Option<bool>,
    pub strict: Option<bool>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# ahp configuration
# All values here can be overridden by CLI flags.

# Print results as JSON instead of tables
# json = false

# Decimal places shown in tables
# precision = 4

# Draw bar charts for criteria weights and final scores
# chart = true

# Exit with status 2 when any judgment matrix fails the consistency check
# strict = false
";

/// Returns the default config path: ~/.config/ahp/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("ahp").join("config.toml")
}

pub fn parse_config(content: &str) -> Result<AhpConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> AhpConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AhpConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config(path: &Path) {
    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap_or_else(|e| {
            bail(format!("Failed to create directory {}: {e}", parent.display()))
        });
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));
}
