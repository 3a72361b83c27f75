use anyhow::{Context, Result};
use colored::*;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = ".branch2ports";

/// Resolved configuration. The base-port map keeps its insertion order so
/// output files list services in the order the config declares them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub base_port: IndexMap<String, u32>,
    pub output_file: String,
    pub offset_range: u32,
}

impl Default for Config {
    fn default() -> Self {
        let mut base_port = IndexMap::new();
        base_port.insert("frontend".to_string(), 3000);
        base_port.insert("backend".to_string(), 5000);
        base_port.insert("database".to_string(), 5432);

        Self {
            base_port,
            output_file: ".env".to_string(),
            offset_range: 1000,
        }
    }
}

/// A user config file; every field optional, merged over the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigOverlay {
    base_port: Option<IndexMap<String, u32>>,
    output_file: Option<String>,
    offset_range: Option<u32>,
}

impl Config {
    /// Load a config file, merging it over the defaults. A missing file is
    /// normal (first run); malformed JSON is reported and the defaults are
    /// used. Neither case aborts the invocation.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            println!(
                "Configuration file {} not found. Using default settings.",
                path.display()
            );
            return Self::default();
        }

        match Self::parse_overlay(path) {
            Ok(overlay) => Self::default().merged_with(overlay),
            Err(e) => {
                eprintln!("{} Failed to load configuration file: {e}", "❌".red());
                println!("Using default settings.");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file {}", path.display()))?;

        Ok(())
    }

    fn parse_overlay(path: &Path) -> Result<ConfigOverlay> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let overlay = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;

        Ok(overlay)
    }

    fn merged_with(mut self, overlay: ConfigOverlay) -> Self {
        if let Some(base_port) = overlay.base_port {
            // User entries extend the default map; existing services keep
            // their position, new ones are appended
            self.base_port.extend(base_port);
        }
        if let Some(output_file) = overlay.output_file {
            self.output_file = output_file;
        }
        if let Some(offset_range) = overlay.offset_range {
            self.offset_range = offset_range;
        }

        self
    }
}
