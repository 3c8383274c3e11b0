use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub output: OutputSettings,
}

/// How command results are printed
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    /// Indent JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, env vars, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(cli.config.clone())?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        Ok(settings)
    }

    /// Load `<root>/provisioning.{toml,yaml,json}` if present
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        Self::load(Path::new(root).join("provisioning"))
    }

    fn load(config_path: PathBuf) -> Result<Self, anyhow::Error> {
        tracing::debug!("Loading settings from {}", config_path.display());

        let s = Config::builder()
            .set_default("output.format", "json")?
            .set_default("output.pretty", true)?
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix("PROVISIONING")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if cli.compact {
            self.output.pretty = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert!(settings.output.pretty);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["provisioning-form", "--format", "yaml", "--compact", "layout"]);
        let mut settings = Settings::default();
        settings.apply_cli_overrides(&cli);

        assert_eq!(settings.output.format, OutputFormat::Yaml);
        assert!(!settings.output.pretty);
    }

    #[test]
    fn test_no_overrides_keep_file_values() {
        let cli = Cli::parse_from(["provisioning-form", "fields"]);
        let mut settings = Settings {
            output: OutputSettings {
                format: OutputFormat::Yaml,
                pretty: false,
            },
        };
        settings.apply_cli_overrides(&cli);

        assert_eq!(settings.output.format, OutputFormat::Yaml);
        assert!(!settings.output.pretty);
    }
}
