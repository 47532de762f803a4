use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, path::PathBuf};
use tokio::fs;

const CONFIG_FILE: &str = ".pps";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PpsConfig {
    /// Docker engine reachable over http, e.g. `localhost:2375`.
    /// Without it the local socket defaults are used.
    pub hostname: Option<String>,
    /// Connection timeout in seconds for the http transport.
    pub timeout: u64,
    /// Address the outbound-ip probe "connects" to. Nothing is sent.
    pub probe_address: String,
    /// Skip the probe and advertise this address in port urls.
    pub external_ip: Option<String>,
}

impl std::default::Default for PpsConfig {
    fn default() -> Self {
        Self {
            hostname: None,
            timeout: 4,
            probe_address: "8.8.8.8:80".into(),
            external_ip: None,
        }
    }
}

impl Display for PpsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let config_str = serde_yaml::to_string(&self).map_err(|_| std::fmt::Error)?;
        f.write_str(&config_str)?;
        Ok(())
    }
}

fn config_path() -> Option<PathBuf> {
    home::home_dir().map(|homepath| homepath.join(CONFIG_FILE))
}

/// Reads `~/.pps` when it exists. The file is never created.
pub async fn get_config() -> Result<PpsConfig> {
    let Some(filepath) = config_path() else {
        tracing::debug!("no home directory, using default config");
        return Ok(PpsConfig::default());
    };

    if !filepath.exists() {
        return Ok(PpsConfig::default());
    }

    let file = fs::read_to_string(&filepath)
        .await
        .with_context(|| format!("Couldn't read {}", filepath.display()))?;
    parse_config(&file).with_context(|| format!("Invalid config file {}", filepath.display()))
}

fn parse_config(contents: &str) -> Result<PpsConfig> {
    // An empty file is a valid "all defaults" config.
    if contents.trim().is_empty() {
        return Ok(PpsConfig::default());
    }
    Ok(serde_yaml::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        assert_eq!(parse_config("").unwrap(), PpsConfig::default());
        assert_eq!(parse_config("  \n").unwrap(), PpsConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = parse_config("hostname: localhost:2375\n").unwrap();
        assert_eq!(cfg.hostname.as_deref(), Some("localhost:2375"));
        assert_eq!(cfg.timeout, 4);
        assert_eq!(cfg.probe_address, "8.8.8.8:80");
        assert_eq!(cfg.external_ip, None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(parse_config("timeout: [not a number").is_err());
    }

    #[test]
    fn display_is_yaml_that_parses_back() {
        let cfg = PpsConfig {
            external_ip: Some("10.0.0.7".into()),
            ..Default::default()
        };
        assert_eq!(parse_config(&cfg.to_string()).unwrap(), cfg);
    }
}
