// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Configuration loading.

use serde::Deserialize;

use crate::host_filter::HostFilter;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TargetConfig {
    /// Substring a flow's host must contain to be kept (case-sensitive).
    #[serde(default)]
    pub host_contains: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Output path for the live export document.
    #[serde(default = "default_live_export")]
    pub live_export: String,
}

fn default_live_export() -> String {
    "traffic-export.json".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            live_export: default_live_export(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// TOML format:
    ///
    /// [target]
    /// host_contains = "example.com"
    ///
    /// [output]
    /// live_export = "traffic-export.json"
    pub async fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let s = tokio::fs::read_to_string(path.as_ref()).await?;
        let cfg: Self = toml::from_str(&s)?;
        Ok(cfg)
    }

    /// Resolve the target host filter. A CLI value wins over the config file;
    /// an empty target would match every flow, so it is rejected up front.
    pub fn resolve_host(&self, cli_host: Option<String>) -> anyhow::Result<HostFilter> {
        let needle = cli_host.unwrap_or_else(|| self.target.host_contains.clone());
        anyhow::ensure!(
            !needle.is_empty(),
            "no target host configured; pass --host or set host_contains under [target]"
        );
        Ok(HostFilter::new(needle))
    }
}
