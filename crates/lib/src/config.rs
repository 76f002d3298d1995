//! Optional YAML configuration pointed at by an environment variable.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use fn_error_context::context;
use serde::{Deserialize, Serialize};

/// The environment variable naming the configuration file.
pub const CONFIG_VAR: &str = "CLOUDIMG_CONFIG";

/// Defaults for the image family and the registry tool. Values given on
/// the command line take precedence.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CloudConfig {
    /// Registry command line tool to run
    pub openstack: Option<String>,
    /// Default release
    pub release: Option<String>,
    /// Default channel
    pub channel: Option<String>,
    /// Default architecture
    pub arch: Option<String>,
}

impl CloudConfig {
    /// Load the file named by [`CONFIG_VAR`], if that variable is set.
    #[context("Loading configuration")]
    pub fn load() -> Result<Option<Self>> {
        let Some(config) = std::env::var_os(CONFIG_VAR) else {
            return Ok(None);
        };
        Self::load_from(Path::new(&config)).map(Some)
    }

    /// Load configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let f = File::open(path)
            .with_context(|| format!("Opening {}", path.display()))
            .map(BufReader::new)?;
        let r = serde_yaml::from_reader(f)
            .with_context(|| format!("Parsing config from {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(r)
    }
}
