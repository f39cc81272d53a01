/*
[INPUT]:  YAML configuration file, command line and environment overrides
[OUTPUT]: Resolved connection settings and a ready ElementalClient
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use elemental_live_adapter::{ClientConfig, Credentials, ElementalClient};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Contents of the YAML configuration file; every field is optional
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Base URL of the appliance, e.g. `http://elemental.local`
    pub server_url: Option<String>,
    pub user: Option<String>,
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("parse config file {}", path.display()))?;
        Ok(config)
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server_url: Option<String>,
    pub user: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Final settings after applying overrides on top of the file
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub server_url: String,
    pub credentials: Option<Credentials>,
    pub client: ClientConfig,
}

impl ResolvedConfig {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        let server_url = overrides
            .server_url
            .or(file.server_url)
            .context("no server url: pass --server-url, set ELEMENTAL_SERVER_URL or add server_url to the config file")?;

        let user = overrides.user.or(file.user);
        let api_key = overrides.api_key.or(file.api_key);
        let credentials = match (user, api_key) {
            (Some(user), Some(api_key)) => Some(Credentials::new(user, api_key)),
            (None, None) => None,
            (Some(_), None) => bail!("user is set but api_key is missing"),
            (None, Some(_)) => bail!("api_key is set but user is missing"),
        };

        let defaults = ClientConfig::default();
        let client = ClientConfig {
            timeout: overrides
                .timeout_secs
                .or(file.timeout_secs)
                .map_or(defaults.timeout, Duration::from_secs),
            connect_timeout: file
                .connect_timeout_secs
                .map_or(defaults.connect_timeout, Duration::from_secs),
        };

        Ok(Self {
            server_url,
            credentials,
            client,
        })
    }

    pub fn build_client(&self) -> Result<ElementalClient> {
        ElementalClient::with_config(
            &self.server_url,
            self.credentials.clone(),
            self.client.clone(),
        )
        .context("create Elemental Live client")
    }

    /// Printable view with the api key masked
    pub fn redacted(&self) -> serde_json::Value {
        json!({
            "server_url": self.server_url,
            "user": self.credentials.as_ref().map(|c| c.user.clone()),
            "api_key": self.credentials.as_ref().map(|_| "********"),
            "timeout_secs": self.client.timeout.as_secs(),
            "connect_timeout_secs": self.client.connect_timeout.as_secs(),
        })
    }
}
