// config.rs - Configuration for delegacy-core
use delegacy_common::prelude::*;
use delegacy_rpc::NetworkEndpoint;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Program deployment on one network.
///
/// Accepts both the snake_case keys of TOML/YAML configs and the
/// `contractAddress`/`rpcUrl` keys of a front-end `env.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Address the delegation program is published under
    #[serde(alias = "contractAddress")]
    pub program_address: Address,

    /// Fullnode REST base, e.g. `https://fullnode.devnet.aptoslabs.com/v1`
    #[serde(alias = "rpcUrl")]
    pub rpc_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Program deployments keyed by lower-case network name
    pub networks: BTreeMap<String, EndpointConfig>,

    /// Block explorer base URL
    pub explorer_url: String,

    /// Wallet bridge JSON-RPC endpoint
    pub wallet_url: String,

    /// Timeout for every fullnode and wallet request in milliseconds
    pub request_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            networks: BTreeMap::new(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            wallet_url: "http://127.0.0.1:8790".to_string(),
            request_timeout_ms: 30_000,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load a config file, picking the format from its extension
    pub fn load(path: impl AsRef<Path>) -> DelegacyResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "toml" => toml::from_str(&text)
                .map_err(|e| DelegacyError::config(format!("{}: {}", path.display(), e))),
            "yaml" | "yml" => serde_yaml::from_str(&text)
                .map_err(|e| DelegacyError::config(format!("{}: {}", path.display(), e))),
            "json" => Self::from_json(&text),
            other => Err(DelegacyError::config(format!(
                "Unknown config format '{}' for {}",
                other,
                path.display()
            ))),
        }
    }

    /// Parse either a full JSON config or a bare `env.json` endpoint table
    pub fn from_json(text: &str) -> DelegacyResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        if value.get("networks").is_some() {
            return Ok(serde_json::from_value(value)?);
        }

        let networks: BTreeMap<String, EndpointConfig> = serde_json::from_value(value)?;
        Ok(Self {
            networks: networks
                .into_iter()
                .map(|(name, endpoint)| (name.to_ascii_lowercase(), endpoint))
                .collect(),
            ..Self::default()
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> DelegacyResult<()> {
        for (name, endpoint) in &self.networks {
            let network: Network = name.parse()?;
            if network.as_str() != name {
                return Err(DelegacyError::config(format!(
                    "network key '{}' must be lower-case",
                    name
                )));
            }
            ValidationUtils::validate_hex_address(
                endpoint.program_address.as_str(),
                &format!("{} program_address", name),
            )?;
            if !is_http_url(&endpoint.rpc_url) {
                return Err(DelegacyError::config(format!(
                    "{} rpc_url must be an http(s) URL, got '{}'",
                    name, endpoint.rpc_url
                )));
            }
        }

        if !is_http_url(&self.wallet_url) {
            return Err(DelegacyError::config(format!(
                "wallet_url must be an http(s) URL, got '{}'",
                self.wallet_url
            )));
        }

        if !is_http_url(&self.explorer_url) {
            return Err(DelegacyError::config(format!(
                "explorer_url must be an http(s) URL, got '{}'",
                self.explorer_url
            )));
        }

        if self.request_timeout_ms == 0 {
            return Err(DelegacyError::config(
                "request_timeout_ms must be greater than 0",
            ));
        }

        if self.networks.is_empty() {
            warn!("No networks configured; every chain operation will be refused");
        }

        Ok(())
    }

    /// Deployment for `network`; unconfigured networks are refused, never defaulted
    pub fn endpoint(&self, network: Network) -> DelegacyResult<NetworkEndpoint> {
        let endpoint = self
            .networks
            .get(network.as_str())
            .ok_or_else(|| DelegacyError::unsupported_network(network.as_str()))?;

        Ok(NetworkEndpoint {
            network,
            program_address: endpoint.program_address.clone(),
            rpc_url: endpoint.rpc_url.clone(),
        })
    }

    /// Add or replace the deployment for one network
    pub fn set_endpoint(&mut self, network: Network, endpoint: EndpointConfig) {
        self.networks.insert(network.as_str().to_string(), endpoint);
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn explorer(&self) -> Explorer {
        Explorer::new(&self.explorer_url)
    }
}

fn is_http_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}
