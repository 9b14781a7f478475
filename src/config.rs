use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Web server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Ledger submission gateway configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LedgerConfig {
    /// HTTP gateway that signs and submits payments to the test network
    pub gateway_url: String,
    /// Explorer base URL used to build transaction links
    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,
    pub timeout_secs: u64,
}

fn default_explorer_url() -> String {
    "https://testnet.xrpl.org".to_string()
}

impl LedgerConfig {
    /// Explorer link for a transaction hash
    pub fn explorer_link(&self, hash: &str) -> String {
        format!("{}/transactions/{}", self.explorer_url.trim_end_matches('/'), hash)
    }
}

/// Chat-completion model service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    pub timeout_secs: u64,
}

fn default_temperature() -> f32 {
    0.3
}

/// External payments backend configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_secs: u64,
}

/// Speech service configuration (transcription + synthesis)
#[derive(Debug, Deserialize, Clone)]
pub struct SpeechConfig {
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    pub transcription_model: String,
    pub tts_model: String,
    pub tts_voice: String,
    /// Directory synthesized audio files are written to and served from
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
    pub timeout_secs: u64,
}

fn default_audio_dir() -> String {
    "public/audio".to_string()
}

/// A named wallet entry as configured (address + signing secret)
#[derive(Debug, Deserialize, Clone)]
pub struct WalletEntryConfig {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub secret: String,
}

/// Named wallet directory configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WalletsConfig {
    /// Wallet name used when a request only says "sender"
    pub default_sender: String,
    /// Wallet name used when a request only says "recipient"
    pub default_recipient: String,
    #[serde(default)]
    pub entries: HashMap<String, WalletEntryConfig>,
}

/// Root application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub web: WebConfig,
    pub database: DatabaseConfig,
    pub ledger: LedgerConfig,
    pub model: ModelConfig,
    pub backend: BackendConfig,
    pub speech: SpeechConfig,
    pub wallets: WalletsConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default config file
            .add_source(File::with_name("config/default").required(false))
            // Override with local config if present
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (prefix: PAYBRIDGE_)
            // e.g., PAYBRIDGE__MODEL__API_KEY, PAYBRIDGE__WEB__PORT
            .add_source(
                Environment::with_prefix("PAYBRIDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Initialize the global config singleton
    pub fn init() -> Result<&'static Self, ConfigError> {
        let config = Self::load()?;
        Ok(CONFIG.get_or_init(|| config))
    }

    /// Get reference to the global config
    pub fn get() -> &'static Self {
        CONFIG.get().expect("Config not initialized. Call AppConfig::init() first.")
    }
}

/// Helper to join service URLs with proper trailing slash handling
pub fn endpoint(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            endpoint("http://localhost:8200/", "/submit"),
            "http://localhost:8200/submit"
        );
        assert_eq!(
            endpoint("http://localhost:8200", "submit"),
            "http://localhost:8200/submit"
        );
    }

    #[test]
    fn test_explorer_link() {
        let ledger = LedgerConfig {
            gateway_url: "http://localhost:8200".to_string(),
            explorer_url: "https://testnet.xrpl.org/".to_string(),
            timeout_secs: 60,
        };
        assert_eq!(
            ledger.explorer_link("ABC123"),
            "https://testnet.xrpl.org/transactions/ABC123"
        );
    }
}
