//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/brochat/config.toml` by default.
//!
//! The access token supports secret references:
//! - `pass::path/in/store` resolved via `pass show`
//! - `env::VAR_NAME` resolved from the environment
//! - plain text used as-is

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::auth::{AuthInfo, DEFAULT_TOKEN_TYPE};
use crate::error::{ClientError, ClientResult};
use crate::secret;

/// Configuration for the brochat client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Server/connection settings.
    pub server: ServerSettings,

    /// Credentials.
    pub auth: AuthSettings,
}

/// Server/connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Base address of the BroChat server.
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// Connect timeout in seconds.
    pub connect_timeout: u64,

    /// User-Agent header; defaults to `brochat/<version>`.
    pub user_agent: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: 30,
            connect_timeout: 10,
            user_agent: None,
        }
    }
}

impl ServerSettings {
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("brochat/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Returns the configured base address.
    pub fn base_url(&self) -> ClientResult<&str> {
        self.base_url.as_deref().ok_or_else(|| {
            ClientError::Config(format!(
                "server address not set. Add to {}:\n  \
                 [server]\n  \
                 base_url = \"https://chat.example.com\"\n\n  \
                 Or pass --base-url",
                ClientConfig::default_path().display()
            ))
        })
    }
}

/// Credential settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Authorization scheme.
    pub token_type: String,

    /// Access token (supports `pass::` and `env::` prefixes).
    pub access_token: Option<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            access_token: None,
        }
    }
}

impl AuthSettings {
    /// Resolves the access token into request credentials.
    pub fn resolve(&self) -> ClientResult<AuthInfo> {
        let raw = self.access_token.as_deref().ok_or_else(|| {
            ClientError::Config(
                "access_token is missing from [auth] section in config.toml".to_string(),
            )
        })?;
        let token = secret::resolve(raw)?;
        if token.is_empty() {
            return Err(ClientError::Config("access_token is empty".to_string()));
        }
        Ok(AuthInfo::new(self.token_type.clone(), token))
    }
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if absent.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse config: {}", e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("brochat")
    }

    /// Applies command-line overrides on top of the file settings.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        access_token: Option<String>,
        token_type: Option<String>,
    ) -> Self {
        if base_url.is_some() {
            self.server.base_url = base_url;
        }
        if access_token.is_some() {
            self.auth.access_token = access_token;
        }
        if let Some(token_type) = token_type {
            self.auth.token_type = token_type;
        }
        self
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> ClientResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert!(!config.debug);
        assert_eq!(config.server.timeout, 30);
        assert_eq!(config.server.connect_timeout, 10);
        assert_eq!(config.auth.token_type, "Bearer");
        assert!(config.server.user_agent().starts_with("brochat/"));
    }

    #[test]
    fn parses_full_file() {
        let toml_content = r#"
debug = true

[server]
base_url = "https://chat.example.com"
timeout = 5
user_agent = "custom/1.0"

[auth]
token_type = "Token"
access_token = "plain-token"
"#;
        let config: ClientConfig = toml::from_str(toml_content).unwrap();
        assert!(config.debug);
        assert_eq!(config.server.timeout, 5);
        assert_eq!(config.server.connect_timeout, 10);
        assert_eq!(config.server.user_agent(), "custom/1.0");
        assert_eq!(config.server.base_url().unwrap(), "https://chat.example.com");

        let auth = config.auth.resolve().unwrap();
        assert_eq!(auth.header_value(), "Token plain-token");
    }

    #[test]
    fn missing_base_url_errors() {
        let err = ServerSettings::default().base_url().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn missing_token_errors() {
        let err = AuthSettings::default().resolve().unwrap_err();
        assert!(err.to_string().contains("access_token"));
    }

    #[test]
    fn token_from_env_reference() {
        unsafe {
            std::env::set_var("_BROCHAT_CONFIG_TEST_TOKEN", "env-token");
        }
        let config: ClientConfig =
            toml::from_str("[auth]\naccess_token = \"env::_BROCHAT_CONFIG_TEST_TOKEN\"\n").unwrap();
        let auth = config.auth.resolve().unwrap();
        assert_eq!(auth.header_value(), "Bearer env-token");
        unsafe {
            std::env::remove_var("_BROCHAT_CONFIG_TEST_TOKEN");
        }
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbase_url = \"http://localhost:8080\"").unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("http://localhost:8080")
        );
    }

    #[test]
    fn load_from_invalid_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nbase_url = ").unwrap();
        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = ClientConfig::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn overrides_replace_file_values() {
        let config: ClientConfig = toml::from_str(
            "[server]\nbase_url = \"https://a.example.com\"\n[auth]\naccess_token = \"file\"\n",
        )
        .unwrap();
        let config = config.with_overrides(None, Some("cli".to_string()), Some("Token".to_string()));
        assert_eq!(config.server.base_url.as_deref(), Some("https://a.example.com"));
        assert_eq!(config.auth.resolve().unwrap().header_value(), "Token cli");
    }

    #[test]
    fn toml_round_trip() {
        let mut config = ClientConfig::default();
        config.server.base_url = Some("https://chat.example.com".to_string());
        let parsed: ClientConfig = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.server, config.server);
        assert_eq!(parsed.auth, config.auth);
    }
}
