//! Configuration file management for corelytics.
//!
//! Provides a TOML-based config file at `~/.config/corelytics/config.toml`
//! and a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use corelytics_core::gateway::OpenAiSettings;
use corelytics_core::gateway::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_TREE_PATH: &str = "data/email_logic_map.json";
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub const ENV_TREE_PATH: &str = "CORELYTICS_TREE_PATH";
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "CORELYTICS_MODEL";
pub const ENV_BASE_URL: &str = "CORELYTICS_LLM_BASE_URL";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub tree: TreeSection,
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TreeSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LlmSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the corelytics config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/corelytics` or
/// `~/.config/corelytics`, also on macOS.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("corelytics");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("corelytics")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))
}

/// Load the default config file. A missing file is not an error.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    load_config_from(&path).map(Some)
}

/// Serialize and write `config` to `path`, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix since the file may hold an API key.
pub fn save_config_to(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Generation service settings. The key stays optional until a command
/// actually needs the gateway.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    /// Settings for the OpenAI-compatible client. Fails without an API key.
    pub fn settings(&self) -> Result<OpenAiSettings> {
        let Some(api_key) = self.api_key.clone() else {
            bail!(
                "API key not found; set {ENV_API_KEY} or run `corelytics init --api-key <KEY>`"
            );
        };
        Ok(OpenAiSettings {
            api_key,
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub request_timeout: Duration,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone)]
pub struct CorelyticsConfig {
    pub tree_path: PathBuf,
    pub llm: LlmConfig,
    pub server: ServerConfig,
}

impl CorelyticsConfig {
    /// Resolve from the process environment and the default config file.
    ///
    /// - Tree path: `cli_tree` > `CORELYTICS_TREE_PATH` > `tree.path` > `data/email_logic_map.json`
    /// - API key: `OPENAI_API_KEY` > `llm.api_key` > none
    /// - Model: `CORELYTICS_MODEL` > `llm.model` > `gpt-4o-mini`
    /// - Base URL: `CORELYTICS_LLM_BASE_URL` > `llm.base_url` > OpenAI
    pub fn resolve(cli_tree: Option<&Path>) -> Result<Self> {
        let file = load_config()?;
        Ok(Self::resolve_with(cli_tree, file, |key| std::env::var(key).ok()))
    }

    /// Resolve from explicit inputs. `env_var` looks up a variable by name.
    pub fn resolve_with(
        cli_tree: Option<&Path>,
        file: Option<ConfigFile>,
        env_var: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let env = |key: &str| env_var(key).filter(|v| !v.trim().is_empty());

        let tree_path = cli_tree
            .map(Path::to_path_buf)
            .or_else(|| env(ENV_TREE_PATH).map(PathBuf::from))
            .or(file.tree.path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TREE_PATH));

        let llm = LlmConfig {
            api_key: env(ENV_API_KEY).or(file.llm.api_key),
            model: env(ENV_MODEL)
                .or(file.llm.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: env(ENV_BASE_URL)
                .or(file.llm.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature: file.llm.temperature.unwrap_or(0.9),
            max_tokens: file.llm.max_tokens.unwrap_or(1000),
        };

        let server = ServerConfig {
            bind: file.server.bind.unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port: file.server.port.unwrap_or(DEFAULT_PORT),
            request_timeout: Duration::from_secs(
                file.server
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        };

        Self {
            tree_path,
            llm,
            server,
        }
    }
}

/// Show the first and last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
