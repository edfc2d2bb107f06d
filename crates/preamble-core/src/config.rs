// Configuration loading and parsing (app.toml, credentials.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable that overrides the credential list from
/// credentials.toml. Comma-separated.
pub const CREDENTIALS_ENV_VAR: &str = "GEMINI_API_KEYS";

/// The shipped `defaults/app.toml`, written into `config/` when neither
/// `defaults/` nor `config/` exists under the base directory.
const BUILTIN_APP_TOML: &str = include_str!("../../../defaults/app.toml");

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub explainer: ExplainerConfig,
    pub history: HistoryConfig,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// app.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire app.toml file.
#[derive(Debug, Clone, Deserialize)]
struct AppFile {
    llm: LlmConfig,
    explainer: ExplainerConfig,
    history: HistoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Display name used in source labels, e.g. "Gemini (Key 2)".
    pub provider: String,
    pub model: String,
    pub base_url: String,
    /// Per-request HTTP timeout. Requests never time out when omitted.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainerConfig {
    pub default_depth: u8,
    pub explain_in_hindi: bool,
    pub compare_with_india: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    pub display_limit: usize,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub gemini_api_keys: Vec<String>,
}

// Keys stay out of debug output (and therefore out of logs).
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("gemini_api_keys", &format!("<{} keys>", self.gemini_api_keys.len()))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/app.toml` and (optionally)
/// `config/credentials.toml`, both relative to the given `base_dir`.
///
/// This is the lower-level loading primitive: it does not copy defaults and
/// does not look at the environment. Prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- app.toml (required) ---
    let app_path = config_dir.join("app.toml");
    let app_text = read_file(&app_path)?;
    let app_file: AppFile = toml::from_str(&app_text).map_err(|e| ConfigError::ParseError {
        path: app_path.clone(),
        source: e,
    })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        llm: app_file.llm,
        explainer: app_file.explainer,
        history: app_file.history,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
/// A base directory with neither `defaults/` nor `config/` gets the built-in
/// `app.toml`.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if config_dir.exists() {
            return Ok(vec![]);
        }
        // Installed outside the repo: seed app.toml from the built-in copy.
        return write_builtin_app_config(&config_dir).map(|path| vec![path]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

fn write_builtin_app_config(config_dir: &Path) -> Result<PathBuf, ConfigError> {
    std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", config_dir.display()),
    })?;
    let target = config_dir.join("app.toml");
    std::fs::write(&target, BUILTIN_APP_TOML).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;
    Ok(target)
}

/// Convenience wrapper: resolves the base directory, copies defaults, loads
/// the files, then applies the `GEMINI_API_KEYS` environment override.
pub fn load_config() -> Result<Config, ConfigError> {
    let base_dir = resolve_base_dir()?;
    debug!("Using config base directory {}", base_dir.display());
    ensure_config_files(&base_dir)?;
    let mut config = load_config_from(&base_dir)?;
    apply_credentials_override(&mut config, std::env::var(CREDENTIALS_ENV_VAR).ok().as_deref());
    Ok(config)
}

/// The current directory when it carries `config/` or `defaults/`,
/// otherwise the platform configuration directory.
pub fn resolve_base_dir() -> Result<PathBuf, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    let platform = directories::ProjectDirs::from("org", "samvidhan", "preamble-explorer")
        .map(|dirs| dirs.config_dir().to_path_buf());
    Ok(choose_base_dir(cwd, platform))
}

fn choose_base_dir(cwd: PathBuf, platform: Option<PathBuf>) -> PathBuf {
    if cwd.join("config").exists() || cwd.join("defaults").exists() {
        return cwd;
    }
    platform.unwrap_or(cwd)
}

/// Replace the configured credential list with the comma-separated value of
/// the environment override, when one is set and non-blank.
pub fn apply_credentials_override(config: &mut Config, env_value: Option<&str>) {
    let Some(raw) = env_value else {
        return;
    };
    let keys = parse_key_list(raw);
    if keys.is_empty() {
        return;
    }
    debug!("Credential list overridden from {} ({} keys)", CREDENTIALS_ENV_VAR, keys.len());
    config.credentials.gemini_api_keys = keys;
}

/// Split a comma-separated key list, trimming whitespace and dropping
/// empty segments.
pub fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let llm_fields: &[(&str, &str)] = &[
        ("llm.provider", config.llm.provider.as_str()),
        ("llm.model", config.llm.model.as_str()),
        ("llm.base_url", config.llm.base_url.as_str()),
    ];
    for (name, val) in llm_fields {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if config.llm.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError {
            field: "llm.timeout_secs".into(),
            message: "must be > 0 when set".into(),
        });
    }

    let depth = config.explainer.default_depth;
    if !(1..=3).contains(&depth) {
        return Err(ConfigError::ValidationError {
            field: "explainer.default_depth".into(),
            message: format!("must be between 1 and 3 inclusive, got {depth}"),
        });
    }

    if config.history.display_limit == 0 {
        return Err(ConfigError::ValidationError {
            field: "history.display_limit".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
