use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::paths;
use crate::ui::Style;

/// Default settings in the `[qtl]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QtlConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default model name (chat providers only).
    pub model: Option<String>,
    /// Default target language tag.
    pub to: Option<String>,
}

/// Which API a provider speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Cloud Translation v2.
    Google,
    /// OpenAI-compatible chat completions.
    #[default]
    OpenAi,
}

impl ProviderKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenAi => "openai",
        }
    }

    /// Whether the provider needs a model name.
    pub const fn uses_model(self) -> bool {
        matches!(self, Self::OpenAi)
    }
}

/// Configuration for a translation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    /// API base URL. Google providers fall back to the public endpoint.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Models offered by this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Google always needs a key; chat providers only when one is configured.
    pub const fn requires_api_key(&self) -> bool {
        matches!(self.kind, ProviderKind::Google)
            || self.api_key.is_some()
            || self.api_key_env.is_some()
    }
}

/// The complete configuration file, `~/.config/qtl/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub qtl: QtlConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider_name: String,
    pub kind: ProviderKind,
    /// Endpoint with the provider default applied.
    pub endpoint: String,
    /// Set for chat providers.
    pub model: Option<String>,
    pub api_key: Option<String>,
    /// Unvalidated target language tag.
    pub target_language: String,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub to: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values.
///
/// # Errors
///
/// Returns an error if the provider, the model of a chat provider, the target language,
/// or a required API key is missing, or if the provider is not configured.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let provider_name = options
        .provider
        .as_ref()
        .or(config_file.qtl.provider.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'provider'\n\n\
                 Please provide it via:\n  \
                 - CLI option: qtl --provider <name>\n  \
                 - Config file: ~/.config/qtl/config.toml"
            )
        })?;

    let provider_config = config_file.providers.get(&provider_name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        if available.is_empty() {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 No providers configured. Add providers to ~/.config/qtl/config.toml"
            )
        } else {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}\n\n\
                 Add providers to ~/.config/qtl/config.toml",
                available.join("\n  - ")
            )
        }
    })?;

    let kind = provider_config.kind;

    let model = if kind.uses_model() {
        let model = options
            .model
            .as_ref()
            .or(config_file.qtl.model.as_ref())
            .cloned()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Missing required configuration: 'model'\n\n\
                     Please provide it via:\n  \
                     - CLI option: qtl --model <name>\n  \
                     - Config file: ~/.config/qtl/config.toml"
                )
            })?;

        if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
            crate::warn!(
                "{} Model '{}' is not in the configured models list for '{}'\n\
                 Configured models: {}\n\
                 Proceeding anyway...\n",
                Style::warning("Warning:"),
                model,
                provider_name,
                provider_config.models.join(", ")
            );
        }
        Some(model)
    } else {
        None
    };

    let endpoint = match (&provider_config.endpoint, kind) {
        (Some(endpoint), _) => endpoint.clone(),
        (None, ProviderKind::Google) => crate::translation::GOOGLE_DEFAULT_ENDPOINT.to_string(),
        (None, ProviderKind::OpenAi) => {
            bail!(
                "Provider '{provider_name}' has no endpoint\n\n\
                 Set endpoint in [providers.{provider_name}] of ~/.config/qtl/config.toml"
            )
        }
    };

    let target_language = options
        .to
        .as_ref()
        .or(config_file.qtl.to.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'to' (target language)\n\n\
                 Please provide it via:\n  \
                 - CLI option: qtl --to <lang>\n  \
                 - Config file: ~/.config/qtl/config.toml"
            )
        })?;

    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/qtl/config.toml"
        );
    }

    Ok(ResolvedConfig {
        provider_name,
        kind,
        endpoint,
        model,
        api_key,
        target_language,
    })
}

/// Loads and saves the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Configuration lives at `$XDG_CONFIG_HOME/qtl/config.toml`
    /// or `~/.config/qtl/config.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the file, treating a missing file as empty. A file that exists but does not
    /// parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager {
            config_path: temp_dir.path().join("config.toml"),
        }
    }

    fn chat_provider(endpoint: &str, models: &[&str]) -> ProviderConfig {
        ProviderConfig {
            kind: ProviderKind::OpenAi,
            endpoint: Some(endpoint.to_string()),
            api_key: None,
            api_key_env: None,
            models: models.iter().map(ToString::to_string).collect(),
        }
    }

    fn google_provider(api_key: Option<&str>, api_key_env: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            kind: ProviderKind::Google,
            endpoint: None,
            api_key: api_key.map(ToString::to_string),
            api_key_env: api_key_env.map(ToString::to_string),
            models: vec![],
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let mut providers = HashMap::new();
        providers.insert(
            "ollama".to_string(),
            chat_provider("http://localhost:11434", &["gemma3:12b"]),
        );
        providers.insert("google".to_string(), google_provider(Some("key"), None));

        let config = ConfigFile {
            qtl: QtlConfig {
                provider: Some("google".to_string()),
                model: Some("gemma3:12b".to_string()),
                to: Some("es".to_string()),
            },
            providers,
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.qtl.provider, Some("google".to_string()));
        assert_eq!(loaded.qtl.to, Some("es".to_string()));
        assert_eq!(loaded.providers["google"].kind, ProviderKind::Google);
        assert_eq!(loaded.providers["ollama"].kind, ProviderKind::OpenAi);
    }

    #[test]
    fn test_parse_kind_from_toml() {
        let config: ConfigFile = toml::from_str(
            r#"
            [qtl]
            provider = "google"
            to = "es"

            [providers.google]
            kind = "google"
            api_key_env = "GOOGLE_TRANSLATE_API_KEY"

            [providers.local]
            endpoint = "http://localhost:11434"
            "#,
        )
        .unwrap();

        assert_eq!(config.providers["google"].kind, ProviderKind::Google);
        assert_eq!(config.providers["local"].kind, ProviderKind::OpenAi);
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        assert!(manager.load_or_default().unwrap().providers.is_empty());
    }

    #[test]
    fn test_load_or_default_reports_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[qtl\nprovider = ").unwrap();

        let err = manager.load_or_default().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_from_env() {
        // SAFETY: env-mutating tests are serialized
        unsafe {
            std::env::set_var("QTL_TEST_API_KEY", "test-key-value");
        }

        let provider = google_provider(Some("fallback-key"), Some("QTL_TEST_API_KEY"));
        assert_eq!(provider.get_api_key(), Some("test-key-value".to_string()));

        // SAFETY: env-mutating tests are serialized
        unsafe {
            std::env::remove_var("QTL_TEST_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_fallback() {
        let provider = google_provider(Some("fallback-key"), Some("QTL_TEST_NONEXISTENT_KEY"));
        assert_eq!(provider.get_api_key(), Some("fallback-key".to_string()));
    }

    #[test]
    fn test_provider_requires_api_key() {
        assert!(google_provider(None, None).requires_api_key());
        assert!(!chat_provider("http://localhost:11434", &[]).requires_api_key());

        let mut with_env = chat_provider("https://openrouter.ai/api", &[]);
        with_env.api_key_env = Some("OPENROUTER_API_KEY".to_string());
        assert!(with_env.requires_api_key());
    }

    // resolve_config tests

    fn create_test_options() -> ResolveOptions {
        ResolveOptions {
            to: Some("es".to_string()),
            provider: Some("ollama".to_string()),
            model: Some("gemma3:12b".to_string()),
        }
    }

    fn create_test_config() -> ConfigFile {
        let mut providers = HashMap::new();
        providers.insert(
            "ollama".to_string(),
            chat_provider("http://localhost:11434", &["gemma3:12b"]),
        );
        providers.insert(
            "google".to_string(),
            google_provider(None, Some("QTL_TEST_NONEXISTENT_API_KEY")),
        );
        providers.insert(
            "google-inline".to_string(),
            google_provider(Some("inline-key"), None),
        );

        ConfigFile {
            qtl: QtlConfig {
                provider: Some("ollama".to_string()),
                model: Some("gemma3:12b".to_string()),
                to: Some("es".to_string()),
            },
            providers,
        }
    }

    #[test]
    fn test_resolve_config_with_cli_options() {
        let resolved = resolve_config(&create_test_options(), &create_test_config()).unwrap();

        assert_eq!(resolved.provider_name, "ollama");
        assert_eq!(resolved.kind, ProviderKind::OpenAi);
        assert_eq!(resolved.endpoint, "http://localhost:11434");
        assert_eq!(resolved.model.as_deref(), Some("gemma3:12b"));
        assert_eq!(resolved.target_language, "es");
        assert!(resolved.api_key.is_none());
    }

    #[test]
    fn test_resolve_config_falls_back_to_file() {
        let resolved = resolve_config(&ResolveOptions::default(), &create_test_config()).unwrap();

        assert_eq!(resolved.provider_name, "ollama");
        assert_eq!(resolved.target_language, "es");
    }

    #[test]
    fn test_resolve_google_defaults() {
        let mut options = create_test_options();
        options.provider = Some("google-inline".to_string());
        options.model = None;
        let mut config = create_test_config();
        config.qtl.model = None;

        let resolved = resolve_config(&options, &config).unwrap();

        assert_eq!(resolved.kind, ProviderKind::Google);
        assert_eq!(resolved.endpoint, "https://translation.googleapis.com");
        assert!(resolved.model.is_none());
        assert_eq!(resolved.api_key.as_deref(), Some("inline-key"));
    }

    #[test]
    fn test_resolve_config_missing_provider() {
        let options = ResolveOptions {
            provider: None,
            ..create_test_options()
        };

        let err = resolve_config(&options, &ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("provider"));
    }

    #[test]
    fn test_resolve_config_provider_not_found_lists_available() {
        let mut options = create_test_options();
        options.provider = Some("nonexistent".to_string());

        let err = resolve_config(&options, &create_test_config()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("not found"));
        assert!(message.contains("- google\n  - google-inline\n  - ollama"));
    }

    #[test]
    fn test_resolve_config_missing_model_for_chat_provider() {
        let mut options = create_test_options();
        options.model = None;
        let mut config = create_test_config();
        config.qtl.model = None;

        let err = resolve_config(&options, &config).unwrap_err();
        assert!(err.to_string().contains("'model'"));
    }

    #[test]
    fn test_resolve_config_missing_target_language() {
        let mut options = create_test_options();
        options.to = None;
        let mut config = create_test_config();
        config.qtl.to = None;

        let err = resolve_config(&options, &config).unwrap_err();
        assert!(err.to_string().contains("'to'"));
    }

    #[test]
    fn test_resolve_config_chat_provider_without_endpoint() {
        let mut config = create_test_config();
        config.providers.get_mut("ollama").unwrap().endpoint = None;

        let err = resolve_config(&create_test_options(), &config).unwrap_err();
        assert!(err.to_string().contains("has no endpoint"));
    }

    #[test]
    #[serial]
    fn test_resolve_config_api_key_required_but_missing() {
        let mut options = create_test_options();
        options.provider = Some("google".to_string());

        let err = resolve_config(&options, &create_test_config()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("API key"));
        assert!(message.contains("QTL_TEST_NONEXISTENT_API_KEY"));
    }
}
