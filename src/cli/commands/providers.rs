//! Provider listing command handler.

use anyhow::Result;

use crate::config::{ConfigFile, ConfigManager, ProviderConfig};
use crate::ui::Style;

/// Prints configured providers to stdout.
///
/// With `specific_provider`, shows the details of that provider only.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;
    print!("{}", render_providers(&config, specific_provider)?);
    Ok(())
}

fn render_providers(config: &ConfigFile, specific_provider: Option<&str>) -> Result<String> {
    let mut out = String::new();

    if config.providers.is_empty() {
        out.push_str("No providers configured.\n");
        out.push_str("Add providers to ~/.config/qtl/config.toml\n");
        return Ok(out);
    }

    let default_provider = config.qtl.provider.as_deref();
    let marker = |name: &str| {
        if default_provider == Some(name) {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        }
    };

    if let Some(provider_name) = specific_provider {
        let Some(provider) = config.providers.get(provider_name) else {
            anyhow::bail!("Provider '{provider_name}' not found");
        };
        out.push_str(&format!(
            "Provider: {}{}\n",
            Style::value(provider_name),
            marker(provider_name)
        ));
        out.push_str(&format!("  kind     = {}\n", provider.kind.as_str()));
        out.push_str(&format!("  endpoint = {}\n", endpoint_of(provider)));
        if provider.requires_api_key() {
            let has_key = provider.get_api_key().is_some();
            out.push_str(&format!(
                "  api_key  = {}\n",
                if has_key { "(set)" } else { "(not set)" }
            ));
        }
        if provider.kind.uses_model() {
            if provider.models.is_empty() {
                out.push_str("  models   = (none configured)\n");
            } else {
                out.push_str("  models:\n");
                for model in &provider.models {
                    out.push_str(&format!("    - {model}\n"));
                }
            }
        }
    } else {
        out.push_str(&format!("{}\n\n", Style::header("Configured providers:")));
        let mut names: Vec<_> = config.providers.keys().collect();
        names.sort_unstable();
        for name in names {
            let provider = &config.providers[name];
            out.push_str(&format!("  {}{}\n", Style::value(name), marker(name)));
            out.push_str(&format!(
                "    {} {} ({})\n",
                Style::label("endpoint:"),
                endpoint_of(provider),
                provider.kind.as_str()
            ));
            if !provider.models.is_empty() {
                out.push_str(&format!(
                    "    {} {}\n",
                    Style::label("models:"),
                    provider.models.join(", ")
                ));
            }
        }
    }

    Ok(out)
}

fn endpoint_of(provider: &ProviderConfig) -> &str {
    provider
        .endpoint
        .as_deref()
        .unwrap_or(crate::translation::GOOGLE_DEFAULT_ENDPOINT)
}
