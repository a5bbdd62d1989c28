//! XDG-style locations for the configuration file and the translation cache.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "qtl";

/// `$XDG_CONFIG_HOME/qtl`, or `~/.config/qtl` when the variable is unset or empty.
pub fn config_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// `$XDG_CACHE_HOME/qtl`, or `~/.cache/qtl` when the variable is unset or empty.
pub fn cache_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CACHE_HOME", ".cache")
}

fn xdg_dir(var: &str, fallback: &str) -> Result<PathBuf> {
    match std::env::var(var) {
        Ok(base) if !base.is_empty() => Ok(PathBuf::from(base).join(APP_DIR)),
        _ => {
            let home = dirs::home_dir().context("Failed to determine home directory")?;
            Ok(home.join(fallback).join(APP_DIR))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        var: &'static str,
        original: Option<String>,
    }

    impl EnvGuard {
        fn set(var: &'static str, value: Option<&str>) -> Self {
            let original = std::env::var(var).ok();
            // SAFETY: env-mutating tests are serialized
            unsafe {
                match value {
                    Some(v) => std::env::set_var(var, v),
                    None => std::env::remove_var(var),
                }
            }
            Self { var, original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: env-mutating tests are serialized
            unsafe {
                match &self.original {
                    Some(v) => std::env::set_var(self.var, v),
                    None => std::env::remove_var(self.var),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_default() {
        let _guard = EnvGuard::set("XDG_CONFIG_HOME", None);
        assert!(config_dir().unwrap().ends_with(".config/qtl"));
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        let _guard = EnvGuard::set("XDG_CONFIG_HOME", Some("/custom/config"));
        assert_eq!(config_dir().unwrap(), PathBuf::from("/custom/config/qtl"));
    }

    #[test]
    #[serial]
    fn test_empty_xdg_value_is_ignored() {
        let _guard = EnvGuard::set("XDG_CACHE_HOME", Some(""));
        assert!(cache_dir().unwrap().ends_with(".cache/qtl"));
    }

    #[test]
    #[serial]
    fn test_cache_dir_xdg_override() {
        let _guard = EnvGuard::set("XDG_CACHE_HOME", Some("/custom/cache"));
        assert_eq!(cache_dir().unwrap(), PathBuf::from("/custom/cache/qtl"));
    }
}
