use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

use crate::paths;

/// Identifies one cached translation.
///
/// `scope` names the backend configuration that produced the value (provider kind,
/// endpoint, model, prompt), so switching providers never returns stale translations.
#[derive(Debug, Clone)]
pub struct CacheKey<'a> {
    pub source_text: &'a str,
    pub target_language: &'a str,
    pub scope: &'a str,
}

impl CacheKey<'_> {
    pub fn digest(&self) -> String {
        let cache_input = serde_json::json!({
            "source_text": self.source_text,
            "target_language": self.target_language,
            "scope": self.scope,
        });

        let mut hasher = Sha256::new();
        hasher.update(cache_input.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

pub struct CacheManager {
    db_path: PathBuf,
}

impl CacheManager {
    /// Opens (creating if needed) `translations.db` in the cache directory.
    pub fn new() -> Result<Self> {
        let cache_dir = paths::cache_dir()?;

        std::fs::create_dir_all(&cache_dir).with_context(|| {
            format!("Failed to create cache directory: {}", cache_dir.display())
        })?;

        Self::open(cache_dir.join("translations.db"))
    }

    pub fn open(db_path: PathBuf) -> Result<Self> {
        let manager = Self { db_path };
        manager.init_db()?;
        Ok(manager)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS translations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cache_key TEXT UNIQUE NOT NULL,
                source_text TEXT NOT NULL,
                translated_text TEXT NOT NULL,
                target_language TEXT NOT NULL,
                scope TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                accessed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create translations table")?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open cache database: {}", self.db_path.display()))
    }

    pub fn get(&self, key: &CacheKey<'_>) -> Result<Option<String>> {
        let cache_key = key.digest();
        let conn = self.connect()?;

        let result: Option<String> = conn
            .query_row(
                "SELECT translated_text FROM translations WHERE cache_key = ?1",
                [&cache_key],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to query translation cache")?;

        if result.is_some() {
            conn.execute(
                "UPDATE translations SET accessed_at = CURRENT_TIMESTAMP WHERE cache_key = ?1",
                [&cache_key],
            )?;
        }

        Ok(result)
    }

    pub fn put(&self, key: &CacheKey<'_>, translated_text: &str) -> Result<()> {
        let cache_key = key.digest();
        let conn = self.connect()?;

        conn.execute(
            "INSERT OR REPLACE INTO translations
             (cache_key, source_text, translated_text, target_language, scope)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            [
                cache_key.as_str(),
                key.source_text,
                translated_text,
                key.target_language,
                key.scope,
            ],
        )
        .context("Failed to insert translation into cache")?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> CacheManager {
        CacheManager::open(temp_dir.path().join("translations.db")).unwrap()
    }

    fn key<'a>(source_text: &'a str, target_language: &'a str, scope: &'a str) -> CacheKey<'a> {
        CacheKey {
            source_text,
            target_language,
            scope,
        }
    }

    #[test]
    fn test_cache_miss() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let result = manager.get(&key("Continue Shopping", "es", "google")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_cache_hit() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        let key = key("Your cart is empty.", "es", "google");

        manager.put(&key, "Tu carrito está vacío.").unwrap();

        assert_eq!(
            manager.get(&key).unwrap(),
            Some("Tu carrito está vacío.".to_string())
        );
    }

    #[test]
    fn test_key_includes_language_and_scope() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        manager.put(&key("Hello", "es", "google"), "Hola").unwrap();
        manager.put(&key("Hello", "fr", "google"), "Bonjour").unwrap();
        manager.put(&key("Hello", "es", "openai"), "¡Hola!").unwrap();

        assert_eq!(
            manager.get(&key("Hello", "es", "google")).unwrap(),
            Some("Hola".to_string())
        );
        assert_eq!(
            manager.get(&key("Hello", "fr", "google")).unwrap(),
            Some("Bonjour".to_string())
        );
        assert_eq!(
            manager.get(&key("Hello", "es", "openai")).unwrap(),
            Some("¡Hola!".to_string())
        );
    }

    #[test]
    fn test_put_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        let key = key("Hello", "es", "google");

        manager.put(&key, "Hola").unwrap();
        manager.put(&key, "Buenas").unwrap();

        assert_eq!(manager.get(&key).unwrap(), Some("Buenas".to_string()));
    }

    #[test]
    fn test_digest_is_stable_hex() {
        let digest = key("Hello", "es", "google").digest();
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, key("Hello", "es", "google").digest());
    }
}
