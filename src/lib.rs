//! # qtl - Quoted-value translation for localization files
//!
//! `qtl` translates the string literals of line-oriented localization files such as
//!
//! ```text
//! export default {
//!   validations: {
//!     sizeRequired: "Please choose an available size.",
//!   },
//! };
//! ```
//!
//! into another language. On every line, the text between the first two `"` is sent to a
//! translation backend and replaced by the result; every other byte, including the line
//! terminator, is copied unchanged. Lines are processed one at a time, in order, and a
//! failed translation stops the run.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a file to stdout
//! qtl --to es ./locales/en.ts > ./locales/es.ts
//!
//! # Rewrite a file in place
//! qtl --to ja --write ./locales/ja.ts
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/qtl/config.toml`:
//!
//! ```toml
//! [qtl]
//! provider = "google"
//! to = "es"
//!
//! [providers.google]
//! kind = "google"
//! api_key_env = "GOOGLE_TRANSLATE_API_KEY"
//!
//! [providers.ollama]
//! kind = "openai"
//! endpoint = "http://localhost:11434"
//! models = ["gemma3:12b"]
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! # async fn demo() -> qtl::Result<()> {
//! use qtl::processor::LineProcessor;
//! use qtl::translation::{MemoryTranslator, TranslationService};
//!
//! let backend = MemoryTranslator::from_map([("Hello", "Hola")]);
//! let service = TranslationService::new("es", backend)?;
//! let mut output = Vec::new();
//! LineProcessor::new(&service)
//!     .run("greeting: \"Hello\",\n".as_bytes(), &mut output)
//!     .await?;
//! assert_eq!(output, b"greeting: \"Hola\",\n");
//! # Ok(())
//! # }
//! ```

/// Translation cache backed by `SQLite`.
pub mod cache;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// Error type of the translation core.
pub mod error;

/// File system utilities.
pub mod fs;

/// Line-oriented input reading.
pub mod input;

/// Global output configuration (quiet mode, colors, stderr routing).
pub mod output;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Quoted-value substitution over a line stream.
pub mod processor;

/// Translation service, backends and language tags.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;

pub use error::{Error, Result};
