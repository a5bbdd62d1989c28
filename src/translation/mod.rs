mod backend;
mod chat;
mod google;
mod language;
mod memory;
mod prompt;
mod provider;
mod service;
mod sse_parser;

pub use backend::Translator;
pub use chat::ChatTranslator;
pub use google::{DEFAULT_ENDPOINT as GOOGLE_DEFAULT_ENDPOINT, GoogleTranslator};
pub use language::{TargetLanguage, print_languages};
pub use memory::MemoryTranslator;
pub use provider::{backend_scope, connect};
pub use service::TranslationService;
