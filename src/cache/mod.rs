mod cached;
mod sqlite;

pub use cached::CachedTranslator;
pub use sqlite::{CacheKey, CacheManager};
