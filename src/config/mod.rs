mod manager;

pub use manager::{
    ConfigFile, ConfigManager, ProviderConfig, ProviderKind, QtlConfig, ResolveOptions,
    ResolvedConfig, resolve_config,
};
