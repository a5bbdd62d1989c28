use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "qtl")]
#[command(about = "Translate the quoted values of localization files, keeping every other byte")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if not provided or "-")
    pub file: Option<String>,

    /// Target language tag (e.g., es, ja, zh-TW, pt-BR)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Provider name from the config file
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Model name (chat providers)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Disable cache
    #[arg(short = 'n', long)]
    pub no_cache: bool,

    /// Rewrite FILE in place instead of printing to stdout
    #[arg(short = 'w', long, requires = "file")]
    pub write: bool,

    /// Suppress status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported language codes
    Languages,
    /// List configured providers
    Providers {
        /// Show details for a single provider
        provider: Option<String>,
    },
}
