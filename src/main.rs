use clap::Parser;
use std::io;
use std::process;

use qtl::Error;
use qtl::cli::commands::{providers, translate};
use qtl::cli::{Args, Command};
use qtl::output::{self, OutputConfig};
use qtl::translation::{TargetLanguage, print_languages};
use qtl::ui::Style;

/// Exit status for a run interrupted by Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || OutputConfig::default().no_color,
    });

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        process::exit(exit_code(&err));
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Providers { provider }) => {
            providers::print_providers(provider.as_deref())?;
        }
        None => {
            if let Some(ref lang) = args.to {
                TargetLanguage::parse(lang)?;
            }

            let options = translate::TranslateOptions {
                file: args.file,
                to: args.to,
                provider: args.provider,
                model: args.model,
                no_cache: args.no_cache,
                write: args.write,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<Error>() {
        return match err {
            Error::InvalidLanguageTag { .. } => exitcode::USAGE,
            Error::Cancelled => EXIT_INTERRUPTED,
            Error::StreamWrite { .. } => exitcode::IOERR,
            e if e.is_stream_read() => exitcode::DATAERR,
            e if e.is_backend() => exitcode::UNAVAILABLE,
            _ => exitcode::SOFTWARE,
        };
    }
    if err.downcast_ref::<io::Error>().is_some() {
        return exitcode::IOERR;
    }
    1
}
