use anyhow::{Context, Result, bail};
use std::io::{self, Write};

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::error::Error;
use crate::fs::AtomicFile;
use crate::input::InputSource;
use crate::output;
use crate::processor::{LineProcessor, RunSummary};
use crate::status;
use crate::translation::{self, TranslationService};
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub file: Option<String>,
    pub to: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub no_cache: bool,
    pub write: bool,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let source = InputSource::from_arg(options.file.as_deref());
    if options.write && matches!(source, InputSource::Stdin) {
        bail!("--write needs an input file, not stdin");
    }

    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default()?;
    let resolved = resolve_config(
        &ResolveOptions {
            to: options.to.clone(),
            provider: options.provider.clone(),
            model: options.model.clone(),
        },
        &config_file,
    )?;

    let mut service = TranslationService::open(&resolved.target_language, |_| {
        translation::connect(&resolved, !options.no_cache)
    })?;

    let reader = source
        .open()
        .with_context(|| format!("Failed to open input file: {}", source.display_name()))?;

    let spinner = output::progress_enabled(!options.write)
        .then(|| Spinner::new(&format!("Translating {}", source.display_name())));

    let result = match &source {
        InputSource::File(path) if options.write => {
            let file = AtomicFile::create(path)?;
            translate_into(&service, reader, file, spinner.as_ref())
                .await
                .and_then(|(summary, file)| {
                    file.commit()?;
                    Ok(summary)
                })
        }
        _ => translate_into(&service, reader, io::stdout().lock(), spinner.as_ref())
            .await
            .map(|(summary, _)| summary),
    };

    if let Some(spinner) = &spinner {
        spinner.stop();
    }
    service.close();

    let summary = result?;
    status!(
        "{} {} of {} lines translated into {}",
        Style::success("Done:"),
        summary.translated,
        summary.lines,
        service.language().describe()
    );

    Ok(())
}

/// Runs the processor until the input ends, the run fails, or Ctrl-C arrives.
/// Hands the writer back so an in-place rewrite can be committed.
async fn translate_into<W: Write>(
    service: &TranslationService,
    reader: Box<dyn io::BufRead>,
    mut writer: W,
    spinner: Option<&Spinner>,
) -> Result<(RunSummary, W)> {
    let mut processor = LineProcessor::new(service).on_line(|summary| {
        if let Some(spinner) = spinner {
            spinner.set_message(format!(
                "{} lines, {} values",
                summary.lines, summary.translated
            ));
        }
    });

    let summary = tokio::select! {
        result = processor.run(reader, &mut writer) => result?,
        _ = tokio::signal::ctrl_c() => return Err(Error::Cancelled.into()),
    };

    Ok((summary, writer))
}
