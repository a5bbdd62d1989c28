//! Target language tags.
//!
//! A tag is an ISO 639 primary language subtag (`es`, `fil`), optionally followed by a
//! script (`Hant`), a region (`TW`, `419`) and variants, separated by `-` (or `_`).
//! Extension and private-use sections (`-u-ca-gregory`, `-x-foo`) are accepted and dropped.

use std::fmt;
use std::str::FromStr;

use isolang::Language;
use unic_langid::LanguageIdentifier;

use crate::error::{Error, Result};
use crate::ui::Style;

/// Deprecated ISO 639-1 codes and their replacements.
const LEGACY_CODES: &[(&str, &str)] = &[("in", "id"), ("iw", "he"), ("ji", "yi"), ("jw", "jv")];

/// A validated, canonically-cased language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage {
    tag: String,
    language: Language,
}

impl TargetLanguage {
    /// Parses and canonicalizes `input`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLanguageTag`] if `input` is not a well-formed tag or its
    /// primary subtag is not a known ISO 639 code.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidLanguageTag {
            tag: input.to_string(),
            reason: reason.to_string(),
        };

        let normalized = input.replace('_', "-");
        let core = strip_extensions(&normalized).ok_or_else(|| invalid("malformed extension"))?;
        if core.is_empty() {
            return Err(invalid("empty tag"));
        }

        let mut langid: LanguageIdentifier = core
            .parse()
            .map_err(|e| invalid(&format!("malformed tag: {e}")))?;

        if let Some(&(_, current)) = LEGACY_CODES
            .iter()
            .find(|(legacy, _)| *legacy == langid.language.as_str())
        {
            langid.language = current
                .parse()
                .map_err(|e| invalid(&format!("malformed tag: {e}")))?;
        }

        let code = langid.language.as_str();
        let language = match code.len() {
            2 => Language::from_639_1(code),
            3 => Language::from_639_3(code),
            _ => None,
        }
        .ok_or_else(|| invalid("unknown ISO 639 language code"))?;

        Ok(Self {
            tag: langid.to_string(),
            language,
        })
    }

    /// The canonical tag, e.g. `zh-Hant-TW`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// English name of the primary language, e.g. `Spanish`.
    pub fn english_name(&self) -> &'static str {
        self.language.to_name()
    }

    /// Human readable description used in prompts, e.g. `Spanish (es-MX)`.
    pub fn describe(&self) -> String {
        format!("{} ({})", self.english_name(), self.tag)
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl FromStr for TargetLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Returns the part of `tag` before its first singleton subtag.
///
/// Every section after a singleton must hold at least one subtag of 1 to 8 alphanumerics.
fn strip_extensions(tag: &str) -> Option<&str> {
    let mut offset = 0;
    let mut subtags = tag.split('-');

    while let Some(subtag) = subtags.next() {
        if subtag.len() == 1 && offset > 0 {
            let rest: Vec<&str> = subtags.collect();
            let well_formed = !rest.is_empty()
                && rest.iter().all(|s| {
                    (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
                });
            return well_formed.then_some(&tag[..offset - 1]);
        }
        offset += subtag.len() + 1;
    }

    Some(tag)
}

/// Prints the ISO 639-1 language codes accepted as primary subtags.
pub fn print_languages() {
    println!("{}", Style::header("Supported language codes (ISO 639-1)"));
    let mut languages: Vec<_> = isolang::languages()
        .filter_map(|lang| lang.to_639_1().map(|code| (code, lang.to_name())))
        .collect();
    languages.sort_unstable();
    for (code, name) in languages {
        println!("  {:5} {}", Style::code(code), Style::secondary(name));
    }
    println!(
        "\n{}",
        Style::hint("Region and script subtags may be appended, e.g. zh-TW, sr-Latn, es-419.")
    );
}
