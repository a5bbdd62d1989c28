const QUOTE: char = '"';

/// A line split around its first double-quoted value.
///
/// Only the first pair of quotes counts. Any later quotes stay in `suffix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotedSegment<'a> {
    /// Everything before the opening quote.
    pub prefix: &'a str,
    /// Everything between the opening and the closing quote.
    pub value: &'a str,
    /// Everything after the closing quote.
    pub suffix: &'a str,
}

impl<'a> QuotedSegment<'a> {
    /// Splits `line`, or returns `None` when it has no complete quoted value.
    pub fn find(line: &'a str) -> Option<Self> {
        let open = line.find(QUOTE)?;
        let rest = &line[open + QUOTE.len_utf8()..];

        // Unmatched opening quote.
        let close = rest.find(QUOTE)?;

        Some(Self {
            prefix: &line[..open],
            value: &rest[..close],
            suffix: &rest[close + QUOTE.len_utf8()..],
        })
    }

    /// Rebuilds the line with `value` between the quotes.
    pub fn replace_value(&self, value: &str) -> String {
        let mut line = String::with_capacity(
            self.prefix.len() + value.len() + self.suffix.len() + 2 * QUOTE.len_utf8(),
        );
        line.push_str(self.prefix);
        line.push(QUOTE);
        line.push_str(value);
        line.push(QUOTE);
        line.push_str(self.suffix);
        line
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_quotes() {
        assert_eq!(QuotedSegment::find("export default {"), None);
        assert_eq!(QuotedSegment::find(""), None);
        assert_eq!(QuotedSegment::find("   "), None);
    }

    #[test]
    fn test_unmatched_quote() {
        assert_eq!(QuotedSegment::find(r#"key: "no closing quote"#), None);
        assert_eq!(QuotedSegment::find(r#"""#), None);
    }

    #[test]
    fn test_key_value_line() {
        let segment = QuotedSegment::find(r#"    sizeRequired: "Please choose an available size.","#)
            .unwrap();
        assert_eq!(segment.prefix, "    sizeRequired: ");
        assert_eq!(segment.value, "Please choose an available size.");
        assert_eq!(segment.suffix, ",");
    }

    #[test]
    fn test_empty_value() {
        let segment = QuotedSegment::find(r#"key: "","#).unwrap();
        assert_eq!(segment.value, "");
        assert_eq!(segment.replace_value(""), r#"key: "","#);
    }

    #[test]
    fn test_later_quotes_stay_in_suffix() {
        let segment = QuotedSegment::find(r#"a: "one", b: "two","#).unwrap();
        assert_eq!(segment.value, "one");
        assert_eq!(segment.suffix, r#", b: "two","#);
        assert_eq!(segment.replace_value("uno"), r#"a: "uno", b: "two","#);
    }

    #[test]
    fn test_multibyte_text_around_quotes() {
        let segment = QuotedSegment::find(r#"clé: "déjà vu" // ✓"#).unwrap();
        assert_eq!(segment.prefix, "clé: ");
        assert_eq!(segment.value, "déjà vu");
        assert_eq!(segment.suffix, " // ✓");
    }

    #[test]
    fn test_replace_value_with_quotes_inside() {
        let segment = QuotedSegment::find(r#"k: "v","#).unwrap();
        assert_eq!(segment.replace_value(r#"say "hi""#), r#"k: "say "hi"","#);
    }
}
