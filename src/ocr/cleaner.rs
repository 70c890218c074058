//! Noise filtering for OCR output.
//!
//! Screen grabs pick up window chrome, nav bars, and stray glyph
//! garbage alongside the content. Cleaning is line-oriented: a line
//! either survives intact (trimmed) or is dropped whole, so cleaning
//! an already-clean string is a no-op.

use regex::RegexSet;
use std::sync::OnceLock;

/// A kept line must be at least this long after trimming.
const MIN_LINE_LEN: usize = 5;

/// Whole-line patterns for screen chrome that carries no content:
/// bare URLs, standalone page numbers, copyright footers, nav labels,
/// shell prompts, and file-path breadcrumbs.
fn noise_patterns() -> &'static RegexSet {
    static PATTERNS: OnceLock<RegexSet> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        RegexSet::new([
            r"(?i)^https?://\S+$",
            r"(?i)^www\.\S+$",
            r"^\d+$",
            r"^\d+\.$",
            r"^©",
            r"(?i)^Page \d+ of \d+$",
            r"(?i)^(Search|Menu|Home|Share|Follow)$",
            r"(?i)^Click here",
            r"(?i)^filepath:",
            r"^PS C:\\.*>",
        ])
        .expect("noise patterns are valid")
    })
}

/// Filter raw OCR text down to meaningful lines.
///
/// Each line is trimmed, then dropped if it is shorter than
/// [`MIN_LINE_LEN`], contains no ASCII alphanumeric character, or
/// matches a chrome-noise pattern. Survivors are re-joined with `\n`
/// in their original order. Never fails; the result may be empty.
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| line.len() >= MIN_LINE_LEN)
        .filter(|line| line.chars().any(|c| c.is_ascii_alphanumeric()))
        .filter(|line| !noise_patterns().is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_keeps_content_lines() {
        assert_eq!(clean_text("  hello world  \n"), "hello world");
    }

    #[test]
    fn drops_short_lines() {
        assert_eq!(clean_text("ab\nabcd\nabcde"), "abcde");
    }

    #[test]
    fn drops_lines_without_alphanumerics() {
        assert_eq!(clean_text("-----\n*****\n!!!???\nreal text here"), "real text here");
    }

    #[test]
    fn whitespace_only_input_is_empty() {
        assert_eq!(clean_text("   \n\n"), "");
    }

    #[test]
    fn preserves_relative_order() {
        let cleaned = clean_text("first line\n..\nsecond line\nthird line");
        assert_eq!(cleaned, "first line\nsecond line\nthird line");
    }

    #[test]
    fn drops_screen_chrome() {
        let raw = "https://example.com/path\n\
                   Page 3 of 12\n\
                   Search\n\
                   Click here to subscribe\n\
                   PS C:\\Users\\dev>\n\
                   actual paragraph content";
        assert_eq!(clean_text(raw), "actual paragraph content");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let inputs = [
            "  padded  \nx\n12345\nSearch\nmeaningful line ©",
            "Q: what?\nA: that.\n\n\n- - -",
            "",
        ];
        for raw in inputs {
            let once = clean_text(raw);
            assert_eq!(clean_text(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn output_lines_satisfy_keep_rules() {
        let cleaned = clean_text("tiny\nok line 1\n§§§§§§§§\nanother ok line");
        for line in cleaned.lines() {
            assert!(line.len() >= MIN_LINE_LEN);
            assert!(line.chars().any(|c| c.is_ascii_alphanumeric()));
        }
    }
}
