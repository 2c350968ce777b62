//! Line filters that strip page furniture from extracted text.
//!
//! Extracted text is noisy: page numbers, running headers such as `Page 4` or `Chapter 2`, and
//! hard line breaks from the PDF layout. The cleaner drops those lines and flattens the rest into
//! a single whitespace-normalized paragraph suitable for prompting.

use regex::Regex;
use std::sync::OnceLock;

fn page_number() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+$").expect("valid page number pattern"))
}

fn running_header() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(Page|Chapter|Section)\s*\d+").expect("valid header pattern")
    })
}

fn whitespace_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Whether a trimmed line is layout noise rather than content.
fn is_boilerplate(line: &str) -> bool {
    line.is_empty() || page_number().is_match(line) || running_header().is_match(line)
}

/// Normalize raw extracted text.
///
/// Lines are trimmed; empty lines, digit-only lines and lines starting with
/// `Page N`/`Chapter N`/`Section N` (any case) are dropped. Survivors are joined with a space and
/// every whitespace run collapses to a single space. Never fails; the result may be empty.
///
/// Re-cleaning the output is a no-op unless joining lines produced a new header at the start,
/// as with `"Page\n4 apples"`, which cleans to `"Page 4 apples"` and then to `""`.
pub fn clean_text(raw: &str) -> String {
    let kept: Vec<&str> = raw
        .split('\n')
        .map(str::trim)
        .filter(|line| !is_boilerplate(line))
        .collect();
    whitespace_run()
        .replace_all(&kept.join(" "), " ")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_page_numbers_and_headers() {
        let raw = "1\nIntroduction to Thermodynamics\nPage 1\nHeat is energy.";
        assert_eq!(clean_text(raw), "Introduction to Thermodynamics Heat is energy.");
    }

    #[test]
    fn boilerplate_only_input_cleans_to_empty() {
        let raw = "12\n  Page 3\nchapter 4\nSECTION12\n\n   \n7";
        assert_eq!(clean_text(raw), "");
    }

    #[test]
    fn roman_numeral_headers_survive() {
        assert_eq!(clean_text("Chapter IV\n12"), "Chapter IV");
    }

    #[test]
    fn header_match_is_anchored_to_line_start() {
        assert_eq!(
            clean_text("See Page 4 for details"),
            "See Page 4 for details"
        );
        // A header prefix drops the whole line, including trailing prose.
        assert_eq!(clean_text("Page 4 continued\nBody"), "Body");
    }

    #[test]
    fn collapses_whitespace_runs() {
        let cleaned = clean_text("alpha \t  beta\r\n gamma\u{a0}\u{a0}delta  \n\n  epsilon");
        assert_eq!(cleaned, "alpha beta gamma delta epsilon");
        assert!(!cleaned.contains("  "));
    }

    #[test]
    fn cleaning_is_idempotent() {
        let inputs = [
            "1\nIntroduction\nPage 1\n  Heat   is energy.\n",
            "Chapter IV\n Entropy\t\tgrows\n\n99\nSection 2 intro\nend",
            "",
            "  lone line  ",
        ];
        for raw in inputs {
            let once = clean_text(raw);
            assert_eq!(clean_text(&once), once, "input: {raw:?}");
        }
    }

    #[test]
    fn joined_lines_can_form_a_header() {
        let once = clean_text("Page\n4 apples");
        assert_eq!(once, "Page 4 apples");
        assert_eq!(clean_text(&once), "");
    }

    #[test]
    fn digit_lines_with_spaces_are_content() {
        assert_eq!(clean_text("1 2 3"), "1 2 3");
    }
}
