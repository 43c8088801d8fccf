//! Text cleanup for printable documents.
//!
//! Model output arrives with hard-wrapped words, typographic punctuation,
//! invisible characters and the occasional "Source References:" list that
//! players should never see.

use regex::Regex;
use std::sync::LazyLock;

/// Tokens longer than this are split with spaces.
pub const MAX_TOKEN_CHARS: usize = 30;

static SOURCE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\n?Source References:\s*\n(?:-.*\n?)*").expect("Valid source block regex")
});

static WRAPPED_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-zÀ-ÖØ-öø-ÿ])\n([A-Za-zÀ-ÖØ-öø-ÿ])").expect("Valid wrapped word regex")
});

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*").expect("Valid line break regex"));

static RUN_OF_BLANKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("Valid blank run regex"));

const PUNCTUATION: [(&str, &str); 11] = [
    ("\u{201c}", "\""),
    ("\u{201d}", "\""),
    ("\u{201e}", "\""),
    ("\u{2019}", "'"),
    ("\u{2018}", "'"),
    ("\u{2013}", "-"),
    ("\u{2014}", "-"),
    ("\u{2026}", "..."),
    ("\u{00a0}", " "),
    ("\u{200b}", ""),
    ("\u{feff}", ""),
];

/// Remove a "Source References:" heading and the dash list under it.
pub fn strip_source_references(text: &str) -> String {
    SOURCE_BLOCK.replace_all(text, "").into_owned()
}

/// Join words split by a hard line break and flatten remaining breaks.
pub fn join_hard_wraps(text: &str) -> String {
    let joined = WRAPPED_WORD.replace_all(text, "$1$2");
    let flat = LINE_BREAK.replace_all(&joined, " ");
    RUN_OF_BLANKS.replace_all(&flat, " ").trim().to_string()
}

/// Replace typographic quotes, dashes and ellipses with ASCII and drop
/// invisible characters.
pub fn normalize_punctuation(text: &str) -> String {
    PUNCTUATION
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Split space-separated tokens longer than `chunk` characters.
pub fn break_long_tokens(text: &str, chunk: usize) -> String {
    let chunk = chunk.max(1);
    text.split(' ')
        .map(|token| {
            let chars: Vec<char> = token.chars().collect();
            if chars.len() <= chunk {
                token.to_string()
            } else {
                chars
                    .chunks(chunk)
                    .map(|c| c.iter().collect::<String>())
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every cleanup step, in order.
///
/// # Examples
///
/// ```
/// use whodunit_render::clean_text;
///
/// let raw = "She re\nvealed \u{201c}everything\u{201d}\u{2026}\nSource References:\n- doc1\n";
/// assert_eq!(clean_text(raw), "She revealed \"everything\"...");
/// ```
pub fn clean_text(text: &str) -> String {
    let text = strip_source_references(text);
    let text = join_hard_wraps(&text);
    let text = normalize_punctuation(&text);
    break_long_tokens(&text, MAX_TOKEN_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_block_is_removed() {
        let text = "Background.\nSource References:\n- doc1\n- doc2\n";
        assert_eq!(strip_source_references(text), "Background.");
    }

    #[test]
    fn breaks_between_words_become_spaces() {
        assert_eq!(join_hard_wraps("wit\nh"), "with");
        assert_eq!(join_hard_wraps("end.\n  Next"), "end. Next");
        assert_eq!(join_hard_wraps("a   b\t\tc "), "a b c");
    }

    #[test]
    fn long_tokens_are_chunked() {
        let token = "x".repeat(65);
        let broken = break_long_tokens(&format!("short {}", token), 30);
        let parts: Vec<&str> = broken.split(' ').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1].len(), 30);
        assert_eq!(parts[3].len(), 5);
    }

    #[test]
    fn invisible_characters_are_dropped() {
        assert_eq!(normalize_punctuation("\u{feff}a\u{200b}b\u{00a0}c \u{2013} d"), "ab c - d");
    }
}
