//! Canonical skill keys

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

// Innermost group only; nested qualifiers are peeled one level per pass.
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\([^()]*\)\s*").expect("Invalid parenthetical regex")
});

/// Derive the comparison key for a raw skill label.
///
/// Parenthetical qualifiers such as proficiency levels are removed along with
/// the whitespace around them, then the rest is trimmed and lower-cased. An
/// empty key means "no skill".
pub fn normalize(raw: &str) -> String {
    let mut stripped = raw.to_string();
    while PARENTHETICAL.is_match(&stripped) {
        stripped = PARENTHETICAL.replace_all(&stripped, " ").into_owned();
    }
    stripped.trim().to_lowercase()
}

/// Label shown for a key that has no user-supplied spelling: first grapheme
/// upper-cased, the rest untouched.
pub fn display_label(key: &str) -> String {
    let mut graphemes = key.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut label = first.to_uppercase();
            label.push_str(graphemes.as_str());
            label
        }
        None => String::new(),
    }
}
