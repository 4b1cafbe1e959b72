use regex::Regex;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\w+\b").expect("word pattern is valid")
});

/// Split text into lowercase word tokens, in order of appearance.
///
/// A token is a maximal run of Unicode word characters. Punctuation is
/// dropped, so `"don't"` yields `["don", "t"]`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
