use std::collections::HashSet;
use std::sync::LazyLock;

/// English function/question words stripped before indexing. Closed list;
/// domain terms ("soil", "crop") are deliberately not in it — idf damping
/// handles those.
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "a", "an", "and", "or", "for", "to", "of", "in", "on", "at", "is", "are", "was",
        "were", "be", "by", "with", "do", "does", "how", "what", "when", "which", "who", "whom",
        "whose", "why", "where", "can", "could", "should", "would",
    ]
    .into_iter()
    .collect()
});

/// Lowercases, replaces every non-word non-space character with a space,
/// collapses whitespace runs, and trims. Total over any input string.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut last_was_space = true;
    for c in lowered.chars() {
        let c = if c.is_alphanumeric() || c == '_' {
            c
        } else {
            ' '
        };
        if c == ' ' {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Normalizes, splits on whitespace, and drops stopwords.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|t| !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}
