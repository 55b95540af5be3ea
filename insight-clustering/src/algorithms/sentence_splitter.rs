//! Split generated statements into sentences for structural validation.

/// Abbreviations whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "vs.", "etc.", "approx.", "inc.", "mr.", "ms.", "dr.",
];

/// Split text into sentences on `.`, `!` and `?` followed by whitespace or
/// end of input. Decimal points and common abbreviations are not boundaries.
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    for i in 0..len {
        current.push(chars[i]);

        if !matches!(chars[i], '.' | '!' | '?') {
            continue;
        }

        let at_end = i + 1 >= len;
        let next_is_space = !at_end && chars[i + 1].is_whitespace();
        if !(at_end || next_is_space) {
            continue;
        }
        if chars[i] == '.' && ends_with_abbreviation(&current) {
            continue;
        }

        push_sentence(&mut sentences, &current);
        current.clear();
    }

    // Remaining text that didn't end with punctuation.
    push_sentence(&mut sentences, &current);
    sentences
}

/// Number of sentences in `text`.
pub fn count_sentences(text: &str) -> usize {
    split_sentences(text).len()
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    // Stray punctuation ("..", "!") is not a sentence.
    if trimmed.chars().any(char::is_alphanumeric) {
        sentences.push(trimmed.to_string());
    }
}

fn ends_with_abbreviation(current: &str) -> bool {
    let last_word = current
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .to_lowercase();
    ABBREVIATIONS.contains(&last_word.as_str())
}
