//! Suffix-stripping guess at a word's dictionary form.
//!
//! This is not a linguistic lemmatizer. It may produce non-words ("hoped" becomes
//! "hop"); callers are expected to verify the candidate independently.

const MIN_LEN_EXCLUSIVE: usize = 3;

/// Derives a probable base form of `word` by stripping one inflectional suffix.
///
/// Only words longer than three characters are considered. Suffix matching is
/// ASCII case-insensitive; the returned slice keeps the caller's casing.
pub fn derive_base_form(word: &str) -> Option<&str> {
    let lower: Vec<char> = word.chars().map(|c| c.to_ascii_lowercase()).collect();
    let len = lower.len();
    if len <= MIN_LEN_EXCLUSIVE {
        return None;
    }

    let strip = if ends_with(&lower, "s") && !ends_with(&lower, "ss") {
        if ends_with(&lower, "es") && is_sibilant_stem(&lower[..len - 2]) {
            2
        } else {
            1
        }
    } else if ends_with(&lower, "ing") {
        if has_doubled_tail(&lower[..len - 3]) {
            4
        } else {
            3
        }
    } else if ends_with(&lower, "ed") {
        if has_doubled_tail(&lower[..len - 2]) {
            3
        } else {
            2
        }
    } else {
        return None;
    };

    Some(keep_chars(word, len - strip))
}

fn ends_with(chars: &[char], suffix: &str) -> bool {
    let suffix: Vec<char> = suffix.chars().collect();
    chars.len() >= suffix.len() && chars[chars.len() - suffix.len()..] == suffix[..]
}

/// Stems that take `-es` in the plural: `s`, `x`, `z`, `ch`, `sh`.
fn is_sibilant_stem(stem: &[char]) -> bool {
    matches!(stem.last(), Some('s' | 'x' | 'z')) || ends_with(stem, "ch") || ends_with(stem, "sh")
}

fn has_doubled_tail(stem: &[char]) -> bool {
    match stem {
        [.., a, b] => a == b,
        _ => false,
    }
}

fn keep_chars(word: &str, count: usize) -> &str {
    match word.char_indices().nth(count) {
        Some((idx, _)) => &word[..idx],
        None => word,
    }
}
