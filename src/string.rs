// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Case conversions and substring helpers. Everything here walks `char`s,
//! not bytes, so multibyte text behaves the same as ASCII.

/// The remainder of `subject` after the first occurrence of `search`.
/// The subject is returned unchanged when `search` is empty or absent.
pub fn after<'a>(subject: &'a str, search: &str) -> &'a str {
    if search.is_empty() {
        return subject;
    }
    match subject.find(search) {
        Some(i) => &subject[i + search.len()..],
        None => subject,
    }
}

/// The remainder of `subject` after the last occurrence of `search`.
pub fn after_last<'a>(subject: &'a str, search: &str) -> &'a str {
    if search.is_empty() {
        return subject;
    }
    match subject.rfind(search) {
        Some(i) => &subject[i + search.len()..],
        None => subject,
    }
}

/// The portion of `subject` before the first occurrence of `search`.
pub fn before<'a>(subject: &'a str, search: &str) -> &'a str {
    if search.is_empty() {
        return subject;
    }
    match subject.find(search) {
        Some(i) => &subject[..i],
        None => subject,
    }
}

/// The portion of `subject` before the last occurrence of `search`.
pub fn before_last<'a>(subject: &'a str, search: &str) -> &'a str {
    if search.is_empty() {
        return subject;
    }
    match subject.rfind(search) {
        Some(i) => &subject[..i],
        None => subject,
    }
}

/// camelCase.
pub fn camel(value: &str) -> String {
    lcfirst(&studly(value))
}

/// StudlyCase: words split on `-`, `_` and spaces, capitalized and joined.
pub fn studly(value: &str) -> String {
    let spaced = value.replace(['-', '_'], " ");
    ucwords(&spaced).chars().filter(|c| *c != ' ').collect()
}

/// kebab-case.
pub fn kebab(value: &str) -> String {
    snake(value, "-")
}

/// snake_case with a configurable delimiter.
///
/// An already-lowercase value passes through untouched; otherwise words are
/// capitalized, whitespace is dropped, and the delimiter is inserted before
/// every ASCII uppercase letter.
pub fn snake(value: &str, delimiter: &str) -> String {
    if value.chars().all(|c| c.is_ascii_lowercase()) {
        return value.to_string();
    }
    let cleaned: String = ucwords(value)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let chars: Vec<char> = cleaned.chars().collect();
    let mut out = String::with_capacity(cleaned.len());
    for (i, c) in chars.iter().enumerate() {
        out.push(*c);
        if chars.get(i + 1).is_some_and(|n| n.is_ascii_uppercase()) {
            out.push_str(delimiter);
        }
    }
    out.to_lowercase()
}

/// Whether any of the needles occurs in `haystack`. Empty needles never
/// match.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && haystack.contains(n))
}

/// Whether every needle occurs in `haystack`.
pub fn contains_all(haystack: &str, needles: &[&str]) -> bool {
    needles
        .iter()
        .all(|n| !n.is_empty() && haystack.contains(n))
}

/// Whether `haystack` starts with any of the needles. Empty needles never
/// match.
pub fn starts_with_any(haystack: &str, needles: &[&str]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && haystack.starts_with(n))
}

/// Whether `haystack` ends with any of the needles.
pub fn ends_with_any(haystack: &str, needles: &[&str]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && haystack.ends_with(n))
}

/// Cap a string with a single instance of `cap`, collapsing any repeats
/// already at the end.
pub fn finish(value: &str, cap: &str) -> String {
    if cap.is_empty() {
        return value.to_string();
    }
    let mut trimmed = value;
    while let Some(t) = trimmed.strip_suffix(cap) {
        trimmed = t;
    }
    format!("{trimmed}{cap}")
}

/// Begin a string with a single instance of `prefix`.
pub fn start(value: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return value.to_string();
    }
    let mut trimmed = value;
    while let Some(t) = trimmed.strip_prefix(prefix) {
        trimmed = t;
    }
    format!("{prefix}{trimmed}")
}

/// Character count.
pub fn length(value: &str) -> usize {
    value.chars().count()
}

/// Truncate to a display width, appending `end` when truncation happens.
/// East-Asian wide characters count as two columns.
pub fn limit(value: &str, limit: usize, end: &str) -> String {
    if width(value) <= limit {
        return value.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in value.chars() {
        let w = char_width(c);
        if used + w > limit {
            break;
        }
        used += w;
        out.push(c);
    }
    format!("{}{end}", out.trim_end())
}

fn width(value: &str) -> usize {
    value.chars().map(char_width).sum()
}

fn char_width(c: char) -> usize {
    // East-Asian wide blocks count two columns.
    match c as u32 {
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x2FFFD
        | 0x30000..=0x3FFFD => 2,
        _ => 1,
    }
}

pub fn lower(value: &str) -> String {
    value.to_lowercase()
}

pub fn upper(value: &str) -> String {
    value.to_uppercase()
}

/// Title Case: every word capitalized, the rest lowered.
pub fn title(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut boundary = true;
    for c in value.chars() {
        if c.is_whitespace() {
            boundary = true;
            out.push(c);
        } else if boundary {
            out.extend(c.to_uppercase());
            boundary = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Uppercase the first character, leaving the rest untouched.
pub fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lcfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Capitalize the character following each whitespace run.
fn ucwords(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut boundary = true;
    for c in value.chars() {
        if c.is_whitespace() {
            boundary = true;
            out.push(c);
        } else if boundary {
            out.extend(c.to_uppercase());
            boundary = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Keep the first `count` words, appending `end` when anything was cut.
/// Leading whitespace survives, trailing whitespace before the cut does not.
pub fn words(value: &str, count: usize, end: &str) -> String {
    if count == 0 {
        return value.to_string();
    }
    let mut seen = 0usize;
    let mut in_word = false;
    let mut prefix_end = value.len();
    for (i, c) in value.char_indices() {
        if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            if seen == count {
                prefix_end = i;
                break;
            }
            seen += 1;
            in_word = true;
        }
    }
    if seen == 0 || prefix_end == value.len() {
        return value.to_string();
    }
    format!("{}{end}", value[..prefix_end].trim_end())
}

/// Character-indexed substring with negative offsets counted from the end.
pub fn substr(value: &str, start: isize, length: Option<isize>) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len() as isize;
    let begin = if start < 0 {
        (len + start).max(0)
    } else {
        start.min(len)
    };
    let end = match length {
        None => len,
        Some(l) if l < 0 => (len + l).max(begin),
        Some(l) => (begin + l).min(len),
    };
    if begin >= end {
        return String::new();
    }
    chars[begin as usize..end as usize].iter().collect()
}

/// Replace the first occurrence of `search`.
pub fn replace_first(search: &str, replace: &str, subject: &str) -> String {
    if search.is_empty() {
        return subject.to_string();
    }
    match subject.find(search) {
        Some(i) => {
            let mut out = subject.to_string();
            out.replace_range(i..i + search.len(), replace);
            out
        }
        None => subject.to_string(),
    }
}

/// Replace the last occurrence of `search`.
pub fn replace_last(search: &str, replace: &str, subject: &str) -> String {
    if search.is_empty() {
        return subject.to_string();
    }
    match subject.rfind(search) {
        Some(i) => {
            let mut out = subject.to_string();
            out.replace_range(i..i + search.len(), replace);
            out
        }
        None => subject.to_string(),
    }
}

/// Replace successive occurrences of `search` with successive replacements.
/// Replacements are not rescanned, and leftover occurrences stay put.
pub fn replace_array(search: &str, replacements: &[&str], subject: &str) -> String {
    if search.is_empty() {
        return subject.to_string();
    }
    let mut out = String::with_capacity(subject.len());
    let mut rest = subject;
    let mut replacements = replacements.iter();
    while let Some(i) = rest.find(search) {
        match replacements.next() {
            Some(r) => {
                out.push_str(&rest[..i]);
                out.push_str(r);
                rest = &rest[i + search.len()..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// A random alphanumeric string of the given length.
#[cfg(feature = "rand")]
pub fn random(length: usize) -> String {
    use rand::distr::Alphanumeric;
    use rand::RngExt;

    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
