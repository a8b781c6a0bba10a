use std::sync::atomic::{AtomicU64, Ordering};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::value::{Map, Value};

/// Char-indexed substring. A `length` of `None` runs to the end.
pub fn substr(value: &str, start: usize, length: Option<usize>) -> String {
    let chars = value.chars().skip(start);
    match length {
        Some(len) => chars.take(len).collect(),
        None => chars.collect(),
    }
}

pub fn left(value: &str, count: usize) -> String {
    value.chars().take(count).collect()
}

pub fn right(value: &str, count: usize) -> String {
    let total = value.chars().count();
    value.chars().skip(total.saturating_sub(count)).collect()
}

pub fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lcfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Truncates to `max_width` display columns and appends `suffix`, so the
/// result can exceed `max_width` by the suffix width. Strings that already
/// fit come back unchanged.
pub fn limit(value: &str, max_width: usize, suffix: &str) -> String {
    if value.width() <= max_width {
        return value.to_string();
    }
    let mut kept = String::new();
    let mut used = 0;
    for ch in value.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > max_width {
            break;
        }
        kept.push(ch);
        used += ch_width;
    }
    format!("{}{}", kept.trim_end(), suffix)
}

/// Whether `value` starts with `prefix`, ignoring leading separator chars on
/// the value and surrounding ones on the prefix.
pub fn is_prefixed(value: &str, prefix: &str, separator: &str) -> bool {
    trim_sep_start(value, separator).starts_with(trim_sep(prefix, separator))
}

/// Removes `prefix` from the start, dropping separator chars around it.
pub fn trim_prefix(value: &str, prefix: &str, separator: &str) -> String {
    let mut rest = trim_sep_start(value, separator);
    if let Some(stripped) = rest.strip_prefix(prefix) {
        rest = stripped;
    }
    trim_sep_start(rest, separator).to_string()
}

/// Guarantees `prefix` on the front, joining with `separator` when adding it.
/// Empty input stays empty.
pub fn ensure_prefix(value: &str, prefix: &str, separator: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let value = trim_sep(value, separator);
    if is_prefixed(value, prefix, separator) {
        value.to_string()
    } else {
        format!("{prefix}{separator}{value}")
    }
}

/// Whether `value` ends with `suffix`, ignoring trailing separator chars on
/// the value and surrounding ones on the suffix.
pub fn is_suffixed(value: &str, suffix: &str, separator: &str) -> bool {
    trim_sep_end(value, separator).ends_with(trim_sep(suffix, separator))
}

/// Removes `suffix` from the end, dropping separator chars around it.
pub fn trim_suffix(value: &str, suffix: &str, separator: &str) -> String {
    let mut rest = trim_sep_end(value, separator);
    if let Some(stripped) = rest.strip_suffix(suffix) {
        rest = stripped;
    }
    trim_sep_end(rest, separator).to_string()
}

/// Guarantees `suffix` on the end, joining with `separator` when adding it.
/// Empty input stays empty.
pub fn ensure_suffix(value: &str, suffix: &str, separator: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let value = trim_sep(value, separator);
    if is_suffixed(value, suffix, separator) {
        value.to_string()
    } else {
        format!("{value}{separator}{suffix}")
    }
}

// The separator acts as a char set, like the char-list form of trim.
fn trim_sep_start<'a>(value: &'a str, separator: &str) -> &'a str {
    if separator.is_empty() {
        value
    } else {
        value.trim_start_matches(|ch| separator.contains(ch))
    }
}

fn trim_sep_end<'a>(value: &'a str, separator: &str) -> &'a str {
    if separator.is_empty() {
        value
    } else {
        value.trim_end_matches(|ch| separator.contains(ch))
    }
}

fn trim_sep<'a>(value: &'a str, separator: &str) -> &'a str {
    if separator.is_empty() {
        value
    } else {
        value.trim_matches(|ch| separator.contains(ch))
    }
}

/// Replaces `{name}` placeholders with their values.
pub fn replace_tokens(value: &str, tokens: &[(&str, &str)]) -> String {
    let mut out = value.to_string();
    for (name, replacement) in tokens {
        out = out.replace(&format!("{{{name}}}"), replacement);
    }
    out
}

pub fn part<'a>(value: &'a str, separator: &str, index: usize) -> Option<&'a str> {
    value.split(separator).nth(index)
}

pub fn first_part<'a>(value: &'a str, separator: &str) -> &'a str {
    value.split(separator).next().unwrap_or("")
}

pub fn last_part<'a>(value: &'a str, separator: &str) -> &'a str {
    value.rsplit(separator).next().unwrap_or("")
}

/// Drops everything up to and including the first `separator`. A string
/// without the separator has nothing left.
pub fn remove_first_part(value: &str, separator: &str) -> String {
    match value.split_once(separator) {
        Some((_, rest)) => rest.to_string(),
        None => String::new(),
    }
}

/// Drops everything from the last `separator` on. A string without the
/// separator has nothing left.
pub fn remove_last_part(value: &str, separator: &str) -> String {
    match value.rsplit_once(separator) {
        Some((rest, _)) => rest.to_string(),
        None => String::new(),
    }
}

/// Splits a delimited line into fields. Double-quote enclosures keep their
/// content intact (doubled quotes escape); afterwards each field is trimmed,
/// one matching layer of single or double quotes is stripped, and empty
/// fields are dropped. Blank lines yield nothing.
pub fn csv_fields(line: &str, delimiter: char) -> Vec<String> {
    if line.trim().is_empty() {
        return Vec::new();
    }
    let mut raw_fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == delimiter {
            raw_fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    raw_fields.push(current);

    raw_fields
        .iter()
        .filter_map(|field| {
            let cleaned = strip_quotes(field.trim());
            if cleaned.is_empty() {
                None
            } else {
                Some(cleaned.to_string())
            }
        })
        .collect()
}

fn strip_quotes(field: &str) -> &str {
    for quote in ['"', '\''] {
        if field.len() >= 2 && field.starts_with(quote) && field.ends_with(quote) {
            return &field[1..field.len() - 1];
        }
    }
    field
}

/// Lowercased slug: `-`, `_`, space and `.` all become `separator`, every
/// other non-alphanumeric char is dropped.
pub fn slug(value: &str, separator: char) -> String {
    value
        .to_lowercase()
        .chars()
        .filter_map(|ch| {
            if matches!(ch, '-' | '_' | ' ' | '.') {
                Some(separator)
            } else if ch.is_ascii_alphanumeric() || ch == separator {
                Some(ch)
            } else {
                None
            }
        })
        .collect()
}

/// Zips `keys` with the split parts of `value`. The longer side is sliced
/// down to the shorter one.
pub fn split_into_pairs(value: &str, separator: &str, keys: &[&str]) -> Map {
    let parts: Vec<&str> = value.split(separator).collect();
    let mut out = Map::with_capacity(keys.len().min(parts.len()));
    for (key, part) in keys.iter().zip(parts) {
        out.insert((*key).to_string(), Value::from(part));
    }
    out
}

/// A 32 hex char token from OS randomness, wrapped in the given affixes.
pub fn unique(prefix: &str, suffix: &str) -> String {
    static FALLBACK: AtomicU64 = AtomicU64::new(0);

    let mut bytes = [0u8; 16];
    if getrandom::fill(&mut bytes).is_err() {
        // Counter tokens when the OS RNG is unavailable; never fails.
        let counter = FALLBACK.fetch_add(1, Ordering::Relaxed);
        bytes[..8].copy_from_slice(&counter.to_le_bytes());
    }
    let mut token = String::with_capacity(prefix.len() + 32 + suffix.len());
    token.push_str(prefix);
    for byte in bytes {
        token.push(nibble_hex(byte >> 4));
        token.push(nibble_hex(byte & 0x0f));
    }
    token.push_str(suffix);
    token
}

fn nibble_hex(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        _ => (b'a' + nibble - 10) as char,
    }
}

/// Pads on the left with whole `filler` units while one still fits in
/// `length` chars.
pub fn pad_left(value: &str, length: usize, filler: &str) -> String {
    let filler_len = filler.chars().count();
    if filler_len == 0 {
        return value.to_string();
    }
    let mut out = value.to_string();
    let mut count = out.chars().count();
    while count + filler_len <= length {
        out.insert_str(0, filler);
        count += filler_len;
    }
    out
}

/// Pads on the right with whole `filler` units while one still fits in
/// `length` chars.
pub fn pad_right(value: &str, length: usize, filler: &str) -> String {
    let filler_len = filler.chars().count();
    if filler_len == 0 {
        return value.to_string();
    }
    let mut out = value.to_string();
    let mut count = out.chars().count();
    while count + filler_len <= length {
        out.push_str(filler);
        count += filler_len;
    }
    out
}

/// Greedy word wrap by char count, joining lines with `separator`. A line
/// breaks before a word once the current line plus the word reaches `width`.
/// Empty text and text of exactly `width` chars pass through untouched, and
/// a trailing newline survives; internal newlines are flattened first.
pub fn wrap(text: &str, width: usize, separator: &str) -> String {
    if text.is_empty() || text.chars().count() == width {
        return text.to_string();
    }
    let ended_with_linebreak = text.ends_with('\n');
    let flattened = text.replace(['\r', '\n'], "");

    let mut lines: Vec<String> = vec![String::new()];
    for word in flattened.split(' ') {
        let word_len = word.chars().count();
        let line_len = lines.last().map_or(0, |line| line.chars().count());
        if line_len + word_len >= width {
            lines.push(String::new());
        }
        if let Some(line) = lines.last_mut() {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
    }

    let mut wrapped = lines.join(separator);
    if ended_with_linebreak {
        wrapped.push('\n');
    }
    wrapped
}

/// PascalCase: split on `-`, `_` and space, upcase each word's first letter.
/// The rest of every word is left as it is.
pub fn pascal_case(value: &str) -> String {
    value.split(['-', '_', ' ']).map(ucfirst).collect()
}

/// camelCase: [`pascal_case`] with the first letter lowered.
pub fn camel_case(value: &str) -> String {
    lcfirst(&pascal_case(value))
}

/// snake_case: separators at lower-to-upper and acronym-to-word boundaries,
/// whitespace and `-`/`_` runs collapsed, all lowercase.
pub fn snake_case(value: &str) -> String {
    delimit(value, '_')
}

/// kebab-case twin of [`snake_case`].
pub fn kebab_case(value: &str) -> String {
    delimit(value, '-')
}

fn delimit(value: &str, separator: char) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    let mut prev: Option<char> = None;
    let mut pending_sep = false;
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_sep = !out.is_empty();
            continue;
        }
        let next_is_lower = chars.peek().is_some_and(|next| next.is_lowercase());
        let boundary = ch.is_uppercase()
            && prev.is_some_and(|prev| {
                prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            });
        if pending_sep || boundary {
            out.push(separator);
            pending_sep = false;
        }
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
        prev = Some(ch);
    }
    out
}

/// Target convention for [`convert_keys_recursively`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseStyle {
    Pascal,
    Camel,
    Snake,
    Kebab,
}

impl CaseStyle {
    fn apply(self, value: &str) -> String {
        match self {
            CaseStyle::Pascal => pascal_case(value),
            CaseStyle::Camel => camel_case(value),
            CaseStyle::Snake => snake_case(value),
            CaseStyle::Kebab => kebab_case(value),
        }
    }
}

/// Renames every mapping key to `style`, descending into nested mappings and
/// sequences. All-digit keys are left alone.
pub fn convert_keys_recursively(value: &Value, style: CaseStyle) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                let converted = if !key.is_empty() && key.chars().all(|ch| ch.is_ascii_digit()) {
                    key.clone()
                } else {
                    style.apply(&key.replace('-', "_"))
                };
                out.insert(converted, convert_keys_recursively(inner, style));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| convert_keys_recursively(item, style))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Lines whose trimmed form starts with `prefix` and ends with `suffix`.
/// Both affixes are required, an empty one matches nothing. Hits keep their
/// original form unless `trim` or `strip_affixes` reshape them.
pub fn line_match(
    lines: &[&str],
    prefix: &str,
    suffix: &str,
    trim: bool,
    strip_affixes: bool,
) -> Vec<String> {
    if prefix.is_empty() || suffix.is_empty() {
        return Vec::new();
    }
    let mut hits = Vec::new();
    for line in lines {
        let candidate = line.trim();
        if !candidate.starts_with(prefix) || !candidate.ends_with(suffix) {
            continue;
        }
        let mut hit = if strip_affixes {
            candidate
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(suffix))
                .unwrap_or(candidate)
        } else {
            *line
        };
        if trim {
            hit = hit.trim();
        }
        hits.push(hit.to_string());
    }
    hits
}
