//! Operations on lists encoded as delimited strings (`item|item|item`),
//! optionally with a tag char wrapped around each item (`-item-`).
//!
//! The empty string is the empty list.

pub fn count(list: &str, separator: &str) -> usize {
    split(list, separator).len()
}

/// Appends `item` (wrapped in `tag`) unless the list already holds it.
pub fn add(list: &str, item: &str, separator: &str, tag: &str) -> String {
    let mut items = split(list, separator);
    let tagged = format!("{tag}{item}{tag}");
    if !items.contains(&tagged) {
        items.push(tagged);
    }
    items.join(separator)
}

/// Item at `index` with the tag layer removed when both ends carry it.
/// Out of range yields the empty string.
pub fn get(list: &str, index: usize, separator: &str, tag: &str) -> String {
    let items = split(list, separator);
    match items.get(index) {
        Some(item) => untag(item, tag).to_string(),
        None => String::new(),
    }
}

/// Index of `item` (wrapped in `tag`), by exact match.
pub fn position(list: &str, item: &str, separator: &str, tag: &str) -> Option<usize> {
    let tagged = format!("{tag}{item}{tag}");
    split(list, separator)
        .iter()
        .position(|candidate| candidate == &tagged)
}

pub fn contains(list: &str, item: &str, separator: &str, tag: &str) -> bool {
    position(list, item, separator, tag).is_some()
}

/// Drops the first exact match of `item` (wrapped in `tag`).
pub fn remove(list: &str, item: &str, separator: &str, tag: &str) -> String {
    let mut items = split(list, separator);
    let tagged = format!("{tag}{item}{tag}");
    if let Some(index) = items.iter().position(|candidate| candidate == &tagged) {
        items.remove(index);
    }
    items.join(separator)
}

pub fn remove_index(list: &str, index: usize, separator: &str) -> String {
    let mut items = split(list, separator);
    if index < items.len() {
        items.remove(index);
    }
    items.join(separator)
}

/// Appends the items of `other` that `list` does not hold yet. Comparison is
/// raw, tags are not unwrapped. Optionally sorts the result.
pub fn merge(list: &str, other: &str, sort: bool, separator: &str) -> String {
    let mut items = split(list, separator);
    for item in split(other, separator) {
        if !items.contains(&item) {
            items.push(item);
        }
    }
    if sort {
        items.sort();
    }
    items.join(separator)
}

fn split(list: &str, separator: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    list.split(separator).map(str::to_string).collect()
}

fn untag<'a>(item: &'a str, tag: &str) -> &'a str {
    if tag.is_empty() {
        return item;
    }
    item.strip_prefix(tag)
        .and_then(|rest| rest.strip_suffix(tag))
        .unwrap_or(item)
}
