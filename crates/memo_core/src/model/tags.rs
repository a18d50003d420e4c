//! Tag-list normalization shared by the tag resolver and tag search.
//!
//! Rules, applied in order: split on `,`, trim surrounding whitespace, drop
//! empty pieces, drop repeated names keeping the first occurrence. Case is
//! preserved and significant.

pub const TAG_SEPARATOR: char = ',';

/// Normalizes a comma-separated tag string into distinct names in input order.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for piece in raw.split(TAG_SEPARATOR) {
        let name = piece.trim();
        if name.is_empty() || names.iter().any(|existing| existing == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}
