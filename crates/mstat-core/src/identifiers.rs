use std::collections::HashSet;

const SEPARATORS: [char; 4] = [',', ';', '\n', ' '];

/// Splits a free-text identifier list into unique SKUs.
///
/// Accepts commas, semicolons, newlines and spaces as separators in any mix.
/// Pieces are trimmed, blanks dropped, and duplicates removed keeping the
/// first occurrence.
#[must_use]
pub fn parse_identifiers(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(SEPARATORS.as_slice())
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .filter(|piece| seen.insert(*piece))
        .map(ToOwned::to_owned)
        .collect()
}
