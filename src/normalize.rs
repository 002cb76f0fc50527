/// Delimiters applied, in order, when a lookup asks for normalization.
pub const NAME_DELIMITERS: [&str; 2] = ["_", " "];

/// Capitalizes the first character of every `delimiter`-separated segment of
/// `name`. The rest of each segment keeps its casing.
#[must_use]
pub fn normalize(name: &str, delimiter: &str) -> String {
    if delimiter.is_empty() {
        return capitalize_first(name);
    }

    name.split(delimiter)
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// Runs [`normalize`] once per delimiter, feeding each pass into the next.
#[must_use]
pub fn normalize_all(name: &str, delimiters: &[&str]) -> String {
    delimiters
        .iter()
        .fold(name.to_owned(), |acc, delimiter| normalize(&acc, delimiter))
}

fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
