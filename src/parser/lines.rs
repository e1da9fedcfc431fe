use std::sync::LazyLock;

use regex::Regex;

// Accepts lowercase words and dotted initials.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+(?: [A-Za-z.]+)*$").unwrap());

const CONTACT_MARKER: &str = "Contact info";
const HEADLINE_TOKEN: &str = "at";

/// Split on line breaks, trim, and drop lines that end up empty.
/// A byte-order mark counts as whitespace.
pub fn normalize(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|l| l.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}'))
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn is_name_shape(line: &str) -> bool {
    NAME_RE.is_match(line)
}

/// Plain substring test, so "Data" and "Education" qualify too.
pub fn has_headline_token(line: &str) -> bool {
    line.contains(HEADLINE_TOKEN)
}

pub fn is_contact_marker(line: &str) -> bool {
    line.contains(CONTACT_MARKER)
}

/// Line at `idx`, or "" when out of range in either direction.
pub fn neighbor(lines: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| lines.get(i)).map(String::as_str).unwrap_or("")
}
