//! Author name parsing.
//!
//! Authors are stored as a single free-form string, either "Last, First" or
//! "First Last", optionally paired with an explicit family name. Citation
//! styles need the two halves separately.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*$").expect("trailing comma pattern is valid"));

/// An author name split into given and family parts.
///
/// Either part may be empty: a missing author yields two empty parts, and a
/// single-word author is treated as a family name only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedName {
    pub first_name: String,
    pub last_name: String,
}

impl ParsedName {
    fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// True when both halves are known.
    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty() && !self.last_name.is_empty()
    }
}

/// Splits an author string into first and last name.
///
/// When `family_name` is given it wins: the first occurrence of it is cut out
/// of `author` and whatever remains (minus a trailing comma) is the first
/// name. The cut is a plain substring match, so `"Alina Ali"` with family
/// name `"Ali"` leaves `"na Ali"`.
///
/// Without a family name, a comma means "Last, First"; otherwise the last
/// space-separated word is the family name.
///
/// # Examples
///
/// ```
/// use cite_format::parse_author_name;
///
/// let name = parse_author_name(Some("John Middle Doe"), None);
/// assert_eq!(name.first_name, "John Middle");
/// assert_eq!(name.last_name, "Doe");
/// ```
pub fn parse_author_name(author: Option<&str>, family_name: Option<&str>) -> ParsedName {
    let Some(author) = author else {
        return ParsedName::default();
    };

    if let Some(family) = family_name {
        let remainder = author.replacen(family, "", 1);
        let first = TRAILING_COMMA.replace(remainder.trim(), "");
        trace!(author, family, first = %first, "split author on explicit family name");
        return ParsedName::new(first, family);
    }

    let parts: Vec<&str> = author.split(',').map(str::trim).collect();
    if parts.len() >= 2 {
        return ParsedName::new(parts[1], parts[0]);
    }

    let words: Vec<&str> = author.split(' ').collect();
    if let Some((last, rest)) = words.split_last() {
        if !rest.is_empty() {
            return ParsedName::new(rest.join(" "), *last);
        }
    }

    ParsedName::new("", author)
}

/// Turns a (possibly multi-word) first name into initials: `"John Middle"`
/// becomes `"J. M."`.
pub fn initials(first_name: &str) -> String {
    first_name
        .split(' ')
        .filter_map(|word| word.chars().next())
        .map(|c| format!("{}.", c.to_uppercase()))
        .collect::<Vec<_>>()
        .join(" ")
}
