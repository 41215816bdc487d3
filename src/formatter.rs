//! Citation formatting.
//!
//! Every style is a pure function of the record and its parsed author name.
//! Absent fields contribute no text; nothing here can fail.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::name::{initials, parse_author_name, ParsedName};
use crate::record::BibliographicRecord;
use crate::style::CitationStyle;

const DOI_RESOLVER: &str = "https://doi.org/";

/// The formatted citations of one record, one per style, in
/// [`CitationStyle::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationSet {
    entries: Vec<(CitationStyle, String)>,
}

impl CitationSet {
    /// Returns the citation for `style`.
    pub fn get(&self, style: CitationStyle) -> &str {
        self.entries
            .iter()
            .find(|(s, _)| *s == style)
            .map(|(_, text)| text.as_str())
            .unwrap_or_default()
    }

    /// Iterates `(style, citation)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (CitationStyle, &str)> {
        self.entries.iter().map(|(s, text)| (*s, text.as_str()))
    }

    /// Keeps only the given styles. Display order is preserved regardless of
    /// the order of `styles`.
    pub fn select(&self, styles: &[CitationStyle]) -> CitationSet {
        let entries = self
            .entries
            .iter()
            .filter(|(s, _)| styles.contains(s))
            .cloned()
            .collect();
        CitationSet { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as an object keyed by style name, keeping display order.
impl Serialize for CitationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (style, text) in &self.entries {
            map.serialize_entry(style.name(), text)?;
        }
        map.end()
    }
}

/// Formats `record` in every style.
///
/// # Examples
///
/// ```
/// use cite_format::{format_citations, BibliographicRecord, CitationStyle};
///
/// let record = BibliographicRecord::new("Fiqh Dasar")
///     .with_author("Ahmad Sanusi")
///     .with_year(2020)
///     .with_publisher("An-Nur Press");
///
/// let citations = format_citations(&record);
/// assert_eq!(
///     citations.get(CitationStyle::Apa),
///     "Sanusi, A. (2020). Fiqh Dasar. An-Nur Press."
/// );
/// ```
pub fn format_citations(record: &BibliographicRecord) -> CitationSet {
    let name = parse_author_name(record.author(), record.author_family_name());
    debug!(title = %record.title, ?name, "formatting citations");

    let entries = CitationStyle::ALL
        .into_iter()
        .map(|style| (style, format_with_name(style, record, &name)))
        .collect();

    CitationSet { entries }
}

/// Formats `record` in a single style.
pub fn format_citation(style: CitationStyle, record: &BibliographicRecord) -> String {
    let name = parse_author_name(record.author(), record.author_family_name());
    format_with_name(style, record, &name)
}

fn format_with_name(style: CitationStyle, record: &BibliographicRecord, name: &ParsedName) -> String {
    match style {
        CitationStyle::Apa => format_apa(record, name),
        CitationStyle::Mla => format_mla(record, name),
        CitationStyle::Chicago => format_chicago(record, name),
        CitationStyle::Harvard => format_harvard(record, name),
    }
}

/// `Last, I. I.`, or just `Last` when there are no given names.
fn surname_with_initials(name: &ParsedName) -> String {
    let initials = initials(&name.first_name);
    if initials.is_empty() {
        name.last_name.clone()
    } else {
        format!("{}, {}", name.last_name, initials)
    }
}

fn year_or_nd(record: &BibliographicRecord) -> String {
    match record.publish_year {
        Some(year) => year.to_string(),
        None => "n.d.".to_string(),
    }
}

/// `Sanusi, A. (2020). Fiqh Dasar (2nd ed.). An-Nur Press. https://doi.org/...`
fn format_apa(record: &BibliographicRecord, name: &ParsedName) -> String {
    let mut out = String::new();

    if !name.last_name.is_empty() {
        out.push_str(&surname_with_initials(name));
    }
    out.push_str(&format!(" ({}). ", year_or_nd(record)));
    out.push_str(&record.title);
    if let Some(edition) = record.edition() {
        out.push_str(&format!(" ({})", edition));
    }
    out.push_str(". ");
    if let Some(publisher) = record.publisher() {
        out.push_str(&format!("{}.", publisher));
    }
    if let Some(doi) = record.doi() {
        out.push_str(&format!(" {}{}", DOI_RESOLVER, doi));
    }

    out.trim().to_string()
}

/// `Sanusi, Ahmad. Fiqh Dasar. 2nd ed., An-Nur Press, 2020.`
fn format_mla(record: &BibliographicRecord, name: &ParsedName) -> String {
    let mut out = String::new();

    if name.is_complete() {
        out.push_str(&format!("{}, {}. ", name.last_name, name.first_name));
    } else if let Some(author) = record.author() {
        out.push_str(&format!("{}. ", author));
    }
    out.push_str(&format!("{}. ", record.title));
    if let Some(edition) = record.edition() {
        out.push_str(&format!("{}, ", edition));
    }
    if let Some(publisher) = record.publisher() {
        out.push_str(&format!("{}, ", publisher));
    }
    if let Some(year) = record.publish_year {
        out.push_str(&format!("{}.", year));
    }

    let out = out.trim();
    match out.strip_suffix(",.") {
        Some(head) => format!("{}.", head),
        None => out.to_string(),
    }
}

/// `Ahmad Sanusi, Fiqh Dasar, 2nd ed. (An-Nur Press, 2020). https://doi.org/....`
fn format_chicago(record: &BibliographicRecord, name: &ParsedName) -> String {
    let mut out = String::new();

    if name.is_complete() {
        out.push_str(&format!("{} {}", name.first_name, name.last_name));
    } else if let Some(author) = record.author() {
        out.push_str(author);
    }
    if !out.is_empty() {
        out.push_str(", ");
    }
    out.push_str(&record.title);
    if let Some(edition) = record.edition() {
        out.push_str(&format!(", {}", edition));
    }
    match (record.publisher(), record.publish_year) {
        (Some(publisher), Some(year)) => out.push_str(&format!(" ({}, {})", publisher, year)),
        (None, Some(year)) => out.push_str(&format!(" ({})", year)),
        (Some(publisher), None) => out.push_str(&format!(" ({})", publisher)),
        (None, None) => {}
    }
    out.push('.');
    if let Some(doi) = record.doi() {
        out.push_str(&format!(" {}{}.", DOI_RESOLVER, doi));
    }

    out.trim().to_string()
}

/// `Sanusi, A. (2020) Fiqh Dasar. 2nd ed. An-Nur Press.`
fn format_harvard(record: &BibliographicRecord, name: &ParsedName) -> String {
    let mut out = String::new();

    if !name.last_name.is_empty() {
        out.push_str(&surname_with_initials(name));
    }
    out.push_str(&format!(" ({})", year_or_nd(record)));
    out.push_str(&format!(" {}.", record.title));
    if let Some(edition) = record.edition() {
        out.push_str(&format!(" {}.", edition));
    }
    if let Some(publisher) = record.publisher() {
        out.push_str(&format!(" {}.", publisher));
    }

    out.trim().to_string()
}
