//! Output generation for formatted citations.
//!
//! Renders the citations of one or more records either as readable text
//! (title line, then one indented line per style) or as a JSON array.

use serde::Serialize;

use crate::formatter::{format_citations, CitationSet};
use crate::record::BibliographicRecord;
use crate::style::CitationStyle;

/// A record's title next to its formatted citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedRecord {
    pub title: String,
    pub citations: CitationSet,
}

impl FormattedRecord {
    /// Formats `record`, keeping only `styles`.
    pub fn new(record: &BibliographicRecord, styles: &[CitationStyle]) -> Self {
        Self {
            title: record.title.clone(),
            citations: format_citations(record).select(styles),
        }
    }
}

/// Renders records as text blocks separated by a blank line.
///
/// # Examples
///
/// ```
/// use cite_format::{render_text, BibliographicRecord, CitationStyle, FormattedRecord};
///
/// let record = BibliographicRecord::new("T").with_author("A B").with_year(1999);
/// let formatted = FormattedRecord::new(&record, &[CitationStyle::Chicago]);
///
/// assert_eq!(render_text(&[formatted]), "T\n  Chicago: A B, T (1999).\n");
/// ```
pub fn render_text(records: &[FormattedRecord]) -> String {
    let blocks: Vec<String> = records
        .iter()
        .map(|record| {
            let mut block = format!("{}\n", record.title);
            for (style, citation) in record.citations.iter() {
                block.push_str(&format!("  {}: {}\n", style, citation));
            }
            block
        })
        .collect();

    blocks.join("\n")
}

/// Renders records as a pretty-printed JSON array.
pub fn render_json(records: &[FormattedRecord]) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<FormattedRecord> {
        let first = BibliographicRecord::new("Fiqh Dasar")
            .with_author("Ahmad Sanusi")
            .with_year(2020)
            .with_publisher("An-Nur Press");
        let second = BibliographicRecord::new("Tajwid");
        vec![
            FormattedRecord::new(&first, &[CitationStyle::Apa, CitationStyle::Mla]),
            FormattedRecord::new(&second, &[CitationStyle::Apa, CitationStyle::Mla]),
        ]
    }

    #[test]
    fn test_render_text_blocks() {
        // Given: two records formatted in APA and MLA
        let records = sample();

        // When: we render them as text
        let text = render_text(&records);

        // Then: each record is a title plus indented styles, blank-line separated
        assert_eq!(
            text,
            "Fiqh Dasar\n\
             \x20 APA: Sanusi, A. (2020). Fiqh Dasar. An-Nur Press.\n\
             \x20 MLA: Sanusi, Ahmad. Fiqh Dasar. An-Nur Press, 2020.\n\
             \n\
             Tajwid\n\
             \x20 APA: (n.d.). Tajwid.\n\
             \x20 MLA: Tajwid.\n"
        );
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn test_render_json_shape() {
        let json = render_json(&sample()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["title"], "Fiqh Dasar");
        assert_eq!(
            parsed[0]["citations"]["MLA"],
            "Sanusi, Ahmad. Fiqh Dasar. An-Nur Press, 2020."
        );
        assert!(parsed[1]["citations"].get("Chicago").is_none());
    }

    #[test]
    fn test_render_json_keeps_style_order() {
        let json = render_json(&sample()).unwrap();
        let apa = json.find("\"APA\"").unwrap();
        let mla = json.find("\"MLA\"").unwrap();
        assert!(apa < mla);
    }
}
