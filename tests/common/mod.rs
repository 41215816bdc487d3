//! Shared test records and helpers for integration tests.

#![allow(dead_code)]

use std::io::Write;

use cite_format::BibliographicRecord;
use tempfile::NamedTempFile;

/// Two records as a JSON array: a complete book and a title-only entry.
pub const BOOKS_JSON: &str = r#"[
  {"title": "Fiqh Dasar", "author": "Ahmad Sanusi", "publishYear": 2020, "publisher": "An-Nur Press"},
  {"title": "Kitab Kuning"}
]"#;

/// The same two records as JSONL, using the store's snake_case columns.
pub const BOOKS_JSONL: &str = r#"{"id": 1, "title": "Fiqh Dasar", "author": "Ahmad Sanusi", "publish_year": 2020, "publisher": "An-Nur Press"}
{"id": 2, "title": "Kitab Kuning"}
"#;

/// A spread of records covering every combination of present and absent
/// author, family name, year, publisher, edition and DOI.
pub fn record_matrix() -> Vec<BibliographicRecord> {
    let authors: [(Option<&str>, Option<&str>); 5] = [
        (None, None),
        (Some("Plato"), None),
        (Some("Ahmad Sanusi"), None),
        (Some("Doe, John Middle"), None),
        (Some("Muhammad Nashiruddin al-Albani"), Some("al-Albani")),
    ];

    let mut records = Vec::new();
    for (author, family) in authors {
        for mask in 0..16u8 {
            let mut record = BibliographicRecord::new("Fiqh Dasar");
            record.author = author.map(str::to_string);
            record.author_family_name = family.map(str::to_string);
            if mask & 1 != 0 {
                record.publish_year = Some(2020);
            }
            if mask & 2 != 0 {
                record.publisher = Some("An-Nur Press".to_string());
            }
            if mask & 4 != 0 {
                record.edition = Some("Cet. 2".to_string());
            }
            if mask & 8 != 0 {
                record.doi = Some("10.1234/abc".to_string());
            }
            records.push(record);
        }
    }
    records
}

/// Create a temporary file with the given content and extension.
pub fn create_temp_file(content: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
