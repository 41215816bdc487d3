//! Bibliographic record loading.
//!
//! Records arrive as exports of the content store, in one of three shapes:
//! a JSON array of objects, a single JSON object, or JSONL (one object per
//! line). Keys may be camelCase (`publishYear`) or the store's snake_case
//! column names (`publish_year`); unknown keys are ignored.

use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading records.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid JSONL at line {line}: {message}")]
    JsonlError { line: usize, message: String },
}

/// Metadata for one work, as stored for a library entry.
///
/// `editor`, `pages` and `isbn` are carried along for callers but no citation
/// style renders them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BibliographicRecord {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(
        default,
        alias = "author_family_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_family_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(
        default,
        alias = "publish_year",
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub publish_year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub pages: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

impl BibliographicRecord {
    /// Creates a record with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_author_family_name(mut self, family: impl Into<String>) -> Self {
        self.author_family_name = Some(family.into());
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.publish_year = Some(year);
        self
    }

    pub fn with_edition(mut self, edition: impl Into<String>) -> Self {
        self.edition = Some(edition.into());
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    // Empty strings count as absent, the same as a missing column.

    pub fn author(&self) -> Option<&str> {
        present(&self.author)
    }

    pub fn author_family_name(&self) -> Option<&str> {
        present(&self.author_family_name)
    }

    pub fn publisher(&self) -> Option<&str> {
        present(&self.publisher)
    }

    pub fn edition(&self) -> Option<&str> {
        present(&self.edition)
    }

    pub fn doi(&self) -> Option<&str> {
        present(&self.doi)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Accepts an integer given either as a JSON number or as a numeric string.
fn lenient_int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + FromStr,
    <T as FromStr>::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(n)) => T::try_from(n)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("integer {} is out of range", n))),
        Some(Raw::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse()
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid integer '{}': {}", s, e)))
        }
    }
}

/// Loads records from a JSON, single-object JSON, or JSONL file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a record is malformed.
pub fn load_records(path: &Path) -> Result<Vec<BibliographicRecord>, RecordError> {
    let content = fs::read_to_string(path)?;
    parse_records(&content)
}

/// Parses records from any of the supported input shapes.
///
/// Empty (or whitespace-only) content yields no records.
pub fn parse_records(content: &str) -> Result<Vec<BibliographicRecord>, RecordError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let records: Vec<BibliographicRecord> = serde_json::from_str(trimmed)?;
        debug!(count = records.len(), "parsed JSON array of records");
        return Ok(records);
    }

    // A pretty-printed single object spans several lines, so try the whole
    // document before falling back to JSONL.
    if trimmed.starts_with('{') {
        if let Ok(record) = serde_json::from_str::<BibliographicRecord>(trimmed) {
            debug!("parsed single record object");
            return Ok(vec![record]);
        }
    }

    let mut records = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<BibliographicRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                return Err(RecordError::JsonlError {
                    line: line_num + 1,
                    message: e.to_string(),
                });
            }
        }
    }

    debug!(count = records.len(), "parsed JSONL records");
    Ok(records)
}
