//! cite-format: bibliographic citations for library records.
//!
//! This library provides functionality to:
//! - Load bibliographic records from JSON / JSONL exports
//! - Split free-form author strings into given and family names
//! - Format a record in APA, MLA, Chicago and Harvard styles
//! - Copy a formatted citation to the clipboard

pub mod clipboard;
pub mod formatter;
pub mod name;
pub mod output;
pub mod record;
pub mod style;

pub use clipboard::{
    CitationCopier, ClipboardError, ClipboardSink, CopyTracker, MemoryClipboard, Notification,
    NotificationKind, SystemClipboard, COPY_MARKER_DURATION,
};
pub use formatter::{format_citation, format_citations, CitationSet};
pub use name::{initials, parse_author_name, ParsedName};
pub use output::{render_json, render_text, FormattedRecord};
pub use record::{load_records, parse_records, BibliographicRecord, RecordError};
pub use style::{style_names, CitationStyle, StyleError};
