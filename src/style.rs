//! Citation styles.
//!
//! The set of styles is closed: APA, MLA, Chicago and Harvard. Each maps to a
//! formatter function in [`crate::formatter`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when resolving a style name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("Unknown citation style: '{0}'")]
    Unknown(String),
}

/// A bibliographic citation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CitationStyle {
    /// American Psychological Association
    #[serde(rename = "APA")]
    Apa,
    /// Modern Language Association
    #[serde(rename = "MLA")]
    Mla,
    /// Chicago Manual of Style (author-date)
    Chicago,
    /// Harvard referencing
    Harvard,
}

impl CitationStyle {
    /// Every style, in display order.
    pub const ALL: [CitationStyle; 4] = [
        CitationStyle::Apa,
        CitationStyle::Mla,
        CitationStyle::Chicago,
        CitationStyle::Harvard,
    ];

    /// The display name, also used as the key in serialized citation sets.
    pub fn name(self) -> &'static str {
        match self {
            CitationStyle::Apa => "APA",
            CitationStyle::Mla => "MLA",
            CitationStyle::Chicago => "Chicago",
            CitationStyle::Harvard => "Harvard",
        }
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CitationStyle {
    type Err = StyleError;

    /// Style names match case-insensitively (`apa`, `APA`, `Apa`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CitationStyle::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StyleError::Unknown(s.to_string()))
    }
}

/// Returns the list of available style names.
pub fn style_names() -> Vec<&'static str> {
    CitationStyle::ALL.iter().map(|s| s.name()).collect()
}
