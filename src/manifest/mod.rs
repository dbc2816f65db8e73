//! Remote manifest document: a listing of notes with their body URLs.
//!
//! # Format
//! ```text
//! <blog>
//!   <note>
//!     <title>collaborate</title>
//!     <mtime>1700000000.0</mtime>
//!     <path>git/collaborate.md</path>
//!     <url>https://example.com/notes/git/collaborate.md</url>
//!     <category>git</category>
//!   </note>
//! </blog>
//! ```
//!
//! Every field is optional at the document level; the remote source decides
//! which entries are usable.

mod generate;

pub use generate::{EXCLUDED_NAMES, generate};

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading or writing a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("malformed manifest")]
    Parse(#[source] quick_xml::DeError),

    #[error("failed to write manifest")]
    Write(#[source] quick_xml::DeError),
}

/// A manifest document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "blog")]
pub struct Manifest {
    #[serde(rename = "note", default)]
    pub notes: Vec<ManifestNote>,
}

/// One `note` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Modification time in Unix epoch seconds, as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Manifest {
    /// Parses a manifest from XML text.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Parse` if the text is not well-formed or does
    /// not have the expected shape.
    pub fn from_xml(text: &str) -> Result<Self, ManifestError> {
        quick_xml::de::from_str(text).map_err(ManifestError::Parse)
    }

    /// Serializes the manifest as an indented `<blog>` document.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Write` if serialization fails.
    pub fn to_xml(&self) -> Result<String, ManifestError> {
        let mut xml = String::from("<?xml version=\"1.0\" ?>\n");
        let mut ser = quick_xml::se::Serializer::with_root(&mut xml, Some("blog"))
            .map_err(ManifestError::Write)?;
        ser.indent(' ', 2);
        self.serialize(ser).map_err(ManifestError::Write)?;
        xml.push('\n');
        Ok(xml)
    }
}

impl ManifestNote {
    /// Returns the calendar date (UTC) of `mtime`, if it parses.
    pub fn date(&self) -> Option<NaiveDate> {
        self.mtime.as_deref().and_then(parse_mtime)
    }
}

/// Parses Unix epoch seconds (fractions allowed) into a UTC calendar date.
///
/// ```
/// use chrono::NaiveDate;
/// use noteindex::manifest::parse_mtime;
///
/// assert_eq!(parse_mtime("1700000000"), NaiveDate::from_ymd_opt(2023, 11, 14));
/// assert_eq!(parse_mtime("not a number"), None);
/// ```
pub fn parse_mtime(text: &str) -> Option<NaiveDate> {
    let seconds: f64 = text.trim().parse().ok()?;
    if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(seconds.floor() as i64, 0).map(|dt| dt.date_naive())
}
