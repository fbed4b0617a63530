//! Markdown status-note splitting.
//!
//! # Responsibility
//! - Split a Markdown document into per-date status notes under
//!   `## YYYY-MM-DD` headings.
//!
//! # Invariants
//! - One note per date heading; body content is trimmed.
//! - Headings at other levels are skipped, not treated as content.
//! - A document with no date headings yields one fallback note dated
//!   today, so a free-form paste still ingests.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::snapshot::StatusNote;

static DATE_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^## +(.+?)\s*$").expect("valid heading regex"));

/// Parse failure for a status-note document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteParseError {
    /// A `##` heading did not carry an ISO calendar date.
    InvalidHeadingDate(String),
}

impl Display for NoteParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHeadingDate(raw) => {
                write!(f, "invalid status note date heading: `{raw}`")
            }
        }
    }
}

impl Error for NoteParseError {}

/// Splits a Markdown body into per-date status notes.
///
/// # Errors
/// - [`NoteParseError::InvalidHeadingDate`] when a `##` heading text is
///   not an ISO date.
pub fn parse_status_notes(content: &str) -> Result<Vec<StatusNote>, NoteParseError> {
    let mut notes = Vec::new();
    let mut current_date: Option<NaiveDate> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in content.lines() {
        if let Some(caps) = DATE_HEADING_RE.captures(line) {
            if let Some(date) = current_date {
                notes.push(note_from(date, &buffer));
            }
            buffer.clear();
            let raw = &caps[1];
            current_date = Some(
                raw.parse()
                    .map_err(|_| NoteParseError::InvalidHeadingDate(raw.to_string()))?,
            );
        } else if line.starts_with('#') {
            continue;
        } else {
            buffer.push(line);
        }
    }
    if let Some(date) = current_date {
        notes.push(note_from(date, &buffer));
    }

    if notes.is_empty() {
        notes.push(StatusNote {
            date: Utc::now().date_naive(),
            author: None,
            content: content.trim().to_string(),
        });
    }
    Ok(notes)
}

fn note_from(date: NaiveDate, buffer: &[&str]) -> StatusNote {
    StatusNote {
        date,
        author: None,
        content: buffer.join("\n").trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_status_notes, NoteParseError};
    use chrono::NaiveDate;

    #[test]
    fn splits_notes_by_date_heading() {
        let body = "# Program notes\n\n## 2024-03-01\nKickoff held.\n\n## 2024-03-08\nVendor slipped.\nEscalated to steering.\n";
        let notes = parse_status_notes(body).expect("valid document");

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(notes[0].content, "Kickoff held.");
        assert_eq!(notes[1].content, "Vendor slipped.\nEscalated to steering.");
        assert_eq!(notes[1].author, None);
    }

    #[test]
    fn skips_non_date_headings() {
        let body = "## 2024-03-01\nBody line.\n### Sub-heading is skipped\nStill the same note.";
        let notes = parse_status_notes(body).expect("valid document");

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "Body line.\nStill the same note.");
    }

    #[test]
    fn invalid_heading_date_is_rejected() {
        let err = parse_status_notes("## next friday\nBody.").unwrap_err();
        assert_eq!(
            err,
            NoteParseError::InvalidHeadingDate("next friday".to_string())
        );
    }

    #[test]
    fn document_without_headings_becomes_single_note() {
        let notes = parse_status_notes("  Just a paste of free text.  ").expect("fallback");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "Just a paste of free text.");
    }
}
