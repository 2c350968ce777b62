//! Splits a model reply into the three note sections.
//!
//! The reply is cut on [`SECTION_DELIMITER`]; each fragment is trimmed and matched against an
//! ordered table of headings. A matching fragment's body (heading removed, trimmed) is stored in
//! the corresponding field, with a later fragment for the same heading replacing an earlier one.
//! Fragments that start with no known heading, such as chatter before the first delimiter, are
//! dropped. Headings the model forgot leave their field empty. A reply in which no heading
//! matched at all yields `None`; a heading with an empty body still counts as a match.

use super::prompt::{
    BULLET_POINTS_HEADING, EXAM_SUMMARY_HEADING, SECTION_DELIMITER, SHORT_NOTES_HEADING,
};
use serde::Serialize;

/// The three sections returned by `POST /summarize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteSections {
    /// Condensed prose notes.
    pub short_notes: String,
    /// Bullet list of key points.
    pub bullet_points: String,
    /// Exam-focused recap.
    pub exam_summary: String,
}

type SectionSlot = fn(&mut NoteSections) -> &mut String;

fn short_notes(notes: &mut NoteSections) -> &mut String {
    &mut notes.short_notes
}

fn bullet_points(notes: &mut NoteSections) -> &mut String {
    &mut notes.bullet_points
}

fn exam_summary(notes: &mut NoteSections) -> &mut String {
    &mut notes.exam_summary
}

/// Headings in match order, each paired with the field it fills.
const SECTIONS: [(&str, SectionSlot); 3] = [
    (SHORT_NOTES_HEADING, short_notes),
    (BULLET_POINTS_HEADING, bullet_points),
    (EXAM_SUMMARY_HEADING, exam_summary),
];

/// Parse the raw reply, discarding unrecognized content.
///
/// Returns `None` only when no fragment starts with a known heading.
pub fn parse_sections(reply: &str) -> Option<NoteSections> {
    let mut notes = NoteSections::default();
    let mut matched_any = false;
    for fragment in reply.split(SECTION_DELIMITER).map(str::trim) {
        let matched = SECTIONS.iter().find_map(|(heading, slot)| {
            fragment
                .strip_prefix(heading)
                .map(|body| (body.trim(), *slot))
        });
        match matched {
            Some((body, slot)) => {
                *slot(&mut notes) = body.to_string();
                matched_any = true;
            }
            None if !fragment.is_empty() => {
                tracing::trace!(chars = fragment.len(), "Discarding unrecognized reply fragment");
            }
            None => {}
        }
    }
    matched_any.then_some(notes)
}
