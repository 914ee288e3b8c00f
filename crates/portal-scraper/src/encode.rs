//! Translation of the portal's meeting/exam phrasing into slot notation.
//!
//! A meetings cell reads like
//! `درس(ت): دو شنبه 08:00-09:30 مکان: ...` and an exam cell like
//! `تاریخ: 1403/10/15 ساعت: 09:00-11:00`. Both are rewritten by a single
//! ordered rule table into `cd2/08:00-09:30...e(1403/10/15):09:00-11:00`,
//! which is then cut apart positionally.
//!
//! All input is expected to have gone through
//! [`normalize_digits`](models::normalize::normalize_digits) first, so the
//! rules only spell the Persian letter forms and ASCII digits.

use lazy_static::lazy_static;
use models::{course_record::MAX_MEETINGS, error::CodecError};
use regex::Regex;

/// Delimiter that replaces every session-type label
pub const SESSION_DELIMITER: char = 'c';
/// Delimiter that replaces the exam keyword
pub const EXAM_DELIMITER: char = 'e';
/// Marker word that starts trailing location text in a meeting
pub const LOCATION_MARKER: &str = "مکان";

/// Ordered rewrite table applied in one left-to-right pass.
///
/// At each position the first rule whose pattern matches wins. A pattern
/// that contains another pattern must come before it (e.g. `دو شنبه` and
/// `دوشنبه` before `شنبه`).
pub const RULES: &[(&str, &str)] = &[
    // Weekdays, 0 = Saturday .. 6 = Friday
    ("پنج شنبه", "d5/"),
    ("پنجشنبه", "d5/"),
    ("چهار شنبه", "d4/"),
    ("چهارشنبه", "d4/"),
    ("سه شنبه", "d3/"),
    ("سهشنبه", "d3/"),
    ("دو شنبه", "d2/"),
    ("دوشنبه", "d2/"),
    ("یک شنبه", "d1/"),
    ("یکشنبه", "d1/"),
    ("شنبه", "d0/"),
    ("جمعه", "d6/"),
    // Half-semester markers
    ("نیمه1 ت", ""),
    ("نیمه2 ت", ""),
    // Session types; lecture vs. exercise is not modelled
    ("حل تمرین (ت):", "c"),
    ("حل تمرین (ع):", "c"),
    ("حل تمرین(ت):", "c"),
    ("حل تمرین(ع):", "c"),
    ("حلتمرین(ت):", "c"),
    ("حلتمرین(ع):", "c"),
    ("درس (ت):", "c"),
    ("درس (ع):", "c"),
    ("درس(ت):", "c"),
    ("درس(ع):", "c"),
    // Exam keyword, then the generic hour keyword
    ("امتحان", "e"),
    ("ساعت", ""),
];

lazy_static! {
    static ref EXAM_DATE_LABEL: Regex = Regex::new(r"تاریخ\s*:\s*").unwrap();
    static ref EXAM_HOUR_LABEL: Regex = Regex::new(r"\s*ساعت\s*:").unwrap();
}

/// A cell pair after encoding, before any decoding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedCell {
    /// Candidate slot strings, at most [`MAX_MEETINGS`], location text removed
    pub meetings: Vec<String>,
    /// Everything from the exam delimiter onward, if present
    pub exam: Option<String>,
}

/// Applies [`RULES`] to `text` and drops all whitespace.
pub fn apply_rules(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    'scan: while let Some(c) = rest.chars().next() {
        for &(pattern, replacement) in RULES {
            if let Some(after) = rest.strip_prefix(pattern) {
                out.push_str(replacement);
                rest = after;
                continue 'scan;
            }
        }

        if !c.is_whitespace() {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Rewrites the exam cell so the date sits in parentheses right after the
/// exam keyword and the time range follows `):`.
///
/// `تاریخ: 1403/10/15 ساعت: 09:00-11:00` becomes
/// `امتحان(1403/10/15) ساعت : 09:00-11:00`.
pub fn align_exam_cell(exam: &str) -> String {
    let exam = EXAM_DATE_LABEL.replace(exam, "امتحان(");
    EXAM_HOUR_LABEL.replace(&exam, ") ساعت :").into_owned()
}

/// Encodes a meetings cell and an exam cell.
///
/// # Arguments
/// * `meetings` - Normalised text of the day/time cell
/// * `exam` - Normalised text of the exam cell, possibly empty
///
/// # Returns
/// The candidate slot strings and the raw exam segment
pub fn encode_cell(meetings: &str, exam: &str) -> EncodedCell {
    let combined = format!("{meetings} {}", align_exam_cell(exam));
    let processed = apply_rules(&combined);

    let (meeting_part, exam_part) = match processed.find(EXAM_DELIMITER) {
        Some(idx) => (&processed[..idx], Some(processed[idx..].to_owned())),
        None => (processed.as_str(), None),
    };

    // Fragment 0 precedes the first session label and is never a slot
    let meetings = meeting_part
        .split(SESSION_DELIMITER)
        .skip(1)
        .take(MAX_MEETINGS)
        .map(|fragment| match fragment.find(LOCATION_MARKER) {
            Some(idx) => fragment[..idx].to_owned(),
            None => fragment.to_owned(),
        })
        .collect();

    EncodedCell {
        meetings,
        exam: exam_part,
    }
}

/// Splits an encoded exam segment `e(<date>):<range>` into date and range.
///
/// # Errors
/// [`CodecError::InvalidExamWindow`] if the segment has no parenthesised
/// date, e.g. when the exam cell carries no hour label
pub fn split_exam_segment(segment: &str) -> Result<(String, String), CodecError> {
    let invalid = || CodecError::InvalidExamWindow(segment.to_owned());

    let open = segment.find('(').ok_or_else(invalid)?;
    let close = open + segment[open..].find(')').ok_or_else(invalid)?;
    let date = segment[open + 1..close].replace('.', "/");

    let range = segment[close + 1..]
        .strip_prefix(':')
        .unwrap_or(&segment[close + 1..])
        .to_owned();

    Ok((date, range))
}
