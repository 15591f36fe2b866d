/*!
 * Cue normalization.
 *
 * Turns parser output into display cues:
 * - timestamps converted to integer milliseconds
 * - override blocks and markup stripped, line breaks canonicalized to `<br>`
 * - entities decoded after tag stripping, so `&lt;` survives as a literal `<`
 * - inverted, too short and empty records dropped
 * - stable ascending sort on start time
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cue::{Cue, IntermediateRecord, LINE_BREAK};
use crate::errors::SubtitleError;
use crate::parsers::common::decode_entities;
use crate::timecode;

/// ASS override blocks ({\an8}, {\i1} ...)
static OVERRIDE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]*\}").unwrap());

/// Line-break tags in any spelling (<br>, <BR/>, <br />)
static BREAK_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<\s*br\s*/?\s*>").unwrap());

/// Any other HTML-like tag
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Result of normalizing one parser's records
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Valid cues, sorted by start time
    pub cues: Vec<Cue>,
    /// Number of records rejected
    pub dropped: usize,
}

/// Cue normalizer
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    min_duration_ms: u64,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(50)
    }
}

impl Normalizer {
    pub fn new(min_duration_ms: u64) -> Self {
        Normalizer { min_duration_ms }
    }

    /// Normalize every record, skipping the ones that fail
    pub fn normalize(&self, records: &[IntermediateRecord]) -> Normalized {
        let mut cues = Vec::with_capacity(records.len());
        let mut dropped = 0;

        for record in records {
            match self.normalize_record(record) {
                Ok(cue) => cues.push(cue),
                Err(SubtitleError::RecordMalformed { line, reason }) => {
                    debug!("Dropping record at line {}: {}", line, reason);
                    dropped += 1;
                }
                Err(e) => {
                    warn!("Skipping record at line {}: {}", record.line, e);
                    dropped += 1;
                }
            }
        }

        // stable: ties keep emission order
        cues.sort_by_key(|cue| cue.start_ms);

        Normalized { cues, dropped }
    }

    /// Convert one record to a cue or explain why it was rejected
    pub fn normalize_record(&self, record: &IntermediateRecord) -> Result<Cue, SubtitleError> {
        let start_ms = timecode::parse_timestamp(&record.start_raw)?;
        let end_ms = timecode::parse_timestamp(&record.end_raw)?;

        if start_ms >= end_ms {
            return Err(SubtitleError::RecordMalformed {
                line: record.line,
                reason: format!("end {}ms is not after start {}ms", end_ms, start_ms),
            });
        }

        let duration = end_ms - start_ms;
        if duration < self.min_duration_ms {
            return Err(SubtitleError::RecordMalformed {
                line: record.line,
                reason: format!("duration {}ms is below {}ms", duration, self.min_duration_ms),
            });
        }

        let text = clean_text(&record.text_raw);
        if text.is_empty() {
            return Err(SubtitleError::RecordMalformed {
                line: record.line,
                reason: "text is empty after markup cleanup".to_string(),
            });
        }

        Ok(Cue::new(start_ms, end_ms, text))
    }
}

/// Strip markup, keeping only the canonical line-break marker
pub fn clean_text(raw: &str) -> String {
    let without_overrides = OVERRIDE_BLOCK_REGEX.replace_all(raw, "");
    let unified = without_overrides
        .replace("\\N", LINE_BREAK)
        .replace("\\n", LINE_BREAK)
        .replace("\\h", " ")
        .replace('\n', LINE_BREAK);

    BREAK_TAG_REGEX
        .split(&unified)
        .map(|segment| {
            let stripped = TAG_REGEX.replace_all(segment, "");
            let decoded = decode_entities(&stripped);
            let visible: String = decoded
                .chars()
                .filter_map(|c| match c {
                    c if c.is_whitespace() => Some(' '),
                    c if c.is_control() => None,
                    c => Some(c),
                })
                .collect();
            visible.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}
