/*!
 * ASS/SSA parser.
 *
 * Reads `Dialogue:` lines, locating the Start/End/Text columns through the
 * `[Events]` `Format:` line when one exists and through the ASSv4+ positional
 * layout otherwise. Documents without an `[Events]` header are parsed in a
 * tolerant mode as long as they contain dialogue lines.
 */

use anyhow::Result;
use log::{debug, warn};

use crate::app_config::EngineConfig;
use crate::cue::{FormatTag, IntermediateRecord};
use crate::errors::SubtitleError;
use crate::timecode;

use super::SubtitleParser;
use super::common::extract_two_clock_tokens;

/// ASSv4+ positional layout when no Format line is present
const DEFAULT_START_COLUMN: usize = 1;
const DEFAULT_END_COLUMN: usize = 2;
const DEFAULT_TEXT_COLUMN: usize = 9;

/// ASS/SSA event parser
#[derive(Debug, Clone, Copy, Default)]
pub struct AssParser;

/// Column positions taken from an `[Events]` Format line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventColumns {
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub text: Option<usize>,
}

impl EventColumns {
    /// Parse the comma separated column names after `Format:`
    pub fn from_format_fields(fields: &str) -> Self {
        let names: Vec<String> = fields.split(',').map(|name| name.trim().to_ascii_lowercase()).collect();
        let position = |wanted: &str| names.iter().position(|name| name == wanted);

        EventColumns {
            start: position("start"),
            end: position("end"),
            text: position("text"),
        }
    }
}

impl SubtitleParser for AssParser {
    fn format(&self) -> FormatTag {
        FormatTag::Ass
    }

    fn parse(&self, content: &str, _config: &EngineConfig) -> Result<Vec<IntermediateRecord>> {
        let lines: Vec<&str> = content.lines().collect();

        let has_events_section = lines.iter().any(|line| line.trim().eq_ignore_ascii_case("[events]"));
        let dialogue_count = lines.iter().filter(|line| strip_prefix_ci(line.trim(), "Dialogue:").is_some()).count();

        if dialogue_count == 0 {
            debug!("No Dialogue lines found, not an ASS document");
            return Ok(Vec::new());
        }

        if !has_events_section {
            debug!("No [Events] section but {} Dialogue lines, parsing in tolerant mode", dialogue_count);
        }

        let mut records = Vec::with_capacity(dialogue_count);
        let mut section: Option<String> = None;
        let mut columns: Option<EventColumns> = None;

        for (idx, raw_line) in lines.iter().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw_line.trim();

            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                section = Some(trimmed.to_ascii_lowercase());
                continue;
            }

            if let Some(fields) = strip_prefix_ci(trimmed, "Format:") {
                if accepts_event_format(section.as_deref(), has_events_section) {
                    let parsed = EventColumns::from_format_fields(fields);
                    debug!("Event Format line at {}: {:?}", line_no, parsed);
                    columns = Some(parsed);
                }
                continue;
            }

            if let Some(data) = strip_prefix_ci(trimmed, "Dialogue:") {
                match parse_dialogue(trimmed, data, columns.as_ref(), line_no) {
                    Ok(record) => records.push(record),
                    Err(e) => warn!("Skipping dialogue: {}", e),
                }
            }
        }

        if !records.iter().any(has_parseable_times) {
            debug!("Structured ASS pass produced no usable timing, retrying leniently");
            let lenient = parse_leniently(&lines);
            if !lenient.is_empty() {
                return Ok(lenient);
            }
        }

        Ok(records)
    }
}

/// Case-insensitive `strip_prefix` that never splits a multi-byte character
fn strip_prefix_ci<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        line.get(prefix.len()..)
    } else {
        None
    }
}

/// Format lines count for events inside `[Events]`, or anywhere but style sections in tolerant mode
fn accepts_event_format(section: Option<&str>, has_events_section: bool) -> bool {
    match section {
        Some("[events]") => true,
        Some(name) => !has_events_section && !name.contains("styles"),
        None => !has_events_section,
    }
}

fn parse_dialogue(
    line: &str,
    data: &str,
    columns: Option<&EventColumns>,
    line_no: usize,
) -> Result<IntermediateRecord, SubtitleError> {
    let parts: Vec<&str> = data.split(',').collect();
    let field = |index: usize| parts.get(index).map(|part| part.trim().to_string());

    let (start, end, text) = match columns {
        Some(columns) => {
            let start = columns
                .start
                .filter(|&i| i < parts.len())
                .or_else(|| (parts.len() > DEFAULT_START_COLUMN).then_some(DEFAULT_START_COLUMN))
                .and_then(field);
            let end = columns
                .end
                .filter(|&i| i < parts.len())
                .or_else(|| (parts.len() > DEFAULT_END_COLUMN).then_some(DEFAULT_END_COLUMN))
                .and_then(field);
            let text_column = columns
                .text
                .unwrap_or_else(|| DEFAULT_TEXT_COLUMN.min(parts.len().saturating_sub(1)));
            let text = parts.get(text_column..).map(|rest| rest.join(",")).unwrap_or_default();
            (start, end, text)
        }
        None if parts.len() > DEFAULT_END_COLUMN => {
            let text = if parts.len() > DEFAULT_TEXT_COLUMN {
                parts[DEFAULT_TEXT_COLUMN..].join(",")
            } else {
                parts[parts.len() - 1].to_string()
            };
            (field(DEFAULT_START_COLUMN), field(DEFAULT_END_COLUMN), text)
        }
        None => match extract_two_clock_tokens(line) {
            Some((start, end, text)) => (Some(start), Some(end), text),
            None => (None, None, String::new()),
        },
    };

    match (start, end) {
        (Some(start), Some(end)) => Ok(IntermediateRecord::new(start, end, text.trim(), line_no)),
        _ => Err(SubtitleError::RecordMalformed {
            line: line_no,
            reason: "dialogue line has no start/end fields".to_string(),
        }),
    }
}

fn has_parseable_times(record: &IntermediateRecord) -> bool {
    timecode::parse_timestamp(&record.start_raw).is_ok() && timecode::parse_timestamp(&record.end_raw).is_ok()
}

/// Take the first two clock tokens of every Dialogue line, ignoring columns
fn parse_leniently(lines: &[&str]) -> Vec<IntermediateRecord> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| strip_prefix_ci(line.trim(), "Dialogue:").is_some())
        .filter_map(|(idx, line)| {
            let (start, end, text) = extract_two_clock_tokens(line.trim())?;
            if text.is_empty() {
                return None;
            }
            Some(IntermediateRecord::new(start, end, text, idx + 1))
        })
        .collect()
}
