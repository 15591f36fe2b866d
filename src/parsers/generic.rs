/*!
 * Last-resort parser.
 *
 * Dialogue-looking lines keep their own clock tokens; anything else becomes
 * one fixed slot per non-empty line, so any document with text yields cues.
 */

use anyhow::Result;
use log::debug;

use crate::app_config::EngineConfig;
use crate::cue::{FormatTag, IntermediateRecord};

use super::SubtitleParser;
use super::common::{extract_two_clock_tokens, fixed_slots};

/// Style, Name, MarginL, MarginR, MarginV, Effect precede Text after the end time
const TRAILING_EVENT_FIELDS: usize = 6;

/// Generic line-fallback parser
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericParser;

impl SubtitleParser for GenericParser {
    fn format(&self) -> FormatTag {
        FormatTag::Generic
    }

    fn parse(&self, content: &str, config: &EngineConfig) -> Result<Vec<IntermediateRecord>> {
        if content.contains("Dialogue:") {
            let records = dialogue_records(content);
            if !records.is_empty() {
                debug!("Generic parser extracted {} dialogue records", records.len());
                return Ok(records);
            }
        }

        let texts = content.lines().enumerate().filter_map(|(idx, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with("WEBVTT") {
                None
            } else {
                Some((idx + 1, trimmed.to_string()))
            }
        });

        let records = fixed_slots(texts, config.fallback_slot_ms);
        debug!("Generic parser assigned {} fixed slots", records.len());
        Ok(records)
    }
}

fn dialogue_records(content: &str) -> Vec<IntermediateRecord> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.contains("Dialogue:"))
        .filter_map(|(idx, line)| {
            let (start, end, rest) = extract_two_clock_tokens(line)?;
            Some(IntermediateRecord::new(start, end, event_text(&rest), idx + 1))
        })
        .collect()
}

/// Text after the trailing event fields, or the whole remainder when they are absent
fn event_text(rest: &str) -> &str {
    let fields: Vec<&str> = rest.splitn(TRAILING_EVENT_FIELDS + 1, ',').collect();
    if fields.len() > TRAILING_EVENT_FIELDS {
        fields[TRAILING_EVENT_FIELDS].trim()
    } else {
        rest
    }
}
