/*!
 * WebVTT parser.
 */

use anyhow::Result;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::EngineConfig;
use crate::cue::{FormatTag, IntermediateRecord, LINE_BREAK};

use super::SubtitleParser;

/// Cue timing line; hours are optional, milliseconds are not. Cue settings after the end time are ignored.
static VTT_TIME_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*((?:\d+:)?\d{2}:\d{2}\.\d{3})\s*-->\s*((?:\d+:)?\d{2}:\d{2}\.\d{3})").unwrap()
});

/// WebVTT parser
#[derive(Debug, Clone, Copy, Default)]
pub struct VttParser;

impl SubtitleParser for VttParser {
    fn format(&self) -> FormatTag {
        FormatTag::Vtt
    }

    fn parse(&self, content: &str, _config: &EngineConfig) -> Result<Vec<IntermediateRecord>> {
        let lines: Vec<&str> = content.lines().collect();

        let body_start = lines
            .iter()
            .position(|line| line.trim_start().starts_with("WEBVTT"))
            .map_or(0, |header| header + 1);

        let mut records = Vec::new();
        let mut current: Option<(IntermediateRecord, Vec<String>)> = None;
        let mut skipping_block = false;
        let mut at_block_start = true;

        for (idx, raw_line) in lines.iter().enumerate().skip(body_start) {
            let line_no = idx + 1;
            let trimmed = raw_line.trim();

            if trimmed.is_empty() {
                if let Some((record, text)) = current.take() {
                    records.push(finish(record, text));
                }
                skipping_block = false;
                at_block_start = true;
                continue;
            }

            if skipping_block {
                continue;
            }

            if at_block_start && current.is_none() && is_non_cue_block(trimmed) {
                skipping_block = true;
                continue;
            }
            at_block_start = false;

            if let Some(caps) = VTT_TIME_LINE_REGEX.captures(trimmed) {
                if let Some((record, text)) = current.take() {
                    records.push(finish(record, text));
                }
                current = Some((IntermediateRecord::new(&caps[1], &caps[2], "", line_no), Vec::new()));
                continue;
            }

            match current.as_mut() {
                Some((_, text)) => text.push(trimmed.to_string()),
                // cue identifier or stray text before a timing line
                None => debug!("Skipping line {} outside a cue", line_no),
            }
        }

        if let Some((record, text)) = current.take() {
            records.push(finish(record, text));
        }

        debug!("VTT parser produced {} records", records.len());
        Ok(records)
    }
}

fn finish(mut record: IntermediateRecord, text: Vec<String>) -> IntermediateRecord {
    record.text_raw = text.join(LINE_BREAK);
    record
}

/// NOTE, STYLE and REGION blocks carry no cues
fn is_non_cue_block(line: &str) -> bool {
    ["NOTE", "STYLE", "REGION"].iter().any(|keyword| {
        line.strip_prefix(keyword)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}
