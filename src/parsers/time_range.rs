/*!
 * Time-range listing parser (`00:00:33 - 00:00:34 text`).
 */

use anyhow::Result;
use log::debug;

use crate::app_config::EngineConfig;
use crate::cue::{FormatTag, IntermediateRecord, LINE_BREAK};

use super::SubtitleParser;
use super::common::TIME_RANGE_REGEX;

/// Time-range variant parser
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeRangeParser;

impl SubtitleParser for TimeRangeParser {
    fn format(&self) -> FormatTag {
        FormatTag::TimeRange
    }

    fn parse(&self, content: &str, _config: &EngineConfig) -> Result<Vec<IntermediateRecord>> {
        let lines: Vec<&str> = content.lines().collect();
        let mut records = Vec::new();

        for (idx, raw_line) in lines.iter().enumerate() {
            let trimmed = raw_line.trim();
            let Some(caps) = TIME_RANGE_REGEX.captures(trimmed) else {
                continue;
            };
            let Some(range) = caps.get(0) else {
                continue;
            };

            let same_line = trimmed[range.end()..]
                .trim_start_matches(|c: char| c == ':' || c == '-' || c == '|' || c.is_whitespace())
                .trim_end();

            let text = if same_line.is_empty() {
                lines[idx + 1..]
                    .iter()
                    .map(|line| line.trim())
                    .take_while(|line| !line.is_empty() && !TIME_RANGE_REGEX.is_match(line))
                    .collect::<Vec<_>>()
                    .join(LINE_BREAK)
            } else {
                same_line.to_string()
            };

            if text.is_empty() {
                debug!("Time range at line {} has no text", idx + 1);
                continue;
            }

            records.push(IntermediateRecord::new(&caps[1], &caps[2], text, idx + 1));
        }

        if records.is_empty() {
            debug!("No time range carried text, pairing time lines with text lines");
            return Ok(pair_positionally(&lines));
        }

        Ok(records)
    }
}

/// Match the n-th time line with the n-th text line
fn pair_positionally(lines: &[&str]) -> Vec<IntermediateRecord> {
    let mut time_lines = Vec::new();
    let mut text_lines = Vec::new();

    for line in lines.iter().map(|line| line.trim()).filter(|line| !line.is_empty()) {
        if let Some(caps) = TIME_RANGE_REGEX.captures(line) {
            time_lines.push((caps[1].to_string(), caps[2].to_string()));
        } else if !line.starts_with('[') && !line.contains("Format:") && !line.contains("RARBG") {
            text_lines.push(line);
        }
    }

    time_lines
        .into_iter()
        .zip(text_lines)
        .map(|((start, end), text)| IntermediateRecord::new(start, end, text, 0))
        .collect()
}
