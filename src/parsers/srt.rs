/*!
 * SubRip parser.
 *
 * A line state machine: an optional numeric index, a `-->` time line, then
 * text until a blank line. Timestamps may use `,`, `.` or no sub-second part.
 */

use anyhow::Result;
use log::debug;

use crate::app_config::EngineConfig;
use crate::cue::{FormatTag, IntermediateRecord, LINE_BREAK};

use super::SubtitleParser;
use super::common::SRT_TIME_LINE_REGEX;

/// SubRip parser
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectIndex,
    ExpectTime,
    CollectText,
}

/// Record being assembled from a block
struct Pending {
    start: String,
    end: String,
    line: usize,
    text: Vec<String>,
}

impl Pending {
    fn into_record(self) -> IntermediateRecord {
        IntermediateRecord::new(self.start, self.end, self.text.join(LINE_BREAK), self.line)
    }
}

impl SubtitleParser for SrtParser {
    fn format(&self) -> FormatTag {
        FormatTag::Srt
    }

    fn parse(&self, content: &str, _config: &EngineConfig) -> Result<Vec<IntermediateRecord>> {
        let lines: Vec<&str> = content.lines().collect();
        let mut records = Vec::new();
        let mut state = State::ExpectIndex;
        let mut pending: Option<Pending> = None;

        for (idx, raw_line) in lines.iter().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw_line.trim();

            if trimmed.is_empty() {
                if let Some(done) = pending.take() {
                    records.push(done.into_record());
                }
                state = State::ExpectIndex;
                continue;
            }

            let pair = time_pair(trimmed);

            match state {
                State::ExpectIndex => {
                    if let Some((start, end)) = pair {
                        pending = Some(Pending { start, end, line: line_no, text: Vec::new() });
                        state = State::CollectText;
                    } else if is_index_line(trimmed) {
                        state = State::ExpectTime;
                    } else {
                        debug!("Ignoring stray line {} outside a block", line_no);
                    }
                }
                State::ExpectTime => {
                    if let Some((start, end)) = pair {
                        pending = Some(Pending { start, end, line: line_no, text: Vec::new() });
                        state = State::CollectText;
                    } else {
                        debug!("Index without a time line before line {}", line_no);
                        state = State::ExpectIndex;
                    }
                }
                State::CollectText => {
                    if let Some((start, end)) = pair {
                        // blank line missing between blocks
                        if let Some(done) = pending.take() {
                            records.push(done.into_record());
                        }
                        pending = Some(Pending { start, end, line: line_no, text: Vec::new() });
                    } else if is_index_line(trimmed) && next_is_time_line(&lines, idx) {
                        if let Some(done) = pending.take() {
                            records.push(done.into_record());
                        }
                        state = State::ExpectTime;
                    } else if let Some(block) = pending.as_mut() {
                        block.text.push(trimmed.to_string());
                    }
                }
            }
        }

        if let Some(done) = pending.take() {
            records.push(done.into_record());
        }

        debug!("SRT parser produced {} records", records.len());
        Ok(records)
    }
}

fn time_pair(line: &str) -> Option<(String, String)> {
    SRT_TIME_LINE_REGEX
        .captures(line)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

fn is_index_line(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

fn next_is_time_line(lines: &[&str], idx: usize) -> bool {
    lines
        .get(idx + 1)
        .is_some_and(|next| SRT_TIME_LINE_REGEX.is_match(next.trim()))
}
