/*!
 * Distributor-style bilingual parser.
 *
 * These documents pair a whole-second time range with one CJK line and one
 * Latin line, in either order, with no further structure. When no strict time
 * range exists, a loose pass takes any line carrying two clock tokens as a
 * time line. Only when that finds nothing either are the CJK and Latin lines
 * paired up into fixed slots.
 */

use anyhow::Result;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::EngineConfig;
use crate::cue::{FormatTag, IntermediateRecord, LINE_BREAK};

use super::SubtitleParser;
use super::common::{ScriptClass, classify_script, pair_script_lines};

/// `A - B`, `A --> B` or `A, B` with whole-second tokens
static TIME_PAIR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+:\d{2}:\d{2})\s*(?:-->|-|,)\s*(\d+:\d{2}:\d{2})").unwrap()
});

/// Clock token for the loose pass, sub-second part optional
static LOOSE_CLOCK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+:\d+:\d+(?:[.,]\d+)?").unwrap());

/// Line opening with `H:MM`, which ends a loose text block
static CLOCK_LEAD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+:\d+").unwrap());

/// Bilingual distributor-variant parser
#[derive(Debug, Clone, Copy, Default)]
pub struct BilingualParser;

impl SubtitleParser for BilingualParser {
    fn format(&self) -> FormatTag {
        FormatTag::BilingualVariant
    }

    fn parse(&self, content: &str, config: &EngineConfig) -> Result<Vec<IntermediateRecord>> {
        let lines: Vec<&str> = content.lines().collect();
        let mut records = Vec::new();
        let mut pairs_found = 0;

        for (idx, raw_line) in lines.iter().enumerate() {
            let Some((start, end)) = time_pair(raw_line.trim()) else {
                continue;
            };
            pairs_found += 1;

            let text_lines: Vec<String> = lines[idx + 1..]
                .iter()
                .map(|line| line.trim())
                .take_while(|line| !line.is_empty() && time_pair(line).is_none())
                .map(str::to_string)
                .collect();

            if text_lines.is_empty() {
                debug!("Time pair at line {} has no text", idx + 1);
                continue;
            }

            records.push(IntermediateRecord::new(start, end, arrange_lines(&text_lines), idx + 1));
        }

        if pairs_found == 0 && has_early_clock(content) {
            let loose = parse_loosely(&lines);
            if !loose.is_empty() {
                debug!("Loose pass produced {} records", loose.len());
                return Ok(loose);
            }
        }

        if pairs_found == 0 {
            debug!("No time pairs found, pairing CJK and Latin lines");
            let lines = lines.iter().enumerate().map(|(idx, line)| (idx + 1, *line));
            return Ok(pair_script_lines(lines, config.fallback_slot_ms));
        }

        debug!("Bilingual parser produced {} records from {} time pairs", records.len(), pairs_found);
        Ok(records)
    }
}

/// First whole-second time pair on a line; sub-second tokens do not count
fn time_pair(line: &str) -> Option<(String, String)> {
    TIME_PAIR_REGEX.captures_iter(line).find_map(|caps| {
        let end = caps.get(2)?;
        if has_fraction(&line[end.end()..]) {
            return None;
        }
        Some((caps[1].to_string(), end.as_str().to_string()))
    })
}

fn has_fraction(rest: &str) -> bool {
    let mut chars = rest.chars();
    matches!(chars.next(), Some('.' | ',')) && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Clock values from the first minutes of a programme
fn has_early_clock(content: &str) -> bool {
    content.contains("00:00:") || content.contains("00:01:")
}

/// Any line with two clock tokens is a time line; its text runs until a blank line or the next clock-led line
fn parse_loosely(lines: &[&str]) -> Vec<IntermediateRecord> {
    let mut records = Vec::new();

    for (idx, raw_line) in lines.iter().enumerate() {
        let mut tokens = LOOSE_CLOCK_REGEX.find_iter(raw_line);
        let (Some(start), Some(end)) = (tokens.next(), tokens.next()) else {
            continue;
        };

        let text_lines: Vec<&str> = lines[idx + 1..]
            .iter()
            .take_while(|line| !line.trim().is_empty() && !CLOCK_LEAD_REGEX.is_match(line))
            .map(|line| line.trim())
            .collect();

        if text_lines.is_empty() {
            continue;
        }

        records.push(IntermediateRecord::new(
            start.as_str(),
            end.as_str(),
            text_lines.join(LINE_BREAK),
            idx + 1,
        ));
    }

    records
}

/// Two lines in different scripts are ordered CJK first; anything else is kept verbatim
fn arrange_lines(lines: &[String]) -> String {
    match lines {
        [first, second] => match (classify_script(first), classify_script(second)) {
            (ScriptClass::Cjk, ScriptClass::Latin) => format!("{}{}{}", first, LINE_BREAK, second),
            (ScriptClass::Latin, ScriptClass::Cjk) => format!("{}{}{}", second, LINE_BREAK, first),
            _ => lines.join(LINE_BREAK),
        },
        _ => lines.join(LINE_BREAK),
    }
}
