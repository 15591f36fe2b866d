/*!
 * Format sniffing.
 *
 * An ordered table of `(FormatTag, predicate)` rules. Structural markers come
 * before timestamp patterns so an ASS document, which also carries colons and
 * commas, is never mistaken for SRT. The first matching rule wins; a document
 * matching none is `Unknown`.
 */

use log::debug;

use crate::cue::FormatTag;
use crate::parsers::common::{ANY_TIMESTAMP_REGEX, SRT_TIME_LINE_REGEX, TIME_RANGE_REGEX, is_mixed_script};

const ASS_MARKERS: [&str; 4] = ["[Script Info]", "Dialogue:", "[Events]", "Style:"];

const DISTRIBUTOR_MARKERS: [&str; 5] = ["-RARBG.ass", "RARBG", "Silicon.Valley.", "Language:", "PlayResX:"];

/// Document view handed to every rule
#[derive(Debug, Clone)]
pub struct Sample<'a> {
    /// Whole document
    pub content: &'a str,
    /// Leading lines considered by line-window rules
    pub head: Vec<&'a str>,
}

impl<'a> Sample<'a> {
    pub fn new(content: &'a str, line_limit: usize) -> Self {
        Sample {
            content,
            head: content.lines().take(line_limit).collect(),
        }
    }
}

/// One sniffing heuristic
#[derive(Debug, Clone, Copy)]
pub struct SniffRule {
    pub format: FormatTag,
    pub name: &'static str,
    pub matches: fn(&Sample<'_>) -> bool,
}

/// Rules in priority order
pub static RULES: [SniffRule; 6] = [
    SniffRule {
        format: FormatTag::Ass,
        name: "ass markers",
        matches: has_ass_markers,
    },
    SniffRule {
        format: FormatTag::BilingualVariant,
        name: "distributor metadata",
        matches: has_distributor_metadata,
    },
    SniffRule {
        format: FormatTag::Srt,
        name: "srt time line",
        matches: has_srt_time_line,
    },
    SniffRule {
        format: FormatTag::Vtt,
        name: "webvtt header",
        matches: has_webvtt_header,
    },
    SniffRule {
        format: FormatTag::TimeRange,
        name: "bare time range",
        matches: has_time_range,
    },
    SniffRule {
        format: FormatTag::Generic,
        name: "mixed script text",
        matches: has_untimed_mixed_script,
    },
];

/// Classify a document by the first matching rule
pub fn detect_format(content: &str, line_limit: usize) -> FormatTag {
    let sample = Sample::new(content, line_limit);

    match RULES.iter().find(|rule| (rule.matches)(&sample)) {
        Some(rule) => {
            debug!("Sniffed {} via rule '{}'", rule.format, rule.name);
            rule.format
        }
        None => {
            debug!("No sniffing rule matched");
            FormatTag::Unknown
        }
    }
}

pub fn has_ass_markers(sample: &Sample<'_>) -> bool {
    ASS_MARKERS.iter().any(|marker| sample.content.contains(marker))
}

pub fn has_distributor_metadata(sample: &Sample<'_>) -> bool {
    DISTRIBUTOR_MARKERS.iter().any(|marker| sample.content.contains(marker))
}

pub fn has_srt_time_line(sample: &Sample<'_>) -> bool {
    sample.head.iter().any(|line| SRT_TIME_LINE_REGEX.is_match(line))
}

pub fn has_webvtt_header(sample: &Sample<'_>) -> bool {
    sample.content.contains("WEBVTT")
}

pub fn has_time_range(sample: &Sample<'_>) -> bool {
    TIME_RANGE_REGEX.is_match(sample.content)
}

pub fn has_untimed_mixed_script(sample: &Sample<'_>) -> bool {
    !ANY_TIMESTAMP_REGEX.is_match(sample.content) && sample.content.lines().any(is_mixed_script)
}
