use serde::{Deserialize, Serialize};
use std::fmt;

use crate::timecode;

// @module: Cue data model shared by the parsers, the normalizer and the index

/// Canonical line-break marker kept in cue text
pub const LINE_BREAK: &str = "<br>";

/// Subtitle grammar detected by the sniffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    Ass,
    Srt,
    Vtt,
    BilingualVariant,
    TimeRange,
    Generic,
    Unknown,
}

impl FormatTag {
    // @returns: Human readable format name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ass => "ASS/SSA",
            Self::Srt => "SubRip (SRT)",
            Self::Vtt => "WebVTT",
            Self::BilingualVariant => "Bilingual distributor variant",
            Self::TimeRange => "Time-range variant",
            Self::Generic => "Generic line fallback",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Timed record as emitted by a parser, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediateRecord {
    // @field: Start timestamp token as found in the source
    pub start_raw: String,

    // @field: End timestamp token as found in the source
    pub end_raw: String,

    // @field: Text with source markup still present
    pub text_raw: String,

    // @field: 1-based source line, 0 when synthesized
    pub line: usize,
}

impl IntermediateRecord {
    pub fn new(start_raw: impl Into<String>, end_raw: impl Into<String>, text_raw: impl Into<String>, line: usize) -> Self {
        IntermediateRecord {
            start_raw: start_raw.into(),
            end_raw: end_raw.into(),
            text_raw: text_raw.into(),
            line,
        }
    }

    /// Record for a fixed time slot with no timestamps in the source
    pub fn slot(start_ms: u64, end_ms: u64, text_raw: impl Into<String>, line: usize) -> Self {
        Self::new(timecode::format_clock(start_ms), timecode::format_clock(end_ms), text_raw, line)
    }
}

/// Single display cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    /// Start time in ms
    pub start_ms: u64,

    /// End time in ms
    pub end_ms: u64,

    /// Display text, lines separated by `<br>`
    pub text: String,
}

impl Cue {
    pub fn new(start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Cue {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Inclusive containment test on `[start_ms, end_ms]`
    pub fn contains(&self, ms: u64) -> bool {
        ms >= self.start_ms && ms <= self.end_ms
    }

    /// Text lines split at the line-break marker
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split(LINE_BREAK)
    }

    /// Text with line-break markers turned into newlines
    pub fn plain_text(&self) -> String {
        self.text.replace(LINE_BREAK, "\n")
    }
}

/// How a cue list came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "format", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// The document had no content
    Empty,
    /// Cues were produced by the parser for this format
    Parsed(FormatTag),
    /// Every parser failed; the list holds the single placeholder cue
    Failed,
}

/// Immutable, time-ordered list of cues
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CueList {
    cues: Vec<Cue>,

    // running maximum of end_ms, lets lookups stop walking back through overlaps
    #[serde(skip)]
    reach: Vec<u64>,

    outcome: ParseOutcome,
}

impl CueList {
    /// List for an empty document
    pub fn empty() -> Self {
        CueList {
            cues: Vec::new(),
            reach: Vec::new(),
            outcome: ParseOutcome::Empty,
        }
    }

    /// Build a list from cues in any order; sorting is stable on `start_ms`
    pub fn from_cues(mut cues: Vec<Cue>, format: FormatTag) -> Self {
        cues.sort_by_key(|cue| cue.start_ms);
        Self::from_sorted(cues, ParseOutcome::Parsed(format))
    }

    /// The single placeholder cue for a document no parser could handle
    pub fn parse_failure(message: &str, duration_ms: u64) -> Self {
        Self::from_sorted(vec![Cue::new(0, duration_ms, message)], ParseOutcome::Failed)
    }

    pub(crate) fn from_sorted(cues: Vec<Cue>, outcome: ParseOutcome) -> Self {
        debug_assert!(cues.windows(2).all(|w| w[0].start_ms <= w[1].start_ms));

        let mut reach = Vec::with_capacity(cues.len());
        let mut furthest = 0;
        for cue in &cues {
            furthest = furthest.max(cue.end_ms);
            reach.push(furthest);
        }

        CueList { cues, reach, outcome }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.cues.iter()
    }

    pub fn outcome(&self) -> ParseOutcome {
        self.outcome
    }

    /// Format of the parser that produced the cues, if any did
    pub fn format(&self) -> Option<FormatTag> {
        match self.outcome {
            ParseOutcome::Parsed(format) => Some(format),
            _ => None,
        }
    }

    /// True when the list holds only the synthetic parse-failure cue
    pub fn is_parse_failure(&self) -> bool {
        self.outcome == ParseOutcome::Failed
    }

    /// Running maximum of `end_ms`: entry `i` is the largest end among cues `0..=i`
    pub(crate) fn reach(&self) -> &[u64] {
        &self.reach
    }

    /// Render as numbered SRT blocks
    pub fn to_srt(&self) -> String {
        let mut out = String::new();
        for (i, cue) in self.cues.iter().enumerate() {
            out.push_str(&format!(
                "{}\n{} --> {}\n{}\n\n",
                i + 1,
                timecode::format_srt_timestamp(cue.start_ms),
                timecode::format_srt_timestamp(cue.end_ms),
                cue.plain_text()
            ));
        }
        out
    }
}

impl Default for CueList {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a CueList {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.iter()
    }
}

impl fmt::Display for CueList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Cue List")?;
        match self.outcome {
            ParseOutcome::Empty => writeln!(f, "Source: empty document")?,
            ParseOutcome::Parsed(format) => writeln!(f, "Source: {}", format)?,
            ParseOutcome::Failed => writeln!(f, "Source: parse failed")?,
        }
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}
