/*!
 * Format parsers.
 *
 * Every parser turns raw document text into intermediate timed records. A
 * parser reports internal failures through `anyhow::Result`; the engine turns
 * an `Err` into an empty result so one broken grammar never aborts the
 * fallback chain. Record-level failures are logged inside the parser and the
 * remaining records are still produced.
 *
 * # Architecture
 *
 * - `ass`: ASS/SSA `[Events]` dialogue lines
 * - `srt`: SubRip blocks
 * - `vtt`: WebVTT cues
 * - `bilingual`: distributor-style CJK/Latin documents
 * - `time_range`: `HH:MM:SS - HH:MM:SS` listings
 * - `generic`: line-per-cue last resort
 * - `common`: shared patterns and helpers
 */

use anyhow::Result;

use crate::app_config::EngineConfig;
use crate::cue::{FormatTag, IntermediateRecord};

pub mod ass;
pub mod bilingual;
pub mod common;
pub mod generic;
pub mod srt;
pub mod time_range;
pub mod vtt;

pub use ass::AssParser;
pub use bilingual::BilingualParser;
pub use generic::GenericParser;
pub use srt::SrtParser;
pub use time_range::TimeRangeParser;
pub use vtt::VttParser;

/// A subtitle grammar
pub trait SubtitleParser: Send + Sync {
    /// Format this parser understands
    fn format(&self) -> FormatTag;

    /// Parse raw text into timed records
    fn parse(&self, content: &str, config: &EngineConfig) -> Result<Vec<IntermediateRecord>>;
}

/// Parser for a sniffed format; `Unknown` has none
pub fn parser_for(format: FormatTag) -> Option<&'static dyn SubtitleParser> {
    match format {
        FormatTag::Ass => Some(&AssParser),
        FormatTag::Srt => Some(&SrtParser),
        FormatTag::Vtt => Some(&VttParser),
        FormatTag::BilingualVariant => Some(&BilingualParser),
        FormatTag::TimeRange => Some(&TimeRangeParser),
        FormatTag::Generic => Some(&GenericParser),
        FormatTag::Unknown => None,
    }
}

/// Priority order of the fallback chain
pub const FALLBACK_ORDER: [FormatTag; 5] = [
    FormatTag::BilingualVariant,
    FormatTag::Ass,
    FormatTag::Srt,
    FormatTag::Vtt,
    FormatTag::Generic,
];
