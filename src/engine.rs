/*!
 * Subtitle ingestion engine.
 *
 * Ties sniffing, parsing and normalization together:
 *
 * 1. strip a byte-order mark and unify line endings
 * 2. sniff the format and run its parser
 * 3. if that yields no cue, walk the fallback chain in fixed priority order
 * 4. if every parser comes up empty, emit the placeholder failure cue
 *
 * Nothing here returns an error to the caller: every failure degrades to an
 * empty list, a skipped record or the failure cue.
 */

use std::borrow::Cow;

use anyhow::Context;
use log::{debug, error, warn};
use serde::Serialize;

use crate::app_config::EngineConfig;
use crate::cue::{CueList, FormatTag, ParseOutcome};
use crate::normalizer::{Normalized, Normalizer};
use crate::parsers::{FALLBACK_ORDER, SubtitleParser, parser_for};
use crate::sniffer;

/// How a document was parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Format chosen by the sniffer
    pub sniffed: FormatTag,

    /// Parsers run, in order
    pub attempts: Vec<FormatTag>,

    /// Parser whose output was kept
    pub winner: Option<FormatTag>,

    /// Records emitted by the winning parser
    pub record_count: usize,

    /// Records of the winning parser rejected by the normalizer
    pub dropped: usize,
}

impl ParseReport {
    fn new(sniffed: FormatTag) -> Self {
        ParseReport {
            sniffed,
            attempts: Vec::new(),
            winner: None,
            record_count: 0,
            dropped: 0,
        }
    }
}

/// Subtitle parsing engine
#[derive(Debug, Clone, Default)]
pub struct SubtitleEngine {
    config: EngineConfig,
}

impl SubtitleEngine {
    pub fn new(config: EngineConfig) -> Self {
        SubtitleEngine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse a decoded subtitle document into a cue list
    pub fn parse(&self, content: &str) -> CueList {
        self.parse_with_report(content).0
    }

    /// Parse a document and describe which parsers ran
    pub fn parse_with_report(&self, content: &str) -> (CueList, ParseReport) {
        let text = prepare(content);

        if text.trim().is_empty() {
            debug!("Empty document, no cues");
            return (CueList::empty(), ParseReport::new(FormatTag::Unknown));
        }

        let sniffed = sniffer::detect_format(&text, self.config.sniff_line_limit);
        let mut report = ParseReport::new(sniffed);

        let chain = std::iter::once(sniffed)
            .filter(|tag| *tag != FormatTag::Unknown)
            .chain(FALLBACK_ORDER.into_iter().filter(|tag| *tag != sniffed));

        for format in chain {
            let Some(parser) = parser_for(format) else {
                continue;
            };

            report.attempts.push(format);
            let (record_count, normalized) = self.run_parser(parser, &text);

            if normalized.cues.is_empty() {
                debug!("{} parser yielded no cues ({} records dropped)", format, normalized.dropped);
                continue;
            }

            debug!(
                "{} parser produced {} cues from {} records",
                format,
                normalized.cues.len(),
                record_count
            );

            report.winner = Some(format);
            report.record_count = record_count;
            report.dropped = normalized.dropped;

            let cues = CueList::from_sorted(normalized.cues, ParseOutcome::Parsed(format));
            return (cues, report);
        }

        error!(
            "All parsers failed on a {} byte document (tried {:?})",
            text.len(),
            report.attempts
        );
        let failure = CueList::parse_failure(&self.config.failure_message, self.config.failure_cue_duration_ms);
        (failure, report)
    }

    /// Run one parser and normalize its output; a parser error counts as no records
    fn run_parser(&self, parser: &dyn SubtitleParser, text: &str) -> (usize, Normalized) {
        let normalizer = Normalizer::new(self.config.min_cue_duration_ms);

        let records = parser
            .parse(text, &self.config)
            .with_context(|| format!("{} parser failed", parser.format()));

        match records {
            Ok(records) => (records.len(), normalizer.normalize(&records)),
            Err(e) => {
                warn!("{:#}", e);
                (0, normalizer.normalize(&[]))
            }
        }
    }
}

/// Parse a document with the default engine settings
pub fn parse_subtitles(content: &str) -> CueList {
    SubtitleEngine::default().parse(content)
}

/// Strip a byte-order mark and turn CRLF/CR line endings into LF
fn prepare(content: &str) -> Cow<'_, str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}
