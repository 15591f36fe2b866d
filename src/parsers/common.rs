/*!
 * Patterns and helpers shared by the format parsers and the sniffer.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::cue::IntermediateRecord;

/// SRT time-pair line: comma, dot or no sub-second part
pub(crate) static SRT_TIME_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+:\d+:\d+(?:[,.]\d+)?)\s*-->\s*(\d+:\d+:\d+(?:[,.]\d+)?)").unwrap()
});

/// Bare `HH:MM:SS - HH:MM:SS` range
pub(crate) static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2})\s*-\s*(\d{2}:\d{2}:\d{2})").unwrap()
});

/// ASS clock token (H:MM:SS.cc)
pub(crate) static CLOCK_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+:\d+:\d+\.\d+").unwrap());

/// Any H:MM:SS-looking token, used to tell timed documents from plain text
pub(crate) static ANY_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+:\d{2}:\d{2}").unwrap());

static CJK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}]").unwrap()
});

static LATIN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Latin}").unwrap());

static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").unwrap()
});

/// Script content of a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptClass {
    /// CJK characters only
    Cjk,
    /// Latin letters only
    Latin,
    /// Both scripts present
    Mixed,
    /// Neither script present (digits, punctuation)
    Neither,
}

/// Classify a line by the scripts it contains
pub fn classify_script(line: &str) -> ScriptClass {
    match (CJK_REGEX.is_match(line), LATIN_REGEX.is_match(line)) {
        (true, true) => ScriptClass::Mixed,
        (true, false) => ScriptClass::Cjk,
        (false, true) => ScriptClass::Latin,
        (false, false) => ScriptClass::Neither,
    }
}

/// True for lines that contain CJK as well as Latin script
pub fn is_mixed_script(line: &str) -> bool {
    classify_script(line) == ScriptClass::Mixed
}

/// Decode the HTML entities that show up in subtitle text
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ if entity.starts_with('#') => entity[1..].parse::<u32>().ok().and_then(char::from_u32),
                _ => None,
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Pull the first two clock tokens and everything after the second from a dialogue-like line
pub fn extract_two_clock_tokens(line: &str) -> Option<(String, String, String)> {
    let mut tokens = CLOCK_TOKEN_REGEX.find_iter(line);
    let start = tokens.next()?;
    let end = tokens.next()?;

    let text = line[end.end()..]
        .trim_start_matches(|c: char| c == ',' || c.is_whitespace())
        .trim_end()
        .to_string();

    Some((start.as_str().to_string(), end.as_str().to_string(), text))
}

/// Header, style and distributor lines that never carry dialogue
pub fn is_metadata_line(line: &str) -> bool {
    line.starts_with('[')
        || line.contains("RARBG")
        || line.contains("Format:")
        || line.contains("Style:")
        || line.contains("PlayResX:")
}

/// One fixed-length record per text, back to back from 0
pub fn fixed_slots<I>(texts: I, slot_ms: u64) -> Vec<IntermediateRecord>
where
    I: IntoIterator<Item = (usize, String)>,
{
    texts
        .into_iter()
        .enumerate()
        .map(|(i, (line, text))| {
            let start = (i as u64).saturating_mul(slot_ms);
            IntermediateRecord::slot(start, start.saturating_add(slot_ms), text, line)
        })
        .collect()
}

/// Last-resort pairing of CJK lines with Latin lines into fixed slots
pub fn pair_script_lines<'a, I>(lines: I, slot_ms: u64) -> Vec<IntermediateRecord>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut cjk = Vec::new();
    let mut latin = Vec::new();

    for (line_no, line) in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_metadata_line(trimmed) {
            continue;
        }
        match classify_script(trimmed) {
            ScriptClass::Cjk | ScriptClass::Mixed => cjk.push((line_no, trimmed.to_string())),
            ScriptClass::Latin => latin.push((line_no, trimmed.to_string())),
            ScriptClass::Neither => {}
        }
    }

    if !cjk.is_empty() && cjk.len() == latin.len() {
        let paired = cjk
            .into_iter()
            .zip(latin)
            .map(|((line, zh), (_, en))| (line, format!("{}<br>{}", zh, en)));
        return fixed_slots(paired, slot_ms);
    }

    if !cjk.is_empty() {
        fixed_slots(cjk, slot_ms)
    } else {
        fixed_slots(latin, slot_ms)
    }
}
