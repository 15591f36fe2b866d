/*!
 * Tests for the format parsers through the SubtitleParser trait
 */

use subcue::app_config::EngineConfig;
use subcue::cue::{FormatTag, IntermediateRecord};
use subcue::parsers::{FALLBACK_ORDER, SubtitleParser, parser_for};

use crate::common;

fn parse_as(format: FormatTag, content: &str) -> Vec<IntermediateRecord> {
    let parser = parser_for(format).expect("parser should exist");
    parser.parse(content, &EngineConfig::default()).expect("parser should not fail")
}

#[test]
fn test_parserFor_withEveryKnownTag_shouldReturnMatchingParser() {
    for format in [
        FormatTag::Ass,
        FormatTag::Srt,
        FormatTag::Vtt,
        FormatTag::BilingualVariant,
        FormatTag::TimeRange,
        FormatTag::Generic,
    ] {
        let parser = parser_for(format).expect("parser should exist");
        assert_eq!(parser.format(), format);
    }
    assert!(parser_for(FormatTag::Unknown).is_none());
}

#[test]
fn test_fallbackOrder_shouldExcludeTimeRange() {
    assert!(!FALLBACK_ORDER.contains(&FormatTag::TimeRange));
    assert_eq!(FALLBACK_ORDER[0], FormatTag::BilingualVariant);
    assert_eq!(FALLBACK_ORDER[4], FormatTag::Generic);
}

#[test]
fn test_parsers_withEmptyInput_shouldReturnNoRecords() {
    for format in FALLBACK_ORDER {
        assert!(parse_as(format, "").is_empty(), "{} produced records", format);
    }
    assert!(parse_as(FormatTag::TimeRange, "").is_empty());
}

#[test]
fn test_srtParser_withFixture_shouldReadBothBlocks() {
    let records = parse_as(FormatTag::Srt, common::SRT_TWO_CUES);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].line, 2);
    assert_eq!(records[1].text_raw, "World");
}

#[test]
fn test_assParser_withReorderedColumns_shouldFollowFormatLine() {
    let content = "[Events]\nFormat: End, Layer, Start, Text\nDialogue: 0:00:02.00,0,0:00:01.00,Hi, there";
    let records = parse_as(FormatTag::Ass, content);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].start_raw, "0:00:01.00");
    assert_eq!(records[0].end_raw, "0:00:02.00");
    assert_eq!(records[0].text_raw, "Hi, there");
}

#[test]
fn test_assParser_withUnparseableColumns_shouldRetryLeniently() {
    let content = "[Events]\nFormat: Layer, Start, End, Text\nDialogue: x,y,z,0:00:01.00,0:00:02.00,Recovered";
    let records = parse_as(FormatTag::Ass, content);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].start_raw, "0:00:01.00");
    assert_eq!(records[0].text_raw, "Recovered");
}

#[test]
fn test_assParser_withGarbageDialogueBetweenValidOnes_shouldKeepNeighbours() {
    let content = "[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Before
Dialogue: garbage
Dialogue: 0,0:00:03.00,0:00:04.00,Default,,0,0,0,,After
";
    let records = parse_as(FormatTag::Ass, content);
    let texts: Vec<&str> = records.iter().map(|r| r.text_raw.as_str()).collect();
    assert_eq!(texts, vec!["Before", "After"]);
    assert_eq!(records[1].line, 5);
}

#[test]
fn test_vttParser_withFixture_shouldSkipNoteAndIdentifier() {
    let records = parse_as(FormatTag::Vtt, common::VTT_SAMPLE);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].start_raw, "00:01.000");
    assert_eq!(records[1].text_raw, "Two<br>lines");
}

#[test]
fn test_bilingualParser_withFixture_shouldOrderCjkFirst() {
    let records = parse_as(FormatTag::BilingualVariant, common::BILINGUAL_SAMPLE);
    let texts: Vec<&str> = records.iter().map(|r| r.text_raw.as_str()).collect();
    assert_eq!(texts, vec!["你好<br>Hello there", "再见<br>Goodbye"]);
}

#[test]
fn test_timeRangeParser_withFixture_shouldReadSameLineAndNextLineText() {
    let records = parse_as(FormatTag::TimeRange, common::TIME_RANGE_SAMPLE);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text_raw, "First line");
    assert_eq!(records[1].start_raw, "00:00:35");
    assert_eq!(records[1].text_raw, "Second line");
}

#[test]
fn test_genericParser_withCustomSlot_shouldUseConfiguredLength() {
    let config = EngineConfig {
        fallback_slot_ms: 2_000,
        ..EngineConfig::default()
    };
    let parser = parser_for(FormatTag::Generic).expect("parser should exist");
    let records = parser.parse("a\nb", &config).expect("parser should not fail");
    assert_eq!(records[1].start_raw, "0:00:02.000");
    assert_eq!(records[1].end_raw, "0:00:04.000");
}
