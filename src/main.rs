// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use subcue::app_config::{self, Config};
use subcue::errors::AppError;
use subcue::timecode;
use subcue::{CueIndex, CueList, ParseReport, SubtitleEngine};

/// File extensions picked up by `scan`
const SUBTITLE_EXTENSIONS: [&str; 5] = ["srt", "ass", "ssa", "vtt", "txt"];

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// How `parse` prints cues
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Srt,
    Text,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a subtitle file and print its cues
    Parse {
        /// Subtitle file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show the detected format and how parsing went
    Detect {
        /// Subtitle file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show the cue active at a playback position
    Lookup {
        /// Subtitle file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Playback position in seconds
        #[arg(short, long, value_name = "SECONDS")]
        at: f64,
    },

    /// Summarize every subtitle file under a directory
    Scan {
        /// Directory to walk
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Generate shell completions for subcue
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subcue - Subtitle ingestion and cue lookup
///
/// Detects the format of a subtitle file, parses it into time-ordered cues and
/// answers which cue is active at a given playback position.
#[derive(Parser, Debug)]
#[command(name = "subcue")]
#[command(version)]
#[command(about = "Subtitle format detection, parsing and cue lookup")]
#[command(long_about = "subcue parses ASS/SSA, SRT, WebVTT and loosely formatted subtitle files into normalized cues.

EXAMPLES:
    subcue parse movie.srt                      # Print cues as text
    subcue parse -o json movie.ass              # Print cues as JSON
    subcue parse -o srt episode.txt > out.srt   # Convert anything to SRT
    subcue detect movie.vtt                     # Show the detected format
    subcue lookup movie.srt --at 92.5           # Cue active at 1:32.5
    subcue scan ~/subtitles                     # Summarize a directory
    subcue completions bash > subcue.bash       # Generate bash completions

CONFIGURATION:
    Engine settings are read from subcue.json when it exists. Use --config to
    point at another file; missing files fall back to built-in defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "subcue.json", global = true)]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Warn until the config says otherwise
    CustomLogger::init(LevelFilter::Warn)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subcue", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Using configuration: {:?}", config);

    let engine = SubtitleEngine::new(config.engine.clone());

    match cli.command {
        Commands::Parse { file, output } => run_parse(&engine, &file, output),
        Commands::Detect { file } => run_detect(&engine, &file),
        Commands::Lookup { file, at } => run_lookup(&engine, &file, at),
        Commands::Scan { dir } => run_scan(&engine, &dir),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Read a subtitle file, replacing invalid UTF-8
fn read_document(path: &Path) -> Result<String, AppError> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::File(format!("Failed to read subtitle file {}: {}", path.display(), e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run_parse(engine: &SubtitleEngine, file: &Path, output: OutputFormat) -> Result<()> {
    let content = read_document(file)?;
    let cues = engine.parse(&content);
    info!("Parsed {} cues from {}", cues.len(), file.display());

    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&cues).context("Failed to serialize cues to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Srt => print!("{}", cues.to_srt()),
        OutputFormat::Text => print_cues(&cues),
    }

    Ok(())
}

fn print_cues(cues: &CueList) {
    if cues.is_parse_failure() {
        println!("(parse failed)");
    }
    for (i, cue) in cues.iter().enumerate() {
        println!(
            "{:>5}  {} --> {}  {}",
            i + 1,
            timecode::format_srt_timestamp(cue.start_ms),
            timecode::format_srt_timestamp(cue.end_ms),
            cue.lines().collect::<Vec<_>>().join(" / ")
        );
    }
}

fn run_detect(engine: &SubtitleEngine, file: &Path) -> Result<()> {
    let content = read_document(file)?;
    let (cues, report) = engine.parse_with_report(&content);
    print_report(file, &cues, &report);
    Ok(())
}

fn print_report(file: &Path, cues: &CueList, report: &ParseReport) {
    println!("File:      {}", file.display());
    println!("Sniffed:   {}", report.sniffed);
    let attempts: Vec<String> = report.attempts.iter().map(|tag| tag.to_string()).collect();
    println!("Attempts:  {}", attempts.join(" -> "));
    match report.winner {
        Some(winner) => println!("Parsed as: {}", winner),
        None if cues.is_parse_failure() => println!("Parsed as: (parse failed)"),
        None => println!("Parsed as: (empty document)"),
    }
    println!("Records:   {} ({} dropped)", report.record_count, report.dropped);
    println!("Cues:      {}", cues.len());
}

fn run_lookup(engine: &SubtitleEngine, file: &Path, at: f64) -> Result<()> {
    let content = read_document(file)?;
    let cues = engine.parse(&content);
    let ms = timecode::seconds_to_ms(at);

    let mut index = CueIndex::with_threshold(Arc::new(cues), engine.config().linear_scan_threshold);
    let active = index.active_cue_at(ms);

    match index.active_cue() {
        Some(cue) => println!(
            "Active:   #{} [{} --> {}] {}",
            active.map_or(0, |i| i + 1),
            timecode::format_srt_timestamp(cue.start_ms),
            timecode::format_srt_timestamp(cue.end_ms),
            cue.plain_text().replace('\n', " / ")
        ),
        None => println!("Active:   none at {}", timecode::format_srt_timestamp(ms)),
    }

    if let Some(target) = index.previous_cue(active, ms) {
        println!("Previous: #{} at {:.3}s", target.index + 1, target.start_seconds);
    }
    if let Some(target) = index.next_cue(active, ms) {
        println!("Next:     #{} at {:.3}s", target.index + 1, target.start_seconds);
    }

    Ok(())
}

fn is_subtitle_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUBTITLE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

fn run_scan(engine: &SubtitleEngine, dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(AppError::File(format!("Input path is not a directory: {:?}", dir)).into());
    }

    info!("Scanning directory: {:?}", dir);
    let mut scanned = 0;

    for entry in WalkDir::new(dir).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() || !is_subtitle_file(path) {
            continue;
        }

        match read_document(path) {
            Ok(content) => {
                let (cues, report) = engine.parse_with_report(&content);
                let format = match report.winner {
                    Some(winner) => winner.to_string(),
                    None if cues.is_parse_failure() => "parse failed".to_string(),
                    None => "empty".to_string(),
                };
                println!("{}: {} ({} cues)", path.display(), format, cues.len());
                scanned += 1;
            }
            Err(e) => error!("Error reading file: {:#}", e),
        }
    }

    info!("Finished scanning {} files", scanned);
    Ok(())
}
