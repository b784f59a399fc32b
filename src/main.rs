use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use recording_probe::{Prober, RecordInfo, Reducer, ReducerConfig};
use std::io::Read;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "recording-probe")]
#[command(about = "Inspect voice recordings and build waveform overlays", long_about = None)]
struct Args {
    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe recording files or directories of recordings
    Probe {
        /// Files or directories (directories are scanned recursively)
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,

        /// Leave out trashed recordings
        #[arg(long)]
        skip_trash: bool,
    },

    /// Reduce amplitude samples to waveform columns
    Waveform {
        /// Whitespace-separated amplitude samples ("-" reads stdin)
        input: String,

        /// Recording duration in seconds
        #[arg(short = 'd', long)]
        duration: u32,

        /// Target display width in pixels
        #[arg(short = 'w', long, default_value = "1080")]
        width: u32,

        /// Columns per pixel for long recordings (default: 1.5)
        #[arg(long, default_value = "1.5")]
        oversample: f64,

        /// Print packed signed bytes instead of columns
        #[arg(long)]
        packed: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Probe {
            paths,
            json,
            skip_trash,
        } => run_probe(&paths, json, skip_trash),
        Command::Waveform {
            input,
            duration,
            width,
            oversample,
            packed,
        } => run_waveform(&input, duration, width, oversample, packed),
    }
}

/// Expand `~` and collect files, descending into directories
fn collect_files(paths: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for raw in paths {
        let path = PathBuf::from(shellexpand::tilde(raw).as_ref());
        if path.is_dir() {
            files.extend(
                WalkDir::new(&path)
                    .into_iter()
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().is_file())
                    .map(|entry| entry.into_path()),
            );
        } else {
            files.push(path);
        }
    }

    files.sort();
    files
}

fn run_probe(paths: &[String], json: bool, skip_trash: bool) -> Result<()> {
    let files = collect_files(paths);
    log::info!("Probing {} file(s)...", files.len());

    let prober = Prober::new();
    let records: Vec<RecordInfo> = files
        .par_iter()
        .filter_map(|path| prober.probe(path))
        .filter(|info| !(skip_trash && info.is_trashed))
        .collect();

    let degraded = records.iter().filter(|info| info.is_degraded()).count();

    if json {
        let out = serde_json::to_string_pretty(&records).context("Failed to serialize records")?;
        println!("{}", out);
    } else {
        for info in &records {
            println!("{}", describe(info));
        }
    }

    log::info!(
        "Found {} recording(s), {} without readable metadata",
        records.len(),
        degraded
    );

    Ok(())
}

fn describe(info: &RecordInfo) -> String {
    let modified = chrono::DateTime::from_timestamp_millis(info.last_modified_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    let trash = if info.is_trashed { " [trash]" } else { "" };

    if info.is_degraded() {
        return format!(
            "{}{}  ({} bytes, {})  metadata unavailable",
            info.display_name, trash, info.file_size_bytes, modified
        );
    }

    format!(
        "{}{}  {}  {:.1}s  {} Hz  {} ch  {} kbps  ({} bytes, {})",
        info.display_name,
        trash,
        info.format_tag(),
        info.duration_micros as f64 / 1_000_000.0,
        info.sample_rate_hz,
        info.channel_count,
        info.bitrate_bps / 1000,
        info.file_size_bytes,
        modified
    )
}

fn read_samples(input: &str) -> Result<Vec<i32>> {
    let mut text = String::new();
    if input == "-" {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read samples from stdin")?;
    } else {
        let path = PathBuf::from(shellexpand::tilde(input).as_ref());
        text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read samples: {:?}", path))?;
    }

    text.split_whitespace()
        .map(|token| {
            token
                .parse::<i32>()
                .with_context(|| format!("Invalid sample value: {:?}", token))
        })
        .collect()
}

fn run_waveform(input: &str, duration: u32, width: u32, oversample: f64, packed: bool) -> Result<()> {
    let samples = read_samples(input)?;
    log::debug!("Read {} samples", samples.len());

    let reducer = Reducer::new(ReducerConfig::new().with_oversample(oversample));
    let waveform = reducer.reduce(&samples, duration, width);

    let line = if packed {
        waveform
            .to_packed()
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        waveform
            .as_slice()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };
    println!("{}", line);

    log::info!(
        "Waveform: {} samples -> {} columns",
        samples.len(),
        waveform.len()
    );

    Ok(())
}
