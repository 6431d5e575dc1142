use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use myanmar_rs::input::{collect_files, mirror_path, read_file, read_stdin};
use myanmar_rs::output::{LineProcessor, OutputFormat};
use myanmar_rs::MyanmarSegmenter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Syllable segmentation of Myanmar text", long_about = None)]
struct Args {
    /// Syllable breaking symbol
    #[arg(short, long, default_value = "|")]
    separator: String,

    /// Input encoding label (utf-8, utf-16, ...); a byte-order mark overrides it
    #[arg(short, long, default_value = "utf-8")]
    coding: String,

    /// Input file or directory (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file, or an existing directory to mirror a directory input into (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Number of worker threads
    #[arg(short, long, default_value_t = 10)]
    jobs: usize,

    /// Limit number of lines processed per input
    #[arg(short, long)]
    limit: Option<usize>,

    /// Treat input lines as category patterns (e.g. CMCACV) instead of text
    #[arg(long)]
    categories: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Large buffered writes, output is one short line per input line
const WRITE_BUFFER_CAPACITY: usize = 262144;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    let inner: Box<dyn Write> = match path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create output: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    Ok(Box::new(BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, inner)))
}

fn write_lines(writer: &mut dyn Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

/// Segment one decoded input, lines in parallel.
fn segment_text(processor: &LineProcessor<'_>, text: &str, limit: Option<usize>) -> anyhow::Result<Vec<String>> {
    let lines: Vec<&str> = text.lines().take(limit.unwrap_or(usize::MAX)).collect();
    let results = lines
        .par_iter()
        .enumerate()
        .map(|(i, line)| processor.process(i, line))
        .collect::<Result<Vec<String>, _>>()?;
    Ok(results)
}

/// Segment one file of a directory input. Files already run in parallel, so lines don't.
fn segment_file(args: &Args, processor: &LineProcessor<'_>, path: &Path) -> anyhow::Result<Vec<String>> {
    log::debug!("segmenting {}", path.display());
    let text = read_file(path, &args.coding)?;
    let lines = processor
        .process_text(&text, args.limit)
        .with_context(|| format!("Failed to segment {}", path.display()))?;
    Ok(lines)
}

fn run_directory(args: &Args, root: &Path, processor: &LineProcessor<'_>) -> anyhow::Result<usize> {
    let files = collect_files(root)?;
    log::info!("Found {} files under {}", files.len(), root.display());

    match args.output.as_deref() {
        Some(output_root) if output_root.is_dir() => {
            let counts = files
                .par_iter()
                .map(|file| -> anyhow::Result<usize> {
                    let lines = segment_file(args, processor, file)?;
                    let target = mirror_path(root, file, output_root);
                    if let Some(parent) = target.parent() {
                        fs::create_dir_all(parent)
                            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
                    }
                    let mut writer = open_output(Some(target.as_path()))?;
                    write_lines(&mut *writer, &lines)?;
                    writer.flush()?;
                    Ok(lines.len())
                })
                .collect::<anyhow::Result<Vec<usize>>>()?;
            Ok(counts.into_iter().sum())
        }
        output => {
            let results = files
                .par_iter()
                .map(|file| segment_file(args, processor, file))
                .collect::<anyhow::Result<Vec<Vec<String>>>>()?;
            let mut writer = open_output(output)?;
            let mut count = 0;
            for lines in &results {
                write_lines(&mut *writer, lines)?;
                count += lines.len();
            }
            writer.flush()?;
            Ok(count)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let segmenter = MyanmarSegmenter::with_separator(args.separator.as_str())?;
    rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.max(1))
        .build_global()
        .context("Failed to start worker pool")?;
    let processor = LineProcessor::new(&segmenter, args.format).categories(args.categories);

    let start = Instant::now();
    let count = match args.input.as_deref() {
        Some(dir) if dir.is_dir() => run_directory(&args, dir, &processor)?,
        input => {
            let text = match input {
                Some(path) => read_file(path, &args.coding)?,
                None => read_stdin(&args.coding)?,
            };
            let lines = segment_text(&processor, &text, args.limit)?;
            let mut writer = open_output(args.output.as_deref())?;
            write_lines(&mut *writer, &lines)?;
            writer.flush()?;
            lines.len()
        }
    };

    let duration = start.elapsed();
    // stdout carries segmented text only
    eprintln!(
        "run time: {:.2}s, {} lines ({:.2} lines/sec)",
        duration.as_secs_f32(),
        count,
        count as f32 / duration.as_secs_f32().max(f32::EPSILON)
    );

    Ok(())
}
