//! Per-line output for the command-line driver.

use serde::Serialize;

use crate::error::Result;
use crate::segmenter::MyanmarSegmenter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One segmented line per input line
    #[default]
    Text,
    /// One JSON record per input line: {"id", "input", "segments"}
    Jsonl,
}

/// JSONL output record.
#[derive(Debug, Serialize)]
pub struct SegmentRecord<'a> {
    pub id: usize,
    pub input: &'a str,
    pub segments: Vec<String>,
}

/// Turns input lines into output lines.
pub struct LineProcessor<'a> {
    segmenter: &'a MyanmarSegmenter,
    format: OutputFormat,
    categories: bool,
}

impl<'a> LineProcessor<'a> {
    pub fn new(segmenter: &'a MyanmarSegmenter, format: OutputFormat) -> Self {
        LineProcessor { segmenter, format, categories: false }
    }

    /// Treat input lines as category patterns instead of text.
    pub fn categories(mut self, enabled: bool) -> Self {
        self.categories = enabled;
        self
    }

    /// Process one line, trimmed of surrounding whitespace. No trailing newline.
    pub fn process(&self, id: usize, line: &str) -> Result<String> {
        let line = line.trim();
        match self.format {
            OutputFormat::Text => {
                if self.categories {
                    self.segmenter.segment_categories(line)
                } else {
                    Ok(self.segmenter.segment(line))
                }
            }
            OutputFormat::Jsonl => {
                let segments = if self.categories {
                    self.segmenter.category_groups(line)?
                } else {
                    self.segmenter.syllables(line).into_iter().map(|s| s.text).collect()
                };
                let record = SegmentRecord { id, input: line, segments };
                Ok(serde_json::to_string(&record)?)
            }
        }
    }

    /// Process every line of `text`, at most `limit` of them.
    pub fn process_text(&self, text: &str, limit: Option<usize>) -> Result<Vec<String>> {
        text.lines()
            .take(limit.unwrap_or(usize::MAX))
            .enumerate()
            .map(|(id, line)| self.process(id, line))
            .collect()
    }
}
