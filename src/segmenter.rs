use crate::category::{classify_in_block, parse_pattern, Category};
use crate::config::SegmenterConfig;
use crate::constants::{is_myanmar_char, is_myanmar_core_char, DEFAULT_SEPARATOR, ILLEGAL_ORDER_MARK};
use crate::error::{Error, Result};
use crate::rules::{BreakStatus, RuleSet};
use serde::Serialize;
use std::cell::RefCell;

// ============================================================================
// Thread-local scratch buffers, reused across calls on the same thread
// ============================================================================

thread_local! {
    static TL_BUFFERS: RefCell<ThreadLocalBuffers> = RefCell::new(ThreadLocalBuffers::new());
}

struct ThreadLocalBuffers {
    chars: Vec<char>,
    categories: Vec<Category>,
    steps: Vec<Step>,
}

impl ThreadLocalBuffers {
    fn new() -> Self {
        ThreadLocalBuffers {
            chars: Vec::with_capacity(1024),
            categories: Vec::with_capacity(1024),
            steps: Vec::with_capacity(512),
        }
    }

    fn load(&mut self, run: &str) {
        self.chars.clear();
        self.chars.extend(run.chars());
        self.categories.clear();
        self.categories.extend(self.chars.iter().map(|&c| classify_in_block(c)));
        self.steps.clear();
    }
}

// ============================================================================
// Decision steps
// ============================================================================

/// What follows the characters consumed by a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    /// Nothing; the syllable continues.
    Join,
    /// A syllable boundary.
    Boundary,
    /// The illegal spelling order annotation. Not a boundary.
    IllegalOrder,
}

/// One decision of the walk: consume `consumed` categories, then apply `mark`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub consumed: usize,
    pub mark: Mark,
}

/// Decide the next step for a non-empty remainder.
#[inline]
pub fn next_step(rules: &RuleSet, remaining: &[Category]) -> Step {
    debug_assert!(!remaining.is_empty());
    // A trailing single character never forces a boundary.
    if remaining.len() == 1 {
        return Step { consumed: 1, mark: Mark::Join };
    }

    match rules.resolve(remaining).status {
        BreakStatus::IllegalOrder => Step { consumed: 2, mark: Mark::IllegalOrder },
        BreakStatus::NoBreak => Step { consumed: 1, mark: Mark::Join },
        BreakStatus::BreakAfter(n) => Step { consumed: n.min(remaining.len()), mark: Mark::Boundary },
    }
}

/// Left-to-right walk over a category sequence.
pub struct Steps<'a> {
    rules: &'a RuleSet,
    categories: &'a [Category],
    pos: usize,
}

impl<'a> Steps<'a> {
    pub fn new(rules: &'a RuleSet, categories: &'a [Category]) -> Self {
        Steps { rules, categories, pos: 0 }
    }
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.pos >= self.categories.len() {
            return None;
        }
        let step = next_step(self.rules, &self.categories[self.pos..]);
        self.pos += step.consumed;
        Some(step)
    }
}

/// Steps taken by one descent of the recursive walk before it unwinds.
const RECURSION_DEPTH_LIMIT: usize = 1024;

/// The same walk, formulated over the unconsumed suffix.
///
/// A step depends only on the suffix it starts from, so a descent that runs
/// out of depth unwinds and the walk resumes at the position it reached.
/// Stack use is bounded for any input length.
pub fn collect_steps_recursive(rules: &RuleSet, categories: &[Category], out: &mut Vec<Step>) {
    let mut pos = 0;
    while pos < categories.len() {
        pos += descend(rules, &categories[pos..], out, RECURSION_DEPTH_LIMIT);
    }
}

/// Number of categories consumed before `remaining` or the depth ran out.
fn descend(rules: &RuleSet, remaining: &[Category], out: &mut Vec<Step>, depth: usize) -> usize {
    if remaining.is_empty() || depth == 0 {
        return 0;
    }
    let step = next_step(rules, remaining);
    out.push(step);
    step.consumed + descend(rules, &remaining[step.consumed..], out, depth - 1)
}

/// Write `units` with the marks of `steps` applied. A boundary that would land
/// after the last unit is dropped.
fn render_steps<T: Copy>(
    units: &[T],
    steps: &[Step],
    separator: &str,
    out: &mut String,
    push_unit: impl Fn(&mut String, T),
) {
    let n = units.len();
    let mut pos = 0;
    for step in steps {
        let end = pos + step.consumed;
        for &unit in &units[pos..end] {
            push_unit(out, unit);
        }
        match step.mark {
            Mark::Join => {}
            Mark::Boundary => {
                if end < n {
                    out.push_str(separator);
                }
            }
            Mark::IllegalOrder => {
                log::debug!("illegal spelling order at position {}", pos);
                out.push(ILLEGAL_ORDER_MARK);
            }
        }
        pos = end;
    }
}

/// Split `units` into syllable groups at each boundary.
fn group_steps<T: Copy>(units: &[T], steps: &[Step], push_unit: impl Fn(&mut String, T)) -> Vec<String> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut pos = 0;
    for step in steps {
        let end = pos + step.consumed;
        for &unit in &units[pos..end] {
            push_unit(&mut current, unit);
        }
        match step.mark {
            Mark::Join => {}
            Mark::Boundary => groups.push(std::mem::take(&mut current)),
            Mark::IllegalOrder => current.push(ILLEGAL_ORDER_MARK),
        }
        pos = end;
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

fn push_char(out: &mut String, c: char) {
    out.push(c);
}

fn push_symbol(out: &mut String, category: Category) {
    out.push(category.symbol());
}

// ============================================================================
// Text runs
// ============================================================================

/// Maximal runs of core-block Myanmar text and of everything else.
struct TextRuns<'a> {
    text: &'a str,
}

impl<'a> Iterator for TextRuns<'a> {
    type Item = (bool, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.text.chars().next()?;
        let myanmar = is_myanmar_core_char(first);
        let end = self
            .text
            .char_indices()
            .find(|&(_, c)| is_myanmar_core_char(c) != myanmar)
            .map_or(self.text.len(), |(i, _)| i);
        let (run, rest) = self.text.split_at(end);
        self.text = rest;
        Some((myanmar, run))
    }
}

fn text_runs(text: &str) -> TextRuns<'_> {
    TextRuns { text }
}

// ============================================================================
// Segmenter
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// A Myanmar syllable group, with any illegal order annotation kept inline.
    Syllable,
    /// A run of non-Myanmar text carried through unchanged.
    Passthrough,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub kind: SegmentKind,
}

/// Rule-based Myanmar syllable segmenter.
///
/// Holds nothing but the separator and a reference to the shared tables, so it
/// is cheap to clone and safe to share between threads.
#[derive(Clone, Debug)]
pub struct MyanmarSegmenter {
    separator: String,
    rules: &'static RuleSet,
}

impl Default for MyanmarSegmenter {
    fn default() -> Self {
        MyanmarSegmenter { separator: DEFAULT_SEPARATOR.to_string(), rules: RuleSet::standard() }
    }
}

impl MyanmarSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails for an empty separator or one that could be mistaken for Myanmar text.
    pub fn with_separator(separator: impl Into<String>) -> Result<Self> {
        let separator = separator.into();
        if separator.is_empty() || separator.chars().any(is_myanmar_char) {
            return Err(Error::InvalidSeparator(separator));
        }
        Ok(MyanmarSegmenter { separator, rules: RuleSet::standard() })
    }

    pub fn from_config(config: &SegmenterConfig) -> Result<Self> {
        Self::with_separator(config.separator.clone())
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn rules(&self) -> &'static RuleSet {
        self.rules
    }

    /// Segment text into syllables, inserting the separator at every boundary.
    ///
    /// Non-Myanmar runs pass through as standalone segments, followed by a
    /// separator and preceded by one unless they open the text.
    pub fn segment(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + text.len() / 2);
        TL_BUFFERS.with(|buffers| {
            let mut buf = buffers.borrow_mut();
            for (i, (myanmar, run)) in text_runs(text).enumerate() {
                if !myanmar {
                    self.push_passthrough(i, run, &mut out);
                    continue;
                }
                buf.load(run);
                let ThreadLocalBuffers { chars, categories, steps } = &mut *buf;
                steps.extend(Steps::new(self.rules, categories.as_slice()));
                render_steps(chars.as_slice(), steps.as_slice(), &self.separator, &mut out, push_char);
            }
        });
        out
    }

    /// [`segment`](Self::segment) driven by the recursive walk. Always returns
    /// the same string; kept to cross-check the iterative walk.
    pub fn segment_recursive(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + text.len() / 2);
        for (i, (myanmar, run)) in text_runs(text).enumerate() {
            if !myanmar {
                self.push_passthrough(i, run, &mut out);
                continue;
            }
            let chars: Vec<char> = run.chars().collect();
            let categories: Vec<Category> = chars.iter().map(|&c| classify_in_block(c)).collect();
            let mut steps = Vec::with_capacity(chars.len());
            collect_steps_recursive(self.rules, &categories, &mut steps);
            render_steps(&chars, &steps, &self.separator, &mut out, push_char);
        }
        out
    }

    fn push_passthrough(&self, index: usize, run: &str, out: &mut String) {
        if index != 0 {
            out.push_str(&self.separator);
        }
        out.push_str(run);
        out.push_str(&self.separator);
    }

    /// The segmentation of `text` as a list of syllables and pass-through runs.
    pub fn syllables(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        TL_BUFFERS.with(|buffers| {
            let mut buf = buffers.borrow_mut();
            for (myanmar, run) in text_runs(text) {
                if !myanmar {
                    segments.push(Segment { text: run.to_string(), kind: SegmentKind::Passthrough });
                    continue;
                }
                buf.load(run);
                let ThreadLocalBuffers { chars, categories, steps } = &mut *buf;
                steps.extend(Steps::new(self.rules, categories.as_slice()));
                segments.extend(
                    group_steps(chars.as_slice(), steps.as_slice(), push_char)
                        .into_iter()
                        .map(|text| Segment { text, kind: SegmentKind::Syllable }),
                );
            }
        });
        segments
    }

    /// Segment pre-classified units.
    ///
    /// # Panics
    ///
    /// If `categories` and `units` differ in length.
    pub fn segment_units(&self, categories: &[Category], units: &[char]) -> String {
        assert_eq!(
            categories.len(),
            units.len(),
            "category and unit sequences must have the same length"
        );
        let steps: Vec<Step> = Steps::new(self.rules, categories).collect();
        let mut out = String::with_capacity(units.len() * 2);
        render_steps(units, &steps, &self.separator, &mut out, push_char);
        out
    }

    /// Segment a category pattern such as `"CMCACV"` into `"CMCA|CV"`.
    pub fn segment_categories(&self, pattern: &str) -> Result<String> {
        let categories = parse_pattern(pattern)?;
        Ok(self.segment_category_slice(&categories))
    }

    pub fn segment_category_slice(&self, categories: &[Category]) -> String {
        let steps: Vec<Step> = Steps::new(self.rules, categories).collect();
        let mut out = String::with_capacity(categories.len() * 2);
        render_steps(categories, &steps, &self.separator, &mut out, push_symbol);
        out
    }

    /// Recursive counterpart of [`segment_category_slice`](Self::segment_category_slice).
    pub fn segment_category_slice_recursive(&self, categories: &[Category]) -> String {
        let mut steps = Vec::with_capacity(categories.len());
        collect_steps_recursive(self.rules, categories, &mut steps);
        let mut out = String::with_capacity(categories.len() * 2);
        render_steps(categories, &steps, &self.separator, &mut out, push_symbol);
        out
    }

    /// Syllable groups of a category pattern, e.g. `["CMCA", "CV"]`.
    pub fn category_groups(&self, pattern: &str) -> Result<Vec<String>> {
        let categories = parse_pattern(pattern)?;
        let steps: Vec<Step> = Steps::new(self.rules, &categories).collect();
        Ok(group_steps(&categories, &steps, push_symbol))
    }
}
