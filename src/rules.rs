//! Letter sequence tables.
//!
//! The break status of a window of two, three or four categories is looked up
//! in one table per window width. A row is keyed by every category of the
//! window except the last; the last category picks the column. Cases a table
//! leaves undefined (`U`) are settled by the next wider table.

use std::sync::OnceLock;

use fxhash::FxHashMap;

use crate::category::{Category, CATEGORY_COUNT};

/// One row of a letter sequence table, indexed by [`Category::column`].
pub type StatusRow = [i8; CATEGORY_COUNT];

// Break status codes as they appear in the tables.
pub const UNDEFINED: i8 = -2;
pub const ILLEGAL_SPELLING_ORDER: i8 = -1;
pub const NO_BREAK_AFTER_1ST: i8 = 0;
pub const BREAK_AFTER_1ST: i8 = 1;
pub const BREAK_AFTER_2ND: i8 = 2;
pub const BREAK_AFTER_3RD: i8 = 3;
pub const BREAK_AFTER_4TH: i8 = 4;

const U: i8 = UNDEFINED;

/// Decoded break status of a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakStatus {
    /// The first two characters break canonical spelling order.
    IllegalOrder,
    /// The first character joins the syllable being built.
    NoBreak,
    /// A syllable boundary follows the n-th character (1..=4).
    BreakAfter(usize),
}

impl BreakStatus {
    /// `None` for [`UNDEFINED`] and anything outside the status range.
    pub fn from_code(code: i8) -> Option<BreakStatus> {
        match code {
            ILLEGAL_SPELLING_ORDER => Some(BreakStatus::IllegalOrder),
            NO_BREAK_AFTER_1ST => Some(BreakStatus::NoBreak),
            BREAK_AFTER_1ST..=BREAK_AFTER_4TH => Some(BreakStatus::BreakAfter(code as usize)),
            _ => None,
        }
    }

    pub fn code(self) -> i8 {
        match self {
            BreakStatus::IllegalOrder => ILLEGAL_SPELLING_ORDER,
            BreakStatus::NoBreak => NO_BREAK_AFTER_1ST,
            BreakStatus::BreakAfter(n) => n as i8,
        }
    }
}

// ============================================================================
// Table data
// ============================================================================

// Columns:           A   C   D   E   F   G   I   M   P   S   V   W
#[rustfmt::skip]
static PAIR_ROWS: &[(&str, StatusRow)] = &[
    ("A", [-1,  U,  1,  1,  0, -1,  1,  0,  1,  0,  0,  1]),
    ("C", [ 0,  U,  1,  1,  0,  0,  1,  0,  1,  0,  0,  1]),
    ("D", [-1,  1,  0,  1, -1, -1,  1, -1,  1, -1, -1,  1]),
    ("E", [-1,  U,  1,  1,  2,  0,  1, -1,  1, -1,  0,  1]),
    ("F", [-1,  U,  1,  1,  2, -1,  1, -1,  1, -1, -1,  1]),
    ("G", [-1,  1,  1,  1,  0, -1,  1, -1,  1, -1,  0,  1]),
    ("I", [-1,  1,  1,  1, -1, -1,  1, -1,  1, -1, -1,  1]),
    ("M", [ 2,  U,  1,  1,  0,  0,  1,  0,  1, -1,  0,  1]),
    ("P", [-1,  1,  1,  1, -1, -1,  1, -1,  1, -1, -1,  1]),
    ("S", [-1,  0, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1]),
    ("V", [ 2,  U,  1,  1,  0,  0,  1, -1,  1, -1,  0,  1]),
    ("W", [-1,  1,  1,  1, -1, -1,  1, -1,  1, -1, -1,  0]),
];

// Consonant after a syllable-final sign: devowelising and chaining need a third character.
#[rustfmt::skip]
static TRIPLE_ROWS: &[(&str, StatusRow)] = &[
    ("AC", [3, 1, 1, 1, 1, 1, 1, U, 1, 1, 1, 1]),
    ("CC", [0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1]),
    ("EC", [0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1]),
    ("FC", [3, 1, 1, 1, 1, 1, 1, U, 1, 1, 1, 1]),
    ("MC", [0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1]),
    ("VC", [0, 1, 1, 1, 1, 1, 1, U, 1, 0, 1, 1]),
];

// Consonant plus medial: Asat decides whether the medial closes the syllable.
#[rustfmt::skip]
static QUAD_ROWS: &[(&str, StatusRow)] = &[
    ("ACM", [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
    ("FCM", [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
    ("VCM", [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
];

// ============================================================================
// Lookup
// ============================================================================

/// Break statuses for windows of one fixed width.
#[derive(Debug)]
pub struct LetterSequenceTable {
    width: usize,
    rows: FxHashMap<Box<[Category]>, StatusRow>,
}

impl LetterSequenceTable {
    fn from_rows(width: usize, data: &[(&str, StatusRow)]) -> Self {
        let mut rows = FxHashMap::default();
        for (key, row) in data {
            let key: Box<[Category]> = key
                .chars()
                .map(|symbol| match Category::from_symbol(symbol) {
                    Some(category) if category.is_classified() => category,
                    _ => panic!("letter sequence key {key:?} has an invalid symbol {symbol:?}"),
                })
                .collect();
            assert_eq!(key.len(), width - 1, "key {:?} does not fit width {}", key, width);
            for &code in row {
                assert!(
                    code == UNDEFINED || BreakStatus::from_code(code).is_some(),
                    "status {code} out of range in row {key:?}"
                );
                assert!(code <= width as i8, "row {key:?} breaks past its window");
            }
            assert!(rows.insert(key, *row).is_none(), "duplicate letter sequence key");
        }
        LetterSequenceTable { width, rows }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, prefix: &[Category]) -> Option<&StatusRow> {
        self.rows.get(prefix)
    }

    pub fn keys(&self) -> impl Iterator<Item = &[Category]> {
        self.rows.keys().map(|key| key.as_ref())
    }

    /// Raw status code for a window of exactly `width` categories.
    #[inline]
    pub fn code(&self, window: &[Category]) -> i8 {
        debug_assert_eq!(window.len(), self.width);
        let (last, prefix) = match window.split_last() {
            Some(split) => split,
            None => return UNDEFINED,
        };
        match (self.rows.get(prefix), last.column()) {
            (Some(row), Some(column)) => row[column],
            _ => UNDEFINED,
        }
    }

    #[inline]
    pub fn status(&self, window: &[Category]) -> Option<BreakStatus> {
        BreakStatus::from_code(self.code(window))
    }
}

/// Outcome of the escalating lookup for the head of a category sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub status: BreakStatus,
    /// Width of the table that answered, `None` when every width was undefined.
    pub width: Option<usize>,
}

/// The letter sequence tables in escalation order.
#[derive(Debug)]
pub struct RuleSet {
    tables: Vec<LetterSequenceTable>,
}

impl RuleSet {
    /// The built-in tables, built and checked on first use.
    pub fn standard() -> &'static RuleSet {
        static RULES: OnceLock<RuleSet> = OnceLock::new();
        RULES.get_or_init(|| {
            RuleSet::from_tables(vec![
                LetterSequenceTable::from_rows(2, PAIR_ROWS),
                LetterSequenceTable::from_rows(3, TRIPLE_ROWS),
                LetterSequenceTable::from_rows(4, QUAD_ROWS),
            ])
        })
    }

    /// Panics unless widths grow by one and every wider key refines an
    /// undefined cell of the table before it.
    fn from_tables(tables: Vec<LetterSequenceTable>) -> Self {
        for pair in tables.windows(2) {
            let (narrow, wide) = (&pair[0], &pair[1]);
            assert_eq!(wide.width, narrow.width + 1, "tables must escalate one width at a time");
            for key in wide.keys() {
                assert_eq!(
                    narrow.code(key),
                    UNDEFINED,
                    "width {} key {:?} shadows a defined width {} status",
                    wide.width,
                    key,
                    narrow.width
                );
            }
        }
        RuleSet { tables }
    }

    pub fn tables(&self) -> &[LetterSequenceTable] {
        &self.tables
    }

    pub fn max_width(&self) -> usize {
        self.tables.last().map_or(0, |t| t.width)
    }

    /// Break status of the head of `remaining` (at least two categories).
    ///
    /// Widths are tried narrowest first and only while enough categories
    /// remain; if none answers, the first character stands alone.
    pub fn resolve(&self, remaining: &[Category]) -> Resolution {
        for table in &self.tables {
            if remaining.len() < table.width {
                break;
            }
            if let Some(status) = table.status(&remaining[..table.width]) {
                return Resolution { status, width: Some(table.width) };
            }
        }
        Resolution { status: BreakStatus::BreakAfter(1), width: None }
    }
}
