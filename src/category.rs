//! Character categories and the code-point classifier.
//!
//! Every code point of the core Myanmar block belongs to exactly one of twelve
//! categories. Anything else is [`Category::Unclassified`] and is carried
//! through segmentation untouched.

use std::fmt;
use std::sync::OnceLock;

use crate::constants::{is_myanmar_core_char, MYANMAR_END, MYANMAR_START};
use crate::error::{Error, Result};

/// Grammatical role of a Myanmar code point.
///
/// Declaration order matches the column order of the letter sequence tables,
/// so a classified category doubles as its column index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Sign Asat, used for devowelising.
    Asat,
    Consonant,
    Digit,
    /// Independent vowels that combine with other signs, and U+104E.
    IndependentVowelE,
    /// Dependent various signs.
    DependentSign,
    GreatSa,
    /// Independent vowels and various signs that stand alone as syllables.
    IndependentVowelI,
    Medial,
    Punctuation,
    /// Sign Virama, marks the next consonant as subjoined.
    Virama,
    DependentVowel,
    Whitespace,
    /// Outside the Myanmar ranges.
    Unclassified,
}

/// Number of real categories, i.e. the width of a table row.
pub const CATEGORY_COUNT: usize = 12;

impl Category {
    /// The twelve table categories in column order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Asat,
        Category::Consonant,
        Category::Digit,
        Category::IndependentVowelE,
        Category::DependentSign,
        Category::GreatSa,
        Category::IndependentVowelI,
        Category::Medial,
        Category::Punctuation,
        Category::Virama,
        Category::DependentVowel,
        Category::Whitespace,
    ];

    pub fn symbol(self) -> char {
        match self {
            Category::Asat => 'A',
            Category::Consonant => 'C',
            Category::Digit => 'D',
            Category::IndependentVowelE => 'E',
            Category::DependentSign => 'F',
            Category::GreatSa => 'G',
            Category::IndependentVowelI => 'I',
            Category::Medial => 'M',
            Category::Punctuation => 'P',
            Category::Virama => 'S',
            Category::DependentVowel => 'V',
            Category::Whitespace => 'W',
            Category::Unclassified => '?',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Category> {
        let category = match symbol {
            'A' => Category::Asat,
            'C' => Category::Consonant,
            'D' => Category::Digit,
            'E' => Category::IndependentVowelE,
            'F' => Category::DependentSign,
            'G' => Category::GreatSa,
            'I' => Category::IndependentVowelI,
            'M' => Category::Medial,
            'P' => Category::Punctuation,
            'S' => Category::Virama,
            'V' => Category::DependentVowel,
            'W' => Category::Whitespace,
            '?' => Category::Unclassified,
            _ => return None,
        };
        Some(category)
    }

    /// Column of this category in a table row, `None` for unclassified input.
    #[inline]
    pub fn column(self) -> Option<usize> {
        match self {
            Category::Unclassified => None,
            other => Some(other as usize),
        }
    }

    pub fn is_classified(self) -> bool {
        self != Category::Unclassified
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Parse a category pattern such as `"CMCACV"`.
pub fn parse_pattern(pattern: &str) -> Result<Vec<Category>> {
    pattern
        .chars()
        .enumerate()
        .map(|(position, symbol)| {
            Category::from_symbol(symbol).ok_or(Error::InvalidCategorySymbol { symbol, position })
        })
        .collect()
}

/// Render categories back to their one-letter symbols.
pub fn pattern_string(categories: &[Category]) -> String {
    categories.iter().map(|c| c.symbol()).collect()
}

// ============================================================================
// Code-point range table
// ============================================================================

/// Inclusive code-point range assigned to one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryRange {
    pub start: u32,
    pub end: u32,
    pub category: Category,
}

const fn range(start: u32, end: u32, category: Category) -> CategoryRange {
    CategoryRange { start, end, category }
}

use Category::{
    Asat as A, Consonant as C, DependentSign as F, DependentVowel as V, Digit as D,
    GreatSa as G, IndependentVowelE as E, IndependentVowelI as I, Medial as M,
    Punctuation as P, Virama as S, Whitespace as W,
};

/// Sorted by start. U+1000..=U+109F is covered without gaps; U+1050 onwards are
/// the Mon, Karen, Shan and Khamti extensions, assigned by grammatical role.
static CATEGORY_RANGES: &[CategoryRange] = &[
    range(0x0020, 0x0020, W),
    range(0x1000, 0x1021, C),
    range(0x1022, 0x1022, I), // Shan letter A
    range(0x1023, 0x1023, E),
    range(0x1024, 0x1024, I),
    range(0x1025, 0x1026, E),
    range(0x1027, 0x1027, I),
    range(0x1028, 0x1029, E), // U+1028 Mon E
    range(0x102A, 0x102A, I),
    range(0x102B, 0x1035, V), // U+1033..=U+1035 Mon II, Mon O, E above
    range(0x1036, 0x1038, F),
    range(0x1039, 0x1039, S),
    range(0x103A, 0x103A, A),
    range(0x103B, 0x103E, M),
    range(0x103F, 0x103F, G),
    range(0x1040, 0x1049, D),
    range(0x104A, 0x104B, P),
    range(0x104C, 0x104D, I),
    range(0x104E, 0x104E, E),
    range(0x104F, 0x104F, I),
    range(0x1050, 0x1051, C),
    range(0x1052, 0x1055, I), // vocalic R, RR, L, LL
    range(0x1056, 0x1059, V),
    range(0x105A, 0x105D, C),
    range(0x105E, 0x1060, M),
    range(0x1061, 0x1061, C),
    range(0x1062, 0x1062, V),
    range(0x1063, 0x1064, F),
    range(0x1065, 0x1066, C),
    range(0x1067, 0x1068, V),
    range(0x1069, 0x106D, F),
    range(0x106E, 0x1070, C),
    range(0x1071, 0x1074, V),
    range(0x1075, 0x1081, C),
    range(0x1082, 0x1082, M),
    range(0x1083, 0x1086, V),
    range(0x1087, 0x108D, F),
    range(0x108E, 0x108E, C),
    range(0x108F, 0x108F, F),
    range(0x1090, 0x1099, D),
    range(0x109A, 0x109B, F),
    range(0x109C, 0x109D, V),
    range(0x109E, 0x109F, P),
];

/// Range table checked for ordering and core-block coverage on first use.
pub fn category_ranges() -> &'static [CategoryRange] {
    static CHECKED: OnceLock<&'static [CategoryRange]> = OnceLock::new();
    CHECKED.get_or_init(|| {
        assert_range_table_integrity(CATEGORY_RANGES);
        CATEGORY_RANGES
    })
}

/// Panics if the ranges overlap, are out of order, or leave a hole in the core block.
fn assert_range_table_integrity(ranges: &[CategoryRange]) {
    for r in ranges {
        assert!(r.start <= r.end, "inverted range {:#06X}..={:#06X}", r.start, r.end);
        assert!(r.category.is_classified(), "range {:#06X} maps to no category", r.start);
    }
    for pair in ranges.windows(2) {
        assert!(
            pair[0].end < pair[1].start,
            "overlapping or unsorted ranges at {:#06X}",
            pair[1].start
        );
    }

    let mut next = MYANMAR_START as u32;
    for r in ranges.iter().filter(|r| r.end >= MYANMAR_START as u32 && r.start <= MYANMAR_END as u32) {
        assert_eq!(r.start, next, "core block not covered at {:#06X}", next);
        next = r.end + 1;
    }
    assert_eq!(next, MYANMAR_END as u32 + 1, "core block not covered at {:#06X}", next);
}

/// Category of a single code point, straight from the range table.
///
/// The only code point outside the Myanmar blocks with a category is U+0020.
pub fn classify(c: char) -> Category {
    let code = c as u32;
    let ranges = category_ranges();
    match ranges.binary_search_by(|r| {
        if r.end < code {
            std::cmp::Ordering::Less
        } else if r.start > code {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    }) {
        Ok(idx) => ranges[idx].category,
        Err(_) => Category::Unclassified,
    }
}

/// Category used while segmenting: anything outside the core block is unclassified.
#[inline]
pub fn classify_in_block(c: char) -> Category {
    if is_myanmar_core_char(c) {
        classify(c)
    } else {
        Category::Unclassified
    }
}

/// Categories aligned 1:1 with the characters of `text`.
pub fn categorize(text: &str) -> Vec<Category> {
    text.chars().map(classify_in_block).collect()
}

/// Same as [`categorize`], rendered as a symbol string (`'?'` for unclassified).
pub fn categorize_to_string(text: &str) -> String {
    text.chars().map(|c| classify_in_block(c).symbol()).collect()
}
