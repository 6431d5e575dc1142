// Myanmar Unicode Ranges
pub const MYANMAR_START: char = '\u{1000}';
pub const MYANMAR_END: char = '\u{109F}';
pub const MYANMAR_EXT_A_START: char = '\u{AA60}';
pub const MYANMAR_EXT_A_END: char = '\u{AA7F}';
pub const MYANMAR_EXT_B_START: char = '\u{A9E0}';
pub const MYANMAR_EXT_B_END: char = '\u{A9FF}';

/// Default syllable breaking symbol.
pub const DEFAULT_SEPARATOR: &str = "|";

/// Appended after a character pair that breaks canonical spelling order.
pub const ILLEGAL_ORDER_MARK: char = '?';

/// Core block only. Runs of these characters are what gets segmented.
#[inline]
pub fn is_myanmar_core_char(c: char) -> bool {
    (MYANMAR_START..=MYANMAR_END).contains(&c)
}

/// Any of the three Myanmar blocks (core, Extended-A, Extended-B).
pub fn is_myanmar_char(c: char) -> bool {
    is_myanmar_core_char(c)
        || (MYANMAR_EXT_A_START..=MYANMAR_EXT_A_END).contains(&c)
        || (MYANMAR_EXT_B_START..=MYANMAR_EXT_B_END).contains(&c)
}
