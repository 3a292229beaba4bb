//! Parser for `pdffonts` output.

/// `pdffonts` always prints a title row and a dashed rule.
pub const FONT_LIST_HEADER_LINES: usize = 2;

/// Number of font entries in a font listing.
///
/// Blank lines are not counted, so a trailing newline does not make an
/// empty listing look like it has one font.
pub fn count_fonts(text: &str) -> usize {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .count()
        .saturating_sub(FONT_LIST_HEADER_LINES)
}
