//! Line colours.

use crate::domain::LineNumber;

/// Colour for lines without an entry.
const FALLBACK: &str = "#000000";

/// Hex colours for lines 1 to 9.
const LINE_COLOURS: [&str; 9] = [
    "#00B050", // 1
    "#002060", // 2
    "#CB6A28", // 3
    "#FF0000", // 4
    "#7F9ED7", // 5
    "#FFC000", // 6
    "#92D050", // 7
    "#00B0F0", // 8
    "#7030A0", // 9
];

/// Hex colour used to draw a line.
pub fn line_colour(line: LineNumber) -> &'static str {
    usize::from(line.get())
        .checked_sub(1)
        .and_then(|i| LINE_COLOURS.get(i))
        .copied()
        .unwrap_or(FALLBACK)
}
