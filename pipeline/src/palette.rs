//! Stable category color palette.
//!
//! One process-wide immutable table; every category position maps to a
//! color through [`color_for_index`], so the same category keeps the same
//! color across tables, pie slices, and stacked bars.

/// Hex colors assigned to category positions, cycling when exhausted.
const PALETTE: [&str; 48] = [
    "#FF6633", "#FF33FF", "#00B3E6", "#E6B333", "#3366E6", "#999966", "#99FF99", "#B34D4D",
    "#80B300", "#809900", "#E6B3B3", "#6680B3", "#66991A", "#FF99E6", "#CCFF1A", "#FF1A66",
    "#E6331A", "#33FFCC", "#66994D", "#B366CC", "#4D8000", "#B33300", "#CC80CC", "#66664D",
    "#991AFF", "#E666FF", "#4DB3FF", "#1AB399", "#E666B3", "#33991A", "#CC9999", "#B3B31A",
    "#00E680", "#4D8066", "#809980", "#E6FF80", "#1AFF33", "#999933", "#FF3380", "#CCCC00",
    "#66E64D", "#4D80CC", "#9900B3", "#E64D66", "#4DB380", "#FF4D4D", "#99E6E6", "#6666FF",
];

/// Color for the i-th category, stable for a fixed category order.
pub fn color_for_index(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_cycle_through_the_table() {
        assert_eq!(color_for_index(0), "#FF6633");
        assert_eq!(color_for_index(47), "#6666FF");
        assert_eq!(color_for_index(48), color_for_index(0));
        assert_eq!(color_for_index(100), color_for_index(100 % 48));
    }

    #[test]
    fn all_entries_are_hex_colors() {
        for i in 0..PALETTE.len() {
            let c = color_for_index(i);
            assert!(c.starts_with('#') && c.len() == 7);
        }
    }
}
