//! Content measurement and height adaptation.
//!
//! The draft is wrapped by display width (character granularity, no word
//! breaking) so that measuring and drawing agree on where every row starts.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// Rows added around the measured content (top and bottom border).
pub const CONTENT_PADDING: u16 = 2;

/// Clamp a measured content height into the configured bounds.
pub fn clamped_height(content_rows: u16, min: u16, max: u16) -> u16 {
    content_rows
        .saturating_add(CONTENT_PADDING)
        .clamp(min, max.max(min))
}

/// Split one line into character ranges that each fit `width` columns.
///
/// Always yields at least one (possibly empty) range. A character wider than
/// `width` gets a row of its own.
pub fn wrap_ranges(line: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (idx, ch) in line.chars().enumerate() {
        let w = ch.width().unwrap_or(0);
        if used + w > width && idx > start {
            rows.push(start..idx);
            start = idx;
            used = 0;
        }
        used += w;
    }
    rows.push(start..line.chars().count());
    rows
}

/// Number of wrapped rows `text` occupies at `width` columns.
pub fn content_rows<'a>(lines: impl IntoIterator<Item = &'a str>, width: usize) -> usize {
    lines
        .into_iter()
        .map(|line| wrap_ranges(line, width).len())
        .sum()
}

/// Tracks the field height derived from content-size reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightTracker {
    min: u16,
    max: u16,
    current: u16,
}

impl HeightTracker {
    /// Start at the lower bound. `max` below `min` is treated as `min`.
    pub fn new(min: u16, max: u16) -> Self {
        let max = max.max(min);
        Self {
            min,
            max,
            current: min,
        }
    }

    pub const fn current(&self) -> u16 {
        self.current
    }

    pub const fn bounds(&self) -> (u16, u16) {
        (self.min, self.max)
    }

    /// Recompute from a reported content height. Returns `true` on change.
    pub fn report(&mut self, content_rows: u16) -> bool {
        let next = clamped_height(content_rows, self.min, self.max);
        let changed = next != self.current;
        self.current = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamped_height_adds_padding() {
        assert_eq!(clamped_height(4, 3, 12), 6);
    }

    #[test]
    fn test_clamped_height_respects_bounds() {
        assert_eq!(clamped_height(0, 3, 12), 3);
        assert_eq!(clamped_height(40, 3, 12), 12);
        assert_eq!(clamped_height(u16::MAX, 3, 12), 12);
    }

    #[test]
    fn test_wrap_ranges_splits_by_width() {
        assert_eq!(wrap_ranges("abcdefg", 3), vec![0..3, 3..6, 6..7]);
        assert_eq!(wrap_ranges("", 3), vec![0..0]);
        assert_eq!(wrap_ranges("abc", 3), vec![0..3]);
    }

    #[test]
    fn test_wrap_ranges_counts_wide_chars_as_two_columns() {
        // Each CJK char takes two columns.
        assert_eq!(wrap_ranges("日本語", 4), vec![0..2, 2..3]);
        assert_eq!(wrap_ranges("日", 1), vec![0..1]);
    }

    #[test]
    fn test_content_rows_sums_wrapped_lines() {
        assert_eq!(content_rows(["abcdef", "", "ab"], 3), 4);
    }

    #[test]
    fn test_tracker_reports_changes_only() {
        let mut tracker = HeightTracker::new(3, 8);
        assert_eq!(tracker.current(), 3);
        assert!(!tracker.report(1));
        assert!(tracker.report(2));
        assert_eq!(tracker.current(), 4);
        assert!(!tracker.report(2));
    }

    #[test]
    fn test_tracker_normalises_inverted_bounds() {
        let tracker = HeightTracker::new(6, 2);
        assert_eq!(tracker.bounds(), (6, 6));
    }

    proptest! {
        #[test]
        fn prop_height_stays_within_bounds(rows in any::<u16>(), min in 1u16..40, span in 0u16..40) {
            let max = min + span;
            let mut tracker = HeightTracker::new(min, max);
            tracker.report(rows);
            prop_assert!(tracker.current() >= min);
            prop_assert!(tracker.current() <= max);
        }

        #[test]
        fn prop_wrapped_rows_fit_width(line in "[a-z日本 ]{0,80}", width in 2usize..20) {
            let chars: Vec<char> = line.chars().collect();
            for range in wrap_ranges(&line, width) {
                let used: usize = chars[range].iter().map(|c| c.width().unwrap_or(0)).sum();
                prop_assert!(used <= width);
            }
        }
    }
}
