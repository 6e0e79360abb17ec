//! Visible window of the menu list
//!
//! Tracks which rows of the selection menu are on screen.

/// Viewport state for the selection menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuViewport {
    /// First visible row (0-indexed)
    pub top_row: usize,
    /// Number of rows that fit in the menu
    pub visible_rows: usize,
}

impl Default for MenuViewport {
    fn default() -> Self {
        Self::new(8)
    }
}

impl MenuViewport {
    pub fn new(visible_rows: usize) -> Self {
        Self {
            top_row: 0,
            visible_rows,
        }
    }

    /// Scroll the minimal amount needed to show `row`.
    /// Returns true if the viewport moved.
    pub fn ensure_visible(&mut self, row: usize, total_rows: usize) -> bool {
        let before = self.top_row;

        if row < self.top_row {
            self.top_row = row;
        } else if row >= self.top_row + self.visible_rows && self.visible_rows > 0 {
            self.top_row = row.saturating_sub(self.visible_rows - 1);
        }

        self.clamp(total_rows);
        self.top_row != before
    }

    /// Keep the viewport inside a list of `total_rows`
    pub fn clamp(&mut self, total_rows: usize) {
        let max_top = total_rows.saturating_sub(self.visible_rows);
        self.top_row = self.top_row.min(max_top);
    }

    /// Check if a row is fully visible
    pub fn is_row_visible(&self, row: usize) -> bool {
        row >= self.top_row && row < self.top_row + self.visible_rows
    }

    /// Range of visible rows for a list of `total_rows`
    pub fn visible_range(&self, total_rows: usize) -> std::ops::Range<usize> {
        let end = (self.top_row + self.visible_rows).min(total_rows);
        self.top_row.min(end)..end
    }

    pub fn reset(&mut self) {
        self.top_row = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_visible_scroll_down() {
        let mut vp = MenuViewport::new(5);
        assert!(vp.ensure_visible(7, 20));
        assert_eq!(vp.top_row, 3);
        assert!(vp.is_row_visible(7));
    }

    #[test]
    fn test_ensure_visible_scroll_up() {
        let mut vp = MenuViewport::new(5);
        vp.top_row = 10;
        assert!(vp.ensure_visible(4, 20));
        assert_eq!(vp.top_row, 4);
    }

    #[test]
    fn test_already_visible_does_not_move() {
        let mut vp = MenuViewport::new(5);
        vp.top_row = 2;
        assert!(!vp.ensure_visible(2, 20));
        assert!(!vp.ensure_visible(6, 20));
        assert_eq!(vp.top_row, 2);
    }

    #[test]
    fn test_visible_range_short_list() {
        let mut vp = MenuViewport::new(5);
        vp.top_row = 4;
        vp.clamp(3);
        assert_eq!(vp.top_row, 0);
        assert_eq!(vp.visible_range(3), 0..3);
    }
}
