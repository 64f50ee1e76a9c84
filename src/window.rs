use std::ops::Range;

/// Fixed-height list viewport: which items are visible at a scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollWindow {
    pub item_height: f64,
    pub visible: usize,
}

impl ScrollWindow {
    pub fn new(item_height: f64, visible: usize) -> Self {
        Self {
            item_height,
            visible,
        }
    }

    /// `clamp(floor(offset / item_height), 0, max(0, total - visible))`.
    pub fn start_index(&self, total: usize, offset: f64) -> usize {
        let last_start = total.saturating_sub(self.visible);
        if self.item_height.is_nan() || self.item_height <= 0.0 || offset.is_nan() || offset <= 0.0 {
            return 0;
        }
        let raw = (offset / self.item_height).floor();
        if raw >= last_start as f64 {
            last_start
        } else {
            raw as usize
        }
    }

    pub fn range(&self, total: usize, offset: f64) -> Range<usize> {
        let start = self.start_index(total, offset);
        start..(start + self.visible).min(total)
    }

    pub fn slice<'a, T>(&self, items: &'a [T], offset: f64) -> &'a [T] {
        &items[self.range(items.len(), offset)]
    }

    /// Scroll offset that puts `index` at the top of the window.
    pub fn offset_of(&self, index: usize) -> f64 {
        index as f64 * self.item_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_window() {
        let w = ScrollWindow::new(80.0, 10);
        assert_eq!(w.start_index(25, 400.0), 5);
        assert_eq!(w.range(25, 400.0), 5..15);
    }

    #[test]
    fn test_clamps_at_end() {
        let w = ScrollWindow::new(80.0, 10);
        assert_eq!(w.range(25, 10_000.0), 15..25);
        assert_eq!(w.range(25, 1199.0), 14..24);
    }

    #[test]
    fn test_short_list_starts_at_zero() {
        let w = ScrollWindow::new(80.0, 10);
        assert_eq!(w.range(7, 5_000.0), 0..7);
        assert_eq!(w.range(0, 5_000.0), 0..0);
    }

    #[test]
    fn test_bad_offsets() {
        let w = ScrollWindow::new(80.0, 10);
        assert_eq!(w.start_index(25, -30.0), 0);
        assert_eq!(w.start_index(25, f64::NAN), 0);
        assert_eq!(w.start_index(25, f64::INFINITY), 15);
        assert_eq!(ScrollWindow::new(0.0, 10).start_index(25, 400.0), 0);
    }

    #[test]
    fn test_same_input_same_window() {
        let w = ScrollWindow::new(1.0, 3);
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(w.slice(&items, 4.5), &[4, 5, 6]);
        assert_eq!(w.slice(&items, 4.5), w.slice(&items, 4.5));
        assert_eq!(w.offset_of(4), 4.0);
    }
}
