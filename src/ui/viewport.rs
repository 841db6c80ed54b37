//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks which slice of the composed page is
//! on screen and handles all scroll operations.

use std::ops::Range;

/// Manages the visible portion of a page.
///
/// The viewport tracks:
/// - Terminal dimensions (width, height)
/// - Current scroll offset (in lines)
/// - Total page length
///
/// # Example
///
/// ```
/// use masthead::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 20, 60);
/// assert_eq!(vp.visible_range(), 0..20);
///
/// vp.scroll_down(15);
/// assert_eq!(vp.visible_range(), 15..35);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// Create a new viewport.
    ///
    /// # Arguments
    ///
    /// * `width` - Terminal width in columns
    /// * `height` - Terminal height in lines (for the page area)
    /// * `total_lines` - Total lines in the composed page
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    /// Get the current scroll offset.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Get the viewport width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the viewport height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of lines in the page.
    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Get the range of visible lines.
    ///
    /// Returns a range from the current offset to offset + height,
    /// clamped to the page bounds.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    /// Get the scroll percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        if self.total_lines == 0 {
            return 100;
        }

        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }

        // Percentage value always 0-100
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    /// Check if we can scroll up.
    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    /// Check if we can scroll down.
    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    /// Scroll up by n lines.
    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    /// Scroll down by n lines.
    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    /// Scroll up one page.
    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    /// Scroll down one page.
    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    /// Scroll up half a page.
    pub const fn half_page_up(&mut self) {
        self.scroll_up(self.height as usize / 2);
    }

    /// Scroll down half a page.
    pub fn half_page_down(&mut self) {
        self.scroll_down(self.height as usize / 2);
    }

    /// Go to the beginning of the page.
    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    /// Go to the end of the page.
    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll the minimum amount needed to bring `line` on screen.
    pub fn scroll_into_view(&mut self, line: usize) {
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + self.height as usize {
            self.offset = (line + 1)
                .saturating_sub(self.height as usize)
                .min(self.max_offset());
        }
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        // Clamp offset if the page is now shorter than the viewport
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the total number of lines (e.g. after an edit or reload).
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Calculate the maximum valid offset.
    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}
