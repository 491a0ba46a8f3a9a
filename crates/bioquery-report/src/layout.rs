//! Vertical layout engine with automatic page breaks.
//!
//! All content emission funnels through [`LayoutEngine::emit`], which
//! checks the primitive's declared height against the page boundary
//! *before* handing out a position. Multi-line blocks must emit each
//! wrapped line individually so the break lands on the first line that
//! would overflow, never mid-primitive.

/// Page geometry in millimetres (A4, portrait).
#[derive(Debug, Clone, Copy)]
pub struct PageMetrics {
    /// Lowest usable vertical offset before a break is forced.
    pub page_height: f64,
    /// Top and left margin; the cursor resets here on a new page.
    pub margin: f64,
    /// Usable content width.
    pub content_width: f64,
    /// Default height of one text line.
    pub line_height: f64,
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self {
            page_height: 280.0,
            margin: 20.0,
            content_width: 170.0,
            line_height: 6.0,
        }
    }
}

/// Where a primitive landed: zero-based page index and vertical offset
/// from the top of that page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub page: usize,
    pub y: f64,
}

#[derive(Debug)]
pub struct LayoutEngine {
    metrics: PageMetrics,
    page: usize,
    y: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(PageMetrics::default())
    }
}

impl LayoutEngine {
    pub fn new(metrics: PageMetrics) -> Self {
        Self {
            y: metrics.margin,
            page: 0,
            metrics,
        }
    }

    pub fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    /// Reserve vertical space for one primitive, breaking the page
    /// first if the primitive would cross the boundary. Returns the
    /// position at which the primitive must be drawn.
    pub fn emit(&mut self, height: f64) -> Position {
        if self.y + height > self.metrics.page_height {
            self.page += 1;
            self.y = self.metrics.margin;
        }
        let position = Position {
            page: self.page,
            y: self.y,
        };
        self.y += height;
        position
    }

    /// Run the page-break check for a primitive of `height` without
    /// advancing the cursor. Used for decorative backgrounds drawn
    /// behind content that is emitted afterwards: the box and its
    /// content must land on the same page.
    pub fn ensure(&mut self, height: f64) -> Position {
        if self.y + height > self.metrics.page_height {
            self.page += 1;
            self.y = self.metrics.margin;
        }
        self.position()
    }

    /// Advance the cursor without a break check; trailing gaps at a
    /// page boundary are absorbed by the next `emit`.
    pub fn space(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Current cursor position, without reserving space.
    pub fn position(&self) -> Position {
        Position {
            page: self.page,
            y: self.y,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_within_page_advance_cursor() {
        let mut layout = LayoutEngine::default();
        let first = layout.emit(6.0);
        assert_eq!(first, Position { page: 0, y: 20.0 });
        let second = layout.emit(6.0);
        assert_eq!(second, Position { page: 0, y: 26.0 });
        assert_eq!(layout.page_count(), 1);
    }

    #[test]
    fn breaks_exactly_at_first_overflowing_primitive() {
        let mut layout = LayoutEngine::default();
        // 43 six-mm lines fit: 20 + 43*6 = 278 <= 280.
        for _ in 0..43 {
            let pos = layout.emit(6.0);
            assert_eq!(pos.page, 0);
        }
        assert_eq!(layout.position().y, 278.0);
        // The 44th would end at 284 > 280 and must open page 1 with the
        // cursor reset to the top margin.
        let pos = layout.emit(6.0);
        assert_eq!(pos, Position { page: 1, y: 20.0 });
        assert_eq!(layout.page_count(), 2);
    }

    #[test]
    fn primitive_exactly_filling_the_page_does_not_break() {
        let mut layout = LayoutEngine::default();
        layout.emit(254.0);
        assert_eq!(layout.position().y, 274.0);
        let pos = layout.emit(6.0);
        // 274 + 6 = 280, not over the boundary.
        assert_eq!(pos, Position { page: 0, y: 274.0 });
    }

    #[test]
    fn ensure_breaks_without_advancing() {
        let mut layout = LayoutEngine::default();
        layout.space(270.0);
        // y = 290 is already past the boundary; a 12 mm box must open
        // the next page.
        let pos = layout.ensure(12.0);
        assert_eq!(pos, Position { page: 1, y: 20.0 });
        // The cursor did not advance, so the box's content lands at
        // the same spot.
        assert_eq!(layout.emit(6.0), Position { page: 1, y: 20.0 });
    }

    #[test]
    fn space_is_absorbed_at_the_boundary() {
        let mut layout = LayoutEngine::default();
        layout.space(300.0);
        let pos = layout.emit(6.0);
        assert_eq!(pos, Position { page: 1, y: 20.0 });
    }

    #[test]
    fn tall_header_then_lines_only_one_break() {
        let mut layout = LayoutEngine::default();
        let mut breaks = 0;
        let mut last_page = 0;
        for height in [15.0, 8.0, 6.0, 6.0, 6.0, 240.0, 6.0] {
            let pos = layout.emit(height);
            if pos.page != last_page {
                breaks += 1;
                last_page = pos.page;
            }
        }
        // Cumulative height first exceeds the boundary at the 240 mm
        // primitive; everything after it flows on page 1.
        assert_eq!(breaks, 1);
        assert_eq!(last_page, 1);
    }
}
