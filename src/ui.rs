//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area.
//!
//! Window rectangles come from desktop geometry and routinely hang off the
//! edge of the terminal (a window dragged to a negative origin, a resize
//! larger than the screen). Writing out of bounds into a `Buffer` panics, so
//! every draw call from the desktop, the decorator and the content widgets
//! goes through `UiFrame`, which accepts signed coordinates and clips.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer, for drawing
    /// without a terminal.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= self.area.x as i32
            && y >= self.area.y as i32
            && x < self.area.right() as i32
            && y < self.area.bottom() as i32
    }

    /// Write one cell; positions outside the frame are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, symbol: &str, style: Style) {
        if !self.in_bounds(x, y) {
            return;
        }
        if let Some(cell) = self.buffer.cell_mut((x as u16, y as u16)) {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }

    /// Write a string starting at a possibly off-screen position. Characters
    /// left of the frame are skipped and the rest is truncated at the right
    /// edge.
    pub fn set_string_signed(&mut self, x: i32, y: i32, text: &str, style: Style) {
        if y < self.area.y as i32 || y >= self.area.bottom() as i32 {
            return;
        }
        let skip = (self.area.x as i32 - x).max(0) as usize;
        let start = x.max(self.area.x as i32) as u16;
        let visible: String = text.chars().skip(skip).collect();
        safe_set_string(self.buffer, self.area, start, y as u16, &visible, style);
    }

    /// Paint every cell of `rect` with a blank in `style`.
    pub fn fill(&mut self, rect: Rect, style: Style) {
        let Some(clipped) = self.clip_rect(rect) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}
