//! Desktop-unit geometry and its mapping onto terminal cells.

use ratatui::layout::Rect;

use crate::constants::{CELL_HEIGHT, CELL_WIDTH};

/// A pointer or element position in desktop units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Desktop position of the top-left corner of terminal cell `(column, row)`.
    pub fn from_cell(column: u16, row: u16) -> Self {
        Self {
            x: column as i32 * CELL_WIDTH,
            y: row as i32 * CELL_HEIGHT,
        }
    }

    pub fn delta_from(self, origin: Point) -> (i32, i32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Window or icon rectangle in desktop units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DesktopRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl DesktopRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// Desktop rectangle covering the terminal area `rect`.
    pub fn from_cells(rect: Rect) -> Self {
        Self {
            left: rect.x as i32 * CELL_WIDTH,
            top: rect.y as i32 * CELL_HEIGHT,
            width: rect.width as i32 * CELL_WIDTH,
            height: rect.height as i32 * CELL_HEIGHT,
        }
    }

    /// Cell rectangle this desktop rectangle occupies. Origins round down;
    /// sizes round to the nearest cell and never collapse below one cell.
    pub fn to_cells(&self) -> CellRect {
        let width = ((self.width + CELL_WIDTH / 2) / CELL_WIDTH).max(1);
        let height = ((self.height + CELL_HEIGHT / 2) / CELL_HEIGHT).max(1);
        CellRect {
            x: self.left.div_euclid(CELL_WIDTH),
            y: self.top.div_euclid(CELL_HEIGHT),
            width: width.min(u16::MAX as i32) as u16,
            height: height.min(u16::MAX as i32) as u16,
        }
    }
}

/// Signed cell rectangle. Windows may be dragged partially off-screen, so the
/// origin can be negative before clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        let (c, r) = (column as i32, row as i32);
        c >= self.x && c < self.right() && r >= self.y && r < self.bottom()
    }

    /// Visible portion of this rectangle inside `bounds`.
    pub fn clip(&self, bounds: Rect) -> Rect {
        let left = self.x.max(bounds.x as i32);
        let top = self.y.max(bounds.y as i32);
        let right = self.right().min(bounds.x as i32 + bounds.width as i32);
        let bottom = self.bottom().min(bounds.y as i32 + bounds.height as i32);
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_maps_onto_cells() {
        let rect = DesktopRect::new(150, 100, 500, 400);
        let cells = rect.to_cells();
        assert_eq!(cells.x, 18);
        assert_eq!(cells.y, 5);
        assert_eq!(cells.width, 63);
        assert_eq!(cells.height, 20);
    }

    #[test]
    fn negative_origin_rounds_toward_negative_infinity() {
        let rect = DesktopRect::new(-4, -30, 80, 40);
        let cells = rect.to_cells();
        assert_eq!(cells.x, -1);
        assert_eq!(cells.y, -2);
    }

    #[test]
    fn clip_drops_offscreen_part() {
        let cells = CellRect {
            x: -5,
            y: 3,
            width: 20,
            height: 6,
        };
        let bounds = Rect::new(0, 0, 80, 24);
        assert_eq!(cells.clip(bounds), Rect::new(0, 3, 15, 6));

        let gone = CellRect {
            x: 100,
            y: 0,
            width: 4,
            height: 4,
        };
        assert_eq!(gone.clip(bounds), Rect::default());
    }

    #[test]
    fn point_from_cell_scales_by_cell_size() {
        let p = Point::from_cell(3, 2);
        assert_eq!(p, Point::new(3 * CELL_WIDTH, 2 * CELL_HEIGHT));
        assert_eq!(p.delta_from(Point::new(4, 10)), (20, 30));
    }
}
