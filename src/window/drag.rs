//! Pointer-drag tracking shared by window title bars and desktop icons.

use crate::geometry::Point;

/// One drag interaction, from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession<T: Copy> {
    pub target: T,
    pub origin_pointer: Point,
    pub origin_position: Point,
}

impl<T: Copy> DragSession<T> {
    pub fn begin(target: T, origin_pointer: Point, origin_position: Point) -> Self {
        Self {
            target,
            origin_pointer,
            origin_position,
        }
    }

    /// Element position for the current pointer: origin plus pointer delta.
    pub fn position_at(&self, pointer: Point) -> Point {
        let (dx, dy) = pointer.delta_from(self.origin_pointer);
        Point::new(self.origin_position.x + dx, self.origin_position.y + dy)
    }
}

/// Keep an element of `size` fully inside a container of `container` size,
/// with the origin at `(0, 0)`. An element larger than its container is
/// pinned to the origin.
pub fn clamp_to_container(position: Point, size: (i32, i32), container: (i32, i32)) -> Point {
    let max_x = container.0 - size.0;
    let max_y = container.1 - size.1;
    Point::new(position.x.min(max_x).max(0), position.y.min(max_y).max(0))
}

/// Round both coordinates to the nearest multiple of `grid`; halves round up.
pub fn snap_to_grid(position: Point, grid: i32) -> Point {
    if grid <= 0 {
        return position;
    }
    let snap = |v: i32| (v + grid / 2).div_euclid(grid) * grid;
    Point::new(snap(position.x), snap(position.y))
}
