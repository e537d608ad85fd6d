//! Edge and corner resizing with minimum-size clamping.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{MIN_HEIGHT, MIN_WIDTH};
use crate::geometry::{DesktopRect, Point};
use crate::surface::WindowHandle;

/// Which handle is being dragged. Corners combine a vertical and a
/// horizontal edge and apply both rules independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    N,
    S,
    E,
    W,
    NE,
    SE,
    SW,
    NW,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::N,
        ResizeDirection::E,
        ResizeDirection::S,
        ResizeDirection::W,
        ResizeDirection::NE,
        ResizeDirection::SE,
        ResizeDirection::SW,
        ResizeDirection::NW,
    ];

    pub fn north(self) -> bool {
        matches!(self, Self::N | Self::NE | Self::NW)
    }

    pub fn south(self) -> bool {
        matches!(self, Self::S | Self::SE | Self::SW)
    }

    pub fn east(self) -> bool {
        matches!(self, Self::E | Self::NE | Self::SE)
    }

    pub fn west(self) -> bool {
        matches!(self, Self::W | Self::NW | Self::SW)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::NE => "ne",
            Self::SE => "se",
            Self::SW => "sw",
            Self::NW => "nw",
        }
    }
}

impl fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resize direction {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for ResizeDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

/// Resize interaction from pointer-down on a handle to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    pub handle: WindowHandle,
    pub direction: ResizeDirection,
    pub origin_rect: DesktopRect,
    pub origin_pointer: Point,
}

impl ResizeSession {
    pub fn begin(
        handle: WindowHandle,
        direction: ResizeDirection,
        origin_rect: DesktopRect,
        origin_pointer: Point,
    ) -> Self {
        Self {
            handle,
            direction,
            origin_rect,
            origin_pointer,
        }
    }

    pub fn rect_at(&self, pointer: Point) -> DesktopRect {
        let (dx, dy) = pointer.delta_from(self.origin_pointer);
        apply_resize(self.origin_rect, self.direction, dx, dy)
    }
}

/// New geometry for a drag of `(dx, dy)` on the `direction` handle.
///
/// West and north drags move the origin so the opposite edge stays put,
/// including once the minimum size is reached.
pub fn apply_resize(origin: DesktopRect, direction: ResizeDirection, dx: i32, dy: i32) -> DesktopRect {
    let mut rect = origin;
    if direction.east() {
        rect.width = (origin.width + dx).max(MIN_WIDTH);
    }
    if direction.west() {
        rect.width = (origin.width - dx).max(MIN_WIDTH);
        rect.left = origin.left + origin.width - rect.width;
    }
    if direction.south() {
        rect.height = (origin.height + dy).max(MIN_HEIGHT);
    }
    if direction.north() {
        rect.height = (origin.height - dy).max(MIN_HEIGHT);
        rect.top = origin.top + origin.height - rect.height;
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: DesktopRect = DesktopRect::new(150, 100, 500, 400);

    #[test]
    fn parses_all_direction_names() {
        for dir in ResizeDirection::ALL {
            assert_eq!(dir.as_str().parse::<ResizeDirection>(), Ok(dir));
        }
        assert!("north".parse::<ResizeDirection>().is_err());
    }

    #[test]
    fn south_east_never_moves_origin() {
        for (dx, dy) in [(40, 30), (-1000, -1000), (-290, -240), (0, 0)] {
            let r = apply_resize(ORIGIN, ResizeDirection::SE, dx, dy);
            assert_eq!((r.left, r.top), (ORIGIN.left, ORIGIN.top));
            assert!(r.width >= MIN_WIDTH);
            assert!(r.height >= MIN_HEIGHT);
        }
        let r = apply_resize(ORIGIN, ResizeDirection::SE, 40, 30);
        assert_eq!((r.width, r.height), (540, 430));
    }

    #[test]
    fn north_west_keeps_bottom_right_corner() {
        for (dx, dy) in [(50, 60), (400, 400), (-30, -20), (10_000, 10_000)] {
            let r = apply_resize(ORIGIN, ResizeDirection::NW, dx, dy);
            assert_eq!(r.right(), ORIGIN.right());
            assert_eq!(r.bottom(), ORIGIN.bottom());
            assert!(r.width >= MIN_WIDTH);
            assert!(r.height >= MIN_HEIGHT);
        }
        let r = apply_resize(ORIGIN, ResizeDirection::NW, 400, 400);
        assert_eq!((r.width, r.height), (MIN_WIDTH, MIN_HEIGHT));
        assert_eq!((r.left, r.top), (450, 350));
    }

    #[test]
    fn single_edges_touch_one_axis() {
        let r = apply_resize(ORIGIN, ResizeDirection::E, 30, 99);
        assert_eq!(r, DesktopRect::new(150, 100, 530, 400));
        let r = apply_resize(ORIGIN, ResizeDirection::N, 99, -50);
        assert_eq!(r, DesktopRect::new(150, 50, 500, 450));
        let r = apply_resize(ORIGIN, ResizeDirection::W, 20, 0);
        assert_eq!(r, DesktopRect::new(170, 100, 480, 400));
        let r = apply_resize(ORIGIN, ResizeDirection::S, 0, -1000);
        assert_eq!(r, DesktopRect::new(150, 100, 500, MIN_HEIGHT));
    }

    #[test]
    fn session_measures_from_origin_pointer() {
        let session = ResizeSession::begin(
            WindowHandle::from_raw(1),
            ResizeDirection::SW,
            ORIGIN,
            Point::new(150, 500),
        );
        let r = session.rect_at(Point::new(100, 540));
        assert_eq!(r, DesktopRect::new(100, 100, 550, 440));
    }
}
