//! Desktop icons: double-click to open, drag to rearrange.

use std::time::Instant;

use ratatui::style::{Modifier, Style};

use crate::constants::{CELL_HEIGHT, CELL_WIDTH, ICON_GRID_SIZE, ICON_HEIGHT, ICON_WIDTH};
use crate::drivers::mouse::ClickTracker;
use crate::geometry::{DesktopRect, Point};
use crate::ui::UiFrame;
use crate::window::{DragSession, clamp_to_container, snap_to_grid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopIcon {
    pub title: &'static str,
    pub glyph: &'static str,
    pub home: Point,
    pub position: Point,
}

impl DesktopIcon {
    const fn new(title: &'static str, glyph: &'static str, x: i32, y: i32) -> Self {
        Self {
            title,
            glyph,
            home: Point::new(x, y),
            position: Point::new(x, y),
        }
    }

    pub fn rect(&self) -> DesktopRect {
        DesktopRect::new(self.position.x, self.position.y, ICON_WIDTH, ICON_HEIGHT)
    }
}

/// Result of pressing the pointer on an icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconPress {
    /// The press completed a double-click: open this title.
    Open(&'static str),
    /// A drag session started.
    Dragging,
}

#[derive(Debug)]
pub struct DesktopIcons {
    icons: Vec<DesktopIcon>,
    selected: Option<usize>,
    drag: Option<DragSession<usize>>,
    clicks: ClickTracker<usize>,
}

impl Default for DesktopIcons {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopIcons {
    pub fn new() -> Self {
        Self {
            icons: vec![
                DesktopIcon::new("My Blog Posts", "▤", 50, 50),
                DesktopIcon::new("About Me", "☺", 50, 150),
                DesktopIcon::new("Projects", "▣", 50, 250),
                DesktopIcon::new("Contact", "✉", 50, 350),
            ],
            selected: None,
            drag: None,
            clicks: ClickTracker::default(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DesktopIcon> {
        self.icons.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DesktopIcon> {
        self.icons.get(index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Index of the icon under `point`; later icons sit on top.
    pub fn icon_at(&self, point: Point) -> Option<usize> {
        self.icons.iter().rposition(|icon| icon.rect().contains(point))
    }

    pub fn press(&mut self, index: usize, pointer: Point, now: Instant) -> Option<IconPress> {
        let (title, position) = self.icons.get(index).map(|i| (i.title, i.position))?;
        self.selected = Some(index);
        if self.clicks.press(index, now) {
            self.drag = None;
            tracing::debug!(title, "icon double-clicked");
            return Some(IconPress::Open(title));
        }
        self.drag = Some(DragSession::begin(index, pointer, position));
        Some(IconPress::Dragging)
    }

    /// Follow the pointer, keeping the icon inside a container of `container`
    /// units with its origin at the desktop origin.
    pub fn drag_to(&mut self, pointer: Point, container: (i32, i32)) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let Some(icon) = self.icons.get_mut(drag.target) else {
            return false;
        };
        icon.position = clamp_to_container(
            drag.position_at(pointer),
            (ICON_WIDTH, ICON_HEIGHT),
            container,
        );
        true
    }

    /// End the drag and snap the icon to the grid.
    pub fn release(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if let Some(icon) = self.icons.get_mut(drag.target) {
            icon.position = snap_to_grid(icon.position, ICON_GRID_SIZE);
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Put every icon back where it started.
    pub fn reset(&mut self) {
        for icon in &mut self.icons {
            icon.position = icon.home;
        }
        self.selected = None;
        self.drag = None;
        self.clicks.reset();
    }

    pub fn render(&self, frame: &mut UiFrame<'_>) {
        let base = Style::default()
            .bg(crate::theme::desktop_bg())
            .fg(crate::theme::icon_fg());
        for (index, icon) in self.icons.iter().enumerate() {
            let cells = icon.rect().to_cells();
            let width = cells.width as usize;
            let label_style = if self.selected == Some(index) {
                base.bg(crate::theme::icon_selected_bg())
            } else {
                base
            };
            let glyph_x = cells.x + (width as i32 - 1) / 2;
            frame.set_string_signed(glyph_x, cells.y, icon.glyph, base.add_modifier(Modifier::BOLD));
            let label = crate::ui::truncate_to_width(icon.title, width);
            let label_x = cells.x + (width.saturating_sub(label.chars().count()) / 2) as i32;
            frame.set_string_signed(label_x, cells.y + 1, &label, label_style);
        }
    }
}

/// Desktop container size in units for a desktop area `columns` wide and
/// `rows` tall.
pub fn container_size(columns: u16, rows: u16) -> (i32, i32) {
    (columns as i32 * CELL_WIDTH, rows as i32 * CELL_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const CONTAINER: (i32, i32) = (640, 460);

    #[test]
    fn icons_start_in_a_column() {
        let icons = DesktopIcons::new();
        let positions: Vec<_> = icons.iter().map(|i| (i.title, i.position)).collect();
        assert_eq!(
            positions,
            vec![
                ("My Blog Posts", Point::new(50, 50)),
                ("About Me", Point::new(50, 150)),
                ("Projects", Point::new(50, 250)),
                ("Contact", Point::new(50, 350)),
            ]
        );
        assert_eq!(icons.icon_at(Point::new(60, 160)), Some(1));
        assert_eq!(icons.icon_at(Point::new(10, 10)), None);
    }

    #[test]
    fn double_click_opens_without_dragging() {
        let mut icons = DesktopIcons::new();
        let t0 = Instant::now();
        let p = Point::new(60, 160);
        assert_eq!(icons.press(1, p, t0), Some(IconPress::Dragging));
        icons.release();
        assert_eq!(
            icons.press(1, p, t0 + Duration::from_millis(200)),
            Some(IconPress::Open("About Me"))
        );
        assert!(!icons.is_dragging());
    }

    #[test]
    fn drag_clamps_then_snaps_on_release() {
        let mut icons = DesktopIcons::new();
        let t0 = Instant::now();
        icons.press(0, Point::new(60, 60), t0);
        icons.drag_to(Point::new(-500, 73), CONTAINER);
        assert_eq!(icons.get(0).map(|i| i.position), Some(Point::new(0, 63)));
        assert!(icons.release());
        assert_eq!(icons.get(0).map(|i| i.position), Some(Point::new(0, 60)));

        icons.press(3, Point::new(60, 360), t0 + Duration::from_secs(2));
        icons.drag_to(Point::new(2000, 2000), CONTAINER);
        let pos = icons.get(3).map(|i| i.position).unwrap_or_default();
        assert_eq!(pos, Point::new(CONTAINER.0 - ICON_WIDTH, CONTAINER.1 - ICON_HEIGHT));
        icons.release();
        let pos = icons.get(3).map(|i| i.position).unwrap_or_default();
        assert_eq!((pos.x % ICON_GRID_SIZE, pos.y % ICON_GRID_SIZE), (0, 0));
    }

    #[test]
    fn reset_returns_icons_home() {
        let mut icons = DesktopIcons::new();
        icons.press(2, Point::new(60, 260), Instant::now());
        icons.drag_to(Point::new(300, 300), CONTAINER);
        icons.release();
        icons.reset();
        assert_eq!(icons.get(2).map(|i| i.position), Some(Point::new(50, 250)));
        assert_eq!(icons.selected(), None);
    }
}
