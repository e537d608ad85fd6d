use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::resize::ResizeDirection;
use crate::geometry::CellRect;
use crate::ui::UiFrame;

/// Part of a window's chrome under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPart {
    TitleBar,
    Minimize,
    Maximize,
    Close,
    Resize(ResizeDirection),
    Content,
}

const MINIMIZE_LABEL: &str = "[_]";
const MAXIMIZE_LABEL: &str = "[□]";
const RESTORE_LABEL: &str = "[▣]";
const CLOSE_LABEL: &str = "[X]";
const CONTROL_WIDTH: i32 = 3;

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: CellRect,
        title: &str,
        focused: bool,
        maximized: bool,
    );

    fn hit_test(&self, rect: CellRect, column: u16, row: u16) -> Option<WindowPart>;

    /// Cells available to the window's content.
    fn content_rect(&self, rect: CellRect) -> CellRect {
        CellRect {
            x: rect.x + 1,
            y: rect.y + 2,
            width: rect.width.saturating_sub(2),
            height: rect.height.saturating_sub(3),
        }
    }
}

/// Grey frame, blue title bar and three bracketed controls on the right.
#[derive(Debug, Default)]
pub struct RetroDecorator;

impl RetroDecorator {
    /// Leftmost column of the `index`th control counted from the close button.
    fn control_x(rect: CellRect, index: i32) -> i32 {
        rect.right() - 1 - CONTROL_WIDTH * (index + 1)
    }
}

impl WindowDecorator for RetroDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: CellRect,
        title: &str,
        focused: bool,
        maximized: bool,
    ) {
        let bounds = frame.area();
        let visible = rect.clip(bounds);
        if visible.width == 0 || visible.height == 0 || rect.width < 3 || rect.height < 3 {
            return;
        }
        let border_style = Style::default()
            .fg(crate::theme::window_border_fg())
            .bg(crate::theme::window_bg());
        let header_style = if focused {
            Style::default()
                .bg(crate::theme::title_active_bg())
                .fg(crate::theme::title_active_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(crate::theme::title_inactive_bg())
                .fg(crate::theme::title_inactive_fg())
        };
        let body_style = Style::default()
            .bg(crate::theme::window_bg())
            .fg(crate::theme::window_fg());

        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;
        let header_y = rect.y + 1;

        for y in rect.y..=bottom {
            for x in rect.x..=right {
                let (symbol, style) = match (x, y) {
                    (x, y) if x == rect.x && y == rect.y => ("┌", border_style),
                    (x, y) if x == right && y == rect.y => ("┐", border_style),
                    (x, y) if x == rect.x && y == bottom => ("└", border_style),
                    (x, y) if x == right && y == bottom => ("┘", border_style),
                    (_, y) if y == rect.y || y == bottom => ("─", border_style),
                    (x, _) if x == rect.x || x == right => ("│", border_style),
                    (_, y) if y == header_y => (" ", header_style),
                    _ => (" ", body_style),
                };
                frame.set_cell(x, y, symbol, style);
            }
        }

        let controls = [
            CLOSE_LABEL,
            if maximized { RESTORE_LABEL } else { MAXIMIZE_LABEL },
            MINIMIZE_LABEL,
        ];
        for (index, label) in controls.iter().enumerate() {
            frame.set_string_signed(Self::control_x(rect, index as i32), header_y, label, header_style);
        }

        let title_room = (Self::control_x(rect, 2) - rect.x - 2).max(0) as usize;
        let label = crate::ui::truncate_to_width(title, title_room);
        frame.set_string_signed(rect.x + 2, header_y, &label, header_style);
    }

    fn hit_test(&self, rect: CellRect, column: u16, row: u16) -> Option<WindowPart> {
        if !rect.contains(column, row) {
            return None;
        }
        let (x, y) = (column as i32, row as i32);
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;
        let part = if y == rect.y {
            if x == rect.x {
                WindowPart::Resize(ResizeDirection::NW)
            } else if x == right {
                WindowPart::Resize(ResizeDirection::NE)
            } else {
                WindowPart::Resize(ResizeDirection::N)
            }
        } else if y == bottom {
            if x == rect.x {
                WindowPart::Resize(ResizeDirection::SW)
            } else if x == right {
                WindowPart::Resize(ResizeDirection::SE)
            } else {
                WindowPart::Resize(ResizeDirection::S)
            }
        } else if x == rect.x {
            WindowPart::Resize(ResizeDirection::W)
        } else if x == right {
            WindowPart::Resize(ResizeDirection::E)
        } else if y == rect.y + 1 {
            let control = [WindowPart::Close, WindowPart::Maximize, WindowPart::Minimize]
                .into_iter()
                .enumerate()
                .find(|(index, _)| {
                    let start = Self::control_x(rect, *index as i32);
                    x >= start && x < start + CONTROL_WIDTH
                })
                .map(|(_, part)| part);
            control.unwrap_or(WindowPart::TitleBar)
        } else {
            WindowPart::Content
        };
        Some(part)
    }
}

/// Terminal area a content rectangle occupies once clipped to `bounds`.
pub fn visible_content(decorator: &dyn WindowDecorator, rect: CellRect, bounds: Rect) -> Rect {
    decorator.content_rect(rect).clip(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: CellRect = CellRect {
        x: 10,
        y: 5,
        width: 30,
        height: 12,
    };

    #[test]
    fn borders_map_to_resize_directions() {
        let d = RetroDecorator;
        let hit = |c, r| d.hit_test(RECT, c, r);
        assert_eq!(hit(10, 5), Some(WindowPart::Resize(ResizeDirection::NW)));
        assert_eq!(hit(39, 5), Some(WindowPart::Resize(ResizeDirection::NE)));
        assert_eq!(hit(20, 5), Some(WindowPart::Resize(ResizeDirection::N)));
        assert_eq!(hit(10, 16), Some(WindowPart::Resize(ResizeDirection::SW)));
        assert_eq!(hit(39, 16), Some(WindowPart::Resize(ResizeDirection::SE)));
        assert_eq!(hit(25, 16), Some(WindowPart::Resize(ResizeDirection::S)));
        assert_eq!(hit(10, 9), Some(WindowPart::Resize(ResizeDirection::W)));
        assert_eq!(hit(39, 9), Some(WindowPart::Resize(ResizeDirection::E)));
        assert_eq!(hit(9, 9), None);
    }

    #[test]
    fn title_bar_controls_sit_right_aligned() {
        let d = RetroDecorator;
        // right border at column 39; close occupies 36..=38
        assert_eq!(d.hit_test(RECT, 38, 6), Some(WindowPart::Close));
        assert_eq!(d.hit_test(RECT, 36, 6), Some(WindowPart::Close));
        assert_eq!(d.hit_test(RECT, 35, 6), Some(WindowPart::Maximize));
        assert_eq!(d.hit_test(RECT, 30, 6), Some(WindowPart::Minimize));
        assert_eq!(d.hit_test(RECT, 29, 6), Some(WindowPart::TitleBar));
        assert_eq!(d.hit_test(RECT, 12, 6), Some(WindowPart::TitleBar));
        assert_eq!(d.hit_test(RECT, 12, 8), Some(WindowPart::Content));
    }

    #[test]
    fn content_rect_excludes_chrome() {
        let inner = RetroDecorator.content_rect(RECT);
        assert_eq!(
            inner,
            CellRect {
                x: 11,
                y: 7,
                width: 28,
                height: 9
            }
        );
    }
}
