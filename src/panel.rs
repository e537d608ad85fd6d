//! The taskbar row: start button, one button per open window, clock.

use chrono::Timelike;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::geometry::rect_contains;
use crate::scene::Scene;
use crate::surface::ButtonHandle;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

const START_LABEL: &str = " ⊞ Start ";
const MAX_BUTTON_LABEL: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit {
    Start,
    Button(ButtonHandle),
}

/// `h:mm AM/PM` with no leading zero on the hour.
pub fn format_clock<T: Timelike>(time: &T) -> String {
    let (pm, hour) = time.hour12();
    format!(
        "{hour}:{minute:02} {suffix}",
        minute = time.minute(),
        suffix = if pm { "PM" } else { "AM" }
    )
}

#[derive(Debug, Default)]
pub struct Panel {
    area: Rect,
    start_rect: Option<Rect>,
    button_hits: Vec<(ButtonHandle, Rect)>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `area` into the desktop above and the one-row taskbar below.
    pub fn split_area(&mut self, area: Rect) -> (Rect, Rect) {
        let bar_h = 1u16.min(area.height);
        let desktop = Rect {
            height: area.height - bar_h,
            ..area
        };
        let bar = Rect {
            y: area.y + area.height - bar_h,
            height: bar_h,
            ..area
        };
        self.area = bar;
        (desktop, bar)
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<PanelHit> {
        if !rect_contains(self.area, column, row) {
            return None;
        }
        if self
            .start_rect
            .is_some_and(|r| rect_contains(r, column, row))
        {
            return Some(PanelHit::Start);
        }
        self.button_hits
            .iter()
            .find(|(_, r)| rect_contains(*r, column, row))
            .map(|(button, _)| PanelHit::Button(*button))
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, scene: &Scene, start_open: bool, clock: &str) {
        self.start_rect = None;
        self.button_hits.clear();
        let area = self.area;
        let bounds = area.intersection(frame.area());
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(crate::theme::panel_bg())
            .fg(crate::theme::panel_fg());
        frame.fill(bounds, base);

        let clock_width = clock.chars().count() as u16 + 2;
        let max_x = bounds.right().saturating_sub(clock_width);
        let y = bounds.y;
        let mut x = bounds.x;

        let start_style = if start_open {
            base.bg(crate::theme::panel_active_bg())
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            base.add_modifier(Modifier::BOLD)
        };
        let start_width = START_LABEL.chars().count() as u16;
        safe_set_string(frame.buffer_mut(), bounds, x, y, START_LABEL, start_style);
        self.start_rect = Some(Rect::new(x, y, start_width.min(bounds.width), 1));
        x = x.saturating_add(start_width + 1);

        for (handle, node) in scene.taskbar_buttons() {
            let label = truncate_to_width(&node.label, MAX_BUTTON_LABEL);
            let chunk = format!("[ {label} ]");
            let width = chunk.chars().count() as u16;
            if x.saturating_add(width) > max_x {
                break;
            }
            let style = if node.active {
                Style::default()
                    .bg(crate::theme::panel_active_bg())
                    .fg(crate::theme::panel_active_fg())
                    .add_modifier(Modifier::BOLD)
            } else {
                base
            };
            safe_set_string(frame.buffer_mut(), bounds, x, y, &chunk, style);
            self.button_hits.push((handle, Rect::new(x, y, width, 1)));
            x = x.saturating_add(width + 1);
        }

        let clock_x = bounds.right().saturating_sub(clock_width) + 1;
        safe_set_string(frame.buffer_mut(), bounds, clock_x, y, clock, base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DesktopRect;
    use crate::surface::Surface;
    use chrono::NaiveTime;
    use ratatui::buffer::Buffer;

    #[test]
    fn clock_uses_twelve_hour_format() {
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).map(|t| format_clock(&t));
        assert_eq!(at(0, 5).as_deref(), Some("12:05 AM"));
        assert_eq!(at(9, 30).as_deref(), Some("9:30 AM"));
        assert_eq!(at(12, 0).as_deref(), Some("12:00 PM"));
        assert_eq!(at(23, 59).as_deref(), Some("11:59 PM"));
    }

    #[test]
    fn buttons_follow_creation_order_and_hit_test() {
        let mut scene = Scene::new();
        let a = scene.create_window("About Me", DesktopRect::default());
        let b = scene.create_window("Contact", DesktopRect::default());
        let ba = scene.create_taskbar_button(a, "About Me");
        let bb = scene.create_taskbar_button(b, "Contact");
        scene.set_button_active(bb, true);

        let screen = Rect::new(0, 0, 80, 10);
        let mut buf = Buffer::empty(screen);
        let mut frame = UiFrame::from_parts(screen, &mut buf);
        let mut panel = Panel::new();
        let (desktop, bar) = panel.split_area(screen);
        assert_eq!(desktop.height, 9);
        assert_eq!(bar.y, 9);
        panel.render(&mut frame, &scene, false, "9:30 AM");

        assert_eq!(panel.hit_test(1, 9), Some(PanelHit::Start));
        let first = panel.button_hits[0].1;
        let second = panel.button_hits[1].1;
        assert!(first.x < second.x);
        assert_eq!(panel.hit_test(first.x, 9), Some(PanelHit::Button(ba)));
        assert_eq!(panel.hit_test(second.x + 1, 9), Some(PanelHit::Button(bb)));
        assert_eq!(panel.hit_test(1, 3), None);

        let row: String = (70..80)
            .map(|x| buf.cell((x, 9)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        assert!(row.contains("9:30 AM"));
    }
}
