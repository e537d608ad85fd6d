use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{Component, ComponentContext, ContentInput, EventResult};
use crate::constants::LOADING_TEXT;
use crate::content::{Folder, FolderItems};
use crate::ui::UiFrame;

const FIRST_ENTRY_ROW: u16 = 2;
const ENTRY_GLYPH: &str = "▤ ";

impl Folder {
    /// Entry drawn on terminal row `row` of `area`, if any.
    fn entry_at(&self, area: Rect, row: u16) -> Option<usize> {
        let index = row.checked_sub(area.y + FIRST_ENTRY_ROW)? as usize;
        (index < self.entries().len()).then_some(index)
    }

    fn open_selected(&self) -> EventResult {
        match self.entries().get(self.selected) {
            Some(title) => EventResult::OpenWindow(title.clone()),
            None => EventResult::Ignored,
        }
    }
}

impl Component for Folder {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let body = Style::default()
            .bg(crate::theme::window_bg())
            .fg(crate::theme::window_fg());
        let (x, y) = (area.x as i32, area.y as i32);
        frame.set_string_signed(x, y, &self.heading, body.add_modifier(Modifier::BOLD));

        let first = y + FIRST_ENTRY_ROW as i32;
        match &self.items {
            FolderItems::Loading => frame.set_string_signed(x, first, LOADING_TEXT, body),
            FolderItems::Failed(message) => {
                frame.set_string_signed(x, first, message, body.fg(crate::theme::error_fg()));
            }
            FolderItems::Loaded(entries) => {
                for (index, title) in entries.iter().enumerate() {
                    let row = first + index as i32;
                    if row >= area.bottom() as i32 {
                        break;
                    }
                    let style = if ctx.focused() && index == self.selected {
                        Style::default()
                            .bg(crate::theme::menu_selected_bg())
                            .fg(crate::theme::menu_selected_fg())
                    } else {
                        body
                    };
                    let label = crate::ui::truncate_to_width(
                        &format!("{ENTRY_GLYPH}{title}"),
                        area.width as usize,
                    );
                    frame.set_string_signed(x, row, &label, style);
                }
            }
        }
    }

    fn handle_input(
        &mut self,
        input: &ContentInput,
        area: Rect,
        _ctx: &ComponentContext,
    ) -> EventResult {
        let count = self.entries().len();
        match input {
            ContentInput::Click { row, double, .. } => {
                let Some(index) = self.entry_at(area, *row) else {
                    return EventResult::Ignored;
                };
                self.selected = index;
                if *double {
                    self.open_selected()
                } else {
                    EventResult::Consumed
                }
            }
            ContentInput::Key(key) if count > 0 => match key.code {
                KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                    EventResult::Consumed
                }
                KeyCode::Down => {
                    self.selected = (self.selected + 1).min(count - 1);
                    EventResult::Consumed
                }
                KeyCode::Enter => self.open_selected(),
                _ => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }
}
