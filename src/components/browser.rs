use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Paragraph, Wrap};

use super::{Component, ComponentContext, ContentInput, EventResult};
use crate::ui::UiFrame;

pub const DEFAULT_ADDRESS: &str = "https://";
pub const BLANK_PAGE: &str = "about:blank";

const BACK_LABEL: &str = "[←]";
const FORWARD_LABEL: &str = "[→]";
const REFRESH_LABEL: &str = "[↻]";
const GO_LABEL: &str = "[Go]";
const ADDRESS_X: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToolbarHit {
    Back,
    Forward,
    Refresh,
    Address,
    Go,
}

/// Navigation state of the browser window. Pages are not rendered in the
/// terminal; every navigation hands its address to the system browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    pub address: String,
    pub editing: bool,
    history: Vec<String>,
    position: Option<usize>,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            editing: false,
            history: Vec::new(),
            position: None,
        }
    }
}

impl BrowserState {
    pub fn current(&self) -> Option<&str> {
        self.position
            .and_then(|i| self.history.get(i))
            .map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        self.position.is_some_and(|i| i > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.position
            .is_some_and(|i| i + 1 < self.history.len())
    }

    /// Load the address bar's contents. Forward history is discarded.
    pub fn go(&mut self) -> EventResult {
        let url = self.address.trim().to_string();
        self.editing = false;
        if url.is_empty() || url == DEFAULT_ADDRESS {
            return EventResult::Consumed;
        }
        let next = self.position.map_or(0, |i| i + 1);
        self.history.truncate(next);
        self.history.push(url.clone());
        self.position = Some(next);
        self.address = url.clone();
        EventResult::OpenUrl(url)
    }

    pub fn back(&mut self) -> EventResult {
        match self.position {
            Some(i) if i > 0 => self.show(i - 1),
            _ => EventResult::Consumed,
        }
    }

    pub fn forward(&mut self) -> EventResult {
        match self.position {
            Some(i) if i + 1 < self.history.len() => self.show(i + 1),
            _ => EventResult::Consumed,
        }
    }

    pub fn refresh(&mut self) -> EventResult {
        match self.current() {
            Some(url) => EventResult::OpenUrl(url.to_string()),
            None => EventResult::Consumed,
        }
    }

    fn show(&mut self, index: usize) -> EventResult {
        self.position = Some(index);
        match self.history.get(index).cloned() {
            Some(url) => {
                self.address = url.clone();
                EventResult::OpenUrl(url)
            }
            None => EventResult::Consumed,
        }
    }

    fn go_x(area: Rect) -> u16 {
        area.right().saturating_sub(GO_LABEL.chars().count() as u16)
    }

    fn toolbar_hit(area: Rect, column: u16, row: u16) -> Option<ToolbarHit> {
        if row != area.y || column < area.x {
            return None;
        }
        let offset = column - area.x;
        match offset {
            0..=2 => Some(ToolbarHit::Back),
            3..=5 => Some(ToolbarHit::Forward),
            6..=8 => Some(ToolbarHit::Refresh),
            _ if column >= Self::go_x(area) => Some(ToolbarHit::Go),
            _ if offset >= ADDRESS_X => Some(ToolbarHit::Address),
            _ => None,
        }
    }
}

impl Component for BrowserState {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let body = Style::default()
            .bg(crate::theme::window_bg())
            .fg(crate::theme::window_fg());
        let disabled = body.fg(crate::theme::menu_disabled_fg());
        let (x, y) = (area.x as i32, area.y as i32);

        let back_style = if self.can_go_back() { body } else { disabled };
        let forward_style = if self.can_go_forward() { body } else { disabled };
        frame.set_string_signed(x, y, BACK_LABEL, back_style);
        frame.set_string_signed(x + 3, y, FORWARD_LABEL, forward_style);
        frame.set_string_signed(x + 6, y, REFRESH_LABEL, body);

        let go_x = Self::go_x(area);
        let address_width = go_x.saturating_sub(area.x + ADDRESS_X + 1);
        if address_width > 0 {
            let bg = if ctx.focused() && self.editing {
                crate::theme::input_focused_bg()
            } else {
                crate::theme::input_bg()
            };
            let input = Style::default().fg(crate::theme::window_fg()).bg(bg);
            frame.fill(Rect::new(area.x + ADDRESS_X, area.y, address_width, 1), input);
            let text = crate::ui::truncate_to_width(&self.address, address_width as usize);
            frame.set_string_signed(x + ADDRESS_X as i32, y, &text, input);
        }
        frame.set_string_signed(go_x as i32, y, GO_LABEL, body);

        let page = Rect::new(
            area.x,
            area.y.saturating_add(2),
            area.width,
            area.height.saturating_sub(2),
        );
        let message = match self.current() {
            Some(url) => format!("Opened {url} in the system browser."),
            None => BLANK_PAGE.to_string(),
        };
        frame.render_widget(
            Paragraph::new(message).style(body).wrap(Wrap { trim: true }),
            page,
        );
    }

    fn handle_input(
        &mut self,
        input: &ContentInput,
        area: Rect,
        _ctx: &ComponentContext,
    ) -> EventResult {
        match input {
            ContentInput::Click { column, row, .. } => {
                let hit = Self::toolbar_hit(area, *column, *row);
                self.editing = hit == Some(ToolbarHit::Address);
                match hit {
                    Some(ToolbarHit::Back) => self.back(),
                    Some(ToolbarHit::Forward) => self.forward(),
                    Some(ToolbarHit::Refresh) => self.refresh(),
                    Some(ToolbarHit::Go) => self.go(),
                    Some(ToolbarHit::Address) => EventResult::Consumed,
                    None => EventResult::Ignored,
                }
            }
            ContentInput::Key(key) if self.editing => match key.code {
                KeyCode::Enter => self.go(),
                KeyCode::Esc => {
                    self.editing = false;
                    EventResult::Consumed
                }
                KeyCode::Backspace => {
                    self.address.pop();
                    EventResult::Consumed
                }
                KeyCode::Char(c)
                    if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.address.push(c);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            ContentInput::Key(key) if key.modifiers.contains(KeyModifiers::ALT) => match key.code {
                KeyCode::Left => self.back(),
                KeyCode::Right => self.forward(),
                _ => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }
}
