use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{Component, ComponentContext, ContentInput, EventResult};
use crate::ui::UiFrame;

pub const FORM_HEADING: &str = "Contact Me";
pub const SENT_TEXT: &str = "Message sent!";
const SEND_LABEL: &str = "[ Send ]";
const MESSAGE_ROWS: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Message,
    Send,
}

impl FormField {
    const ORDER: [FormField; 4] = [Self::Name, Self::Email, Self::Message, Self::Send];

    fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Row offset of the field's label and of its first input row.
    fn rows(self) -> (u16, u16) {
        match self {
            Self::Name => (2, 3),
            Self::Email => (5, 6),
            Self::Message => (8, 9),
            Self::Send => (9 + MESSAGE_ROWS + 1, 9 + MESSAGE_ROWS + 1),
        }
    }

    fn height(self) -> u16 {
        match self {
            Self::Message => MESSAGE_ROWS,
            _ => 1,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name:",
            Self::Email => "Email:",
            Self::Message => "Message:",
            Self::Send => "",
        }
    }
}

/// The contact window. Nothing is transmitted; sending only confirms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub focus: FormField,
    pub status: Option<String>,
}

impl ContactForm {
    fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Message => Some(&mut self.message),
            FormField::Send => None,
        }
    }

    fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
            FormField::Send => "",
        }
    }

    pub fn submit(&mut self) -> EventResult {
        self.status = Some(SENT_TEXT.to_string());
        tracing::debug!(
            name_len = self.name.len(),
            email_len = self.email.len(),
            message_len = self.message.len(),
            "contact form submitted"
        );
        EventResult::Consumed
    }

    fn field_at(area: Rect, row: u16) -> Option<FormField> {
        let offset = row.checked_sub(area.y)?;
        FormField::ORDER.into_iter().find(|field| {
            let (_, first) = field.rows();
            offset >= first && offset < first + field.height()
        })
    }
}

impl Component for ContactForm {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let body = Style::default()
            .bg(crate::theme::window_bg())
            .fg(crate::theme::window_fg());
        let (x, y) = (area.x as i32, area.y as i32);
        frame.set_string_signed(x, y, FORM_HEADING, body.add_modifier(Modifier::BOLD));

        let input_width = area.width.saturating_sub(1).max(1);
        for field in [FormField::Name, FormField::Email, FormField::Message] {
            let (label_row, first) = field.rows();
            frame.set_string_signed(x, y + label_row as i32, field.label(), body);
            let focused = ctx.focused() && self.focus == field;
            let input_style = Style::default().fg(crate::theme::window_fg()).bg(if focused {
                crate::theme::input_focused_bg()
            } else {
                crate::theme::input_bg()
            });
            let value = self.field(field);
            let mut rows: Vec<&str> = value.split('\n').collect();
            if rows.len() > field.height() as usize {
                rows = rows.split_off(rows.len() - field.height() as usize);
            }
            for offset in 0..field.height() {
                let line_y = y + (first + offset) as i32;
                frame.fill(
                    Rect::new(area.x, line_y.max(0) as u16, input_width, 1),
                    input_style,
                );
                if let Some(text) = rows.get(offset as usize) {
                    let text = tail_to_width(text, input_width as usize);
                    frame.set_string_signed(x, line_y, &text, input_style);
                }
            }
        }

        let (send_row, _) = FormField::Send.rows();
        let send_style = if ctx.focused() && self.focus == FormField::Send {
            Style::default()
                .bg(crate::theme::menu_selected_bg())
                .fg(crate::theme::menu_selected_fg())
        } else {
            body
        };
        frame.set_string_signed(x, y + send_row as i32, SEND_LABEL, send_style);
        if let Some(status) = &self.status {
            let status_x = x + SEND_LABEL.len() as i32 + 2;
            frame.set_string_signed(status_x, y + send_row as i32, status, body);
        }
    }

    fn handle_input(
        &mut self,
        input: &ContentInput,
        area: Rect,
        _ctx: &ComponentContext,
    ) -> EventResult {
        match input {
            ContentInput::Click { column, row, .. } => {
                let Some(field) = Self::field_at(area, *row) else {
                    return EventResult::Ignored;
                };
                if field == FormField::Send {
                    let end = area.x + SEND_LABEL.chars().count() as u16;
                    if *column < area.x || *column >= end {
                        return EventResult::Ignored;
                    }
                    self.focus = field;
                    return self.submit();
                }
                self.focus = field;
                EventResult::Consumed
            }
            ContentInput::Key(key) => {
                match key.code {
                    KeyCode::Tab => self.focus = self.focus.next(),
                    KeyCode::BackTab => self.focus = self.focus.previous(),
                    KeyCode::Enter => match self.focus {
                        FormField::Send => return self.submit(),
                        FormField::Message => self.message.push('\n'),
                        other => self.focus = other.next(),
                    },
                    KeyCode::Backspace => {
                        if let Some(value) = self.field_mut(self.focus) {
                            value.pop();
                        }
                    }
                    KeyCode::Char(c)
                        if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                    {
                        match self.field_mut(self.focus) {
                            Some(value) => value.push(c),
                            None => return EventResult::Ignored,
                        }
                    }
                    _ => return EventResult::Ignored,
                }
                EventResult::Consumed
            }
            ContentInput::Scroll(_) => EventResult::Ignored,
        }
    }
}

/// Last `width` characters of `value`, so the caret end stays visible.
fn tail_to_width(value: &str, width: usize) -> String {
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    const AREA: Rect = Rect {
        x: 2,
        y: 4,
        width: 40,
        height: 20,
    };

    fn key(code: KeyCode) -> ContentInput {
        ContentInput::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(form: &mut ContactForm, text: &str) {
        let ctx = ComponentContext::new(true);
        for c in text.chars() {
            form.handle_input(&key(KeyCode::Char(c)), AREA, &ctx);
        }
    }

    #[test]
    fn typing_fills_focused_field_and_tab_advances() {
        let mut form = ContactForm::default();
        let ctx = ComponentContext::new(true);
        type_text(&mut form, "Ada");
        form.handle_input(&key(KeyCode::Tab), AREA, &ctx);
        type_text(&mut form, "ada@example.com");
        form.handle_input(&key(KeyCode::Backspace), AREA, &ctx);
        assert_eq!(form.name, "Ada");
        assert_eq!(form.email, "ada@example.co");
        assert_eq!(form.focus, FormField::Email);
        form.handle_input(&key(KeyCode::BackTab), AREA, &ctx);
        assert_eq!(form.focus, FormField::Name);
    }

    #[test]
    fn clicking_send_confirms_without_clearing() {
        let mut form = ContactForm::default();
        let ctx = ComponentContext::new(true);
        type_text(&mut form, "Ada");
        let (send_row, _) = FormField::Send.rows();
        let click = ContentInput::Click {
            column: AREA.x + 1,
            row: AREA.y + send_row,
            double: false,
        };
        assert_eq!(form.handle_input(&click, AREA, &ctx), EventResult::Consumed);
        assert_eq!(form.status.as_deref(), Some(SENT_TEXT));
        assert_eq!(form.name, "Ada");
    }

    #[test]
    fn clicking_message_area_focuses_it() {
        let mut form = ContactForm::default();
        let ctx = ComponentContext::new(true);
        let click = ContentInput::Click {
            column: AREA.x + 3,
            row: AREA.y + 11,
            double: false,
        };
        form.handle_input(&click, AREA, &ctx);
        assert_eq!(form.focus, FormField::Message);
        form.handle_input(&key(KeyCode::Enter), AREA, &ctx);
        type_text(&mut form, "hi");
        assert_eq!(form.message, "\nhi");
    }

    #[test]
    fn enter_on_send_submits() {
        let mut form = ContactForm {
            focus: FormField::Send,
            ..ContactForm::default()
        };
        let ctx = ComponentContext::new(true);
        form.handle_input(&key(KeyCode::Enter), AREA, &ctx);
        assert_eq!(form.status.as_deref(), Some(SENT_TEXT));
    }
}
