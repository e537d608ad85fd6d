//! Widgets that draw a window's content region and react to input inside it.

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::widgets::{Paragraph, Wrap};

use crate::content::WindowContent;
use crate::ui::UiFrame;

pub mod browser;
pub mod contact_form;
pub mod folder_view;
pub mod markdown_view;

pub use browser::BrowserState;
pub use contact_form::{ContactForm, FormField};
pub use markdown_view::MarkdownView;

/// UI state a component may need while rendering or handling input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentContext {
    focused: bool,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self { focused }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }
}

/// Input routed to a window's content region. Click positions are terminal
/// cells; `double` is set when the press completes a double-click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentInput {
    Click { column: u16, row: u16, double: bool },
    Key(KeyEvent),
    Scroll(i16),
}

/// What a component asks the desktop to do after handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    Ignored,
    Consumed,
    /// Open (or focus) the window with this title.
    OpenWindow(String),
    /// Hand this address to the system browser.
    OpenUrl(String),
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

pub trait Component {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_input(
        &mut self,
        _input: &ContentInput,
        _area: Rect,
        _ctx: &ComponentContext,
    ) -> EventResult {
        EventResult::Ignored
    }
}

/// The content region of one window: whatever `WindowContent` it holds plus
/// the scroll offset of text content.
pub struct ContentPane<'a> {
    pub content: &'a mut WindowContent,
    pub scroll: &'a mut u16,
}

impl<'a> ContentPane<'a> {
    pub fn new(content: &'a mut WindowContent, scroll: &'a mut u16) -> Self {
        Self { content, scroll }
    }
}

impl Component for ContentPane<'_> {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        render_content(frame, area, self.content, *self.scroll, ctx);
    }

    fn handle_input(
        &mut self,
        input: &ContentInput,
        area: Rect,
        ctx: &ComponentContext,
    ) -> EventResult {
        match self.content {
            WindowContent::Markdown(source) => {
                let mut view = MarkdownView::new(source, self.scroll);
                view.handle_input(input, area, ctx)
            }
            WindowContent::Folder(folder) => folder.handle_input(input, area, ctx),
            WindowContent::ContactForm(form) => form.handle_input(input, area, ctx),
            WindowContent::Browser(browser) => browser.handle_input(input, area, ctx),
            WindowContent::Loading | WindowContent::Error(_) => EventResult::Ignored,
        }
    }
}

/// Draw `content` into `area`, the content region of a window.
pub fn render_content(
    frame: &mut UiFrame<'_>,
    area: Rect,
    content: &WindowContent,
    scroll: u16,
    ctx: &ComponentContext,
) {
    let body = Style::default()
        .bg(crate::theme::window_bg())
        .fg(crate::theme::window_fg());
    frame.fill(area, body);
    match content {
        WindowContent::Loading => {
            frame.render_widget(Paragraph::new(crate::constants::LOADING_TEXT).style(body), area);
        }
        WindowContent::Markdown(source) => markdown_view::render(frame, area, source, scroll),
        WindowContent::Folder(folder) => folder.render(frame, area, ctx),
        WindowContent::ContactForm(form) => form.render(frame, area, ctx),
        WindowContent::Browser(browser) => browser.render(frame, area, ctx),
        WindowContent::Error(message) => {
            let paragraph = Paragraph::new(message.as_str())
                .style(body)
                .fg(crate::theme::error_fg())
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
    }
}
