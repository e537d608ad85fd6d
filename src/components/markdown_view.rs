use crossterm::event::KeyCode;
use pulldown_cmark::{Event as MdEvent, HeadingLevel, Options, Parser, Tag};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use super::{Component, ComponentContext, ContentInput, EventResult};
use crate::ui::UiFrame;

/// Scrollable markdown page: static pages and blog posts.
pub struct MarkdownView<'a> {
    source: &'a str,
    scroll: &'a mut u16,
}

impl<'a> MarkdownView<'a> {
    pub fn new(source: &'a str, scroll: &'a mut u16) -> Self {
        Self { source, scroll }
    }

    fn max_scroll(&self) -> u16 {
        let lines = markdown_to_text(self.source).lines.len();
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (*self.scroll as i32 + delta).clamp(0, self.max_scroll() as i32);
        *self.scroll = next as u16;
    }
}

impl Component for MarkdownView<'_> {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        render(frame, area, self.source, *self.scroll);
    }

    fn handle_input(
        &mut self,
        input: &ContentInput,
        area: Rect,
        _ctx: &ComponentContext,
    ) -> EventResult {
        let page = area.height.max(1) as i32;
        match input {
            ContentInput::Scroll(delta) => self.scroll_by(*delta as i32),
            ContentInput::Key(key) => match key.code {
                KeyCode::Up => self.scroll_by(-1),
                KeyCode::Down => self.scroll_by(1),
                KeyCode::PageUp => self.scroll_by(-page),
                KeyCode::PageDown => self.scroll_by(page),
                KeyCode::Home => *self.scroll = 0,
                KeyCode::End => *self.scroll = self.max_scroll(),
                _ => return EventResult::Ignored,
            },
            ContentInput::Click { .. } => return EventResult::Ignored,
        }
        EventResult::Consumed
    }
}

pub fn render(frame: &mut UiFrame<'_>, area: Rect, source: &str, scroll: u16) {
    let style = Style::default()
        .bg(crate::theme::window_bg())
        .fg(crate::theme::window_fg());
    let paragraph = Paragraph::new(markdown_to_text(source))
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Convert markdown into styled terminal lines. Headings are bold (and
/// underlined for the top two levels), list items get bullets or numbers,
/// links are colored and followed by their target.
pub fn markdown_to_text(raw: &str) -> Text<'static> {
    let parser = Parser::new_ext(raw, Options::all());

    let mut lines: Vec<Vec<Span<'static>>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut list_start: Vec<Option<u64>> = Vec::new();
    let mut list_count: Vec<u64> = Vec::new();

    #[derive(Debug, Clone, Copy)]
    enum TagKind {
        Strong,
        Emphasis,
        Heading,
        List,
        Item,
        CodeBlock,
        Paragraph,
        Link,
        Other,
    }
    let mut tag_stack: Vec<TagKind> = Vec::new();
    let mut link_targets: Vec<String> = Vec::new();
    let mut bold = false;
    let mut italic = false;
    let mut underline = false;
    let mut in_code_block = false;

    for ev in parser {
        match ev {
            MdEvent::Start(tag) => match tag {
                Tag::Strong => {
                    tag_stack.push(TagKind::Strong);
                    bold = true;
                }
                Tag::Emphasis => {
                    tag_stack.push(TagKind::Emphasis);
                    italic = true;
                }
                Tag::List(start) => {
                    tag_stack.push(TagKind::List);
                    list_start.push(start);
                    list_count.push(0);
                }
                Tag::Item => {
                    tag_stack.push(TagKind::Item);
                    if let Some(last) = list_count.last_mut() {
                        *last = last.saturating_add(1);
                    }
                    let indent = "  ".repeat(list_count.len().saturating_sub(1));
                    let bullet = match list_start.last().copied().flatten() {
                        Some(start) => {
                            let idx = list_count.last().copied().unwrap_or(1);
                            format!("{indent}{}. ", start + idx - 1)
                        }
                        None => format!("{indent}• "),
                    };
                    current.push(Span::raw(bullet));
                }
                Tag::CodeBlock(_) => {
                    tag_stack.push(TagKind::CodeBlock);
                    in_code_block = true;
                }
                Tag::Paragraph => tag_stack.push(TagKind::Paragraph),
                Tag::Heading { level, .. } => {
                    tag_stack.push(TagKind::Heading);
                    bold = true;
                    underline = matches!(level, HeadingLevel::H1 | HeadingLevel::H2);
                }
                Tag::Link { dest_url, .. } => {
                    tag_stack.push(TagKind::Link);
                    link_targets.push(dest_url.to_string());
                }
                _ => tag_stack.push(TagKind::Other),
            },
            MdEvent::End(_) => {
                let Some(kind) = tag_stack.pop() else {
                    continue;
                };
                match kind {
                    TagKind::Strong => bold = false,
                    TagKind::Emphasis => italic = false,
                    TagKind::Item => {
                        if !current.is_empty() {
                            lines.push(std::mem::take(&mut current));
                        }
                    }
                    TagKind::List => {
                        list_start.pop();
                        list_count.pop();
                        if !tag_stack.iter().any(|k| matches!(k, TagKind::Item)) {
                            lines.push(Vec::new());
                        }
                    }
                    TagKind::CodeBlock => {
                        in_code_block = false;
                        if !current.is_empty() {
                            lines.push(std::mem::take(&mut current));
                        }
                        lines.push(Vec::new());
                    }
                    TagKind::Paragraph => {
                        lines.push(std::mem::take(&mut current));
                        if !tag_stack.iter().any(|k| matches!(k, TagKind::Item)) {
                            lines.push(Vec::new());
                        }
                    }
                    TagKind::Heading => {
                        bold = false;
                        underline = false;
                        lines.push(std::mem::take(&mut current));
                        lines.push(Vec::new());
                    }
                    TagKind::Link => {
                        if let Some(target) = link_targets.pop()
                            && !target.is_empty()
                        {
                            current.push(Span::styled(
                                format!(" <{target}>"),
                                Style::default().fg(Color::DarkGray),
                            ));
                        }
                    }
                    TagKind::Other => {}
                }
            }
            MdEvent::Text(text) => {
                if in_code_block {
                    let code = Style::default().fg(Color::Magenta);
                    for (i, part) in text.split('\n').enumerate() {
                        if i > 0 {
                            lines.push(std::mem::take(&mut current));
                        }
                        if !part.is_empty() {
                            current.push(Span::styled(part.to_string(), code));
                        }
                    }
                    continue;
                }
                let mut style = Style::default();
                if bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if italic {
                    style = style.add_modifier(Modifier::ITALIC);
                }
                if underline {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                if !link_targets.is_empty() {
                    style = style
                        .fg(crate::theme::link_fg())
                        .add_modifier(Modifier::UNDERLINED);
                }
                current.push(Span::styled(text.to_string(), style));
            }
            MdEvent::Code(text) => {
                current.push(Span::styled(
                    text.to_string(),
                    Style::default().fg(Color::Magenta),
                ));
            }
            MdEvent::SoftBreak => current.push(Span::raw(" ")),
            MdEvent::HardBreak => lines.push(std::mem::take(&mut current)),
            MdEvent::Rule => {
                lines.push(vec![Span::raw("─".repeat(24))]);
                lines.push(Vec::new());
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        lines.push(Vec::new());
    }

    Text::from(lines.into_iter().map(Line::from).collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        ## Project 2: Retro Game Collection

        A collection of simple retro-style games.

        - Snake
        - Pong

        1. first
        2. second

        See [the repo](https://example.com/games).
    "};

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn renders_headings_lists_and_links() {
        let lines = plain(&markdown_to_text(SAMPLE));
        assert_eq!(lines[0], "Project 2: Retro Game Collection");
        assert!(lines.contains(&"• Snake".to_string()));
        assert!(lines.contains(&"• Pong".to_string()));
        assert!(lines.contains(&"1. first".to_string()));
        assert!(lines.contains(&"2. second".to_string()));
        assert!(lines.iter().any(|l| l == "See the repo <https://example.com/games>."));
    }

    #[test]
    fn heading_is_bold() {
        let text = markdown_to_text("## Hello");
        let span = &text.lines[0].spans[0];
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn scroll_stays_within_content() {
        let mut scroll = 0;
        let area = Rect::new(0, 0, 20, 3);
        let ctx = ComponentContext::new(true);
        let mut view = MarkdownView::new(SAMPLE, &mut scroll);
        let up = ContentInput::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(view.handle_input(&up, area, &ctx), EventResult::Consumed);
        view.handle_input(&ContentInput::Scroll(1000), area, &ctx);
        let max = view.max_scroll();
        assert!(max > 0);
        assert_eq!(*view.scroll, max);
        view.handle_input(&ContentInput::Scroll(-3), area, &ctx);
        assert_eq!(*view.scroll, max - 3);
    }
}
