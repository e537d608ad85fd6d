//! Start menu and desktop context menu.

use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::content::BROWSER_TITLE;
use crate::geometry::rect_contains;
use crate::ui::UiFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenWindow(&'static str),
    ShutDown,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        label: &'static str,
        action: Option<MenuAction>,
    },
    Separator,
}

impl MenuEntry {
    const fn item(label: &'static str, action: MenuAction) -> Self {
        Self::Item {
            label,
            action: Some(action),
        }
    }

    const fn inert(label: &'static str) -> Self {
        Self::Item {
            label,
            action: None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Item { label, .. } => *label,
            Self::Separator => "",
        }
    }
}

pub const START_ENTRIES: &[MenuEntry] = &[
    MenuEntry::item("Internet Browser", MenuAction::OpenWindow(BROWSER_TITLE)),
    MenuEntry::item("Notepad", MenuAction::OpenWindow("Notepad")),
    MenuEntry::item("Settings", MenuAction::OpenWindow("Settings")),
    MenuEntry::item("Shut Down", MenuAction::ShutDown),
];

pub const CONTEXT_ENTRIES: &[MenuEntry] = &[
    MenuEntry::inert("New"),
    MenuEntry::inert("Display Properties"),
    MenuEntry::Separator,
    MenuEntry::item("Refresh", MenuAction::Refresh),
];

/// A bordered list of entries anchored at a terminal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupMenu {
    entries: &'static [MenuEntry],
    rect: Rect,
    hovered: Option<usize>,
}

impl PopupMenu {
    fn size(entries: &[MenuEntry]) -> (u16, u16) {
        let widest = entries
            .iter()
            .map(|e| e.label().chars().count())
            .max()
            .unwrap_or(0);
        (widest as u16 + 4, entries.len() as u16 + 2)
    }

    /// Place the menu with its top-left corner at `(column, row)`, shifted
    /// back inside `bounds` when it would overflow.
    pub fn at(entries: &'static [MenuEntry], column: u16, row: u16, bounds: Rect) -> Self {
        let (width, height) = Self::size(entries);
        let x = column.min(bounds.right().saturating_sub(width)).max(bounds.x);
        let y = row.min(bounds.bottom().saturating_sub(height)).max(bounds.y);
        Self {
            entries,
            rect: Rect::new(x, y, width, height),
            hovered: None,
        }
    }

    /// Place the menu so its bottom edge sits on `bottom` at the left of
    /// `bounds`.
    pub fn above(entries: &'static [MenuEntry], bottom: u16, bounds: Rect) -> Self {
        let (_, height) = Self::size(entries);
        Self::at(entries, bounds.x, bottom.saturating_sub(height), bounds)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| matches!(e, MenuEntry::Item { .. }))
            .map(MenuEntry::label)
            .collect()
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.rect, column, row)
    }

    pub fn entry_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.contains(column, row) {
            return None;
        }
        let index = row.checked_sub(self.rect.y + 1)? as usize;
        (index < self.entries.len()).then_some(index)
    }

    pub fn hover(&mut self, column: u16, row: u16) {
        self.hovered = self.entry_at(column, row);
    }

    fn action_at(&self, column: u16, row: u16) -> Option<MenuAction> {
        match self.entries.get(self.entry_at(column, row)?)? {
            MenuEntry::Item { action, .. } => *action,
            MenuEntry::Separator => None,
        }
    }

    fn is_item(&self, column: u16, row: u16) -> bool {
        self.entry_at(column, row)
            .and_then(|i| self.entries.get(i))
            .is_some_and(|e| matches!(e, MenuEntry::Item { .. }))
    }

    pub fn render(&self, frame: &mut UiFrame<'_>) {
        let style = Style::default()
            .bg(crate::theme::menu_bg())
            .fg(crate::theme::menu_fg());
        let selected = Style::default()
            .bg(crate::theme::menu_selected_bg())
            .fg(crate::theme::menu_selected_fg());
        let r = self.rect;
        let (x0, y0) = (r.x as i32, r.y as i32);
        let (x1, y1) = (r.right() as i32 - 1, r.bottom() as i32 - 1);
        frame.fill(r, style);
        for x in x0..=x1 {
            frame.set_cell(x, y0, "─", style);
            frame.set_cell(x, y1, "─", style);
        }
        for y in y0..=y1 {
            frame.set_cell(x0, y, "│", style);
            frame.set_cell(x1, y, "│", style);
        }
        frame.set_cell(x0, y0, "┌", style);
        frame.set_cell(x1, y0, "┐", style);
        frame.set_cell(x0, y1, "└", style);
        frame.set_cell(x1, y1, "┘", style);

        for (index, entry) in self.entries.iter().enumerate() {
            let y = y0 + 1 + index as i32;
            match entry {
                MenuEntry::Separator => {
                    for x in x0 + 1..x1 {
                        frame.set_cell(x, y, "─", style);
                    }
                }
                MenuEntry::Item { label, action } => {
                    let entry_style = if self.hovered == Some(index) {
                        selected
                    } else if action.is_none() {
                        style.fg(crate::theme::menu_disabled_fg())
                    } else {
                        style
                    };
                    let text = format!(" {label:<width$} ", width = r.width as usize - 4);
                    frame.set_string_signed(x0 + 1, y, &text, entry_style);
                }
            }
        }
    }
}

/// What a click did once the menus have seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The click was not for a menu; any open menu it dismissed is closed.
    PassThrough,
    Consumed,
    Action(MenuAction),
}

#[derive(Debug, Default)]
pub struct Menus {
    start: Option<PopupMenu>,
    context: Option<PopupMenu>,
}

impl Menus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<&PopupMenu> {
        self.start.as_ref()
    }

    pub fn context(&self) -> Option<&PopupMenu> {
        self.context.as_ref()
    }

    pub fn is_start_open(&self) -> bool {
        self.start.is_some()
    }

    /// Open the start menu above the taskbar row, or close it if open.
    pub fn toggle_start(&mut self, taskbar_row: u16, bounds: Rect) {
        self.start = match self.start {
            Some(_) => None,
            None => Some(PopupMenu::above(START_ENTRIES, taskbar_row, bounds)),
        };
    }

    /// Open the desktop context menu at the pointer, replacing any previous
    /// one.
    pub fn open_context(&mut self, column: u16, row: u16, bounds: Rect) {
        self.context = Some(PopupMenu::at(CONTEXT_ENTRIES, column, row, bounds));
    }

    pub fn close_all(&mut self) -> bool {
        let any = self.start.is_some() || self.context.is_some();
        self.start = None;
        self.context = None;
        any
    }

    pub fn hover(&mut self, column: u16, row: u16) {
        for menu in [&mut self.start, &mut self.context].into_iter().flatten() {
            menu.hover(column, row);
        }
    }

    /// Route a left click. `on_start_button` tells whether it landed on the
    /// taskbar's start button; `taskbar_row` and `bounds` place a newly
    /// opened start menu.
    pub fn click(
        &mut self,
        column: u16,
        row: u16,
        on_start_button: bool,
        taskbar_row: u16,
        bounds: Rect,
    ) -> MenuOutcome {
        if let Some(context) = self.context.take()
            && context.contains(column, row)
        {
            return match context.action_at(column, row) {
                Some(action) => MenuOutcome::Action(action),
                None => MenuOutcome::Consumed,
            };
        }

        if on_start_button {
            self.toggle_start(taskbar_row, bounds);
            return MenuOutcome::Consumed;
        }

        if let Some(start) = &self.start {
            if !start.contains(column, row) {
                self.start = None;
                return MenuOutcome::PassThrough;
            }
            if !start.is_item(column, row) {
                return MenuOutcome::Consumed;
            }
            let action = start.action_at(column, row);
            self.start = None;
            return action.map_or(MenuOutcome::Consumed, MenuOutcome::Action);
        }

        MenuOutcome::PassThrough
    }
}
