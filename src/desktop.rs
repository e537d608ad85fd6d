//! The desktop: owns the window manager and everything drawn around it, and
//! routes terminal input to whichever element sits under the pointer.
//!
//! Mouse presses are resolved top-down: the shutdown dialog, then open menus,
//! then the taskbar, then windows from the top of the stack, then icons, and
//! finally the bare desktop.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{
    Component, ComponentContext, ContentInput, ContentPane, EventResult, render_content,
};
use crate::content::ContentLoader;
use crate::drivers::mouse::ClickTracker;
use crate::event_loop::ControlFlow;
use crate::geometry::{DesktopRect, Point};
use crate::icons::{DesktopIcons, IconPress, container_size};
use crate::menu::{MenuAction, MenuOutcome, Menus};
use crate::panel::{Panel, PanelHit};
use crate::scene::Scene;
use crate::surface::WindowHandle;
use crate::ui::{UiFrame, safe_set_string};
use crate::window::{
    Command, RetroDecorator, WindowDecorator, WindowManager, WindowPart, visible_content,
};

const SCROLL_STEP: i16 = 3;
const DIALOG_TITLE: &str = "Shut Down Windows";
const DIALOG_PROMPT: &str = "Are you sure you want to shut down?";
const DIALOG_YES: &str = "[ Yes ]";
const DIALOG_NO: &str = "[ No ]";
const DIALOG_WIDTH: u16 = 44;
const DIALOG_HEIGHT: u16 = 7;
pub const SHUTDOWN_TEXT: &str = "It is now safe to turn off your computer.";

/// Where the machine is in its shutdown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Power {
    #[default]
    Running,
    ConfirmShutdown,
    Off,
}

#[derive(Debug)]
pub struct Desktop {
    wm: WindowManager<Scene>,
    icons: DesktopIcons,
    menus: Menus,
    panel: Panel,
    decorator: RetroDecorator,
    content_clicks: ClickTracker<(WindowHandle, u16)>,
    power: Power,
    area: Rect,
    desktop_area: Rect,
    url_requests: Vec<String>,
}

impl Desktop {
    pub fn new(loader: ContentLoader) -> Self {
        Self {
            wm: WindowManager::new(Scene::new(), loader),
            icons: DesktopIcons::new(),
            menus: Menus::new(),
            panel: Panel::new(),
            decorator: RetroDecorator,
            content_clicks: ClickTracker::default(),
            power: Power::Running,
            area: Rect::default(),
            desktop_area: Rect::default(),
            url_requests: Vec::new(),
        }
    }

    pub fn windows(&self) -> &WindowManager<Scene> {
        &self.wm
    }

    pub fn windows_mut(&mut self) -> &mut WindowManager<Scene> {
        &mut self.wm
    }

    pub fn scene(&self) -> &Scene {
        self.wm.surface()
    }

    pub fn icons(&self) -> &DesktopIcons {
        &self.icons
    }

    pub fn menus(&self) -> &Menus {
        &self.menus
    }

    pub fn power(&self) -> Power {
        self.power
    }

    /// Terminal area above the taskbar.
    pub fn desktop_area(&self) -> Rect {
        self.desktop_area
    }

    /// Lay the desktop out over a terminal of `area`.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        let (desktop, _) = self.panel.split_area(area);
        self.desktop_area = desktop;
        self.wm
            .surface_mut()
            .set_bounds(DesktopRect::from_cells(desktop));
        tracing::debug!(width = area.width, height = area.height, "desktop resized");
    }

    /// Addresses the browser asked to open since the last call.
    pub fn take_url_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.url_requests)
    }

    /// Apply finished content reads. Returns how many windows changed.
    pub fn tick(&mut self) -> usize {
        self.wm.poll_content()
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) -> ControlFlow {
        match event {
            Event::Resize(width, height) => {
                self.resize(Rect::new(0, 0, *width, *height));
                ControlFlow::Continue
            }
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => {
                if self.power != Power::Off {
                    self.handle_mouse(mouse, now);
                }
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            return ControlFlow::Quit;
        }
        match self.power {
            Power::Off => return ControlFlow::Quit,
            Power::ConfirmShutdown => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.power_off(),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        self.power = Power::Running;
                    }
                    _ => {}
                }
                return ControlFlow::Continue;
            }
            Power::Running => {}
        }
        if key.code == KeyCode::Esc && self.menus.close_all() {
            return ControlFlow::Continue;
        }
        if let Some(handle) = self.wm.active() {
            self.send_to_content(handle, ContentInput::Key(*key));
        }
        ControlFlow::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        let (column, row) = (mouse.column, mouse.row);
        if self.power == Power::ConfirmShutdown {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                self.dialog_click(column, row);
            }
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.left_press(column, row, now),
            MouseEventKind::Down(MouseButton::Right) => self.right_press(column, row),
            MouseEventKind::Drag(MouseButton::Left) => {
                let pointer = Point::from_cell(column, row);
                self.wm.dispatch(Command::PointerMove(pointer));
                let container = container_size(self.desktop_area.width, self.desktop_area.height);
                self.icons.drag_to(pointer, container);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.wm.dispatch(Command::PointerUp);
                self.icons.release();
            }
            MouseEventKind::Moved => self.menus.hover(column, row),
            MouseEventKind::ScrollUp => self.scroll_at(column, row, -SCROLL_STEP),
            MouseEventKind::ScrollDown => self.scroll_at(column, row, SCROLL_STEP),
            _ => {}
        }
    }

    fn left_press(&mut self, column: u16, row: u16, now: Instant) {
        let panel_hit = self.panel.hit_test(column, row);
        let outcome = self.menus.click(
            column,
            row,
            panel_hit == Some(PanelHit::Start),
            self.panel.area().y,
            self.area,
        );
        match outcome {
            MenuOutcome::Consumed => return,
            MenuOutcome::Action(action) => {
                self.run_menu_action(action);
                return;
            }
            MenuOutcome::PassThrough => {}
        }

        if let Some(PanelHit::Button(button)) = panel_hit {
            self.wm.dispatch(Command::TaskbarClick(button));
            return;
        }
        if panel_hit.is_some() || !crate::geometry::rect_contains(self.desktop_area, column, row) {
            return;
        }

        if let Some((handle, part)) = self.window_at(column, row) {
            self.press_window(handle, part, column, row, now);
            return;
        }

        let pointer = Point::from_cell(column, row);
        if let Some(index) = self.icons.icon_at(pointer) {
            if let Some(IconPress::Open(title)) = self.icons.press(index, pointer, now) {
                self.wm.dispatch(Command::Open(title.to_string()));
            }
            return;
        }
        self.icons.clear_selection();
    }

    fn press_window(
        &mut self,
        handle: WindowHandle,
        part: WindowPart,
        column: u16,
        row: u16,
        now: Instant,
    ) {
        let pointer = Point::from_cell(column, row);
        match part {
            WindowPart::Close => {
                self.wm.dispatch(Command::Close(handle));
            }
            WindowPart::Minimize => {
                self.wm.dispatch(Command::Activate(handle));
                self.wm.dispatch(Command::ToggleMinimize(handle));
            }
            WindowPart::Maximize => {
                self.wm.dispatch(Command::Activate(handle));
                self.wm.dispatch(Command::ToggleMaximize(handle));
            }
            WindowPart::TitleBar => {
                if !self.wm.dispatch(Command::BeginTitleDrag { handle, pointer }) {
                    self.wm.dispatch(Command::Activate(handle));
                }
            }
            WindowPart::Resize(direction) => {
                let begun = self.wm.dispatch(Command::BeginResize {
                    handle,
                    direction,
                    pointer,
                });
                if !begun {
                    self.wm.dispatch(Command::Activate(handle));
                }
            }
            WindowPart::Content => {
                self.wm.dispatch(Command::Activate(handle));
                let double = self.content_clicks.press((handle, row), now);
                self.send_to_content(
                    handle,
                    ContentInput::Click {
                        column,
                        row,
                        double,
                    },
                );
            }
        }
    }

    fn right_press(&mut self, column: u16, row: u16) {
        self.menus.close_all();
        if !crate::geometry::rect_contains(self.desktop_area, column, row)
            || self.window_at(column, row).is_some()
            || self.icons.icon_at(Point::from_cell(column, row)).is_some()
        {
            return;
        }
        self.menus.open_context(column, row, self.desktop_area);
    }

    fn scroll_at(&mut self, column: u16, row: u16, delta: i16) {
        if let Some((handle, WindowPart::Content)) = self.window_at(column, row) {
            self.send_to_content(handle, ContentInput::Scroll(delta));
        }
    }

    /// Topmost visible window under the cell and the part of it that was hit.
    fn window_at(&self, column: u16, row: u16) -> Option<(WindowHandle, WindowPart)> {
        let scene = self.wm.surface();
        scene
            .visible_windows_by_z()
            .into_iter()
            .rev()
            .find_map(|(handle, _)| {
                let rect = scene.display_rect(handle)?.to_cells();
                self.decorator
                    .hit_test(rect, column, row)
                    .map(|part| (handle, part))
            })
    }

    fn content_area(&self, handle: WindowHandle) -> Option<Rect> {
        let rect = self.wm.surface().display_rect(handle)?.to_cells();
        Some(visible_content(&self.decorator, rect, self.desktop_area))
    }

    fn send_to_content(&mut self, handle: WindowHandle, input: ContentInput) {
        let Some(area) = self.content_area(handle) else {
            return;
        };
        let ctx = ComponentContext::new(self.wm.active() == Some(handle));
        let Some(node) = self.wm.surface_mut().window_mut(handle) else {
            return;
        };
        let mut pane = ContentPane::new(&mut node.content, &mut node.scroll);
        match pane.handle_input(&input, area, &ctx) {
            EventResult::OpenWindow(title) => {
                self.wm.dispatch(Command::Open(title));
            }
            EventResult::OpenUrl(url) => {
                tracing::debug!(%url, "queueing url for the system browser");
                self.url_requests.push(url);
            }
            EventResult::Consumed | EventResult::Ignored => {}
        }
    }

    fn run_menu_action(&mut self, action: MenuAction) {
        tracing::debug!(?action, "menu action");
        match action {
            MenuAction::OpenWindow(title) => {
                self.wm.dispatch(Command::Open(title.to_string()));
            }
            MenuAction::ShutDown => self.power = Power::ConfirmShutdown,
            MenuAction::Refresh => self.refresh(),
        }
    }

    /// Start over with an empty desktop, like reloading the page.
    pub fn refresh(&mut self) {
        self.wm.reset();
        self.icons.reset();
        self.menus.close_all();
        self.content_clicks.reset();
        self.url_requests.clear();
    }

    fn power_off(&mut self) {
        self.menus.close_all();
        self.power = Power::Off;
        tracing::info!("shut down");
    }

    fn dialog_click(&mut self, column: u16, row: u16) {
        let (yes, no) = dialog_buttons(dialog_rect(self.desktop_area));
        if crate::geometry::rect_contains(yes, column, row) {
            self.power_off();
        } else if crate::geometry::rect_contains(no, column, row) {
            self.power = Power::Running;
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, clock: &str) {
        if frame.area() != self.area {
            self.resize(frame.area());
        }
        if self.power == Power::Off {
            render_shutdown_screen(frame, self.area);
            return;
        }

        let desktop_area = self.desktop_area;
        frame.fill(
            desktop_area,
            Style::default().bg(crate::theme::desktop_bg()),
        );
        {
            let mut desk = UiFrame::from_parts(desktop_area, frame.buffer_mut());
            self.icons.render(&mut desk);
            let scene = self.wm.surface();
            let active = self.wm.active();
            for (handle, node) in scene.visible_windows_by_z() {
                let Some(rect) = scene.display_rect(handle) else {
                    continue;
                };
                let cells = rect.to_cells();
                let focused = active == Some(handle);
                self.decorator
                    .render_window(&mut desk, cells, &node.title, focused, node.maximized);
                let area = visible_content(&self.decorator, cells, desktop_area);
                if area.width > 0 && area.height > 0 {
                    let ctx = ComponentContext::new(focused);
                    render_content(&mut desk, area, &node.content, node.scroll, &ctx);
                }
            }
        }

        self.panel
            .render(frame, self.wm.surface(), self.menus.is_start_open(), clock);
        if let Some(menu) = self.menus.start() {
            menu.render(frame);
        }
        if let Some(menu) = self.menus.context() {
            menu.render(frame);
        }
        if self.power == Power::ConfirmShutdown {
            render_dialog(frame, desktop_area);
        }
    }
}

fn dialog_rect(desktop: Rect) -> Rect {
    let width = DIALOG_WIDTH.min(desktop.width);
    let height = DIALOG_HEIGHT.min(desktop.height);
    Rect {
        x: desktop.x + (desktop.width - width) / 2,
        y: desktop.y + (desktop.height - height) / 2,
        width,
        height,
    }
}

/// Yes and No buttons on the dialog's second-to-last row.
fn dialog_buttons(dialog: Rect) -> (Rect, Rect) {
    let row = dialog.bottom().saturating_sub(2);
    let yes_width = DIALOG_YES.chars().count() as u16;
    let no_width = DIALOG_NO.chars().count() as u16;
    let total = yes_width + 2 + no_width;
    let x = dialog.x + dialog.width.saturating_sub(total) / 2;
    (
        Rect::new(x, row, yes_width, 1),
        Rect::new(x + yes_width + 2, row, no_width, 1),
    )
}

fn render_dialog(frame: &mut UiFrame<'_>, desktop: Rect) {
    let dialog = dialog_rect(desktop);
    if dialog.width < 4 || dialog.height < 4 {
        return;
    }
    let body = Style::default()
        .bg(crate::theme::dialog_bg())
        .fg(crate::theme::dialog_fg());
    let header = Style::default()
        .bg(crate::theme::title_active_bg())
        .fg(crate::theme::title_active_fg())
        .add_modifier(Modifier::BOLD);
    frame.fill(dialog, body);
    frame.fill(Rect { height: 1, ..dialog }, header);
    let bounds = frame.area();
    let buffer = frame.buffer_mut();
    safe_set_string(buffer, bounds, dialog.x + 1, dialog.y, DIALOG_TITLE, header);
    safe_set_string(buffer, bounds, dialog.x + 2, dialog.y + 2, DIALOG_PROMPT, body);
    let (yes, no) = dialog_buttons(dialog);
    let button = body.add_modifier(Modifier::BOLD);
    safe_set_string(buffer, bounds, yes.x, yes.y, DIALOG_YES, button);
    safe_set_string(buffer, bounds, no.x, no.y, DIALOG_NO, button);
}

fn render_shutdown_screen(frame: &mut UiFrame<'_>, area: Rect) {
    let style = Style::default()
        .bg(crate::theme::shutdown_bg())
        .fg(crate::theme::shutdown_fg())
        .add_modifier(Modifier::BOLD);
    frame.fill(area, style);
    let width = SHUTDOWN_TEXT.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height / 2;
    let bounds = frame.area();
    safe_set_string(frame.buffer_mut(), bounds, x, y, SHUTDOWN_TEXT, style);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::content::{ContentError, ContentSource, WindowContent};
    use ratatui::buffer::Buffer;

    #[derive(Debug, Default)]
    struct MapSource(HashMap<String, String>);

    impl ContentSource for MapSource {
        fn fetch(&self, path: &str) -> Result<String, ContentError> {
            self.0.get(path).cloned().ok_or_else(|| ContentError::NotFound {
                path: path.to_string(),
            })
        }
    }

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 30,
    };

    fn desktop() -> Desktop {
        let loader = ContentLoader::inline(Arc::new(MapSource::default()));
        let mut desktop = Desktop::new(loader);
        desktop.resize(SCREEN);
        desktop
    }

    fn draw(desktop: &mut Desktop) -> Buffer {
        let mut buf = Buffer::empty(SCREEN);
        let mut frame = UiFrame::from_parts(SCREEN, &mut buf);
        desktop.render(&mut frame, "9:30 AM");
        buf
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn left(column: u16, row: u16) -> Event {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn double_clicking_an_icon_opens_its_window() {
        let mut desktop = desktop();
        let t0 = Instant::now();
        // About Me sits at (50,150) units: cell (6, 7).
        desktop.handle_event(&left(7, 8), t0);
        desktop.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 7, 8), t0);
        desktop.handle_event(&left(7, 8), t0 + Duration::from_millis(150));
        assert_eq!(desktop.scene().taskbar_labels(), vec!["About Me"]);
        assert!(desktop.windows().active_record().is_some());
    }

    #[test]
    fn close_control_removes_the_window() {
        let mut desktop = desktop();
        let handle = desktop.windows_mut().open("About Me");
        draw(&mut desktop);
        let rect = desktop
            .scene()
            .display_rect(handle)
            .map(|r| r.to_cells())
            .unwrap_or_default();
        let close_x = (rect.right() - 3) as u16;
        desktop.handle_event(&left(close_x, (rect.y + 1) as u16), Instant::now());
        assert_eq!(desktop.scene().window_count(), 0);
        assert!(desktop.scene().taskbar_labels().is_empty());
    }

    #[test]
    fn start_menu_opens_browser_and_hands_off_urls() {
        let mut desktop = desktop();
        draw(&mut desktop);
        let t0 = Instant::now();
        desktop.handle_event(&left(1, 29), t0);
        assert!(desktop.menus().is_start_open());
        let start = desktop
            .menus()
            .start()
            .map(|m| m.rect())
            .unwrap_or_default();
        desktop.handle_event(&left(start.x + 2, start.y + 1), t0);
        assert!(!desktop.menus().is_start_open());
        let browser = desktop
            .windows()
            .active()
            .unwrap_or_else(|| panic!("browser window active"));
        assert!(matches!(
            desktop.scene().content(browser),
            Some(WindowContent::Browser(_))
        ));

        let content = desktop.content_area(browser).unwrap_or_default();
        desktop.handle_event(&left(content.x + 12, content.y), t0);
        for c in "example.com".chars() {
            desktop.handle_event(&key(KeyCode::Char(c)), t0);
        }
        desktop.handle_event(&key(KeyCode::Enter), t0);
        assert_eq!(desktop.take_url_requests(), vec!["https://example.com"]);
        assert!(desktop.take_url_requests().is_empty());
    }

    #[test]
    fn context_menu_refresh_resets_the_desktop() {
        let mut desktop = desktop();
        desktop.windows_mut().open("Projects");
        desktop.windows_mut().open("Contact");
        draw(&mut desktop);
        let t0 = Instant::now();
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), 60, 2), t0);
        let menu = desktop
            .menus()
            .context()
            .cloned()
            .unwrap_or_else(|| panic!("context menu open"));
        assert_eq!(menu.labels(), vec!["New", "Display Properties", "Refresh"]);
        let refresh_row = menu.rect().y + 4;
        desktop.handle_event(&left(menu.rect().x + 2, refresh_row), t0);
        assert_eq!(desktop.scene().window_count(), 0);
        assert!(desktop.menus().context().is_none());
        assert_eq!(desktop.windows().z_counter(), crate::constants::Z_ORDER_BASE);
    }

    #[test]
    fn shut_down_needs_confirmation_then_any_key_quits() {
        let mut desktop = desktop();
        desktop.run_menu_action(MenuAction::ShutDown);
        assert_eq!(desktop.power(), Power::ConfirmShutdown);
        let buf = draw(&mut desktop);
        assert!((0..30).any(|y| row_text(&buf, y).contains(DIALOG_PROMPT)));

        let t0 = Instant::now();
        assert_eq!(desktop.handle_event(&key(KeyCode::Esc), t0), ControlFlow::Continue);
        assert_eq!(desktop.power(), Power::Running);

        desktop.run_menu_action(MenuAction::ShutDown);
        desktop.handle_event(&key(KeyCode::Char('y')), t0);
        assert_eq!(desktop.power(), Power::Off);
        let buf = draw(&mut desktop);
        assert!(row_text(&buf, 15).contains(SHUTDOWN_TEXT));
        assert_eq!(
            desktop.handle_event(&key(KeyCode::Char('x')), t0),
            ControlFlow::Quit
        );
    }

    #[test]
    fn clicks_on_dialog_buttons() {
        let mut desktop = desktop();
        desktop.run_menu_action(MenuAction::ShutDown);
        let (yes, no) = dialog_buttons(dialog_rect(desktop.desktop_area()));
        let t0 = Instant::now();
        desktop.handle_event(&left(no.x, no.y), t0);
        assert_eq!(desktop.power(), Power::Running);
        desktop.run_menu_action(MenuAction::ShutDown);
        desktop.handle_event(&left(yes.x + 1, yes.y), t0);
        assert_eq!(desktop.power(), Power::Off);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut desktop = desktop();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(desktop.handle_event(&event, Instant::now()), ControlFlow::Quit);
    }

    #[test]
    fn render_draws_windows_and_taskbar() {
        let mut desktop = desktop();
        desktop.windows_mut().open("Contact");
        let buf = draw(&mut desktop);
        let taskbar = row_text(&buf, 29);
        assert!(taskbar.contains("Start"));
        assert!(taskbar.contains("[ Contact ]"));
        assert!(taskbar.contains("9:30 AM"));
        // Default window: left 150 top 100 units, title bar on cell row 6.
        assert!(row_text(&buf, 6).contains("Contact"));
    }
}
