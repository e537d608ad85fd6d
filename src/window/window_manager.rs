use super::drag::DragSession;
use super::focus::FocusState;
use super::registry::{Registry, WindowRecord};
use super::resize::{ResizeDirection, ResizeSession};
use super::taskbar::TaskbarButtons;
use crate::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_LEFT, DEFAULT_WINDOW_TOP, DEFAULT_WINDOW_WIDTH,
};
use crate::content::{self, ContentLoader, FetchRequest, PendingFetches};
use crate::geometry::{DesktopRect, Point};
use crate::surface::{ButtonHandle, Surface, WindowHandle};

/// One UI affordance each. Buttons, handles and taskbar entries are mapped
/// to a command by the desktop and executed through [`WindowManager::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(String),
    ToggleMinimize(WindowHandle),
    ToggleMaximize(WindowHandle),
    Close(WindowHandle),
    TaskbarClick(ButtonHandle),
    Activate(WindowHandle),
    BeginTitleDrag {
        handle: WindowHandle,
        pointer: Point,
    },
    BeginResize {
        handle: WindowHandle,
        direction: ResizeDirection,
        pointer: Point,
    },
    PointerMove(Point),
    PointerUp,
}

/// Owns every open window and keeps the registry, the focus state, the
/// taskbar and the rendered surface consistent with each other.
#[derive(Debug)]
pub struct WindowManager<S: Surface> {
    surface: S,
    registry: Registry,
    focus: FocusState,
    buttons: TaskbarButtons,
    title_drag: Option<DragSession<WindowHandle>>,
    resize: Option<ResizeSession>,
    loader: ContentLoader,
    pending: PendingFetches,
}

impl<S: Surface> WindowManager<S> {
    pub fn new(surface: S, loader: ContentLoader) -> Self {
        Self {
            surface,
            registry: Registry::new(),
            focus: FocusState::new(),
            buttons: TaskbarButtons::new(),
            title_drag: None,
            resize: None,
            loader,
            pending: PendingFetches::default(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn active(&self) -> Option<WindowHandle> {
        self.focus.active()
    }

    pub fn active_record(&self) -> Option<&WindowRecord> {
        self.focus
            .active()
            .and_then(|handle| self.registry.find_by_handle(handle))
    }

    pub fn z_counter(&self) -> u32 {
        self.focus.z_counter()
    }

    pub fn is_fetch_pending(&self, handle: WindowHandle) -> bool {
        self.pending.is_pending(handle)
    }

    pub fn is_dragging(&self) -> bool {
        self.title_drag.is_some()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    pub fn dispatch(&mut self, command: Command) -> bool {
        match command {
            Command::Open(title) => {
                self.open(&title);
                true
            }
            Command::ToggleMinimize(handle) => self.toggle_minimize(handle),
            Command::ToggleMaximize(handle) => self.toggle_maximize(handle),
            Command::Close(handle) => self.close(handle),
            Command::TaskbarClick(button) => self.taskbar_click(button),
            Command::Activate(handle) => self.activate(handle),
            Command::BeginTitleDrag { handle, pointer } => self.begin_title_drag(handle, pointer),
            Command::BeginResize {
                handle,
                direction,
                pointer,
            } => self.begin_resize(handle, direction, pointer),
            Command::PointerMove(pointer) => self.pointer_move(pointer),
            Command::PointerUp => self.pointer_up(),
        }
    }

    /// Open the window called `title`, or bring the existing one forward.
    ///
    /// A title maps to at most one window. Re-opening restores a minimized
    /// window before activating it and never creates a second node.
    pub fn open(&mut self, title: &str) -> WindowHandle {
        if let Some(existing) = self.registry.find_by_title(title) {
            let handle = existing.handle;
            if existing.state.is_minimized() {
                self.restore(handle);
            }
            self.activate(handle);
            tracing::debug!(%handle, title, "focused existing window");
            return handle;
        }

        let rect = DesktopRect::new(
            DEFAULT_WINDOW_LEFT,
            DEFAULT_WINDOW_TOP,
            DEFAULT_WINDOW_WIDTH,
            DEFAULT_WINDOW_HEIGHT,
        );
        let handle = self.surface.create_window(title, rect);
        let (initial, resource) = content::initial_content(title);
        self.surface.set_content(handle, initial);
        if let Some(resource) = resource {
            self.pending.track(handle, resource.clone());
            self.loader.spawn(FetchRequest { handle, resource });
        }

        let mut record = WindowRecord::new(title, handle);
        record.taskbar_button = Some(self.buttons.create(&mut self.surface, handle, title));
        self.registry.add(record);
        self.activate(handle);
        tracing::debug!(%handle, title, "opened window");
        handle
    }

    pub fn activate(&mut self, handle: WindowHandle) -> bool {
        self.focus
            .activate(&mut self.registry, &self.buttons, &mut self.surface, handle)
    }

    fn restore(&mut self, handle: WindowHandle) {
        if let Some(record) = self.registry.find_by_handle_mut(handle) {
            record.state = record.state.restored();
            self.surface.set_minimized(handle, false);
        }
    }

    /// Hide a visible window or show a hidden one.
    ///
    /// Hiding the active window leaves no window active. Showing a window
    /// activates it.
    pub fn toggle_minimize(&mut self, handle: WindowHandle) -> bool {
        let Some(record) = self.registry.find_by_handle_mut(handle) else {
            return false;
        };
        if record.state.is_minimized() {
            self.restore(handle);
            self.activate(handle);
            tracing::debug!(%handle, "restored window");
            return true;
        }

        record.state = record.state.minimized();
        let button = record.taskbar_button;
        self.surface.set_minimized(handle, true);
        if self.focus.is_active(handle) {
            self.focus.clear();
        }
        self.buttons.set_active(&mut self.surface, button, false);
        self.drop_sessions_for(handle);
        tracing::debug!(%handle, "minimized window");
        true
    }

    /// Switch between normal and maximized geometry. Focus and stacking are
    /// untouched; a minimized window stays hidden and restores maximized.
    pub fn toggle_maximize(&mut self, handle: WindowHandle) -> bool {
        let Some(record) = self.registry.find_by_handle_mut(handle) else {
            return false;
        };
        record.state = record.state.with_maximize_toggled();
        let maximized = record.state.is_maximized();
        let button = record.taskbar_button;
        self.surface.set_maximized(handle, maximized);
        let active = self.focus.is_active(handle);
        self.buttons.set_active(&mut self.surface, button, active);
        self.drop_sessions_for(handle);
        tracing::debug!(%handle, maximized, "toggled maximize");
        true
    }

    /// Close a window. Unknown handles are ignored. When the active window
    /// closes, the highest visible survivor becomes active.
    pub fn close(&mut self, handle: WindowHandle) -> bool {
        let Some(record) = self.registry.find_by_handle(handle) else {
            return false;
        };
        let button = record.taskbar_button;
        if self.pending.cancel(handle) {
            tracing::debug!(%handle, "cancelled pending fetch");
        }
        self.buttons.remove(&mut self.surface, button);
        self.surface.remove_window(handle);
        let removed = self.registry.remove(handle);
        self.drop_sessions_for(handle);

        if self.focus.is_active(handle) {
            self.focus.clear();
            if let Some(next) = self.registry.topmost_visible().map(|r| r.handle) {
                self.activate(next);
            }
        }
        if let Some(record) = removed {
            tracing::debug!(%handle, title = %record.title, "closed window");
        }
        true
    }

    /// Taskbar button semantics: restore a hidden window, hide the active
    /// one, activate anything else.
    pub fn taskbar_click(&mut self, button: ButtonHandle) -> bool {
        let Some(handle) = self.buttons.owner(button) else {
            return false;
        };
        let Some(record) = self.registry.find_by_handle(handle) else {
            return false;
        };
        if record.state.is_minimized() || self.focus.is_active(handle) {
            self.toggle_minimize(handle)
        } else {
            self.activate(handle)
        }
    }

    /// Start moving a window by its title bar. Ignored for maximized or
    /// hidden windows.
    pub fn begin_title_drag(&mut self, handle: WindowHandle, pointer: Point) -> bool {
        let Some(origin) = self.movable_rect(handle) else {
            return false;
        };
        self.activate(handle);
        self.title_drag = Some(DragSession::begin(handle, pointer, origin.origin()));
        true
    }

    /// Start resizing a window from one of its eight handles. Ignored for
    /// maximized or hidden windows.
    pub fn begin_resize(
        &mut self,
        handle: WindowHandle,
        direction: ResizeDirection,
        pointer: Point,
    ) -> bool {
        let Some(origin) = self.movable_rect(handle) else {
            return false;
        };
        self.activate(handle);
        self.resize = Some(ResizeSession::begin(handle, direction, origin, pointer));
        true
    }

    fn movable_rect(&self, handle: WindowHandle) -> Option<DesktopRect> {
        let record = self.registry.find_by_handle(handle)?;
        if record.state.is_maximized() || record.state.is_minimized() {
            return None;
        }
        self.surface.rect(handle)
    }

    /// Apply the pointer position to whichever session is running.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let mut moved = false;
        if let Some(drag) = self.title_drag
            && let Some(mut rect) = self.surface.rect(drag.target)
        {
            let position = drag.position_at(pointer);
            rect.left = position.x;
            rect.top = position.y;
            self.surface.set_rect(drag.target, rect);
            moved = true;
        }
        if let Some(session) = self.resize {
            self.surface.set_rect(session.handle, session.rect_at(pointer));
            moved = true;
        }
        moved
    }

    /// End any running drag or resize. Window geometry is not snapped.
    pub fn pointer_up(&mut self) -> bool {
        let ended = self.title_drag.is_some() || self.resize.is_some();
        self.title_drag = None;
        self.resize = None;
        ended
    }

    fn drop_sessions_for(&mut self, handle: WindowHandle) {
        if self.title_drag.is_some_and(|d| d.target == handle) {
            self.title_drag = None;
        }
        if self.resize.is_some_and(|r| r.handle == handle) {
            self.resize = None;
        }
    }

    /// Write finished reads into their windows. Reads for windows that were
    /// closed in the meantime are dropped without touching the surface.
    pub fn poll_content(&mut self) -> usize {
        let mut applied = 0;
        for outcome in self.loader.drain() {
            if !self.pending.complete(&outcome) {
                tracing::debug!(handle = %outcome.handle, "dropping late fetch result");
                continue;
            }
            let content = content::resolve(&outcome.resource, outcome.result);
            if self.surface.set_content(outcome.handle, content) {
                applied += 1;
            }
        }
        applied
    }

    /// Close everything and start counting from scratch.
    pub fn reset(&mut self) {
        for handle in self.registry.handles() {
            self.close(handle);
        }
        self.pending.clear();
        self.buttons.clear();
        self.focus = FocusState::new();
        self.title_drag = None;
        self.resize = None;
        tracing::debug!("window manager reset");
    }
}
