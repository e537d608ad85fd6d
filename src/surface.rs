//! Contract between the window manager and whatever renders its windows.
//!
//! The manager never touches pixels or cells. It asks a `Surface` to create
//! window nodes and taskbar buttons, to move them and to flip their display
//! classes. `Scene` is the retained implementation used by the terminal
//! renderer; tests can supply their own.

use std::fmt;

use crate::content::WindowContent;
use crate::geometry::DesktopRect;

/// Opaque reference to a rendered window node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowHandle(u32);

impl WindowHandle {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win#{}", self.0)
    }
}

/// Opaque reference to a taskbar button node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ButtonHandle(u32);

impl ButtonHandle {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

pub trait Surface {
    /// Insert a window node showing `title` with its chrome, placed at `rect`.
    fn create_window(&mut self, title: &str, rect: DesktopRect) -> WindowHandle;

    /// Detach a window node. Returns false if it was already gone.
    fn remove_window(&mut self, handle: WindowHandle) -> bool;

    fn rect(&self, handle: WindowHandle) -> Option<DesktopRect>;

    fn set_rect(&mut self, handle: WindowHandle, rect: DesktopRect);

    fn set_z_order(&mut self, handle: WindowHandle, z_order: u32);

    fn set_minimized(&mut self, handle: WindowHandle, minimized: bool);

    fn set_maximized(&mut self, handle: WindowHandle, maximized: bool);

    /// Replace the content region of a window. Returns false when the target
    /// no longer exists; the write is then discarded.
    fn set_content(&mut self, handle: WindowHandle, content: WindowContent) -> bool;

    /// Create the taskbar button container if it does not exist yet. Returns
    /// true when it had to be created.
    fn ensure_taskbar(&mut self) -> bool;

    fn create_taskbar_button(&mut self, window: WindowHandle, label: &str) -> ButtonHandle;

    fn remove_taskbar_button(&mut self, button: ButtonHandle);

    fn set_button_active(&mut self, button: ButtonHandle, active: bool);
}
