use crate::surface::{ButtonHandle, WindowHandle};

/// Geometry a window shows when it is not minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryMode {
    #[default]
    Normal,
    Maximized,
}

/// Display state of a window. Minimizing remembers the geometry mode so a
/// restore returns to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Minimized { restore: GeometryMode },
}

impl WindowState {
    pub fn is_minimized(self) -> bool {
        matches!(self, Self::Minimized { .. })
    }

    /// Whether the window is (or will be, once restored) maximized.
    pub fn geometry_mode(self) -> GeometryMode {
        match self {
            Self::Normal => GeometryMode::Normal,
            Self::Maximized => GeometryMode::Maximized,
            Self::Minimized { restore } => restore,
        }
    }

    pub fn is_maximized(self) -> bool {
        self.geometry_mode() == GeometryMode::Maximized
    }

    fn from_mode(mode: GeometryMode) -> Self {
        match mode {
            GeometryMode::Normal => Self::Normal,
            GeometryMode::Maximized => Self::Maximized,
        }
    }

    pub fn minimized(self) -> Self {
        Self::Minimized {
            restore: self.geometry_mode(),
        }
    }

    pub fn restored(self) -> Self {
        Self::from_mode(self.geometry_mode())
    }

    /// Flip between normal and maximized geometry without touching the
    /// minimized flag.
    pub fn with_maximize_toggled(self) -> Self {
        let mode = match self.geometry_mode() {
            GeometryMode::Normal => GeometryMode::Maximized,
            GeometryMode::Maximized => GeometryMode::Normal,
        };
        match self {
            Self::Minimized { .. } => Self::Minimized { restore: mode },
            _ => Self::from_mode(mode),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub title: String,
    pub handle: WindowHandle,
    pub taskbar_button: Option<ButtonHandle>,
    pub z_order: u32,
    pub state: WindowState,
}

impl WindowRecord {
    pub fn new(title: impl Into<String>, handle: WindowHandle) -> Self {
        Self {
            title: title.into(),
            handle,
            taskbar_button: None,
            z_order: 0,
            state: WindowState::Normal,
        }
    }
}

/// Open windows in creation order. Stacking is carried by `z_order`, not by
/// position in the list.
#[derive(Debug, Default)]
pub struct Registry {
    records: Vec<WindowRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_by_title(&self, title: &str) -> Option<&WindowRecord> {
        self.records.iter().find(|r| r.title == title)
    }

    pub fn find_by_handle(&self, handle: WindowHandle) -> Option<&WindowRecord> {
        self.records.iter().find(|r| r.handle == handle)
    }

    pub fn find_by_handle_mut(&mut self, handle: WindowHandle) -> Option<&mut WindowRecord> {
        self.records.iter_mut().find(|r| r.handle == handle)
    }

    /// Append a record. Title uniqueness is the caller's responsibility.
    pub fn add(&mut self, record: WindowRecord) {
        debug_assert!(
            self.find_by_title(&record.title).is_none(),
            "duplicate window title {:?}",
            record.title
        );
        self.records.push(record);
    }

    /// Remove and return the record for `handle`; absent handles are ignored.
    pub fn remove(&mut self, handle: WindowHandle) -> Option<WindowRecord> {
        let index = self.records.iter().position(|r| r.handle == handle)?;
        Some(self.records.remove(index))
    }

    /// Highest-stacked window that is not minimized.
    pub fn topmost_visible(&self) -> Option<&WindowRecord> {
        self.records
            .iter()
            .filter(|r| !r.state.is_minimized())
            .max_by_key(|r| r.z_order)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.records.iter()
    }

    pub fn handles(&self) -> Vec<WindowHandle> {
        self.records.iter().map(|r| r.handle).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
