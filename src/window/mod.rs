pub mod decorator;
pub mod drag;
pub mod focus;
pub mod registry;
pub mod resize;
pub mod taskbar;

mod window_manager;

pub use decorator::{RetroDecorator, WindowDecorator, WindowPart, visible_content};
pub use drag::{DragSession, clamp_to_container, snap_to_grid};
pub use focus::FocusState;
pub use registry::{GeometryMode, Registry, WindowRecord, WindowState};
pub use resize::{ParseDirectionError, ResizeDirection, ResizeSession, apply_resize};
pub use taskbar::TaskbarButtons;
pub use window_manager::{Command, WindowManager};
