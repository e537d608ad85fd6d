//! Shared crate-wide constants.
//!
//! Geometry is expressed in desktop units. A terminal cell spans
//! `CELL_WIDTH` x `CELL_HEIGHT` units, so the pixel-like values below keep
//! their meaning regardless of the terminal size.

/// Horizontal desktop units covered by one terminal column.
pub const CELL_WIDTH: i32 = 8;

/// Vertical desktop units covered by one terminal row.
pub const CELL_HEIGHT: i32 = 20;

/// Smallest width a window can be resized to.
pub const MIN_WIDTH: i32 = 200;

/// Smallest height a window can be resized to.
pub const MIN_HEIGHT: i32 = 150;

/// Icons snap to multiples of this value when a drag ends.
pub const ICON_GRID_SIZE: i32 = 10;

/// Stacking value reserved for static chrome (taskbar, menus). The first
/// window receives `Z_ORDER_BASE + 1`.
pub const Z_ORDER_BASE: u32 = 10;

/// Geometry of a freshly opened window.
pub const DEFAULT_WINDOW_LEFT: i32 = 150;
pub const DEFAULT_WINDOW_TOP: i32 = 100;
pub const DEFAULT_WINDOW_WIDTH: i32 = 500;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 400;

/// Size of a desktop icon (glyph row plus up to two label rows).
pub const ICON_WIDTH: i32 = 12 * CELL_WIDTH;
pub const ICON_HEIGHT: i32 = 3 * CELL_HEIGHT;

/// Two presses on the same target within this many milliseconds count as a
/// double-click.
pub const DOUBLE_CLICK_MS: u64 = 500;

/// Placeholder shown while a window's content is being fetched.
pub const LOADING_TEXT: &str = "Loading...";

/// Directory (relative to the site root) holding blog posts and their index.
pub const POSTS_DIR: &str = "my blog posts";

/// Index of blog posts inside `POSTS_DIR`.
pub const POSTS_INDEX: &str = "posts.json";
