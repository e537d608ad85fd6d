pub mod cli;
pub mod components;
pub mod constants;
pub mod content;
pub mod desktop;
pub mod drivers;
pub mod event_loop;
pub mod geometry;
pub mod icons;
pub mod menu;
pub mod panel;
pub mod scene;
pub mod surface;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
