//! Retained render tree the window manager draws into.
//!
//! `Scene` is the terminal build's implementation of [`Surface`]: a small
//! document of window nodes and taskbar buttons that the renderer paints
//! each frame. Every mutation bumps a revision counter, which lets callers
//! (and tests) tell whether anything observable changed.

use std::collections::BTreeMap;

use crate::content::WindowContent;
use crate::geometry::DesktopRect;
use crate::surface::{ButtonHandle, Surface, WindowHandle};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowNode {
    pub title: String,
    pub rect: DesktopRect,
    pub z_order: u32,
    pub minimized: bool,
    pub maximized: bool,
    pub content: WindowContent,
    pub scroll: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonNode {
    pub window: WindowHandle,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Default)]
pub struct Scene {
    bounds: DesktopRect,
    windows: BTreeMap<WindowHandle, WindowNode>,
    taskbar: Option<Vec<ButtonHandle>>,
    buttons: BTreeMap<ButtonHandle, ButtonNode>,
    next_window: u32,
    next_button: u32,
    revision: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Area available to windows; maximized windows fill it.
    pub fn bounds(&self) -> DesktopRect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: DesktopRect) {
        self.bounds = bounds;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn window(&self, handle: WindowHandle) -> Option<&WindowNode> {
        self.windows.get(&handle)
    }

    /// Mutable access for view state owned by the content (scroll offsets,
    /// form fields). Counts as a mutation.
    pub fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut WindowNode> {
        if self.windows.contains_key(&handle) {
            self.touch();
        }
        self.windows.get_mut(&handle)
    }

    pub fn content(&self, handle: WindowHandle) -> Option<&WindowContent> {
        self.window(handle).map(|w| &w.content)
    }

    pub fn z_order(&self, handle: WindowHandle) -> Option<u32> {
        self.window(handle).map(|w| w.z_order)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Rectangle a window currently occupies on screen.
    pub fn display_rect(&self, handle: WindowHandle) -> Option<DesktopRect> {
        let node = self.window(handle)?;
        Some(if node.maximized { self.bounds } else { node.rect })
    }

    /// Visible windows from the bottom of the stack to the top.
    pub fn visible_windows_by_z(&self) -> Vec<(WindowHandle, &WindowNode)> {
        let mut visible: Vec<_> = self
            .windows
            .iter()
            .filter(|(_, node)| !node.minimized)
            .map(|(handle, node)| (*handle, node))
            .collect();
        visible.sort_by_key(|(_, node)| node.z_order);
        visible
    }

    pub fn has_taskbar(&self) -> bool {
        self.taskbar.is_some()
    }

    /// Taskbar buttons in insertion order.
    pub fn taskbar_buttons(&self) -> Vec<(ButtonHandle, &ButtonNode)> {
        self.taskbar
            .iter()
            .flatten()
            .filter_map(|handle| self.buttons.get(handle).map(|node| (*handle, node)))
            .collect()
    }

    pub fn taskbar_labels(&self) -> Vec<String> {
        self.taskbar_buttons()
            .into_iter()
            .map(|(_, node)| node.label.clone())
            .collect()
    }

    pub fn active_button_labels(&self) -> Vec<String> {
        self.taskbar_buttons()
            .into_iter()
            .filter(|(_, node)| node.active)
            .map(|(_, node)| node.label.clone())
            .collect()
    }

    /// Drop every node, as a page reload would. Handles are never reused.
    pub fn reset(&mut self) {
        self.windows.clear();
        self.buttons.clear();
        self.taskbar = None;
        self.touch();
    }
}

impl Surface for Scene {
    fn create_window(&mut self, title: &str, rect: DesktopRect) -> WindowHandle {
        self.next_window += 1;
        let handle = WindowHandle::from_raw(self.next_window);
        self.windows.insert(
            handle,
            WindowNode {
                title: title.to_string(),
                rect,
                z_order: 0,
                minimized: false,
                maximized: false,
                content: WindowContent::Loading,
                scroll: 0,
            },
        );
        self.touch();
        handle
    }

    fn remove_window(&mut self, handle: WindowHandle) -> bool {
        let removed = self.windows.remove(&handle).is_some();
        if removed {
            self.touch();
        }
        removed
    }

    fn rect(&self, handle: WindowHandle) -> Option<DesktopRect> {
        self.window(handle).map(|w| w.rect)
    }

    fn set_rect(&mut self, handle: WindowHandle, rect: DesktopRect) {
        if let Some(node) = self.window_mut(handle) {
            node.rect = rect;
        }
    }

    fn set_z_order(&mut self, handle: WindowHandle, z_order: u32) {
        if let Some(node) = self.window_mut(handle) {
            node.z_order = z_order;
        }
    }

    fn set_minimized(&mut self, handle: WindowHandle, minimized: bool) {
        if let Some(node) = self.window_mut(handle) {
            node.minimized = minimized;
        }
    }

    fn set_maximized(&mut self, handle: WindowHandle, maximized: bool) {
        if let Some(node) = self.window_mut(handle) {
            node.maximized = maximized;
        }
    }

    fn set_content(&mut self, handle: WindowHandle, content: WindowContent) -> bool {
        match self.window_mut(handle) {
            Some(node) => {
                node.content = content;
                node.scroll = 0;
                true
            }
            None => false,
        }
    }

    fn ensure_taskbar(&mut self) -> bool {
        if self.taskbar.is_some() {
            return false;
        }
        self.taskbar = Some(Vec::new());
        self.touch();
        true
    }

    fn create_taskbar_button(&mut self, window: WindowHandle, label: &str) -> ButtonHandle {
        self.ensure_taskbar();
        self.next_button += 1;
        let handle = ButtonHandle::from_raw(self.next_button);
        self.buttons.insert(
            handle,
            ButtonNode {
                window,
                label: label.to_string(),
                active: false,
            },
        );
        if let Some(children) = self.taskbar.as_mut() {
            children.push(handle);
        }
        self.touch();
        handle
    }

    fn remove_taskbar_button(&mut self, button: ButtonHandle) {
        if self.buttons.remove(&button).is_some() {
            if let Some(children) = self.taskbar.as_mut() {
                children.retain(|b| *b != button);
            }
            self.touch();
        }
    }

    fn set_button_active(&mut self, button: ButtonHandle, active: bool) {
        if let Some(node) = self.buttons.get_mut(&button)
            && node.active != active
        {
            node.active = active;
            self.touch();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_to_removed_window_are_discarded() {
        let mut scene = Scene::new();
        let handle = scene.create_window("Hello", DesktopRect::new(0, 0, 300, 200));
        assert!(scene.remove_window(handle));
        let revision = scene.revision();
        assert!(!scene.set_content(handle, WindowContent::Markdown("late".into())));
        scene.set_rect(handle, DesktopRect::new(1, 1, 1, 1));
        assert_eq!(scene.revision(), revision);
        assert!(!scene.remove_window(handle));
    }

    #[test]
    fn maximized_windows_fill_bounds() {
        let mut scene = Scene::new();
        scene.set_bounds(DesktopRect::new(0, 0, 640, 460));
        let handle = scene.create_window("Hello", DesktopRect::new(150, 100, 500, 400));
        scene.set_maximized(handle, true);
        assert_eq!(scene.display_rect(handle), Some(scene.bounds()));
        scene.set_maximized(handle, false);
        assert_eq!(
            scene.display_rect(handle),
            Some(DesktopRect::new(150, 100, 500, 400))
        );
    }

    #[test]
    fn visible_windows_sorted_bottom_to_top() {
        let mut scene = Scene::new();
        let a = scene.create_window("a", DesktopRect::default());
        let b = scene.create_window("b", DesktopRect::default());
        let c = scene.create_window("c", DesktopRect::default());
        scene.set_z_order(a, 13);
        scene.set_z_order(b, 11);
        scene.set_z_order(c, 12);
        scene.set_minimized(c, true);
        let order: Vec<_> = scene
            .visible_windows_by_z()
            .into_iter()
            .map(|(h, _)| h)
            .collect();
        assert_eq!(order, vec![b, a]);
    }
}
