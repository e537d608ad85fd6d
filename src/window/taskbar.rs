use std::collections::BTreeMap;

use crate::surface::{ButtonHandle, Surface, WindowHandle};

/// Taskbar buttons, one per open window.
#[derive(Debug, Default)]
pub struct TaskbarButtons {
    owners: BTreeMap<ButtonHandle, WindowHandle>,
}

impl TaskbarButtons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the button for `window`, creating the container on first use.
    pub fn create<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        window: WindowHandle,
        label: &str,
    ) -> ButtonHandle {
        if surface.ensure_taskbar() {
            tracing::debug!("created taskbar button container");
        }
        let button = surface.create_taskbar_button(window, label);
        self.owners.insert(button, window);
        button
    }

    pub fn set_active<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        button: Option<ButtonHandle>,
        active: bool,
    ) {
        if let Some(button) = button
            && self.owners.contains_key(&button)
        {
            surface.set_button_active(button, active);
        }
    }

    pub fn remove<S: Surface + ?Sized>(&mut self, surface: &mut S, button: Option<ButtonHandle>) {
        if let Some(button) = button
            && self.owners.remove(&button).is_some()
        {
            surface.remove_taskbar_button(button);
        }
    }

    /// Window a button stands for.
    pub fn owner(&self, button: ButtonHandle) -> Option<WindowHandle> {
        self.owners.get(&button).copied()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn clear(&mut self) {
        self.owners.clear();
    }
}
