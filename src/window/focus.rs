use super::registry::Registry;
use super::taskbar::TaskbarButtons;
use crate::constants::Z_ORDER_BASE;
use crate::surface::{Surface, WindowHandle};

/// Monotonic stacking counter. Every activation takes the next value, so no
/// two windows ever share a `z_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZCounter {
    current: u32,
}

impl Default for ZCounter {
    fn default() -> Self {
        Self {
            current: Z_ORDER_BASE,
        }
    }
}

impl ZCounter {
    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn next(&mut self) -> u32 {
        self.current = self.current.saturating_add(1);
        self.current
    }
}

/// The active window and the stacking counter.
#[derive(Debug, Default)]
pub struct FocusState {
    active: Option<WindowHandle>,
    z: ZCounter,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<WindowHandle> {
        self.active
    }

    pub fn is_active(&self, handle: WindowHandle) -> bool {
        self.active == Some(handle)
    }

    pub fn z_counter(&self) -> u32 {
        self.z.current()
    }

    /// Forget the active window without touching its button.
    pub fn clear(&mut self) -> Option<WindowHandle> {
        self.active.take()
    }

    /// Make `handle` the active window and raise it above everything else.
    ///
    /// The previously active window only loses its highlighted button; its
    /// stacking value stays where it was. Re-activating the active window
    /// still raises it. Minimized or unknown windows are refused.
    pub fn activate<S: Surface + ?Sized>(
        &mut self,
        registry: &mut Registry,
        buttons: &TaskbarButtons,
        surface: &mut S,
        handle: WindowHandle,
    ) -> bool {
        match registry.find_by_handle(handle) {
            Some(record) if !record.state.is_minimized() => {}
            Some(_) => {
                tracing::debug!(%handle, "refusing to activate minimized window");
                return false;
            }
            None => return false,
        }

        if let Some(previous) = self.active
            && previous != handle
            && let Some(prev) = registry.find_by_handle(previous)
        {
            buttons.set_active(surface, prev.taskbar_button, false);
        }

        self.active = Some(handle);
        let z_order = self.z.next();
        let Some(record) = registry.find_by_handle_mut(handle) else {
            return false;
        };
        record.z_order = z_order;
        surface.set_z_order(handle, z_order);
        buttons.set_active(surface, record.taskbar_button, true);
        tracing::debug!(%handle, title = %record.title, z_order, "activated window");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DesktopRect;
    use crate::scene::Scene;
    use crate::window::registry::WindowRecord;

    fn open(
        scene: &mut Scene,
        registry: &mut Registry,
        buttons: &mut TaskbarButtons,
        title: &str,
    ) -> WindowHandle {
        let handle = scene.create_window(title, DesktopRect::new(0, 0, 300, 200));
        let mut record = WindowRecord::new(title, handle);
        record.taskbar_button = Some(buttons.create(scene, handle, title));
        registry.add(record);
        handle
    }

    #[test]
    fn z_counter_starts_above_chrome() {
        let mut z = ZCounter::default();
        assert_eq!(z.current(), Z_ORDER_BASE);
        assert_eq!(z.next(), Z_ORDER_BASE + 1);
    }

    #[test]
    fn activation_moves_button_highlight_and_raises() {
        let mut scene = Scene::new();
        let mut registry = Registry::new();
        let mut buttons = TaskbarButtons::new();
        let mut focus = FocusState::new();
        let a = open(&mut scene, &mut registry, &mut buttons, "a");
        let b = open(&mut scene, &mut registry, &mut buttons, "b");

        assert!(focus.activate(&mut registry, &buttons, &mut scene, a));
        assert!(focus.activate(&mut registry, &buttons, &mut scene, b));
        assert_eq!(focus.active(), Some(b));

        let za = registry.find_by_handle(a).map(|r| r.z_order);
        let zb = registry.find_by_handle(b).map(|r| r.z_order);
        assert_eq!(za, Some(Z_ORDER_BASE + 1));
        assert_eq!(zb, Some(Z_ORDER_BASE + 2));
        assert_eq!(scene.z_order(b), Some(Z_ORDER_BASE + 2));
        assert_eq!(scene.active_button_labels(), vec!["b".to_string()]);
    }

    #[test]
    fn reactivating_active_window_still_bumps_z() {
        let mut scene = Scene::new();
        let mut registry = Registry::new();
        let mut buttons = TaskbarButtons::new();
        let mut focus = FocusState::new();
        let a = open(&mut scene, &mut registry, &mut buttons, "a");
        focus.activate(&mut registry, &buttons, &mut scene, a);
        focus.activate(&mut registry, &buttons, &mut scene, a);
        assert_eq!(
            registry.find_by_handle(a).map(|r| r.z_order),
            Some(Z_ORDER_BASE + 2)
        );
        assert_eq!(scene.active_button_labels(), vec!["a".to_string()]);
    }

    #[test]
    fn minimized_window_is_never_activated() {
        let mut scene = Scene::new();
        let mut registry = Registry::new();
        let mut buttons = TaskbarButtons::new();
        let mut focus = FocusState::new();
        let a = open(&mut scene, &mut registry, &mut buttons, "a");
        if let Some(r) = registry.find_by_handle_mut(a) {
            r.state = r.state.minimized();
        }
        assert!(!focus.activate(&mut registry, &buttons, &mut scene, a));
        assert_eq!(focus.active(), None);
        assert_eq!(focus.z_counter(), Z_ORDER_BASE);
    }
}
