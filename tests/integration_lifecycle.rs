use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use retro_desk::constants::Z_ORDER_BASE;
use retro_desk::content::{ContentError, ContentLoader, ContentSource, WindowContent};
use retro_desk::geometry::DesktopRect;
use retro_desk::scene::Scene;
use retro_desk::surface::{ButtonHandle, Surface, WindowHandle};
use retro_desk::window::{Command, WindowManager};

#[derive(Debug, Default)]
struct MapSource(HashMap<String, String>);

impl ContentSource for MapSource {
    fn fetch(&self, path: &str) -> Result<String, ContentError> {
        self.0.get(path).cloned().ok_or_else(|| ContentError::NotFound {
            path: path.to_string(),
        })
    }
}

fn loader() -> ContentLoader {
    ContentLoader::inline(Arc::new(MapSource::default()))
}

fn manager() -> WindowManager<Scene> {
    WindowManager::new(Scene::new(), loader())
}

fn z(wm: &WindowManager<Scene>, handle: WindowHandle) -> u32 {
    wm.registry()
        .find_by_handle(handle)
        .map(|r| r.z_order)
        .unwrap_or_default()
}

#[test]
fn about_contact_about_keeps_two_windows() {
    let mut wm = manager();
    let about = wm.open("About Me");
    let contact = wm.open("Contact");
    assert_eq!(wm.active(), Some(contact));
    assert_eq!(z(&wm, contact), Z_ORDER_BASE + 2);

    assert_eq!(wm.open("About Me"), about);
    assert_eq!(wm.registry().len(), 2);
    assert_eq!(wm.active(), Some(about));
    let highest = wm.registry().iter().map(|r| r.z_order).max();
    assert_eq!(highest, Some(z(&wm, about)));
}

#[test]
fn repeated_opens_leave_one_active_record() {
    let mut wm = manager();
    for _ in 0..5 {
        wm.dispatch(Command::Open("Projects".to_string()));
    }
    assert_eq!(wm.registry().len(), 1);
    let record = wm.active_record().map(|r| r.title.clone());
    assert_eq!(record.as_deref(), Some("Projects"));
    assert_eq!(wm.surface().taskbar_labels(), vec!["Projects".to_string()]);
}

#[test]
fn close_active_hands_focus_to_highest_survivor() {
    let mut wm = manager();
    let a = wm.open("About Me");
    let b = wm.open("Contact");
    let c = wm.open("Notepad");
    let d = wm.open("Settings");
    wm.activate(b);
    wm.activate(a);
    // Survivors by z: c < d < b.
    assert!(wm.dispatch(Command::Close(a)));
    assert_eq!(wm.active(), Some(b));
    assert!(z(&wm, b) > z(&wm, d) && z(&wm, d) > z(&wm, c));
}

#[test]
fn closing_twice_is_a_no_op() {
    let mut wm = manager();
    let a = wm.open("About Me");
    wm.open("Contact");
    assert!(wm.dispatch(Command::Close(a)));
    let revision = wm.surface().revision();
    assert!(!wm.dispatch(Command::Close(a)));
    assert_eq!(wm.surface().revision(), revision);
    assert_eq!(wm.registry().len(), 1);
}

#[test]
fn closing_the_last_window_leaves_nothing_active() {
    let mut wm = manager();
    let a = wm.open("About Me");
    wm.close(a);
    assert_eq!(wm.active(), None);
    assert!(wm.surface().taskbar_labels().is_empty());
    assert!(wm.surface().has_taskbar());
}

#[test]
fn minimizing_the_active_window_activates_nobody() {
    let mut wm = manager();
    wm.open("About Me");
    let b = wm.open("Contact");
    assert!(wm.dispatch(Command::ToggleMinimize(b)));
    assert_eq!(wm.active(), None);
    assert!(wm.surface().window(b).is_some_and(|w| w.minimized));
    assert!(wm.surface().active_button_labels().is_empty());
}

#[test]
fn taskbar_buttons_keep_creation_order() {
    let mut wm = manager();
    let a = wm.open("About Me");
    wm.open("Contact");
    wm.open("Projects");
    wm.activate(a);
    assert_eq!(
        wm.surface().taskbar_labels(),
        vec!["About Me", "Contact", "Projects"]
    );
    assert_eq!(wm.surface().active_button_labels(), vec!["About Me"]);
}

#[test]
fn operations_on_unknown_handles_are_silent() {
    let mut wm = manager();
    let ghost = WindowHandle::from_raw(42);
    assert!(!wm.dispatch(Command::ToggleMinimize(ghost)));
    assert!(!wm.dispatch(Command::ToggleMaximize(ghost)));
    assert!(!wm.dispatch(Command::Activate(ghost)));
    assert!(!wm.dispatch(Command::TaskbarClick(ButtonHandle::from_raw(7))));
    assert!(wm.registry().is_empty());
}

/// Records calls instead of rendering, to check the manager only talks to
/// the surface through its contract.
#[derive(Debug, Default)]
struct RecordingSurface {
    rects: BTreeMap<WindowHandle, DesktopRect>,
    log: Vec<String>,
    next: u32,
    taskbar: bool,
}

impl Surface for RecordingSurface {
    fn create_window(&mut self, title: &str, rect: DesktopRect) -> WindowHandle {
        self.next += 1;
        let handle = WindowHandle::from_raw(self.next);
        self.rects.insert(handle, rect);
        self.log.push(format!("create {title}"));
        handle
    }

    fn remove_window(&mut self, handle: WindowHandle) -> bool {
        self.log.push(format!("remove {handle}"));
        self.rects.remove(&handle).is_some()
    }

    fn rect(&self, handle: WindowHandle) -> Option<DesktopRect> {
        self.rects.get(&handle).copied()
    }

    fn set_rect(&mut self, handle: WindowHandle, rect: DesktopRect) {
        if let Some(r) = self.rects.get_mut(&handle) {
            *r = rect;
        }
    }

    fn set_z_order(&mut self, handle: WindowHandle, z_order: u32) {
        self.log.push(format!("z {handle} {z_order}"));
    }

    fn set_minimized(&mut self, handle: WindowHandle, minimized: bool) {
        self.log.push(format!("minimized {handle} {minimized}"));
    }

    fn set_maximized(&mut self, handle: WindowHandle, maximized: bool) {
        self.log.push(format!("maximized {handle} {maximized}"));
    }

    fn set_content(&mut self, handle: WindowHandle, _content: WindowContent) -> bool {
        self.rects.contains_key(&handle)
    }

    fn ensure_taskbar(&mut self) -> bool {
        let created = !self.taskbar;
        if created {
            self.log.push("taskbar".to_string());
        }
        self.taskbar = true;
        created
    }

    fn create_taskbar_button(&mut self, window: WindowHandle, label: &str) -> ButtonHandle {
        self.log.push(format!("button {window} {label}"));
        ButtonHandle::from_raw(window.raw())
    }

    fn remove_taskbar_button(&mut self, button: ButtonHandle) {
        self.log.push(format!("unbutton {}", button.raw()));
    }

    fn set_button_active(&mut self, button: ButtonHandle, active: bool) {
        self.log.push(format!("active {} {active}", button.raw()));
    }
}

#[test]
fn manager_drives_any_surface() {
    let mut wm = WindowManager::new(RecordingSurface::default(), loader());
    let a = wm.open("About Me");
    let b = wm.open("Contact");
    wm.close(b);

    let log = &wm.surface().log;
    assert_eq!(log.iter().filter(|l| *l == "taskbar").count(), 1);
    assert!(log.contains(&"create About Me".to_string()));
    assert!(log.contains(&format!("z {a} {}", Z_ORDER_BASE + 1)));
    assert!(log.contains(&format!("remove {b}")));
    // Closing b hands focus back to a, which is raised again.
    assert_eq!(log.last(), Some(&format!("active {} true", a.raw())));
    assert_eq!(wm.active(), Some(a));
}
