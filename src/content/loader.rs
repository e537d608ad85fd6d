use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use super::{ContentError, ContentSource, Resource};
use crate::surface::WindowHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub handle: WindowHandle,
    pub resource: Resource,
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub handle: WindowHandle,
    pub resource: Resource,
    pub result: Result<String, ContentError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoaderMode {
    Threaded,
    Inline,
}

/// Runs site reads off the UI thread and hands the results back through a
/// channel that the event loop drains between frames.
///
/// Reads never block window creation, dragging or focus changes: the UI only
/// ever calls `spawn` and the non-blocking `drain`.
#[derive(Debug)]
pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
    mode: LoaderMode,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl ContentLoader {
    /// Each read runs on its own background thread.
    pub fn threaded(source: Arc<dyn ContentSource>) -> Self {
        Self::with_mode(source, LoaderMode::Threaded)
    }

    /// Reads run synchronously inside `spawn`, but their results are still
    /// only observed on the next `drain`. Used by tests for determinism.
    pub fn inline(source: Arc<dyn ContentSource>) -> Self {
        Self::with_mode(source, LoaderMode::Inline)
    }

    fn with_mode(source: Arc<dyn ContentSource>, mode: LoaderMode) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            mode,
            tx,
            rx,
        }
    }

    pub fn spawn(&self, request: FetchRequest) {
        let FetchRequest { handle, resource } = request;
        match self.mode {
            LoaderMode::Inline => {
                let result = self.source.fetch(&resource.path());
                let _ = self.tx.send(FetchOutcome {
                    handle,
                    resource,
                    result,
                });
            }
            LoaderMode::Threaded => {
                let source = Arc::clone(&self.source);
                let tx = self.tx.clone();
                let spawned = thread::Builder::new()
                    .name(format!("fetch-{}", handle.raw()))
                    .spawn(move || {
                        let result = source.fetch(&resource.path());
                        // Receiver gone means the desktop is shutting down.
                        let _ = tx.send(FetchOutcome {
                            handle,
                            resource,
                            result,
                        });
                    });
                if let Err(err) = spawned {
                    tracing::warn!(%handle, error = %err, "could not start fetch thread");
                }
            }
        }
    }

    /// Collect every outcome that has arrived so far without waiting.
    pub fn drain(&self) -> Vec<FetchOutcome> {
        self.rx.try_iter().collect()
    }
}

/// Reads still owed to open windows, keyed by window handle.
///
/// Closing a window cancels its entry; an outcome that arrives for a handle
/// with no entry is stale and must not be written anywhere.
#[derive(Debug, Default)]
pub struct PendingFetches {
    by_handle: BTreeMap<WindowHandle, Resource>,
}

impl PendingFetches {
    pub fn track(&mut self, handle: WindowHandle, resource: Resource) {
        self.by_handle.insert(handle, resource);
    }

    pub fn cancel(&mut self, handle: WindowHandle) -> bool {
        self.by_handle.remove(&handle).is_some()
    }

    /// Claim the entry an outcome belongs to. Returns false for stale outcomes.
    pub fn complete(&mut self, outcome: &FetchOutcome) -> bool {
        match self.by_handle.get(&outcome.handle) {
            Some(resource) if *resource == outcome.resource => {
                self.by_handle.remove(&outcome.handle);
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self, handle: WindowHandle) -> bool {
        self.by_handle.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_handle.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[derive(Debug)]
    struct Fixed(&'static str);

    impl ContentSource for Fixed {
        fn fetch(&self, _path: &str) -> Result<String, ContentError> {
            Ok(self.0.to_string())
        }
    }

    fn request(raw: u32) -> FetchRequest {
        FetchRequest {
            handle: WindowHandle::from_raw(raw),
            resource: Resource::Post {
                slug: "foo".to_string(),
            },
        }
    }

    #[test]
    fn inline_results_wait_for_drain() {
        let loader = ContentLoader::inline(Arc::new(Fixed("body")));
        loader.spawn(request(1));
        let outcomes = loader.drain();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].handle, WindowHandle::from_raw(1));
        assert_eq!(outcomes[0].result.as_deref().ok(), Some("body"));
        assert!(loader.drain().is_empty());
    }

    #[test]
    fn threaded_results_arrive_eventually() {
        let loader = ContentLoader::threaded(Arc::new(Fixed("body")));
        loader.spawn(request(7));
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut outcomes = Vec::new();
        while outcomes.is_empty() && Instant::now() < deadline {
            outcomes = loader.drain();
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].handle, WindowHandle::from_raw(7));
    }

    #[test]
    fn cancelled_handles_reject_late_outcomes() {
        let loader = ContentLoader::inline(Arc::new(Fixed("body")));
        let mut pending = PendingFetches::default();
        let req = request(3);
        pending.track(req.handle, req.resource.clone());
        loader.spawn(req);
        assert!(pending.cancel(WindowHandle::from_raw(3)));
        let outcome = loader.drain().remove(0);
        assert!(!pending.complete(&outcome));
        assert!(pending.is_empty());
    }
}
