//! Reduced-motion detection
//!
//! The platform's `prefers-reduced-motion` signal is bridged into a single
//! `watch` cell. The detector owns the only sender; every section holds a
//! [`ReducedMotion`] receiver and reads the latest value without locking.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info};

use nextron_motion_core::ReducedMotionMode;

pub type ListenerId = u64;
pub type ChangeListener = Arc<dyn Fn(bool) + Send + Sync>;

/// Platform media-query facility for `(prefers-reduced-motion: reduce)`
pub trait MediaQuery: Send + Sync {
    /// Current match state
    fn matches(&self) -> bool;
    /// Register a change listener
    fn add_listener(&self, listener: ChangeListener) -> ListenerId;
    /// Deregister a listener; unknown ids are ignored
    fn remove_listener(&self, id: ListenerId);
}

#[derive(Default)]
struct ManualState {
    matches: bool,
    next_id: ListenerId,
    listeners: Vec<(ListenerId, ChangeListener)>,
}

/// In-memory media query, flipped by hand
///
/// Used by tests and the CLI simulation in place of a browser or OS bridge.
#[derive(Default)]
pub struct ManualMediaQuery {
    state: Mutex<ManualState>,
}

impl ManualMediaQuery {
    pub fn new(matches: bool) -> Self {
        Self {
            state: Mutex::new(ManualState {
                matches,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Change the setting and fire listeners synchronously
    pub fn set(&self, matches: bool) {
        let listeners: Vec<ChangeListener> = {
            let mut state = self.lock();
            if state.matches == matches {
                return;
            }
            state.matches = matches;
            state.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in listeners {
            listener(matches);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

impl MediaQuery for ManualMediaQuery {
    fn matches(&self) -> bool {
        self.lock().matches
    }

    fn add_listener(&self, listener: ChangeListener) -> ListenerId {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.lock().listeners.retain(|(existing, _)| *existing != id);
    }
}

/// Bridges the platform preference into a watch cell
///
/// Dropping the detector deregisters its platform listener.
pub struct ReducedMotionDetector {
    tx: Arc<watch::Sender<bool>>,
    source: Option<Arc<dyn MediaQuery>>,
    listener: Option<ListenerId>,
}

impl ReducedMotionDetector {
    /// Attach to a platform source, or default to "not reduced" without one
    pub fn new(source: Option<Arc<dyn MediaQuery>>, mode: ReducedMotionMode) -> Self {
        let system = source.as_ref().map(|s| s.matches()).unwrap_or(false);
        let (tx, _) = watch::channel(mode.resolve(system));
        let tx = Arc::new(tx);

        let listener = source.as_ref().map(|s| {
            let tx = Arc::clone(&tx);
            s.add_listener(Arc::new(move |matches: bool| {
                let value = mode.resolve(matches);
                let changed = tx.send_if_modified(|current| {
                    if *current == value {
                        false
                    } else {
                        *current = value;
                        true
                    }
                });
                if changed {
                    info!("Reduced motion preference changed: {}", value);
                }
            }))
        });

        if source.is_none() {
            debug!("No reduced-motion media query available, assuming motion allowed");
        }

        Self { tx, source, listener }
    }

    /// Detector for a platform without a media-query facility
    pub fn unavailable() -> Self {
        Self::new(None, ReducedMotionMode::System)
    }

    /// Current preference
    pub fn get(&self) -> bool {
        *self.tx.borrow()
    }

    /// A read-only handle for one consumer
    pub fn subscribe(&self) -> ReducedMotion {
        ReducedMotion {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Drop for ReducedMotionDetector {
    fn drop(&mut self) {
        if let (Some(source), Some(id)) = (&self.source, self.listener.take()) {
            source.remove_listener(id);
        }
    }
}

/// Read-only view of the reduced-motion preference
#[derive(Debug, Clone)]
pub struct ReducedMotion {
    rx: watch::Receiver<bool>,
}

impl ReducedMotion {
    /// A handle pinned to a fixed value
    pub fn fixed(value: bool) -> Self {
        let (tx, rx) = watch::channel(value);
        drop(tx);
        Self { rx }
    }

    pub fn get(&self) -> bool {
        *self.rx.borrow()
    }

    /// The new value if it changed since the last call, marking it seen
    pub fn take_change(&mut self) -> Option<bool> {
        if self.rx.has_changed().unwrap_or(false) {
            Some(*self.rx.borrow_and_update())
        } else {
            None
        }
    }

    /// Wait for the next change; `None` once the detector is gone
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
