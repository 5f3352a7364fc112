//! Document-level hotkey that focuses a search field.
//!
//! A [`HotkeyRegistry`] plays the part of the document key listener. Each
//! search widget that wants the hotkey holds a [`HotkeyHandle`]; dropping
//! the handle unsubscribes, so no listener outlives its widget.
//!
//! Dispatch only flags the matching handles. The owning controller picks
//! the flag up on its next `tick` and focuses itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use once_cell::sync::Lazy;

/// Key that focuses the search field by default.
pub const GLOBAL_HOTKEY: char = '/';

/// Process-wide registry, for hosts with a single document.
static GLOBAL_REGISTRY: Lazy<HotkeyRegistry> = Lazy::new(HotkeyRegistry::new);

/// What currently holds keyboard focus when a key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// Nothing in particular (the document body).
    Nothing,
    /// A single-line text input, including the search field itself.
    TextInput,
    /// A multi-line text field.
    TextArea,
    /// Any other focusable element (buttons, lists, ...).
    Other,
}

impl FocusTarget {
    /// Text-entry targets must receive the key as typed text.
    pub fn is_text_entry(self) -> bool {
        matches!(self, FocusTarget::TextInput | FocusTarget::TextArea)
    }
}

/// A key press seen at document level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: char,
    pub target: FocusTarget,
}

impl KeyEvent {
    pub fn new(key: char, target: FocusTarget) -> Self {
        Self { key, target }
    }
}

/// Result of dispatching a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyOutcome {
    /// A binding took the key; the host must suppress its default action.
    Intercepted,
    /// The key continues to its target untouched.
    Ignored,
}

struct Binding {
    id: u64,
    key: char,
    triggered: Arc<AtomicBool>,
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    bindings: Vec<Binding>,
}

fn lock(inner: &Mutex<RegistryInner>) -> MutexGuard<'_, RegistryInner> {
    // Bindings stay consistent even if a holder panicked mid-dispatch
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Registry of hotkey subscriptions.
#[derive(Clone, Default)]
pub struct HotkeyRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl HotkeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide registry.
    pub fn global() -> &'static HotkeyRegistry {
        &GLOBAL_REGISTRY
    }

    /// Subscribe to `key`. The subscription lives as long as the handle.
    pub fn subscribe(&self, key: char) -> HotkeyHandle {
        let triggered = Arc::new(AtomicBool::new(false));
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.bindings.push(Binding {
            id,
            key,
            triggered: Arc::clone(&triggered),
        });

        tracing::debug!(id, %key, "hotkey subscribed");

        HotkeyHandle {
            id,
            key,
            triggered,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver a document-level key press.
    pub fn dispatch(&self, event: KeyEvent) -> HotkeyOutcome {
        if event.target.is_text_entry() {
            return HotkeyOutcome::Ignored;
        }

        let inner = lock(&self.inner);
        let mut hit = false;
        for binding in inner.bindings.iter().filter(|b| b.key == event.key) {
            binding.triggered.store(true, Ordering::SeqCst);
            hit = true;
        }

        if hit {
            HotkeyOutcome::Intercepted
        } else {
            HotkeyOutcome::Ignored
        }
    }

    /// Number of live subscriptions.
    pub fn binding_count(&self) -> usize {
        lock(&self.inner).bindings.len()
    }
}

/// An owned hotkey subscription.
pub struct HotkeyHandle {
    id: u64,
    key: char,
    triggered: Arc<AtomicBool>,
    registry: Weak<Mutex<RegistryInner>>,
}

impl HotkeyHandle {
    pub fn key(&self) -> char {
        self.key
    }

    /// Consume a pending trigger.
    pub fn take_triggered(&self) -> bool {
        self.triggered.swap(false, Ordering::SeqCst)
    }
}

impl Drop for HotkeyHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            lock(&inner).bindings.retain(|b| b.id != self.id);
            tracing::debug!(id = self.id, "hotkey unsubscribed");
        }
    }
}

impl std::fmt::Debug for HotkeyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotkeyHandle")
            .field("id", &self.id)
            .field("key", &self.key)
            .finish()
    }
}

/// A widget's hotkey: the key it answers to and, while enabled, its handle.
#[derive(Debug)]
pub struct GlobalHotkeyBinding {
    key: char,
    handle: Option<HotkeyHandle>,
}

impl GlobalHotkeyBinding {
    pub fn new(key: char) -> Self {
        Self { key, handle: None }
    }

    /// Install or remove the subscription. Repeating the current state is a no-op.
    pub fn set_enabled(&mut self, enabled: bool, registry: &HotkeyRegistry) {
        match (enabled, self.handle.is_some()) {
            (true, false) => self.handle = Some(registry.subscribe(self.key)),
            (false, true) => self.disable(),
            _ => {}
        }
    }

    /// Drop the subscription, if any.
    pub fn disable(&mut self) {
        self.handle = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.handle.is_some()
    }

    pub fn key(&self) -> char {
        self.key
    }

    /// Consume a pending trigger, if the binding is enabled.
    pub fn take_triggered(&self) -> bool {
        self.handle.as_ref().is_some_and(HotkeyHandle::take_triggered)
    }
}

impl Default for GlobalHotkeyBinding {
    fn default() -> Self {
        Self::new(GLOBAL_HOTKEY)
    }
}
