//! Host capabilities injected into the placement controller.
//!
//! The controller never reaches for process-wide state. The clipboard used
//! for copy/paste and the global pointer subscription that keeps a gesture
//! alive while the pointer leaves the item are both supplied by the host.
//!
//! Pointer capture is held through a [`CaptureGuard`]: acquiring it attaches
//! the host's listeners and dropping it detaches them, so every way a gesture
//! can end (release, cancel, the controller itself being dropped) releases
//! the subscription exactly once.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::rc::Rc;

use crate::doc::FurnitureItem;

/// Storage for a single copied item.
pub trait Clipboard {
    /// The stored item, if any.
    fn load(&self) -> Option<FurnitureItem>;
    /// Replace the stored item.
    fn store(&mut self, item: FurnitureItem);
}

/// Clipboard held in memory for the lifetime of the controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    item: Option<FurnitureItem>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn load(&self) -> Option<FurnitureItem> {
        self.item.clone()
    }

    fn store(&mut self, item: FurnitureItem) {
        self.item = Some(item);
    }
}

/// Global pointer-move / pointer-up subscription for the duration of a gesture.
pub trait PointerCapture {
    /// Start delivering pointer events regardless of what is under the pointer.
    fn attach(&self);
    /// Stop delivering them.
    fn detach(&self);
}

/// Scoped pointer capture. Detaches on drop.
pub struct CaptureGuard {
    capture: Rc<dyn PointerCapture>,
}

impl CaptureGuard {
    /// Attach `capture` and return the guard that will detach it.
    #[must_use]
    pub fn acquire(capture: Rc<dyn PointerCapture>) -> Self {
        capture.attach();
        Self { capture }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.capture.detach();
    }
}

impl std::fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureGuard").finish_non_exhaustive()
    }
}
