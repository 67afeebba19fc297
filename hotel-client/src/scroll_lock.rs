//! Modal scroll lock
//!
//! While a modal is open the page must not scroll, and closing it must put
//! the page back where it was. [`ScrollLock`] is a guard: the page is
//! locked while at least one guard is alive and restored when the last one
//! drops, on every exit path including teardown.

use std::sync::{Arc, Mutex, PoisonError};

/// The scrollable page, as seen by the lock
pub trait ScrollSurface: Send + Sync {
    /// Current vertical offset
    fn scroll_offset(&self) -> f64;
    /// Freeze the page at `offset`
    fn lock_at(&self, offset: f64);
    /// Unfreeze and scroll back to `offset`
    fn unlock_to(&self, offset: f64);
}

#[derive(Debug, Default)]
struct LockState {
    depth: usize,
    saved_offset: f64,
}

/// Shared by every modal on the same page
pub struct ScrollLockManager {
    surface: Arc<dyn ScrollSurface>,
    state: Mutex<LockState>,
}

impl ScrollLockManager {
    pub fn new(surface: Arc<dyn ScrollSurface>) -> Arc<Self> {
        Arc::new(Self {
            surface,
            state: Mutex::new(LockState::default()),
        })
    }

    /// Lock the page for as long as the returned guard lives.
    ///
    /// Nested modals share the lock; only the outermost saves and restores
    /// the offset.
    pub fn acquire(self: &Arc<Self>) -> ScrollLock {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.depth == 0 {
            state.saved_offset = self.surface.scroll_offset();
            self.surface.lock_at(state.saved_offset);
            tracing::trace!(offset = state.saved_offset, "Scroll locked");
        }
        state.depth += 1;
        ScrollLock {
            manager: Arc::clone(self),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .depth
            > 0
    }

    fn release(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.depth = state.depth.saturating_sub(1);
        if state.depth == 0 {
            self.surface.unlock_to(state.saved_offset);
            tracing::trace!(offset = state.saved_offset, "Scroll restored");
        }
    }
}

/// Held while a modal is open
#[must_use = "the page unlocks as soon as the guard is dropped"]
pub struct ScrollLock {
    manager: Arc<ScrollLockManager>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.manager.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakePage {
        offset: Mutex<f64>,
        locked: Mutex<bool>,
        unlocks: Mutex<usize>,
    }

    impl FakePage {
        fn scroll_to(&self, offset: f64) {
            *self.offset.lock().unwrap() = offset;
        }
    }

    impl ScrollSurface for FakePage {
        fn scroll_offset(&self) -> f64 {
            *self.offset.lock().unwrap()
        }

        fn lock_at(&self, _offset: f64) {
            *self.locked.lock().unwrap() = true;
        }

        fn unlock_to(&self, offset: f64) {
            *self.locked.lock().unwrap() = false;
            *self.unlocks.lock().unwrap() += 1;
            *self.offset.lock().unwrap() = offset;
        }
    }

    #[test]
    fn test_restores_offset_on_drop() {
        let page = Arc::new(FakePage::default());
        page.scroll_to(420.0);
        let manager = ScrollLockManager::new(page.clone());

        let guard = manager.acquire();
        assert!(*page.locked.lock().unwrap());
        // a layout shift while locked must not leak into the restore
        page.scroll_to(0.0);
        drop(guard);

        assert!(!*page.locked.lock().unwrap());
        assert_eq!(page.scroll_offset(), 420.0);
        assert!(!manager.is_locked());
    }

    #[test]
    fn test_nested_modals_restore_once() {
        let page = Arc::new(FakePage::default());
        page.scroll_to(120.0);
        let manager = ScrollLockManager::new(page.clone());

        let outer = manager.acquire();
        page.scroll_to(5.0);
        let inner = manager.acquire();
        drop(inner);
        assert!(manager.is_locked());
        assert_eq!(*page.unlocks.lock().unwrap(), 0);

        drop(outer);
        assert_eq!(*page.unlocks.lock().unwrap(), 1);
        assert_eq!(page.scroll_offset(), 120.0);
    }

    #[test]
    fn test_released_on_panic_unwind() {
        let page = Arc::new(FakePage::default());
        page.scroll_to(64.0);
        let manager = ScrollLockManager::new(page.clone());

        let m = Arc::clone(&manager);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = m.acquire();
            panic!("modal render failed");
        }));
        assert!(result.is_err());
        assert!(!manager.is_locked());
        assert_eq!(page.scroll_offset(), 64.0);
    }
}
