//! Scoped ownership of a position stream.

use std::fmt;

type ReleaseFn = Box<dyn FnOnce() + Send>;

/// Handle to an active position stream.
///
/// [`release`](Self::release) stops delivery; calling it again is a no-op.
/// Dropping the handle releases it too, so every exit path tears the stream
/// down.
pub struct Subscription {
    on_release: Option<ReleaseFn>,
}

impl Subscription {
    /// A subscription that runs `on_release` exactly once.
    pub fn new(on_release: impl FnOnce() + Send + 'static) -> Self {
        Self { on_release: Some(Box::new(on_release)) }
    }

    /// A subscription with nothing to tear down (the source already
    /// delivered everything synchronously).
    pub fn finished() -> Self {
        Self { on_release: None }
    }

    pub fn is_active(&self) -> bool {
        self.on_release.is_some()
    }

    pub fn release(&mut self) {
        if let Some(f) = self.on_release.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
