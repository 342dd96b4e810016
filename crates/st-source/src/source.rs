//! The position-source seam.

use st_core::PositionUpdate;

use crate::{SourceResult, Subscription, UpdateSender, WatchOptions};

/// A device (or stand-in) that reports positions.
///
/// The controller calls these in order: `request_permission`, then, if
/// granted, `current_position` once and `subscribe` once.  Holding more than
/// one live subscription per session is the caller's bug; sources do not
/// guard against it.
pub trait PositionSource {
    /// Ask for location access.  May block on user interaction.
    fn request_permission(&mut self) -> bool;

    /// One-shot current fix.  Callers treat an error as "no initial fix".
    fn current_position(&mut self) -> SourceResult<PositionUpdate>;

    /// Start pushing updates into `sink`, thinned by `options`.  The stream
    /// ends when the sink is dropped or the returned handle is released.
    fn subscribe(&mut self, options: &WatchOptions, sink: UpdateSender) -> SourceResult<Subscription>;
}

impl<S: PositionSource + ?Sized> PositionSource for Box<S> {
    fn request_permission(&mut self) -> bool {
        (**self).request_permission()
    }

    fn current_position(&mut self) -> SourceResult<PositionUpdate> {
        (**self).current_position()
    }

    fn subscribe(&mut self, options: &WatchOptions, sink: UpdateSender) -> SourceResult<Subscription> {
        (**self).subscribe(options, sink)
    }
}
