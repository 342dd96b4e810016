//! The update channel between a source and the controller.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use st_core::PositionUpdate;

/// Create a connected sender/receiver pair.
pub fn update_channel() -> (UpdateSender, UpdateReceiver) {
    let (tx, rx) = mpsc::channel();
    (UpdateSender(tx), UpdateReceiver(rx))
}

/// Producer half.  Cloneable; the stream ends when every clone is dropped.
#[derive(Clone, Debug)]
pub struct UpdateSender(Sender<PositionUpdate>);

impl UpdateSender {
    /// Push one update.  Returns `false` once the receiver is gone, which
    /// producers treat as "stop".
    pub fn send(&self, update: PositionUpdate) -> bool {
        self.0.send(update).is_ok()
    }
}

/// Consumer half.
#[derive(Debug)]
pub struct UpdateReceiver(Receiver<PositionUpdate>);

/// Result of a non-blocking poll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Poll {
    Ready(PositionUpdate),
    Empty,
    /// Every sender has been dropped and the queue is drained.
    Closed,
}

impl UpdateReceiver {
    /// Block until the next update, or `None` when the stream has ended.
    pub fn recv(&self) -> Option<PositionUpdate> {
        self.0.recv().ok()
    }

    pub fn poll(&self) -> Poll {
        match self.0.try_recv() {
            Ok(u) => Poll::Ready(u),
            Err(TryRecvError::Empty) => Poll::Empty,
            Err(TryRecvError::Disconnected) => Poll::Closed,
        }
    }
}
