//! Broadcast hook invoked after every successful command.

use sketchduel_protocol::AreaSnapshot;
use tokio::sync::mpsc;

/// Receives the area's state after each successful mutation.
///
/// Observers never see failed commands. Any `FnMut(&AreaSnapshot)` closure
/// is an observer.
pub trait AreaObserver: Send {
    fn notify(&mut self, snapshot: &AreaSnapshot);

    /// Closed observers are dropped before the next broadcast.
    fn is_closed(&self) -> bool {
        false
    }
}

impl<F> AreaObserver for F
where
    F: FnMut(&AreaSnapshot) + Send,
{
    fn notify(&mut self, snapshot: &AreaSnapshot) {
        self(snapshot)
    }
}

/// Sender half of a snapshot subscription.
pub type SnapshotSender = mpsc::UnboundedSender<AreaSnapshot>;

/// Forwards snapshots to a subscriber's channel.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: SnapshotSender,
}

impl ChannelObserver {
    pub fn new(sender: SnapshotSender) -> Self {
        Self { sender }
    }
}

impl AreaObserver for ChannelObserver {
    fn notify(&mut self, snapshot: &AreaSnapshot) {
        // A dropped receiver is pruned on the next broadcast.
        let _ = self.sender.send(snapshot.clone());
    }

    fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
