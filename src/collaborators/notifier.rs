use tokio::sync::broadcast;
use tracing::trace;

use super::ChangeNotifier;
use crate::model::ItemId;

/// Publishes changed item ids on a Tokio broadcast channel.
///
/// Views subscribe and refresh whatever they cache for the item. Sending with no
/// subscribers, or to lagging ones, never affects the caller.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<ItemId>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ItemId> {
        self.sender.subscribe()
    }
}

impl ChangeNotifier for BroadcastNotifier {
    fn reservation_changed(&self, item_id: &ItemId) {
        if self.sender.send(item_id.clone()).is_err() {
            trace!(%item_id, "No change subscribers");
        }
    }
}

/// Drops every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl ChangeNotifier for NoopNotifier {
    fn reservation_changed(&self, _item_id: &ItemId) {}
}
