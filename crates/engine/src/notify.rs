//! The "notify user" capability.

use hookdash_types::Notice;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Presents one notice per action outcome. How it is shown is up to the
/// implementation (modal, printed line, recorder).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<F> Notifier for F
where
    F: Fn(Notice) + Send + Sync,
{
    fn notify(&self, notice: Notice) {
        self(notice)
    }
}

/// Forwards notices to an event loop that owns the presentation.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new(sender: UnboundedSender<Notice>) -> Self {
        Self { sender }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if self.sender.send(notice).is_err() {
            debug!(?notice, "notice receiver dropped");
        }
    }
}
