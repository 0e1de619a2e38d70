use tokio::sync::watch;

use crate::ReadyError;

/// Resolves once a mirror has received its first value
#[derive(Clone)]
pub struct ReadySignal {
    receiver: watch::Receiver<bool>,
}

impl ReadySignal {
    pub(crate) fn new(receiver: watch::Receiver<bool>) -> Self {
        Self { receiver }
    }

    pub fn is_ready(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Completes immediately if the value already arrived
    pub async fn wait(&mut self) -> Result<(), ReadyError> {
        self.receiver
            .wait_for(|ready| *ready)
            .await
            .map(|_| ())
            .map_err(|_| ReadyError::MirrorDropped)
    }
}
