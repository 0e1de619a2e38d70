use std::mem;

use quiver_shared::ChannelId;

use crate::QuiverClientError;

/// Everything that happened during one call to [`Client::receive`](crate::Client::receive)
pub struct ClientEvents {
    updates: Vec<ChannelId>,
    errors: Vec<QuiverClientError>,
}

impl ClientEvents {
    pub(crate) fn new() -> Self {
        Self {
            updates: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.errors.is_empty()
    }

    /// Channels that applied a payload, once per payload
    pub fn updates(&self) -> &[ChannelId] {
        &self.updates
    }

    pub fn errors(&self) -> &[QuiverClientError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<QuiverClientError> {
        mem::take(&mut self.errors)
    }

    pub(crate) fn push_update(&mut self, channel: ChannelId) {
        self.updates.push(channel);
    }

    pub(crate) fn push_error(&mut self, error: QuiverClientError) {
        self.errors.push(error);
    }
}
