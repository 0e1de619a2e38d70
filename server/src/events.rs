use std::mem;

use quiver_shared::{ChannelId, ObserverKey};

use crate::QuiverServerError;

/// Everything that happened during one call to [`Server::receive`](crate::Server::receive)
pub struct ServerEvents {
    connections: Vec<ObserverKey>,
    departures: Vec<ObserverKey>,
    sync_requests: Vec<(ObserverKey, ChannelId)>,
    errors: Vec<QuiverServerError>,
    empty: bool,
}

impl ServerEvents {
    pub(crate) fn new() -> Self {
        Self {
            connections: Vec::new(),
            departures: Vec::new(),
            sync_requests: Vec::new(),
            errors: Vec::new(),
            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn connections(&self) -> &[ObserverKey] {
        &self.connections
    }

    pub fn departures(&self) -> &[ObserverKey] {
        &self.departures
    }

    /// Sync requests that were answered, in arrival order
    pub fn sync_requests(&self) -> &[(ObserverKey, ChannelId)] {
        &self.sync_requests
    }

    pub fn errors(&self) -> &[QuiverServerError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<QuiverServerError> {
        mem::take(&mut self.errors)
    }

    // Crate-public

    pub(crate) fn push_connection(&mut self, observer: &ObserverKey) {
        self.connections.push(*observer);
        self.empty = false;
    }

    pub(crate) fn push_departure(&mut self, observer: &ObserverKey) {
        self.departures.push(*observer);
        self.empty = false;
    }

    pub(crate) fn push_sync_request(&mut self, observer: &ObserverKey, channel: &ChannelId) {
        self.sync_requests.push((*observer, channel.clone()));
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: QuiverServerError) {
        self.errors.push(error);
        self.empty = false;
    }
}
