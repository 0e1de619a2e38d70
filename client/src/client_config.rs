use std::default::Default;

use quiver_shared::ChannelMode;

/// Contains Config properties which will be used by a Client
#[derive(Clone)]
pub struct ClientConfig {
    /// Whether mirroring a property immediately asks the server for its
    /// current state. Without a request the mirror only sees later changes.
    pub request_sync_on_observe: bool,
    /// Delivery mode used for requests sent to the server
    pub channel_mode: ChannelMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_sync_on_observe: true,
            channel_mode: ChannelMode::Reliable,
        }
    }
}
