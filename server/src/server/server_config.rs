use std::default::Default;

use quiver_shared::{ChannelMode, DEFAULT_MAX_CHANNEL_NAME_LENGTH};

/// Contains Config properties which will be used by the Server
#[derive(Clone)]
pub struct ServerConfig {
    /// Delivery mode for properties created without an explicit one
    pub channel_mode: ChannelMode,
    /// Channel name hints longer than this are truncated
    pub max_channel_name_length: usize,
    /// Whether a packet from an observer the transport never announced
    /// registers that observer
    pub implicit_join: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            channel_mode: ChannelMode::Reliable,
            max_channel_name_length: DEFAULT_MAX_CHANNEL_NAME_LENGTH,
            implicit_join: true,
        }
    }
}
