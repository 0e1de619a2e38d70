use quiver_shared::{ChannelId, ChannelMode, TransportError};

/// Used to send requests from the Client to the Server
pub trait PacketSender: PacketSenderClone + Send + Sync {
    fn send(&self, channel: &ChannelId, mode: ChannelMode, payload: &[u8])
        -> Result<(), TransportError>;
}

/// Used to clone Box<dyn PacketSender>
pub trait PacketSenderClone {
    /// Clone the boxed PacketSender
    fn clone_box(&self) -> Box<dyn PacketSender>;
}

impl<T: 'static + PacketSender + Clone> PacketSenderClone for T {
    fn clone_box(&self) -> Box<dyn PacketSender> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn PacketSender> {
    fn clone(&self) -> Box<dyn PacketSender> {
        PacketSenderClone::clone_box(self.as_ref())
    }
}

/// Used to receive payloads from the Server
pub trait PacketReceiver: Send {
    /// Returns `Ok(None)` once nothing more is queued
    fn receive(&mut self) -> Result<Option<(ChannelId, Vec<u8>)>, TransportError>;
}
