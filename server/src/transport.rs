use quiver_shared::{ChannelId, ChannelMode, ObserverKey, TransportError};

/// Something the server's transport reports on `receive`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketEvent {
    ObserverConnected(ObserverKey),
    ObserverDeparted(ObserverKey),
    /// Any inbound message on a channel, treated as a sync request
    Packet {
        observer: ObserverKey,
        channel: ChannelId,
        payload: Vec<u8>,
    },
}

/// Used to send packets from the Server to its observers
pub trait PacketSender: PacketSenderClone + Send + Sync {
    fn send_to_one(
        &self,
        observer: &ObserverKey,
        channel: &ChannelId,
        mode: ChannelMode,
        payload: &[u8],
    ) -> Result<(), TransportError>;

    fn send_to_all(
        &self,
        channel: &ChannelId,
        mode: ChannelMode,
        payload: &[u8],
    ) -> Result<(), TransportError>;
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

/// Used to receive connection changes and packets from observers
pub trait PacketReceiver: Send {
    /// Returns `Ok(None)` once nothing more is queued
    fn receive(&mut self) -> Result<Option<SocketEvent>, TransportError>;
}
