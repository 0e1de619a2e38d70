/// In-memory transport for end-to-end testing
/// Routes payloads between one server and any number of clients without network I/O

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{Arc, Mutex, MutexGuard},
};

use quiver_client::transport::{
    PacketReceiver as ClientPacketReceiver, PacketSender as ClientPacketSender,
};
use quiver_server::transport::{
    PacketReceiver as ServerPacketReceiver, PacketSender as ServerPacketSender, SocketEvent,
};
use quiver_shared::{ChannelId, ChannelMode, ObserverKey, TransportError};

/// One payload the server handed to the transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentPacket {
    pub observer: ObserverKey,
    pub channel: ChannelId,
    pub mode: ChannelMode,
    pub length: usize,
}

#[derive(Default)]
struct HubState {
    next_observer: u64,
    connected: HashSet<ObserverKey>,
    server_inbox: VecDeque<SocketEvent>,
    client_inboxes: HashMap<ObserverKey, VecDeque<(ChannelId, Vec<u8>)>>,
    sent: Vec<SentPacket>,
}

/// Shared switchboard connecting a server socket to client sockets
#[derive(Clone, Default)]
pub struct LocalHub {
    state: Arc<Mutex<HubState>>,
}

impl LocalHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        let Ok(state) = self.state.lock() else {
            panic!("local hub lock poisoned");
        };
        state
    }

    pub fn server_socket(&self) -> (Box<dyn ServerPacketSender>, Box<dyn ServerPacketReceiver>) {
        (
            Box::new(LocalServerSender { hub: self.clone() }),
            Box::new(LocalServerReceiver { hub: self.clone() }),
        )
    }

    /// Connect a new client, queueing its connection for the server
    pub fn connect_client(
        &self,
    ) -> (
        ObserverKey,
        Box<dyn ClientPacketSender>,
        Box<dyn ClientPacketReceiver>,
    ) {
        let observer = {
            let mut state = self.lock();
            state.next_observer += 1;
            let observer = ObserverKey::new(state.next_observer);
            state.connected.insert(observer);
            state.client_inboxes.insert(observer, VecDeque::new());
            state
                .server_inbox
                .push_back(SocketEvent::ObserverConnected(observer));
            observer
        };

        (
            observer,
            Box::new(LocalClientSender {
                hub: self.clone(),
                observer,
            }),
            Box::new(LocalClientReceiver {
                hub: self.clone(),
                observer,
            }),
        )
    }

    /// Drop a client, queueing its departure for the server
    pub fn disconnect_client(&self, observer: &ObserverKey) {
        let mut state = self.lock();
        state.connected.remove(observer);
        state.client_inboxes.remove(observer);
        state
            .server_inbox
            .push_back(SocketEvent::ObserverDeparted(*observer));
    }

    pub fn is_connected(&self, observer: &ObserverKey) -> bool {
        self.lock().connected.contains(observer)
    }

    /// Every payload the server sent so far
    pub fn sent(&self) -> Vec<SentPacket> {
        self.lock().sent.clone()
    }

    pub fn sent_to(&self, observer: &ObserverKey) -> usize {
        self.lock()
            .sent
            .iter()
            .filter(|packet| &packet.observer == observer)
            .count()
    }

    pub fn clear_sent(&self) {
        self.lock().sent.clear();
    }

    /// Payloads waiting for a client to receive them
    pub fn pending_for(&self, observer: &ObserverKey) -> usize {
        self.lock()
            .client_inboxes
            .get(observer)
            .map(VecDeque::len)
            .unwrap_or(0)
    }

    /// Queue raw bytes for a client as if the server had sent them
    pub fn inject_to_client(&self, observer: &ObserverKey, channel: ChannelId, payload: Vec<u8>) {
        if let Some(inbox) = self.lock().client_inboxes.get_mut(observer) {
            inbox.push_back((channel, payload));
        }
    }

    /// Queue a request for the server as if a client had sent it
    pub fn inject_to_server(&self, observer: ObserverKey, channel: ChannelId) {
        self.lock().server_inbox.push_back(SocketEvent::Packet {
            observer,
            channel,
            payload: Vec::new(),
        });
    }
}

// Server Socket Components

#[derive(Clone)]
struct LocalServerSender {
    hub: LocalHub,
}

impl ServerPacketSender for LocalServerSender {
    fn send_to_one(
        &self,
        observer: &ObserverKey,
        channel: &ChannelId,
        mode: ChannelMode,
        payload: &[u8],
    ) -> Result<(), TransportError> {
        let mut state = self.hub.lock();
        let Some(inbox) = state.client_inboxes.get_mut(observer) else {
            return Err(TransportError::ObserverGone {
                observer: *observer,
                channel: channel.clone(),
            });
        };
        inbox.push_back((channel.clone(), payload.to_vec()));
        state.sent.push(SentPacket {
            observer: *observer,
            channel: channel.clone(),
            mode,
            length: payload.len(),
        });
        Ok(())
    }

    fn send_to_all(
        &self,
        channel: &ChannelId,
        mode: ChannelMode,
        payload: &[u8],
    ) -> Result<(), TransportError> {
        let mut observers: Vec<ObserverKey> = self.hub.lock().connected.iter().copied().collect();
        observers.sort();
        for observer in observers {
            self.send_to_one(&observer, channel, mode, payload)?;
        }
        Ok(())
    }
}

struct LocalServerReceiver {
    hub: LocalHub,
}

impl ServerPacketReceiver for LocalServerReceiver {
    fn receive(&mut self) -> Result<Option<SocketEvent>, TransportError> {
        Ok(self.hub.lock().server_inbox.pop_front())
    }
}

// Client Socket Components

#[derive(Clone)]
struct LocalClientSender {
    hub: LocalHub,
    observer: ObserverKey,
}

impl ClientPacketSender for LocalClientSender {
    fn send(
        &self,
        channel: &ChannelId,
        _mode: ChannelMode,
        payload: &[u8],
    ) -> Result<(), TransportError> {
        let mut state = self.hub.lock();
        if !state.connected.contains(&self.observer) {
            return Err(TransportError::Disconnected);
        }
        state.server_inbox.push_back(SocketEvent::Packet {
            observer: self.observer,
            channel: channel.clone(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

struct LocalClientReceiver {
    hub: LocalHub,
    observer: ObserverKey,
}

impl ClientPacketReceiver for LocalClientReceiver {
    fn receive(&mut self) -> Result<Option<(ChannelId, Vec<u8>)>, TransportError> {
        let mut state = self.hub.lock();
        Ok(state
            .client_inboxes
            .get_mut(&self.observer)
            .and_then(VecDeque::pop_front))
    }
}
