use std::marker::PhantomData;

use log::{debug, warn};

use quiver_shared::{
    encode_payload, BatchedProperty, ChannelId, ChannelMode, ObserverKey, Outbound, Property,
    Recipients, ReplicaShape, ReplicaState, Role, RoleKind, TransportError,
};

use crate::{roster::ObserverSet, transport::PacketSender};

/// A property owned by this server
pub type ServerProperty<S> = Property<S, AuthorityRole<S>>;
/// A batched property owned by this server
pub type ServerBatchedProperty<S> = BatchedProperty<S, AuthorityRole<S>>;

/// Delivers payloads over the server transport.
///
/// `All` goes out in a single `send_to_all`, anything narrower is expanded
/// against the roster. Failed sends are logged and dropped.
pub struct AuthorityRole<S: ReplicaShape> {
    channel: ChannelId,
    mode: ChannelMode,
    sender: Box<dyn PacketSender>,
    roster: ObserverSet,
    phantom_s: PhantomData<fn() -> S>,
}

impl<S: ReplicaShape> AuthorityRole<S> {
    pub fn new(
        channel: ChannelId,
        mode: ChannelMode,
        sender: Box<dyn PacketSender>,
        roster: ObserverSet,
    ) -> Self {
        Self {
            channel,
            mode,
            sender,
            roster,
            phantom_s: PhantomData,
        }
    }

    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    fn send_to_one(&self, observer: &ObserverKey, bytes: &[u8]) {
        let result = self
            .sender
            .send_to_one(observer, &self.channel, self.mode, bytes);
        self.report(result);
    }

    fn report(&self, result: Result<(), TransportError>) {
        match result {
            Ok(()) => {}
            Err(error) if error.is_stale_target() => {
                debug!("dropping payload on {}: {}", self.channel, error);
            }
            Err(error) => {
                warn!("failed to send payload on {}: {}", self.channel, error);
            }
        }
    }
}

impl<S: ReplicaShape> Role<S> for AuthorityRole<S> {
    fn kind(&self) -> RoleKind {
        RoleKind::Authority
    }

    fn is_live(&self, observer: &ObserverKey) -> bool {
        self.roster.contains(observer)
    }

    fn observers(&self) -> Vec<ObserverKey> {
        self.roster.keys()
    }

    fn dispatch(&mut self, _state: &ReplicaState<S>, outbound: Outbound<S::Change>) {
        if outbound.payload.is_noop() {
            debug!("suppressed empty payload on {}", self.channel);
            return;
        }

        let bytes = match encode_payload(&outbound.payload) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!("cannot encode payload for {}: {}", self.channel, error);
                return;
            }
        };

        debug!(
            "dispatching {} change(s) on {} to {:?}, full: {}",
            outbound.payload.len(),
            self.channel,
            outbound.recipients,
            outbound.payload.full
        );

        match outbound.recipients {
            Recipients::All => {
                let result = self.sender.send_to_all(&self.channel, self.mode, &bytes);
                self.report(result);
            }
            Recipients::AllExcept(excluded) => {
                for observer in self.roster.keys() {
                    if !excluded.contains(&observer) {
                        self.send_to_one(&observer, &bytes);
                    }
                }
            }
            Recipients::One(observer) => {
                if !self.roster.contains(&observer) {
                    debug!("{} is gone, dropping payload on {}", observer, self.channel);
                    return;
                }
                self.send_to_one(&observer, &bytes);
            }
        }
    }
}
