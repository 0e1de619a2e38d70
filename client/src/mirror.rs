use std::any::Any;

use log::debug;
use tokio::sync::watch;

use quiver_shared::{
    decode_payload, ChannelId, CodecError, DiffPayload, HandlerKey, ReplicaShape, RoleKind,
    Signal,
};

use crate::ReadySignal;

/// The observer's copy of a replicated property.
///
/// A mirror only ever applies what the authority sends. It has no way to
/// write the value or address other observers.
pub struct Mirror<S: ReplicaShape> {
    channel: ChannelId,
    value: S::Value,
    ready: bool,
    signal: Signal<S::Value, S::Change>,
    ready_sender: watch::Sender<bool>,
}

impl<S: ReplicaShape> Mirror<S> {
    pub fn new(channel: ChannelId) -> Self {
        let (ready_sender, _) = watch::channel(false);
        Self {
            channel,
            value: S::Value::default(),
            ready: false,
            signal: Signal::new(),
            ready_sender,
        }
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    pub fn kind(&self) -> RoleKind {
        RoleKind::Observer
    }

    /// Owned copy of the mirrored value
    pub fn get(&self) -> S::Value {
        self.value.clone()
    }

    /// Whether a value has arrived yet
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn ready_signal(&self) -> ReadySignal {
        ReadySignal::new(self.ready_sender.subscribe())
    }

    /// Subscribe to every applied payload
    pub fn on_changed<F>(&mut self, handler: F) -> HandlerKey
    where
        F: FnMut(&S::Value, &DiffPayload<S::Change>) + Send + 'static,
    {
        self.signal.connect(handler)
    }

    /// Like [`Mirror::on_changed`], but also called right away with the
    /// current value once one has arrived
    pub fn observe<F>(&mut self, handler: F) -> HandlerKey
    where
        F: FnMut(&S::Value, &DiffPayload<S::Change>) + Send + 'static,
    {
        let key = self.signal.connect(handler);
        if self.ready {
            let payload = S::full_payload(&self.value);
            self.signal.fire_one(&key, &self.value, &payload);
        }
        key
    }

    pub fn disconnect(&mut self, key: &HandlerKey) -> bool {
        self.signal.disconnect(key)
    }

    /// Apply one payload from the authority and notify handlers
    pub fn apply(&mut self, payload: &DiffPayload<S::Change>) {
        S::apply_payload(&mut self.value, payload);

        if !self.ready {
            if S::is_vacant(&self.value) {
                debug!("mirror {} still vacant after payload", self.channel);
                return;
            }
            self.ready = true;
            self.ready_sender.send_replace(true);
        }

        self.signal.fire(&self.value, payload);
    }
}

/// Type-erased surface the client uses to route incoming bytes
pub trait MirrorEntity: Any + Send {
    fn channel(&self) -> &ChannelId;

    fn apply_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<S: ReplicaShape> MirrorEntity for Mirror<S> {
    fn channel(&self) -> &ChannelId {
        &self.channel
    }

    fn apply_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let payload = decode_payload::<S::Change>(bytes)?;
        self.apply(&payload);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
