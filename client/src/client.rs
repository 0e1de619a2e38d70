use std::{any::type_name, collections::HashMap};

use log::{info, warn};

use quiver_shared::{ChannelId, ChannelRegistry, ReplicaShape};

use crate::{
    events::ClientEvents,
    mirror::{Mirror, MirrorEntity},
    mirror_key::MirrorKey,
    transport::{PacketReceiver, PacketSender},
    ClientConfig, QuiverClientError,
};

/// Mirrors replicated properties from a server
pub struct Client {
    config: ClientConfig,
    io: Option<(Box<dyn PacketSender>, Box<dyn PacketReceiver>)>,
    registry: ChannelRegistry,
    mirrors: HashMap<ChannelId, Box<dyn MirrorEntity>>,
}

impl Client {
    /// Create a new Client
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            io: None,
            registry: ChannelRegistry::default(),
            mirrors: HashMap::new(),
        }
    }

    /// Attach the transport connected to the server
    pub fn io_load(&mut self, sender: Box<dyn PacketSender>, receiver: Box<dyn PacketReceiver>) {
        self.io = Some((sender, receiver));
    }

    pub fn is_connected(&self) -> bool {
        self.io.is_some()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // Mirrors

    /// Start mirroring the property on `channel`, asking the server for its
    /// current state when the config says so
    pub fn mirror_property<S: ReplicaShape>(
        &mut self,
        channel: ChannelId,
    ) -> Result<MirrorKey<S>, QuiverClientError> {
        if self.mirrors.contains_key(&channel) {
            return Err(QuiverClientError::AlreadyMirrored { channel });
        }
        if self.config.request_sync_on_observe {
            self.send_request(&channel)?;
        }

        let channel = self.registry.get_or_create(channel.as_str());
        info!("mirroring {}", channel);
        self.mirrors
            .insert(channel.clone(), Box::new(Mirror::<S>::new(channel.clone())));
        Ok(MirrorKey::new(channel))
    }

    /// Whether `channel` is currently mirrored
    pub fn has_channel(&self, channel: &ChannelId) -> bool {
        self.registry.contains(channel)
    }

    pub fn mirror<S: ReplicaShape>(
        &self,
        key: &MirrorKey<S>,
    ) -> Result<&Mirror<S>, QuiverClientError> {
        let Some(entity) = self.mirrors.get(key.channel()) else {
            return Err(QuiverClientError::ChannelNotFound {
                channel: key.channel().clone(),
            });
        };
        entity
            .as_any()
            .downcast_ref::<Mirror<S>>()
            .ok_or_else(|| QuiverClientError::MirrorTypeMismatch {
                channel: key.channel().clone(),
                expected: type_name::<Mirror<S>>(),
            })
    }

    pub fn mirror_mut<S: ReplicaShape>(
        &mut self,
        key: &MirrorKey<S>,
    ) -> Result<&mut Mirror<S>, QuiverClientError> {
        let Some(entity) = self.mirrors.get_mut(key.channel()) else {
            return Err(QuiverClientError::ChannelNotFound {
                channel: key.channel().clone(),
            });
        };
        entity
            .as_any_mut()
            .downcast_mut::<Mirror<S>>()
            .ok_or_else(|| QuiverClientError::MirrorTypeMismatch {
                channel: key.channel().clone(),
                expected: type_name::<Mirror<S>>(),
            })
    }

    /// Ask the server to resend the full state of a mirrored property
    pub fn request_sync<S: ReplicaShape>(
        &mut self,
        key: &MirrorKey<S>,
    ) -> Result<(), QuiverClientError> {
        if !self.mirrors.contains_key(key.channel()) {
            return Err(QuiverClientError::ChannelNotFound {
                channel: key.channel().clone(),
            });
        }
        self.send_request(key.channel())
    }

    /// Stop mirroring. Payloads still in flight for the channel are dropped.
    pub fn destroy_mirror<S: ReplicaShape>(
        &mut self,
        key: MirrorKey<S>,
    ) -> Result<(), QuiverClientError> {
        if self.mirrors.remove(key.channel()).is_none() {
            return Err(QuiverClientError::ChannelNotFound {
                channel: key.channel().clone(),
            });
        }
        self.registry.release(key.channel())?;
        info!("stopped mirroring {}", key.channel());
        Ok(())
    }

    // Updates

    /// Must be called regularly, applies every payload received from the
    /// server since the last call
    pub fn receive(&mut self) -> ClientEvents {
        let mut events = ClientEvents::new();

        let Some((_, receiver)) = self.io.as_mut() else {
            events.push_error(QuiverClientError::NotConnected);
            return events;
        };

        loop {
            match receiver.receive() {
                Ok(Some((channel, bytes))) => {
                    let Some(mirror) = self.mirrors.get_mut(&channel) else {
                        warn!("received payload for unknown channel {}", channel);
                        events.push_error(QuiverClientError::ChannelNotFound { channel });
                        continue;
                    };
                    match mirror.apply_bytes(&bytes) {
                        Ok(()) => events.push_update(channel),
                        Err(source) => {
                            warn!("Client Error: cannot decode payload on {}: {}", channel, source);
                            events.push_error(QuiverClientError::Decode { channel, source });
                        }
                    }
                }
                Ok(None) => break,
                Err(error) => {
                    warn!("Client Error: cannot receive from transport: {}", error);
                    events.push_error(error.into());
                    break;
                }
            }
        }

        events
    }

    // Private

    fn send_request(&self, channel: &ChannelId) -> Result<(), QuiverClientError> {
        let Some((sender, _)) = self.io.as_ref() else {
            return Err(QuiverClientError::NotConnected);
        };
        sender.send(channel, self.config.channel_mode, &[])?;
        Ok(())
    }
}
