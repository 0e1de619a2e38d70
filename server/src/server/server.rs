use std::{
    any::type_name,
    collections::HashMap,
    time::Instant,
};

use log::{debug, info, warn};

use quiver_shared::{
    BatchConfig, BatchedProperty, ChannelId, ChannelMode, ChannelRegistry, ObserverKey, Property,
    ReplicaShape, ReplicatedEntity,
};

use crate::{
    authority::{AuthorityRole, ServerBatchedProperty, ServerProperty},
    events::ServerEvents,
    lifecycle::ObserverLifecycle,
    property_key::PropertyKey,
    roster::ObserverSet,
    transport::{PacketReceiver, PacketSender, SocketEvent},
    QuiverServerError, ServerConfig,
};

/// Owns every replicated property of the process and the observers they
/// replicate to
pub struct Server {
    config: ServerConfig,
    io: Option<(Box<dyn PacketSender>, Box<dyn PacketReceiver>)>,
    lifecycle: ObserverLifecycle,
    registry: ChannelRegistry,
    entities: HashMap<ChannelId, Box<dyn ReplicatedEntity>>,
}

impl Server {
    /// Create a new Server
    pub fn new(config: ServerConfig) -> Self {
        let registry = ChannelRegistry::new(config.max_channel_name_length);
        Self {
            config,
            io: None,
            lifecycle: ObserverLifecycle::new(ObserverSet::new()),
            registry,
            entities: HashMap::new(),
        }
    }

    /// Attach the transport. Must be called before any property is created.
    pub fn io_load(&mut self, sender: Box<dyn PacketSender>, receiver: Box<dyn PacketReceiver>) {
        self.io = Some((sender, receiver));
    }

    /// Returns whether a transport has been loaded
    pub fn is_listening(&self) -> bool {
        self.io.is_some()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    // Properties

    pub fn create_property<S: ReplicaShape>(
        &mut self,
        name: Option<&str>,
        initial: S::Value,
    ) -> Result<PropertyKey<ServerProperty<S>>, QuiverServerError> {
        let mode = self.config.channel_mode;
        self.create_property_with_mode::<S>(name, initial, mode)
    }

    pub fn create_property_with_mode<S: ReplicaShape>(
        &mut self,
        name: Option<&str>,
        initial: S::Value,
        mode: ChannelMode,
    ) -> Result<PropertyKey<ServerProperty<S>>, QuiverServerError> {
        let (channel, role) = self.authority_role::<S>(name, mode)?;
        let property = Property::new(channel.clone(), initial, role);
        Ok(self.bind(channel, Box::new(property)))
    }

    pub fn create_batched_property<S: ReplicaShape>(
        &mut self,
        name: Option<&str>,
        initial: S::Value,
        batch: BatchConfig,
    ) -> Result<PropertyKey<ServerBatchedProperty<S>>, QuiverServerError> {
        let (channel, role) = self.authority_role::<S>(name, self.config.channel_mode)?;
        let property = BatchedProperty::new(channel.clone(), initial, role, batch);
        Ok(self.bind(channel, Box::new(property)))
    }

    pub fn property<P: ReplicatedEntity>(
        &self,
        key: &PropertyKey<P>,
    ) -> Result<&P, QuiverServerError> {
        let entity = self.entity(key.channel())?;
        entity
            .as_any()
            .downcast_ref::<P>()
            .ok_or_else(|| QuiverServerError::PropertyTypeMismatch {
                channel: key.channel().clone(),
                expected: type_name::<P>(),
            })
    }

    pub fn property_mut<P: ReplicatedEntity>(
        &mut self,
        key: &PropertyKey<P>,
    ) -> Result<&mut P, QuiverServerError> {
        let Some(entity) = self.entities.get_mut(key.channel()) else {
            return Err(QuiverServerError::ChannelNotFound {
                channel: key.channel().clone(),
            });
        };
        entity
            .as_any_mut()
            .downcast_mut::<P>()
            .ok_or_else(|| QuiverServerError::PropertyTypeMismatch {
                channel: key.channel().clone(),
                expected: type_name::<P>(),
            })
    }

    /// Tear down a property: cancels its pending batch, drops all observer
    /// state and frees its channel name
    pub fn destroy_property<P: ReplicatedEntity>(
        &mut self,
        key: PropertyKey<P>,
    ) -> Result<(), QuiverServerError> {
        let Some(mut entity) = self.entities.remove(key.channel()) else {
            return Err(QuiverServerError::ChannelNotFound {
                channel: key.channel().clone(),
            });
        };
        entity.destroy();
        self.registry.release(key.channel())?;
        info!("destroyed property on {}", key.channel());
        Ok(())
    }

    pub fn has_property(&self, channel: &ChannelId) -> bool {
        self.entities.contains_key(channel)
    }

    pub fn property_count(&self) -> usize {
        self.entities.len()
    }

    // Observers

    /// Return a list of all currently connected observers' keys
    pub fn observer_keys(&self) -> Vec<ObserverKey> {
        self.lifecycle.roster().keys()
    }

    pub fn observer_exists(&self, observer: &ObserverKey) -> bool {
        self.lifecycle.roster().contains(observer)
    }

    // Updates

    /// Must be called regularly. Drains the transport, applying connections
    /// and departures before answering any sync request received in the
    /// same call.
    pub fn receive(&mut self) -> ServerEvents {
        let mut events = ServerEvents::new();

        let Some((_, receiver)) = self.io.as_mut() else {
            events.push_error(QuiverServerError::NotListening);
            return events;
        };

        let mut requests = Vec::new();

        loop {
            match receiver.receive() {
                Ok(Some(SocketEvent::ObserverConnected(observer))) => {
                    if self.lifecycle.connect(observer) {
                        events.push_connection(&observer);
                    }
                }
                Ok(Some(SocketEvent::ObserverDeparted(observer))) => {
                    self.lifecycle.depart(&observer, self.entities.values_mut());
                    events.push_departure(&observer);
                }
                Ok(Some(SocketEvent::Packet {
                    observer, channel, ..
                })) => {
                    requests.push((observer, channel));
                }
                Ok(None) => break,
                Err(error) => {
                    warn!("Server Error: cannot receive from transport: {}", error);
                    events.push_error(error.into());
                    break;
                }
            }
        }

        for (observer, channel) in requests {
            if !self.lifecycle.roster().contains(&observer) {
                if self.lifecycle.has_departed(&observer) {
                    debug!("ignoring request on {} from departed {}", channel, observer);
                    continue;
                }
                if !self.config.implicit_join {
                    warn!("ignoring request on {} from unknown {}", channel, observer);
                    continue;
                }
                if self.lifecycle.join(observer) {
                    events.push_connection(&observer);
                }
            }
            let Some(entity) = self.entities.get_mut(&channel) else {
                warn!("received request for unknown channel {}", channel);
                events.push_error(QuiverServerError::ChannelNotFound { channel });
                continue;
            };
            entity.handle_sync_request(observer);
            events.push_sync_request(&observer, &channel);
        }

        events
    }

    /// Flush every batched property whose interval has elapsed by `now`
    pub fn update(&mut self, now: Instant) {
        for entity in self.entities.values_mut() {
            entity.update(now);
        }
    }

    // Private

    /// Names a new channel and builds the role delivering on it
    fn authority_role<S: ReplicaShape>(
        &mut self,
        name: Option<&str>,
        mode: ChannelMode,
    ) -> Result<(ChannelId, AuthorityRole<S>), QuiverServerError> {
        let Some((sender, _)) = self.io.as_ref() else {
            return Err(QuiverServerError::NotListening);
        };
        let sender = sender.clone();
        let channel = self.registry.generate_name(name);
        let role = AuthorityRole::new(
            channel.clone(),
            mode,
            sender,
            self.lifecycle.roster().clone(),
        );
        Ok((channel, role))
    }

    fn entity(&self, channel: &ChannelId) -> Result<&dyn ReplicatedEntity, QuiverServerError> {
        self.entities
            .get(channel)
            .map(|entity| entity.as_ref())
            .ok_or_else(|| QuiverServerError::ChannelNotFound {
                channel: channel.clone(),
            })
    }

    fn bind<P: ReplicatedEntity>(&mut self, channel: ChannelId, entity: Box<P>) -> PropertyKey<P> {
        info!(
            "created {} property on {}",
            entity.role_kind().name(),
            channel
        );
        self.entities.insert(channel.clone(), entity);
        PropertyKey::new(channel)
    }
}
