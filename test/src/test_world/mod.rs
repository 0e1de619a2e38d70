/// One server and its clients wired through a [`LocalHub`]

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use quiver_client::{Client, ClientConfig, ClientEvents};
use quiver_server::{Server, ServerConfig, ServerEvents};
use quiver_shared::ObserverKey;

use crate::local_socket::LocalHub;

pub struct TestWorld {
    pub hub: LocalHub,
    pub server: Server,
    clients: HashMap<ObserverKey, Client>,
    client_config: ClientConfig,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::with_config(ServerConfig::default(), ClientConfig::default())
    }
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(server_config: ServerConfig, client_config: ClientConfig) -> Self {
        let hub = LocalHub::new();
        let mut server = Server::new(server_config);
        let (sender, receiver) = hub.server_socket();
        server.io_load(sender, receiver);

        Self {
            hub,
            server,
            clients: HashMap::new(),
            client_config,
        }
    }

    /// Connect a client and let the server register it
    pub fn connect_client(&mut self) -> ObserverKey {
        let (observer, sender, receiver) = self.hub.connect_client();
        let mut client = Client::new(self.client_config.clone());
        client.io_load(sender, receiver);
        self.clients.insert(observer, client);
        self.server.receive();
        observer
    }

    /// Drop a client. The server hears about it on its next receive.
    pub fn disconnect_client(&mut self, observer: &ObserverKey) {
        self.hub.disconnect_client(observer);
        self.clients.remove(observer);
    }

    pub fn client(&self, observer: &ObserverKey) -> &Client {
        let Some(client) = self.clients.get(observer) else {
            panic!("no client connected as {}", observer);
        };
        client
    }

    pub fn client_mut(&mut self, observer: &ObserverKey) -> &mut Client {
        let Some(client) = self.clients.get_mut(observer) else {
            panic!("no client connected as {}", observer);
        };
        client
    }

    pub fn server_receive(&mut self) -> ServerEvents {
        self.server.receive()
    }

    pub fn client_receive(&mut self, observer: &ObserverKey) -> ClientEvents {
        self.client_mut(observer).receive()
    }

    /// Server handles queued requests, then every client applies what it was sent
    pub fn exchange(&mut self) {
        self.server.receive();
        let mut observers: Vec<ObserverKey> = self.clients.keys().copied().collect();
        observers.sort();
        for observer in observers {
            self.client_receive(&observer);
        }
    }

    /// Run the server's batch timers as if `elapsed` had passed, then exchange
    pub fn advance(&mut self, elapsed: Duration) {
        self.server.update(Instant::now() + elapsed);
        self.exchange();
    }
}
