use std::time::{Duration, Instant};

use quiver_client::ClientConfig;
use quiver_server::{QuiverServerError, ServerConfig};
use quiver_shared::{BatchConfig, ChannelId, ObserverKey, Scalar};
use quiver_test::TestWorld;

#[test]
fn test_departure_drops_override() {
    let mut world = TestWorld::new();
    let a = world.connect_client();
    let key = world
        .server
        .create_property::<Scalar<u32>>(Some("hp"), Some(100))
        .unwrap();
    world.server.property_mut(&key).unwrap().set_for(a, Some(5));
    assert!(world.server.property(&key).unwrap().state().has_override(&a));

    world.disconnect_client(&a);
    let events = world.server_receive();

    assert_eq!(events.departures(), &[a]);
    assert!(!world.server.observer_exists(&a));
    assert!(!world
        .server
        .property(&key)
        .unwrap()
        .state()
        .has_override_entry(&a));
}

#[test]
fn test_departure_cancels_staged_value() {
    let mut world = TestWorld::new();
    let a = world.connect_client();
    let b = world.connect_client();
    let key = world
        .server
        .create_batched_property::<Scalar<u32>>(Some("hp"), Some(100), BatchConfig::default())
        .unwrap();
    world.server.property_mut(&key).unwrap().set_for(a, Some(5));
    world.server.property_mut(&key).unwrap().set_for(b, Some(6));

    world.disconnect_client(&a);
    world.server_receive();
    world.hub.clear_sent();
    world.advance(Duration::from_millis(150));

    assert_eq!(world.hub.sent_to(&a), 0);
    assert_eq!(world.hub.sent_to(&b), 1);
}

#[test]
fn test_flush_to_vanished_observer_is_not_fatal() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();

    let mut world = TestWorld::new();
    let a = world.connect_client();
    let b = world.connect_client();
    let key = world
        .server
        .create_batched_property::<Scalar<u32>>(Some("hp"), Some(100), BatchConfig::default())
        .unwrap();
    world.server.property_mut(&key).unwrap().set_for(a, Some(5));
    world.server.property_mut(&key).unwrap().set_for(b, Some(6));

    // the transport drops `a` before the server hears about it
    world.hub.disconnect_client(&a);
    world.server.update(Instant::now() + Duration::from_millis(150));

    assert_eq!(world.hub.sent_to(&a), 0);
    assert_eq!(world.hub.sent_to(&b), 1);
    assert!(!world.server.property(&key).unwrap().has_pending());
}

#[test]
fn test_request_from_departing_observer_is_ignored() {
    let mut world = TestWorld::new();
    let a = world.connect_client();
    let key = world
        .server
        .create_property::<Scalar<u32>>(Some("hp"), Some(100))
        .unwrap();

    world.hub.inject_to_server(a, key.channel().clone());
    world.disconnect_client(&a);
    let events = world.server_receive();

    assert!(events.sync_requests().is_empty());
    assert_eq!(events.departures(), &[a]);
    assert!(world.hub.sent().is_empty());
}

#[test]
fn test_late_request_does_not_readmit_departed_observer() {
    let mut world = TestWorld::new();
    let a = world.connect_client();
    let key = world
        .server
        .create_property::<Scalar<u32>>(Some("hp"), Some(100))
        .unwrap();
    world.disconnect_client(&a);
    world.server_receive();

    world.hub.inject_to_server(a, key.channel().clone());
    let events = world.server_receive();

    assert!(events.connections().is_empty());
    assert!(events.sync_requests().is_empty());
    assert!(!world.server.observer_exists(&a));

    world.server.property_mut(&key).unwrap().set_for(a, Some(5));
    assert!(!world
        .server
        .property(&key)
        .unwrap()
        .state()
        .has_override_entry(&a));
}

#[test]
fn test_request_joins_unknown_observer() {
    let mut world = TestWorld::new();
    let key = world
        .server
        .create_property::<Scalar<u32>>(Some("hp"), Some(100))
        .unwrap();
    let stranger = ObserverKey::new(77);

    world.hub.inject_to_server(stranger, key.channel().clone());
    let events = world.server_receive();

    assert_eq!(events.connections(), &[stranger]);
    assert_eq!(events.sync_requests(), &[(stranger, key.channel().clone())]);
    assert!(world.server.observer_exists(&stranger));
}

#[test]
fn test_request_from_unknown_observer_refused_without_implicit_join() {
    let server_config = ServerConfig {
        implicit_join: false,
        ..Default::default()
    };
    let mut world = TestWorld::with_config(server_config, ClientConfig::default());
    let key = world
        .server
        .create_property::<Scalar<u32>>(Some("hp"), Some(100))
        .unwrap();
    let stranger = ObserverKey::new(77);

    world.hub.inject_to_server(stranger, key.channel().clone());
    let events = world.server_receive();

    assert!(events.connections().is_empty());
    assert!(events.sync_requests().is_empty());
    assert!(!world.server.observer_exists(&stranger));
}

#[test]
fn test_request_for_unknown_channel_reports_error() {
    let mut world = TestWorld::new();
    let a = world.connect_client();

    world.hub.inject_to_server(a, ChannelId::new("missing"));
    let mut events = world.server_receive();

    let errors = events.take_errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        QuiverServerError::ChannelNotFound { channel } if channel.as_str() == "missing"
    ));
}

#[test]
fn test_reconnect_gets_fresh_state() {
    let mut world = TestWorld::new();
    let a = world.connect_client();
    let key = world
        .server
        .create_property::<Scalar<u32>>(Some("hp"), Some(100))
        .unwrap();
    world.server.property_mut(&key).unwrap().set_for(a, Some(5));
    world.disconnect_client(&a);
    world.server_receive();

    let c = world.connect_client();
    let mirror = world
        .client_mut(&c)
        .mirror_property::<Scalar<u32>>(key.channel().clone())
        .unwrap();
    world.exchange();

    assert_eq!(world.client(&c).mirror(&mirror).unwrap().get(), Some(100));
}
