use std::collections::HashSet;

use quiver_client::QuiverClientError;
use quiver_shared::{
    encode_payload, ChannelId, DiffPayload, ExactSet, ScalarChange, ShallowMap, ShallowObject,
};
use quiver_test::{ChangeLog, TestWorld};

type Tags = ExactSet<String>;
type Players = ShallowMap<u32, String>;

fn player(name: &str, team: &str) -> ShallowObject<String> {
    ShallowObject::new()
        .with("name", name.to_string())
        .with("team", team.to_string())
}

#[test]
fn test_exact_set_replicates() {
    let mut world = TestWorld::new();
    let a = world.connect_client();
    let key = world
        .server
        .create_property::<Tags>(Some("tags"), HashSet::new())
        .unwrap();
    let mirror = world
        .client_mut(&a)
        .mirror_property::<Tags>(key.channel().clone())
        .unwrap();
    world.exchange();

    let property = world.server.property_mut(&key).unwrap();
    assert!(property.add("red".to_string()));
    assert!(property.add("blue".to_string()));
    assert!(!property.add("red".to_string()));
    assert!(property.remove(&"blue".to_string()));
    world.exchange();

    let seen = world.client(&a).mirror(&mirror).unwrap().get();
    assert_eq!(seen, HashSet::from(["red".to_string()]));
}

#[test]
fn test_shallow_map_sends_field_patches() {
    let mut world = TestWorld::new();
    let a = world.connect_client();
    let key = world
        .server
        .create_property::<Players>(Some("players"), Default::default())
        .unwrap();
    let mirror = world
        .client_mut(&a)
        .mirror_property::<Players>(key.channel().clone())
        .unwrap();
    world.exchange();

    world
        .server
        .property_mut(&key)
        .unwrap()
        .set_entry(1, player("ann", "red"));
    world.exchange();

    let log = ChangeLog::<Players>::new();
    world
        .client_mut(&a)
        .mirror_mut(&mirror)
        .unwrap()
        .on_changed(log.handler());

    world
        .server
        .property_mut(&key)
        .unwrap()
        .patch_entry(1, ShallowObject::new().with("team", "blue".to_string()), Vec::new());
    world.server.property_mut(&key).unwrap().delete_fields(&1, vec!["name".to_string()]);
    world.exchange();

    assert_eq!(log.len(), 2);
    let seen = world.client(&a).mirror(&mirror).unwrap().get();
    let Some(record) = seen.get(&1) else {
        panic!("record should still exist");
    };
    assert_eq!(record.get("team"), Some(&"blue".to_string()));
    assert!(!record.contains("name"));
}

#[test]
fn test_mirroring_twice_is_rejected() {
    let mut world = TestWorld::new();
    let a = world.connect_client();
    let channel = ChannelId::new("tags");

    world
        .client_mut(&a)
        .mirror_property::<Tags>(channel.clone())
        .unwrap();
    let result = world.client_mut(&a).mirror_property::<Tags>(channel);

    assert!(matches!(
        result,
        Err(QuiverClientError::AlreadyMirrored { .. })
    ));
}

#[test]
fn test_payload_for_unmirrored_channel_is_reported() {
    let mut world = TestWorld::new();
    let a = world.connect_client();
    let bytes = encode_payload(&DiffPayload::full(vec![ScalarChange::Replace(1u8)])).unwrap();

    world
        .hub
        .inject_to_client(&a, ChannelId::new("nowhere"), bytes);
    let mut events = world.client_receive(&a);

    let errors = events.take_errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        QuiverClientError::ChannelNotFound { .. }
    ));
}

#[test]
fn test_garbage_payload_is_reported() {
    let mut world = TestWorld::new();
    let a = world.connect_client();
    let channel = ChannelId::new("tags");
    let mirror = world
        .client_mut(&a)
        .mirror_property::<Tags>(channel.clone())
        .unwrap();

    world.hub.inject_to_client(&a, channel, vec![0xff; 3]);
    let mut events = world.client_receive(&a);

    let errors = events.take_errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], QuiverClientError::Decode { .. }));
    assert!(!world.client(&a).mirror(&mirror).unwrap().is_ready());
}

#[test]
fn test_destroyed_mirror_frees_channel() {
    let mut world = TestWorld::new();
    let a = world.connect_client();
    let channel = ChannelId::new("tags");

    let mirror = world
        .client_mut(&a)
        .mirror_property::<Tags>(channel.clone())
        .unwrap();
    assert!(world.client(&a).has_channel(&channel));

    world.client_mut(&a).destroy_mirror(mirror).unwrap();
    assert!(!world.client(&a).has_channel(&channel));

    assert!(world
        .client_mut(&a)
        .mirror_property::<Tags>(channel.clone())
        .is_ok());
    assert!(world.client(&a).has_channel(&channel));
}
