use quiver_client::MirrorKey;
use quiver_server::{PropertyKey, ServerProperty};
use quiver_shared::{ObserverKey, Scalar};
use quiver_test::{ChangeLog, TestWorld};

type Banner = Scalar<String>;

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

struct Fixture {
    world: TestWorld,
    key: PropertyKey<ServerProperty<Banner>>,
    a: ObserverKey,
    b: ObserverKey,
    mirror_a: MirrorKey<Banner>,
    mirror_b: MirrorKey<Banner>,
}

impl Fixture {
    fn new() -> Self {
        let mut world = TestWorld::new();
        let a = world.connect_client();
        let b = world.connect_client();
        let key = world
            .server
            .create_property::<Banner>(Some("banner"), text("hello"))
            .unwrap();
        let mirror_a = world
            .client_mut(&a)
            .mirror_property::<Banner>(key.channel().clone())
            .unwrap();
        let mirror_b = world
            .client_mut(&b)
            .mirror_property::<Banner>(key.channel().clone())
            .unwrap();
        world.exchange();

        Self {
            world,
            key,
            a,
            b,
            mirror_a,
            mirror_b,
        }
    }

    fn property(&mut self) -> &mut ServerProperty<Banner> {
        self.world.server.property_mut(&self.key).unwrap()
    }

    fn seen_by_a(&self) -> Option<String> {
        self.world.client(&self.a).mirror(&self.mirror_a).unwrap().get()
    }

    fn seen_by_b(&self) -> Option<String> {
        self.world.client(&self.b).mirror(&self.mirror_b).unwrap().get()
    }
}

#[test]
fn test_override_survives_set_top() {
    let mut fixture = Fixture::new();

    let a = fixture.a;
    fixture.property().set_for(a, text("private"));
    fixture.property().set_top(text("public"));
    fixture.world.exchange();

    assert_eq!(fixture.seen_by_a(), text("private"));
    assert_eq!(fixture.seen_by_b(), text("public"));

    fixture.property().set(text("everyone"));
    fixture.world.exchange();

    assert_eq!(fixture.seen_by_a(), text("everyone"));
    assert_eq!(fixture.seen_by_b(), text("everyone"));
    assert!(!fixture.property().state().has_override(&a));
}

#[test]
fn test_set_top_skips_overridden_observer() {
    let mut fixture = Fixture::new();
    let a = fixture.a;
    let b = fixture.b;
    fixture.property().set_for(a, text("private"));
    fixture.world.exchange();
    fixture.world.hub.clear_sent();

    fixture.property().set_top(text("public"));

    assert_eq!(fixture.world.hub.sent_to(&a), 0);
    assert_eq!(fixture.world.hub.sent_to(&b), 1);
}

#[test]
fn test_clear_for_resends_full_value() {
    let mut fixture = Fixture::new();
    let a = fixture.a;
    fixture.property().set_for(a, text("private"));
    fixture.world.exchange();

    let log = ChangeLog::<Banner>::new();
    let mirror_a = fixture.mirror_a.clone();
    fixture
        .world
        .client_mut(&a)
        .mirror_mut(&mirror_a)
        .unwrap()
        .on_changed(log.handler());

    fixture.property().clear_for(a);
    fixture.world.exchange();

    let Some(last) = log.last() else {
        panic!("clearing an override should notify the observer");
    };
    assert!(last.full);
    assert_eq!(last.value, text("hello"));
    assert_eq!(fixture.seen_by_a(), text("hello"));
}

#[test]
fn test_override_for_unknown_observer_is_dropped() {
    let mut fixture = Fixture::new();
    fixture.world.hub.clear_sent();
    let stranger = ObserverKey::new(999);

    fixture.property().set_for(stranger, text("ghost"));

    assert!(fixture.world.hub.sent().is_empty());
    assert!(!fixture.property().state().has_override_entry(&stranger));
    assert_eq!(fixture.property().get(Some(&stranger)), text("hello"));
}

#[test]
fn test_set_filter_targets_matching_observers() {
    let mut fixture = Fixture::new();
    let b = fixture.b;

    fixture
        .property()
        .set_filter(|observer| *observer == b, text("only b"));
    fixture.world.exchange();

    assert_eq!(fixture.seen_by_a(), text("hello"));
    assert_eq!(fixture.seen_by_b(), text("only b"));

    fixture.property().clear_filter(|_| true);
    fixture.world.exchange();

    assert_eq!(fixture.seen_by_b(), text("hello"));
    assert!(fixture.property().state().overridden_observers().is_empty());
}

#[test]
fn test_late_request_sees_override() {
    let mut fixture = Fixture::new();
    let a = fixture.a;
    fixture.property().set_for(a, text("private"));

    let mirror_a = fixture.mirror_a.clone();
    fixture
        .world
        .client_mut(&a)
        .request_sync(&mirror_a)
        .unwrap();
    fixture.world.exchange();

    assert_eq!(fixture.seen_by_a(), text("private"));
}
