use dryroom_sensors::{ReplayFeed, SimulatedFeed};
use dryroom_traits::{SensorFeed, SensorReading};
use rstest::rstest;

#[rstest]
fn simulated_feed_is_deterministic() {
    let mut a = SimulatedFeed::new();
    let mut b = SimulatedFeed::new();
    for feed in [&mut a, &mut b] {
        feed.add_room(1, 25.5, 65.0, true);
    }
    for _ in 0..20 {
        assert_eq!(a.read(1).unwrap(), b.read(1).unwrap());
    }
}

#[rstest]
fn simulated_unknown_room_yields_nothing() {
    let mut feed = SimulatedFeed::new();
    assert_eq!(feed.read(9).unwrap(), None);
    assert!(!feed.set_connected(9, false));
}

#[rstest]
fn simulated_disconnect_reports_offline_until_reconnected() {
    let mut feed = SimulatedFeed::new();
    feed.add_room(2, 22.0, 45.0, true);
    assert!(feed.set_connected(2, false));
    assert_eq!(feed.read(2).unwrap(), Some(SensorReading::disconnected()));
    feed.set_connected(2, true);
    let r = feed.read(2).unwrap().unwrap();
    assert!(r.connected);
}

#[rstest]
#[case(0.0)]
#[case(0.25)]
#[case(2.0)]
fn simulated_humidity_stays_in_range(#[case] drift: f32) {
    let mut feed = SimulatedFeed::new().with_drift(drift).unwrap();
    feed.add_room(1, 30.0, 3.0, true);
    for _ in 0..50 {
        let r = feed.read(1).unwrap().unwrap();
        assert!((0.0..=100.0).contains(&r.humidity), "humidity {}", r.humidity);
    }
}

#[rstest]
fn zero_drift_holds_values_within_wobble() {
    let mut feed = SimulatedFeed::new().with_drift(0.0).unwrap();
    feed.add_room(1, 30.0, 40.0, true);
    for _ in 0..10 {
        assert_eq!(feed.read(1).unwrap(), Some(SensorReading::connected(30.0, 40.0)));
    }
}

#[rstest]
fn replay_delivers_in_order_per_room() {
    let mut feed = ReplayFeed::new([
        (1, SensorReading::connected(20.0, 50.0)),
        (2, SensorReading::disconnected()),
        (1, SensorReading::connected(21.0, 49.0)),
    ]);
    assert_eq!(feed.rooms().collect::<Vec<_>>(), [1, 2]);
    assert_eq!(feed.remaining(), 3);

    assert_eq!(feed.read(1).unwrap().unwrap().temperature, 20.0);
    assert_eq!(feed.read(1).unwrap().unwrap().temperature, 21.0);
    assert_eq!(feed.read(1).unwrap(), None);
    assert!(!feed.read(2).unwrap().unwrap().connected);
    assert!(feed.is_exhausted());
    assert_eq!(feed.delivered(), 3);
}

#[rstest]
fn replay_rejects_humidity_out_of_range() {
    let mut feed = ReplayFeed::new([(4, SensorReading::connected(25.0, 140.0))]);
    let err = feed.read(4).unwrap_err();
    assert!(err.to_string().contains("humidity 140"));
}
