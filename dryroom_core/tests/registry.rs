use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use dryroom_core::{
    Actuator, Command, ControlError, DryingProgram, Phase, RoomDefaults, RoomRegistry, RoomSpec,
    TickOutcome, TickScheduler,
};
use dryroom_traits::{ManualClock, SensorFeed, SensorReading};
use rstest::rstest;

fn registry() -> RoomRegistry {
    RoomRegistry::new(
        RoomDefaults::default(),
        vec![
            RoomSpec::new(3, "Gamma"),
            RoomSpec::new(1, "Alpha"),
            RoomSpec::new(2, "Beta").connected(false),
        ],
    )
    .expect("registry")
}

#[rstest]
fn list_keeps_insertion_order() {
    let reg = registry();
    let names: Vec<String> = reg.list().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["Gamma", "Alpha", "Beta"]);
    assert_eq!(reg.ids().collect::<Vec<_>>(), [3, 1, 2]);
    assert_eq!(reg.len(), 3);
    assert!(reg.get(1).is_some());
    assert!(reg.get(9).is_none());
}

#[rstest]
fn duplicate_ids_are_rejected() {
    let err = RoomRegistry::new(
        RoomDefaults::default(),
        vec![RoomSpec::new(1, "A"), RoomSpec::new(1, "B")],
    )
    .unwrap_err();
    assert!(format!("{err}").contains("duplicate room id 1"));
}

#[rstest]
fn from_config_uses_demo_rooms() {
    let cfg = dryroom_config::Config::default();
    let reg = RoomRegistry::from_config(&cfg).unwrap();
    let rooms = reg.list();
    assert_eq!(rooms.len(), 3);
    assert_eq!(rooms[0].temperature, 25.5);
    assert!(!rooms[2].connected);
    assert_eq!(rooms[0].total_s, 7_200);
}

#[rstest]
fn from_config_rejects_empty_room_list() {
    let cfg = dryroom_config::load_toml("rooms = []\n").unwrap();
    let err = RoomRegistry::from_config(&cfg).unwrap_err();
    assert!(format!("{err}").contains("no rooms"));
}

#[rstest]
fn unknown_room_commands_fail() {
    let mut reg = registry();
    assert_eq!(
        reg.execute(42, Command::Pause).unwrap_err(),
        ControlError::UnknownRoom(42)
    );
    assert_eq!(reg.tick(42).unwrap_err(), ControlError::UnknownRoom(42));
    assert!(reg.snapshot(42).is_err());
}

#[rstest]
fn upsert_registers_on_first_contact() {
    let mut reg = registry();
    let snap = reg.upsert_connectivity(7, true).unwrap();
    assert_eq!(snap.name, "Room 7");
    assert_eq!(snap.phase, Phase::Idle);
    assert_eq!(reg.ids().last(), Some(7));

    let snap = reg.upsert_connectivity(2, true).unwrap();
    assert!(snap.connected);
    assert_eq!(reg.len(), 4);
}

#[rstest]
fn subscribers_see_each_successful_mutation() {
    let mut reg = registry();
    let rx = reg.subscribe();
    reg.execute(1, Command::Toggle(Actuator::Fan)).unwrap();
    reg.execute(1, Command::Resume).unwrap_err();
    reg.execute(1, Command::StartDrying(DryingProgram::new(30.0, 40.0, 3))).unwrap();

    let got: Vec<_> = rx.try_iter().collect();
    assert_eq!(got.len(), 2);
    assert!(got[0].actuators.fan);
    assert_eq!(got[1].phase, Phase::Running);

    drop(rx);
    // a dropped subscriber is pruned without affecting the command
    reg.execute(1, Command::Pause).unwrap();
}

#[rstest]
fn advance_ticks_running_rooms_on_schedule() {
    let clock = ManualClock::new();
    let mut sched = TickScheduler::new(Arc::new(clock.clone()), Duration::from_secs(1)).unwrap();
    let mut reg = registry();

    reg.execute(3, Command::StartDrying(DryingProgram::new(30.0, 40.0, 3))).unwrap();
    reg.execute(1, Command::StartDrying(DryingProgram::new(30.0, 40.0, 10))).unwrap();
    reg.execute(1, Command::Pause).unwrap();

    // arms timers; nothing due yet
    assert!(reg.advance(&mut sched).is_empty());
    assert!(sched.is_armed(3));
    assert!(!sched.is_armed(1));

    clock.advance(Duration::from_millis(999));
    assert!(reg.advance(&mut sched).is_empty());

    clock.advance(Duration::from_millis(1));
    assert_eq!(reg.advance(&mut sched), vec![(3, TickOutcome::Advanced(2))]);

    // a long stall catches up but never ticks past completion
    clock.advance(Duration::from_secs(10));
    assert_eq!(
        reg.advance(&mut sched),
        vec![(3, TickOutcome::Advanced(1)), (3, TickOutcome::Completed)]
    );
    assert_eq!(reg.snapshot(3).unwrap().phase, Phase::Completed);
    assert!(!sched.is_armed(3));
    assert_eq!(reg.snapshot(1).unwrap().remaining_s, 10);
    assert!(reg.any_active());
}

#[rstest]
fn time_paused_between_advances_is_not_ticked() {
    let clock = ManualClock::new();
    let mut sched = TickScheduler::new(Arc::new(clock.clone()), Duration::from_secs(1)).unwrap();
    let mut reg = registry();

    reg.execute(3, Command::StartDrying(DryingProgram::new(30.0, 40.0, 100))).unwrap();
    assert!(reg.advance(&mut sched).is_empty());

    clock.advance(Duration::from_millis(500));
    reg.execute(3, Command::Pause).unwrap();
    clock.advance(Duration::from_secs(10));
    reg.execute(3, Command::Resume).unwrap();

    let out = reg.advance(&mut sched);
    assert!(out.len() <= 1, "paused time was ticked: {out:?}");
    assert!(reg.snapshot(3).unwrap().remaining_s >= 99);

    // the resumed run ticks on its own schedule
    clock.advance(Duration::from_secs(1));
    assert_eq!(reg.advance(&mut sched), vec![(3, TickOutcome::Advanced(99))]);
}

#[rstest]
fn restart_between_advances_gets_a_fresh_timer() {
    let clock = ManualClock::new();
    let mut sched = TickScheduler::new(Arc::new(clock.clone()), Duration::from_secs(1)).unwrap();
    let mut reg = registry();

    reg.execute(3, Command::StartDrying(DryingProgram::new(30.0, 40.0, 50))).unwrap();
    assert!(reg.advance(&mut sched).is_empty());

    clock.advance(Duration::from_millis(900));
    reg.execute(3, Command::Stop).unwrap();
    reg.execute(3, Command::StartDrying(DryingProgram::new(30.0, 40.0, 50))).unwrap();
    clock.advance(Duration::from_millis(200));
    assert!(reg.advance(&mut sched).is_empty());
    assert_eq!(reg.snapshot(3).unwrap().remaining_s, 50);

    clock.advance(Duration::from_secs(1));
    assert_eq!(reg.advance(&mut sched), vec![(3, TickOutcome::Advanced(49))]);
}

#[rstest]
fn emergency_stop_all_stops_connected_rooms() {
    let mut reg = registry();
    reg.execute(1, Command::StartDrying(DryingProgram::new(30.0, 40.0, 10))).unwrap();
    reg.execute(3, Command::Toggle(Actuator::Heater)).unwrap();
    reg.emergency_stop_all();
    for snap in reg.list() {
        assert!(!snap.actuators.any_on());
        let expected = if snap.connected { Phase::Stopped } else { Phase::Idle };
        assert_eq!(snap.phase, expected, "room {}", snap.id);
    }
    assert!(!reg.any_active());
}

struct ScriptedFeed;

impl SensorFeed for ScriptedFeed {
    fn read(&mut self, room: u32) -> Result<Option<SensorReading>, Box<dyn Error + Send + Sync>> {
        match room {
            1 => Ok(Some(SensorReading::connected(31.0, 28.0))),
            2 => Err("bus timeout".into()),
            _ => Ok(None),
        }
    }
}

#[rstest]
fn poll_feed_applies_readings_and_skips_errors() {
    let mut reg = registry();
    reg.execute(1, Command::StartDrying(DryingProgram::new(30.0, 40.0, 10))).unwrap();
    let applied = reg.poll_feed(&mut ScriptedFeed);
    assert_eq!(applied, 1);
    let snap = reg.snapshot(1).unwrap();
    assert_eq!(snap.temperature, 31.0);
    assert_eq!(snap.humidity, 28.0);
    assert_eq!(snap.phase, Phase::Running);
    assert!(!reg.snapshot(2).unwrap().connected);
}

#[rstest]
fn reading_with_lost_connection_resets_room() {
    let mut reg = registry();
    reg.execute(1, Command::StartDrying(DryingProgram::new(30.0, 40.0, 50))).unwrap();
    for _ in 0..20 {
        reg.tick(1).unwrap();
    }
    let snap = reg.apply_reading(1, SensorReading::disconnected()).unwrap();
    assert_eq!(snap.phase, Phase::Idle);
    assert_eq!(snap.remaining_s, snap.total_s);
    assert!(!snap.actuators.any_on());
}
