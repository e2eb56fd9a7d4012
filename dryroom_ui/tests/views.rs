use dryroom_core::{
    Actuator, ColorBucket, DryingProgram, RoomController, RoomSnapshot, RoomSpec, SensorKind,
};
use dryroom_ui::{GaugeView, TimerBucket, TimerView, format_hms, render_card};
use rstest::rstest;

fn running_room(elapsed: u32) -> RoomSnapshot {
    let mut room = RoomController::new(RoomSpec::new(1, "Room 1").readings(25.5, 65.0)).unwrap();
    room.start_drying(DryingProgram::new(30.0, 40.0, 100)).unwrap();
    for _ in 0..elapsed {
        room.tick();
    }
    room.snapshot()
}

#[rstest]
#[case(0, "00:00:00")]
#[case(59, "00:00:59")]
#[case(3_600, "01:00:00")]
#[case(7_200, "02:00:00")]
#[case(86_399, "23:59:59")]
#[case(90_061, "25:01:01")]
fn hms_formatting(#[case] secs: u32, #[case] expected: &str) {
    assert_eq!(format_hms(secs), expected);
}

#[rstest]
#[case(0.0, TimerBucket::Early)]
#[case(0.329, TimerBucket::Early)]
#[case(0.33, TimerBucket::Midway)]
#[case(0.659, TimerBucket::Midway)]
#[case(0.66, TimerBucket::Late)]
#[case(1.0, TimerBucket::Late)]
fn timer_buckets(#[case] progress: f32, #[case] expected: TimerBucket) {
    assert_eq!(TimerBucket::from_progress(progress), expected);
}

#[rstest]
fn timer_view_tracks_countdown() {
    let view = TimerView::from_snapshot(&running_room(50));
    assert_eq!(view.remaining, "00:00:50");
    assert_eq!(view.progress, 0.5);
    assert_eq!(view.bucket, TimerBucket::Midway);
    assert_eq!(view.label, "Remaining");
}

#[rstest]
fn idle_timer_is_labelled_paused() {
    let room = RoomController::new(RoomSpec::new(2, "Room 2")).unwrap();
    let view = TimerView::from_snapshot(&room.snapshot());
    assert_eq!(view.label, "Paused");
    assert_eq!(view.progress, 0.0);
    assert_eq!(view.remaining, "02:00:00");
}

#[rstest]
fn gauges_from_snapshot() {
    let snap = running_room(0);
    let t = GaugeView::temperature(&snap);
    assert_eq!(t.unit(), "°C");
    assert_eq!(t.percentage, 51.0);
    assert_eq!(t.bucket, ColorBucket::Normal);

    let h = GaugeView::humidity(&snap);
    assert_eq!(h.kind, SensorKind::Humidity);
    assert_eq!(h.unit(), "%");
    assert_eq!(h.percentage, 65.0);
    assert_eq!(h.bucket, ColorBucket::Humid);
}

#[rstest]
fn gauge_clamps_out_of_range_readings() {
    let snap = RoomController::new(RoomSpec::new(1, "Hot").readings(75.0, -5.0))
        .unwrap()
        .snapshot();
    let t = GaugeView::temperature(&snap);
    assert_eq!(t.percentage, 100.0);
    assert_eq!(t.arc_fraction(), 1.0);
    assert_eq!(t.bucket, ColorBucket::Hot);
    let h = GaugeView::humidity(&snap);
    assert_eq!(h.angle, -120.0);
}

#[rstest]
fn card_shows_readings_devices_and_timer() {
    let mut room = RoomController::new(RoomSpec::new(1, "Room 1").readings(25.5, 65.0)).unwrap();
    room.toggle_actuator(Actuator::Fan).unwrap();
    room.start_drying(DryingProgram::new(30.0, 40.0, 3_600)).unwrap();
    let card = render_card(&room.snapshot());
    assert!(card.starts_with("Room 1 (#1) [online]"));
    assert!(card.contains("25.5°C"));
    assert!(card.contains("65.0%"));
    assert!(card.contains("heater: off  dryer: off  fan: ON"));
    assert!(card.contains("Running (manual mode)  Remaining 01:00:00"));
}

#[rstest]
fn card_for_disconnected_room() {
    let snap = RoomController::new(RoomSpec::new(3, "Room 3").connected(false))
        .unwrap()
        .snapshot();
    let card = render_card(&snap);
    assert!(card.contains("[offline]"));
    assert!(card.contains("Device disconnected"));
    assert!(!card.contains("temperature"));
}
