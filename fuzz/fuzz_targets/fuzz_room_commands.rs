#![no_main]
use dryroom_core::{
    Actuator, Command, ControlMode, DryingProgram, Phase, RoomController, RoomSpec,
};
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Start { temp: f32, humidity: f32, duration_s: u16 },
    Pause,
    Resume,
    Stop,
    EmergencyStop,
    Toggle(u8),
    Update { temp: f32, humidity: f32, duration_s: u16 },
    Automatic(bool),
    Tick(u8),
    Connected(bool),
}

fuzz_target!(|ops: Vec<Op>| {
    let Ok(mut room) = RoomController::new(RoomSpec::new(1, "fuzz")) else {
        return;
    };
    for op in ops {
        let before = room.snapshot();
        let result = match op {
            Op::Start { temp, humidity, duration_s } => room.apply(Command::StartDrying(
                DryingProgram::new(temp, humidity, u32::from(duration_s)),
            )),
            Op::Pause => room.apply(Command::Pause),
            Op::Resume => room.apply(Command::Resume),
            Op::Stop => room.apply(Command::Stop),
            Op::EmergencyStop => room.apply(Command::EmergencyStop),
            Op::Toggle(n) => {
                let a = Actuator::ALL[usize::from(n) % Actuator::ALL.len()];
                room.apply(Command::Toggle(a))
            }
            Op::Update { temp, humidity, duration_s } => room.apply(Command::UpdateSettings(
                DryingProgram::new(temp, humidity, u32::from(duration_s)),
            )),
            Op::Automatic(on) => room.apply(Command::SetMode(if on {
                ControlMode::Automatic
            } else {
                ControlMode::Manual
            })),
            Op::Tick(n) => {
                for _ in 0..n {
                    room.tick();
                }
                Ok(())
            }
            Op::Connected(c) => {
                room.set_connected(c);
                Ok(())
            }
        };
        let s = room.snapshot();
        if result.is_err() {
            assert_eq!(s, before, "rejected command mutated the room");
        }
        assert!(s.remaining_s <= s.total_s);
        if !s.phase.is_active() {
            assert!(s.remaining_s <= s.program.duration_s);
        }
        if s.phase == Phase::Idle {
            assert_eq!(s.remaining_s, s.total_s);
        }
        if !s.connected {
            assert!(!s.actuators.any_on());
            assert_eq!(s.phase, Phase::Idle);
        }
    }
});
