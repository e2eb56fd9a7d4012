#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not.
    let Ok(cfg) = dryroom_config::load_toml(data) else {
        return;
    };
    if cfg.validate().is_ok() {
        // A validated config must always build a registry unless it has no rooms.
        match dryroom_core::RoomRegistry::from_config(&cfg) {
            Ok(reg) => assert_eq!(reg.len(), cfg.rooms.len()),
            Err(e) => assert!(cfg.rooms.is_empty(), "valid config rejected: {e}"),
        }
    }
});
