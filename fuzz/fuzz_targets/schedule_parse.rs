#![no_main]

use libfuzzer_sys::fuzz_target;
use rhizome_resin_turing::ScaleSchedule;

fuzz_target!(|data: &str| {
    // Parsing should never panic, and every accepted scale must be valid
    if let Ok(schedule) = ScaleSchedule::parse(data) {
        for step in 0..schedule.len() {
            for scale in schedule.get(step) {
                assert!(scale.validate().is_ok());
            }
        }
    }
});
