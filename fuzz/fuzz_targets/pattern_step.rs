#![no_main]

use libfuzzer_sys::fuzz_target;
use rhizome_resin_turing::{Field, PatternEngine, Scale};

fuzz_target!(|input: (u8, u8, Vec<(u8, u8, u8)>, Vec<f32>)| {
    let (width, height, scales, samples) = input;
    let (width, height) = (width as usize % 16 + 1, height as usize % 16 + 1);
    let mut data: Vec<f32> = samples.into_iter().take(width * height).collect();
    data.resize(width * height, 0.5);

    // Non-finite samples must be rejected up front
    let Ok(field) = Field::from_vec(width, height, data) else {
        return;
    };
    assert!(field.as_slice().iter().all(|v| v.is_finite()));
    let scales: Vec<Scale> = scales
        .into_iter()
        .take(4)
        .map(|(a, i, inc)| Scale::new(a as usize, i as usize, (inc as f32 + 1.0) / 256.0))
        .collect();

    // Steps never panic and keep the field finite
    let mut engine = PatternEngine::from_field(field);
    if engine.step(&scales).is_ok() && !scales.is_empty() {
        assert!(engine.as_slice().iter().all(|v| v.is_finite()));
    }
});
