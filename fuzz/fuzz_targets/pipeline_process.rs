#![no_main]

use libfuzzer_sys::fuzz_target;
use nameprep::pipeline::{Engine, EngineConfig, RequestOptions};

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let engine = Engine::new(EngineConfig {
        cache: None,
        ..Default::default()
    });

    if let Ok(result) = engine.process(&s, &RequestOptions::default()) {
        debug_assert_eq!(result.normalized, result.tokens.join(" "));
        debug_assert_eq!(result.success, result.errors.is_empty());
        debug_assert!((0.0..=1.0).contains(&result.confidence));
        debug_assert_eq!(result.trace.iter().filter(|e| e.is_flags()).count(), 1);
    }
});
