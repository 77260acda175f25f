#![no_main]

use libfuzzer_sys::fuzz_target;
use nameprep::unicode::{normalize_text, UnicodeOptions, YoPolicy};

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    for opts in [
        UnicodeOptions::default(),
        UnicodeOptions {
            aggressive: true,
            fold_homoglyphs: true,
            yo: YoPolicy::Fold,
        },
        UnicodeOptions {
            aggressive: false,
            fold_homoglyphs: true,
            yo: YoPolicy::Preserve,
        },
    ] {
        let once = normalize_text(&s, &opts);
        debug_assert!((0.0..=1.0).contains(&once.confidence));

        // Idempotence: a second pass is a no-op.
        let twice = normalize_text(&once.normalized, &opts);
        debug_assert_eq!(once.normalized, twice.normalized);

        // Output whitespace is collapsed ASCII spaces.
        debug_assert!(!once.normalized.starts_with(' '));
        debug_assert!(!once.normalized.ends_with(' '));
        debug_assert!(!once.normalized.contains("  "));
    }
});
