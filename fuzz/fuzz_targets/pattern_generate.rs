#![no_main]

use libfuzzer_sys::fuzz_target;
use nameprep::diminutives::DiminutiveDicts;
use nameprep::lang::Lang;
use nameprep::patterns::{export_for_aho_corasick, PatternGenerator, PatternOptions};

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let generator = PatternGenerator::new(DiminutiveDicts::builtin());

    for lang in [Lang::Ru, Lang::Uk, Lang::En] {
        let patterns = generator.generate(&s, lang, &PatternOptions::default());
        for window in patterns.windows(2) {
            debug_assert!(window[0].recall_tier <= window[1].recall_tier);
        }
        let tiers = export_for_aho_corasick(&patterns);
        for (pattern, tier) in tiers.all() {
            debug_assert!(tier <= 3);
            debug_assert!(!pattern.is_empty());
        }
    }
});
