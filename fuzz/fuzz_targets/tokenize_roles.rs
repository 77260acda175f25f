#![no_main]

use libfuzzer_sys::fuzz_target;
use nameprep::diminutives::DiminutiveDicts;
use nameprep::flags::FeatureFlags;
use nameprep::lang::Lang;
use nameprep::roles::{classify, TokenRole};
use nameprep::tokenize::tokenize;
use nameprep::trace::TraceCollector;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let dicts = DiminutiveDicts::builtin();

    let mut flags = FeatureFlags::default();
    flags.fix_initials_double_dot = true;
    flags.preserve_hyphenated_case = true;

    for lang in [Lang::Ru, Lang::Uk, Lang::En, Lang::Mixed, Lang::Unknown] {
        let mut collector = TraceCollector::new(true);
        let mut tokens = tokenize(&s, lang, &flags, &mut collector);
        classify(&mut tokens, lang, &dicts, &flags);

        for token in &tokens {
            debug_assert!(!token.surface.is_empty());
            if token.role == TokenRole::Initial {
                debug_assert!(token.surface.ends_with('.'));
            }
        }
    }
});
