use std::sync::OnceLock;

use proptest::prelude::*;

use nameprep::pipeline::{Engine, EngineConfig, RequestOptions};
use nameprep::unicode::{normalize_text, UnicodeOptions, YoPolicy};

fn engine() -> &'static Engine {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    ENGINE.get_or_init(|| {
        // No cache: every case exercises the full pipeline.
        Engine::new(EngineConfig {
            cache: None,
            ..Default::default()
        })
    })
}

fn any_reasonable_string() -> impl Strategy<Value = String> {
    // Keep it bounded to avoid slow quadratic behavior in tests.
    // Includes full Unicode scalar range (including control chars).
    proptest::collection::vec(any::<char>(), 0..200).prop_map(|cs| cs.into_iter().collect())
}

fn name_like_word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-zА-Яа-яІіЇїЄєҐґ]{2,10}").unwrap()
}

fn unicode_option_sets() -> Vec<UnicodeOptions> {
    vec![
        UnicodeOptions::default(),
        UnicodeOptions { aggressive: true, fold_homoglyphs: true, yo: YoPolicy::Fold },
        UnicodeOptions { aggressive: false, fold_homoglyphs: true, yo: YoPolicy::Preserve },
        UnicodeOptions { aggressive: true, fold_homoglyphs: false, yo: YoPolicy::Preserve },
    ]
}

proptest! {
    #[test]
    fn unicode_normalize_is_idempotent(s in any_reasonable_string()) {
        for opts in unicode_option_sets() {
            let once = normalize_text(&s, &opts).normalized;
            let twice = normalize_text(&once, &opts).normalized;
            prop_assert_eq!(&once, &twice, "options {:?}", opts);
        }
    }

    #[test]
    fn unicode_confidence_in_bounds(s in any_reasonable_string()) {
        let outcome = normalize_text(&s, &UnicodeOptions::default());
        prop_assert!((0.0..=1.0).contains(&outcome.confidence));
    }

    #[test]
    fn unicode_output_is_trimmed_and_single_spaced(s in any_reasonable_string()) {
        let out = normalize_text(&s, &UnicodeOptions::default()).normalized;
        prop_assert!(!out.starts_with(' '));
        prop_assert!(!out.ends_with(' '));
        prop_assert!(!out.contains("  "));
        prop_assert!(out.chars().all(|c| !c.is_whitespace() || c == ' '));
    }

    #[test]
    fn normalized_equals_joined_tokens(s in any_reasonable_string()) {
        if let Ok(result) = engine().process(&s, &RequestOptions::default()) {
            prop_assert_eq!(result.token_count, result.tokens.len());
            prop_assert_eq!(result.normalized, result.tokens.join(" "));
        }
    }

    #[test]
    fn result_confidence_in_bounds(s in any_reasonable_string()) {
        if let Ok(result) = engine().process(&s, &RequestOptions::default()) {
            prop_assert!((0.0..=1.0).contains(&result.confidence));
        }
    }

    #[test]
    fn success_iff_no_errors(s in any_reasonable_string()) {
        if let Ok(result) = engine().process(&s, &RequestOptions::default()) {
            prop_assert_eq!(result.success, result.errors.is_empty());
        }
    }

    #[test]
    fn trace_covers_every_token(s in any_reasonable_string()) {
        if let Ok(result) = engine().process(&s, &RequestOptions::default()) {
            prop_assert!(result.trace.len() >= result.token_count);
            prop_assert_eq!(result.trace.iter().filter(|e| e.is_flags()).count(), 1);
        }
    }

    #[test]
    fn yo_is_folded_under_default_policy(s in any_reasonable_string()) {
        if let Ok(result) = engine().process(&s, &RequestOptions::default()) {
            prop_assert!(!result.normalized.contains('ё'));
            prop_assert!(!result.normalized.contains('Ё'));
        }
    }

    #[test]
    fn results_are_deterministic(s in any_reasonable_string()) {
        let a = Engine::new(EngineConfig { cache: None, ..Default::default() });
        let b = Engine::new(EngineConfig { cache: None, ..Default::default() });
        let ra = a.process(&s, &RequestOptions::default());
        let rb = b.process(&s, &RequestOptions::default());
        match (ra, rb) {
            (Ok(ra), Ok(rb)) => {
                prop_assert_eq!(ra.normalized, rb.normalized);
                prop_assert_eq!(ra.tokens, rb.tokens);
                prop_assert_eq!(ra.language, rb.language);
            }
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "one engine failed where the other succeeded"),
        }
    }

    #[test]
    fn apostrophe_variants_normalize_identically(
        first in name_like_word(),
        second in name_like_word(),
        variant_idx in 0usize..4,
    ) {
        let variants = ['\u{2019}', '\u{2018}', '\u{02BC}', '`'];
        let canonical = format!("{first}'{second}");
        let alternate = format!("{first}{}{second}", variants[variant_idx]);
        let ra = engine().process(&canonical, &RequestOptions::default()).unwrap();
        let rb = engine().process(&alternate, &RequestOptions::default()).unwrap();
        prop_assert_eq!(ra.normalized, rb.normalized);
    }

    #[test]
    fn feminine_surnames_survive_normalization(
        stem in proptest::sample::select(vec!["петр", "иван", "сидор", "смирн", "орл"]),
        suffix in proptest::sample::select(vec!["ова", "ева", "ина"]),
    ) {
        let text = format!("Анна {}{}", stem, suffix);
        let result = engine().process(&text, &RequestOptions::default()).unwrap();
        let surname = result.tokens.last().unwrap();
        prop_assert!(
            surname.to_lowercase().ends_with(suffix),
            "{} lost its feminine ending: {}",
            text,
            surname
        );
    }

    #[test]
    fn pattern_export_is_single_alphabet(
        first in name_like_word(),
        second in name_like_word(),
    ) {
        use nameprep::diminutives::DiminutiveDicts;
        use nameprep::patterns::{export_for_aho_corasick, PatternGenerator, PatternOptions};

        let generator = PatternGenerator::new(DiminutiveDicts::builtin());
        let text = format!("{first} {second}");
        let patterns = generator.generate(&text, nameprep::lang::Lang::Ru, &PatternOptions::default());
        let tiers = export_for_aho_corasick(&patterns);
        for (pattern, tier) in tiers.all() {
            prop_assert!(tier <= 3);
            prop_assert!(pattern.is_ascii(), "unfolded pattern {:?}", pattern);
        }
    }

    #[test]
    fn pattern_tiers_are_sorted(s in any_reasonable_string()) {
        use nameprep::diminutives::DiminutiveDicts;
        use nameprep::patterns::{PatternGenerator, PatternOptions};

        let generator = PatternGenerator::new(DiminutiveDicts::builtin());
        let patterns = generator.generate(&s, nameprep::lang::Lang::Ru, &PatternOptions::default());
        for window in patterns.windows(2) {
            prop_assert!(window[0].recall_tier <= window[1].recall_tier);
        }
        for pattern in &patterns {
            prop_assert!((0.0..=1.0).contains(&pattern.precision_hint));
            prop_assert!((0.0..=1.0).contains(&pattern.confidence));
        }
    }

    #[test]
    fn detection_confidence_in_bounds(s in any_reasonable_string()) {
        let detection = nameprep::lang::detect(&s, &nameprep::lang::LangConfig::default());
        prop_assert!((0.0..=1.0).contains(&detection.confidence));
    }
}
