//! The normalization orchestrator.
//!
//! [`Engine`] is the explicitly-constructed application context: immutable
//! dictionaries, detector thresholds, default flags, and the result cache.
//! [`Engine::process`] runs one request through the strictly sequential
//! stages — validate → cache → unicode → language → tokenize → classify →
//! morphology → assemble — observing the request deadline between stages.
//!
//! Two pipeline implementations sit behind the [`Normalizer`] trait: the
//! legacy shim (tokenize + stopword filtering, no morphology) and the factory
//! pipeline (the full stack). `use_factory_normalizer` picks one;
//! `enable_dual_processing` runs both and logs any divergence.
//!
//! Embedding binaries (e.g. the CI golden runner) conventionally exit `0` on
//! pass, `1` on a quality-threshold violation, and `2` on execution error.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::cache::{fingerprint, CacheConfig, ResultCache};
use crate::diminutives::DiminutiveDicts;
use crate::error::{ConfigError, NormalizeError};
use crate::flags::FeatureFlags;
use crate::lang::{detect, Lang, LangConfig};
use crate::morph::MorphologyEngine;
use crate::roles::{classify, TokenRole};
use crate::stopwords::is_stopword;
use crate::tokenize::tokenize;
use crate::trace::{NormalizationResult, TraceCollector};
use crate::unicode::{normalize_text, UnicodeOptions, YoPolicy};

/// Process-wide engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub lang: LangConfig,
    pub unicode: UnicodeOptions,
    /// Default flags; per-request overrides merge on top.
    pub flags: FeatureFlags,
    /// `None` disables result memoization.
    pub cache: Option<CacheConfig>,
    pub max_input_chars: usize,
}

impl Default for EngineConfig {
    /// Homoglyph folding is opt-in: on genuinely mixed-script text a
    /// wholesale fold would erase the signal the language detector needs.
    fn default() -> Self {
        Self {
            lang: LangConfig::default(),
            unicode: UnicodeOptions {
                aggressive: false,
                fold_homoglyphs: false,
                yo: YoPolicy::Fold,
            },
            flags: FeatureFlags::default(),
            cache: Some(CacheConfig::default()),
            max_input_chars: 10_000,
        }
    }
}

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Skip detection and trust this language.
    pub language: Option<Lang>,
    /// Flag overrides by wire name; unknown names are ignored.
    pub flags: BTreeMap<String, bool>,
    /// Deadline observed between stages.
    pub deadline: Option<Duration>,
    /// Disable per-token trace emission (the flags entry is always present).
    pub disable_trace: bool,
}

trait Normalizer {
    fn name(&self) -> &'static str;

    /// Produce the output token strings for already-normalized text.
    fn run(
        &self,
        engine: &Engine,
        text: &str,
        lang: Lang,
        flags: &FeatureFlags,
        collector: &mut TraceCollector,
    ) -> Vec<String>;
}

/// Pre-morphology shim kept for parity comparisons: tokenize, filter
/// stopwords, emit surfaces unchanged.
struct LegacyNormalizer;

impl Normalizer for LegacyNormalizer {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn run(
        &self,
        _engine: &Engine,
        text: &str,
        lang: Lang,
        flags: &FeatureFlags,
        collector: &mut TraceCollector,
    ) -> Vec<String> {
        tokenize(text, lang, flags, collector)
            .into_iter()
            .filter(|t| !(flags.strict_stopwords && is_stopword(&t.surface, lang)))
            .map(|t| t.surface)
            .collect()
    }
}

/// The full pipeline: tokenize → classify roles → morphology.
struct FactoryNormalizer;

impl Normalizer for FactoryNormalizer {
    fn name(&self) -> &'static str {
        "factory"
    }

    fn run(
        &self,
        engine: &Engine,
        text: &str,
        lang: Lang,
        flags: &FeatureFlags,
        collector: &mut TraceCollector,
    ) -> Vec<String> {
        let mut tokens = tokenize(text, lang, flags, collector);
        classify(&mut tokens, lang, engine.morph.dicts(), flags);
        let outputs = engine.morph.normalize_tokens(&tokens, lang, flags, collector);
        tokens
            .iter()
            .zip(outputs)
            .filter(|(token, _)| {
                if token.filtered {
                    return false;
                }
                !(flags.strict_stopwords && token.role == TokenRole::Stopword)
            })
            .map(|(_, output)| output)
            .collect()
    }
}

pub struct Engine {
    config: EngineConfig,
    morph: MorphologyEngine,
    cache: Option<ResultCache>,
}

impl Engine {
    /// Engine with compiled-in dictionaries.
    pub fn new(config: EngineConfig) -> Self {
        let yo = config.unicode.yo;
        Self {
            cache: config.cache.map(ResultCache::new),
            morph: MorphologyEngine::new(DiminutiveDicts::builtin(), yo),
            config,
        }
    }

    /// Engine with dictionaries extended from a data directory
    /// (`diminutives_ru.json`, `diminutives_uk.json`,
    /// `lexicons/en_nicknames.json`).
    pub fn from_data_dir(config: EngineConfig, dir: &Path) -> Result<Self, ConfigError> {
        let dicts = DiminutiveDicts::from_dir(dir)?;
        let yo = config.unicode.yo;
        Ok(Self {
            cache: config.cache.map(ResultCache::new),
            morph: MorphologyEngine::new(dicts, yo),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn morphology(&self) -> &MorphologyEngine {
        &self.morph
    }

    /// Convenience: default request options.
    pub fn normalize(&self, text: &str) -> Result<NormalizationResult, NormalizeError> {
        self.process(text, &RequestOptions::default())
    }

    /// Run one request through the pipeline.
    pub fn process(
        &self,
        text: &str,
        options: &RequestOptions,
    ) -> Result<NormalizationResult, NormalizeError> {
        let started = Instant::now();
        let effective = self.config.flags.merged_with(&options.flags);
        let trace_enabled = !options.disable_trace;

        if text.chars().count() > self.config.max_input_chars {
            return Err(NormalizeError::InvalidInput(format!(
                "input of {} chars exceeds limit {}",
                text.chars().count(),
                self.config.max_input_chars
            )));
        }

        // Empty input is a successful empty result, not an error.
        if text.trim().is_empty() {
            let mut collector = TraceCollector::new(trace_enabled);
            collector.push_flags(effective.to_trace_value());
            return Ok(collector.finish(String::new(), Vec::new(), Lang::Unknown, 0.0, 0));
        }

        let lang_code = options.language.map(|l| l.code()).unwrap_or("auto");
        let flags_fp = effective.output_fingerprint() ^ (trace_enabled as u64);
        let cache_key = fingerprint(text, lang_code, flags_fp);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(cache_key) {
                tracing::debug!("cache hit");
                return Ok(hit);
            }
        }

        let deadline_check = |stage: &'static str| -> Result<(), NormalizeError> {
            match options.deadline {
                Some(deadline) if started.elapsed() > deadline => {
                    Err(NormalizeError::Timeout { stage })
                }
                _ => Ok(()),
            }
        };

        let mut collector = TraceCollector::new(trace_enabled);
        let original_length = text.chars().count();

        // Unicode stage, skippable for pure-ASCII input. A backtick is the
        // one ASCII character the character map rewrites, so it opts out.
        let clean = if effective.enable_ascii_fastpath && text.is_ascii() && !text.contains('`') {
            let stripped: String = text.chars().filter(|c| !c.is_control() || c.is_whitespace()).collect();
            crate::unicode::collapse_whitespace(&stripped)
        } else {
            let outcome = normalize_text(text, &self.config.unicode);
            if outcome.homoglyph_folds > 0 {
                collector.push_token(
                    text,
                    "text",
                    "unicode.homoglyph_fold",
                    &outcome.normalized,
                    None,
                    None,
                    false,
                    Some(format!("{} characters folded", outcome.homoglyph_folds)),
                );
            }
            if outcome.notes.iter().any(|n| n.contains("encoding_recovered")) {
                collector.push_token(
                    text,
                    "text",
                    "unicode.encoding_recovered",
                    &outcome.normalized,
                    None,
                    None,
                    false,
                    None,
                );
            }
            outcome.normalized
        };
        deadline_check("unicode")?;

        let (language, confidence) = match options.language {
            Some(lang) => (lang, 1.0),
            None => {
                let detection = detect(&clean, &self.config.lang);
                (detection.language, detection.confidence)
            }
        };
        deadline_check("language")?;

        let selected: &dyn Normalizer = if effective.use_factory_normalizer {
            &FactoryNormalizer
        } else {
            &LegacyNormalizer
        };
        tracing::debug!(implementation = selected.name(), "normalizer selected");

        let outputs = if effective.enable_dual_processing && effective.use_factory_normalizer {
            let mut shadow = TraceCollector::new(false);
            let legacy_out = LegacyNormalizer.run(self, &clean, language, &effective, &mut shadow);
            let factory_out = selected.run(self, &clean, language, &effective, &mut collector);
            if legacy_out.join(" ") != factory_out.join(" ") {
                tracing::warn!(
                    legacy = %legacy_out.join(" "),
                    factory = %factory_out.join(" "),
                    "dual processing divergence"
                );
            }
            factory_out
        } else {
            selected.run(self, &clean, language, &effective, &mut collector)
        };
        deadline_check("normalize")?;

        collector.push_flags(effective.to_trace_value());

        let normalized = outputs.join(" ");
        let result = collector.finish(
            normalized,
            outputs,
            language,
            confidence.clamp(0.0, 1.0),
            original_length,
        );

        if let Some(cache) = &self.cache {
            cache.put(cache_key, result.clone());
        }
        Ok(result)
    }

    /// Batch helper over [`Engine::process`].
    pub fn normalize_batch(
        &self,
        texts: &[&str],
        options: &RequestOptions,
    ) -> Vec<Result<NormalizationResult, NormalizeError>> {
        texts.iter().map(|t| self.process(t, options)).collect()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
