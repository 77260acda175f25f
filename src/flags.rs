//! Feature flags controlling pipeline behavior.
//!
//! Precedence, later wins: compiled defaults → YAML file section for the
//! current `APP_ENV` → `AISVC_FLAG_*` environment variables (plus a few
//! legacy unprefixed aliases) → per-request overrides. Loading is explicit
//! field-by-field; unknown names are logged and ignored, never invented.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The full switchboard. Every field is a plain bool so the effective set can
/// be attached to a response trace verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Route to the factory pipeline instead of the legacy shim.
    pub use_factory_normalizer: bool,
    /// Collapse `И..` → `И.` in initials.
    pub fix_initials_double_dot: bool,
    /// Title-case each segment of a hyphenated surname.
    pub preserve_hyphenated_case: bool,
    /// Filter stopwords out of the normalized output.
    pub strict_stopwords: bool,
    /// Skip the Unicode stage for pure-ASCII input.
    pub enable_ascii_fastpath: bool,
    /// Reduce oblique case forms to nominative.
    pub enforce_nominative: bool,
    /// Never masculinize feminine surname endings.
    pub preserve_feminine_surnames: bool,
    /// Dictionary-driven diminutive resolution.
    pub enable_enhanced_diminutives: bool,
    /// Gender-aware morphology rules.
    pub enhanced_gender_rules: bool,
    /// Disable heuristic diminutive inference; dictionaries only.
    pub use_diminutives_dictionary_only: bool,
    /// Permit diminutive lookup in the other Cyrillic language's dictionary.
    pub diminutives_allow_cross_lang: bool,
    /// Delegate English names to the nameparser-style splitter.
    pub enable_nameparser_en: bool,
    /// Expand English nicknames (`Bill` → `William`).
    pub enable_en_nicknames: bool,
    /// Drop honorifics and suffixes from English names.
    pub filter_titles_suffixes: bool,
    /// Emit Tier-0 document patterns.
    pub enable_ac_tier0: bool,
    /// Out-of-scope collaborator switch, carried for wire compatibility.
    pub enable_vector_fallback: bool,
    /// Out-of-scope collaborator switch, carried for wire compatibility.
    pub enable_spacy_ner: bool,
    /// Use the tuned state-machine role pass instead of plain positions.
    pub enable_fsm_tuned_roles: bool,
    /// Run legacy and factory pipelines and compare outputs.
    pub enable_dual_processing: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            use_factory_normalizer: true,
            fix_initials_double_dot: false,
            preserve_hyphenated_case: false,
            strict_stopwords: false,
            enable_ascii_fastpath: true,
            enforce_nominative: true,
            preserve_feminine_surnames: true,
            enable_enhanced_diminutives: true,
            enhanced_gender_rules: true,
            use_diminutives_dictionary_only: true,
            diminutives_allow_cross_lang: false,
            enable_nameparser_en: true,
            enable_en_nicknames: true,
            filter_titles_suffixes: true,
            enable_ac_tier0: true,
            enable_vector_fallback: true,
            enable_spacy_ner: true,
            enable_fsm_tuned_roles: true,
            enable_dual_processing: false,
        }
    }
}

/// Shape of `config/feature_flags.yaml`: top-level environment names, each
/// holding a `feature_flags` map.
#[derive(Debug, Deserialize)]
struct FlagFileSection {
    #[serde(default)]
    feature_flags: BTreeMap<String, bool>,
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl FeatureFlags {
    pub const FIELD_NAMES: &'static [&'static str] = &[
        "use_factory_normalizer",
        "fix_initials_double_dot",
        "preserve_hyphenated_case",
        "strict_stopwords",
        "enable_ascii_fastpath",
        "enforce_nominative",
        "preserve_feminine_surnames",
        "enable_enhanced_diminutives",
        "enhanced_gender_rules",
        "use_diminutives_dictionary_only",
        "diminutives_allow_cross_lang",
        "enable_nameparser_en",
        "enable_en_nicknames",
        "filter_titles_suffixes",
        "enable_ac_tier0",
        "enable_vector_fallback",
        "enable_spacy_ner",
        "enable_fsm_tuned_roles",
        "enable_dual_processing",
    ];

    /// Set one flag by its wire name. Returns `false` for unknown names.
    pub fn set_by_name(&mut self, name: &str, value: bool) -> bool {
        match name {
            "use_factory_normalizer" => self.use_factory_normalizer = value,
            "fix_initials_double_dot" => self.fix_initials_double_dot = value,
            "preserve_hyphenated_case" => self.preserve_hyphenated_case = value,
            "strict_stopwords" => self.strict_stopwords = value,
            "enable_ascii_fastpath" => self.enable_ascii_fastpath = value,
            "enforce_nominative" => self.enforce_nominative = value,
            "preserve_feminine_surnames" => self.preserve_feminine_surnames = value,
            "enable_enhanced_diminutives" => self.enable_enhanced_diminutives = value,
            "enhanced_gender_rules" => self.enhanced_gender_rules = value,
            "use_diminutives_dictionary_only" => self.use_diminutives_dictionary_only = value,
            "diminutives_allow_cross_lang" => self.diminutives_allow_cross_lang = value,
            "enable_nameparser_en" => self.enable_nameparser_en = value,
            "enable_en_nicknames" => self.enable_en_nicknames = value,
            "filter_titles_suffixes" => self.filter_titles_suffixes = value,
            "enable_ac_tier0" => self.enable_ac_tier0 = value,
            "enable_vector_fallback" => self.enable_vector_fallback = value,
            "enable_spacy_ner" => self.enable_spacy_ner = value,
            "enable_fsm_tuned_roles" => self.enable_fsm_tuned_roles = value,
            "enable_dual_processing" => self.enable_dual_processing = value,
            _ => return false,
        }
        true
    }

    /// Merge request-level overrides on top of `self`. Unknown names are
    /// ignored (logged at debug), per the request contract.
    pub fn merged_with(&self, overrides: &BTreeMap<String, bool>) -> FeatureFlags {
        let mut merged = *self;
        for (name, value) in overrides {
            if !merged.set_by_name(name, *value) {
                tracing::debug!(flag = %name, "ignoring unknown request flag");
            }
        }
        merged
    }

    /// Apply `AISVC_FLAG_*` environment variables, then legacy unprefixed
    /// aliases for flags that predate the prefix convention.
    pub fn apply_env(&mut self) {
        for name in Self::FIELD_NAMES {
            let key = format!("AISVC_FLAG_{}", name.to_ascii_uppercase());
            if let Ok(raw) = std::env::var(&key) {
                match parse_bool(&raw) {
                    Some(value) => {
                        self.set_by_name(name, value);
                    }
                    None => tracing::warn!(key = %key, value = %raw, "unparseable flag value ignored"),
                }
            }
        }
        const LEGACY_ALIASES: &[(&str, &str)] = &[
            ("USE_DIMINUTIVES_DICTIONARY_ONLY", "use_diminutives_dictionary_only"),
            ("DIMINUTIVES_ALLOW_CROSS_LANG", "diminutives_allow_cross_lang"),
            ("FIX_INITIALS_DOUBLE_DOT", "fix_initials_double_dot"),
            ("PRESERVE_HYPHENATED_CASE", "preserve_hyphenated_case"),
        ];
        for (key, name) in LEGACY_ALIASES {
            // The prefixed form wins when both are set.
            let prefixed = format!("AISVC_FLAG_{}", name.to_ascii_uppercase());
            if std::env::var(&prefixed).is_ok() {
                continue;
            }
            if let Ok(raw) = std::env::var(key) {
                if let Some(value) = parse_bool(&raw) {
                    self.set_by_name(name, value);
                }
            }
        }
    }

    /// Apply the `feature_flags` section for `environment` from a YAML file.
    pub fn apply_file(&mut self, path: &Path, environment: &str) -> Result<(), ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        let sections: BTreeMap<String, FlagFileSection> =
            serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        let Some(section) = sections.get(environment) else {
            return Err(ConfigError::UnknownEnvironment(environment.to_string()));
        };
        for (name, value) in &section.feature_flags {
            if !self.set_by_name(name, *value) {
                tracing::warn!(flag = %name, "unknown flag in config file ignored");
            }
        }
        Ok(())
    }

    /// Full precedence chain: defaults ← file (if readable) ← environment.
    /// `environment` defaults to `APP_ENV` or `development`.
    pub fn from_env_and_file(path: Option<&Path>, environment: Option<&str>) -> FeatureFlags {
        let env_name = environment
            .map(str::to_string)
            .or_else(|| std::env::var("APP_ENV").ok())
            .unwrap_or_else(|| "development".to_string());
        let mut flags = FeatureFlags::default();
        if let Some(path) = path {
            if path.exists() {
                if let Err(e) = flags.apply_file(path, &env_name) {
                    tracing::warn!(error = %e, "flag file not applied");
                }
            }
        }
        flags.apply_env();
        flags
    }

    /// JSON view of the effective flags, attached to the response trace.
    pub fn to_trace_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// FNV-1a fingerprint of the flags that can change normalization output.
    /// Pattern-side and observability switches are excluded so flipping them
    /// does not invalidate cached results.
    pub fn output_fingerprint(&self) -> u64 {
        const AFFECTING: &[&str] = &[
            "use_factory_normalizer",
            "fix_initials_double_dot",
            "preserve_hyphenated_case",
            "strict_stopwords",
            "enable_ascii_fastpath",
            "enforce_nominative",
            "preserve_feminine_surnames",
            "enable_enhanced_diminutives",
            "enhanced_gender_rules",
            "use_diminutives_dictionary_only",
            "diminutives_allow_cross_lang",
            "enable_nameparser_en",
            "enable_en_nicknames",
            "filter_titles_suffixes",
            "enable_fsm_tuned_roles",
        ];
        let mut hash: u64 = 0xcbf29ce484222325;
        for name in AFFECTING {
            let bit = self.get_by_name(name).unwrap_or(false);
            for byte in name.bytes().chain(std::iter::once(bit as u8)) {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(0x100000001b3);
            }
        }
        hash
    }

    fn get_by_name(&self, name: &str) -> Option<bool> {
        Some(match name {
            "use_factory_normalizer" => self.use_factory_normalizer,
            "fix_initials_double_dot" => self.fix_initials_double_dot,
            "preserve_hyphenated_case" => self.preserve_hyphenated_case,
            "strict_stopwords" => self.strict_stopwords,
            "enable_ascii_fastpath" => self.enable_ascii_fastpath,
            "enforce_nominative" => self.enforce_nominative,
            "preserve_feminine_surnames" => self.preserve_feminine_surnames,
            "enable_enhanced_diminutives" => self.enable_enhanced_diminutives,
            "enhanced_gender_rules" => self.enhanced_gender_rules,
            "use_diminutives_dictionary_only" => self.use_diminutives_dictionary_only,
            "diminutives_allow_cross_lang" => self.diminutives_allow_cross_lang,
            "enable_nameparser_en" => self.enable_nameparser_en,
            "enable_en_nicknames" => self.enable_en_nicknames,
            "filter_titles_suffixes" => self.filter_titles_suffixes,
            "enable_ac_tier0" => self.enable_ac_tier0,
            "enable_vector_fallback" => self.enable_vector_fallback,
            "enable_spacy_ner" => self.enable_spacy_ner,
            "enable_fsm_tuned_roles" => self.enable_fsm_tuned_roles,
            "enable_dual_processing" => self.enable_dual_processing,
            _ => return None,
        })
    }
}
