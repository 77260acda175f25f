//! Script-ratio language detection for RU/UK/EN payment strings.
//!
//! One counting pass over the characters, then a handful of decision rules.
//! No external models: the signals are script ratios, language-specific
//! letters (`і ї є ґ` vs `ё ъ ы э`), and — only for ambiguous Cyrillic — a
//! function-word / surname-suffix fallback.

use serde::{Deserialize, Serialize};

use crate::unicode::{is_cyrillic_letter, is_latin_letter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ru,
    Uk,
    En,
    Mixed,
    Unknown,
}

impl Lang {
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::Uk => "uk",
            Lang::En => "en",
            Lang::Mixed => "mixed",
            Lang::Unknown => "unknown",
        }
    }

    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "ru" => Some(Lang::Ru),
            "uk" => Some(Lang::Uk),
            "en" => Some(Lang::En),
            "mixed" => Some(Lang::Mixed),
            "unknown" => Some(Lang::Unknown),
            _ => None,
        }
    }
}

/// Detection thresholds and bonuses. Field names mirror the YAML config keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LangConfig {
    pub min_cyr_ratio: f64,
    pub min_lat_ratio: f64,
    /// Ratio gap under which a genuinely bi-scripted text is `mixed`.
    pub mixed_gap: f64,
    pub min_confidence: f64,
    pub prefer_uk_chars_bonus: f64,
    pub prefer_ru_chars_bonus: f64,
}

impl Default for LangConfig {
    fn default() -> Self {
        Self {
            min_cyr_ratio: 0.25,
            min_lat_ratio: 0.25,
            mixed_gap: 0.2,
            min_confidence: 0.1,
            prefer_uk_chars_bonus: 0.05,
            prefer_ru_chars_bonus: 0.05,
        }
    }
}

/// Character statistics from the single counting pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LangDetails {
    pub cyr_chars: usize,
    pub lat_chars: usize,
    pub cyr_ratio: f64,
    pub lat_ratio: f64,
    pub uk_chars: usize,
    pub ru_chars: usize,
    pub total_letters: usize,
    pub digits: usize,
    pub punct: usize,
    pub uppercase: usize,
    pub uk_bonus: f64,
    pub ru_bonus: f64,
    pub is_likely_acronym: bool,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LangDetection {
    pub language: Lang,
    pub confidence: f64,
    pub details: LangDetails,
}

impl LangDetection {
    pub fn is_confident(&self, threshold: f64) -> bool {
        self.confidence >= threshold
    }

    fn with(language: Lang, confidence: f64, reason: &'static str, mut details: LangDetails) -> Self {
        details.reason = reason;
        LangDetection {
            language,
            confidence: confidence.clamp(0.0, 1.0),
            details,
        }
    }
}

fn is_uk_specific(c: char) -> bool {
    matches!(c, 'і' | 'ї' | 'є' | 'ґ' | 'І' | 'Ї' | 'Є' | 'Ґ')
}

fn is_ru_specific(c: char) -> bool {
    matches!(c, 'ё' | 'ъ' | 'ы' | 'э' | 'Ё' | 'Ъ' | 'Ы' | 'Э')
}

/// Function words that separate Ukrainian from Russian when the letters alone
/// cannot (both sets lowercase).
const UK_FUNCTION_WORDS: &[&str] = &[
    "і", "з", "від", "до", "у", "але", "або", "якщо", "коли", "де", "як", "що", "хто", "це",
    "той", "ця", "ці", "був", "була", "були", "бути", "є", "немає", "кошти", "гроші", "платіж",
    "переказ", "одержувач", "отримувач", "усього", "загалом",
];

const RU_FUNCTION_WORDS: &[&str] = &[
    "и", "с", "от", "до", "из", "но", "или", "если", "когда", "где", "как", "что", "кто", "это",
    "тот", "эта", "эти", "был", "была", "были", "быть", "есть", "нет", "деньги", "средства",
    "перевод", "платеж", "оплата",
];

/// Ukrainian surname suffixes (strong UK signal even in otherwise neutral
/// Cyrillic).
const UK_SURNAME_SUFFIXES: &[&str] = &[
    "енко", "енка", "чук", "чука", "юк", "юка", "ук", "ука", "ський", "ського", "цький",
    "цького", "зький", "зького",
];

fn count_pass(text: &str) -> LangDetails {
    let mut d = LangDetails::default();
    for c in text.chars() {
        if is_cyrillic_letter(c) {
            d.cyr_chars += 1;
            if is_uk_specific(c) {
                d.uk_chars += 1;
            } else if is_ru_specific(c) {
                d.ru_chars += 1;
            }
        } else if is_latin_letter(c) {
            d.lat_chars += 1;
        } else if c.is_ascii_digit() {
            d.digits += 1;
        } else if !c.is_whitespace() {
            d.punct += 1;
        }
        if c.is_uppercase() {
            d.uppercase += 1;
        }
    }
    d.total_letters = d.cyr_chars + d.lat_chars;
    if d.total_letters > 0 {
        d.cyr_ratio = d.cyr_chars as f64 / d.total_letters as f64;
        d.lat_ratio = d.lat_chars as f64 / d.total_letters as f64;
    }
    d
}

/// Ukrainian-vs-Russian fallback for Cyrillic text without specific letters:
/// count function-word matches each way plus UK surname-suffix hits. Ties go
/// to Russian.
fn cyrillic_pattern_fallback(text: &str, details: LangDetails) -> LangDetection {
    let mut uk_matches = 0usize;
    let mut ru_matches = 0usize;
    let mut uk_surnames = 0usize;

    for raw in text.split_whitespace() {
        let word: String = raw
            .chars()
            .filter(|c| c.is_alphabetic() || *c == '\'' || *c == '-')
            .flat_map(|c| c.to_lowercase())
            .collect();
        if word.is_empty() {
            continue;
        }
        if UK_FUNCTION_WORDS.contains(&word.as_str()) {
            uk_matches += 1;
        }
        if RU_FUNCTION_WORDS.contains(&word.as_str()) {
            ru_matches += 1;
        }
        if word.chars().count() > 4 && UK_SURNAME_SUFFIXES.iter().any(|suf| word.ends_with(suf)) {
            uk_surnames += 1;
        }
    }

    if uk_matches > ru_matches || uk_surnames > 0 {
        let confidence = (0.7 + uk_matches as f64 * 0.05 + uk_surnames as f64 * 0.1).min(0.9);
        LangDetection::with(Lang::Uk, confidence, "cyrillic_patterns_ukrainian", details)
    } else if ru_matches > uk_matches {
        let confidence = (0.7 + ru_matches as f64 * 0.05).min(0.9);
        LangDetection::with(Lang::Ru, confidence, "cyrillic_patterns_russian", details)
    } else {
        LangDetection::with(Lang::Ru, 0.6, "cyrillic_default_russian", details)
    }
}

/// Detect the language of `text`.
pub fn detect(text: &str, config: &LangConfig) -> LangDetection {
    if text.trim().is_empty() {
        return LangDetection::with(Lang::Unknown, 0.0, "empty_text", LangDetails::default());
    }

    let details = count_pass(text);
    let total_chars = text.chars().filter(|c| !c.is_whitespace()).count();
    let non_alpha = total_chars.saturating_sub(details.total_letters);

    if total_chars > 0 && non_alpha as f64 / total_chars as f64 >= 0.7 {
        return LangDetection::with(Lang::Unknown, 0.2, "excessive_non_alphabetic_chars", details);
    }
    if details.total_letters < 3 {
        return LangDetection::with(Lang::Unknown, 0.3, "insufficient_alphabetic_chars", details);
    }

    let trimmed = text.trim();
    let is_likely_acronym = details.total_letters <= 10
        && details.uppercase as f64 / details.total_letters as f64 > 0.9
        && trimmed.chars().all(|c| c.is_uppercase() || c.is_whitespace());

    let mut result = decide(text, config, details);

    // Bonuses for language-specific letters, capped so a run of `і`s cannot
    // saturate the score.
    if matches!(result.language, Lang::Uk) && result.details.uk_chars > 0 {
        let bonus = (result.details.uk_chars as f64 * config.prefer_uk_chars_bonus).min(0.2);
        result.details.uk_bonus = bonus;
        result.confidence += bonus;
    }
    if matches!(result.language, Lang::Ru) && result.details.ru_chars > 0 {
        let bonus = (result.details.ru_chars as f64 * config.prefer_ru_chars_bonus).min(0.2);
        result.details.ru_bonus = bonus;
        result.confidence += bonus;
    }

    if is_likely_acronym {
        result.confidence = (result.confidence - 0.4).max(0.1);
        result.details.is_likely_acronym = true;
    }

    if result.confidence < config.min_confidence {
        result.language = Lang::Unknown;
        result.details.reason = "low_confidence";
    }
    result.confidence = result.confidence.clamp(0.0, 1.0);
    result
}

fn decide(text: &str, config: &LangConfig, details: LangDetails) -> LangDetection {
    let cyr = details.cyr_ratio;
    let lat = details.lat_ratio;

    if cyr < config.min_cyr_ratio && lat < config.min_lat_ratio {
        return LangDetection::with(Lang::Unknown, 0.0, "below_thresholds", details);
    }

    if cyr >= config.min_cyr_ratio && lat >= config.min_lat_ratio && (cyr - lat).abs() < config.mixed_gap {
        let confidence = (cyr.max(lat) + 0.05).min(0.95);
        return LangDetection::with(Lang::Mixed, confidence, "mixed_language", details);
    }

    if cyr > lat {
        if details.uk_chars > details.ru_chars {
            LangDetection::with(Lang::Uk, cyr, "cyrillic_ukrainian", details)
        } else if details.ru_chars > details.uk_chars {
            LangDetection::with(Lang::Ru, cyr, "cyrillic_russian", details)
        } else {
            cyrillic_pattern_fallback(text, details)
        }
    } else {
        LangDetection::with(Lang::En, lat, "latin", details)
    }
}

/// Batch helper over [`detect`].
pub fn detect_batch(texts: &[&str], config: &LangConfig) -> Vec<LangDetection> {
    texts.iter().map(|t| detect(t, config)).collect()
}
