//! Tiered pattern generation for Aho-Corasick watchlist screening.
//!
//! Recall tiers: 0 = exact document identifiers (regex hits), 1 = full and
//! structured names plus companies with a legal form, 2 = single potential
//! surnames, quoted company cores, initial runs, 3 = broad all-caps catches.
//! Lower tier = fire with less downstream confirmation.
//!
//! All regexes are compiled once in [`PatternGenerator::new`]; the generator
//! holds no mutable state and is freely shareable.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::diminutives::DiminutiveDicts;
use crate::lang::Lang;
use crate::stopwords::is_stopword;
use crate::translit::to_latin;
use crate::variants::expand_variants;

/// A generated screening pattern with its confidence metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedPattern {
    pub pattern: String,
    pub pattern_type: String,
    /// 0 = exact, 1 = high recall, 2 = medium, 3 = broad.
    pub recall_tier: u8,
    /// Expected precision, for downstream filtering.
    pub precision_hint: f64,
    /// Spelling variants generated from this pattern.
    pub variants: Vec<String>,
    pub language: String,
    pub confidence: f64,
}

/// Options for one generation run.
#[derive(Debug, Clone, Copy)]
pub struct PatternOptions {
    /// Emit Tier-0 document patterns.
    pub enable_tier0: bool,
    /// Run the variant generators on person patterns.
    pub include_variants: bool,
    /// Cap on patterns per input text.
    pub max_patterns: usize,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            enable_tier0: true,
            include_variants: true,
            max_patterns: 200,
        }
    }
}

/// Patterns bucketed for the Aho-Corasick loader, already folded into the
/// automaton alphabet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TieredPatterns {
    pub tier_0: Vec<String>,
    pub tier_1: Vec<String>,
    pub tier_2: Vec<String>,
    pub tier_3: Vec<String>,
}

impl TieredPatterns {
    pub fn all(&self) -> impl Iterator<Item = (&str, u8)> + '_ {
        self.tier_0
            .iter()
            .map(|p| (p.as_str(), 0))
            .chain(self.tier_1.iter().map(|p| (p.as_str(), 1)))
            .chain(self.tier_2.iter().map(|p| (p.as_str(), 2)))
            .chain(self.tier_3.iter().map(|p| (p.as_str(), 3)))
    }

    pub fn len(&self) -> usize {
        self.tier_0.len() + self.tier_1.len() + self.tier_2.len() + self.tier_3.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize a pattern string for AC matching: NFKC, casefold, apostrophe and
/// dash unification, whitespace collapse. No transliteration at this stage.
pub fn normalize_for_ac(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    let mut out = String::with_capacity(composed.len());
    let mut in_ws = false;
    for c in composed.chars() {
        if c.is_whitespace() {
            in_ws = true;
            continue;
        }
        if in_ws && !out.is_empty() {
            out.push(' ');
        }
        in_ws = false;
        match c {
            '\u{2019}' | '\u{2018}' | '\u{02BC}' | '`' | '´' => out.push('\''),
            '"' | '\u{201C}' | '\u{201D}' | '«' | '»' => out.push('\''),
            '‐' | '‑' | '‒' | '–' | '—' | '―' | '−' => out.push('-'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// The AC automaton runs in one alphabet: [`normalize_for_ac`] plus a forced
/// Cyrillic → Latin fold.
pub fn ac_fold(text: &str) -> String {
    to_latin(&normalize_for_ac(text))
}

struct DocumentRegexes {
    kinds: Vec<(&'static str, Regex)>,
}

pub struct PatternGenerator {
    dicts: DiminutiveDicts,
    documents: DocumentRegexes,
    full_name_cyr: Regex,
    full_name_lat: Regex,
    structured_cyr: [Regex; 2],
    structured_lat: [Regex; 2],
    legal_form: Regex,
    quoted_core: Regex,
    surname_only_cyr: Regex,
    surname_only_lat: Regex,
    initials_run: Regex,
    caps_run: Regex,
}

impl PatternGenerator {
    pub fn new(dicts: DiminutiveDicts) -> Self {
        let documents = DocumentRegexes {
            kinds: vec![
                ("passport", Regex::new(r"\b[A-Z]{2}\d{6}\b").unwrap()),
                ("passport", Regex::new(r"\b[А-Я]{2}\d{6}\b").unwrap()),
                ("passport", Regex::new(r"\b\d{2}\s?\d{2}\s?\d{6}\b").unwrap()),
                ("tax_id", Regex::new(r"\b\d{10}\b").unwrap()),
                ("tax_id", Regex::new(r"\b\d{12}\b").unwrap()),
                ("edrpou", Regex::new(r"\b\d{8}\b").unwrap()),
                ("edrpou", Regex::new(r"\b\d{6}\b").unwrap()),
                ("iban", Regex::new(r"\bUA\d{2}[A-Z0-9]{25}\b").unwrap()),
                ("iban", Regex::new(r"\b[A-Z]{2}\d{2}[A-Z0-9]{11,30}\b").unwrap()),
            ],
        };
        Self {
            dicts,
            documents,
            full_name_cyr: Regex::new(
                r"[А-ЯЁІЇЄҐ][а-яёіїєґ']+(?:\s+[А-ЯЁІЇЄҐ][а-яёіїєґ']+){1,3}",
            )
            .unwrap(),
            full_name_lat: Regex::new(r"\b[A-Z][a-z']+(?:\s+[A-Z][a-z']+){1,3}\b").unwrap(),
            structured_cyr: [
                Regex::new(r"[А-ЯЁІЇЄҐ][а-яёіїєґ']+\s+[А-ЯЁІЇЄҐ]\.\s*[А-ЯЁІЇЄҐ]\.").unwrap(),
                Regex::new(r"[А-ЯЁІЇЄҐ]\.\s*[А-ЯЁІЇЄҐ]\.\s*[А-ЯЁІЇЄҐ][а-яёіїєґ']+").unwrap(),
            ],
            structured_lat: [
                Regex::new(r"\b[A-Z][a-z']+\s+[A-Z]\.\s*[A-Z]\.").unwrap(),
                Regex::new(r"\b[A-Z]\.\s*[A-Z]\.\s*[A-Z][a-z']+\b").unwrap(),
            ],
            legal_form: Regex::new(
                r"(?i)\b(ООО|ЗАО|ОАО|ПАО|ИП|ТОВ|ПАТ|ПрАТ|ФОП|LLC|Inc|Ltd|Corp|Co|LP|LLP|PLC|GmbH)\b",
            )
            .unwrap(),
            quoted_core: Regex::new("[\"«“]([^\"«»”]{2,30})[\"»”]").unwrap(),
            surname_only_cyr: Regex::new(r"\b[А-ЯЁІЇЄҐ][а-яёіїєґ']{3,}\b").unwrap(),
            surname_only_lat: Regex::new(r"\b[A-Z][a-z']{3,}\b").unwrap(),
            initials_run: Regex::new(r"(?:[А-ЯЁІЇЄҐA-Z]\.\s*){2,3}").unwrap(),
            caps_run: Regex::new(r"\b[A-ZА-ЯЁІЇЄҐ]{2,6}\b").unwrap(),
        }
    }

    /// Generate tiered patterns from one seed text (a watchlist name or a
    /// free-text record).
    pub fn generate(&self, text: &str, lang: Lang, options: &PatternOptions) -> Vec<UnifiedPattern> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let mut patterns = Vec::new();

        if options.enable_tier0 {
            self.extract_documents(text, &mut patterns);
        }
        self.extract_full_names(text, lang, options, &mut patterns);
        self.extract_structured_names(text, lang, &mut patterns);
        self.extract_companies(text, lang, &mut patterns);
        self.extract_single_surnames(text, lang, &mut patterns);
        self.extract_initial_runs(text, lang, &mut patterns);
        self.extract_caps_runs(text, lang, &mut patterns);

        self.finalize(patterns, lang, options)
    }

    fn extract_documents(&self, text: &str, out: &mut Vec<UnifiedPattern>) {
        for (kind, regex) in &self.documents.kinds {
            for m in regex.find_iter(text) {
                out.push(UnifiedPattern {
                    pattern: normalize_for_ac(m.as_str()),
                    pattern_type: format!("document_{kind}"),
                    recall_tier: 0,
                    precision_hint: 0.99,
                    variants: Vec::new(),
                    language: "universal".to_string(),
                    confidence: 0.98,
                });
            }
        }
    }

    fn extract_full_names(
        &self,
        text: &str,
        lang: Lang,
        options: &PatternOptions,
        out: &mut Vec<UnifiedPattern>,
    ) {
        let regex = match lang {
            Lang::En => &self.full_name_lat,
            _ => &self.full_name_cyr,
        };
        for m in regex.find_iter(text) {
            let name = m.as_str().trim();
            if self.contains_stopword(name, lang) {
                continue;
            }
            let variants = if options.include_variants {
                expand_variants(name, lang, &self.dicts)
            } else {
                Vec::new()
            };
            out.push(UnifiedPattern {
                pattern: normalize_for_ac(name),
                pattern_type: "full_name".to_string(),
                recall_tier: 1,
                precision_hint: 0.85,
                variants,
                language: lang.code().to_string(),
                confidence: 0.9,
            });
        }
    }

    fn extract_structured_names(&self, text: &str, lang: Lang, out: &mut Vec<UnifiedPattern>) {
        let regexes: &[Regex] = match lang {
            Lang::En => &self.structured_lat,
            _ => &self.structured_cyr,
        };
        for regex in regexes {
            for m in regex.find_iter(text) {
                out.push(UnifiedPattern {
                    pattern: normalize_for_ac(m.as_str()),
                    pattern_type: "structured_name".to_string(),
                    recall_tier: 1,
                    precision_hint: 0.8,
                    variants: Vec::new(),
                    language: lang.code().to_string(),
                    confidence: 0.85,
                });
            }
        }
    }

    fn extract_companies(&self, text: &str, lang: Lang, out: &mut Vec<UnifiedPattern>) {
        for m in self.legal_form.find_iter(text) {
            let window_start = m.end();
            let mut window_end = text.len().min(window_start + 60);
            while !text.is_char_boundary(window_end) {
                window_end -= 1;
            }
            let window = &text[window_start..window_end];
            let core = self
                .quoted_core
                .captures(window)
                .map(|c| c.get(1).unwrap().as_str().to_string())
                .or_else(|| {
                    // Up to three capitalized words right after the marker.
                    let words: Vec<&str> = window
                        .split_whitespace()
                        .take_while(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
                        .take(3)
                        .collect();
                    (!words.is_empty()).then(|| words.join(" "))
                });
            if let Some(core) = core {
                out.push(UnifiedPattern {
                    pattern: normalize_for_ac(&format!("{} {}", m.as_str(), core)),
                    pattern_type: "company_legal".to_string(),
                    recall_tier: 1,
                    precision_hint: 0.85,
                    variants: Vec::new(),
                    language: lang.code().to_string(),
                    confidence: 0.88,
                });
            }
        }
        // Quoted cores with no legal form nearby are weaker signals.
        for caps in self.quoted_core.captures_iter(text) {
            let core = caps.get(1).unwrap().as_str();
            if !self.contains_stopword(core, lang) {
                out.push(UnifiedPattern {
                    pattern: normalize_for_ac(core),
                    pattern_type: "quoted_core".to_string(),
                    recall_tier: 2,
                    precision_hint: 0.5,
                    variants: Vec::new(),
                    language: lang.code().to_string(),
                    confidence: 0.6,
                });
            }
        }
    }

    fn extract_single_surnames(&self, text: &str, lang: Lang, out: &mut Vec<UnifiedPattern>) {
        let regex = match lang {
            Lang::En => &self.surname_only_lat,
            _ => &self.surname_only_cyr,
        };
        for m in regex.find_iter(text) {
            let word = m.as_str();
            if is_stopword(word, lang) {
                continue;
            }
            out.push(UnifiedPattern {
                pattern: normalize_for_ac(word),
                pattern_type: "surname_only".to_string(),
                recall_tier: 2,
                precision_hint: 0.4,
                variants: Vec::new(),
                language: lang.code().to_string(),
                confidence: 0.5,
            });
        }
    }

    fn extract_initial_runs(&self, text: &str, lang: Lang, out: &mut Vec<UnifiedPattern>) {
        for m in self.initials_run.find_iter(text) {
            let run = m.as_str().trim();
            out.push(UnifiedPattern {
                pattern: normalize_for_ac(run),
                pattern_type: "initials_run".to_string(),
                recall_tier: 2,
                precision_hint: 0.3,
                variants: Vec::new(),
                language: lang.code().to_string(),
                confidence: 0.4,
            });
        }
    }

    fn extract_caps_runs(&self, text: &str, lang: Lang, out: &mut Vec<UnifiedPattern>) {
        for m in self.caps_run.find_iter(text) {
            let run = m.as_str();
            if is_stopword(run, lang) || run.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            out.push(UnifiedPattern {
                pattern: normalize_for_ac(run),
                pattern_type: "caps_sequence".to_string(),
                recall_tier: 3,
                precision_hint: 0.2,
                variants: Vec::new(),
                language: lang.code().to_string(),
                confidence: 0.3,
            });
        }
    }

    fn contains_stopword(&self, phrase: &str, lang: Lang) -> bool {
        phrase.split_whitespace().any(|w| is_stopword(w, lang))
    }

    /// Dedup (case-insensitive, highest confidence wins), drop junk, sort by
    /// `(recall_tier, -len)`, cap.
    fn finalize(
        &self,
        patterns: Vec<UnifiedPattern>,
        lang: Lang,
        options: &PatternOptions,
    ) -> Vec<UnifiedPattern> {
        let mut best: HashMap<String, UnifiedPattern> = HashMap::new();
        for pattern in patterns {
            if pattern.pattern.chars().count() < 2 {
                continue;
            }
            if is_stopword(&pattern.pattern, lang) {
                continue;
            }
            let key = pattern.pattern.clone();
            match best.get(&key) {
                Some(existing) if existing.confidence >= pattern.confidence => {}
                _ => {
                    best.insert(key, pattern);
                }
            }
        }
        let mut out: Vec<UnifiedPattern> = best.into_values().collect();
        out.sort_by(|a, b| {
            a.recall_tier
                .cmp(&b.recall_tier)
                .then(b.pattern.chars().count().cmp(&a.pattern.chars().count()))
                .then(a.pattern.cmp(&b.pattern))
        });
        out.truncate(options.max_patterns);
        out
    }
}

/// Bucket patterns (and their variants) into tier lists for the AC loader,
/// folding everything into the automaton alphabet and deduplicating.
pub fn export_for_aho_corasick(patterns: &[UnifiedPattern]) -> TieredPatterns {
    let mut tiers = TieredPatterns::default();
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    for pattern in patterns {
        let bucket = match pattern.recall_tier {
            0 => &mut tiers.tier_0,
            1 => &mut tiers.tier_1,
            2 => &mut tiers.tier_2,
            _ => &mut tiers.tier_3,
        };
        for raw in std::iter::once(pattern.pattern.as_str())
            .chain(pattern.variants.iter().map(String::as_str))
        {
            let folded = ac_fold(raw);
            if folded.chars().count() >= 2 && seen.insert(folded.clone()) {
                bucket.push(folded);
            }
        }
    }
    tiers
}

/// Summary statistics for a generated pattern set (used by the index-loader
/// collaborator to sanity-check a batch before shipping it).
#[derive(Debug, Clone, Serialize)]
pub struct PatternStats {
    pub total: usize,
    pub by_tier: [usize; 4],
    pub with_variants: usize,
    pub average_confidence: f64,
}

pub fn pattern_statistics(patterns: &[UnifiedPattern]) -> PatternStats {
    let mut by_tier = [0usize; 4];
    let mut with_variants = 0usize;
    for p in patterns {
        by_tier[(p.recall_tier as usize).min(3)] += 1;
        if !p.variants.is_empty() {
            with_variants += 1;
        }
    }
    let average_confidence = if patterns.is_empty() {
        0.0
    } else {
        patterns.iter().map(|p| p.confidence).sum::<f64>() / patterns.len() as f64
    };
    PatternStats {
        total: patterns.len(),
        by_tier,
        with_variants,
        average_confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> PatternGenerator {
        PatternGenerator::new(DiminutiveDicts::builtin())
    }

    #[test]
    fn test_normalize_for_ac() {
        assert_eq!(normalize_for_ac("Иванов  Иван"), "иванов иван");
        assert_eq!(normalize_for_ac("O\u{2019}Connor — Smith"), "o'connor - smith");
        assert_eq!(normalize_for_ac("«Рога»"), "'рога'");
    }

    #[test]
    fn test_ac_fold_single_alphabet() {
        let folded = ac_fold("Иванов Ivanov");
        assert!(folded.is_ascii());
        assert_eq!(folded, "ivanov ivanov");
    }

    #[test]
    fn test_tier0_documents() {
        let g = generator();
        let patterns = g.generate(
            "паспорт AB123456 ІПН 1234567890",
            Lang::Uk,
            &PatternOptions::default(),
        );
        assert!(patterns
            .iter()
            .any(|p| p.pattern_type == "document_passport" && p.recall_tier == 0));
        assert!(patterns
            .iter()
            .any(|p| p.recall_tier == 0 && p.pattern == "1234567890"));
    }

    #[test]
    fn test_tier0_disabled() {
        let g = generator();
        let options = PatternOptions {
            enable_tier0: false,
            ..Default::default()
        };
        let patterns = g.generate("AB123456", Lang::En, &options);
        assert!(patterns.iter().all(|p| p.recall_tier != 0));
    }

    #[test]
    fn test_full_name_with_variants() {
        let g = generator();
        let patterns = g.generate("Иванов Иван", Lang::Ru, &PatternOptions::default());
        let full = patterns
            .iter()
            .find(|p| p.pattern_type == "full_name")
            .expect("full name pattern");
        assert_eq!(full.pattern, "иванов иван");
        assert_eq!(full.recall_tier, 1);
        assert!(!full.variants.is_empty());
        assert!(full.variants.len() <= crate::variants::MAX_VARIANTS_PER_SEED);
    }

    #[test]
    fn test_structured_name() {
        let g = generator();
        let patterns = g.generate("Иванов И. И. перевод", Lang::Ru, &PatternOptions::default());
        assert!(patterns.iter().any(|p| p.pattern_type == "structured_name"));
    }

    #[test]
    fn test_company_with_legal_form() {
        let g = generator();
        let patterns = g.generate("ООО «Рога и Копыта»", Lang::Ru, &PatternOptions::default());
        let company = patterns
            .iter()
            .find(|p| p.pattern_type == "company_legal")
            .expect("company pattern");
        assert!(company.pattern.starts_with("ооо"));
        assert_eq!(company.recall_tier, 1);
    }

    #[test]
    fn test_caps_run_tier3_skips_stopwords() {
        let g = generator();
        let patterns = g.generate("ПАТ для FSB", Lang::Ru, &PatternOptions::default());
        assert!(patterns.iter().any(|p| p.pattern == "fsb" && p.recall_tier == 3));
        assert!(patterns.iter().all(|p| p.pattern != "для"));
    }

    #[test]
    fn test_sorted_by_tier_then_length() {
        let g = generator();
        let patterns = g.generate(
            "Иванов Иван Иванович паспорт AB123456",
            Lang::Ru,
            &PatternOptions::default(),
        );
        let tiers: Vec<u8> = patterns.iter().map(|p| p.recall_tier).collect();
        let mut sorted = tiers.clone();
        sorted.sort_unstable();
        assert_eq!(tiers, sorted);
    }

    #[test]
    fn test_dedup_case_insensitive() {
        let g = generator();
        let patterns = g.generate("Иванов ИВАНОВ Иванов", Lang::Ru, &PatternOptions::default());
        let surnames: Vec<_> = patterns.iter().filter(|p| p.pattern == "иванов").collect();
        assert_eq!(surnames.len(), 1);
    }

    #[test]
    fn test_export_tiers_are_folded_and_deduped() {
        let g = generator();
        let patterns = g.generate("Иванов Иван AB123456", Lang::Ru, &PatternOptions::default());
        let tiers = export_for_aho_corasick(&patterns);
        assert!(!tiers.is_empty());
        for (pattern, _tier) in tiers.all() {
            assert!(pattern.is_ascii(), "unfolded pattern {pattern:?}");
        }
        let all: Vec<&str> = tiers.all().map(|(p, _)| p).collect();
        let unique: std::collections::HashSet<&&str> = all.iter().collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn test_empty_input() {
        let g = generator();
        assert!(g.generate("", Lang::Ru, &PatternOptions::default()).is_empty());
        assert!(g.generate("   ", Lang::Ru, &PatternOptions::default()).is_empty());
    }

    #[test]
    fn test_statistics() {
        let g = generator();
        let patterns = g.generate("Иванов Иван AB123456", Lang::Ru, &PatternOptions::default());
        let stats = pattern_statistics(&patterns);
        assert_eq!(stats.total, patterns.len());
        assert!(stats.average_confidence > 0.0);
        assert_eq!(stats.by_tier.iter().sum::<usize>(), stats.total);
    }
}
