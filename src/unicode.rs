//! Character-level normalization for names: encoding repair, homoglyph
//! folding, punctuation unification, NFC, and invisible-character cleanup.
//!
//! The stages here are deliberately ordered (see [`normalize_text`]) and the
//! whole pipeline is **idempotent**: `normalize_text(normalize_text(x)) ==
//! normalize_text(x)`. Case is never modified at this layer — case policy
//! belongs to the tokenizer and morphology layers.

use unicode_normalization::UnicodeNormalization;

use crate::fold::is_combining_mark;

pub fn nfc(text: &str) -> String {
    text.nfc().collect()
}

pub fn nfkc(text: &str) -> String {
    text.nfkc().collect()
}

/// How to treat Russian `ё`.
///
/// Watchlist records are inconsistent about `ё` vs `е`; folding early keeps
/// dictionary keys and generated patterns in one spelling. `Preserve` leaves
/// the letter intact, in which case dictionary lookups retry with the folded
/// key (see `diminutives`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YoPolicy {
    #[default]
    Fold,
    Preserve,
}

/// Policy for a character-normalization pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeOptions {
    /// Also fold Latin diacritics to ASCII (`á`→`a`, `ß`→`ss`). Lossy; meant
    /// for matching keys, not display forms.
    pub aggressive: bool,
    /// Fold Cyrillic/Latin confusables into the dominant alphabet.
    pub fold_homoglyphs: bool,
    pub yo: YoPolicy,
}

/// Result of a character-normalization pass. Always carries `normalized`,
/// even when the pass was a no-op or failed partway.
#[derive(Debug, Clone)]
pub struct UnicodeOutcome {
    pub normalized: String,
    pub confidence: f64,
    /// Number of stages that changed the text.
    pub changes: u32,
    /// Number of individual character replacements.
    pub char_replacements: u32,
    /// Number of homoglyph folds (subset of `char_replacements`).
    pub homoglyph_folds: u32,
    /// Input already satisfied every postcondition.
    pub idempotent: bool,
    pub notes: Vec<String>,
}

pub(crate) fn is_cyrillic_letter(c: char) -> bool {
    matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё' | 'і' | 'ї' | 'є' | 'ґ' | 'І' | 'Ї' | 'Є' | 'Ґ')
}

pub(crate) fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

// ---------------------------------------------------------------------------
// Stage 1: encoding recovery
// ---------------------------------------------------------------------------

/// Map a char back to the CP-1252 byte it was mis-decoded from, if any.
fn cp1252_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x00..=0x7F | 0xA0..=0xFF => Some(code as u8),
        // Latin-1 mis-decodes surface C1 controls directly.
        0x80..=0x9F => Some(code as u8),
        _ => Some(match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => return None,
        }),
    }
}

/// Attempt to undo UTF-8-read-as-CP1252 corruption (`Ð°` → `а`).
///
/// The repair is accepted only when it strictly increases the number of
/// Cyrillic letters; anything else is left alone.
pub fn recover_encoding(text: &str) -> Option<String> {
    if !text.contains('Ð') && !text.contains('Ñ') {
        return None;
    }
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        bytes.push(cp1252_byte(c)?);
    }
    let repaired = String::from_utf8(bytes).ok()?;
    let before = text.chars().filter(|c| is_cyrillic_letter(*c)).count();
    let after = repaired.chars().filter(|c| is_cyrillic_letter(*c)).count();
    if after > before {
        Some(repaired)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Stage 2: homoglyph folding
// ---------------------------------------------------------------------------

/// Cyrillic → Latin confusables. Only visually identical pairs.
fn cyr_to_lat_confusable(c: char) -> Option<char> {
    Some(match c {
        'а' => 'a',
        'А' => 'A',
        'е' => 'e',
        'Е' => 'E',
        'о' => 'o',
        'О' => 'O',
        'р' => 'p',
        'Р' => 'P',
        'с' => 'c',
        'С' => 'C',
        'х' => 'x',
        'Х' => 'X',
        'у' => 'y',
        'У' => 'Y',
        'і' => 'i',
        'І' => 'I',
        'ј' => 'j',
        'Ј' => 'J',
        'к' => 'k',
        'К' => 'K',
        'м' => 'm',
        'М' => 'M',
        'н' => 'n',
        'Н' => 'N',
        'т' => 't',
        'Т' => 'T',
        _ => return None,
    })
}

/// Latin → Cyrillic confusables (reverse of [`cyr_to_lat_confusable`]).
fn lat_to_cyr_confusable(c: char) -> Option<char> {
    Some(match c {
        'a' => 'а',
        'A' => 'А',
        'e' => 'е',
        'E' => 'Е',
        'o' => 'о',
        'O' => 'О',
        'p' => 'р',
        'P' => 'Р',
        'c' => 'с',
        'C' => 'С',
        'x' => 'х',
        'X' => 'Х',
        'y' => 'у',
        'Y' => 'У',
        'i' => 'і',
        'I' => 'І',
        'j' => 'ј',
        'J' => 'Ј',
        'k' => 'к',
        'K' => 'К',
        'm' => 'м',
        'M' => 'М',
        'n' => 'н',
        'N' => 'Н',
        't' => 'т',
        'T' => 'Т',
        _ => return None,
    })
}

/// Fold confusables of the minority alphabet into the dominant one.
///
/// An exact tie folds nothing: with no dominance signal, rewriting either
/// direction would be guessing.
pub fn fold_homoglyphs(text: &str) -> (String, u32) {
    let cyr = text.chars().filter(|c| is_cyrillic_letter(*c)).count();
    let lat = text.chars().filter(|c| is_latin_letter(*c)).count();

    let mapper: fn(char) -> Option<char> = if cyr > lat {
        lat_to_cyr_confusable
    } else if lat > cyr {
        cyr_to_lat_confusable
    } else {
        return (text.to_string(), 0);
    };

    let mut folds = 0u32;
    let out = text
        .chars()
        .map(|c| match mapper(c) {
            Some(m) => {
                folds += 1;
                m
            }
            None => c,
        })
        .collect();
    (out, folds)
}

// ---------------------------------------------------------------------------
// Stage 3: character mapping
// ---------------------------------------------------------------------------

/// Map one character to its unified replacement, if any.
///
/// Ukrainian `і ї є ґ` are never touched: they are language signals the
/// detector depends on, not noise.
fn map_char(c: char, yo: YoPolicy, aggressive: bool) -> Option<&'static str> {
    let mapped = match c {
        // Apostrophe variants seen in Ukrainian and Irish names.
        '\u{2019}' | '\u{2018}' | '\u{02BC}' | '`' | '´' => "'",
        // Quote variants around company names.
        '\u{201C}' | '\u{201D}' | '«' | '»' => "\"",
        // Dash variants in compound names.
        '–' | '—' | '−' => "-",
        'ё' if yo == YoPolicy::Fold => "е",
        'Ё' if yo == YoPolicy::Fold => "Е",
        _ => {
            if !aggressive {
                return None;
            }
            match c {
                'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => "a",
                'é' | 'è' | 'ê' | 'ë' => "e",
                'í' | 'ì' | 'î' | 'ï' => "i",
                'ó' | 'ò' | 'ô' | 'õ' | 'ö' => "o",
                'ú' | 'ù' | 'û' | 'ü' => "u",
                'ý' | 'ÿ' => "y",
                'ç' => "c",
                'ñ' => "n",
                'ß' => "ss",
                'Ä' => "A",
                'Ö' => "O",
                'Ü' => "U",
                _ => return None,
            }
        }
    };
    Some(mapped)
}

fn apply_char_mapping(text: &str, yo: YoPolicy, aggressive: bool) -> (String, u32) {
    let mut replacements = 0u32;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match map_char(c, yo, aggressive) {
            Some(m) => {
                replacements += 1;
                out.push_str(m);
            }
            None => out.push(c),
        }
    }
    (out, replacements)
}

// ---------------------------------------------------------------------------
// Stage 4/5: NFC + combining marks
// ---------------------------------------------------------------------------

fn contains_turkish_chars(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, '\u{0130}' | '\u{0131}' | '\u{011E}' | '\u{011F}' | '\u{015E}' | '\u{015F}'))
}

/// Script mixes with known NFC/mark-stripping idempotence violations: stop
/// after NFC for these.
fn is_problematic_mixed_script(text: &str) -> bool {
    let has_cyrillic = text.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c));
    if !has_cyrillic {
        return false;
    }
    let has_greek = text
        .chars()
        .any(|c| ('\u{0370}'..='\u{03FF}').contains(&c) || ('\u{1F00}'..='\u{1FFF}').contains(&c));
    contains_turkish_chars(text) || has_greek
}

fn remove_combining_marks(text: &str) -> (String, u32) {
    let mut removed = 0u32;
    let out = text
        .chars()
        .filter(|c| {
            if is_combining_mark(*c) {
                removed += 1;
                false
            } else {
                true
            }
        })
        .collect();
    (out, removed)
}

// ---------------------------------------------------------------------------
// Stage 6: invisible characters
// ---------------------------------------------------------------------------

fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}')
}

fn is_bidi_control(c: char) -> bool {
    matches!(
        c,
        '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' | '\u{200E}' | '\u{200F}' | '\u{061C}'
    )
}

fn is_invisible(c: char) -> bool {
    is_zero_width(c)
        || is_bidi_control(c)
        // Invisible operators.
        || matches!(c, '\u{2061}'..='\u{2064}')
        // Control characters other than whitespace.
        || (c.is_control() && !c.is_whitespace())
}

pub fn remove_zero_width(text: &str) -> String {
    text.chars().filter(|c| !is_zero_width(*c)).collect()
}

pub fn contains_zero_width(text: &str) -> bool {
    text.chars().any(is_zero_width)
}

pub fn remove_bidi_controls(text: &str) -> String {
    text.chars().filter(|c| !is_bidi_control(*c)).collect()
}

pub fn contains_bidi_controls(text: &str) -> bool {
    text.chars().any(is_bidi_control)
}

fn remove_invisible(text: &str) -> (String, u32) {
    let mut removed = 0u32;
    let out = text
        .chars()
        .filter(|c| {
            if is_invisible(*c) {
                removed += 1;
                false
            } else {
                true
            }
        })
        .collect();
    (out, removed)
}

// ---------------------------------------------------------------------------
// Stage 7: whitespace
// ---------------------------------------------------------------------------

/// Collapse all Unicode whitespace into single ASCII spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_ws = true; // treat start as whitespace to avoid leading space
    for c in text.chars() {
        if c.is_whitespace() {
            in_ws = true;
            continue;
        }
        if in_ws && !out.is_empty() {
            out.push(' ');
        }
        in_ws = false;
        out.push(c);
    }
    out
}

/// Like [`collapse_whitespace`], but writes into an existing `String`.
pub fn collapse_whitespace_into(text: &str, out: &mut String) {
    out.clear();
    out.reserve(text.len());
    let mut in_ws = true;
    for c in text.chars() {
        if c.is_whitespace() {
            in_ws = true;
            continue;
        }
        if in_ws && !out.is_empty() {
            out.push(' ');
        }
        in_ws = false;
        out.push(c);
    }
}

// ---------------------------------------------------------------------------
// The pipeline
// ---------------------------------------------------------------------------

fn is_already_clean(text: &str, opts: &UnicodeOptions) -> bool {
    if text.contains('Ð') || text.contains('Ñ') {
        return false;
    }
    if text.chars().any(|c| {
        map_char(c, opts.yo, opts.aggressive).is_some() || is_invisible(c) || is_combining_mark(c)
    }) {
        return false;
    }
    if opts.fold_homoglyphs {
        // Any confusable on the minority side means work to do; cheap check:
        // both alphabets present at all.
        let has_cyr = text.chars().any(is_cyrillic_letter);
        let has_lat = text.chars().any(is_latin_letter);
        if has_cyr && has_lat {
            return false;
        }
    }
    if text != collapse_whitespace(text) {
        return false;
    }
    unicode_normalization::is_nfc(text)
}

fn confidence_for(original: &str, normalized: &str, char_replacements: u32) -> f64 {
    let mut confidence = 1.0f64;
    if char_replacements > 0 {
        confidence -= (char_replacements as f64 * 0.01).min(0.2);
    }
    let len_delta = (original.chars().count() as i64 - normalized.chars().count() as i64).unsigned_abs();
    if len_delta > 0 {
        confidence -= (len_delta as f64 * 0.05).min(0.3);
    }
    confidence.max(0.1)
}

/// Run the full character-normalization pipeline.
///
/// Stage order matters: punctuation mapping runs before NFC so quote/dash
/// variants are unified before composition, and a second mapping pass runs
/// after NFC so characters NFC just composed (`e` + U+0308 → `ë`) are folded
/// too — that second pass is what makes the pipeline idempotent. Whitespace
/// collapse runs last because earlier stages can surface new space runs.
pub fn normalize_text(text: &str, opts: &UnicodeOptions) -> UnicodeOutcome {
    if text.is_empty() {
        return UnicodeOutcome {
            normalized: String::new(),
            confidence: 1.0,
            changes: 0,
            char_replacements: 0,
            homoglyph_folds: 0,
            idempotent: true,
            notes: Vec::new(),
        };
    }

    if is_already_clean(text, opts) {
        return UnicodeOutcome {
            normalized: text.to_string(),
            confidence: 1.0,
            changes: 0,
            char_replacements: 0,
            homoglyph_folds: 0,
            idempotent: true,
            notes: Vec::new(),
        };
    }

    let original = text;
    let mut changes = 0u32;
    let mut char_replacements = 0u32;
    let mut homoglyph_folds = 0u32;
    let mut notes: Vec<String> = Vec::new();

    let mut current = text.to_string();

    // Mojibake can be layered (text encoded and mis-decoded more than once);
    // repair to a fixpoint, bounded.
    for _ in 0..3 {
        let Some(repaired) = recover_encoding(&current) else {
            break;
        };
        let cyr = repaired.chars().filter(|c| is_cyrillic_letter(*c)).count();
        tracing::debug!(cyrillic = cyr, "unicode.encoding_recovered");
        if !notes.iter().any(|n| n.contains("encoding_recovered")) {
            notes.push("unicode.encoding_recovered".to_string());
        }
        current = repaired;
        changes += 1;
    }

    let (mapped, replaced) = apply_char_mapping(&current, opts.yo, opts.aggressive);
    if replaced > 0 {
        current = mapped;
        char_replacements += replaced;
        changes += 1;
    }

    let composed = nfc(&current);
    if composed != current {
        current = composed;
        changes += 1;
    }

    let problematic = is_problematic_mixed_script(&current);
    if !problematic {
        // Fold characters NFC just composed, then drop stray combining marks.
        let (remapped, replaced) = apply_char_mapping(&current, opts.yo, opts.aggressive);
        if replaced > 0 {
            current = remapped;
            char_replacements += replaced;
            changes += 1;
        }
        let (stripped, removed) = remove_combining_marks(&current);
        if removed > 0 {
            current = stripped;
            char_replacements += removed;
            changes += 1;
        }
    }

    let (visible, removed) = remove_invisible(&current);
    if removed > 0 {
        current = visible;
        char_replacements += removed;
        changes += 1;
    }

    // Homoglyphs fold last among the letter stages: by now the character
    // mapping has settled the Cyrillic/Latin letter counts, so the dominance
    // decision a second pass would make is identical to this one.
    if opts.fold_homoglyphs && !problematic {
        let (folded, folds) = fold_homoglyphs(&current);
        if folds > 0 {
            notes.push(format!("unicode.homoglyph_fold: {folds} characters folded"));
            current = folded;
            homoglyph_folds = folds;
            char_replacements += folds;
            changes += 1;
        }
    }

    let collapsed = collapse_whitespace(&current);
    if collapsed != current {
        current = collapsed;
        changes += 1;
    }

    let confidence = confidence_for(original, &current, char_replacements);
    UnicodeOutcome {
        normalized: current,
        confidence,
        changes,
        char_replacements,
        homoglyph_folds,
        idempotent: changes == 0,
        notes,
    }
}

/// A single detected encoding/representation problem.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EncodingIssue {
    pub kind: &'static str,
    pub character: char,
    /// Char offset, not byte offset.
    pub position: usize,
}

/// Detect-and-report counterpart to [`normalize_text`]: mappable punctuation,
/// invisible characters, and control characters, with char offsets.
pub fn detect_encoding_issues(text: &str) -> Vec<EncodingIssue> {
    let mut issues = Vec::new();
    for (i, c) in text.chars().enumerate() {
        if map_char(c, YoPolicy::Fold, false).is_some() {
            issues.push(EncodingIssue { kind: "mappable_char", character: c, position: i });
        } else if is_zero_width(c) {
            issues.push(EncodingIssue { kind: "zero_width", character: c, position: i });
        } else if is_bidi_control(c) {
            issues.push(EncodingIssue { kind: "bidi_control", character: c, position: i });
        } else if c.is_control() && !c.is_whitespace() {
            issues.push(EncodingIssue { kind: "control_char", character: c, position: i });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_outcome(text: &str) -> UnicodeOutcome {
        normalize_text(text, &UnicodeOptions::default())
    }

    #[test]
    fn test_apostrophe_variants_unify() {
        for raw in ["O\u{2019}Connor", "O\u{2018}Connor", "O\u{02BC}Connor", "O`Connor", "O´Connor"] {
            assert_eq!(default_outcome(raw).normalized, "O'Connor");
        }
    }

    #[test]
    fn test_quote_and_dash_variants_unify() {
        assert_eq!(default_outcome("«Рога» – копыта").normalized, "\"Рога\" - копыта");
    }

    #[test]
    fn test_yo_policy() {
        assert_eq!(default_outcome("Фёдоров").normalized, "Федоров");
        let opts = UnicodeOptions { yo: YoPolicy::Preserve, ..Default::default() };
        assert_eq!(normalize_text("Фёдоров", &opts).normalized, "Фёдоров");
    }

    #[test]
    fn test_ukrainian_letters_preserved() {
        assert_eq!(default_outcome("Ганна Ковальська і Ґалаґан").normalized, "Ганна Ковальська і Ґалаґан");
    }

    #[test]
    fn test_homoglyph_fold_latin_dominant() {
        // Latin P + Cyrillic а + Latin rest.
        let opts = UnicodeOptions { fold_homoglyphs: true, ..Default::default() };
        let out = normalize_text("P\u{0430}vlov", &opts);
        assert_eq!(out.normalized, "Pavlov");
        assert_eq!(out.homoglyph_folds, 1);
    }

    #[test]
    fn test_homoglyph_fold_cyrillic_dominant() {
        let opts = UnicodeOptions { fold_homoglyphs: true, ..Default::default() };
        // Latin "a" inside an otherwise Cyrillic surname.
        let out = normalize_text("Иванов\u{0430} Ивaнова", &opts);
        assert!(!out.normalized.contains('a'));
    }

    #[test]
    fn test_homoglyph_tie_no_fold() {
        let opts = UnicodeOptions { fold_homoglyphs: true, ..Default::default() };
        let out = normalize_text("a\u{0430}", &opts);
        assert_eq!(out.homoglyph_folds, 0);
        assert_eq!(out.normalized, "a\u{0430}");
    }

    #[test]
    fn test_encoding_recovery() {
        // "Петров" seen through a CP-1252 decode.
        let mojibake = "Ð\u{9f}ÐµÑ\u{82}Ñ\u{80}Ð¾Ð²";
        let out = default_outcome(mojibake);
        assert_eq!(out.normalized, "Петров");
        assert!(out.notes.iter().any(|n| n.contains("encoding_recovered")));
    }

    #[test]
    fn test_invisible_removal() {
        let text = "Иван\u{200B}ов\u{200E}\u{202E}";
        assert_eq!(default_outcome(text).normalized, "Иванов");
    }

    #[test]
    fn test_combining_marks_removed() {
        // Decomposed acute over Cyrillic "е" (stress mark).
        assert_eq!(default_outcome("Петро\u{0301}в").normalized, "Петров");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(default_outcome("  Иван \t Петров  ").normalized, "Иван Петров");
    }

    #[test]
    fn test_case_never_modified() {
        let out = default_outcome("ИВАНОВ иванов Иванов");
        assert_eq!(out.normalized, "ИВАНОВ иванов Иванов");
    }

    #[test]
    fn test_idempotence_on_fixture_inputs() {
        let inputs = [
            "O\u{2019}Connor—Smith",
            "«Тест»  \u{200B} Фёдор",
            "P\u{0430}vlov",
            "a\u{0308}bc",
            "  spaced   out  ",
        ];
        for opts in [
            UnicodeOptions::default(),
            UnicodeOptions { aggressive: true, fold_homoglyphs: true, yo: YoPolicy::Fold },
            UnicodeOptions { aggressive: false, fold_homoglyphs: true, yo: YoPolicy::Preserve },
        ] {
            for input in inputs {
                let once = normalize_text(input, &opts).normalized;
                let twice = normalize_text(&once, &opts).normalized;
                assert_eq!(once, twice, "not idempotent for {input:?} with {opts:?}");
            }
        }
    }

    #[test]
    fn test_aggressive_latin_fold() {
        let opts = UnicodeOptions { aggressive: true, ..Default::default() };
        assert_eq!(normalize_text("Müller-Straße", &opts).normalized, "Muller-Strasse");
        // Decomposed input folds the same way once NFC composes it.
        assert_eq!(normalize_text("Mu\u{0308}ller", &opts).normalized, "Muller");
    }

    #[test]
    fn test_confidence_bounds() {
        for input in ["", "Иван", "«\u{2019}\u{2014}»", "Ð¿Ñ\u{80}Ð¸Ð²ÐµÑ\u{82}"] {
            let out = default_outcome(input);
            assert!((0.0..=1.0).contains(&out.confidence), "confidence out of range for {input:?}");
        }
    }

    #[test]
    fn test_detect_encoding_issues_offsets() {
        let issues = detect_encoding_issues("a\u{200B}б\u{2019}");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].kind, "zero_width");
        assert_eq!(issues[0].position, 1);
        assert_eq!(issues[1].kind, "mappable_char");
        assert_eq!(issues[1].position, 3);
    }

    #[test]
    fn test_zero_width_and_bidi_helpers() {
        let text = "a\u{200B}b\u{200D}c\u{202E}d";
        assert!(contains_zero_width(text));
        assert!(contains_bidi_controls(text));
        let no_zw = remove_zero_width(text);
        assert!(!contains_zero_width(&no_zw));
        let clean = remove_bidi_controls(&no_zw);
        assert_eq!(clean, "abcd");
    }

    #[test]
    fn test_collapse_whitespace_into_matches() {
        let text = "  hello\tworld \n  Иван  ";
        let expected = collapse_whitespace(text);
        let mut out = String::new();
        collapse_whitespace_into(text, &mut out);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_never_empty_result_structure() {
        let out = default_outcome("");
        assert_eq!(out.normalized, "");
        assert!(out.idempotent);
    }
}
