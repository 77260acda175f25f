//! Variant expansion for screening patterns.
//!
//! Each generator produces spelling variants of one seed name: initials
//! permutations, spacing and hyphenation alternatives, transliterations,
//! diminutive/nickname expansion, and surname gender swaps. Recall-optimized
//! by design — false positives are filtered downstream, missed names are
//! not. Output is capped per generator and per seed.

use std::collections::HashSet;

use crate::declension::gender_swapped_surname;
use crate::diminutives::DiminutiveDicts;
use crate::fold::{title_case_phrase, title_case_word};
use crate::lang::Lang;
use crate::translit::{has_cyrillic, patronymic_spelling_variants, to_cyrillic, to_latin};

/// Per-generator output cap.
pub const MAX_VARIANTS_PER_GENERATOR: usize = 20;
/// Per-seed total cap.
pub const MAX_VARIANTS_PER_SEED: usize = 200;

/// Initials permutations: `First Last` → `First L.`, `F. Last`, `F. M. Last`,
/// `Last F.M.`, joined/spaced initials, and the comma form `Last, First`.
pub fn initial_variants(name: &str) -> Vec<String> {
    let mut variants = Vec::new();

    if let Some((surname, given_part)) = name.split_once(',') {
        let surname = surname.trim();
        let given_words: Vec<&str> = given_part.split_whitespace().collect();
        if let Some(first) = given_words.first() {
            let fi = initial_of(first);
            variants.push(format!("{surname} {fi}."));
            variants.push(format!("{fi}. {surname}"));
            if given_words.len() >= 2 {
                let dotted: Vec<String> = given_words.iter().map(|w| format!("{}.", initial_of(w))).collect();
                let bare: Vec<String> = given_words.iter().map(|w| initial_of(w).to_string()).collect();
                variants.push(format!("{surname} {}", dotted.join(" ")));
                variants.push(format!("{} {surname}", dotted.join(" ")));
                variants.push(format!("{surname} {}", bare.join(" ")));
                variants.push(format!("{} {surname}", bare.join(" ")));
            }
        }
        return variants;
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() < 2 {
        return variants;
    }

    variants.push(format!("{} {}.", words[0], initial_of(words[1])));
    variants.push(format!("{}. {}", initial_of(words[0]), words[1]));
    variants.push(format!("{}, {}", words[words.len() - 1], words[..words.len() - 1].join(" ")));

    if words.len() >= 3 {
        let dotted: Vec<String> = words.iter().map(|w| format!("{}.", initial_of(w))).collect();
        let bare: Vec<String> = words.iter().map(|w| initial_of(w).to_string()).collect();
        variants.push(dotted.join(" "));
        variants.push(bare.join(" "));
        variants.push(bare.concat());
        let rest_dotted: Vec<String> = words[1..].iter().map(|w| format!("{}.", initial_of(w))).collect();
        variants.push(format!("{} {}", words[0], rest_dotted.join(" ")));
        // `Last F.M.` with the surname last in the seed.
        let lead_dotted: Vec<String> = words[..words.len() - 1]
            .iter()
            .map(|w| format!("{}.", initial_of(w)))
            .collect();
        variants.push(format!("{} {}", words[words.len() - 1], lead_dotted.concat()));
    }

    variants
}

fn initial_of(word: &str) -> char {
    word.chars().next().unwrap_or('?')
}

/// Spacing variants: collapsed runs, and a no-space form for short names.
pub fn spacing_variants(name: &str) -> Vec<String> {
    let mut variants = Vec::new();
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed != name {
        variants.push(collapsed);
    }
    let no_space: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    if no_space.chars().count() >= 4 && no_space != name {
        variants.push(no_space);
    }
    variants
}

/// Hyphenation variants of compound names: with-hyphen, with-space, and
/// concatenated forms.
pub fn hyphen_variants(name: &str) -> Vec<String> {
    let mut variants = Vec::new();
    if name.contains('-') {
        variants.push(name.replace('-', " "));
        variants.push(name.replace('-', ""));
    } else if name.contains(' ') {
        variants.push(name.replace(' ', "-"));
        variants.push(name.replace(' ', ""));
    }
    variants
}

/// Transliteration variants: Cyrillic seeds romanize (with patronymic
/// spelling alternatives), Latin seeds get a Cyrillic reading.
pub fn translit_variants(name: &str, _lang: Lang) -> Vec<String> {
    let mut variants = Vec::new();
    if has_cyrillic(name) {
        let latin = title_case_phrase(&to_latin(name));
        if !latin.is_empty() && latin != name {
            variants.extend(patronymic_spelling_variants(&latin));
            variants.push(latin);
        }
    } else if name.chars().any(|c| c.is_ascii_alphabetic()) {
        let cyr = to_cyrillic(name);
        if cyr != name {
            variants.push(cyr);
        }
    }
    variants
}

/// Diminutive/nickname expansion, both directions: a diminutive seed adds
/// its canonical, a canonical seed adds every known diminutive.
pub fn diminutive_variants(name: &str, lang: Lang, dicts: &DiminutiveDicts) -> Vec<String> {
    let lower = name.to_lowercase();
    let mut variants = Vec::new();
    if let Some((canonical, _)) = dicts.lookup(&lower, lang, false, crate::unicode::YoPolicy::Fold) {
        if canonical != lower {
            variants.push(title_case_word(canonical));
        }
    }
    for diminutive in dicts.reverse_lookup(&lower, lang) {
        variants.push(title_case_word(diminutive));
    }
    variants
}

/// Masculine ↔ feminine surname-ending swaps (`Иванов` ↔ `Иванова`).
pub fn surname_ending_variants(name: &str, lang: Lang) -> Vec<String> {
    gender_swapped_surname(&name.to_lowercase(), lang)
        .map(|swapped| vec![title_case_word(&swapped)])
        .unwrap_or_default()
}

/// Apply every generator to `seed`, dedup case-insensitively, and cap the
/// result. The seed itself is not included.
pub fn expand_variants(seed: &str, lang: Lang, dicts: &DiminutiveDicts) -> Vec<String> {
    let generators: [Vec<String>; 6] = [
        initial_variants(seed),
        spacing_variants(seed),
        hyphen_variants(seed),
        translit_variants(seed, lang),
        diminutive_variants(seed, lang, dicts),
        seed.split_whitespace()
            .flat_map(|word| surname_ending_variants(word, lang))
            .collect(),
    ];

    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(seed.to_lowercase());
    let mut out = Vec::new();
    for variants in generators {
        for variant in variants.into_iter().take(MAX_VARIANTS_PER_GENERATOR) {
            let key = variant.to_lowercase();
            if variant.trim().is_empty() || !seen.insert(key) {
                continue;
            }
            out.push(variant);
            if out.len() >= MAX_VARIANTS_PER_SEED {
                return out;
            }
        }
    }
    out
}
