//! Suffix-paradigm reduction of Russian/Ukrainian name forms to nominative.
//!
//! Surnames and patronymics decline productively, so their oblique endings
//! reduce by table. Given names are riskier (many nominatives look like
//! oblique forms of other names), so a given-name reduction is accepted only
//! when it lands on a known canonical name.
//!
//! All tables are ordered longest-suffix-first and operate on lowercase
//! input; callers re-case.

use crate::diminutives::{gender_of_given, DiminutiveDicts, Gender};
use crate::lang::Lang;

/// Feminine surname endings that must never be masculinized when
/// `preserve_feminine_surnames` is set. Extensible: coverage questions are
/// resolved by editing these tables, not the logic.
pub const FEMININE_SUFFIXES_RU: &[&str] = &["ова", "ева", "ина", "ына", "ская", "цкая"];
pub const FEMININE_SUFFIXES_UK: &[&str] = &["ська", "цька", "зька", "ова", "ева", "іна"];

/// Unambiguous oblique → nominative endings for Russian surnames.
const RU_SURNAME_OBLIQUE: &[(&str, &str)] = &[
    ("ского", "ский"),
    ("скому", "ский"),
    ("ским", "ский"),
    ("ском", "ский"),
    ("скую", "ская"),
    ("ской", "ская"),
    ("цкого", "цкий"),
    ("цкому", "цкий"),
    ("цким", "цкий"),
    ("цком", "цкий"),
    ("цкую", "цкая"),
    ("цкой", "цкая"),
    ("овой", "ова"),
    ("евой", "ева"),
    ("иной", "ина"),
    ("ыной", "ына"),
    ("овым", "ов"),
    ("евым", "ев"),
    ("иным", "ин"),
    ("ыным", "ын"),
    ("ову", "ов"),
    ("еву", "ев"),
    ("ину", "ин"),
    ("ыну", "ын"),
    ("ове", "ов"),
    ("еве", "ев"),
    ("ине", "ин"),
];

/// Genitive/accusative masculine endings that collide with feminine
/// nominatives (`Иванова` is both). Applied only under a masculine gender
/// hint.
const RU_SURNAME_MASC_AMBIGUOUS: &[(&str, &str)] = &[
    ("ова", "ов"),
    ("ева", "ев"),
    ("ина", "ин"),
    ("ына", "ын"),
];

const UK_SURNAME_OBLIQUE: &[(&str, &str)] = &[
    ("ського", "ський"),
    ("ському", "ський"),
    ("ським", "ський"),
    ("ську", "ська"),
    ("ської", "ська"),
    ("цького", "цький"),
    ("цькому", "цький"),
    ("цьким", "цький"),
    ("цьку", "цька"),
    ("цької", "цька"),
    ("енкові", "енко"),
    ("енком", "енко"),
    ("енка", "енко"),
    ("енку", "енко"),
    ("чукові", "чук"),
    ("чуком", "чук"),
    ("чука", "чук"),
    ("чуку", "чук"),
    ("юком", "юк"),
    ("юка", "юк"),
    ("юку", "юк"),
];

const RU_PATRONYMIC_OBLIQUE: &[(&str, &str)] = &[
    ("овичем", "ович"),
    ("овича", "ович"),
    ("овичу", "ович"),
    ("овиче", "ович"),
    ("евичем", "евич"),
    ("евича", "евич"),
    ("евичу", "евич"),
    ("евиче", "евич"),
    ("ьичем", "ьич"),
    ("ьича", "ьич"),
    ("овной", "овна"),
    ("овны", "овна"),
    ("овне", "овна"),
    ("овну", "овна"),
    ("евной", "евна"),
    ("евны", "евна"),
    ("евне", "евна"),
    ("евну", "евна"),
    ("ичной", "ична"),
    ("ичны", "ична"),
    ("ичне", "ична"),
    ("ичну", "ична"),
];

const UK_PATRONYMIC_OBLIQUE: &[(&str, &str)] = &[
    ("йовичем", "йович"),
    ("йовича", "йович"),
    ("йовичу", "йович"),
    ("овичем", "ович"),
    ("овича", "ович"),
    ("овичу", "ович"),
    ("івною", "івна"),
    ("івни", "івна"),
    ("івні", "івна"),
    ("івну", "івна"),
    ("ївною", "ївна"),
    ("ївни", "ївна"),
    ("ївні", "ївна"),
    ("ївну", "ївна"),
];

/// Oblique endings for given names. A reduction is accepted only when the
/// candidate is a known canonical name, so the table can afford broad
/// strokes.
const GIVEN_OBLIQUE: &[(&str, &str)] = &[
    ("ией", "ия"),
    ("ием", "ий"),
    ("ии", "ия"),
    ("ию", "ия"),
    ("ьей", "ья"),
    ("ьи", "ья"),
    ("ою", "а"),
    ("ой", "а"),
    ("ом", ""),
    ("ем", ""),
    ("ей", "я"),
    ("а", ""),
    ("я", ""),
    ("у", ""),
    ("у", "а"),
    ("ю", "я"),
    ("е", "а"),
];

fn apply_table(lower: &str, table: &[(&str, &str)]) -> Option<String> {
    for (suffix, replacement) in table {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.chars().count() < 2 {
                continue;
            }
            return Some(format!("{stem}{replacement}"));
        }
    }
    None
}

pub fn feminine_suffixes(lang: Lang) -> &'static [&'static str] {
    match lang {
        Lang::Uk => FEMININE_SUFFIXES_UK,
        _ => FEMININE_SUFFIXES_RU,
    }
}

pub fn has_feminine_suffix(lower: &str, lang: Lang) -> bool {
    feminine_suffixes(lang).iter().any(|suf| lower.ends_with(suf))
}

/// Does `lower` carry an oblique surname ending the tables can reduce?
pub fn is_oblique_surname(lower: &str, lang: Lang) -> bool {
    let table = match lang {
        Lang::Uk => UK_SURNAME_OBLIQUE,
        _ => RU_SURNAME_OBLIQUE,
    };
    apply_table(lower, table).is_some()
}

/// What happened to a surname during nominative reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurnameOutcome {
    /// Oblique ending reduced.
    Reduced(String),
    /// Feminine nominative kept despite a masculine reading being possible.
    FemininePreserved(String),
    /// Already nominative (or no rule applied).
    Unchanged(String),
}

impl SurnameOutcome {
    pub fn form(&self) -> &str {
        match self {
            SurnameOutcome::Reduced(s)
            | SurnameOutcome::FemininePreserved(s)
            | SurnameOutcome::Unchanged(s) => s,
        }
    }
}

/// Reduce a lowercase surname to nominative.
///
/// `gender_hint` comes from the adjacent given name and is authoritative: a
/// masculine hint lets the ambiguous `-ова/-ева/-ина` genitive reduce to
/// `-ов/-ев/-ин`; anything else preserves the feminine nominative reading
/// when `preserve_feminine` is set.
pub fn normalize_surname(
    lower: &str,
    lang: Lang,
    gender_hint: Option<Gender>,
    preserve_feminine: bool,
    gender_rules: bool,
) -> SurnameOutcome {
    let table = match lang {
        Lang::Uk => UK_SURNAME_OBLIQUE,
        _ => RU_SURNAME_OBLIQUE,
    };
    if let Some(reduced) = apply_table(lower, table) {
        return SurnameOutcome::Reduced(reduced);
    }

    if has_feminine_suffix(lower, lang) {
        if gender_rules && gender_hint == Some(Gender::Masc) {
            if let Some(reduced) = apply_table(lower, RU_SURNAME_MASC_AMBIGUOUS) {
                return SurnameOutcome::Reduced(reduced);
            }
        }
        if preserve_feminine {
            return SurnameOutcome::FemininePreserved(lower.to_string());
        }
    }

    SurnameOutcome::Unchanged(lower.to_string())
}

/// Reduce a lowercase patronymic to nominative.
pub fn normalize_patronymic(lower: &str, lang: Lang) -> Option<String> {
    let table = match lang {
        Lang::Uk => UK_PATRONYMIC_OBLIQUE,
        _ => RU_PATRONYMIC_OBLIQUE,
    };
    apply_table(lower, table)
}

/// Reduce a lowercase given name to nominative, validated against the
/// canonical tables (and the diminutive keys, which are citation forms too).
pub fn normalize_given(lower: &str, lang: Lang, dicts: &DiminutiveDicts) -> Option<String> {
    if gender_of_given(lower, lang).is_some() {
        return None; // already nominative
    }
    for (suffix, replacement) in GIVEN_OBLIQUE {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.chars().count() < 2 {
                continue;
            }
            let candidate = format!("{stem}{replacement}");
            if candidate != lower && dicts.is_known_given(&candidate, lang) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Masculine ↔ feminine surname-ending swaps, for variant generation.
pub fn gender_swapped_surname(lower: &str, lang: Lang) -> Option<String> {
    const RU_SWAPS: &[(&str, &str)] = &[
        ("ский", "ская"),
        ("цкий", "цкая"),
        ("ская", "ский"),
        ("цкая", "цкий"),
        ("ова", "ов"),
        ("ева", "ев"),
        ("ина", "ин"),
        ("ов", "ова"),
        ("ев", "ева"),
        ("ин", "ина"),
    ];
    const UK_SWAPS: &[(&str, &str)] = &[
        ("ський", "ська"),
        ("цький", "цька"),
        ("ська", "ський"),
        ("цька", "цький"),
    ];
    let table = match lang {
        Lang::Uk => UK_SWAPS,
        _ => RU_SWAPS,
    };
    apply_table(lower, table).filter(|swapped| swapped != lower)
}
