//! Token role classification.
//!
//! Assigns each token exactly one role. Structural shapes first (initials,
//! numbers, legal forms, stopwords), then organization spans anchored on
//! legal-form markers, then patronymic suffixes, and finally position-aware
//! person heuristics (optionally the tuned state-machine pass).

use serde::{Deserialize, Serialize};

use crate::diminutives::DiminutiveDicts;
use crate::flags::FeatureFlags;
use crate::lang::Lang;
use crate::nameparse;
use crate::stopwords::{is_legal_form, is_stopword};
use crate::tokenize::{is_initial, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenRole {
    Given,
    Surname,
    Patronymic,
    Initial,
    OrgLegalForm,
    OrgName,
    Stopword,
    Numeric,
    Unknown,
}

impl TokenRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenRole::Given => "given",
            TokenRole::Surname => "surname",
            TokenRole::Patronymic => "patronymic",
            TokenRole::Initial => "initial",
            TokenRole::OrgLegalForm => "org_legal_form",
            TokenRole::OrgName => "org_name",
            TokenRole::Stopword => "stopword",
            TokenRole::Numeric => "numeric",
            TokenRole::Unknown => "unknown",
        }
    }

    pub fn is_person(&self) -> bool {
        matches!(
            self,
            TokenRole::Given | TokenRole::Surname | TokenRole::Patronymic | TokenRole::Initial
        )
    }
}

const PATRONYMIC_SUFFIXES_RU: &[&str] = &["ович", "евич", "ьич", "овна", "евна", "ична", "инична"];
const PATRONYMIC_SUFFIXES_UK: &[&str] = &["ович", "йович", "івна", "ївна"];

/// Productive surname endings, used by the tuned pass to pull shape-matching
/// tokens toward `Surname` regardless of position.
const SURNAME_SHAPES_RU: &[&str] = &[
    "ов", "ова", "ев", "ева", "ёв", "ин", "ина", "ын", "ский", "ская", "цкий", "цкая",
];
const SURNAME_SHAPES_UK: &[&str] = &[
    "енко", "ук", "юк", "чук", "ський", "ська", "цький", "цька", "зький", "зька",
];

fn is_patronymic_shape(lower: &str, lang: Lang) -> bool {
    let check = |suffixes: &[&str]| suffixes.iter().any(|s| lower.ends_with(s) && lower.chars().count() > s.chars().count() + 1);
    match lang {
        Lang::Ru => check(PATRONYMIC_SUFFIXES_RU),
        Lang::Uk => check(PATRONYMIC_SUFFIXES_UK),
        Lang::Mixed | Lang::Unknown => check(PATRONYMIC_SUFFIXES_RU) || check(PATRONYMIC_SUFFIXES_UK),
        Lang::En => false,
    }
}

fn is_surname_shape(lower: &str, lang: Lang) -> bool {
    let check = |suffixes: &[&str]| {
        suffixes
            .iter()
            .any(|s| lower.ends_with(s) && lower.chars().count() >= s.chars().count() + 2)
    };
    match lang {
        Lang::Ru => check(SURNAME_SHAPES_RU),
        Lang::Uk => check(SURNAME_SHAPES_UK),
        Lang::Mixed | Lang::Unknown => check(SURNAME_SHAPES_RU) || check(SURNAME_SHAPES_UK),
        Lang::En => false,
    }
}

fn is_capitalized(surface: &str) -> bool {
    surface.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Assign a role to every token. English requests with the nameparser flag
/// delegate person tokens to `nameparse::classify_en`.
pub fn classify(tokens: &mut [Token], lang: Lang, dicts: &DiminutiveDicts, flags: &FeatureFlags) {
    // Structural shapes.
    for token in tokens.iter_mut() {
        let surface = token.surface.as_str();
        if is_initial(surface) {
            token.role = TokenRole::Initial;
        } else if !surface.chars().any(char::is_alphanumeric) {
            token.role = TokenRole::Stopword;
        } else if surface.chars().all(|c| c.is_ascii_digit()) {
            token.role = TokenRole::Numeric;
        } else if is_legal_form(surface) {
            token.role = TokenRole::OrgLegalForm;
        } else if is_stopword(surface, lang) && !token.quoted {
            token.role = TokenRole::Stopword;
        }
    }

    // Organization spans around legal-form markers.
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].role == TokenRole::OrgLegalForm {
            // Quoted core just before the marker: `"Рога" ООО`.
            if i > 0 && tokens[i - 1].quoted && tokens[i - 1].role == TokenRole::Unknown {
                tokens[i - 1].role = TokenRole::OrgName;
            }
            // Quoted or capitalized run after the marker, at most four tokens.
            let mut j = i + 1;
            while j < tokens.len() && j <= i + 4 {
                let t = &tokens[j];
                if t.role == TokenRole::Unknown && (t.quoted || is_capitalized(&t.surface)) {
                    tokens[j].role = TokenRole::OrgName;
                    j += 1;
                } else {
                    break;
                }
            }
            i = j;
        } else {
            i += 1;
        }
    }

    if lang == Lang::En && flags.enable_nameparser_en {
        nameparse::classify_en(tokens, flags);
        return;
    }

    // Patronymic suffixes, nominative or oblique (`Ивановича` counts).
    for token in tokens.iter_mut() {
        if token.role != TokenRole::Unknown {
            continue;
        }
        let lower = token.surface.to_lowercase();
        if is_patronymic_shape(&lower, lang)
            || (matches!(lang, Lang::Ru | Lang::Uk)
                && crate::declension::normalize_patronymic(&lower, lang).is_some())
        {
            token.role = TokenRole::Patronymic;
        }
    }

    // A token right next to initials is the surname (`Иванов И. И.`).
    let initial_positions: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.role == TokenRole::Initial)
        .map(|(i, _)| i)
        .collect();
    for i in initial_positions {
        if i > 0 && tokens[i - 1].role == TokenRole::Unknown {
            tokens[i - 1].role = TokenRole::Surname;
        }
        if i + 1 < tokens.len()
            && tokens[i + 1].role == TokenRole::Unknown
            && !is_initial(&tokens[i + 1].surface)
        {
            tokens[i + 1].role = TokenRole::Surname;
        }
    }

    if flags.enable_fsm_tuned_roles {
        // Dictionary and shape signals beat position; oblique case forms
        // count (`Иванову` is surname-shaped, `Ивану` is a known given).
        for token in tokens.iter_mut() {
            if token.role != TokenRole::Unknown {
                continue;
            }
            let lower = token.surface.to_lowercase();
            if dicts.is_known_given(&lower, lang)
                || crate::declension::normalize_given(&lower, lang, dicts).is_some()
            {
                token.role = TokenRole::Given;
            } else if is_surname_shape(&lower, lang)
                || crate::declension::is_oblique_surname(&lower, lang)
            {
                token.role = TokenRole::Surname;
            }
        }
    }

    // Positional fill for whatever is left.
    let unknown: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.role == TokenRole::Unknown && is_capitalized(&t.surface))
        .map(|(i, _)| i)
        .collect();
    let has_surname = tokens.iter().any(|t| t.role == TokenRole::Surname);
    match unknown.len() {
        0 => {}
        1 => {
            tokens[unknown[0]].role = if has_surname { TokenRole::Given } else { TokenRole::Surname };
        }
        n => {
            for (k, &idx) in unknown.iter().enumerate() {
                tokens[idx].role = if k == n - 1 && !has_surname {
                    TokenRole::Surname
                } else {
                    TokenRole::Given
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TraceCollector;

    fn classify_text(text: &str, lang: Lang, flags: &FeatureFlags) -> Vec<(String, TokenRole)> {
        let dicts = DiminutiveDicts::builtin();
        let mut collector = TraceCollector::new(false);
        let mut tokens = crate::tokenize::tokenize(text, lang, flags, &mut collector);
        classify(&mut tokens, lang, &dicts, flags);
        tokens.into_iter().map(|t| (t.surface, t.role)).collect()
    }

    #[test]
    fn test_surname_adjacent_to_initials() {
        let out = classify_text("Иванов И. И.", Lang::Ru, &FeatureFlags::default());
        assert_eq!(out[0], ("Иванов".to_string(), TokenRole::Surname));
        assert_eq!(out[1].1, TokenRole::Initial);
        assert_eq!(out[2].1, TokenRole::Initial);
    }

    #[test]
    fn test_given_plus_surname() {
        let out = classify_text("Сашка Пушкин", Lang::Ru, &FeatureFlags::default());
        assert_eq!(out[0].1, TokenRole::Given);
        assert_eq!(out[1].1, TokenRole::Surname);
    }

    #[test]
    fn test_full_fio_with_patronymic() {
        let out = classify_text("Иван Иванович Петров", Lang::Ru, &FeatureFlags::default());
        assert_eq!(out[0].1, TokenRole::Given);
        assert_eq!(out[1].1, TokenRole::Patronymic);
        assert_eq!(out[2].1, TokenRole::Surname);
    }

    #[test]
    fn test_uk_patronymic() {
        let out = classify_text("Петро Іванович Коваленко", Lang::Uk, &FeatureFlags::default());
        assert_eq!(out[1].1, TokenRole::Patronymic);
        assert_eq!(out[2].1, TokenRole::Surname);
    }

    #[test]
    fn test_org_span_after_legal_form() {
        let out = classify_text("ООО \"Рога\"", Lang::Ru, &FeatureFlags::default());
        assert_eq!(out[0].1, TokenRole::OrgLegalForm);
        assert_eq!(out[1].1, TokenRole::OrgName);
    }

    #[test]
    fn test_org_core_before_legal_form() {
        let out = classify_text("\"Заря\" ООО", Lang::Ru, &FeatureFlags::default());
        assert_eq!(out[0].1, TokenRole::OrgName);
        assert_eq!(out[1].1, TokenRole::OrgLegalForm);
    }

    #[test]
    fn test_english_legal_form() {
        let mut flags = FeatureFlags::default();
        flags.enable_nameparser_en = false;
        let out = classify_text("Acme LLC", Lang::En, &flags);
        assert_eq!(out[1].1, TokenRole::OrgLegalForm);
    }

    #[test]
    fn test_stopwords_and_numbers() {
        let out = classify_text("перевод 1000 Иванову", Lang::Ru, &FeatureFlags::default());
        assert_eq!(out[0].1, TokenRole::Stopword);
        assert_eq!(out[1].1, TokenRole::Numeric);
    }

    #[test]
    fn test_surname_shape_wins_over_position() {
        let out = classify_text("Коваленко Петро", Lang::Uk, &FeatureFlags::default());
        assert_eq!(out[0].1, TokenRole::Surname);
        assert_eq!(out[1].1, TokenRole::Given);
    }

    #[test]
    fn test_single_capitalized_token_is_surname() {
        let out = classify_text("Pavlov", Lang::En, &FeatureFlags::default());
        assert_eq!(out[0].1, TokenRole::Surname);
    }

    #[test]
    fn test_role_assigned_exactly_once() {
        let out = classify_text("Иван Иванович Петров И.", Lang::Ru, &FeatureFlags::default());
        assert!(out.iter().all(|(_, role)| *role != TokenRole::Unknown));
    }
}
