//! Per-token morphological normalization.
//!
//! Dispatches on the role the classifier assigned: diminutive/nickname
//! resolution for given names, nominative reduction for surnames and
//! patronymics (with feminine preservation), passthrough for initials and
//! organization tokens. Misses are values, not errors — a token the engine
//! cannot improve flows through with a `fallback` trace.

use crate::declension::{
    has_feminine_suffix, normalize_given, normalize_patronymic, normalize_surname, SurnameOutcome,
};
use crate::diminutives::{gender_of_given, DiminutiveDicts, Gender};
use crate::flags::FeatureFlags;
use crate::fold::title_case_word;
use crate::lang::Lang;
use crate::roles::TokenRole;
use crate::tokenize::Token;
use crate::trace::TraceCollector;
use crate::unicode::YoPolicy;

/// Long-lived engine: owns the immutable dictionaries, shared freely across
/// requests.
#[derive(Debug, Clone)]
pub struct MorphologyEngine {
    dicts: DiminutiveDicts,
    yo: YoPolicy,
}

/// Normalize case of a person token that no rule rewrote: all-lower and
/// all-upper surfaces get conventional name casing, anything mixed is
/// already deliberate and stays.
fn fix_person_case(surface: &str) -> String {
    let has_lower = surface.chars().any(|c| c.is_lowercase());
    let has_upper = surface.chars().any(|c| c.is_uppercase());
    if has_lower && has_upper {
        surface.to_string()
    } else {
        title_case_word(surface)
    }
}

fn diminutive_note(before: &str, after: &str, source: &str) -> String {
    serde_json::json!({
        "action": "diminutive_resolved",
        "before": before,
        "after": after,
        "rule": source,
    })
    .to_string()
}

fn patronymic_gender(lower: &str) -> Option<Gender> {
    const FEM: &[&str] = &["овна", "евна", "ична", "івна", "ївна"];
    const MASC: &[&str] = &["ович", "евич", "ьич", "йович"];
    if FEM.iter().any(|s| lower.ends_with(s)) {
        Some(Gender::Fem)
    } else if MASC.iter().any(|s| lower.ends_with(s)) {
        Some(Gender::Masc)
    } else {
        None
    }
}

/// Is this surface already a recognizable nominative citation form? Used
/// only to decide whether an untouched person token counts as a fallback.
fn looks_nominative(lower: &str, role: TokenRole, lang: Lang, dicts: &DiminutiveDicts) -> bool {
    match role {
        TokenRole::Given => dicts.is_known_given(lower, lang),
        TokenRole::Surname => {
            const NOM_SHAPES: &[&str] = &[
                "ов", "ев", "ёв", "ин", "ын", "ский", "цкий", "ской", "ой", "енко", "ук", "юк",
                "чук", "ко", "ський", "цький",
            ];
            has_feminine_suffix(lower, lang) || NOM_SHAPES.iter().any(|s| lower.ends_with(s))
        }
        TokenRole::Patronymic => patronymic_gender(lower).is_some(),
        _ => true,
    }
}

struct GivenResolution {
    output_lower: String,
    rule: &'static str,
    morph_lang: Lang,
    notes: Option<String>,
    changed: bool,
}

impl MorphologyEngine {
    pub fn new(dicts: DiminutiveDicts, yo: YoPolicy) -> Self {
        Self { dicts, yo }
    }

    pub fn builtin() -> Self {
        Self::new(DiminutiveDicts::builtin(), YoPolicy::Fold)
    }

    pub fn dicts(&self) -> &DiminutiveDicts {
        &self.dicts
    }

    fn resolve_given(&self, lower: &str, lang: Lang, flags: &FeatureFlags) -> GivenResolution {
        let unchanged = |rule: &'static str| GivenResolution {
            output_lower: lower.to_string(),
            rule,
            morph_lang: lang,
            notes: None,
            changed: false,
        };

        if lang == Lang::En {
            if flags.enable_en_nicknames {
                if let Some((canonical, dict_lang)) =
                    self.dicts.lookup(lower, Lang::En, false, self.yo)
                {
                    return GivenResolution {
                        notes: Some(diminutive_note(lower, canonical, "en_nicknames")),
                        output_lower: canonical.to_string(),
                        rule: "morph.en_nickname_resolved",
                        morph_lang: dict_lang,
                        changed: true,
                    };
                }
            }
            return unchanged("morph.passthrough");
        }

        if flags.enable_enhanced_diminutives {
            if let Some((canonical, dict_lang)) =
                self.dicts
                    .lookup(lower, lang, flags.diminutives_allow_cross_lang, self.yo)
            {
                return GivenResolution {
                    notes: Some(diminutive_note(lower, canonical, "diminutives_dictionary")),
                    output_lower: canonical.to_string(),
                    rule: "morph.diminutive_resolved",
                    morph_lang: dict_lang,
                    changed: true,
                };
            }
            if !flags.use_diminutives_dictionary_only {
                if let Some(canonical) = crate::diminutives::infer_diminutive(lower, lang) {
                    return GivenResolution {
                        notes: Some(diminutive_note(lower, &canonical, "suffix_heuristic")),
                        output_lower: canonical,
                        rule: "morph.diminutive_heuristic",
                        morph_lang: lang,
                        changed: true,
                    };
                }
            }
        }

        if flags.enforce_nominative && matches!(lang, Lang::Ru | Lang::Uk) {
            if let Some(nominative) = normalize_given(lower, lang, &self.dicts) {
                return GivenResolution {
                    output_lower: nominative,
                    rule: "morph.to_nominative",
                    morph_lang: lang,
                    notes: None,
                    changed: true,
                };
            }
        }
        unchanged("morph.passthrough")
    }

    /// Determine the request's gender hint: the first given name with a known
    /// gender wins; a patronymic decides when no given name does.
    fn gender_hint(&self, tokens: &[Token], lang: Lang, flags: &FeatureFlags) -> Option<Gender> {
        for token in tokens {
            if token.role == TokenRole::Given {
                let lower = token.surface.to_lowercase();
                let resolved = self.resolve_given(&lower, lang, flags);
                if let Some(g) = gender_of_given(&resolved.output_lower, lang) {
                    return Some(g);
                }
            }
        }
        tokens
            .iter()
            .filter(|t| t.role == TokenRole::Patronymic)
            .find_map(|t| patronymic_gender(&t.surface.to_lowercase()))
    }

    /// Normalize every token, emitting one trace entry per token. Returns the
    /// output strings aligned with `tokens`.
    pub fn normalize_tokens(
        &self,
        tokens: &[Token],
        lang: Lang,
        flags: &FeatureFlags,
        collector: &mut TraceCollector,
    ) -> Vec<String> {
        let gender = if flags.enhanced_gender_rules {
            self.gender_hint(tokens, lang, flags)
        } else {
            None
        };

        let mut outputs = Vec::with_capacity(tokens.len());
        for token in tokens {
            let surface = token.surface.as_str();
            let lower = surface.to_lowercase();
            let (output, rule, morph_lang, normal_form, notes, fallback) = match token.role {
                TokenRole::Given => {
                    let resolved = self.resolve_given(&lower, lang, flags);
                    let fallback = !resolved.changed && !looks_nominative(&lower, token.role, lang, &self.dicts);
                    let output = if resolved.changed {
                        title_case_word(&resolved.output_lower)
                    } else {
                        fix_person_case(surface)
                    };
                    let normal_form = resolved.changed.then(|| resolved.output_lower.clone());
                    (output, resolved.rule, resolved.morph_lang, normal_form, resolved.notes, fallback)
                }
                TokenRole::Surname => self.normalize_surname_token(surface, &lower, lang, gender, flags),
                TokenRole::Patronymic => {
                    if flags.enforce_nominative && matches!(lang, Lang::Ru | Lang::Uk) {
                        match normalize_patronymic(&lower, lang) {
                            Some(nominative) => {
                                let output = title_case_word(&nominative);
                                (output, "morph.to_nominative", lang, Some(nominative), None, false)
                            }
                            None => {
                                let fallback = !looks_nominative(&lower, token.role, lang, &self.dicts);
                                (fix_person_case(surface), "morph.passthrough", lang, None, None, fallback)
                            }
                        }
                    } else {
                        (fix_person_case(surface), "morph.passthrough", lang, None, None, false)
                    }
                }
                TokenRole::Initial => {
                    (surface.to_string(), "morph.initial_preserved", lang, None, None, false)
                }
                TokenRole::OrgLegalForm => {
                    (surface.to_uppercase(), "morph.org_legal_form_upper", lang, None, None, false)
                }
                TokenRole::OrgName | TokenRole::Stopword | TokenRole::Numeric | TokenRole::Unknown => {
                    (surface.to_string(), "morph.passthrough", lang, None, None, false)
                }
            };

            collector.push_token(
                surface,
                token.role.as_str(),
                rule,
                &output,
                Some(morph_lang),
                normal_form,
                fallback,
                notes,
            );
            outputs.push(output);
        }
        outputs
    }

    fn normalize_surname_token(
        &self,
        surface: &str,
        lower: &str,
        lang: Lang,
        gender: Option<Gender>,
        flags: &FeatureFlags,
    ) -> (String, &'static str, Lang, Option<String>, Option<String>, bool) {
        if !flags.enforce_nominative || !matches!(lang, Lang::Ru | Lang::Uk) {
            return (fix_person_case(surface), "morph.passthrough", lang, None, None, false);
        }
        match normalize_surname(
            lower,
            lang,
            gender,
            flags.preserve_feminine_surnames,
            flags.enhanced_gender_rules,
        ) {
            SurnameOutcome::Reduced(nominative) => {
                let output = title_case_word(&nominative);
                (output, "morph.to_nominative", lang, Some(nominative), None, false)
            }
            SurnameOutcome::FemininePreserved(form) => {
                let rule = if lang == Lang::Uk {
                    "morph.preserve_feminine_suffix_uk"
                } else {
                    "morph.preserve_feminine_suffix_ru"
                };
                (title_case_word(&form), rule, lang, Some(form), None, false)
            }
            SurnameOutcome::Unchanged(_) => {
                let fallback = !looks_nominative(lower, TokenRole::Surname, lang, &self.dicts);
                (fix_person_case(surface), "morph.passthrough", lang, None, None, fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::classify;
    use crate::tokenize::tokenize;

    fn run(text: &str, lang: Lang, flags: &FeatureFlags) -> (Vec<String>, crate::trace::NormalizationResult) {
        let engine = MorphologyEngine::builtin();
        let mut collector = TraceCollector::new(true);
        let mut tokens = tokenize(text, lang, flags, &mut collector);
        classify(&mut tokens, lang, engine.dicts(), flags);
        let outputs = engine.normalize_tokens(&tokens, lang, flags, &mut collector);
        let joined = outputs.join(" ");
        let result = collector.finish(joined, outputs.clone(), lang, 1.0, text.chars().count());
        (outputs, result)
    }

    #[test]
    fn test_ru_diminutive_resolution() {
        let (outputs, result) = run("Сашка Пушкин", Lang::Ru, &FeatureFlags::default());
        assert_eq!(outputs, vec!["Александр", "Пушкин"]);
        let trace = result
            .token_traces()
            .find(|t| t.rule == "morph.diminutive_resolved")
            .expect("diminutive trace");
        let notes: serde_json::Value = serde_json::from_str(trace.notes.as_ref().unwrap()).unwrap();
        assert_eq!(notes["before"], "сашка");
        assert_eq!(notes["after"], "александр");
    }

    #[test]
    fn test_uk_diminutive_resolution() {
        let (outputs, _) = run("Сашко Коваль", Lang::Uk, &FeatureFlags::default());
        assert_eq!(outputs, vec!["Олександр", "Коваль"]);
        let (outputs, _) = run("Петрик Коваленко", Lang::Uk, &FeatureFlags::default());
        assert_eq!(outputs, vec!["Петро", "Коваленко"]);
    }

    #[test]
    fn test_diminutives_disabled() {
        let mut flags = FeatureFlags::default();
        flags.enable_enhanced_diminutives = false;
        let (outputs, _) = run("Сашка Пушкин", Lang::Ru, &flags);
        assert_eq!(outputs, vec!["Сашка", "Пушкин"]);
    }

    #[test]
    fn test_case_insensitive_diminutive() {
        for text in ["САШКА Пушкин", "Сашка Пушкин", "сашка пушкин"] {
            let (outputs, _) = run(text, Lang::Ru, &FeatureFlags::default());
            assert_eq!(outputs[0], "Александр", "failed for {text}");
        }
    }

    #[test]
    fn test_en_nickname_expansion() {
        let (outputs, result) = run("Dr Bill Gates", Lang::En, &FeatureFlags::default());
        // The filtered title still produces an output slot; assembly drops it.
        assert_eq!(outputs[1], "William");
        assert_eq!(outputs[2], "Gates");
        assert!(result.token_traces().any(|t| t.rule == "morph.en_nickname_resolved"));
    }

    #[test]
    fn test_surname_oblique_reduction() {
        let (outputs, result) = run("Иванову Ивану", Lang::Ru, &FeatureFlags::default());
        assert_eq!(outputs, vec!["Иванов", "Иван"]);
        assert!(result.token_traces().any(|t| t.rule == "morph.to_nominative"));
    }

    #[test]
    fn test_feminine_surname_preserved_with_feminine_given() {
        let (outputs, result) = run("Анна Петрова", Lang::Ru, &FeatureFlags::default());
        assert_eq!(outputs, vec!["Анна", "Петрова"]);
        assert!(result
            .token_traces()
            .any(|t| t.rule == "morph.preserve_feminine_suffix_ru"));
    }

    #[test]
    fn test_masculine_given_reduces_genitive_surname() {
        let (outputs, _) = run("Ивана Иванова", Lang::Ru, &FeatureFlags::default());
        assert_eq!(outputs, vec!["Иван", "Иванов"]);
    }

    #[test]
    fn test_feminine_preservation_flag_off() {
        let mut flags = FeatureFlags::default();
        flags.preserve_feminine_surnames = false;
        let (_, result) = run("Анна Петрова", Lang::Ru, &flags);
        assert!(!result
            .token_traces()
            .any(|t| t.rule.starts_with("morph.preserve_feminine")));
    }

    #[test]
    fn test_uk_feminine_surname_trace() {
        let (outputs, result) = run("Ганна Ковальська", Lang::Uk, &FeatureFlags::default());
        assert_eq!(outputs, vec!["Ганна", "Ковальська"]);
        assert!(result
            .token_traces()
            .any(|t| t.rule == "morph.preserve_feminine_suffix_uk"));
    }

    #[test]
    fn test_patronymic_reduction() {
        let (outputs, _) = run("Ивана Ивановича Петрова", Lang::Ru, &FeatureFlags::default());
        assert_eq!(outputs[1], "Иванович");
    }

    #[test]
    fn test_patronymic_gender_hint_preserves_surname() {
        // No given name; the feminine patronymic is the gender authority.
        let (outputs, _) = run("Петровна Иванова", Lang::Ru, &FeatureFlags::default());
        assert_eq!(outputs[1], "Иванова");
    }

    #[test]
    fn test_org_tokens() {
        let (outputs, _) = run("ооо \"Рога\"", Lang::Ru, &FeatureFlags::default());
        assert_eq!(outputs[0], "ООО");
        assert_eq!(outputs[1], "Рога");
    }

    #[test]
    fn test_initials_pass_through() {
        let (outputs, _) = run("Иванов И. И.", Lang::Ru, &FeatureFlags::default());
        assert_eq!(outputs, vec!["Иванов", "И.", "И."]);
    }

    #[test]
    fn test_enforce_nominative_off_leaves_surface() {
        let mut flags = FeatureFlags::default();
        flags.enforce_nominative = false;
        let (outputs, _) = run("Иванову", Lang::Ru, &flags);
        assert_eq!(outputs, vec!["Иванову"]);
    }

    #[test]
    fn test_trace_per_token() {
        let (outputs, result) = run("Иван Иванович Петров", Lang::Ru, &FeatureFlags::default());
        assert!(result.token_traces().count() >= outputs.len());
    }

    #[test]
    fn test_unknown_person_token_is_fallback() {
        let (_, result) = run("Зюзя Квакваквас", Lang::Ru, &FeatureFlags::default());
        assert!(result.token_traces().any(|t| t.fallback));
    }
}
