//! English personal-name parsing: honorific prefixes, generational and
//! professional suffixes, and given/middle/surname assignment.

use crate::flags::FeatureFlags;
use crate::roles::TokenRole;
use crate::tokenize::Token;

const TITLES: &[&str] = &[
    "dr", "mr", "mrs", "ms", "miss", "prof", "professor", "sir", "dame", "rev", "hon",
    "capt", "col", "gen", "lt", "sgt",
];

const SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv", "phd", "md", "esq", "dds", "jd"];

fn normalized_key(surface: &str) -> String {
    surface
        .chars()
        .filter(|c| *c != '.')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

pub fn is_title(surface: &str) -> bool {
    TITLES.contains(&normalized_key(surface).as_str())
}

pub fn is_name_suffix(surface: &str) -> bool {
    SUFFIXES.contains(&normalized_key(surface).as_str())
}

/// A parsed English name, by token index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    pub prefix: Vec<usize>,
    pub given: Option<usize>,
    pub middle: Vec<usize>,
    pub surname: Option<usize>,
    pub suffix: Vec<usize>,
}

/// Split person-candidate tokens into name parts. Tokens already claimed by
/// other roles (orgs, numbers, stopwords) are skipped.
pub fn parse(tokens: &[Token]) -> ParsedName {
    let mut parsed = ParsedName::default();
    let candidates: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| matches!(t.role, TokenRole::Unknown | TokenRole::Initial))
        .map(|(i, _)| i)
        .collect();

    let mut core: Vec<usize> = Vec::new();
    for &i in &candidates {
        let surface = tokens[i].surface.as_str();
        if core.is_empty() && parsed.suffix.is_empty() && is_title(surface) {
            parsed.prefix.push(i);
        } else if is_name_suffix(surface) {
            parsed.suffix.push(i);
        } else {
            core.push(i);
        }
    }

    match core.len() {
        0 => {}
        1 => parsed.surname = Some(core[0]),
        _ => {
            parsed.given = Some(core[0]);
            parsed.surname = Some(*core.last().unwrap());
            parsed.middle = core[1..core.len() - 1].to_vec();
        }
    }
    parsed
}

/// Role assignment for English requests. Titles and suffixes become
/// stopword-role tokens; under `filter_titles_suffixes` they are also
/// excluded from the assembled output.
pub fn classify_en(tokens: &mut [Token], flags: &FeatureFlags) {
    let parsed = parse(tokens);
    for &i in parsed.prefix.iter().chain(parsed.suffix.iter()) {
        tokens[i].role = TokenRole::Stopword;
        if flags.filter_titles_suffixes {
            tokens[i].filtered = true;
        }
    }
    if let Some(i) = parsed.given {
        if tokens[i].role == TokenRole::Unknown {
            tokens[i].role = TokenRole::Given;
        }
    }
    for &i in &parsed.middle {
        if tokens[i].role == TokenRole::Unknown {
            tokens[i].role = TokenRole::Given;
        }
    }
    if let Some(i) = parsed.surname {
        if tokens[i].role == TokenRole::Unknown {
            tokens[i].role = TokenRole::Surname;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Lang;
    use crate::trace::TraceCollector;

    fn parse_text(text: &str, flags: &FeatureFlags) -> Vec<(String, TokenRole, bool)> {
        let mut collector = TraceCollector::new(false);
        let mut tokens = crate::tokenize::tokenize(text, Lang::En, flags, &mut collector);
        classify_en(&mut tokens, flags);
        tokens.into_iter().map(|t| (t.surface, t.role, t.filtered)).collect()
    }

    #[test]
    fn test_title_detection_dot_insensitive() {
        assert!(is_title("Dr."));
        assert!(is_title("dr"));
        assert!(is_title("Mrs."));
        assert!(!is_title("Drive"));
    }

    #[test]
    fn test_prefix_given_surname() {
        let out = parse_text("Dr. Bill Gates", &FeatureFlags::default());
        assert_eq!(out[0].1, TokenRole::Stopword);
        assert!(out[0].2, "title should be filtered under default flags");
        assert_eq!(out[1].1, TokenRole::Given);
        assert_eq!(out[2].1, TokenRole::Surname);
    }

    #[test]
    fn test_titles_kept_when_filter_off() {
        let mut flags = FeatureFlags::default();
        flags.filter_titles_suffixes = false;
        let out = parse_text("Dr. Bill Gates", &flags);
        assert_eq!(out[0].1, TokenRole::Stopword);
        assert!(!out[0].2);
    }

    #[test]
    fn test_suffix_detection() {
        let out = parse_text("Martin Luther King Jr.", &FeatureFlags::default());
        assert_eq!(out[0].1, TokenRole::Given);
        assert_eq!(out[1].1, TokenRole::Given);
        assert_eq!(out[2].1, TokenRole::Surname);
        assert_eq!(out[3].1, TokenRole::Stopword);
        assert!(out[3].2);
    }

    #[test]
    fn test_middle_names() {
        let parsed_roles = parse_text("John Ronald Reuel Tolkien", &FeatureFlags::default());
        assert_eq!(parsed_roles[0].1, TokenRole::Given);
        assert_eq!(parsed_roles[1].1, TokenRole::Given);
        assert_eq!(parsed_roles[2].1, TokenRole::Given);
        assert_eq!(parsed_roles[3].1, TokenRole::Surname);
    }

    #[test]
    fn test_single_token_is_surname() {
        let out = parse_text("Pavlov", &FeatureFlags::default());
        assert_eq!(out[0].1, TokenRole::Surname);
    }

    #[test]
    fn test_initials_preserved() {
        let out = parse_text("J. R. Tolkien", &FeatureFlags::default());
        assert_eq!(out[0].1, TokenRole::Initial);
        assert_eq!(out[1].1, TokenRole::Initial);
        assert_eq!(out[2].1, TokenRole::Surname);
    }
}
