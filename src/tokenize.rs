//! Tokenization for name strings.
//!
//! Splits on whitespace and punctuation boundaries while keeping the pieces
//! names are actually made of: intra-token apostrophes (`O'Connor`), hyphens
//! (`Jean-Baptiste`), initials (`И.`), interior-dot abbreviations (`и.о.`)
//! and ellipses. The two flag-gated post-passes (`collapse_double_dots`,
//! `preserve_hyphenated_name`) read the request's *effective* flags — they
//! are passed in per call, never captured at construction.

use crate::flags::FeatureFlags;
use crate::fold::title_case_word;
use crate::lang::Lang;
use crate::roles::TokenRole;
use crate::trace::TraceCollector;

/// An atomic string segment after tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub role: TokenRole,
    pub position: usize,
    pub language_hint: Option<Lang>,
    /// Surface was wrapped in (or adjacent to) quote characters in the input.
    pub quoted: bool,
    /// Excluded from the assembled output (filtered title/suffix, strict
    /// stopword). The token still appears in the trace.
    pub filtered: bool,
}

impl Token {
    fn new(surface: String, position: usize, quoted: bool) -> Self {
        Token {
            surface,
            role: TokenRole::Unknown,
            position,
            language_hint: None,
            quoted,
            filtered: false,
        }
    }
}

/// `И..` → `И.`: a single letter followed by two or more dots loses the
/// extras. Ellipses (`...`) and interior-dot abbreviations (`и.о.`) do not
/// match and pass through unchanged.
pub fn collapse_double_dots_token(s: &str) -> Option<String> {
    let mut chars = s.chars();
    let first = chars.next()?;
    if !first.is_alphabetic() {
        return None;
    }
    let rest: Vec<char> = chars.collect();
    if rest.len() < 2 || !rest.iter().all(|c| *c == '.') {
        return None;
    }
    Some(format!("{first}."))
}

/// Title-case each segment of a hyphenated name (`петрова-сидорова` →
/// `Петрова-Сидорова`). Em-dashes, double hyphens, and segments containing
/// anything but letters and apostrophes are left untouched.
pub fn normalize_hyphenated_name(name: &str, titlecase: bool) -> String {
    if !titlecase || !name.contains('-') || name.contains("--") || name.contains('—') {
        return name.to_string();
    }
    let segments: Vec<&str> = name.split('-').collect();
    let valid = segments.iter().all(|seg| {
        !seg.is_empty() && seg.chars().all(|c| c.is_alphabetic() || c == '\'')
    });
    if !valid {
        return name.to_string();
    }
    segments
        .iter()
        .map(|seg| title_case_word(seg))
        .collect::<Vec<_>>()
        .join("-")
}

/// True for `И.`, `J.`, `И..` — one letter, then only dots.
pub fn is_initial(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() => {}
        _ => return false,
    }
    let mut dots = 0;
    for c in chars {
        if c != '.' {
            return false;
        }
        dots += 1;
    }
    dots >= 1
}

const STRIP_PUNCT: &[char] = &[
    '"', '«', '»', '(', ')', '[', ']', '{', '}', ',', ';', ':', '!', '?', '„', '“', '”',
];

/// Split a glued run of uppercase initials (`И.И.` → `И.` + `И.`,
/// `Ф.М.Достоевский` → `Ф.` + `М.` + `Достоевский`). Returns `None` when the
/// chunk is not such a run (lowercase abbreviations like `и.о.` stay whole).
fn split_initial_run(chunk: &str) -> Option<Vec<String>> {
    let chars: Vec<char> = chunk.chars().collect();
    let mut parts = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if !(c.is_alphabetic() && c.is_uppercase()) {
            break;
        }
        let mut dots = 0;
        while i + 1 + dots < chars.len() && chars[i + 1 + dots] == '.' {
            dots += 1;
        }
        if dots == 0 {
            break;
        }
        let mut part = String::new();
        part.push(c);
        for _ in 0..dots {
            part.push('.');
        }
        parts.push(part);
        i += 1 + dots;
    }
    if parts.is_empty() {
        return None;
    }
    let remainder: String = chars[i..].iter().collect();
    if remainder.is_empty() {
        if parts.len() >= 2 {
            return Some(parts);
        }
        return None; // single initial: the chunk is already one token
    }
    // `Ф.М.Достоевский`: trailing word after the initials.
    if remainder.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-') {
        parts.push(remainder);
        return Some(parts);
    }
    None
}

const QUOTE_CHARS: &[char] = &['"', '«', '»', '„', '“', '”'];

fn clean_chunk(raw: &str) -> (String, bool) {
    let mut s = raw.trim_matches(|c: char| STRIP_PUNCT.contains(&c));
    let quoted = raw.starts_with(QUOTE_CHARS) || raw.ends_with(QUOTE_CHARS);

    // Trailing sentence dot: strip from multi-letter words, but keep initials
    // (`И.`), abbreviations (`и.о.`), and ellipses.
    if s.ends_with('.') && !s.ends_with("..") {
        let stem: String = s.chars().take_while(|c| *c != '.').collect();
        if stem.chars().count() > 1 && !s[..s.len() - 1].contains('.') {
            s = &s[..s.len() - 1];
        }
    }
    (s.to_string(), quoted)
}

/// Tokenize normalized text. `lang` seeds each token's language hint; flags
/// gate the two post-passes.
pub fn tokenize(
    text: &str,
    lang: Lang,
    flags: &FeatureFlags,
    collector: &mut TraceCollector,
) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for raw in text.split_whitespace() {
        let (chunk, quoted) = clean_chunk(raw);
        if chunk.is_empty() {
            continue;
        }
        // Pure punctuation: ellipses survive, separators do not.
        if !chunk.chars().any(char::is_alphanumeric) {
            if chunk.chars().all(|c| c == '.') && chunk.chars().count() >= 3 {
                tokens.push(Token::new(chunk, 0, quoted));
            }
            continue;
        }
        if let Some(parts) = split_initial_run(&chunk) {
            // Splitting a glued run (`И.И.` → `И. И.`) is part of the same
            // initials fix as dot collapsing, and traces under the same rule.
            if flags.fix_initials_double_dot && parts.len() >= 2 {
                collector.push_token(
                    &chunk,
                    TokenRole::Initial.as_str(),
                    "tokenizer.collapse_double_dots",
                    &parts.join(" "),
                    Some(lang),
                    None,
                    false,
                    None,
                );
            }
            for part in parts {
                tokens.push(Token::new(part, 0, quoted));
            }
        } else {
            tokens.push(Token::new(chunk, 0, quoted));
        }
    }

    if flags.fix_initials_double_dot {
        for token in &mut tokens {
            if let Some(collapsed) = collapse_double_dots_token(&token.surface) {
                collector.push_token(
                    &token.surface,
                    TokenRole::Initial.as_str(),
                    "tokenizer.collapse_double_dots",
                    &collapsed,
                    Some(lang),
                    None,
                    false,
                    None,
                );
                token.surface = collapsed;
            }
        }
    }

    if flags.preserve_hyphenated_case {
        for token in &mut tokens {
            let fixed = normalize_hyphenated_name(&token.surface, true);
            if fixed != token.surface {
                collector.push_token(
                    &token.surface,
                    TokenRole::Unknown.as_str(),
                    "tokenizer.preserve_hyphenated_name",
                    &fixed,
                    Some(lang),
                    None,
                    false,
                    None,
                );
                token.surface = fixed;
            }
        }
    }

    for (i, token) in tokens.iter_mut().enumerate() {
        token.position = i;
        token.language_hint = Some(lang);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str, flags: &FeatureFlags) -> Vec<String> {
        let mut collector = TraceCollector::new(true);
        tokenize(text, Lang::Ru, flags, &mut collector)
            .into_iter()
            .map(|t| t.surface)
            .collect()
    }

    #[test]
    fn test_basic_split() {
        assert_eq!(tok("Иван Петров", &FeatureFlags::default()), vec!["Иван", "Петров"]);
    }

    #[test]
    fn test_apostrophes_and_hyphens_stay_intact() {
        let flags = FeatureFlags::default();
        assert_eq!(tok("O'Connor Jean-Baptiste", &flags), vec!["O'Connor", "Jean-Baptiste"]);
    }

    #[test]
    fn test_glued_initials_split() {
        let flags = FeatureFlags::default();
        assert_eq!(tok("Иванов И.И.", &flags), vec!["Иванов", "И.", "И."]);
        assert_eq!(tok("Ф.М.Достоевский", &flags), vec!["Ф.", "М.", "Достоевский"]);
    }

    #[test]
    fn test_lowercase_abbreviations_stay_whole() {
        let flags = FeatureFlags::default();
        assert_eq!(tok("и.о. директора", &flags), vec!["и.о.", "директора"]);
    }

    #[test]
    fn test_ellipsis_preserved() {
        let flags = FeatureFlags::default();
        assert_eq!(tok("Иван ... Петров", &flags), vec!["Иван", "...", "Петров"]);
    }

    #[test]
    fn test_collapse_double_dots_flag() {
        let mut flags = FeatureFlags::default();
        flags.fix_initials_double_dot = true;
        assert_eq!(tok("И.. О.", &flags), vec!["И.", "О."]);

        let mut collector = TraceCollector::new(true);
        let tokens = tokenize("И.. О.", Lang::Ru, &flags, &mut collector);
        assert_eq!(tokens[0].surface, "И.");
        let result = collector.finish(String::new(), vec![], Lang::Ru, 1.0, 0);
        assert!(result
            .token_traces()
            .any(|t| t.rule == "tokenizer.collapse_double_dots"));
    }

    #[test]
    fn test_collapse_double_dots_off_by_default() {
        assert_eq!(tok("И..", &FeatureFlags::default()), vec!["И.."]);
    }

    #[test]
    fn test_collapse_double_dots_token_special_cases() {
        assert_eq!(collapse_double_dots_token("И.."), Some("И.".to_string()));
        assert_eq!(collapse_double_dots_token("O.."), Some("O.".to_string()));
        assert_eq!(collapse_double_dots_token("И."), None);
        assert_eq!(collapse_double_dots_token("..."), None);
        assert_eq!(collapse_double_dots_token("и.о."), None);
    }

    #[test]
    fn test_hyphenated_case_flag() {
        let mut flags = FeatureFlags::default();
        flags.preserve_hyphenated_case = true;
        assert_eq!(tok("петрова-сидорова", &flags), vec!["Петрова-Сидорова"]);
        assert_eq!(tok("ИВАНОВ-ПЕТРОВ", &flags), vec!["Иванов-Петров"]);
    }

    #[test]
    fn test_normalize_hyphenated_name_rules() {
        assert_eq!(normalize_hyphenated_name("o'neil-smith", true), "O'Neil-Smith");
        assert_eq!(normalize_hyphenated_name("mary-jane", true), "Mary-Jane");
        assert_eq!(normalize_hyphenated_name("ковальська-шевченко", true), "Ковальська-Шевченко");
        assert_eq!(normalize_hyphenated_name("петрова-сидорова", false), "петрова-сидорова");
        assert_eq!(normalize_hyphenated_name("test—dash", true), "test—dash");
        assert_eq!(normalize_hyphenated_name("test--dash", true), "test--dash");
        assert_eq!(normalize_hyphenated_name("test.-dash", true), "test.-dash");
        assert_eq!(normalize_hyphenated_name("test2-dash", true), "test2-dash");
    }

    #[test]
    fn test_quotes_and_commas_stripped() {
        let flags = FeatureFlags::default();
        assert_eq!(tok("\"Рога\", Иванов;", &flags), vec!["Рога", "Иванов"]);
        let mut collector = TraceCollector::new(false);
        let tokens = tokenize("\"Рога\"", Lang::Ru, &flags, &mut collector);
        assert!(tokens[0].quoted);
    }

    #[test]
    fn test_trailing_sentence_dot_stripped() {
        let flags = FeatureFlags::default();
        assert_eq!(tok("Пушкин.", &flags), vec!["Пушкин"]);
        assert_eq!(tok("И.", &flags), vec!["И."]);
    }

    #[test]
    fn test_positions_are_sequential() {
        let mut collector = TraceCollector::new(false);
        let tokens = tokenize("Иванов И. И.", Lang::Ru, &FeatureFlags::default(), &mut collector);
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_input() {
        let mut collector = TraceCollector::new(false);
        assert!(tokenize("", Lang::Ru, &FeatureFlags::default(), &mut collector).is_empty());
    }
}
