//! Diacritics stripping and name-aware title casing.

use unicode_normalization::UnicodeNormalization;

pub fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

pub(crate) fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | '\u{1DC0}'..='\u{1DFF}' | '\u{20D0}'..='\u{20FF}' | '\u{FE20}'..='\u{FE2F}')
}

/// Title-case a single name word: uppercase the first letter and any letter
/// that follows a non-letter (apostrophe, hyphen), lowercase the rest.
///
/// This matches how names are conventionally written: `o'neil` → `O'Neil`,
/// `ИВАНОВ` → `Иванов`, `ковальська` → `Ковальська`.
pub fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_boundary = true;
    for c in word.chars() {
        if c.is_alphabetic() {
            if at_boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(c);
            at_boundary = true;
        }
    }
    out
}

/// Title-case each whitespace-separated word of a phrase.
pub fn title_case_phrase(text: &str) -> String {
    text.split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("Müller"), "Muller");
    }

    #[test]
    fn test_title_case_word_capitalizes_after_apostrophe() {
        assert_eq!(title_case_word("o'neil"), "O'Neil");
        assert_eq!(title_case_word("d'artanyan"), "D'Artanyan");
    }

    #[test]
    fn test_title_case_word_cyrillic() {
        assert_eq!(title_case_word("ИВАНОВ"), "Иванов");
        assert_eq!(title_case_word("ковальська"), "Ковальська");
    }

    #[test]
    fn test_title_case_phrase() {
        assert_eq!(title_case_phrase("иван петров"), "Иван Петров");
    }
}
