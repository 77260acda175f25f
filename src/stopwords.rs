//! Stopword and legal-form lexicons.
//!
//! These lists are intentionally small: the pipeline only needs the function
//! words that pollute payment descriptions and the company legal-form markers
//! that anchor organization spans. All entries are lowercase.

use crate::lang::Lang;

pub const STOPWORDS_RU: &[&str] = &[
    "и", "в", "на", "с", "по", "для", "от", "до", "из", "у", "о", "а", "но", "или", "за",
    "год", "лет", "рублей", "долларов", "евро", "тысяч", "миллионов", "процентов",
    "оплата", "платеж", "перевод", "перечисление", "зачисление", "счет", "договор",
];

pub const STOPWORDS_UK: &[&str] = &[
    "і", "в", "на", "з", "по", "для", "від", "до", "із", "у", "о", "а", "але", "або", "за",
    "рік", "років", "гривень", "доларів", "євро", "тисяч", "мільйонів", "відсотків",
    "оплата", "платіж", "переказ", "перерахування", "рахунок", "договір",
];

pub const STOPWORDS_EN: &[&str] = &[
    "and", "in", "on", "with", "by", "for", "from", "to", "of", "the", "a", "an", "at", "or",
    "year", "years", "dollars", "euros", "thousands", "millions", "percent",
    "payment", "transfer", "remittance", "wire", "invoice",
];

/// Company legal-form markers, matched case-insensitively. The uppercase
/// canonical spelling is what the morphology layer emits.
pub const LEGAL_FORMS_RU: &[&str] = &["ооо", "зао", "оао", "пао", "ип", "ао", "нко"];
pub const LEGAL_FORMS_UK: &[&str] = &["тов", "пат", "ат", "прат", "фоп", "кп", "дп"];
pub const LEGAL_FORMS_EN: &[&str] = &["llc", "inc", "ltd", "corp", "co", "lp", "llp", "plc", "gmbh"];

pub fn stopwords_for(lang: Lang) -> &'static [&'static str] {
    match lang {
        Lang::Ru => STOPWORDS_RU,
        Lang::Uk => STOPWORDS_UK,
        Lang::En => STOPWORDS_EN,
        // Mixed/unknown text gets the union treatment via `is_stopword`.
        Lang::Mixed | Lang::Unknown => &[],
    }
}

/// Is `word` (any case) a stopword for `lang`? For `Mixed`/`Unknown` the
/// check consults every list.
pub fn is_stopword(word: &str, lang: Lang) -> bool {
    let lower = word.to_lowercase();
    match lang {
        Lang::Ru | Lang::Uk | Lang::En => stopwords_for(lang).contains(&lower.as_str()),
        Lang::Mixed | Lang::Unknown => {
            STOPWORDS_RU.contains(&lower.as_str())
                || STOPWORDS_UK.contains(&lower.as_str())
                || STOPWORDS_EN.contains(&lower.as_str())
        }
    }
}

/// Is `word` (any case, dots stripped) a company legal-form marker?
pub fn is_legal_form(word: &str) -> bool {
    let lower: String = word
        .chars()
        .filter(|c| *c != '.')
        .flat_map(|c| c.to_lowercase())
        .collect();
    LEGAL_FORMS_RU.contains(&lower.as_str())
        || LEGAL_FORMS_UK.contains(&lower.as_str())
        || LEGAL_FORMS_EN.contains(&lower.as_str())
}
