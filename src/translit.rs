//! Cyrillic ↔ Latin transliteration for name variants.
//!
//! Uses the standard romanization table (`ж→zh`, `х→kh`, `щ→shch`, Ukrainian
//! `ї→i`, `ґ→g`). Latin→Cyrillic matches multigraphs longest-first so `shch`
//! becomes `щ`, not `сhch`. Case is preserved per source character.

/// Cyrillic lowercase → Latin. Empty output means the letter drops (`ъ`, `ь`).
fn cyr_to_lat(c: char) -> Option<&'static str> {
    Some(match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'і' => "i",
        'ї' => "i",
        'є' => "e",
        'ґ' => "g",
        _ => return None,
    })
}

/// Latin multigraphs and single letters → Cyrillic, longest-first.
const LAT_TO_CYR: &[(&str, char)] = &[
    ("shch", 'щ'),
    ("zh", 'ж'),
    ("kh", 'х'),
    ("ts", 'ц'),
    ("ch", 'ч'),
    ("sh", 'ш'),
    ("yu", 'ю'),
    ("ya", 'я'),
    ("a", 'а'),
    ("b", 'б'),
    ("v", 'в'),
    ("g", 'г'),
    ("d", 'д'),
    ("e", 'е'),
    ("z", 'з'),
    ("i", 'и'),
    ("y", 'й'),
    ("k", 'к'),
    ("l", 'л'),
    ("m", 'м'),
    ("n", 'н'),
    ("o", 'о'),
    ("p", 'п'),
    ("r", 'р'),
    ("s", 'с'),
    ("t", 'т'),
    ("u", 'у'),
    ("f", 'ф'),
];

/// Transliterate Cyrillic text to Latin, preserving per-character case.
pub fn to_latin(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let lower: Vec<char> = c.to_lowercase().collect();
        let key = if lower.len() == 1 { lower[0] } else { c };
        match cyr_to_lat(key) {
            Some(mapped) => {
                if c.is_uppercase() && !mapped.is_empty() {
                    let mut chars = mapped.chars();
                    if let Some(first) = chars.next() {
                        out.extend(first.to_uppercase());
                        out.push_str(chars.as_str());
                    }
                } else {
                    out.push_str(mapped);
                }
            }
            None => out.push(c),
        }
    }
    out
}

/// Transliterate Latin text to Cyrillic, longest multigraph first.
pub fn to_cyrillic(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let lower: String = text.to_lowercase();
    let lower_chars: Vec<char> = lower.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let mut matched = false;
        for (graph, cyr) in LAT_TO_CYR {
            let len = graph.chars().count();
            if i + len <= lower_chars.len() {
                let window: String = lower_chars[i..i + len].iter().collect();
                if window == *graph {
                    if chars[i].is_uppercase() {
                        out.extend(cyr.to_uppercase());
                    } else {
                        out.push(*cyr);
                    }
                    i += len;
                    matched = true;
                    break;
                }
            }
        }
        if !matched {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Patronymic spelling variants across romanization conventions
/// (`ovich`/`ovych`, `ovna`/`ivna`).
pub fn patronymic_spelling_variants(latin: &str) -> Vec<String> {
    const REPLACEMENTS: &[(&str, &str)] = &[
        ("ovich", "ovych"),
        ("evich", "evych"),
        ("ovna", "ivna"),
        ("evna", "ivna"),
    ];
    let lower = latin.to_lowercase();
    let mut variants = Vec::new();
    for (from, to) in REPLACEMENTS {
        if lower.contains(from) {
            let replaced = lower.replace(from, to);
            // Re-case word starts to match the input convention.
            let recased = crate::fold::title_case_phrase(&replaced);
            if recased.to_lowercase() != lower {
                variants.push(recased);
            }
        }
    }
    variants
}

/// Does the text contain any Cyrillic letters?
pub fn has_cyrillic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c))
}
