//! Diminutive and nickname dictionaries, plus canonical given-name tables.
//!
//! Dictionaries are flat lowercase `{variant: canonical}` maps. The JSON
//! files under `data/` extend (and win over) the compiled-in tables, so the
//! crate works with no data directory at all. All lookups are lowercase;
//! callers re-case the output.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;
use crate::lang::Lang;
use crate::unicode::YoPolicy;

/// (diminutive, canonical) pairs, Russian.
const DIMINUTIVES_RU: &[(&str, &str)] = &[
    ("саша", "александр"),
    ("сашка", "александр"),
    ("сашенька", "александр"),
    ("шура", "александр"),
    ("алекс", "александр"),
    ("санек", "александр"),
    ("вова", "владимир"),
    ("вовка", "владимир"),
    ("володя", "владимир"),
    ("влад", "владимир"),
    ("дима", "дмитрий"),
    ("димон", "дмитрий"),
    ("митя", "дмитрий"),
    ("женя", "евгений"),
    ("ваня", "иван"),
    ("ванюша", "иван"),
    ("коля", "николай"),
    ("колян", "николай"),
    ("петя", "петр"),
    ("петруша", "петр"),
    ("сережа", "сергей"),
    ("серега", "сергей"),
    ("миша", "михаил"),
    ("мишаня", "михаил"),
    ("гриша", "григорий"),
    ("паша", "павел"),
    ("пашка", "павел"),
    ("юра", "юрий"),
    ("юрик", "юрий"),
    ("федя", "федор"),
    ("боря", "борис"),
    ("толя", "анатолий"),
    ("слава", "вячеслав"),
    ("стас", "станислав"),
    ("костя", "константин"),
    ("леша", "алексей"),
    ("андрюша", "андрей"),
    ("игорек", "игорь"),
    ("катя", "екатерина"),
    ("катюша", "екатерина"),
    ("маша", "мария"),
    ("машенька", "мария"),
    ("аня", "анна"),
    ("анечка", "анна"),
    ("нюра", "анна"),
    ("лена", "елена"),
    ("леночка", "елена"),
    ("наташа", "наталья"),
    ("оля", "ольга"),
    ("таня", "татьяна"),
    ("ира", "ирина"),
    ("света", "светлана"),
    ("галя", "галина"),
    ("люда", "людмила"),
    ("даша", "дарья"),
    ("настя", "анастасия"),
    ("юля", "юлия"),
];

/// (diminutive, canonical) pairs, Ukrainian.
const DIMINUTIVES_UK: &[(&str, &str)] = &[
    ("сашко", "олександр"),
    ("олесь", "олександр"),
    ("лесь", "олександр"),
    ("петрик", "петро"),
    ("петрусь", "петро"),
    ("іванко", "іван"),
    ("івась", "іван"),
    ("михайлик", "михайло"),
    ("мишко", "михайло"),
    ("володя", "володимир"),
    ("вова", "володимир"),
    ("юрко", "юрій"),
    ("андрійко", "андрій"),
    ("данилко", "данило"),
    ("грицько", "григорій"),
    ("тарасик", "тарас"),
    ("остапчик", "остап"),
    ("славко", "ярослав"),
    ("оленка", "олена"),
    ("оксанка", "оксана"),
    ("наталка", "наталія"),
    ("катруся", "катерина"),
    ("ганнуся", "ганна"),
    ("маруся", "марія"),
    ("соломійка", "соломія"),
    ("даринка", "дарина"),
];

/// (nickname, canonical) pairs, English.
const NICKNAMES_EN: &[(&str, &str)] = &[
    ("bill", "william"),
    ("billy", "william"),
    ("will", "william"),
    ("liam", "william"),
    ("bob", "robert"),
    ("bobby", "robert"),
    ("rob", "robert"),
    ("robbie", "robert"),
    ("dick", "richard"),
    ("rick", "richard"),
    ("richie", "richard"),
    ("jim", "james"),
    ("jimmy", "james"),
    ("jamie", "james"),
    ("mike", "michael"),
    ("mikey", "michael"),
    ("tom", "thomas"),
    ("tommy", "thomas"),
    ("tony", "anthony"),
    ("andy", "andrew"),
    ("drew", "andrew"),
    ("dave", "david"),
    ("davy", "david"),
    ("dan", "daniel"),
    ("danny", "daniel"),
    ("joe", "joseph"),
    ("joey", "joseph"),
    ("jack", "john"),
    ("johnny", "john"),
    ("ted", "edward"),
    ("eddie", "edward"),
    ("ed", "edward"),
    ("fred", "frederick"),
    ("freddie", "frederick"),
    ("frank", "francis"),
    ("harry", "henry"),
    ("hank", "henry"),
    ("larry", "lawrence"),
    ("steve", "steven"),
    ("chuck", "charles"),
    ("charlie", "charles"),
    ("chris", "christopher"),
    ("nick", "nicholas"),
    ("pete", "peter"),
    ("sam", "samuel"),
    ("sammy", "samuel"),
    ("alex", "alexander"),
    ("sasha", "alexander"),
    ("kate", "katherine"),
    ("katie", "katherine"),
    ("kathy", "katherine"),
    ("liz", "elizabeth"),
    ("beth", "elizabeth"),
    ("betty", "elizabeth"),
    ("peggy", "margaret"),
    ("maggie", "margaret"),
    ("meg", "margaret"),
    ("sue", "susan"),
    ("susie", "susan"),
    ("jen", "jennifer"),
    ("jenny", "jennifer"),
    ("becky", "rebecca"),
    ("vicky", "victoria"),
    ("mandy", "amanda"),
    ("patty", "patricia"),
    ("trish", "patricia"),
];

pub const GIVEN_NAMES_RU_MALE: &[&str] = &[
    "александр", "алексей", "анатолий", "андрей", "антон", "борис", "вадим", "валентин",
    "валерий", "василий", "виктор", "виталий", "владимир", "владислав", "вячеслав",
    "геннадий", "георгий", "григорий", "дмитрий", "евгений", "егор", "иван", "игорь",
    "илья", "кирилл", "константин", "леонид", "максим", "михаил", "никита", "николай",
    "олег", "павел", "петр", "роман", "сергей", "станислав", "степан", "федор", "юрий",
    "ярослав",
];

pub const GIVEN_NAMES_RU_FEMALE: &[&str] = &[
    "александра", "алла", "анастасия", "анна", "валентина", "вера", "галина", "дарья",
    "екатерина", "елена", "зинаида", "ирина", "ксения", "лариса", "людмила", "марина",
    "мария", "надежда", "наталья", "нина", "ольга", "светлана", "софия", "татьяна",
    "юлия",
];

pub const GIVEN_NAMES_UK_MALE: &[&str] = &[
    "олександр", "андрій", "богдан", "василь", "володимир", "в'ячеслав", "григорій",
    "данило", "дмитро", "іван", "ігор", "максим", "микола", "михайло", "назар", "олег",
    "олексій", "остап", "павло", "петро", "роман", "сергій", "степан", "тарас", "юрій",
    "ярослав",
];

pub const GIVEN_NAMES_UK_FEMALE: &[&str] = &[
    "анна", "ганна", "дарина", "катерина", "марія", "наталія", "оксана", "олена",
    "ольга", "соломія", "софія", "тетяна", "юлія",
];

pub const GIVEN_NAMES_EN_MALE: &[&str] = &[
    "william", "robert", "richard", "james", "michael", "thomas", "anthony", "andrew",
    "david", "daniel", "joseph", "john", "jonathan", "edward", "frederick", "francis",
    "henry", "lawrence", "steven", "charles", "christopher", "nicholas", "peter",
    "samuel", "alexander", "george", "paul", "mark", "brian", "kevin",
];

pub const GIVEN_NAMES_EN_FEMALE: &[&str] = &[
    "katherine", "elizabeth", "margaret", "susan", "jennifer", "rebecca", "victoria",
    "amanda", "patricia", "mary", "linda", "barbara", "sarah", "karen", "nancy", "anna",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masc,
    Fem,
}

/// Long-lived immutable dictionaries, loaded once per process and shared.
#[derive(Debug, Clone)]
pub struct DiminutiveDicts {
    ru: HashMap<String, String>,
    uk: HashMap<String, String>,
    en: HashMap<String, String>,
}

fn builtin_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn load_json_map(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    let map: HashMap<String, String> =
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    // Keys and values are contractually lowercase; enforce rather than trust.
    Ok(map
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
        .collect())
}

impl DiminutiveDicts {
    /// Compiled-in tables only.
    pub fn builtin() -> Self {
        Self {
            ru: builtin_map(DIMINUTIVES_RU),
            uk: builtin_map(DIMINUTIVES_UK),
            en: builtin_map(NICKNAMES_EN),
        }
    }

    /// Builtin tables extended by `data/diminutives_ru.json`,
    /// `data/diminutives_uk.json`, and `data/lexicons/en_nicknames.json`
    /// under `dir`. Missing files are fine; unreadable ones are an error.
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let mut dicts = Self::builtin();
        for (file, map) in [
            ("diminutives_ru.json", &mut dicts.ru),
            ("diminutives_uk.json", &mut dicts.uk),
            ("lexicons/en_nicknames.json", &mut dicts.en),
        ] {
            let path = dir.join(file);
            if path.exists() {
                let loaded = load_json_map(&path)?;
                tracing::debug!(file = %path.display(), entries = loaded.len(), "dictionary loaded");
                map.extend(loaded);
            }
        }
        Ok(dicts)
    }

    fn map_for(&self, lang: Lang) -> Option<&HashMap<String, String>> {
        match lang {
            Lang::Ru => Some(&self.ru),
            Lang::Uk => Some(&self.uk),
            Lang::En => Some(&self.en),
            Lang::Mixed | Lang::Unknown => None,
        }
    }

    /// Look up `lower` in the dictionary for `lang`. With `cross_lang`, a
    /// miss also consults the other Cyrillic dictionary. Under
    /// `YoPolicy::Preserve` the input may still contain `ё`; the lookup
    /// retries with the folded key since dictionary keys are stored `ё`-free.
    pub fn lookup(&self, lower: &str, lang: Lang, cross_lang: bool, yo: YoPolicy) -> Option<(&str, Lang)> {
        let try_in = |l: Lang| -> Option<(&str, Lang)> {
            let map = self.map_for(l)?;
            if let Some(v) = map.get(lower) {
                return Some((v.as_str(), l));
            }
            if yo == YoPolicy::Preserve && lower.contains('ё') {
                let folded = lower.replace('ё', "е");
                if let Some(v) = map.get(folded.as_str()) {
                    return Some((v.as_str(), l));
                }
            }
            None
        };

        if let Some(hit) = try_in(lang) {
            return Some(hit);
        }
        if cross_lang {
            let other = match lang {
                Lang::Ru => Some(Lang::Uk),
                Lang::Uk => Some(Lang::Ru),
                _ => None,
            };
            if let Some(other) = other {
                return try_in(other);
            }
        }
        None
    }

    /// All diminutives mapping to `canonical_lower` in `lang` (for variant
    /// expansion).
    pub fn reverse_lookup(&self, canonical_lower: &str, lang: Lang) -> Vec<&str> {
        let Some(map) = self.map_for(lang) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = map
            .iter()
            .filter(|(k, v)| v.as_str() == canonical_lower && k.as_str() != canonical_lower)
            .map(|(k, _)| k.as_str())
            .collect();
        out.sort_unstable();
        out
    }

    /// Is `lower` a known given name (canonical or diminutive) for `lang`?
    pub fn is_known_given(&self, lower: &str, lang: Lang) -> bool {
        if gender_of_given(lower, lang).is_some() {
            return true;
        }
        match lang {
            Lang::Ru | Lang::Uk | Lang::En => self
                .map_for(lang)
                .is_some_and(|m| m.contains_key(lower)),
            Lang::Mixed | Lang::Unknown => {
                self.ru.contains_key(lower) || self.uk.contains_key(lower) || self.en.contains_key(lower)
            }
        }
    }
}

/// Gender of a canonical given name, if known.
pub fn gender_of_given(lower: &str, lang: Lang) -> Option<Gender> {
    let sets: &[(&[&str], &[&str])] = match lang {
        Lang::Ru => &[(GIVEN_NAMES_RU_MALE, GIVEN_NAMES_RU_FEMALE)],
        Lang::Uk => &[(GIVEN_NAMES_UK_MALE, GIVEN_NAMES_UK_FEMALE)],
        Lang::En => &[(GIVEN_NAMES_EN_MALE, GIVEN_NAMES_EN_FEMALE)],
        Lang::Mixed | Lang::Unknown => &[
            (GIVEN_NAMES_RU_MALE, GIVEN_NAMES_RU_FEMALE),
            (GIVEN_NAMES_UK_MALE, GIVEN_NAMES_UK_FEMALE),
            (GIVEN_NAMES_EN_MALE, GIVEN_NAMES_EN_FEMALE),
        ],
    };
    for (male, female) in sets {
        if male.contains(&lower) {
            return Some(Gender::Masc);
        }
        if female.contains(&lower) {
            return Some(Gender::Fem);
        }
    }
    None
}

/// Suffixes stripped by the heuristic diminutive pass (longest first).
const DIMINUTIVE_SUFFIXES: &[&str] = &[
    "ечка", "очка", "ушка", "юшка", "енька", "онька", "ик", "чик", "ок", "ек", "ко",
];

/// Heuristic inference for diminutives missing from the dictionaries: strip a
/// diminutive suffix and accept the stem only if it lands on a known
/// canonical name. Gated by `use_diminutives_dictionary_only`.
pub fn infer_diminutive(lower: &str, lang: Lang) -> Option<String> {
    for suffix in DIMINUTIVE_SUFFIXES {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.chars().count() < 3 {
                continue;
            }
            // The stem itself, or the stem with a common nominative ending.
            for candidate in [
                stem.to_string(),
                format!("{stem}а"),
                format!("{stem}о"),
                format!("{stem}й"),
            ] {
                if gender_of_given(&candidate, lang).is_some() {
                    return Some(candidate);
                }
            }
        }
    }
    None
}
