//! # nameprep
//!
//! Multilingual name normalization and screening primitives for Russian,
//! Ukrainian, and English personal and organizational names.
//!
//! The crate turns arbitrary strings from payment descriptions, sanctions
//! records, and KYC forms into canonical forms suitable for watchlist
//! matching: Unicode-folded, language-detected, tokenized with roles,
//! morphologically reduced to nominative (diminutives resolved, feminine
//! surnames preserved), with a structured trace of every transformation.
//!
//! The pipeline is explicit: most real bugs in this domain come from
//! *implicitly* normalizing and silently destroying signal (homoglyphs,
//! Ukrainian-specific letters, feminine surname endings). Every stage is a
//! separately testable module and every knob is an enumerated flag.
//!
//! ```
//! use nameprep::Engine;
//!
//! let engine = Engine::default();
//! let result = engine.normalize("Сашка Пушкин").unwrap();
//! assert_eq!(result.normalized, "Александр Пушкин");
//! ```
//!
//! Screening patterns are generated out-of-band from watchlist seeds:
//!
//! ```
//! use nameprep::diminutives::DiminutiveDicts;
//! use nameprep::patterns::{export_for_aho_corasick, PatternGenerator, PatternOptions};
//! use nameprep::matcher::WatchlistMatcher;
//! use nameprep::lang::Lang;
//!
//! let generator = PatternGenerator::new(DiminutiveDicts::builtin());
//! let patterns = generator.generate("Иванов Иван", Lang::Ru, &PatternOptions::default());
//! let matcher = WatchlistMatcher::build(&export_for_aho_corasick(&patterns)).unwrap();
//! assert!(!matcher.find("payment to Ivanov Ivan").is_empty());
//! ```

pub mod cache;
pub mod declension;
pub mod diminutives;
pub mod error;
pub mod flags;
pub mod fold;
pub mod lang;
pub mod matcher;
pub mod morph;
pub mod nameparse;
pub mod patterns;
pub mod pipeline;
pub mod roles;
pub mod similarity;
pub mod stopwords;
pub mod tokenize;
pub mod trace;
pub mod translit;
pub mod unicode;
pub mod variants;

pub use error::{ConfigError, NormalizeError};
pub use flags::FeatureFlags;
pub use lang::{detect, Lang, LangConfig, LangDetection};
pub use matcher::{ScreenMatch, WatchlistMatcher};
pub use patterns::{PatternGenerator, PatternOptions, TieredPatterns, UnifiedPattern};
pub use pipeline::{Engine, EngineConfig, RequestOptions};
pub use trace::{NormalizationResult, TokenTrace, TraceEntry};
pub use unicode::{UnicodeOptions, YoPolicy};
