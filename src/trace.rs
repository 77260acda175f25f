//! Result and trace contracts for the normalization pipeline.
//!
//! Every stage appends [`TraceEntry`] records in processing order; the
//! assembled [`NormalizationResult`] is the crate's wire-facing output
//! (serialized as-is by the HTTP layer).

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::lang::Lang;

/// Trace for a single token transformation. One record per rule firing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTrace {
    /// Input surface form.
    pub token: String,
    pub role: String,
    /// Identifier of the transformation, e.g. `morph.diminutive_resolved`.
    pub rule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morph_lang: Option<String>,
    /// Lemma, when morphology produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_form: Option<String>,
    /// Final token text.
    pub output: String,
    #[serde(default)]
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One entry in a result's trace: either a per-token record or the single
/// request-scoped effective-flags record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceEntry {
    Token(TokenTrace),
    Flags {
        scope: String,
        value: serde_json::Value,
    },
}

impl TraceEntry {
    pub fn as_token(&self) -> Option<&TokenTrace> {
        match self {
            TraceEntry::Token(t) => Some(t),
            TraceEntry::Flags { .. } => None,
        }
    }

    pub fn is_flags(&self) -> bool {
        matches!(self, TraceEntry::Flags { .. })
    }
}

/// Top-level output of a normalization request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub normalized: String,
    pub tokens: Vec<String>,
    pub trace: Vec<TraceEntry>,
    pub errors: Vec<String>,
    pub language: String,
    pub confidence: f64,
    pub original_length: usize,
    pub normalized_length: usize,
    pub token_count: usize,
    /// Wall-clock processing time in milliseconds.
    pub processing_time: f64,
    pub success: bool,
}

impl NormalizationResult {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Per-token trace records, skipping the flags entry.
    pub fn token_traces(&self) -> impl Iterator<Item = &TokenTrace> + '_ {
        self.trace.iter().filter_map(TraceEntry::as_token)
    }

    /// The request-scoped effective-flags entry. Exactly one per result.
    pub fn flags_entry(&self) -> Option<&serde_json::Value> {
        self.trace.iter().find_map(|e| match e {
            TraceEntry::Flags { value, .. } => Some(value),
            TraceEntry::Token(_) => None,
        })
    }
}

/// Accumulates traces, errors, and timing while a request moves through the
/// pipeline stages.
#[derive(Debug)]
pub struct TraceCollector {
    entries: Vec<TraceEntry>,
    errors: Vec<String>,
    enabled: bool,
    started: Instant,
}

impl TraceCollector {
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: Vec::new(),
            errors: Vec::new(),
            enabled,
            started: Instant::now(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[allow(clippy::too_many_arguments)]
    pub fn push_token(
        &mut self,
        token: &str,
        role: &str,
        rule: &str,
        output: &str,
        morph_lang: Option<Lang>,
        normal_form: Option<String>,
        fallback: bool,
        notes: Option<String>,
    ) {
        if !self.enabled {
            return;
        }
        self.entries.push(TraceEntry::Token(TokenTrace {
            token: token.to_string(),
            role: role.to_string(),
            rule: rule.to_string(),
            morph_lang: morph_lang.map(|l| l.code().to_string()),
            normal_form,
            output: output.to_string(),
            fallback,
            notes,
        }));
    }

    /// Attach the request-scoped effective-flags entry.
    pub fn push_flags(&mut self, value: serde_json::Value) {
        self.entries.push(TraceEntry::Flags {
            scope: "request".to_string(),
            value,
        });
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Assemble the final result. `success` is derived from the error list.
    pub fn finish(
        self,
        normalized: String,
        tokens: Vec<String>,
        language: Lang,
        confidence: f64,
        original_length: usize,
    ) -> NormalizationResult {
        let success = self.errors.is_empty();
        NormalizationResult {
            normalized_length: normalized.chars().count(),
            token_count: tokens.len(),
            normalized,
            tokens,
            trace: self.entries,
            errors: self.errors,
            language: language.code().to_string(),
            confidence,
            original_length,
            processing_time: self.started.elapsed().as_secs_f64() * 1000.0,
            success,
        }
    }
}
