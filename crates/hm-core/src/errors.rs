//! Error model shared by every hypermap crate: one enum, one payload per family.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload carried by every [`HmError`] family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code, stable across releases.
    pub code: String,
    /// Diagnostic message.
    pub message: String,
    /// Offending identifiers and sizes, keyed by role (`edge`, `node`, `path`).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested remediation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key=value`; a repeated key keeps the last value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Replaces the hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for hypermap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HmError {
    /// Hypergraph structural errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Transition table lookups that hit an incomplete hypergraph.
    #[error("transition error: {0}")]
    Transition(ErrorInfo),
    /// Numerical invariant violations inside similarity measures.
    #[error("similarity error: {0}")]
    Similarity(ErrorInfo),
    /// Representation builder errors.
    #[error("representation error: {0}")]
    Representation(ErrorInfo),
    /// Partition tree reconciliation and comparison errors.
    #[error("partition error: {0}")]
    Partition(ErrorInfo),
    /// Configuration loading errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Failures while writing to an output sink.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " [{}]", pairs.join(", "))?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl HmError {
    /// Payload of whichever family this is.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HmError::Graph(info)
            | HmError::Transition(info)
            | HmError::Similarity(info)
            | HmError::Representation(info)
            | HmError::Partition(info)
            | HmError::Config(info)
            | HmError::Serde(info)
            | HmError::Io(info) => info,
        }
    }

    /// Shorthand for `info().code`.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to the payload, keeping the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value.to_string()))
    }

    /// Sets a remediation hint, keeping the error family.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            HmError::Graph(info) => HmError::Graph(f(info)),
            HmError::Transition(info) => HmError::Transition(f(info)),
            HmError::Similarity(info) => HmError::Similarity(f(info)),
            HmError::Representation(info) => HmError::Representation(f(info)),
            HmError::Partition(info) => HmError::Partition(f(info)),
            HmError::Config(info) => HmError::Config(f(info)),
            HmError::Serde(info) => HmError::Serde(f(info)),
            HmError::Io(info) => HmError::Io(f(info)),
        }
    }
}
