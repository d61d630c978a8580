//! Diagnostic model and the results sink for specification analysis.

use std::fmt;

use serde::Serialize;

/// Severity of a lint diagnostic.
///
/// The scale is deliberately closed at two levels; downstream consumers
/// branch on exactly these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category tag naming the rule or attribute that produced this.
    pub category: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] [{}] {}", self.severity, self.category, self.message)
    }
}

/// Ordered, append-only collection of diagnostics.
///
/// Created empty by the caller, populated by the analyzer, read afterward.
/// Insertion order matches check execution order; nothing is deduplicated.
/// Use a fresh sink per analysis run: feeding one sink to two runs records
/// every diagnostic twice.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Results {
    diagnostics: Vec<Diagnostic>,
}

impl Results {
    pub fn new() -> Self {
        Results::default()
    }

    pub fn add_error(&mut self, category: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            category: category.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, category: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            category: category.into(),
            message: message.into(),
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Append every diagnostic of `other`, preserving order.
    pub fn extend(&mut self, other: Results) {
        self.diagnostics.extend(other.diagnostics);
    }
}
