//! Compilation outcome domain models.
//!
//! [`CompileOutcome`] is what a compiler backend produces for one request.
//! [`BuildResponse`] is the wire record the worker reports upstream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which compiler backend handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilerVariant {
    /// Plain `javac`.
    Baseline,
    /// `javac` with the static-analysis plugin loaded.
    Augmented,
}

impl CompilerVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Augmented => "augmented",
        }
    }
}

impl fmt::Display for CompilerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity reported by the compiler for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

/// A single compiler diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source file the diagnostic points at, if any.
    pub file: Option<String>,
    /// 1-indexed line number, if any.
    pub line: Option<u32>,
    pub severity: Severity,
    /// Static-analysis check name, e.g. `DeadException`.
    pub check: Option<String>,
    /// First line of the message, without location or check prefix.
    pub message: String,
    /// The full diagnostic text as the compiler printed it.
    pub rendered: String,
}

impl Diagnostic {
    /// A diagnostic that carries only text, used for faults and raw output.
    pub fn plain(severity: Severity, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            file: None,
            line: None,
            severity,
            check: None,
            message: text.lines().next().unwrap_or_default().to_string(),
            rendered: text,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// What one `compile()` call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Compilation succeeded, possibly with non-fatal diagnostics.
    Success { diagnostics: Vec<Diagnostic> },
    /// Compilation failed with the given diagnostics.
    Failure { diagnostics: Vec<Diagnostic> },
}

impl CompileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Success { diagnostics } | Self::Failure { diagnostics } => diagnostics,
        }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics().iter().filter(|d| d.is_error()).count()
    }
}

/// Status of a reported cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Failure,
    MalformedRequest,
}

/// Wire record reported upstream for each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResponse {
    /// Rule name copied from the request (empty when it could not be read).
    pub rule: String,
    pub status: ResponseStatus,
    /// Convenience mirror of `status == Success` for simple consumers.
    pub success: bool,
    /// Rendered diagnostics, in compiler order.
    pub messages: Vec<String>,
    /// Backend that ran, absent when no compiler was invoked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<CompilerVariant>,
    /// Wall-clock time spent on the request.
    #[serde(default)]
    pub duration_ms: u64,
}

impl BuildResponse {
    /// Response for a request that was rejected before compilation.
    pub fn malformed(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            status: ResponseStatus::MalformedRequest,
            success: false,
            messages: vec![reason.into()],
            variant: None,
            duration_ms: 0,
        }
    }

    /// Response built from a compiler outcome.
    pub fn from_outcome(
        rule: impl Into<String>,
        variant: CompilerVariant,
        outcome: &CompileOutcome,
        duration_ms: u64,
    ) -> Self {
        let success = outcome.is_success();
        Self {
            rule: rule.into(),
            status: if success {
                ResponseStatus::Success
            } else {
                ResponseStatus::Failure
            },
            success,
            messages: outcome
                .diagnostics()
                .iter()
                .map(|d| d.rendered.clone())
                .collect(),
            variant: Some(variant),
            duration_ms,
        }
    }

    /// Response for a compiler fault caught at the worker boundary.
    pub fn fault(
        rule: impl Into<String>,
        variant: Option<CompilerVariant>,
        message: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            rule: rule.into(),
            status: ResponseStatus::Failure,
            success: false,
            messages: vec![message.into()],
            variant,
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_serializes_snake_case() {
        let json = serde_json::to_string(&CompilerVariant::Augmented).unwrap();
        assert_eq!(json, "\"augmented\"");
        assert_eq!(CompilerVariant::Baseline.to_string(), "baseline");
    }

    #[test]
    fn response_from_failed_outcome() {
        let outcome = CompileOutcome::Failure {
            diagnostics: vec![
                Diagnostic::plain(Severity::Error, "A.java:1: error: boom"),
                Diagnostic::plain(Severity::Warning, "A.java:2: warning: meh"),
            ],
        };
        assert_eq!(outcome.error_count(), 1);

        let response = BuildResponse::from_outcome("//a", CompilerVariant::Baseline, &outcome, 12);
        assert_eq!(response.status, ResponseStatus::Failure);
        assert!(!response.success);
        assert_eq!(response.messages.len(), 2);
        assert_eq!(response.variant, Some(CompilerVariant::Baseline));
    }

    #[test]
    fn malformed_response_has_no_variant() {
        let response = BuildResponse::malformed("", "request has no sources");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "malformed_request");
        assert!(json.get("variant").is_none());
    }

    #[test]
    fn plain_diagnostic_message_is_first_line() {
        let diag = Diagnostic::plain(Severity::Error, "first\nsecond");
        assert_eq!(diag.message, "first");
        assert_eq!(diag.rendered, "first\nsecond");
    }
}
