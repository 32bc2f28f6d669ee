//! Build request domain model.
//!
//! A [`BuildRequest`] describes one compilation unit handed to the worker by
//! the build orchestrator. It is immutable once received and discarded after
//! its response has been written.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::domain::errors::{WorkerError, WorkerResult};

/// One compilation unit as delivered by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Build rule that produced this request. Echoed back in the response.
    #[serde(default)]
    pub rule: String,

    /// Source files in the order the orchestrator listed them.
    #[serde(default, alias = "srcs")]
    pub sources: Vec<String>,

    /// Dependency paths made visible to the compiler.
    #[serde(default)]
    pub classpath: BTreeSet<String>,

    /// Free-form tags attached by the build system (e.g. `"proto"`).
    #[serde(default)]
    pub labels: BTreeSet<String>,

    /// Directory the compiler runs in. Relative paths resolve against it.
    #[serde(default, alias = "temp_dir", skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    /// Class file output directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Extra compiler options, appended after the configured ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opts: Vec<String>,
}

impl BuildRequest {
    /// Create a request for the given sources with no labels or classpath.
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Builder: set the rule name.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = rule.into();
        self
    }

    /// Builder: add a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    /// Builder: add a classpath entry.
    #[must_use]
    pub fn with_classpath_entry(mut self, entry: impl Into<String>) -> Self {
        self.classpath.insert(entry.into());
        self
    }

    /// Builder: set the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Builder: set the working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Whether the request carries the given label.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Check that the request is well formed enough to hand to a compiler.
    ///
    /// # Errors
    /// Returns [`WorkerError::MalformedRequest`] with a human-readable reason.
    pub fn validate(&self) -> WorkerResult<()> {
        if self.sources.is_empty() {
            return Err(WorkerError::MalformedRequest(
                "request has no sources".to_string(),
            ));
        }

        for source in &self.sources {
            check_path("source", source)?;
        }
        for entry in &self.classpath {
            check_path("classpath entry", entry)?;
        }

        Ok(())
    }
}

fn check_path(kind: &str, path: &str) -> WorkerResult<()> {
    if path.trim().is_empty() {
        return Err(WorkerError::MalformedRequest(format!("{kind} path is empty")));
    }
    if path.contains('\0') {
        return Err(WorkerError::MalformedRequest(format!(
            "{kind} path {path:?} contains a NUL byte"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_labels_deserialize_to_empty_set() {
        let request: BuildRequest = serde_json::from_str(r#"{"sources": ["A.java"]}"#).unwrap();
        assert!(request.labels.is_empty());
        assert!(request.classpath.is_empty());
        assert_eq!(request.rule, "");
    }

    #[test]
    fn duplicate_labels_collapse() {
        let request: BuildRequest =
            serde_json::from_str(r#"{"sources": ["A.java"], "labels": ["proto", "proto", "x"]}"#)
                .unwrap();
        assert_eq!(request.labels.len(), 2);
        assert!(request.has_label("proto"));
    }

    #[test]
    fn accepts_orchestrator_field_aliases() {
        let request: BuildRequest = serde_json::from_str(
            r#"{"rule": "//src:lib", "srcs": ["A.java"], "temp_dir": "/tmp/x"}"#,
        )
        .unwrap();
        assert_eq!(request.sources, vec!["A.java"]);
        assert_eq!(request.working_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn validate_rejects_empty_sources() {
        match BuildRequest::default().validate() {
            Err(WorkerError::MalformedRequest(reason)) => assert!(reason.contains("no sources")),
            other => panic!("Expected MalformedRequest, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_bad_paths() {
        assert!(BuildRequest::new(["  "]).validate().is_err());
        assert!(BuildRequest::new(["A\0.java"]).validate().is_err());
        assert!(BuildRequest::new(["A.java"])
            .with_classpath_entry("")
            .validate()
            .is_err());
    }

    #[test]
    fn validate_accepts_plain_request() {
        let request = BuildRequest::new(["src/A.java", "src/B.java"]).with_label("proto");
        assert!(request.validate().is_ok());
    }
}
