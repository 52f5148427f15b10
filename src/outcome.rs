//! Validation outcome: raw violations plus translated messages.

use crate::rules::Violation;
use serde::Serialize;
use std::collections::HashMap;

/// The result of validating data that broke one or more rules.
///
/// Carries both the rule engine's untranslated violations and one translated
/// message per field namespace. Each outcome is built fresh for a single call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    violations: Vec<Violation>,
    translated: HashMap<String, String>,
}

impl ValidationOutcome {
    /// Create an outcome from raw violations and their translated messages.
    pub fn new(violations: Vec<Violation>, translated: HashMap<String, String>) -> Self {
        Self {
            violations,
            translated,
        }
    }

    /// Raw violations as reported by the rule engine, in report order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Raw violations reported for one field namespace
    pub fn violations_for<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations
            .iter()
            .filter(move |violation| violation.namespace == namespace)
    }

    /// Translated messages keyed by field namespace (e.g., "User.FirstName")
    pub fn translated(&self) -> &HashMap<String, String> {
        &self.translated
    }

    /// Translated message for one field namespace
    pub fn message(&self, namespace: &str) -> Option<&str> {
        self.translated.get(namespace).map(String::as_str)
    }

    /// Number of field namespaces with a translated message
    pub fn len(&self) -> usize {
        self.translated.len()
    }

    /// Check if the outcome carries no messages
    pub fn is_empty(&self) -> bool {
        self.translated.is_empty()
    }
}

impl std::fmt::Display for ValidationOutcome {
    /// Translated messages joined with `"; "`, in unspecified order.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.translated.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationOutcome {}
