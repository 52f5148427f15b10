//! Error types for construction, registration, rule evaluation and validation.
//!
//! Three outcomes of a validation call must stay distinguishable for callers:
//! `Ok(())` for valid data, [`ValidateError::Invalid`] for field-level
//! violations, and the remaining [`ValidateError`] variants for configuration
//! or engine malfunctions.

use crate::outcome::ValidationOutcome;
use thiserror::Error;

/// Errors raised while building a [`Validator`](crate::Validator).
///
/// All of them are fatal: no partially initialized validator is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The locale entry list was empty
    #[error("at least one locale must be supplied")]
    NoLocalesSupplied,

    /// No supplied locale matches the requested default
    #[error("default locale '{0}' not found in supplied locales")]
    DefaultLocaleNotFound(String),

    /// A locale's rule-template registration callback failed
    #[error("failed to register rule translations for locale '{locale}': {source}")]
    RuleRegistration {
        locale: String,
        #[source]
        source: TranslationError,
    },
}

/// Errors raised by a [`TranslationContext`](crate::TranslationContext) when
/// a message id cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("message id must not be empty")]
    EmptyKey,

    /// A different text is already registered and overwrite was not allowed
    #[error("conflicting translation for key '{key}' in locale '{locale}'")]
    Conflict { key: String, locale: String },

    /// The template contains an unbalanced `{` or `}`
    #[error("malformed placeholder in translation '{key}' for locale '{locale}'")]
    MalformedTemplate { key: String, locale: String },
}

/// Fatal errors from a [`RuleEngine`](crate::RuleEngine).
///
/// These are not violations: they mean the rules themselves could not be
/// evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown rule '{rule}' on field '{namespace}'")]
    UnknownRule { namespace: String, rule: String },

    #[error("invalid parameter '{param}' for rule '{rule}' on field '{namespace}'")]
    InvalidParam {
        namespace: String,
        rule: String,
        param: String,
    },

    /// The rule cannot be applied to the kind of value the field holds
    #[error("rule '{rule}' cannot be applied to field '{namespace}'")]
    UnsupportedKind { namespace: String, rule: String },
}

/// Error returned by [`Validator::validate`](crate::Validator::validate).
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The data violated one or more rules
    #[error("{0}")]
    Invalid(ValidationOutcome),

    /// Field display names declared on the record type could not be registered
    #[error("field translation registration failed: {0}")]
    Registration(#[source] TranslationError),

    /// The rule engine could not evaluate the data
    #[error("rule evaluation failed: {0}")]
    Engine(#[source] EngineError),
}

impl ValidateError {
    /// Get the validation outcome if this error carries rule violations.
    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        match self {
            ValidateError::Invalid(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Consume the error, returning the outcome if it carries rule violations.
    pub fn into_outcome(self) -> Option<ValidationOutcome> {
        match self {
            ValidateError::Invalid(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Check if this error is a set of rule violations (as opposed to a malfunction)
    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidateError::Invalid(_))
    }
}
