//! Rule engine seam and the built-in tag engine.
//!
//! The validator does not know which rules exist. It asks a [`RuleEngine`] to
//! evaluate a record into [`Violation`]s, and to render each violation
//! through the resolved locale's catalog. Field display names are merged in
//! afterwards by the validator.
//!
//! # Built-in rule templates
//!
//! - `en`: English templates ([`en::register_defaults`])
//! - `pt`: Portuguese templates ([`pt::register_defaults`])
//! - `es`: Spanish templates ([`es::register_defaults`])

mod engine;
pub mod en;
pub mod es;
pub mod pt;

pub use engine::TagEngine;

use crate::bundle::TranslationContext;
use crate::error::{EngineError, TranslationError};
use crate::locale::Locale;
use crate::metadata::{Record, TypeDescriptor};
use crate::validator::LocaleEntry;
use serde::Serialize;

/// Evaluates rules over records and renders violation messages.
pub trait RuleEngine: Send + Sync {
    /// Evaluate every rule declared on a record, including nested records.
    ///
    /// # Returns
    /// * `Ok(violations)` - Empty when the record is valid
    /// * `Err(EngineError)` - If the rules themselves could not be evaluated
    fn evaluate(
        &self,
        data: &dyn Record,
        descriptor: &TypeDescriptor,
    ) -> Result<Vec<Violation>, EngineError>;

    /// Render the default message for a violation in the given locale.
    fn render(&self, violation: &Violation, ctx: &TranslationContext) -> String;
}

/// Kind of value a violation was reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Absent,
    Bool,
    Number,
    String,
    Record,
    List,
}

/// A single failed rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Fully qualified field namespace (e.g., "User.Address.City")
    pub namespace: String,

    /// Name of the record type that declares the field (e.g., "Address")
    pub owner: String,

    /// Short field name (e.g., "City")
    pub field: String,

    /// Identifier of the failed rule (e.g., "required")
    pub rule: String,

    /// Rule parameter, if the rule takes one (e.g., "8" for `min=8`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,

    /// Kind of the offending value
    pub kind: ValueKind,
}

/// Registration callback type for a locale's rule templates
pub type RegisterFn = fn(&TranslationContext) -> Result<(), TranslationError>;

/// Register a template table into a catalog without overwriting.
fn register_table(
    ctx: &TranslationContext,
    table: &[(&str, &str)],
) -> Result<(), TranslationError> {
    for (key, template) in table {
        ctx.register(key, template, false)?;
    }
    Ok(())
}

/// Get the built-in registration callback for a locale code.
pub fn builtin_templates(code: &str) -> Option<RegisterFn> {
    match code {
        "en" => Some(en::register_defaults),
        "pt" => Some(pt::register_defaults),
        "es" => Some(es::register_defaults),
        _ => None,
    }
}

/// Build a [`LocaleEntry`] for a locale that ships with rule templates.
///
/// # Returns
/// * `Some(LocaleEntry)` for "en", "pt" and "es"
/// * `None` for any other code
pub fn builtin_entry(code: &str) -> Option<LocaleEntry> {
    let locale = Locale::builtin(code)?;
    let register = builtin_templates(code)?;
    Some(LocaleEntry::new(locale, register))
}
