//! English rule-message templates.
//!
//! `{0}` is the field name, `{1}` the rule parameter.

use crate::bundle::TranslationContext;
use crate::error::TranslationError;

/// English template table
pub const TEMPLATES: &[(&str, &str)] = &[
    ("required", "{0} is a required field"),
    ("email", "{0} must be a valid email address"),
    ("oneof", "{0} must be one of [{1}]"),
    // Length and range rules, by value kind
    ("min-string", "{0} must be at least {1} characters in length"),
    ("min-number", "{0} must be {1} or greater"),
    ("min-items", "{0} must contain at least {1} items"),
    ("max-string", "{0} must be a maximum of {1} characters in length"),
    ("max-number", "{0} must be {1} or less"),
    ("max-items", "{0} must contain at maximum {1} items"),
    ("len-string", "{0} must be {1} characters in length"),
    ("len-number", "{0} must be equal to {1}"),
    ("len-items", "{0} must contain {1} items"),
];

/// Register the English templates into a catalog.
pub fn register_defaults(ctx: &TranslationContext) -> Result<(), TranslationError> {
    super::register_table(ctx, TEMPLATES)
}
