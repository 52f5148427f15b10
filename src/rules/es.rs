//! Spanish rule-message templates.

use crate::bundle::TranslationContext;
use crate::error::TranslationError;

/// Spanish template table
pub const TEMPLATES: &[(&str, &str)] = &[
    ("required", "{0} es un campo requerido"),
    ("email", "{0} debe ser una dirección de correo electrónico válida"),
    ("oneof", "{0} debe ser uno de [{1}]"),
    ("min-string", "{0} debe tener al menos {1} caracteres"),
    ("min-number", "{0} debe ser {1} o más"),
    ("min-items", "{0} debe contener al menos {1} elementos"),
    ("max-string", "{0} debe tener un máximo de {1} caracteres"),
    ("max-number", "{0} debe ser {1} o menos"),
    ("max-items", "{0} debe contener como máximo {1} elementos"),
    ("len-string", "{0} debe tener {1} caracteres"),
    ("len-number", "{0} debe ser igual a {1}"),
    ("len-items", "{0} debe contener {1} elementos"),
];

/// Register the Spanish templates into a catalog.
pub fn register_defaults(ctx: &TranslationContext) -> Result<(), TranslationError> {
    super::register_table(ctx, TEMPLATES)
}
