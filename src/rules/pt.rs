//! Portuguese rule-message templates.

use crate::bundle::TranslationContext;
use crate::error::TranslationError;

/// Portuguese template table
pub const TEMPLATES: &[(&str, &str)] = &[
    ("required", "{0} é um campo obrigatório"),
    ("email", "{0} deve ser um endereço de e-mail válido"),
    ("oneof", "{0} deve ser um de [{1}]"),
    ("min-string", "{0} deve ter pelo menos {1} caracteres"),
    ("min-number", "{0} deve ser {1} ou superior"),
    ("min-items", "{0} deve conter pelo menos {1} itens"),
    ("max-string", "{0} deve ter no máximo {1} caracteres"),
    ("max-number", "{0} deve ser {1} ou menor"),
    ("max-items", "{0} deve conter no máximo {1} itens"),
    ("len-string", "{0} deve ter {1} caracteres"),
    ("len-number", "{0} deve ser igual a {1}"),
    ("len-items", "{0} deve conter {1} itens"),
];

/// Register the Portuguese templates into a catalog.
pub fn register_defaults(ctx: &TranslationContext) -> Result<(), TranslationError> {
    super::register_table(ctx, TEMPLATES)
}
