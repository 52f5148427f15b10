//! Locale resolution with silent fallback to the default locale.

use crate::bundle::{BundleSet, TranslationContext};

/// Pick the effective locale code for a request.
///
/// An absent, empty or unconfigured requested code resolves to `default`.
/// This never fails.
pub fn resolve_code<'a>(requested: Option<&'a str>, default: &'a str, bundles: &BundleSet) -> &'a str {
    match requested {
        Some(code) if !code.is_empty() && bundles.contains(code) => code,
        _ => default,
    }
}

/// Pick the translation context for a request.
///
/// # Arguments
/// * `requested` - The caller's locale code, if any
/// * `default` - The validator's default locale code
/// * `bundles` - The configured catalogs
///
/// # Returns
/// The requested locale's context when it is configured, otherwise the
/// default locale's context.
pub fn resolve<'b>(requested: Option<&str>, default: &str, bundles: &'b BundleSet) -> &'b TranslationContext {
    bundles
        .get(resolve_code(requested, default, bundles))
        .unwrap_or_else(|| bundles.fallback())
}
