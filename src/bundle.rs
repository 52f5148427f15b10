//! Locale bundles: per-locale message catalogs and the coordinator holding them.
//!
//! A [`TranslationContext`] stores message templates keyed by message id. Rule
//! templates (`"required"`, `"email"`, ...) are registered once at
//! construction; field display names (`"User.FirstName"`) are added later,
//! additively, as record types are first validated.
//!
//! A [`BundleSet`] is built once from every configured locale and never
//! changes shape afterwards.

use crate::error::TranslationError;
use crate::locale::Locale;
use parking_lot::RwLock;
use regex::Regex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

// Positional placeholder such as {0} or {12}
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern is valid"))
}

/// Message catalog for a single locale.
///
/// Safe to share between threads: lookups take a read lock, registrations a
/// write lock.
#[derive(Debug)]
pub struct TranslationContext {
    locale: Locale,
    messages: RwLock<HashMap<String, String>>,
}

impl TranslationContext {
    /// Create an empty catalog for a locale.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            messages: RwLock::new(HashMap::new()),
        }
    }

    /// Get the locale this catalog belongs to.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Register a message template.
    ///
    /// Registering the same text again is a no-op success whatever `overwrite`
    /// says; a different text replaces the existing one only when `overwrite`
    /// is true.
    ///
    /// # Arguments
    /// * `key` - The message id (e.g., "required", "User.FirstName")
    /// * `text` - The template; may contain positional placeholders `{0}`, `{1}`, ...
    /// * `overwrite` - Whether an existing, different text may be replaced
    ///
    /// # Errors
    /// * `EmptyKey` if `key` is empty
    /// * `MalformedTemplate` if `text` has an unbalanced brace
    /// * `Conflict` if a different text exists and `overwrite` is false
    pub fn register(&self, key: &str, text: &str, overwrite: bool) -> Result<(), TranslationError> {
        if key.is_empty() {
            return Err(TranslationError::EmptyKey);
        }
        if !braces_balanced(text) {
            return Err(TranslationError::MalformedTemplate {
                key: key.to_string(),
                locale: self.locale.code().to_string(),
            });
        }

        let mut messages = self.messages.write();
        match messages.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(text.to_string());
            }
            Entry::Occupied(mut slot) => {
                if slot.get() != text {
                    if !overwrite {
                        return Err(TranslationError::Conflict {
                            key: key.to_string(),
                            locale: self.locale.code().to_string(),
                        });
                    }
                    slot.insert(text.to_string());
                }
            }
        }
        Ok(())
    }

    /// Look up the raw template for a message id.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.messages.read().get(key).cloned()
    }

    /// Check if a message id is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.messages.read().contains_key(key)
    }

    /// Look up a template and fill its positional placeholders.
    ///
    /// `{N}` is replaced by `params[N]`; placeholders without a matching
    /// parameter are left as they are.
    ///
    /// # Returns
    /// * `Some(String)` with the rendered message
    /// * `None` if no template is registered under `key`
    pub fn format(&self, key: &str, params: &[&str]) -> Option<String> {
        let template = self.lookup(key)?;
        let rendered = placeholder_regex().replace_all(&template, |caps: &regex::Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| params.get(index))
                .map(|param| param.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        });
        Some(rendered.into_owned())
    }

    /// Number of registered message ids
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Check if nothing is registered yet
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

/// Check that every `{` is closed by a `}` before the next `{`, and that no `}`
/// appears without an open `{`.
fn braces_balanced(text: &str) -> bool {
    let mut open = false;
    for ch in text.chars() {
        match ch {
            '{' if open => return false,
            '{' => open = true,
            '}' if !open => return false,
            '}' => open = false,
            _ => {}
        }
    }
    !open
}

/// Coordinator holding one [`TranslationContext`] per configured locale.
///
/// The fallback (default) locale is always present.
#[derive(Debug)]
pub struct BundleSet {
    fallback: Arc<TranslationContext>,
    contexts: HashMap<String, Arc<TranslationContext>>,
}

impl BundleSet {
    /// Build the coordinator from the fallback locale and every supported locale.
    ///
    /// A code supplied more than once maps to a single shared context (the
    /// first occurrence wins).
    pub fn new<'a>(fallback: &Locale, locales: impl IntoIterator<Item = &'a Locale>) -> Self {
        let fallback = Arc::new(TranslationContext::new(fallback.clone()));
        let mut contexts = HashMap::new();
        contexts.insert(fallback.locale().code().to_string(), Arc::clone(&fallback));

        for locale in locales {
            contexts
                .entry(locale.code().to_string())
                .or_insert_with(|| Arc::new(TranslationContext::new(locale.clone())));
        }

        Self { fallback, contexts }
    }

    /// Get the context for a locale code.
    pub fn get(&self, code: &str) -> Option<&TranslationContext> {
        self.contexts.get(code).map(Arc::as_ref)
    }

    /// Get the fallback (default locale) context.
    pub fn fallback(&self) -> &TranslationContext {
        &self.fallback
    }

    /// Check if a locale code is configured.
    pub fn contains(&self, code: &str) -> bool {
        self.contexts.contains_key(code)
    }

    /// Iterate over every configured context.
    pub fn iter(&self) -> impl Iterator<Item = &TranslationContext> {
        self.contexts.values().map(Arc::as_ref)
    }

    /// All configured locale codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.contexts.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Number of configured locales
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Always false: the fallback locale is always present
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
