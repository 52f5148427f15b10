//! Translation registry: one-time registration of field display names.
//!
//! The first time a record type is validated, its descriptor (and every
//! nested record descriptor reachable from it) is walked and each declared
//! `locale:display name` pair is registered into the matching locale's
//! catalog under the message id `TypeName.FieldName`.
//!
//! The set of processed types is owned by one validator instance. Membership
//! is checked and set atomically; the walk itself runs without holding the
//! lock, so two threads racing on the same new type may both walk it. That
//! is harmless because display-name registration overwrites idempotently.

use crate::bundle::BundleSet;
use crate::error::TranslationError;
use crate::metadata::{parse_translation_spec, TypeDescriptor};
use parking_lot::Mutex;
use std::any::TypeId;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Build the message id for a field display name (e.g., "User.FirstName").
pub fn message_id(type_name: &str, field_name: &str) -> String {
    format!("{}.{}", type_name, field_name)
}

/// What [`TranslationRegistry::ensure_registered`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The type was new and its fields were walked
    Walked,
    /// The type had already been processed; nothing was done
    AlreadyRegistered,
}

/// Memo of record types whose field translations have been registered.
#[derive(Debug, Default)]
pub struct TranslationRegistry {
    registered: Mutex<HashSet<TypeId>>,
}

impl TranslationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the field display names of a record type are registered.
    ///
    /// The type is marked as processed before the walk starts. If the walk
    /// fails part-way, the error is returned and the type stays marked, so
    /// later calls do not retry it.
    ///
    /// # Arguments
    /// * `descriptor` - Descriptor of the top-level record type
    /// * `bundles` - Catalogs to register display names into
    ///
    /// # Returns
    /// * `Ok(Registration::Walked)` if this call performed the walk
    /// * `Ok(Registration::AlreadyRegistered)` if the type was already processed
    /// * `Err` with the first registration failure
    pub fn ensure_registered(
        &self,
        descriptor: &'static TypeDescriptor,
        bundles: &BundleSet,
    ) -> Result<Registration, TranslationError> {
        if !self.registered.lock().insert(descriptor.id()) {
            return Ok(Registration::AlreadyRegistered);
        }

        debug!("Registering field translations for {}", descriptor.name());
        let mut path = Vec::new();
        register_fields(descriptor, bundles, &mut path).map_err(|e| {
            warn!(
                "Field translation registration failed for {}: {}",
                descriptor.name(),
                e
            );
            e
        })?;

        Ok(Registration::Walked)
    }

    /// Check if a record type has been processed.
    pub fn is_registered(&self, id: TypeId) -> bool {
        self.registered.lock().contains(&id)
    }

    /// Number of processed top-level record types
    pub fn len(&self) -> usize {
        self.registered.lock().len()
    }

    /// Check if no type has been processed yet
    pub fn is_empty(&self) -> bool {
        self.registered.lock().is_empty()
    }
}

/// Register the display names of one record type, then recurse into nested records.
///
/// `path` holds the types currently being walked; a nested type already on
/// the path is not entered again, which keeps self-referential records finite.
fn register_fields(
    descriptor: &'static TypeDescriptor,
    bundles: &BundleSet,
    path: &mut Vec<TypeId>,
) -> Result<(), TranslationError> {
    path.push(descriptor.id());

    for field in descriptor.fields() {
        if let Some(spec) = field.translation_spec() {
            for (code, display_name) in parse_translation_spec(spec) {
                let Some(ctx) = bundles.get(code) else {
                    continue;
                };
                let key = message_id(descriptor.name(), field.name());
                ctx.register(&key, display_name, true)?;
                debug!("Registered {} = {:?} for locale {}", key, display_name, code);
            }
        }

        if let Some(nested) = field.nested_descriptor() {
            if path.contains(&nested.id()) {
                debug!(
                    "Skipping {}.{}: {} is already being registered",
                    descriptor.name(),
                    field.name(),
                    nested.name()
                );
                continue;
            }
            register_fields(nested, bundles, path)?;
        }
    }

    path.pop();
    Ok(())
}
