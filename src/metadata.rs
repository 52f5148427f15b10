//! Record metadata: per-type field descriptors and field value access.
//!
//! A type takes part in validation by implementing [`Record`]. Its
//! [`TypeDescriptor`] is computed once per process (usually in a `OnceLock`
//! static) and lists every field with its rule tags, its optional translation
//! spec, and, for fields holding another record, that record's descriptor.
//!
//! ```rust,ignore
//! impl Record for User {
//!     fn descriptor() -> &'static TypeDescriptor {
//!         static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
//!         DESCRIPTOR.get_or_init(|| {
//!             TypeDescriptor::of::<User>("User", vec![
//!                 FieldDescriptor::new("FirstName")
//!                     .rules("required")
//!                     .translations("en:First Name;pt:Primeiro Nome"),
//!             ])
//!         })
//!     }
//!
//!     fn field(&self, name: &str) -> FieldValue<'_> {
//!         match name {
//!             "FirstName" => FieldValue::from(&self.first_name),
//!             _ => FieldValue::Absent,
//!         }
//!     }
//! }
//! ```

use std::any::TypeId;

/// A structured record that can be validated.
pub trait Record: 'static {
    /// The static field table for this type.
    fn descriptor() -> &'static TypeDescriptor
    where
        Self: Sized;

    /// Current value of a field, by its descriptor name.
    ///
    /// Unknown names and empty optionals return [`FieldValue::Absent`].
    fn field(&self, name: &str) -> FieldValue<'_>;
}

impl<T: Record> Record for Box<T> {
    fn descriptor() -> &'static TypeDescriptor {
        T::descriptor()
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        (**self).field(name)
    }
}

/// Static description of a record type.
#[derive(Debug)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Describe the record type `T`.
    ///
    /// # Arguments
    /// * `name` - The type name used in namespaces and message ids (e.g., "User")
    /// * `fields` - Field descriptors, in declaration order
    pub fn of<T: 'static>(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
            fields,
        }
    }

    /// Identity of the described type
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Type name (e.g., "User")
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Field descriptors in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Static description of one field of a record.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    rules: &'static str,
    translations: Option<&'static str>,
    nested: Option<fn() -> &'static TypeDescriptor>,
}

impl FieldDescriptor {
    /// Describe a field with no rules and no translations.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: "",
            translations: None,
            nested: None,
        }
    }

    /// Set the comma-separated rule tags (e.g., "required,email").
    pub fn rules(mut self, rules: &'static str) -> Self {
        self.rules = rules;
        self
    }

    /// Set the translation spec (e.g., "en:First Name;pt:Primeiro Nome").
    pub fn translations(mut self, spec: &'static str) -> Self {
        self.translations = Some(spec);
        self
    }

    /// Mark the field as holding a `T` record, directly or behind `Option`/`Box`.
    pub fn nested<T: Record>(mut self) -> Self {
        self.nested = Some(T::descriptor as fn() -> &'static TypeDescriptor);
        self
    }

    /// Field name (e.g., "FirstName")
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Raw rule tags
    pub fn rule_tags(&self) -> &'static str {
        self.rules
    }

    /// Raw translation spec, if any
    pub fn translation_spec(&self) -> Option<&'static str> {
        self.translations
    }

    /// Descriptor of the nested record type, if the field holds one
    pub fn nested_descriptor(&self) -> Option<&'static TypeDescriptor> {
        self.nested.map(|descriptor| descriptor())
    }
}

/// Parse a field translation spec into ordered `(locale, display name)` pairs.
///
/// Grammar: `locale ":" name (";" locale ":" name)*`. Whitespace around each
/// token is trimmed, only the first `:` splits an entry, and entries without
/// a `:` are skipped.
pub fn parse_translation_spec(spec: &str) -> Vec<(&str, &str)> {
    spec.split(';')
        .filter_map(|entry| entry.trim().split_once(':'))
        .map(|(code, name)| (code.trim(), name.trim()))
        .collect()
}

/// The value of a record field, as seen by a rule engine.
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    /// No value (unset optional or unknown field)
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
    /// A nested record
    Record(&'a dyn Record),
    /// A collection of values
    List(Vec<FieldValue<'a>>),
}

impl std::fmt::Debug for dyn Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Record")
    }
}

impl<'a> FieldValue<'a> {
    /// Wrap a nested record.
    pub fn record<T: Record>(value: &'a T) -> Self {
        FieldValue::Record(value)
    }

    /// Wrap an optional nested record.
    pub fn optional_record<T: Record>(value: Option<&'a T>) -> Self {
        match value {
            Some(value) => FieldValue::Record(value),
            None => FieldValue::Absent,
        }
    }

    /// Wrap a collection of nested records.
    pub fn records<T: Record>(values: &'a [T]) -> Self {
        FieldValue::List(values.iter().map(|value| FieldValue::Record(value)).collect())
    }

    /// Wrap a collection of plain values.
    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldValue<'a>>,
    {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }

    /// Check if this is the zero value of its kind.
    ///
    /// Absent, `false`, `0`, `""` and empty lists are zero; records never are.
    pub fn is_zero(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Bool(value) => !value,
            FieldValue::Int(value) => *value == 0,
            FieldValue::Float(value) => *value == 0.0,
            FieldValue::Str(value) => value.is_empty(),
            FieldValue::Record(_) => false,
            FieldValue::List(values) => values.is_empty(),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Str(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Str(value.as_str())
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue<'_> {
    fn from(value: u32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Absent, Into::into)
    }
}
