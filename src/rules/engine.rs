//! Tag-driven rule engine.
//!
//! Rules are read from each field descriptor's comma-separated tag string,
//! e.g. `"required,email"` or `"omitempty,min=3,max=20"`. Evaluation of a
//! field stops at its first failing rule. Nested records and lists of
//! records are walked and their namespaces qualified: `User.Address.City`,
//! `Order.Items[0].Sku`.
//!
//! Supported rules: `required`, `omitempty`, `email`, `min=N`, `max=N`,
//! `len=N`, `oneof=a b c`.

use super::{RuleEngine, ValueKind, Violation};
use crate::bundle::TranslationContext;
use crate::error::EngineError;
use crate::metadata::{FieldDescriptor, FieldValue, Record, TypeDescriptor};
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Built-in rule engine driven by field descriptor tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagEngine;

impl TagEngine {
    /// Create a tag engine.
    pub fn new() -> Self {
        Self
    }

    fn walk(
        &self,
        record: &dyn Record,
        descriptor: &TypeDescriptor,
        prefix: &str,
        violations: &mut Vec<Violation>,
    ) -> Result<(), EngineError> {
        for field in descriptor.fields() {
            let namespace = format!("{}.{}", prefix, field.name());
            let value = record.field(field.name());

            if let Some(violation) = check_field(descriptor, field, &namespace, &value)? {
                violations.push(violation);
            }

            let Some(nested) = field.nested_descriptor() else {
                continue;
            };
            match &value {
                FieldValue::Record(inner) => self.walk(*inner, nested, &namespace, violations)?,
                FieldValue::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        if let FieldValue::Record(inner) = item {
                            let item_namespace = format!("{}[{}]", namespace, index);
                            self.walk(*inner, nested, &item_namespace, violations)?;
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl RuleEngine for TagEngine {
    fn evaluate(
        &self,
        data: &dyn Record,
        descriptor: &TypeDescriptor,
    ) -> Result<Vec<Violation>, EngineError> {
        let mut violations = Vec::new();
        self.walk(data, descriptor, descriptor.name(), &mut violations)?;
        Ok(violations)
    }

    fn render(&self, violation: &Violation, ctx: &TranslationContext) -> String {
        let key = template_key(&violation.rule, violation.kind);
        let params = [violation.field.as_str(), violation.param.as_deref().unwrap_or("")];
        ctx.format(&key, &params)
            .unwrap_or_else(|| default_message(violation))
    }
}

/// Message used when a locale has no template for a rule.
fn default_message(violation: &Violation) -> String {
    format!(
        "Key: '{}' Error:Field validation for '{}' failed on the '{}' tag",
        violation.namespace, violation.field, violation.rule
    )
}

/// Message id of the template for a rule; size rules depend on the value kind.
fn template_key(rule: &str, kind: ValueKind) -> String {
    match rule {
        "min" | "max" | "len" => {
            let suffix = match kind {
                ValueKind::Number => "number",
                ValueKind::List => "items",
                _ => "string",
            };
            format!("{}-{}", rule, suffix)
        }
        _ => rule.to_string(),
    }
}

/// Split a tag string into `(rule, param)` pairs.
fn parse_rules(tags: &str) -> impl Iterator<Item = (&str, Option<&str>)> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| match tag.split_once('=') {
            Some((rule, param)) => (rule.trim(), Some(param.trim())),
            None => (tag, None),
        })
}

fn kind_of(value: &FieldValue<'_>) -> ValueKind {
    match value {
        FieldValue::Absent => ValueKind::Absent,
        FieldValue::Bool(_) => ValueKind::Bool,
        FieldValue::Int(_) | FieldValue::Float(_) => ValueKind::Number,
        FieldValue::Str(_) => ValueKind::String,
        FieldValue::Record(_) => ValueKind::Record,
        FieldValue::List(_) => ValueKind::List,
    }
}

/// Evaluate one field's rules, returning its first violation.
fn check_field(
    owner: &TypeDescriptor,
    field: &FieldDescriptor,
    namespace: &str,
    value: &FieldValue<'_>,
) -> Result<Option<Violation>, EngineError> {
    for (rule, param) in parse_rules(field.rule_tags()) {
        let passed = match rule {
            "required" => !value.is_zero(),
            "omitempty" if value.is_zero() => return Ok(None),
            "omitempty" => true,
            // Only `required` applies to an unset value
            _ if matches!(value, FieldValue::Absent) => continue,
            "email" => match value {
                FieldValue::Str(text) => email_regex().is_match(text),
                _ => return Err(unsupported(namespace, rule)),
            },
            "min" | "max" | "len" => {
                let limit = parse_limit(namespace, rule, param)?;
                let size = measure(value).ok_or_else(|| unsupported(namespace, rule))?;
                match rule {
                    "min" => size >= limit,
                    "max" => size <= limit,
                    _ => size == limit,
                }
            }
            "oneof" => {
                let options = param.ok_or_else(|| invalid_param(namespace, rule, ""))?;
                let candidate = match value {
                    FieldValue::Str(text) => text.to_string(),
                    FieldValue::Int(number) => number.to_string(),
                    _ => return Err(unsupported(namespace, rule)),
                };
                options.split_whitespace().any(|option| option == candidate)
            }
            _ => {
                return Err(EngineError::UnknownRule {
                    namespace: namespace.to_string(),
                    rule: rule.to_string(),
                })
            }
        };

        if !passed {
            return Ok(Some(Violation {
                namespace: namespace.to_string(),
                owner: owner.name().to_string(),
                field: field.name().to_string(),
                rule: rule.to_string(),
                param: param.map(str::to_string),
                kind: kind_of(value),
            }));
        }
    }
    Ok(None)
}

/// Size of a value for `min`/`max`/`len`: character count, item count, or the number itself.
fn measure(value: &FieldValue<'_>) -> Option<f64> {
    match value {
        FieldValue::Str(text) => Some(text.chars().count() as f64),
        FieldValue::List(items) => Some(items.len() as f64),
        FieldValue::Int(number) => Some(*number as f64),
        FieldValue::Float(number) => Some(*number),
        _ => None,
    }
}

fn parse_limit(namespace: &str, rule: &str, param: Option<&str>) -> Result<f64, EngineError> {
    let raw = param.unwrap_or("");
    raw.parse::<f64>()
        .map_err(|_| invalid_param(namespace, rule, raw))
}

fn invalid_param(namespace: &str, rule: &str, param: &str) -> EngineError {
    EngineError::InvalidParam {
        namespace: namespace.to_string(),
        rule: rule.to_string(),
        param: param.to_string(),
    }
}

fn unsupported(namespace: &str, rule: &str) -> EngineError {
    EngineError::UnsupportedKind {
        namespace: namespace.to_string(),
        rule: rule.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::metadata::FieldDescriptor;

    struct Item {
        sku: String,
    }

    impl Record for Item {
        fn descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                TypeDescriptor::of::<Item>("Item", vec![FieldDescriptor::new("Sku").rules("len=6")])
            })
        }

        fn field(&self, name: &str) -> FieldValue<'_> {
            match name {
                "Sku" => FieldValue::from(&self.sku),
                _ => FieldValue::Absent,
            }
        }
    }

    struct Order {
        email: String,
        quantity: i64,
        coupon: Option<String>,
        status: String,
        items: Vec<Item>,
        gift: Option<Item>,
    }

    impl Default for Order {
        fn default() -> Self {
            Self {
                email: "buyer@example.com".to_string(),
                quantity: 1,
                coupon: None,
                status: "open".to_string(),
                items: vec![Item {
                    sku: "ABC123".to_string(),
                }],
                gift: None,
            }
        }
    }

    impl Record for Order {
        fn descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                TypeDescriptor::of::<Order>(
                    "Order",
                    vec![
                        FieldDescriptor::new("Email").rules("required,email"),
                        FieldDescriptor::new("Quantity").rules("min=1,max=10"),
                        FieldDescriptor::new("Coupon").rules("omitempty,min=4"),
                        FieldDescriptor::new("Status").rules("oneof=open closed"),
                        FieldDescriptor::new("Items")
                            .rules("required,max=3")
                            .nested::<Item>(),
                        FieldDescriptor::new("Gift").nested::<Item>(),
                    ],
                )
            })
        }

        fn field(&self, name: &str) -> FieldValue<'_> {
            match name {
                "Email" => FieldValue::from(&self.email),
                "Quantity" => FieldValue::from(self.quantity),
                "Coupon" => FieldValue::from(self.coupon.as_deref()),
                "Status" => FieldValue::from(&self.status),
                "Items" => FieldValue::records(&self.items),
                "Gift" => FieldValue::optional_record(self.gift.as_ref()),
                _ => FieldValue::Absent,
            }
        }
    }

    struct Misconfigured {
        flag: bool,
    }

    impl Record for Misconfigured {
        fn descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                TypeDescriptor::of::<Misconfigured>(
                    "Misconfigured",
                    vec![FieldDescriptor::new("Flag").rules("email")],
                )
            })
        }

        fn field(&self, name: &str) -> FieldValue<'_> {
            match name {
                "Flag" => FieldValue::from(self.flag),
                _ => FieldValue::Absent,
            }
        }
    }

    struct Contact {
        email: Option<String>,
        nickname: Option<String>,
    }

    impl Record for Contact {
        fn descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                TypeDescriptor::of::<Contact>(
                    "Contact",
                    vec![
                        FieldDescriptor::new("Email").rules("email,required"),
                        FieldDescriptor::new("Nickname").rules("min=3,max=20,required"),
                    ],
                )
            })
        }

        fn field(&self, name: &str) -> FieldValue<'_> {
            match name {
                "Email" => FieldValue::from(self.email.as_deref()),
                "Nickname" => FieldValue::from(self.nickname.as_deref()),
                _ => FieldValue::Absent,
            }
        }
    }

    fn evaluate(order: &Order) -> Vec<Violation> {
        TagEngine::new()
            .evaluate(order, Order::descriptor())
            .expect("Should evaluate")
    }

    // ==================== evaluate Tests ====================

    #[test]
    fn test_valid_order() {
        assert!(evaluate(&Order::default()).is_empty());
    }

    #[test]
    fn test_required_stops_at_first_failure() {
        let order = Order {
            email: String::new(),
            ..Order::default()
        };
        let violations = evaluate(&order);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].namespace, "Order.Email");
        assert_eq!(violations[0].owner, "Order");
        assert_eq!(violations[0].rule, "required");
    }

    #[test]
    fn test_required_applies_to_absent_value_in_any_position() {
        let contact = Contact {
            email: None,
            nickname: None,
        };
        let violations = TagEngine::new()
            .evaluate(&contact, Contact::descriptor())
            .expect("Should evaluate");

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].namespace, "Contact.Email");
        assert_eq!(violations[0].rule, "required");
        assert_eq!(violations[0].kind, ValueKind::Absent);
        assert_eq!(violations[1].namespace, "Contact.Nickname");
        assert_eq!(violations[1].rule, "required");
    }

    #[test]
    fn test_present_value_checks_rules_before_required() {
        let contact = Contact {
            email: Some("nope".to_string()),
            nickname: Some("ann".to_string()),
        };
        let violations = TagEngine::new()
            .evaluate(&contact, Contact::descriptor())
            .expect("Should evaluate");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].namespace, "Contact.Email");
        assert_eq!(violations[0].rule, "email");
    }

    #[test]
    fn test_email_rule() {
        let order = Order {
            email: "not-an-email".to_string(),
            ..Order::default()
        };
        let violations = evaluate(&order);
        assert_eq!(violations[0].rule, "email");
        assert_eq!(violations[0].kind, ValueKind::String);
    }

    #[test]
    fn test_numeric_range() {
        let order = Order {
            quantity: 11,
            ..Order::default()
        };
        let violations = evaluate(&order);
        assert_eq!(violations[0].rule, "max");
        assert_eq!(violations[0].param.as_deref(), Some("10"));
        assert_eq!(violations[0].kind, ValueKind::Number);
    }

    #[test]
    fn test_omitempty_skips_unset_values() {
        let order = Order {
            coupon: Some(String::new()),
            ..Order::default()
        };
        assert!(evaluate(&order).is_empty());

        let order = Order {
            coupon: Some("AB".to_string()),
            ..Order::default()
        };
        let violations = evaluate(&order);
        assert_eq!(violations[0].namespace, "Order.Coupon");
        assert_eq!(violations[0].rule, "min");
    }

    #[test]
    fn test_oneof_rule() {
        let order = Order {
            status: "lost".to_string(),
            ..Order::default()
        };
        let violations = evaluate(&order);
        assert_eq!(violations[0].rule, "oneof");
        assert_eq!(violations[0].param.as_deref(), Some("open closed"));
    }

    #[test]
    fn test_list_items_are_walked_with_indexed_namespace() {
        let order = Order {
            items: vec![
                Item {
                    sku: "ABC123".to_string(),
                },
                Item {
                    sku: "X".to_string(),
                },
            ],
            ..Order::default()
        };
        let violations = evaluate(&order);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].namespace, "Order.Items[1].Sku");
        assert_eq!(violations[0].owner, "Item");
        assert_eq!(violations[0].field, "Sku");
    }

    #[test]
    fn test_list_size_rules() {
        let order = Order {
            items: Vec::new(),
            ..Order::default()
        };
        let violations = evaluate(&order);
        assert_eq!(violations[0].namespace, "Order.Items");
        assert_eq!(violations[0].kind, ValueKind::List);
    }

    #[test]
    fn test_optional_nested_record() {
        assert!(evaluate(&Order::default()).is_empty());

        let order = Order {
            gift: Some(Item {
                sku: "TOO-LONG".to_string(),
            }),
            ..Order::default()
        };
        let violations = evaluate(&order);
        assert_eq!(violations[0].namespace, "Order.Gift.Sku");
    }

    #[test]
    fn test_unsupported_kind_is_engine_error() {
        let err = TagEngine::new()
            .evaluate(&Misconfigured { flag: true }, Misconfigured::descriptor())
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::UnsupportedKind {
                namespace: "Misconfigured.Flag".to_string(),
                rule: "email".to_string()
            }
        );
    }

    // ==================== Rule Parsing Tests ====================

    #[test]
    fn test_parse_rules() {
        let rules: Vec<_> = parse_rules(" required , min=3,, oneof=a b ").collect();
        assert_eq!(
            rules,
            vec![("required", None), ("min", Some("3")), ("oneof", Some("a b"))]
        );
    }

    #[test]
    fn test_invalid_limit() {
        let err = parse_limit("Order.Quantity", "min", Some("many")).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParam { ref param, .. } if param == "many"));
        assert!(parse_limit("Order.Quantity", "min", None).is_err());
    }

    #[test]
    fn test_template_key() {
        assert_eq!(template_key("required", ValueKind::Absent), "required");
        assert_eq!(template_key("min", ValueKind::String), "min-string");
        assert_eq!(template_key("max", ValueKind::Number), "max-number");
        assert_eq!(template_key("len", ValueKind::List), "len-items");
    }

    // ==================== render Tests ====================

    #[test]
    fn test_render_with_template() {
        let ctx = TranslationContext::new(Locale::english());
        crate::rules::en::register_defaults(&ctx).unwrap();

        let order = Order {
            quantity: 0,
            ..Order::default()
        };
        let violation = &evaluate(&order)[0];
        assert_eq!(
            TagEngine::new().render(violation, &ctx),
            "Quantity must be 1 or greater"
        );
    }

    #[test]
    fn test_render_without_template_uses_default_message() {
        let ctx = TranslationContext::new(Locale::new("fr", "French", "Français"));
        let order = Order {
            email: String::new(),
            ..Order::default()
        };
        let violation = &evaluate(&order)[0];
        assert_eq!(
            TagEngine::new().render(violation, &ctx),
            "Key: 'Order.Email' Error:Field validation for 'Email' failed on the 'required' tag"
        );
    }
}
