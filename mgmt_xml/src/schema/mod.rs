//! Typed attribute definitions
//!
//! Each construct translator declares the attributes it accepts as
//! [`AttributeDefinition`] constants. A definition knows the parameter name
//! the value is written to, how the raw text is converted and which values
//! are acceptable.

use crate::config::compile_time::grammar::MAX_LIST_ITEMS;
use crate::grammar::Attribute;
use crate::model::{ParamValue, Parameters};
use crate::parsing::error::{ParseError, ParseResult};
use crate::utils::Position;

const BOOLEAN_VALUES: &[&str] = &["true", "false"];

/// How raw attribute text becomes a parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Boolean,
    Int,
    Long,
    /// Whitespace separated list of strings
    List,
    /// One of a closed set of literals
    Enumerated(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDefinition {
    /// Parameter name on the produced command
    pub name: &'static str,
    pub kind: ValueKind,
    pub allow_expression: bool,
    /// Lower bound for numeric kinds
    pub min: Option<i64>,
}

impl AttributeDefinition {
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            allow_expression: true,
            min: None,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, ValueKind::String)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, ValueKind::Boolean)
    }

    pub const fn int(name: &'static str) -> Self {
        Self::new(name, ValueKind::Int)
    }

    pub const fn list(name: &'static str) -> Self {
        Self::new(name, ValueKind::List)
    }

    pub const fn enumerated(name: &'static str, allowed: &'static [&'static str]) -> Self {
        Self::new(name, ValueKind::Enumerated(allowed))
    }

    pub const fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Reject `${...}` expressions for this attribute
    pub const fn literal(mut self) -> Self {
        self.allow_expression = false;
        self
    }

    fn is_expression(&self, raw: &str) -> bool {
        self.allow_expression && is_expression(raw)
    }

    /// Convert one raw value according to this definition
    pub fn parse(&self, raw: &str, attribute: Attribute, position: Position) -> ParseResult<ParamValue> {
        if self.is_expression(raw) {
            return Ok(ParamValue::Expression(raw.to_string()));
        }

        let invalid = |reason: String, allowed: &'static [&'static str]| {
            invalid_value(attribute, raw, reason, allowed, position)
        };

        match self.kind {
            ValueKind::String => Ok(ParamValue::String(raw.to_string())),
            ValueKind::List => Ok(ParamValue::List(split_list(raw))),
            ValueKind::Boolean => {
                if raw.eq_ignore_ascii_case("true") {
                    Ok(ParamValue::Boolean(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Ok(ParamValue::Boolean(false))
                } else {
                    Err(invalid("expected a boolean".to_string(), BOOLEAN_VALUES))
                }
            }
            ValueKind::Int => {
                let value: i32 = raw
                    .trim()
                    .parse()
                    .map_err(|_| invalid("expected an integer".to_string(), &[]))?;
                self.check_min(i64::from(value))
                    .map_err(|min| invalid(format!("must be at least {}", min), &[]))?;
                Ok(ParamValue::Int(value))
            }
            ValueKind::Long => {
                let value: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| invalid("expected a long integer".to_string(), &[]))?;
                self.check_min(value)
                    .map_err(|min| invalid(format!("must be at least {}", min), &[]))?;
                Ok(ParamValue::Long(value))
            }
            ValueKind::Enumerated(allowed) => {
                if allowed.contains(&raw) {
                    Ok(ParamValue::String(raw.to_string()))
                } else {
                    Err(invalid(
                        format!("expected one of {}", allowed.join(", ")),
                        allowed,
                    ))
                }
            }
        }
    }

    fn check_min(&self, value: i64) -> Result<(), i64> {
        match self.min {
            Some(min) if value < min => Err(min),
            _ => Ok(()),
        }
    }

    /// Parse `raw` and store it under this definition's parameter name.
    ///
    /// List kinds append every item in document order.
    pub fn parse_and_set(
        &self,
        raw: &str,
        attribute: Attribute,
        params: &mut Parameters,
        position: Position,
    ) -> ParseResult<()> {
        if self.kind == ValueKind::List {
            return self.parse_and_add_elements(raw, params);
        }
        let value = self.parse(raw, attribute, position)?;
        params.set(self.name, value);
        Ok(())
    }

    fn parse_and_add_elements(&self, raw: &str, params: &mut Parameters) -> ParseResult<()> {
        for item in split_list(raw) {
            let count = params.add_to_list(self.name, item);
            if count > MAX_LIST_ITEMS {
                return Err(ParseError::LimitExceeded {
                    what: format!("'{}' list", self.name),
                    max: MAX_LIST_ITEMS,
                });
            }
        }
        Ok(())
    }
}

fn invalid_value(
    attribute: Attribute,
    raw: &str,
    reason: String,
    allowed: &[&str],
    position: Position,
) -> ParseError {
    ParseError::InvalidAttributeValue {
        attribute: attribute.local_name().to_string(),
        value: raw.to_string(),
        reason,
        allowed: allowed.iter().map(|a| a.to_string()).collect(),
        position,
    }
}

/// True for values of the form `${...}`
pub fn is_expression(raw: &str) -> bool {
    raw.find("${")
        .map(|start| raw[start..].contains('}'))
        .unwrap_or(false)
}

fn split_list(raw: &str) -> Vec<ParamValue> {
    raw.split_ascii_whitespace()
        .map(|item| {
            if is_expression(item) {
                ParamValue::Expression(item.to_string())
            } else {
                ParamValue::String(item.to_string())
            }
        })
        .collect()
}

/// Shrinking set of mandatory attributes for one start tag
#[derive(Debug, Clone)]
pub struct RequiredAttributes {
    missing: Vec<Attribute>,
}

impl RequiredAttributes {
    pub fn new(required: &[Attribute]) -> Self {
        Self {
            missing: required.to_vec(),
        }
    }

    pub fn seen(&mut self, attribute: Attribute) {
        self.missing.retain(|a| *a != attribute);
    }

    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }

    /// Fail naming every attribute that was never seen
    pub fn finish(self, element: &str, position: Position) -> ParseResult<()> {
        if self.missing.is_empty() {
            return Ok(());
        }
        Err(ParseError::MissingRequiredAttributes {
            element: element.to_string(),
            attributes: self
                .missing
                .iter()
                .map(|a| a.local_name().to_string())
                .collect(),
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const EVICTION_TIME: AttributeDefinition = AttributeDefinition::int("eviction-time").with_min(1);
    const REFERRALS: AttributeDefinition =
        AttributeDefinition::enumerated("referrals", &["IGNORE", "FOLLOW", "THROW"]);

    fn at() -> Position {
        Position::new(0, 1, 1)
    }

    #[test]
    fn test_boolean_parsing() {
        let def = AttributeDefinition::boolean("recursive");
        assert_eq!(
            def.parse("TRUE", Attribute::Recursive, at()).unwrap(),
            ParamValue::Boolean(true)
        );
        let err = def.parse("yes", Attribute::Recursive, at()).unwrap_err();
        assert_matches!(err, ParseError::InvalidAttributeValue { ref allowed, .. } if allowed.len() == 2);
    }

    #[test]
    fn test_int_minimum() {
        assert_eq!(
            EVICTION_TIME.parse("900", Attribute::EvictionTime, at()).unwrap(),
            ParamValue::Int(900)
        );
        assert_matches!(
            EVICTION_TIME.parse("0", Attribute::EvictionTime, at()),
            Err(ParseError::InvalidAttributeValue { ref reason, .. }) if reason.contains("at least 1")
        );
        assert_matches!(
            EVICTION_TIME.parse("soon", Attribute::EvictionTime, at()),
            Err(ParseError::InvalidAttributeValue { .. })
        );
    }

    #[test]
    fn test_enumerated_names_all_allowed_values() {
        let err = REFERRALS.parse("ASK", Attribute::Referrals, at()).unwrap_err();
        assert_matches!(err, ParseError::InvalidAttributeValue { allowed, .. } => {
            assert_eq!(allowed, vec!["IGNORE", "FOLLOW", "THROW"]);
        });
    }

    #[test]
    fn test_expressions() {
        assert_eq!(
            EVICTION_TIME.parse("${cache.eviction:900}", Attribute::EvictionTime, at()).unwrap(),
            ParamValue::Expression("${cache.eviction:900}".to_string())
        );

        let literal = AttributeDefinition::string("name").literal();
        assert_eq!(
            literal.parse("${x}", Attribute::Name, at()).unwrap(),
            ParamValue::String("${x}".to_string())
        );
        assert!(!is_expression("$x}"));
    }

    #[test]
    fn test_list_appends_in_order() {
        let def = AttributeDefinition::list("handles-referrals-for");
        let mut params = Parameters::default();
        def.parse_and_set(
            " ldap://a\n\tldap://b ",
            Attribute::HandlesReferralsFor,
            &mut params,
            at(),
        )
        .unwrap();

        let items = params.get("handles-referrals-for").and_then(|v| v.as_list()).unwrap();
        assert_eq!(
            items,
            &[ParamValue::string("ldap://a"), ParamValue::string("ldap://b")]
        );
    }

    #[test]
    fn test_list_limit() {
        let def = AttributeDefinition::list("for-hosts");
        let raw = vec!["h"; MAX_LIST_ITEMS + 1].join(" ");
        let mut params = Parameters::default();
        assert_matches!(
            def.parse_and_set(&raw, Attribute::ForHosts, &mut params, at()),
            Err(ParseError::LimitExceeded { .. })
        );
    }

    #[test]
    fn test_required_attributes_report_every_missing_name() {
        let mut required = RequiredAttributes::new(&[Attribute::Name, Attribute::Url]);
        assert!(!required.is_satisfied());
        let err = required.clone().finish("ldap", at()).unwrap_err();
        assert_matches!(err, ParseError::MissingRequiredAttributes { attributes, .. } => {
            assert_eq!(attributes, vec!["name", "url"]);
        });

        required.seen(Attribute::Url);
        required.seen(Attribute::Name);
        assert!(required.finish("ldap", at()).is_ok());
    }
}
