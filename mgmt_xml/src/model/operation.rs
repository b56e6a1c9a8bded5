//! Add commands and their parameters
use super::address::PathAddress;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the only verb the translator emits
pub const ADD: &str = "add";

/// Typed parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    String(String),
    Boolean(bool),
    Int(i32),
    Long(i64),
    List(Vec<ParamValue>),
    /// Unresolved `${...}` expression, resolved by the executor
    Expression(String),
}

impl ParamValue {
    pub fn string(value: &str) -> Self {
        Self::String(value.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Expression(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{}\"", s),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Long(l) => write!(f, "{}L", l),
            Self::Expression(e) => write!(f, "expression \"{}\"", e),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i32(*i),
            Self::Long(l) => serializer.serialize_i64(*l),
            Self::Expression(e) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("EXPRESSION_VALUE", e)?;
                map.end()
            }
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Named parameters of a command, kept in name order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters {
    values: BTreeMap<String, ParamValue>,
}

impl Parameters {
    pub fn set(&mut self, name: &str, value: ParamValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Append to a list parameter, creating it on first use
    pub fn add_to_list(&mut self, name: &str, value: ParamValue) -> usize {
        let entry = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| ParamValue::List(Vec::new()));

        match entry {
            ParamValue::List(items) => {
                items.push(value);
                items.len()
            }
            other => {
                let previous = std::mem::replace(other, ParamValue::List(Vec::new()));
                *other = ParamValue::List(vec![previous, value]);
                2
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A fully addressed `add` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub address: PathAddress,
    pub name: &'static str,
    pub params: Parameters,
}

impl Operation {
    pub fn add(address: PathAddress) -> Self {
        Self {
            address,
            name: ADD,
            params: Parameters::default(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Key of the last address segment, e.g. `security-realm`
    pub fn kind(&self) -> &str {
        self.address.last().map(|e| e.key.as_str()).unwrap_or("root")
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.name)?;
        if !self.params.is_empty() {
            f.write_str("(")?;
            for (i, (name, value)) in self.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}={}", name, value)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.params.len() + 2))?;
        map.serialize_entry("operation", self.name)?;
        map.serialize_entry("address", &self.address)?;
        for (name, value) in self.params.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A command whose address is still relative to an owner that is not final
///
/// The only way to turn it into an [`Operation`] is [`PendingOperation::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    relative: PathAddress,
    pub params: Parameters,
}

impl PendingOperation {
    pub fn new(relative: PathAddress) -> Self {
        Self {
            relative,
            params: Parameters::default(),
        }
    }

    pub fn relative_address(&self) -> &PathAddress {
        &self.relative
    }

    /// Prefix the owner's absolute address onto the relative segments
    pub fn resolve(self, owner: &PathAddress) -> Operation {
        Operation {
            address: self.relative.prefixed_by(owner),
            name: ADD,
            params: self.params,
        }
    }
}
