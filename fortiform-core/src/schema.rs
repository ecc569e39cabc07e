//! Schema - Field descriptor tables for resources
//!
//! Each resource kind declares an ordered table of attribute descriptors.
//! The table drives validation and both directions of the wire mapping.

use std::fmt;

use heck::ToKebabCase;

use crate::resource::{Attributes, Value, lookup};

/// Attribute type
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Ordered list of records, each described by the nested descriptors
    Table(Vec<AttributeSchema>),
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Table(fields), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    validate_record(fields, item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, AttributeType::Table(_))
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Table(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
                format!("Table<{}>", names.join(", "))
            }
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

fn validate_record(fields: &[AttributeSchema], item: &Value) -> Result<(), TypeError> {
    let Value::Map(record) = item else {
        return Err(TypeError::TypeMismatch {
            expected: "Map".to_string(),
            got: item.type_name(),
        });
    };
    for (key, value) in record {
        if let Some(field) = fields.iter().find(|f| &f.name == key) {
            field.validate(value).map_err(|e| TypeError::MapValueError {
                key: key.clone(),
                inner: Box::new(e),
            })?;
        }
    }
    Ok(())
}

/// Value constraint checked at validation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// String byte length within `min..=max`
    StringLen { min: usize, max: usize },
    /// Integer within `min..=max`
    IntRange { min: i64, max: i64 },
    /// Integer within `min..=max`, or exactly zero
    IntRangeOrZero { min: i64, max: i64 },
}

impl Constraint {
    pub fn check(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (Constraint::StringLen { min, max }, Value::String(s)) => {
                if (*min..=*max).contains(&s.len()) {
                    Ok(())
                } else {
                    Err(TypeError::ValidationFailed {
                        message: format!(
                            "expected length between {} and {}, got {}",
                            min,
                            max,
                            s.len()
                        ),
                    })
                }
            }
            (Constraint::IntRange { min, max }, Value::Int(n)) => {
                if (*min..=*max).contains(n) {
                    Ok(())
                } else {
                    Err(TypeError::ValidationFailed {
                        message: format!("expected value between {} and {}, got {}", min, max, n),
                    })
                }
            }
            (Constraint::IntRangeOrZero { min, max }, Value::Int(n)) => {
                if *n == 0 || (*min..=*max).contains(n) {
                    Ok(())
                } else {
                    Err(TypeError::ValidationFailed {
                        message: format!(
                            "expected 0 or a value between {} and {}, got {}",
                            min, max, n
                        ),
                    })
                }
            }
            // Type mismatches are reported by AttributeType::validate
            _ => Ok(()),
        }
    }
}

/// Rule deciding whether a present value counts as "set" in the config tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Presence {
    /// Set only when present and not the zero value of its type
    #[default]
    NonZero,
    /// Set whenever present, zero values included
    Exists,
}

/// Type error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Attribute '{name}': {inner}")]
    AttributeError { name: String, inner: Box<TypeError> },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },
}

/// Attribute schema (one field descriptor)
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSchema {
    /// Config key (snake_case)
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Value may be filled in by the server
    pub computed: bool,
    /// Value is only ever read from the server
    pub read_only: bool,
    /// Changing the value requires replacing the resource
    pub force_new: bool,
    pub constraint: Option<Constraint>,
    pub presence: Presence,
    pub description: Option<String>,
    /// Wire key (hyphenated); `None` for fields that never reach the API
    pub provider_name: Option<String>,
}

impl AttributeSchema {
    /// Create a descriptor whose wire key is the kebab-cased config key
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        let name = name.into();
        let provider_name = Some(name.to_kebab_case());
        Self {
            name,
            attr_type,
            required: false,
            computed: false,
            read_only: false,
            force_new: false,
            constraint: None,
            presence: Presence::default(),
            description: None,
            provider_name,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.computed = true;
        self.read_only = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Count zero values as set (e.g. a TTL where 0 means "disabled")
    pub fn zero_is_set(mut self) -> Self {
        self.presence = Presence::Exists;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Keep the field in the config tree only; never send or read it
    pub fn local_only(mut self) -> Self {
        self.provider_name = None;
        self
    }

    pub fn wire_name(&self) -> Option<&str> {
        self.provider_name.as_deref()
    }

    /// Whether a write can change this field on the server
    pub fn is_settable(&self) -> bool {
        self.provider_name.is_some() && !self.read_only
    }

    /// Whether the value at `path` counts as explicitly set
    pub fn is_set(&self, attributes: &Attributes, path: &str) -> bool {
        match lookup(attributes, path) {
            Some(value) => match self.presence {
                Presence::NonZero => !value.is_zero(),
                Presence::Exists => true,
            },
            None => false,
        }
    }

    /// Check type and constraint of a value
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        self.attr_type.validate(value)?;
        if let Some(constraint) = &self.constraint {
            constraint.check(value)?;
        }
        Ok(())
    }
}

/// Resource schema (the descriptor table of one resource kind)
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSchema {
    pub resource_type: String,
    /// Descriptors in declaration order
    pub attributes: Vec<AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: Vec::new(),
            description: None,
        }
    }

    /// Add a descriptor, replacing an earlier one with the same name
    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        match self.attributes.iter_mut().find(|a| a.name == schema.name) {
            Some(existing) => *existing = schema,
            None => self.attributes.push(schema),
        }
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Descriptors that reach the wire
    pub fn wired(&self) -> impl Iterator<Item = &AttributeSchema> {
        self.attributes.iter().filter(|a| a.provider_name.is_some())
    }

    /// Validate resource attributes
    pub fn validate(&self, attributes: &Attributes) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        // Check required attributes
        for schema in &self.attributes {
            if schema.required && !attributes.contains_key(&schema.name) {
                errors.push(TypeError::MissingRequired {
                    name: schema.name.clone(),
                });
            }
        }

        // Type and constraint check each attribute
        for schema in &self.attributes {
            if let Some(value) = attributes.get(&schema.name)
                && let Err(e) = schema.validate(value)
            {
                errors.push(TypeError::AttributeError {
                    name: schema.name.clone(),
                    inner: Box::new(e),
                });
            }
        }
        // Unknown attributes are allowed (for flexibility)

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Helper functions for common field shapes
pub mod types {
    use super::*;

    /// Table of records with a single `name` key (interface, address, user lists)
    pub fn name_table(max_len: usize) -> AttributeType {
        AttributeType::Table(vec![
            AttributeSchema::new("name", AttributeType::String)
                .computed()
                .with_constraint(Constraint::StringLen {
                    min: 0,
                    max: max_len,
                }),
        ])
    }

    /// Table of records with a single integer `id` key
    pub fn id_table() -> AttributeType {
        AttributeType::Table(vec![
            AttributeSchema::new("id", AttributeType::Int).computed(),
        ])
    }

    /// String with a maximum byte length
    pub fn bounded_string(name: &str, max_len: usize) -> AttributeSchema {
        AttributeSchema::new(name, AttributeType::String).with_constraint(Constraint::StringLen {
            min: 0,
            max: max_len,
        })
    }

    /// Integer within an inclusive range
    pub fn int_between(name: &str, min: i64, max: i64) -> AttributeSchema {
        AttributeSchema::new(name, AttributeType::Int)
            .with_constraint(Constraint::IntRange { min, max })
    }
}
