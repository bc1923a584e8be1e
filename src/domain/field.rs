//! Field definitions: one column of the schema being built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::policy::ParameterPolicy;

/// Column type understood by the generation service
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Int,
    Double,
    String,
    Name,
}

impl FieldType {
    /// All types, in the order a type picker lists them
    pub const ALL: [FieldType; 4] = [
        FieldType::Int,
        FieldType::Double,
        FieldType::String,
        FieldType::Name,
    ];

    /// Wire name used in the request body
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::Double => "double",
            FieldType::String => "string",
            FieldType::Name => "name",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "int" => Ok(FieldType::Int),
            "double" => Ok(FieldType::Double),
            "string" => Ok(FieldType::String),
            "name" => Ok(FieldType::Name),
            other => Err(format!(
                "unknown field type '{}' (expected int, double, string or name)",
                other
            )),
        }
    }
}

/// Name of a single type-specific parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterName {
    Min,
    Max,
    Length,
}

impl ParameterName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterName::Min => "min",
            ParameterName::Max => "max",
            ParameterName::Length => "length",
        }
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific parameters of a field.
///
/// `Int` and `Double` share the numeric range shape, `String` carries a
/// length and `Name` has nothing to configure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldParameters {
    Range { min: i32, max: i32 },
    Length { length: i32 },
    None,
}

impl FieldParameters {
    /// Read a parameter value, if this shape has it
    pub fn get(&self, name: ParameterName) -> Option<i32> {
        match (self, name) {
            (FieldParameters::Range { min, .. }, ParameterName::Min) => Some(*min),
            (FieldParameters::Range { max, .. }, ParameterName::Max) => Some(*max),
            (FieldParameters::Length { length }, ParameterName::Length) => Some(*length),
            _ => None,
        }
    }

    /// Overwrite a parameter value. Returns false if this shape has no such parameter.
    pub(crate) fn set(&mut self, name: ParameterName, value: i32) -> bool {
        match (self, name) {
            (FieldParameters::Range { min, .. }, ParameterName::Min) => *min = value,
            (FieldParameters::Range { max, .. }, ParameterName::Max) => *max = value,
            (FieldParameters::Length { length }, ParameterName::Length) => *length = value,
            _ => return false,
        }
        true
    }
}

/// One row of the schema
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDefinition {
    name: String,
    field_type: FieldType,
    parameters: FieldParameters,
}

impl FieldDefinition {
    /// Create a field with the defaults for `field_type`
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            parameters: ParameterPolicy::defaults_for(field_type),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn parameters(&self) -> &FieldParameters {
        &self.parameters
    }

    pub(crate) fn set_name(&mut self, name: String) -> bool {
        if self.name == name {
            return false;
        }
        self.name = name;
        true
    }

    /// Switch type. Parameters are reset to the new type's defaults; setting
    /// the current type again keeps the edited parameters.
    pub(crate) fn set_type(&mut self, field_type: FieldType) -> bool {
        if self.field_type == field_type {
            return false;
        }
        self.field_type = field_type;
        self.parameters = ParameterPolicy::defaults_for(field_type);
        true
    }

    /// Set a parameter, clamped into the policy bounds
    pub(crate) fn set_parameter(&mut self, name: ParameterName, value: i32) -> bool {
        let Some((lo, hi)) = ParameterPolicy::bounds_for(self.field_type, name) else {
            return false;
        };
        self.parameters.set(name, value.clamp(lo, hi))
    }
}

impl Default for FieldDefinition {
    fn default() -> Self {
        Self::new(String::new(), FieldType::Int)
    }
}
