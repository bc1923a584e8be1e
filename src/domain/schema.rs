//! Editable schema model and its canonical request body.
//!
//! [`SchemaModel`] owns every [`FieldDefinition`]. Presentation code mirrors
//! each edit into the model through the mutators below and reads derived
//! state back on demand; it never keeps its own copy of the fields.
//!
//! The request body keeps one quirk of the generation service's contract:
//! numeric parameters (`min`, `max`, `length`) are sent as decimal strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::field::{FieldDefinition, FieldParameters, FieldType, ParameterName};
use super::validation::SchemaViolation;

pub const DEFAULT_TABLE_NAME: &str = "users";
pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";
pub const DEFAULT_ROWS: u32 = 10;
pub const MIN_ROWS: u32 = 1;
pub const MAX_ROWS: u32 = 10_000;

/// Change notification queued by every effective mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaEvent {
    FieldAdded { index: usize },
    FieldRemoved { index: usize },
    /// Name, type or a parameter of the field changed
    FieldChanged { index: usize },
    /// Table name, row count or output file changed
    SettingsChanged,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Invalid(#[from] SchemaViolation),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Body sent to the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub table_name: String,
    pub rows: u32,
    pub output_file: String,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Absent for `name` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<FieldParams>,
}

/// String-encoded parameters as the service expects them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldParams {
    Range { min: String, max: String },
    Length { length: String },
}

impl From<&FieldDefinition> for FieldSpec {
    fn from(field: &FieldDefinition) -> Self {
        let params = match field.parameters() {
            FieldParameters::Range { min, max } => Some(FieldParams::Range {
                min: min.to_string(),
                max: max.to_string(),
            }),
            FieldParameters::Length { length } => Some(FieldParams::Length {
                length: length.to_string(),
            }),
            FieldParameters::None => None,
        };

        Self {
            name: field.name().to_string(),
            field_type: field.field_type(),
            params,
        }
    }
}

/// Ordered field list plus the top-level generation settings
#[derive(Debug, Clone)]
pub struct SchemaModel {
    table_name: String,
    rows: u32,
    output_file: String,
    fields: Vec<FieldDefinition>,
    events: Vec<SchemaEvent>,
}

impl Default for SchemaModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaModel {
    pub fn new() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            rows: DEFAULT_ROWS,
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            fields: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FieldDefinition> {
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn set_table_name(&mut self, table_name: impl Into<String>) {
        let table_name = table_name.into();
        if self.table_name != table_name {
            self.table_name = table_name;
            self.events.push(SchemaEvent::SettingsChanged);
        }
    }

    /// Set the row count, clamped to `[MIN_ROWS, MAX_ROWS]`
    pub fn set_rows(&mut self, rows: u32) {
        let rows = rows.clamp(MIN_ROWS, MAX_ROWS);
        if self.rows != rows {
            self.rows = rows;
            self.events.push(SchemaEvent::SettingsChanged);
        }
    }

    pub fn set_output_file(&mut self, output_file: impl Into<String>) {
        let output_file = output_file.into();
        if self.output_file != output_file {
            self.output_file = output_file;
            self.events.push(SchemaEvent::SettingsChanged);
        }
    }

    /// Append an unnamed `int` field with default parameters. Returns its index.
    pub fn add_field(&mut self) -> usize {
        self.fields.push(FieldDefinition::default());
        let index = self.fields.len() - 1;
        self.events.push(SchemaEvent::FieldAdded { index });
        index
    }

    /// Remove the field at `index`; out of range (or nothing selected) is a no-op
    pub fn remove_field(&mut self, index: Option<usize>) -> Option<FieldDefinition> {
        let index = index.filter(|&i| i < self.fields.len())?;
        let removed = self.fields.remove(index);
        self.events.push(SchemaEvent::FieldRemoved { index });
        Some(removed)
    }

    /// Change the type of a field, resetting its parameters to the new
    /// type's defaults. Same type or invalid index leaves the model untouched.
    pub fn set_field_type(&mut self, index: usize, field_type: FieldType) {
        self.edit_field(index, |field| field.set_type(field_type));
    }

    pub fn set_field_name(&mut self, index: usize, name: impl Into<String>) {
        let name = name.into();
        self.edit_field(index, |field| field.set_name(name));
    }

    /// Set a parameter, clamped into its allowed range. Ignored when the
    /// field's type has no such parameter.
    pub fn set_field_parameter(&mut self, index: usize, parameter: ParameterName, value: i32) {
        self.edit_field(index, |field| field.set_parameter(parameter, value));
    }

    fn edit_field(&mut self, index: usize, edit: impl FnOnce(&mut FieldDefinition) -> bool) {
        let Some(field) = self.fields.get_mut(index) else {
            return;
        };
        if edit(field) {
            self.events.push(SchemaEvent::FieldChanged { index });
        }
    }

    /// Drain queued change notifications, oldest first
    pub fn take_events(&mut self) -> Vec<SchemaEvent> {
        std::mem::take(&mut self.events)
    }

    /// First violated rule, if any
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        if self.table_name.is_empty() {
            return Err(SchemaViolation::EmptyTableName);
        }
        if self.fields.is_empty() {
            return Err(SchemaViolation::NoFields);
        }
        if let Some(index) = self.fields.iter().position(|f| f.name().is_empty()) {
            return Err(SchemaViolation::EmptyFieldName(index));
        }
        Ok(())
    }

    /// Validated request body in field order
    pub fn to_request(&self) -> Result<GenerationRequest, SchemaViolation> {
        self.validate()?;

        Ok(GenerationRequest {
            table_name: self.table_name.clone(),
            rows: self.rows,
            output_file: self.output_file.clone(),
            fields: self.fields.iter().map(FieldSpec::from).collect(),
        })
    }

    /// Canonical UTF-8 JSON body
    pub fn serialize(&self) -> Result<Vec<u8>, SchemaError> {
        let request = self.to_request()?;
        Ok(serde_json::to_vec(&request)?)
    }
}
