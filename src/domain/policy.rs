//! Parameter policy: which parameters a field type has, their defaults and
//! the ranges an editor should allow.

use super::field::{FieldParameters, FieldType, ParameterName};

/// Lower/upper limit for `min`/`max` of numeric fields
pub const RANGE_BOUND: i32 = 1_000_000;
pub const DEFAULT_RANGE_MIN: i32 = 1;
pub const DEFAULT_RANGE_MAX: i32 = 100;

pub const MIN_STRING_LENGTH: i32 = 1;
pub const MAX_STRING_LENGTH: i32 = 1000;
pub const DEFAULT_STRING_LENGTH: i32 = 10;

/// Pure mapping from [`FieldType`] to its parameter schema
pub struct ParameterPolicy;

impl ParameterPolicy {
    /// Parameters populated with the defaults for `field_type`
    pub fn defaults_for(field_type: FieldType) -> FieldParameters {
        match field_type {
            FieldType::Int | FieldType::Double => FieldParameters::Range {
                min: DEFAULT_RANGE_MIN,
                max: DEFAULT_RANGE_MAX,
            },
            FieldType::String => FieldParameters::Length {
                length: DEFAULT_STRING_LENGTH,
            },
            FieldType::Name => FieldParameters::None,
        }
    }

    /// Allowed `(min, max)` for a parameter of a type, or `None` when the
    /// type does not expose that parameter
    pub fn bounds_for(field_type: FieldType, parameter: ParameterName) -> Option<(i32, i32)> {
        match (field_type, parameter) {
            (FieldType::Int | FieldType::Double, ParameterName::Min | ParameterName::Max) => {
                Some((-RANGE_BOUND, RANGE_BOUND))
            }
            (FieldType::String, ParameterName::Length) => {
                Some((MIN_STRING_LENGTH, MAX_STRING_LENGTH))
            }
            _ => None,
        }
    }

    /// Parameter inputs to show for a type, in display order
    pub fn parameters_for(field_type: FieldType) -> &'static [ParameterName] {
        match field_type {
            FieldType::Int | FieldType::Double => &[ParameterName::Min, ParameterName::Max],
            FieldType::String => &[ParameterName::Length],
            FieldType::Name => &[],
        }
    }
}
