use reqwest::Url;
use thiserror::Error;

use crate::config::{ServiceSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    /// Collect every problem instead of stopping at the first one
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_service(&settings.service) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_service(service: &ServiceSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if service.endpoint.is_empty() {
            errors.push(ValidationError::MissingField("service.endpoint".to_string()));
        } else {
            match Url::parse(&service.endpoint) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => errors.push(ValidationError::InvalidValue {
                    field: "service.endpoint".to_string(),
                    reason: format!("Unsupported scheme '{}'", url.scheme()),
                }),
                Err(e) => errors.push(ValidationError::InvalidValue {
                    field: "service.endpoint".to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        if service.timeout_seconds == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "service.timeout_seconds".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
