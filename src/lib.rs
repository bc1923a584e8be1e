//! # schemagen
//!
//! Client side of a CSV generation service: an editable table schema, its
//! canonical JSON request body, and a controller for the single request
//! that may be in flight at any time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use schemagen::adapters::request_controller::RequestEvent;
//! use schemagen::config::Settings;
//! use schemagen::domain::{FieldType, ParameterName, SchemaModel};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!
//!     let mut model = SchemaModel::new();
//!     let id = model.add_field();
//!     model.set_field_name(id, "id");
//!     model.set_field_parameter(id, ParameterName::Max, 1000);
//!     let name = model.add_field();
//!     model.set_field_name(name, "name");
//!     model.set_field_type(name, FieldType::Name);
//!
//!     let mut controller = schemagen::create_controller(&settings)?;
//!     controller.submit(model.serialize()?)?;
//!     while let Some(event) = controller.next_event().await {
//!         if let RequestEvent::Succeeded { body, .. } = event {
//!             std::fs::write(model.output_file(), &body)?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: schema model, parameter policy, validation (no I/O)
//! - **Adapters**: HTTP transport, request controller, form workflow, terminal presenter
//! - **Config**: service settings

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

use crate::adapters::error::RequestResult;
use crate::adapters::request_controller::RequestController;
use crate::adapters::transport::HttpTransport;
use crate::config::Settings;
use std::sync::Arc;

/// Build a request controller talking HTTP to the configured service
pub fn create_controller(settings: &Settings) -> RequestResult<RequestController> {
    let transport = HttpTransport::new(&settings.service)?;
    Ok(RequestController::new(Arc::new(transport)))
}
