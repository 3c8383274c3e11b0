//! # provisioning-form - EC2 engine provisioning form
//!
//! Static form metadata and value mapping for the screen that creates and
//! edits an EC2-backed compute engine.
//!
//! ## Features
//!
//! - **Schema Registry**: cluster states, field groups, region and instance-type
//!   option lists, and the form layout with conditional containers
//! - **Value Mapper**: provisioning record -> form values, and form values ->
//!   save payload with endpoint and credential pruning
//! - **Layout Validation**: checks that every field has exactly one form element
//!
//! ## Quick Start
//!
//! ```rust
//! use provisioning_form::adapters::prepare_provision_values_for_save;
//! use provisioning_form::domain::{Field, FormValues};
//!
//! let values = FormValues::new()
//!     .with(Field::Region, "us-east-1")
//!     .with(Field::Endpoint, "https://ignored");
//! let payload = prepare_provision_values_for_save(&values);
//! assert!(!payload.connection_props().contains_key(&Field::Endpoint));
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: records, field identifiers, form values, payloads
//! - **Schema**: the declarative layout and its validator
//! - **Adapters**: value mapping and file I/O
//! - **Config**: output settings

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod schema;
