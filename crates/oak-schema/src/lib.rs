//! # oak-schema
//!
//! JSON Schema registry and entry validation for oak.
//!
//! This crate provides:
//! - `SchemaRegistry`: JSON Schemas for the oak-core types, built with schemars
//! - `Vocabulary`: accepted subgenera, IUCN codes, and loaded taxa
//! - `EntryValidator`: the validation seam used by create, update, and import,
//!   with `SchemaValidator` for real checks and `AcceptAll` for tests
//!
//! The vocabulary is a plain value handed to the validator. Nothing here is
//! global, so tests can substitute their own fixtures.

pub mod error;
pub mod registry;
pub mod validator;
pub mod vocabulary;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
pub use validator::{AcceptAll, EntryValidator, SchemaValidator};
pub use vocabulary::Vocabulary;
