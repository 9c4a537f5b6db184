//! # oak-core
//!
//! Core types shared across all oak crates.
//!
//! This crate provides:
//! - Entity structs for taxonomic entries, sources, source records, taxa, and audit entries
//! - Enums for entity types, audit actions, and taxonomic levels
//! - Cross-cutting domain error type
//! - Field-level merge rules and conflict policies used by bulk import
//! - Import outcome and summary types
//! - Hybrid name normalization
//! - The whole-store export file format

pub mod entities;
pub mod enums;
pub mod errors;
pub mod export;
pub mod ids;
pub mod import;
pub mod merge;
pub mod names;
pub mod responses;
