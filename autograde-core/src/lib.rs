//! Autograde Core
//!
//! Core types and abstractions for the autograde test-job pipeline.
//!
//! This crate contains:
//! - Domain types: Core business entities (PushEvent, Deliverable, ResultRecord, etc.)
//! - DTOs: Data transfer objects for the orchestrator API surface
//! - Identifier utilities: parsing/validation of repository and commit identifiers
//! - The shared error taxonomy

pub mod domain;
pub mod dto;
pub mod error;
pub mod identifier;

pub use error::CoreError;
