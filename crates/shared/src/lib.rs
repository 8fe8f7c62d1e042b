//! Shared types, errors, and configuration for Sweldo.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Centavo-precision money helpers
//! - The error taxonomy shared by every domain error
//! - Engine configuration (statutory rates, work schedule)

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::ErrorClass;
