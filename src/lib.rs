//! marginalia - Annotation metadata resolution for documented declarations
//!
//! A library that parses typed annotation tags out of declaration-level
//! documentation text, binds them to registered annotation types, and makes
//! the resolved instances queryable per class, property, and method.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::MarginaliaError;
