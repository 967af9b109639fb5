//! Application layer - Use cases and orchestration

pub mod queries;

pub use queries::{
    class_annotation, class_has_annotation, inherited_annotation, method_annotation,
    method_has_annotation, property_annotation, property_has_annotation,
};
