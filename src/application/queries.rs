//! Annotation query use case
//!
//! Thin convenience surface over a shared [`Resolver`], mirroring the
//! has/get interface per declaration kind. All functions reflect the host
//! lazily through the resolver's cache.

use crate::domain::annotation::AnnotationInstance;
use crate::domain::host::Reflectable;
use crate::domain::reflect::Resolver;
use crate::error::Result;
use std::sync::Arc;

/// Tells if the host's class carries the given annotation
pub fn class_has_annotation(
    resolver: &Resolver,
    host: &dyn Reflectable,
    kind: &str,
) -> Result<bool> {
    resolver.reflect(host).class().has_annotation(kind)
}

/// Returns the class-level annotation instance, or none
pub fn class_annotation(
    resolver: &Resolver,
    host: &dyn Reflectable,
    kind: &str,
) -> Result<Option<Arc<AnnotationInstance>>> {
    resolver.reflect(host).class().get_annotation(kind)
}

/// Tells if a named property carries the given annotation
///
/// A property the host type does not declare yields false.
pub fn property_has_annotation(
    resolver: &Resolver,
    host: &dyn Reflectable,
    property: &str,
    kind: &str,
) -> Result<bool> {
    match resolver.reflect(host).property(property) {
        Some(meta) => meta.has_annotation(kind),
        None => Ok(false),
    }
}

/// Returns a property-level annotation instance, or none
///
/// A property the host type does not declare yields none.
pub fn property_annotation(
    resolver: &Resolver,
    host: &dyn Reflectable,
    property: &str,
    kind: &str,
) -> Result<Option<Arc<AnnotationInstance>>> {
    match resolver.reflect(host).property(property) {
        Some(meta) => meta.get_annotation(kind),
        None => Ok(None),
    }
}

/// Tells if a named method carries the given annotation
///
/// A method the host type does not declare yields false.
pub fn method_has_annotation(
    resolver: &Resolver,
    host: &dyn Reflectable,
    method: &str,
    kind: &str,
) -> Result<bool> {
    match resolver.reflect(host).method(method) {
        Some(meta) => meta.has_annotation(kind),
        None => Ok(false),
    }
}

/// Returns a method-level annotation instance, or none
///
/// A method the host type does not declare yields none.
pub fn method_annotation(
    resolver: &Resolver,
    host: &dyn Reflectable,
    method: &str,
    kind: &str,
) -> Result<Option<Arc<AnnotationInstance>>> {
    match resolver.reflect(host).method(method) {
        Some(meta) => meta.get_annotation(kind),
        None => Ok(None),
    }
}

/// First class-level instance of the annotation along the host's parent
/// chain, or none when the chain is exhausted
pub fn inherited_annotation(
    resolver: &Resolver,
    host: &dyn Reflectable,
    kind: &str,
) -> Result<Option<Arc<AnnotationInstance>>> {
    resolver.inherited_annotation(host, kind)
}
