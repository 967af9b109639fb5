//! Domain layer - Annotation resolution logic and domain models

pub mod annotation;
pub mod binder;
pub mod host;
pub mod interpolate;
pub mod reflect;
pub mod registry;
pub mod tags;
pub mod value;

pub use annotation::{Annotation, AnnotationDescriptor, AnnotationInstance, BoundArgs, ParamSpec};
pub use host::{HostClass, Member, Reflectable};
pub use reflect::{DeclarationMetadata, ReflectedType, Resolver};
pub use registry::{AnnotationRegistry, NameResolution, RegistryEntry};
pub use value::Value;
