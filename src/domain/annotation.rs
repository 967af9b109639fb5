//! Annotation types, descriptors, and resolved instances

use crate::domain::value::Value;
use crate::error::{MarginaliaError, Result};
use std::any::Any;
use std::fmt;

static NULL_VALUE: Value = Value::Null;

/// One constructor parameter of an annotation type, in declared order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub has_default: bool,
}

/// Describes one registered annotation type: its canonical (qualified) name,
/// constructor parameters, and declared field names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationDescriptor {
    canonical: String,
    params: Vec<ParamSpec>,
    fields: Vec<String>,
}

impl AnnotationDescriptor {
    pub fn new(canonical: impl Into<String>) -> Self {
        AnnotationDescriptor {
            canonical: canonical.into(),
            params: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Append a constructor parameter (declared order matters)
    pub fn with_param(mut self, name: impl Into<String>, has_default: bool) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            has_default,
        });
        self
    }

    /// Declare a field eligible for direct injection and interpolation
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Name after the last namespace separator
    pub fn short_name(&self) -> &str {
        self.canonical
            .rsplit('.')
            .next()
            .unwrap_or(&self.canonical)
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn declares_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }
}

/// Constructor arguments resolved against a descriptor's parameter list,
/// one entry per declared parameter, in declared order
#[derive(Debug, Clone, Default)]
pub struct BoundArgs {
    values: Vec<BoundArg>,
}

#[derive(Debug, Clone)]
struct BoundArg {
    name: String,
    value: Value,
    defaulted: bool,
}

impl BoundArgs {
    pub(crate) fn empty() -> Self {
        BoundArgs::default()
    }

    pub(crate) fn push(&mut self, name: &str, value: Value, defaulted: bool) {
        self.values.push(BoundArg {
            name: name.to_string(),
            value,
            defaulted,
        });
    }

    /// Value bound to a parameter; `Null` for names never declared
    pub fn value(&self, name: &str) -> &Value {
        self.values
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
            .unwrap_or(&NULL_VALUE)
    }

    /// Whether the parameter took the default because no argument matched it
    pub fn is_defaulted(&self, name: &str) -> bool {
        self.values
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.defaulted)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A value-object type attachable to declarations
///
/// Implementations are plain structs; the resolver constructs them through
/// the factory registered alongside their descriptor and assigns fields
/// through [`Annotation::assign_field`] before the instance is published.
pub trait Annotation: Any + Send + Sync {
    /// Canonical qualified type name, matching the registered descriptor
    fn type_name(&self) -> &str;

    /// Current value of a declared field, if the type exposes it
    fn field(&self, name: &str) -> Option<Value>;

    /// Raw field assignment; returns false for unknown fields
    fn assign_field(&mut self, name: &str, value: Value) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// A constructed annotation with resolved field values
///
/// The resolver builds instances unsealed, injects and interpolates fields,
/// then seals them before publishing. Once sealed, [`set_field`] fails with
/// a field-access error: fields are resolver-assigned only.
///
/// [`set_field`]: AnnotationInstance::set_field
pub struct AnnotationInstance {
    inner: Box<dyn Annotation>,
    sealed: bool,
}

impl AnnotationInstance {
    /// Wrap a freshly constructed annotation value, unsealed
    ///
    /// Instances are normally created by the resolver; building one directly
    /// starts the same two-phase lifecycle (assign fields, then seal).
    pub fn new(inner: Box<dyn Annotation>) -> Self {
        AnnotationInstance {
            inner,
            sealed: false,
        }
    }

    pub fn type_name(&self) -> &str {
        self.inner.type_name()
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.inner.field(name)
    }

    /// Borrow the concrete annotation type back out of the instance
    pub fn downcast_ref<T: Annotation>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    /// Assign a field on an instance still under construction
    ///
    /// # Errors
    ///
    /// Fails with [`MarginaliaError::FieldAccess`] once the instance has been
    /// sealed by the resolver. Unknown field names on an unsealed instance
    /// are ignored.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        if self.sealed {
            return Err(MarginaliaError::FieldAccess {
                annotation: self.type_name().to_string(),
                field: name.to_string(),
            });
        }

        self.inner.assign_field(name, value);
        Ok(())
    }

    /// Mark construction finished; all further field assignment is rejected
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Internal setter for the binder and interpolator
    pub(crate) fn assign_raw(&mut self, name: &str, value: Value) {
        self.inner.assign_field(name, value);
    }
}

impl fmt::Debug for AnnotationInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationInstance")
            .field("type_name", &self.type_name())
            .field("sealed", &self.sealed)
            .finish()
    }
}
