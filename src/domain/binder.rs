//! Constructor binding of parsed arguments to annotation instances

use crate::domain::annotation::{AnnotationInstance, BoundArgs};
use crate::domain::registry::RegistryEntry;
use crate::domain::tags::ArgumentList;
use crate::domain::value::Value;

/// Build an unsealed annotation instance from a resolved type and arguments
///
/// Constructor parameters bind in declared order: a named argument with the
/// parameter's name wins (and is consumed), else the positional argument at
/// the parameter's index, else `Null`. Binding never fails; missing
/// arguments default silently. Named arguments left over after the walk are
/// injected into same-named declared fields; the rest are dropped.
pub fn bind_instance(entry: &RegistryEntry, mut args: ArgumentList) -> AnnotationInstance {
    let descriptor = &entry.descriptor;

    let mut bound = BoundArgs::empty();
    for (idx, param) in descriptor.params().iter().enumerate() {
        if let Some(value) = args.take_named(&param.name) {
            bound.push(&param.name, value, false);
        } else if let Some(value) = args.positional().get(idx).cloned() {
            bound.push(&param.name, value, false);
        } else {
            bound.push(&param.name, Value::Null, true);
        }
    }

    let mut instance = AnnotationInstance::new((entry.factory)(&bound));

    for (name, value) in args.drain_named() {
        if descriptor.declares_field(&name) {
            instance.assign_raw(&name, value);
        }
    }

    instance
}
