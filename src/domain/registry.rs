//! Registry of known annotation types and tag-name resolution

use crate::domain::annotation::{Annotation, AnnotationDescriptor, BoundArgs};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Constructs an annotation value from bound constructor arguments
pub type AnnotationFactory = Arc<dyn Fn(&BoundArgs) -> Box<dyn Annotation> + Send + Sync>;

/// One registered annotation type: its descriptor plus factory
#[derive(Clone)]
pub struct RegistryEntry {
    pub descriptor: Arc<AnnotationDescriptor>,
    pub factory: AnnotationFactory,
}

/// Outcome of resolving a tag name against the registry
pub enum NameResolution {
    /// Exactly one registered type matched
    Match(RegistryEntry),
    /// No registered type matched; the tag is silently skipped
    Unknown,
    /// Several types share the short name and none matches exactly;
    /// candidates are the qualified names, sorted
    Ambiguous(Vec<String>),
}

/// Process-wide registry of annotation types, keyed by canonical name
///
/// The registry can grow after startup: registration and lookup may happen
/// concurrently, so the map sits behind a lock.
#[derive(Default)]
pub struct AnnotationRegistry {
    entries: RwLock<HashMap<String, RegistryEntry>>,
}

impl AnnotationRegistry {
    pub fn new() -> Self {
        AnnotationRegistry::default()
    }

    /// Register an annotation type under its descriptor's canonical name
    ///
    /// Re-registering a name replaces the earlier entry.
    pub fn register<F>(&self, descriptor: AnnotationDescriptor, factory: F)
    where
        F: Fn(&BoundArgs) -> Box<dyn Annotation> + Send + Sync + 'static,
    {
        let canonical = descriptor.canonical().to_string();
        debug!(name = %canonical, "registering annotation type");

        self.entries.write().insert(
            canonical,
            RegistryEntry {
                descriptor: Arc::new(descriptor),
                factory: Arc::new(factory),
            },
        );
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.entries.read().contains_key(canonical)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Resolve a short or qualified tag name to a registered type
    ///
    /// The name is canonicalized with the configured suffix first. Qualified
    /// names (containing `.`) resolve by exact lookup. A short name matches
    /// every registered name that ends with it; a candidate equal to the
    /// requested name wins outright, and several candidates with no such
    /// exact match are ambiguous.
    pub fn resolve(&self, requested: &str, suffix: &str) -> NameResolution {
        let canonical = canonicalize(requested, suffix);
        let entries = self.entries.read();

        if canonical.contains('.') {
            return match entries.get(&canonical) {
                Some(entry) => NameResolution::Match(entry.clone()),
                None => NameResolution::Unknown,
            };
        }

        let mut candidates: Vec<&String> = entries
            .keys()
            .filter(|k| k.ends_with(canonical.as_str()))
            .collect();

        match candidates.len() {
            0 => NameResolution::Unknown,
            1 => NameResolution::Match(entries[candidates[0]].clone()),
            _ => {
                if let Some(entry) = entries.get(&canonical) {
                    return NameResolution::Match(entry.clone());
                }
                candidates.sort();
                NameResolution::Ambiguous(candidates.into_iter().cloned().collect())
            }
        }
    }
}

/// Append the annotation-type suffix when the name does not already carry it
pub fn canonicalize(name: &str, suffix: &str) -> String {
    if name.contains(suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::Value;
    use std::any::Any;

    struct Probe {
        type_name: &'static str,
    }

    impl Annotation for Probe {
        fn type_name(&self) -> &str {
            self.type_name
        }

        fn field(&self, _name: &str) -> Option<Value> {
            None
        }

        fn assign_field(&mut self, _name: &str, _value: Value) -> bool {
            false
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn register_probe(registry: &AnnotationRegistry, canonical: &'static str) {
        registry.register(AnnotationDescriptor::new(canonical), move |_| {
            Box::new(Probe {
                type_name: canonical,
            })
        });
    }

    #[test]
    fn test_canonicalize_appends_suffix() {
        assert_eq!(canonicalize("MyTest", "Annotation"), "MyTestAnnotation");
        assert_eq!(
            canonicalize("ns1.FooTest", "Annotation"),
            "ns1.FooTestAnnotation"
        );
    }

    #[test]
    fn test_canonicalize_keeps_existing_suffix() {
        assert_eq!(
            canonicalize("MyTestAnnotation", "Annotation"),
            "MyTestAnnotation"
        );
    }

    #[test]
    fn test_resolve_qualified_exact() {
        let registry = AnnotationRegistry::new();
        register_probe(&registry, "ns1.FooTestAnnotation");

        match registry.resolve("ns1.FooTest", "Annotation") {
            NameResolution::Match(entry) => {
                assert_eq!(entry.descriptor.canonical(), "ns1.FooTestAnnotation")
            }
            _ => panic!("expected a match"),
        }
    }

    #[test]
    fn test_resolve_qualified_unknown() {
        let registry = AnnotationRegistry::new();
        register_probe(&registry, "ns1.FooTestAnnotation");

        assert!(matches!(
            registry.resolve("ns2.FooTest", "Annotation"),
            NameResolution::Unknown
        ));
    }

    #[test]
    fn test_resolve_short_single_candidate() {
        let registry = AnnotationRegistry::new();
        register_probe(&registry, "ns1.FooTestAnnotation");

        match registry.resolve("FooTest", "Annotation") {
            NameResolution::Match(entry) => {
                assert_eq!(entry.descriptor.canonical(), "ns1.FooTestAnnotation")
            }
            _ => panic!("expected a match"),
        }
    }

    #[test]
    fn test_resolve_short_unknown() {
        let registry = AnnotationRegistry::new();
        assert!(matches!(
            registry.resolve("Nothing", "Annotation"),
            NameResolution::Unknown
        ));
    }

    #[test]
    fn test_resolve_short_ambiguous() {
        let registry = AnnotationRegistry::new();
        register_probe(&registry, "ns1.FooTestAnnotation");
        register_probe(&registry, "ns2.FooTestAnnotation");

        match registry.resolve("FooTest", "Annotation") {
            NameResolution::Ambiguous(candidates) => {
                assert_eq!(
                    candidates,
                    vec![
                        "ns1.FooTestAnnotation".to_string(),
                        "ns2.FooTestAnnotation".to_string()
                    ]
                );
            }
            _ => panic!("expected ambiguity"),
        }
    }

    #[test]
    fn test_resolve_exact_match_breaks_tie() {
        let registry = AnnotationRegistry::new();
        register_probe(&registry, "ns1.FooTestAnnotation");
        register_probe(&registry, "FooTestAnnotation");

        match registry.resolve("FooTest", "Annotation") {
            NameResolution::Match(entry) => {
                assert_eq!(entry.descriptor.canonical(), "FooTestAnnotation")
            }
            _ => panic!("expected the exact-name candidate to win"),
        }
    }

    #[test]
    fn test_register_replaces() {
        let registry = AnnotationRegistry::new();
        register_probe(&registry, "ns1.FooTestAnnotation");
        register_probe(&registry, "ns1.FooTestAnnotation");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_contains() {
        let registry = AnnotationRegistry::new();
        assert!(registry.is_empty());
        register_probe(&registry, "ns1.FooTestAnnotation");
        assert!(registry.contains("ns1.FooTestAnnotation"));
        assert!(!registry.contains("FooTestAnnotation"));
    }
}
