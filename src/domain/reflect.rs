//! Declaration reflection: the resolution pipeline, metadata maps, and the
//! per-type cache
//!
//! The resolver walks a host class and its members, extracts tags from each
//! declaration's documentation text, and drives extraction, argument
//! parsing, type resolution, binding, and interpolation. The result is
//! cached per host class for the process lifetime.

use crate::domain::annotation::AnnotationInstance;
use crate::domain::binder::bind_instance;
use crate::domain::host::{HostClass, Reflectable};
use crate::domain::interpolate::interpolate_fields;
use crate::domain::registry::{canonicalize, AnnotationRegistry, NameResolution};
use crate::domain::tags::{extract_tags, ArgumentList, TagStyle};
use crate::error::{MarginaliaError, Result};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolved annotations for one declaration (a class, property, or method)
///
/// A declaration carries at most one instance per annotation type; a later
/// tag for the same type overwrites the earlier one. Ambiguous short names
/// observed while resolving the declaration are recorded so queries
/// reproduce the same error regardless of later registry growth.
#[derive(Debug, Clone)]
pub struct DeclarationMetadata {
    annotations: BTreeMap<String, Arc<AnnotationInstance>>,
    ambiguous: BTreeMap<String, Vec<String>>,
    suffix: Arc<str>,
}

impl DeclarationMetadata {
    fn new(suffix: Arc<str>) -> Self {
        DeclarationMetadata {
            annotations: BTreeMap::new(),
            ambiguous: BTreeMap::new(),
            suffix,
        }
    }

    /// Tells if the declaration carries the given annotation
    ///
    /// # Errors
    ///
    /// Fails with [`MarginaliaError::AmbiguousName`] when the name matches
    /// several annotation types and none exactly.
    pub fn has_annotation(&self, kind: &str) -> Result<bool> {
        Ok(self.lookup(kind)?.is_some())
    }

    /// Returns the requested annotation instance, or none
    ///
    /// # Errors
    ///
    /// Fails with [`MarginaliaError::AmbiguousName`] when the name matches
    /// several annotation types and none exactly.
    pub fn get_annotation(&self, kind: &str) -> Result<Option<Arc<AnnotationInstance>>> {
        Ok(self.lookup(kind)?.cloned())
    }

    /// All resolved annotations, keyed by canonical type name
    pub fn annotations(&self) -> &BTreeMap<String, Arc<AnnotationInstance>> {
        &self.annotations
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    fn lookup(&self, kind: &str) -> Result<Option<&Arc<AnnotationInstance>>> {
        let canonical = canonicalize(kind, &self.suffix);

        if let Some(candidates) = self.ambiguous.get(&canonical) {
            return Err(MarginaliaError::AmbiguousName {
                name: canonical,
                candidates: candidates.clone(),
            });
        }

        if canonical.contains('.') {
            return Ok(self.annotations.get(&canonical));
        }

        let mut hits = self
            .annotations
            .iter()
            .filter(|(key, _)| key.ends_with(canonical.as_str()));

        match (hits.next(), hits.next()) {
            (None, _) => Ok(None),
            (Some((_, instance)), None) => Ok(Some(instance)),
            (Some(_), Some(_)) => {
                // An exact-name candidate still wins over suffix matches
                if let Some(hit) = self.annotations.get(&canonical) {
                    return Ok(Some(hit));
                }
                Err(MarginaliaError::AmbiguousName {
                    candidates: self
                        .annotations
                        .keys()
                        .filter(|key| key.ends_with(canonical.as_str()))
                        .cloned()
                        .collect(),
                    name: canonical,
                })
            }
        }
    }

    fn record(&mut self, canonical: String, instance: AnnotationInstance) {
        self.annotations.insert(canonical, Arc::new(instance));
    }

    fn record_ambiguous(&mut self, canonical: String, candidates: Vec<String>) {
        self.ambiguous.insert(canonical, candidates);
    }
}

/// The full resolved metadata for one host class
#[derive(Debug, Clone)]
pub struct ReflectedType {
    class_name: String,
    class: DeclarationMetadata,
    properties: BTreeMap<String, DeclarationMetadata>,
    methods: BTreeMap<String, DeclarationMetadata>,
}

impl ReflectedType {
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Class-level declaration metadata
    pub fn class(&self) -> &DeclarationMetadata {
        &self.class
    }

    /// Metadata for a named property; none when the host type has no such
    /// property
    pub fn property(&self, name: &str) -> Option<&DeclarationMetadata> {
        self.properties.get(name)
    }

    /// Metadata for a named method; none when the host type has no such
    /// method
    pub fn method(&self, name: &str) -> Option<&DeclarationMetadata> {
        self.methods.get(name)
    }

    /// All property metadata, keyed by property name
    pub fn properties(&self) -> &BTreeMap<String, DeclarationMetadata> {
        &self.properties
    }

    /// All method metadata, keyed by method name
    pub fn methods(&self) -> &BTreeMap<String, DeclarationMetadata> {
        &self.methods
    }
}

/// Cache of reflected types, keyed by host class name, never invalidated
#[derive(Default)]
struct MetadataCache {
    inner: RwLock<HashMap<String, Arc<ReflectedType>>>,
}

impl MetadataCache {
    fn get(&self, class_name: &str) -> Option<Arc<ReflectedType>> {
        self.inner.read().get(class_name).cloned()
    }

    /// Insert unless a concurrent reflection got there first; either way,
    /// every caller sees the same entry afterwards
    fn insert(&self, class_name: &str, reflected: Arc<ReflectedType>) -> Arc<ReflectedType> {
        self.inner
            .write()
            .entry(class_name.to_string())
            .or_insert(reflected)
            .clone()
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }
}

/// Resolves and caches annotation metadata for host types
///
/// Owns its registry handle and cache rather than reaching for globals; the
/// same resolver can be shared across threads.
pub struct Resolver {
    registry: Arc<AnnotationRegistry>,
    cache: MetadataCache,
    style: TagStyle,
    suffix: Arc<str>,
}

impl Resolver {
    pub fn new(registry: Arc<AnnotationRegistry>, style: TagStyle, suffix: &str) -> Self {
        Resolver {
            registry,
            cache: MetadataCache::default(),
            style,
            suffix: Arc::from(suffix),
        }
    }

    /// Resolver with bracketed tags and the conventional type suffix
    pub fn with_defaults(registry: Arc<AnnotationRegistry>) -> Self {
        Resolver::new(registry, TagStyle::default(), "Annotation")
    }

    pub fn registry(&self) -> &AnnotationRegistry {
        &self.registry
    }

    pub fn tag_style(&self) -> TagStyle {
        self.style
    }

    /// Number of host types reflected so far
    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }

    /// Resolve (or fetch the cached) metadata for the host's class
    pub fn reflect(&self, host: &dyn Reflectable) -> Arc<ReflectedType> {
        self.reflect_class(host.host_class(), host)
    }

    /// Walk the host's class and its declared parent chain, returning the
    /// first class-level instance of the requested annotation
    pub fn inherited_annotation(
        &self,
        host: &dyn Reflectable,
        kind: &str,
    ) -> Result<Option<Arc<AnnotationInstance>>> {
        let chain =
            std::iter::successors(Some(host.host_class()), |class| class.parent);

        for class in chain {
            let reflected = self.reflect_class(class, host);
            if let Some(instance) = reflected.class().get_annotation(kind)? {
                return Ok(Some(instance));
            }
        }

        Ok(None)
    }

    fn reflect_class(&self, class: &'static HostClass, host: &dyn Reflectable) -> Arc<ReflectedType> {
        if let Some(hit) = self.cache.get(class.name) {
            debug!(class = class.name, "reflection cache hit");
            return hit;
        }

        debug!(class = class.name, "reflecting host class");

        let mut properties = BTreeMap::new();
        for member in class.properties {
            properties.insert(
                member.name.to_string(),
                self.resolve_declaration(member.doc, host),
            );
        }

        let mut methods = BTreeMap::new();
        for member in class.methods {
            methods.insert(
                member.name.to_string(),
                self.resolve_declaration(member.doc, host),
            );
        }

        let reflected = Arc::new(ReflectedType {
            class_name: class.name.to_string(),
            class: self.resolve_declaration(class.doc, host),
            properties,
            methods,
        });

        self.cache.insert(class.name, reflected)
    }

    /// Run the tag pipeline over one declaration's documentation text
    fn resolve_declaration(&self, doc: &str, host: &dyn Reflectable) -> DeclarationMetadata {
        let mut meta = DeclarationMetadata::new(self.suffix.clone());

        for tag in extract_tags(doc, self.style) {
            match self.registry.resolve(&tag.name, &self.suffix) {
                NameResolution::Unknown => {
                    debug!(tag = %tag.name, "tag does not name a registered annotation type, skipping");
                }
                NameResolution::Ambiguous(candidates) => {
                    warn!(tag = %tag.name, ?candidates, "ambiguous annotation name");
                    meta.record_ambiguous(canonicalize(&tag.name, &self.suffix), candidates);
                }
                NameResolution::Match(entry) => {
                    let args = ArgumentList::parse(&tag.raw_args);
                    let mut instance = bind_instance(&entry, args);
                    interpolate_fields(&mut instance, &entry.descriptor, host);
                    instance.seal();
                    meta.record(entry.descriptor.canonical().to_string(), instance);
                }
            }
        }

        meta
    }
}
