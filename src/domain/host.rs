//! Static host-type descriptions and the reflection entry trait

/// One annotated member (property or method) of a host class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub name: &'static str,
    /// Documentation text attached to the member declaration
    pub doc: &'static str,
}

/// Static description of an annotatable host type: its documentation text,
/// members, and declared parent
///
/// Host classes are declared as `static` items so a cached reflection can
/// refer to them for the process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct HostClass {
    pub name: &'static str,
    pub doc: &'static str,
    pub properties: &'static [Member],
    pub methods: &'static [Member],
    pub parent: Option<&'static HostClass>,
}

impl HostClass {
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|m| m.name == name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }

    /// The parent chain, nearest ancestor first
    pub fn ancestors(&self) -> impl Iterator<Item = &'static HostClass> {
        std::iter::successors(self.parent, |class| class.parent)
    }
}

/// Binds a live host value to its class description
///
/// `field_text` supplies the textual field values that `{$field}` markers in
/// annotation string fields resolve against; hosts without readable fields
/// can rely on the default.
pub trait Reflectable {
    fn host_class(&self) -> &'static HostClass;

    fn field_text(&self, name: &str) -> Option<String> {
        let _ = name;
        None
    }
}
