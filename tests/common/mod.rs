//! Shared fixtures for integration tests: annotation types, host classes,
//! and a populated registry

#![allow(dead_code)]

use marginalia::domain::annotation::{Annotation, AnnotationDescriptor};
use marginalia::domain::host::{HostClass, Member, Reflectable};
use marginalia::domain::registry::AnnotationRegistry;
use marginalia::domain::value::Value;
use std::any::Any;
use std::sync::Arc;

/// Two-parameter annotation with a derived accessor
pub struct MyTestAnnotation {
    pub name: String,
    pub surname: String,
}

impl MyTestAnnotation {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

impl Annotation for MyTestAnnotation {
    fn type_name(&self) -> &str {
        "fixtures.MyTestAnnotation"
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::Str(self.name.clone())),
            "surname" => Some(Value::Str(self.surname.clone())),
            _ => None,
        }
    }

    fn assign_field(&mut self, name: &str, value: Value) -> bool {
        match name {
            "name" => self.name = value.text(),
            "surname" => self.surname = value.text(),
            _ => return false,
        }
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Single-parameter annotation keeping the typed argument as-is
pub struct OneArgAnnotation {
    pub my_arg: Value,
}

impl Annotation for OneArgAnnotation {
    fn type_name(&self) -> &str {
        "fixtures.OneArgAnnotation"
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "my_arg" => Some(self.my_arg.clone()),
            _ => None,
        }
    }

    fn assign_field(&mut self, name: &str, value: Value) -> bool {
        match name {
            "my_arg" => {
                self.my_arg = value;
                true
            }
            _ => return false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Marker annotation without constructor parameters or fields
pub struct BadgeAnnotation;

impl Annotation for BadgeAnnotation {
    fn type_name(&self) -> &str {
        "fixtures.BadgeAnnotation"
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

/// String-field annotation used as the interpolation target
pub struct InfoAnnotation {
    pub message: String,
}

impl Annotation for InfoAnnotation {
    fn type_name(&self) -> &str {
        "fixtures.InfoAnnotation"
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "message" => Some(Value::Str(self.message.clone())),
            _ => None,
        }
    }

    fn assign_field(&mut self, name: &str, value: Value) -> bool {
        match name {
            "message" => {
                self.message = value.text();
                true
            }
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Annotation whose canonical name is set per registration, for the
/// shared-short-name scenarios
pub struct TestMarkAnnotation {
    type_name: &'static str,
    pub label: String,
}

impl Annotation for TestMarkAnnotation {
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "label" => Some(Value::Str(self.label.clone())),
            _ => None,
        }
    }

    fn assign_field(&mut self, name: &str, value: Value) -> bool {
        match name {
            "label" => {
                self.label = value.text();
                true
            }
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registry with the standard fixture annotation types
pub fn registry() -> Arc<AnnotationRegistry> {
    let registry = Arc::new(AnnotationRegistry::new());

    registry.register(
        AnnotationDescriptor::new("fixtures.MyTestAnnotation")
            .with_param("name", false)
            .with_param("surname", false)
            .with_field("name")
            .with_field("surname"),
        |args| {
            Box::new(MyTestAnnotation {
                name: args.value("name").text(),
                surname: args.value("surname").text(),
            })
        },
    );

    registry.register(
        AnnotationDescriptor::new("fixtures.OneArgAnnotation")
            .with_param("arg", true)
            .with_field("my_arg"),
        |args| {
            Box::new(OneArgAnnotation {
                my_arg: args.value("arg").clone(),
            })
        },
    );

    registry.register(AnnotationDescriptor::new("fixtures.BadgeAnnotation"), |_| {
        Box::new(BadgeAnnotation)
    });

    registry.register(
        AnnotationDescriptor::new("fixtures.InfoAnnotation")
            .with_param("message", false)
            .with_field("message"),
        |args| {
            Box::new(InfoAnnotation {
                message: args.value("message").text(),
            })
        },
    );

    registry
}

/// Registry holding two types that share the `Test` short name
pub fn shared_short_name_registry() -> Arc<AnnotationRegistry> {
    let registry = Arc::new(AnnotationRegistry::new());

    for canonical in ["ns1.FooTestAnnotation", "ns2.BarTestAnnotation"] {
        registry.register(
            AnnotationDescriptor::new(canonical)
                .with_param("label", false)
                .with_field("label"),
            move |args| {
                Box::new(TestMarkAnnotation {
                    type_name: canonical,
                    label: args.value("label").text(),
                })
            },
        );
    }

    registry
}

pub static EMPLOYEE_CLASS: HostClass = HostClass {
    name: "fixtures.Employee",
    doc: "Domain model for staff records.\n[MyTest(name='Thomas', surname='Cocchiara')]",
    properties: &[
        Member {
            name: "age",
            doc: "Age in years. [OneArg(5)]",
        },
        Member {
            name: "nickname",
            doc: "Nothing attached here.",
        },
    ],
    methods: &[
        Member {
            name: "call_test",
            doc: "[Badge]",
        },
        Member {
            name: "plain",
            doc: "",
        },
    ],
    parent: None,
};

pub struct Employee {
    pub name: String,
}

impl Reflectable for Employee {
    fn host_class(&self) -> &'static HostClass {
        &EMPLOYEE_CLASS
    }

    fn field_text(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }
}

impl Default for Employee {
    fn default() -> Self {
        Employee {
            name: "Alice".to_string(),
        }
    }
}
