//! Declarative descriptions of items, consumed by [`CodebaseBuilder`].
//!
//! The same structs are the JSON snapshot schema, so every field has a
//! default and only names and types are required in a document.
//!
//! [`CodebaseBuilder`]: super::builder::CodebaseBuilder

use super::item::ClassKind;
use super::modifiers::{ItemFlags, Modifiers};
use super::types::{TypeParameter, TypeRef};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PackageSpec {
    pub name: String,
    #[serde(flatten)]
    pub flags: ItemFlags,
    pub stub: bool,
    pub classes: Vec<ClassSpec>,
}

impl PackageSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn class(mut self, class: ClassSpec) -> Self {
        self.classes.push(class);
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassSpec {
    /// Qualified name, e.g. `android.app.Activity` or `p.Outer.Inner`
    pub name: String,
    pub kind: ClassKind,
    pub modifiers: Modifiers,
    #[serde(flatten)]
    pub flags: ItemFlags,
    pub stub: bool,
    pub superclass: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub type_parameters: Vec<TypeParameter>,
    pub constructors: Vec<MethodSpec>,
    pub methods: Vec<MethodSpec>,
    pub fields: Vec<FieldSpec>,
    pub nested: Vec<ClassSpec>,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, ClassKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, ClassKind::Interface)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, ClassKind::Enum)
    }

    pub fn annotation(name: impl Into<String>) -> Self {
        Self::new(name, ClassKind::AnnotationType)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn extends(mut self, superclass: impl Into<TypeRef>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<TypeRef>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn type_parameter(mut self, param: TypeParameter) -> Self {
        self.type_parameters.push(param);
        self
    }

    pub fn constructor(mut self, ctor: MethodSpec) -> Self {
        self.constructors.push(ctor);
        self
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn nested(mut self, class: ClassSpec) -> Self {
        self.nested.push(class);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.flags.hidden = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.flags.deprecated = true;
        self
    }

    pub fn stub(mut self) -> Self {
        self.stub = true;
        self
    }
}

/// A method or constructor. Constructors leave `name` empty (the builder
/// fills in the class's simple name) and have no return type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MethodSpec {
    pub name: String,
    pub modifiers: Modifiers,
    #[serde(flatten)]
    pub flags: ItemFlags,
    pub stub: bool,
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<ParameterSpec>,
    pub throws: Vec<TypeRef>,
    pub type_parameters: Vec<TypeParameter>,
    pub property: Option<String>,
    pub annotation_default: Option<String>,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::public(),
            ..Self::default()
        }
    }

    pub fn constructor() -> Self {
        Self::new("")
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn returns(mut self, return_type: impl Into<TypeRef>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn param(mut self, param: ParameterSpec) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn throws(mut self, exception: impl Into<TypeRef>) -> Self {
        self.throws.push(exception.into());
        self
    }

    pub fn type_parameter(mut self, param: TypeParameter) -> Self {
        self.type_parameters.push(param);
        self
    }

    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.property = Some(name.into());
        self
    }

    pub fn annotation_default(mut self, value: impl Into<String>) -> Self {
        self.annotation_default = Some(value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.flags.hidden = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.flags.deprecated = true;
        self
    }

    pub fn stub(mut self) -> Self {
        self.stub = true;
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FieldSpec {
    pub name: String,
    pub modifiers: Modifiers,
    #[serde(flatten)]
    pub flags: ItemFlags,
    pub stub: bool,
    #[serde(rename = "type")]
    pub field_type: TypeRef,
    pub value: Option<String>,
    pub enum_constant: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::public(),
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn enum_constant(mut self) -> Self {
        self.enum_constant = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.flags.hidden = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.flags.deprecated = true;
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParameterSpec {
    /// Externally visible name
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub param_type: TypeRef,
    pub modifiers: Modifiers,
    pub has_default: bool,
    /// Also inferred from a trailing `...` on the type
    pub varargs: bool,
}

impl ParameterSpec {
    pub fn new(param_type: impl Into<TypeRef>) -> Self {
        Self {
            param_type: param_type.into(),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn default_value(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn varargs(mut self) -> Self {
        self.varargs = true;
        self
    }
}
