use super::modifiers::{ItemFlags, Modifiers};
use super::types::{TypeParameter, TypeRef};
use serde::{Deserialize, Serialize};

/// Index of an item inside its owning codebase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u32);

impl ItemId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Class flavours
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
    AnnotationType,
}

impl ClassKind {
    pub fn label(&self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::AnnotationType => "annotation",
        }
    }

    /// Interfaces and annotation types declare members without bodies by default
    pub fn is_interface_like(&self) -> bool {
        matches!(self, ClassKind::Interface | ClassKind::AnnotationType)
    }
}

/// A node of the API tree: the shared core plus a per-variant payload.
#[derive(Debug, Clone)]
pub struct Item {
    pub(crate) parent: Option<ItemId>,
    pub(crate) rank: u64,
    pub(crate) modifiers: Modifiers,
    pub(crate) flags: ItemFlags,
    /// False for stubs that only anchor references
    pub(crate) emit: bool,
    pub(crate) kind: ItemKind,
}

impl Item {
    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    pub fn rank(&self) -> u64 {
        self.rank
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn flags(&self) -> &ItemFlags {
        &self.flags
    }

    pub fn emit(&self) -> bool {
        self.emit
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }
}

#[derive(Debug, Clone)]
pub enum ItemKind {
    Package(PackageItem),
    Class(ClassItem),
    Method(MethodItem),
    Constructor(MethodItem),
    Field(FieldItem),
    Parameter(ParameterItem),
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Package(_) => "package",
            ItemKind::Class(_) => "class",
            ItemKind::Method(_) => "method",
            ItemKind::Constructor(_) => "constructor",
            ItemKind::Field(_) => "field",
            ItemKind::Parameter(_) => "parameter",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PackageItem {
    pub name: String,
    /// Every class of the package, nested ones included
    pub classes: Vec<ItemId>,
}

#[derive(Debug, Clone)]
pub struct ClassItem {
    pub qualified_name: String,
    pub simple_name: String,
    pub kind: ClassKind,
    pub superclass: Option<TypeRef>,
    /// Canonical order after build
    pub interfaces: Vec<TypeRef>,
    pub type_parameters: Vec<TypeParameter>,
    pub constructors: Vec<ItemId>,
    pub methods: Vec<ItemId>,
    pub fields: Vec<ItemId>,
    pub nested: Vec<ItemId>,
    pub package: ItemId,
    pub containing_class: Option<ItemId>,
}

/// Payload of both methods and constructors
#[derive(Debug, Clone)]
pub struct MethodItem {
    pub name: String,
    /// `None` for constructors
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<ItemId>,
    /// Canonical order after build
    pub throws: Vec<TypeRef>,
    pub type_parameters: Vec<TypeParameter>,
    pub property: Option<String>,
    /// Declaring class, for copies synthesized from hidden ancestors
    pub inherited_from: Option<ItemId>,
    pub inherited_method: Option<ItemId>,
    pub inherited: bool,
    /// Directly overridden methods in the same codebase
    pub overridden: Vec<ItemId>,
    pub annotation_default: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FieldItem {
    pub name: String,
    pub field_type: TypeRef,
    pub value: Option<String>,
    pub enum_constant: bool,
    pub inherited_from: Option<ItemId>,
    pub inherited: bool,
}

#[derive(Debug, Clone)]
pub struct ParameterItem {
    /// Externally visible name; positional-only when absent
    pub name: Option<String>,
    pub param_type: TypeRef,
    pub has_default: bool,
    pub varargs: bool,
    pub position: usize,
}
