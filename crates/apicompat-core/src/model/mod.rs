//! API model: packages, classes and members of one surface version.

pub mod builder;
pub mod codebase;
pub mod item;
pub mod modifiers;
pub mod spec;
pub mod types;

pub use builder::CodebaseBuilder;
pub use codebase::{Codebase, ItemRef};
pub use item::{
    ClassItem, ClassKind, FieldItem, Item, ItemId, ItemKind, MethodItem, PackageItem,
    ParameterItem,
};
pub use modifiers::{Flag, ItemFlags, Modifiers, Nullability, Visibility};
pub use spec::{ClassSpec, FieldSpec, MethodSpec, PackageSpec, ParameterSpec};
pub use types::{TypeParameter, TypeRef};
