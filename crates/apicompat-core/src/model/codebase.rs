//! The owning arena and read-only handles into it.

use super::item::{
    ClassItem, ClassKind, FieldItem, Item, ItemId, ItemKind, MethodItem, PackageItem,
    ParameterItem,
};
use super::modifiers::{Flag, ItemFlags, Modifiers};
use super::types::TypeParameter;
use crate::errors::{CompatError, Result};
use std::collections::BTreeMap;

/// One version of an API surface.
///
/// Items live in a flat vector; parent links are indices, so there are no
/// ownership cycles. Structure is fixed once built; only own flags can be
/// flipped afterwards (see [`Codebase::set_flag`]).
#[derive(Debug, Clone)]
pub struct Codebase {
    pub(crate) location: String,
    pub(crate) partial_format: bool,
    pub(crate) items: Vec<Item>,
    pub(crate) packages: BTreeMap<String, ItemId>,
    pub(crate) classes: BTreeMap<String, ItemId>,
}

impl Codebase {
    pub fn builder(location: impl Into<String>) -> super::builder::CodebaseBuilder {
        super::builder::CodebaseBuilder::new(location)
    }

    /// Human-readable descriptor of where this surface came from
    pub fn location(&self) -> &str {
        &self.location
    }

    /// True when built from a snapshot format known to omit inherited members
    pub fn is_partial_format(&self) -> bool {
        self.partial_format
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<ItemRef<'_>> {
        (id.index() < self.items.len()).then_some(ItemRef { codebase: self, id })
    }

    /// Packages in lexicographic order
    pub fn packages(&self) -> impl Iterator<Item = ItemRef<'_>> + '_ {
        self.packages
            .values()
            .map(move |&id| ItemRef { codebase: self, id })
    }

    /// Classes in lexicographic order of qualified name
    pub fn classes(&self) -> impl Iterator<Item = ItemRef<'_>> + '_ {
        self.classes
            .values()
            .map(move |&id| ItemRef { codebase: self, id })
    }

    pub fn find_package(&self, name: &str) -> Option<ItemRef<'_>> {
        self.packages
            .get(name)
            .map(|&id| ItemRef { codebase: self, id })
    }

    pub fn find_class(&self, qualified_name: &str) -> Option<ItemRef<'_>> {
        self.classes
            .get(qualified_name)
            .map(|&id| ItemRef { codebase: self, id })
    }

    /// Flip an item's own flag. Effective values of descendants follow on
    /// the next query since they are never cached.
    ///
    /// # Errors
    ///
    /// Returns [`CompatError::ItemNotFound`] when `id` is not part of this codebase.
    pub fn set_flag(&mut self, id: ItemId, flag: Flag, value: bool) -> Result<()> {
        let item = self
            .items
            .get_mut(id.index())
            .ok_or(CompatError::ItemNotFound { id: id.raw() })?;
        item.flags.set(flag, value);
        Ok(())
    }

    pub(crate) fn item(&self, id: ItemId) -> &Item {
        &self.items[id.index()]
    }
}

/// Copyable read-only handle on an item of a codebase.
///
/// Two handles are equal only when they point at the same item of the
/// same codebase instance.
#[derive(Clone, Copy)]
pub struct ItemRef<'a> {
    codebase: &'a Codebase,
    id: ItemId,
}

impl PartialEq for ItemRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.codebase, other.codebase) && self.id == other.id
    }
}

impl Eq for ItemRef<'_> {}

impl std::fmt::Debug for ItemRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ItemRef(#{} {})", self.id.raw(), self.describe())
    }
}

impl<'a> ItemRef<'a> {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn codebase(&self) -> &'a Codebase {
        self.codebase
    }

    pub fn item(&self) -> &'a Item {
        self.codebase.item(self.id)
    }

    pub fn kind(&self) -> &'a ItemKind {
        &self.item().kind
    }

    pub fn modifiers(&self) -> &'a Modifiers {
        &self.item().modifiers
    }

    pub fn flags(&self) -> &'a ItemFlags {
        &self.item().flags
    }

    pub fn rank(&self) -> u64 {
        self.item().rank
    }

    pub fn emit(&self) -> bool {
        self.item().emit
    }

    pub fn parent(&self) -> Option<ItemRef<'a>> {
        self.item().parent.map(|id| self.at(id))
    }

    fn at(&self, id: ItemId) -> ItemRef<'a> {
        ItemRef {
            codebase: self.codebase,
            id,
        }
    }

    fn refs(&self, ids: &'a [ItemId]) -> impl Iterator<Item = ItemRef<'a>> + 'a {
        let codebase = self.codebase;
        ids.iter().map(move |&id| ItemRef { codebase, id })
    }

    /// Own flag OR the nearest ancestor's effective flag, walked on demand.
    pub fn is_effectively(&self, flag: Flag) -> bool {
        let mut current = Some(*self);
        while let Some(item) = current {
            if item.flags().get(flag) {
                return true;
            }
            current = item.parent();
        }
        false
    }

    pub fn is_hidden(&self) -> bool {
        self.is_effectively(Flag::Hidden)
    }

    pub fn is_removed(&self) -> bool {
        self.is_effectively(Flag::Removed)
    }

    pub fn is_deprecated(&self) -> bool {
        self.is_effectively(Flag::Deprecated)
    }

    pub fn is_doc_only(&self) -> bool {
        self.is_effectively(Flag::DocOnly)
    }

    pub fn as_package(&self) -> Option<&'a PackageItem> {
        match self.kind() {
            ItemKind::Package(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&'a ClassItem> {
        match self.kind() {
            ItemKind::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Method payload for both methods and constructors
    pub fn as_method(&self) -> Option<&'a MethodItem> {
        match self.kind() {
            ItemKind::Method(m) | ItemKind::Constructor(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&'a FieldItem> {
        match self.kind() {
            ItemKind::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<&'a ParameterItem> {
        match self.kind() {
            ItemKind::Parameter(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self.kind(), ItemKind::Constructor(_))
    }

    pub fn class_kind(&self) -> Option<ClassKind> {
        self.as_class().map(|c| c.kind)
    }

    /// Annotation types and sealed classes: no foreign subtypes can exist
    pub fn is_closed_container(&self) -> bool {
        self.class_kind() == Some(ClassKind::AnnotationType) || self.modifiers().is_sealed
    }

    /// Package name, qualified class name, member name or parameter name
    pub fn name(&self) -> String {
        match self.kind() {
            ItemKind::Package(p) => p.name.clone(),
            ItemKind::Class(c) => c.qualified_name.clone(),
            ItemKind::Method(m) | ItemKind::Constructor(m) => m.name.clone(),
            ItemKind::Field(f) => f.name.clone(),
            ItemKind::Parameter(p) => p
                .name
                .clone()
                .unwrap_or_else(|| format!("arg{}", p.position + 1)),
        }
    }

    /// Class declaring a member, or enclosing a nested class
    pub fn containing_class(&self) -> Option<ItemRef<'a>> {
        match self.kind() {
            ItemKind::Package(_) => None,
            ItemKind::Class(c) => c.containing_class.map(|id| self.at(id)),
            ItemKind::Method(_) | ItemKind::Constructor(_) | ItemKind::Field(_) => self.parent(),
            ItemKind::Parameter(_) => self.parent().and_then(|m| m.parent()),
        }
    }

    pub fn containing_method(&self) -> Option<ItemRef<'a>> {
        match self.kind() {
            ItemKind::Parameter(_) => self.parent(),
            _ => None,
        }
    }

    /// Classes of a package, nested ones included
    pub fn classes(&self) -> impl Iterator<Item = ItemRef<'a>> + 'a {
        let ids: &'a [ItemId] = self.as_package().map_or(&[], |p| p.classes.as_slice());
        self.refs(ids)
    }

    pub fn constructors(&self) -> impl Iterator<Item = ItemRef<'a>> + 'a {
        let ids: &'a [ItemId] = self.as_class().map_or(&[], |c| c.constructors.as_slice());
        self.refs(ids)
    }

    pub fn methods(&self) -> impl Iterator<Item = ItemRef<'a>> + 'a {
        let ids: &'a [ItemId] = self.as_class().map_or(&[], |c| c.methods.as_slice());
        self.refs(ids)
    }

    pub fn fields(&self) -> impl Iterator<Item = ItemRef<'a>> + 'a {
        let ids: &'a [ItemId] = self.as_class().map_or(&[], |c| c.fields.as_slice());
        self.refs(ids)
    }

    pub fn parameters(&self) -> impl Iterator<Item = ItemRef<'a>> + 'a {
        let ids: &'a [ItemId] = self.as_method().map_or(&[], |m| m.parameters.as_slice());
        self.refs(ids)
    }

    pub fn parameter_count(&self) -> usize {
        self.as_method().map_or(0, |m| m.parameters.len())
    }

    /// Methods this one directly overrides, within the same codebase
    pub fn overridden(&self) -> impl Iterator<Item = ItemRef<'a>> + 'a {
        let ids: &'a [ItemId] = self.as_method().map_or(&[], |m| m.overridden.as_slice());
        self.refs(ids)
    }

    /// Type parameters visible at this item: its own, then those of every
    /// enclosing class from the innermost outwards.
    pub fn type_scope(&self) -> Vec<&'a TypeParameter> {
        let mut scope: Vec<&'a TypeParameter> = Vec::new();
        match self.kind() {
            ItemKind::Method(m) | ItemKind::Constructor(m) => scope.extend(&m.type_parameters),
            ItemKind::Class(c) => scope.extend(&c.type_parameters),
            _ => {}
        }
        let mut class = match self.kind() {
            ItemKind::Class(_) => self.containing_class(),
            ItemKind::Parameter(_) => {
                if let Some(m) = self.containing_method().and_then(|m| m.as_method()) {
                    scope.extend(&m.type_parameters);
                }
                self.containing_class()
            }
            _ => self.containing_class(),
        };
        while let Some(c) = class {
            if let Some(payload) = c.as_class() {
                scope.extend(&payload.type_parameters);
            }
            class = c.containing_class();
        }
        scope
    }

    /// Parameter types joined as a signature suffix, e.g. `(int, java.lang.String)`
    pub fn parameter_list(&self) -> String {
        let types: Vec<String> = self
            .parameters()
            .filter_map(|p| p.as_parameter().map(|p| p.param_type.to_string()))
            .collect();
        format!("({})", types.join(", "))
    }

    /// Stable human-readable subject used in issue messages
    pub fn describe(&self) -> String {
        let owner = || {
            self.containing_class()
                .and_then(|c| c.as_class().map(|c| c.qualified_name.clone()))
                .unwrap_or_default()
        };
        match self.kind() {
            ItemKind::Package(p) => format!("package {}", p.name),
            ItemKind::Class(c) => format!("{} {}", c.kind.label(), c.qualified_name),
            ItemKind::Method(m) => format!("method {}.{}{}", owner(), m.name, self.parameter_list()),
            ItemKind::Constructor(_) => format!("constructor {}{}", owner(), self.parameter_list()),
            ItemKind::Field(f) => format!("field {}.{}", owner(), f.name),
            ItemKind::Parameter(_) => {
                let method = self
                    .containing_method()
                    .map(|m| {
                        let name = m.as_method().map(|m| m.name.as_str()).unwrap_or_default();
                        if m.is_constructor() {
                            format!("{}{}", owner(), m.parameter_list())
                        } else {
                            format!("{}.{}{}", owner(), name, m.parameter_list())
                        }
                    })
                    .unwrap_or_default();
                format!("parameter {} in {}", self.name(), method)
            }
        }
    }
}
