//! Construction of a [`Codebase`] and its post-load initialization.

use super::codebase::{Codebase, ItemRef};
use super::item::{
    ClassItem, FieldItem, Item, ItemId, ItemKind, MethodItem, PackageItem, ParameterItem,
};
use super::modifiers::{ItemFlags, Modifiers, Visibility};
use super::spec::{ClassSpec, FieldSpec, MethodSpec, PackageSpec, ParameterSpec};
use super::types::canonical_sort;
use crate::errors::{CompatError, Result};
use crate::lookup::{find_method, matches, same_signature, superclass_chain};
use std::collections::BTreeMap;

/// Incrementally assembles a codebase.
///
/// The builder owns the insertion-rank counter; ranks are unique within
/// the codebase being built and never reused.
#[derive(Debug)]
pub struct CodebaseBuilder {
    location: String,
    partial_format: bool,
    items: Vec<Item>,
    packages: BTreeMap<String, ItemId>,
    classes: BTreeMap<String, ItemId>,
    next_rank: u64,
}

impl CodebaseBuilder {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            partial_format: false,
            items: Vec::new(),
            packages: BTreeMap::new(),
            classes: BTreeMap::new(),
            next_rank: 0,
        }
    }

    /// Mark the surface as coming from a format that omits inherited members
    pub fn partial_format(mut self, partial: bool) -> Self {
        self.partial_format = partial;
        self
    }

    fn push(
        &mut self,
        parent: Option<ItemId>,
        modifiers: Modifiers,
        mut flags: ItemFlags,
        emit: bool,
        kind: ItemKind,
    ) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        flags.originally_hidden = flags.hidden;
        self.items.push(Item {
            parent,
            rank: self.next_rank,
            modifiers,
            flags,
            emit,
            kind,
        });
        self.next_rank += 1;
        id
    }

    fn kind_mut(&mut self, id: ItemId) -> Result<&mut ItemKind> {
        self.items
            .get_mut(id.index())
            .map(|item| &mut item.kind)
            .ok_or(CompatError::ItemNotFound { id: id.raw() })
    }

    fn class_mut(&mut self, id: ItemId) -> Result<&mut ClassItem> {
        match self.kind_mut(id)? {
            ItemKind::Class(class) => Ok(class),
            other => Err(CompatError::WrongItemKind {
                id: id.raw(),
                expected: "class",
                found: other.label(),
            }),
        }
    }

    fn package_mut(&mut self, id: ItemId) -> Result<&mut PackageItem> {
        match self.kind_mut(id)? {
            ItemKind::Package(package) => Ok(package),
            other => Err(CompatError::WrongItemKind {
                id: id.raw(),
                expected: "package",
                found: other.label(),
            }),
        }
    }

    /// Get or create a public package.
    ///
    /// # Errors
    ///
    /// Returns [`CompatError::InvalidName`] for an empty name.
    pub fn add_package(&mut self, name: &str) -> Result<ItemId> {
        self.add_package_with(name, ItemFlags::default(), false)
    }

    /// Get or create a package carrying the given own flags.
    ///
    /// # Errors
    ///
    /// Returns [`CompatError::InvalidName`] for an empty name.
    pub fn add_package_with(&mut self, name: &str, flags: ItemFlags, stub: bool) -> Result<ItemId> {
        if name.trim().is_empty() {
            return Err(CompatError::InvalidName {
                what: "package",
                reason: "name is empty".to_string(),
            });
        }
        if let Some(&id) = self.packages.get(name) {
            return Ok(id);
        }
        let id = self.push(
            None,
            Modifiers::public(),
            flags,
            !stub,
            ItemKind::Package(PackageItem {
                name: name.to_string(),
                classes: Vec::new(),
            }),
        );
        self.packages.insert(name.to_string(), id);
        Ok(id)
    }

    /// Add a package and every class it describes.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`add_package_with`](Self::add_package_with)
    /// and [`add_class`](Self::add_class).
    pub fn add_package_spec(&mut self, spec: PackageSpec) -> Result<ItemId> {
        let package = self.add_package_with(&spec.name, spec.flags, spec.stub)?;
        for class in spec.classes {
            self.add_class(package, class)?;
        }
        Ok(package)
    }

    /// Add a top-level class, with all members and nested classes in `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`CompatError::DuplicateClass`] when the qualified name is
    /// taken and [`CompatError::WrongItemKind`] when `package` is not a package.
    pub fn add_class(&mut self, package: ItemId, spec: ClassSpec) -> Result<ItemId> {
        self.package_mut(package)?;
        self.insert_class(package, None, spec)
    }

    /// Add a class nested in `outer`; it belongs to the outer class's package.
    ///
    /// # Errors
    ///
    /// Same as [`add_class`](Self::add_class), with `outer` required to be a class.
    pub fn add_nested_class(&mut self, outer: ItemId, spec: ClassSpec) -> Result<ItemId> {
        let package = self.class_mut(outer)?.package;
        self.insert_class(package, Some(outer), spec)
    }

    fn insert_class(
        &mut self,
        package: ItemId,
        outer: Option<ItemId>,
        spec: ClassSpec,
    ) -> Result<ItemId> {
        let qualified_name = spec.name.trim().to_string();
        if qualified_name.is_empty() {
            return Err(CompatError::InvalidName {
                what: "class",
                reason: "qualified name is empty".to_string(),
            });
        }
        if self.classes.contains_key(&qualified_name) {
            return Err(CompatError::DuplicateClass { qualified_name });
        }
        let simple_name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&qualified_name)
            .to_string();

        let id = self.push(
            Some(outer.unwrap_or(package)),
            spec.modifiers,
            spec.flags,
            !spec.stub,
            ItemKind::Class(ClassItem {
                qualified_name: qualified_name.clone(),
                simple_name,
                kind: spec.kind,
                superclass: spec.superclass,
                interfaces: spec.interfaces,
                type_parameters: spec.type_parameters,
                constructors: Vec::new(),
                methods: Vec::new(),
                fields: Vec::new(),
                nested: Vec::new(),
                package,
                containing_class: outer,
            }),
        );
        self.classes.insert(qualified_name, id);
        self.package_mut(package)?.classes.push(id);
        if let Some(outer) = outer {
            self.class_mut(outer)?.nested.push(id);
        }

        for ctor in spec.constructors {
            self.add_constructor(id, ctor)?;
        }
        for method in spec.methods {
            self.add_method(id, method)?;
        }
        for field in spec.fields {
            self.add_field(id, field)?;
        }
        for nested in spec.nested {
            self.insert_class(package, Some(id), nested)?;
        }
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`CompatError::WrongItemKind`] when `class` is not a class.
    pub fn add_constructor(&mut self, class: ItemId, spec: MethodSpec) -> Result<ItemId> {
        self.insert_method(class, spec, true)
    }

    /// # Errors
    ///
    /// Returns [`CompatError::WrongItemKind`] when `class` is not a class and
    /// [`CompatError::InvalidName`] for an unnamed method.
    pub fn add_method(&mut self, class: ItemId, spec: MethodSpec) -> Result<ItemId> {
        if spec.name.trim().is_empty() {
            return Err(CompatError::InvalidName {
                what: "method",
                reason: "name is empty".to_string(),
            });
        }
        self.insert_method(class, spec, false)
    }

    fn insert_method(&mut self, class: ItemId, spec: MethodSpec, constructor: bool) -> Result<ItemId> {
        let owner = self.class_mut(class)?;
        let name = if constructor && spec.name.is_empty() {
            owner.simple_name.clone()
        } else {
            spec.name
        };
        let payload = MethodItem {
            name,
            return_type: if constructor { None } else { spec.return_type },
            parameters: Vec::new(),
            throws: spec.throws,
            type_parameters: spec.type_parameters,
            property: spec.property,
            inherited_from: None,
            inherited_method: None,
            inherited: false,
            overridden: Vec::new(),
            annotation_default: spec.annotation_default,
        };
        let kind = if constructor {
            ItemKind::Constructor(payload)
        } else {
            ItemKind::Method(payload)
        };
        let id = self.push(Some(class), spec.modifiers, spec.flags, !spec.stub, kind);

        let mut params = Vec::with_capacity(spec.parameters.len());
        for (position, param) in spec.parameters.into_iter().enumerate() {
            params.push(self.push_parameter(id, position, param));
        }
        if let ItemKind::Method(m) | ItemKind::Constructor(m) = self.kind_mut(id)? {
            m.parameters = params;
        }

        let owner = self.class_mut(class)?;
        if constructor {
            owner.constructors.push(id);
        } else {
            owner.methods.push(id);
        }
        Ok(id)
    }

    fn push_parameter(&mut self, method: ItemId, position: usize, spec: ParameterSpec) -> ItemId {
        let varargs = spec.varargs || spec.param_type.is_varargs();
        self.push(
            Some(method),
            spec.modifiers,
            ItemFlags::default(),
            true,
            ItemKind::Parameter(ParameterItem {
                name: spec.name,
                param_type: spec.param_type,
                has_default: spec.has_default,
                varargs,
                position,
            }),
        )
    }

    /// # Errors
    ///
    /// Returns [`CompatError::WrongItemKind`] when `class` is not a class and
    /// [`CompatError::InvalidName`] for an unnamed field.
    pub fn add_field(&mut self, class: ItemId, spec: FieldSpec) -> Result<ItemId> {
        if spec.name.trim().is_empty() {
            return Err(CompatError::InvalidName {
                what: "field",
                reason: "name is empty".to_string(),
            });
        }
        self.class_mut(class)?;
        let id = self.push(
            Some(class),
            spec.modifiers,
            spec.flags,
            !spec.stub,
            ItemKind::Field(FieldItem {
                name: spec.name,
                field_type: spec.field_type,
                value: spec.value,
                enum_constant: spec.enum_constant,
                inherited_from: None,
                inherited: false,
            }),
        );
        self.class_mut(class)?.fields.push(id);
        Ok(id)
    }

    /// Finish construction and run the initialization passes that need
    /// every class to exist: canonical ordering, inherited-member copies
    /// from hidden ancestors, and override resolution.
    pub fn build(self) -> Codebase {
        let mut next_rank = self.next_rank;
        let mut codebase = Codebase {
            location: self.location,
            partial_format: self.partial_format,
            items: self.items,
            packages: self.packages,
            classes: self.classes,
        };
        canonicalize(&mut codebase);
        let copies = plan_inherited_copies(&codebase);
        apply_inherited_copies(&mut codebase, copies, &mut next_rank);
        let overrides = plan_overrides(&codebase);
        for (method, overridden) in overrides {
            if let ItemKind::Method(m) = &mut codebase.items[method.index()].kind {
                m.overridden = overridden;
            }
        }
        codebase
    }
}

fn canonicalize(codebase: &mut Codebase) {
    for item in &mut codebase.items {
        match &mut item.kind {
            ItemKind::Class(c) => canonical_sort(&mut c.interfaces),
            ItemKind::Method(m) | ItemKind::Constructor(m) => canonical_sort(&mut m.throws),
            _ => {}
        }
    }
}

struct InheritedCopy {
    class: ItemId,
    source: ItemId,
    declared_in: ItemId,
}

/// Members of effectively-hidden ancestors that a visible class exposes.
fn plan_inherited_copies(codebase: &Codebase) -> Vec<InheritedCopy> {
    let mut plan = Vec::new();
    for class in codebase.classes() {
        if class.is_hidden() {
            continue;
        }
        let (chain, _) = superclass_chain(class, codebase);
        let mut methods: Vec<ItemRef<'_>> = class.methods().collect();
        let mut field_names: Vec<String> = class.fields().map(|f| f.name()).collect();

        for ancestor in chain.into_iter().take_while(|a| a.is_hidden()) {
            for method in ancestor.methods() {
                if !inheritable(method) {
                    continue;
                }
                let existing = methods.iter().find(|e| matches(**e, method));
                if existing.is_some_and(|e| same_signature(*e, method, true)) {
                    continue;
                }
                methods.push(method);
                plan.push(InheritedCopy {
                    class: class.id(),
                    source: method.id(),
                    declared_in: ancestor.id(),
                });
            }
            for field in ancestor.fields() {
                if !inheritable(field) || field_names.contains(&field.name()) {
                    continue;
                }
                field_names.push(field.name());
                plan.push(InheritedCopy {
                    class: class.id(),
                    source: field.id(),
                    declared_in: ancestor.id(),
                });
            }
        }
    }
    plan
}

fn inheritable(member: ItemRef<'_>) -> bool {
    let modifiers = member.modifiers();
    !member.flags().hidden && !modifiers.is_static && modifiers.visibility.is_accessible()
}

fn apply_inherited_copies(codebase: &mut Codebase, plan: Vec<InheritedCopy>, next_rank: &mut u64) {
    for copy in plan {
        let source = codebase.items[copy.source.index()].clone();
        let id = ItemId(codebase.items.len() as u32);
        let mut item = source.clone();
        item.parent = Some(copy.class);
        item.rank = *next_rank;
        *next_rank += 1;

        let is_method = match &mut item.kind {
            ItemKind::Method(m) => {
                m.inherited_from = Some(copy.declared_in);
                m.inherited_method = Some(copy.source);
                m.inherited = true;
                m.overridden = Vec::new();
                m.parameters = Vec::new();
                true
            }
            ItemKind::Field(f) => {
                f.inherited_from = Some(copy.declared_in);
                f.inherited = true;
                false
            }
            _ => continue,
        };
        codebase.items.push(item);

        if is_method {
            let source_params = match &source.kind {
                ItemKind::Method(m) => m.parameters.clone(),
                _ => Vec::new(),
            };
            let mut params = Vec::with_capacity(source_params.len());
            for param_id in source_params {
                let mut param = codebase.items[param_id.index()].clone();
                param.parent = Some(id);
                param.rank = *next_rank;
                *next_rank += 1;
                params.push(ItemId(codebase.items.len() as u32));
                codebase.items.push(param);
            }
            if let ItemKind::Method(m) = &mut codebase.items[id.index()].kind {
                m.parameters = params;
            }
        }

        if let ItemKind::Class(class) = &mut codebase.items[copy.class.index()].kind {
            if is_method {
                class.methods.push(id);
            } else {
                class.fields.push(id);
            }
        }
    }
}

/// For each overridable method, the first matching method found through
/// each direct supertype (superclass first, then interfaces in canonical order).
fn plan_overrides(codebase: &Codebase) -> Vec<(ItemId, Vec<ItemId>)> {
    let mut plan = Vec::new();
    for class in codebase.classes() {
        let Some(payload) = class.as_class() else {
            continue;
        };
        let supertypes: Vec<ItemRef<'_>> = payload
            .superclass
            .iter()
            .chain(payload.interfaces.iter())
            .filter_map(|t| codebase.find_class(t.base_name()))
            .filter(|s| *s != class)
            .collect();
        if supertypes.is_empty() {
            continue;
        }
        for method in class.methods() {
            let modifiers = method.modifiers();
            if modifiers.is_static || modifiers.visibility == Visibility::Private {
                continue;
            }
            let mut overridden: Vec<ItemId> = Vec::new();
            for supertype in &supertypes {
                let found = find_method(*supertype, method, true, true, codebase)
                    .filter(|m| !m.modifiers().is_static && m.modifiers().visibility != Visibility::Private);
                if let Some(found) = found {
                    if !overridden.contains(&found.id()) {
                        overridden.push(found.id());
                    }
                }
            }
            if !overridden.is_empty() {
                plan.push((method.id(), overridden));
            }
        }
    }
    plan
}
