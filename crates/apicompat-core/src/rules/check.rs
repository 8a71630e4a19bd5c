//! Rules applied to matched pairs.
//!
//! Structural additions and removals live in `structural.rs`; this file
//! owns everything reported while walking items present on both sides.

use super::reporter::Reporter;
use crate::compare::{ApiFilter, ComparisonVisitor};
use crate::issues::{IssueKind, SeverityTable};
use crate::lookup::{extends, extends_or_implements, implements, ApiLookup};
use crate::merged::MergedView;
use crate::model::types::OBJECT;
use crate::model::{ClassKind, ItemKind, ItemRef, Nullability, TypeParameter, TypeRef};

/// Visitor that turns comparator events into compatibility issues.
///
/// Both views are merged so supertype walks can fall back to a baseline
/// when the primary codebase lacks a class.
pub struct CompatibilityCheck<'a> {
    pub(super) old_view: &'a MergedView<'a>,
    pub(super) new_view: &'a MergedView<'a>,
    pub(super) filter: &'a dyn ApiFilter,
    pub(super) reporter: Reporter<'a>,
}

impl<'a> CompatibilityCheck<'a> {
    pub fn new(
        old_view: &'a MergedView<'a>,
        new_view: &'a MergedView<'a>,
        filter: &'a dyn ApiFilter,
        severities: &'a dyn SeverityTable,
    ) -> Self {
        Self {
            old_view,
            new_view,
            filter,
            reporter: Reporter::new(severities),
        }
    }

    pub fn reporter(&self) -> &Reporter<'a> {
        &self.reporter
    }

    pub fn into_reporter(self) -> Reporter<'a> {
        self.reporter
    }

    fn check_visibility(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        let was = old.modifiers().visibility;
        let now = new.modifiers().visibility;
        if now < was {
            self.reporter.report(
                IssueKind::ChangedScope,
                new,
                format!(
                    "{} changed visibility from {} to {}",
                    title(new),
                    was.label(),
                    now.label()
                ),
            );
        }
    }

    fn check_nullability(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        let Some(was) = old.modifiers().nullability else {
            return;
        };
        match new.modifiers().nullability {
            None => {
                // A primitive can never be null, so dropping @NonNull from it is a no-op
                let implicit_non_null = declared_type(new).is_some_and(TypeRef::is_primitive);
                if !(implicit_non_null && was == Nullability::NonNull) {
                    self.reporter.report(
                        IssueKind::InvalidNullConversion,
                        new,
                        format!(
                            "Attempted to remove {} annotation from {}",
                            was.annotation_name(),
                            new.describe()
                        ),
                    );
                }
            }
            Some(now) if now != was => {
                let (role, incompatible) = match new.kind() {
                    ItemKind::Parameter(_) => ("parameter", was == Nullability::Nullable),
                    ItemKind::Method(_) => ("method return", was == Nullability::NonNull),
                    ItemKind::Field(_) => (
                        "field",
                        was == Nullability::NonNull || !new.modifiers().is_final,
                    ),
                    _ => ("item", false),
                };
                if incompatible {
                    self.reporter.report(
                        IssueKind::InvalidNullConversion,
                        new,
                        format!(
                            "Attempted to change {} from {} to {}: incompatible change for {}",
                            role,
                            was.annotation_name(),
                            now.annotation_name(),
                            new.describe()
                        ),
                    );
                }
            }
            Some(_) => {}
        }
    }

    fn check_static(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        if old.modifiers().is_static != new.modifiers().is_static {
            self.reporter.report(
                IssueKind::ChangedStatic,
                new,
                format!("{} has changed 'static' qualifier", title(new)),
            );
        }
    }

    fn check_interfaces(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        let (Some(old_class), Some(new_class)) = (old.as_class(), new.as_class()) else {
            return;
        };
        for declared in &old_class.interfaces {
            if implements(new, declared.base_name(), self.new_view) == Some(false) {
                self.reporter.report(
                    IssueKind::RemovedInterface,
                    new,
                    format!("{} no longer implements {}", title(new), declared),
                );
            }
        }
        if !new.is_closed_container() {
            for declared in &new_class.interfaces {
                if implements(old, declared.base_name(), self.old_view) == Some(false) {
                    self.reporter.report(
                        IssueKind::AddedInterface,
                        new,
                        format!("Added interface {} to {}", declared, new.describe()),
                    );
                }
            }
        }
        if let Some(old_super) = &old_class.superclass {
            if extends(new, old_super.base_name(), self.new_view) == Some(false) {
                let now = new_class
                    .superclass
                    .as_ref()
                    .map_or(OBJECT, TypeRef::as_str);
                self.reporter.report(
                    IssueKind::ChangedSuperclass,
                    new,
                    format!(
                        "{} superclass changed from {} to {}",
                        title(new),
                        old_super,
                        now
                    ),
                );
            }
        }
    }

    fn check_method_finality(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        if new.is_constructor() || old.modifiers().is_static || new.modifiers().is_static {
            return;
        }
        let (Some(old_owner), Some(new_owner)) = (old.containing_class(), new.containing_class())
        else {
            return;
        };
        if old_owner.class_kind() == Some(ClassKind::Enum)
            || new_owner.class_kind() == Some(ClassKind::Enum)
        {
            return;
        }
        // Nothing can override members of a class nobody can subclass
        if old_owner.class_kind() == Some(ClassKind::Class) && !has_accessible_constructor(old_owner)
        {
            return;
        }
        match (effectively_final(old), effectively_final(new)) {
            (false, true) => self.reporter.report(
                IssueKind::AddedFinal,
                new,
                format!("{} has added 'final' qualifier", title(new)),
            ),
            (true, false) => self.reporter.report(
                IssueKind::RemovedFinal,
                new,
                format!("{} has removed 'final' qualifier", title(new)),
            ),
            _ => {}
        }
    }

    fn check_return_type(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        let (Some(old_method), Some(new_method)) = (old.as_method(), new.as_method()) else {
            return;
        };
        let (Some(was), Some(now)) = (&old_method.return_type, &new_method.return_type) else {
            return;
        };
        if self.return_type_compatible(old, was, new, now) == Some(false) {
            self.reporter.report(
                IssueKind::ChangedType,
                new,
                format!(
                    "{} has changed return type from {} to {}",
                    title(new),
                    was,
                    now
                ),
            );
        }
    }

    /// `None` when an unresolved class leaves the answer open.
    fn return_type_compatible(
        &self,
        old: ItemRef<'a>,
        was: &TypeRef,
        new: ItemRef<'a>,
        now: &TypeRef,
    ) -> Option<bool> {
        let old_scope = old.type_scope();
        let new_scope = new.type_scope();
        match (type_parameter_of(was, &old_scope), type_parameter_of(now, &new_scope)) {
            (None, Some(param)) => {
                if was.is_primitive() || was.array_dimensions() != now.array_dimensions() {
                    return Some(false);
                }
                for bound in param.bounds.iter().filter(|b| b.base_name() != OBJECT) {
                    let class = self.old_view.find_class(was.base_name())?;
                    if !extends_or_implements(class, bound.base_name(), self.old_view)? {
                        return Some(false);
                    }
                }
                Some(true)
            }
            (Some(_), None) => Some(false),
            (Some(was_param), Some(now_param)) => Some(
                was.array_dimensions() == now.array_dimensions()
                    && was_param.bounds == now_param.bounds,
            ),
            (None, None) => Some(same_text(was, now)),
        }
    }

    fn check_throws(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        let (Some(old_method), Some(new_method)) = (old.as_method(), new.as_method()) else {
            return;
        };
        if is_finalizer(old) || is_enum_accessor(new) {
            return;
        }
        for thrown in &old_method.throws {
            if method_throws(new, thrown.base_name(), self.new_view) == Some(false) {
                self.reporter.report(
                    IssueKind::ChangedThrows,
                    new,
                    format!("{} no longer throws exception {}", title(new), thrown),
                );
            }
        }
        for thrown in &new_method.throws {
            if method_throws(old, thrown.base_name(), self.old_view) == Some(false) {
                self.reporter.report(
                    IssueKind::ChangedThrows,
                    new,
                    format!("{} added thrown exception {}", title(new), thrown),
                );
            }
        }
    }
}

impl<'a> ComparisonVisitor<'a> for CompatibilityCheck<'a> {
    fn compare_items(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        if matches!(new.kind(), ItemKind::Parameter(_)) {
            return;
        }
        if old.flags().deprecated && !new.flags().deprecated {
            self.reporter.report(
                IssueKind::ChangedDeprecated,
                new,
                format!("{} has changed deprecation state true --> false", title(new)),
            );
        }
    }

    fn compare_class(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        let (Some(old_kind), Some(new_kind)) = (old.class_kind(), new.class_kind()) else {
            return;
        };
        if old_kind != new_kind {
            self.reporter.report(
                IssueKind::ChangedClass,
                new,
                format!(
                    "{} changed class/interface declaration from {} to {}",
                    title(new),
                    old_kind.label(),
                    new_kind.label()
                ),
            );
        }
        self.check_visibility(old, new);

        let was = old.modifiers();
        let now = new.modifiers();
        if !was.is_final && now.is_final {
            if has_accessible_constructor(old) {
                self.reporter.report(
                    IssueKind::AddedFinal,
                    new,
                    format!("{} added 'final' qualifier", title(new)),
                );
            } else {
                self.reporter.report(
                    IssueKind::AddedFinalUninstantiable,
                    new,
                    format!(
                        "{} added 'final' qualifier but was previously uninstantiable and therefore could not be subclassed",
                        title(new)
                    ),
                );
            }
        }
        if old_kind == ClassKind::Class
            && new_kind == ClassKind::Class
            && !was.is_abstract
            && now.is_abstract
        {
            self.reporter.report(
                IssueKind::ChangedAbstract,
                new,
                format!("{} changed 'abstract' qualifier", title(new)),
            );
        }
        self.check_static(old, new);
        self.check_interfaces(old, new);
    }

    fn compare_method(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        self.check_visibility(old, new);
        if !new.is_constructor() {
            self.check_nullability(old, new);
        }
        self.check_method_finality(old, new);

        let was = old.modifiers();
        let now = new.modifiers();
        let interface_like = new
            .containing_class()
            .and_then(|c| c.class_kind())
            .is_some_and(|k| k.is_interface_like());
        if !interface_like && !was.is_abstract && now.is_abstract {
            let legacy_gap = old.as_method().is_some_and(|m| m.inherited)
                && old.codebase().is_partial_format();
            if !legacy_gap {
                self.reporter.report(
                    IssueKind::ChangedAbstract,
                    new,
                    format!("{} has changed 'abstract' qualifier", title(new)),
                );
            }
        }
        if was.is_default && !now.is_default && !now.is_static {
            self.reporter.report(
                IssueKind::ChangedDefault,
                new,
                format!("{} has changed 'default' qualifier", title(new)),
            );
        }
        self.check_static(old, new);
        self.check_return_type(old, new);
        self.check_throws(old, new);
    }

    fn compare_field(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        let (Some(old_field), Some(new_field)) = (old.as_field(), new.as_field()) else {
            return;
        };
        self.check_visibility(old, new);
        self.check_nullability(old, new);
        self.check_static(old, new);
        if !old.modifiers().is_final && new.modifiers().is_final {
            self.reporter.report(
                IssueKind::AddedFinal,
                new,
                format!("{} has added 'final' qualifier", title(new)),
            );
        }
        if !same_text(&old_field.field_type, &new_field.field_type) {
            self.reporter.report(
                IssueKind::ChangedType,
                new,
                format!(
                    "{} has changed type from {} to {}",
                    title(new),
                    old_field.field_type,
                    new_field.field_type
                ),
            );
        }
        if let Some(was) = &old_field.value {
            let message = match &new_field.value {
                Some(now) if now == was => None,
                Some(now) => Some(format!(
                    "{} has changed value from {} to {}",
                    title(new),
                    was,
                    now
                )),
                None => Some(format!(
                    "{} has changed value from {} to nothing",
                    title(new),
                    was
                )),
            };
            if let Some(message) = message {
                self.reporter.report(IssueKind::ChangedValue, new, message);
            }
        }
    }

    fn compare_parameter(&mut self, old: ItemRef<'a>, new: ItemRef<'a>) {
        let (Some(was), Some(now)) = (old.as_parameter(), new.as_parameter()) else {
            return;
        };
        self.check_nullability(old, new);

        let method = new
            .containing_method()
            .map(|m| m.describe())
            .unwrap_or_default();
        if let Some(old_name) = &was.name {
            match &now.name {
                None => self.reporter.report(
                    IssueKind::ParameterNameRemoved,
                    new,
                    format!("Attempted to remove parameter name from {}", old.describe()),
                ),
                Some(new_name) if new_name != old_name => self.reporter.report(
                    IssueKind::ParameterNameChange,
                    new,
                    format!(
                        "Attempted to change parameter name from {} to {} in {}",
                        old_name, new_name, method
                    ),
                ),
                Some(_) => {}
            }
        }
        if was.has_default && !now.has_default {
            self.reporter.report(
                IssueKind::DefaultValueRemoved,
                new,
                format!("Attempted to remove default value from {}", old.describe()),
            );
        }
        if was.varargs && !now.varargs {
            self.reporter.report(
                IssueKind::VarargRemoval,
                new,
                format!(
                    "Changing from varargs to array is an incompatible change to {}",
                    new.describe()
                ),
            );
        }
    }

    fn added(&mut self, new: ItemRef<'a>) {
        self.on_added(new);
    }

    fn removed(&mut self, old: ItemRef<'a>, from: Option<ItemRef<'a>>) {
        self.on_removed(old, from);
    }
}

/// Item description with its first letter capitalized, for message heads
pub(super) fn title(item: ItemRef<'_>) -> String {
    let text = item.describe();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => text,
    }
}

fn declared_type<'a>(item: ItemRef<'a>) -> Option<&'a TypeRef> {
    match item.kind() {
        ItemKind::Method(m) => m.return_type.as_ref(),
        ItemKind::Field(f) => Some(&f.field_type),
        ItemKind::Parameter(p) => Some(&p.param_type),
        _ => None,
    }
}

fn same_text(a: &TypeRef, b: &TypeRef) -> bool {
    a.as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .eq(b.as_str().chars().filter(|c| !c.is_whitespace()))
}

fn type_parameter_of<'s>(ty: &TypeRef, scope: &[&'s TypeParameter]) -> Option<&'s TypeParameter> {
    scope.iter().copied().find(|p| p.name == ty.base_name())
}

fn has_accessible_constructor(class: ItemRef<'_>) -> bool {
    class
        .constructors()
        .any(|c| c.modifiers().visibility.is_accessible() && !c.is_hidden())
}

/// Final itself, or declared in a final or sealed class
fn effectively_final(method: ItemRef<'_>) -> bool {
    method.modifiers().is_final
        || method
            .containing_class()
            .is_some_and(|c| c.modifiers().is_final || c.modifiers().is_sealed)
}

fn is_finalizer(method: ItemRef<'_>) -> bool {
    method.as_method().is_some_and(|m| m.name == "finalize") && method.parameter_count() == 0
}

/// `values()` and `valueOf(String)` generated for every enum
pub(super) fn is_enum_accessor(method: ItemRef<'_>) -> bool {
    let Some(payload) = method.as_method() else {
        return false;
    };
    if method.containing_class().and_then(|c| c.class_kind()) != Some(ClassKind::Enum) {
        return false;
    }
    match (payload.name.as_str(), method.parameter_count()) {
        ("values", 0) => true,
        ("valueOf", 1) => method
            .parameters()
            .filter_map(|p| p.as_parameter())
            .all(|p| matches!(p.param_type.as_str(), "java.lang.String" | "String")),
        _ => false,
    }
}

/// Whether `method` declares `name` or a subclass of it.
fn method_throws<'a>(method: ItemRef<'a>, name: &str, view: &'a dyn ApiLookup) -> Option<bool> {
    let mut complete = true;
    for thrown in &method.as_method()?.throws {
        if thrown.base_name() == name {
            return Some(true);
        }
        match view
            .find_class(thrown.base_name())
            .map(|class| extends(class, name, view))
        {
            Some(Some(true)) => return Some(true),
            Some(Some(false)) => {}
            _ => complete = false,
        }
    }
    complete.then_some(false)
}
