//! Added and removed items.

use super::check::{is_enum_accessor, CompatibilityCheck};
use crate::issues::IssueKind;
use crate::lookup::{find_field_where, find_method, find_method_where, ApiLookup};
use crate::model::{ItemKind, ItemRef};
use std::collections::BTreeSet;

impl<'a> CompatibilityCheck<'a> {
    pub(super) fn on_added(&mut self, new: ItemRef<'a>) {
        if new.flags().originally_hidden {
            return;
        }
        let kind = match new.kind() {
            ItemKind::Package(_) => IssueKind::AddedPackage,
            ItemKind::Class(_) => IssueKind::AddedClass,
            ItemKind::Field(_) => IssueKind::AddedField,
            ItemKind::Constructor(_) => IssueKind::AddedMethod,
            ItemKind::Method(_) => match self.added_method_kind(new) {
                Some(kind) => kind,
                None => return,
            },
            ItemKind::Parameter(_) => return,
        };
        self.reporter
            .report(kind, new, format!("Added {}", new.describe()));
    }

    /// Issue kind for a method only the new side has, or `None` when the
    /// addition is not a real change to the surface.
    fn added_method_kind(&self, new: ItemRef<'a>) -> Option<IssueKind> {
        let method = new.as_method()?;
        // Older snapshot formats omitted members inherited from hidden classes
        if method.inherited && self.old_view.primary().is_partial_format() {
            return None;
        }
        if overrides_non_emitted(new) || is_enum_accessor(new) {
            return None;
        }
        let owner = new.containing_class()?;
        if method.annotation_default.is_some() && owner.is_closed_container() {
            return None;
        }
        let inherited = self
            .old_view
            .find_class(&owner.name())
            .and_then(|class| find_method(class, new, true, true, self.old_view));
        if inherited.is_some_and(|found| found != new && found.modifiers().is_abstract) {
            return None;
        }
        Some(if new.modifiers().is_abstract {
            IssueKind::AddedAbstractMethod
        } else {
            IssueKind::AddedMethod
        })
    }

    pub(super) fn on_removed(&mut self, old: ItemRef<'a>, from: Option<ItemRef<'a>>) {
        if !old.emit() || !self.filter.test(old) || old.is_hidden() {
            return;
        }
        let kind = match old.kind() {
            ItemKind::Package(_) => IssueKind::RemovedPackage,
            ItemKind::Class(_) => IssueKind::RemovedClass,
            ItemKind::Method(_) | ItemKind::Constructor(_) => {
                if self.still_inherited(old, from) {
                    return;
                }
                IssueKind::RemovedMethod
            }
            ItemKind::Field(_) => {
                if self.still_inherited(old, from) {
                    return;
                }
                IssueKind::RemovedField
            }
            ItemKind::Parameter(_) => return,
        };
        let prefix = if old.is_deprecated() {
            "Removed deprecated"
        } else {
            "Removed"
        };
        self.reporter
            .report(kind, old, format!("{} {}", prefix, old.describe()));
    }

    /// Whether the new class still exposes `old` through an included
    /// supertype.
    fn still_inherited(&self, old: ItemRef<'a>, from: Option<ItemRef<'a>>) -> bool {
        let Some(class) = from else {
            return false;
        };
        let filter = self.filter;
        let accept = |candidate: ItemRef<'a>| filter.test(candidate);
        match old.as_field() {
            Some(field) => {
                find_field_where(class, &field.name, true, true, self.new_view, &accept).is_some()
            }
            None => find_method_where(class, old, true, true, self.new_view, &accept).is_some(),
        }
    }
}

/// Whether the override chain of `method` reaches a method that is not
/// emitted, i.e. one declared by a stub class outside the surface.
fn overrides_non_emitted(method: ItemRef<'_>) -> bool {
    let mut stack: Vec<ItemRef<'_>> = method.overridden().collect();
    let mut seen = BTreeSet::new();
    while let Some(current) = stack.pop() {
        if !seen.insert(current.id()) {
            continue;
        }
        if !current.emit() {
            return true;
        }
        stack.extend(current.overridden());
    }
    false
}
