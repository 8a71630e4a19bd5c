//! Merge-join over two API trees.
//!
//! Each level is walked in a canonical order that does not depend on
//! declaration order: packages and classes by name, members by signature
//! key, parameters by position.

use super::filter::ApiFilter;
use super::visitor::ComparisonVisitor;
use crate::lookup::matches;
use crate::model::{Codebase, ItemRef};
use std::collections::{BTreeMap, BTreeSet};

/// Walk `old` and `new` in lockstep and report every matched, added and
/// removed item to `visitor`.
///
/// Items on the new side that `filter` rejects are treated as absent; the
/// old side is walked unfiltered.
pub fn compare<'a, V>(
    visitor: &mut V,
    old: &'a Codebase,
    new: &'a Codebase,
    filter: &dyn ApiFilter,
) where
    V: ComparisonVisitor<'a> + ?Sized,
{
    let names: BTreeSet<String> = old
        .packages()
        .chain(new.packages())
        .map(|p| p.name())
        .collect();
    for name in &names {
        let old_package = old.find_package(name);
        let new_package = new.find_package(name).filter(|p| filter.test(*p));
        match (old_package, new_package) {
            (Some(o), Some(n)) => {
                visitor.compare_items(o, n);
                visitor.compare_package(o, n);
                compare_classes(visitor, o, n, filter);
            }
            (None, Some(n)) => visitor.added(n),
            (Some(o), None) => visitor.removed(o, None),
            (None, None) => {}
        }
    }
}

fn compare_classes<'a, V>(
    visitor: &mut V,
    old_package: ItemRef<'a>,
    new_package: ItemRef<'a>,
    filter: &dyn ApiFilter,
) where
    V: ComparisonVisitor<'a> + ?Sized,
{
    let old_classes: BTreeMap<String, ItemRef<'a>> =
        old_package.classes().map(|c| (c.name(), c)).collect();
    let new_classes: BTreeMap<String, ItemRef<'a>> = new_package
        .classes()
        .filter(|c| filter.test(*c))
        .map(|c| (c.name(), c))
        .collect();
    let names: BTreeSet<&String> = old_classes.keys().chain(new_classes.keys()).collect();
    for name in names {
        match (old_classes.get(name), new_classes.get(name)) {
            (Some(&o), Some(&n)) => {
                visitor.compare_items(o, n);
                visitor.compare_class(o, n);
                compare_members(visitor, o, n, filter);
            }
            (None, Some(&n)) if !within_unmatched(n, &old_classes) => visitor.added(n),
            (Some(&o), None) if !within_unmatched(o, &new_classes) => {
                visitor.removed(o, Some(new_package))
            }
            _ => {}
        }
    }
}

/// True when some enclosing class of `class` is missing from `other`, so
/// the change is already reported on that enclosing class.
fn within_unmatched(class: ItemRef<'_>, other: &BTreeMap<String, ItemRef<'_>>) -> bool {
    std::iter::successors(class.containing_class(), |c| c.containing_class())
        .any(|outer| !other.contains_key(&outer.name()))
}

fn compare_members<'a, V>(
    visitor: &mut V,
    old_class: ItemRef<'a>,
    new_class: ItemRef<'a>,
    filter: &dyn ApiFilter,
) where
    V: ComparisonVisitor<'a> + ?Sized,
{
    join_methods(
        visitor,
        new_class,
        old_class.constructors().collect(),
        new_class.constructors().filter(|c| filter.test(*c)).collect(),
    );
    join_methods(
        visitor,
        new_class,
        old_class.methods().collect(),
        new_class.methods().filter(|m| filter.test(*m)).collect(),
    );
    join_fields(visitor, old_class, new_class, filter);
}

/// Canonical ordering key of a method: name, arity, erased parameter
/// types, literal parameter types, then insertion rank as the last resort.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct MethodKey {
    name: String,
    arity: usize,
    erased: Vec<String>,
    literal: Vec<String>,
    rank: u64,
}

impl MethodKey {
    fn of(method: ItemRef<'_>) -> Self {
        let scope = method.type_scope();
        let types: Vec<_> = method
            .parameters()
            .filter_map(|p| p.as_parameter().map(|p| &p.param_type))
            .collect();
        Self {
            name: method.name(),
            arity: types.len(),
            erased: types.iter().map(|t| t.erasure_in(&scope)).collect(),
            literal: types.iter().map(|t| t.to_string()).collect(),
            rank: method.rank(),
        }
    }

    /// The key without the insertion rank
    fn signature(&self) -> (&str, usize, &[String], &[String]) {
        (&self.name, self.arity, &self.erased, &self.literal)
    }
}

enum Event<'a> {
    Matched(ItemRef<'a>, ItemRef<'a>),
    Removed(ItemRef<'a>),
    Added(ItemRef<'a>),
}

fn sorted_by_key(items: Vec<ItemRef<'_>>) -> Vec<(MethodKey, ItemRef<'_>)> {
    let mut keyed: Vec<_> = items.into_iter().map(|m| (MethodKey::of(m), m)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed
}

/// Pair old and new methods greedily: each old method, in key order,
/// takes the first unpaired new method it `matches`.
fn join_methods<'a, V>(
    visitor: &mut V,
    new_class: ItemRef<'a>,
    old: Vec<ItemRef<'a>>,
    new: Vec<ItemRef<'a>>,
) where
    V: ComparisonVisitor<'a> + ?Sized,
{
    let old = sorted_by_key(old);
    let new = sorted_by_key(new);
    let mut paired = vec![false; new.len()];
    let mut events: Vec<(MethodKey, Event<'a>)> = Vec::with_capacity(old.len() + new.len());

    for (key, o) in old {
        let partner = new
            .iter()
            .enumerate()
            .find(|(i, (_, n))| !paired[*i] && matches(o, *n));
        match partner {
            Some((i, &(_, n))) => {
                paired[i] = true;
                events.push((key, Event::Matched(o, n)));
            }
            None => events.push((key, Event::Removed(o))),
        }
    }
    for ((key, n), was_paired) in new.into_iter().zip(paired) {
        if !was_paired {
            events.push((key, Event::Added(n)));
        }
    }
    // Stable, so a matched or removed event precedes an added one with an
    // equal signature regardless of either side's declaration order
    events.sort_by(|a, b| a.0.signature().cmp(&b.0.signature()));

    for (_, event) in events {
        match event {
            Event::Matched(o, n) => {
                visitor.compare_items(o, n);
                visitor.compare_method(o, n);
                for (po, pn) in o.parameters().zip(n.parameters()) {
                    visitor.compare_items(po, pn);
                    visitor.compare_parameter(po, pn);
                }
            }
            Event::Removed(o) => visitor.removed(o, Some(new_class)),
            Event::Added(n) => visitor.added(n),
        }
    }
}

fn join_fields<'a, V>(
    visitor: &mut V,
    old_class: ItemRef<'a>,
    new_class: ItemRef<'a>,
    filter: &dyn ApiFilter,
) where
    V: ComparisonVisitor<'a> + ?Sized,
{
    let mut old_fields: BTreeMap<String, ItemRef<'a>> = BTreeMap::new();
    for field in old_class.fields() {
        old_fields.entry(field.name()).or_insert(field);
    }
    let mut new_fields: BTreeMap<String, ItemRef<'a>> = BTreeMap::new();
    for field in new_class.fields().filter(|f| filter.test(*f)) {
        new_fields.entry(field.name()).or_insert(field);
    }
    let names: BTreeSet<&String> = old_fields.keys().chain(new_fields.keys()).collect();
    for name in names {
        match (old_fields.get(name), new_fields.get(name)) {
            (Some(&o), Some(&n)) => {
                visitor.compare_items(o, n);
                visitor.compare_field(o, n);
            }
            (None, Some(&n)) => visitor.added(n),
            (Some(&o), None) => visitor.removed(o, Some(new_class)),
            (None, None) => {}
        }
    }
}
