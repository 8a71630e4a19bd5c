use super::signature::matches;
use super::ApiLookup;
use crate::model::types::OBJECT;
use crate::model::{ItemRef, TypeRef};
use std::collections::{BTreeSet, VecDeque};

fn resolve<'a>(ty: &TypeRef, view: &'a dyn ApiLookup) -> Option<ItemRef<'a>> {
    view.find_class(ty.base_name())
}

/// Superclasses of `class`, nearest first.
///
/// The flag is false when the walk stopped at a reference the view cannot
/// resolve (other than `java.lang.Object`), i.e. the chain may be longer.
pub fn superclass_chain<'a>(
    class: ItemRef<'a>,
    view: &'a dyn ApiLookup,
) -> (Vec<ItemRef<'a>>, bool) {
    let mut chain = Vec::new();
    let mut seen = BTreeSet::from([class.name()]);
    let mut current = class;
    loop {
        let Some(superclass) = current.as_class().and_then(|c| c.superclass.as_ref()) else {
            return (chain, true);
        };
        match resolve(superclass, view) {
            Some(next) if seen.insert(next.name()) => {
                chain.push(next);
                current = next;
            }
            Some(_) => return (chain, true),
            None => return (chain, superclass.base_name() == OBJECT),
        }
    }
}

/// Breadth-first walk over the interfaces declared by `roots` and their
/// super-interfaces, each resolved interface expanded once. `visit` sees
/// every declared reference with its resolution; `Some` stops the walk.
fn walk_interfaces<'a, T>(
    roots: &[ItemRef<'a>],
    view: &'a dyn ApiLookup,
    mut visit: impl FnMut(&TypeRef, Option<ItemRef<'a>>) -> Option<T>,
) -> Option<T> {
    let mut queue: VecDeque<ItemRef<'a>> = roots.iter().copied().collect();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    while let Some(current) = queue.pop_front() {
        let Some(payload) = current.as_class() else {
            continue;
        };
        for declared in &payload.interfaces {
            let resolved = resolve(declared, view);
            if let Some(found) = visit(declared, resolved) {
                return Some(found);
            }
            if let Some(next) = resolved {
                if seen.insert(next.name()) {
                    queue.push_back(next);
                }
            }
        }
    }
    None
}

/// Find a method (or constructor) of `class` matching `probe`.
///
/// Own members come first. Then, when asked, the superclass chain (first
/// match wins), then interfaces breadth-first. Constructors are never
/// inherited, so a constructor probe only looks at `class` itself.
pub fn find_method<'a>(
    class: ItemRef<'a>,
    probe: ItemRef<'_>,
    include_super_classes: bool,
    include_interfaces: bool,
    view: &'a dyn ApiLookup,
) -> Option<ItemRef<'a>> {
    find_method_where(
        class,
        probe,
        include_super_classes,
        include_interfaces,
        view,
        &|_| true,
    )
}

/// [`find_method`] restricted to candidates accepted by `accept`.
pub fn find_method_where<'a>(
    class: ItemRef<'a>,
    probe: ItemRef<'_>,
    include_super_classes: bool,
    include_interfaces: bool,
    view: &'a dyn ApiLookup,
    accept: &dyn Fn(ItemRef<'a>) -> bool,
) -> Option<ItemRef<'a>> {
    let hit = |candidate: &ItemRef<'a>| matches(*candidate, probe) && accept(*candidate);
    if probe.is_constructor() {
        return class.constructors().find(hit);
    }
    if let Some(own) = class.methods().find(hit) {
        return Some(own);
    }
    search_supertypes(
        class,
        include_super_classes,
        include_interfaces,
        view,
        |t| t.methods().find(hit),
    )
}

/// Find a field by name, searching like [`find_method`].
pub fn find_field<'a>(
    class: ItemRef<'a>,
    name: &str,
    include_super_classes: bool,
    include_interfaces: bool,
    view: &'a dyn ApiLookup,
) -> Option<ItemRef<'a>> {
    find_field_where(
        class,
        name,
        include_super_classes,
        include_interfaces,
        view,
        &|_| true,
    )
}

/// [`find_field`] restricted to candidates accepted by `accept`.
pub fn find_field_where<'a>(
    class: ItemRef<'a>,
    name: &str,
    include_super_classes: bool,
    include_interfaces: bool,
    view: &'a dyn ApiLookup,
    accept: &dyn Fn(ItemRef<'a>) -> bool,
) -> Option<ItemRef<'a>> {
    let hit = |candidate: &ItemRef<'a>| {
        candidate.as_field().is_some_and(|f| f.name == name) && accept(*candidate)
    };
    if let Some(own) = class.fields().find(hit) {
        return Some(own);
    }
    search_supertypes(
        class,
        include_super_classes,
        include_interfaces,
        view,
        |t| t.fields().find(hit),
    )
}

fn search_supertypes<'a>(
    class: ItemRef<'a>,
    include_super_classes: bool,
    include_interfaces: bool,
    view: &'a dyn ApiLookup,
    search: impl Fn(ItemRef<'a>) -> Option<ItemRef<'a>>,
) -> Option<ItemRef<'a>> {
    if !include_super_classes && !include_interfaces {
        return None;
    }
    let mut roots = vec![class];
    if include_super_classes {
        let (chain, _) = superclass_chain(class, view);
        for superclass in &chain {
            if let Some(found) = search(*superclass) {
                return Some(found);
            }
        }
        roots.extend(chain);
    }
    if !include_interfaces {
        return None;
    }
    walk_interfaces(&roots, view, |_, resolved| resolved.and_then(&search))
}

/// Whether `class` is `name` or has it on its superclass chain.
///
/// `None` when the chain reaches a class the view cannot resolve before
/// the answer is known.
pub fn extends<'a>(class: ItemRef<'a>, name: &str, view: &'a dyn ApiLookup) -> Option<bool> {
    if name == OBJECT || class.name() == name {
        return Some(true);
    }
    let mut seen = BTreeSet::from([class.name()]);
    let mut current = class;
    loop {
        let Some(superclass) = current.as_class().and_then(|c| c.superclass.as_ref()) else {
            return Some(false);
        };
        if superclass.base_name() == name {
            return Some(true);
        }
        match resolve(superclass, view) {
            Some(next) if seen.insert(next.name()) => current = next,
            Some(_) => return Some(false),
            None => return None,
        }
    }
}

/// Whether `class`, a superclass, or any of their super-interfaces declares
/// interface `name`. `None` when an unresolved reference leaves it open.
pub fn implements<'a>(class: ItemRef<'a>, name: &str, view: &'a dyn ApiLookup) -> Option<bool> {
    if name == OBJECT {
        return Some(true);
    }
    let (chain, mut complete) = superclass_chain(class, view);
    let mut roots = vec![class];
    roots.extend(chain);
    let found = walk_interfaces(&roots, view, |declared, resolved| {
        if declared.base_name() == name {
            return Some(());
        }
        if resolved.is_none() {
            complete = false;
        }
        None
    });
    match (found, complete) {
        (Some(()), _) => Some(true),
        (None, true) => Some(false),
        (None, false) => None,
    }
}

pub fn extends_or_implements<'a>(
    class: ItemRef<'a>,
    name: &str,
    view: &'a dyn ApiLookup,
) -> Option<bool> {
    match (extends(class, name, view), implements(class, name, view)) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }
}
