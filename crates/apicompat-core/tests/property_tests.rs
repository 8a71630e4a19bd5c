//! Property-based tests for the comparison pipeline
//!
//! Invariants that hold for every generated surface:
//! - Reflexivity: a surface checked against itself reports nothing
//! - Order independence: declaration order of classes, members, thrown
//!   exceptions and interfaces never changes the outcome
//! - Symmetry: method pairing does not depend on argument order

#![allow(clippy::unwrap_used, clippy::expect_used)]

use apicompat_core::lookup::matches;
use apicompat_core::model::{
    ClassSpec, Codebase, CodebaseBuilder, ItemRef, MethodSpec, Modifiers, ParameterSpec,
    TypeParameter,
};
use apicompat_core::{
    check_codebases, CheckOutcome, DefaultSeverities, IssueKind, PublicApiFilter,
};
use proptest::prelude::*;
use proptest::sample::{select, subsequence};
use std::collections::BTreeMap;

const CLASSES: &[&str] = &["p.Alpha", "p.Beta", "p.Gamma", "p.Delta"];
const NAMES: &[&str] = &["get", "put", "run"];
const TYPES: &[&str] = &[
    "int",
    "long",
    "java.lang.String",
    "java.lang.String...",
    "java.lang.String[]",
    "java.util.List",
    "java.util.List<T>",
    "java.util.List<java.lang.String>",
    "T",
    "T[]",
];
const RETURNS: &[&str] = &["void", "int", "java.lang.String", "T"];
const EXCEPTIONS: &[&str] = &[
    "java.io.IOException",
    "java.lang.InterruptedException",
    "p.Failure",
];
const INTERFACES: &[&str] = &["java.io.Closeable", "java.lang.Runnable"];

#[derive(Debug, Clone)]
struct MethodShape {
    returns: &'static str,
    is_final: bool,
    throws: Vec<&'static str>,
}

/// Methods keyed by name and literal parameter types, so keys are unique
type ClassShape = BTreeMap<(&'static str, Vec<&'static str>), MethodShape>;
type SurfaceShape = BTreeMap<&'static str, ClassShape>;

fn method_shape() -> impl Strategy<Value = MethodShape> {
    (select(RETURNS), any::<bool>(), subsequence(EXCEPTIONS, 0..=2)).prop_map(
        |(returns, is_final, throws)| MethodShape {
            returns,
            is_final,
            throws,
        },
    )
}

fn class_shape() -> impl Strategy<Value = ClassShape> {
    prop::collection::btree_map(
        (select(NAMES), prop::collection::vec(select(TYPES), 0..3)),
        method_shape(),
        0..5,
    )
}

fn surface_shape() -> impl Strategy<Value = SurfaceShape> {
    prop::collection::btree_map(select(CLASSES), class_shape(), 1..4)
}

/// Build a codebase from `shape`, declaring everything in reverse when
/// `reversed` is set.
fn build(location: &str, shape: &SurfaceShape, reversed: bool) -> Codebase {
    let in_order = |mut items: Vec<&'static str>| {
        if reversed {
            items.reverse();
        }
        items
    };
    let mut classes: Vec<ClassSpec> = shape
        .iter()
        .map(|(name, methods)| {
            let mut specs: Vec<MethodSpec> = methods
                .iter()
                .map(|((method, params), m)| {
                    let modifiers = if m.is_final {
                        Modifiers::public().with_final()
                    } else {
                        Modifiers::public()
                    };
                    let spec = MethodSpec::new(*method)
                        .returns(m.returns)
                        .with_modifiers(modifiers);
                    let spec = params
                        .iter()
                        .fold(spec, |s, p| s.param(ParameterSpec::new(*p)));
                    in_order(m.throws.clone())
                        .into_iter()
                        .fold(spec, |s, t| s.throws(t))
                })
                .collect();
            if reversed {
                specs.reverse();
            }
            let class = ClassSpec::class(*name)
                .with_modifiers(Modifiers::public())
                .type_parameter(TypeParameter::new("T"))
                .constructor(MethodSpec::constructor());
            let class = in_order(INTERFACES.to_vec())
                .into_iter()
                .fold(class, |c, i| c.implements(i));
            specs.into_iter().fold(class, |c, m| c.method(m))
        })
        .collect();
    if reversed {
        classes.reverse();
    }

    let mut builder = CodebaseBuilder::new(location);
    let package = builder.add_package("p").unwrap();
    for class in classes {
        builder.add_class(package, class).unwrap();
    }
    builder.build()
}

fn check(old: &Codebase, new: &Codebase) -> CheckOutcome {
    check_codebases(old, new, &PublicApiFilter, &DefaultSeverities)
}

fn summary(outcome: &CheckOutcome) -> Vec<(IssueKind, String)> {
    outcome
        .issues
        .iter()
        .map(|i| (i.kind, i.message.clone()))
        .collect()
}

fn two_methods(partial: bool, a: &[&'static str], b: &[&'static str]) -> Codebase {
    let method = |params: &[&'static str]| {
        params.iter().fold(MethodSpec::new("m").returns("void"), |m, p| {
            m.param(ParameterSpec::new(*p))
        })
    };
    let mut builder = CodebaseBuilder::new("m").partial_format(partial);
    let package = builder.add_package("p").unwrap();
    builder
        .add_class(
            package,
            ClassSpec::class("p.C")
                .type_parameter(TypeParameter::new("T"))
                .method(method(a))
                .method(method(b)),
        )
        .unwrap();
    builder.build()
}

fn nth_method(codebase: &Codebase, n: usize) -> ItemRef<'_> {
    codebase.find_class("p.C").unwrap().methods().nth(n).unwrap()
}

proptest! {
    #[test]
    fn prop_surface_is_compatible_with_itself(shape in surface_shape()) {
        let old = build("old", &shape, false);
        let new = build("new", &shape, false);

        let outcome = check(&old, &new);

        prop_assert!(outcome.issues.is_empty(), "{:?}", outcome.issues);
        prop_assert!(!outcome.found_problems);
    }

    #[test]
    fn prop_declaration_order_is_irrelevant(shape in surface_shape()) {
        let old = build("old", &shape, false);
        let new = build("new", &shape, true);

        prop_assert!(check(&old, &new).issues.is_empty());
    }

    #[test]
    fn prop_outcome_is_deterministic_under_reordering(
        old_shape in surface_shape(),
        new_shape in surface_shape(),
    ) {
        let forward = check(
            &build("old", &old_shape, false),
            &build("new", &new_shape, false),
        );
        let backward = check(
            &build("old", &old_shape, true),
            &build("new", &new_shape, true),
        );

        prop_assert_eq!(summary(&forward), summary(&backward));
        prop_assert_eq!(forward.found_problems, backward.found_problems);
    }

    #[test]
    fn prop_method_matching_is_symmetric(
        a in prop::collection::vec(select(TYPES), 0..3),
        b in prop::collection::vec(select(TYPES), 0..3),
        left_partial in any::<bool>(),
        right_partial in any::<bool>(),
    ) {
        let left = two_methods(left_partial, &a, &b);
        let right = two_methods(right_partial, &b, &a);
        let (la, lb) = (nth_method(&left, 0), nth_method(&left, 1));
        let (rb, ra) = (nth_method(&right, 0), nth_method(&right, 1));

        prop_assert_eq!(matches(la, lb), matches(lb, la));
        prop_assert_eq!(matches(la, rb), matches(rb, la));
        prop_assert!(matches(la, ra));
    }
}
