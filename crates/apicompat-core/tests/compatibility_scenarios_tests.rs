/// Compatibility scenarios: end-to-end checks of two surfaces.
///
/// Each scenario builds an old and a new surface, runs the full check with
/// the published-API filter and default severities, and asserts the exact
/// issue sequence.
mod common;

use apicompat_core::model::{
    ClassSpec, FieldSpec, MethodSpec, Modifiers, Nullability, PackageSpec, ParameterSpec,
    TypeParameter,
};
use apicompat_core::{IssueKind, Severity};
use common::*;

fn rich_surface(location: &str) -> apicompat_core::Codebase {
    packages(
        location,
        false,
        vec![
            with_classes(
                "java.lang",
                vec![ClassSpec::class("java.lang.Object")
                    .with_modifiers(Modifiers::public())
                    .stub()
                    .method(MethodSpec::new("toString").returns("java.lang.String"))],
            ),
            with_classes(
                "p",
                vec![
                    ClassSpec::class("p.Hidden")
                        .with_modifiers(Modifiers::public())
                        .hidden()
                        .method(MethodSpec::new("shared").returns("void")),
                    open_class("p.C")
                        .extends("p.Hidden")
                        .implements("java.lang.Runnable")
                        .implements("java.io.Closeable")
                        .type_parameter(TypeParameter::new("T").bound("java.lang.Number"))
                        .method(MethodSpec::new("run").returns("void"))
                        .method(
                            MethodSpec::new("close")
                                .returns("void")
                                .throws("java.io.IOException"),
                        )
                        .method(
                            MethodSpec::new("get")
                                .returns("T")
                                .with_modifiers(
                                    Modifiers::public().with_nullability(Nullability::Nullable),
                                )
                                .param(ParameterSpec::new("java.util.List<T>").named("items")),
                        )
                        .method(MethodSpec::new("toString").returns("java.lang.String"))
                        .field(
                            FieldSpec::new("MAX", "int")
                                .with_modifiers(Modifiers::public().with_static().with_final())
                                .value("10"),
                        )
                        .nested(
                            ClassSpec::enumeration("p.C.Mode")
                                .with_modifiers(Modifiers::public().with_static())
                                .field(FieldSpec::new("ON", "p.C.Mode").enum_constant())
                                .method(MethodSpec::new("values").returns("p.C.Mode[]")),
                        ),
                    ClassSpec::annotation("p.Marker")
                        .with_modifiers(Modifiers::public())
                        .method(MethodSpec::new("value").returns("int").annotation_default("0")),
                    public_interface("p.Api").method(
                        MethodSpec::new("call")
                            .returns("void")
                            .with_modifiers(Modifiers::public().with_default())
                            .param(ParameterSpec::new("int...").named("values")),
                    ),
                ],
            ),
        ],
    )
}

#[test]
fn test_identical_surfaces_report_nothing() {
    // GIVEN two independently built copies of the same surface
    let old = rich_surface("old");
    let new = rich_surface("new");

    // WHEN checking them against each other
    let outcome = check(&old, &new);

    // THEN nothing is reported
    assert!(outcome.issues.is_empty(), "{:?}", outcome.issues);
    assert!(!outcome.found_problems);
}

// S1: removing a public method is a "removed method" error
#[test]
fn test_removed_public_method() {
    let old = surface(
        "old",
        vec![public_class("p.C").method(
            MethodSpec::new("m")
                .returns("java.lang.String")
                .with_modifiers(Modifiers::public().with_nullability(Nullability::NonNull))
                .param(ParameterSpec::new("int")),
        )],
    );
    let new = surface("new", vec![public_class("p.C")]);

    let outcome = check(&old, &new);

    assert_eq!(kinds(&outcome), vec![IssueKind::RemovedMethod]);
    assert_eq!(outcome.issues[0].subject, "method p.C.m(int)");
    assert_eq!(outcome.issues[0].message, "Removed method p.C.m(int)");
    assert_eq!(outcome.issues[0].severity, Severity::Error);
    assert!(outcome.found_problems);
}

// S2: dropping an external parameter name is a "parameter name removed" error
#[test]
fn test_parameter_name_removed() {
    let old = surface(
        "old",
        vec![public_class("p.C").method(
            MethodSpec::new("m")
                .returns("void")
                .param(ParameterSpec::new("java.lang.String").named("name")),
        )],
    );
    let new = surface(
        "new",
        vec![public_class("p.C").method(
            MethodSpec::new("m")
                .returns("void")
                .param(ParameterSpec::new("java.lang.String")),
        )],
    );

    let outcome = check(&old, &new);

    assert_eq!(kinds(&outcome), vec![IssueKind::ParameterNameRemoved]);
    assert_eq!(
        outcome.issues[0].message,
        "Attempted to remove parameter name from parameter name in p.C.m(java.lang.String)"
    );
}

// S3: making an instantiable class final is "added final", not the informational variant
#[test]
fn test_class_made_final_with_public_constructor() {
    let old = surface("old", vec![open_class("p.C")]);
    let new = surface(
        "new",
        vec![open_class("p.C").with_modifiers(Modifiers::public().with_final())],
    );

    let outcome = check(&old, &new);

    assert_eq!(kinds(&outcome), vec![IssueKind::AddedFinal]);
    assert_eq!(outcome.issues[0].message, "Class p.C added 'final' qualifier");
    assert!(outcome.found_problems);
}

#[test]
fn test_class_made_final_without_accessible_constructor_is_informational() {
    let private_ctor = MethodSpec::constructor().with_modifiers(Modifiers::private());
    let old = surface("old", vec![public_class("p.C").constructor(private_ctor.clone())]);
    let new = surface(
        "new",
        vec![public_class("p.C")
            .with_modifiers(Modifiers::public().with_final())
            .constructor(private_ctor)],
    );

    let outcome = check(&old, &new);

    assert_eq!(kinds(&outcome), vec![IssueKind::AddedFinalUninstantiable]);
    assert_eq!(outcome.issues[0].severity, Severity::Info);
    assert!(!outcome.found_problems);
}

// S4: default interface method becoming abstract is a "changed default" error
#[test]
fn test_default_method_demoted_to_abstract() {
    let old = surface(
        "old",
        vec![public_interface("p.I").method(
            MethodSpec::new("m")
                .returns("void")
                .with_modifiers(Modifiers::public().with_default()),
        )],
    );
    let new = surface(
        "new",
        vec![public_interface("p.I").method(
            MethodSpec::new("m")
                .returns("void")
                .with_modifiers(Modifiers::public().with_abstract()),
        )],
    );

    let outcome = check(&old, &new);

    assert_eq!(kinds(&outcome), vec![IssueKind::ChangedDefault]);
    assert_eq!(
        outcome.issues[0].message,
        "Method p.I.m() has changed 'default' qualifier"
    );
}

fn constant(modifiers: Modifiers, value: &str) -> apicompat_core::Codebase {
    surface(
        "s",
        vec![public_class("p.C").field(FieldSpec::new("X", "int").with_modifiers(modifiers).value(value))],
    )
}

// S5: a constant's value change is reported; modifier-only changes are not value changes
#[test]
fn test_constant_value_changed() {
    let constant_modifiers = Modifiers::public().with_static().with_final();
    let old = constant(constant_modifiers.clone(), "1");
    let new = constant(constant_modifiers, "2");

    let outcome = check(&old, &new);

    assert_eq!(kinds(&outcome), vec![IssueKind::ChangedValue]);
    assert_eq!(
        outcome.issues[0].message,
        "Field p.C.X has changed value from 1 to 2"
    );
}

#[test]
fn test_modifier_only_change_keeps_value_silent() {
    let old = constant(Modifiers::public().with_static().with_final(), "1");
    let new = constant(Modifiers::public().with_final(), "1");

    let outcome = check(&old, &new);

    assert_eq!(kinds(&outcome), vec![IssueKind::ChangedStatic]);
    assert!(!kinds(&outcome).contains(&IssueKind::ChangedValue));
}

#[test]
fn test_issue_order_follows_traversal() {
    // GIVEN changes spread over two packages and several members
    let old = packages(
        "old",
        false,
        vec![
            with_classes(
                "b",
                vec![public_class("b.Z").method(MethodSpec::new("gone").returns("void"))],
            ),
            with_classes(
                "a",
                vec![public_class("a.Y")
                    .field(FieldSpec::new("F", "int"))
                    .method(MethodSpec::new("m").returns("int"))],
            ),
        ],
    );
    let new = packages(
        "new",
        false,
        vec![
            with_classes("a", vec![public_class("a.Y").method(MethodSpec::new("m").returns("long"))]),
            with_classes("b", vec![public_class("b.Z")]),
            PackageSpec::new("c"),
        ],
    );

    // WHEN checking
    let outcome = check(&old, &new);

    // THEN packages come in name order, methods before fields within a class
    assert_eq!(
        kinds(&outcome),
        vec![
            IssueKind::ChangedType,
            IssueKind::RemovedField,
            IssueKind::RemovedMethod,
            IssueKind::AddedPackage,
        ]
    );
}
