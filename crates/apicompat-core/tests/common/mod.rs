use apicompat_core::model::{
    ClassSpec, Codebase, CodebaseBuilder, MethodSpec, Modifiers, PackageSpec,
};
use apicompat_core::{
    check_codebases, CheckOutcome, DefaultSeverities, IssueKind, PublicApiFilter,
};

/// Public class with a public no-arg constructor, so it can be subclassed
#[allow(dead_code)]
pub fn open_class(name: &str) -> ClassSpec {
    public_class(name).constructor(MethodSpec::constructor().with_modifiers(Modifiers::public()))
}

#[allow(dead_code)]
pub fn public_class(name: &str) -> ClassSpec {
    ClassSpec::class(name).with_modifiers(Modifiers::public())
}

#[allow(dead_code)]
pub fn public_interface(name: &str) -> ClassSpec {
    ClassSpec::interface(name).with_modifiers(Modifiers::public())
}

/// Codebase with every class in package `p`
#[allow(dead_code)]
pub fn surface(location: &str, classes: Vec<ClassSpec>) -> Codebase {
    packages(location, false, vec![with_classes("p", classes)])
}

/// Like [`surface`], flagged as a partial legacy snapshot
#[allow(dead_code)]
pub fn partial_surface(location: &str, classes: Vec<ClassSpec>) -> Codebase {
    packages(location, true, vec![with_classes("p", classes)])
}

#[allow(dead_code)]
pub fn with_classes(name: &str, classes: Vec<ClassSpec>) -> PackageSpec {
    classes
        .into_iter()
        .fold(PackageSpec::new(name), |package, class| package.class(class))
}

#[allow(dead_code)]
pub fn packages(location: &str, partial: bool, packages: Vec<PackageSpec>) -> Codebase {
    let mut builder = CodebaseBuilder::new(location).partial_format(partial);
    for package in packages {
        builder.add_package_spec(package).unwrap();
    }
    builder.build()
}

/// Check with the published-API filter and built-in severities
#[allow(dead_code)]
pub fn check(old: &Codebase, new: &Codebase) -> CheckOutcome {
    check_codebases(old, new, &PublicApiFilter, &DefaultSeverities)
}

#[allow(dead_code)]
pub fn kinds(outcome: &CheckOutcome) -> Vec<IssueKind> {
    outcome.issues.iter().map(|i| i.kind).collect()
}

#[allow(dead_code)]
pub fn messages(outcome: &CheckOutcome) -> Vec<String> {
    outcome.issues.iter().map(|i| i.message.clone()).collect()
}
