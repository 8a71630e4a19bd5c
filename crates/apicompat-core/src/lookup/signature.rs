use crate::model::{ItemRef, TypeParameter, TypeRef};

/// Loose signature test used to pair methods: same name, same arity, and
/// every parameter equal as written or after erasure.
///
/// Surfaces read from a partial format may carry bare type variables where
/// the other side has resolved types; those are accepted against any
/// reference type (or any reference array of the same depth). The check is
/// applied from both sides, so the result does not depend on argument order.
pub fn matches(a: ItemRef<'_>, b: ItemRef<'_>) -> bool {
    let (Some(ma), Some(mb)) = (a.as_method(), b.as_method()) else {
        return false;
    };
    if ma.name != mb.name || ma.parameters.len() != mb.parameters.len() {
        return false;
    }
    let scope_a = a.type_scope();
    let scope_b = b.type_scope();
    let partial_a = a.codebase().is_partial_format();
    let partial_b = b.codebase().is_partial_format();
    a.parameters().zip(b.parameters()).all(|(pa, pb)| {
        let (Some(pa), Some(pb)) = (pa.as_parameter(), pb.as_parameter()) else {
            return false;
        };
        let (ta, tb) = (&pa.param_type, &pb.param_type);
        ta == tb
            || ta.erasure_in(&scope_a) == tb.erasure_in(&scope_b)
            || (partial_a && relaxed_match(ta, tb))
            || (partial_b && relaxed_match(tb, ta))
    })
}

fn relaxed_match(variable: &TypeRef, other: &TypeRef) -> bool {
    if !variable.is_unresolved_type_variable() {
        return false;
    }
    let dims = variable.array_dimensions();
    if dims == 0 {
        return !other.is_primitive();
    }
    other.array_dimensions() == dims && !TypeRef::new(other.base_name()).is_primitive()
}

/// Strict signature equality between a method and a method it may override.
///
/// Requires equal return types, a deprecation state that does not go from
/// deprecated (super) to not deprecated (method), equivalent modifiers,
/// pairwise equal parameter types (erased when `compare_raw_types`) and
/// element-wise equal throws lists in canonical order.
pub fn same_signature(method: ItemRef<'_>, super_method: ItemRef<'_>, compare_raw_types: bool) -> bool {
    let (Some(m), Some(s)) = (method.as_method(), super_method.as_method()) else {
        return false;
    };
    if m.return_type != s.return_type {
        return false;
    }
    if super_method.flags().deprecated && !method.flags().deprecated {
        return false;
    }
    if !method.modifiers().equivalent_to(super_method.modifiers()) {
        return false;
    }
    if m.parameters.len() != s.parameters.len() {
        return false;
    }
    let scope_m: Vec<&TypeParameter> = method.type_scope();
    let scope_s: Vec<&TypeParameter> = super_method.type_scope();
    let params_equal = method.parameters().zip(super_method.parameters()).all(|(pm, ps)| {
        match (pm.as_parameter(), ps.as_parameter()) {
            (Some(pm), Some(ps)) if compare_raw_types => {
                pm.param_type.erasure_in(&scope_m) == ps.param_type.erasure_in(&scope_s)
            }
            (Some(pm), Some(ps)) => pm.param_type == ps.param_type,
            _ => false,
        }
    });
    params_equal && m.throws == s.throws
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassSpec, Codebase, MethodSpec, Modifiers, ParameterSpec};

    fn codebase(partial: bool, methods: Vec<MethodSpec>) -> Codebase {
        let mut b = Codebase::builder("t").partial_format(partial);
        let p = b.add_package("p").unwrap();
        let mut class = ClassSpec::class("p.C")
            .type_parameter(TypeParameter::new("E").bound("java.lang.Number"));
        for m in methods {
            class = class.method(m);
        }
        b.add_class(p, class).unwrap();
        b.build()
    }

    fn method(cb: &Codebase, index: usize) -> ItemRef<'_> {
        cb.find_class("p.C").unwrap().methods().nth(index).unwrap()
    }

    fn single(param: &str) -> MethodSpec {
        MethodSpec::new("m").returns("void").param(ParameterSpec::new(param))
    }

    #[test]
    fn test_matches_literal_and_erased() {
        let cb = codebase(
            false,
            vec![
                single("java.util.List<java.lang.String>"),
                single("java.util.List"),
                single("java.lang.String..."),
                single("java.lang.String[]"),
                single("E"),
                single("java.lang.Number"),
            ],
        );
        assert!(matches(method(&cb, 0), method(&cb, 1)));
        assert!(matches(method(&cb, 2), method(&cb, 3)));
        assert!(matches(method(&cb, 4), method(&cb, 5)));
        assert!(!matches(method(&cb, 0), method(&cb, 3)));
    }

    #[test]
    fn test_matches_requires_name_and_arity() {
        let cb = codebase(
            false,
            vec![
                single("int"),
                MethodSpec::new("other").param(ParameterSpec::new("int")),
                MethodSpec::new("m")
                    .param(ParameterSpec::new("int"))
                    .param(ParameterSpec::new("int")),
            ],
        );
        assert!(!matches(method(&cb, 0), method(&cb, 1)));
        assert!(!matches(method(&cb, 0), method(&cb, 2)));
    }

    #[test]
    fn test_type_variable_relaxation_only_for_partial_side() {
        let legacy = codebase(true, vec![single("T"), single("T[]")]);
        let full = codebase(
            false,
            vec![
                single("java.lang.String"),
                single("int"),
                single("java.lang.String[]"),
                single("int[]"),
            ],
        );
        // bare variable against a reference type, both argument orders
        assert!(matches(method(&legacy, 0), method(&full, 0)));
        assert!(matches(method(&full, 0), method(&legacy, 0)));
        assert!(!matches(method(&legacy, 0), method(&full, 1)));
        // array-suffixed variable needs equal depth and a reference element
        assert!(matches(method(&legacy, 1), method(&full, 2)));
        assert!(!matches(method(&legacy, 1), method(&full, 3)));

        let strict = codebase(false, vec![single("T")]);
        assert!(!matches(method(&strict, 0), method(&full, 0)));
    }

    #[test]
    fn test_same_signature_deprecation_direction() {
        let cb = codebase(
            false,
            vec![single("int"), single("int").deprecated()],
        );
        let plain = method(&cb, 0);
        let deprecated = method(&cb, 1);
        assert!(same_signature(deprecated, plain, false));
        assert!(!same_signature(plain, deprecated, false));
    }

    #[test]
    fn test_same_signature_checks_modifiers_return_and_throws() {
        let cb = codebase(
            false,
            vec![
                single("int"),
                single("int").with_modifiers(Modifiers::public().with_final()),
                MethodSpec::new("m").returns("int").param(ParameterSpec::new("int")),
                single("int").throws("java.io.IOException"),
            ],
        );
        let base = method(&cb, 0);
        assert!(same_signature(base, base, false));
        assert!(!same_signature(method(&cb, 1), base, false));
        assert!(!same_signature(method(&cb, 2), base, false));
        assert!(!same_signature(method(&cb, 3), base, false));
    }

    #[test]
    fn test_same_signature_raw_compares_erasures() {
        let cb = codebase(
            false,
            vec![
                single("java.util.List<java.lang.String>"),
                single("java.util.List<java.lang.Integer>"),
            ],
        );
        assert!(!same_signature(method(&cb, 0), method(&cb, 1), false));
        assert!(same_signature(method(&cb, 0), method(&cb, 1), true));
    }
}
