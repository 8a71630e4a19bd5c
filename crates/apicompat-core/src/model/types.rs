//! Textual type references.
//!
//! Types are kept as the text a snapshot or parser produced them with
//! (`java.util.List<T>`, `int[]`, `java.lang.String...`). Structural questions
//! (erasure, array depth, primitiveness) are answered from that text, which is
//! what lets the model tolerate partially resolved inputs.

use serde::{Deserialize, Serialize};

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Fallback erasure for a type variable without bounds
pub const OBJECT: &str = "java.lang.Object";

/// A reference to a type, by its textual form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `int`, `boolean`, ... (never for arrays of them)
    pub fn is_primitive(&self) -> bool {
        self.array_dimensions() == 0 && PRIMITIVES.contains(&self.base_name())
    }

    /// True when declared with a trailing `...`
    pub fn is_varargs(&self) -> bool {
        self.0.ends_with("...")
    }

    /// Number of array levels, counting a varargs suffix as one.
    pub fn array_dimensions(&self) -> usize {
        let stripped = strip_generics(&self.0);
        let mut rest = stripped.trim_end();
        let mut dims = 0;
        if let Some(r) = rest.strip_suffix("...") {
            dims += 1;
            rest = r.trim_end();
        }
        while let Some(r) = rest.strip_suffix("[]") {
            dims += 1;
            rest = r.trim_end();
        }
        dims
    }

    /// Type name with generic arguments and array suffixes removed.
    pub fn base_name(&self) -> &str {
        let head = match self.0.find(['<', '[']) {
            Some(i) => &self.0[..i],
            None => &self.0,
        };
        head.strip_suffix("...").unwrap_or(head).trim()
    }

    /// Generics-stripped text with varargs normalized to an array.
    pub fn erased(&self) -> String {
        let mut out = self.base_name().to_string();
        for _ in 0..self.array_dimensions() {
            out.push_str("[]");
        }
        out
    }

    /// Erasure where names declared in `scope` are replaced by their first
    /// bound (or `java.lang.Object`).
    pub fn erasure_in(&self, scope: &[&TypeParameter]) -> String {
        let base = self.base_name();
        let Some(param) = scope.iter().find(|p| p.name == base) else {
            return self.erased();
        };
        let mut out = match param.bounds.first() {
            Some(bound) if bound.base_name() != param.name => bound.erased(),
            _ => OBJECT.to_string(),
        };
        for _ in 0..self.array_dimensions() {
            out.push_str("[]");
        }
        out
    }

    /// Looks like an unresolved type variable: a single upper-case letter,
    /// optionally followed by an array or varargs suffix (`T`, `E[]`, `T...`).
    pub fn is_unresolved_type_variable(&self) -> bool {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() => {}
            _ => return false,
        }
        match chars.next() {
            None => true,
            Some(second) => !second.is_alphanumeric(),
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::new(OBJECT)
    }
}

impl From<&str> for TypeRef {
    fn from(text: &str) -> Self {
        TypeRef::new(text)
    }
}

/// A declared type parameter and its bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<TypeRef>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn bound(mut self, bound: impl Into<TypeRef>) -> Self {
        self.bounds.push(bound.into());
        self
    }
}

/// Sort type references into canonical order: by erased name, then full text.
pub fn canonical_sort(types: &mut [TypeRef]) {
    types.sort_by(|a, b| {
        a.base_name()
            .cmp(b.base_name())
            .then_with(|| a.as_str().cmp(b.as_str()))
    });
}

/// Remove every `<...>` section, honoring nesting.
pub fn strip_generics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}
