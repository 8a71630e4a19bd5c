//! Fallback-chain composition of several codebases.

use crate::lookup::ApiLookup;
use crate::model::{Codebase, ItemRef};

/// Ordered list of read-only codebases; the first is authoritative.
///
/// Lookups query each codebase in order and return the first hit. Used to
/// let a partial "before" surface borrow classes from the "after" surface
/// or from an extra baseline.
#[derive(Debug, Clone)]
pub struct MergedView<'a> {
    primary: &'a Codebase,
    fallbacks: Vec<&'a Codebase>,
}

impl<'a> MergedView<'a> {
    pub fn new(primary: &'a Codebase) -> Self {
        Self {
            primary,
            fallbacks: Vec::new(),
        }
    }

    /// Append a codebase consulted after every one already in the view
    pub fn with_fallback(mut self, fallback: &'a Codebase) -> Self {
        self.fallbacks.push(fallback);
        self
    }

    pub fn primary(&self) -> &'a Codebase {
        self.primary
    }

    /// All codebases in lookup order
    pub fn codebases(&self) -> impl Iterator<Item = &'a Codebase> + '_ {
        std::iter::once(self.primary).chain(self.fallbacks.iter().copied())
    }
}

impl ApiLookup for MergedView<'_> {
    fn find_package(&self, name: &str) -> Option<ItemRef<'_>> {
        self.codebases().find_map(|cb| cb.find_package(name))
    }

    fn find_class(&self, qualified_name: &str) -> Option<ItemRef<'_>> {
        self.codebases().find_map(|cb| cb.find_class(qualified_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{extends, find_method};
    use crate::model::{ClassSpec, MethodSpec, Modifiers};

    fn surface(location: &str, classes: Vec<ClassSpec>) -> Codebase {
        let mut b = Codebase::builder(location);
        let p = b.add_package("p").unwrap();
        for class in classes {
            b.add_class(p, class).unwrap();
        }
        b.build()
    }

    #[test]
    fn test_first_hit_wins() {
        let first = surface(
            "first",
            vec![ClassSpec::class("p.C").with_modifiers(Modifiers::public())],
        );
        let second = surface("second", vec![ClassSpec::class("p.C"), ClassSpec::class("p.D")]);
        let view = MergedView::new(&first).with_fallback(&second);

        let c = view.find_class("p.C").unwrap();
        assert_eq!(c.codebase().location(), "first");
        let d = view.find_class("p.D").unwrap();
        assert_eq!(d.codebase().location(), "second");
        assert!(view.find_class("p.E").is_none());
        assert_eq!(view.find_package("p").unwrap().codebase().location(), "first");
        assert_eq!(view.primary().location(), "first");
        assert_eq!(view.codebases().count(), 2);
    }

    #[test]
    fn test_fallback_fills_supertype_gap() {
        let old = surface("old", vec![ClassSpec::class("p.Leaf").extends("p.Base")]);
        let new = surface(
            "new",
            vec![
                ClassSpec::class("p.Base").method(MethodSpec::new("inherited").returns("void")),
                ClassSpec::class("p.Leaf").extends("p.Base"),
            ],
        );
        let leaf = old.find_class("p.Leaf").unwrap();
        assert_eq!(extends(leaf, "p.Other", &old), None);

        let view = MergedView::new(&old).with_fallback(&new);
        assert_eq!(extends(leaf, "p.Other", &view), Some(false));

        let probe = new.find_class("p.Base").unwrap().methods().next().unwrap();
        assert!(find_method(leaf, probe, true, false, &old).is_none());
        let found = find_method(leaf, probe, true, false, &view).unwrap();
        assert_eq!(found.codebase().location(), "new");
    }
}
