//! Name resolution and inheritance-aware member lookup.
//!
//! Every walk across supertypes resolves names through an [`ApiLookup`],
//! so a [`MergedView`](crate::merged::MergedView) can supply classes the
//! walked codebase lacks.

mod hierarchy;
mod signature;

pub use hierarchy::{
    extends, extends_or_implements, find_field, find_field_where, find_method, find_method_where,
    implements, superclass_chain,
};
pub use signature::{matches, same_signature};

use crate::model::{Codebase, ItemRef};

/// Read-only lookup of packages and classes by name
pub trait ApiLookup {
    fn find_package(&self, name: &str) -> Option<ItemRef<'_>>;

    fn find_class(&self, qualified_name: &str) -> Option<ItemRef<'_>>;
}

impl ApiLookup for Codebase {
    fn find_package(&self, name: &str) -> Option<ItemRef<'_>> {
        Codebase::find_package(self, name)
    }

    fn find_class(&self, qualified_name: &str) -> Option<ItemRef<'_>> {
        Codebase::find_class(self, qualified_name)
    }
}
