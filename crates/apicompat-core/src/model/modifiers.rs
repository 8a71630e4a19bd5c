use serde::{Deserialize, Serialize};

/// Visibility levels, ordered from least to most visible
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    #[default]
    PackagePrivate,
    Internal,
    Protected,
    Public,
}

impl Visibility {
    /// Keyword used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::PackagePrivate => "package private",
            Visibility::Internal => "internal",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }

    /// Public or protected: reachable from outside the declaring package
    pub fn is_accessible(&self) -> bool {
        *self >= Visibility::Protected
    }
}

/// Explicit nullability marker on a typed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nullability {
    Nullable,
    NonNull,
}

impl Nullability {
    pub fn annotation_name(&self) -> &'static str {
        match self {
            Nullability::Nullable => "@Nullable",
            Nullability::NonNull => "@NonNull",
        }
    }
}

/// Modifier set shared by every item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub visibility: Visibility,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "default")]
    pub is_default: bool,
    #[serde(rename = "native")]
    pub is_native: bool,
    #[serde(rename = "sealed")]
    pub is_sealed: bool,
    #[serde(rename = "functional")]
    pub is_functional: bool,
    #[serde(rename = "operator")]
    pub is_operator: bool,
    #[serde(rename = "infix")]
    pub is_infix: bool,
    #[serde(rename = "inline")]
    pub is_inline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullability: Option<Nullability>,
}

impl Modifiers {
    pub fn with_visibility(visibility: Visibility) -> Self {
        Self {
            visibility,
            ..Self::default()
        }
    }

    pub fn public() -> Self {
        Self::with_visibility(Visibility::Public)
    }

    pub fn protected() -> Self {
        Self::with_visibility(Visibility::Protected)
    }

    pub fn private() -> Self {
        Self::with_visibility(Visibility::Private)
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn with_sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    pub fn with_nullability(mut self, nullability: Nullability) -> Self {
        self.nullability = Some(nullability);
        self
    }

    /// Equivalence used when deciding whether two methods share a signature.
    ///
    /// Native, sealed, functional and the Kotlin call-site markers do not
    /// affect compatibility and are ignored, as is nullability.
    pub fn equivalent_to(&self, other: &Modifiers) -> bool {
        self.visibility == other.visibility
            && self.is_static == other.is_static
            && self.is_final == other.is_final
            && self.is_abstract == other.is_abstract
            && self.is_default == other.is_default
    }
}

/// Boolean flags that propagate from a node to its descendants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Hidden,
    Removed,
    Deprecated,
    DocOnly,
}

/// Own (not inherited) flag values of an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFlags {
    pub hidden: bool,
    pub removed: bool,
    pub deprecated: bool,
    pub doc_only: bool,
    /// Hidden as declared in the source, before any propagation pass
    #[serde(skip)]
    pub originally_hidden: bool,
}

impl ItemFlags {
    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Hidden => self.hidden,
            Flag::Removed => self.removed,
            Flag::Deprecated => self.deprecated,
            Flag::DocOnly => self.doc_only,
        }
    }

    pub fn set(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::Hidden => self.hidden = value,
            Flag::Removed => self.removed = value,
            Flag::Deprecated => self.deprecated = value,
            Flag::DocOnly => self.doc_only = value,
        }
    }
}
