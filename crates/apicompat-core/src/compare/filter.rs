use crate::model::{ItemRef, Visibility};

/// Inclusion predicate selecting which items take part in a comparison
pub trait ApiFilter {
    fn test(&self, item: ItemRef<'_>) -> bool;
}

impl<F> ApiFilter for F
where
    F: Fn(ItemRef<'_>) -> bool,
{
    fn test(&self, item: ItemRef<'_>) -> bool {
        self(item)
    }
}

/// The published surface: protected or wider along with every enclosing
/// class, and neither effectively hidden nor effectively removed.
/// Parameters follow their method.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicApiFilter;

impl ApiFilter for PublicApiFilter {
    fn test(&self, item: ItemRef<'_>) -> bool {
        let subject = match item.containing_method() {
            Some(method) => method,
            None => item,
        };
        let mut enclosing = std::iter::successors(Some(subject), |i| i.containing_class());
        enclosing.all(|i| i.modifiers().visibility >= Visibility::Protected)
            && !subject.is_hidden()
            && !subject.is_removed()
    }
}

/// Accepts every item, including hidden and private ones
#[derive(Debug, Clone, Copy, Default)]
pub struct AllMembersFilter;

impl ApiFilter for AllMembersFilter {
    fn test(&self, _item: ItemRef<'_>) -> bool {
        true
    }
}
