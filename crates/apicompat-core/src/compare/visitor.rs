use crate::model::ItemRef;

/// Receiver of comparator events.
///
/// Every hook defaults to a no-op so a visitor only implements what it
/// needs. For each matched pair the comparator calls [`compare_items`]
/// first, then the hook for the pair's kind.
///
/// [`compare_items`]: ComparisonVisitor::compare_items
pub trait ComparisonVisitor<'a> {
    fn compare_items(&mut self, _old: ItemRef<'a>, _new: ItemRef<'a>) {}

    fn compare_package(&mut self, _old: ItemRef<'a>, _new: ItemRef<'a>) {}

    fn compare_class(&mut self, _old: ItemRef<'a>, _new: ItemRef<'a>) {}

    /// Methods and constructors
    fn compare_method(&mut self, _old: ItemRef<'a>, _new: ItemRef<'a>) {}

    fn compare_field(&mut self, _old: ItemRef<'a>, _new: ItemRef<'a>) {}

    fn compare_parameter(&mut self, _old: ItemRef<'a>, _new: ItemRef<'a>) {}

    /// Present only on the new side and accepted by the filter
    fn added(&mut self, _new: ItemRef<'a>) {}

    /// Present only on the old side. `from` is the matched new-side parent,
    /// absent for packages.
    fn removed(&mut self, _old: ItemRef<'a>, _from: Option<ItemRef<'a>>) {}
}
