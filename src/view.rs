//! The type-erased column view.
//!
//! A [`ColumnView`] presents a [`RangeView`] of exactly one supported element
//! type, or nothing at all. The active type is a tag inside the view, so
//! copying, moving and dropping a view need no knowledge of that type, while
//! typed access (`get::<T>()` and friends) fails with
//! [`ViewError::NotFound`] unless `T` is the active type.

use crate::datatypes::{AnyValue, DataType, Element, Slot};
use crate::dispatch::{CollectValues, Compare, Mutator, Render, Visitor};
use crate::errors::{Result, ViewError};
use crate::logging::targets;
use crate::range::{Iter, RangeView};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Rev;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tracing::trace;

const DISPLAY_LIMIT: usize = 10;

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a view. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    fn next() -> Self {
        ViewId(NEXT_VIEW_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

pub struct ColumnView<'a> {
    id: ViewId,
    slot: Slot<'a>,
}

impl<'a> ColumnView<'a> {
    /// An unbound view.
    pub fn new() -> Self {
        Self {
            id: ViewId::next(),
            slot: Slot::Unbound,
        }
    }

    pub fn from_view<T: Element>(view: RangeView<'a, T>) -> Self {
        let mut column = Self::new();
        column.bind(view);
        column
    }

    pub fn from_slice<T: Element>(data: &'a mut [T]) -> Self {
        Self::from_view(RangeView::new(data))
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn active_type(&self) -> Option<DataType> {
        self.slot.data_type()
    }

    pub fn is_bound(&self) -> bool {
        self.active_type().is_some()
    }

    /// Length of the active range, whatever its type.
    pub fn len_any(&self) -> Option<usize> {
        self.slot.len()
    }

    /// Binds this view to `view`. Any previous binding is erased first.
    pub fn bind<T: Element>(&mut self, view: RangeView<'a, T>) {
        self.rebind(view);
    }

    /// Erases the current binding, then binds to `view`.
    ///
    /// Returns the type that was active before, if any.
    pub fn rebind<T: Element>(&mut self, view: RangeView<'a, T>) -> Option<DataType> {
        let previous = self.erase();
        self.slot = T::into_slot(view);
        trace!(
            target: targets::VIEW,
            id = %self.id,
            dtype = %T::DATA_TYPE,
            len = view.len(),
            ?previous,
            "bound view"
        );
        previous
    }

    /// Drops the binding, leaving the view unbound.
    pub fn erase(&mut self) -> Option<DataType> {
        let previous = std::mem::replace(&mut self.slot, Slot::Unbound).data_type();
        if let Some(dtype) = previous {
            trace!(target: targets::VIEW, id = %self.id, %dtype, "erased view");
        }
        previous
    }

    /// Moves the binding out of `source` into this view.
    ///
    /// This view's own binding is erased first and `source` is left unbound.
    pub fn take_from(&mut self, source: &mut ColumnView<'a>) -> Option<DataType> {
        self.erase();
        self.slot = std::mem::replace(&mut source.slot, Slot::Unbound);
        let dtype = self.active_type();
        trace!(
            target: targets::VIEW,
            from = %source.id,
            to = %self.id,
            ?dtype,
            "moved view"
        );
        dtype
    }

    /// Moves the binding into a new view with its own identity.
    pub fn take(&mut self) -> ColumnView<'a> {
        let mut moved = ColumnView::new();
        moved.take_from(self);
        moved
    }

    pub fn get<T: Element>(&self) -> Result<RangeView<'a, T>> {
        T::from_slot(&self.slot)
            .copied()
            .ok_or_else(|| self.not_found::<T>())
    }

    /// Mutable access to the active range, e.g. to narrow it.
    pub fn get_mut<T: Element>(&mut self) -> Result<&mut RangeView<'a, T>> {
        let active = self.active_type();
        T::from_slot_mut(&mut self.slot).ok_or(ViewError::NotFound {
            requested: T::DATA_TYPE,
            active,
        })
    }

    pub fn len<T: Element>(&self) -> Result<usize> {
        Ok(self.get::<T>()?.len())
    }

    pub fn is_empty<T: Element>(&self) -> Result<bool> {
        Ok(self.get::<T>()?.is_empty())
    }

    pub fn front<T: Element>(&self) -> Result<T> {
        Ok(self.get::<T>()?.front()?)
    }

    pub fn back<T: Element>(&self) -> Result<T> {
        Ok(self.get::<T>()?.back()?)
    }

    pub fn iter<T: Element>(&self) -> Result<Iter<'a, T>> {
        Ok(self.get::<T>()?.iter())
    }

    pub fn iter_rev<T: Element>(&self) -> Result<Rev<Iter<'a, T>>> {
        Ok(self.get::<T>()?.iter().rev())
    }

    /// Reads element `index` as a dynamically typed value.
    pub fn value(&self, index: usize) -> Result<AnyValue> {
        self.slot.value_at(index)
    }

    pub fn values(&self) -> Result<Vec<AnyValue>> {
        let mut collect = CollectValues::default();
        self.visit(&mut collect)?;
        Ok(collect.values)
    }

    /// Calls `visitor` once per element of the active range.
    ///
    /// Returns the type that was visited.
    pub fn visit<V: Visitor>(&self, visitor: &mut V) -> Result<DataType> {
        let dtype = self.slot.visit(visitor).ok_or(ViewError::Unbound)?;
        trace!(target: targets::DISPATCH, id = %self.id, %dtype, "visited view");
        Ok(dtype)
    }

    /// Sorts the active range in place. Every alias of the storage sees the
    /// new order.
    pub fn sort<C: Compare>(&self, compare: &C) -> Result<DataType> {
        let dtype = self.slot.sort(compare).ok_or(ViewError::Unbound)?;
        trace!(target: targets::DISPATCH, id = %self.id, %dtype, "sorted view");
        Ok(dtype)
    }

    /// Hands the whole active range to `mutator` once.
    pub fn mutate<M: Mutator>(&mut self, mutator: &mut M) -> Result<DataType> {
        let dtype = self.slot.mutate(mutator).ok_or(ViewError::Unbound)?;
        trace!(
            target: targets::DISPATCH,
            id = %self.id,
            %dtype,
            len = self.len_any(),
            "mutated view"
        );
        Ok(dtype)
    }

    pub fn for_each<T: Element>(&self, f: impl FnMut(&T)) -> Result<()> {
        self.get::<T>()?.for_each(f);
        Ok(())
    }

    pub fn sort_by<T: Element>(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Result<()> {
        self.get::<T>()?.sort_by(compare);
        Ok(())
    }

    fn not_found<T: Element>(&self) -> ViewError {
        ViewError::NotFound {
            requested: T::DATA_TYPE,
            active: self.active_type(),
        }
    }
}

impl Default for ColumnView<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ColumnView<'_> {
    /// Copies the binding under a fresh identity. Both views alias the same
    /// storage.
    fn clone(&self) -> Self {
        let copy = Self {
            id: ViewId::next(),
            slot: self.slot,
        };
        trace!(
            target: targets::VIEW,
            from = %self.id,
            to = %copy.id,
            dtype = ?self.active_type(),
            "copied view"
        );
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.erase();
        self.slot = source.slot;
        trace!(
            target: targets::VIEW,
            from = %source.id,
            to = %self.id,
            dtype = ?self.active_type(),
            "copied view"
        );
    }
}

impl fmt::Debug for ColumnView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ColumnView")
            .field("id", &self.id)
            .field("dtype", &self.active_type())
            .field("len", &self.len_any())
            .finish()
    }
}

impl fmt::Display for ColumnView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Some(dtype) = self.active_type() else {
            return write!(f, "[unbound]");
        };
        let mut render = Render::new(DISPLAY_LIMIT);
        self.slot.visit(&mut render);
        write!(f, "[{}] {}", dtype, render.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Ascending, Descending};
    use crate::errors::RangeError;
    use chrono::NaiveDate;

    struct CountVisits {
        calls: usize,
    }

    impl Visitor for CountVisits {
        fn visit<T: Element>(&mut self, _value: &T) {
            self.calls += 1;
        }
    }

    struct DropFirst;

    impl Mutator for DropFirst {
        fn mutate<T: Element>(&mut self, view: &mut RangeView<'_, T>) {
            if let Ok(rest) = view.slice(1..view.len()) {
                *view = rest;
            }
        }
    }

    #[test]
    fn test_new_view_is_unbound() {
        let view = ColumnView::new();
        assert!(!view.is_bound());
        assert_eq!(view.active_type(), None);
        assert_eq!(
            view.get::<i64>().unwrap_err(),
            ViewError::NotFound {
                requested: DataType::Int64,
                active: None
            }
        );
    }

    #[test]
    fn test_bind_then_get_returns_same_bounds() {
        let mut data = vec![1i64, 2, 3, 4];
        let range = RangeView::new(&mut data);
        let view = ColumnView::from_view(range);

        assert_eq!(view.active_type(), Some(DataType::Int64));
        assert!(view.get::<i64>().unwrap().same_bounds(&range));
        assert_eq!(view.len::<i64>(), Ok(4));
    }

    #[test]
    fn test_get_with_wrong_type_is_not_found() {
        let mut data = vec![1.0f64, 2.0];
        let view = ColumnView::from_slice(&mut data);

        let err = view.get::<i64>().unwrap_err();
        assert_eq!(
            err,
            ViewError::NotFound {
                requested: DataType::Int64,
                active: Some(DataType::Float64)
            }
        );
        assert_eq!(err.to_string(), "No Int64 data in view (active type: Float64)");
        assert!(view.front::<String>().is_err());
        assert!(view.is_empty::<bool>().is_err());
    }

    #[test]
    fn test_rebind_erases_previous_type() {
        let mut ints = vec![1i32, 2];
        let mut names = vec!["a".to_string()];
        let mut view = ColumnView::from_slice(&mut ints);
        let id = view.id();

        let previous = view.rebind(RangeView::new(&mut names));

        assert_eq!(previous, Some(DataType::Int32));
        assert_eq!(view.id(), id);
        assert_eq!(view.active_type(), Some(DataType::String));
        assert!(view.get::<i32>().is_err());
        assert_eq!(view.front::<String>(), Ok("a".to_string()));
    }

    #[test]
    fn test_erase_leaves_view_unbound() {
        let mut data = vec![true];
        let mut view = ColumnView::from_slice(&mut data);

        assert_eq!(view.erase(), Some(DataType::Boolean));
        assert_eq!(view.erase(), None);
        assert!(view.get::<bool>().is_err());
    }

    #[test]
    fn test_clone_aliases_storage_with_new_identity() {
        let mut data = vec![5i64, 6, 7];
        let a = ColumnView::from_slice(&mut data);
        let b = a.clone();

        assert_ne!(a.id(), b.id());
        assert_eq!(b.active_type(), a.active_type());
        assert!(a.get::<i64>().unwrap().same_bounds(&b.get::<i64>().unwrap()));

        a.get::<i64>().unwrap().set(0, 50).unwrap();
        assert_eq!(b.front::<i64>(), Ok(50));
    }

    #[test]
    fn test_clone_from_replaces_previous_binding() {
        let mut ints = vec![1i64];
        let mut flags = vec![true, false];
        let source = ColumnView::from_slice(&mut ints);
        let mut dest = ColumnView::from_slice(&mut flags);
        let dest_id = dest.id();

        dest.clone_from(&source);

        assert_eq!(dest.id(), dest_id);
        assert_eq!(dest.active_type(), Some(DataType::Int64));
        assert!(dest.get::<bool>().is_err());
    }

    #[test]
    fn test_take_from_leaves_source_unbound() {
        let mut data = vec![3i64, 1, 2];
        let mut source = ColumnView::from_slice(&mut data);
        let mut dest = ColumnView::new();

        assert_eq!(dest.take_from(&mut source), Some(DataType::Int64));
        assert!(!source.is_bound());
        assert_eq!(source.sort(&Ascending), Err(ViewError::Unbound));

        dest.sort(&Ascending).unwrap();
        assert_eq!(dest.iter::<i64>().unwrap().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_take_gives_new_identity() {
        let mut data = vec![1i32];
        let mut a = ColumnView::from_slice(&mut data);
        let b = a.take();

        assert_ne!(a.id(), b.id());
        assert!(!a.is_bound());
        assert_eq!(b.active_type(), Some(DataType::Int32));
    }

    #[test]
    fn test_visit_called_once_per_element() {
        let mut data = vec![1i32, 2, 3];
        let view = ColumnView::from_slice(&mut data);
        let mut counter = CountVisits { calls: 0 };

        assert_eq!(view.visit(&mut counter), Ok(DataType::Int32));
        assert_eq!(counter.calls, 3);

        let unbound = ColumnView::new();
        assert_eq!(unbound.visit(&mut counter), Err(ViewError::Unbound));
        assert_eq!(counter.calls, 3);
    }

    #[test]
    fn test_mutate_can_narrow_range() {
        let mut data = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        let mut view = ColumnView::from_slice(&mut data);

        assert_eq!(view.mutate(&mut DropFirst), Ok(DataType::String));
        assert_eq!(view.len_any(), Some(2));
        assert_eq!(view.front::<String>(), Ok("y".to_string()));
    }

    #[test]
    fn test_front_back_on_empty_view() {
        let mut data: Vec<f64> = Vec::new();
        let view = ColumnView::from_slice(&mut data);

        assert_eq!(view.is_empty::<f64>(), Ok(true));
        assert_eq!(
            view.front::<f64>(),
            Err(ViewError::Range(RangeError::Empty))
        );
        assert_eq!(view.back::<f64>(), Err(ViewError::Range(RangeError::Empty)));
    }

    #[test]
    fn test_reverse_iteration() {
        let mut data = vec![1i64, 2, 3];
        let view = ColumnView::from_slice(&mut data);

        let rev: Vec<i64> = view.iter_rev::<i64>().unwrap().collect();
        assert_eq!(rev, vec![3, 2, 1]);
    }

    #[test]
    fn test_values_and_display() {
        let d1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let mut data = vec![d1, d2];
        let view = ColumnView::from_slice(&mut data);

        view.sort(&Descending).unwrap();
        assert_eq!(
            view.values().unwrap(),
            vec![AnyValue::Date(d1), AnyValue::Date(d2)]
        );
        assert_eq!(view.value(1), Ok(AnyValue::Date(d2)));
        assert_eq!(view.to_string(), "[Date] 2024-03-01, 2023-12-31");
        assert_eq!(ColumnView::new().to_string(), "[unbound]");
    }

    #[test]
    fn test_display_truncates_long_views() {
        let mut data: Vec<i32> = (0..12).collect();
        let view = ColumnView::from_slice(&mut data);

        assert_eq!(
            view.to_string(),
            "[Int32] 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, ..."
        );
    }

    #[test]
    fn test_typed_for_each_and_sort_by() {
        let mut data = vec![2i64, 9, 4];
        let view = ColumnView::from_slice(&mut data);

        view.sort_by::<i64>(|a, b| b.cmp(a)).unwrap();
        let mut seen = Vec::new();
        view.for_each::<i64>(|v| seen.push(*v)).unwrap();
        assert_eq!(seen, vec![9, 4, 2]);

        assert!(view.sort_by::<f64>(|a, b| a.total_cmp(b)).is_err());
    }
}
