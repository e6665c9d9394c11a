//! Non-owning range views over externally owned storage.
//!
//! A [`RangeView`] borrows a run of [`Cell`]s, so any number of views may
//! alias the same memory and a write through one of them is observed by all
//! the others. Views are `Copy`; copying one never copies elements.
//!
//! Two boundary conventions are supported:
//! - half-open `[begin, end)` via [`RangeView::from_range`], the default;
//! - inclusive `[first, last]` via [`RangeView::from_inclusive`], where `last`
//!   names the final element itself. An inclusive view is never empty.

use crate::errors::RangeError;
use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Range;

/// Borrowed window over `[begin, end)` of some element storage.
pub struct RangeView<'a, T> {
    cells: &'a [Cell<T>],
}

impl<T> Clone for RangeView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RangeView<'_, T> {}

impl<'a, T> RangeView<'a, T> {
    /// View over the whole of `data`.
    pub fn new(data: &'a mut [T]) -> Self {
        Self {
            cells: Cell::from_mut(data).as_slice_of_cells(),
        }
    }

    pub fn from_cells(cells: &'a [Cell<T>]) -> Self {
        Self { cells }
    }

    pub fn from_range(cells: &'a [Cell<T>], range: Range<usize>) -> Result<Self, RangeError> {
        if range.start > range.end || range.end > cells.len() {
            return Err(RangeError::InvalidBounds {
                begin: range.start,
                end: range.end,
                len: cells.len(),
            });
        }
        Ok(Self {
            cells: &cells[range],
        })
    }

    /// View over `[first, last]`, both ends included.
    pub fn from_inclusive(
        cells: &'a [Cell<T>],
        first: usize,
        last: usize,
    ) -> Result<Self, RangeError> {
        if first > last || last >= cells.len() {
            return Err(RangeError::InvalidBounds {
                begin: first,
                end: last.saturating_add(1),
                len: cells.len(),
            });
        }
        Ok(Self {
            cells: &cells[first..=last],
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_cells(&self) -> &'a [Cell<T>] {
        self.cells
    }

    /// True when both views cover exactly the same memory.
    pub fn same_bounds(&self, other: &RangeView<'_, T>) -> bool {
        std::ptr::eq(self.cells.as_ptr(), other.cells.as_ptr()) && self.len() == other.len()
    }

    /// Narrows the view to `range`, relative to the current window.
    pub fn slice(&self, range: Range<usize>) -> Result<Self, RangeError> {
        Self::from_range(self.cells, range)
    }

    pub fn set(&self, index: usize, value: T) -> Result<(), RangeError> {
        self.cell(index)?.set(value);
        Ok(())
    }

    pub fn swap(&self, a: usize, b: usize) -> Result<(), RangeError> {
        self.cell(a)?.swap(self.cell(b)?);
        Ok(())
    }

    fn cell(&self, index: usize) -> Result<&'a Cell<T>, RangeError> {
        self.cells.get(index).ok_or(RangeError::OutOfBounds {
            index,
            len: self.cells.len(),
        })
    }
}

impl<'a, T: Default + Clone> RangeView<'a, T> {
    /// Calls `f` with a copy of element `index`.
    pub fn with<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Result<R, RangeError> {
        let value = peek(self.cell(index)?, T::clone);
        Ok(f(&value))
    }

    /// Calls `f` once per element, front to back. Each element stays in
    /// place while `f` runs, so aliases read the real data.
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        for cell in self.cells {
            let value = peek(cell, T::clone);
            f(&value);
        }
    }

    /// Sorts the viewed elements in place. Not stable.
    ///
    /// The storage is only written once the sort has finished; a panicking
    /// comparator leaves every element where it was.
    pub fn sort_by(&self, mut compare: impl FnMut(&T, &T) -> Ordering) {
        let mut values = self.to_vec();
        values.sort_unstable_by(|a, b| compare(a, b));
        for (cell, value) in self.cells.iter().zip(values) {
            cell.set(value);
        }
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.cells.get(index).map(|cell| peek(cell, T::clone))
    }

    pub fn front(&self) -> Result<T, RangeError> {
        self.cells
            .first()
            .map(|cell| peek(cell, T::clone))
            .ok_or(RangeError::Empty)
    }

    pub fn back(&self) -> Result<T, RangeError> {
        self.cells
            .last()
            .map(|cell| peek(cell, T::clone))
            .ok_or(RangeError::Empty)
    }

    pub fn iter(&self) -> Iter<'a, T> {
        Iter {
            cells: self.cells.iter(),
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T: Default + Clone + fmt::Debug> fmt::Debug for RangeView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        self.for_each(|value| {
            list.entry(value);
        });
        list.finish()
    }
}

// Lends the value out of its cell for the duration of `f`; the cell holds
// `T::default()` until it is put back. `f` must not reach user code.
fn peek<T: Default, R>(cell: &Cell<T>, f: impl FnOnce(&T) -> R) -> R {
    let value = cell.take();
    let out = f(&value);
    cell.set(value);
    out
}

/// Forward (and, through `rev`, reverse) iterator over cloned elements.
pub struct Iter<'a, T> {
    cells: std::slice::Iter<'a, Cell<T>>,
}

impl<T: Default + Clone> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.cells.next().map(|cell| peek(cell, T::clone))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl<T: Default + Clone> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<T> {
        self.cells.next_back().map(|cell| peek(cell, T::clone))
    }
}

impl<T: Default + Clone> ExactSizeIterator for Iter<'_, T> {}

impl<T: Default + Clone> FusedIterator for Iter<'_, T> {}
