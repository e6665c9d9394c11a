use super::{AnyValue, DataType};
use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;

/// A total order usable by the built-in comparators, including for floats.
pub trait TotalOrder {
    fn total_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_total_order_via_ord {
    ($($ty:ty),*) => {
        $(
            impl TotalOrder for $ty {
                fn total_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

impl_total_order_via_ord!(bool, i32, i64, String, NaiveDate, NaiveDateTime);

impl TotalOrder for f64 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }
}

/// An element type a [`ColumnView`](crate::ColumnView) can present.
///
/// Implemented exactly for the supported type set; it cannot be implemented
/// outside this crate.
pub trait Element:
    sealed::Sealed
    + TotalOrder
    + Clone
    + Default
    + fmt::Debug
    + fmt::Display
    + Into<AnyValue>
    + 'static
{
    const DATA_TYPE: DataType;
}

pub(crate) mod sealed {
    use crate::datatypes::Slot;
    use crate::range::RangeView;

    pub trait Sealed: Sized {
        fn into_slot(view: RangeView<'_, Self>) -> Slot<'_>;

        fn from_slot<'s, 'a>(slot: &'s Slot<'a>) -> Option<&'s RangeView<'a, Self>>;

        fn from_slot_mut<'s, 'a>(slot: &'s mut Slot<'a>) -> Option<&'s mut RangeView<'a, Self>>;
    }
}
