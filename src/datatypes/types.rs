use super::element::sealed::Sealed;
use super::{AnyValue, Element, supported_types};
use crate::dispatch::{Compare, Mutator, Visitor};
use crate::errors::{RangeError, ViewError};
use crate::range::RangeView;
use std::fmt;

macro_rules! define_types {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Tag naming one member of the supported element type set.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum DataType {
            $($variant),*
        }

        impl DataType {
            /// Every supported type, in fan-out order.
            pub const ALL: &'static [DataType] = &[$(DataType::$variant),*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(DataType::$variant => stringify!($variant)),*
                }
            }
        }

        /// The active binding of a view: nothing, or one typed range.
        #[derive(Clone, Copy)]
        pub enum Slot<'a> {
            Unbound,
            $($variant(RangeView<'a, $ty>)),*
        }

        impl<'a> Slot<'a> {
            pub fn data_type(&self) -> Option<DataType> {
                match self {
                    Slot::Unbound => None,
                    $(Slot::$variant(_) => Some(DataType::$variant)),*
                }
            }

            pub fn len(&self) -> Option<usize> {
                match self {
                    Slot::Unbound => None,
                    $(Slot::$variant(view) => Some(view.len())),*
                }
            }

            pub fn value_at(&self, index: usize) -> Result<AnyValue, ViewError> {
                match self {
                    Slot::Unbound => Err(ViewError::Unbound),
                    $(
                        Slot::$variant(view) => view
                            .get(index)
                            .map(AnyValue::from)
                            .ok_or_else(|| RangeError::OutOfBounds { index, len: view.len() }.into()),
                    )*
                }
            }

            pub fn visit<V: Visitor>(&self, visitor: &mut V) -> Option<DataType> {
                match self {
                    Slot::Unbound => None,
                    $(
                        Slot::$variant(view) => {
                            view.for_each(|value| visitor.visit(value));
                            Some(DataType::$variant)
                        }
                    )*
                }
            }

            pub fn sort<C: Compare>(&self, compare: &C) -> Option<DataType> {
                match self {
                    Slot::Unbound => None,
                    $(
                        Slot::$variant(view) => {
                            view.sort_by(|a, b| compare.compare(a, b));
                            Some(DataType::$variant)
                        }
                    )*
                }
            }

            pub fn mutate<M: Mutator>(&mut self, mutator: &mut M) -> Option<DataType> {
                match self {
                    Slot::Unbound => None,
                    $(
                        Slot::$variant(view) => {
                            mutator.mutate(view);
                            Some(DataType::$variant)
                        }
                    )*
                }
            }
        }

        $(
            impl Sealed for $ty {
                fn into_slot(view: RangeView<'_, Self>) -> Slot<'_> {
                    Slot::$variant(view)
                }

                fn from_slot<'s, 'a>(slot: &'s Slot<'a>) -> Option<&'s RangeView<'a, Self>> {
                    match slot {
                        Slot::$variant(view) => Some(view),
                        _ => None,
                    }
                }

                fn from_slot_mut<'s, 'a>(
                    slot: &'s mut Slot<'a>,
                ) -> Option<&'s mut RangeView<'a, Self>> {
                    match slot {
                        Slot::$variant(view) => Some(view),
                        _ => None,
                    }
                }
            }

            impl Element for $ty {
                const DATA_TYPE: DataType = DataType::$variant;
            }
        )*
    };
}

supported_types!(define_types);

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_lists_every_type_once_in_order() {
        assert_eq!(
            DataType::ALL,
            &[
                DataType::Boolean,
                DataType::Int32,
                DataType::Int64,
                DataType::Float64,
                DataType::String,
                DataType::Date,
                DataType::Datetime,
            ]
        );
    }

    #[test]
    fn test_display_uses_variant_name() {
        assert_eq!(DataType::Int64.to_string(), "Int64");
        assert_eq!(DataType::Datetime.to_string(), "Datetime");
    }

    #[test]
    fn test_slot_lookup_matches_only_active_type() {
        let mut data = vec![1i64, 2];
        let slot = i64::into_slot(RangeView::new(&mut data));

        assert_eq!(slot.data_type(), Some(DataType::Int64));
        assert_eq!(slot.len(), Some(2));
        assert!(i64::from_slot(&slot).is_some());
        assert!(f64::from_slot(&slot).is_none());
        assert!(String::from_slot(&slot).is_none());
    }

    #[test]
    fn test_unbound_slot_has_no_type() {
        let slot = Slot::Unbound;
        assert_eq!(slot.data_type(), None);
        assert_eq!(slot.len(), None);
        assert_eq!(slot.value_at(0), Err(ViewError::Unbound));
    }

    #[test]
    fn test_value_at_reads_dynamically() {
        let mut data = vec![true, false];
        let slot = bool::into_slot(RangeView::new(&mut data));

        assert_eq!(slot.value_at(1), Ok(AnyValue::Boolean(false)));
        assert_eq!(
            slot.value_at(2),
            Err(ViewError::Range(RangeError::OutOfBounds { index: 2, len: 2 }))
        );
    }
}
