use crate::datatypes::{DataType, supported_types};
use crate::errors::RangeError;
use crate::range::RangeView;
use crate::view::ColumnView;
use std::cell::Cell;
use std::ops::Range;

macro_rules! define_column {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Owned storage for one column of a supported type.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Column {
            $($variant(Vec<$ty>)),*
        }

        impl Column {
            pub fn len(&self) -> usize {
                match self {
                    $(Column::$variant(v) => v.len()),*
                }
            }

            pub fn data_type(&self) -> DataType {
                match self {
                    $(Column::$variant(_) => DataType::$variant),*
                }
            }

            /// View over every row.
            pub fn view(&mut self) -> ColumnView<'_> {
                match self {
                    $(Column::$variant(v) => ColumnView::from_slice(v.as_mut_slice())),*
                }
            }

            /// View over rows `[range.start, range.end)`.
            pub fn slice_view(&mut self, range: Range<usize>) -> Result<ColumnView<'_>, RangeError> {
                match self {
                    $(
                        Column::$variant(v) => {
                            let cells = Cell::from_mut(v.as_mut_slice()).as_slice_of_cells();
                            Ok(ColumnView::from_view(RangeView::from_range(cells, range)?))
                        }
                    )*
                }
            }
        }

        $(
            impl From<Vec<$ty>> for Column {
                fn from(values: Vec<$ty>) -> Self {
                    Column::$variant(values)
                }
            }
        )*
    };
}

supported_types!(define_column);

impl Column {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Ascending;

    #[test]
    fn test_column_metadata() {
        let col = Column::from(vec![1i64, 2, 3]);
        assert_eq!(col.len(), 3);
        assert_eq!(col.data_type(), DataType::Int64);
        assert!(!col.is_empty());
        assert!(Column::from(Vec::<bool>::new()).is_empty());
    }

    #[test]
    fn test_view_writes_through_to_column() {
        let mut col = Column::from(vec![3i32, 1, 2]);
        {
            let view = col.view();
            assert_eq!(view.active_type(), Some(DataType::Int32));
            view.sort(&Ascending).unwrap();
        }
        assert_eq!(col, Column::Int32(vec![1, 2, 3]));
    }

    #[test]
    fn test_slice_view_bounds() {
        let mut col = Column::from(vec!["a".to_string(), "b".to_string(), "c".to_string()]);

        let view = col.slice_view(1..3).unwrap();
        assert_eq!(view.len::<String>(), Ok(2));
        assert_eq!(view.front::<String>(), Ok("b".to_string()));

        assert_eq!(
            col.slice_view(2..4).unwrap_err(),
            RangeError::InvalidBounds {
                begin: 2,
                end: 4,
                len: 3
            }
        );
    }
}
