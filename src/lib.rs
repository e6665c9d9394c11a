//! Type-erased, non-owning views over columns of a closed set of element
//! types.
//!
//! A [`ColumnView`] borrows a contiguous range of one element type and can
//! be copied, moved, visited, sorted and mutated without naming that type.
//! Typed access goes through [`ColumnView::get`] and friends, which fail with
//! [`ViewError::NotFound`] for any type other than the active one.
//!
//! ```
//! use colview::{ColumnView, DataType, Descending};
//!
//! let mut data = vec![1i64, 2, 3, 4];
//! let view = ColumnView::from_slice(&mut data);
//!
//! assert_eq!(view.active_type(), Some(DataType::Int64));
//! assert!(view.get::<f64>().is_err());
//!
//! view.sort(&Descending).unwrap();
//! assert_eq!(data, vec![4, 3, 2, 1]);
//! ```

pub mod column;
pub mod datatypes;
pub mod dispatch;
pub mod errors;
pub mod logging;
pub mod range;
pub mod view;

pub use column::Column;
pub use datatypes::{AnyValue, DataType, Element};
pub use dispatch::{Ascending, CollectValues, Compare, Descending, Mutator, Visitor};
pub use errors::{RangeError, ViewError};
pub use range::RangeView;
pub use view::{ColumnView, ViewId};
