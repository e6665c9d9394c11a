/// The closed set of element types a view can present, in fan-out order.
///
/// Invokes `$callback!` with one `Variant(Type)` entry per supported type,
/// so every enum and `match` over the set is generated from this one list.
macro_rules! supported_types {
    ($callback:ident) => {
        $callback! {
            Boolean(bool),
            Int32(i32),
            Int64(i64),
            Float64(f64),
            String(String),
            Date(chrono::NaiveDate),
            Datetime(chrono::NaiveDateTime),
        }
    };
}

pub(crate) use supported_types;

mod any_value;
mod element;
mod types;

pub use any_value::AnyValue;
pub use element::{Element, TotalOrder};
pub use types::DataType;

pub(crate) use types::Slot;
