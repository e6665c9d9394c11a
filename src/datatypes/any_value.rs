use super::{DataType, supported_types};
use std::cmp::Ordering;
use std::fmt;

macro_rules! define_any_value {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// A single element read out of a view without knowing its type.
        #[derive(Debug, Clone)]
        pub enum AnyValue {
            $($variant($ty)),*
        }

        impl AnyValue {
            pub fn data_type(&self) -> DataType {
                match self {
                    $(Self::$variant(_) => DataType::$variant),*
                }
            }
        }

        impl fmt::Display for AnyValue {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match self {
                    $(Self::$variant(v) => write!(f, "{}", v)),*
                }
            }
        }

        impl PartialEq for AnyValue {
            fn eq(&self, other: &Self) -> bool {
                match (self, other) {
                    $((Self::$variant(a), Self::$variant(b)) => a == b,)*
                    _ => false,
                }
            }
        }

        impl PartialOrd for AnyValue {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                match (self, other) {
                    $((Self::$variant(a), Self::$variant(b)) => a.partial_cmp(b),)*
                    _ => None,
                }
            }
        }

        $(
            impl From<$ty> for AnyValue {
                fn from(item: $ty) -> Self {
                    AnyValue::$variant(item)
                }
            }
        )*
    };
}

supported_types!(define_any_value);

impl From<&str> for AnyValue {
    fn from(item: &str) -> Self {
        AnyValue::String(item.to_string())
    }
}
