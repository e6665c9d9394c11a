//! Callbacks for operations fanned out over the supported type set.
//!
//! A closure cannot be generic over the element type, so each operation
//! takes an implementor of a trait with a generic method instead. The view
//! calls into it only for whichever type is active.

use crate::datatypes::{AnyValue, Element};
use crate::range::RangeView;
use std::cmp::Ordering;

/// Called once per element, front to back.
pub trait Visitor {
    fn visit<T: Element>(&mut self, value: &T);
}

/// Ordering used by [`ColumnView::sort`](crate::ColumnView::sort).
pub trait Compare {
    fn compare<T: Element>(&self, a: &T, b: &T) -> Ordering;
}

/// Called once with the whole active range.
///
/// The mutator may narrow or re-point the range to any other window of the
/// same storage; the view keeps whatever range is left behind.
pub trait Mutator {
    fn mutate<T: Element>(&mut self, view: &mut RangeView<'_, T>);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Ascending;

impl Compare for Ascending {
    fn compare<T: Element>(&self, a: &T, b: &T) -> Ordering {
        a.total_cmp(b)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Descending;

impl Compare for Descending {
    fn compare<T: Element>(&self, a: &T, b: &T) -> Ordering {
        b.total_cmp(a)
    }
}

/// Collects every element as an [`AnyValue`].
#[derive(Debug, Default)]
pub struct CollectValues {
    pub values: Vec<AnyValue>,
}

impl Visitor for CollectValues {
    fn visit<T: Element>(&mut self, value: &T) {
        self.values.push(value.clone().into());
    }
}

/// Renders up to `limit` elements as a comma separated list.
#[derive(Debug)]
pub(crate) struct Render {
    pub out: String,
    pub limit: usize,
    pub seen: usize,
}

impl Render {
    pub fn new(limit: usize) -> Self {
        Self {
            out: String::new(),
            limit,
            seen: 0,
        }
    }
}

impl Visitor for Render {
    fn visit<T: Element>(&mut self, value: &T) {
        if self.seen < self.limit {
            if self.seen > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str(&value.to_string());
        } else if self.seen == self.limit {
            self.out.push_str(", ...");
        }
        self.seen += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_comparators() {
        assert_eq!(Ascending.compare(&1i64, &2), Ordering::Less);
        assert_eq!(Descending.compare(&1i64, &2), Ordering::Greater);
        assert_eq!(Descending.compare(&0.5f64, &f64::NAN), Ordering::Greater);
    }

    #[test]
    fn test_render_truncates() {
        let mut render = Render::new(2);
        for v in [1i32, 2, 3, 4] {
            render.visit(&v);
        }
        assert_eq!(render.out, "1, 2, ...");
        assert_eq!(render.seen, 4);
    }

    #[test]
    fn test_collect_values() {
        let mut collect = CollectValues::default();
        collect.visit(&"a".to_string());
        collect.visit(&true);
        assert_eq!(
            collect.values,
            vec![AnyValue::from("a"), AnyValue::Boolean(true)]
        );
    }
}
