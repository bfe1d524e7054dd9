use std::cmp;

mod default_comparator;
mod fn_comparator;
mod reverse_comparator;

pub mod prelude {
    #![allow(unused)]

    pub use super::{
        Comparator, default_comparator::DefaultComparator, fn_comparator::FnComparator,
        reverse_comparator::ReverseComparator,
    };
}

/// A total order over `Item`.
///
/// The order must stay the same for the whole lifetime of the map it is installed
/// in; swapping in an inconsistent comparator leaves the links in an unspecified order.
pub trait Comparator: Send + Sync + Clone {
    type Item;

    fn compare(&self, a: &Self::Item, b: &Self::Item) -> cmp::Ordering;
}
