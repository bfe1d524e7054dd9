use std::{cmp, marker::PhantomData};

use super::Comparator;

/// Orders items by their [`Ord`] implementation.
#[derive(Debug, Default)]
pub struct DefaultComparator<T> {
    _marker: PhantomData<fn(&T, &T)>,
}

impl<T> DefaultComparator<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Comparator for DefaultComparator<T>
where
    T: Ord,
{
    type Item = T;

    fn compare(&self, a: &Self::Item, b: &Self::Item) -> cmp::Ordering {
        a.cmp(b)
    }
}

impl<T> Clone for DefaultComparator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DefaultComparator<T> {}
