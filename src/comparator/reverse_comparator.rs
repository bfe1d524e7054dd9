use std::cmp;

use super::Comparator;

/// Inverts the order of the wrapped comparator.
#[derive(Debug, Default)]
pub struct ReverseComparator<C>
where
    C: Comparator,
{
    c: C,
}

impl<C> ReverseComparator<C>
where
    C: Comparator,
{
    pub fn new(c: C) -> Self {
        Self { c }
    }
}

impl<C> Clone for ReverseComparator<C>
where
    C: Comparator,
{
    fn clone(&self) -> Self {
        Self { c: self.c.clone() }
    }
}

impl<C> Comparator for ReverseComparator<C>
where
    C: Comparator,
{
    type Item = C::Item;

    fn compare(&self, a: &Self::Item, b: &Self::Item) -> cmp::Ordering {
        self.c.compare(a, b).reverse()
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering::*;

    use crate::comparator::prelude::*;

    #[test]
    fn reverse_compare() {
        let cmp = ReverseComparator::new(DefaultComparator::<u64>::new());

        assert_eq!(cmp.compare(&1, &2), Greater);
        assert_eq!(cmp.compare(&2, &1), Less);
        assert_eq!(cmp.compare(&7, &7), Equal);
    }
}
