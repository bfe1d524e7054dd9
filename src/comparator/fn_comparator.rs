use std::{cmp, fmt, marker::PhantomData};

use super::Comparator;

/// Adapts a plain function or closure into a [`Comparator`].
pub struct FnComparator<T, F> {
    f: F,
    _marker: PhantomData<fn(&T, &T)>,
}

impl<T, F> FnComparator<T, F>
where
    F: Fn(&T, &T) -> cmp::Ordering,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<T, F> Comparator for FnComparator<T, F>
where
    F: Fn(&T, &T) -> cmp::Ordering + Send + Sync + Clone,
{
    type Item = T;

    fn compare(&self, a: &Self::Item, b: &Self::Item) -> cmp::Ordering {
        (self.f)(a, b)
    }
}

impl<T, F: Clone> Clone for FnComparator<T, F> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, F> fmt::Debug for FnComparator<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComparator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering::*;

    use crate::comparator::prelude::*;

    #[test]
    fn closure_compare() {
        // case-insensitive
        let cmp = FnComparator::new(|a: &String, b: &String| {
            a.to_lowercase().cmp(&b.to_lowercase())
        });

        assert_eq!(cmp.compare(&"Key".to_string(), &"kEY".to_string()), Equal);
        assert_eq!(cmp.compare(&"a".to_string(), &"B".to_string()), Less);
        assert_eq!(cmp.clone().compare(&"b".to_string(), &"A".to_string()), Greater);
    }
}
