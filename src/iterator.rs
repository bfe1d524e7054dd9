use std::iter::FusedIterator;

use crate::{
    comparator::Comparator, error::Result, node::Link, skip_list::SkipListMap,
};

/// Ascending iterator over the entries of a [`SkipListMap`].
///
/// Walks `next[0]` from the front and `prev[0]` from the tail.
pub struct Iter<'a, K, V, C> {
    list: &'a SkipListMap<K, V, C>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, K, V, C> Iter<'a, K, V, C> {
    pub(crate) fn new(list: &'a SkipListMap<K, V, C>) -> Self {
        Self {
            list,
            front: list.next_of(None, 0),
            back: list.tail(),
            remaining: list.len(),
        }
    }
}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.list.next_of(Some(id), 0);
        Some(self.list.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.list.prev_of(id, 0);
        Some(self.list.entry(id))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}

/// A seekable cursor over a [`SkipListMap`], moving in both directions.
///
/// A new cursor is not positioned; `key`/`value` return `None` until one of the
/// `seek*` methods lands on an entry.
pub struct SkipListIter<'a, K, V, C> {
    list: &'a SkipListMap<K, V, C>,
    cur: Link,
}

impl<'a, K, V, C> SkipListIter<'a, K, V, C> {
    pub(crate) fn new(list: &'a SkipListMap<K, V, C>) -> Self {
        Self { list, cur: None }
    }

    pub fn is_valid(&self) -> bool {
        self.cur.is_some()
    }

    pub fn key(&self) -> Option<&'a K> {
        self.cur.map(|id| self.list.entry(id).0)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.cur.map(|id| self.list.entry(id).1)
    }

    pub fn next(&mut self) {
        assert!(self.is_valid());
        self.cur = self.list.next_of(self.cur, 0);
    }

    pub fn prev(&mut self) {
        assert!(self.is_valid());
        self.cur = self.cur.and_then(|id| self.list.prev_of(id, 0));
    }

    pub fn seek_to_first(&mut self) {
        self.cur = self.list.next_of(None, 0);
    }

    pub fn seek_to_last(&mut self) {
        self.cur = self.list.tail();
    }
}

impl<K, V, C> SkipListIter<'_, K, V, C>
where
    C: Comparator<Item = K>,
{
    /// Positions at the first entry whose key is `>= key`.
    pub fn seek(&mut self, key: &K) -> Result<()> {
        self.cur = self.list.lower_bound(key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{comparator::prelude::*, error::Error, skip_list::SkipListMap};

    fn make_list(count: u32) -> anyhow::Result<SkipListMap<u32, u32>> {
        let mut list = SkipListMap::with_comparator(8, DefaultComparator::new())?;
        // even keys only, so odd keys can be seeked between them
        for i in 0..count {
            list.insert(i * 2, i)?;
        }
        Ok(list)
    }

    #[test]
    fn test_iterator() -> anyhow::Result<()> {
        const TEST_COUNT: u32 = 10_000;
        let list = make_list(TEST_COUNT)?;

        let iter = list.iter();
        assert_eq!(iter.len(), TEST_COUNT as usize);
        for (i, (k, v)) in iter.enumerate() {
            assert_eq!(*k, i as u32 * 2);
            assert_eq!(*v, i as u32);
        }

        // a fresh iterator starts over
        assert_eq!(list.iter().next(), Some((&0, &0)));
        assert_eq!((&list).into_iter().count(), TEST_COUNT as usize);
        Ok(())
    }

    #[test]
    fn test_iterator_rev() -> anyhow::Result<()> {
        let list = make_list(100)?;

        let keys = list.iter().rev().map(|(k, _)| *k).collect_vec();
        assert_eq!(keys, (0..100).rev().map(|i| i * 2).collect_vec());

        // both ends meet in the middle without yielding twice
        let mut iter = list.iter();
        let mut seen = Vec::new();
        while let Some((k, _)) = iter.next() {
            seen.push(*k);
            if let Some((k, _)) = iter.next_back() {
                seen.push(*k);
            }
        }
        assert_eq!(seen.len(), 100);
        assert_eq!(seen.iter().sorted().copied().collect_vec(), (0..100).map(|i| i * 2).collect_vec());
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        Ok(())
    }

    #[test]
    fn test_iterator_seek() -> anyhow::Result<()> {
        const TEST_COUNT: u32 = 1_000;
        let list = make_list(TEST_COUNT)?;

        let mut iter = list.cursor();
        assert!(!iter.is_valid());
        assert_eq!(iter.key(), None);

        iter.seek_to_first();
        assert!(iter.is_valid());
        for i in 0..TEST_COUNT {
            iter.seek(&(i * 2))?;
            assert_eq!(iter.key(), Some(&(i * 2)));
            assert_eq!(iter.value(), Some(&i));

            // lands on the next entry
            iter.seek(&(i * 2 + 1))?;
            if i + 1 < TEST_COUNT {
                assert_eq!(iter.key(), Some(&(i * 2 + 2)));
            } else {
                assert!(!iter.is_valid());
            }
        }

        iter.seek_to_last();
        assert!(iter.is_valid());
        for i in (0..TEST_COUNT).rev() {
            assert_eq!(iter.key(), Some(&(i * 2)));
            assert_eq!(iter.value(), Some(&i));
            iter.prev();
        }
        assert!(!iter.is_valid());

        iter.seek_to_first();
        for i in 0..TEST_COUNT {
            assert_eq!(iter.key(), Some(&(i * 2)));
            iter.next();
        }
        assert!(!iter.is_valid());
        Ok(())
    }

    #[test]
    fn test_empty_cursor() -> anyhow::Result<()> {
        let list = make_list(0)?;
        let mut iter = list.cursor();

        iter.seek_to_first();
        assert!(!iter.is_valid());
        iter.seek_to_last();
        assert!(!iter.is_valid());
        iter.seek(&3)?;
        assert!(!iter.is_valid());
        assert_eq!(list.iter().next_back(), None);
        Ok(())
    }

    #[test]
    fn seek_requires_comparator() -> anyhow::Result<()> {
        let list = SkipListMap::<u32, u32>::new(4)?;
        let mut iter = list.cursor();
        assert!(matches!(iter.seek(&1), Err(Error::MissingComparator)));

        // plain iteration needs no comparator
        assert_eq!(list.iter().count(), 0);
        Ok(())
    }
}
