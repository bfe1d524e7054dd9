use std::sync::Arc;

use parking_lot::RwLock;

use crate::{comparator::Comparator, error::Result, skip_list::SkipListMap};

/// A [`SkipListMap`] behind one reader-writer lock.
///
/// Clones share the same map. Lookups take the read lock, mutations the write
/// lock, so a writer never runs concurrently with readers.
pub struct SharedSkipListMap<K, V, C> {
    inner: Arc<RwLock<SkipListMap<K, V, C>>>,
}

impl<K, V, C> Clone for SharedSkipListMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, C> From<SkipListMap<K, V, C>> for SharedSkipListMap<K, V, C> {
    fn from(map: SkipListMap<K, V, C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }
}

impl<K, V, C> SharedSkipListMap<K, V, C>
where
    C: Comparator<Item = K>,
{
    pub fn new(map: SkipListMap<K, V, C>) -> Self {
        map.into()
    }

    pub fn insert(&self, key: K, value: V) -> Result<Option<V>> {
        self.inner.write().insert(key, value)
    }

    pub fn insert_with_height(&self, key: K, value: V, height: usize) -> Result<Option<V>> {
        self.inner.write().insert_with_height(key, value, height)
    }

    pub fn remove(&self, key: &K) -> Result<Option<V>> {
        self.inner.write().remove(key)
    }

    pub fn get(&self, key: &K) -> Result<Option<V>>
    where
        V: Clone,
    {
        Ok(self.inner.read().get(key)?.cloned())
    }

    pub fn contains_key(&self, key: &K) -> Result<bool> {
        self.inner.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn first_key_value(&self) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .read()
            .first_key_value()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    pub fn last_key_value(&self) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .read()
            .last_key_value()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Runs `f` under the read lock, e.g. to iterate a consistent view.
    pub fn read<R>(&self, f: impl FnOnce(&SkipListMap<K, V, C>) -> R) -> R {
        let guard = self.inner.read();
        f(&*guard)
    }

    /// Runs `f` under the write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut SkipListMap<K, V, C>) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut *guard)
    }
}
