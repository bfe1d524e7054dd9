use std::{
    cmp::Ordering::*,
    fmt, mem,
};

use crate::{
    arena::NodeArena,
    comparator::prelude::*,
    error::{Error, Result},
    iterator::{Iter, SkipListIter},
    node::{Link, MAX_HEIGHT, Node, NodeId, RandomHeight, check_height},
    options::SkipListOptions,
};

/// An ordered map backed by a doubly-linked skip list.
///
/// Every node carries a `next` and a `prev` link per level it participates in.
/// The head sentinel spans all `max_height` levels and is never stored in the
/// arena; a `None` on the `prev` side always means "the head".
///
/// Mutation takes `&mut self`, so the map is single-writer by construction. Wrap
/// it in [`SharedSkipListMap`](crate::shared::SharedSkipListMap) to share it across
/// threads.
pub struct SkipListMap<K, V, C = DefaultComparator<K>> {
    head: Box<[Link]>,
    arena: NodeArena<K, V>,
    // last node of level 0
    tail: Link,
    len: usize,
    heights: RandomHeight,
    c: Option<C>,
}

impl<K, V, C> SkipListMap<K, V, C>
where
    C: Comparator<Item = K>,
{
    /// Creates a map with default options and no comparator.
    pub fn new(max_height: usize) -> Result<Self> {
        SkipListOptions::new().max_height(max_height).build()
    }

    pub fn with_comparator(max_height: usize, c: C) -> Result<Self> {
        SkipListOptions::new()
            .max_height(max_height)
            .build_with_comparator(c)
    }

    pub(crate) fn with_options(opts: &SkipListOptions, c: Option<C>) -> Result<Self> {
        opts.validate()?;

        let max_height = opts.get_max_height();
        tracing::debug!(
            max_height,
            branching = opts.get_branching(),
            seeded = opts.get_seed().is_some(),
            "create skip list map"
        );

        Ok(Self {
            head: vec![None; max_height].into_boxed_slice(),
            arena: NodeArena::new(),
            tail: None,
            len: 0,
            heights: RandomHeight::new(opts.get_branching(), opts.get_seed()),
            c,
        })
    }

    /// Installs the key order. Must happen before the first lookup or mutation and
    /// must not change the order of keys already in the map.
    pub fn set_comparator(&mut self, c: C) {
        if self.c.is_some() && !self.is_empty() {
            tracing::warn!(len = self.len, "comparator replaced on a non-empty map");
        } else {
            tracing::debug!("install comparator");
        }
        self.c = Some(c);
    }

    pub(crate) fn comparator(&self) -> Result<&C> {
        self.c.as_ref().ok_or(Error::MissingComparator)
    }

    /// Top-down predecessor search.
    ///
    /// Fills `prev[level]` with the last link on `level` whose key is strictly less
    /// than `key`, for every level of the head. Returns the level-0 successor if it
    /// is equal to `key`.
    fn search(&self, key: &K, prev: &mut [Link; MAX_HEIGHT]) -> Result<Option<NodeId>> {
        let c = self.comparator()?;
        let mut cur: Link = None;

        for level in (0..self.max_height()).rev() {
            while let Some(next) = self.next_of(cur, level) {
                if c.compare(&self.arena[next].key, key) != Less {
                    break;
                }
                cur = Some(next);
            }
            prev[level] = cur;
        }

        Ok(self
            .next_of(cur, 0)
            .filter(|&id| c.compare(&self.arena[id].key, key) == Equal))
    }

    /// First node whose key is `>= key`.
    pub(crate) fn lower_bound(&self, key: &K) -> Result<Link> {
        let mut prev = [None; MAX_HEIGHT];
        self.search(key, &mut prev)?;
        Ok(self.next_of(prev[0], 0))
    }

    pub fn get(&self, key: &K) -> Result<Option<&V>> {
        Ok(self.get_key_value(key)?.map(|(_, v)| v))
    }

    pub fn get_key_value(&self, key: &K) -> Result<Option<(&K, &V)>> {
        let mut prev = [None; MAX_HEIGHT];
        Ok(self.search(key, &mut prev)?.map(|id| self.entry(id)))
    }

    pub fn get_mut(&mut self, key: &K) -> Result<Option<&mut V>> {
        let mut prev = [None; MAX_HEIGHT];
        match self.search(key, &mut prev)? {
            Some(id) => Ok(Some(&mut self.arena[id].value)),
            None => Ok(None),
        }
    }

    pub fn contains_key(&self, key: &K) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Inserts with a height drawn from the map's height policy.
    ///
    /// If the key is already present its value is replaced in place and the old
    /// value returned; the node keeps its links and height.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.insert_node(key, value, None)
    }

    /// Inserts a node of exactly `height` levels, bypassing the height policy.
    ///
    /// Fails with [`Error::InvalidHeight`] unless `1 <= height <= max_height`. On an
    /// existing key this behaves like [`insert`](Self::insert) and `height` is unused.
    pub fn insert_with_height(&mut self, key: K, value: V, height: usize) -> Result<Option<V>> {
        check_height(height, self.max_height())?;
        self.insert_node(key, value, Some(height))
    }

    fn insert_node(&mut self, key: K, value: V, height: Option<usize>) -> Result<Option<V>> {
        let mut prev = [None; MAX_HEIGHT];
        if let Some(id) = self.search(&key, &mut prev)? {
            tracing::trace!(height = self.arena[id].height(), "update value in place");
            return Ok(Some(mem::replace(&mut self.arena[id].value, value)));
        }

        let max_height = self.max_height();
        let height = height.unwrap_or_else(|| self.heights.next_height(max_height));
        let id = self.arena.alloc(Node::new(key, value, height));
        self.link(id, &prev);
        self.len += 1;

        tracing::trace!(height, len = self.len, "insert node");
        Ok(None)
    }

    pub fn remove(&mut self, key: &K) -> Result<Option<V>> {
        Ok(self.remove_entry(key)?.map(|(_, v)| v))
    }

    /// Removes `key` and returns its entry. Removing an absent key is a no-op.
    pub fn remove_entry(&mut self, key: &K) -> Result<Option<(K, V)>> {
        let mut prev = [None; MAX_HEIGHT];
        let Some(id) = self.search(key, &mut prev)? else {
            return Ok(None);
        };

        debug_assert!(
            self.arena[id]
                .prev
                .iter()
                .zip(prev.iter())
                .all(|(a, b)| a == b),
            "back links disagree with search path"
        );

        let node = self.unlink(id);
        tracing::trace!(height = node.height(), len = self.len, "remove node");
        Ok(Some((node.key, node.value)))
    }

    /// Number of levels the node holding `key` participates in.
    pub fn height_of(&self, key: &K) -> Result<Option<usize>> {
        let mut prev = [None; MAX_HEIGHT];
        Ok(self
            .search(key, &mut prev)?
            .map(|id| self.arena[id].height()))
    }

    /// Walks every level and checks ordering, level monotonicity, link symmetry,
    /// the tail cache and the size counter.
    pub fn validate(&self) -> Result<()> {
        let c = self.comparator()?;
        let res = self.check_levels(c);
        if let Err(ref e) = res {
            tracing::error!("{}", e);
        }
        res
    }

    fn check_levels(&self, c: &C) -> Result<()> {
        let corrupt = |msg: String| Err(Error::Corruption(msg));

        let mut bottom: Vec<NodeId> = Vec::new();
        let mut lower: Vec<NodeId> = Vec::new();

        for level in 0..self.max_height() {
            let mut chain = Vec::new();
            let mut prev: Link = None;
            let mut cur = self.head[level];

            while let Some(id) = cur {
                let Some(node) = self.arena.get(id) else {
                    return corrupt(format!("dangling link to {} on level {level}", id.0));
                };
                if node.height() <= level {
                    return corrupt(format!(
                        "node {} of height {} linked on level {level}",
                        id.0,
                        node.height()
                    ));
                }
                if node.prev[level] != prev {
                    return corrupt(format!("broken back link of node {} on level {level}", id.0));
                }
                if let Some(p) = prev {
                    if c.compare(&self.arena[p].key, &node.key) != Less {
                        return corrupt(format!("keys out of order on level {level}"));
                    }
                }

                chain.push(id);
                if chain.len() > self.arena.len() {
                    return corrupt(format!("cycle on level {level}"));
                }
                prev = cur;
                cur = node.next[level];
            }

            if level == 0 {
                if chain.len() != self.len {
                    return corrupt(format!(
                        "size is {} but level 0 holds {} nodes",
                        self.len,
                        chain.len()
                    ));
                }
                if chain.len() != self.arena.len() {
                    return corrupt(format!(
                        "{} nodes allocated but {} reachable",
                        self.arena.len(),
                        chain.len()
                    ));
                }
                if self.tail != prev {
                    return corrupt("tail does not point at the last node".to_string());
                }
                bottom = chain.clone();
            } else {
                let mut below = lower.iter();
                if !chain.iter().all(|id| below.any(|x| x == id)) {
                    return corrupt(format!("level {level} is not a subsequence of level {}", level - 1));
                }
                let expected = bottom
                    .iter()
                    .filter(|&&id| self.arena[id].height() > level)
                    .count();
                if chain.len() != expected {
                    return corrupt(format!(
                        "{expected} nodes reach level {level} but {} are linked",
                        chain.len()
                    ));
                }
            }

            lower = chain;
        }

        Ok(())
    }
}

impl<K, V, C> SkipListMap<K, V, C> {
    pub fn max_height(&self) -> usize {
        self.head.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ascending iterator over the entries. A fresh iterator starts at the front.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter::new(self)
    }

    /// An unpositioned cursor; call one of its `seek*` methods first.
    pub fn cursor(&self) -> SkipListIter<'_, K, V, C> {
        SkipListIter::new(self)
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.head[0].map(|id| self.entry(id))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tail.map(|id| self.entry(id))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let id = self.head[0]?;
        let node = self.unlink(id);
        Some((node.key, node.value))
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let id = self.tail?;
        let node = self.unlink(id);
        Some((node.key, node.value))
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head.fill(None);
        self.tail = None;
        self.len = 0;
    }

    /// The key each head link points at, from level 0 upwards.
    pub fn head_links(&self) -> Vec<Option<&K>> {
        self.head
            .iter()
            .map(|link| link.map(|id| &self.arena[id].key))
            .collect()
    }

    /// Keys linked on `level`, in chain order. Empty for levels above `max_height`.
    pub fn level_keys(&self, level: usize) -> Vec<&K> {
        let mut keys = Vec::new();
        if level >= self.max_height() {
            return keys;
        }
        let mut cur = self.head[level];
        while let Some(id) = cur {
            let node = &self.arena[id];
            keys.push(&node.key);
            cur = node.next[level];
        }
        keys
    }

    /// Approximate bytes held by the head, the nodes and their towers.
    pub fn mem_usage(&self) -> usize {
        self.head.len() * mem::size_of::<Link>() + self.arena.mem_usage()
    }

    pub(crate) fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = &self.arena[id];
        (&node.key, &node.value)
    }

    pub(crate) fn next_of(&self, at: Link, level: usize) -> Link {
        match at {
            None => self.head[level],
            Some(id) => self.arena[id].next[level],
        }
    }

    pub(crate) fn prev_of(&self, at: NodeId, level: usize) -> Link {
        self.arena[at].prev[level]
    }

    pub(crate) fn tail(&self) -> Link {
        self.tail
    }

    fn set_next(&mut self, at: Link, level: usize, to: Link) {
        match at {
            None => self.head[level] = to,
            Some(id) => self.arena[id].next[level] = to,
        }
    }

    // `at == None` is the end of the chain; only level 0 keeps a tail.
    fn set_prev(&mut self, at: Link, level: usize, to: Link) {
        match at {
            Some(id) => self.arena[id].prev[level] = to,
            None if level == 0 => self.tail = to,
            None => {}
        }
    }

    /// Splices `id` after `prev[level]` on each of its levels.
    fn link(&mut self, id: NodeId, prev: &[Link; MAX_HEIGHT]) {
        let height = self.arena[id].height();
        for (level, &p) in prev.iter().enumerate().take(height) {
            let n = self.next_of(p, level);

            let node = &mut self.arena[id];
            node.prev[level] = p;
            node.next[level] = n;

            self.set_prev(n, level, Some(id));
            self.set_next(p, level, Some(id));
        }
    }

    /// Splices `id` out of every level it participates in and frees its slot.
    fn unlink(&mut self, id: NodeId) -> Node<K, V> {
        let node = self.arena.release(id);
        for level in 0..node.height() {
            let (p, n) = (node.prev[level], node.next[level]);
            debug_assert_eq!(self.next_of(p, level), Some(id));

            self.set_next(p, level, n);
            self.set_prev(n, level, p);
        }
        self.len -= 1;
        node
    }
}

impl<K, V, C> fmt::Debug for SkipListMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a SkipListMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
