use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::{Error, Result};

/// Upper bound of `max_height` a map can be configured with.
pub const MAX_HEIGHT: usize = 32;

/// Stable address of a node inside the map's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// A link on one level.
///
/// On the `prev` side `None` is the head sentinel, on the `next` side it is the end
/// of the chain.
pub(crate) type Link = Option<NodeId>;

#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) next: Box<[Link]>,
    pub(crate) prev: Box<[Link]>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, height: usize) -> Self {
        assert!(height > 0 && height <= MAX_HEIGHT);
        Self {
            key,
            value,
            next: vec![None; height].into_boxed_slice(),
            prev: vec![None; height].into_boxed_slice(),
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.next.len()
    }

    pub(crate) fn tower_size(height: usize) -> usize {
        2 * height * std::mem::size_of::<Link>()
    }
}

pub(crate) fn check_max_height(max_height: usize) -> Result<()> {
    if max_height == 0 || max_height > MAX_HEIGHT {
        return Err(Error::InvalidMaxHeight(max_height));
    }
    Ok(())
}

pub(crate) fn check_height(height: usize, max_height: usize) -> Result<()> {
    if height == 0 || height > max_height {
        return Err(Error::InvalidHeight { height, max_height });
    }
    Ok(())
}

/// Geometric height policy: every level above the first is granted with
/// probability `1 / branching`.
#[derive(Debug)]
pub(crate) struct RandomHeight {
    rng: StdRng,
    branching: u32,
}

impl RandomHeight {
    pub(crate) fn new(branching: u32, seed: Option<u64>) -> Self {
        debug_assert!(branching >= 2);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, branching }
    }

    // [1, max_height]
    pub(crate) fn next_height(&mut self, max_height: usize) -> usize {
        let mut h = 1;
        while h < max_height && self.rng.random::<u32>() % self.branching == 0 {
            h += 1;
        }
        h
    }
}
