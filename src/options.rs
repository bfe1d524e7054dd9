use crate::{
    comparator::Comparator,
    error::{Error, Result},
    node::check_max_height,
    skip_list::SkipListMap,
};

#[derive(Debug, Clone)]
pub struct SkipListOptions {
    max_height: usize,

    branching: u32,

    seed: Option<u64>,
}

impl Default for SkipListOptions {
    fn default() -> Self {
        Self {
            max_height: 12,
            branching: 4,
            seed: None,
        }
    }
}

impl SkipListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of levels any node may occupy.
    pub fn max_height(&mut self, height: usize) -> &mut Self {
        self.max_height = height;
        self
    }

    /// A node is promoted to the next level with probability `1 / branching`.
    pub fn branching(&mut self, branching: u32) -> &mut Self {
        self.branching = branching;
        self
    }

    /// Seeds the height generator, giving reproducible layouts.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_max_height(self.max_height)?;
        if self.branching < 2 {
            return Err(Error::InvalidBranching(self.branching));
        }
        Ok(())
    }

    pub(crate) fn get_max_height(&self) -> usize {
        self.max_height
    }

    pub(crate) fn get_branching(&self) -> u32 {
        self.branching
    }

    pub(crate) fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Builds a map without a comparator; one must be installed with
    /// [`SkipListMap::set_comparator`] before the map is used.
    pub fn build<K, V, C>(&self) -> Result<SkipListMap<K, V, C>>
    where
        C: Comparator<Item = K>,
    {
        SkipListMap::with_options(self, None)
    }

    pub fn build_with_comparator<K, V, C>(&self, c: C) -> Result<SkipListMap<K, V, C>>
    where
        C: Comparator<Item = K>,
    {
        SkipListMap::with_options(self, Some(c))
    }
}

#[cfg(test)]
mod tests {
    use crate::{comparator::prelude::*, error::Error};

    use super::SkipListOptions;

    #[test]
    fn rejects_bad_options() {
        let res = SkipListOptions::new()
            .max_height(0)
            .build::<u32, u32, DefaultComparator<u32>>();
        assert!(matches!(res, Err(Error::InvalidMaxHeight(0))));

        let res = SkipListOptions::new()
            .max_height(64)
            .build::<u32, u32, DefaultComparator<u32>>();
        assert!(matches!(res, Err(Error::InvalidMaxHeight(64))));

        let res = SkipListOptions::new()
            .branching(1)
            .build::<u32, u32, DefaultComparator<u32>>();
        assert!(matches!(res, Err(Error::InvalidBranching(1))));
    }

    #[test]
    fn build_with_comparator() -> anyhow::Result<()> {
        let mut map = SkipListOptions::new()
            .max_height(4)
            .branching(2)
            .seed(1)
            .build_with_comparator(DefaultComparator::new())?;
        assert_eq!(map.max_height(), 4);

        map.insert(1u32, "a")?;
        assert_eq!(map.get(&1)?, Some(&"a"));
        Ok(())
    }
}
