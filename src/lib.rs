mod arena;
mod node;

#[cfg(test)]
mod test_utils;

pub mod comparator;
pub mod error;
pub mod iterator;
pub mod options;
pub mod shared;
pub mod skip_list;

pub use node::MAX_HEIGHT;

pub mod prelude {
    pub use crate::{
        comparator::prelude::*,
        error::{Error, Result},
        iterator::{Iter, SkipListIter},
        options::SkipListOptions,
        shared::SharedSkipListMap,
        skip_list::SkipListMap,
    };
}
