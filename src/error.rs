use crate::node::MAX_HEIGHT;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid max height: {0} (expected 1..={max})", max = MAX_HEIGHT)]
    InvalidMaxHeight(usize),

    #[error("Invalid node height: {height} (expected 1..={max_height})")]
    InvalidHeight { height: usize, max_height: usize },

    #[error("Invalid branching factor: {0} (expected >= 2)")]
    InvalidBranching(u32),

    #[error("Comparator not set")]
    MissingComparator,

    #[error("Corruption: {0}")]
    Corruption(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
