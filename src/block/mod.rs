//! Block types.
//!
//! - [`BlockHeader`] - Immutable addressed block metadata
//! - [`LeafSource`] - Raw content handed to the encoder as a leaf
//! - [`Codec`] - Wire codec of a block's bytes
//! - [`BlockMaker`] - The external block factory seam

mod header;
mod maker;
mod source;

pub use header::{BlockHeader, Codec};
pub use maker::BlockMaker;
pub use source::LeafSource;
