//! The block factory seam.

use super::{BlockHeader, Codec};
use crate::zcp::ZcpBytes;

/// A factory turning finished block bytes into an addressed [`BlockHeader`].
///
/// The encoder hands every block it assembles to a `BlockMaker`; computing
/// content identifiers, persisting bytes, and deduplication all live behind
/// this seam. Implementations must:
///
/// - compute the block's content identifier from `data`
/// - add the block's own encoded length (`data.len()`) to
///   `children_dag_size` to produce the header's final cumulative dag size
/// - carry `size_cumulative_payload` and `size_link_section` through to the
///   header unchanged
///
/// Implementations are invoked through `&self`; if the encoder is shared
/// across threads, the maker must be safe for concurrent calls (or the
/// caller must serialize encoding).
pub trait BlockMaker {
    /// Produces the header for a block whose bytes are `data`.
    fn make_block(
        &self,
        data: ZcpBytes,
        codec: Codec,
        size_cumulative_payload: u64,
        children_dag_size: u64,
        size_link_section: u64,
    ) -> BlockHeader;
}

impl<T: BlockMaker + ?Sized> BlockMaker for &T {
    fn make_block(
        &self,
        data: ZcpBytes,
        codec: Codec,
        size_cumulative_payload: u64,
        children_dag_size: u64,
        size_link_section: u64,
    ) -> BlockHeader {
        (**self).make_block(
            data,
            codec,
            size_cumulative_payload,
            children_dag_size,
            size_link_section,
        )
    }
}
