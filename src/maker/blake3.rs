//! BLAKE3-based block factory implementation.

use crate::block::{BlockHeader, BlockMaker, Codec};
use crate::zcp::ZcpBytes;

/// Multihash code for blake3.
const MULTIHASH_BLAKE3: u8 = 0x1e;

/// Digest length in bytes.
const DIGEST_LEN: u8 = 32;

/// A block factory addressing blocks with CIDv1 + blake3 multihash.
///
/// The cid layout is `[0x01, multicodec, 0x1e, 32, digest...]`: version,
/// codec, multihash code, digest length, 32 digest bytes (38 bytes total).
/// Cumulative dag size is finalized here by adding the block's own encoded
/// length to the children's sum, as the factory contract requires.
///
/// Stateless; safe to share across threads.
///
/// # Example
///
/// ```
/// use dagenc::{Blake3Maker, Encoder, EncoderConfig, LeafSource};
///
/// let encoder = Encoder::new(EncoderConfig::default(), Blake3Maker);
/// let leaf = encoder.new_leaf(LeafSource::new(vec![0u8; 16]));
/// assert_eq!(leaf.cid().len(), 38);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Maker;

impl BlockMaker for Blake3Maker {
    fn make_block(
        &self,
        data: ZcpBytes,
        codec: Codec,
        size_cumulative_payload: u64,
        children_dag_size: u64,
        size_link_section: u64,
    ) -> BlockHeader {
        let mut hasher = blake3::Hasher::new();
        for run in data.runs() {
            hasher.update(run);
        }
        let digest = hasher.finalize();

        let mut cid = Vec::with_capacity(4 + DIGEST_LEN as usize);
        cid.push(0x01);
        cid.push(codec.multicodec());
        cid.push(MULTIHASH_BLAKE3);
        cid.push(DIGEST_LEN);
        cid.extend_from_slice(digest.as_bytes());

        BlockHeader::new(
            cid,
            codec,
            size_cumulative_payload,
            children_dag_size + data.len(),
            size_link_section,
        )
    }
}
