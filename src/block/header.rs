//! The BlockHeader type - immutable metadata for an addressed block.

use bytes::Bytes;
use std::fmt;

/// Wire codec of a block's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// Undecorated raw content bytes.
    Raw,
    /// DAG-protobuf (merkledag) node bytes.
    DagPb,
}

impl Codec {
    /// The multicodec code for this codec (`raw` = 0x55, `dag-pb` = 0x70).
    pub const fn multicodec(self) -> u8 {
        match self {
            Codec::Raw => 0x55,
            Codec::DagPb => 0x70,
        }
    }
}

/// Immutable metadata for one content-addressed block.
///
/// Headers are produced by a block factory (see
/// [`BlockMaker`](crate::BlockMaker)) and thereafter shared by reference
/// through the caller's in-memory DAG. The encoder itself only ever reads
/// them.
///
/// # Size invariants
///
/// For an interior node, `size_cumulative_payload` is the sum of its
/// children's cumulative payload sizes, and `size_cumulative_dag` is the sum
/// of its children's cumulative dag sizes plus the node's own encoded
/// length. The factory performs the "plus own length" step; the encoder only
/// supplies the children's sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    cid: Bytes,
    codec: Codec,
    size_cumulative_payload: u64,
    size_cumulative_dag: u64,
    size_link_section: u64,
    cid_inlined: bool,
}

impl BlockHeader {
    /// Creates a new header. Intended for block factory implementations.
    pub fn new(
        cid: impl Into<Bytes>,
        codec: Codec,
        size_cumulative_payload: u64,
        size_cumulative_dag: u64,
        size_link_section: u64,
    ) -> Self {
        Self {
            cid: cid.into(),
            codec,
            size_cumulative_payload,
            size_cumulative_dag,
            size_link_section,
            cid_inlined: false,
        }
    }

    /// Marks the header's identifier as inlined (identity-hashed content
    /// embedded in the cid itself).
    pub fn with_inlined_cid(mut self) -> Self {
        self.cid_inlined = true;
        self
    }

    /// The block's content identifier bytes.
    pub fn cid(&self) -> &Bytes {
        &self.cid
    }

    /// The codec the block's bytes are encoded with.
    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Total raw content bytes in this block's subtree.
    pub fn size_cumulative_payload(&self) -> u64 {
        self.size_cumulative_payload
    }

    /// Total encoded bytes of this block's subtree, framing included.
    pub fn size_cumulative_dag(&self) -> u64 {
        self.size_cumulative_dag
    }

    /// Byte size of this block's links section (0 for leaves).
    pub fn size_link_section(&self) -> u64 {
        self.size_link_section
    }

    /// Whether the identifier uses the inlined (embedded-content) form.
    pub fn is_cid_inlined(&self) -> bool {
        self.cid_inlined
    }
}

impl fmt::Display for BlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block(cid=")?;
        for byte in self.cid.iter().take(8) {
            write!(f, "{:02x}", byte)?;
        }
        if self.cid.len() > 8 {
            write!(f, "..")?;
        }
        write!(
            f,
            ", {:?}, payload={}, dag={})",
            self.codec, self.size_cumulative_payload, self.size_cumulative_dag
        )
    }
}
