//! Core encoding engine - UnixFS-v1 leaf and link block assembly.
//!
//! This module implements the four encoding operations over the legacy
//! merkledag protobuf wire format:
//!
//! - [`Encoder::new_leaf`] - encode one run of raw content as a leaf block
//! - [`Encoder::new_link`] - encode an interior node over child blocks
//! - [`Encoder::nul_link`] - emit the canonical empty-file block as a link
//!   target
//! - [`Encoder::link_frame_size`] - exact per-child link frame length, for
//!   buffer pre-sizing
//!
//! The format is reproduced byte-for-byte, quirks included: the redundant
//! explicit filesize field in leaf envelopes, the mandatory zero-length link
//! name, the CIDv0 prefix truncation heuristic, and the selectable
//! links-before-data field order. None of these change what a correct
//! protobuf parser sees, but each changes the bytes and therefore the cid.

use bytes::Bytes;

use crate::block::{BlockHeader, BlockMaker, Codec, LeafSource};
use crate::config::EncoderConfig;
use crate::varint;
use crate::zcp::ZcpBytes;

// Protobuf field tags: (field << 3) | wiretype, wiretype 0 = varint,
// 2 = length-delimited.
const PB_F1_VI: u8 = 1 << 3;
const PB_F3_VI: u8 = 3 << 3;
const PB_F4_VI: u8 = 4 << 3;
const PB_F1_LD: u8 = (1 << 3) | 2;
const PB_F2_LD: u8 = (2 << 3) | 2;

/// The canonical empty-file block: the UnixFS message `{type: 2, filesize: 0}`
/// with no content and no links.
pub const EMPTY_FILE_BLOCK: &[u8] = b"\x0a\x04\x08\x02\x18\x00";

/// Caller-side bookkeeping marker passed through to the link-block callback.
///
/// The encoder never interprets it; the two fields mirror the layer /
/// sub-layer origin tracking of DAG-building pipelines, but any meaning is
/// the caller's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeOrigin {
    /// Identifier of the tree layer that requested the node.
    pub layer: i32,
    /// Layer-local position, meaningful only to the caller.
    pub sub_layer: i32,
}

impl NodeOrigin {
    /// Creates an origin marker.
    pub const fn new(layer: i32, sub_layer: i32) -> Self {
        Self { layer, sub_layer }
    }
}

/// A stateless UnixFS-v1 block encoding engine.
///
/// `Encoder` holds an immutable [`EncoderConfig`], a block factory, and a
/// callback invoked once per produced link block. Every operation takes
/// `&self` and is a pure function of its inputs plus the configuration, so a
/// shared encoder may be driven from multiple threads as long as the factory
/// and callback tolerate concurrent calls.
///
/// The encoder does not choose tree shape: callers decide where content is
/// cut and which children group under which parent, then feed leaves bottom-up
/// so every child header exists before its parent's [`Encoder::new_link`]
/// call.
///
/// # Example
///
/// ```
/// use dagenc::{Blake3Maker, Encoder, EncoderConfig, LeafSource, NodeOrigin};
/// use bytes::Bytes;
///
/// let encoder = Encoder::new(EncoderConfig::default(), Blake3Maker);
///
/// let left = encoder.new_leaf(LeafSource::new(Bytes::from_static(b"hello ")));
/// let right = encoder.new_leaf(LeafSource::new(Bytes::from_static(b"world")));
/// let root = encoder.new_link(NodeOrigin::default(), &[left, right]);
///
/// assert_eq!(root.size_cumulative_payload(), 11);
/// ```
#[derive(Debug)]
pub struct Encoder<M, F = fn(NodeOrigin, &BlockHeader)> {
    config: EncoderConfig,
    maker: M,
    on_link_block: F,
}

impl<M: BlockMaker> Encoder<M> {
    /// Creates an encoder with no link-block callback.
    pub fn new(config: EncoderConfig, maker: M) -> Self {
        Self {
            config,
            maker,
            on_link_block: |_, _| {},
        }
    }
}

impl<M, F> Encoder<M, F>
where
    M: BlockMaker,
    F: Fn(NodeOrigin, &BlockHeader),
{
    /// Creates an encoder whose `on_link_block` callback is invoked exactly
    /// once per link block (including [`Encoder::nul_link`] targets), right
    /// after the block factory returns.
    pub fn with_callback(config: EncoderConfig, maker: M, on_link_block: F) -> Self {
        Self {
            config,
            maker,
            on_link_block,
        }
    }

    /// Returns the configuration this encoder was built with.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encodes one run of raw content as a leaf block.
    ///
    /// With [`LeafDecorator::Raw`](crate::LeafDecorator::Raw) the content
    /// bytes become the block verbatim under the `raw` codec. Otherwise the
    /// content is wrapped in a minimal UnixFS envelope carrying the decorator
    /// type id, the length-prefixed content, and the filesize repeated as an
    /// explicit field (redundant, but mandated by the legacy format).
    ///
    /// A zero-size leaf always yields the canonical empty-file block,
    /// regardless of decorator, for convergence with the reference encoder.
    pub fn new_leaf(&self, leaf: LeafSource) -> BlockHeader {
        let Some(type_id) = self.config.leaf_decorator().type_id() else {
            let size = leaf.size();
            return self.maker.make_block(
                ZcpBytes::from(leaf.into_content()),
                Codec::Raw,
                size,
                0,
                0,
            );
        };

        if leaf.size() == 0 {
            // special-cased by the reference encoder regardless of type id
            return self.nul_block();
        }

        let size = leaf.size();
        let size_vi = varint::to_vec(size);

        let mut data = ZcpBytes::with_segment_capacity(3);
        data.put_u8(PB_F1_LD);
        data.put_slice(&varint::to_vec(3 + 2 * size_vi.len() as u64 + size + 1));
        data.put_u8(PB_F1_VI);
        data.put_u8(type_id);
        data.put_u8(PB_F2_LD);
        data.put_slice(&size_vi);
        data.put_bytes(leaf.into_content());
        data.put_u8(PB_F3_VI);
        data.put_slice(&size_vi);

        self.maker.make_block(data, Codec::DagPb, size, 0, 0)
    }

    /// Encodes an interior node linking `children`, in order.
    ///
    /// Emits one link entry per child (cid, and unless lean links are
    /// configured, the mandatory empty name plus the child's cumulative dag
    /// size), the UnixFS file metadata message with the summed payload size
    /// and per-child payload offsets, and hands the result to the block
    /// factory. The callback then fires once with `origin` and the new
    /// header.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. An interior node with zero children is
    /// never valid; the empty-file case is handled at the leaf level.
    pub fn new_link(&self, origin: NodeOrigin, children: &[BlockHeader]) -> BlockHeader {
        assert!(
            !children.is_empty(),
            "link node requires at least one child"
        );

        let lean = self.config.lean_links();
        let mut total_payload: u64 = 0;
        let mut sub_dag_size: u64 = 0;

        let mut link_section = ZcpBytes::with_segment_capacity(2 * children.len());
        let mut seek_offsets = ZcpBytes::new();

        for child in children {
            let cid = self.link_cid(child);
            let cid_len_vi = varint::to_vec(cid.len() as u64);

            let mut frame_len = 1 + cid_len_vi.len() as u64 + cid.len() as u64;
            if !lean {
                frame_len += 3 + varint::wire_size(child.size_cumulative_dag()) as u64;
            }

            link_section.put_u8(PB_F2_LD);
            link_section.put_slice(&varint::to_vec(frame_len));

            link_section.put_u8(PB_F1_LD);
            link_section.put_slice(&cid_len_vi);
            link_section.put_bytes(cid);

            if !lean {
                // the zero-length name field is required for convergence
                link_section.put_u8(PB_F2_LD);
                link_section.put_u8(0);

                link_section.put_u8(PB_F3_VI);
                link_section.put_slice(&varint::to_vec(child.size_cumulative_dag()));

                seek_offsets.put_u8(PB_F4_VI);
                seek_offsets.put_slice(&varint::to_vec(child.size_cumulative_payload()));
            }

            total_payload += child.size_cumulative_payload();
            sub_dag_size += child.size_cumulative_dag();
        }

        let link_section_size = link_section.len();
        let payload_vi = varint::to_vec(total_payload);

        let mut data_field = ZcpBytes::with_segment_capacity(2);
        data_field.put_u8(PB_F1_LD);
        data_field.put_slice(&varint::to_vec(
            3 + payload_vi.len() as u64 + seek_offsets.len(),
        ));
        data_field.put_u8(PB_F1_VI);
        data_field.put_u8(2);
        data_field.put_u8(PB_F3_VI);
        data_field.put_slice(&payload_vi);
        data_field.put_zcp(seek_offsets);

        // pure byte-ordering switch between two already-built buffers
        let mut node = ZcpBytes::with_segment_capacity(4);
        if self.config.compat_field_order() {
            node.put_zcp(link_section);
            node.put_zcp(data_field);
        } else {
            node.put_zcp(data_field);
            node.put_zcp(link_section);
        }

        let header = self.maker.make_block(
            node,
            Codec::DagPb,
            total_payload,
            sub_dag_size,
            link_section_size,
        );

        (self.on_link_block)(origin, &header);

        header
    }

    /// Emits the canonical empty-file block as an explicit link target.
    ///
    /// Mirrors [`Encoder::new_link`]'s post-creation behavior: the callback
    /// fires once with `origin` and the fresh header.
    pub fn nul_link(&self, origin: NodeOrigin) -> BlockHeader {
        let header = self.nul_block();
        (self.on_link_block)(origin, &header);
        header
    }

    /// Computes the exact number of bytes `header` will occupy as one link
    /// entry inside a parent's links section, under the current lean-links
    /// setting.
    ///
    /// No bytes are built; callers rely on this for exact buffer pre-sizing,
    /// so the value always equals the frame actually emitted by
    /// [`Encoder::new_link`] for the same child and configuration.
    pub fn link_frame_size(&self, header: &BlockHeader) -> u64 {
        let mut size = header.cid().len() as u64;
        size += 1 + varint::wire_size(size) as u64;

        if !self.config.lean_links() {
            size += 3 + varint::wire_size(header.size_cumulative_dag()) as u64;
        }

        1 + varint::wire_size(size) as u64 + size
    }

    /// The child cid as referenced from a link, with the historical CIDv0
    /// truncation applied when configured.
    fn link_cid(&self, child: &BlockHeader) -> Bytes {
        if self.config.legacy_cidv0_links()
            && !child.is_cid_inlined()
            // size inequality quickly distinguishes raw leaf blocks, which
            // keep their full identifier
            && child.size_cumulative_payload() != child.size_cumulative_dag()
        {
            child.cid().slice(2..)
        } else {
            child.cid().clone()
        }
    }

    // Never cached: every call must register as a fresh event with the
    // factory so per-call statistics stay truthful.
    fn nul_block(&self) -> BlockHeader {
        self.maker.make_block(
            ZcpBytes::from(Bytes::from_static(EMPTY_FILE_BLOCK)),
            Codec::DagPb,
            0,
            0,
            0,
        )
    }
}
