// Integration tests for the UnixFS-v1 block encoder
// Tests cover: wire-format exactness, size bookkeeping, compatibility modes

use bytes::Bytes;
use dagenc::{
    Blake3Maker, BlockHeader, BlockMaker, Codec, EMPTY_FILE_BLOCK, Encoder, EncoderConfig,
    LeafDecorator, LeafSource, NodeOrigin, ZcpBytes, varint,
};
use std::sync::Mutex;

// ============================================================================
// Test helpers: a byte-recording factory and a minimal protobuf walker
// ============================================================================

/// Wraps Blake3Maker and keeps every produced block's bytes for inspection.
struct CapturingMaker {
    blocks: Mutex<Vec<Vec<u8>>>,
}

impl CapturingMaker {
    fn new() -> Self {
        Self {
            blocks: Mutex::new(Vec::new()),
        }
    }

    fn last_block(&self) -> Vec<u8> {
        self.blocks.lock().unwrap().last().unwrap().clone()
    }
}

impl BlockMaker for CapturingMaker {
    fn make_block(
        &self,
        data: ZcpBytes,
        codec: Codec,
        size_cumulative_payload: u64,
        children_dag_size: u64,
        size_link_section: u64,
    ) -> BlockHeader {
        self.blocks.lock().unwrap().push(data.to_vec());
        Blake3Maker.make_block(
            data,
            codec,
            size_cumulative_payload,
            children_dag_size,
            size_link_section,
        )
    }
}

/// One decoded protobuf field: (field number, wiretype-specific payload).
#[derive(Debug, PartialEq)]
enum PbField {
    Varint(u32, u64),
    Bytes(u32, Vec<u8>),
}

/// Walks a protobuf message, preserving field order and repetition.
fn walk_pb(buf: &[u8]) -> Vec<PbField> {
    let mut fields = Vec::new();
    let mut pos = 0;
    while pos < buf.len() {
        let (tag, used) = varint::decode(&buf[pos..]).expect("valid tag");
        pos += used;
        let field = (tag >> 3) as u32;
        match tag & 7 {
            0 => {
                let (value, used) = varint::decode(&buf[pos..]).expect("valid varint");
                pos += used;
                fields.push(PbField::Varint(field, value));
            }
            2 => {
                let (len, used) = varint::decode(&buf[pos..]).expect("valid length");
                pos += used;
                fields.push(PbField::Bytes(field, buf[pos..pos + len as usize].to_vec()));
                pos += len as usize;
            }
            other => panic!("unexpected wiretype {} at offset {}", other, pos),
        }
    }
    fields
}

// ============================================================================
// Leaf Encoding
// ============================================================================

#[test]
fn test_raw_leaf_bytes_are_content() {
    let maker = CapturingMaker::new();
    let encoder = Encoder::new(EncoderConfig::default(), &maker);

    let content = Bytes::from_static(b"no framing whatsoever");
    let hdr = encoder.new_leaf(LeafSource::new(content.clone()));

    assert_eq!(maker.last_block(), content, "raw leaves add no framing");
    assert_eq!(hdr.codec(), Codec::Raw);
    assert_eq!(hdr.size_cumulative_payload(), content.len() as u64);
    assert_eq!(
        hdr.size_cumulative_dag(),
        content.len() as u64,
        "a raw leaf's dag size is its content size"
    );
}

#[test]
fn test_decorated_leaf_known_bytes() {
    let maker = CapturingMaker::new();
    let config = EncoderConfig::default().with_leaf_decorator(LeafDecorator::UnixFsFile);
    let encoder = Encoder::new(config, &maker);

    encoder.new_leaf(LeafSource::new(Bytes::from_static(b"hi")));

    assert_eq!(
        maker.last_block(),
        b"\x0a\x08\x08\x02\x12\x02\x68\x69\x18\x02",
        "the 'hi' leaf must match the reference encoding exactly"
    );
}

#[test]
fn test_decorated_leaf_parses_as_unixfs_file() {
    let maker = CapturingMaker::new();
    let config = EncoderConfig::default().with_leaf_decorator(LeafDecorator::UnixFsFile);
    let encoder = Encoder::new(config, &maker);

    let content = vec![0x5au8; 300];
    encoder.new_leaf(LeafSource::new(content.clone()));

    let block = maker.last_block();
    let outer = walk_pb(&block);
    assert_eq!(outer.len(), 1, "one outer data field");
    let PbField::Bytes(1, envelope) = &outer[0] else {
        panic!("outer field must be length-delimited field 1");
    };

    assert_eq!(
        walk_pb(envelope),
        vec![
            PbField::Varint(1, 2),
            PbField::Bytes(2, content),
            PbField::Varint(3, 300),
        ],
        "envelope is {{type, content, filesize}} with the size repeated"
    );
}

#[test]
fn test_empty_leaf_is_the_six_byte_block() {
    for decorator in [LeafDecorator::UnixFsRaw, LeafDecorator::UnixFsFile] {
        let maker = CapturingMaker::new();
        let config = EncoderConfig::default().with_leaf_decorator(decorator);
        let encoder = Encoder::new(config, &maker);

        let hdr = encoder.new_leaf(LeafSource::empty());

        assert_eq!(
            maker.last_block(),
            EMPTY_FILE_BLOCK,
            "empty file converges on 0a 04 08 02 18 00 regardless of type id"
        );
        assert_eq!(hdr.size_cumulative_payload(), 0);
        assert_eq!(hdr.size_cumulative_dag(), 6);
    }
}

// ============================================================================
// Link Encoding
// ============================================================================

#[test]
fn test_link_node_structure_full_mode() {
    let maker = CapturingMaker::new();
    let encoder = Encoder::new(EncoderConfig::default(), &maker);

    let a = encoder.new_leaf(LeafSource::new(vec![1u8; 100]));
    let b = encoder.new_leaf(LeafSource::new(vec![2u8; 50]));
    let root = encoder.new_link(NodeOrigin::default(), &[a.clone(), b.clone()]);

    let fields = walk_pb(&maker.last_block());
    assert_eq!(fields.len(), 3, "one data field, two link entries");

    // canonical order: data first
    let PbField::Bytes(1, data) = &fields[0] else {
        panic!("first field must be the data message");
    };
    assert_eq!(
        walk_pb(data),
        vec![
            PbField::Varint(1, 2),
            PbField::Varint(3, 150),
            PbField::Varint(4, 100),
            PbField::Varint(4, 50),
        ],
        "data message carries type=file, total size, per-child blocksizes"
    );

    for (field, child) in fields[1..].iter().zip([&a, &b]) {
        let PbField::Bytes(2, link) = field else {
            panic!("link entries are repeated field 2");
        };
        assert_eq!(
            walk_pb(link),
            vec![
                PbField::Bytes(1, child.cid().to_vec()),
                PbField::Bytes(2, vec![]),
                PbField::Varint(3, child.size_cumulative_dag()),
            ],
            "each link carries hash, mandatory empty name, and tsize"
        );
    }

    assert_eq!(root.size_cumulative_payload(), 150);
}

#[test]
fn test_link_node_structure_lean_mode() {
    let maker = CapturingMaker::new();
    let config = EncoderConfig::default().with_lean_links(true);
    let encoder = Encoder::new(config, &maker);

    let a = encoder.new_leaf(LeafSource::new(vec![1u8; 100]));
    let b = encoder.new_leaf(LeafSource::new(vec![2u8; 50]));
    encoder.new_link(NodeOrigin::default(), &[a.clone(), b]);

    let fields = walk_pb(&maker.last_block());

    let PbField::Bytes(1, data) = &fields[0] else {
        panic!("first field must be the data message");
    };
    assert_eq!(
        walk_pb(data),
        vec![PbField::Varint(1, 2), PbField::Varint(3, 150)],
        "lean data message has no blocksizes"
    );

    let PbField::Bytes(2, link) = &fields[1] else {
        panic!("link entries are repeated field 2");
    };
    assert_eq!(
        walk_pb(link),
        vec![PbField::Bytes(1, a.cid().to_vec())],
        "lean links carry only the hash"
    );
}

#[test]
fn test_children_dag_sum_excludes_parent_bytes() {
    // a factory that exposes the children-sum argument it was handed
    struct SumCheckingMaker {
        expected_children_sum: Mutex<Option<u64>>,
    }

    impl BlockMaker for SumCheckingMaker {
        fn make_block(
            &self,
            data: ZcpBytes,
            codec: Codec,
            size_cumulative_payload: u64,
            children_dag_size: u64,
            size_link_section: u64,
        ) -> BlockHeader {
            if codec == Codec::DagPb {
                *self.expected_children_sum.lock().unwrap() = Some(children_dag_size);
            }
            Blake3Maker.make_block(
                data,
                codec,
                size_cumulative_payload,
                children_dag_size,
                size_link_section,
            )
        }
    }

    let maker = SumCheckingMaker {
        expected_children_sum: Mutex::new(None),
    };
    let encoder = Encoder::new(EncoderConfig::default(), &maker);

    let a = encoder.new_leaf(LeafSource::new(vec![1u8; 64]));
    let b = encoder.new_leaf(LeafSource::new(vec![2u8; 32]));
    let sum = a.size_cumulative_dag() + b.size_cumulative_dag();

    encoder.new_link(NodeOrigin::default(), &[a, b]);

    assert_eq!(
        *maker.expected_children_sum.lock().unwrap(),
        Some(sum),
        "the factory receives exactly the children's dag-size sum"
    );
}

#[test]
fn test_nested_dag_size_accumulates() {
    let encoder = Encoder::new(EncoderConfig::default(), Blake3Maker);

    let leaves: Vec<BlockHeader> = (0..4)
        .map(|i| encoder.new_leaf(LeafSource::new(vec![i as u8; 256])))
        .collect();

    let left = encoder.new_link(NodeOrigin::default(), &leaves[..2]);
    let right = encoder.new_link(NodeOrigin::default(), &leaves[2..]);
    let root = encoder.new_link(NodeOrigin::default(), &[left.clone(), right.clone()]);

    assert_eq!(root.size_cumulative_payload(), 1024);
    assert!(
        root.size_cumulative_dag()
            > left.size_cumulative_dag() + right.size_cumulative_dag(),
        "root dag size includes its own encoded bytes"
    );
}

// ============================================================================
// Compatibility Modes
// ============================================================================

#[test]
fn test_compat_field_order_emits_links_first() {
    let maker = CapturingMaker::new();
    let config = EncoderConfig::default().with_compat_field_order(true);
    let encoder = Encoder::new(config, &maker);

    let leaf = encoder.new_leaf(LeafSource::new(vec![9u8; 10]));
    encoder.new_link(NodeOrigin::default(), &[leaf]);

    let fields = walk_pb(&maker.last_block());
    assert!(
        matches!(fields[0], PbField::Bytes(2, _)),
        "compat order leads with the links section"
    );
    assert!(
        matches!(fields.last(), Some(PbField::Bytes(1, _))),
        "data field comes last"
    );
}

#[test]
fn test_cidv0_links_truncate_interior_children_only() {
    let maker = CapturingMaker::new();
    let config = EncoderConfig::default()
        .with_legacy_cidv0_links(true)
        .with_leaf_decorator(LeafDecorator::UnixFsFile);
    let encoder = Encoder::new(config, &maker);

    // decorated leaf: dag-pb framing makes payload != dag size
    let decorated = encoder.new_leaf(LeafSource::new(vec![3u8; 20]));
    let mid = encoder.new_link(NodeOrigin::default(), &[decorated.clone()]);
    encoder.new_link(NodeOrigin::default(), &[mid.clone()]);

    let fields = walk_pb(&maker.last_block());
    let PbField::Bytes(2, link) = &fields[1] else {
        panic!("expected link entry");
    };
    let PbField::Bytes(1, hash) = &walk_pb(link)[0] else {
        panic!("expected hash sub-field");
    };
    assert_eq!(
        hash.as_slice(),
        &mid.cid()[2..],
        "interior child loses its 2-byte cid prefix"
    );
}

#[test]
fn test_cidv0_links_keep_raw_leaf_cids_whole() {
    let maker = CapturingMaker::new();
    let config = EncoderConfig::default().with_legacy_cidv0_links(true);
    let encoder = Encoder::new(config, &maker);

    // raw leaf: payload == dag size, the truncation heuristic skips it
    let raw = encoder.new_leaf(LeafSource::new(vec![4u8; 20]));
    encoder.new_link(NodeOrigin::default(), &[raw.clone()]);

    let fields = walk_pb(&maker.last_block());
    let PbField::Bytes(2, link) = &fields[1] else {
        panic!("expected link entry");
    };
    let PbField::Bytes(1, hash) = &walk_pb(link)[0] else {
        panic!("expected hash sub-field");
    };
    assert_eq!(
        hash.as_slice(),
        raw.cid().as_ref(),
        "raw leaf keeps its full identifier"
    );
}

// ============================================================================
// Link-Frame Size Estimator
// ============================================================================

#[test]
fn test_estimate_equals_emitted_frame_for_both_lean_settings() {
    for lean in [false, true] {
        let maker = CapturingMaker::new();
        let config = EncoderConfig::default().with_lean_links(lean);
        let encoder = Encoder::new(config, &maker);

        // spread dag sizes across varint width boundaries
        let children: Vec<BlockHeader> = [1usize, 120, 5000, 200_000]
            .iter()
            .map(|&n| encoder.new_leaf(LeafSource::new(vec![0xabu8; n])))
            .collect();

        let estimates: Vec<u64> = children.iter().map(|c| encoder.link_frame_size(c)).collect();
        let root = encoder.new_link(NodeOrigin::default(), &children);

        assert_eq!(
            root.size_link_section(),
            estimates.iter().sum::<u64>(),
            "lean = {}: estimates must sum to the exact links-section size",
            lean
        );

        // per-frame check against the actual bytes
        let fields = walk_pb(&maker.last_block());
        let frames: Vec<u64> = fields
            .iter()
            .filter_map(|f| match f {
                PbField::Bytes(2, frame) => {
                    Some(1 + varint::wire_size(frame.len() as u64) as u64 + frame.len() as u64)
                }
                _ => None,
            })
            .collect();
        assert_eq!(frames, estimates, "lean = {}", lean);
    }
}

// ============================================================================
// Callback & Empty-Link Semantics
// ============================================================================

#[test]
fn test_callback_receives_origin_and_header() {
    let events: Mutex<Vec<(NodeOrigin, u64)>> = Mutex::new(Vec::new());
    let encoder = Encoder::with_callback(
        EncoderConfig::default(),
        Blake3Maker,
        |origin, header: &BlockHeader| {
            events
                .lock()
                .unwrap()
                .push((origin, header.size_cumulative_payload()));
        },
    );

    let leaf = encoder.new_leaf(LeafSource::new(vec![1u8; 33]));
    encoder.new_link(NodeOrigin::new(1, 4), &[leaf]);
    encoder.nul_link(NodeOrigin::new(0, 0));

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![(NodeOrigin::new(1, 4), 33), (NodeOrigin::new(0, 0), 0)]
    );
}

#[test]
fn test_nul_link_header_matches_empty_leaf() {
    let encoder = Encoder::new(EncoderConfig::default(), Blake3Maker);
    let config = EncoderConfig::default().with_leaf_decorator(LeafDecorator::UnixFsFile);
    let leaf_encoder = Encoder::new(config, Blake3Maker);

    let via_link = encoder.nul_link(NodeOrigin::default());
    let via_leaf = leaf_encoder.new_leaf(LeafSource::empty());

    assert_eq!(via_link.cid(), via_leaf.cid(), "both paths yield one block");
    assert_eq!(via_link.size_cumulative_dag(), 6);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_identical_inputs_produce_identical_cids() {
    let build = || {
        let encoder = Encoder::new(
            EncoderConfig::default()
                .with_compat_field_order(true)
                .with_leaf_decorator(LeafDecorator::UnixFsFile),
            Blake3Maker,
        );
        let a = encoder.new_leaf(LeafSource::new(vec![1u8; 777]));
        let b = encoder.new_leaf(LeafSource::new(vec![2u8; 333]));
        encoder.new_link(NodeOrigin::default(), &[a, b])
    };

    assert_eq!(build().cid(), build().cid());
}
