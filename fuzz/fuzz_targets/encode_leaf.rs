#![no_main]

use dagenc::{
    Blake3Maker, Encoder, EncoderConfig, LeafDecorator, LeafSource, NodeOrigin, varint,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    let size = data.len() as u64;

    // Raw leaves: content passes through, sizes stay flat.
    let raw = Encoder::new(EncoderConfig::default(), Blake3Maker);
    let hdr = raw.new_leaf(LeafSource::new(data.clone()));
    assert_eq!(hdr.size_cumulative_payload(), size);
    assert_eq!(hdr.size_cumulative_dag(), size);
    assert_eq!(hdr.size_link_section(), 0);

    for decorator in [LeafDecorator::UnixFsRaw, LeafDecorator::UnixFsFile] {
        let config = EncoderConfig::default().with_leaf_decorator(decorator);
        let encoder = Encoder::new(config, Blake3Maker);

        let hdr = encoder.new_leaf(LeafSource::new(data.clone()));
        assert_eq!(hdr.size_cumulative_payload(), size);

        if size == 0 {
            // canonical empty block, 6 bytes
            assert_eq!(hdr.size_cumulative_dag(), 6);
        } else {
            // envelope overhead: outer tag + outer length varint around
            // 3 + 2*varint(size) + size + 1 payload bytes
            let inner = 3 + 2 * varint::wire_size(size) as u64 + size + 1;
            let expected = 1 + varint::wire_size(inner) as u64 + inner;
            assert_eq!(hdr.size_cumulative_dag(), expected);
        }

        // a parent over the leaf must agree with the frame estimator
        let estimated = encoder.link_frame_size(&hdr);
        let parent = encoder.new_link(NodeOrigin::default(), &[hdr]);
        assert_eq!(parent.size_link_section(), estimated);
    }
});
