//! Basic DAG encoding example: chunked content in, addressed blocks out.
//!
//! Run with:
//!     cargo run --example encode_tree

use bytes::Bytes;
use dagenc::{
    Blake3Maker, BlockHeader, Encoder, EncoderConfig, LeafDecorator, LeafSource, NodeOrigin,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create some sample data, pre-cut into fixed-size leaves (a real
    // pipeline would use a content-defined chunker here)
    let data = vec![0x42u8; 1024 * 1024]; // 1 MB
    let leaf_size = 256 * 1024;

    let config = EncoderConfig::default().with_leaf_decorator(LeafDecorator::UnixFsFile);
    let encoder = Encoder::with_callback(config, Blake3Maker, |origin, header| {
        println!("link block from layer {}: {}", origin.layer, header);
    });

    println!("Encoding {} bytes in {}-byte leaves...\n", data.len(), leaf_size);

    // Leaves bottom-up
    let mut leaves: Vec<BlockHeader> = Vec::new();
    for piece in data.chunks(leaf_size) {
        let leaf = encoder.new_leaf(LeafSource::new(Bytes::from(piece.to_vec())));
        println!(
            "leaf: {} ({} payload bytes, frame {} bytes in parent)",
            leaf,
            leaf.size_cumulative_payload(),
            encoder.link_frame_size(&leaf)
        );
        leaves.push(leaf);
    }

    // One interior node over all leaves
    let root = encoder.new_link(NodeOrigin::new(1, 0), &leaves);

    println!("\nroot: {}", root);
    println!("total payload:  {} bytes", root.size_cumulative_payload());
    println!("total dag size: {} bytes", root.size_cumulative_dag());
    println!(
        "metadata overhead: {} bytes",
        root.size_cumulative_dag() - root.size_cumulative_payload()
    );

    Ok(())
}
