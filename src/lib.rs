//! dagenc
//!
//! UnixFS-v1 DAG block encoding for Rust.
//!
//! `dagenc` turns a tree of content chunks into a sequence of
//! content-addressed blocks forming a DAG, in the legacy merkledag protobuf
//! wire format. It reproduces the historically-accumulated serialization
//! quirks of the reference implementations byte-for-byte, so that a DAG
//! built here converges on the exact cids an existing deployment already
//! produces, and additionally offers a leaner non-standard link layout for
//! space efficiency.
//!
//! The crate intentionally:
//! - does NOT chunk content or choose tree shape
//! - does NOT compute content identifiers (that lives behind [`BlockMaker`])
//! - does NOT persist, transmit, or deduplicate blocks
//! - does NOT decode or validate foreign blocks
//!
//! It only does one thing: **given shape in → exact block bytes out**
//!
//! # Encoding a small file DAG
//!
//! ```
//! use dagenc::{Blake3Maker, Encoder, EncoderConfig, LeafSource, NodeOrigin};
//! use bytes::Bytes;
//!
//! let encoder = Encoder::new(EncoderConfig::default(), Blake3Maker);
//!
//! // leaves first, then the interior node over them
//! let a = encoder.new_leaf(LeafSource::new(Bytes::from_static(b"hello ")));
//! let b = encoder.new_leaf(LeafSource::new(Bytes::from_static(b"world")));
//! let root = encoder.new_link(NodeOrigin::default(), &[a, b]);
//!
//! assert_eq!(root.size_cumulative_payload(), 11);
//! ```
//!
//! # Compatibility modes
//!
//! ```
//! use dagenc::{EncoderConfig, LeafDecorator};
//!
//! // byte-for-byte convergence with the legacy go-ipfs encoder
//! let config = EncoderConfig::default()
//!     .with_compat_field_order(true)
//!     .with_legacy_cidv0_links(true)
//!     .with_leaf_decorator(LeafDecorator::UnixFsFile);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod block;
mod config;
mod encoder;
mod error;

mod maker; // ready-made block factories (feature-gated)
mod zcp; // zero-copy segmented builder

pub mod varint;

//
// Public surface (intentionally tiny)
//

pub use block::{BlockHeader, BlockMaker, Codec, LeafSource};
pub use config::{EncoderConfig, LeafDecorator};
pub use encoder::{EMPTY_FILE_BLOCK, Encoder, NodeOrigin};
pub use error::EncodeError;
pub use zcp::ZcpBytes;

#[cfg(feature = "hash-blake3")]
pub use maker::Blake3Maker;
