//! Ready-made block factory implementations.
//!
//! The encoder only needs something implementing
//! [`BlockMaker`](crate::BlockMaker); real pipelines bring their own factory
//! (persistence, dedup, inlining policy). This module provides a minimal
//! blake3-based one for callers without those needs.
//!
//! - [`Blake3Maker`] - CIDv1 blake3 factory (requires `hash-blake3` feature)

#[cfg(feature = "hash-blake3")]
mod blake3;

#[cfg(feature = "hash-blake3")]
pub use blake3::Blake3Maker;
