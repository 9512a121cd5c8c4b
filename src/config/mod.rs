//! Configuration for encoding behavior.
//!
//! This module provides types to select between the mutually incompatible
//! serialization variants of the UnixFS-v1 wire format:
//!
//! - [`EncoderConfig`] - Immutable per-run flags controlling byte layout
//! - [`LeafDecorator`] - How leaf blocks are framed
//!
//! All flags default to the canonical modern layout: raw leaves, data field
//! before links, full CIDv1 link identifiers, full per-link size metadata.
//!
//! # Example
//!
//! ```
//! use dagenc::{EncoderConfig, LeafDecorator};
//!
//! // Converge byte-for-byte with the legacy go-ipfs encoder
//! let config = EncoderConfig::default()
//!     .with_compat_field_order(true)
//!     .with_legacy_cidv0_links(true)
//!     .with_leaf_decorator(LeafDecorator::UnixFsFile);
//! ```

use crate::error::EncodeError;

/// How a leaf block's content is framed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeafDecorator {
    /// Leaves are undecorated raw byte blocks (codec `raw`). The default.
    #[default]
    Raw,
    /// Leaves are wrapped in a minimal UnixFS envelope with type id 0.
    UnixFsRaw,
    /// Leaves are wrapped in a minimal UnixFS envelope with type id 2.
    UnixFsFile,
}

impl LeafDecorator {
    /// The UnixFS type id this decorator writes, or `None` for raw leaves.
    pub const fn type_id(self) -> Option<u8> {
        match self {
            LeafDecorator::Raw => None,
            LeafDecorator::UnixFsRaw => Some(0),
            LeafDecorator::UnixFsFile => Some(2),
        }
    }

    /// Builds a decorator from a raw UnixFS type id.
    ///
    /// Only ids 0 and 2 describe decorated leaves; anything else is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidConfig`] for unsupported type ids.
    pub fn from_type_id(id: u8) -> Result<Self, EncodeError> {
        match id {
            0 => Ok(LeafDecorator::UnixFsRaw),
            2 => Ok(LeafDecorator::UnixFsFile),
            _ => Err(EncodeError::InvalidConfig {
                message: "unixfs leaf decorator type must be 0 or 2",
            }),
        }
    }
}

/// Immutable configuration for one encoding run.
///
/// Every flag selects between byte layouts that are all parseable UnixFS,
/// but only specific combinations reproduce the output of specific
/// historical encoders. The configuration never changes mid-run: mixing
/// layouts inside one DAG produces blocks that hash differently from every
/// reference implementation at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EncoderConfig {
    /// Emit the links section before the data field in interior nodes.
    compat_field_order: bool,

    /// Drop the 2-byte version+multicodec prefix from eligible link cids.
    legacy_cidv0_links: bool,

    /// Omit dag-size and payload-offset metadata from links.
    lean_links: bool,

    /// How leaf blocks are framed.
    leaf_decorator: LeafDecorator,
}

impl EncoderConfig {
    /// Creates the canonical default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the non-canonical links-before-data field order used by one
    /// historical encoder.
    ///
    /// Field order is not semantically significant to a correct protobuf
    /// parser, but it changes the block bytes and therefore the cid.
    pub fn with_compat_field_order(mut self, enabled: bool) -> Self {
        self.compat_field_order = enabled;
        self
    }

    /// Sets CIDv0-style link identifiers: eligible child cids have their
    /// leading 2 bytes (version + multicodec) dropped when referenced.
    pub fn with_legacy_cidv0_links(mut self, enabled: bool) -> Self {
        self.legacy_cidv0_links = enabled;
        self
    }

    /// Sets lean links: per-child dag-size and payload-offset metadata is
    /// omitted.
    ///
    /// The result is smaller but non-standard; consumers lose the ability
    /// to seek by byte offset without fetching the leaves.
    pub fn with_lean_links(mut self, enabled: bool) -> Self {
        self.lean_links = enabled;
        self
    }

    /// Sets the leaf framing.
    pub fn with_leaf_decorator(mut self, decorator: LeafDecorator) -> Self {
        self.leaf_decorator = decorator;
        self
    }

    /// Returns whether links are emitted before the data field.
    pub fn compat_field_order(&self) -> bool {
        self.compat_field_order
    }

    /// Returns whether link cids are truncated CIDv0-style.
    pub fn legacy_cidv0_links(&self) -> bool {
        self.legacy_cidv0_links
    }

    /// Returns whether per-link size metadata is omitted.
    pub fn lean_links(&self) -> bool {
        self.lean_links
    }

    /// Returns the leaf framing.
    pub fn leaf_decorator(&self) -> LeafDecorator {
        self.leaf_decorator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_canonical() {
        let config = EncoderConfig::default();
        assert!(!config.compat_field_order());
        assert!(!config.legacy_cidv0_links());
        assert!(!config.lean_links());
        assert_eq!(config.leaf_decorator(), LeafDecorator::Raw);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EncoderConfig::new()
            .with_compat_field_order(true)
            .with_lean_links(true)
            .with_leaf_decorator(LeafDecorator::UnixFsFile);

        assert!(config.compat_field_order());
        assert!(!config.legacy_cidv0_links());
        assert!(config.lean_links());
        assert_eq!(config.leaf_decorator().type_id(), Some(2));
    }

    #[test]
    fn test_decorator_type_ids() {
        assert_eq!(LeafDecorator::Raw.type_id(), None);
        assert_eq!(LeafDecorator::UnixFsRaw.type_id(), Some(0));
        assert_eq!(LeafDecorator::UnixFsFile.type_id(), Some(2));
    }

    #[test]
    fn test_from_type_id() {
        assert_eq!(
            LeafDecorator::from_type_id(0).unwrap(),
            LeafDecorator::UnixFsRaw
        );
        assert_eq!(
            LeafDecorator::from_type_id(2).unwrap(),
            LeafDecorator::UnixFsFile
        );
        assert!(LeafDecorator::from_type_id(1).is_err());
        assert!(LeafDecorator::from_type_id(5).is_err());
    }
}
