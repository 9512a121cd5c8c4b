//! The LeafSource type - raw content handed to the encoder as one leaf.

use bytes::Bytes;

/// A run of raw content to be encoded as a single leaf block.
///
/// The declared `size` is authoritative for all size bookkeeping; the
/// content length must match it. A mismatch is a caller bug, not something
/// the encoder defends against.
///
/// # Example
///
/// ```
/// use dagenc::LeafSource;
/// use bytes::Bytes;
///
/// let leaf = LeafSource::new(Bytes::from_static(b"hello"));
/// assert_eq!(leaf.size(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct LeafSource {
    content: Bytes,
    size: u64,
}

impl LeafSource {
    /// Creates a leaf source, declaring the content's own length as its size.
    pub fn new(content: impl Into<Bytes>) -> Self {
        let content = content.into();
        let size = content.len() as u64;
        Self { content, size }
    }

    /// Creates the zero-size leaf source.
    pub fn empty() -> Self {
        Self {
            content: Bytes::new(),
            size: 0,
        }
    }

    /// The content bytes.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// The declared logical size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Consumes the source and returns the content bytes.
    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl From<Bytes> for LeafSource {
    fn from(content: Bytes) -> Self {
        Self::new(content)
    }
}

impl From<Vec<u8>> for LeafSource {
    fn from(content: Vec<u8>) -> Self {
        Self::new(content)
    }
}
