//! Zero-copy segmented byte builder.
//!
//! Block bytes are assembled from a mix of tiny owned runs (protobuf tags,
//! length prefixes) and large externally-owned content (leaf data). Copying
//! the content just to frame it would dominate the cost of encoding, so the
//! builder keeps an ordered list of segments instead:
//!
//! - small appends (`put_u8`, `put_slice`) coalesce into an owned tail run
//! - [`bytes::Bytes`] appends are stored by reference (refcounted, no copy)
//!
//! Consumers walk the segments in order; [`ZcpBytes::to_vec`] materializes a
//! contiguous copy when one is genuinely needed (hashing, persistence).

use bytes::Bytes;

/// One contiguous run of bytes inside a [`ZcpBytes`].
#[derive(Debug, Clone)]
enum Segment {
    /// Small owned run, built up from tag/length appends.
    Owned(Vec<u8>),
    /// Shared externally-owned bytes, referenced without copying.
    Shared(Bytes),
}

impl Segment {
    fn as_slice(&self) -> &[u8] {
        match self {
            Segment::Owned(v) => v,
            Segment::Shared(b) => b,
        }
    }
}

/// An append-only, segment-based byte builder.
///
/// Append order is preserved exactly; the logical byte sequence is the
/// concatenation of all segments. Total size is tracked incrementally so
/// [`ZcpBytes::len`] is O(1).
///
/// # Example
///
/// ```
/// use dagenc::ZcpBytes;
/// use bytes::Bytes;
///
/// let content = Bytes::from_static(b"payload");
///
/// let mut buf = ZcpBytes::new();
/// buf.put_u8(0x0a);
/// buf.put_slice(&[0x07]);
/// buf.put_bytes(content.clone()); // no copy
///
/// assert_eq!(buf.len(), 9);
/// assert_eq!(buf.to_vec(), b"\x0a\x07payload");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ZcpBytes {
    segments: Vec<Segment>,
    len: u64,
}

impl ZcpBytes {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder pre-sized for roughly `segments` appends.
    ///
    /// Purely a reallocation hint; the builder grows as needed.
    pub fn with_segment_capacity(segments: usize) -> Self {
        Self {
            segments: Vec::with_capacity(segments),
            len: 0,
        }
    }

    /// Appends a single owned byte.
    pub fn put_u8(&mut self, byte: u8) {
        self.tail().push(byte);
        self.len += 1;
    }

    /// Appends an owned copy of `slice`.
    pub fn put_slice(&mut self, slice: &[u8]) {
        if slice.is_empty() {
            return;
        }
        self.tail().extend_from_slice(slice);
        self.len += slice.len() as u64;
    }

    /// Appends externally-owned bytes without copying them.
    pub fn put_bytes(&mut self, bytes: Bytes) {
        if bytes.is_empty() {
            return;
        }
        self.len += bytes.len() as u64;
        self.segments.push(Segment::Shared(bytes));
    }

    /// Appends all segments of another builder, preserving their zero-copy
    /// status.
    pub fn put_zcp(&mut self, other: ZcpBytes) {
        self.len += other.len;
        self.segments.extend(other.segments);
    }

    /// Returns the total number of logical bytes appended so far.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates the contiguous byte runs in append order.
    pub fn runs(&self) -> impl Iterator<Item = &[u8]> {
        self.segments.iter().map(Segment::as_slice)
    }

    /// Materializes the full byte sequence into one contiguous vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len as usize);
        for run in self.runs() {
            out.extend_from_slice(run);
        }
        out
    }

    /// Returns a mutable reference to the owned tail run, creating one if the
    /// last segment is shared (or absent).
    fn tail(&mut self) -> &mut Vec<u8> {
        if !matches!(self.segments.last(), Some(Segment::Owned(_))) {
            self.segments.push(Segment::Owned(Vec::new()));
        }
        match self.segments.last_mut() {
            Some(Segment::Owned(v)) => v,
            _ => unreachable!("tail segment was just created as owned"),
        }
    }
}

impl From<Bytes> for ZcpBytes {
    fn from(bytes: Bytes) -> Self {
        let mut zcp = ZcpBytes::with_segment_capacity(1);
        zcp.put_bytes(bytes);
        zcp
    }
}

impl From<Vec<u8>> for ZcpBytes {
    fn from(bytes: Vec<u8>) -> Self {
        ZcpBytes::from(Bytes::from(bytes))
    }
}

impl From<&'static [u8]> for ZcpBytes {
    fn from(bytes: &'static [u8]) -> Self {
        ZcpBytes::from(Bytes::from_static(bytes))
    }
}
