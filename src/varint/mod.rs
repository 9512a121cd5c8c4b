//! Unsigned LEB128 varint primitives.
//!
//! All lengths and small integers in the wire format are encoded as protobuf
//! varints: 7 data bits per byte, little-endian groups, continuation bit set
//! on every byte except the last.
//!
//! Frame lengths are often needed before any bytes are built, so this module
//! also provides [`wire_size`], which reports the exact encoded length of a
//! value without producing it.

/// Maximum encoded length of a `u64` varint (ceil(64 / 7)).
pub const MAX_WIRE_SIZE: usize = 10;

/// Returns the exact number of bytes the varint encoding of `n` occupies.
///
/// # Example
///
/// ```
/// use dagenc::varint;
///
/// assert_eq!(varint::wire_size(0), 1);
/// assert_eq!(varint::wire_size(127), 1);
/// assert_eq!(varint::wire_size(128), 2);
/// ```
pub fn wire_size(n: u64) -> usize {
    // 1 + floor(bits / 7) for nonzero n; zero still takes one byte
    (64 - (n | 1).leading_zeros() as usize).div_ceil(7)
}

/// Appends the varint encoding of `n` to `buf`.
pub fn append(buf: &mut Vec<u8>, mut n: u64) {
    while n >= 0x80 {
        buf.push((n as u8) | 0x80);
        n >>= 7;
    }
    buf.push(n as u8);
}

/// Returns the varint encoding of `n` as a fresh vector.
///
/// # Example
///
/// ```
/// use dagenc::varint;
///
/// assert_eq!(varint::to_vec(300), vec![0xac, 0x02]);
/// ```
pub fn to_vec(n: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(wire_size(n));
    append(&mut buf, n);
    buf
}

/// Decodes a varint from the start of `buf`.
///
/// Returns the decoded value and the number of bytes consumed, or `None` if
/// the buffer ends mid-varint or the value overflows 64 bits.
pub fn decode(buf: &[u8]) -> Option<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    for (i, &byte) in buf.iter().enumerate() {
        let bits = (byte & 0x7f) as u64;
        if shift >= 64 || (shift == 63 && bits > 1) {
            return None;
        }
        value |= bits << shift;
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
        shift += 7;
    }
    None
}
