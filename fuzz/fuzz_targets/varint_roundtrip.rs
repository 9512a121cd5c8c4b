#![no_main]

use dagenc::varint;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must never panic. Non-minimal encodings are
    // accepted, so the canonical re-encoding may only be shorter.
    if let Some((value, used)) = varint::decode(data) {
        assert!(used <= data.len());
        assert!(varint::wire_size(value) <= used);
    }

    // Values derived from the input must round-trip exactly.
    if data.len() >= 8 {
        let n = u64::from_le_bytes(data[..8].try_into().unwrap());
        let encoded = varint::to_vec(n);
        assert_eq!(encoded.len(), varint::wire_size(n));
        let (decoded, used) = varint::decode(&encoded).expect("own encoding decodes");
        assert_eq!(decoded, n);
        assert_eq!(used, encoded.len());
    }
});
