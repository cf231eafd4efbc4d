#![no_main]
use arcode::{Codec, CoderConfig, Precision};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, u8)| {
    let (input, bits) = data;
    let bits = 12 + u32::from(bits) % 19; // 12 to 30 bits
    let Ok(precision) = Precision::new(bits) else {
        return;
    };
    let codec = Codec::new(CoderConfig::default().with_precision(precision));

    let bytes = codec.compress_to_vec(&input).unwrap();
    let output = codec.decompress_from_slice(&bytes).unwrap();
    assert_eq!(input, output);
});
