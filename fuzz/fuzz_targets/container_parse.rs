#![no_main]
use arcode::{decompress, CompressedContainer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must be rejected or decoded, never panic.
    let Ok(container) = CompressedContainer::from_bytes(data) else {
        return;
    };
    let reparsed = CompressedContainer::from_bytes(&container.to_bytes()).unwrap();
    assert_eq!(reparsed, container);
    if container.original_len() > 1 << 20 {
        return;
    }
    if let Ok(out) = decompress(&container) {
        assert_eq!(out.len(), container.original_len());
    }
});
