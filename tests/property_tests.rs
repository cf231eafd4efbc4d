use arcode::{
    compress, decompress, ArithmeticEncoder, BitSequence, BitSink, BitSource, CompressedContainer,
    CumulativeRanges, FrequencyTable, Precision, MAX_COUNT,
};
use proptest::prelude::*;
use test_case::test_case;

proptest! {
    #[test]
    fn test_roundtrip(input in prop::collection::vec(any::<u8>(), 0..3000)) {
        let container = compress(&input).unwrap();
        let bytes = container.to_bytes();
        let parsed = CompressedContainer::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decompress(&parsed).unwrap(), input);
    }

    #[test]
    fn test_roundtrip_small_alphabet(
        input in prop::collection::vec(prop::sample::select(b"ab\n".to_vec()), 1..5000),
    ) {
        let container = compress(&input).unwrap();
        prop_assert_eq!(decompress(&container).unwrap(), input);
    }

    #[test]
    fn test_deterministic(input in prop::collection::vec(any::<u8>(), 0..1000)) {
        prop_assert_eq!(compress(&input).unwrap().to_bytes(), compress(&input).unwrap().to_bytes());
    }

    #[test]
    fn test_alphabet_order_invariance(
        input in prop::collection::vec(0u8..40, 1..500),
        seed in any::<u8>(),
    ) {
        let container = compress(&input).unwrap();

        // Feed the same counts in a scrambled order.
        let mut entries: Vec<_> = container.frequencies().entries().collect();
        entries.sort_by_key(|&(s, _)| s ^ seed);
        let table = FrequencyTable::from_entries(entries).unwrap();
        let ranges = CumulativeRanges::new(&table, Precision::DEFAULT).unwrap();
        let mut encoder = ArithmeticEncoder::new(&ranges);
        encoder.encode_all(&input).unwrap();
        let bits = encoder.finish().unwrap();
        let rebuilt = CompressedContainer::new(table, input.len() as u32, bits);

        prop_assert_eq!(rebuilt.to_bytes(), container.to_bytes());
    }

    #[test]
    fn test_bit_padding(bits in prop::collection::vec(any::<bool>(), 1..100)) {
        prop_assume!(bits.len() % 8 != 0);
        let mut sink = BitSink::new();
        for &b in &bits {
            sink.push(b).unwrap();
        }
        let seq = sink.finish().unwrap();
        let mut out = Vec::new();
        seq.write_to(&mut out);
        let (back, _) = BitSequence::read_from(&out).unwrap();

        let mut src = BitSource::new(&back);
        let mut read = Vec::new();
        while let Some(b) = src.next_bit().unwrap() {
            read.push(b);
        }
        prop_assert_eq!(read, bits);
    }
}

#[test]
fn test_reference_scenario() {
    let input = b"AAAABBBCCD";
    let container = compress(input).unwrap();
    assert_eq!(container.original_len(), 10);

    let entries: Vec<_> = container.frequencies().entries().collect();
    assert_eq!(entries, vec![(b'A', 4), (b'B', 3), (b'C', 2), (b'D', 1)]);
    assert_eq!(entries.iter().map(|&(_, c)| c).sum::<u32>(), 10);

    let bytes = container.to_bytes();
    assert_eq!(&bytes[..4], &4u32.to_le_bytes());
    assert_eq!(&bytes[24..28], &10u32.to_le_bytes());

    let parsed = CompressedContainer::from_bytes(&bytes).unwrap();
    assert_eq!(decompress(&parsed).unwrap(), input);
}

#[test_case(b"" ; "empty")]
#[test_case(b"x" ; "single byte")]
#[test_case(b"zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz" ; "one repeated symbol")]
#[test_case(b"\x00\xff\x00\xff\x80" ; "extreme byte values")]
#[test_case(b"ab" ; "two equiprobable symbols")]
fn test_edge_inputs(input: &[u8]) {
    let container = compress(input).unwrap();
    assert_eq!(decompress(&container).unwrap(), input);
}

#[test]
fn test_full_alphabet() {
    let input: Vec<u8> = (0..=255u8).cycle().take(256 * 9).collect();
    let container = compress(&input).unwrap();
    assert_eq!(container.frequencies().len(), 256);
    assert_eq!(decompress(&container).unwrap(), input);
}

#[test]
fn test_single_symbol_beyond_cap() {
    let input = vec![b'q'; MAX_COUNT as usize * 3];
    let container = compress(&input).unwrap();
    assert!(container.frequencies().is_rescaled());
    assert_eq!(container.frequencies().count(b'q'), MAX_COUNT);
    assert_eq!(decompress(&container).unwrap(), input);

    let parsed = CompressedContainer::from_bytes(&container.to_bytes()).unwrap();
    assert_eq!(parsed, container);
    assert!(!parsed.frequencies().is_rescaled());
}

#[test]
fn test_skewed_input_beyond_cap() {
    let mut input = vec![0u8; 100_000];
    for i in (0..input.len()).step_by(1000) {
        input[i] = 1 + (i / 1000 % 5) as u8;
    }
    let container = compress(&input).unwrap();
    assert!(container.frequencies().is_rescaled());
    assert!(container.frequencies().total() <= u64::from(MAX_COUNT));
    assert_eq!(decompress(&container).unwrap(), input);
    // Still far below one byte per symbol.
    assert!(container.compression_ratio().unwrap() < 0.05);
    let parsed = CompressedContainer::from_bytes(&container.to_bytes()).unwrap();
    assert_eq!(parsed, container);
    assert_eq!(decompress(&parsed).unwrap(), input);
}
