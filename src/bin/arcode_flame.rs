use arcode::Codec;

fn main() -> Result<(), arcode::Error> {
    tracing_subscriber::fmt::init();

    // Skewed byte stream with a long tail, about 3 bits per symbol.
    let input = (0..64 * 1024u32)
        .map(|i| match i % 16 {
            0..=7 => b'e',
            8..=11 => b't',
            12 | 13 => b'a',
            14 => b'b' + (i % 7) as u8,
            _ => (i % 251) as u8,
        })
        .collect::<Vec<_>>();

    let codec = Codec::default();
    for _ in 0..200 {
        let container = codec.compress(&input)?;
        let output = codec.decompress(&container)?;
        assert_eq!(output.len(), input.len());
    }
    Ok(())
}
