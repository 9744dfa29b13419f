use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;

/// Compresses `bytes` using a zlib encoder.
///
/// # Errors
///
/// This function will fail if the `ZlibEncoder` fails.
pub fn compress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Returns `bytes` decompressed, using a zlib decoder.
#[cfg(test)]
pub fn decompress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    use std::io::Read;

    let mut buf = Vec::new();
    flate2::bufread::ZlibDecoder::new(bytes).read_to_end(&mut buf)?;
    Ok(buf)
}

// Tests
