//! Reading gzip-wrapped tag files.
//!
//! Schematic files are normally a gzip member around one root compound, but
//! hand-extracted or very old files are sometimes stored uncompressed. Both
//! are accepted: raw input is wrapped in an in-memory gzip member first so
//! that every file goes through the same decompressing reader.

use std::borrow::Cow;
use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::warn;

use crate::{from_binary, Compound, Result};

/// The two magic bytes every gzip member starts with.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Returns `true` if `bytes` begins with a gzip header.
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Returns `bytes` unchanged if they are already gzip data. Otherwise returns
/// a gzip member wrapping them.
///
/// The wrapped copy lives only in the returned buffer.
pub fn ensure_gzip(bytes: &[u8]) -> Result<Cow<'_, [u8]>> {
    if is_gzip(bytes) {
        return Ok(Cow::Borrowed(bytes));
    }

    warn!(
        len = bytes.len(),
        "input is not gzip compressed, recompressing it before decoding"
    );

    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::fast());
    encoder.write_all(bytes)?;

    Ok(Cow::Owned(encoder.finish()?))
}

/// Decompresses a gzip member and returns its contents.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut buf = vec![];
    GzDecoder::new(bytes).read_to_end(&mut buf)?;

    Ok(buf)
}

/// Decodes a tag file that may or may not be gzip compressed.
///
/// Returns the root compound and its name.
pub fn read_compressed(bytes: &[u8]) -> Result<(Compound, String)> {
    let gzipped = ensure_gzip(bytes)?;
    let raw = decompress(&gzipped)?;

    let mut slice = raw.as_slice();
    let (root, root_name) = from_binary(&mut slice)?;

    if !slice.is_empty() {
        warn!(trailing = slice.len(), "ignoring bytes after the root compound");
    }

    Ok((root, root_name))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{compound, to_binary};

    fn raw_file() -> Vec<u8> {
        let mut buf = vec![];
        to_binary(
            &compound! { "Materials" => "Alpha", "Height" => 2_i16 },
            &mut buf,
            "Schematic",
        )
        .unwrap();
        buf
    }

    #[test]
    fn raw_input_is_rewrapped() {
        let raw = raw_file();
        assert!(!is_gzip(&raw));

        let wrapped = ensure_gzip(&raw).unwrap();
        assert!(is_gzip(&wrapped));
        assert_eq!(decompress(&wrapped).unwrap(), raw);
    }

    #[test]
    fn gzip_input_is_borrowed() {
        let mut encoder = GzEncoder::new(vec![], Compression::default());
        encoder.write_all(&raw_file()).unwrap();
        let gz = encoder.finish().unwrap();

        assert!(matches!(ensure_gzip(&gz).unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn raw_and_compressed_decode_identically() {
        let raw = raw_file();

        let mut encoder = GzEncoder::new(vec![], Compression::best());
        encoder.write_all(&raw).unwrap();
        let gz = encoder.finish().unwrap();

        assert_eq!(read_compressed(&raw).unwrap(), read_compressed(&gz).unwrap());
    }

    #[test]
    fn corrupt_gzip_is_an_error() {
        let mut bytes = GZIP_MAGIC.to_vec();
        bytes.extend([0xde, 0xad, 0xbe, 0xef]);

        assert!(read_compressed(&bytes).is_err());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(read_compressed(b"definitely not a schematic").is_err());
        assert!(read_compressed(&[]).is_err());
    }
}
