//! Magic-byte format detection.
//!
//! Classification looks only at the bytes; the declared filename and MIME type play no
//! part in it.

use chirp_core::ImageFormat;

/// A byte pattern expected at a fixed offset.
struct Signature {
    offset: usize,
    bytes: &'static [u8],
}

const fn sig(offset: usize, bytes: &'static [u8]) -> Signature {
    Signature { offset, bytes }
}

/// Every signature in a row must match for the format to be detected.
const SIGNATURES: &[(ImageFormat, &[Signature])] = &[
    (
        ImageFormat::Png,
        &[sig(0, &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])],
    ),
    (ImageFormat::Jpeg, &[sig(0, &[0xFF, 0xD8, 0xFF])]),
    (ImageFormat::Gif, &[sig(0, b"GIF87a")]),
    (ImageFormat::Gif, &[sig(0, b"GIF89a")]),
    (ImageFormat::Webp, &[sig(0, b"RIFF"), sig(8, b"WEBP")]),
];

/// Detect the real image format from the leading bytes of a file.
pub fn sniff_format(header: &[u8]) -> Option<ImageFormat> {
    SIGNATURES
        .iter()
        .find(|(_, sigs)| sigs.iter().all(|s| matches_at(header, s)))
        .map(|(format, _)| *format)
}

fn matches_at(header: &[u8], sig: &Signature) -> bool {
    header
        .get(sig.offset..sig.offset + sig.bytes.len())
        .is_some_and(|window| window == sig.bytes)
}
