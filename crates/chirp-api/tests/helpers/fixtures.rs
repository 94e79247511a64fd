//! Test fixtures: image blobs identified by their magic bytes.

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn padded(prefix: &[u8], len: usize) -> Vec<u8> {
    let mut data = prefix.to_vec();
    data.resize(len.max(prefix.len()), 0);
    data
}

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// PNG signature padded to `len` bytes.
pub fn create_png_of_size(len: usize) -> Vec<u8> {
    padded(&PNG_SIGNATURE, len)
}

/// JFIF header padded to `len` bytes.
pub fn create_jpeg_of_size(len: usize) -> Vec<u8> {
    padded(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00], len)
}

/// Minimal GIF89a.
pub fn create_test_gif() -> Vec<u8> {
    padded(b"GIF89a\x01\x00\x01\x00\x00\x00\x00", 64)
}
