//! Sample file contents that sniff as known content types.

/// Smallest useful JPEG: SOI, a JFIF APP0 segment and EOI
pub fn jpeg_bytes() -> Vec<u8> {
    vec![
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
    ]
}

/// JPEG header followed by `len` filler bytes, for uploads spanning many reads
pub fn large_jpeg_bytes(len: usize) -> Vec<u8> {
    let mut data = jpeg_bytes();
    data.extend((0..len).map(|i| (i % 253) as u8));
    data
}

/// 1x1 transparent PNG
pub fn png_bytes() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

pub fn gif_bytes() -> Vec<u8> {
    let mut data = b"GIF89a".to_vec();
    data.extend_from_slice(&[
        0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01,
        0x00, 0x00, 0x02, 0x00, 0x3B,
    ]);
    data
}

/// 64-bit little-endian ELF header padded with zeros; sniffs as an executable
pub fn elf_bytes() -> Vec<u8> {
    let mut data = vec![0x7F, b'E', b'L', b'F', 0x02, 0x01, 0x01, 0x00];
    data.resize(128, 0);
    data
}
