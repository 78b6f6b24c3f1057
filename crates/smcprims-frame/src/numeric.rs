//! Controller numeric formats.
//!
//! Multi-byte values are big-endian on the wire regardless of host order.

/// Largest value `encode_fpe2` represents without truncating byte 0.
pub const FPE2_MAX: u32 = 0x3fff;

/// Decode an `fpe2` value the way c-smc's `from_fpe2` does.
///
/// `(b0 << 6) + (b1 << 2)`. Byte 1 is shifted left, not right, so the
/// fractional bits are not recovered; values whose low six bits are zero
/// decode exactly. Fan speeds reported by real controllers are compared
/// against this result, so the shifts are kept as is.
pub fn decode_fpe2(bytes: [u8; 2]) -> u32 {
    ((bytes[0] as u32) << 6) + ((bytes[1] as u32) << 2)
}

/// Decode an `fpe2` value as unsigned 14.2 fixed point, fraction dropped.
///
/// This is the arithmetic inverse of [`encode_fpe2`] over `0..=FPE2_MAX`.
pub fn decode_fpe2_exact(bytes: [u8; 2]) -> u32 {
    ((bytes[0] as u32) << 6) + ((bytes[1] as u32) >> 2)
}

/// Encode a value as `fpe2`.
///
/// `b1 = (v << 2) ^ (b0 << 8)`: the XOR term only touches bits 8 and up,
/// which the byte truncation discards, so `b1` is the low byte of `v << 2`.
pub fn encode_fpe2(value: u32) -> [u8; 2] {
    let b0 = (value >> 6) as u8;
    let b1 = ((value << 2) ^ ((b0 as u32) << 8)) as u8;
    [b0, b1]
}

/// Decode `sp78` keeping only the integer byte (whole degrees).
pub fn decode_sp78_whole(bytes: [u8; 2]) -> f64 {
    f64::from(bytes[0] as i8)
}

/// Decode `sp78` as signed 8.8 fixed point.
pub fn decode_sp78(bytes: [u8; 2]) -> f64 {
    f64::from(i16::from_be_bytes(bytes)) / 256.0
}

pub fn decode_ui8(bytes: [u8; 1]) -> u8 {
    bytes[0]
}

pub fn decode_ui16(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

pub fn decode_ui32(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

pub fn decode_flag(bytes: [u8; 1]) -> bool {
    bytes[0] != 0
}
