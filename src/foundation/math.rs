pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Map a unit-interval channel to `0..=255`, clamping out-of-range and NaN input.
pub(crate) fn unit_to_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Expand an `n`-bit channel to 8 bits by bit replication.
pub(crate) fn widen_to_u8(v: u32, bits: u32) -> u8 {
    debug_assert!((1..=8).contains(&bits) || bits == 10);
    if bits >= 8 {
        return (v >> (bits - 8)) as u8;
    }
    let mut out = v << (8 - bits);
    let mut shift = bits;
    while shift < 8 {
        out |= out >> shift;
        shift *= 2;
    }
    out as u8
}

/// Reduce an 8-bit channel to `bits` bits (rounding) or widen it to 10 bits.
pub(crate) fn narrow_from_u8(v: u8, bits: u32) -> u32 {
    match bits {
        10 => (u32::from(v) << 2) | (u32::from(v) >> 6),
        8 => u32::from(v),
        _ => {
            let max = (1u32 << bits) - 1;
            (u32::from(v) * max + 127) / 255
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
