use crate::foundation::error::{DrawError, DrawResult};
use crate::foundation::math::mul_div255_u8;
use crate::pixel::PremulRgba8;

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Multiply `mask` into `dst` in place (intersection of two coverage masks).
pub fn intersect_in_place(dst: &mut [u8], mask: &[u8]) -> DrawResult<()> {
    if dst.len() != mask.len() {
        return Err(DrawError::Other(anyhow::anyhow!(
            "intersect_in_place expects equal-length coverage masks"
        )));
    }
    for (d, &m) in dst.iter_mut().zip(mask) {
        *d = mul_div255_u8(u16::from(*d), u16::from(m));
    }
    Ok(())
}

/// Composite a source over `canvas` through per-pixel `coverage`.
///
/// `sample(x, y)` yields the premultiplied source color at the pixel; it is only called for
/// pixels with non-zero coverage.
pub fn over_masked_in_place(
    canvas: &mut [u8],
    width: u32,
    coverage: &[u8],
    opacity: f32,
    mut sample: impl FnMut(u32, u32) -> PremulRgba8,
) -> DrawResult<()> {
    if canvas.len() != coverage.len() * 4 {
        return Err(DrawError::Other(anyhow::anyhow!(
            "over_masked_in_place expects one coverage byte per rgba8 pixel"
        )));
    }
    if width == 0 {
        return Ok(());
    }
    let opacity = opacity.clamp(0.0, 1.0);
    for (i, (d, &c)) in canvas.chunks_exact_mut(4).zip(coverage).enumerate() {
        if c == 0 {
            continue;
        }
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        let src = sample(x, y);
        let out = over(
            [d[0], d[1], d[2], d[3]],
            src,
            opacity * f32::from(c) / 255.0,
        );
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/composite_cpu.rs"]
mod tests;
