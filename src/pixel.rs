//! Packing between surface pixel formats and premultiplied RGBA8.
//!
//! The raster backend works on a premultiplied RGBA8 canvas. Surfaces are unpacked once when
//! a backend is bound and packed back when it is finished. Packing only rewrites pixels whose
//! canvas value changed, so untouched pixels keep their exact input bytes (including unused
//! bits and values a lossy format could not round-trip).

use crate::foundation::core::PixelFormat;
use crate::foundation::math::{narrow_from_u8, widen_to_u8};

pub type PremulRgba8 = [u8; 4];

pub(crate) fn unpack_pixel(format: PixelFormat, src: &[u8]) -> PremulRgba8 {
    match format {
        PixelFormat::Argb32 => {
            let v = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
            [(v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8]
        }
        PixelFormat::Rgb24 => {
            let v = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
            [(v >> 16) as u8, (v >> 8) as u8, v as u8, 255]
        }
        PixelFormat::Rgb565 => {
            let v = u32::from(u16::from_le_bytes([src[0], src[1]]));
            [
                widen_to_u8((v >> 11) & 0x1f, 5),
                widen_to_u8((v >> 5) & 0x3f, 6),
                widen_to_u8(v & 0x1f, 5),
                255,
            ]
        }
        PixelFormat::Rgb30 => {
            let v = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
            [
                widen_to_u8((v >> 20) & 0x3ff, 10),
                widen_to_u8((v >> 10) & 0x3ff, 10),
                widen_to_u8(v & 0x3ff, 10),
                255,
            ]
        }
    }
}

pub(crate) fn pack_pixel(format: PixelFormat, px: PremulRgba8, dst: &mut [u8]) {
    let [r, g, b, a] = px;
    match format {
        PixelFormat::Argb32 => {
            let v = (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
            dst[..4].copy_from_slice(&v.to_le_bytes());
        }
        PixelFormat::Rgb24 => {
            let v = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
            dst[..4].copy_from_slice(&v.to_le_bytes());
        }
        PixelFormat::Rgb565 => {
            let v = (narrow_from_u8(r, 5) << 11) | (narrow_from_u8(g, 6) << 5) | narrow_from_u8(b, 5);
            dst[..2].copy_from_slice(&(v as u16).to_le_bytes());
        }
        PixelFormat::Rgb30 => {
            let v = (narrow_from_u8(r, 10) << 20) | (narrow_from_u8(g, 10) << 10) | narrow_from_u8(b, 10);
            dst[..4].copy_from_slice(&v.to_le_bytes());
        }
    }
}

/// Unpack `width * height` pixels of `data` (rows of `stride` bytes) into a tightly packed
/// premultiplied RGBA8 canvas.
pub(crate) fn unpack_canvas(
    format: PixelFormat,
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
) -> Vec<u8> {
    let bpp = format.bytes_per_pixel();
    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    for row in data.chunks_exact(stride.max(1)).take(height as usize) {
        for px in row.chunks_exact(bpp).take(width as usize) {
            out.extend_from_slice(&unpack_pixel(format, px));
        }
    }
    out
}

/// Write back every canvas pixel that differs from `before`. Returns the number of pixels
/// rewritten.
pub(crate) fn pack_changed(
    format: PixelFormat,
    dst: &mut [u8],
    stride: usize,
    width: u32,
    before: &[u8],
    after: &[u8],
) -> usize {
    let bpp = format.bytes_per_pixel();
    let width = width as usize;
    if width == 0 {
        return 0;
    }
    let mut written = 0usize;
    for (i, (b, a)) in before.chunks_exact(4).zip(after.chunks_exact(4)).enumerate() {
        if b == a {
            continue;
        }
        let (y, x) = (i / width, i % width);
        let off = y * stride + x * bpp;
        pack_pixel(format, [a[0], a[1], a[2], a[3]], &mut dst[off..off + bpp]);
        written += 1;
    }
    written
}

pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/pixel.rs"]
mod tests;
