//! PNG import and export for surfaces.

use std::io::Cursor;
use std::path::Path;

use crate::foundation::core::{ImageDescriptor, PixelFormat};
use crate::foundation::error::{DrawError, DrawResult};
use crate::pixel::{
    pack_pixel, premultiply_rgba8_in_place, unpack_canvas, unpremultiply_rgba8_in_place,
};

/// Decode a PNG (or any format `image` recognizes) into a premultiplied `argb32` surface.
pub fn decode_png(bytes: &[u8]) -> DrawResult<ImageDescriptor> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| DrawError::codec(format!("decode: {e}")))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut premul);

    let format = PixelFormat::Argb32;
    let stride = format.stride_for_width(width);
    let mut data = vec![0u8; stride * height as usize];
    for (row, src) in data
        .chunks_exact_mut(stride.max(1))
        .zip(premul.chunks_exact((width as usize * 4).max(1)))
    {
        for (dst, px) in row.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            pack_pixel(format, [px[0], px[1], px[2], px[3]], dst);
        }
    }

    Ok(ImageDescriptor {
        width: i64::from(width),
        height: i64::from(height),
        format,
        data,
    })
}

pub fn read_png(path: &Path) -> DrawResult<ImageDescriptor> {
    let bytes = std::fs::read(path)
        .map_err(|e| DrawError::codec(format!("read {}: {e}", path.display())))?;
    decode_png(&bytes)
}

/// Encode a surface as PNG. Surfaces with alpha become RGBA, opaque formats RGB.
pub fn encode_png(image: &ImageDescriptor) -> DrawResult<Vec<u8>> {
    let (width, height) = image.checked_dimensions(u32::MAX)?;
    let stride = image.stride();
    if image.data.len() < stride * height as usize {
        return Err(DrawError::dimension(format!(
            "image data holds {} bytes, {width}x{height} {} needs {}",
            image.data.len(),
            image.format.name(),
            stride * height as usize
        )));
    }

    let mut rgba = unpack_canvas(image.format, &image.data, width, height, stride);
    unpremultiply_rgba8_in_place(&mut rgba);

    let encoded = if image.format.has_alpha() {
        image::RgbaImage::from_raw(width, height, rgba).map(image::DynamicImage::ImageRgba8)
    } else {
        let rgb = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        image::RgbImage::from_raw(width, height, rgb).map(image::DynamicImage::ImageRgb8)
    }
    .ok_or_else(|| DrawError::codec("pixel buffer does not match the image size"))?;

    let mut buf = Vec::new();
    encoded
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| DrawError::codec(format!("encode png: {e}")))?;
    Ok(buf)
}

pub fn write_png(image: &ImageDescriptor, path: &Path) -> DrawResult<()> {
    let bytes = encode_png(image)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|e| DrawError::codec(format!("create {}: {e}", dir.display())))?;
    }
    std::fs::write(path, bytes)
        .map_err(|e| DrawError::codec(format!("write {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "png written");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/codec.rs"]
mod tests;
