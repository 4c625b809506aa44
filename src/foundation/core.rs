use crate::foundation::error::{DrawError, DrawResult};

pub use kurbo::{Affine, BezPath, PathEl, Point, Rect, Vec2};

/// Hard upper bound on either surface dimension.
///
/// Keeps `height * stride` far away from integer overflow and fits the raster backend's
/// `u16` surface coordinates.
pub const MAX_DIMENSION: u32 = 32768;

/// Pixel layouts a surface can be bound to.
///
/// All multi-byte pixels are little-endian words; rows are padded to a 4-byte stride.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// 32-bit `0xAARRGGBB`, premultiplied alpha.
    #[serde(rename = "argb32")]
    Argb32,
    /// 32-bit `0x00RRGGBB`, opaque.
    #[serde(rename = "rgb24")]
    Rgb24,
    /// 16-bit `RRRRRGGGGGGBBBBB`, opaque.
    #[serde(rename = "rgb16_565")]
    Rgb565,
    /// 32-bit `00` + 10 bits per channel, opaque.
    #[serde(rename = "rgb30")]
    Rgb30,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 4] = [
        PixelFormat::Argb32,
        PixelFormat::Rgb24,
        PixelFormat::Rgb565,
        PixelFormat::Rgb30,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Argb32 => "argb32",
            PixelFormat::Rgb24 => "rgb24",
            PixelFormat::Rgb565 => "rgb16_565",
            PixelFormat::Rgb30 => "rgb30",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb565 => 2,
            PixelFormat::Argb32 | PixelFormat::Rgb24 | PixelFormat::Rgb30 => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Argb32)
    }

    /// Row stride in bytes for `width` pixels, rounded up to a multiple of 4.
    pub fn stride_for_width(self, width: u32) -> usize {
        let row = width as usize * self.bytes_per_pixel();
        (row + 3) & !3
    }
}

/// A raster image crossing the engine boundary.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageDescriptor {
    /// Width in pixels. Signed so that bad input can be reported instead of wrapped.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
    pub format: PixelFormat,
    /// Packed rows, `height * stride` bytes.
    pub data: Vec<u8>,
}

impl ImageDescriptor {
    /// A zero-filled image of the given size, rejected before allocation if over the limit.
    pub fn blank(width: u32, height: u32, format: PixelFormat) -> DrawResult<Self> {
        let (width, height) =
            checked_dimensions(i64::from(width), i64::from(height), MAX_DIMENSION)?;
        let len = height as usize * format.stride_for_width(width);
        Ok(Self {
            width: i64::from(width),
            height: i64::from(height),
            format,
            data: vec![0; len],
        })
    }

    /// Validate the dimensions against `max_dimension` and return them unsigned.
    pub fn checked_dimensions(&self, max_dimension: u32) -> DrawResult<(u32, u32)> {
        checked_dimensions(self.width, self.height, max_dimension)
    }

    /// Validate and copy the pixel data into a buffer of exactly `height * stride` bytes.
    ///
    /// Short input is zero-padded; input longer than the surface is rejected.
    pub fn padded_copy(&self, max_dimension: u32) -> DrawResult<(u32, u32, Vec<u8>)> {
        let (width, height) = self.checked_dimensions(max_dimension)?;
        let len = height as usize * self.format.stride_for_width(width);
        if self.data.len() > len {
            return Err(DrawError::format(format!(
                "{} bytes of pixel data for a {width}x{height} {} surface of {len} bytes",
                self.data.len(),
                self.format.name()
            )));
        }
        let mut data = vec![0u8; len];
        data[..self.data.len()].copy_from_slice(&self.data);
        Ok((width, height, data))
    }

    pub fn stride(&self) -> usize {
        let width = u32::try_from(self.width.max(0)).unwrap_or(u32::MAX);
        self.format.stride_for_width(width)
    }
}

/// Reject negative or over-limit dimensions before anything is allocated.
pub fn checked_dimensions(width: i64, height: i64, max_dimension: u32) -> DrawResult<(u32, u32)> {
    if width < 0 || height < 0 {
        return Err(DrawError::dimension(format!(
            "negative dimensions {width}x{height}"
        )));
    }
    let limit = i64::from(max_dimension.min(MAX_DIMENSION));
    if width > limit || height > limit {
        return Err(DrawError::dimension(format!(
            "dimensions {width}x{height} exceed the {limit} pixel limit"
        )));
    }
    Ok((width as u32, height as u32))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
