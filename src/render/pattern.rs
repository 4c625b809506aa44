use std::sync::Arc;

use kurbo::{Affine, Point};

use crate::backend::{PatternKind, Status};
use crate::foundation::core::ImageDescriptor;
use crate::foundation::math::unit_to_u8;
use crate::pixel::{PremulRgba8, unpack_canvas};

/// A pattern handle owned by the tag store.
#[derive(Clone, Debug)]
pub struct CpuPattern {
    pub(crate) paint: PatternPaint,
    /// User space to pattern space.
    pub(crate) matrix: Affine,
}

#[derive(Clone, Debug)]
pub(crate) enum PatternPaint {
    Surface {
        width: u32,
        height: u32,
        /// Premultiplied RGBA8, tightly packed.
        pixels: Arc<Vec<u8>>,
    },
    Linear {
        p0: Point,
        p1: Point,
        stops: Vec<ColorStop>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ColorStop {
    pub(crate) offset: f64,
    /// Straight (non-premultiplied) RGBA in `0..=1`.
    pub(crate) rgba: [f64; 4],
}

impl CpuPattern {
    pub(crate) fn surface(image: &ImageDescriptor) -> Result<Self, Status> {
        let width = u32::try_from(image.width).map_err(|_| Status::InvalidSize)?;
        let height = u32::try_from(image.height).map_err(|_| Status::InvalidSize)?;
        let stride = image.format.stride_for_width(width);
        if image.data.len() != stride * height as usize {
            return Err(Status::InvalidStride);
        }
        let pixels = unpack_canvas(image.format, &image.data, width, height, stride);
        Ok(Self {
            paint: PatternPaint::Surface {
                width,
                height,
                pixels: Arc::new(pixels),
            },
            matrix: Affine::IDENTITY,
        })
    }

    pub(crate) fn linear(p0: Point, p1: Point) -> Self {
        Self {
            paint: PatternPaint::Linear {
                p0,
                p1,
                stops: Vec::new(),
            },
            matrix: Affine::IDENTITY,
        }
    }

    pub(crate) fn kind(&self) -> PatternKind {
        match self.paint {
            PatternPaint::Surface { .. } => PatternKind::Surface,
            PatternPaint::Linear { .. } => PatternKind::Linear,
        }
    }

    /// Add a stop after any existing stop at the same offset.
    pub(crate) fn add_color_stop(&mut self, offset: f64, rgba: [f64; 4]) -> Result<(), Status> {
        let PatternPaint::Linear { stops, .. } = &mut self.paint else {
            return Err(Status::PatternTypeMismatch);
        };
        let offset = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, 1.0)
        };
        let rgba = rgba.map(|c| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) });
        let at = stops.partition_point(|s| s.offset <= offset);
        stops.insert(at, ColorStop { offset, rgba });
        Ok(())
    }

    pub(crate) fn transform(&mut self, m: Affine) -> Result<(), Status> {
        let next = self.matrix * m;
        let det = next.determinant();
        if !det.is_finite() || det == 0.0 {
            return Err(Status::InvalidMatrix);
        }
        self.matrix = next;
        Ok(())
    }

    /// Lock the pattern to `ctm`, the user space in effect when it becomes the source.
    pub(crate) fn sampler(&self, ctm: Affine) -> Sampler {
        let device_to_pattern = self.matrix * ctm.inverse();
        let shade = match &self.paint {
            PatternPaint::Surface {
                width,
                height,
                pixels,
            } => Shade::Surface {
                width: *width,
                height: *height,
                pixels: pixels.clone(),
            },
            PatternPaint::Linear { p0, p1, stops } => Shade::Linear {
                p0: *p0,
                dir: *p1 - *p0,
                lut: gradient_lut(stops),
            },
        };
        Sampler {
            device_to_pattern,
            shade,
        }
    }
}

const LUT_SIZE: usize = 256;

/// A pattern locked to device space, ready to be sampled per pixel.
#[derive(Clone, Debug)]
pub(crate) struct Sampler {
    device_to_pattern: Affine,
    shade: Shade,
}

#[derive(Clone, Debug)]
enum Shade {
    Surface {
        width: u32,
        height: u32,
        pixels: Arc<Vec<u8>>,
    },
    Linear {
        p0: Point,
        dir: kurbo::Vec2,
        lut: Vec<PremulRgba8>,
    },
}

impl Sampler {
    /// Color at the center of device pixel `(x, y)`.
    pub(crate) fn sample(&self, x: u32, y: u32) -> PremulRgba8 {
        let p = self.device_to_pattern * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        match &self.shade {
            Shade::Surface {
                width,
                height,
                pixels,
            } => {
                let (sx, sy) = (p.x.floor(), p.y.floor());
                if sx < 0.0 || sy < 0.0 || sx >= f64::from(*width) || sy >= f64::from(*height) {
                    return [0; 4];
                }
                let i = (sy as usize * *width as usize + sx as usize) * 4;
                [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
            }
            Shade::Linear { p0, dir, lut } => {
                if lut.is_empty() {
                    return [0; 4];
                }
                let len2 = dir.hypot2();
                let t = if len2 > 0.0 {
                    (p - *p0).dot(*dir) / len2
                } else {
                    1.0
                };
                let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
                lut[(t * (LUT_SIZE - 1) as f64).round() as usize]
            }
        }
    }
}

fn gradient_lut(stops: &[ColorStop]) -> Vec<PremulRgba8> {
    if stops.is_empty() {
        return Vec::new();
    }
    (0..LUT_SIZE)
        .map(|i| {
            let t = i as f64 / (LUT_SIZE - 1) as f64;
            premul(color_at(stops, t))
        })
        .collect()
}

fn color_at(stops: &[ColorStop], t: f64) -> [f64; 4] {
    let first = stops[0];
    let last = stops[stops.len() - 1];
    if t <= first.offset {
        return first.rgba;
    }
    if t >= last.offset {
        return last.rgba;
    }
    let hi = stops.partition_point(|s| s.offset <= t);
    let (a, b) = (stops[hi - 1], stops[hi]);
    let span = b.offset - a.offset;
    let u = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
    [0, 1, 2, 3].map(|c| a.rgba[c] + (b.rgba[c] - a.rgba[c]) * u)
}

pub(crate) fn premul(rgba: [f64; 4]) -> PremulRgba8 {
    let a = rgba[3];
    [
        unit_to_u8(rgba[0] * a),
        unit_to_u8(rgba[1] * a),
        unit_to_u8(rgba[2] * a),
        unit_to_u8(a),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/pattern.rs"]
mod tests;
