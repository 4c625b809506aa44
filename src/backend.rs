//! The capability contract between the execution engine and a 2-D rendering context.
//!
//! A [`Backend`] is bound to one pixel buffer for the duration of a call. Drawing primitives
//! never return errors directly: like a cairo context, a backend records the first failure in
//! a sticky [`Status`] that the engine checks after every operation. Resource-producing calls
//! hand out owned handles which are released through the [`Resources`] destructor table.

use crate::foundation::core::{Affine, ImageDescriptor, PixelFormat};

/// Backend failure codes. Numeric codes follow cairo's status numbering where an equivalent
/// exists.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    #[error("out of memory")]
    NoMemory,
    #[error("no current point")]
    NoCurrentPoint,
    #[error("invalid matrix (not invertible)")]
    InvalidMatrix,
    #[error("input string not valid UTF-8")]
    InvalidString,
    #[error("invalid path data")]
    InvalidPathData,
    #[error("the pattern type is not appropriate for the operation")]
    PatternTypeMismatch,
    #[error("invalid value for an input pixel format")]
    InvalidFormat,
    #[error("invalid value for stride")]
    InvalidStride,
    #[error("invalid size")]
    InvalidSize,
    #[error("no font face available for the selected family")]
    FontUnavailable,
}

impl Status {
    pub fn code(self) -> i32 {
        match self {
            Status::NoMemory => 1,
            Status::NoCurrentPoint => 4,
            Status::InvalidMatrix => 5,
            Status::InvalidString => 8,
            Status::InvalidPathData => 9,
            Status::PatternTypeMismatch => 14,
            Status::InvalidFormat => 16,
            Status::InvalidStride => 24,
            Status::InvalidSize => 32,
            Status::FontUnavailable => 40,
        }
    }
}

/// Antialiasing modes accepted by `set_antialias`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Antialias {
    #[default]
    Default,
    None,
    Gray,
    Subpixel,
    Fast,
    Good,
    Best,
}

impl Antialias {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "default" => Self::Default,
            "none" => Self::None,
            "gray" => Self::Gray,
            "subpixel" => Self::Subpixel,
            "fast" => Self::Fast,
            "good" => Self::Good,
            "best" => Self::Best,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontSlant {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "normal" => Self::Normal,
            "italic" => Self::Italic,
            "oblique" => Self::Oblique,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "normal" => Self::Normal,
            "bold" => Self::Bold,
            _ => return None,
        })
    }
}

/// Pattern subtype, reported when a pattern tag is serialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Solid,
    Surface,
    Linear,
}

/// Ink box and advance of a run of text, in user space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextExtents {
    pub x_bearing: f64,
    pub y_bearing: f64,
    pub width: f64,
    pub height: f64,
    pub x_advance: f64,
    pub y_advance: f64,
}

impl TextExtents {
    pub const FIELDS: [&'static str; 6] = [
        "x_bearing",
        "y_bearing",
        "width",
        "height",
        "x_advance",
        "y_advance",
    ];

    pub fn field(&self, name: &str) -> Option<f64> {
        Some(match name {
            "x_bearing" => self.x_bearing,
            "y_bearing" => self.y_bearing,
            "width" => self.width,
            "height" => self.height,
            "x_advance" => self.x_advance,
            "y_advance" => self.y_advance,
            _ => return None,
        })
    }
}

/// Vertical metrics of the selected font at the current size.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontExtents {
    pub ascent: f64,
    pub descent: f64,
    pub height: f64,
    pub max_x_advance: f64,
    pub max_y_advance: f64,
}

impl FontExtents {
    pub const FIELDS: [&'static str; 5] = [
        "ascent",
        "descent",
        "height",
        "max_x_advance",
        "max_y_advance",
    ];

    pub fn field(&self, name: &str) -> Option<f64> {
        Some(match name {
            "ascent" => self.ascent,
            "descent" => self.descent,
            "height" => self.height,
            "max_x_advance" => self.max_x_advance,
            "max_y_advance" => self.max_y_advance,
            _ => return None,
        })
    }
}

/// Destructor table for the owned handles a backend hands out.
///
/// Every handle is released exactly once, either by the tag store when a call finishes or
/// immediately when it cannot be stored.
pub trait Resources {
    type Pattern;
    type Path;

    fn release_pattern(pattern: Self::Pattern);
    fn release_path(path: Self::Path);
    fn pattern_kind(pattern: &Self::Pattern) -> PatternKind;
    fn path_segments(path: &Self::Path) -> usize;
}

/// A 2-D drawing context bound to one pixel buffer.
///
/// All coordinates are in user space, mapped to device space by the current transformation
/// matrix. Angles are radians.
pub trait Backend: Resources + Sized {
    type Opts: Default + Clone;

    /// Bind a context to `data`, which holds `height` rows of
    /// `format.stride_for_width(width)` bytes.
    fn create(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
        opts: &Self::Opts,
    ) -> Result<Self, Status>;

    /// First failure recorded by this context, if any.
    fn status(&self) -> Result<(), Status>;

    /// Flush pending drawing and give the buffer back.
    fn finish(self) -> Vec<u8>;

    fn move_to(&mut self, x: f64, y: f64);
    fn rel_move_to(&mut self, dx: f64, dy: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rel_line_to(&mut self, dx: f64, dy: f64);
    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);
    fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);
    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn new_path(&mut self);
    fn new_sub_path(&mut self);
    fn close_path(&mut self);

    fn set_source_rgba(&mut self, r: f64, g: f64, b: f64, a: f64);
    fn set_source(&mut self, pattern: &Self::Pattern);
    fn set_line_width(&mut self, width: f64);
    fn set_antialias(&mut self, antialias: Antialias);

    fn fill(&mut self, preserve: bool);
    fn stroke(&mut self, preserve: bool);
    fn clip(&mut self, preserve: bool);
    fn reset_clip(&mut self);
    fn paint(&mut self, alpha: Option<f64>);

    fn identity_matrix(&mut self);
    fn translate(&mut self, tx: f64, ty: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn rotate(&mut self, angle: f64);

    fn select_font_face(&mut self, family: &str, slant: FontSlant, weight: FontWeight);
    fn set_font_size(&mut self, size: f64);
    fn show_text(&mut self, text: &str);
    fn text_extents(&mut self, text: &str) -> TextExtents;
    fn font_extents(&mut self) -> FontExtents;

    /// A pattern sampling `image`, whose data is already padded to its stride.
    fn create_surface_pattern(&mut self, image: &ImageDescriptor)
    -> Result<Self::Pattern, Status>;
    fn create_linear_pattern(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Self::Pattern;
    fn pattern_add_color_stop(
        &mut self,
        pattern: &mut Self::Pattern,
        offset: f64,
        r: f64,
        g: f64,
        b: f64,
        a: f64,
    ) -> Result<(), Status>;
    /// Compose `m` into the pattern's user-to-pattern matrix; `m` applies first.
    fn pattern_transform(&mut self, pattern: &mut Self::Pattern, m: Affine)
    -> Result<(), Status>;

    /// Snapshot of the current path in user space.
    fn copy_path(&mut self) -> Self::Path;
    fn append_path(&mut self, path: &Self::Path);
}

#[cfg(test)]
#[path = "../tests/unit/backend.rs"]
mod tests;
