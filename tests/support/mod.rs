//! A recording backend for engine-level tests.
//!
//! Drawing calls are logged instead of rasterized. Resource creation and release are counted
//! per thread so each test sees only its own handles.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use tagdraw::backend::{FontExtents, TextExtents};
use tagdraw::foundation::core::Affine;
use tagdraw::{
    Antialias, Backend, FontSlant, FontWeight, ImageDescriptor, PatternKind, PixelFormat,
    Resources, Status,
};

thread_local! {
    static CREATED: Cell<usize> = const { Cell::new(0) };
    static RELEASED: Cell<usize> = const { Cell::new(0) };
    static LOG: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Handles created and released on this thread so far.
pub fn counts() -> (usize, usize) {
    (CREATED.with(Cell::get), RELEASED.with(Cell::get))
}

pub fn log() -> Vec<String> {
    LOG.with(|l| l.borrow().clone())
}

fn record(entry: String) {
    LOG.with(|l| l.borrow_mut().push(entry));
}

fn created() {
    CREATED.with(|c| c.set(c.get() + 1));
}

fn released() {
    RELEASED.with(|c| c.set(c.get() + 1));
}

#[derive(Debug)]
pub struct TrackedPattern(pub PatternKind);

#[derive(Debug)]
pub struct TrackedPath(pub usize);

/// Fills the buffer with `0xab` on `paint`; `rel_move_to` always fails with
/// [`Status::NoCurrentPoint`].
pub struct TrackingBackend {
    data: Vec<u8>,
    status: Option<Status>,
    segments: usize,
}

impl Resources for TrackingBackend {
    type Pattern = TrackedPattern;
    type Path = TrackedPath;

    fn release_pattern(_: TrackedPattern) {
        released();
    }

    fn release_path(_: TrackedPath) {
        released();
    }

    fn pattern_kind(pattern: &TrackedPattern) -> PatternKind {
        pattern.0
    }

    fn path_segments(path: &TrackedPath) -> usize {
        path.0
    }
}

impl Backend for TrackingBackend {
    type Opts = ();

    fn create(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
        _: &(),
    ) -> Result<Self, Status> {
        if data.len() != format.stride_for_width(width) * height as usize {
            return Err(Status::InvalidStride);
        }
        record(format!("create {width}x{height} {}", format.name()));
        Ok(Self {
            data,
            status: None,
            segments: 0,
        })
    }

    fn status(&self) -> Result<(), Status> {
        self.status.map_or(Ok(()), Err)
    }

    fn finish(self) -> Vec<u8> {
        record("finish".to_string());
        self.data
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.segments += 1;
        record(format!("move_to {x} {y}"));
    }

    fn rel_move_to(&mut self, _: f64, _: f64) {
        self.status.get_or_insert(Status::NoCurrentPoint);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.segments += 1;
        record(format!("line_to {x} {y}"));
    }

    fn rel_line_to(&mut self, dx: f64, dy: f64) {
        self.segments += 1;
        record(format!("rel_line_to {dx} {dy}"));
    }

    fn arc(&mut self, _: f64, _: f64, _: f64, _: f64, _: f64) {
        self.segments += 1;
    }

    fn arc_negative(&mut self, _: f64, _: f64, _: f64, _: f64, _: f64) {
        self.segments += 1;
    }

    fn rectangle(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.segments += 5;
        record(format!("rectangle {x} {y} {w} {h}"));
    }

    fn new_path(&mut self) {
        self.segments = 0;
    }

    fn new_sub_path(&mut self) {}

    fn close_path(&mut self) {
        self.segments += 1;
    }

    fn set_source_rgba(&mut self, r: f64, g: f64, b: f64, a: f64) {
        record(format!("set_source_rgba {r} {g} {b} {a}"));
    }

    fn set_source(&mut self, pattern: &TrackedPattern) {
        record(format!("set_source {:?}", pattern.0));
    }

    fn set_line_width(&mut self, _: f64) {}

    fn set_antialias(&mut self, _: Antialias) {}

    fn fill(&mut self, preserve: bool) {
        record(format!("fill {preserve}"));
        if !preserve {
            self.segments = 0;
        }
    }

    fn stroke(&mut self, preserve: bool) {
        if !preserve {
            self.segments = 0;
        }
    }

    fn clip(&mut self, preserve: bool) {
        if !preserve {
            self.segments = 0;
        }
    }

    fn reset_clip(&mut self) {}

    fn paint(&mut self, alpha: Option<f64>) {
        record(format!("paint {alpha:?}"));
        self.data.fill(0xab);
    }

    fn identity_matrix(&mut self) {}

    fn translate(&mut self, _: f64, _: f64) {}

    fn scale(&mut self, sx: f64, sy: f64) {
        if sx * sy == 0.0 {
            self.status.get_or_insert(Status::InvalidMatrix);
        }
    }

    fn rotate(&mut self, _: f64) {}

    fn select_font_face(&mut self, family: &str, _: FontSlant, _: FontWeight) {
        record(format!("select_font_face {family}"));
    }

    fn set_font_size(&mut self, _: f64) {}

    fn show_text(&mut self, text: &str) {
        record(format!("show_text {text}"));
    }

    fn text_extents(&mut self, text: &str) -> TextExtents {
        TextExtents {
            width: text.len() as f64,
            x_advance: text.len() as f64,
            ..TextExtents::default()
        }
    }

    fn font_extents(&mut self) -> FontExtents {
        FontExtents {
            ascent: 8.0,
            descent: 2.0,
            height: 10.0,
            ..FontExtents::default()
        }
    }

    fn create_surface_pattern(&mut self, _: &ImageDescriptor) -> Result<TrackedPattern, Status> {
        created();
        Ok(TrackedPattern(PatternKind::Surface))
    }

    fn create_linear_pattern(&mut self, _: f64, _: f64, _: f64, _: f64) -> TrackedPattern {
        created();
        TrackedPattern(PatternKind::Linear)
    }

    fn pattern_add_color_stop(
        &mut self,
        pattern: &mut TrackedPattern,
        _: f64,
        _: f64,
        _: f64,
        _: f64,
        _: f64,
    ) -> Result<(), Status> {
        match pattern.0 {
            PatternKind::Linear => Ok(()),
            _ => Err(Status::PatternTypeMismatch),
        }
    }

    fn pattern_transform(&mut self, _: &mut TrackedPattern, m: Affine) -> Result<(), Status> {
        if m.determinant() == 0.0 {
            return Err(Status::InvalidMatrix);
        }
        Ok(())
    }

    fn copy_path(&mut self) -> TrackedPath {
        created();
        TrackedPath(self.segments)
    }

    fn append_path(&mut self, path: &TrackedPath) {
        self.segments += path.0;
    }
}

pub type TrackingEngine = tagdraw::Engine<TrackingBackend>;
