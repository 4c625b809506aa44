use std::path::PathBuf;

use kurbo::{Affine, BezPath, Cap, Join, PathEl, Point, Stroke, StrokeOpts, Vec2};

use crate::backend::{
    Antialias, Backend, FontExtents, FontSlant, FontWeight, PatternKind, Resources, Status,
    TextExtents,
};
use crate::composite_cpu::{intersect_in_place, over_masked_in_place};
use crate::foundation::core::{ImageDescriptor, MAX_DIMENSION, PixelFormat};
use crate::foundation::settings::env_parse;
use crate::pixel::{PremulRgba8, pack_changed, unpack_canvas};
use crate::render::pattern::{CpuPattern, Sampler, premul};
use crate::render::text::{self, FontFace, FontSources};

const DEFAULT_LINE_WIDTH: f64 = 2.0;
const DEFAULT_FONT_SIZE: f64 = 10.0;
const DEFAULT_FONT_FAMILY: &str = "sans-serif";
const MITER_LIMIT: f64 = 10.0;
/// Arcs longer than this many turns are folded back, keeping the parity of the winding.
const MAX_ARC_TURNS: f64 = 2.0;
const ARC_MIN_RELATIVE_TOLERANCE: f64 = 1e-14;

#[derive(Clone, Debug, PartialEq)]
pub struct CpuBackendOpts {
    /// Curve flattening tolerance in user units.
    pub tolerance: f64,
    /// Extra directories scanned for fonts.
    pub font_dirs: Vec<PathBuf>,
    pub load_system_fonts: bool,
}

impl Default for CpuBackendOpts {
    fn default() -> Self {
        Self {
            tolerance: 0.1,
            font_dirs: Vec::new(),
            load_system_fonts: true,
        }
    }
}

impl CpuBackendOpts {
    /// Defaults overridden by `TAGDRAW_TOLERANCE`, `TAGDRAW_FONT_DIR` and
    /// `TAGDRAW_SYSTEM_FONTS`.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(t) = env_parse::<f64>("TAGDRAW_TOLERANCE").filter(|t| t.is_finite() && *t > 0.0)
        {
            opts.tolerance = t;
        }
        if let Some(dir) = std::env::var_os("TAGDRAW_FONT_DIR").filter(|d| !d.is_empty()) {
            opts.font_dirs.push(PathBuf::from(dir));
        }
        if let Ok(v) = std::env::var("TAGDRAW_SYSTEM_FONTS") {
            opts.load_system_fonts = !matches!(v.trim(), "0" | "false" | "off");
        }
        opts
    }

    fn font_sources(&self) -> FontSources {
        FontSources {
            dirs: self.font_dirs.clone(),
            system: self.load_system_fonts,
        }
    }
}

/// A path snapshot in user space.
#[derive(Clone, Debug, PartialEq)]
pub struct CpuPath {
    elements: Vec<PathEl>,
}

impl CpuPath {
    pub fn elements(&self) -> &[PathEl] {
        &self.elements
    }
}

#[derive(Clone, Debug)]
enum Source {
    Solid(PremulRgba8),
    Pattern(Sampler),
}

#[derive(Clone, Debug)]
struct GraphicsState {
    ctm: Affine,
    source: Source,
    line_width: f64,
    antialias: Antialias,
    /// Clip coverage, one byte per pixel. `None` means unclipped.
    clip: Option<Vec<u8>>,
    font_size: f64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Affine::IDENTITY,
            source: Source::Solid([0, 0, 0, 255]),
            line_width: DEFAULT_LINE_WIDTH,
            antialias: Antialias::Default,
            clip: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// The current path in device space, with cairo's current-point rules.
#[derive(Clone, Debug, Default)]
struct DevicePath {
    path: BezPath,
    current: Option<Point>,
    start: Point,
    /// The last element closed a subpath; the next segment starts a new one at `start`.
    reopen: bool,
}

impl DevicePath {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
        self.current = Some(p);
        self.start = p;
        self.reopen = false;
    }

    /// Make sure a subpath is open before adding a segment. Returns `false` when there is no
    /// current point, after moving to `fallback`.
    fn begin_segment(&mut self, fallback: Point) -> bool {
        match self.current {
            None => {
                self.move_to(fallback);
                false
            }
            Some(_) if self.reopen => {
                let start = self.start;
                self.path.move_to(start);
                self.reopen = false;
                true
            }
            Some(_) => true,
        }
    }

    fn line_to(&mut self, p: Point) {
        if self.begin_segment(p) {
            self.path.line_to(p);
            self.current = Some(p);
        }
    }

    fn quad_to(&mut self, p1: Point, p: Point) {
        self.begin_segment(p1);
        self.path.quad_to(p1, p);
        self.current = Some(p);
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p: Point) {
        self.begin_segment(p1);
        self.path.curve_to(p1, p2, p);
        self.current = Some(p);
    }

    fn close(&mut self) {
        if self.current.is_none() || self.reopen {
            return;
        }
        self.path.close_path();
        self.current = Some(self.start);
        self.reopen = true;
    }
}

/// Lazily resolved font for the current selection.
#[derive(Clone, Debug)]
struct FontSelection {
    family: String,
    slant: FontSlant,
    weight: FontWeight,
    face: Option<Option<FontFace>>,
}

impl Default for FontSelection {
    fn default() -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            slant: FontSlant::Normal,
            weight: FontWeight::Normal,
            face: None,
        }
    }
}

/// Raster backend drawing into a premultiplied RGBA8 canvas unpacked from the bound buffer.
///
/// Path coverage comes from `vello_cpu`; clipping, sources and compositing are applied per
/// pixel on top of it. [`Backend::finish`] packs back only the pixels that changed.
pub struct CpuBackend {
    width: u32,
    height: u32,
    format: PixelFormat,
    stride: usize,
    data: Vec<u8>,
    before: Vec<u8>,
    canvas: Vec<u8>,
    opts: CpuBackendOpts,
    status: Option<Status>,
    gs: GraphicsState,
    path: DevicePath,
    font: FontSelection,
}

impl Resources for CpuBackend {
    type Pattern = CpuPattern;
    type Path = CpuPath;

    fn release_pattern(pattern: CpuPattern) {
        tracing::trace!(kind = ?pattern.kind(), "release pattern");
        drop(pattern);
    }

    fn release_path(path: CpuPath) {
        tracing::trace!(segments = path.elements.len(), "release path");
        drop(path);
    }

    fn pattern_kind(pattern: &CpuPattern) -> PatternKind {
        pattern.kind()
    }

    fn path_segments(path: &CpuPath) -> usize {
        path.elements.len()
    }
}

impl CpuBackend {
    fn fail(&mut self, status: Status) {
        if self.status.is_none() {
            tracing::debug!(%status, "backend status set");
            self.status = Some(status);
        }
    }

    fn failed(&self) -> bool {
        self.status.is_some()
    }

    fn user_to_device(&self, x: f64, y: f64) -> Option<Point> {
        let p = self.gs.ctm * Point::new(x, y);
        (p.x.is_finite() && p.y.is_finite()).then_some(p)
    }

    fn distance_to_device(&self, dx: f64, dy: f64) -> Vec2 {
        let m = self.gs.ctm.as_coeffs();
        Vec2::new(m[0] * dx + m[2] * dy, m[1] * dx + m[3] * dy)
    }

    fn device_point(&mut self, x: f64, y: f64) -> Option<Point> {
        let p = self.user_to_device(x, y);
        if p.is_none() {
            self.fail(Status::InvalidPathData);
        }
        p
    }

    fn relative_point(&mut self, dx: f64, dy: f64) -> Option<Point> {
        let Some(current) = self.path.current else {
            self.fail(Status::NoCurrentPoint);
            return None;
        };
        let p = current + self.distance_to_device(dx, dy);
        if !(p.x.is_finite() && p.y.is_finite()) {
            self.fail(Status::InvalidPathData);
            return None;
        }
        Some(p)
    }

    fn set_ctm(&mut self, ctm: Affine) {
        let det = ctm.determinant();
        if !det.is_finite() || det == 0.0 || !ctm.as_coeffs().iter().all(|c| c.is_finite()) {
            self.fail(Status::InvalidMatrix);
            return;
        }
        self.gs.ctm = ctm;
    }

    fn arc_impl(&mut self, xc: f64, yc: f64, radius: f64, a1: f64, a2: f64, negative: bool) {
        if self.failed() {
            return;
        }
        if ![xc, yc, radius, a1, a2].iter().all(|v| v.is_finite()) {
            self.fail(Status::InvalidPathData);
            return;
        }
        if radius <= 0.0 {
            if let Some(p) = self.device_point(xc, yc) {
                self.path.line_to(p);
            }
            return;
        }

        let Some(sweep) = arc_sweep(a1, a2, negative) else {
            self.fail(Status::InvalidPathData);
            return;
        };

        let start = Point::new(xc + radius * a1.cos(), yc + radius * a1.sin());
        let Some(device_start) = self.device_point(start.x, start.y) else {
            return;
        };
        self.path.line_to(device_start);

        // kurbo subdivides by (radius / tolerance)^(1/6); keep that near 200 per turn.
        let tolerance = self.opts.tolerance.max(radius * ARC_MIN_RELATIVE_TOLERANCE);
        let arc = kurbo::Arc::new((xc, yc), (radius, radius), a1, sweep, 0.0);
        let ctm = self.gs.ctm;
        for el in arc.append_iter(tolerance) {
            match el {
                PathEl::CurveTo(p1, p2, p3) => self.path.curve_to(ctm * p1, ctm * p2, ctm * p3),
                PathEl::QuadTo(p1, p2) => self.path.quad_to(ctm * p1, ctm * p2),
                PathEl::LineTo(p) => self.path.line_to(ctm * p),
                PathEl::MoveTo(_) | PathEl::ClosePath => {}
            }
        }
    }

    /// Replay `elements`, mapped through `m`, onto the current path.
    fn extend_path(&mut self, elements: &[PathEl], m: Affine) {
        for &el in elements {
            match el {
                PathEl::MoveTo(p) => self.path.move_to(m * p),
                PathEl::LineTo(p) => self.path.line_to(m * p),
                PathEl::QuadTo(p1, p2) => self.path.quad_to(m * p1, m * p2),
                PathEl::CurveTo(p1, p2, p3) => self.path.curve_to(m * p1, m * p2, m * p3),
                PathEl::ClosePath => self.path.close(),
            }
        }
    }

    /// Coverage of a device-space path, one byte per pixel.
    fn coverage(&self, path: &BezPath) -> Vec<u8> {
        let (Ok(w), Ok(h)) = (u16::try_from(self.width), u16::try_from(self.height)) else {
            return vec![0; self.pixel_count()];
        };
        if w == 0 || h == 0 {
            return Vec::new();
        }

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(&bezpath_to_cpu(path));
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        let mut mask: Vec<u8> = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();
        if self.gs.antialias == Antialias::None {
            for c in &mut mask {
                *c = if *c >= 128 { 255 } else { 0 };
            }
        }
        mask
    }

    fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Composite the current source through `mask` and the clip.
    fn paint_mask(&mut self, mut mask: Vec<u8>, opacity: f32) {
        if let Some(clip) = &self.gs.clip
            && intersect_in_place(&mut mask, clip).is_err()
        {
            self.fail(Status::InvalidSize);
            return;
        }
        let result = match &self.gs.source {
            Source::Solid(color) => {
                let color = *color;
                over_masked_in_place(&mut self.canvas, self.width, &mask, opacity, |_, _| color)
            }
            Source::Pattern(sampler) => {
                over_masked_in_place(&mut self.canvas, self.width, &mask, opacity, |x, y| {
                    sampler.sample(x, y)
                })
            }
        };
        if result.is_err() {
            self.fail(Status::InvalidSize);
        }
    }

    fn stroke_outline(&self) -> BezPath {
        if self.gs.line_width <= 0.0 {
            return BezPath::new();
        }
        let mut user = self.path.path.clone();
        user.apply_affine(self.gs.ctm.inverse());
        let style = Stroke::new(self.gs.line_width)
            .with_caps(Cap::Butt)
            .with_join(Join::Miter)
            .with_miter_limit(MITER_LIMIT);
        let mut outline = kurbo::stroke(
            user.iter(),
            &style,
            &StrokeOpts::default(),
            self.opts.tolerance,
        );
        outline.apply_affine(self.gs.ctm);
        outline
    }

    fn face(&mut self) -> Option<FontFace> {
        if self.font.face.is_none() {
            let db = text::database(&self.opts.font_sources());
            let face =
                text::resolve_face(&db, &self.font.family, self.font.slant, self.font.weight);
            if face.is_none() {
                tracing::warn!(family = %self.font.family, "no font face available");
            }
            self.font.face = Some(face);
        }
        let face = self.font.face.clone().flatten();
        if face.is_none() {
            self.fail(Status::FontUnavailable);
        }
        face
    }

    /// Current point in user space, or the origin when there is none.
    fn user_origin(&self) -> Point {
        self.path
            .current
            .map_or(Point::ORIGIN, |p| self.gs.ctm.inverse() * p)
    }
}

impl Backend for CpuBackend {
    type Opts = CpuBackendOpts;

    fn create(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
        opts: &CpuBackendOpts,
    ) -> Result<Self, Status> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Status::InvalidSize);
        }
        let stride = format.stride_for_width(width);
        if data.len() != stride * height as usize {
            return Err(Status::InvalidStride);
        }
        let canvas = unpack_canvas(format, &data, width, height, stride);
        tracing::debug!(width, height, format = format.name(), "cpu backend bound");
        Ok(Self {
            width,
            height,
            format,
            stride,
            data,
            before: canvas.clone(),
            canvas,
            opts: opts.clone(),
            status: None,
            gs: GraphicsState::default(),
            path: DevicePath::default(),
            font: FontSelection::default(),
        })
    }

    fn status(&self) -> Result<(), Status> {
        match self.status {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    fn finish(mut self) -> Vec<u8> {
        let written = pack_changed(
            self.format,
            &mut self.data,
            self.stride,
            self.width,
            &self.before,
            &self.canvas,
        );
        tracing::debug!(written, "cpu backend finished");
        self.data
    }

    fn move_to(&mut self, x: f64, y: f64) {
        if self.failed() {
            return;
        }
        if let Some(p) = self.device_point(x, y) {
            self.path.move_to(p);
        }
    }

    fn rel_move_to(&mut self, dx: f64, dy: f64) {
        if self.failed() {
            return;
        }
        if let Some(p) = self.relative_point(dx, dy) {
            self.path.move_to(p);
        }
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.failed() {
            return;
        }
        if let Some(p) = self.device_point(x, y) {
            self.path.line_to(p);
        }
    }

    fn rel_line_to(&mut self, dx: f64, dy: f64) {
        if self.failed() {
            return;
        }
        if let Some(p) = self.relative_point(dx, dy) {
            self.path.line_to(p);
        }
    }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.arc_impl(xc, yc, radius, angle1, angle2, false);
    }

    fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.arc_impl(xc, yc, radius, angle1, angle2, true);
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if self.failed() {
            return;
        }
        self.move_to(x, y);
        self.rel_line_to(width, 0.0);
        self.rel_line_to(0.0, height);
        self.rel_line_to(-width, 0.0);
        self.close_path();
    }

    fn new_path(&mut self) {
        if !self.failed() {
            self.path.clear();
        }
    }

    fn new_sub_path(&mut self) {
        if !self.failed() {
            self.path.current = None;
            self.path.reopen = false;
        }
    }

    fn close_path(&mut self) {
        if !self.failed() {
            self.path.close();
        }
    }

    fn set_source_rgba(&mut self, r: f64, g: f64, b: f64, a: f64) {
        if !self.failed() {
            self.gs.source = Source::Solid(premul([r, g, b, a]));
        }
    }

    fn set_source(&mut self, pattern: &CpuPattern) {
        if !self.failed() {
            self.gs.source = Source::Pattern(pattern.sampler(self.gs.ctm));
        }
    }

    fn set_line_width(&mut self, width: f64) {
        if !self.failed() {
            self.gs.line_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        }
    }

    fn set_antialias(&mut self, antialias: Antialias) {
        if !self.failed() {
            self.gs.antialias = antialias;
        }
    }

    fn fill(&mut self, preserve: bool) {
        if self.failed() {
            return;
        }
        let mask = self.coverage(&self.path.path);
        self.paint_mask(mask, 1.0);
        if !preserve {
            self.path.clear();
        }
    }

    fn stroke(&mut self, preserve: bool) {
        if self.failed() {
            return;
        }
        let outline = self.stroke_outline();
        if !outline.is_empty() {
            let mask = self.coverage(&outline);
            self.paint_mask(mask, 1.0);
        }
        if !preserve {
            self.path.clear();
        }
    }

    fn clip(&mut self, preserve: bool) {
        if self.failed() {
            return;
        }
        let mut mask = self.coverage(&self.path.path);
        if let Some(clip) = &self.gs.clip
            && intersect_in_place(&mut mask, clip).is_err()
        {
            self.fail(Status::InvalidSize);
            return;
        }
        self.gs.clip = Some(mask);
        if !preserve {
            self.path.clear();
        }
    }

    fn reset_clip(&mut self) {
        if !self.failed() {
            self.gs.clip = None;
        }
    }

    fn paint(&mut self, alpha: Option<f64>) {
        if self.failed() {
            return;
        }
        let opacity = match alpha {
            Some(a) if a.is_nan() => 0.0,
            Some(a) => a.clamp(0.0, 1.0) as f32,
            None => 1.0,
        };
        let mask = vec![255u8; self.pixel_count()];
        self.paint_mask(mask, opacity);
    }

    fn identity_matrix(&mut self) {
        if !self.failed() {
            self.gs.ctm = Affine::IDENTITY;
        }
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        if !self.failed() {
            self.set_ctm(self.gs.ctm * Affine::translate((tx, ty)));
        }
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        if !self.failed() {
            self.set_ctm(self.gs.ctm * Affine::scale_non_uniform(sx, sy));
        }
    }

    fn rotate(&mut self, angle: f64) {
        if !self.failed() {
            self.set_ctm(self.gs.ctm * Affine::rotate(angle));
        }
    }

    fn select_font_face(&mut self, family: &str, slant: FontSlant, weight: FontWeight) {
        if !self.failed() {
            self.font = FontSelection {
                family: family.to_string(),
                slant,
                weight,
                face: None,
            };
        }
    }

    fn set_font_size(&mut self, size: f64) {
        if self.failed() {
            return;
        }
        if !size.is_finite() {
            self.fail(Status::InvalidMatrix);
            return;
        }
        self.gs.font_size = size;
    }

    fn show_text(&mut self, text: &str) {
        if self.failed() || text.is_empty() {
            return;
        }
        let Some(face) = self.face() else {
            return;
        };
        let size = self.gs.font_size;
        let Some(run) = face.shape(text, size) else {
            self.fail(Status::FontUnavailable);
            return;
        };
        let origin = self.user_origin();

        let mut glyphs = face.outline(&run, origin, size);
        glyphs.apply_affine(self.gs.ctm);
        if !glyphs.is_empty() {
            let mask = self.coverage(&glyphs);
            self.paint_mask(mask, 1.0);
        }

        let end = origin + run.advance;
        if let Some(p) = self.device_point(end.x, end.y) {
            self.path.move_to(p);
        }
    }

    fn text_extents(&mut self, text: &str) -> TextExtents {
        if self.failed() || text.is_empty() {
            return TextExtents::default();
        }
        let size = self.gs.font_size;
        match self.face().map(|face| face.text_extents(text, size)) {
            Some(Some(extents)) => extents,
            Some(None) => {
                self.fail(Status::FontUnavailable);
                TextExtents::default()
            }
            None => TextExtents::default(),
        }
    }

    fn font_extents(&mut self) -> FontExtents {
        if self.failed() {
            return FontExtents::default();
        }
        let size = self.gs.font_size;
        match self.face().map(|face| face.font_extents(size)) {
            Some(Some(extents)) => extents,
            Some(None) => {
                self.fail(Status::FontUnavailable);
                FontExtents::default()
            }
            None => FontExtents::default(),
        }
    }

    fn create_surface_pattern(&mut self, image: &ImageDescriptor) -> Result<CpuPattern, Status> {
        CpuPattern::surface(image)
    }

    fn create_linear_pattern(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> CpuPattern {
        CpuPattern::linear(Point::new(x0, y0), Point::new(x1, y1))
    }

    fn pattern_add_color_stop(
        &mut self,
        pattern: &mut CpuPattern,
        offset: f64,
        r: f64,
        g: f64,
        b: f64,
        a: f64,
    ) -> Result<(), Status> {
        pattern.add_color_stop(offset, [r, g, b, a])
    }

    fn pattern_transform(&mut self, pattern: &mut CpuPattern, m: Affine) -> Result<(), Status> {
        pattern.transform(m)
    }

    fn copy_path(&mut self) -> CpuPath {
        let inverse = self.gs.ctm.inverse();
        let elements = self
            .path
            .path
            .elements()
            .iter()
            .map(|&el| inverse * el)
            .collect();
        CpuPath { elements }
    }

    fn append_path(&mut self, path: &CpuPath) {
        if !self.failed() {
            let ctm = self.gs.ctm;
            self.extend_path(&path.elements, ctm);
        }
    }
}

/// Signed sweep from `a1` to `a2` in the arc's direction, or `None` if it is not finite.
fn arc_sweep(a1: f64, a2: f64, negative: bool) -> Option<f64> {
    let tau = std::f64::consts::TAU;
    let mut sweep = a2 - a1;
    if !sweep.is_finite() {
        return None;
    }
    if !negative && sweep < 0.0 {
        sweep = sweep.rem_euclid(tau);
    } else if negative && sweep > 0.0 {
        sweep = -(-sweep).rem_euclid(tau);
    }

    let turns = (sweep.abs() / tau).floor();
    if turns > MAX_ARC_TURNS {
        let kept = if turns % 2.0 == 0.0 { 2.0 } else { 1.0 };
        sweep = sweep.signum() * (sweep.abs().rem_euclid(tau) + tau * kept);
    }
    Some(sweep)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
