//! Font lookup, shaping and glyph outlines for the CPU backend.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use kurbo::{BezPath, Point, Vec2};

use crate::backend::{FontExtents, FontSlant, FontWeight, TextExtents};

/// Raw font file bytes plus the face index inside a collection.
#[derive(Clone, Debug)]
pub(crate) struct FontFace {
    data: Arc<Vec<u8>>,
    index: u32,
}

/// Where fonts are discovered.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FontSources {
    pub(crate) dirs: Vec<PathBuf>,
    pub(crate) system: bool,
}

type DatabaseCache = Mutex<HashMap<FontSources, Arc<fontdb::Database>>>;

/// Font databases are built once per distinct source set and shared by every call.
pub(crate) fn database(sources: &FontSources) -> Arc<fontdb::Database> {
    static CACHE: OnceLock<DatabaseCache> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = match cache.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    cache
        .entry(sources.clone())
        .or_insert_with(|| {
            let mut db = fontdb::Database::new();
            if sources.system {
                db.load_system_fonts();
            }
            for dir in &sources.dirs {
                db.load_fonts_dir(dir);
            }
            tracing::debug!(faces = db.len(), "font database loaded");
            Arc::new(db)
        })
        .clone()
}

/// Best face for the selection, falling back to any sans-serif face.
pub(crate) fn resolve_face(
    db: &fontdb::Database,
    family: &str,
    slant: FontSlant,
    weight: FontWeight,
) -> Option<FontFace> {
    let weight = match weight {
        FontWeight::Normal => fontdb::Weight::NORMAL,
        FontWeight::Bold => fontdb::Weight::BOLD,
    };
    let style = match slant {
        FontSlant::Normal => fontdb::Style::Normal,
        FontSlant::Italic => fontdb::Style::Italic,
        FontSlant::Oblique => fontdb::Style::Oblique,
    };
    let families = [fontdb::Family::Name(family), fontdb::Family::SansSerif];
    let query = |families: &[fontdb::Family<'_>]| {
        db.query(&fontdb::Query {
            families,
            weight,
            stretch: fontdb::Stretch::Normal,
            style,
        })
    };
    let id = query(&families)
        .or_else(|| query(&families[1..]))
        .or_else(|| db.faces().next().map(|f| f.id))?;

    let info = db.face(id)?;
    let data = match &info.source {
        fontdb::Source::Binary(data) => data.as_ref().as_ref().to_vec(),
        fontdb::Source::File(path) => std::fs::read(path).ok()?,
        fontdb::Source::SharedFile(_, data) => data.as_ref().as_ref().to_vec(),
    };
    Some(FontFace {
        data: Arc::new(data),
        index: info.index,
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PlacedGlyph {
    pub(crate) id: u16,
    /// Glyph origin relative to the run origin, user units, y down.
    pub(crate) offset: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ShapedRun {
    pub(crate) glyphs: Vec<PlacedGlyph>,
    pub(crate) advance: Vec2,
}

impl FontFace {
    fn parse(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }

    fn scale(face: &ttf_parser::Face<'_>, size: f64) -> f64 {
        size / f64::from(face.units_per_em().max(1))
    }

    pub(crate) fn shape(&self, text: &str, size: f64) -> Option<ShapedRun> {
        let face = rustybuzz::Face::from_slice(&self.data, self.index)?;
        let scale = size / f64::from(face.units_per_em().max(1));

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let shaped = rustybuzz::shape(&face, &[], buffer);

        let mut pen = Vec2::ZERO;
        let mut glyphs = Vec::with_capacity(shaped.len());
        for (info, pos) in shaped.glyph_infos().iter().zip(shaped.glyph_positions()) {
            glyphs.push(PlacedGlyph {
                id: info.glyph_id as u16,
                offset: pen
                    + Vec2::new(
                        f64::from(pos.x_offset) * scale,
                        -f64::from(pos.y_offset) * scale,
                    ),
            });
            pen += Vec2::new(
                f64::from(pos.x_advance) * scale,
                -f64::from(pos.y_advance) * scale,
            );
        }
        Some(ShapedRun {
            glyphs,
            advance: pen,
        })
    }

    pub(crate) fn text_extents(&self, text: &str, size: f64) -> Option<TextExtents> {
        if text.is_empty() {
            return Some(TextExtents::default());
        }
        let run = self.shape(text, size)?;
        let face = self.parse()?;
        let scale = Self::scale(&face, size);

        let mut ink: Option<kurbo::Rect> = None;
        for g in &run.glyphs {
            let Some(b) = face.glyph_bounding_box(ttf_parser::GlyphId(g.id)) else {
                continue;
            };
            let r = kurbo::Rect::new(
                f64::from(b.x_min) * scale,
                -f64::from(b.y_max) * scale,
                f64::from(b.x_max) * scale,
                -f64::from(b.y_min) * scale,
            ) + g.offset;
            ink = Some(ink.map_or(r, |acc| acc.union(r)));
        }
        let ink = ink.unwrap_or(kurbo::Rect::ZERO);
        Some(TextExtents {
            x_bearing: ink.x0,
            y_bearing: ink.y0,
            width: ink.width(),
            height: ink.height(),
            x_advance: run.advance.x,
            y_advance: run.advance.y,
        })
    }

    pub(crate) fn font_extents(&self, size: f64) -> Option<FontExtents> {
        let face = self.parse()?;
        let scale = Self::scale(&face, size);
        let ascent = f64::from(face.ascender()) * scale;
        let descent = -f64::from(face.descender()) * scale;
        let gap = f64::from(face.line_gap()) * scale;
        let max_advance = (0..face.number_of_glyphs())
            .filter_map(|id| face.glyph_hor_advance(ttf_parser::GlyphId(id)))
            .max()
            .unwrap_or(0);
        Some(FontExtents {
            ascent,
            descent,
            height: ascent + descent + gap,
            max_x_advance: f64::from(max_advance) * scale,
            max_y_advance: 0.0,
        })
    }

    /// Outlines of a shaped run with its origin at `origin`, in user space.
    pub(crate) fn outline(&self, run: &ShapedRun, origin: Point, size: f64) -> BezPath {
        let mut path = BezPath::new();
        let Some(face) = self.parse() else {
            return path;
        };
        let scale = Self::scale(&face, size);
        for g in &run.glyphs {
            let mut builder = OutlineSink {
                path: &mut path,
                origin: origin + g.offset,
                scale,
            };
            face.outline_glyph(ttf_parser::GlyphId(g.id), &mut builder);
        }
        path
    }
}

/// Collects glyph outlines into a path, flipping font units to y-down user space.
struct OutlineSink<'a> {
    path: &'a mut BezPath,
    origin: Point,
    scale: f64,
}

impl OutlineSink<'_> {
    fn pt(&self, x: f32, y: f32) -> Point {
        Point::new(
            self.origin.x + f64::from(x) * self.scale,
            self.origin.y - f64::from(y) * self.scale,
        )
    }
}

impl ttf_parser::OutlineBuilder for OutlineSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (p1, p) = (self.pt(x1, y1), self.pt(x, y));
        self.path.quad_to(p1, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (p1, p2, p) = (self.pt(x1, y1), self.pt(x2, y2), self.pt(x, y));
        self.path.curve_to(p1, p2, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
