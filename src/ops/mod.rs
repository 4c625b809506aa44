//! The closed operation vocabulary.

pub(crate) mod args;
pub(crate) mod handlers;

use crate::resolve::{MatchMode, Resolver};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    MoveTo,
    LineTo,
    Arc,
    ArcNegative,
    Rectangle,
    NewPath,
    NewSubPath,
    ClosePath,
    CopyPath,
    AppendPath,

    SetSourceRgba,
    SetSource,
    SetLineWidth,
    SetAntialias,

    Fill,
    Stroke,
    Clip,
    ResetClip,
    Paint,

    IdentityMatrix,
    Translate,
    Scale,
    Rotate,

    PatternCreateForSurface,
    PatternCreateLinear,
    PatternAddColorStopRgba,
    PatternTranslate,
    PatternScale,

    TextExtents,
    FontExtents,
    SelectFontFace,
    SetFontSize,
    ShowText,

    SetTag,
    TagDeref,

    ImageSurfaceCreate,
}

/// Every operation name, in resolution order.
pub const VOCABULARY: &[(&str, OpKind)] = &[
    ("move_to", OpKind::MoveTo),
    ("line_to", OpKind::LineTo),
    ("arc", OpKind::Arc),
    ("arc_negative", OpKind::ArcNegative),
    ("rectangle", OpKind::Rectangle),
    ("new_path", OpKind::NewPath),
    ("new_sub_path", OpKind::NewSubPath),
    ("close_path", OpKind::ClosePath),
    ("copy_path", OpKind::CopyPath),
    ("append_path", OpKind::AppendPath),
    ("set_source_rgba", OpKind::SetSourceRgba),
    ("set_source", OpKind::SetSource),
    ("set_line_width", OpKind::SetLineWidth),
    ("set_antialias", OpKind::SetAntialias),
    ("fill", OpKind::Fill),
    ("stroke", OpKind::Stroke),
    ("clip", OpKind::Clip),
    ("reset_clip", OpKind::ResetClip),
    ("paint", OpKind::Paint),
    ("identity_matrix", OpKind::IdentityMatrix),
    ("translate", OpKind::Translate),
    ("scale", OpKind::Scale),
    ("rotate", OpKind::Rotate),
    ("pattern_create_for_surface", OpKind::PatternCreateForSurface),
    ("pattern_create_linear", OpKind::PatternCreateLinear),
    ("pattern_add_color_stop_rgba", OpKind::PatternAddColorStopRgba),
    ("pattern_translate", OpKind::PatternTranslate),
    ("pattern_scale", OpKind::PatternScale),
    ("text_extents", OpKind::TextExtents),
    ("font_extents", OpKind::FontExtents),
    ("select_font_face", OpKind::SelectFontFace),
    ("set_font_size", OpKind::SetFontSize),
    ("show_text", OpKind::ShowText),
    ("set_tag", OpKind::SetTag),
    ("tag_deref", OpKind::TagDeref),
    ("image_surface_create", OpKind::ImageSurfaceCreate),
];

impl OpKind {
    pub fn name(self) -> &'static str {
        VOCABULARY
            .iter()
            .find(|(_, k)| *k == self)
            .map(|(n, _)| *n)
            .unwrap_or("?")
    }

    /// Exact number of positional arguments.
    pub fn arity(self) -> usize {
        match self {
            OpKind::NewPath
            | OpKind::NewSubPath
            | OpKind::ClosePath
            | OpKind::ResetClip
            | OpKind::IdentityMatrix => 0,

            OpKind::CopyPath
            | OpKind::AppendPath
            | OpKind::SetSource
            | OpKind::SetLineWidth
            | OpKind::SetAntialias
            | OpKind::Fill
            | OpKind::Stroke
            | OpKind::Clip
            | OpKind::Paint
            | OpKind::Rotate
            | OpKind::FontExtents
            | OpKind::SetFontSize
            | OpKind::ShowText => 1,

            OpKind::Translate
            | OpKind::Scale
            | OpKind::PatternCreateForSurface
            | OpKind::TextExtents
            | OpKind::SetTag => 2,

            OpKind::MoveTo
            | OpKind::LineTo
            | OpKind::PatternTranslate
            | OpKind::PatternScale
            | OpKind::SelectFontFace
            | OpKind::TagDeref
            | OpKind::ImageSurfaceCreate => 3,

            OpKind::Rectangle | OpKind::SetSourceRgba => 4,

            OpKind::Arc | OpKind::ArcNegative | OpKind::PatternCreateLinear => 5,

            OpKind::PatternAddColorStopRgba => 6,
        }
    }

    /// Whether the op draws on, or queries, a live surface.
    pub fn needs_surface(self) -> bool {
        !matches!(
            self,
            OpKind::SetTag | OpKind::TagDeref | OpKind::ImageSurfaceCreate
        )
    }
}

pub fn resolver(mode: MatchMode) -> Resolver<OpKind> {
    Resolver::new(VOCABULARY, mode)
}

#[cfg(test)]
#[path = "../../tests/unit/ops/mod.rs"]
mod tests;
