//! One handler per [`OpKind`].
//!
//! Handlers run after the engine has checked arity and initialization. Scalar operands go
//! through the tag store, so every geometry and paint argument may be a literal or a tag.

use kurbo::Affine;

use crate::backend::{Antialias, Backend, FontSlant, FontWeight};
use crate::engine::{Session, SurfaceInfo};
use crate::foundation::core::{ImageDescriptor, PixelFormat, checked_dimensions};
use crate::ops::OpKind;
use crate::ops::args::{Args, OpFault, OpResult};
use crate::tags::TagValue;
use crate::value::TagKey;

pub(crate) fn apply<B: Backend>(
    kind: OpKind,
    s: &mut Session<'_, B>,
    args: Args<'_>,
) -> OpResult<()> {
    match kind {
        OpKind::SetTag => return set_tag(s, args),
        OpKind::TagDeref => return tag_deref(s, args),
        OpKind::ImageSurfaceCreate => return image_surface_create(s, args),
        _ => {}
    }

    let Session {
        backend,
        tags,
        max_dimension,
        ..
    } = s;
    let b = backend.as_mut().ok_or(OpFault::NotInitialized)?;
    let num = |i: usize| args.scalar(i, tags);

    match kind {
        OpKind::MoveTo => {
            let (x, y) = (num(0)?, num(1)?);
            if args.flag(2, "relative")? {
                b.rel_move_to(x, y);
            } else {
                b.move_to(x, y);
            }
        }
        OpKind::LineTo => {
            let (x, y) = (num(0)?, num(1)?);
            if args.flag(2, "relative")? {
                b.rel_line_to(x, y);
            } else {
                b.line_to(x, y);
            }
        }
        OpKind::Arc => b.arc(num(0)?, num(1)?, num(2)?, num(3)?, num(4)?),
        OpKind::ArcNegative => b.arc_negative(num(0)?, num(1)?, num(2)?, num(3)?, num(4)?),
        OpKind::Rectangle => b.rectangle(num(0)?, num(1)?, num(2)?, num(3)?),
        OpKind::NewPath => b.new_path(),
        OpKind::NewSubPath => b.new_sub_path(),
        OpKind::ClosePath => b.close_path(),
        OpKind::CopyPath => {
            let key = args.tag_key(0)?;
            let handle = b.copy_path();
            let segments = B::path_segments(&handle);
            tags.insert(key.clone(), TagValue::Path { handle, segments })
                .map_err(|e| OpFault::from_tag(e, key))?;
        }
        OpKind::AppendPath => {
            let key = args.tag_key(0)?;
            let path = tags.path(key).ok_or_else(|| not_found(key, "path"))?;
            b.append_path(path);
        }

        OpKind::SetSourceRgba => b.set_source_rgba(num(0)?, num(1)?, num(2)?, num(3)?),
        OpKind::SetSource => {
            let key = args.tag_key(0)?;
            let pattern = tags.pattern(key).ok_or_else(|| not_found(key, "pattern"))?;
            b.set_source(pattern);
        }
        OpKind::SetLineWidth => b.set_line_width(num(0)?),
        OpKind::SetAntialias => {
            b.set_antialias(args.choice(0, "antialias mode", Antialias::from_name)?);
        }

        OpKind::Fill => b.fill(args.flag(0, "preserve")?),
        OpKind::Stroke => b.stroke(args.flag(0, "preserve")?),
        OpKind::Clip => b.clip(args.flag(0, "preserve")?),
        OpKind::ResetClip => b.reset_clip(),
        OpKind::Paint => b.paint(args.optional_scalar(0, tags)?),

        OpKind::IdentityMatrix => b.identity_matrix(),
        OpKind::Translate => b.translate(num(0)?, num(1)?),
        OpKind::Scale => b.scale(num(0)?, num(1)?),
        OpKind::Rotate => b.rotate(num(0)?),

        OpKind::PatternCreateForSurface => {
            let key = args.tag_key(0)?;
            let image = args.image(1)?;
            let (width, height, data) = image
                .padded_copy(*max_dimension)
                .map_err(|e| OpFault::bad(format!("argument 1: {e}")))?;
            let source = ImageDescriptor {
                width: i64::from(width),
                height: i64::from(height),
                format: image.format,
                data,
            };
            let pattern = b
                .create_surface_pattern(&source)
                .map_err(OpFault::Status)?;
            tags.insert(key.clone(), TagValue::Pattern(pattern))
                .map_err(|e| OpFault::from_tag(e, key))?;
        }
        OpKind::PatternCreateLinear => {
            let key = args.tag_key(0)?;
            let pattern = b.create_linear_pattern(num(1)?, num(2)?, num(3)?, num(4)?);
            tags.insert(key.clone(), TagValue::Pattern(pattern))
                .map_err(|e| OpFault::from_tag(e, key))?;
        }
        OpKind::PatternAddColorStopRgba => {
            let key = args.tag_key(0)?;
            let stop = [num(1)?, num(2)?, num(3)?, num(4)?, num(5)?];
            let pattern = tags
                .pattern_mut(key)
                .ok_or_else(|| not_found(key, "pattern"))?;
            b.pattern_add_color_stop(pattern, stop[0], stop[1], stop[2], stop[3], stop[4])
                .map_err(OpFault::Status)?;
        }
        OpKind::PatternTranslate | OpKind::PatternScale => {
            let key = args.tag_key(0)?;
            let (x, y) = (num(1)?, num(2)?);
            let m = if kind == OpKind::PatternTranslate {
                Affine::translate((x, y))
            } else {
                Affine::scale_non_uniform(x, y)
            };
            let pattern = tags
                .pattern_mut(key)
                .ok_or_else(|| not_found(key, "pattern"))?;
            b.pattern_transform(pattern, m).map_err(OpFault::Status)?;
        }

        OpKind::TextExtents => {
            let key = args.tag_key(0)?;
            let extents = b.text_extents(args.text(1)?);
            tags.insert(key.clone(), TagValue::TextExtents(extents))
                .map_err(|e| OpFault::from_tag(e, key))?;
        }
        OpKind::FontExtents => {
            let key = args.tag_key(0)?;
            let extents = b.font_extents();
            tags.insert(key.clone(), TagValue::FontExtents(extents))
                .map_err(|e| OpFault::from_tag(e, key))?;
        }
        OpKind::SelectFontFace => {
            let family = args.text(0)?;
            let slant = args.choice(1, "font slant", FontSlant::from_name)?;
            let weight = args.choice(2, "font weight", FontWeight::from_name)?;
            b.select_font_face(family, slant, weight);
        }
        OpKind::SetFontSize => b.set_font_size(num(0)?),
        OpKind::ShowText => b.show_text(args.text(0)?),

        OpKind::SetTag | OpKind::TagDeref | OpKind::ImageSurfaceCreate => {}
    }
    Ok(())
}

fn not_found(key: &TagKey, what: &str) -> OpFault {
    OpFault::bad(format!("tag {key:?} is not a {what}"))
}

fn set_tag<B: Backend>(s: &mut Session<'_, B>, args: Args<'_>) -> OpResult<()> {
    let key = args.tag_key(0)?;
    let value = args.scalar(1, &s.tags)?;
    s.tags
        .set_scalar(key.clone(), value)
        .map_err(|e| OpFault::from_tag(e, key))
}

fn tag_deref<B: Backend>(s: &mut Session<'_, B>, args: Args<'_>) -> OpResult<()> {
    let key = args.tag_key(0)?;
    let field = args.text(1)?;
    let new_key = args.tag_key(2)?;
    let value = s
        .tags
        .deref_field(key, field)
        .map_err(|e| OpFault::from_tag(e, key))?;
    s.tags
        .set_scalar(new_key.clone(), value)
        .map_err(|e| OpFault::from_tag(e, new_key))
}

fn image_surface_create<B: Backend>(s: &mut Session<'_, B>, args: Args<'_>) -> OpResult<()> {
    if s.backend.is_some() {
        return Err(OpFault::AlreadyInitialized);
    }
    let width = whole(args.scalar(0, &s.tags)?, 0)?;
    let height = whole(args.scalar(1, &s.tags)?, 1)?;
    let format = args.choice(2, "pixel format", PixelFormat::from_name)?;
    let (width, height) = checked_dimensions(width, height, s.max_dimension)
        .map_err(|e| OpFault::bad(e.to_string()))?;

    let data = vec![0u8; height as usize * format.stride_for_width(width)];
    let backend = B::create(width, height, format, data, s.opts).map_err(OpFault::Status)?;
    s.bind(
        backend,
        SurfaceInfo {
            width,
            height,
            format,
        },
    );
    Ok(())
}

fn whole(v: f64, i: usize) -> OpResult<i64> {
    if !v.is_finite() || v.fract() != 0.0 {
        return Err(OpFault::bad(format!(
            "argument {i}: expected a whole number, got {v}"
        )));
    }
    Ok(v as i64)
}
