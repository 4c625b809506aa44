//! Set-once, typed symbol table for one call.
//!
//! The store owns every resource handle placed in it. Handles leave the store exactly once:
//! through [`TagStore::drain`] when the call succeeds, or [`TagStore::destroy`] (also run on
//! drop) when it fails.

use std::collections::BTreeMap;
use std::fmt;

use crate::backend::{FontExtents, PatternKind, Resources, TextExtents};

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum TagError {
    #[error("tag already set")]
    AlreadySet,
    #[error("tag not set")]
    NotSet,
    #[error("{0}")]
    BadArgument(String),
}

/// A scalar operand: a literal, or a reference to a scalar tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarRef<'a, K> {
    Literal(f64),
    Tag(&'a K),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKind {
    Scalar,
    TextExtents,
    FontExtents,
    Pattern,
    Path,
}

impl TagKind {
    pub fn name(self) -> &'static str {
        match self {
            TagKind::Scalar => "scalar",
            TagKind::TextExtents => "text_extents",
            TagKind::FontExtents => "font_extents",
            TagKind::Pattern => "pattern",
            TagKind::Path => "path",
        }
    }
}

pub enum TagValue<R: Resources> {
    Scalar(f64),
    TextExtents(TextExtents),
    FontExtents(FontExtents),
    Pattern(R::Pattern),
    Path { handle: R::Path, segments: usize },
}

impl<R: Resources> TagValue<R> {
    pub fn kind(&self) -> TagKind {
        match self {
            TagValue::Scalar(_) => TagKind::Scalar,
            TagValue::TextExtents(_) => TagKind::TextExtents,
            TagValue::FontExtents(_) => TagKind::FontExtents,
            TagValue::Pattern(_) => TagKind::Pattern,
            TagValue::Path { .. } => TagKind::Path,
        }
    }

    fn output(&self) -> TagOutput {
        match self {
            TagValue::Scalar(value) => TagOutput::Scalar { value: *value },
            TagValue::TextExtents(e) => TagOutput::TextExtents(*e),
            TagValue::FontExtents(e) => TagOutput::FontExtents(*e),
            TagValue::Pattern(p) => TagOutput::Pattern {
                subtype: R::pattern_kind(p),
            },
            TagValue::Path { segments, .. } => TagOutput::Path {
                segment_count: *segments,
            },
        }
    }

    fn release(self) {
        match self {
            TagValue::Pattern(p) => R::release_pattern(p),
            TagValue::Path { handle, .. } => R::release_path(handle),
            TagValue::Scalar(_) | TagValue::TextExtents(_) | TagValue::FontExtents(_) => {}
        }
    }
}

impl<R: Resources> fmt::Debug for TagValue<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            TagValue::TextExtents(e) => f.debug_tuple("TextExtents").field(e).finish(),
            TagValue::FontExtents(e) => f.debug_tuple("FontExtents").field(e).finish(),
            TagValue::Pattern(p) => f
                .debug_tuple("Pattern")
                .field(&R::pattern_kind(p))
                .finish(),
            TagValue::Path { segments, .. } => {
                f.debug_struct("Path").field("segments", segments).finish()
            }
        }
    }
}

/// External representation of a tag once the call has finished.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TagOutput {
    Scalar { value: f64 },
    TextExtents(TextExtents),
    FontExtents(FontExtents),
    Pattern { subtype: PatternKind },
    Path { segment_count: usize },
}

pub struct TagStore<K: Ord + fmt::Debug, R: Resources> {
    entries: BTreeMap<K, TagValue<R>>,
}

impl<K: Ord + fmt::Debug, R: Resources> Default for TagStore<K, R> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord + fmt::Debug, R: Resources> TagStore<K, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&TagValue<R>> {
        self.entries.get(key)
    }

    /// Literal scalars pass through; tag references must name a scalar tag.
    pub fn resolve_scalar(&self, operand: ScalarRef<'_, K>) -> Result<f64, TagError> {
        match operand {
            ScalarRef::Literal(v) => Ok(v),
            ScalarRef::Tag(key) => match self.entries.get(key) {
                Some(TagValue::Scalar(v)) => Ok(*v),
                Some(other) => Err(TagError::BadArgument(format!(
                    "tag {key:?} holds {}, expected scalar",
                    other.kind().name()
                ))),
                None => Err(TagError::BadArgument(format!("tag {key:?} is not set"))),
            },
        }
    }

    pub fn set_scalar(&mut self, key: K, value: f64) -> Result<(), TagError> {
        self.insert(key, TagValue::Scalar(value))
    }

    /// Insert `value` under a fresh key. On a duplicate the value's resources are released
    /// before the error is returned.
    pub fn insert(&mut self, key: K, value: TagValue<R>) -> Result<(), TagError> {
        if self.entries.contains_key(&key) {
            tracing::trace!(?key, kind = value.kind().name(), "releasing duplicate tag value");
            value.release();
            return Err(TagError::AlreadySet);
        }
        self.entries.insert(key, value);
        Ok(())
    }

    pub fn pattern(&self, key: &K) -> Option<&R::Pattern> {
        match self.entries.get(key) {
            Some(TagValue::Pattern(p)) => Some(p),
            _ => None,
        }
    }

    pub fn pattern_mut(&mut self, key: &K) -> Option<&mut R::Pattern> {
        match self.entries.get_mut(key) {
            Some(TagValue::Pattern(p)) => Some(p),
            _ => None,
        }
    }

    pub fn path(&self, key: &K) -> Option<&R::Path> {
        match self.entries.get(key) {
            Some(TagValue::Path { handle, .. }) => Some(handle),
            _ => None,
        }
    }

    /// Project one named field of a text or font extents tag.
    pub fn deref_field(&self, key: &K, field: &str) -> Result<f64, TagError> {
        let value = self.entries.get(key).ok_or(TagError::NotSet)?;
        let projected = match value {
            TagValue::TextExtents(e) => e.field(field),
            TagValue::FontExtents(e) => e.field(field),
            other => {
                return Err(TagError::BadArgument(format!(
                    "tag {key:?} holds {}, which has no fields",
                    other.kind().name()
                )));
            }
        };
        projected.ok_or_else(|| {
            TagError::BadArgument(format!(
                "{} has no field '{field}'",
                value.kind().name()
            ))
        })
    }

    /// Serialize every tag in key order, releasing owned resources along the way.
    pub fn drain(&mut self) -> Vec<(K, TagOutput)> {
        let entries = std::mem::take(&mut self.entries);
        entries
            .into_iter()
            .map(|(key, value)| {
                let out = value.output();
                value.release();
                (key, out)
            })
            .collect()
    }

    /// Release every resource still held without producing output.
    pub fn destroy(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        if !entries.is_empty() {
            tracing::trace!(count = entries.len(), "destroying tag store");
        }
        for (_, value) in entries {
            value.release();
        }
    }
}

impl<K: Ord + fmt::Debug, R: Resources> Drop for TagStore<K, R> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
#[path = "../tests/unit/tags.rs"]
mod tests;
