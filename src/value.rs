//! Operation arguments as they arrive from the caller.

use std::path::PathBuf;

use crate::foundation::core::ImageDescriptor;
use crate::tags::ScalarRef;

/// String-backed tag key used by the engine.
pub type TagKey = String;

/// One positional operation argument.
///
/// In JSON: numbers are scalars, strings are atoms, arrays are flag lists, `null` is
/// undefined, and single-field objects select the remaining variants.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    Undefined,
    Scalar(f64),
    Atom(String),
    List(Vec<Value>),
    Ref { tag: TagKey },
    Text { text: String },
    Image { image: ImageDescriptor },
    /// Image file path; resolved to [`Value::Image`] when a script is loaded.
    Png { png: PathBuf },
}

impl Value {
    pub fn tag(key: impl Into<TagKey>) -> Self {
        Value::Ref { tag: key.into() }
    }

    pub fn atom(name: impl Into<String>) -> Self {
        Value::Atom(name.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Value::Text { text: text.into() }
    }

    pub fn flags<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Value::List(names.into_iter().map(Value::atom).collect())
    }

    /// Short description for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Scalar(_) => "scalar",
            Value::Atom(_) => "atom",
            Value::List(_) => "list",
            Value::Ref { .. } => "tag reference",
            Value::Text { .. } => "text",
            Value::Image { .. } => "image",
            Value::Png { .. } => "unresolved png path",
        }
    }

    pub fn as_scalar_ref(&self) -> Option<ScalarRef<'_, TagKey>> {
        match self {
            Value::Scalar(v) => Some(ScalarRef::Literal(*v)),
            Value::Ref { tag } => Some(ScalarRef::Tag(tag)),
            _ => None,
        }
    }

    /// A tag name, given either as a reference or a bare atom.
    pub fn as_tag_key(&self) -> Option<&TagKey> {
        match self {
            Value::Ref { tag } | Value::Atom(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Value::Atom(a) => Some(a),
            _ => None,
        }
    }

    /// Text payload; bare atoms are accepted as text too.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text { text } | Value::Atom(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageDescriptor> {
        match self {
            Value::Image { image } => Some(image),
            _ => None,
        }
    }

    /// Atoms of a flag list, or `None` if this is not a list of atoms.
    pub fn as_flags(&self) -> Option<Vec<&str>> {
        match self {
            Value::List(items) => items.iter().map(Value::as_atom).collect(),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

/// A named operation with positional arguments.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Operation {
    #[serde(rename = "op")]
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl Operation {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/value.rs"]
mod tests;
