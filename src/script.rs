//! JSON scripts: initial tags plus an operation list.
//!
//! ```json
//! {
//!   "tags": [["w", 2.0]],
//!   "ops": [
//!     {"op": "rectangle", "args": [0, 0, {"tag": "w"}, 2]},
//!     {"op": "fill", "args": [[]]}
//!   ]
//! }
//! ```

use std::path::Path;

use crate::codec;
use crate::engine::DrawRequest;
use crate::foundation::core::ImageDescriptor;
use crate::foundation::error::{DrawError, DrawResult};
use crate::tags::TagOutput;
use crate::value::{Operation, TagKey, Value};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub tags: Vec<(TagKey, f64)>,
    #[serde(default)]
    pub ops: Vec<Operation>,
}

impl Script {
    /// Parse a script. `{"png": ...}` arguments are left unresolved.
    pub fn from_json(text: &str) -> DrawResult<Self> {
        serde_json::from_str(text).map_err(|e| DrawError::serde(format!("parse script: {e}")))
    }

    pub fn to_json(&self) -> DrawResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DrawError::serde(format!("serialize script: {e}")))
    }

    /// Read a script file and load its image arguments relative to the file's directory.
    pub fn load(path: &Path) -> DrawResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DrawError::serde(format!("read {}: {e}", path.display())))?;
        let mut script = Self::from_json(&text)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        script.resolve_images(base)?;
        tracing::debug!(
            path = %path.display(),
            ops = script.ops.len(),
            tags = script.tags.len(),
            "script loaded"
        );
        Ok(script)
    }

    /// Replace every `{"png": path}` argument, including ones nested in lists, with the
    /// decoded image.
    pub fn resolve_images(&mut self, base: &Path) -> DrawResult<()> {
        for op in &mut self.ops {
            for arg in &mut op.args {
                resolve_value(arg, base)?;
            }
        }
        Ok(())
    }

    pub fn request<'a>(&'a self, image: Option<&'a ImageDescriptor>) -> DrawRequest<'a> {
        DrawRequest {
            image,
            tags: &self.tags,
            ops: &self.ops,
        }
    }
}

fn resolve_value(value: &mut Value, base: &Path) -> DrawResult<()> {
    match value {
        Value::Png { png } => {
            let image = codec::read_png(&base.join(&*png))?;
            *value = Value::Image { image };
        }
        Value::List(items) => {
            for item in items {
                resolve_value(item, base)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TagRecord<'a> {
    pub key: &'a str,
    pub value: &'a TagOutput,
}

/// Final tags as a JSON array of `{"key", "value"}` records.
pub fn tags_to_json(tags: &[(TagKey, TagOutput)]) -> DrawResult<String> {
    let records: Vec<TagRecord<'_>> = tags
        .iter()
        .map(|(key, value)| TagRecord { key, value })
        .collect();
    serde_json::to_string_pretty(&records)
        .map_err(|e| DrawError::serde(format!("serialize tags: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
