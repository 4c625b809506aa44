use crate::backend::{Resources, Status};
use crate::foundation::core::ImageDescriptor;
use crate::foundation::error::{DrawError, OpSite};
use crate::tags::{TagError, TagStore};
use crate::value::{TagKey, Value};

/// Why a single operation failed, before the engine attaches the op's position.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum OpFault {
    BadArgument(String),
    TagAlreadySet(TagKey),
    TagNotSet(TagKey),
    NotInitialized,
    AlreadyInitialized,
    Status(Status),
}

impl OpFault {
    pub(crate) fn bad(reason: impl Into<String>) -> Self {
        Self::BadArgument(reason.into())
    }

    pub(crate) fn from_tag(err: TagError, key: &TagKey) -> Self {
        match err {
            TagError::AlreadySet => Self::TagAlreadySet(key.clone()),
            TagError::NotSet => Self::TagNotSet(key.clone()),
            TagError::BadArgument(reason) => Self::BadArgument(reason),
        }
    }

    pub(crate) fn at(self, site: OpSite) -> DrawError {
        match self {
            Self::BadArgument(reason) => DrawError::BadArgument { site, reason },
            Self::TagAlreadySet(key) => DrawError::TagAlreadySet { site, key },
            Self::TagNotSet(key) => DrawError::TagNotSet { site, key },
            Self::NotInitialized => DrawError::NotInitialized { site },
            Self::AlreadyInitialized => DrawError::AlreadyInitialized { site },
            Self::Status(status) => DrawError::BackendStatus { site, status },
        }
    }
}

pub(crate) type OpResult<T> = Result<T, OpFault>;

/// Positional view over an op's arguments. Arity is checked before a view is built.
#[derive(Clone, Copy)]
pub(crate) struct Args<'a> {
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub(crate) fn new(values: &'a [Value]) -> Self {
        Self { values }
    }

    fn get(&self, i: usize) -> OpResult<&'a Value> {
        self.values
            .get(i)
            .ok_or_else(|| OpFault::bad(format!("missing argument {i}")))
    }

    fn mismatch(&self, i: usize, expected: &str) -> OpFault {
        let got = self.values.get(i).map_or("nothing", Value::describe);
        OpFault::bad(format!("argument {i}: expected {expected}, got {got}"))
    }

    /// A literal scalar or a reference to a scalar tag.
    pub(crate) fn scalar<R: Resources>(
        &self,
        i: usize,
        tags: &TagStore<TagKey, R>,
    ) -> OpResult<f64> {
        let operand = self
            .get(i)?
            .as_scalar_ref()
            .ok_or_else(|| self.mismatch(i, "scalar or tag reference"))?;
        tags.resolve_scalar(operand)
            .map_err(|e| OpFault::bad(format!("argument {i}: {e}")))
    }

    /// Like [`Args::scalar`], but `undefined` yields `None`.
    pub(crate) fn optional_scalar<R: Resources>(
        &self,
        i: usize,
        tags: &TagStore<TagKey, R>,
    ) -> OpResult<Option<f64>> {
        match self.get(i)? {
            Value::Undefined => Ok(None),
            _ => self.scalar(i, tags).map(Some),
        }
    }

    pub(crate) fn tag_key(&self, i: usize) -> OpResult<&'a TagKey> {
        self.get(i)?
            .as_tag_key()
            .ok_or_else(|| self.mismatch(i, "tag name"))
    }

    pub(crate) fn atom(&self, i: usize) -> OpResult<&'a str> {
        self.get(i)?
            .as_atom()
            .ok_or_else(|| self.mismatch(i, "atom"))
    }

    pub(crate) fn text(&self, i: usize) -> OpResult<&'a str> {
        self.get(i)?
            .as_text()
            .ok_or_else(|| self.mismatch(i, "text"))
    }

    pub(crate) fn image(&self, i: usize) -> OpResult<&'a ImageDescriptor> {
        self.get(i)?
            .as_image()
            .ok_or_else(|| self.mismatch(i, "image"))
    }

    /// Parse an atom through `parse`, naming the accepted atoms on failure.
    pub(crate) fn choice<T>(
        &self,
        i: usize,
        what: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> OpResult<T> {
        let atom = self.atom(i)?;
        parse(atom).ok_or_else(|| OpFault::bad(format!("argument {i}: unknown {what} '{atom}'")))
    }

    /// Whether `flag` appears in the flag list at `i`. Any other flag is rejected.
    pub(crate) fn flag(&self, i: usize, flag: &str) -> OpResult<bool> {
        let flags = self
            .get(i)?
            .as_flags()
            .ok_or_else(|| self.mismatch(i, "flag list"))?;
        let mut set = false;
        for f in flags {
            if f != flag {
                return Err(OpFault::bad(format!(
                    "argument {i}: unknown flag '{f}', expected '{flag}'"
                )));
            }
            set = true;
        }
        Ok(set)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/args.rs"]
mod tests;
