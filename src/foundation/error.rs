use std::fmt;

use crate::backend::Status;

pub type DrawResult<T> = Result<T, DrawError>;

/// Position of an operation inside the submitted sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpSite {
    /// 0-based index into the op list.
    pub index: usize,
    /// Op name exactly as submitted.
    pub name: String,
}

impl OpSite {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

impl fmt::Display for OpSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op #{} '{}'", self.index, self.name)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DrawError {
    #[error("malformed operation at {site}: {reason}")]
    MalformedOperation { site: OpSite, reason: String },

    #[error("unknown operation at {site}")]
    UnknownOperation { site: OpSite },

    #[error("{site} requires an initialized surface")]
    NotInitialized { site: OpSite },

    #[error("{site} cannot create a surface: one already exists")]
    AlreadyInitialized { site: OpSite },

    #[error("bad argument at {site}: {reason}")]
    BadArgument { site: OpSite, reason: String },

    #[error("duplicate initial tag {key}")]
    DuplicateTag { key: String },

    #[error("tag {key} already set ({site})")]
    TagAlreadySet { site: OpSite, key: String },

    #[error("tag {key} not set ({site})")]
    TagNotSet { site: OpSite, key: String },

    #[error("backend error at {site}: {status} (status {code})", code = .status.code())]
    BackendStatus { site: OpSite, status: Status },

    #[error("bad surface status: {0} (status {code})", code = .0.code())]
    BadSurfaceStatus(Status),

    #[error("dimension error: {0}")]
    Dimension(String),

    #[error("format error: {0}")]
    Format(String),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrawError {
    pub fn dimension(msg: impl Into<String>) -> Self {
        Self::Dimension(msg.into())
    }

    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// The failing op, for errors raised while executing the op list.
    pub fn site(&self) -> Option<&OpSite> {
        match self {
            Self::MalformedOperation { site, .. }
            | Self::UnknownOperation { site }
            | Self::NotInitialized { site }
            | Self::AlreadyInitialized { site }
            | Self::BadArgument { site, .. }
            | Self::TagAlreadySet { site, .. }
            | Self::TagNotSet { site, .. }
            | Self::BackendStatus { site, .. } => Some(site),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
