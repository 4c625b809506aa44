use std::str::FromStr;

use crate::foundation::core::MAX_DIMENSION;
use crate::resolve::MatchMode;

/// Per-engine configuration shared by every call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineSettings {
    /// Largest accepted width or height. Clamped to [`MAX_DIMENSION`].
    pub max_dimension: u32,
    /// How op names are matched against the vocabulary.
    pub match_mode: MatchMode,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            match_mode: MatchMode::Exact,
        }
    }
}

impl EngineSettings {
    /// Defaults overridden by `TAGDRAW_MAX_DIMENSION` and `TAGDRAW_OP_MATCH`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let max_dimension = env_parse::<u32>("TAGDRAW_MAX_DIMENSION")
            .filter(|&n| n > 0 && n <= MAX_DIMENSION)
            .unwrap_or(defaults.max_dimension);
        let match_mode = std::env::var("TAGDRAW_OP_MATCH")
            .ok()
            .and_then(|v| MatchMode::from_name(v.trim()))
            .unwrap_or(defaults.match_mode);
        Self {
            max_dimension,
            match_mode,
        }
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension.clamp(1, MAX_DIMENSION);
        self
    }
}

pub(crate) fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/settings.rs"]
mod tests;
