//! Operation name resolution by candidate elimination.

/// How an input name is matched against the vocabulary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// The input must equal a vocabulary name.
    #[default]
    Exact,
    /// An exact name wins; otherwise the input may abbreviate exactly one name.
    UniquePrefix,
}

impl MatchMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "exact" => Some(Self::Exact),
            "prefix" => Some(Self::UniquePrefix),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::UniquePrefix => "prefix",
        }
    }
}

/// A fixed vocabulary of names, each bound to a handler value.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<T: Copy + 'static> {
    entries: &'static [(&'static str, T)],
    mode: MatchMode,
}

impl<T: Copy + 'static> Resolver<T> {
    pub const fn new(entries: &'static [(&'static str, T)], mode: MatchMode) -> Self {
        Self { entries, mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn entries(&self) -> &'static [(&'static str, T)] {
        self.entries
    }

    /// Resolve `name` to its handler.
    ///
    /// Scans the input one byte at a time, dropping every candidate that disagrees at that
    /// position (a candidate that already ended disagrees with any further byte). Once the
    /// input is consumed, a survivor of the same length is the match.
    pub fn resolve(&self, name: &str) -> Option<T> {
        let input = name.as_bytes();
        let mut alive: Vec<(&'static str, T)> = self.entries.to_vec();

        for (pos, &c) in input.iter().enumerate() {
            alive.retain(|(n, _)| n.as_bytes().get(pos) == Some(&c));
            if alive.is_empty() {
                return None;
            }
        }

        if let Some(&(_, handler)) = alive.iter().find(|(n, _)| n.len() == input.len()) {
            return Some(handler);
        }
        match (self.mode, alive.as_slice()) {
            (MatchMode::UniquePrefix, [(_, handler)]) if !input.is_empty() => Some(*handler),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/resolve.rs"]
mod tests;
