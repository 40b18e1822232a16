//! Query pattern compilation.

use regex::Regex;

use crate::result::SearchError;

/// How a query string is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatternMode {
    /// Literal substring match (the query is regex-escaped).
    #[default]
    Literal,
    /// The query is compiled as a regular expression.
    Regex,
}

impl PatternMode {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Regex => "regex",
        }
    }
}

/// A compiled, case-insensitive query pattern.
#[derive(Debug)]
pub(crate) struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile `query` under the given mode.
    ///
    /// Literal queries are escaped and can never fail; regex queries surface
    /// [`SearchError::InvalidPattern`] carrying the offending query.
    pub(crate) fn compile(query: &str, mode: PatternMode) -> Result<Self, SearchError> {
        let pattern = match mode {
            PatternMode::Literal => regex::escape(query),
            PatternMode::Regex => query.to_owned(),
        };
        let regex = Regex::new(&format!("(?i){pattern}"))
            .map_err(|_| SearchError::InvalidPattern(query.to_owned()))?;
        Ok(Self { regex })
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Byte range of the first match in `text`.
    pub(crate) fn find(&self, text: &str) -> Option<(usize, usize)> {
        self.regex.find(text).map(|m| (m.start(), m.end()))
    }

    /// Number of non-overlapping matches in `text`, capped at `cap`.
    pub(crate) fn count_occurrences(&self, text: &str, cap: usize) -> usize {
        self.regex.find_iter(text).take(cap).count()
    }
}
