#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A declaration may start anywhere: at any indentation, and after other text on the same line.
    Anywhere,
    /// `[` must be the first non-space character of its line, preceded by at most `max_indent`
    /// spaces.
    LineStart { max_indent: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// A later declaration replaces the URL and title of an earlier one with the same id.
    LastWins,
    /// The first declaration of an id is kept; later ones are ignored (CommonMark behavior).
    FirstWins,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub placement: Placement,
    pub duplicates: DuplicatePolicy,
}

impl Options {
    /// Up to three spaces of indentation, nothing else before `[` on the line.
    pub fn strict() -> Self {
        Self {
            placement: Placement::LineStart { max_indent: 3 },
            ..Default::default()
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            placement: Placement::Anywhere,
            duplicates: DuplicatePolicy::LastWins,
        }
    }
}
