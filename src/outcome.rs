use std::fmt::Display;

/// What a mutating call did to the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Added,
    Modified,
    Removed,
    /// `add` found the key already present, document untouched
    AlreadyExists,
    /// `remove` did not find the key, document untouched
    NotFound,
}

impl Outcome {
    /// Whether the document on disk was rewritten.
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Added | Outcome::Modified | Outcome::Removed)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Outcome::Added => "added",
            Outcome::Modified => "modified",
            Outcome::Removed => "removed",
            Outcome::AlreadyExists => "already exists",
            Outcome::NotFound => "not found",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_writes_are_applied() {
        assert!(Outcome::Added.is_applied());
        assert!(Outcome::Modified.is_applied());
        assert!(Outcome::Removed.is_applied());
        assert!(!Outcome::AlreadyExists.is_applied());
        assert!(!Outcome::NotFound.is_applied());
        assert_eq!(Outcome::AlreadyExists.to_string(), "already exists");
    }
}
