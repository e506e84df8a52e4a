//! Error types shared across the workspace.

use std::error::Error;
use std::fmt;

/// A string did not name any variant of one of the option enums.
///
/// Produced by the `FromStr` impls in [`kind`](crate::kind).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseKindError {
    /// Which option was being parsed (e.g. `"policy"`).
    pub option: &'static str,
    /// The rejected input.
    pub value: String,
    /// Accepted spellings, in declaration order.
    pub expected: &'static [&'static str],
}

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown {} '{}', expected one of: {}",
            self.option,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl Error for ParseKindError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_choices() {
        let err = ParseKindError {
            option: "trend",
            value: "zigzag".to_string(),
            expected: &["none", "grow"],
        };
        assert_eq!(
            err.to_string(),
            "unknown trend 'zigzag', expected one of: none, grow"
        );
    }
}
