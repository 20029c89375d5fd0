//! Selector errors.

use strum_macros::Display;
use thiserror::Error;

use crate::Combinator;

/// Which side of a sibling combinator is missing its compound selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OperandSide {
    /// Nothing precedes the combinator, e.g. `+ p`.
    #[strum(serialize = "before")]
    Before,
    /// Nothing follows the combinator, e.g. `h1 ~`.
    #[strum(serialize = "after")]
    After,
}

/// A malformed selector.
///
/// Errors are terminal for the call that raised them; no partial results are
/// ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// No matcher could consume the remaining selector text.
    #[error("unknown selector `{remainder}`")]
    UnknownSelector {
        /// The unparsed remainder of the selector text.
        remainder: String,
    },

    /// A sibling combinator without a compound selector on one side.
    #[error("missing selector {side} `{combinator}`")]
    MissingOperand {
        /// The empty side.
        side: OperandSide,
        /// The combinator, `+` or `~`.
        combinator: Combinator,
    },

    /// A structural pseudo-class argument that is not a positive integer.
    #[error("invalid nth element `{value}`")]
    InvalidNth {
        /// The argument text as written.
        value: String,
    },
}

impl SelectorError {
    pub(crate) fn unknown(remainder: &str) -> Self {
        Self::UnknownSelector {
            remainder: remainder.to_string(),
        }
    }

    /// The unparsed selector text, for errors raised while scanning.
    #[must_use]
    pub fn remainder(&self) -> Option<&str> {
        match self {
            Self::UnknownSelector { remainder } => Some(remainder),
            Self::MissingOperand { .. } | Self::InvalidNth { .. } => None,
        }
    }
}
