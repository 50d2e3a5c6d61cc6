// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Unicode Bidirectional Algorithm.

mod algorithm;
mod brackets;
mod data;
mod paragraph;

use core::fmt;

pub use algorithm::{BidiAlgorithm, MAX_DEPTH};
pub use brackets::MAX_PAIRING_DEPTH;
pub use data::BidiData;
pub use paragraph::{BidiParagraph, BidiRun};

/// The paragraph's base direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BaseDirection {
    /// Choose direction automatically from the first strong character (rules P2 and P3).
    #[default]
    Auto,
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl BaseDirection {
    /// Returns the explicit paragraph embedding level, or `None` for [`Auto`](Self::Auto).
    pub const fn paragraph_level(self) -> Option<u8> {
        match self {
            Self::Auto => None,
            Self::Ltr => Some(0),
            Self::Rtl => Some(1),
        }
    }
}

/// A resolved writing direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextDirection {
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl TextDirection {
    /// Returns the direction of an embedding level: even levels are left-to-right.
    pub const fn from_level(level: u8) -> Self {
        if level & 1 == 0 { Self::Ltr } else { Self::Rtl }
    }

    /// Returns `true` for [`Rtl`](Self::Rtl).
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

impl TryFrom<BaseDirection> for TextDirection {
    type Error = InvalidDirectionError;

    fn try_from(value: BaseDirection) -> Result<Self, Self::Error> {
        match value {
            BaseDirection::Ltr => Ok(Self::Ltr),
            BaseDirection::Rtl => Ok(Self::Rtl),
            BaseDirection::Auto => Err(InvalidDirectionError),
        }
    }
}

impl From<TextDirection> for BaseDirection {
    fn from(value: TextDirection) -> Self {
        match value {
            TextDirection::Ltr => Self::Ltr,
            TextDirection::Rtl => Self::Rtl,
        }
    }
}

/// Error returned when a concrete direction is required but [`BaseDirection::Auto`] was given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidDirectionError;

impl fmt::Display for InvalidDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected a left-to-right or right-to-left direction")
    }
}

impl core::error::Error for InvalidDirectionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_is_not_a_text_direction() {
        assert_eq!(
            TextDirection::try_from(BaseDirection::Rtl),
            Ok(TextDirection::Rtl)
        );
        assert_eq!(
            TextDirection::try_from(BaseDirection::Auto),
            Err(InvalidDirectionError)
        );
    }

    #[test]
    fn level_parity() {
        assert_eq!(TextDirection::from_level(0), TextDirection::Ltr);
        assert_eq!(TextDirection::from_level(3), TextDirection::Rtl);
        assert!(TextDirection::from_level(125).is_rtl());
        assert_eq!(BaseDirection::Rtl.paragraph_level(), Some(1));
        assert_eq!(BaseDirection::Auto.paragraph_level(), None);
    }
}
