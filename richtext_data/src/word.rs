// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A coarse character classification used for word navigation and selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WordBoundaryClass {
    /// Marks and format characters, which take the class of the surrounding text.
    Ignore = 0,
    /// Whitespace.
    Space = 1,
    /// Letters, digits and connector punctuation.
    AlphaDigit = 2,
    /// Everything else.
    Punctuation = 3,
}

impl WordBoundaryClass {
    /// Returns the maximum numeric value for known variants.
    pub const MAX_VALUE: u8 = Self::Punctuation as u8;

    /// Decodes a numeric value, returning `None` if it is out of range.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Ignore),
            1 => Some(Self::Space),
            2 => Some(Self::AlphaDigit),
            3 => Some(Self::Punctuation),
            _ => None,
        }
    }

    /// Decodes a raw trie value; values that don't decode are treated as
    /// [`Punctuation`](Self::Punctuation).
    pub fn from_raw(value: u32) -> Self {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_u8)
            .unwrap_or(Self::Punctuation)
    }
}
