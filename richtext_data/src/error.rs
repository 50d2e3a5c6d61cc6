// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// An error produced while building, loading or validating a [`UnicodeTrie`](crate::UnicodeTrie).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrieError {
    /// A code point above `U+10FFFF` was passed to the builder.
    InvalidCodePoint(u32),
    /// A range with `start > end` was passed to the builder.
    InvalidRange {
        /// First code point of the range.
        start: u32,
        /// Last code point of the range (inclusive).
        end: u32,
    },
    /// The resource is shorter than its fixed-size header.
    TruncatedHeader,
    /// A header field is negative, misaligned or out of range.
    InvalidHeader,
    /// The compressed payload could not be inflated.
    Inflate,
    /// The inflated payload does not have the length announced by the header.
    LengthMismatch {
        /// Byte length announced by the header.
        expected: usize,
        /// Byte length actually produced.
        actual: usize,
    },
    /// An index entry points outside of the data array.
    MalformedIndex,
}

impl fmt::Display for TrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCodePoint(cp) => write!(f, "code point {cp:#X} is out of range"),
            Self::InvalidRange { start, end } => {
                write!(f, "invalid code point range {start:#X}..={end:#X}")
            }
            Self::TruncatedHeader => f.write_str("trie resource is truncated"),
            Self::InvalidHeader => f.write_str("trie resource header is invalid"),
            Self::Inflate => f.write_str("trie resource payload could not be decompressed"),
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "trie resource payload is {actual} bytes, header announced {expected}"
            ),
            Self::MalformedIndex => f.write_str("trie index points outside of the data array"),
        }
    }
}

impl core::error::Error for TrieError {}
