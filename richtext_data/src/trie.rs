// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frozen, read-only form of the property trie.

use alloc::vec::Vec;

use crate::TrieError;

/// The largest valid Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// Shift size for getting the index-1 table offset.
pub(crate) const SHIFT_1: u32 = 6 + 5;
/// Shift size for getting the index-2 table offset.
pub(crate) const SHIFT_2: u32 = 5;
/// Difference between the two shift sizes.
pub(crate) const SHIFT_1_2: u32 = SHIFT_1 - SHIFT_2;

/// Number of index-1 entries for the BMP, which are not stored.
pub(crate) const OMITTED_BMP_INDEX_1_LENGTH: usize = 0x1_0000 >> SHIFT_1;
/// Number of code points per index-1 entry.
pub(crate) const CP_PER_INDEX_1_ENTRY: u32 = 1 << SHIFT_1;
/// Number of entries in an index-2 block.
pub(crate) const INDEX_2_BLOCK_LENGTH: usize = 1 << SHIFT_1_2;
pub(crate) const INDEX_2_MASK: u32 = (1 << SHIFT_1_2) - 1;

/// Number of entries in a data block.
pub(crate) const DATA_BLOCK_LENGTH: usize = 1 << SHIFT_2;
pub(crate) const DATA_MASK: u32 = (1 << SHIFT_2) - 1;

/// Index-2 entries are stored shifted right by this amount.
pub(crate) const INDEX_SHIFT: u32 = 2;
/// Data blocks are aligned to multiples of this.
pub(crate) const DATA_GRANULARITY: usize = 1 << INDEX_SHIFT;

/// The part of the index-2 table for lead surrogate code points.
pub(crate) const LSCP_INDEX_2_OFFSET: usize = 0x1_0000 >> SHIFT_2;
pub(crate) const LSCP_INDEX_2_LENGTH: usize = 0x400 >> SHIFT_2;
/// Count of the BMP index-2 entries, including the lead surrogate code point section.
pub(crate) const INDEX_2_BMP_LENGTH: usize = LSCP_INDEX_2_OFFSET + LSCP_INDEX_2_LENGTH;

/// The index-2 section for two-byte UTF-8 sequences (one entry per 64 code points below U+0800).
pub(crate) const UTF8_2B_INDEX_2_OFFSET: usize = INDEX_2_BMP_LENGTH;
pub(crate) const UTF8_2B_INDEX_2_LENGTH: usize = 0x800 >> 6;

/// The index-1 table, only used for supplementary code points, starts here.
pub(crate) const INDEX_1_OFFSET: usize = UTF8_2B_INDEX_2_OFFSET + UTF8_2B_INDEX_2_LENGTH;

/// A compact, immutable map from code points to `u32` values.
///
/// The layout is the two-stage "UTrie2" design: the index and the data blocks share one array of
/// 32-bit words. Lookups for BMP code points take two reads, supplementary code points take three.
///
/// All code points at or above [`high_start`](Self::high_start) share one value, which is stored
/// in the last data granule; code points above [`MAX_CODE_POINT`] return the
/// [`error_value`](Self::error_value).
#[derive(Clone, PartialEq, Eq)]
pub struct UnicodeTrie {
    data: Vec<u32>,
    high_start: u32,
    error_value: u32,
}

impl core::fmt::Debug for UnicodeTrie {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UnicodeTrie")
            .field("data_len", &self.data.len())
            .field("high_start", &format_args!("{:#X}", self.high_start))
            .field("error_value", &self.error_value)
            .finish_non_exhaustive()
    }
}

impl UnicodeTrie {
    /// Creates a trie from its raw parts, validating that every index entry is addressable.
    ///
    /// `data` holds the index followed by the data blocks, `high_start` is the first code point
    /// that maps to the shared high value, and `error_value` is returned for invalid code points.
    pub fn from_raw_parts(
        data: Vec<u32>,
        high_start: u32,
        error_value: u32,
    ) -> Result<Self, TrieError> {
        if high_start % CP_PER_INDEX_1_ENTRY != 0 || high_start > MAX_CODE_POINT + 1 {
            return Err(TrieError::InvalidHeader);
        }
        let trie = Self {
            data,
            high_start,
            error_value,
        };
        trie.validate()?;
        Ok(trie)
    }

    /// Wraps parts produced by the builder, whose layout is valid by construction.
    pub(crate) fn from_built_parts(data: Vec<u32>, high_start: u32, error_value: u32) -> Self {
        let trie = Self {
            data,
            high_start,
            error_value,
        };
        debug_assert_eq!(trie.validate(), Ok(()), "builder produced a malformed trie");
        trie
    }

    fn validate(&self) -> Result<(), TrieError> {
        let len = self.data.len();
        if len < INDEX_1_OFFSET + DATA_GRANULARITY || u32::try_from(len).is_err() {
            return Err(TrieError::MalformedIndex);
        }
        let block_in_range = |entry: u32| {
            usize::try_from(entry << INDEX_SHIFT)
                .is_ok_and(|start| start + DATA_BLOCK_LENGTH <= len)
        };
        if !self.data[..INDEX_2_BMP_LENGTH]
            .iter()
            .all(|&entry| block_in_range(entry))
        {
            return Err(TrieError::MalformedIndex);
        }
        if self.high_start > 0x1_0000 {
            let index_1_end =
                INDEX_1_OFFSET + (self.high_start >> SHIFT_1) as usize - OMITTED_BMP_INDEX_1_LENGTH;
            let index_1 = self
                .data
                .get(INDEX_1_OFFSET..index_1_end)
                .ok_or(TrieError::MalformedIndex)?;
            for &index_2_start in index_1 {
                let index_2_start = index_2_start as usize;
                let index_2 = self
                    .data
                    .get(index_2_start..index_2_start + INDEX_2_BLOCK_LENGTH)
                    .ok_or(TrieError::MalformedIndex)?;
                if !index_2.iter().all(|&entry| block_in_range(entry)) {
                    return Err(TrieError::MalformedIndex);
                }
            }
        }
        Ok(())
    }

    /// Returns the value for the given code point.
    ///
    /// Code points above [`MAX_CODE_POINT`] return the error value.
    #[inline]
    pub fn get(&self, code_point: u32) -> u32 {
        let index = if code_point < 0xD800 || (code_point > 0xDBFF && code_point <= 0xFFFF) {
            // Ordinary BMP code point, excluding lead surrogates.
            let block = self.data[(code_point >> SHIFT_2) as usize];
            ((block << INDEX_SHIFT) + (code_point & DATA_MASK)) as usize
        } else if code_point <= 0xFFFF {
            // Lead surrogate code point, which has its own index-2 section.
            let block =
                self.data[LSCP_INDEX_2_OFFSET + ((code_point - 0xD800) >> SHIFT_2) as usize];
            ((block << INDEX_SHIFT) + (code_point & DATA_MASK)) as usize
        } else if code_point < self.high_start {
            let index_1 =
                (INDEX_1_OFFSET - OMITTED_BMP_INDEX_1_LENGTH) + (code_point >> SHIFT_1) as usize;
            let index_2 =
                self.data[index_1] as usize + ((code_point >> SHIFT_2) & INDEX_2_MASK) as usize;
            ((self.data[index_2] << INDEX_SHIFT) + (code_point & DATA_MASK)) as usize
        } else if code_point <= MAX_CODE_POINT {
            self.data.len() - DATA_GRANULARITY
        } else {
            return self.error_value;
        };
        self.data[index]
    }

    /// Returns the value for the given character.
    #[inline]
    pub fn get_char(&self, ch: char) -> u32 {
        self.get(ch as u32)
    }

    /// The first code point that maps to the shared high value.
    pub fn high_start(&self) -> u32 {
        self.high_start
    }

    /// The value returned for code points above [`MAX_CODE_POINT`].
    pub fn error_value(&self) -> u32 {
        self.error_value
    }

    /// The raw index and data words.
    pub fn data(&self) -> &[u32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn rejects_short_data() {
        assert_eq!(
            UnicodeTrie::from_raw_parts(vec![0; 16], 0x1_0000, 0),
            Err(TrieError::MalformedIndex)
        );
    }

    #[test]
    fn rejects_misaligned_high_start() {
        assert_eq!(
            UnicodeTrie::from_raw_parts(vec![0; 4096], 0x1_0001, 0),
            Err(TrieError::InvalidHeader)
        );
    }

    #[test]
    fn rejects_dangling_index_entry() {
        let mut data = vec![0; INDEX_1_OFFSET + DATA_BLOCK_LENGTH];
        data[7] = 0xFFFF;
        assert_eq!(
            UnicodeTrie::from_raw_parts(data, 0x1_0000, 0),
            Err(TrieError::MalformedIndex)
        );
    }

    #[test]
    fn error_value_above_max_code_point() {
        let trie = crate::TrieBuilder::new(1, 99).freeze();
        assert_eq!(trie.get(MAX_CODE_POINT), 1);
        assert_eq!(trie.get(MAX_CODE_POINT + 1), 99);
        assert_eq!(trie.get(u32::MAX), 99);
    }
}
