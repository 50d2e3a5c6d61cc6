// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutable trie construction.

use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::trie::{
    CP_PER_INDEX_1_ENTRY, DATA_BLOCK_LENGTH, DATA_GRANULARITY, INDEX_1_OFFSET,
    INDEX_2_BLOCK_LENGTH, INDEX_2_BMP_LENGTH, INDEX_SHIFT, LSCP_INDEX_2_LENGTH,
    LSCP_INDEX_2_OFFSET, SHIFT_2, UTF8_2B_INDEX_2_LENGTH,
    UTF8_2B_INDEX_2_OFFSET,
};
use crate::{MAX_CODE_POINT, TrieError, UnicodeTrie};

/// Code points below this are stored linearly so that 64-code-point UTF-8 blocks stay contiguous.
const LINEAR_DATA_LIMIT: u32 = 0x800;

/// Accumulates code point values and compacts them into a [`UnicodeTrie`].
///
/// Building happens in two phases: values are first written into a dense table with
/// [`set`](Self::set) and [`set_range`](Self::set_range), then [`freeze`](Self::freeze) shares
/// identical data and index blocks to produce the compact lookup form. Later writes win over
/// earlier ones.
pub struct TrieBuilder {
    values: Vec<u32>,
    initial_value: u32,
    error_value: u32,
}

impl core::fmt::Debug for TrieBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrieBuilder")
            .field("initial_value", &self.initial_value)
            .field("error_value", &self.error_value)
            .finish_non_exhaustive()
    }
}

impl TrieBuilder {
    /// Creates a builder where every code point maps to `initial_value`.
    pub fn new(initial_value: u32, error_value: u32) -> Self {
        Self {
            values: vec![initial_value; MAX_CODE_POINT as usize + 1],
            initial_value,
            error_value,
        }
    }

    /// Sets the value for a single code point.
    pub fn set(&mut self, code_point: u32, value: u32) -> Result<(), TrieError> {
        let slot = self
            .values
            .get_mut(code_point as usize)
            .ok_or(TrieError::InvalidCodePoint(code_point))?;
        *slot = value;
        Ok(())
    }

    /// Sets the value for every code point in `start..=end`.
    ///
    /// When `overwrite` is false, only code points that still hold the initial value are changed.
    pub fn set_range(
        &mut self,
        start: u32,
        end: u32,
        value: u32,
        overwrite: bool,
    ) -> Result<(), TrieError> {
        if end > MAX_CODE_POINT {
            return Err(TrieError::InvalidCodePoint(end));
        }
        if start > end {
            return Err(TrieError::InvalidRange { start, end });
        }
        let range = &mut self.values[start as usize..=end as usize];
        if overwrite {
            range.fill(value);
        } else {
            for slot in range.iter_mut().filter(|slot| **slot == self.initial_value) {
                *slot = value;
            }
        }
        Ok(())
    }

    /// Returns the value currently set for a code point, or the error value if it is invalid.
    pub fn get(&self, code_point: u32) -> u32 {
        self.values
            .get(code_point as usize)
            .copied()
            .unwrap_or(self.error_value)
    }

    /// Compacts the accumulated values into an immutable trie.
    pub fn freeze(&self) -> UnicodeTrie {
        let high_value = self.values[MAX_CODE_POINT as usize];
        let high_start = self.high_start(high_value);

        // Data blocks, with offsets relative to the start of the data section.
        let mut data: Vec<u32> = Vec::new();
        let mut data_blocks: HashMap<&[u32], u32> = HashMap::new();
        let mut block_offset = |start: u32| -> u32 {
            let block = &self.values[start as usize..start as usize + DATA_BLOCK_LENGTH];
            if start >= LINEAR_DATA_LIMIT {
                if let Some(&offset) = data_blocks.get(block) {
                    return offset;
                }
            }
            let offset = to_u32(data.len());
            data.extend_from_slice(block);
            data_blocks.entry(block).or_insert(offset);
            offset
        };

        let bmp_blocks: Vec<u32> = (0..0x1_0000_u32)
            .step_by(DATA_BLOCK_LENGTH)
            .map(&mut block_offset)
            .collect();

        // Index-2 blocks for the supplementary planes, shared when identical.
        let mut index_1: Vec<usize> = Vec::new();
        let mut index_2_blocks: Vec<[u32; INDEX_2_BLOCK_LENGTH]> = Vec::new();
        let mut index_2_lookup: HashMap<[u32; INDEX_2_BLOCK_LENGTH], usize> = HashMap::new();
        for start in (0x1_0000..high_start).step_by(CP_PER_INDEX_1_ENTRY as usize) {
            let mut block = [0_u32; INDEX_2_BLOCK_LENGTH];
            for (i, entry) in block.iter_mut().enumerate() {
                *entry = block_offset(start + ((i as u32) << SHIFT_2));
            }
            let position = *index_2_lookup.entry(block).or_insert_with(|| {
                index_2_blocks.push(block);
                index_2_blocks.len() - 1
            });
            index_1.push(position);
        }

        let index_2_start = INDEX_1_OFFSET + index_1.len();
        let index_length = (index_2_start + index_2_blocks.len() * INDEX_2_BLOCK_LENGTH)
            .next_multiple_of(DATA_GRANULARITY);
        let data_start = u32::try_from(index_length).unwrap_or(u32::MAX);
        let shifted = |offset: u32| (data_start + offset) >> INDEX_SHIFT;

        let mut trie = Vec::with_capacity(index_length + data.len() + DATA_GRANULARITY);
        trie.extend(bmp_blocks.iter().map(|&offset| shifted(offset)));
        debug_assert_eq!(trie.len(), LSCP_INDEX_2_OFFSET, "BMP index-2 size");
        // Lead surrogate code points share the values of the code units.
        let lead_surrogates = (0xD800 >> SHIFT_2) as usize;
        trie.extend_from_within(lead_surrogates..lead_surrogates + LSCP_INDEX_2_LENGTH);
        debug_assert_eq!(trie.len(), INDEX_2_BMP_LENGTH, "BMP index-2 size");
        // Two-byte UTF-8 lookups use the first of each pair of linear 32-value blocks.
        for i in 0..UTF8_2B_INDEX_2_LENGTH {
            let entry = trie[i * 2];
            trie.push(entry);
        }
        debug_assert_eq!(trie.len(), UTF8_2B_INDEX_2_OFFSET + UTF8_2B_INDEX_2_LENGTH, "index size");
        trie.extend(
            index_1
                .iter()
                .map(|&position| to_u32(index_2_start + position * INDEX_2_BLOCK_LENGTH)),
        );
        for block in &index_2_blocks {
            trie.extend(block.iter().map(|&offset| shifted(offset)));
        }
        trie.resize(index_length, 0);
        trie.extend_from_slice(&data);
        trie.extend_from_slice(&[high_value; DATA_GRANULARITY]);

        log::debug!(
            "froze trie: {} index words, {} data words, high start {:#X}",
            index_length,
            data.len() + DATA_GRANULARITY,
            high_start
        );

        UnicodeTrie::from_built_parts(trie, high_start, self.error_value)
    }

    /// Finds the start of the trailing run of index-1 blocks that hold only `high_value`.
    fn high_start(&self, high_value: u32) -> u32 {
        let mut high_start = MAX_CODE_POINT + 1;
        while high_start > 0x1_0000 {
            let block_start = high_start - CP_PER_INDEX_1_ENTRY;
            if self.values[block_start as usize..high_start as usize]
                .iter()
                .any(|&v| v != high_value)
            {
                break;
            }
            high_start = block_start;
        }
        high_start
    }
}

/// Trie offsets always fit in 32 bits; the full code point range needs far fewer words.
fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
