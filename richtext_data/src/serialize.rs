// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The compressed binary resource format.
//!
//! A resource starts with a 12-byte big-endian header: `high_start` (`i32`), `error_value`
//! (`u32`) and the byte length of the uncompressed data array (`i32`). The rest of the resource is
//! the data array as little-endian `u32` words, compressed with raw DEFLATE twice.

use alloc::vec::Vec;
use std::io::{self, Read, Write};

use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use crate::{MAX_CODE_POINT, TrieError, UnicodeTrie};

const HEADER_LEN: usize = 12;

impl UnicodeTrie {
    /// Loads a trie from its compressed binary resource.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TrieError> {
        let header = bytes.get(..HEADER_LEN).ok_or(TrieError::TruncatedHeader)?;
        let field = |i: usize| [header[i], header[i + 1], header[i + 2], header[i + 3]];
        let high_start =
            u32::try_from(i32::from_be_bytes(field(0))).map_err(|_| TrieError::InvalidHeader)?;
        let error_value = u32::from_be_bytes(field(4));
        let byte_len =
            usize::try_from(i32::from_be_bytes(field(8))).map_err(|_| TrieError::InvalidHeader)?;
        if byte_len % 4 != 0 || high_start > MAX_CODE_POINT + 1 {
            return Err(TrieError::InvalidHeader);
        }

        let inner_limit = deflate_bound(byte_len);
        let inner = inflate(&bytes[HEADER_LEN..], inner_limit)?;
        if inner.len() > inner_limit {
            log::debug!("trie resource inflates past {inner_limit} bytes");
            return Err(TrieError::Inflate);
        }
        let raw = inflate(&inner, byte_len)?;
        if raw.len() != byte_len {
            return Err(TrieError::LengthMismatch {
                expected: byte_len,
                actual: raw.len(),
            });
        }
        let data: Vec<u32> = raw
            .chunks_exact(4)
            .map(|word| u32::from_le_bytes([word[0], word[1], word[2], word[3]]))
            .collect();

        log::debug!(
            "loaded trie: {} compressed bytes, {} words, high start {:#X}",
            bytes.len(),
            data.len(),
            high_start
        );
        Self::from_raw_parts(data, high_start, error_value)
    }

    /// Writes the compressed binary resource for this trie.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let byte_len = self.data().len() * 4;
        let header_value = |value: u32| {
            i32::try_from(value).map_err(|_| io::Error::other("trie is too large to serialize"))
        };
        let high_start = header_value(self.high_start())?;
        let byte_len_field = u32::try_from(byte_len)
            .map_err(|_| io::Error::other("trie is too large to serialize"))
            .and_then(header_value)?;

        let mut raw = Vec::with_capacity(byte_len);
        for word in self.data() {
            raw.extend_from_slice(&word.to_le_bytes());
        }
        let inner = deflate(&raw)?;
        let outer = deflate(&inner)?;

        writer.write_all(&high_start.to_be_bytes())?;
        writer.write_all(&self.error_value().to_be_bytes())?;
        writer.write_all(&byte_len_field.to_be_bytes())?;
        writer.write_all(&outer)?;
        Ok(())
    }

    /// Returns the compressed binary resource for this trie.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// The largest raw DEFLATE stream zlib produces for `len` bytes of input.
fn deflate_bound(len: usize) -> usize {
    len + (len >> 12) + (len >> 14) + (len >> 25) + 13
}

/// Inflates raw DEFLATE data, reading at most one byte past `limit`.
fn inflate(input: &[u8], limit: usize) -> Result<Vec<u8>, TrieError> {
    let mut output = Vec::new();
    let result = DeflateDecoder::new(input)
        .take(limit as u64 + 1)
        .read_to_end(&mut output);
    result.map_err(|err| {
        log::debug!("failed to inflate trie resource: {err}");
        TrieError::Inflate
    })?;
    Ok(output)
}

fn deflate(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(input)?;
    encoder.finish()
}
