// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `richtext_data` holds the Unicode character data that Richtext's segmentation algorithms consume.
//!
//! Character properties are stored in a [`UnicodeTrie`], a compact two-stage lookup table that maps
//! any code point to a packed `u32` in constant time. Four tries are used at runtime, one per
//! algorithm, and each has its own value vocabulary:
//!
//! - [`BidiProperties`]: the [`Directionality`] of a character plus its paired-bracket data.
//! - [`LineBreakClass`]: the UAX #14 line breaking class.
//! - [`GraphemeClusterClass`]: the UAX #29 grapheme cluster break class, with
//!   `Extended_Pictographic` folded in.
//! - [`WordBoundaryClass`]: a coarse classification used for word navigation.
//!
//! Tries are produced offline with a [`TrieBuilder`] (see the `richtext_data_gen` crate) and are
//! immutable once frozen, so a single instance can be shared between threads.
//!
//! ## Features
//!
//! - `std` (enabled by default): Loading and writing the compressed binary trie format
//!   ([`UnicodeTrie::from_bytes`], [`UnicodeTrie::to_bytes`]).
//! - `bytemuck`: Implement traits from `bytemuck` on the class enums.
//!
//! ## Example
//!
//! ```
//! use richtext_data::{LineBreakClass, TrieBuilder};
//!
//! let mut builder = TrieBuilder::new(LineBreakClass::XX as u32, LineBreakClass::XX as u32);
//! builder.set_range('a' as u32, 'z' as u32, LineBreakClass::AL as u32, true).unwrap();
//! builder.set(' ' as u32, LineBreakClass::SP as u32).unwrap();
//! let trie = builder.freeze();
//!
//! assert_eq!(trie.get('q' as u32), LineBreakClass::AL as u32);
//! assert_eq!(trie.get(' ' as u32), LineBreakClass::SP as u32);
//! assert_eq!(trie.get(0x1F600), LineBreakClass::XX as u32);
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bidi;
mod builder;
mod error;
mod grapheme;
#[cfg(feature = "bytemuck")]
mod impl_bytemuck;
mod line_break;
#[cfg(feature = "std")]
mod serialize;
mod trie;
mod word;

pub use bidi::{BidiProperties, Directionality, PairedBracketType};
pub use builder::TrieBuilder;
pub use error::TrieError;
pub use grapheme::GraphemeClusterClass;
pub use line_break::LineBreakClass;
pub use trie::{MAX_CODE_POINT, UnicodeTrie};
pub use word::WordBoundaryClass;
