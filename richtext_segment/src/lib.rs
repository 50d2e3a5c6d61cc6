// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `richtext_segment` implements the Unicode text segmentation algorithms that sit beneath
//! Richtext's layout engine:
//!
//! - The Unicode Bidirectional Algorithm ([UAX #9]): [`BidiAlgorithm`] resolves the embedding
//!   level of every character, including paired brackets and isolates, and [`BidiParagraph`]
//!   reorders lines for display.
//! - The Unicode Line Breaking Algorithm ([UAX #14]): [`LineBreaker`] yields the legal wrap
//!   positions of a text, and [`find_mandatory_breaks`] the forced ones only.
//! - Grapheme cluster boundaries ([UAX #29]): [`GraphemeClusters`].
//! - A coarse word boundary scan for navigation: [`find_word_boundaries`].
//!
//! Every algorithm operates on a borrowed buffer of code points and classifies characters with
//! one of the property tries from `richtext_data`. The tries are owned by the application,
//! usually bundled in a [`UnicodeClasses`], and are never global.
//!
//! ## Features
//!
//! - `std` (enabled by default): [`UnicodeClasses::from_resources`], which loads the tries from
//!   the compressed resources written by `richtext_data_gen`.
//!
//! [UAX #9]: https://www.unicode.org/reports/tr9/
//! [UAX #14]: https://www.unicode.org/reports/tr14/
//! [UAX #29]: https://www.unicode.org/reports/tr29/

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
#[cfg(any(test, feature = "std"))]
extern crate std;

mod bidi;
mod classes;
mod grapheme;
mod line_break;
mod word;

#[cfg(test)]
mod tests;

pub use bidi::{
    BaseDirection, BidiAlgorithm, BidiData, BidiParagraph, BidiRun, InvalidDirectionError,
    MAX_DEPTH, MAX_PAIRING_DEPTH, TextDirection,
};
pub use classes::UnicodeClasses;
pub use grapheme::{GraphemeBoundaries, GraphemeClusters, GraphemeClusterRanges};
pub use line_break::{
    BreakOpportunity, BreakState, LineBreak, LineBreaker, MandatoryBreaks, find_mandatory_breaks,
};
pub use word::{WordBoundaries, find_word_boundaries, is_word_boundary};

pub use richtext_data;
