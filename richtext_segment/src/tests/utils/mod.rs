// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod conformance;
mod env;

pub(crate) use conformance::{
    BidiCharacterCase, BidiClassCase, BreakCase, parse_bidi_character_test, parse_bidi_test,
    parse_break_test,
};
pub(crate) use env::{classes, code_points, test_data_file};
