// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;
use std::string::String;
use std::sync::OnceLock;
use std::vec::Vec;

use richtext_data_gen::UnicodeData;

use crate::UnicodeClasses;

/// Environment variable naming a directory with the Unicode conformance test files.
const TEST_DATA_VAR: &str = "UNICODE_TEST_DATA";

/// The tries built from the compiled Unicode data, shared by every test in the process.
pub(crate) fn classes() -> &'static UnicodeClasses {
    static CLASSES: OnceLock<UnicodeClasses> = OnceLock::new();
    CLASSES.get_or_init(|| {
        let data = UnicodeData::compiled().expect("compiled Unicode data should build");
        UnicodeClasses::new(data.bidi, data.line_break, data.grapheme, data.word_boundary)
    })
}

pub(crate) fn code_points(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}

/// Reads a conformance test file, such as `LineBreakTest.txt`, from the `UNICODE_TEST_DATA`
/// directory.
pub(crate) fn test_data_file(name: &str) -> String {
    let dir = std::env::var_os(TEST_DATA_VAR).unwrap_or_else(|| {
        panic!("set {TEST_DATA_VAR} to a directory containing {name}");
    });
    let path = PathBuf::from(dir).join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()))
}
