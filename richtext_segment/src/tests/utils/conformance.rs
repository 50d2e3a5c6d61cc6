// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsers for the Unicode conformance test file formats.

use std::vec::Vec;

use richtext_data::Directionality;

/// A test case from `BidiTest.txt`.
#[derive(Clone, Debug)]
pub(crate) struct BidiClassCase {
    pub(crate) line: usize,
    pub(crate) types: Vec<Directionality>,
    /// The paragraph levels to run with, `None` for automatic detection.
    pub(crate) paragraph_levels: Vec<Option<u8>>,
    /// The expected levels, `None` where the character is removed by rule X9.
    pub(crate) levels: Vec<Option<u8>>,
}

/// A test case from `BidiCharacterTest.txt`.
#[derive(Clone, Debug)]
pub(crate) struct BidiCharacterCase {
    pub(crate) line: usize,
    pub(crate) code_points: Vec<u32>,
    pub(crate) paragraph_level: Option<u8>,
    pub(crate) resolved_paragraph_level: u8,
    pub(crate) levels: Vec<Option<u8>>,
    /// The visual order, leaving out characters removed by rule X9.
    pub(crate) order: Vec<usize>,
}

/// A test case from `LineBreakTest.txt` or `GraphemeBreakTest.txt`.
#[derive(Clone, Debug)]
pub(crate) struct BreakCase {
    pub(crate) line: usize,
    pub(crate) code_points: Vec<u32>,
    /// Every position marked `÷`, in increasing order.
    pub(crate) boundaries: Vec<usize>,
}

/// Yields the one-based line number and content of each line, with comments stripped and
/// blank lines skipped.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(i, line)| {
        let line = line.split('#').next().unwrap_or_default().trim();
        (!line.is_empty()).then_some((i + 1, line))
    })
}

fn parse_levels(field: &str) -> Vec<Option<u8>> {
    field
        .split_whitespace()
        .map(|level| match level {
            "x" => None,
            level => Some(level.parse().expect("level should be a number")),
        })
        .collect()
}

fn parse_hex(field: &str) -> Vec<u32> {
    field
        .split_whitespace()
        .map(|cp| u32::from_str_radix(cp, 16).expect("code point should be hex"))
        .collect()
}

pub(crate) fn parse_bidi_test(text: &str) -> Vec<BidiClassCase> {
    let mut levels = Vec::new();
    let mut cases = Vec::new();
    for (line, content) in data_lines(text) {
        if let Some(rest) = content.strip_prefix("@Levels:") {
            levels = parse_levels(rest);
            continue;
        }
        if content.starts_with('@') {
            continue;
        }
        let (types, bitset) = content.split_once(';').expect("case should have a bitset");
        let types = types
            .split_whitespace()
            .map(|name| Directionality::parse(name).expect("bidi class should be known"))
            .collect();
        let bitset: u8 = bitset.trim().parse().expect("bitset should be a number");
        let paragraph_levels = [(1, None), (2, Some(0)), (4, Some(1))]
            .into_iter()
            .filter(|(bit, _)| bitset & bit != 0)
            .map(|(_, level)| level)
            .collect();
        cases.push(BidiClassCase {
            line,
            types,
            paragraph_levels,
            levels: levels.clone(),
        });
    }
    cases
}

pub(crate) fn parse_bidi_character_test(text: &str) -> Vec<BidiCharacterCase> {
    data_lines(text)
        .map(|(line, content)| {
            let fields: Vec<&str> = content.split(';').collect();
            assert_eq!(fields.len(), 5, "line {line} should have five fields");
            let paragraph_level = match fields[1].trim() {
                "0" => Some(0),
                "1" => Some(1),
                _ => None,
            };
            BidiCharacterCase {
                line,
                code_points: parse_hex(fields[0]),
                paragraph_level,
                resolved_paragraph_level: fields[2].trim().parse().expect("level"),
                levels: parse_levels(fields[3]),
                order: fields[4]
                    .split_whitespace()
                    .map(|i| i.parse().expect("index"))
                    .collect(),
            }
        })
        .collect()
}

pub(crate) fn parse_break_test(text: &str) -> Vec<BreakCase> {
    data_lines(text)
        .map(|(line, content)| {
            let mut code_points = Vec::new();
            let mut boundaries = Vec::new();
            for token in content.split_whitespace() {
                match token {
                    "÷" => boundaries.push(code_points.len()),
                    "×" => {}
                    cp => code_points
                        .push(u32::from_str_radix(cp, 16).expect("code point should be hex")),
                }
            }
            BreakCase {
                line,
                code_points,
                boundaries,
            }
        })
        .collect()
}

#[test]
fn parses_bidi_test_blocks() {
    let cases = parse_bidi_test(
        "# comment\n@Levels: x 1\n@Reorder: 1\nLRE R; 7\n\n@Levels: 0\nL; 2 # trailing\n",
    );
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].line, 4);
    assert_eq!(cases[0].types, [Directionality::LRE, Directionality::R]);
    assert_eq!(cases[0].paragraph_levels, [None, Some(0), Some(1)]);
    assert_eq!(cases[0].levels, [None, Some(1)]);
    assert_eq!(cases[1].paragraph_levels, [Some(0)]);
}

#[test]
fn parses_break_test_lines() {
    let cases = parse_break_test("× 0041 × 0020 ÷ 0042 ÷\t#  × [0.3] LATIN CAPITAL LETTER A\n");
    assert_eq!(cases[0].code_points, [0x41, 0x20, 0x42]);
    assert_eq!(cases[0].boundaries, [2, 3]);
}
