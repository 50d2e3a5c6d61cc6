// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::vec::Vec;

use crate::{find_word_boundaries, is_word_boundary};

use super::utils::{classes, code_points};

fn boundaries(text: &str) -> Vec<usize> {
    let code_points = code_points(text);
    find_word_boundaries(classes().word_boundary_trie(), &code_points).collect()
}

#[test]
fn words_and_punctuation() {
    assert_eq!(boundaries("Hello, world!"), [0, 5, 7, 12, 13]);
    assert_eq!(boundaries("snake_case 42"), [0, 11, 13]);
}

#[test]
fn marks_stay_in_their_word() {
    assert_eq!(boundaries("cafe\u{301} au"), [0, 6, 8]);
}

#[test]
fn non_latin_words() {
    assert_eq!(boundaries("\u{5E9}\u{5DC}\u{5D5}\u{5DD} \u{4E16}\u{754C}"), [0, 5, 7]);
}

#[test]
fn point_queries_match_enumeration() {
    let text = code_points("a-b  c");
    let trie = classes().word_boundary_trie();
    let queried: Vec<usize> = (0..=text.len())
        .filter(|&pos| is_word_boundary(trie, &text, pos))
        .collect();
    assert_eq!(queried, [0, 1, 2, 5, 6]);
}
