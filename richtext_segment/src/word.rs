// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word boundaries for navigation and selection.
//!
//! This is the coarse classification editors use to move by word, not the full UAX #29 word
//! algorithm: a word is a run of characters of the same [`WordBoundaryClass`], and whitespace
//! separates words.

use richtext_data::{UnicodeTrie, WordBoundaryClass};

/// Returns the word boundaries of a text, using the word boundary trie.
///
/// The boundaries are the start of the text, the start of every word, every change of class
/// inside a run of non-space characters and the end of the text. [`Ignore`] characters take
/// the class of the text around them. An empty text has no boundaries.
///
/// [`Ignore`]: WordBoundaryClass::Ignore
pub fn find_word_boundaries<'a>(
    trie: &'a UnicodeTrie,
    code_points: &'a [u32],
) -> WordBoundaries<'a> {
    WordBoundaries {
        trie,
        code_points,
        pos: 0,
        word_class: None,
        done: code_points.is_empty(),
    }
}

/// Returns `true` if `position` is one of the boundaries [`find_word_boundaries`] yields.
pub fn is_word_boundary(trie: &UnicodeTrie, code_points: &[u32], position: usize) -> bool {
    find_word_boundaries(trie, code_points)
        .take_while(|&boundary| boundary <= position)
        .any(|boundary| boundary == position)
}

/// Iterator returned by [`find_word_boundaries`].
#[derive(Clone, Debug)]
pub struct WordBoundaries<'a> {
    trie: &'a UnicodeTrie,
    code_points: &'a [u32],
    pos: usize,
    /// The class of the word being scanned, or `None` between words.
    word_class: Option<WordBoundaryClass>,
    done: bool,
}

impl Iterator for WordBoundaries<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let len = self.code_points.len();
        while self.pos < len {
            let pos = self.pos;
            self.pos += 1;
            let class = WordBoundaryClass::from_raw(self.trie.get(self.code_points[pos]));
            match (self.word_class, class) {
                (_, WordBoundaryClass::Ignore) => {}
                (_, WordBoundaryClass::Space) => self.word_class = None,
                (Some(word_class), class) if word_class == class => {}
                (_, class) => {
                    self.word_class = Some(class);
                    if pos > 0 {
                        return Some(pos);
                    }
                }
            }
            if pos == 0 {
                return Some(0);
            }
        }
        self.done = true;
        Some(len)
    }
}
