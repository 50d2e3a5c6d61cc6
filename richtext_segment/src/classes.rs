// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use richtext_data::{
    BidiProperties, GraphemeClusterClass, LineBreakClass, UnicodeTrie, WordBoundaryClass,
};

use crate::{BidiData, GraphemeClusters, LineBreaker};

/// The four property tries the segmentation algorithms consume.
///
/// The application builds this once, for example from the resources written by
/// `richtext_data_gen`, and shares it. Every algorithm borrows the trie it needs.
#[derive(Clone, Debug)]
pub struct UnicodeClasses {
    bidi: UnicodeTrie,
    line_break: UnicodeTrie,
    grapheme: UnicodeTrie,
    word_boundary: UnicodeTrie,
}

impl UnicodeClasses {
    /// Bundles four tries.
    pub fn new(
        bidi: UnicodeTrie,
        line_break: UnicodeTrie,
        grapheme: UnicodeTrie,
        word_boundary: UnicodeTrie,
    ) -> Self {
        Self {
            bidi,
            line_break,
            grapheme,
            word_boundary,
        }
    }

    /// Loads the tries from their compressed binary resources.
    #[cfg(feature = "std")]
    pub fn from_resources(
        bidi: &[u8],
        line_break: &[u8],
        grapheme: &[u8],
        word_boundary: &[u8],
    ) -> Result<Self, richtext_data::TrieError> {
        Ok(Self::new(
            UnicodeTrie::from_bytes(bidi)?,
            UnicodeTrie::from_bytes(line_break)?,
            UnicodeTrie::from_bytes(grapheme)?,
            UnicodeTrie::from_bytes(word_boundary)?,
        ))
    }

    /// The bidi properties of a code point.
    pub fn bidi(&self, code_point: u32) -> BidiProperties {
        BidiProperties::from(self.bidi.get(code_point))
    }

    /// The line break class of a code point.
    pub fn line_break(&self, code_point: u32) -> LineBreakClass {
        LineBreakClass::from_raw(self.line_break.get(code_point))
    }

    /// The grapheme cluster class of a code point.
    pub fn grapheme(&self, code_point: u32) -> GraphemeClusterClass {
        GraphemeClusterClass::from_raw(self.grapheme.get(code_point))
    }

    /// The word boundary class of a code point.
    pub fn word_boundary(&self, code_point: u32) -> WordBoundaryClass {
        WordBoundaryClass::from_raw(self.word_boundary.get(code_point))
    }

    /// The bidi trie.
    pub fn bidi_trie(&self) -> &UnicodeTrie {
        &self.bidi
    }

    /// The line break trie.
    pub fn line_break_trie(&self) -> &UnicodeTrie {
        &self.line_break
    }

    /// The grapheme cluster trie.
    pub fn grapheme_trie(&self) -> &UnicodeTrie {
        &self.grapheme
    }

    /// The word boundary trie.
    pub fn word_boundary_trie(&self) -> &UnicodeTrie {
        &self.word_boundary
    }

    /// Classifies `code_points` for the bidi algorithm.
    pub fn bidi_data(&self, code_points: &[u32]) -> BidiData {
        BidiData::from_code_points(&self.bidi, code_points)
    }

    /// Creates a line breaker over `code_points`.
    pub fn line_breaker<'a>(&'a self, code_points: &'a [u32]) -> LineBreaker<'a> {
        let mut breaker = LineBreaker::new(&self.line_break);
        breaker.reset(code_points);
        breaker
    }

    /// Creates a grapheme cluster segmenter.
    pub fn grapheme_clusters(&self) -> GraphemeClusters<'_> {
        GraphemeClusters::new(&self.grapheme)
    }
}
