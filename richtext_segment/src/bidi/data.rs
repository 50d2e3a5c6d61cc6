// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use richtext_data::{BidiProperties, Directionality, PairedBracketType, UnicodeTrie};

/// The bidi classification of a buffer of code points.
///
/// Holds one entry per code point in each of the three arrays consumed by
/// [`BidiAlgorithm`](super::BidiAlgorithm). The buffers are kept between calls to
/// [`classify`](Self::classify).
#[derive(Clone, Debug, Default)]
pub struct BidiData {
    types: Vec<Directionality>,
    bracket_types: Vec<PairedBracketType>,
    bracket_ids: Vec<u32>,
    has_brackets: bool,
    has_embeddings: bool,
    has_isolates: bool,
}

impl BidiData {
    /// Creates empty classification data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies `code_points` with the bidi trie.
    pub fn from_code_points(trie: &UnicodeTrie, code_points: &[u32]) -> Self {
        let mut data = Self::new();
        data.classify(trie, code_points);
        data
    }

    /// Replaces the contents with the classification of `code_points`.
    pub fn classify(&mut self, trie: &UnicodeTrie, code_points: &[u32]) {
        self.types.clear();
        self.bracket_types.clear();
        self.bracket_ids.clear();
        self.has_brackets = false;
        self.has_embeddings = false;
        self.has_isolates = false;

        for &cp in code_points {
            let props = BidiProperties::from(trie.get(cp));
            let directionality = props.directionality();
            let bracket_type = props.paired_bracket_type();
            self.has_brackets |= bracket_type != PairedBracketType::None;
            self.has_embeddings |=
                directionality.is_embedding_initiator() || directionality == Directionality::PDF;
            self.has_isolates |=
                directionality.is_isolate_initiator() || directionality == Directionality::PDI;
            self.types.push(directionality);
            self.bracket_types.push(bracket_type);
            self.bracket_ids.push(props.bracket_id(cp));
        }
    }

    /// Number of classified code points.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no code points were classified.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The directionality of each code point.
    pub fn types(&self) -> &[Directionality] {
        &self.types
    }

    /// The paired bracket type of each code point.
    pub fn bracket_types(&self) -> &[PairedBracketType] {
        &self.bracket_types
    }

    /// The bracket family of each code point, `0` for non-brackets.
    ///
    /// An opening and a closing bracket pair up when their ids are equal.
    pub fn bracket_ids(&self) -> &[u32] {
        &self.bracket_ids
    }

    /// Whether any code point is a paired bracket.
    pub fn has_brackets(&self) -> bool {
        self.has_brackets
    }

    /// Whether any code point is an embedding or override initiator, or a PDF.
    pub fn has_embeddings(&self) -> bool {
        self.has_embeddings
    }

    /// Whether any code point is an isolate initiator or a PDI.
    pub fn has_isolates(&self) -> bool {
        self.has_isolates
    }
}
