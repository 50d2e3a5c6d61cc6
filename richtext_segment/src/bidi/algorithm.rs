// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level resolution: rules P2 through I2, plus the paragraph part of L1.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use richtext_data::{Directionality, PairedBracketType};
use smallvec::SmallVec;

use super::brackets::{BracketInput, BracketResolver, BracketSequence};
use super::{BaseDirection, BidiData, BidiParagraph};

use richtext_data::Directionality::{
    AL, AN, B, BN, CS, EN, ES, ET, FSI, L, LRE, LRI, LRO, NSM, ON, PDF, PDI, R, RLE, RLI, RLO, S,
    WS,
};

/// The deepest explicit embedding level (BD2).
pub const MAX_DEPTH: u8 = 125;

/// Marks an isolate initiator or PDI without a match.
const NO_MATCH: usize = usize::MAX;

/// The kinds of characters present in a text. A pass whose characters are absent is skipped.
#[derive(Clone, Copy, Debug)]
struct TextFeatures {
    /// Paired brackets, for BD16 and N0.
    brackets: bool,
    /// Embedding, override and isolate controls, for X1 through X8.
    explicit: bool,
}

impl TextFeatures {
    fn scan(types: &[Directionality], bracket_types: &[PairedBracketType]) -> Self {
        Self {
            brackets: bracket_types.iter().any(|&t| t != PairedBracketType::None),
            explicit: types.iter().any(|&t| {
                t.is_embedding_initiator() || t.is_isolate_initiator() || matches!(t, PDF | PDI)
            }),
        }
    }
}

pub(super) const fn direction_of_level(level: u8) -> Directionality {
    if level & 1 == 0 { L } else { R }
}

/// An entry of the directional status stack.
#[derive(Clone, Copy, Debug)]
struct DirectionalStatus {
    level: u8,
    /// `L` or `R` inside an override.
    override_type: Option<Directionality>,
    isolate: bool,
}

/// An isolating run sequence (BD13), stored as a range into the flat index list.
#[derive(Clone, Debug)]
struct RunSequence {
    indices: Range<usize>,
    level: u8,
    sos: Directionality,
    eos: Directionality,
}

/// The bidi engine.
///
/// Holds the scratch buffers used while resolving a paragraph, so that processing many
/// paragraphs with one engine allocates only for the results. All entry points take
/// `&mut self`; use one engine per thread.
///
/// ```
/// use richtext_segment::BidiAlgorithm;
/// use richtext_segment::richtext_data::Directionality::{AN, L, R, WS};
///
/// let mut bidi = BidiAlgorithm::new();
/// let paragraph = bidi.process_classes(&[R, WS, AN, WS, L], &[], &[], None);
/// assert_eq!(paragraph.paragraph_level(), 1);
/// assert_eq!(paragraph.levels(), &[1, 1, 2, 1, 2]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BidiAlgorithm {
    /// Types as resolved so far, indexed by text position.
    types: Vec<Directionality>,
    matching_pdi: Vec<usize>,
    matching_initiator: Vec<usize>,
    stack: SmallVec<[DirectionalStatus; 16]>,
    /// Level run of each text position that survives X9.
    run_of: Vec<usize>,
    /// Text positions of all level runs, concatenated.
    run_indices: Vec<usize>,
    runs: Vec<Range<usize>>,
    /// Text positions of all isolating run sequences, concatenated.
    sequence_indices: Vec<usize>,
    sequences: Vec<RunSequence>,
    sequence_types: Vec<Directionality>,
    brackets: BracketResolver,
}

impl BidiAlgorithm {
    /// Creates an engine with empty scratch buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the embedding levels of classified text.
    ///
    /// Uses the feature flags of `data` to skip bracket pairing when there are no brackets and
    /// the explicit level stack when there are no embeddings or isolates.
    pub fn process(&mut self, data: &BidiData, direction: BaseDirection) -> BidiParagraph {
        let features = TextFeatures {
            brackets: data.has_brackets(),
            explicit: data.has_embeddings() || data.has_isolates(),
        };
        self.run(
            data.types(),
            data.bracket_types(),
            data.bracket_ids(),
            direction.paragraph_level(),
            features,
        )
    }

    /// Resolves the embedding levels of a sequence of bidi classes.
    ///
    /// `bracket_types` and `bracket_ids` may be shorter than `types`, or empty; missing entries
    /// are treated as non-brackets. With `paragraph_level` of `None` the level is detected from
    /// the first strong character; otherwise only its parity is used.
    ///
    /// Each paragraph separator (`B`) ends a paragraph. Paragraphs are resolved independently,
    /// and with automatic detection each one gets its own level.
    pub fn process_classes(
        &mut self,
        types: &[Directionality],
        bracket_types: &[PairedBracketType],
        bracket_ids: &[u32],
        paragraph_level: Option<u8>,
    ) -> BidiParagraph {
        let features = TextFeatures::scan(types, bracket_types);
        self.run(types, bracket_types, bracket_ids, paragraph_level, features)
    }

    fn run(
        &mut self,
        types: &[Directionality],
        bracket_types: &[PairedBracketType],
        bracket_ids: &[u32],
        paragraph_level: Option<u8>,
        features: TextFeatures,
    ) -> BidiParagraph {
        let len = types.len();
        let paragraph_level = paragraph_level.map(|level| level & 1);
        self.types.clear();
        self.types.extend_from_slice(types);
        self.matching_pdi.clear();
        self.matching_pdi.resize(len, NO_MATCH);
        self.matching_initiator.clear();
        self.matching_initiator.resize(len, NO_MATCH);
        self.run_of.clear();
        self.run_of.resize(len, NO_MATCH);

        let input = BracketInput {
            original_types: types,
            bracket_types,
            bracket_ids,
        };
        let mut levels = vec![0; len];
        let mut paragraphs = Vec::new();
        let mut start = 0;
        while start < len {
            let end = types[start..]
                .iter()
                .position(|&t| t == B)
                .map_or(len, |offset| start + offset + 1);
            let level =
                self.resolve_paragraph(&input, start..end, paragraph_level, features, &mut levels);
            paragraphs.push((start..end, level));
            start = end;
        }
        if paragraphs.is_empty() {
            paragraphs.push((0..0, paragraph_level.unwrap_or(0)));
        }

        BidiParagraph::new(levels, types.to_vec(), paragraphs)
    }

    fn resolve_paragraph(
        &mut self,
        input: &BracketInput<'_>,
        range: Range<usize>,
        paragraph_level: Option<u8>,
        features: TextFeatures,
        levels: &mut [u8],
    ) -> u8 {
        let Range { start, end } = range;
        if features.explicit {
            self.match_isolates(start, end);
        }
        let level =
            paragraph_level.unwrap_or_else(|| self.first_strong_level(start, end).unwrap_or(0));

        if features.explicit {
            self.resolve_explicit(start, end, level, levels);
        } else {
            levels[start..end].fill(level);
        }
        self.build_level_runs(input.original_types, start, end, levels);
        self.build_sequences(input.original_types, start, end, level, levels);
        self.resolve_sequences(input, features.brackets, levels);
        assign_removed_levels(input.original_types, start, end, level, levels);
        reset_paragraph_whitespace(input.original_types, start, end, level, levels);
        level
    }

    /// BD9: pairs isolate initiators with PDIs. An unmatched initiator matches the end of the
    /// paragraph.
    fn match_isolates(&mut self, start: usize, end: usize) {
        let mut open: SmallVec<[usize; 16]> = SmallVec::new();
        for i in start..end {
            match self.types[i] {
                LRI | RLI | FSI => {
                    self.matching_pdi[i] = end;
                    open.push(i);
                }
                PDI => {
                    if let Some(initiator) = open.pop() {
                        self.matching_pdi[initiator] = i;
                        self.matching_initiator[i] = initiator;
                    }
                }
                _ => {}
            }
        }
    }

    /// P2 and P3: the level implied by the first strong character, skipping isolates.
    fn first_strong_level(&self, start: usize, end: usize) -> Option<u8> {
        let mut i = start;
        while i < end {
            match self.types[i] {
                L => return Some(0),
                R | AL => return Some(1),
                LRI | RLI | FSI => i = self.matching_pdi[i],
                _ => {}
            }
            i += 1;
        }
        None
    }

    /// X1 through X8.
    fn resolve_explicit(
        &mut self,
        start: usize,
        end: usize,
        paragraph_level: u8,
        levels: &mut [u8],
    ) {
        self.stack.clear();
        let mut current = DirectionalStatus {
            level: paragraph_level,
            override_type: None,
            isolate: false,
        };
        let mut overflow_isolates = 0_usize;
        let mut overflow_embeddings = 0_usize;
        let mut valid_isolates = 0_usize;

        for i in start..end {
            let t = self.types[i];
            match t {
                RLE | LRE | RLO | LRO | RLI | LRI | FSI => {
                    let isolate = t.is_isolate_initiator();
                    let rtl = match t {
                        RLE | RLO | RLI => true,
                        FSI => self.first_strong_level(i + 1, self.matching_pdi[i]) == Some(1),
                        _ => false,
                    };
                    if isolate {
                        levels[i] = current.level;
                        if let Some(override_type) = current.override_type {
                            self.types[i] = override_type;
                        }
                    }
                    let level = if rtl {
                        (current.level + 1) | 1
                    } else {
                        (current.level + 2) & !1
                    };
                    if level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embeddings == 0 {
                        if isolate {
                            valid_isolates += 1;
                        }
                        self.stack.push(current);
                        current = DirectionalStatus {
                            level,
                            override_type: match t {
                                LRO => Some(L),
                                RLO => Some(R),
                                _ => None,
                            },
                            isolate,
                        };
                        if !isolate {
                            levels[i] = level;
                        }
                    } else {
                        log::trace!("explicit level overflow at text position {i}");
                        if isolate {
                            overflow_isolates += 1;
                        } else {
                            if overflow_isolates == 0 {
                                overflow_embeddings += 1;
                            }
                            levels[i] = current.level;
                        }
                    }
                }
                PDI => {
                    if overflow_isolates > 0 {
                        overflow_isolates -= 1;
                    } else if valid_isolates > 0 {
                        overflow_embeddings = 0;
                        while !current.isolate {
                            match self.stack.pop() {
                                Some(entry) => current = entry,
                                None => break,
                            }
                        }
                        if let Some(entry) = self.stack.pop() {
                            current = entry;
                        }
                        valid_isolates -= 1;
                    }
                    levels[i] = current.level;
                    if let Some(override_type) = current.override_type {
                        self.types[i] = override_type;
                    }
                }
                PDF => {
                    if overflow_isolates == 0 {
                        if overflow_embeddings > 0 {
                            overflow_embeddings -= 1;
                        } else if !current.isolate {
                            if let Some(entry) = self.stack.pop() {
                                current = entry;
                            }
                        }
                    }
                    levels[i] = current.level;
                }
                B => levels[i] = paragraph_level,
                _ => {
                    levels[i] = current.level;
                    if let Some(override_type) = current.override_type {
                        self.types[i] = override_type;
                    }
                }
            }
        }
    }

    /// X9 and X10: splits the characters that survive X9 into level runs.
    fn build_level_runs(
        &mut self,
        original_types: &[Directionality],
        start: usize,
        end: usize,
        levels: &[u8],
    ) {
        self.runs.clear();
        self.run_indices.clear();
        let mut run_level = None;
        let mut run_start = 0;
        for i in start..end {
            if original_types[i].is_removed_by_x9() {
                continue;
            }
            if run_level != Some(levels[i]) {
                if run_level.is_some() {
                    self.runs.push(run_start..self.run_indices.len());
                }
                run_level = Some(levels[i]);
                run_start = self.run_indices.len();
            }
            self.run_of[i] = self.runs.len();
            self.run_indices.push(i);
        }
        if run_level.is_some() {
            self.runs.push(run_start..self.run_indices.len());
        }
    }

    /// BD13: links level runs across matched isolates, and computes `sos` and `eos` of every
    /// sequence before any of them is resolved.
    fn build_sequences(
        &mut self,
        original_types: &[Directionality],
        start: usize,
        end: usize,
        paragraph_level: u8,
        levels: &[u8],
    ) {
        self.sequences.clear();
        self.sequence_indices.clear();
        for first_run in 0..self.runs.len() {
            let first = self.run_indices[self.runs[first_run].start];
            if original_types[first] == PDI && self.matching_initiator[first] != NO_MATCH {
                // Continues the sequence of its initiator.
                continue;
            }

            let sequence_start = self.sequence_indices.len();
            let mut run = first_run;
            loop {
                let indices = self.runs[run].clone();
                self.sequence_indices
                    .extend_from_slice(&self.run_indices[indices.clone()]);
                let last = self.run_indices[indices.end - 1];
                let pdi = self.matching_pdi[last];
                if original_types[last].is_isolate_initiator() && pdi < end {
                    run = self.run_of[pdi];
                } else {
                    break;
                }
            }

            let first = self.sequence_indices[sequence_start];
            let last = self.sequence_indices[self.sequence_indices.len() - 1];
            let level = levels[first];
            let preceding_level = (start..first)
                .rev()
                .find(|&j| !original_types[j].is_removed_by_x9())
                .map_or(paragraph_level, |j| levels[j]);
            let following_level = if original_types[last].is_isolate_initiator() {
                paragraph_level
            } else {
                (last + 1..end)
                    .find(|&j| !original_types[j].is_removed_by_x9())
                    .map_or(paragraph_level, |j| levels[j])
            };
            self.sequences.push(RunSequence {
                indices: sequence_start..self.sequence_indices.len(),
                level,
                sos: direction_of_level(level.max(preceding_level)),
                eos: direction_of_level(level.max(following_level)),
            });
        }
    }

    /// W1 through I2 for every isolating run sequence.
    fn resolve_sequences(&mut self, input: &BracketInput<'_>, brackets: bool, levels: &mut [u8]) {
        for sequence in &self.sequences {
            let indices = &self.sequence_indices[sequence.indices.clone()];
            self.sequence_types.clear();
            self.sequence_types
                .extend(indices.iter().map(|&i| self.types[i]));

            resolve_weak(&mut self.sequence_types, sequence.sos, sequence.eos);
            if brackets {
                self.brackets.resolve(
                    input,
                    &mut BracketSequence {
                        indices,
                        types: &mut self.sequence_types,
                        level: sequence.level,
                        sos: sequence.sos,
                    },
                );
            }
            resolve_neutral(
                &mut self.sequence_types,
                sequence.level,
                sequence.sos,
                sequence.eos,
            );

            for (&i, &t) in indices.iter().zip(&self.sequence_types) {
                levels[i] = implicit_level(sequence.level, t);
                self.types[i] = t;
            }
        }
    }
}

/// W1 through W7.
fn resolve_weak(types: &mut [Directionality], sos: Directionality, eos: Directionality) {
    // W1
    let mut preceding = sos;
    for t in types.iter_mut() {
        if *t == NSM {
            *t = preceding;
        } else if t.is_isolate_initiator() || *t == PDI {
            preceding = ON;
        } else {
            preceding = *t;
        }
    }

    // W2 and W3
    let mut last_strong = sos;
    for t in types.iter_mut() {
        match *t {
            L | R => last_strong = *t,
            AL => {
                last_strong = AL;
                *t = R;
            }
            EN if last_strong == AL => *t = AN,
            _ => {}
        }
    }

    // W4
    for i in 1..types.len().saturating_sub(1) {
        let (before, after) = (types[i - 1], types[i + 1]);
        match types[i] {
            ES | CS if before == EN && after == EN => types[i] = EN,
            CS if before == AN && after == AN => types[i] = AN,
            _ => {}
        }
    }

    // W5
    let mut i = 0;
    while i < types.len() {
        if types[i] != ET {
            i += 1;
            continue;
        }
        let run_end = i + types[i..].iter().take_while(|&&t| t == ET).count();
        let before = if i == 0 { sos } else { types[i - 1] };
        let after = types.get(run_end).copied().unwrap_or(eos);
        if before == EN || after == EN {
            types[i..run_end].fill(EN);
        }
        i = run_end;
    }

    // W6
    for t in types.iter_mut() {
        if matches!(*t, ES | ET | CS) {
            *t = ON;
        }
    }

    // W7
    let mut last_strong = sos;
    for t in types.iter_mut() {
        match *t {
            L | R => last_strong = *t,
            EN if last_strong == L => *t = L,
            _ => {}
        }
    }
}

/// N1 and N2.
fn resolve_neutral(
    types: &mut [Directionality],
    level: u8,
    sos: Directionality,
    eos: Directionality,
) {
    let is_neutral = |t: Directionality| matches!(t, B | S | WS | ON | LRI | RLI | FSI | PDI);
    // European and Arabic numbers act as R.
    let as_strong = |t: Directionality| match t {
        EN | AN => R,
        t => t,
    };

    let mut i = 0;
    while i < types.len() {
        if !is_neutral(types[i]) {
            i += 1;
            continue;
        }
        let run_end = i + types[i..].iter().take_while(|&&t| is_neutral(t)).count();
        let before = if i == 0 { sos } else { as_strong(types[i - 1]) };
        let after = types.get(run_end).map_or(eos, |&t| as_strong(t));
        let resolved = if before == after {
            before
        } else {
            direction_of_level(level)
        };
        types[i..run_end].fill(resolved);
        i = run_end;
    }
}

/// I1 and I2.
fn implicit_level(level: u8, t: Directionality) -> u8 {
    if level & 1 == 0 {
        match t {
            R => level + 1,
            AN | EN => level + 2,
            _ => level,
        }
    } else {
        match t {
            L | EN | AN => level + 1,
            _ => level,
        }
    }
}

/// Characters removed by X9 take the level of the preceding character.
fn assign_removed_levels(
    original_types: &[Directionality],
    start: usize,
    end: usize,
    paragraph_level: u8,
    levels: &mut [u8],
) {
    for i in start..end {
        if original_types[i].is_removed_by_x9() {
            levels[i] = if i == start {
                paragraph_level
            } else {
                levels[i - 1]
            };
        }
    }
}

/// Whitespace for rule L1, including the explicit formatting characters and BN.
pub(super) fn is_whitespace(t: Directionality) -> bool {
    matches!(
        t,
        WS | LRE | RLE | LRO | RLO | PDF | LRI | RLI | FSI | PDI | BN
    )
}

/// L1 as far as it is known without line breaks: segment and paragraph separators, any
/// whitespace before them, and whitespace at the end of the paragraph get the paragraph level.
fn reset_paragraph_whitespace(
    original_types: &[Directionality],
    start: usize,
    end: usize,
    paragraph_level: u8,
    levels: &mut [u8],
) {
    let mut trailing = true;
    for i in (start..end).rev() {
        let t = original_types[i];
        if matches!(t, B | S) {
            levels[i] = paragraph_level;
            trailing = true;
        } else if is_whitespace(t) {
            if trailing {
                levels[i] = paragraph_level;
            }
        } else {
            trailing = false;
        }
    }
}
