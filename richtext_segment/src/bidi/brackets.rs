// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paired bracket resolution: BD16 and rule N0.

use alloc::vec::Vec;

use richtext_data::{Directionality, PairedBracketType};
use smallvec::SmallVec;

use super::algorithm::direction_of_level;

/// The number of opening brackets BD16 tracks at once.
///
/// Pairing stops for the rest of an isolating run sequence when an opener would exceed it.
pub const MAX_PAIRING_DEPTH: usize = 63;

/// One isolating run sequence, as seen by the bracket resolver.
pub(super) struct BracketSequence<'a> {
    /// Text positions of the characters in the sequence.
    pub(super) indices: &'a [usize],
    /// The types of the characters in the sequence after the weak rules. Updated in place.
    pub(super) types: &'a mut [Directionality],
    pub(super) level: u8,
    pub(super) sos: Directionality,
}

/// Per-text bracket data, indexed by text position.
pub(super) struct BracketInput<'a> {
    /// Types before any resolution; used to find the NSMs that follow a bracket.
    pub(super) original_types: &'a [Directionality],
    pub(super) bracket_types: &'a [PairedBracketType],
    pub(super) bracket_ids: &'a [u32],
}

/// Scratch space for pairing brackets, reused between sequences.
#[derive(Clone, Debug, Default)]
pub(super) struct BracketResolver {
    /// Sequence position and bracket id of each open bracket, oldest first.
    openers: SmallVec<[(usize, u32); 8]>,
    /// Matched `(opener, closer)` sequence positions.
    pairs: Vec<(usize, usize)>,
}

impl BracketResolver {
    /// Applies rule N0 to a sequence.
    pub(super) fn resolve(&mut self, input: &BracketInput<'_>, sequence: &mut BracketSequence<'_>) {
        self.locate_pairs(input, sequence);
        if self.pairs.is_empty() {
            return;
        }

        let embedding = direction_of_level(sequence.level);
        let opposite = match embedding {
            Directionality::L => Directionality::R,
            _ => Directionality::L,
        };
        for &(open, close) in &self.pairs {
            let types = &mut *sequence.types;
            let mut found_opposite = false;
            let mut found_embedding = false;
            for &t in &types[open + 1..close] {
                match strong_type(t) {
                    Some(d) if d == embedding => {
                        found_embedding = true;
                        break;
                    }
                    Some(_) => found_opposite = true,
                    None => {}
                }
            }
            let resolved = if found_embedding {
                embedding
            } else if found_opposite {
                let before = types[..open]
                    .iter()
                    .rev()
                    .find_map(|&t| strong_type(t))
                    .unwrap_or(sequence.sos);
                if before == opposite { opposite } else { embedding }
            } else {
                continue;
            };

            types[open] = resolved;
            types[close] = resolved;
            for bracket in [open, close] {
                for pos in bracket + 1..types.len() {
                    if input.original_types[sequence.indices[pos]] != Directionality::NSM {
                        break;
                    }
                    types[pos] = resolved;
                }
            }
        }
    }

    /// BD16: finds the bracket pairs of a sequence, sorted by opener position.
    fn locate_pairs(&mut self, input: &BracketInput<'_>, sequence: &BracketSequence<'_>) {
        self.openers.clear();
        self.pairs.clear();
        for (pos, &index) in sequence.indices.iter().enumerate() {
            if sequence.types[pos] != Directionality::ON {
                continue;
            }
            let id = input.bracket_ids.get(index).copied().unwrap_or(0);
            match input.bracket_types.get(index) {
                Some(PairedBracketType::Open) => {
                    if self.openers.len() == MAX_PAIRING_DEPTH {
                        log::trace!("bracket pairing stopped at text position {index}");
                        self.openers.clear();
                        break;
                    }
                    self.openers.push((pos, id));
                }
                Some(PairedBracketType::Close) => {
                    if let Some(k) = self.openers.iter().rposition(|&(_, open)| open == id) {
                        self.pairs.push((self.openers[k].0, pos));
                        self.openers.truncate(k);
                    }
                }
                _ => {}
            }
        }
        self.pairs.sort_unstable();
    }
}

/// The strong direction a type contributes to N0; numbers count as R.
fn strong_type(t: Directionality) -> Option<Directionality> {
    match t {
        Directionality::L => Some(Directionality::L),
        Directionality::R | Directionality::AL | Directionality::EN | Directionality::AN => {
            Some(Directionality::R)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use richtext_data::Directionality::{L, NSM, ON, R};
    use richtext_data::PairedBracketType::{Close, None as NotBracket, Open};

    fn run(
        types: &[Directionality],
        bracket_types: &[PairedBracketType],
        level: u8,
        sos: Directionality,
    ) -> Vec<Directionality> {
        let ids: Vec<u32> = bracket_types
            .iter()
            .map(|t| u32::from(*t != NotBracket))
            .collect();
        let indices: Vec<usize> = (0..types.len()).collect();
        let mut resolved = types.to_vec();
        let input = BracketInput {
            original_types: types,
            bracket_types,
            bracket_ids: &ids,
        };
        let mut sequence = BracketSequence {
            indices: &indices,
            types: &mut resolved,
            level,
            sos,
        };
        BracketResolver::default().resolve(&input, &mut sequence);
        resolved
    }

    #[test]
    fn interior_matching_embedding_direction() {
        let resolved = run(&[ON, L, ON], &[Open, NotBracket, Close], 0, L);
        assert_eq!(resolved, vec![L, L, L]);
    }

    #[test]
    fn opposite_interior_uses_preceding_context() {
        // R ( L ) in a right-to-left sequence: the context before the opener matches the
        // embedding direction.
        let resolved = run(&[R, ON, L, ON], &[NotBracket, Open, NotBracket, Close], 1, R);
        assert_eq!(resolved, vec![R, R, L, R]);

        // L ( L ) in a right-to-left sequence: the context is opposite too.
        let resolved = run(&[L, ON, L, ON], &[NotBracket, Open, NotBracket, Close], 1, R);
        assert_eq!(resolved, vec![L, L, L, L]);
    }

    #[test]
    fn no_strong_interior_is_left_alone() {
        let resolved = run(&[ON, ON, ON], &[Open, NotBracket, Close], 0, L);
        assert_eq!(resolved, vec![ON, ON, ON]);
    }

    #[test]
    fn nsm_after_brackets_follows_them() {
        let original = [ON, NSM, R, ON, NSM, NSM, L];
        // The weak rules have already turned the marks into the bracket type.
        let after_weak = [ON, ON, R, ON, ON, ON, L];
        let ids = [1, 0, 0, 1, 0, 0, 0];
        let bracket_types = [
            Open, NotBracket, NotBracket, Close, NotBracket, NotBracket, NotBracket,
        ];
        let indices: Vec<usize> = (0..original.len()).collect();
        let mut resolved = after_weak.to_vec();
        let input = BracketInput {
            original_types: &original,
            bracket_types: &bracket_types,
            bracket_ids: &ids,
        };
        let mut sequence = BracketSequence {
            indices: &indices,
            types: &mut resolved,
            level: 1,
            sos: R,
        };
        BracketResolver::default().resolve(&input, &mut sequence);
        assert_eq!(resolved, vec![R, R, R, R, R, R, L]);
    }

    #[test]
    fn unmatched_closer_is_skipped() {
        let resolved = run(&[ON, ON, R, ON], &[Close, Open, NotBracket, Close], 0, L);
        // The first closer has no opener; the second pair encloses R in an LTR sequence and
        // the preceding context falls back to sos.
        assert_eq!(resolved, vec![ON, L, R, L]);
    }

    #[test]
    fn opener_overflow_stops_pairing() {
        let mut types = vec![ON; MAX_PAIRING_DEPTH + 1];
        let mut bracket_types = vec![Open; MAX_PAIRING_DEPTH + 1];
        types.extend([L, ON]);
        bracket_types.extend([NotBracket, Close]);
        let resolved = run(&types, &bracket_types, 0, L);
        assert!(
            resolved.iter().filter(|t| **t == ON).count() == MAX_PAIRING_DEPTH + 2,
            "no bracket should have been resolved"
        );
    }
}
