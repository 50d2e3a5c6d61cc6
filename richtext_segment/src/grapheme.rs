// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grapheme cluster boundaries (UAX #29).

use core::ops::Range;

use richtext_data::{GraphemeClusterClass, UnicodeTrie};

use richtext_data::GraphemeClusterClass::{
    CR, Control, EOT, ExtPict, ExtPictZwg, Extend, L, LF, LV, LVT, Prepend, RegionalIndicator,
    SOT, SpacingMark, T, V, ZWJ,
};

const LEN: usize = GraphemeClusterClass::ALL.len();

/// Whether there is a boundary between two classes, indexed `[before][after]`.
static BOUNDARY_TABLE: [[bool; LEN]; LEN] = build_table();

const fn build_table() -> [[bool; LEN]; LEN] {
    let mut table = [[true; LEN]; LEN];
    let mut before = 0;
    while before < LEN {
        let mut after = 0;
        while after < LEN {
            table[before][after] = is_break(
                GraphemeClusterClass::ALL[before],
                GraphemeClusterClass::ALL[after],
            );
            after += 1;
        }
        before += 1;
    }
    table
}

const fn is(class: GraphemeClusterClass, set: &[GraphemeClusterClass]) -> bool {
    let mut i = 0;
    while i < set.len() {
        if set[i] as u8 == class as u8 {
            return true;
        }
        i += 1;
    }
    false
}

const fn is_break(before: GraphemeClusterClass, after: GraphemeClusterClass) -> bool {
    // GB1, GB2
    if is(before, &[SOT]) || is(after, &[EOT]) {
        return true;
    }
    // GB3
    if is(before, &[CR]) && is(after, &[LF]) {
        return false;
    }
    // GB4, GB5
    if is(before, &[Control, CR, LF]) || is(after, &[Control, CR, LF]) {
        return true;
    }
    // GB6, GB7, GB8
    if (is(before, &[L]) && is(after, &[L, V, LV, LVT]))
        || (is(before, &[LV, V]) && is(after, &[V, T]))
        || (is(before, &[LVT, T]) && is(after, &[T]))
    {
        return false;
    }
    // GB9, GB9a, GB9b
    if is(after, &[Extend, ZWJ, SpacingMark]) || is(before, &[Prepend]) {
        return false;
    }
    // GB11, GB12, GB13
    !((is(before, &[ExtPictZwg]) && is(after, &[ExtPict]))
        || (is(before, &[RegionalIndicator]) && is(after, &[RegionalIndicator])))
}

/// Finds grapheme cluster boundaries using the grapheme cluster trie.
///
/// Position 0 and the length of the text are always boundaries, except that an empty text
/// has no boundaries at all.
#[derive(Clone, Debug)]
pub struct GraphemeClusters<'a> {
    trie: &'a UnicodeTrie,
}

impl<'a> GraphemeClusters<'a> {
    /// Creates a segmenter using the grapheme cluster trie.
    pub fn new(trie: &'a UnicodeTrie) -> Self {
        Self { trie }
    }

    /// Returns `true` if `position` is a grapheme cluster boundary.
    ///
    /// Positions past the end of the text are never boundaries.
    pub fn is_boundary(&self, code_points: &[u32], position: usize) -> bool {
        let len = code_points.len();
        if len == 0 || position > len {
            return false;
        }
        if position == 0 || position == len {
            return true;
        }
        let class_at = |i: usize| class_of(self.trie, code_points[i]);
        let before = match class_at(position - 1) {
            ZWJ => {
                let base = code_points[..position - 1]
                    .iter()
                    .rev()
                    .map(|&cp| class_of(self.trie, cp))
                    .find(|&class| class != Extend);
                if base == Some(ExtPict) { ExtPictZwg } else { ZWJ }
            }
            RegionalIndicator => {
                let preceding = code_points[..position - 1]
                    .iter()
                    .rev()
                    .take_while(|&&cp| class_of(self.trie, cp) == RegionalIndicator)
                    .count();
                if preceding % 2 == 1 {
                    GraphemeClusterClass::Any
                } else {
                    RegionalIndicator
                }
            }
            class => class,
        };
        boundary_between(before, class_at(position))
    }

    /// Returns the boundaries of a text in increasing order.
    pub fn boundaries<'b>(&self, code_points: &'b [u32]) -> GraphemeBoundaries<'b>
    where
        'a: 'b,
    {
        GraphemeBoundaries {
            trie: self.trie,
            code_points,
            pos: 0,
            before: SOT,
            after_ext_pict: false,
            regional_indicators: 0,
        }
    }

    /// Returns the ranges of the grapheme clusters of a text.
    pub fn clusters<'b>(&self, code_points: &'b [u32]) -> GraphemeClusterRanges<'b>
    where
        'a: 'b,
    {
        let mut boundaries = self.boundaries(code_points);
        let start = boundaries.next();
        GraphemeClusterRanges { boundaries, start }
    }
}

fn class_of(trie: &UnicodeTrie, code_point: u32) -> GraphemeClusterClass {
    GraphemeClusterClass::from_raw(trie.get(code_point))
}

fn boundary_between(before: GraphemeClusterClass, after: GraphemeClusterClass) -> bool {
    BOUNDARY_TABLE[before as usize][after as usize]
}

/// Iterator returned by [`GraphemeClusters::boundaries`].
///
/// Carries the context of rules GB11 and GB12 forward, so each position is decided without
/// scanning back.
#[derive(Clone, Debug)]
pub struct GraphemeBoundaries<'a> {
    trie: &'a UnicodeTrie,
    code_points: &'a [u32],
    pos: usize,
    /// The effective class before `pos`.
    before: GraphemeClusterClass,
    /// Whether the last character other than an extender is extended pictographic.
    after_ext_pict: bool,
    /// The number of consecutive regional indicators ending before `pos`.
    regional_indicators: usize,
}

impl GraphemeBoundaries<'_> {
    fn advance(&mut self, class: GraphemeClusterClass) {
        self.before = match class {
            ZWJ if self.after_ext_pict => ExtPictZwg,
            RegionalIndicator if self.regional_indicators % 2 == 1 => GraphemeClusterClass::Any,
            class => class,
        };
        if class != Extend {
            self.after_ext_pict = class == ExtPict;
        }
        if class == RegionalIndicator {
            self.regional_indicators += 1;
        } else {
            self.regional_indicators = 0;
        }
    }
}

impl Iterator for GraphemeBoundaries<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let len = self.code_points.len();
        if len == 0 {
            return None;
        }
        while self.pos <= len {
            let pos = self.pos;
            self.pos += 1;
            let after = match self.code_points.get(pos) {
                Some(&cp) => class_of(self.trie, cp),
                None => EOT,
            };
            let boundary = boundary_between(self.before, after);
            self.advance(after);
            if boundary {
                return Some(pos);
            }
        }
        None
    }
}

/// Iterator returned by [`GraphemeClusters::clusters`].
#[derive(Clone, Debug)]
pub struct GraphemeClusterRanges<'a> {
    boundaries: GraphemeBoundaries<'a>,
    start: Option<usize>,
}

impl Iterator for GraphemeClusterRanges<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let start = self.start?;
        let end = self.boundaries.next()?;
        self.start = Some(end);
        Some(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use richtext_data::TrieBuilder;

    fn trie() -> UnicodeTrie {
        let mut builder = TrieBuilder::new(0, 0);
        let classes = [
            (0x000D, CR),
            (0x000A, LF),
            (0x0007, Control),
            (0x0301, Extend),
            (0x1F3FB, Extend),
            (0x200D, ZWJ),
            (0x0600, Prepend),
            (0x0903, SpacingMark),
            (0x1100, L),
            (0x1161, V),
            (0x11A8, T),
            (0xAC00, LV),
            (0xAC01, LVT),
            (0x1F468, ExtPict),
            (0x1F469, ExtPict),
        ];
        for (cp, class) in classes {
            builder.set(cp, class as u32).unwrap();
        }
        builder
            .set_range(0x1F1E6, 0x1F1FF, RegionalIndicator as u32, true)
            .unwrap();
        builder.freeze()
    }

    fn boundaries(text: &[u32]) -> Vec<usize> {
        let trie = trie();
        let clusters = GraphemeClusters::new(&trie);
        let found: Vec<usize> = clusters.boundaries(text).collect();
        let queried: Vec<usize> = (0..=text.len())
            .filter(|&pos| clusters.is_boundary(text, pos))
            .collect();
        assert_eq!(found, queried, "iterator and point queries disagree");
        found
    }

    #[test]
    fn combining_marks() {
        assert_eq!(boundaries(&[0x65, 0x301]), [0, 2]);
        assert_eq!(boundaries(&[0x65, 0x301, 0x65]), [0, 2, 3]);
        assert_eq!(boundaries(&[0x915, 0x903]), [0, 2]);
        assert_eq!(boundaries(&[0x600, 0x915]), [0, 2]);
    }

    #[test]
    fn line_terminators() {
        assert_eq!(boundaries(&[0x0D, 0x0A]), [0, 2]);
        assert_eq!(boundaries(&[0x61, 0x0D, 0x0A, 0x62]), [0, 1, 3, 4]);
        assert_eq!(boundaries(&[0x0A, 0x0D]), [0, 1, 2]);
        // Controls don't take marks.
        assert_eq!(boundaries(&[0x07, 0x301]), [0, 1, 2]);
    }

    #[test]
    fn regional_indicators_pair_up() {
        assert_eq!(boundaries(&[0x1F1FA, 0x1F1F8, 0x1F1EB, 0x1F1F7]), [0, 2, 4]);
        assert_eq!(boundaries(&[0x1F1FA, 0x1F1F8, 0x1F1EB]), [0, 2, 3]);
        assert_eq!(boundaries(&[0x61, 0x1F1FA, 0x1F1F8, 0x1F1EB]), [0, 1, 3, 4]);
    }

    #[test]
    fn emoji_zwj_sequences() {
        assert_eq!(boundaries(&[0x1F468, 0x200D, 0x1F469]), [0, 3]);
        assert_eq!(boundaries(&[0x1F468, 0x1F3FB, 0x200D, 0x1F469]), [0, 4]);
        // A joiner after anything else doesn't join.
        assert_eq!(boundaries(&[0x61, 0x200D, 0x1F469]), [0, 2, 3]);
    }

    #[test]
    fn hangul_syllables() {
        assert_eq!(boundaries(&[0x1100, 0x1161, 0x11A8]), [0, 3]);
        assert_eq!(boundaries(&[0xAC00, 0x11A8, 0x1100]), [0, 2, 3]);
        assert_eq!(boundaries(&[0xAC01, 0x1161]), [0, 1, 2]);
    }

    #[test]
    fn text_ends() {
        let trie = trie();
        let clusters = GraphemeClusters::new(&trie);
        assert!(clusters.boundaries(&[]).next().is_none());
        assert!(!clusters.is_boundary(&[], 0));
        assert!(!clusters.is_boundary(&[0x61], 2));
        assert_eq!(clusters.boundaries(&[0x61]).collect::<Vec<_>>(), [0, 1]);
        assert_eq!(
            clusters.clusters(&[0x65, 0x301, 0x61]).collect::<Vec<_>>(),
            [0..2, 2..3]
        );
        assert!(clusters.clusters(&[]).next().is_none());
    }
}
