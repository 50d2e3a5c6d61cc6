// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use richtext_data::Directionality;

use super::TextDirection;
use super::algorithm::is_whitespace;

/// The resolved embedding levels of a text.
///
/// Produced by [`BidiAlgorithm`](super::BidiAlgorithm). Levels already reflect rule L1 for
/// segment separators, paragraph separators and whitespace at the end of each paragraph.
/// Whitespace at the end of a line inside a paragraph is only known once lines are chosen;
/// [`line_levels`](Self::line_levels) applies it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidiParagraph {
    levels: Vec<u8>,
    original_types: Vec<Directionality>,
    /// Range and level of each paragraph, in text order. Never empty.
    paragraphs: Vec<(Range<usize>, u8)>,
}

/// A maximal run of characters with the same embedding level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidiRun {
    /// The text positions of the run.
    pub range: Range<usize>,
    /// The embedding level of the run.
    pub level: u8,
}

impl BidiRun {
    /// The direction of the run.
    pub fn direction(&self) -> TextDirection {
        TextDirection::from_level(self.level)
    }
}

impl BidiParagraph {
    pub(super) fn new(
        levels: Vec<u8>,
        original_types: Vec<Directionality>,
        paragraphs: Vec<(Range<usize>, u8)>,
    ) -> Self {
        Self {
            levels,
            original_types,
            paragraphs,
        }
    }

    /// The embedding level of every character.
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    /// The number of characters.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` for empty text.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The level of the first paragraph.
    pub fn paragraph_level(&self) -> u8 {
        self.paragraphs.first().map_or(0, |(_, level)| *level)
    }

    /// The direction of the first paragraph.
    pub fn direction(&self) -> TextDirection {
        TextDirection::from_level(self.paragraph_level())
    }

    /// The range and level of every paragraph.
    ///
    /// There is more than one only when the text contains paragraph separators.
    pub fn paragraphs(&self) -> impl Iterator<Item = (Range<usize>, u8)> + '_ {
        self.paragraphs.iter().cloned()
    }

    /// The level of the paragraph that contains `index`.
    pub fn paragraph_level_at(&self, index: usize) -> u8 {
        let i = self
            .paragraphs
            .partition_point(|(range, _)| range.end <= index);
        self.paragraphs
            .get(i)
            .or(self.paragraphs.last())
            .map_or(0, |(_, level)| *level)
    }

    /// The levels of the characters of a line, with whitespace at the end of the line reset to
    /// the paragraph level.
    ///
    /// The range is clamped to the text.
    pub fn line_levels(&self, line: Range<usize>) -> Vec<u8> {
        let line = self.clamp(line);
        let mut levels = self.levels[line.clone()].to_vec();
        for (offset, index) in line.clone().enumerate().rev() {
            if !is_whitespace(self.original_types[index]) {
                break;
            }
            levels[offset] = self.paragraph_level_at(index);
        }
        levels
    }

    /// The runs of a line in visual order, left to right.
    pub fn visual_runs(&self, line: Range<usize>) -> Vec<BidiRun> {
        let line = self.clamp(line);
        let levels = self.line_levels(line.clone());
        let mut runs: Vec<BidiRun> = Vec::new();
        for (offset, &level) in levels.iter().enumerate() {
            let index = line.start + offset;
            match runs.last_mut() {
                Some(run) if run.level == level => run.range.end = index + 1,
                _ => runs.push(BidiRun {
                    range: index..index + 1,
                    level,
                }),
            }
        }
        let run_levels: Vec<u8> = runs.iter().map(|run| run.level).collect();
        reverse_by_levels(&run_levels, &mut runs);
        runs
    }

    /// Maps visual positions of a line to text positions (rule L2).
    ///
    /// Element `i` of the result is the text position of the character displayed at visual
    /// position `i` of the line.
    pub fn reorder_line(&self, line: Range<usize>) -> Vec<usize> {
        let line = self.clamp(line);
        let levels = self.line_levels(line.clone());
        let mut order: Vec<usize> = line.collect();
        reverse_by_levels(&levels, &mut order);
        order
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.levels.len());
        range.start.min(end)..end
    }
}

/// L2: from the highest level down to the lowest odd level, reverses every maximal sequence
/// of items at that level or higher. `levels` holds the level of each item in logical order.
fn reverse_by_levels<T>(levels: &[u8], items: &mut [T]) {
    let Some(&highest) = levels.iter().max() else {
        return;
    };
    let Some(lowest_odd) = levels.iter().copied().filter(|level| level & 1 == 1).min() else {
        return;
    };
    for level in (lowest_odd..=highest).rev() {
        let mut i = 0;
        while i < levels.len() {
            if levels[i] < level {
                i += 1;
                continue;
            }
            let end = i + levels[i..].iter().take_while(|&&l| l >= level).count();
            items[i..end].reverse();
            i = end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BidiAlgorithm;
    use alloc::vec;
    use richtext_data::Directionality::{AN, EN, L, R, WS};

    fn paragraph(types: &[Directionality], level: Option<u8>) -> BidiParagraph {
        BidiAlgorithm::new().process_classes(types, &[], &[], level)
    }

    #[test]
    fn reorders_nested_levels() {
        // R R EN EN R in an LTR paragraph: levels 1 1 2 2 1.
        let paragraph = paragraph(&[R, R, EN, EN, R], Some(0));
        assert_eq!(paragraph.levels(), &[1, 1, 2, 2, 1]);
        assert_eq!(paragraph.reorder_line(0..5), vec![4, 2, 3, 1, 0]);
    }

    #[test]
    fn visual_runs_are_in_display_order() {
        let paragraph = paragraph(&[L, WS, R, R, WS, L], Some(0));
        assert_eq!(paragraph.levels(), &[0, 0, 1, 1, 0, 0]);
        assert_eq!(
            paragraph.visual_runs(0..6),
            vec![
                BidiRun {
                    range: 0..2,
                    level: 0
                },
                BidiRun {
                    range: 2..4,
                    level: 1
                },
                BidiRun {
                    range: 4..6,
                    level: 0
                },
            ]
        );

        let paragraph = self::paragraph(&[R, WS, L, L, WS, R], Some(1));
        let runs = paragraph.visual_runs(0..6);
        let ranges: Vec<_> = runs.iter().map(|run| run.range.clone()).collect();
        assert_eq!(ranges, vec![4..6, 2..4, 0..2]);
        assert_eq!(runs[1].direction(), TextDirection::Ltr);
    }

    #[test]
    fn line_end_whitespace_takes_paragraph_level() {
        // The first line ends after the space between the two Arabic numbers.
        let paragraph = paragraph(&[R, WS, AN, WS, AN], Some(0));
        assert_eq!(paragraph.levels(), &[1, 1, 2, 1, 2]);
        assert_eq!(paragraph.line_levels(0..2), vec![1, 0]);
        assert_eq!(paragraph.line_levels(2..4), vec![2, 0]);
        assert_eq!(paragraph.line_levels(4..5), vec![2]);
        assert_eq!(paragraph.reorder_line(0..2), vec![0, 1]);
    }

    #[test]
    fn ranges_are_clamped() {
        let paragraph = paragraph(&[L, L], Some(0));
        assert_eq!(paragraph.line_levels(1..10), vec![0]);
        assert!(paragraph.reorder_line(5..10).is_empty());
        assert!(paragraph.visual_runs(2..2).is_empty());
    }
}
