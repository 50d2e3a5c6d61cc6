// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Unicode Line Breaking Algorithm.

mod pair_table;

use richtext_data::{LineBreakClass, UnicodeTrie};

use pair_table::{PairAction, pair_action};

/// A line break opportunity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineBreak {
    /// The end of the line content, excluding trailing spaces and the line terminator.
    pub position_measure: usize,
    /// The position the next line starts at.
    pub position_wrap: usize,
    /// Whether the break is mandatory.
    pub required: bool,
}

/// The outcome of [`BreakState::step`] for the position before a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakOpportunity {
    /// No break.
    Prohibited,
    /// A line may break here.
    Allowed,
    /// A line must break here.
    Mandatory,
}

/// The state of the line breaking scan between two characters.
///
/// Besides the classes on either side of the position, this carries the flags of the rules
/// that look further back: LB8a (after a ZWJ), LB21a (after HL followed by HY or BA) and
/// LB30a (pairs of regional indicators). Every transition updates all three, including
/// spaces and line terminators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakState {
    /// The class that decides breaks after the last character; spaces and marks don't change it.
    current: LineBreakClass,
    /// The class of the last character.
    next: LineBreakClass,
    /// The last character is a ZWJ.
    after_zwj: bool,
    /// `current` directly follows an HL, with only marks in between.
    after_hebrew_letter: bool,
    /// `current` ends a run of regional indicators of odd length.
    odd_regional_indicators: bool,
}

impl BreakState {
    /// Starts a scan with the class of the first character.
    pub fn new(first: LineBreakClass) -> Self {
        let class = resolve_class(first);
        Self {
            current: start_class(class),
            next: class,
            after_zwj: class == LineBreakClass::ZWJ,
            after_hebrew_letter: false,
            odd_regional_indicators: class == LineBreakClass::RI,
        }
    }

    /// Advances over the next character and returns the opportunity before it.
    pub fn step(self, class: LineBreakClass) -> (Self, BreakOpportunity) {
        let mut state = self;
        let last = state.next;
        state.next = resolve_class(class);

        let opportunity = if state.current == LineBreakClass::BK
            || (state.current == LineBreakClass::CR && state.next != LineBreakClass::LF)
        {
            state.current = start_class(state.next);
            state.after_hebrew_letter = false;
            state.odd_regional_indicators = state.next == LineBreakClass::RI;
            BreakOpportunity::Mandatory
        } else {
            let allowed = match state.next {
                LineBreakClass::SP => {
                    state.after_hebrew_letter = false;
                    state.odd_regional_indicators = false;
                    false
                }
                LineBreakClass::BK
                | LineBreakClass::LF
                | LineBreakClass::NL
                | LineBreakClass::CR => {
                    state.current = if state.next == LineBreakClass::CR {
                        LineBreakClass::CR
                    } else {
                        LineBreakClass::BK
                    };
                    state.after_hebrew_letter = false;
                    state.odd_regional_indicators = false;
                    false
                }
                _ => state.pair_break(last),
            };
            if allowed {
                BreakOpportunity::Allowed
            } else {
                BreakOpportunity::Prohibited
            }
        };
        state.after_zwj = state.next == LineBreakClass::ZWJ;
        (state, opportunity)
    }

    /// Whether the break at the end of the text is mandatory, that is the text ends with a
    /// line terminator.
    pub fn ends_with_line_terminator(self) -> bool {
        matches!(self.current, LineBreakClass::BK | LineBreakClass::CR)
    }

    fn pair_break(&mut self, last: LineBreakClass) -> bool {
        let after_space = last == LineBreakClass::SP;
        let mut allowed = match pair_action(self.current, self.next) {
            PairAction::Direct => true,
            PairAction::Indirect => after_space,
            // LB9: a mark keeps the class of its base.
            PairAction::CombiningIndirect | PairAction::CombiningProhibited if !after_space => {
                return false;
            }
            PairAction::CombiningIndirect => true,
            PairAction::CombiningProhibited => false,
            PairAction::Prohibited => false,
        };

        // LB21a
        if self.after_hebrew_letter
            && matches!(self.current, LineBreakClass::HY | LineBreakClass::BA)
        {
            allowed = false;
        }
        self.after_hebrew_letter = self.current == LineBreakClass::HL && !after_space;

        // LB30a
        if self.next == LineBreakClass::RI {
            if self.current == LineBreakClass::RI && !after_space {
                allowed = !self.odd_regional_indicators;
                self.odd_regional_indicators = !self.odd_regional_indicators;
            } else {
                self.odd_regional_indicators = true;
            }
        } else {
            self.odd_regional_indicators = false;
        }

        // LB8a
        if self.after_zwj {
            allowed = false;
        }

        self.current = self.next;
        allowed
    }
}

/// Resolves the classes the pair table doesn't know (LB1).
fn resolve_class(class: LineBreakClass) -> LineBreakClass {
    match class {
        LineBreakClass::AI | LineBreakClass::SA | LineBreakClass::SG | LineBreakClass::XX => {
            LineBreakClass::AL
        }
        LineBreakClass::CJ => LineBreakClass::NS,
        class => class,
    }
}

/// The class that starts a line.
fn start_class(class: LineBreakClass) -> LineBreakClass {
    match class {
        LineBreakClass::LF | LineBreakClass::NL => LineBreakClass::BK,
        LineBreakClass::SP => LineBreakClass::WJ,
        class => class,
    }
}

/// Finds the line break opportunities of a text.
///
/// Call [`reset`](Self::reset) with the text, then [`next_break`](Self::next_break) (or iterate)
/// until it returns `None`. The last opportunity is always at the end of the text; an empty
/// text has none.
#[derive(Clone, Debug)]
pub struct LineBreaker<'a> {
    trie: &'a UnicodeTrie,
    code_points: &'a [u32],
    pos: usize,
    last_pos: usize,
    state: Option<BreakState>,
}

impl<'a> LineBreaker<'a> {
    /// Creates a line breaker using the line break trie.
    pub fn new(trie: &'a UnicodeTrie) -> Self {
        Self {
            trie,
            code_points: &[],
            pos: 0,
            last_pos: 0,
            state: None,
        }
    }

    /// Starts over with a new text.
    pub fn reset(&mut self, code_points: &'a [u32]) {
        self.code_points = code_points;
        self.pos = 0;
        self.last_pos = 0;
        self.state = None;
    }

    /// Returns the next break opportunity.
    pub fn next_break(&mut self) -> Option<LineBreak> {
        let len = self.code_points.len();
        let mut state = match self.state {
            Some(state) => state,
            None => {
                let first = *self.code_points.first()?;
                self.pos = 1;
                BreakState::new(self.class(first))
            }
        };

        while self.pos < len {
            self.last_pos = self.pos;
            let class = self.class(self.code_points[self.pos]);
            self.pos += 1;
            let (next, opportunity) = state.step(class);
            state = next;
            let required = match opportunity {
                BreakOpportunity::Prohibited => continue,
                BreakOpportunity::Allowed => false,
                BreakOpportunity::Mandatory => true,
            };
            self.state = Some(state);
            return Some(self.make_break(self.last_pos, required));
        }

        self.state = Some(state);
        if self.last_pos < len {
            self.last_pos = len;
            return Some(self.make_break(len, state.ends_with_line_terminator()));
        }
        None
    }

    fn class(&self, code_point: u32) -> LineBreakClass {
        LineBreakClass::from_raw(self.trie.get(code_point))
    }

    fn make_break(&self, wrap: usize, required: bool) -> LineBreak {
        LineBreak {
            position_measure: measure_position(self.trie, self.code_points, wrap),
            position_wrap: wrap,
            required,
        }
    }
}

impl Iterator for LineBreaker<'_> {
    type Item = LineBreak;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_break()
    }
}

/// Walks back from a wrap position over one line terminator, then over spaces.
fn measure_position(trie: &UnicodeTrie, code_points: &[u32], wrap: usize) -> usize {
    let class_at = |i: usize| LineBreakClass::from_raw(trie.get(code_points[i]));
    let mut pos = wrap;
    if pos > 0 {
        match class_at(pos - 1) {
            LineBreakClass::LF if pos >= 2 && class_at(pos - 2) == LineBreakClass::CR => pos -= 2,
            class if class.is_mandatory_break() => pos -= 1,
            _ => {}
        }
    }
    while pos > 0 && class_at(pos - 1) == LineBreakClass::SP {
        pos -= 1;
    }
    pos
}

/// Finds the mandatory breaks of a text without running the full algorithm.
///
/// A CR followed by LF is a single break after the LF. Unlike [`LineBreaker`], no break is
/// reported at the end of the text unless it ends with a line terminator.
pub fn find_mandatory_breaks<'a>(
    trie: &'a UnicodeTrie,
    code_points: &'a [u32],
) -> MandatoryBreaks<'a> {
    MandatoryBreaks {
        trie,
        code_points,
        pos: 0,
    }
}

/// Iterator returned by [`find_mandatory_breaks`].
#[derive(Clone, Debug)]
pub struct MandatoryBreaks<'a> {
    trie: &'a UnicodeTrie,
    code_points: &'a [u32],
    pos: usize,
}

impl Iterator for MandatoryBreaks<'_> {
    type Item = LineBreak;

    fn next(&mut self) -> Option<Self::Item> {
        let (trie, code_points) = (self.trie, self.code_points);
        let class_at = |i: usize| LineBreakClass::from_raw(trie.get(code_points[i]));
        while self.pos < code_points.len() {
            let start = self.pos;
            self.pos += 1;
            let wrap = match class_at(start) {
                LineBreakClass::CR
                    if self.pos < code_points.len() && class_at(self.pos) == LineBreakClass::LF =>
                {
                    start + 2
                }
                class if class.is_mandatory_break() => start + 1,
                _ => continue,
            };
            self.pos = wrap;
            return Some(LineBreak {
                position_measure: start,
                position_wrap: wrap,
                required: true,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use richtext_data::LineBreakClass::{AL, BA, BK, CM, CR, HL, HY, ID, LF, RI, SP, ZWJ};

    fn opportunities(classes: &[LineBreakClass]) -> Vec<(usize, BreakOpportunity)> {
        let mut state = BreakState::new(classes[0]);
        let mut out = Vec::new();
        for (i, &class) in classes.iter().enumerate().skip(1) {
            let (next, opportunity) = state.step(class);
            state = next;
            if opportunity != BreakOpportunity::Prohibited {
                out.push((i, opportunity));
            }
        }
        out
    }

    #[test]
    fn breaks_after_spaces() {
        assert_eq!(
            opportunities(&[AL, SP, SP, AL]),
            [(3, BreakOpportunity::Allowed)]
        );
        assert!(opportunities(&[AL, AL]).is_empty());
    }

    #[test]
    fn line_terminators() {
        assert_eq!(
            opportunities(&[AL, CR, LF, AL, LF, AL]),
            [(3, BreakOpportunity::Mandatory), (5, BreakOpportunity::Mandatory)]
        );
        let state = BreakState::new(AL).step(CR).0;
        assert!(state.ends_with_line_terminator());
    }

    #[test]
    fn zwj_suppresses_break() {
        assert_eq!(opportunities(&[ID, ID]), [(1, BreakOpportunity::Allowed)]);
        assert!(opportunities(&[ID, ZWJ, ID]).is_empty());
        assert!(opportunities(&[ZWJ, ID]).is_empty());
    }

    #[test]
    fn zwj_after_line_terminator() {
        assert_eq!(
            opportunities(&[LF, ZWJ, ID]),
            [(1, BreakOpportunity::Mandatory)]
        );
        assert_eq!(
            opportunities(&[ID, CR, ZWJ, ID]),
            [(2, BreakOpportunity::Mandatory)]
        );
        assert_eq!(
            opportunities(&[BK, ZWJ, ID, ID]),
            [(1, BreakOpportunity::Mandatory), (3, BreakOpportunity::Allowed)]
        );
    }

    #[test]
    fn hebrew_letter_before_hyphen() {
        assert_eq!(opportunities(&[AL, HY, AL]), [(2, BreakOpportunity::Allowed)]);
        assert!(opportunities(&[HL, HY, HL]).is_empty());
        assert!(opportunities(&[HL, BA, AL]).is_empty());
        assert!(opportunities(&[HL, CM, HY, ID]).is_empty());
    }

    #[test]
    fn hebrew_letter_must_touch_hyphen() {
        assert_eq!(
            opportunities(&[HL, SP, HY, ID]),
            [(2, BreakOpportunity::Allowed), (3, BreakOpportunity::Allowed)]
        );
        assert_eq!(
            opportunities(&[HL, HY, SP, ID]),
            [(3, BreakOpportunity::Allowed)]
        );
        assert_eq!(
            opportunities(&[HL, HY, LF, HY, ID]),
            [(3, BreakOpportunity::Mandatory), (4, BreakOpportunity::Allowed)]
        );
    }

    #[test]
    fn regional_indicator_pairs() {
        assert_eq!(
            opportunities(&[RI, RI, RI, RI, RI]),
            [(2, BreakOpportunity::Allowed), (4, BreakOpportunity::Allowed)]
        );
        assert!(opportunities(&[RI, CM, RI]).is_empty());
        assert!(opportunities(&[RI, RI, ZWJ, RI]).is_empty());
    }

    #[test]
    fn regional_indicators_restart_after_spaces() {
        assert_eq!(
            opportunities(&[RI, SP, RI, RI]),
            [(2, BreakOpportunity::Allowed)]
        );
        assert_eq!(
            opportunities(&[RI, SP, RI, RI, RI]),
            [(2, BreakOpportunity::Allowed), (4, BreakOpportunity::Allowed)]
        );
    }

    #[test]
    fn regional_indicators_restart_after_line_terminators() {
        assert_eq!(
            opportunities(&[RI, RI, LF, RI, RI]),
            [(3, BreakOpportunity::Mandatory)]
        );
        assert_eq!(
            opportunities(&[RI, CR, LF, RI, RI, RI]),
            [(3, BreakOpportunity::Mandatory), (5, BreakOpportunity::Allowed)]
        );
    }
}
