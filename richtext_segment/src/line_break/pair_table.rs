// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The UAX #14 pair table, derived from rules LB7 through LB31.

use richtext_data::LineBreakClass;

use richtext_data::LineBreakClass::{
    AL, B2, BA, BB, CB, CL, CM, CP, EB, EM, EX, GL, H2, H3, HL, HY, ID, IN, IS, JL, JT, JV, NS,
    NU, OP, PO, PR, QU, RI, SY, WJ, ZW, ZWJ,
};

/// What the pair table says about the position between two classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PairAction {
    /// Break, with or without spaces in between.
    Direct,
    /// Break only if spaces intervene.
    Indirect,
    /// The second class is a combining mark; break only if spaces intervene.
    CombiningIndirect,
    /// The second class is a combining mark; never break.
    CombiningProhibited,
    /// Never break, even with spaces in between.
    Prohibited,
}

const LEN: usize = LineBreakClass::PAIR_TABLE_LEN;

static PAIR_TABLE: [[PairAction; LEN]; LEN] = build_table();

/// Looks up the action between `before` and `after`. Classes outside the table break.
pub(super) fn pair_action(before: LineBreakClass, after: LineBreakClass) -> PairAction {
    PAIR_TABLE
        .get(before as usize)
        .and_then(|row| row.get(after as usize))
        .copied()
        .unwrap_or(PairAction::Direct)
}

const fn build_table() -> [[PairAction; LEN]; LEN] {
    let mut table = [[PairAction::Direct; LEN]; LEN];
    let mut before = 0;
    while before < LEN {
        let mut after = 0;
        while after < LEN {
            table[before][after] =
                action(LineBreakClass::ALL[before], LineBreakClass::ALL[after]);
            after += 1;
        }
        before += 1;
    }
    table
}

const fn is(class: LineBreakClass, set: &[LineBreakClass]) -> bool {
    let mut i = 0;
    while i < set.len() {
        if set[i] as u8 == class as u8 {
            return true;
        }
        i += 1;
    }
    false
}

const fn action(before: LineBreakClass, after: LineBreakClass) -> PairAction {
    // LB7
    if is(after, &[ZW]) {
        return PairAction::Prohibited;
    }
    // LB8
    if is(before, &[ZW]) {
        return PairAction::Direct;
    }
    // LB9 and LB10: a mark joins the preceding character, or acts as AL after spaces.
    if is(after, &[CM, ZWJ]) {
        return if breaks_after_spaces(before, AL) {
            PairAction::CombiningIndirect
        } else {
            PairAction::CombiningProhibited
        };
    }
    let before = if is(before, &[CM, ZWJ]) { AL } else { before };

    if !breaks_after_spaces(before, after) {
        PairAction::Prohibited
    } else if joins(before, after) {
        PairAction::Indirect
    } else {
        PairAction::Direct
    }
}

/// Whether `before SP+ after` has a break before `after` (LB11 through LB18).
const fn breaks_after_spaces(before: LineBreakClass, after: LineBreakClass) -> bool {
    !(is(after, &[WJ, CL, CP, EX, IS, SY])
        || is(before, &[OP])
        || (is(before, &[QU]) && is(after, &[OP]))
        || (is(before, &[CL, CP]) && is(after, &[NS]))
        || (is(before, &[B2]) && is(after, &[B2])))
}

/// Whether `before after`, with nothing in between, has no break (LB11 through LB30b).
const fn joins(before: LineBreakClass, after: LineBreakClass) -> bool {
    // LB11, LB12
    if is(before, &[WJ, GL]) {
        return true;
    }
    // LB12a
    if is(after, &[GL]) && !is(before, &[BA, HY]) {
        return true;
    }
    // LB19
    if is(before, &[QU]) || is(after, &[QU]) {
        return true;
    }
    // LB20
    if is(before, &[CB]) || is(after, &[CB]) {
        return false;
    }
    // LB21, LB21b, LB22
    if is(after, &[BA, HY, NS, IN])
        || is(before, &[BB])
        || (is(before, &[SY]) && is(after, &[HL]))
    {
        return true;
    }
    // LB23, LB23a, LB24
    if (is(before, &[AL, HL]) && is(after, &[NU, PR, PO]))
        || (is(before, &[NU]) && is(after, &[AL, HL]))
        || (is(before, &[PR]) && is(after, &[ID, EB, EM, AL, HL]))
        || (is(before, &[ID, EB, EM]) && is(after, &[PO]))
        || (is(before, &[PO]) && is(after, &[AL, HL]))
    {
        return true;
    }
    // LB25
    if (is(before, &[CL, CP, NU]) && is(after, &[PO, PR]))
        || (is(before, &[PO, PR]) && is(after, &[OP, NU]))
        || (is(before, &[HY, IS, NU, SY]) && is(after, &[NU]))
    {
        return true;
    }
    // LB26, LB27
    if (is(before, &[JL]) && is(after, &[JL, JV, H2, H3]))
        || (is(before, &[JV, H2]) && is(after, &[JV, JT]))
        || (is(before, &[JT, H3]) && is(after, &[JT]))
        || (is(before, &[JL, JV, JT, H2, H3]) && is(after, &[PO]))
        || (is(before, &[PR]) && is(after, &[JL, JV, JT, H2, H3]))
    {
        return true;
    }
    // LB28, LB29, LB30, LB30a, LB30b
    (is(before, &[AL, HL]) && is(after, &[AL, HL]))
        || (is(before, &[IS]) && is(after, &[AL, HL]))
        || (is(before, &[AL, HL, NU]) && is(after, &[OP]))
        || (is(before, &[CP]) && is(after, &[AL, HL, NU]))
        || (is(before, &[RI]) && is(after, &[RI]))
        || (is(before, &[EB]) && is(after, &[EM]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_decide_ordinary_pairs() {
        assert_eq!(pair_action(AL, AL), PairAction::Indirect);
        assert_eq!(pair_action(ID, ID), PairAction::Direct);
        assert_eq!(pair_action(AL, HY), PairAction::Indirect);
        assert_eq!(pair_action(HY, AL), PairAction::Direct);
        assert_eq!(pair_action(HY, NU), PairAction::Indirect);
    }

    #[test]
    fn prohibited_even_after_spaces() {
        assert_eq!(pair_action(OP, AL), PairAction::Prohibited);
        assert_eq!(pair_action(AL, CL), PairAction::Prohibited);
        assert_eq!(pair_action(QU, OP), PairAction::Prohibited);
        assert_eq!(pair_action(CP, NS), PairAction::Prohibited);
        assert_eq!(pair_action(B2, B2), PairAction::Prohibited);
        assert_eq!(pair_action(ZW, ZW), PairAction::Prohibited);
        assert_eq!(pair_action(ID, WJ), PairAction::Prohibited);
    }

    #[test]
    fn zero_width_space_and_contingent_breaks() {
        assert_eq!(pair_action(ZW, AL), PairAction::Direct);
        assert_eq!(pair_action(ZW, CM), PairAction::Direct);
        assert_eq!(pair_action(CB, AL), PairAction::Direct);
        assert_eq!(pair_action(AL, CB), PairAction::Direct);
        assert_eq!(pair_action(CB, GL), PairAction::Indirect);
        assert_eq!(pair_action(BA, GL), PairAction::Direct);
    }

    #[test]
    fn combining_marks() {
        assert_eq!(pair_action(AL, CM), PairAction::CombiningIndirect);
        assert_eq!(pair_action(ID, ZWJ), PairAction::CombiningIndirect);
        assert_eq!(pair_action(OP, CM), PairAction::CombiningProhibited);
        // A mark without a base acts as AL.
        assert_eq!(pair_action(CM, AL), pair_action(AL, AL));
        assert_eq!(pair_action(ZWJ, OP), pair_action(AL, OP));
    }
}
