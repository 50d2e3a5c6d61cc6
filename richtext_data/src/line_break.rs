// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use icu_properties::props::LineBreak;

/// The `Line_Break` class of a character (UAX #14).
///
/// The classes from [`OP`](Self::OP) to [`CB`](Self::CB) index the pair table directly; the
/// remaining classes are resolved before the table is consulted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(
    clippy::upper_case_acronyms,
    reason = "variants use the short property value aliases from UAX #14."
)]
pub enum LineBreakClass {
    /// Opening punctuation.
    OP = 0,
    /// Closing punctuation.
    CL = 1,
    /// Closing parenthesis.
    CP = 2,
    /// Ambiguous quotation.
    QU = 3,
    /// Glue.
    GL = 4,
    /// Non-starters.
    NS = 5,
    /// Exclamation or interrogation.
    EX = 6,
    /// Symbols allowing break after.
    SY = 7,
    /// Infix separator.
    IS = 8,
    /// Prefix.
    PR = 9,
    /// Postfix.
    PO = 10,
    /// Numeric.
    NU = 11,
    /// Alphabetic.
    AL = 12,
    /// Hebrew letter.
    HL = 13,
    /// Ideographic.
    ID = 14,
    /// Inseparable characters.
    IN = 15,
    /// Hyphen.
    HY = 16,
    /// Break after.
    BA = 17,
    /// Break before.
    BB = 18,
    /// Break on either side (but not pair).
    B2 = 19,
    /// Zero-width space.
    ZW = 20,
    /// Combining mark.
    CM = 21,
    /// Word joiner.
    WJ = 22,
    /// Hangul LV syllable.
    H2 = 23,
    /// Hangul LVT syllable.
    H3 = 24,
    /// Hangul L jamo.
    JL = 25,
    /// Hangul V jamo.
    JV = 26,
    /// Hangul T jamo.
    JT = 27,
    /// Regional indicator.
    RI = 28,
    /// Emoji base.
    EB = 29,
    /// Emoji modifier.
    EM = 30,
    /// Zero width joiner.
    ZWJ = 31,
    /// Contingent break.
    CB = 32,
    /// Ambiguous (alphabetic or ideographic).
    AI = 33,
    /// Mandatory break.
    BK = 34,
    /// Conditional Japanese starter.
    CJ = 35,
    /// Carriage return.
    CR = 36,
    /// Line feed.
    LF = 37,
    /// Next line.
    NL = 38,
    /// South-East Asian.
    SA = 39,
    /// Surrogates.
    SG = 40,
    /// Space.
    SP = 41,
    /// Unknown.
    XX = 42,
    // NOTICE: If a new value is added, be sure to modify `MAX_VALUE` and `ALL`.
}

impl LineBreakClass {
    /// Returns the maximum numeric value for known variants.
    pub const MAX_VALUE: u8 = Self::XX as u8;

    /// The number of classes that index the pair table.
    pub const PAIR_TABLE_LEN: usize = Self::CB as usize + 1;

    /// Every variant, indexed by its numeric value.
    pub const ALL: [Self; 43] = [
        Self::OP,
        Self::CL,
        Self::CP,
        Self::QU,
        Self::GL,
        Self::NS,
        Self::EX,
        Self::SY,
        Self::IS,
        Self::PR,
        Self::PO,
        Self::NU,
        Self::AL,
        Self::HL,
        Self::ID,
        Self::IN,
        Self::HY,
        Self::BA,
        Self::BB,
        Self::B2,
        Self::ZW,
        Self::CM,
        Self::WJ,
        Self::H2,
        Self::H3,
        Self::JL,
        Self::JV,
        Self::JT,
        Self::RI,
        Self::EB,
        Self::EM,
        Self::ZWJ,
        Self::CB,
        Self::AI,
        Self::BK,
        Self::CJ,
        Self::CR,
        Self::LF,
        Self::NL,
        Self::SA,
        Self::SG,
        Self::SP,
        Self::XX,
    ];

    /// Decodes a numeric value, returning `None` if it is out of range.
    pub const fn from_u8(value: u8) -> Option<Self> {
        if value <= Self::MAX_VALUE {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    /// Decodes a raw trie value; values that don't decode are treated as [`XX`](Self::XX).
    pub fn from_raw(value: u32) -> Self {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_u8)
            .unwrap_or(Self::XX)
    }

    /// Returns `true` for the classes that force a break after them (rules LB4 and LB5).
    pub const fn is_mandatory_break(self) -> bool {
        matches!(self, Self::BK | Self::CR | Self::LF | Self::NL)
    }

    /// Converts an ICU4X `Line_Break` value.
    ///
    /// Classes introduced after Unicode 15.0 are folded into the classes their characters had
    /// before: the Aksara and virama classes into [`AL`](Self::AL) and the unambiguous hyphen
    /// into [`BA`](Self::BA). Anything unrecognized becomes [`XX`](Self::XX).
    pub fn from_icu_line_break(value: LineBreak) -> Self {
        match value {
            LineBreak::Ambiguous => Self::AI,
            LineBreak::Alphabetic => Self::AL,
            LineBreak::BreakBoth => Self::B2,
            LineBreak::BreakAfter => Self::BA,
            LineBreak::BreakBefore => Self::BB,
            LineBreak::MandatoryBreak => Self::BK,
            LineBreak::ContingentBreak => Self::CB,
            LineBreak::ClosePunctuation => Self::CL,
            LineBreak::CombiningMark => Self::CM,
            LineBreak::CarriageReturn => Self::CR,
            LineBreak::Exclamation => Self::EX,
            LineBreak::Glue => Self::GL,
            LineBreak::Hyphen => Self::HY,
            LineBreak::Ideographic => Self::ID,
            LineBreak::Inseparable => Self::IN,
            LineBreak::InfixNumeric => Self::IS,
            LineBreak::LineFeed => Self::LF,
            LineBreak::Nonstarter => Self::NS,
            LineBreak::Numeric => Self::NU,
            LineBreak::OpenPunctuation => Self::OP,
            LineBreak::PostfixNumeric => Self::PO,
            LineBreak::PrefixNumeric => Self::PR,
            LineBreak::Quotation => Self::QU,
            LineBreak::ComplexContext => Self::SA,
            LineBreak::Surrogate => Self::SG,
            LineBreak::Space => Self::SP,
            LineBreak::BreakSymbols => Self::SY,
            LineBreak::ZWSpace => Self::ZW,
            LineBreak::NextLine => Self::NL,
            LineBreak::WordJoiner => Self::WJ,
            LineBreak::H2 => Self::H2,
            LineBreak::H3 => Self::H3,
            LineBreak::JL => Self::JL,
            LineBreak::JT => Self::JT,
            LineBreak::JV => Self::JV,
            LineBreak::CloseParenthesis => Self::CP,
            LineBreak::ConditionalJapaneseStarter => Self::CJ,
            LineBreak::HebrewLetter => Self::HL,
            LineBreak::RegionalIndicator => Self::RI,
            LineBreak::EBase => Self::EB,
            LineBreak::EModifier => Self::EM,
            LineBreak::ZWJ => Self::ZWJ,
            LineBreak::Aksara
            | LineBreak::AksaraPrebase
            | LineBreak::AksaraStart
            | LineBreak::ViramaFinal
            | LineBreak::Virama => Self::AL,
            LineBreak::UnambiguousHyphen => Self::BA,
            _ => Self::XX,
        }
    }
}
