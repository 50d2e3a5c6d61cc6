// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use icu_properties::props::BidiClass;

/// The `Bidi_Class` of a character, as used by the Unicode Bidirectional Algorithm (UAX #9).
///
/// The discriminants are the values stored in the bidi trie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(
    clippy::upper_case_acronyms,
    reason = "variants use the short property value aliases from UAX #9."
)]
pub enum Directionality {
    /// Left-to-right.
    L = 0,
    /// Right-to-left.
    R = 1,
    /// Arabic letter.
    AL = 2,
    /// European number.
    EN = 3,
    /// European separator.
    ES = 4,
    /// European terminator.
    ET = 5,
    /// Arabic number.
    AN = 6,
    /// Common number separator.
    CS = 7,
    /// Nonspacing mark.
    NSM = 8,
    /// Boundary neutral.
    BN = 9,
    /// Paragraph separator.
    B = 10,
    /// Segment separator.
    S = 11,
    /// Whitespace.
    WS = 12,
    /// Other neutral.
    ON = 13,
    /// Left-to-right embedding.
    LRE = 14,
    /// Left-to-right override.
    LRO = 15,
    /// Right-to-left embedding.
    RLE = 16,
    /// Right-to-left override.
    RLO = 17,
    /// Pop directional format.
    PDF = 18,
    /// Left-to-right isolate.
    LRI = 19,
    /// Right-to-left isolate.
    RLI = 20,
    /// First strong isolate.
    FSI = 21,
    /// Pop directional isolate.
    PDI = 22,
    // NOTICE: If a new value is added, be sure to modify `MAX_VALUE` and `ALL`.
}

impl Directionality {
    /// Returns the maximum numeric value for known variants.
    pub const MAX_VALUE: u8 = Self::PDI as u8;

    /// Every variant, indexed by its numeric value.
    pub const ALL: [Self; 23] = [
        Self::L,
        Self::R,
        Self::AL,
        Self::EN,
        Self::ES,
        Self::ET,
        Self::AN,
        Self::CS,
        Self::NSM,
        Self::BN,
        Self::B,
        Self::S,
        Self::WS,
        Self::ON,
        Self::LRE,
        Self::LRO,
        Self::RLE,
        Self::RLO,
        Self::PDF,
        Self::LRI,
        Self::RLI,
        Self::FSI,
        Self::PDI,
    ];

    /// Decodes a numeric value, returning `None` if it is out of range.
    pub const fn from_u8(value: u8) -> Option<Self> {
        if value <= Self::MAX_VALUE {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    /// Parses the short property value alias, as used in `BidiTest.txt`.
    ///
    /// ```
    /// use richtext_data::Directionality;
    ///
    /// assert_eq!(Directionality::parse("NSM"), Some(Directionality::NSM));
    /// assert_eq!(Directionality::parse("Left"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.iter().copied().find(|d| d.short_name() == s)
    }

    /// Returns the short property value alias.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::R => "R",
            Self::AL => "AL",
            Self::EN => "EN",
            Self::ES => "ES",
            Self::ET => "ET",
            Self::AN => "AN",
            Self::CS => "CS",
            Self::NSM => "NSM",
            Self::BN => "BN",
            Self::B => "B",
            Self::S => "S",
            Self::WS => "WS",
            Self::ON => "ON",
            Self::LRE => "LRE",
            Self::LRO => "LRO",
            Self::RLE => "RLE",
            Self::RLO => "RLO",
            Self::PDF => "PDF",
            Self::LRI => "LRI",
            Self::RLI => "RLI",
            Self::FSI => "FSI",
            Self::PDI => "PDI",
        }
    }

    /// Returns `true` for `L`, `R` and `AL`.
    pub const fn is_strong(self) -> bool {
        matches!(self, Self::L | Self::R | Self::AL)
    }

    /// Returns `true` for `LRI`, `RLI` and `FSI`.
    pub const fn is_isolate_initiator(self) -> bool {
        matches!(self, Self::LRI | Self::RLI | Self::FSI)
    }

    /// Returns `true` for the embedding and override controls.
    pub const fn is_embedding_initiator(self) -> bool {
        matches!(self, Self::LRE | Self::LRO | Self::RLE | Self::RLO)
    }

    /// Returns `true` for the classes that rule X9 removes from level resolution.
    pub const fn is_removed_by_x9(self) -> bool {
        matches!(
            self,
            Self::LRE | Self::RLE | Self::LRO | Self::RLO | Self::PDF | Self::BN
        )
    }
}

impl fmt::Display for Directionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl From<BidiClass> for Directionality {
    fn from(value: BidiClass) -> Self {
        match value {
            BidiClass::LeftToRight => Self::L,
            BidiClass::RightToLeft => Self::R,
            BidiClass::ArabicLetter => Self::AL,
            BidiClass::EuropeanNumber => Self::EN,
            BidiClass::EuropeanSeparator => Self::ES,
            BidiClass::EuropeanTerminator => Self::ET,
            BidiClass::ArabicNumber => Self::AN,
            BidiClass::CommonSeparator => Self::CS,
            BidiClass::NonspacingMark => Self::NSM,
            BidiClass::BoundaryNeutral => Self::BN,
            BidiClass::ParagraphSeparator => Self::B,
            BidiClass::SegmentSeparator => Self::S,
            BidiClass::WhiteSpace => Self::WS,
            BidiClass::OtherNeutral => Self::ON,
            BidiClass::LeftToRightEmbedding => Self::LRE,
            BidiClass::LeftToRightOverride => Self::LRO,
            BidiClass::RightToLeftEmbedding => Self::RLE,
            BidiClass::RightToLeftOverride => Self::RLO,
            BidiClass::PopDirectionalFormat => Self::PDF,
            BidiClass::LeftToRightIsolate => Self::LRI,
            BidiClass::RightToLeftIsolate => Self::RLI,
            BidiClass::FirstStrongIsolate => Self::FSI,
            BidiClass::PopDirectionalIsolate => Self::PDI,
            // Values added by future Unicode versions are treated as unassigned.
            _ => Self::L,
        }
    }
}

/// The `Bidi_Paired_Bracket_Type` of a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PairedBracketType {
    /// Not a paired bracket.
    #[default]
    None = 0,
    /// An opening paired bracket.
    Open = 1,
    /// A closing paired bracket.
    Close = 2,
}

impl PairedBracketType {
    /// Returns the maximum numeric value for known variants.
    pub const MAX_VALUE: u8 = Self::Close as u8;

    /// Decodes a numeric value, returning `None` if it is out of range.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Open),
            2 => Some(Self::Close),
            _ => None,
        }
    }
}

/// Packed bidi data for a character, as stored in the bidi trie.
///
/// The top byte holds the [`Directionality`], the next byte the [`PairedBracketType`], and the
/// low 16 bits the `Bidi_Paired_Bracket` code point (every paired bracket is in the BMP).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BidiProperties(u32);

impl BidiProperties {
    const DIRECTIONALITY_SHIFT: u32 = 24;
    const BRACKET_TYPE_SHIFT: u32 = 16;
    const PAIRED_BRACKET_MASK: u32 = 0xFFFF;

    /// Packs the bidi data for a character.
    pub const fn new(
        directionality: Directionality,
        bracket_type: PairedBracketType,
        paired_bracket: u32,
    ) -> Self {
        Self(
            ((directionality as u32) << Self::DIRECTIONALITY_SHIFT)
                | ((bracket_type as u32) << Self::BRACKET_TYPE_SHIFT)
                | (paired_bracket & Self::PAIRED_BRACKET_MASK),
        )
    }

    /// Returns the directionality, falling back to `L` for values that don't decode.
    #[inline(always)]
    pub const fn directionality(self) -> Directionality {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "the shift leaves only the top byte."
        )]
        let raw = (self.0 >> Self::DIRECTIONALITY_SHIFT) as u8;
        match Directionality::from_u8(raw) {
            Some(directionality) => directionality,
            None => Directionality::L,
        }
    }

    /// Returns the paired bracket type, falling back to `None` for values that don't decode.
    #[inline(always)]
    pub const fn paired_bracket_type(self) -> PairedBracketType {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "bracket type data only occupies the second byte."
        )]
        let raw = (self.0 >> Self::BRACKET_TYPE_SHIFT) as u8;
        match PairedBracketType::from_u8(raw) {
            Some(bracket_type) => bracket_type,
            None => PairedBracketType::None,
        }
    }

    /// Returns the `Bidi_Paired_Bracket` code point, or `0` for characters that aren't brackets.
    #[inline(always)]
    pub const fn paired_bracket(self) -> u32 {
        self.0 & Self::PAIRED_BRACKET_MASK
    }

    /// Returns an identifier shared by an opening bracket and every closing bracket that can
    /// pair with it, or `0` if `code_point` is not a paired bracket.
    ///
    /// `code_point` must be the character these properties were looked up for. Canonically
    /// equivalent brackets share an id, so U+2329 pairs with U+3009 and U+3008 with U+232A.
    ///
    /// ```
    /// use richtext_data::{BidiProperties, Directionality, PairedBracketType};
    ///
    /// let open = BidiProperties::new(Directionality::ON, PairedBracketType::Open, 0x232A);
    /// let close = BidiProperties::new(Directionality::ON, PairedBracketType::Close, 0x3008);
    /// assert_eq!(open.bracket_id(0x2329), close.bracket_id(0x3009));
    /// ```
    pub const fn bracket_id(self, code_point: u32) -> u32 {
        match self.paired_bracket_type() {
            PairedBracketType::None => 0,
            PairedBracketType::Open => canonical_bracket(self.paired_bracket()),
            PairedBracketType::Close => canonical_bracket(code_point),
        }
    }
}

/// Folds the angle brackets that have canonical decompositions onto their CJK equivalents.
const fn canonical_bracket(code_point: u32) -> u32 {
    match code_point {
        0x2329 => 0x3008,
        0x232A => 0x3009,
        _ => code_point,
    }
}

impl From<u32> for BidiProperties {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<BidiProperties> for u32 {
    fn from(value: BidiProperties) -> Self {
        value.0
    }
}
