// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use icu_properties::props::GraphemeClusterBreak;

/// The grapheme cluster break class of a character (UAX #29), with `Extended_Pictographic`
/// folded in.
///
/// [`SOT`](Self::SOT), [`EOT`](Self::EOT) and [`ExtPictZwg`](Self::ExtPictZwg) are never stored
/// in the trie; the segmenter uses them for the text boundaries and for a ZWJ that follows an
/// extended pictographic sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(
    clippy::upper_case_acronyms,
    reason = "variants use the property value aliases from UAX #29."
)]
pub enum GraphemeClusterClass {
    /// Any other character.
    Any = 0,
    /// Carriage return.
    CR = 1,
    /// Line feed.
    LF = 2,
    /// Control characters and separators.
    Control = 3,
    /// Grapheme extenders, including emoji modifiers.
    Extend = 4,
    /// Regional indicator symbols.
    RegionalIndicator = 5,
    /// Prepended concatenation marks.
    Prepend = 6,
    /// Spacing combining marks.
    SpacingMark = 7,
    /// Hangul leading jamo.
    L = 8,
    /// Hangul vowel jamo.
    V = 9,
    /// Hangul trailing jamo.
    T = 10,
    /// Hangul LV syllable.
    LV = 11,
    /// Hangul LVT syllable.
    LVT = 12,
    /// `Extended_Pictographic` characters.
    ExtPict = 13,
    /// Zero width joiner.
    ZWJ = 14,
    /// Start of text.
    SOT = 15,
    /// End of text.
    EOT = 16,
    /// A ZWJ preceded by an extended pictographic character and any extenders.
    ExtPictZwg = 17,
    // NOTICE: If a new value is added, be sure to modify `MAX_VALUE` and `ALL`.
}

impl GraphemeClusterClass {
    /// Returns the maximum numeric value for known variants.
    pub const MAX_VALUE: u8 = Self::ExtPictZwg as u8;

    /// Every variant, indexed by its numeric value.
    pub const ALL: [Self; 18] = [
        Self::Any,
        Self::CR,
        Self::LF,
        Self::Control,
        Self::Extend,
        Self::RegionalIndicator,
        Self::Prepend,
        Self::SpacingMark,
        Self::L,
        Self::V,
        Self::T,
        Self::LV,
        Self::LVT,
        Self::ExtPict,
        Self::ZWJ,
        Self::SOT,
        Self::EOT,
        Self::ExtPictZwg,
    ];

    /// Decodes a numeric value, returning `None` if it is out of range.
    pub const fn from_u8(value: u8) -> Option<Self> {
        if value <= Self::MAX_VALUE {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    /// Decodes a raw trie value; values that don't decode are treated as [`Any`](Self::Any).
    pub fn from_raw(value: u32) -> Self {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_u8)
            .unwrap_or(Self::Any)
    }

    /// Converts an ICU4X `Grapheme_Cluster_Break` value.
    ///
    /// The legacy emoji classes are folded the way current versions of UAX #29 do:
    /// `E_Modifier` becomes [`Extend`](Self::Extend) and the other emoji classes become
    /// [`Any`](Self::Any). `Extended_Pictographic` is a separate property and is overlaid by the
    /// caller.
    pub fn from_icu_grapheme(value: GraphemeClusterBreak) -> Self {
        match value {
            GraphemeClusterBreak::Control => Self::Control,
            GraphemeClusterBreak::CR => Self::CR,
            GraphemeClusterBreak::Extend | GraphemeClusterBreak::EModifier => Self::Extend,
            GraphemeClusterBreak::L => Self::L,
            GraphemeClusterBreak::LF => Self::LF,
            GraphemeClusterBreak::LV => Self::LV,
            GraphemeClusterBreak::LVT => Self::LVT,
            GraphemeClusterBreak::T => Self::T,
            GraphemeClusterBreak::V => Self::V,
            GraphemeClusterBreak::SpacingMark => Self::SpacingMark,
            GraphemeClusterBreak::Prepend => Self::Prepend,
            GraphemeClusterBreak::RegionalIndicator => Self::RegionalIndicator,
            GraphemeClusterBreak::ZWJ => Self::ZWJ,
            _ => Self::Any,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icu_conversion() {
        assert_eq!(
            GraphemeClusterClass::from_icu_grapheme(GraphemeClusterBreak::Other),
            GraphemeClusterClass::Any
        );
        assert_eq!(
            GraphemeClusterClass::from_icu_grapheme(GraphemeClusterBreak::LVT),
            GraphemeClusterClass::LVT
        );
        assert_eq!(
            GraphemeClusterClass::from_icu_grapheme(GraphemeClusterBreak::EModifier),
            GraphemeClusterClass::Extend
        );
        assert_eq!(
            GraphemeClusterClass::from_icu_grapheme(GraphemeClusterBreak::ZWJ),
            GraphemeClusterClass::ZWJ
        );
    }

    #[test]
    fn raw_values_fall_back_to_any() {
        assert_eq!(GraphemeClusterClass::from_raw(4), GraphemeClusterClass::Extend);
        assert_eq!(GraphemeClusterClass::from_raw(200), GraphemeClusterClass::Any);
        assert_eq!(GraphemeClusterClass::from_raw(u32::MAX), GraphemeClusterClass::Any);
    }
}
