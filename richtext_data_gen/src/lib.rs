// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Populates Richtext's four property tries from the ICU4X compiled Unicode data.
//!
//! The binary (see `./main.rs`) writes the tries as resources; tests and applications that don't
//! want to ship resources can build them in-process with [`UnicodeData::compiled`].

use std::io;
use std::path::Path;

use icu_properties::props::{
    BidiClass, BidiMirroringGlyph, BidiPairedBracketType, ExtendedPictographic, GeneralCategory,
    GraphemeClusterBreak, LineBreak, WhiteSpace,
};
use icu_properties::{CodePointMapData, CodePointSetData};
use richtext_data::{
    BidiProperties, Directionality, GraphemeClusterClass, LineBreakClass, MAX_CODE_POINT,
    PairedBracketType, TrieBuilder, TrieError, UnicodeTrie, WordBoundaryClass,
};

/// File names of the generated resources, in the order of the fields of [`UnicodeData`].
pub const RESOURCE_NAMES: [&str; 4] = [
    "bidi.trie",
    "line_break.trie",
    "grapheme.trie",
    "word_boundary.trie",
];

/// All four property tries.
#[derive(Clone, Debug)]
pub struct UnicodeData {
    /// Packed [`BidiProperties`] per code point.
    pub bidi: UnicodeTrie,
    /// [`LineBreakClass`] per code point.
    pub line_break: UnicodeTrie,
    /// [`GraphemeClusterClass`] per code point.
    pub grapheme: UnicodeTrie,
    /// [`WordBoundaryClass`] per code point.
    pub word_boundary: UnicodeTrie,
}

impl UnicodeData {
    /// Builds every trie from the compiled data.
    pub fn compiled() -> Result<Self, TrieError> {
        Ok(Self {
            bidi: bidi_trie()?,
            line_break: line_break_trie()?,
            grapheme: grapheme_trie()?,
            word_boundary: word_boundary_trie()?,
        })
    }
}

/// Fills a builder from a per-code-point function, issuing one `set_range` per run of equal values.
fn fill(builder: &mut TrieBuilder, value_for: impl Fn(u32) -> u32) -> Result<(), TrieError> {
    let mut run_start = 0;
    let mut run_value = value_for(0);
    for cp in 1..=MAX_CODE_POINT {
        let value = value_for(cp);
        if value != run_value {
            builder.set_range(run_start, cp - 1, run_value, true)?;
            run_start = cp;
            run_value = value;
        }
    }
    builder.set_range(run_start, MAX_CODE_POINT, run_value, true)
}

/// Builds the bidi trie: directionality plus paired-bracket data.
pub fn bidi_trie() -> Result<UnicodeTrie, TrieError> {
    let bidi_class = CodePointMapData::<BidiClass>::new();
    let mirroring = CodePointMapData::<BidiMirroringGlyph>::new();
    let mut builder = TrieBuilder::new(0, 0);
    fill(&mut builder, |cp| {
        let directionality = Directionality::from(bidi_class.get32(cp));
        let glyph = mirroring.get32(cp);
        let bracket_type = match glyph.paired_bracket_type {
            BidiPairedBracketType::Open => PairedBracketType::Open,
            BidiPairedBracketType::Close => PairedBracketType::Close,
            _ => PairedBracketType::None,
        };
        let paired_bracket = match bracket_type {
            PairedBracketType::None => 0,
            _ => glyph.mirroring_glyph.map_or(0, u32::from),
        };
        BidiProperties::new(directionality, bracket_type, paired_bracket).into()
    })?;
    Ok(freeze(&builder, "bidi"))
}

/// Builds the line break trie.
pub fn line_break_trie() -> Result<UnicodeTrie, TrieError> {
    let line_break = CodePointMapData::<LineBreak>::new();
    let xx = LineBreakClass::XX as u32;
    let mut builder = TrieBuilder::new(xx, xx);
    fill(&mut builder, |cp| {
        LineBreakClass::from_icu_line_break(line_break.get32(cp)) as u32
    })?;
    Ok(freeze(&builder, "line break"))
}

/// Builds the grapheme cluster trie, with `Extended_Pictographic` overlaid onto characters whose
/// grapheme cluster break class is `Other`.
pub fn grapheme_trie() -> Result<UnicodeTrie, TrieError> {
    let gcb = CodePointMapData::<GraphemeClusterBreak>::new();
    let ext_pict = CodePointSetData::new::<ExtendedPictographic>();
    let any = GraphemeClusterClass::Any as u32;
    let mut builder = TrieBuilder::new(any, any);
    fill(&mut builder, |cp| {
        GraphemeClusterClass::from_icu_grapheme(gcb.get32(cp)) as u32
    })?;
    for range in ext_pict.iter_ranges() {
        builder.set_range(
            *range.start(),
            *range.end(),
            GraphemeClusterClass::ExtPict as u32,
            false,
        )?;
    }
    Ok(freeze(&builder, "grapheme"))
}

/// Builds the word boundary trie.
pub fn word_boundary_trie() -> Result<UnicodeTrie, TrieError> {
    let general_category = CodePointMapData::<GeneralCategory>::new();
    let white_space = CodePointSetData::new::<WhiteSpace>();
    let punctuation = WordBoundaryClass::Punctuation as u32;
    let mut builder = TrieBuilder::new(punctuation, punctuation);
    fill(&mut builder, |cp| {
        let class = if white_space.contains32(cp) {
            WordBoundaryClass::Space
        } else {
            word_class(general_category.get32(cp))
        };
        class as u32
    })?;
    Ok(freeze(&builder, "word boundary"))
}

fn word_class(gc: GeneralCategory) -> WordBoundaryClass {
    match gc {
        GeneralCategory::UppercaseLetter
        | GeneralCategory::LowercaseLetter
        | GeneralCategory::TitlecaseLetter
        | GeneralCategory::ModifierLetter
        | GeneralCategory::OtherLetter
        | GeneralCategory::DecimalNumber
        | GeneralCategory::LetterNumber
        | GeneralCategory::OtherNumber
        | GeneralCategory::ConnectorPunctuation => WordBoundaryClass::AlphaDigit,
        GeneralCategory::NonspacingMark
        | GeneralCategory::SpacingMark
        | GeneralCategory::EnclosingMark
        | GeneralCategory::Format => WordBoundaryClass::Ignore,
        _ => WordBoundaryClass::Punctuation,
    }
}

fn freeze(builder: &TrieBuilder, name: &str) -> UnicodeTrie {
    let trie = builder.freeze();
    log::debug!("built {name} trie: {} words", trie.data().len());
    trie
}

/// Builds every trie and writes the resources into `out_dir`.
pub fn generate(out_dir: &Path) -> io::Result<()> {
    let data = UnicodeData::compiled().map_err(io::Error::other)?;
    let tries = [
        &data.bidi,
        &data.line_break,
        &data.grapheme,
        &data.word_boundary,
    ];
    for (name, trie) in RESOURCE_NAMES.iter().zip(tries) {
        let file = std::fs::File::create(out_dir.join(name))?;
        trie.write_to(io::BufWriter::new(file))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bidi_classes_and_brackets() {
        let trie = bidi_trie().unwrap();
        let get = |ch: char| BidiProperties::from(trie.get_char(ch));
        assert_eq!(get('a').directionality(), Directionality::L);
        assert_eq!(get('\u{05D0}').directionality(), Directionality::R);
        assert_eq!(get('\u{0627}').directionality(), Directionality::AL);
        assert_eq!(get('1').directionality(), Directionality::EN);
        assert_eq!(get('\u{2067}').directionality(), Directionality::RLI);

        let open = get('(');
        assert_eq!(open.directionality(), Directionality::ON);
        assert_eq!(open.paired_bracket_type(), PairedBracketType::Open);
        assert_eq!(open.paired_bracket(), ')' as u32);
        assert_eq!(open.bracket_id('(' as u32), get(')').bracket_id(')' as u32));
        assert_eq!(get('<').paired_bracket_type(), PairedBracketType::None);
        assert_eq!(
            get('\u{2329}').bracket_id(0x2329),
            get('\u{3009}').bracket_id(0x3009)
        );
    }

    #[test]
    fn line_break_classes() {
        let trie = line_break_trie().unwrap();
        let get = |ch: char| LineBreakClass::from_raw(trie.get_char(ch));
        assert_eq!(get('a'), LineBreakClass::AL);
        assert_eq!(get(' '), LineBreakClass::SP);
        assert_eq!(get('\n'), LineBreakClass::LF);
        assert_eq!(get('('), LineBreakClass::OP);
        assert_eq!(get(')'), LineBreakClass::CP);
        assert_eq!(get('\u{4E2D}'), LineBreakClass::ID);
        assert_eq!(get('\u{200D}'), LineBreakClass::ZWJ);
        assert_eq!(get('\u{05D0}'), LineBreakClass::HL);
    }

    #[test]
    fn grapheme_classes() {
        let trie = grapheme_trie().unwrap();
        let get = |ch: char| GraphemeClusterClass::from_raw(trie.get_char(ch));
        assert_eq!(get('a'), GraphemeClusterClass::Any);
        assert_eq!(get('\r'), GraphemeClusterClass::CR);
        assert_eq!(get('\u{0301}'), GraphemeClusterClass::Extend);
        assert_eq!(get('\u{1F600}'), GraphemeClusterClass::ExtPict);
        assert_eq!(get('\u{200D}'), GraphemeClusterClass::ZWJ);
        assert_eq!(get('\u{1F1E6}'), GraphemeClusterClass::RegionalIndicator);
        assert_eq!(get('\u{AC00}'), GraphemeClusterClass::LV);
        assert_eq!(get('\u{00A9}'), GraphemeClusterClass::ExtPict);
    }

    #[test]
    fn word_boundary_classes() {
        let trie = word_boundary_trie().unwrap();
        let get = |ch: char| WordBoundaryClass::from_raw(trie.get_char(ch));
        assert_eq!(get('a'), WordBoundaryClass::AlphaDigit);
        assert_eq!(get('7'), WordBoundaryClass::AlphaDigit);
        assert_eq!(get('_'), WordBoundaryClass::AlphaDigit);
        assert_eq!(get(' '), WordBoundaryClass::Space);
        assert_eq!(get('\u{3000}'), WordBoundaryClass::Space);
        assert_eq!(get('.'), WordBoundaryClass::Punctuation);
        assert_eq!(get('\u{0301}'), WordBoundaryClass::Ignore);
        assert_eq!(get('\u{200B}'), WordBoundaryClass::Ignore);
    }

    #[test]
    fn unassigned_code_points_use_block_defaults() {
        let trie = bidi_trie().unwrap();
        let get = |ch: char| BidiProperties::from(trie.get_char(ch)).directionality();
        assert_eq!(get('\u{05C8}'), Directionality::R);
        assert_eq!(get('\u{0378}'), Directionality::L);
    }
}
