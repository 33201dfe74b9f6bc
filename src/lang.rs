//! # Language Ranges
//!
//! Which glyphs get repainted for a given language tag. Ranges are
//! half-open and confined to the BMP, since the table has no slots beyond it.

use crate::bundle::GLYPH_COUNT;
use crate::error::{PatchError, Result};

/// Half-open codepoint interval `[start, end)` inside the BMP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointRange {
    start: u32,
    end: u32,
}

impl CodepointRange {
    /// Validating constructor for ranges built at runtime.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start >= end || end as usize > GLYPH_COUNT {
            return Err(PatchError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    const fn fixed(start: u32, end: u32) -> Self {
        assert!(start < end && end as usize <= GLYPH_COUNT);
        Self { start, end }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of codepoints; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn codepoints(&self) -> std::ops::Range<u32> {
        self.start..self.end
    }
}

/// Hangul syllables (가-힣).
pub const HANGUL_SYLLABLES: &[CodepointRange] = &[CodepointRange::fixed(0xAC00, 0xD7A4)];

/// Hiragana, Katakana, Katakana phonetic extensions, then CJK unified ideographs.
pub const JAPANESE: &[CodepointRange] = &[
    CodepointRange::fixed(0x3040, 0x309F),
    CodepointRange::fixed(0x30A0, 0x30FF),
    CodepointRange::fixed(0x31F0, 0x31FF),
    CodepointRange::fixed(0x4E00, 0x9FFF),
];

/// A-Z, a-z.
pub const LATIN_BASIC: &[CodepointRange] = &[
    CodepointRange::fixed(0x0041, 0x005B),
    CodepointRange::fixed(0x0061, 0x007B),
];

/// Basic Latin plus Latin-1 accented letters (À-ÿ).
pub const LATIN_ACCENTED: &[CodepointRange] = &[
    CodepointRange::fixed(0x0041, 0x005B),
    CodepointRange::fixed(0x0061, 0x007B),
    CodepointRange::fixed(0x00C0, 0x00FF),
];

/// Accented Latin plus Latin Extended-A.
pub const LATIN_EXT_A: &[CodepointRange] = &[
    CodepointRange::fixed(0x0041, 0x005B),
    CodepointRange::fixed(0x0061, 0x007B),
    CodepointRange::fixed(0x00C0, 0x00FF),
    CodepointRange::fixed(0x0100, 0x017F),
];

pub const CYRILLIC: &[CodepointRange] = &[CodepointRange::fixed(0x0400, 0x04FF)];

/// ASCII digits 0-9, appended when `font_num` is set.
pub const DIGITS: CodepointRange = CodepointRange::fixed(0x0030, 0x003A);

/// Ranges for a language tag, or `None` if the tag is unknown.
pub fn language_ranges(tag: &str) -> Option<&'static [CodepointRange]> {
    let ranges = match tag {
        "ko" => HANGUL_SYLLABLES,
        "ja" => JAPANESE,
        "en" => LATIN_BASIC,
        "fr" | "frCA" | "de" | "it" | "nl" | "es" | "es419" | "pt" | "ptBR" => LATIN_ACCENTED,
        "pl" => LATIN_EXT_A,
        "ru" | "ua" => CYRILLIC,
        _ => return None,
    };
    Some(ranges)
}

/// Ordered ranges to repaint for `tag`, with digits appended last when
/// `font_num` is set.
pub fn ranges_for(tag: &str, font_num: bool) -> Result<Vec<CodepointRange>> {
    let mut ranges = language_ranges(tag)
        .ok_or_else(|| PatchError::UnsupportedLanguage(tag.to_string()))?
        .to_vec();
    if font_num {
        ranges.push(DIGITS);
    }
    Ok(ranges)
}
