//! # Text Measurement
//!
//! The single source of truth for "how much vertical space will this block
//! consume". Every renderer measures through this module instead of hardcoding
//! heights; repeated measurement of the same (text, font, size, width) input
//! always yields the same lines and height, which is what makes layout
//! planning reliable.
//!
//! Widths come from built-in advance tables for the standard PDF fonts the
//! sheets actually use (Helvetica, Helvetica-Bold, Courier). Oblique variants
//! share the upright advances; Courier is monospaced. Glyphs outside the
//! table fall back to a default advance.

use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// Line height as a multiple of the font size. One constant, applied
/// everywhere, so stacked measurements always agree.
pub const LINE_HEIGHT_FACTOR: f64 = 1.4;

/// The fonts available to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
    CourierBold,
}

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Courier is monospaced at 600/1000 em for every glyph.
const COURIER_ADVANCE: u16 = 600;

impl Font {
    /// Advance width of `ch` in 1/1000 em.
    fn advance(&self, ch: char) -> u16 {
        match self {
            Font::Courier | Font::CourierBold => COURIER_ADVANCE,
            Font::Helvetica | Font::HelveticaOblique => lookup(&HELVETICA_WIDTHS, ch, 556),
            Font::HelveticaBold => lookup(&HELVETICA_BOLD_WIDTHS, ch, 611),
        }
    }
}

fn lookup(table: &[u16; 95], ch: char, default: u16) -> u16 {
    let code = ch as u32;
    if (32..=126).contains(&code) {
        table[(code - 32) as usize]
    } else {
        // Accented Latin glyphs (the content is frequently Portuguese or
        // Spanish) are close enough to their base letter's advance.
        default
    }
}

/// A measured text block: the wrapped lines and the vertical space they need.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredBlock {
    pub lines: Vec<String>,
    /// Total block height in millimetres: line count × line height.
    pub height: f64,
}

impl MeasuredBlock {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Deterministic text measurement over the built-in advance tables.
#[derive(Debug, Default)]
pub struct TextMeasurer;

impl TextMeasurer {
    pub fn new() -> Self {
        Self
    }

    /// Width of a single character in millimetres at `size_pt`.
    pub fn char_width(&self, ch: char, font: Font, size_pt: f64) -> f64 {
        (font.advance(ch) as f64 / 1000.0) * size_pt * MM_PER_PT
    }

    /// Width of a string in millimetres at `size_pt`.
    pub fn string_width(&self, text: &str, font: Font, size_pt: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font, size_pt)).sum()
    }

    /// Vertical space one line occupies, in millimetres.
    pub fn line_height(size_pt: f64) -> f64 {
        size_pt * LINE_HEIGHT_FACTOR * MM_PER_PT
    }

    /// Break `text` into lines that fit within `max_width` millimetres.
    ///
    /// Greedy break at word boundaries; explicit newlines are mandatory
    /// breaks. A single word wider than the line is hard-broken character by
    /// character rather than allowed to overflow.
    pub fn wrap(&self, text: &str, font: Font, size_pt: f64, max_width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            self.wrap_paragraph(paragraph, font, size_pt, max_width, &mut lines);
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    fn wrap_paragraph(
        &self,
        paragraph: &str,
        font: Font,
        size_pt: f64,
        max_width: f64,
        lines: &mut Vec<String>,
    ) {
        let space_width = self.char_width(' ', font, size_pt);
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = self.string_width(word, font, size_pt);

            if word_width > max_width {
                // Oversized token: flush what we have, then hard-break it.
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                self.hard_break(word, font, size_pt, max_width, lines, &mut current, &mut current_width);
                continue;
            }

            let needed = if current.is_empty() {
                word_width
            } else {
                space_width + word_width
            };

            if current_width + needed > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += needed;
            }
        }

        if !current.is_empty() || paragraph.split_whitespace().next().is_none() {
            lines.push(current);
        }
    }

    fn hard_break(
        &self,
        word: &str,
        font: Font,
        size_pt: f64,
        max_width: f64,
        lines: &mut Vec<String>,
        current: &mut String,
        current_width: &mut f64,
    ) {
        for ch in word.chars() {
            let w = self.char_width(ch, font, size_pt);
            if *current_width + w > max_width && !current.is_empty() {
                lines.push(std::mem::take(current));
                *current_width = 0.0;
            }
            current.push(ch);
            *current_width += w;
        }
    }

    /// Wrap and measure in one call. The height is exactly
    /// `lines.len() × line_height(size_pt)`.
    pub fn measure(&self, text: &str, font: Font, size_pt: f64, max_width: f64) -> MeasuredBlock {
        let lines = self.wrap(text, font, size_pt, max_width);
        let height = lines.len() as f64 * Self::line_height(size_pt);
        MeasuredBlock { lines, height }
    }
}
