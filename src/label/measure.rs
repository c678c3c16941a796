//! Text measurement consumed by the label engine.
//!
//! The engine only needs the extent of a text block in plan centimetres.
//! Any implementation must be deterministic for identical inputs so that
//! bounding boxes and corrections stay pure.

use super::Font;
use crate::defaults;
use crate::types::{Cm, Size};

/// Measures a block of text lines set in a font.
pub trait MeasureText {
    fn measure(&self, lines: &[&str], font: &Font) -> Size<Cm>;
}

impl<F> MeasureText for F
where
    F: Fn(&[&str], &Font) -> Size<Cm>,
{
    fn measure(&self, lines: &[&str], font: &Font) -> Size<Cm> {
        self(lines, font)
    }
}

/// Proportional character widths for printable ASCII, in hundredths of an
/// average character.
#[rustfmt::skip]
const CHAR_WIDTHS: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of a line in hundredths of an average character.
/// Characters outside printable ASCII count as one average character.
pub fn text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| match c {
            ' '..='~' => CHAR_WIDTHS[(c as usize) - 0x20] as u32,
            _ => 100,
        })
        .sum()
}

/// Font-independent estimate based on a proportional width table.
///
/// Width is the longest line; height is one line advance per line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalMeasure {
    pub line_spacing: f64,
    pub char_width_em: f64,
}

impl Default for ProportionalMeasure {
    fn default() -> Self {
        ProportionalMeasure {
            line_spacing: defaults::LINE_SPACING,
            char_width_em: defaults::CHAR_WIDTH_EM,
        }
    }
}

impl MeasureText for ProportionalMeasure {
    fn measure(&self, lines: &[&str], font: &Font) -> Size<Cm> {
        if lines.iter().all(|line| line.is_empty()) {
            return Size::zero();
        }
        let em = font.size.to_cm();
        let longest = lines.iter().map(|line| text_length(line)).max().unwrap_or(0);
        let width = em * (longest as f64 * 0.01 * self.char_width_em);
        let height = em * (lines.len() as f64 * self.line_spacing);
        Size::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Points;

    #[test]
    fn text_length_uses_proportional_table() {
        assert_eq!(text_length(""), 0);
        assert_eq!(text_length("i"), 47);
        assert_eq!(text_length("W"), 150);
        assert_eq!(text_length("é"), 100);
    }

    #[test]
    fn empty_text_measures_zero() {
        let font = Font::new("Arial", Points(12.0));
        let measure = ProportionalMeasure::default();
        assert_eq!(measure.measure(&[], &font), Size::zero());
        assert_eq!(measure.measure(&[""], &font), Size::zero());
    }

    #[test]
    fn lines_stack_and_longest_wins() {
        let font = Font::new("Arial", Points(72.0));
        let measure = ProportionalMeasure { line_spacing: 1.0, char_width_em: 1.0 };
        let one = measure.measure(&["WW"], &font);
        let two = measure.measure(&["WW", "i"], &font);
        assert!((one.w.raw() - 2.54 * 3.0).abs() < 1e-9);
        assert_eq!(one.w, two.w);
        assert!((two.h.raw() - 2.0 * one.h.raw()).abs() < 1e-9);
    }

    #[test]
    fn measurement_is_deterministic() {
        let font = Font::new("Arial", Points(9.0));
        let measure = ProportionalMeasure::default();
        let lines = ["Lot 12", "DP 34567"];
        assert_eq!(measure.measure(&lines, &font), measure.measure(&lines, &font));
    }

    #[test]
    fn closures_are_measurers() {
        let fixed = |_: &[&str], _: &Font| Size::new(Cm(3.0), Cm(0.5));
        let font = Font::new("Arial", Points(9.0));
        assert_eq!(fixed.measure(&["x"], &font), Size::new(Cm(3.0), Cm(0.5)));
    }
}
