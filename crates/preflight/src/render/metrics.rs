//! Static font-metric tables for the two document fonts.
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard Helvetica AFM metrics that the PDF base-14 fonts guarantee.
//! Tables cover ASCII 0x20..=0x7E (95 printable characters); everything
//! else falls back to an average width. Index = (char as usize) - 32.

/// The font styles available on the document canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Helvetica — body text.
    Regular,
    /// Helvetica-Bold — banners, section headers, entry prefixes.
    Bold,
}

/// Conversion factor from typographic points to millimetres.
pub const PT_TO_MM: f32 = 0.352_778;

/// Static character-width table for one font.
///
/// All widths are in em units at 1em (i.e., at the configured font size).
/// `widths[i]` = width of ASCII character `(i + 32)`.
#[derive(Debug)]
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    /// Width of the space character.
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measure the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    #[must_use]
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }
}

/// Helvetica (regular weight).
#[rustfmt::skip]
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

/// Helvetica-Bold.
#[rustfmt::skip]
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.584,
    space_width: 0.278,
};

/// Returns the static metric table for a font style.
#[must_use]
pub fn metrics(style: FontStyle) -> &'static FontMetricTable {
    match style {
        FontStyle::Regular => &HELVETICA_TABLE,
        FontStyle::Bold => &HELVETICA_BOLD_TABLE,
    }
}

/// Measure the rendered width of a string in millimetres at a font size.
#[must_use]
pub fn text_width_mm(text: &str, style: FontStyle, size_pt: f32) -> f32 {
    metrics(style).measure_em(text) * size_pt * PT_TO_MM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_is_zero() {
        assert_eq!(metrics(FontStyle::Regular).measure_em(""), 0.0);
    }

    #[test]
    fn test_measure_single_space() {
        let width = metrics(FontStyle::Regular).measure_em(" ");
        assert!((width - 0.278).abs() < 1e-4, "space should be 0.278, got {width}");
    }

    #[test]
    fn test_measure_known_word() {
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics(FontStyle::Regular).measure_em("Rust");
        assert!((width - 2.056).abs() < 1e-3, "Rust should be ~2.056, got {width}");
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let table = metrics(FontStyle::Regular);
        let width = table.measure_em("é");
        assert!((width - table.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_bold_not_narrower_than_regular() {
        let text = "Inspect propellers before every flight";
        let regular = metrics(FontStyle::Regular).measure_em(text);
        let bold = metrics(FontStyle::Bold).measure_em(text);
        assert!(bold >= regular);
    }

    #[test]
    fn test_text_width_mm_scales_with_size() {
        let at_10 = text_width_mm("Checklist", FontStyle::Regular, 10.0);
        let at_20 = text_width_mm("Checklist", FontStyle::Regular, 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-3);
    }

    #[test]
    fn test_text_width_mm_plausible_magnitude() {
        // A ~40 character line at 10pt should be well under an A5 text width
        let line = "Confirm home point and RTH altitude set";
        let width = text_width_mm(line, FontStyle::Regular, 10.0);
        assert!(width > 30.0 && width < 120.0, "got {width}");
    }
}
