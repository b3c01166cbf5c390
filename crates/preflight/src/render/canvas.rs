//! The document canvas collaborator.
//!
//! The generator drives rendering through this narrow trait: add a page,
//! draw rectangles, write text. Coordinates are millimetres from the
//! top-left page corner. Text measurement is deliberately not part of the
//! canvas; the layout estimator uses the static metric tables instead.

use crate::checklist::Rgb;
use crate::render::metrics::FontStyle;

/// Black, the default ink.
pub const BLACK: Rgb = [0, 0, 0];

/// White, used for text on colored section headers.
pub const WHITE: Rgb = [255, 255, 255];

/// Light grey fill of the metadata box.
pub const META_GREY: Rgb = [211, 211, 211];

/// Drawing surface for one output document.
pub trait Canvas {
    /// Begin a new page. All subsequent drawing lands on it.
    fn add_page(&mut self);

    /// Set the font used by subsequent [`Canvas::text`] calls.
    fn set_font(&mut self, style: FontStyle, size_pt: f32);

    /// Set the fill color used by subsequent [`Canvas::fill_rect`] calls.
    fn set_fill_color(&mut self, color: Rgb);

    /// Set the color used by subsequent [`Canvas::text`] calls.
    fn set_text_color(&mut self, color: Rgb);

    /// Fill a rectangle. `(x, y)` is its top-left corner in mm.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Outline a rectangle. `(x, y)` is its top-left corner in mm.
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Write a single line of text with its top edge at `y`.
    fn text(&mut self, x: f32, y: f32, text: &str);
}

/// A canvas that records drawing calls instead of producing output.
///
/// Backs the generator and layout tests: page counts and drawn strings can
/// be asserted without touching the PDF backend.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    /// Number of pages begun.
    pub pages: usize,
    /// Every string drawn, in call order.
    pub texts: Vec<String>,
    /// Number of filled rectangles.
    pub filled_rects: usize,
    /// Number of outlined rectangles.
    pub stroked_rects: usize,
}

#[cfg(test)]
impl Canvas for RecordingCanvas {
    fn add_page(&mut self) {
        self.pages += 1;
    }

    fn set_font(&mut self, _style: FontStyle, _size_pt: f32) {}

    fn set_fill_color(&mut self, _color: Rgb) {}

    fn set_text_color(&mut self, _color: Rgb) {}

    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {
        self.filled_rects += 1;
    }

    fn stroke_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {
        self.stroked_rects += 1;
    }

    fn text(&mut self, _x: f32, _y: f32, text: &str) {
        self.texts.push(text.to_string());
    }
}
