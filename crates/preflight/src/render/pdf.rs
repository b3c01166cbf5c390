//! lopdf-backed implementation of the document canvas.
//!
//! Pages are buffered as content-stream operations and assembled into the
//! final document on [`PdfCanvas::save`]. Text uses the base-14 Helvetica
//! fonts with WinAnsi encoding, so no font embedding is required.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use crate::checklist::Rgb;
use crate::error::Result;
use crate::render::canvas::{Canvas, BLACK};
use crate::render::layout::PageSpec;
use crate::render::metrics::{FontStyle, PT_TO_MM};

/// Conversion factor from millimetres to typographic points.
const MM_TO_PT: f32 = 2.834_646;

/// A paginated PDF document under construction.
pub struct PdfCanvas {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    spec: PageSpec,
    pages: Vec<Vec<Operation>>,
    font: (FontStyle, f32),
    fill_color: Rgb,
    text_color: Rgb,
}

impl std::fmt::Debug for PdfCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfCanvas")
            .field("spec", &self.spec)
            .field("pages", &self.pages.len())
            .finish_non_exhaustive()
    }
}

impl PdfCanvas {
    /// Create an empty document with the given page geometry.
    #[must_use]
    pub fn new(spec: PageSpec) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        Self {
            doc,
            pages_id,
            resources_id,
            spec,
            pages: Vec::new(),
            font: (FontStyle::Regular, 10.0),
            fill_color: BLACK,
            text_color: BLACK,
        }
    }

    /// Number of pages begun so far.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Assemble the document and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if content-stream encoding or file writing fails.
    pub fn save(mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let width_pt = self.spec.width_mm * MM_TO_PT;
        let height_pt = self.spec.height_mm * MM_TO_PT;

        let mut kids: Vec<Object> = Vec::new();
        for operations in std::mem::take(&mut self.pages) {
            let content = Content { operations };
            let stream_id = self
                .doc
                .add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "Contents" => stream_id,
                "Resources" => self.resources_id,
                "MediaBox" => vec![
                    0_f32.into(),
                    0_f32.into(),
                    width_pt.into(),
                    height_pt.into(),
                ],
            });
            kids.push(page_id.into());
        }

        let page_count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();
        self.doc.save(path)?;
        debug!("wrote {} page PDF to {}", page_count, path.display());
        Ok(())
    }

    fn current_page(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn x_pt(&self, x_mm: f32) -> f32 {
        x_mm * MM_TO_PT
    }

    /// Flip the top-down mm coordinate into PDF's bottom-up point space.
    fn y_pt(&self, y_mm: f32) -> f32 {
        (self.spec.height_mm - y_mm) * MM_TO_PT
    }
}

fn color_components(color: Rgb) -> [f32; 3] {
    [
        f32::from(color[0]) / 255.0,
        f32::from(color[1]) / 255.0,
        f32::from(color[2]) / 255.0,
    ]
}

/// Encode text for a WinAnsi (Latin-1) literal string.
///
/// Codepoints outside Latin-1 are replaced with `?`.
fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF {
                c as u8
            } else {
                b'?'
            }
        })
        .collect()
}

impl Canvas for PdfCanvas {
    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.font = (style, size_pt);
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let [r, g, b] = color_components(self.fill_color);
        let (px, py) = (self.x_pt(x), self.y_pt(y + height));
        let (pw, ph) = (width * MM_TO_PT, height * MM_TO_PT);

        let page = self.current_page();
        page.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        page.push(Operation::new(
            "re",
            vec![px.into(), py.into(), pw.into(), ph.into()],
        ));
        page.push(Operation::new("f", vec![]));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (px, py) = (self.x_pt(x), self.y_pt(y + height));
        let (pw, ph) = (width * MM_TO_PT, height * MM_TO_PT);

        let page = self.current_page();
        page.push(Operation::new(
            "RG",
            vec![0_f32.into(), 0_f32.into(), 0_f32.into()],
        ));
        page.push(Operation::new(
            "re",
            vec![px.into(), py.into(), pw.into(), ph.into()],
        ));
        page.push(Operation::new("S", vec![]));
    }

    fn text(&mut self, x: f32, y: f32, text: &str) {
        let (style, size_pt) = self.font;
        let font_name = match style {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
        };
        // Baseline sits roughly 80% of the font size below the line top
        let baseline_mm = y + 0.8 * size_pt * PT_TO_MM;
        let (px, py) = (self.x_pt(x), self.y_pt(baseline_mm));
        let [r, g, b] = color_components(self.text_color);
        let bytes = encode_winansi(text);

        let page = self.current_page();
        page.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        page.push(Operation::new("BT", vec![]));
        page.push(Operation::new(
            "Tf",
            vec![font_name.into(), size_pt.into()],
        ));
        page.push(Operation::new("Td", vec![px.into(), py.into()]));
        page.push(Operation::new(
            "Tj",
            vec![Object::String(bytes, StringFormat::Literal)],
        ));
        page.push(Operation::new("ET", vec![]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_has_no_pages() {
        let canvas = PdfCanvas::new(PageSpec::a5());
        assert_eq!(canvas.page_count(), 0);
    }

    #[test]
    fn test_add_page_increments_count() {
        let mut canvas = PdfCanvas::new(PageSpec::a5());
        canvas.add_page();
        canvas.add_page();
        assert_eq!(canvas.page_count(), 2);
    }

    #[test]
    fn test_drawing_without_page_starts_one() {
        let mut canvas = PdfCanvas::new(PageSpec::a5());
        canvas.text(10.0, 10.0, "orphan text");
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn test_encode_winansi_ascii_passthrough() {
        assert_eq!(encode_winansi("Checklist"), b"Checklist".to_vec());
    }

    #[test]
    fn test_encode_winansi_latin1_kept() {
        assert_eq!(encode_winansi("Café"), vec![b'C', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_encode_winansi_replaces_wide_chars() {
        assert_eq!(encode_winansi("✓ ok"), vec![b'?', b' ', b'o', b'k']);
    }

    #[test]
    fn test_color_components_normalized() {
        let [r, g, b] = color_components([255, 0, 102]);
        assert!((r - 1.0).abs() < 1e-6);
        assert!(g.abs() < 1e-6);
        assert!((b - 0.4).abs() < 0.01);
    }

    #[test]
    fn test_save_produces_loadable_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        let mut canvas = PdfCanvas::new(PageSpec::a5());
        canvas.add_page();
        canvas.set_font(FontStyle::Bold, 20.0);
        canvas.text(10.0, 10.0, "PRE-FLIGHT");
        canvas.set_fill_color([0, 102, 204]);
        canvas.fill_rect(138.0, 0.0, 10.0, 210.0);
        canvas.add_page();
        canvas.stroke_rect(10.0, 10.0, 120.0, 50.0);
        canvas.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}
