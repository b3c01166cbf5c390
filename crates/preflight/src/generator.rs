//! Document generation.
//!
//! [`Generator`] walks the loaded checklists, filters each section's
//! procedures against the run selection, and drives a [`Canvas`] through the
//! greedy page-flow: estimate a section's height, break to a fresh page
//! (repeating the banner, metadata box, and color band) when it would
//! overflow, then draw the section box and its entries. Two documents are
//! produced per run: the compact A5 summary and the detailed A4 manual.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::checklist::{filter, Checklist, Procedure, Section};
use crate::config::OutputConfig;
use crate::error::Result;
use crate::facet::{FacetCatalog, Selection};
use crate::render::canvas::{Canvas, BLACK, META_GREY, WHITE};
use crate::render::layout::{
    manual_paragraph_height, manual_entry_lines, manual_section_height, summary_entry_lines,
    summary_section_height, wrap_spans, wrap_words, ManualStyle, PageFlow, PageSpec, SummaryStyle,
};
use crate::render::metrics::{text_width_mm, FontStyle};
use crate::render::PdfCanvas;

/// Height of one wrapped banner title line in mm.
const BANNER_LINE_HEIGHT: f32 = 10.0;

/// Width of the color band along the right page edge in mm.
const BAND_WIDTH: f32 = 10.0;

/// Produces the two output documents for one filtered selection.
#[derive(Debug)]
pub struct Generator {
    checklists: Vec<Checklist>,
    selection: Selection,
    catalog: FacetCatalog,
    generated_at: DateTime<Local>,
}

impl Generator {
    /// Create a generator for the given documents and selection.
    ///
    /// The generation timestamp is captured here so every page of both
    /// documents carries the same metadata line.
    #[must_use]
    pub fn new(checklists: Vec<Checklist>, selection: Selection, catalog: FacetCatalog) -> Self {
        Self {
            checklists,
            selection,
            catalog,
            generated_at: Local::now(),
        }
    }

    /// The metadata line shown in the grey box under each banner.
    #[must_use]
    pub fn metadata_line(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.catalog.operation_label(&self.selection.operation),
            self.catalog.platform_label(&self.selection.platform),
            self.catalog.count_label(&self.selection.count),
            self.generated_at.format("%d-%m-%Y %H:%M")
        )
    }

    /// Render both documents and write them into `folder`.
    ///
    /// Returns the summary and manual paths, in that order.
    ///
    /// # Errors
    ///
    /// Returns an error if either PDF cannot be written.
    pub fn generate(&self, folder: &Path, output: &OutputConfig) -> Result<(PathBuf, PathBuf)> {
        let mut summary = PdfCanvas::new(PageSpec::a5());
        self.render_summary(&mut summary);
        let summary_pages = summary.page_count();
        let summary_path = folder.join(&output.summary_filename);
        summary.save(&summary_path)?;
        info!(
            "summary checklist written: {} ({} pages)",
            summary_path.display(),
            summary_pages
        );

        let mut manual = PdfCanvas::new(PageSpec::a4_manual());
        self.render_manual(&mut manual);
        let manual_pages = manual.page_count();
        let manual_path = folder.join(&output.manual_filename);
        manual.save(&manual_path)?;
        info!(
            "procedure manual written: {} ({} pages)",
            manual_path.display(),
            manual_pages
        );

        Ok((summary_path, manual_path))
    }

    /// Render the compact A5 summary checklist.
    pub fn render_summary<C: Canvas>(&self, canvas: &mut C) {
        let style = SummaryStyle::default();
        let spec = PageSpec::a5();

        for checklist in &self.checklists {
            let sections = self.filtered_sections(checklist);
            let mut flow = PageFlow::new(spec);
            canvas.add_page();

            // The whole-document estimate decides whether the first banner
            // already carries a page number.
            let doc_estimate = style.line_height
                + sections
                    .iter()
                    .flat_map(|(_, procedures)| procedures.iter())
                    .map(|p| summary_entry_lines(&p.entry, &style) as f32 * style.line_height)
                    .sum::<f32>();
            let numbered = !flow.fits(doc_estimate);
            self.summary_page_header(canvas, &mut flow, checklist, &style, numbered);

            for (section, procedures) in &sections {
                let height = summary_section_height(procedures, &style);
                if !flow.fits(height) {
                    flow.break_page();
                    canvas.add_page();
                    self.summary_page_header(canvas, &mut flow, checklist, &style, true);
                }

                self.section_box(
                    canvas,
                    &mut flow,
                    checklist,
                    &section.name,
                    style.box_width,
                    height,
                    style.line_height,
                    style.section_font_size,
                );

                canvas.set_font(FontStyle::Regular, style.font_size);
                let left = flow.spec().margin_left;
                for procedure in procedures {
                    canvas.text(left, flow.y, "o");
                    let lines = wrap_words(
                        &procedure.entry,
                        FontStyle::Regular,
                        style.font_size,
                        style.box_width - style.bullet_indent,
                    );
                    for line in lines {
                        canvas.text(left + style.bullet_indent, flow.y, &line);
                        flow.advance(style.line_height);
                    }
                }
            }

            flow.advance(style.line_height);
        }
    }

    /// Render the detailed A4 procedure manual.
    pub fn render_manual<C: Canvas>(&self, canvas: &mut C) {
        let style = ManualStyle::default();
        let spec = PageSpec::a4_manual();

        for checklist in &self.checklists {
            let sections = self.filtered_sections(checklist);
            let mut flow = PageFlow::new(spec);
            canvas.add_page();

            let doc_estimate = style.line_height
                + sections
                    .iter()
                    .flat_map(|(_, procedures)| procedures.iter())
                    .map(|p| manual_paragraph_height(manual_entry_lines(p, &style), &style))
                    .sum::<f32>();
            let numbered = !flow.fits(doc_estimate);
            self.manual_page_header(canvas, &mut flow, checklist, &style, numbered);

            for (section, procedures) in &sections {
                let height = manual_section_height(procedures, &style);
                if !flow.fits(height) {
                    flow.break_page();
                    canvas.add_page();
                    self.manual_page_header(canvas, &mut flow, checklist, &style, true);
                }

                self.section_box(
                    canvas,
                    &mut flow,
                    checklist,
                    &section.name,
                    style.box_width,
                    height,
                    style.line_height,
                    style.section_font_size,
                );

                let left = flow.spec().margin_left;
                for procedure in procedures {
                    let entry_run = format!("{}:", procedure.entry);
                    let spans = [
                        (FontStyle::Bold, entry_run.as_str()),
                        (FontStyle::Regular, procedure.description.as_str()),
                    ];
                    let lines =
                        wrap_spans(&spans, style.font_size, style.box_width - style.wrap_inset);
                    let line_count = lines.len();
                    for (index, line) in lines.into_iter().enumerate() {
                        let mut x = left;
                        for (run_style, text) in line {
                            canvas.set_font(run_style, style.font_size);
                            canvas.text(x, flow.y, &text);
                            x += text_width_mm(&text, run_style, style.font_size);
                        }
                        if index + 1 < line_count {
                            flow.advance(style.par_spacing);
                        }
                    }
                    flow.advance(style.line_height);
                }
            }

            flow.advance(style.line_height);
        }
    }

    /// Collect each section with its procedures filtered to the selection.
    fn filtered_sections<'a>(
        &self,
        checklist: &'a Checklist,
    ) -> Vec<(&'a Section, Vec<&'a Procedure>)> {
        checklist
            .sections
            .iter()
            .map(|section| (section, filter(&section.procedures, &self.selection)))
            .collect()
    }

    /// Banner, metadata box, and color band at the top of a summary page.
    fn summary_page_header<C: Canvas>(
        &self,
        canvas: &mut C,
        flow: &mut PageFlow,
        checklist: &Checklist,
        style: &SummaryStyle,
        numbered: bool,
    ) {
        let title = banner_title(&checklist.title, flow.page, numbered);
        self.banner(
            canvas,
            flow,
            &title,
            style.title_font_size,
            style.title_width,
            style.line_height * 1.5,
        );
        self.metadata_box(canvas, flow, style.meta_font_size, style.box_width);
        // The A5 band bleeds past the right trim edge, matching the print layout
        canvas.set_fill_color(checklist.color);
        canvas.fill_rect(140.0, 0.0, BAND_WIDTH, flow.spec().height_mm);
        canvas.set_text_color(BLACK);
        canvas.set_font(FontStyle::Regular, style.font_size);
    }

    /// Banner, metadata box, and color band at the top of a manual page.
    fn manual_page_header<C: Canvas>(
        &self,
        canvas: &mut C,
        flow: &mut PageFlow,
        checklist: &Checklist,
        style: &ManualStyle,
        numbered: bool,
    ) {
        let title = banner_title(&checklist.title, flow.page, numbered);
        self.banner(
            canvas,
            flow,
            &title,
            style.title_font_size,
            style.title_width,
            style.line_height,
        );
        self.metadata_box(canvas, flow, style.meta_font_size, style.box_width);
        canvas.set_fill_color(checklist.color);
        canvas.fill_rect(
            flow.spec().width_mm - BAND_WIDTH,
            0.0,
            BAND_WIDTH,
            flow.spec().height_mm,
        );
        canvas.set_text_color(BLACK);
        canvas.set_font(FontStyle::Regular, style.font_size);
    }

    /// Uppercased title block, wrapped and centered on the page.
    fn banner<C: Canvas>(
        &self,
        canvas: &mut C,
        flow: &mut PageFlow,
        title: &str,
        font_size: f32,
        title_width: f32,
        spacing_after: f32,
    ) {
        canvas.set_font(FontStyle::Bold, font_size);
        canvas.set_text_color(BLACK);
        let block_left = (flow.spec().width_mm - title_width) / 2.0;
        for line in wrap_words(&title.to_uppercase(), FontStyle::Bold, font_size, title_width) {
            let line_width = text_width_mm(&line, FontStyle::Bold, font_size);
            canvas.text(block_left + (title_width - line_width) / 2.0, flow.y, &line);
            flow.advance(BANNER_LINE_HEIGHT);
        }
        flow.advance(spacing_after);
    }

    /// Grey metadata box with the selection labels and the run timestamp.
    fn metadata_box<C: Canvas>(
        &self,
        canvas: &mut C,
        flow: &mut PageFlow,
        font_size: f32,
        box_width: f32,
    ) {
        let text = self.metadata_line();
        let height = font_size * 0.6;
        let left = flow.spec().margin_left;

        canvas.set_fill_color(META_GREY);
        canvas.fill_rect(left, flow.y, box_width, height);
        canvas.stroke_rect(left, flow.y, box_width, height);

        canvas.set_font(FontStyle::Regular, font_size);
        canvas.set_text_color(BLACK);
        let text_width = text_width_mm(&text, FontStyle::Regular, font_size);
        canvas.text(left + (box_width - text_width) / 2.0, flow.y, &text);
        flow.advance(height);
    }

    /// Outlined section box with the colored header bar and centered name.
    ///
    /// Leaves the flow cursor on the first body line inside the box.
    #[allow(clippy::too_many_arguments)]
    fn section_box<C: Canvas>(
        &self,
        canvas: &mut C,
        flow: &mut PageFlow,
        checklist: &Checklist,
        name: &str,
        box_width: f32,
        height: f32,
        header_height: f32,
        font_size: f32,
    ) {
        let left = flow.spec().margin_left;
        canvas.stroke_rect(left, flow.y, box_width, height);
        canvas.set_fill_color(checklist.color);
        canvas.fill_rect(left, flow.y, box_width, header_height);

        canvas.set_font(FontStyle::Bold, font_size);
        canvas.set_text_color(WHITE);
        let name_width = text_width_mm(name, FontStyle::Bold, font_size);
        canvas.text(left + (box_width - name_width) / 2.0, flow.y, name);
        flow.advance(header_height);
        canvas.set_text_color(BLACK);
    }
}

fn banner_title(title: &str, page: u32, numbered: bool) -> String {
    if numbered {
        format!("{title} ({page})")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::RecordingCanvas;

    fn procedure(entry: &str, description: &str) -> Procedure {
        Procedure {
            entry: entry.to_string(),
            description: description.to_string(),
            operation_types: vec!["ALL".to_string()],
            drone_platforms: vec!["ALL".to_string()],
            drone_counts: vec!["ALL".to_string()],
        }
    }

    fn section(name: &str, entries: usize) -> Section {
        Section {
            name: name.to_string(),
            procedures: (0..entries)
                .map(|i| procedure(&format!("Check item {i}"), &format!("Inspect item {i} fully.")))
                .collect(),
        }
    }

    fn checklist(title: &str, sections: usize, entries: usize) -> Checklist {
        Checklist {
            title: title.to_string(),
            color: [0, 102, 204],
            sections: (0..sections).map(|i| section(&format!("Section {i}"), entries)).collect(),
        }
    }

    fn generator(checklists: Vec<Checklist>) -> Generator {
        Generator::new(
            checklists,
            Selection::new("VLOS", "DJI", "SINGLE"),
            FacetCatalog::default(),
        )
    }

    #[test]
    fn test_metadata_line_uses_labels() {
        let generator = Generator::new(
            Vec::new(),
            Selection::new("BVLOS_VO", "EBEE", "MULTIPLE"),
            FacetCatalog::default(),
        );
        let line = generator.metadata_line();
        assert!(line.starts_with("BVLOS 2km (Observer) | Ebee X | Multiple Drones | "));
    }

    #[test]
    fn test_summary_small_checklist_fits_one_page() {
        let generator = generator(vec![checklist("Pre-Flight", 2, 3)]);
        let mut canvas = RecordingCanvas::default();
        generator.render_summary(&mut canvas);

        assert_eq!(canvas.pages, 1);
        assert!(canvas.texts.contains(&"PRE-FLIGHT".to_string()));
        assert!(canvas.texts.contains(&"Section 0".to_string()));
        assert!(canvas.texts.contains(&"Check item 2".to_string()));
    }

    #[test]
    fn test_summary_short_document_banner_is_unnumbered() {
        let generator = generator(vec![checklist("Pre-Flight", 2, 3)]);
        let mut canvas = RecordingCanvas::default();
        generator.render_summary(&mut canvas);
        assert!(!canvas.texts.iter().any(|t| t.contains("PRE-FLIGHT (")));
    }

    #[test]
    fn test_summary_long_document_breaks_pages_and_numbers_banners() {
        // 8 sections of 8 entries cannot fit one A5 page
        let generator = generator(vec![checklist("Flight", 8, 8)]);
        let mut canvas = RecordingCanvas::default();
        generator.render_summary(&mut canvas);

        assert!(canvas.pages > 1);
        assert!(canvas.texts.contains(&"FLIGHT (1)".to_string()));
        assert!(canvas.texts.contains(&"FLIGHT (2)".to_string()));
        // The metadata box is repeated on every page
        let meta = generator.metadata_line();
        let meta_count = canvas.texts.iter().filter(|t| **t == meta).count();
        assert_eq!(meta_count, canvas.pages);
    }

    #[test]
    fn test_summary_each_checklist_starts_a_page() {
        let generator = generator(vec![
            checklist("Pre-Flight", 1, 2),
            checklist("Post-Flight", 1, 2),
        ]);
        let mut canvas = RecordingCanvas::default();
        generator.render_summary(&mut canvas);

        assert_eq!(canvas.pages, 2);
        assert!(canvas.texts.contains(&"POST-FLIGHT".to_string()));
    }

    #[test]
    fn test_summary_filters_out_inapplicable_procedures() {
        let mut list = checklist("Pre-Flight", 1, 1);
        list.sections[0].procedures.push(Procedure {
            entry: "Mount strobe".to_string(),
            description: "Attach the anti-collision strobe.".to_string(),
            operation_types: vec!["NIGHT_VLOS".to_string()],
            drone_platforms: vec!["ALL".to_string()],
            drone_counts: vec!["ALL".to_string()],
        });

        let generator = generator(vec![list]);
        let mut canvas = RecordingCanvas::default();
        generator.render_summary(&mut canvas);

        assert!(canvas.texts.contains(&"Check item 0".to_string()));
        assert!(!canvas.texts.contains(&"Mount strobe".to_string()));
    }

    #[test]
    fn test_render_is_deterministic() {
        let generator = generator(vec![checklist("Flight", 6, 7)]);

        let mut first = RecordingCanvas::default();
        generator.render_summary(&mut first);
        let mut second = RecordingCanvas::default();
        generator.render_summary(&mut second);

        assert_eq!(first.pages, second.pages);
        assert_eq!(first.texts, second.texts);
    }

    #[test]
    fn test_manual_draws_entry_and_description_runs() {
        let generator = generator(vec![checklist("Pre-Flight", 1, 1)]);
        let mut canvas = RecordingCanvas::default();
        generator.render_manual(&mut canvas);

        assert_eq!(canvas.pages, 1);
        assert!(canvas.texts.iter().any(|t| t.contains("Check item 0:")));
        assert!(canvas.texts.iter().any(|t| t.contains("Inspect item 0 fully.")));
    }

    #[test]
    fn test_manual_long_document_breaks_pages() {
        let long_description = "Walk the full launch and recovery area checking for \
                                overhead wires, loose debris, spectators, and anything \
                                that could interfere with the planned flight path or an \
                                emergency landing, then record the result in the log.";
        let sections = (0..8)
            .map(|i| Section {
                name: format!("Section {i}"),
                procedures: (0..4)
                    .map(|j| procedure(&format!("Step {i}.{j}"), long_description))
                    .collect(),
            })
            .collect();
        let list = Checklist {
            title: "Emergency Procedures".to_string(),
            color: [204, 0, 0],
            sections,
        };

        let generator = generator(vec![list]);
        let mut canvas = RecordingCanvas::default();
        generator.render_manual(&mut canvas);

        assert!(canvas.pages > 1);
        assert!(canvas
            .texts
            .contains(&"EMERGENCY PROCEDURES (2)".to_string()));
    }

    #[test]
    fn test_section_drawn_even_when_all_procedures_filtered_out() {
        let mut list = checklist("Pre-Flight", 1, 0);
        list.sections[0].procedures.push(Procedure {
            entry: "Night only".to_string(),
            description: "Only at night.".to_string(),
            operation_types: vec!["NIGHT_BVLOS".to_string()],
            drone_platforms: vec!["ALL".to_string()],
            drone_counts: vec!["ALL".to_string()],
        });

        let generator = generator(vec![list]);
        let mut canvas = RecordingCanvas::default();
        generator.render_summary(&mut canvas);

        // The empty section still renders its header bar
        assert!(canvas.texts.contains(&"Section 0".to_string()));
        assert!(!canvas.texts.contains(&"Night only".to_string()));
    }

    #[test]
    fn test_generate_writes_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(vec![checklist("Pre-Flight", 2, 3)]);
        let output = OutputConfig::default();

        let (summary, manual) = generator.generate(dir.path(), &output).unwrap();
        assert_eq!(summary, dir.path().join("checklist.pdf"));
        assert_eq!(manual, dir.path().join("procedures.pdf"));
        assert!(std::fs::read(&summary).unwrap().starts_with(b"%PDF"));
        assert!(std::fs::read(&manual).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_uppercase_long_title_wraps_in_banner() {
        let generator = generator(vec![checklist(
            "Extended Visual Line of Sight Operations",
            1,
            1,
        )]);
        let mut canvas = RecordingCanvas::default();
        generator.render_summary(&mut canvas);

        // The banner wraps: no single drawn line carries the whole title
        let full = "EXTENDED VISUAL LINE OF SIGHT OPERATIONS";
        assert!(!canvas.texts.contains(&full.to_string()));
        assert!(canvas.texts.iter().any(|t| t.starts_with("EXTENDED")));
    }
}
