//! Page geometry and the greedy pagination estimator.
//!
//! All dimensions are in millimetres with a top-left origin. The estimator
//! predicts the vertical space a section will occupy before it is drawn so
//! the page-flow can decide whether to break to a new page first. It is
//! greedy and non-backtracking: a placement decision is never revisited and
//! no attempt is made at optimal page fill.

use crate::checklist::Procedure;
use crate::render::metrics::{text_width_mm, FontStyle};

/// Physical page dimensions and margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    /// Page width in mm.
    pub width_mm: f32,
    /// Page height in mm.
    pub height_mm: f32,
    /// Top margin in mm.
    pub margin_top: f32,
    /// Bottom margin in mm.
    pub margin_bottom: f32,
    /// Left margin in mm.
    pub margin_left: f32,
    /// Right margin in mm.
    pub margin_right: f32,
}

impl PageSpec {
    /// A5 portrait, used by the compact summary checklist.
    #[must_use]
    pub fn a5() -> Self {
        Self {
            width_mm: 148.0,
            height_mm: 210.0,
            margin_top: 10.0,
            margin_bottom: 20.0,
            margin_left: 10.0,
            margin_right: 10.0,
        }
    }

    /// A4 portrait with a widened right margin, used by the procedure manual.
    #[must_use]
    pub fn a4_manual() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_top: 10.0,
            margin_bottom: 20.0,
            margin_left: 10.0,
            margin_right: 20.0,
        }
    }

    /// The lowest y coordinate content may occupy.
    #[must_use]
    pub fn printable_bottom(&self) -> f32 {
        self.height_mm - self.margin_bottom
    }
}

/// Styling constants for the compact A5 summary checklist.
#[derive(Debug, Clone, Copy)]
pub struct SummaryStyle {
    /// Body font size in points.
    pub font_size: f32,
    /// Section header font size in points.
    pub section_font_size: f32,
    /// Banner title font size in points.
    pub title_font_size: f32,
    /// Metadata box font size in points.
    pub meta_font_size: f32,
    /// Height of one text line in mm.
    pub line_height: f32,
    /// Width of the section box in mm.
    pub box_width: f32,
    /// Indent reserved for the bullet glyph in mm.
    pub bullet_indent: f32,
    /// Maximum width of the banner title block in mm.
    pub title_width: f32,
}

impl Default for SummaryStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            section_font_size: 12.0,
            title_font_size: 20.0,
            meta_font_size: 7.0,
            line_height: 5.0,
            box_width: 120.0,
            bullet_indent: 5.0,
            title_width: 75.0,
        }
    }
}

/// Styling constants for the detailed A4 procedure manual.
#[derive(Debug, Clone, Copy)]
pub struct ManualStyle {
    /// Body font size in points.
    pub font_size: f32,
    /// Section header font size in points.
    pub section_font_size: f32,
    /// Banner title font size in points.
    pub title_font_size: f32,
    /// Metadata box font size in points.
    pub meta_font_size: f32,
    /// Vertical advance after a paragraph in mm.
    pub line_height: f32,
    /// Vertical advance between wrapped lines inside a paragraph in mm.
    pub par_spacing: f32,
    /// Width of the section box in mm.
    pub box_width: f32,
    /// Inset subtracted from the box width when wrapping text, in mm.
    pub wrap_inset: f32,
    /// Maximum width of the banner title block in mm.
    pub title_width: f32,
}

impl Default for ManualStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            section_font_size: 14.0,
            title_font_size: 20.0,
            meta_font_size: 9.0,
            line_height: 10.0,
            par_spacing: 8.0,
            box_width: 180.0,
            wrap_inset: 10.0,
            title_width: 125.0,
        }
    }
}

/// Estimate the number of printed lines a summary entry occupies.
#[must_use]
pub fn summary_entry_lines(entry: &str, style: &SummaryStyle) -> u32 {
    let width = text_width_mm(entry, FontStyle::Regular, style.font_size);
    let lines = ((width + style.bullet_indent) / style.box_width) as u32 + 1;
    lines.max(1)
}

/// Estimate the rendered height of a summary section in mm.
///
/// One header line plus the per-entry line estimates.
#[must_use]
pub fn summary_section_height(procedures: &[&Procedure], style: &SummaryStyle) -> f32 {
    let body: f32 = procedures
        .iter()
        .map(|p| summary_entry_lines(&p.entry, style) as f32 * style.line_height)
        .sum();
    style.line_height + body
}

/// Estimate the number of wrapped lines a manual paragraph occupies.
///
/// The paragraph is the entry and description joined as `entry: description`.
#[must_use]
pub fn manual_entry_lines(procedure: &Procedure, style: &ManualStyle) -> u32 {
    let text = format!("{}: {}", procedure.entry, procedure.description);
    let width = text_width_mm(&text, FontStyle::Regular, style.font_size);
    let wrap_width = style.box_width - style.wrap_inset;
    let lines = (width / wrap_width).ceil() as u32;
    lines.max(1)
}

/// Rendered height of a manual paragraph with the given wrapped line count.
#[must_use]
pub fn manual_paragraph_height(lines: u32, style: &ManualStyle) -> f32 {
    (lines.saturating_sub(1)) as f32 * style.par_spacing + style.line_height
}

/// Estimate the rendered height of a manual section in mm.
#[must_use]
pub fn manual_section_height(procedures: &[&Procedure], style: &ManualStyle) -> f32 {
    let body: f32 = procedures
        .iter()
        .map(|p| manual_paragraph_height(manual_entry_lines(p, style), style))
        .sum();
    style.line_height + body
}

/// Vertical cursor and page counter for one document walk.
#[derive(Debug, Clone, Copy)]
pub struct PageFlow {
    spec: PageSpec,
    /// Current vertical position in mm from the page top.
    pub y: f32,
    /// Current page number within the checklist document, starting at 1.
    pub page: u32,
}

impl PageFlow {
    /// Start a flow at the top of the first page.
    #[must_use]
    pub fn new(spec: PageSpec) -> Self {
        Self {
            spec,
            y: spec.margin_top,
            page: 1,
        }
    }

    /// The page geometry this flow runs on.
    #[must_use]
    pub fn spec(&self) -> &PageSpec {
        &self.spec
    }

    /// Whether a block of the given height fits on the current page.
    #[must_use]
    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= self.spec.printable_bottom()
    }

    /// Move the cursor down.
    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Close the current page and begin the next one.
    pub fn break_page(&mut self) {
        self.page += 1;
        self.y = self.spec.margin_top;
    }
}

/// A run of text in a single font style within a wrapped line.
pub type StyledRun = (FontStyle, String);

/// Split a word wider than the wrap width into fitting pieces.
///
/// Breaks at character boundaries; every piece holds at least one character
/// so the split always terminates.
fn break_word(word: &str, style: FontStyle, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0.0_f32;

    for c in word.chars() {
        let char_width = text_width_mm(c.encode_utf8(&mut [0; 4]), style, size_pt);
        if !piece.is_empty() && piece_width + char_width > max_width_mm {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0.0;
        }
        piece.push(c);
        piece_width += char_width;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Greedily word-wrap plain text to the given width.
///
/// A single word wider than the wrap width (an unbroken URL, say) is split
/// at character boundaries so no line overflows the box. Always returns at
/// least one (possibly empty) line.
#[must_use]
pub fn wrap_words(text: &str, style: FontStyle, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }

    let space_width = text_width_mm(" ", style, size_pt);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in words {
        let word_width = text_width_mm(word, style, size_pt);
        if word_width > max_width_mm {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(word, style, size_pt, max_width_mm);
            let last = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            current_width = text_width_mm(&last, style, size_pt);
            current = last;
            continue;
        }
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space_width + word_width > max_width_mm {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_width + word_width;
        }
    }
    lines.push(current);
    lines
}

/// Greedily word-wrap a sequence of styled spans to the given width.
///
/// Style boundaries are preserved: each output line is a sequence of runs,
/// and a run carries its leading space when it continues a line. Words wider
/// than the wrap width are split at character boundaries.
#[must_use]
pub fn wrap_spans(
    spans: &[(FontStyle, &str)],
    size_pt: f32,
    max_width_mm: f32,
) -> Vec<Vec<StyledRun>> {
    let mut words: Vec<(FontStyle, &str)> = Vec::new();
    for (style, text) in spans {
        for word in text.split_whitespace() {
            words.push((*style, word));
        }
    }
    if words.is_empty() {
        return vec![Vec::new()];
    }

    let mut lines: Vec<Vec<StyledRun>> = Vec::new();
    let mut current: Vec<StyledRun> = Vec::new();
    let mut current_width = 0.0_f32;

    for (style, word) in words {
        let word_width = text_width_mm(word, style, size_pt);
        let space_width = text_width_mm(" ", style, size_pt);

        if word_width > max_width_mm {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(word, style, size_pt, max_width_mm);
            let last = pieces.pop().unwrap_or_default();
            lines.extend(pieces.into_iter().map(|piece| vec![(style, piece)]));
            current_width = text_width_mm(&last, style, size_pt);
            current.push((style, last));
            continue;
        }
        if current.is_empty() {
            current.push((style, word.to_string()));
            current_width = word_width;
        } else if current_width + space_width + word_width > max_width_mm {
            lines.push(std::mem::take(&mut current));
            current.push((style, word.to_string()));
            current_width = word_width;
        } else {
            match current.last_mut() {
                Some((last_style, text)) if *last_style == style => {
                    text.push(' ');
                    text.push_str(word);
                }
                _ => current.push((style, format!(" {word}"))),
            }
            current_width += space_width + word_width;
        }
    }
    lines.push(current);
    lines
}
