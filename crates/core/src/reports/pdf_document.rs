//! Streaming PDF rendering of a weekly summary.
//!
//! [`ReportDocument`] lays the report out into pages up front (cheap: it only
//! splits lines) and then serialises one PDF chunk per `next()` call: the
//! header with the shared objects, one chunk per page, and the
//! cross-reference trailer. Byte offsets for the xref table are tracked as
//! chunks are yielded, so nothing is buffered beyond the current page.

use std::fmt::Write as _;
use std::ops::Range;

use super::aggregation::WeekSummary;
use super::report_renderer::format_amount;
use crate::utils::time_utils::format_date;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const TITLE_SIZE: f32 = 18.0;
const TITLE_LEADING: f32 = 30.0;
const BODY_SIZE: f32 = 12.0;
const BODY_LEADING: f32 = 16.0;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_ID: usize = 3;
const INFO_ID: usize = 4;
const FIRST_PAGE_ID: usize = 5;

/// Helvetica advance widths for printable ASCII (0x20..=0x7E), per 1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

#[derive(Debug, Clone, PartialEq)]
struct DocumentLine {
    text: String,
    size: f32,
    leading: f32,
    centered: bool,
}

impl DocumentLine {
    fn body(text: String) -> Self {
        DocumentLine {
            text: fit_to_width(&text, BODY_SIZE, PAGE_WIDTH - 2.0 * MARGIN),
            size: BODY_SIZE,
            leading: BODY_LEADING,
            centered: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Header,
    Page(usize),
    Trailer,
    Done,
}

/// A finite, non-restartable sequence of PDF byte chunks.
#[derive(Debug)]
pub struct ReportDocument {
    title: String,
    file_name: String,
    lines: Vec<DocumentLine>,
    pages: Vec<Range<usize>>,
    offsets: Vec<usize>,
    written: usize,
    stage: Stage,
}

impl ReportDocument {
    pub fn new(summary: &WeekSummary) -> Self {
        let title = format!(
            "Weekly Expenses: {} to {}",
            summary.window.formatted_start(),
            summary.window.formatted_end()
        );

        let mut lines = Vec::with_capacity(summary.expenses.len() + 3);
        lines.push(DocumentLine {
            text: fit_to_width(&title, TITLE_SIZE, PAGE_WIDTH - 2.0 * MARGIN),
            size: TITLE_SIZE,
            leading: TITLE_LEADING,
            centered: true,
        });
        for expense in &summary.expenses {
            lines.push(DocumentLine::body(format!(
                "{} - {} - {}",
                expense.description,
                format_amount(expense.amount),
                format_date(expense.created_at)
            )));
        }
        lines.push(DocumentLine::body(String::new()));
        lines.push(DocumentLine::body(format!(
            "Total: {}",
            format_amount(summary.total)
        )));

        let pages = paginate(&lines);
        ReportDocument {
            file_name: format!("weekly-report-{}.pdf", summary.window.formatted_start()),
            title,
            offsets: Vec::with_capacity(FIRST_PAGE_ID + 2 * pages.len()),
            lines,
            pages,
            written: 0,
            stage: Stage::Header,
        }
    }

    /// Suggested download name, e.g. `weekly-report-2024-05-13.pdf`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn object_count(&self) -> usize {
        FIRST_PAGE_ID - 1 + 2 * self.pages.len()
    }

    fn begin_object(&mut self, buf: &mut Vec<u8>, id: usize) {
        debug_assert_eq!(self.offsets.len() + 1, id);
        self.offsets.push(self.written + buf.len());
        buf.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
    }

    fn header_chunk(&mut self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        self.begin_object(&mut buf, CATALOG_ID);
        buf.extend_from_slice(
            format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>\nendobj\n").as_bytes(),
        );

        let kids = (0..self.pages.len())
            .map(|i| format!("{} 0 R", FIRST_PAGE_ID + 2 * i))
            .collect::<Vec<_>>()
            .join(" ");
        self.begin_object(&mut buf, PAGES_ID);
        buf.extend_from_slice(
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
                kids,
                self.pages.len()
            )
            .as_bytes(),
        );

        self.begin_object(&mut buf, FONT_ID);
        buf.extend_from_slice(
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n",
        );

        let title = escape_text(&self.title);
        self.begin_object(&mut buf, INFO_ID);
        buf.extend_from_slice(
            format!("<< /Title ({title}) /Producer (tally) >>\nendobj\n").as_bytes(),
        );
        buf
    }

    fn page_chunk(&mut self, index: usize) -> Vec<u8> {
        let page_id = FIRST_PAGE_ID + 2 * index;
        let content_id = page_id + 1;
        let content = self.page_content(index);

        let mut buf = Vec::new();
        self.begin_object(&mut buf, page_id);
        buf.extend_from_slice(
            format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 {FONT_ID} 0 R >> >> /Contents {content_id} 0 R >>\nendobj\n"
            )
            .as_bytes(),
        );

        self.begin_object(&mut buf, content_id);
        buf.extend_from_slice(format!("<< /Length {} >>\nstream\n", content.len()).as_bytes());
        buf.extend_from_slice(content.as_bytes());
        buf.extend_from_slice(b"\nendstream\nendobj\n");
        buf
    }

    fn page_content(&self, index: usize) -> String {
        let mut content = String::new();
        let mut cursor = PAGE_HEIGHT - MARGIN;
        for line in &self.lines[self.pages[index].clone()] {
            let baseline = cursor - line.size;
            cursor -= line.leading;
            if line.text.is_empty() {
                continue;
            }
            let x = if line.centered {
                (PAGE_WIDTH - text_width(&line.text, line.size)) / 2.0
            } else {
                MARGIN
            };
            let _ = writeln!(
                content,
                "BT /F1 {:.0} Tf {:.2} {:.2} Td ({}) Tj ET",
                line.size,
                x,
                baseline,
                escape_text(&line.text)
            );
        }
        content.truncate(content.trim_end().len());
        content
    }

    fn trailer_chunk(&self) -> Vec<u8> {
        let xref_offset = self.written;
        let size = self.object_count() + 1;
        let mut out = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = writeln!(out, "{offset:010} 00000 n ");
        }
        let _ = write!(
            out,
            "trailer\n<< /Size {size} /Root {CATALOG_ID} 0 R /Info {INFO_ID} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );
        out.into_bytes()
    }
}

impl Iterator for ReportDocument {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        let chunk = match self.stage {
            Stage::Header => {
                self.stage = if self.pages.is_empty() {
                    Stage::Trailer
                } else {
                    Stage::Page(0)
                };
                self.header_chunk()
            }
            Stage::Page(index) => {
                self.stage = if index + 1 < self.pages.len() {
                    Stage::Page(index + 1)
                } else {
                    Stage::Trailer
                };
                self.page_chunk(index)
            }
            Stage::Trailer => {
                self.stage = Stage::Done;
                self.trailer_chunk()
            }
            Stage::Done => return None,
        };
        self.written += chunk.len();
        Some(chunk)
    }
}

/// Splits lines into page-sized index ranges.
fn paginate(lines: &[DocumentLine]) -> Vec<Range<usize>> {
    let usable = PAGE_HEIGHT - 2.0 * MARGIN;
    let mut pages = Vec::new();
    let mut start = 0;
    let mut used = 0.0;
    for (i, line) in lines.iter().enumerate() {
        if used + line.leading > usable && i > start {
            pages.push(start..i);
            start = i;
            used = 0.0;
        }
        used += line.leading;
    }
    if start < lines.len() {
        pages.push(start..lines.len());
    }
    pages
}

fn char_width(c: char) -> u16 {
    match c {
        ' '..='~' => HELVETICA_WIDTHS[c as usize - 0x20],
        _ => HELVETICA_WIDTHS[usize::from(b'?') - 0x20],
    }
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(|c| f32::from(char_width(c))).sum::<f32>() * size / 1000.0
}

/// Truncates `text` with an ellipsis so it fits in `max_width` points.
fn fit_to_width(text: &str, size: f32, max_width: f32) -> String {
    if text_width(text, size) <= max_width {
        return text.to_string();
    }
    let budget = max_width - text_width("...", size);
    let mut used = 0.0;
    let mut fitted = String::new();
    for c in text.chars() {
        let w = f32::from(char_width(c)) * size / 1000.0;
        if used + w > budget {
            break;
        }
        used += w;
        fitted.push(c);
    }
    fitted.push_str("...");
    fitted
}

/// Escapes a PDF literal string. Characters outside printable ASCII become `?`.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
