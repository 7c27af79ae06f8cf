use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs;
use std::io::Write;
use std::path::Path;

/// A4 portrait, in points.
const PAGE_W: f32 = 595.0;
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 50.0;
const ROW_H: f32 = 20.0;

const FONT_SIZE: f32 = 9.0;
const HEADER_FONT_SIZE: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 14.0;

/// Helvetica via WinAnsi only covers Latin-1 reliably.
fn pdf_text(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '€' => "EUR".to_string(),
            '£' => "GBP".to_string(),
            c if c.is_ascii() => c.to_string(),
            _ => "?".to_string(),
        })
        .collect()
}

/// Multi-page table writer built on `pdf-writer`.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            page_refs: Vec::new(),
            next_id: 4,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Register a page whose content stream is `content`.
    fn push_page(&mut self, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
                .contents(content_id);
            page.resources().fonts().pair(Name(b"F1"), self.font_id);
        }

        self.pdf.stream(content_id, &content.finish());
    }

    /// Rows that fit below the title and the header row.
    fn rows_per_page() -> usize {
        let usable = PAGE_H - 2.0 * MARGIN - 30.0 - ROW_H;
        (usable / ROW_H).floor().max(1.0) as usize
    }

    /// Write a paginated table. An empty `rows` still yields one page with
    /// the header, and `footer` (if any) is printed under the last row.
    pub fn write_table(
        &mut self,
        title: &str,
        headers: &[&str],
        rows: &[Vec<String>],
        footer: Option<&str>,
    ) {
        let widths = col_widths(headers, rows);
        let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

        let chunks: Vec<&[Vec<String>]> = if rows.is_empty() {
            vec![rows]
        } else {
            rows.chunks(Self::rows_per_page()).collect()
        };
        let pages = chunks.len();

        for (idx, chunk) in chunks.iter().enumerate() {
            let mut content = Content::new();

            draw_text(&mut content, MARGIN, PAGE_H - MARGIN + 15.0, TITLE_FONT_SIZE, title);
            draw_text(
                &mut content,
                PAGE_W - MARGIN - 70.0,
                MARGIN - 35.0,
                FONT_SIZE,
                &format!("Page {} of {}", idx + 1, pages),
            );

            let mut y = PAGE_H - MARGIN - 30.0;
            fill_band(&mut content, y, widths.iter().sum(), (0.85, 0.87, 0.90));
            draw_row(&mut content, y, &widths, &header_row, HEADER_FONT_SIZE);
            y -= ROW_H;

            for (i, row) in chunk.iter().enumerate() {
                if i % 2 == 0 {
                    fill_band(&mut content, y, widths.iter().sum(), (0.96, 0.96, 0.96));
                }
                draw_row(&mut content, y, &widths, row, FONT_SIZE);
                y -= ROW_H;
            }

            if idx + 1 == pages
                && let Some(text) = footer
            {
                draw_text(&mut content, MARGIN, (y + 4.0).max(MARGIN - 15.0), HEADER_FONT_SIZE, text);
            }

            self.push_page(content);
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        {
            let mut pages = self.pdf.pages(self.pages_id);
            pages.count(self.page_refs.len() as i32);
            pages.kids(self.page_refs.iter().copied());
        }

        let bytes = self.pdf.finish();
        let mut f = fs::File::create(path)?;
        f.write_all(&bytes)
    }
}

fn draw_text(content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
    let text = pdf_text(text);
    content.begin_text();
    content.set_font(Name(b"F1"), size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(text.as_bytes()));
    content.end_text();
}

fn fill_band(content: &mut Content, y: f32, width: f32, rgb: (f32, f32, f32)) {
    content.save_state();
    content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
    content.rect(MARGIN, y, width, ROW_H);
    content.fill_nonzero();
    content.restore_state();
}

fn draw_row(content: &mut Content, y: f32, widths: &[f32], row: &[String], font_size: f32) {
    let mut x = MARGIN;
    for (text, w) in row.iter().zip(widths) {
        draw_text(content, x + 4.0, y + 6.0, font_size, text);

        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, *w, ROW_H);
        content.stroke();
        content.restore_state();

        x += w;
    }
}

/// Column widths from header and cell lengths, scaled down to fit the page.
fn col_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
    let mut widths: Vec<f32> = headers
        .iter()
        .map(|h| h.chars().count() as f32 * 6.0 + 8.0)
        .collect();

    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = w.max(cell.chars().count() as f32 * 5.2 + 8.0);
        }
    }

    let total: f32 = widths.iter().sum();
    let max = PAGE_W - 2.0 * MARGIN;
    if total > max {
        let scale = max / total;
        for w in &mut widths {
            *w *= scale;
        }
    }

    widths
}
