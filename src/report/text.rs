use super::{BlockContent, Page};

/// Width of one table column in the text rendering, in characters.
const COLUMN_WIDTH: usize = 14;

/// Render paginated blocks as plain text.
///
/// One line per block. Table cells are left-aligned in fixed-width columns, a blank line stands
/// in for `space_before` within a page, and pages are separated by a form feed.
pub fn render_text(pages: &[Page]) -> String {
    let mut out = String::new();

    for (page_idx, page) in pages.iter().enumerate() {
        if page_idx > 0 {
            out.push('\x0c');
            out.push('\n');
        }
        for (idx, placed) in page.blocks.iter().enumerate() {
            if idx > 0 && placed.block.space_before > 0.0 {
                out.push('\n');
            }
            match &placed.block.content {
                BlockContent::Line(text) => out.push_str(text),
                BlockContent::Cells(cells) => {
                    let line: String = cells
                        .iter()
                        .map(|c| format!("{c:<width$}", width = COLUMN_WIDTH))
                        .collect();
                    out.push_str(line.trim_end());
                }
            }
            out.push('\n');
        }
    }

    out
}
