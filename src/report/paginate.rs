use serde::{Deserialize, Serialize};

use super::{BlockContent, LayoutBlock, Report};

/// Fixed page geometry, in page units (millimetres for an A4 portrait page).
///
/// The break threshold and line pitches are constants, not derived from content metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f64,
    pub margin: f64,
    /// A breakable block opens a new page once the running offset is past this value.
    pub break_after_y: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 210.0,
            margin: 20.0,
            break_after_y: 250.0,
        }
    }
}

impl PageGeometry {
    /// Left edge of column `idx` when `count` columns share the printable width evenly.
    pub fn column_x(&self, idx: usize, count: usize) -> f64 {
        let col_width = (self.width - 2.0 * self.margin) / count.max(1) as f64;
        self.margin + idx as f64 * col_width
    }

    fn columns_for(&self, content: &BlockContent) -> Vec<f64> {
        match content {
            BlockContent::Line(_) => Vec::new(),
            BlockContent::Cells(cells) => {
                (0..cells.len()).map(|i| self.column_x(i, cells.len())).collect()
            }
        }
    }
}

/// A block positioned on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub x: f64,
    pub y: f64,
    /// Left edge of each cell of a table block; empty for text lines.
    pub columns: Vec<f64>,
    pub block: LayoutBlock,
}

/// One output page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub blocks: Vec<PlacedBlock>,
}

impl Page {
    fn new(number: usize) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }
}

/// Lay the report out on pages.
///
/// A running offset starts at the top margin. Before a breakable block is placed, a new page is
/// started if the offset exceeds [`PageGeometry::break_after_y`]; otherwise the block's
/// `space_before` is added. Each placed block then advances the offset by its `advance`.
pub fn paginate(report: &Report, geometry: &PageGeometry) -> Vec<Page> {
    let mut pages = vec![Page::new(1)];
    let mut y = geometry.margin;

    for block in &report.blocks {
        if block.breakable && y > geometry.break_after_y {
            pages.push(Page::new(pages.len() + 1));
            y = geometry.margin;
        } else {
            y += block.space_before;
        }

        if let Some(page) = pages.last_mut() {
            page.blocks.push(PlacedBlock {
                x: geometry.margin,
                y,
                columns: geometry.columns_for(&block.content),
                block: block.clone(),
            });
        }
        y += block.advance;
    }

    pages
}
