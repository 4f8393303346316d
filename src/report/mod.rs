//! Summary report projection.
//!
//! [`project`] reduces an [`AggregateSnapshot`] and the first rows of the filtered records to an
//! ordered list of [`LayoutBlock`]s. [`paginate`] places those blocks on fixed-size pages and
//! [`render_text`] turns the pages into plain text.
//!
//! ```
//! use chrono::NaiveDate;
//! use student_performance::ingestion::{ingest_bytes, IngestionOptions};
//! use student_performance::processing::{aggregate, ClassFilter};
//! use student_performance::report::{paginate, project, render_text, PageGeometry, ReportOptions};
//!
//! # fn main() -> Result<(), student_performance::DashboardError> {
//! let csv = "student_id,name,class,comprehension,attention,focus,retention,assessment_score,engagement_time\n\
//!            1,Ada,X,90,85,85,90,95,30\n";
//! let records = ingest_bytes("scores.csv", csv.as_bytes(), &IngestionOptions::default())?;
//! let filter = ClassFilter::All;
//! let snapshot = aggregate(&records, &filter);
//!
//! let options = ReportOptions {
//!     generated_on: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
//!     ..Default::default()
//! };
//! let report = project(&snapshot, &records, &filter, &options);
//! let pages = paginate(&report, &PageGeometry::default());
//! assert_eq!(pages.len(), 1);
//! assert!(render_text(&pages).contains("Average Score: 95"));
//! # Ok(())
//! # }
//! ```

mod paginate;
mod text;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DashboardResult;
use crate::processing::{filter_by_class, AggregateSnapshot, ClassFilter};
use crate::record::{Metric, StudentRecord};

pub use paginate::{paginate, Page, PageGeometry, PlacedBlock};
pub use text::render_text;

/// Default cap on table rows.
pub const MAX_TABLE_ROWS: usize = 20;
/// Default table cell width, in characters.
pub const CELL_WIDTH: usize = 12;
/// Placeholder for blank cells.
pub const NOT_AVAILABLE: &str = "N/A";

/// Table columns: header label and the record field shown in it.
const TABLE_COLUMNS: [(&str, Column); 7] = [
    ("Name", Column::Name),
    ("Class", Column::Class),
    ("Score", Column::Metric(Metric::AssessmentScore)),
    ("Comprehension", Column::Metric(Metric::Comprehension)),
    ("Attention", Column::Metric(Metric::Attention)),
    ("Focus", Column::Metric(Metric::Focus)),
    ("Retention", Column::Metric(Metric::Retention)),
];

#[derive(Debug, Clone, Copy)]
enum Column {
    Name,
    Class,
    Metric(Metric),
}

impl Column {
    fn cell(self, record: &StudentRecord) -> String {
        let raw = match self {
            Column::Name => record.name.clone(),
            Column::Class => record.class.clone(),
            Column::Metric(m) => record.raw(m).display(),
        };
        if raw.trim().is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            raw
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Title,
    Metadata,
    Heading,
    Statistic,
    TableHeader,
    TableRow,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: u8,
    pub weight: FontWeight,
}

impl TextStyle {
    const fn new(size: u8, weight: FontWeight) -> Self {
        Self { size, weight }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockContent {
    /// A single line of text.
    Line(String),
    /// One table row, one entry per column.
    Cells(Vec<String>),
}

/// One unit of report layout.
///
/// `space_before` is skipped when the block opens a new page; `advance` is the vertical offset
/// consumed by the block itself. Only `breakable` blocks can start a new page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    pub kind: BlockKind,
    pub content: BlockContent,
    pub style: TextStyle,
    pub space_before: f64,
    pub advance: f64,
    pub breakable: bool,
}

impl LayoutBlock {
    fn line(kind: BlockKind, text: impl Into<String>, style: TextStyle, advance: f64) -> Self {
        Self {
            kind,
            content: BlockContent::Line(text.into()),
            style,
            space_before: 0.0,
            advance,
            breakable: false,
        }
    }

    fn space_before(mut self, space: f64) -> Self {
        self.space_before = space;
        self
    }

    fn breakable(mut self) -> Self {
        self.breakable = true;
        self
    }
}

/// Report configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Date printed in the metadata block.
    pub generated_on: NaiveDate,
    pub title: String,
    /// Table rows kept, counted from the start of the filtered records.
    pub max_rows: usize,
    /// Cells longer than this many characters are cut, without an overflow marker.
    pub cell_width: usize,
    /// Footer attribution lines.
    pub footer: Vec<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            generated_on: Local::now().date_naive(),
            title: "Student Performance Analysis Report".to_string(),
            max_rows: MAX_TABLE_ROWS,
            cell_width: CELL_WIDTH,
            footer: vec!["Report generated by Student Performance Dashboard".to_string()],
        }
    }
}

/// A projected report: ordered layout blocks plus the metadata they were built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub generated_on: NaiveDate,
    pub filter_label: String,
    pub blocks: Vec<LayoutBlock>,
}

impl Report {
    /// Suggested file name stem for an export of this report.
    pub fn file_stem(&self) -> String {
        report_file_stem(self.generated_on)
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> DashboardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `student-performance-report-YYYY-MM-DD`
pub fn report_file_stem(date: NaiveDate) -> String {
    format!("student-performance-report-{}", date.format("%Y-%m-%d"))
}

const TITLE: TextStyle = TextStyle::new(20, FontWeight::Bold);
const BODY: TextStyle = TextStyle::new(12, FontWeight::Normal);
const HEADING: TextStyle = TextStyle::new(16, FontWeight::Bold);
const STAT: TextStyle = TextStyle::new(11, FontWeight::Normal);
const TABLE_HEAD: TextStyle = TextStyle::new(9, FontWeight::Bold);
const TABLE_BODY: TextStyle = TextStyle::new(9, FontWeight::Normal);
const FOOTER: TextStyle = TextStyle::new(10, FontWeight::Italic);

/// Project a snapshot and the filtered records into layout blocks.
///
/// Emits, in order: title, generation date and filter label, seven statistics lines, a table of
/// at most `options.max_rows` records (strictly the first ones of the filtered set) with cells
/// truncated to `options.cell_width` characters, and the footer.
pub fn project<'a, I>(
    snapshot: &AggregateSnapshot,
    records: I,
    class_filter: &ClassFilter,
    options: &ReportOptions,
) -> Report
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let filter_label = class_filter.label();
    let mut blocks = vec![
        LayoutBlock::line(BlockKind::Title, options.title.clone(), TITLE, 15.0),
        LayoutBlock::line(
            BlockKind::Metadata,
            format!("Generated on: {}", options.generated_on.format("%Y-%m-%d")),
            BODY,
            8.0,
        ),
        LayoutBlock::line(BlockKind::Metadata, format!("Filter: {filter_label}"), BODY, 15.0),
        LayoutBlock::line(BlockKind::Heading, "Overview Statistics", HEADING, 10.0),
    ];

    blocks.extend(
        statistic_lines(snapshot)
            .into_iter()
            .map(|text| LayoutBlock::line(BlockKind::Statistic, text, STAT, 6.0)),
    );

    blocks.push(
        LayoutBlock::line(BlockKind::Heading, "Student Performance Details", HEADING, 10.0)
            .space_before(10.0),
    );
    blocks.push(LayoutBlock {
        kind: BlockKind::TableHeader,
        content: BlockContent::Cells(TABLE_COLUMNS.iter().map(|(h, _)| h.to_string()).collect()),
        style: TABLE_HEAD,
        space_before: 0.0,
        advance: 8.0,
        breakable: false,
    });

    for record in filter_by_class(records, class_filter).into_iter().take(options.max_rows) {
        let cells = TABLE_COLUMNS
            .iter()
            .map(|(_, col)| truncate_chars(&col.cell(record), options.cell_width))
            .collect();
        blocks.push(LayoutBlock {
            kind: BlockKind::TableRow,
            content: BlockContent::Cells(cells),
            style: TABLE_BODY,
            space_before: 0.0,
            advance: 6.0,
            breakable: true,
        });
    }

    for (idx, line) in options.footer.iter().enumerate() {
        let block = LayoutBlock::line(BlockKind::Footer, line.clone(), FOOTER, 6.0);
        blocks.push(if idx == 0 {
            block.space_before(20.0).breakable()
        } else {
            block
        });
    }

    Report {
        title: options.title.clone(),
        generated_on: options.generated_on,
        filter_label,
        blocks,
    }
}

fn statistic_lines(s: &AggregateSnapshot) -> [String; 7] {
    let n = crate::types::format_number;
    let a = &s.averages;
    [
        format!("Total Students: {}", s.total_students),
        format!("Average Score: {}", n(a.score)),
        format!("Average Comprehension: {}", n(a.comprehension)),
        format!("Average Attention: {}", n(a.attention)),
        format!("Average Focus: {}", n(a.focus)),
        format!("Average Retention: {}", n(a.retention)),
        format!("Average Engagement Time: {} minutes", n(a.engagement_time)),
    ]
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
