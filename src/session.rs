//! Dashboard session state.
//!
//! [`DashboardState`] is an immutable value: every transition consumes the state and returns the
//! next one. Derived data ([`DashboardState::snapshot`], [`DashboardState::visible_records`]) is
//! recomputed on each call from the loaded records and the current view query.
//!
//! ```
//! use student_performance::ingestion::{ingest_bytes, IngestionOptions};
//! use student_performance::processing::ClassFilter;
//! use student_performance::session::{DashboardState, Screen};
//!
//! # fn main() -> Result<(), student_performance::DashboardError> {
//! let csv = "student_id,name,class,comprehension,attention,focus,retention,assessment_score,engagement_time\n\
//!            1,A,X,90,85,85,90,95,30\n\
//!            2,B,Y,50,40,40,50,55,10\n";
//! let records = ingest_bytes("scores.csv", csv.as_bytes(), &IngestionOptions::default())?;
//!
//! let state = DashboardState::default()
//!     .records_loaded(records)
//!     .confirm()
//!     .analysis_complete()
//!     .with_class_filter(ClassFilter::parse("Y"));
//! assert_eq!(state.screen(), Screen::Results);
//! assert_eq!(state.snapshot().total_students, 1);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::processing::{
    aggregate, recommendations, summarize_view, unique_classes, view, AggregateSnapshot,
    ClassFilter, Recommendation, SortField, ViewQuery, ViewSummary,
};
use crate::record::{RecordSet, StudentRecord};
use crate::report::{project, Report, ReportOptions};

/// Records shown on the preview screen.
pub const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Upload,
    Preview,
    Analyzing,
    Results,
}

/// Current screen, loaded records and table view parameters.
///
/// Transitions that do not apply to the current screen return the state unchanged. The view
/// setters (`with_*`) only apply on [`Screen::Results`].
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    screen: Screen,
    records: Arc<RecordSet>,
    query: ViewQuery,
}

impl DashboardState {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    /// The first [`PREVIEW_ROWS`] records, in file order.
    pub fn preview(&self) -> &[StudentRecord] {
        let records = self.records.records();
        &records[..records.len().min(PREVIEW_ROWS)]
    }

    /// A validated record set arrived: replace any previous data and show the preview.
    pub fn records_loaded(self, records: RecordSet) -> Self {
        Self {
            screen: Screen::Preview,
            records: Arc::new(records),
            query: ViewQuery::default(),
        }
    }

    /// Preview accepted; analysis starts.
    pub fn confirm(self) -> Self {
        self.advance(Screen::Preview, Screen::Analyzing)
    }

    pub fn analysis_complete(self) -> Self {
        self.advance(Screen::Analyzing, Screen::Results)
    }

    /// Drop the loaded records and every view setting.
    pub fn back_to_upload(self) -> Self {
        Self::default()
    }

    /// Narrow statistics and table to one class. Only applies on [`Screen::Results`].
    pub fn with_class_filter(self, class_filter: ClassFilter) -> Self {
        self.on_results(|query| query.class_filter = class_filter)
    }

    /// Only applies on [`Screen::Results`].
    pub fn with_search(self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.on_results(|query| query.search = search)
    }

    /// Sort by `field`; selecting the current field again flips the direction. Only applies on
    /// [`Screen::Results`].
    pub fn with_sort(self, field: SortField) -> Self {
        self.on_results(|query| query.sort = query.sort.toggle(field))
    }

    /// Statistics for the current class filter. The search term does not narrow them.
    pub fn snapshot(&self) -> AggregateSnapshot {
        aggregate(self.records.as_ref(), &self.query.class_filter)
    }

    /// Table rows after search, class filter and sort.
    pub fn visible_records(&self) -> Vec<&StudentRecord> {
        view(self.records.as_ref(), &self.query)
    }

    /// Recommendations for the current class filter.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        recommendations(&self.snapshot())
    }

    /// Count, average, highest and lowest score of [`DashboardState::visible_records`].
    pub fn view_summary(&self) -> ViewSummary {
        summarize_view(&self.visible_records())
    }

    /// Class labels available for filtering.
    pub fn unique_classes(&self) -> Vec<String> {
        unique_classes(self.records.as_ref())
    }

    /// Project the summary report for the current class filter.
    pub fn report(&self, options: &ReportOptions) -> Report {
        project(
            &self.snapshot(),
            self.records.as_ref(),
            &self.query.class_filter,
            options,
        )
    }

    fn advance(mut self, from: Screen, to: Screen) -> Self {
        if self.screen == from {
            self.screen = to;
        }
        self
    }

    fn on_results(mut self, update: impl FnOnce(&mut ViewQuery)) -> Self {
        if self.screen == Screen::Results {
            update(&mut self.query);
        }
        self
    }
}
