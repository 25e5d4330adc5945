//! Financial statement to chart series pipeline.
//!
//! Four pure stages: label generation, metric extraction, chart composition
//! and the ownership breakdown. Nothing here performs I/O.

pub mod compose;
pub mod extract;
pub mod labels;
pub mod ownership;
pub mod record;

pub use compose::{
    ChartData, ChartKind, Dataset, STATEMENT_CHARTS, SeriesColor, StatementSet,
    build_statement_charts, compose_chart,
};
pub use extract::{MetricSeries, Scale, extract_metric};
pub use labels::generate_labels;
pub use ownership::{
    InstitutionalHolder, InstitutionalOwner, OwnershipBreakdown, PieChart, PieDataset,
    ownership_breakdown,
};
pub use record::{FinancialRecord, Period, StatementField};
