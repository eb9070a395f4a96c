//! Peer comparison engine: resolve a municipality, derive its cohort, and stage narratives,
//! ranked charts, and scatter plots for the dashboard shell.
//!
//! Everything below `service` and `router` is a pure function of the dataset snapshot and its
//! arguments; identical inputs always produce equal outputs.

pub mod chart;
pub mod cohort;
pub mod format;
pub mod metric;
pub mod narrator;
pub mod report;
pub mod resolver;
pub mod router;
pub mod scatter;
pub mod service;

#[cfg(test)]
mod tests;

pub use chart::{
    stage, stage_cohort, ChartEntry, ChartRow, RowEmphasis, StageOptions, StagedChart,
    ValueDomain, MIN_COMPARABLE,
};
pub use cohort::{cohort_of, peers_of, reportable_peers, CohortValue};
pub use metric::{
    Metric, MetricFormat, ReferenceKind, ReferenceLine, Threshold, UnknownMetric,
    LGC_FUND_BALANCE_MINIMUM,
};
pub use narrator::{companions, narrate, narrate_metric, ComparisonInput, ContextFact, Narrative};
pub use report::{
    build_panel, build_profile, build_report, ComparisonReport, EntityProfileView, NoticeKind,
    PanelNotice, PanelView, ScatterView,
};
pub use resolver::{resolve, search, SearchHit};
pub use router::comparison_router;
pub use scatter::{stage_scatter, ScatterPoint, ScatterStage};
pub use service::ComparisonService;
