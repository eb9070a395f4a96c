use serde::Serialize;

use super::super::chart::StagedChart;
use super::super::metric::Metric;
use super::super::narrator::Narrative;
use super::super::scatter::ScatterStage;

/// Header card for the selected municipality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityProfileView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub dominant_county: String,
    pub population: String,
    pub peer_count: usize,
    pub peer_count_label: String,
    pub has_audit_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_notice: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    AuditNotSubmitted,
    NotReported,
    InsufficientCohort,
}

impl NoticeKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AuditNotSubmitted => "Audit Not Submitted",
            Self::NotReported => "Not Reported",
            Self::InsufficientCohort => "Insufficient Cohort",
        }
    }
}

/// Explanation rendered in place of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelNotice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub metric: Metric,
    pub title: String,
    pub subtitle: String,
    pub narrative: Narrative,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<StagedChart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<PanelNotice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterView {
    pub x_metric: Metric,
    pub y_metric: Metric,
    pub stage: ScatterStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub profile: EntityProfileView,
    pub fund_balance: PanelView,
    pub tax_rate: PanelView,
    pub scatter: ScatterView,
}

impl PanelView {
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }
}
