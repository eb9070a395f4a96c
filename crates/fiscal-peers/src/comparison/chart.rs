//! Ranked horizontal bar chart staging.
//!
//! Turns a cohort into a render-ready series: sorted rows, an x-axis domain that covers the
//! data and every reference line, the highlighted row, and the scroll offset that brings the
//! highlighted row into view when the chart is taller than its viewport.

use std::cmp::Ordering;

use serde::Serialize;

use super::cohort::CohortValue;
use super::metric::ReferenceLine;

/// Minimum number of defined values before a ranked comparison is meaningful.
pub const MIN_COMPARABLE: usize = 2;

/// One bar before staging. `value` may be absent; such rows sink to the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    pub name: String,
    pub value: Option<f64>,
    pub has_audit_data: bool,
}

impl From<CohortValue> for ChartEntry {
    fn from(value: CohortValue) -> Self {
        Self {
            name: value.name,
            value: Some(value.value),
            has_audit_data: value.has_audit_data,
        }
    }
}

/// Visual weight of a staged bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowEmphasis {
    Selected,
    Peer,
    /// Entity never filed audit data; drawn with reduced weight.
    Muted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub name: String,
    pub value: Option<f64>,
    pub emphasis: RowEmphasis,
}

/// Inclusive x-axis bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

/// Layout knobs for the ranked chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageOptions {
    pub row_height_px: u32,
    /// Series longer than this scroll inside a fixed viewport.
    pub scroll_threshold_rows: usize,
    pub max_viewport_px: u32,
    pub min_chart_height_px: u32,
    /// Replaces the computed upper bound verbatim when set.
    pub domain_max: Option<f64>,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            row_height_px: 28,
            scroll_threshold_rows: 20,
            max_viewport_px: 600,
            min_chart_height_px: 400,
            domain_max: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagedChart {
    pub rows: Vec<ChartRow>,
    pub domain: ValueDomain,
    pub reference_lines: Vec<ReferenceLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_index: Option<usize>,
    pub chart_height_px: u32,
    pub viewport_px: u32,
    pub scrollable: bool,
    /// Scroll position (pixels from the top) that reveals the highlighted row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locate_offset_px: Option<u32>,
    pub sufficient: bool,
}

pub fn stage(
    entries: Vec<ChartEntry>,
    selected: Option<&str>,
    references: Vec<ReferenceLine>,
    options: &StageOptions,
) -> StagedChart {
    let mut entries = entries;
    entries.sort_by(|a, b| rank_order(a.value, b.value));

    let defined: Vec<f64> = entries.iter().filter_map(|entry| entry.value).collect();
    let domain = value_domain(&defined, &references, options.domain_max);

    let highlight_index = selected.and_then(|selected| {
        entries
            .iter()
            .position(|entry| entry.name == selected && entry.value.is_some())
    });

    let rows: Vec<ChartRow> = entries
        .into_iter()
        .map(|entry| {
            let emphasis = if Some(entry.name.as_str()) == selected {
                RowEmphasis::Selected
            } else if !entry.has_audit_data {
                RowEmphasis::Muted
            } else {
                RowEmphasis::Peer
            };
            ChartRow {
                name: entry.name,
                value: entry.value,
                emphasis,
            }
        })
        .collect();

    let row_count = rows.len() as u32;
    let chart_height_px = options
        .min_chart_height_px
        .max(row_count.saturating_mul(options.row_height_px));
    let scrollable = rows.len() > options.scroll_threshold_rows;
    let viewport_px = if scrollable {
        chart_height_px.min(options.max_viewport_px)
    } else {
        chart_height_px
    };

    let locate_offset_px = if scrollable {
        highlight_index.and_then(|index| locate_offset(index, options.row_height_px, viewport_px))
    } else {
        None
    };

    StagedChart {
        rows,
        domain,
        reference_lines: references,
        highlight_index,
        chart_height_px,
        viewport_px,
        scrollable,
        locate_offset_px,
        sufficient: defined.len() >= MIN_COMPARABLE,
    }
}

/// Stage a reportable cohort, the common path for metric panels.
pub fn stage_cohort(
    cohort: Vec<CohortValue>,
    selected: Option<&str>,
    references: Vec<ReferenceLine>,
    options: &StageOptions,
) -> StagedChart {
    stage(
        cohort.into_iter().map(ChartEntry::from).collect(),
        selected,
        references,
        options,
    )
}

/// Descending by value; absent values after every defined value, ties left in place.
fn rank_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => b.total_cmp(&a),
    }
}

fn value_domain(values: &[f64], references: &[ReferenceLine], domain_max: Option<f64>) -> ValueDomain {
    let min = values.iter().copied().fold(0.0_f64, f64::min);

    let max = match domain_max {
        Some(max) => max,
        None => values
            .iter()
            .copied()
            .chain(references.iter().map(|line| line.value))
            .reduce(f64::max)
            // All-negative series: the bars grow leftward from zero.
            .map(|max| (max * 1.1).max(0.0))
            .unwrap_or(0.0),
    };

    ValueDomain { min, max }
}

/// Scroll offset only when the row would sit below the initially visible band.
fn locate_offset(index: usize, row_height_px: u32, viewport_px: u32) -> Option<u32> {
    let offset = (index as u32).saturating_mul(row_height_px);
    if offset > viewport_px.saturating_sub(row_height_px) {
        Some(offset.saturating_sub(viewport_px / 2))
    } else {
        None
    }
}
