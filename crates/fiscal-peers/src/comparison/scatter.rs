use serde::Serialize;

use super::chart::MIN_COMPARABLE;
use super::metric::Metric;
use crate::dataset::Dataset;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterStage {
    pub peer_series: Vec<ScatterPoint>,
    pub selected_series: Vec<ScatterPoint>,
    /// False when fewer than two points survive; callers show a fallback instead of a plot.
    pub sufficient: bool,
}

impl ScatterStage {
    pub fn point_count(&self) -> usize {
        self.peer_series.len() + self.selected_series.len()
    }
}

/// Split `keys` into selected and peer points, dropping entities missing either coordinate.
pub fn stage_scatter(
    dataset: &Dataset,
    keys: &[String],
    selected: Option<&str>,
    x: Metric,
    y: Metric,
) -> ScatterStage {
    let mut peer_series = Vec::new();
    let mut selected_series = Vec::new();

    for (key, entity) in keys
        .iter()
        .filter_map(|key| dataset.entity(key).map(|entity| (key, entity)))
    {
        let (Some(x_value), Some(y_value)) = (x.extract(entity), y.extract(entity)) else {
            continue;
        };
        let point = ScatterPoint {
            name: key.clone(),
            x: x_value,
            y: y_value,
        };
        if Some(key.as_str()) == selected {
            selected_series.push(point);
        } else {
            peer_series.push(point);
        }
    }

    let sufficient = peer_series.len() + selected_series.len() >= MIN_COMPARABLE;
    ScatterStage {
        peer_series,
        selected_series,
        sufficient,
    }
}
