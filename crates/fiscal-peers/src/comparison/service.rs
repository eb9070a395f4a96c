use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::chart::StageOptions;
use super::metric::Metric;
use super::report::{build_panel, build_report, ComparisonReport, PanelView};
use super::resolver::{self, SearchHit};
use crate::dataset::{Dataset, DatasetSummary, Metadata};

/// Shared entry point for the HTTP shell and the CLI.
///
/// Holds one read-only snapshot and memoizes derived views by canonical key, so repeated
/// selections of the same municipality reuse the staged result.
pub struct ComparisonService {
    dataset: Arc<Dataset>,
    options: StageOptions,
    reports: Mutex<HashMap<String, Arc<ComparisonReport>>>,
    panels: Mutex<HashMap<(String, Metric), Arc<PanelView>>>,
}

impl ComparisonService {
    pub fn new(dataset: Arc<Dataset>, options: StageOptions) -> Self {
        Self {
            dataset,
            options,
            reports: Mutex::new(HashMap::new()),
            panels: Mutex::new(HashMap::new()),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &StageOptions {
        &self.options
    }

    pub fn metadata(&self) -> &Metadata {
        &self.dataset.metadata
    }

    pub fn summary(&self) -> DatasetSummary {
        self.dataset.summary()
    }

    pub fn resolve(&self, raw: Option<&str>) -> Option<String> {
        resolver::resolve(&self.dataset, raw)
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        resolver::search(&self.dataset, query, limit)
    }

    pub fn report(&self, raw: &str) -> Option<Arc<ComparisonReport>> {
        let key = self.resolve(Some(raw))?;

        let mut reports = self.reports.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(report) = reports.get(&key) {
            return Some(Arc::clone(report));
        }

        debug!(municipality = %key, "building comparison report");
        let report = Arc::new(build_report(&self.dataset, &key, &self.options)?);
        reports.insert(key, Arc::clone(&report));
        Some(report)
    }

    pub fn panel(&self, raw: &str, metric: Metric) -> Option<Arc<PanelView>> {
        let key = self.resolve(Some(raw))?;
        let cache_key = (key, metric);

        let mut panels = self.panels.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(panel) = panels.get(&cache_key) {
            return Some(Arc::clone(panel));
        }

        debug!(municipality = %cache_key.0, %metric, "staging metric panel");
        let panel = Arc::new(build_panel(
            &self.dataset,
            &cache_key.0,
            metric,
            &self.options,
        )?);
        panels.insert(cache_key, Arc::clone(&panel));
        Some(panel)
    }
}
