use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use fiscal_peers::comparison::ComparisonService;
use fiscal_peers::config::AppConfig;
use fiscal_peers::dataset;
use fiscal_peers::error::AppError;
use fiscal_peers::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Environment configuration with an optional `--data` override applied.
pub(crate) fn load_config(data: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = data {
        config.data.path = path;
    }
    Ok(config)
}

/// Shared startup for every command: configuration, then logging, then the snapshot.
pub(crate) fn bootstrap(
    data: Option<PathBuf>,
) -> Result<(AppConfig, Arc<ComparisonService>), AppError> {
    let config = load_config(data)?;
    telemetry::init(&config.telemetry)?;
    let service = load_service(&config)?;
    Ok((config, service))
}

/// Hydrate the snapshot named by `config` and wrap it in a shared service.
pub(crate) fn load_service(config: &AppConfig) -> Result<Arc<ComparisonService>, AppError> {
    let snapshot = dataset::load_from_path(&config.data.path)?;
    Ok(Arc::new(ComparisonService::new(
        Arc::new(snapshot),
        config.chart.stage_options(),
    )))
}
