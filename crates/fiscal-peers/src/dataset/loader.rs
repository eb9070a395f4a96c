use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::domain::Dataset;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading dataset snapshot");
    load_from_reader(BufReader::new(file))
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut dataset: Dataset = serde_json::from_reader(reader)?;
    dataset.backfill_names();
    log_summary(&dataset);
    Ok(dataset)
}

pub fn from_json_str(raw: &str) -> Result<Dataset, DatasetError> {
    let mut dataset: Dataset = serde_json::from_str(raw)?;
    dataset.backfill_names();
    log_summary(&dataset);
    Ok(dataset)
}

fn log_summary(dataset: &Dataset) {
    let summary = dataset.summary();
    info!(
        total = summary.total,
        with_audit_data = summary.with_audit_data,
        without_audit_data = summary.without_audit_data,
        groups = summary.groups.len(),
        fiscal_year = summary.fiscal_year.as_deref().unwrap_or("unknown"),
        "dataset snapshot loaded"
    );
    for group in &summary.groups {
        debug!(group = %group.name, members = group.members, "peer group");
    }
}
