//! Dataset snapshot model and the JSON loader that hydrates it.

pub mod domain;
mod loader;

pub use domain::{Dataset, DatasetSummary, Entity, GroupSize, Metadata};
pub use loader::{from_json_str, load_from_path, load_from_reader, DatasetError};
