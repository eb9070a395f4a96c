use serde::Serialize;

use crate::dataset::Dataset;

/// Map a user-supplied identifier to the dataset's canonical key.
///
/// An exact key always wins; otherwise the first key (in canonical order) whose lower-cased
/// form equals the lower-cased input is returned. Blank input resolves to nothing.
pub fn resolve(dataset: &Dataset, raw: Option<&str>) -> Option<String> {
    let raw = raw.filter(|raw| !raw.is_empty())?;

    if dataset.municipalities.contains_key(raw) {
        return Some(raw.to_string());
    }

    let lowered = raw.to_lowercase();
    dataset
        .municipalities
        .keys()
        .find(|key| key.to_lowercase() == lowered)
        .cloned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_county: Option<String>,
}

/// Substring search for the municipality picker; an empty query lists the first `limit` names.
pub fn search(dataset: &Dataset, query: &str, limit: usize) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    dataset
        .municipalities
        .iter()
        .filter(|(key, _)| query.is_empty() || key.to_lowercase().contains(&query))
        .take(limit)
        .map(|(key, entity)| SearchHit {
            name: key.clone(),
            dominant_county: entity.dominant_county.clone(),
        })
        .collect()
}
