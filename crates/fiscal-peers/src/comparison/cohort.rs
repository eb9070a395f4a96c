use serde::Serialize;

use crate::dataset::{Dataset, Entity};

/// A cohort member with a reportable value for the metric being compared.
///
/// `name` is the canonical dataset key, which is what chart highlighting matches against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortValue {
    pub name: String,
    pub value: f64,
    pub has_audit_data: bool,
}

/// Every member of the entity's group, the entity itself included, in stored order.
pub fn cohort_of(dataset: &Dataset, key: &str) -> Vec<String> {
    dataset
        .entity(key)
        .and_then(|entity| entity.group.as_deref())
        .map(|group| dataset.group_members(group).to_vec())
        .unwrap_or_default()
}

/// Group members other than the entity itself, in stored order.
pub fn peers_of(dataset: &Dataset, key: &str) -> Vec<String> {
    cohort_of(dataset, key)
        .into_iter()
        .filter(|name| name != key)
        .collect()
}

/// Keep the members whose accessor yields a value; order follows `keys`.
///
/// Keys missing from the dataset are skipped rather than treated as errors.
pub fn reportable_peers<F>(dataset: &Dataset, keys: &[String], accessor: F) -> Vec<CohortValue>
where
    F: Fn(&Entity) -> Option<f64>,
{
    keys.iter()
        .filter_map(|key| dataset.entity(key).map(|entity| (key, entity)))
        .filter_map(|(key, entity)| {
            accessor(entity).map(|value| CohortValue {
                name: key.clone(),
                value,
                has_audit_data: entity.has_audit_data,
            })
        })
        .collect()
}
