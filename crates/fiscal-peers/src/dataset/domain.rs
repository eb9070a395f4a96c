use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One municipality as published in the AFIR snapshot.
///
/// Every metric is optional: the upstream export leaves cells blank for units that did not
/// report, and absence is a first-class value downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Display name; the loader backfills it from the map key when the export omits it.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub dominant_county: Option<String>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub has_audit_data: bool,
    #[serde(default)]
    pub fba_pct: Option<f64>,
    #[serde(default)]
    pub fba_pct_group_avg: Option<f64>,
    #[serde(default)]
    pub fba_pct_state_avg: Option<f64>,
    #[serde(default)]
    pub fba_dollars: Option<f64>,
    #[serde(default)]
    pub fba_per_capita: Option<f64>,
    #[serde(default)]
    pub gf_excess: Option<f64>,
    #[serde(default)]
    pub gf_revenues: Option<f64>,
    #[serde(default)]
    pub gf_expenditures: Option<f64>,
    #[serde(default)]
    pub tax_rate_adj: Option<f64>,
    #[serde(default)]
    pub tax_rate_nominal: Option<f64>,
    #[serde(default)]
    pub tax_rate_adj_group_avg: Option<f64>,
    #[serde(default)]
    pub tax_rate_adj_state_avg: Option<f64>,
    #[serde(default)]
    pub assessed_val_adj: Option<f64>,
    #[serde(default)]
    pub av_per_capita: Option<f64>,
    #[serde(default)]
    pub reval_year: Option<i32>,
}

impl Entity {
    /// Bare record with every optional field empty.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: None,
            dominant_county: None,
            population: None,
            has_audit_data: false,
            fba_pct: None,
            fba_pct_group_avg: None,
            fba_pct_state_avg: None,
            fba_dollars: None,
            fba_per_capita: None,
            gf_excess: None,
            gf_revenues: None,
            gf_expenditures: None,
            tax_rate_adj: None,
            tax_rate_nominal: None,
            tax_rate_adj_group_avg: None,
            tax_rate_adj_state_avg: None,
            assessed_val_adj: None,
            av_per_capita: None,
            reval_year: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub fiscal_year: Option<String>,
    #[serde(default)]
    pub as_of: Option<String>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_municipalities: usize,
}

/// Read-only snapshot shared by every comparison call in a session.
///
/// Keys are the canonical, case-sensitive municipality names. Ordered maps keep
/// "first match" lookups deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub municipalities: BTreeMap<String, Entity>,
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<String>>,
}

impl Dataset {
    /// Give every nameless record its canonical key as display name.
    pub(crate) fn backfill_names(&mut self) {
        for (key, entity) in self.municipalities.iter_mut() {
            if entity.name.trim().is_empty() {
                entity.name = key.clone();
            }
        }
    }

    pub fn entity(&self, key: &str) -> Option<&Entity> {
        self.municipalities.get(key)
    }

    pub fn group_members(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn summary(&self) -> DatasetSummary {
        let with_audit_data = self
            .municipalities
            .values()
            .filter(|entity| entity.has_audit_data)
            .count();

        let groups = self
            .groups
            .iter()
            .map(|(name, members)| GroupSize {
                name: name.clone(),
                members: members.len(),
            })
            .collect();

        DatasetSummary {
            fiscal_year: self.metadata.fiscal_year.clone(),
            generated_at: self.metadata.generated_at,
            total: self.municipalities.len(),
            with_audit_data,
            without_audit_data: self.municipalities.len() - with_audit_data,
            groups,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSize {
    pub name: String,
    pub members: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    pub total: usize,
    pub with_audit_data: usize,
    pub without_audit_data: usize,
    pub groups: Vec<GroupSize>,
}
