use super::super::chart::StageOptions;
use super::super::cohort::{cohort_of, peers_of};
use super::super::format;
use super::super::metric::Metric;
use super::super::scatter::stage_scatter;
use super::panels::build_panel;
use super::views::{ComparisonReport, EntityProfileView, ScatterView};
use crate::dataset::Dataset;

const AUDIT_NOTICE: &str = "Audit data not available. General Fund metrics (fund balance, \
                            revenues, expenditures) were not reported for this municipality. \
                            Tax rate comparisons are still shown below.";

const SCATTER_NOTICE: &str = "Insufficient data for scatter plot comparison.";

pub fn build_profile(dataset: &Dataset, key: &str) -> Option<EntityProfileView> {
    let entity = dataset.entity(key)?;
    let peer_count = peers_of(dataset, key).len();

    Some(EntityProfileView {
        name: entity.name.clone(),
        group: entity.group.clone(),
        dominant_county: entity
            .dominant_county
            .clone()
            .unwrap_or_else(|| "County not reported".to_string()),
        population: format::population(entity.population.map(|population| population as f64)),
        peer_count,
        peer_count_label: format!(
            "{} peer{} in group",
            peer_count,
            if peer_count == 1 { "" } else { "s" }
        ),
        has_audit_data: entity.has_audit_data,
        audit_notice: (!entity.has_audit_data).then_some(AUDIT_NOTICE),
    })
}

/// Everything the dashboard shows for one municipality, keyed by its canonical name.
pub fn build_report(
    dataset: &Dataset,
    key: &str,
    options: &StageOptions,
) -> Option<ComparisonReport> {
    let profile = build_profile(dataset, key)?;
    let fund_balance = build_panel(dataset, key, Metric::FundBalancePct, options)?;
    let tax_rate = build_panel(dataset, key, Metric::AdjustedTaxRate, options)?;

    let stage = stage_scatter(
        dataset,
        &cohort_of(dataset, key),
        Some(key),
        Metric::AssessedValuePerCapita,
        Metric::AdjustedTaxRate,
    );
    let scatter = ScatterView {
        x_metric: Metric::AssessedValuePerCapita,
        y_metric: Metric::AdjustedTaxRate,
        notice: (!stage.sufficient).then_some(SCATTER_NOTICE),
        stage,
    };

    Some(ComparisonReport {
        profile,
        fund_balance,
        tax_rate,
        scatter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Entity;

    fn dataset() -> Dataset {
        let mut dataset = Dataset::default();
        let rows = [
            ("Alpha", true, Some(0.2), Some(0.5), Some(80_000.0)),
            ("Beta", false, None, Some(0.6), None),
        ];
        for (name, audited, fba_pct, tax_rate_adj, av_per_capita) in rows {
            dataset.municipalities.insert(
                name.to_string(),
                Entity {
                    group: Some("Small".to_string()),
                    population: Some(1500),
                    has_audit_data: audited,
                    fba_pct,
                    tax_rate_adj,
                    av_per_capita,
                    ..Entity::named(name)
                },
            );
        }
        dataset.groups.insert(
            "Small".to_string(),
            vec!["Alpha".to_string(), "Beta".to_string()],
        );
        dataset
    }

    #[test]
    fn profile_describes_peer_count_and_missing_county() {
        let profile = build_profile(&dataset(), "Beta").expect("profile");
        assert_eq!(profile.dominant_county, "County not reported");
        assert_eq!(profile.population, "1,500");
        assert_eq!(profile.peer_count_label, "1 peer in group");
        assert_eq!(profile.audit_notice, Some(AUDIT_NOTICE));
    }

    #[test]
    fn report_flags_sparse_scatter() {
        let report = build_report(&dataset(), "Alpha", &StageOptions::default()).expect("report");
        assert_eq!(report.scatter.stage.point_count(), 1);
        assert_eq!(report.scatter.notice, Some(SCATTER_NOTICE));
        assert!(report.tax_rate.chart.is_some());
        assert!(report.fund_balance.chart.is_none());
        assert!(report.profile.audit_notice.is_none());
    }

    #[test]
    fn unresolved_key_has_no_report() {
        assert!(build_report(&dataset(), "Gamma", &StageOptions::default()).is_none());
    }
}
