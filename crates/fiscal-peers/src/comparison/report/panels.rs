use super::super::chart::{stage_cohort, StageOptions};
use super::super::cohort::{cohort_of, reportable_peers};
use super::super::metric::Metric;
use super::super::narrator::{narrate_metric, Narrative};
use super::views::{NoticeKind, PanelNotice, PanelView};
use crate::dataset::{Dataset, Entity};

/// Narrative, ranked chart, and fallback notice for one metric of one municipality.
///
/// Notice precedence: missing audit, missing value, then a cohort too small to rank. A chart is
/// only attached when no notice applies.
pub fn build_panel(
    dataset: &Dataset,
    key: &str,
    metric: Metric,
    options: &StageOptions,
) -> Option<PanelView> {
    let entity = dataset.entity(key)?;
    let (title, subtitle) = headings(entity, metric);

    if metric.requires_audit() && !entity.has_audit_data {
        return Some(PanelView {
            metric,
            title,
            subtitle,
            narrative: Narrative::default(),
            chart: None,
            notice: Some(audit_notice(entity, metric)),
        });
    }

    let narrative = narrate_metric(entity, metric);
    if metric.extract(entity).is_none() {
        return Some(PanelView {
            metric,
            title,
            subtitle,
            narrative,
            chart: None,
            notice: Some(PanelNotice {
                kind: NoticeKind::NotReported,
                message: format!(
                    "{} data was not reported for {}.",
                    capitalize(metric.noun()),
                    entity.name
                ),
            }),
        });
    }

    let cohort = reportable_peers(dataset, &cohort_of(dataset, key), |member| {
        metric.extract(member)
    });
    let reported = cohort.len();
    let chart = stage_cohort(
        cohort,
        Some(key),
        metric.reference_lines(entity),
        options,
    );

    let (chart, notice) = if chart.sufficient {
        (Some(chart), None)
    } else {
        let notice = PanelNotice {
            kind: NoticeKind::InsufficientCohort,
            message: format!(
                "Only {reported} municipality in this population group has reported {} data. \
                 Comparison charts require at least 2 peers.",
                metric.noun()
            ),
        };
        (None, Some(notice))
    };

    Some(PanelView {
        metric,
        title,
        subtitle,
        narrative,
        chart,
        notice,
    })
}

fn headings(entity: &Entity, metric: Metric) -> (String, String) {
    let (title, description) = match metric {
        Metric::FundBalancePct => (
            "Fund Balance Comparison".to_string(),
            "Fund Balance Available as % of General Fund Net Expenditures",
        ),
        Metric::AdjustedTaxRate => (
            "Tax Rate Comparison".to_string(),
            "Adjusted Tax Rate per $100 Assessed Value",
        ),
        other => (format!("{} Comparison", other.label()), other.label()),
    };

    let subtitle = match &entity.group {
        Some(group) => format!("{description} ({group})"),
        None => description.to_string(),
    };
    (title, subtitle)
}

fn audit_notice(entity: &Entity, metric: Metric) -> PanelNotice {
    let mut message = format!(
        "{} data requires an audit submission. {} has not submitted audit data for the \
         current fiscal year.",
        capitalize(metric.noun()),
        entity.name
    );
    if let Some(group_avg) = metric.group_average(entity) {
        message.push_str(&format!(
            " The group average is {} and the state average is {}.",
            metric.display(Some(group_avg)),
            metric.display(metric.state_average(entity))
        ));
    }

    PanelNotice {
        kind: NoticeKind::AuditNotSubmitted,
        message,
    }
}

fn capitalize(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::RowEmphasis;

    fn member(name: &str, fba_pct: Option<f64>, audited: bool) -> Entity {
        Entity {
            group: Some("Under 2,500".to_string()),
            fba_pct,
            fba_pct_group_avg: Some(0.3),
            fba_pct_state_avg: Some(0.45),
            has_audit_data: audited,
            tax_rate_adj: Some(0.4),
            ..Entity::named(name)
        }
    }

    fn dataset(members: Vec<Entity>) -> Dataset {
        let mut dataset = Dataset::default();
        dataset.groups.insert(
            "Under 2,500".to_string(),
            members.iter().map(|entity| entity.name.clone()).collect(),
        );
        for entity in members {
            dataset.municipalities.insert(entity.name.clone(), entity);
        }
        dataset
    }

    #[test]
    fn audit_gap_replaces_chart_with_notice() {
        let dataset = dataset(vec![
            member("Bath", None, false),
            member("Aurora", Some(0.5), true),
            member("Belhaven", Some(0.2), true),
        ]);
        let panel = build_panel(&dataset, "Bath", Metric::FundBalancePct, &StageOptions::default())
            .expect("panel for known entity");
        let notice = panel.notice.expect("notice present");
        assert_eq!(notice.kind, NoticeKind::AuditNotSubmitted);
        assert_eq!(
            notice.message,
            "Fund balance data requires an audit submission. Bath has not submitted audit data \
             for the current fiscal year. The group average is 30.0% and the state average is 45.0%."
        );
        assert!(panel.chart.is_none());
        assert!(panel.narrative.is_empty());
    }

    #[test]
    fn audit_gap_does_not_block_tax_rate() {
        let dataset = dataset(vec![
            member("Bath", None, false),
            member("Aurora", Some(0.5), true),
        ]);
        let panel = build_panel(&dataset, "Bath", Metric::AdjustedTaxRate, &StageOptions::default())
            .expect("panel");
        assert!(panel.notice.is_none());
        let chart = panel.chart.expect("chart staged");
        assert_eq!(chart.rows.len(), 2);
    }

    #[test]
    fn lone_reporter_gets_insufficient_notice_but_keeps_narrative() {
        let dataset = dataset(vec![
            member("Aurora", Some(0.5), true),
            member("Bath", None, true),
        ]);
        let panel = build_panel(&dataset, "Aurora", Metric::FundBalancePct, &StageOptions::default())
            .expect("panel");
        let notice = panel.notice.expect("notice");
        assert_eq!(notice.kind, NoticeKind::InsufficientCohort);
        assert!(notice.message.starts_with("Only 1 municipality"));
        assert!(panel.chart.is_none());
        assert!(panel.narrative.sentence.is_some());
    }

    #[test]
    fn missing_value_is_reported_as_not_reported() {
        let mut quiet = member("Bath", Some(0.1), true);
        quiet.tax_rate_adj = None;
        let dataset = dataset(vec![quiet, member("Aurora", Some(0.5), true)]);
        let panel = build_panel(&dataset, "Bath", Metric::AdjustedTaxRate, &StageOptions::default())
            .expect("panel");
        let notice = panel.notice.expect("notice");
        assert_eq!(notice.kind, NoticeKind::NotReported);
        assert_eq!(notice.message, "Adjusted tax rate data was not reported for Bath.");
    }

    #[test]
    fn unknown_entity_has_no_panel() {
        let dataset = dataset(vec![member("Aurora", Some(0.5), true)]);
        assert!(build_panel(&dataset, "aurora", Metric::FundBalancePct, &StageOptions::default()).is_none());
    }

    #[test]
    fn rows_are_keyed_by_dataset_key_not_display_name() {
        let mut dataset = Dataset::default();
        dataset.municipalities.insert(
            "Apex".to_string(),
            Entity {
                group: Some("G".to_string()),
                has_audit_data: true,
                tax_rate_adj: Some(0.6),
                ..Entity::named("APEX")
            },
        );
        dataset.municipalities.insert(
            "Cary".to_string(),
            Entity {
                group: Some("G".to_string()),
                has_audit_data: true,
                tax_rate_adj: Some(0.4),
                ..Entity::named("Cary")
            },
        );
        dataset
            .groups
            .insert("G".to_string(), vec!["Apex".to_string(), "Cary".to_string()]);

        let panel = build_panel(&dataset, "Apex", Metric::AdjustedTaxRate, &StageOptions::default())
            .expect("panel");
        let chart = panel.chart.expect("chart staged");
        assert_eq!(chart.highlight_index, Some(0));
        assert_eq!(chart.rows[0].name, "Apex");
        assert_eq!(chart.rows[0].emphasis, RowEmphasis::Selected);
    }

    #[test]
    fn subtitle_names_the_group() {
        let dataset = dataset(vec![
            member("Aurora", Some(0.5), true),
            member("Bath", Some(0.1), true),
        ]);
        let panel = build_panel(&dataset, "Aurora", Metric::FundBalancePct, &StageOptions::default())
            .expect("panel");
        assert_eq!(panel.title, "Fund Balance Comparison");
        assert_eq!(
            panel.subtitle,
            "Fund Balance Available as % of General Fund Net Expenditures (Under 2,500)"
        );
        let chart = panel.chart.expect("chart");
        assert_eq!(chart.highlight_index, Some(0));
        assert_eq!(chart.reference_lines.len(), 3);
    }
}
