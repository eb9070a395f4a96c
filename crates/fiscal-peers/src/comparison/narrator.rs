//! Comparative sentences and context facts for a single metric.
//!
//! Reference comparisons use a strict `>`: a value equal to the group or state average is
//! described as "below" it. Thresholds are inclusive (`>=` meets the threshold).

use serde::Serialize;

use super::metric::{Metric, Threshold};
use crate::dataset::Entity;

/// Labeled figure shown next to a narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextFact {
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Narrative {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facts: Vec<ContextFact>,
}

impl Narrative {
    pub fn is_empty(&self) -> bool {
        self.sentence.is_none() && self.facts.is_empty()
    }
}

/// Inputs for one comparison sentence.
#[derive(Debug, Clone)]
pub struct ComparisonInput<'a> {
    pub subject: &'a str,
    pub metric: Metric,
    pub value: Option<f64>,
    pub group_avg: Option<f64>,
    pub state_avg: Option<f64>,
    pub threshold: Option<Threshold>,
    /// Sentences appended after the threshold clause.
    pub notes: Vec<String>,
}

/// Build the sentence and the headline fact for one value.
///
/// An absent value produces an empty narrative; the caller renders its own fallback.
pub fn narrate(input: &ComparisonInput<'_>) -> Narrative {
    let Some(value) = input.value else {
        return Narrative::default();
    };

    let metric = input.metric;
    let mut sentence = lead_clause(input.subject, metric, value);

    let mut comparisons = Vec::new();
    if let Some(group_avg) = input.group_avg {
        comparisons.push(reference_clause(metric, value, group_avg, "group"));
    }
    if let Some(state_avg) = input.state_avg {
        comparisons.push(reference_clause(metric, value, state_avg, "state"));
    }
    if !comparisons.is_empty() {
        sentence.push_str(", ");
        sentence.push_str(&comparisons.join(" and "));
    }
    sentence.push('.');

    if let Some(threshold) = &input.threshold {
        sentence.push(' ');
        sentence.push_str(if threshold.is_met_by(value) {
            threshold.meets_sentence
        } else {
            threshold.below_sentence
        });
    }

    for note in &input.notes {
        sentence.push(' ');
        sentence.push_str(note);
    }

    Narrative {
        sentence: Some(sentence),
        facts: vec![fact(metric, value, input.threshold.as_ref())],
    }
}

/// Narrative for `metric` using the entity's own references and companion figures.
pub fn narrate_metric(entity: &Entity, metric: Metric) -> Narrative {
    let value = metric.extract(entity);
    let notes = match (metric, value) {
        (Metric::AdjustedTaxRate, Some(adjusted)) => nominal_rate_note(entity, adjusted)
            .into_iter()
            .collect(),
        _ => Vec::new(),
    };

    let input = ComparisonInput {
        subject: &entity.name,
        metric,
        value,
        group_avg: metric.group_average(entity),
        state_avg: metric.state_average(entity),
        threshold: metric.threshold(),
        notes,
    };

    let mut narrative = narrate(&input);
    if narrative.sentence.is_some() {
        narrative.facts = companions(metric)
            .iter()
            .filter_map(|companion| {
                companion
                    .extract(entity)
                    .map(|value| fact(*companion, value, companion.threshold().as_ref()))
            })
            .collect();
    }
    narrative
}

/// Figures displayed alongside a headline metric, in display order.
pub fn companions(metric: Metric) -> &'static [Metric] {
    match metric {
        Metric::FundBalancePct => &[
            Metric::FundBalanceAvailable,
            Metric::FundBalancePct,
            Metric::OperatingSurplus,
            Metric::GeneralFundRevenues,
            Metric::GeneralFundExpenditures,
        ],
        Metric::AdjustedTaxRate => &[
            Metric::AdjustedTaxRate,
            Metric::NominalTaxRate,
            Metric::RevaluationYear,
            Metric::AssessedValuation,
            Metric::AssessedValuePerCapita,
        ],
        Metric::FundBalanceAvailable => &[Metric::FundBalanceAvailable],
        Metric::OperatingSurplus => &[Metric::OperatingSurplus],
        Metric::GeneralFundRevenues => &[Metric::GeneralFundRevenues],
        Metric::GeneralFundExpenditures => &[Metric::GeneralFundExpenditures],
        Metric::FundBalancePerCapita => &[Metric::FundBalancePerCapita],
        Metric::NominalTaxRate => &[Metric::NominalTaxRate],
        Metric::RevaluationYear => &[Metric::RevaluationYear],
        Metric::AssessedValuation => &[Metric::AssessedValuation],
        Metric::AssessedValuePerCapita => &[Metric::AssessedValuePerCapita],
        Metric::Population => &[Metric::Population],
    }
}

fn lead_clause(subject: &str, metric: Metric, value: f64) -> String {
    let formatted = metric.display(Some(value));
    match metric {
        Metric::FundBalancePct => format!(
            "{subject}'s fund balance covers {formatted} of annual net expenditures"
        ),
        _ => match metric.unit() {
            Some(unit) => format!("{subject}'s {} is {formatted} per {unit}", metric.noun()),
            None => format!("{subject}'s {} is {formatted}", metric.noun()),
        },
    }
}

fn reference_clause(metric: Metric, value: f64, reference: f64, scope: &str) -> String {
    let direction = if value > reference { "above" } else { "below" };
    format!(
        "{direction} the {scope} average ({})",
        metric.display(Some(reference))
    )
}

fn nominal_rate_note(entity: &Entity, adjusted: f64) -> Option<String> {
    let nominal = Metric::NominalTaxRate.extract(entity)?;
    if nominal == adjusted {
        return None;
    }
    Some(format!(
        "The nominal rate ({}) differs from the adjusted rate because the adjustment accounts \
         for differences in revaluation timing across municipalities.",
        Metric::NominalTaxRate.display(Some(nominal))
    ))
}

fn fact(metric: Metric, value: f64, threshold: Option<&Threshold>) -> ContextFact {
    let note = match (metric, threshold) {
        (_, Some(threshold)) => Some(if threshold.is_met_by(value) {
            threshold.meets_note
        } else {
            threshold.below_note
        }),
        (Metric::OperatingSurplus, None) => Some(if value >= 0.0 { "Surplus" } else { "Deficit" }),
        (Metric::AdjustedTaxRate, None) => Some("per $100 assessed value"),
        _ => None,
    };

    ContextFact {
        label: metric.label(),
        value: metric.display(Some(value)),
        note: note.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::metric::LGC_FUND_BALANCE_MINIMUM;

    fn fund_balance_input(value: Option<f64>, group_avg: Option<f64>) -> ComparisonInput<'static> {
        ComparisonInput {
            subject: "X",
            metric: Metric::FundBalancePct,
            value,
            group_avg,
            state_avg: None,
            threshold: Some(LGC_FUND_BALANCE_MINIMUM),
            notes: Vec::new(),
        }
    }

    #[test]
    fn absent_value_yields_empty_narrative() {
        let narrative = narrate(&fund_balance_input(None, Some(8.0)));
        assert!(narrative.is_empty());
    }

    #[test]
    fn fund_balance_above_group_and_threshold() {
        let narrative = narrate(&fund_balance_input(Some(10.0), Some(8.0)));
        assert_eq!(
            narrative.sentence.as_deref(),
            Some(
                "X's fund balance covers 10.0% of annual net expenditures, above the group \
                 average (8.0%). This exceeds the LGC's recommended minimum of 8%."
            )
        );
    }

    #[test]
    fn equality_with_reference_reads_as_below() {
        let narrative = narrate(&fund_balance_input(Some(8.0), Some(8.0)));
        let sentence = narrative.sentence.expect("sentence present");
        assert!(sentence.contains("below the group average (8.0%)"));
        assert!(!sentence.contains("above"));
        // Inclusive threshold: exactly 8% still meets the minimum.
        assert!(sentence.ends_with("This exceeds the LGC's recommended minimum of 8%."));
    }

    #[test]
    fn below_threshold_selects_shortfall_sentence() {
        let narrative = narrate(&fund_balance_input(Some(5.25), None));
        assert_eq!(
            narrative.sentence.as_deref(),
            Some(
                "X's fund balance covers 5.3% of annual net expenditures. This is below the \
                 LGC's recommended minimum of 8%."
            )
        );
        assert_eq!(narrative.facts[0].note.as_deref(), Some("Below LGC 8% minimum"));
    }

    #[test]
    fn both_references_are_joined_with_and() {
        let input = ComparisonInput {
            subject: "Cary",
            metric: Metric::AdjustedTaxRate,
            value: Some(0.35),
            group_avg: Some(0.42),
            state_avg: Some(0.30),
            threshold: None,
            notes: Vec::new(),
        };
        assert_eq!(
            narrate(&input).sentence.as_deref(),
            Some(
                "Cary's adjusted tax rate is $0.3500 per $100 of assessed value, below the \
                 group average ($0.4200) and above the state average ($0.3000)."
            )
        );
    }

    #[test]
    fn tax_rate_narrative_mentions_differing_nominal_rate() {
        let entity = Entity {
            tax_rate_adj: Some(0.5),
            tax_rate_nominal: Some(0.42),
            reval_year: Some(2019),
            av_per_capita: Some(98_500.0),
            ..Entity::named("Boone")
        };
        let narrative = narrate_metric(&entity, Metric::AdjustedTaxRate);
        let sentence = narrative.sentence.expect("sentence present");
        assert!(sentence.starts_with("Boone's adjusted tax rate is $0.5000 per $100 of assessed value."));
        assert!(sentence.contains("The nominal rate ($0.4200) differs from the adjusted rate"));

        let labels: Vec<&str> = narrative.facts.iter().map(|fact| fact.label).collect();
        assert_eq!(
            labels,
            vec![
                "Adjusted Tax Rate",
                "Nominal Tax Rate",
                "Latest Revaluation Year",
                "AV per Capita"
            ]
        );
        assert_eq!(narrative.facts[0].note.as_deref(), Some("per $100 assessed value"));
        assert_eq!(narrative.facts[2].value, "2019");
        assert_eq!(narrative.facts[3].value, "$98,500");
    }

    #[test]
    fn matching_nominal_rate_adds_no_note() {
        let entity = Entity {
            tax_rate_adj: Some(0.5),
            tax_rate_nominal: Some(0.5),
            ..Entity::named("Boone")
        };
        let sentence = narrate_metric(&entity, Metric::AdjustedTaxRate)
            .sentence
            .expect("sentence present");
        assert!(!sentence.contains("nominal"));
    }

    #[test]
    fn fund_balance_facts_skip_absent_fields() {
        let entity = Entity {
            has_audit_data: true,
            fba_pct: Some(0.12),
            fba_dollars: Some(3_400_000.0),
            gf_excess: Some(-250_000.0),
            ..Entity::named("Dunn")
        };
        let narrative = narrate_metric(&entity, Metric::FundBalancePct);
        let facts: Vec<(&str, &str, Option<&str>)> = narrative
            .facts
            .iter()
            .map(|fact| (fact.label, fact.value.as_str(), fact.note.as_deref()))
            .collect();
        assert_eq!(
            facts,
            vec![
                ("Fund Balance Available", "$3.4M", None),
                ("FBA as % of Net Expenditures", "12.0%", Some("Above LGC minimum")),
                ("Operating Surplus / (Deficit)", "$-250K", Some("Deficit")),
            ]
        );
    }

    #[test]
    fn missing_headline_value_drops_companion_facts() {
        let entity = Entity {
            fba_dollars: Some(1_000.0),
            ..Entity::named("Dunn")
        };
        assert!(narrate_metric(&entity, Metric::FundBalancePct).is_empty());
    }
}
