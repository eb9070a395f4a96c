use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::format;
use crate::dataset::Entity;

/// Every figure the comparator can rank, narrate, or plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    FundBalancePct,
    FundBalanceAvailable,
    OperatingSurplus,
    GeneralFundRevenues,
    GeneralFundExpenditures,
    FundBalancePerCapita,
    AdjustedTaxRate,
    NominalTaxRate,
    RevaluationYear,
    AssessedValuation,
    AssessedValuePerCapita,
    Population,
}

/// Display shape applied to a metric's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFormat {
    Currency,
    Compact,
    PercentFraction,
    PercentValue,
    Rate,
    Population,
    Year,
}

impl MetricFormat {
    pub fn apply(self, value: Option<f64>) -> String {
        match self {
            Self::Currency => format::currency(value),
            Self::Compact => format::compact_currency(value),
            Self::PercentFraction => format::percent_fraction(value, 1),
            Self::PercentValue => format::percent_value(value, 1),
            Self::Rate => format::rate(value),
            Self::Population => format::population(value),
            Self::Year => match value {
                Some(year) => format::fixed(year, 0),
                None => format::NOT_AVAILABLE.to_string(),
            },
        }
    }
}

/// Fixed statutory line a metric is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threshold {
    pub value: f64,
    pub label: &'static str,
    pub meets_sentence: &'static str,
    pub below_sentence: &'static str,
    pub meets_note: &'static str,
    pub below_note: &'static str,
}

impl Threshold {
    pub fn is_met_by(&self, value: f64) -> bool {
        value >= self.value
    }
}

/// Local Government Commission guidance: fund balance available should cover at least 8%
/// of general fund net expenditures.
pub const LGC_FUND_BALANCE_MINIMUM: Threshold = Threshold {
    value: 8.0,
    label: "LGC 8% Min",
    meets_sentence: "This exceeds the LGC's recommended minimum of 8%.",
    below_sentence: "This is below the LGC's recommended minimum of 8%.",
    meets_note: "Above LGC minimum",
    below_note: "Below LGC 8% minimum",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Threshold,
    GroupAverage,
    StateAverage,
}

/// Vertical marker drawn across a ranked chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub kind: ReferenceKind,
    pub value: f64,
    pub label: String,
}

impl Metric {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::FundBalancePct,
            Self::FundBalanceAvailable,
            Self::OperatingSurplus,
            Self::GeneralFundRevenues,
            Self::GeneralFundExpenditures,
            Self::FundBalancePerCapita,
            Self::AdjustedTaxRate,
            Self::NominalTaxRate,
            Self::RevaluationYear,
            Self::AssessedValuation,
            Self::AssessedValuePerCapita,
            Self::Population,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::FundBalancePct => "fund_balance_pct",
            Self::FundBalanceAvailable => "fund_balance_available",
            Self::OperatingSurplus => "operating_surplus",
            Self::GeneralFundRevenues => "general_fund_revenues",
            Self::GeneralFundExpenditures => "general_fund_expenditures",
            Self::FundBalancePerCapita => "fund_balance_per_capita",
            Self::AdjustedTaxRate => "adjusted_tax_rate",
            Self::NominalTaxRate => "nominal_tax_rate",
            Self::RevaluationYear => "revaluation_year",
            Self::AssessedValuation => "assessed_valuation",
            Self::AssessedValuePerCapita => "assessed_value_per_capita",
            Self::Population => "population",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FundBalancePct => "FBA as % of Net Expenditures",
            Self::FundBalanceAvailable => "Fund Balance Available",
            Self::OperatingSurplus => "Operating Surplus / (Deficit)",
            Self::GeneralFundRevenues => "GF Revenues",
            Self::GeneralFundExpenditures => "GF Expenditures",
            Self::FundBalancePerCapita => "FBA per Capita",
            Self::AdjustedTaxRate => "Adjusted Tax Rate",
            Self::NominalTaxRate => "Nominal Tax Rate",
            Self::RevaluationYear => "Latest Revaluation Year",
            Self::AssessedValuation => "Assessed Valuation (Adjusted)",
            Self::AssessedValuePerCapita => "AV per Capita",
            Self::Population => "Population",
        }
    }

    /// Lower-case phrase used inside sentences.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::FundBalancePct => "fund balance",
            Self::FundBalanceAvailable => "fund balance available",
            Self::OperatingSurplus => "operating surplus",
            Self::GeneralFundRevenues => "general fund revenue",
            Self::GeneralFundExpenditures => "general fund expenditure",
            Self::FundBalancePerCapita => "fund balance per capita",
            Self::AdjustedTaxRate => "adjusted tax rate",
            Self::NominalTaxRate => "nominal tax rate",
            Self::RevaluationYear => "latest revaluation year",
            Self::AssessedValuation => "adjusted assessed valuation",
            Self::AssessedValuePerCapita => "assessed value",
            Self::Population => "population",
        }
    }

    pub const fn unit(self) -> Option<&'static str> {
        match self {
            Self::AdjustedTaxRate | Self::NominalTaxRate => Some("$100 of assessed value"),
            Self::AssessedValuePerCapita | Self::FundBalancePerCapita => Some("resident"),
            _ => None,
        }
    }

    pub const fn format(self) -> MetricFormat {
        match self {
            Self::FundBalancePct => MetricFormat::PercentValue,
            Self::FundBalanceAvailable
            | Self::OperatingSurplus
            | Self::GeneralFundRevenues
            | Self::GeneralFundExpenditures => MetricFormat::Compact,
            Self::FundBalancePerCapita
            | Self::AssessedValuation
            | Self::AssessedValuePerCapita => MetricFormat::Currency,
            Self::AdjustedTaxRate | Self::NominalTaxRate => MetricFormat::Rate,
            Self::RevaluationYear => MetricFormat::Year,
            Self::Population => MetricFormat::Population,
        }
    }

    /// Metrics that only exist for units that filed an audit.
    pub const fn requires_audit(self) -> bool {
        matches!(
            self,
            Self::FundBalancePct
                | Self::FundBalanceAvailable
                | Self::OperatingSurplus
                | Self::GeneralFundRevenues
                | Self::GeneralFundExpenditures
                | Self::FundBalancePerCapita
        )
    }

    pub const fn threshold(self) -> Option<Threshold> {
        match self {
            Self::FundBalancePct => Some(LGC_FUND_BALANCE_MINIMUM),
            _ => None,
        }
    }

    /// Value on the display scale (fund balance fractions become percentage points).
    pub fn extract(self, entity: &Entity) -> Option<f64> {
        match self {
            Self::FundBalancePct => entity.fba_pct.map(as_percentage_points),
            Self::FundBalanceAvailable => entity.fba_dollars,
            Self::OperatingSurplus => entity.gf_excess,
            Self::GeneralFundRevenues => entity.gf_revenues,
            Self::GeneralFundExpenditures => entity.gf_expenditures,
            Self::FundBalancePerCapita => entity.fba_per_capita,
            Self::AdjustedTaxRate => entity.tax_rate_adj,
            Self::NominalTaxRate => entity.tax_rate_nominal,
            Self::RevaluationYear => entity.reval_year.map(f64::from),
            Self::AssessedValuation => entity.assessed_val_adj,
            Self::AssessedValuePerCapita => entity.av_per_capita,
            Self::Population => entity.population.map(|population| population as f64),
        }
        .filter(|value| value.is_finite())
    }

    pub fn group_average(self, entity: &Entity) -> Option<f64> {
        match self {
            Self::FundBalancePct => entity.fba_pct_group_avg.map(as_percentage_points),
            Self::AdjustedTaxRate => entity.tax_rate_adj_group_avg,
            _ => None,
        }
        .filter(|value| value.is_finite())
    }

    pub fn state_average(self, entity: &Entity) -> Option<f64> {
        match self {
            Self::FundBalancePct => entity.fba_pct_state_avg.map(as_percentage_points),
            Self::AdjustedTaxRate => entity.tax_rate_adj_state_avg,
            _ => None,
        }
        .filter(|value| value.is_finite())
    }

    pub fn display(self, value: Option<f64>) -> String {
        self.format().apply(value)
    }

    /// Threshold first, then group and state averages when the entity carries them.
    pub fn reference_lines(self, entity: &Entity) -> Vec<ReferenceLine> {
        let mut lines = Vec::new();
        if let Some(threshold) = self.threshold() {
            lines.push(ReferenceLine {
                kind: ReferenceKind::Threshold,
                value: threshold.value,
                label: threshold.label.to_string(),
            });
        }
        if let Some(value) = self.group_average(entity) {
            lines.push(ReferenceLine {
                kind: ReferenceKind::GroupAverage,
                value,
                label: format!("Group Avg ({})", self.display(Some(value))),
            });
        }
        if let Some(value) = self.state_average(entity) {
            lines.push(ReferenceLine {
                kind: ReferenceKind::StateAverage,
                value,
                label: format!("State Avg ({})", self.display(Some(value))),
            });
        }
        lines
    }
}

fn as_percentage_points(fraction: f64) -> f64 {
    fraction * 100.0
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric '{0}'")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|metric| metric.key() == normalized)
            .ok_or_else(|| UnknownMetric(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> Entity {
        Entity {
            fba_pct: Some(0.125),
            fba_pct_group_avg: Some(0.08),
            tax_rate_adj: Some(0.52),
            tax_rate_adj_state_avg: Some(0.48),
            reval_year: Some(2021),
            population: Some(4200),
            ..Entity::named("Apex")
        }
    }

    #[test]
    fn keys_round_trip_through_from_str() {
        for metric in Metric::ordered() {
            assert_eq!(metric.key().parse::<Metric>(), Ok(metric));
        }
        assert_eq!("Adjusted-Tax-Rate".parse::<Metric>(), Ok(Metric::AdjustedTaxRate));
        assert_eq!(
            "tax".parse::<Metric>(),
            Err(UnknownMetric("tax".to_string()))
        );
    }

    #[test]
    fn fund_balance_is_scaled_to_percentage_points() {
        let entity = entity();
        assert_eq!(Metric::FundBalancePct.extract(&entity), Some(12.5));
        assert_eq!(Metric::FundBalancePct.group_average(&entity), Some(8.0));
        assert_eq!(Metric::FundBalancePct.state_average(&entity), None);
    }

    #[test]
    fn integer_fields_are_exposed_as_numbers() {
        let entity = entity();
        assert_eq!(Metric::RevaluationYear.extract(&entity), Some(2021.0));
        assert_eq!(Metric::RevaluationYear.display(Some(2021.0)), "2021");
        assert_eq!(Metric::Population.extract(&entity), Some(4200.0));
    }

    #[test]
    fn non_finite_values_are_treated_as_absent() {
        let entity = Entity {
            tax_rate_adj: Some(f64::NAN),
            ..Entity::named("Broken")
        };
        assert_eq!(Metric::AdjustedTaxRate.extract(&entity), None);
    }

    #[test]
    fn reference_lines_list_threshold_then_averages() {
        let lines = Metric::FundBalancePct.reference_lines(&entity());
        let labels: Vec<&str> = lines.iter().map(|line| line.label.as_str()).collect();
        assert_eq!(labels, vec!["LGC 8% Min", "Group Avg (8.0%)"]);

        let lines = Metric::AdjustedTaxRate.reference_lines(&entity());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, ReferenceKind::StateAverage);
        assert_eq!(lines[0].label, "State Avg ($0.4800)");
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(LGC_FUND_BALANCE_MINIMUM.is_met_by(8.0));
        assert!(!LGC_FUND_BALANCE_MINIMUM.is_met_by(7.99));
    }
}
