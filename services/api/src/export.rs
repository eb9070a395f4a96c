use std::io;
use std::path::Path;

use fiscal_peers::comparison::{Metric, RowEmphasis, StagedChart};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RankRecord<'a> {
    rank: usize,
    municipality: &'a str,
    metric: &'static str,
    value: Option<f64>,
    display: String,
    selected: bool,
    audited: bool,
}

/// Write the staged rows in rank order; absent values leave the `value` cell empty.
pub(crate) fn write_ranking<W: io::Write>(
    writer: W,
    metric: Metric,
    chart: &StagedChart,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for (index, row) in chart.rows.iter().enumerate() {
        writer.serialize(RankRecord {
            rank: index + 1,
            municipality: &row.name,
            metric: metric.key(),
            value: row.value,
            display: metric.display(row.value),
            selected: row.emphasis == RowEmphasis::Selected,
            audited: row.emphasis != RowEmphasis::Muted,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn export_ranking(path: &Path, metric: Metric, chart: &StagedChart) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_ranking(file, metric, chart).map_err(io::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiscal_peers::comparison::{stage, ChartEntry, StageOptions};

    #[test]
    fn ranking_rows_follow_staged_order() {
        let chart = stage(
            vec![
                ChartEntry {
                    name: "Sylva".to_string(),
                    value: Some(0.41),
                    has_audit_data: true,
                },
                ChartEntry {
                    name: "Dillsboro".to_string(),
                    value: None,
                    has_audit_data: false,
                },
                ChartEntry {
                    name: "Webster".to_string(),
                    value: Some(0.56),
                    has_audit_data: true,
                },
            ],
            Some("Sylva"),
            Vec::new(),
            &StageOptions::default(),
        );

        let mut buffer = Vec::new();
        write_ranking(&mut buffer, Metric::AdjustedTaxRate, &chart).expect("csv written");
        let output = String::from_utf8(buffer).expect("utf-8 output");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines,
            vec![
                "rank,municipality,metric,value,display,selected,audited",
                "1,Webster,adjusted_tax_rate,0.56,$0.5600,false,true",
                "2,Sylva,adjusted_tax_rate,0.41,$0.4100,true,true",
                "3,Dillsboro,adjusted_tax_rate,,N/A,false,false",
            ]
        );
    }
}
