use std::fmt::Write as _;
use std::io;

use fiscal_peers::comparison::{
    ComparisonReport, ComparisonService, PanelView, RowEmphasis, SearchHit,
};
use fiscal_peers::error::AppError;

use crate::cli::{CompareArgs, RankArgs, SearchArgs};
use crate::export::export_ranking;
use crate::infra::bootstrap;

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let service = open(args.data.data)?;
    let report = service.report(&args.unit).ok_or_else(|| unresolved(&args.unit))?;

    if args.json {
        let rendered = serde_json::to_string_pretty(report.as_ref()).map_err(io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let service = open(args.data.data)?;
    let hits = service.search(args.query.as_deref().unwrap_or_default(), args.limit);
    print!("{}", render_search(&hits));
    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let service = open(args.data.data)?;
    let panel = service
        .panel(&args.unit, args.metric)
        .ok_or_else(|| unresolved(&args.unit))?;

    print!("{}", render_panel(&panel));

    if let Some(path) = args.csv {
        match &panel.chart {
            Some(chart) => {
                export_ranking(&path, args.metric, chart)?;
                println!("\nRanking written to {}", path.display());
            }
            None => println!("\nNo ranked series to export."),
        }
    }
    Ok(())
}

fn open(data: Option<std::path::PathBuf>) -> Result<std::sync::Arc<ComparisonService>, AppError> {
    bootstrap(data).map(|(_, service)| service)
}

fn unresolved(unit: &str) -> AppError {
    AppError::UnknownMunicipality(unit.to_string())
}

pub(crate) fn render_report(report: &ComparisonReport) -> String {
    let profile = &report.profile;
    let mut out = String::new();

    let _ = writeln!(out, "{}", profile.name);
    let _ = writeln!(
        out,
        "Group: {} | County: {} | Population: {} | {}",
        profile.group.as_deref().unwrap_or("Unassigned"),
        profile.dominant_county,
        profile.population,
        profile.peer_count_label
    );
    if let Some(notice) = profile.audit_notice {
        let _ = writeln!(out, "Note: {notice}");
    }

    for panel in [&report.fund_balance, &report.tax_rate] {
        out.push('\n');
        out.push_str(&render_panel(panel));
    }

    let scatter = &report.scatter;
    let _ = writeln!(
        out,
        "\n{} vs {}",
        scatter.x_metric.label(),
        scatter.y_metric.label()
    );
    match scatter.notice {
        Some(notice) => {
            let _ = writeln!(out, "{notice}");
        }
        None => {
            for point in scatter
                .stage
                .selected_series
                .iter()
                .chain(&scatter.stage.peer_series)
            {
                let _ = writeln!(
                    out,
                    "- {}: {} / {}",
                    point.name,
                    scatter.x_metric.display(Some(point.x)),
                    scatter.y_metric.display(Some(point.y))
                );
            }
        }
    }

    out
}

pub(crate) fn render_panel(panel: &PanelView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", panel.title);
    let _ = writeln!(out, "{}", panel.subtitle);

    if let Some(sentence) = &panel.narrative.sentence {
        let _ = writeln!(out, "{sentence}");
    }
    for fact in &panel.narrative.facts {
        match &fact.note {
            Some(note) => {
                let _ = writeln!(out, "- {}: {} ({note})", fact.label, fact.value);
            }
            None => {
                let _ = writeln!(out, "- {}: {}", fact.label, fact.value);
            }
        }
    }

    if let Some(notice) = &panel.notice {
        let _ = writeln!(out, "[{}] {}", notice.kind.label(), notice.message);
    }

    if let Some(chart) = &panel.chart {
        let _ = writeln!(out, "Ranking");
        for (index, row) in chart.rows.iter().enumerate() {
            let marker = match row.emphasis {
                RowEmphasis::Selected => " <",
                RowEmphasis::Muted => " (no audit)",
                RowEmphasis::Peer => "",
            };
            let _ = writeln!(
                out,
                "{:>3}. {} {}{}",
                index + 1,
                row.name,
                panel.metric.display(row.value),
                marker
            );
        }
        for line in &chart.reference_lines {
            let _ = writeln!(out, "  | {}", line.label);
        }
    }

    out
}

pub(crate) fn render_search(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No municipalities matched.\n".to_string();
    }

    let mut out = String::new();
    for hit in hits {
        match &hit.dominant_county {
            Some(county) => {
                let _ = writeln!(out, "{} ({county} County)", hit.name);
            }
            None => {
                let _ = writeln!(out, "{}", hit.name);
            }
        }
    }
    out
}
