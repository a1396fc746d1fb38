use std::io::Write;

use coinglance_core::{ChangeClass, CoinCard, DashboardView, UtcDateTime};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

const TITLE: &str = "Crypto Tracker";
const SKELETON_ROW: &str = "░░░░░░░░░░░░░░░░  ░░░░░    ░░░░░░░░░░░░  ░░░░░░░";

/// Metadata printed alongside every rendered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMeta {
    pub generated_at: UtcDateTime,
    pub latency_ms: u64,
    pub source: &'static str,
    pub query: String,
    /// Upstream records dropped from the current snapshot.
    pub skipped: usize,
}

#[derive(Serialize)]
struct Report<'a> {
    meta: &'a ReportMeta,
    data: &'a DashboardView,
}

pub fn render<W: Write>(
    out: &mut W,
    view: &DashboardView,
    meta: &ReportMeta,
    format: OutputFormat,
    pretty: bool,
    retry_hint: &str,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let report = Report { meta, data: view };
            let payload = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => render_table(out, view, meta, retry_hint)?,
    }

    out.flush()?;
    Ok(())
}

fn render_table<W: Write>(
    out: &mut W,
    view: &DashboardView,
    meta: &ReportMeta,
    retry_hint: &str,
) -> Result<(), CliError> {
    writeln!(out, "{TITLE}")?;
    if !meta.query.trim().is_empty() {
        writeln!(out, "Search: {:?}", meta.query)?;
    }
    writeln!(out)?;

    match view {
        DashboardView::Idle => writeln!(out, "Waiting for market data...")?,
        DashboardView::Loading { placeholders } => {
            for _ in 0..*placeholders {
                writeln!(out, "{SKELETON_ROW}")?;
            }
        }
        DashboardView::Error { message } => {
            writeln!(out, "Error: {message}")?;
            writeln!(out, "{retry_hint}")?;
        }
        DashboardView::Empty { .. } => writeln!(out, "No coins found.")?,
        DashboardView::Coins { cards } => {
            writeln!(
                out,
                "{:<24} {:<8} {:>18} {:>12}",
                "NAME", "SYMBOL", "PRICE", "24H"
            )?;
            for card in cards {
                writeln!(out, "{}", card_row(card))?;
            }
            if meta.skipped > 0 {
                writeln!(out, "({} malformed records hidden)", meta.skipped)?;
            }
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "© {} {TITLE}. All rights reserved.",
        meta.generated_at.year()
    )?;
    Ok(())
}

fn card_row(card: &CoinCard) -> String {
    format!(
        "{:<24} {:<8} {:>18} {:>12} {}",
        card.name,
        card.symbol,
        card.price,
        card.change.text,
        change_marker(card.change.class)
    )
}

fn change_marker(class: ChangeClass) -> &'static str {
    match class {
        ChangeClass::Positive => "[+]",
        ChangeClass::Negative => "[-]",
        ChangeClass::Unknown => "[?]",
    }
}
