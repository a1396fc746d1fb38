use std::io;
use std::process::ExitCode;
use std::time::Instant;

use coinglance_core::{FetchState, MarketDataSource, UtcDateTime, ViewStateController};

use crate::cli::{Cli, QueryArgs};
use crate::error::CliError;
use crate::output::{self, ReportMeta};

use super::FETCH_FAILED_EXIT;

const RETRY_HINT: &str = "Run the command again to retry.";

pub async fn run(
    cli: &Cli,
    args: &QueryArgs,
    source: &dyn MarketDataSource,
    per_page: usize,
) -> Result<ExitCode, CliError> {
    let mut controller = ViewStateController::new();

    let started = Instant::now();
    controller.load(source, per_page).await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let meta = ReportMeta {
        generated_at: UtcDateTime::now(),
        latency_ms,
        source: source.name(),
        query: args.query.clone(),
        skipped: controller.snapshot().map_or(0, |snapshot| snapshot.skipped),
    };
    let view = controller.view(&args.query);

    let stdout = io::stdout();
    output::render(
        &mut stdout.lock(),
        &view,
        &meta,
        cli.format,
        cli.pretty,
        RETRY_HINT,
    )?;

    if matches!(controller.current_state(), FetchState::Failed(_)) {
        return Ok(ExitCode::from(FETCH_FAILED_EXIT));
    }
    Ok(ExitCode::SUCCESS)
}
