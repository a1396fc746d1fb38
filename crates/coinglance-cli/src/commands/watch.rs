//! Interactive dashboard loop.
//!
//! The loop is the only owner of the [`ViewStateController`]. Fetches run on
//! spawned tasks and report back through a channel tagged with their ticket,
//! so state is only ever mutated from here.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use coinglance_core::{
    FetchError, LoadTicket, MarketDataSource, MarketSnapshot, UtcDateTime, ViewStateController,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::cli::{Cli, QueryArgs};
use crate::error::CliError;
use crate::output::{self, ReportMeta};

const RETRY_HINT: &str = "Type :r to retry.";

type LoadOutcome = (LoadTicket, Result<MarketSnapshot, FetchError>);

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum WatchInput {
    Reload,
    Quit,
    Query(String),
}

impl WatchInput {
    fn parse(line: &str) -> Self {
        match line.trim() {
            ":r" | ":retry" | ":refresh" => Self::Reload,
            ":q" | ":quit" => Self::Quit,
            _ => Self::Query(line.to_owned()),
        }
    }
}

struct Dashboard<'a> {
    cli: &'a Cli,
    source: Arc<dyn MarketDataSource>,
    per_page: usize,
    controller: ViewStateController,
    query: String,
    outcomes: mpsc::UnboundedSender<LoadOutcome>,
    load_started: Option<Instant>,
    latency_ms: u64,
}

impl<'a> Dashboard<'a> {
    fn new(
        cli: &'a Cli,
        source: Arc<dyn MarketDataSource>,
        per_page: usize,
        query: String,
        outcomes: mpsc::UnboundedSender<LoadOutcome>,
    ) -> Self {
        Self {
            cli,
            source,
            per_page,
            controller: ViewStateController::new(),
            query,
            outcomes,
            load_started: None,
            latency_ms: 0,
        }
    }

    /// Starts a fetch task unless one is already running.
    fn reload(&mut self) -> bool {
        let Some(ticket) = self.controller.begin_load() else {
            return false;
        };

        let source = Arc::clone(&self.source);
        let outcomes = self.outcomes.clone();
        let per_page = self.per_page;
        tokio::spawn(async move {
            let result = source.fetch_top(per_page).await;
            // The receiver only goes away when the dashboard has quit.
            let _ = outcomes.send((ticket, result));
        });

        self.load_started = Some(Instant::now());
        true
    }

    fn apply(&mut self, (ticket, result): LoadOutcome) -> bool {
        let applied = self.controller.complete(ticket, result);
        if applied {
            if let Some(started) = self.load_started.take() {
                self.latency_ms = started.elapsed().as_millis() as u64;
            }
        }
        applied
    }

    fn render(&self) -> Result<(), CliError> {
        let meta = ReportMeta {
            generated_at: UtcDateTime::now(),
            latency_ms: self.latency_ms,
            source: self.source.name(),
            query: self.query.clone(),
            skipped: self
                .controller
                .snapshot()
                .map_or(0, |snapshot| snapshot.skipped),
        };
        let view = self.controller.view(&self.query);

        let stdout = io::stdout();
        output::render(
            &mut stdout.lock(),
            &view,
            &meta,
            self.cli.format,
            self.cli.pretty,
            RETRY_HINT,
        )
    }
}

pub async fn run(
    cli: &Cli,
    args: &QueryArgs,
    source: Arc<dyn MarketDataSource>,
    per_page: usize,
) -> Result<ExitCode, CliError> {
    let (outcomes, mut results) = mpsc::unbounded_channel();
    let mut dashboard = Dashboard::new(cli, source, per_page, args.query.clone(), outcomes);

    dashboard.reload();
    dashboard.render()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(outcome) = results.recv() => {
                if dashboard.apply(outcome) {
                    dashboard.render()?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("input closed");
                    break;
                };
                match WatchInput::parse(&line) {
                    WatchInput::Quit => break,
                    WatchInput::Reload => {
                        if dashboard.reload() {
                            dashboard.render()?;
                        }
                    }
                    WatchInput::Query(query) => {
                        dashboard.query = query;
                        dashboard.render()?;
                    }
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
