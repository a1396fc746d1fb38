//! Fetch lifecycle state machine.
//!
//! ```text
//!   Idle ──load──▶ Loading ──success──▶ Loaded(snapshot)
//!                     │    ──failure──▶ Failed(reason)
//!   Loaded ──load──▶ Loading
//!   Failed ──load──▶ Loading
//! ```
//!
//! Loads are issued as [`LoadTicket`]s. A `load` while one is in flight is
//! coalesced into the running one, and a response whose ticket is not the
//! latest is discarded.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::formatter::CoinCard;
use crate::market_source::{FetchError, MarketDataSource};
use crate::{Coin, MarketSnapshot};

/// Placeholder rows rendered while a load is in flight.
pub const SKELETON_ROWS: usize = 5;

/// Lifecycle of the market snapshot. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded(MarketSnapshot),
    Failed(String),
}

impl FetchState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Sequence number identifying one issued load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// What the presentation layer should draw for a given query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    Idle,
    Loading { placeholders: usize },
    Error { message: String },
    /// Loaded, but nothing matches the query.
    Empty { query: String },
    Coins { cards: Vec<CoinCard> },
}

/// Owns the [`FetchState`] and derives the visible coin list from it.
///
/// The controller is not shared between threads: a single UI loop owns it
/// and applies fetch results as they arrive.
#[derive(Debug, Default)]
pub struct ViewStateController {
    state: FetchState,
    latest_ticket: u64,
}

impl ViewStateController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    /// Snapshot of the last successful load, if that is the current state.
    pub fn snapshot(&self) -> Option<&MarketSnapshot> {
        match &self.state {
            FetchState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Enters `Loading` and returns the ticket the response must carry.
    ///
    /// Returns `None` without touching state when a load is already running.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.is_loading() {
            debug!(ticket = self.latest_ticket, "load coalesced into in-flight request");
            return None;
        }

        self.latest_ticket += 1;
        info!(
            from = self.state.as_str(),
            ticket = self.latest_ticket,
            "loading market snapshot"
        );
        self.state = FetchState::Loading;
        Some(LoadTicket(self.latest_ticket))
    }

    /// Applies a fetch result. Returns `false` when the result was stale.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<MarketSnapshot, FetchError>,
    ) -> bool {
        if ticket.0 != self.latest_ticket || !self.is_loading() {
            warn!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                state = self.state.as_str(),
                "ignoring stale market response"
            );
            return false;
        }

        self.state = match result {
            Ok(snapshot) => {
                info!(coins = snapshot.len(), ticket = ticket.0, "market snapshot loaded");
                FetchState::Loaded(snapshot)
            }
            Err(error) => {
                info!(code = error.code(), ticket = ticket.0, "market snapshot failed: {error}");
                FetchState::Failed(error.message().to_owned())
            }
        };
        true
    }

    /// Runs one complete load against `source`.
    ///
    /// Returns `false` if the load was coalesced or its result discarded.
    pub async fn load(&mut self, source: &dyn MarketDataSource, n: usize) -> bool {
        let Some(ticket) = self.begin_load() else {
            return false;
        };
        let result = source.fetch_top(n).await;
        self.complete(ticket, result)
    }

    /// Coins of the loaded snapshot matching `query`; empty in any other state.
    pub fn visible_coins(&self, query: &str) -> Vec<Coin> {
        self.snapshot()
            .map(|snapshot| snapshot.filtered(query).coins)
            .unwrap_or_default()
    }

    pub fn view(&self, query: &str) -> DashboardView {
        match &self.state {
            FetchState::Idle => DashboardView::Idle,
            FetchState::Loading => DashboardView::Loading {
                placeholders: SKELETON_ROWS,
            },
            FetchState::Failed(message) => DashboardView::Error {
                message: message.clone(),
            },
            FetchState::Loaded(_) => {
                let coins = self.visible_coins(query);
                if coins.is_empty() {
                    DashboardView::Empty {
                        query: query.to_owned(),
                    }
                } else {
                    DashboardView::Coins {
                        cards: coins.iter().map(CoinCard::from).collect(),
                    }
                }
            }
        }
    }
}
