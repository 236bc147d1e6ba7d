//! Intent-driven workflow state machines consumed by the presentation layer.
//!
//! # Design
//! Each workflow owns one state value behind a mutex and advances it through
//! `idle → loading → {success, error}` in response to intents. The mutex is
//! only held for synchronous mutation, never across an await, so transitions
//! are applied in the order the triggering calls settle. At most one call is
//! in flight per workflow: an intent that arrives while `Loading` is ignored
//! until the pending call resolves.
//!
//! Workflows depend on the narrow [`ItemSearcher`] / [`HealthProber`] traits
//! rather than the concrete services, so tests drive the state machines with
//! scripted stubs and no network.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::health::HealthService;
use crate::items::ItemsService;
use crate::types::{EveItem, HealthSnapshot};

/// Lifecycle phase of a workflow. Re-entrant: `Success` and `Error` are both
/// interruptible by the next intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Item search as the search workflow consumes it.
#[async_trait]
pub trait ItemSearcher: Send + Sync {
    async fn search_items(&self, query: &str) -> Result<Vec<EveItem>, ApiError>;
}

#[async_trait]
impl ItemSearcher for ItemsService {
    async fn search_items(&self, query: &str) -> Result<Vec<EveItem>, ApiError> {
        ItemsService::search_items(self, query).await
    }
}

/// Health probing as the health-probe workflow consumes it.
#[async_trait]
pub trait HealthProber: Send + Sync {
    async fn get_health_status(&self) -> Result<HealthSnapshot, ApiError>;
}

#[async_trait]
impl HealthProber for HealthService {
    async fn get_health_status(&self) -> Result<HealthSnapshot, ApiError> {
        HealthService::get_health_status(self).await
    }
}

/// Observable state of the search workflow.
///
/// `results` is non-empty only in `Success`; `error` is `Some` only in
/// `Error`. The two are never populated at the same time.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub phase: Phase,
    pub query: String,
    pub results: Vec<EveItem>,
    pub error: Option<String>,
}

impl SearchState {
    fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            query: String::new(),
            results: Vec::new(),
            error: None,
        }
    }
}

type SelectionListener = Box<dyn Fn(&EveItem) + Send + Sync>;

/// The search-and-select workflow.
///
/// Intents: [`submit`](Self::submit) drives the state machine,
/// [`select_item`](Self::select_item) notifies the collaborator installed
/// with [`on_item_select`](Self::on_item_select) and never touches state.
pub struct SearchWorkflow {
    items: Arc<dyn ItemSearcher>,
    state: Mutex<SearchState>,
    on_select: Option<SelectionListener>,
}

impl SearchWorkflow {
    pub fn new(items: Arc<dyn ItemSearcher>) -> Self {
        Self {
            items,
            state: Mutex::new(SearchState::idle()),
            on_select: None,
        }
    }

    /// Install the collaborator notified on item selection.
    pub fn on_item_select(mut self, listener: impl Fn(&EveItem) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Box::new(listener));
        self
    }

    /// Read-only snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.lock().clone()
    }

    /// Run a search for `query` and settle into `Success` or `Error`.
    ///
    /// A blank query fails locally without touching the network. While a
    /// search is in flight the intent is ignored.
    pub async fn submit(&self, query: &str) {
        {
            let mut state = self.lock();
            if state.phase == Phase::Loading {
                return;
            }
            if query.trim().is_empty() {
                *state = SearchState {
                    phase: Phase::Error,
                    query: query.to_string(),
                    results: Vec::new(),
                    error: Some("Please enter a search term".to_string()),
                };
                return;
            }
            state.phase = Phase::Loading;
            state.query = query.to_string();
            state.error = None;
        }

        let outcome = self.items.search_items(query).await;

        let mut state = self.lock();
        match outcome {
            Ok(items) if items.is_empty() => {
                state.phase = Phase::Error;
                state.results = Vec::new();
                state.error = Some(format!("No items found for \"{query}\""));
            }
            Ok(items) => {
                state.phase = Phase::Success;
                state.results = items;
                state.error = None;
            }
            Err(err) => {
                state.phase = Phase::Error;
                state.results = Vec::new();
                state.error = Some(format!("Search failed: {}", err.message));
            }
        }
    }

    /// Forward `item` to the selection collaborator. Independent of phase;
    /// performs no transition.
    pub fn select_item(&self, item: &EveItem) {
        if let Some(listener) = &self.on_select {
            listener(item);
        }
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().expect("search state lock poisoned")
    }
}

/// Observable state of the health-probe workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeState {
    pub phase: Phase,
    pub health: Option<HealthSnapshot>,
    pub error: Option<String>,
}

impl ProbeState {
    fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            health: None,
            error: None,
        }
    }
}

/// The backend health-probe workflow.
///
/// [`run`](Self::run) is the startup probe, called once when the session
/// begins; [`retry`](Self::retry) re-runs it from `Success` or `Error`.
pub struct HealthProbeWorkflow {
    health: Arc<dyn HealthProber>,
    state: Mutex<ProbeState>,
}

impl HealthProbeWorkflow {
    pub fn new(health: Arc<dyn HealthProber>) -> Self {
        Self {
            health,
            state: Mutex::new(ProbeState::idle()),
        }
    }

    /// Read-only snapshot of the current state.
    pub fn state(&self) -> ProbeState {
        self.lock().clone()
    }

    /// The startup probe.
    pub async fn run(&self) {
        self.probe().await;
    }

    /// Explicit user-triggered re-probe.
    pub async fn retry(&self) {
        self.probe().await;
    }

    async fn probe(&self) {
        {
            let mut state = self.lock();
            if state.phase == Phase::Loading {
                return;
            }
            state.phase = Phase::Loading;
            state.error = None;
        }

        let outcome = self.health.get_health_status().await;

        let mut state = self.lock();
        match outcome {
            Ok(snapshot) => {
                state.phase = Phase::Success;
                state.health = Some(snapshot);
                state.error = None;
            }
            Err(err) => {
                state.phase = Phase::Error;
                state.health = None;
                state.error = Some(format!("Backend Error: {}", err.message));
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProbeState> {
        self.state.lock().expect("probe state lock poisoned")
    }
}
