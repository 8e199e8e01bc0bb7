use crate::config::TongsConfig;
use crate::dom::{ChangeEvent, Document, SelectControl};
use crate::domain::{SelectOption, SubtypeRequest, build_request, parse_options, with_placeholder};
use crate::error::UpdateError;
use crate::token::TokenProvider;
use crate::transport::Transport;
use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdaterState {
    Idle,
    Updating,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The dependent control now holds `options` entries, placeholder included.
    Applied { sequence: u64, options: usize },
    /// A newer request was issued before this one completed.
    Stale { sequence: u64, latest: u64 },
    /// Logged and dropped; the dependent control was not touched.
    Failed { sequence: u64 },
}

/// Keeps a dependent select in sync with its source select.
#[derive(Clone)]
pub struct DependentSelect {
    inner: Arc<Inner>,
}

struct Inner {
    config: TongsConfig,
    source: Arc<dyn SelectControl>,
    dependent: Arc<dyn SelectControl>,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenProvider>,
    issued: AtomicU64,
    applied: Mutex<u64>,
    in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl DependentSelect {
    /// Locates both controls on the document. Fails if either id is absent.
    pub fn attach(
        document: &dyn Document,
        config: TongsConfig,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, UpdateError> {
        let source = document
            .select_by_id(&config.source_id)
            .ok_or_else(|| UpdateError::MissingElement(config.source_id.clone()))?;
        let dependent = document
            .select_by_id(&config.dependent_id)
            .ok_or_else(|| UpdateError::MissingElement(config.dependent_id.clone()))?;

        tracing::debug!(
            "attached '#{}' -> '#{}' ({} {})",
            config.source_id,
            config.dependent_id,
            config.mode,
            config.endpoint
        );

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                source,
                dependent,
                transport,
                tokens,
                issued: AtomicU64::new(0),
                applied: Mutex::new(0),
                in_flight: AtomicUsize::new(0),
            }),
        })
    }

    pub fn config(&self) -> &TongsConfig {
        &self.inner.config
    }

    pub fn source(&self) -> &Arc<dyn SelectControl> {
        &self.inner.source
    }

    pub fn dependent(&self) -> &Arc<dyn SelectControl> {
        &self.inner.dependent
    }

    pub fn state(&self) -> UpdaterState {
        if self.inner.in_flight.load(Ordering::SeqCst) == 0 {
            UpdaterState::Idle
        } else {
            UpdaterState::Updating
        }
    }

    /// Sequence number of the most recently issued request.
    pub fn latest_sequence(&self) -> u64 {
        self.inner.issued.load(Ordering::SeqCst)
    }

    /// Handles one change of the source control.
    pub async fn handle_change(&self, value: &str) -> UpdateOutcome {
        let inner = &self.inner;
        let sequence = inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = InFlight::enter(&inner.in_flight);

        let request = build_request(&inner.config, value, inner.tokens.as_ref());
        tracing::debug!("#{sequence} {} {} value={value}", request.method, request.path);

        let options = match self.fetch_options(&request).await {
            Ok(options) => options,
            Err(e) => {
                tracing::error!("Error: {e}");
                return UpdateOutcome::Failed { sequence };
            }
        };

        let options = with_placeholder(&inner.config.placeholder_label, options);
        let count = options.len();

        // Check and replace under one lock so an older response cannot land
        // after a newer one.
        {
            let mut applied = inner.applied.lock().unwrap_or_else(PoisonError::into_inner);
            let latest = inner.issued.load(Ordering::SeqCst);
            if inner.config.discard_stale && (sequence < latest || sequence < *applied) {
                tracing::debug!("#{sequence} superseded by #{latest}; response dropped");
                return UpdateOutcome::Stale { sequence, latest };
            }
            inner.dependent.replace_options(options);
            *applied = (*applied).max(sequence);
        }
        tracing::debug!(
            "#{sequence} '#{}' now has {count} options",
            inner.config.dependent_id
        );

        UpdateOutcome::Applied {
            sequence,
            options: count,
        }
    }

    /// Runs the listener until the event channel closes. Every change on the
    /// source control gets its own task; nothing is cancelled. Returns the
    /// outcomes in completion order.
    pub async fn listen(self, mut events: mpsc::Receiver<ChangeEvent>) -> Vec<UpdateOutcome> {
        let mut tasks = JoinSet::new();
        let mut outcomes = Vec::new();

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    if event.target_id != self.inner.config.source_id {
                        continue;
                    }
                    let updater = self.clone();
                    tasks.spawn(async move { updater.handle_change(&event.value).await });
                }
                Some(done) = tasks.join_next(), if !tasks.is_empty() => {
                    collect(done, &mut outcomes);
                }
            }
        }

        while let Some(done) = tasks.join_next().await {
            collect(done, &mut outcomes);
        }
        outcomes
    }

    async fn fetch_options(
        &self,
        request: &SubtypeRequest,
    ) -> Result<Vec<SelectOption>, UpdateError> {
        let response = self.inner.transport.send(request).await?;
        if self.inner.config.check_status && !response.is_success() {
            return Err(UpdateError::Status {
                status: response.status,
                body: response.body,
            });
        }
        parse_options(&response.body)
    }
}

fn collect(
    done: Result<UpdateOutcome, tokio::task::JoinError>,
    outcomes: &mut Vec<UpdateOutcome>,
) {
    match done {
        Ok(outcome) => outcomes.push(outcome),
        Err(e) => tracing::error!("update task failed: {e}"),
    }
}
