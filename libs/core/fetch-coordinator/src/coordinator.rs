use futures::future::{BoxFuture, FutureExt};
use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::state::{FetchState, Transition};

const TRANSITION_CAPACITY: usize = 64;

type Operation<T> = dyn Fn(Option<T>) -> BoxFuture<'static, Result<T, String>> + Send + Sync;

/// Drives one asynchronous operation with single-flight, cancel-on-restart
/// semantics.
///
/// Every [`start`](Self::start) bumps a generation counter, aborts the task of
/// the previous attempt and spawns a new one. An attempt only commits its
/// outcome while its generation is still current; the check and the write
/// happen under the same lock `start` takes, so a superseded attempt can
/// never overwrite a newer one even if it finishes later.
///
/// State is published through a `watch` channel ([`subscribe`](Self::subscribe))
/// for observers that only need the latest state, and a `broadcast` channel
/// ([`transitions`](Self::transitions)) that carries every change in order.
/// Observers consume either from their own task.
///
/// The operation receives the last committed value, or the seed given to
/// [`with_value`](Self::with_value), so refresh-style operations can build on
/// it. It is invoked on the spawned task, never under the coordinator lock,
/// so it may call back into the coordinator. A panic inside it settles the
/// attempt as `Error`.
pub struct FetchCoordinator<T> {
    name: &'static str,
    operation: Arc<Operation<T>>,
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    inner: Mutex<Inner<T>>,
    state_tx: watch::Sender<FetchState>,
    transition_tx: broadcast::Sender<Transition>,
}

struct Inner<T> {
    generation: u64,
    value: Option<T>,
    task: Option<JoinHandle<()>>,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Caller must hold the lock.
    fn publish(&self, generation: u64, state: FetchState) {
        self.state_tx.send_replace(state.clone());
        // No subscribers is fine.
        let _ = self.transition_tx.send(Transition { generation, state });
    }

    fn commit(&self, name: &str, generation: u64, outcome: Result<T, String>) {
        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(
                coordinator = name,
                generation,
                current = inner.generation,
                "discarding outcome of superseded attempt"
            );
            return;
        }

        inner.task = None;
        match outcome {
            Ok(value) => {
                inner.value = Some(value);
                self.publish(generation, FetchState::Normal);
                info!(coordinator = name, generation, "fetch completed");
            }
            Err(message) => {
                warn!(coordinator = name, generation, error = %message, "fetch failed");
                self.publish(generation, FetchState::Error(message));
            }
        }
    }
}

impl<T> FetchCoordinator<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an idle coordinator in the `Loading` state.
    ///
    /// `name` labels log events. Nothing runs until [`start`](Self::start).
    pub fn new<F, Fut, E>(name: &'static str, operation: F) -> Self
    where
        F: Fn(Option<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + 'static,
    {
        let operation: Arc<Operation<T>> = Arc::new(move |previous| {
            let attempt = operation(previous);
            async move { attempt.await.map_err(|e| e.to_string()) }.boxed()
        });

        let (state_tx, _) = watch::channel(FetchState::Loading);
        let (transition_tx, _) = broadcast::channel(TRANSITION_CAPACITY);

        Self {
            name,
            operation,
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    generation: 0,
                    value: None,
                    task: None,
                }),
                state_tx,
                transition_tx,
            }),
        }
    }

    /// Seed the value handed to the first attempt
    pub fn with_value(self, value: T) -> Self {
        self.shared.lock().value = Some(value);
        self
    }

    /// Begin a new attempt, superseding any attempt still in flight.
    ///
    /// Returns the generation of the new attempt. Must be called from within
    /// a Tokio runtime.
    pub fn start(&self) -> u64 {
        let mut inner = self.shared.lock();
        inner.generation += 1;
        let generation = inner.generation;

        if let Some(previous) = inner.task.take() {
            previous.abort();
            debug!(coordinator = self.name, generation, "superseding in-flight attempt");
        }

        self.shared.publish(generation, FetchState::Loading);

        let previous = inner.value.clone();
        let operation = Arc::clone(&self.operation);
        let shared = Arc::clone(&self.shared);
        let name = self.name;
        let span = info_span!("fetch", coordinator = name, generation);

        inner.task = Some(tokio::spawn(
            async move {
                let attempt = AssertUnwindSafe(async move { operation(previous).await });
                let outcome = attempt
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| Err(panic_message(panic.as_ref())));
                shared.commit(name, generation, outcome);
            }
            .instrument(span),
        ));

        generation
    }

    /// Cancel the in-flight attempt without starting another.
    ///
    /// Moves to `Cancelled` and returns `true` when something was in flight;
    /// otherwise leaves the state alone and returns `false`.
    pub fn cancel(&self) -> bool {
        let mut inner = self.shared.lock();
        let Some(task) = inner.task.take() else {
            return false;
        };

        inner.generation += 1;
        task.abort();
        self.shared.publish(inner.generation, FetchState::Cancelled);
        info!(coordinator = self.name, generation = inner.generation, "fetch cancelled");
        true
    }

    /// Current state
    pub fn state(&self) -> FetchState {
        self.shared.state_tx.borrow().clone()
    }

    /// Last committed value, or the seed
    pub fn value(&self) -> Option<T> {
        self.shared.lock().value.clone()
    }

    /// Generation of the most recent `start` or `cancel`
    pub fn generation(&self) -> u64 {
        self.shared.lock().generation
    }

    /// Whether an attempt is in flight
    pub fn is_running(&self) -> bool {
        self.shared.lock().task.is_some()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Latest-state channel
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.shared.state_tx.subscribe()
    }

    /// Every transition from now on, in order
    pub fn transitions(&self) -> broadcast::Receiver<Transition> {
        self.shared.transition_tx.subscribe()
    }

    /// Wait until the state leaves `Loading` and return it.
    ///
    /// Never resolves if nothing has been started.
    pub async fn settled(&self) -> FetchState {
        let mut rx = self.subscribe();
        match rx.wait_for(FetchState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause");
    format!("operation panicked: {}", detail)
}

impl<T> Drop for FetchCoordinator<T> {
    fn drop(&mut self) {
        if let Some(task) = self.shared.lock().task.take() {
            task.abort();
        }
    }
}
