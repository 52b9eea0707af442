//! # SpotBase Runtime
//!
//! Runtime implementation for the SpotBase place registry: the [`Store`].
//!
//! The Store is the imperative shell around a pure reducer. It owns the
//! state, serializes every mutation, and fans out the notifications a
//! successful mutation publishes.
//!
//! ## Concurrency model
//!
//! - Mutations (`send`, `send_and_query`) run the reducer under a write
//!   lock: each one is processed to completion, in isolation, before the
//!   next begins. Sequential identifier assignment and count/record
//!   atomicity fall out of this single-writer discipline.
//! - Reads (`state`) take the read lock and only ever observe the last
//!   fully-committed state. Records are immutable once written, so readers
//!   need no further coordination.
//! - A rejected mutation returns its typed error synchronously; the
//!   reducer contract guarantees no partial work was applied.
//!
//! There is no retry, suspension, or cancellation inside the store; there
//! is nothing transient to retry against.

use spotbase_core::effect::Effect;
use spotbase_core::reducer::Reducer;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Default capacity of the notification broadcast channel.
const DEFAULT_NOTIFICATION_CAPACITY: usize = 16;

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent access)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Notification fan-out to subscribers
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Example
///
/// ```ignore
/// let store = Store::new(
///     RegistryState::default(),
///     RegistryReducer::new(),
///     production_environment(),
/// );
///
/// store.send(RegistryAction::CreatePlace { .. }).await?;
/// let count = store.state(|s| s.place_count()).await;
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    /// Notification broadcast channel.
    ///
    /// Every `Effect::Publish` produced by a successful mutation is sent
    /// here, in mutation order, while the write lock is still held.
    notifications: broadcast::Sender<R::Notification>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    R::Notification: Clone + Send + 'static,
    R::Error: std::fmt::Display,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// The notification channel uses the default capacity of 16; use
    /// [`Store::with_notification_capacity`] when many slow subscribers
    /// are expected.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_notification_capacity(
            initial_state,
            reducer,
            environment,
            DEFAULT_NOTIFICATION_CAPACITY,
        )
    }

    /// Create a new store with a custom notification channel capacity
    ///
    /// A subscriber that lags more than `capacity` notifications behind
    /// skips the oldest ones (broadcast semantics); raise the capacity if
    /// subscribers cannot keep up with mutation bursts.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, which the broadcast channel rejects.
    #[must_use]
    pub fn with_notification_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (notifications, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            notifications,
        }
    }

    /// Send an action to the store
    ///
    /// This is the primary way to mutate the store:
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. On success, publishes the returned notifications in order
    ///
    /// Concurrent `send` calls serialize at the write lock; each action is
    /// fully applied (or fully rejected) before the next one runs.
    ///
    /// # Errors
    ///
    /// Returns the reducer's typed rejection when the action fails
    /// validation. The state is untouched in that case.
    #[tracing::instrument(skip_all, name = "store_send")]
    pub async fn send(&self, action: A) -> Result<(), R::Error> {
        self.send_and_query(action, |_| ()).await
    }

    /// Send an action and read the resulting state in one critical section
    ///
    /// The `query` closure runs under the same write lock as the mutation,
    /// after the reducer has applied it. This lets a caller observe the
    /// result of its *own* mutation race-free — e.g. the identifier the
    /// mutation just assigned — even while other writers are queued.
    ///
    /// # Errors
    ///
    /// Returns the reducer's typed rejection when the action fails
    /// validation; `query` is not invoked in that case.
    #[tracing::instrument(skip_all, name = "store_send_and_query")]
    pub async fn send_and_query<F, T>(&self, action: A, query: F) -> Result<T, R::Error>
    where
        F: FnOnce(&S) -> T,
    {
        let mut state = self.state.write().await;
        tracing::trace!("acquired write lock on state");

        let effects = match self.reducer.reduce(&mut state, action, &self.environment) {
            Ok(effects) => effects,
            Err(rejection) => {
                tracing::debug!(%rejection, "action rejected");
                return Err(rejection);
            }
        };
        tracing::trace!(effects = effects.len(), "reducer accepted action");

        let result = query(&state);

        // Publish while still holding the write lock so subscribers see
        // notifications in mutation order. Broadcast sends never block.
        for effect in effects {
            self.execute_effect(effect);
        }

        Ok(result)
    }

    /// Read current state via a closure
    ///
    /// Access state through a closure to ensure the lock is released
    /// promptly:
    ///
    /// ```ignore
    /// let count = store.state(|s| s.place_count()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Subscribe to notifications from this store
    ///
    /// Returns a receiver that gets a clone of every notification published
    /// after the subscription, in mutation order. If the receiver lags past
    /// the channel capacity it skips the oldest notifications and observes
    /// [`broadcast::error::RecvError::Lagged`].
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<R::Notification> {
        self.notifications.subscribe()
    }

    /// Execute a single effect produced by the reducer
    fn execute_effect(&self, effect: Effect<R::Notification>) {
        match effect {
            Effect::None => {}
            Effect::Publish(notification) => {
                // An Err here only means nobody is subscribed right now;
                // notifications are fire-and-forget for the store.
                if self.notifications.send(notification).is_err() {
                    tracing::trace!("notification dropped: no active subscribers");
                }
            }
        }
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            notifications: self.notifications.clone(),
        }
    }
}
