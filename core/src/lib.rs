//! # SpotBase Core
//!
//! Core traits and types for the SpotBase place registry.
//!
//! This crate provides the fundamental abstractions for building a
//! single-writer, notification-emitting record store using the Reducer
//! pattern.
//!
//! ## Core Concepts
//!
//! - **State**: the records a store owns
//! - **Action**: a command asking the store to mutate its state
//! - **Reducer**: fallible pure function `(State, Action, Environment) → Result<Effects, Error>`
//! - **Effect**: side-effect descriptions (not execution), currently
//!   notification publication
//! - **Environment**: injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Explicit Effects (no hidden I/O)
//! - Atomic rejection: a reducer that returns `Err` leaves state untouched
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use spotbase_core::*;
//!
//! impl Reducer for RegistryReducer {
//!     type State = RegistryState;
//!     type Action = RegistryAction;
//!     type Environment = RegistryEnvironment;
//!     type Notification = RegistryNotification;
//!     type Error = RegistryError;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut RegistryState,
//!         action: RegistryAction,
//!         env: &RegistryEnvironment,
//!     ) -> Result<SmallVec<[Effect<RegistryNotification>; 4]>, RegistryError> {
//!         // Validate, mutate, describe notifications to publish
//!         Ok(smallvec![])
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - the core trait for business logic
///
/// Reducers are fallible pure functions:
/// `(State, Action, Environment) → Result<Effects, Error>`
///
/// They contain all validation and mutation logic, and are deterministic
/// and testable in isolation from any runtime.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Contract
    ///
    /// A call to [`reduce`](Reducer::reduce) either:
    ///
    /// - succeeds: state is mutated, and the returned effects describe the
    ///   notifications to publish for this mutation; or
    /// - is rejected: `Err` is returned and the state is **exactly** as it
    ///   was before the call. Implementations must run every validation
    ///   before the first write.
    ///
    /// This is how callers get typed, synchronous failures with no
    /// partially-applied work to reconcile.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// The notification type published after successful mutations
        type Notification;

        /// The typed rejection returned when a command fails validation
        type Error;

        /// Reduce an action into state changes and effects
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Errors
        ///
        /// Returns the reducer's typed rejection when the action fails
        /// validation; no state is mutated in that case.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Result<SmallVec<[Effect<Self::Notification>; 4]>, Self::Error>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects describe side effects to be performed by the runtime. They are
/// values (not execution) returned from reducers, which keeps reducers pure
/// and lets tests assert on them directly.
pub mod effect {
    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime after the mutation commits.
    ///
    /// # Type Parameters
    ///
    /// - `N`: The notification type that can be published
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect<N> {
        /// No-op effect
        None,

        /// Publish a notification to all store subscribers
        Publish(N),
    }

    impl<N> Effect<N> {
        /// Returns true if this effect publishes a notification
        #[must_use]
        pub const fn is_publish(&self) -> bool {
            matches!(self, Effect::Publish(_))
        }
    }
}

/// Environment module - dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected via
/// the Environment parameter, so reducers stay deterministic under test.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use spotbase_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let now = clock.now();
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, SystemClock};
    use super::reducer::Reducer;
    use smallvec::{SmallVec, smallvec};

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct TallyState {
        total: u32,
    }

    #[derive(Clone, Debug)]
    enum TallyAction {
        Add(u32),
    }

    struct TallyReducer;

    impl Reducer for TallyReducer {
        type State = TallyState;
        type Action = TallyAction;
        type Environment = ();
        type Notification = u32;
        type Error = String;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> Result<SmallVec<[Effect<u32>; 4]>, String> {
            let TallyAction::Add(amount) = action;
            if amount == 0 {
                return Err("amount must be positive".to_string());
            }
            state.total += amount;
            Ok(smallvec![Effect::Publish(state.total)])
        }
    }

    #[test]
    #[allow(clippy::expect_used)] // Test will fail loudly if the action is rejected
    fn accepted_action_mutates_and_publishes() {
        let mut state = TallyState { total: 0 };
        let effects = TallyReducer
            .reduce(&mut state, TallyAction::Add(3), &())
            .expect("a positive amount should be accepted");

        assert_eq!(state.total, 3);
        assert_eq!(effects.len(), 1);
        assert!(effects[0].is_publish());
    }

    #[test]
    fn rejected_action_leaves_state_untouched() {
        let mut state = TallyState { total: 7 };
        let result = TallyReducer.reduce(&mut state, TallyAction::Add(0), &());

        assert!(result.is_err());
        assert_eq!(state, TallyState { total: 7 });
    }

    #[test]
    fn effect_none_is_not_publish() {
        assert!(!Effect::<u32>::None.is_publish());
    }

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let earlier = clock.now();
        assert!(clock.now() >= earlier);
    }
}
