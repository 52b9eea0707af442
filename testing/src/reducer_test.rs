//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable
//! Given-When-Then syntax, for both the accepted and the rejected path.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use spotbase_core::effect::Effect;
use spotbase_core::reducer::Reducer;

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<N> = Box<dyn FnOnce(&[Effect<N>])>;

/// Type alias for rejection assertion functions
type RejectionAssertion<E> = Box<dyn FnOnce(&E)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// A test asserts either the accepted path (`then_state`, `then_effects`)
/// or the rejected path (`then_rejection`); [`run`](ReducerTest::run)
/// fails if the outcome kind does not match the registered assertions.
/// When a rejection is expected, `run` also verifies that the state is
/// identical to the given state — the atomic-rejection contract.
///
/// # Example
///
/// ```ignore
/// use spotbase_testing::ReducerTest;
///
/// ReducerTest::new(PlacesReducer::new())
///     .with_env(test_environment())
///     .given_state(PlacesState::new())
///     .when_action(PlacesAction::AddReview { rating: 0, .. })
///     .then_rejection(|error| {
///         assert!(matches!(error, PlacesError::InvalidRating { rating: 0 }));
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<R::Notification>>,
    rejection_assertions: Vec<RejectionAssertion<R::Error>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone + PartialEq + std::fmt::Debug,
    A: Clone,
    R::Error: std::fmt::Display,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
            rejection_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<R::Notification>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Expect the action to be rejected and assert on the error (Then)
    ///
    /// Registering a rejection assertion flips the expected outcome:
    /// `run` will fail if the reducer accepts the action.
    #[must_use]
    pub fn then_rejection<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&R::Error) + 'static,
    {
        self.rejection_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set, if the
    /// reducer's outcome (accepted vs. rejected) does not match the
    /// registered assertions, if a rejected action mutated state, or if
    /// any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let given = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let expect_rejection = !self.rejection_assertions.is_empty();

        // Execute reducer
        let mut state = given.clone();
        match self.reducer.reduce(&mut state, action, &env) {
            Ok(effects) => {
                assert!(
                    !expect_rejection,
                    "Expected the action to be rejected, but it was accepted"
                );

                for assertion in self.state_assertions {
                    assertion(&state);
                }

                for assertion in self.effect_assertions {
                    assertion(&effects);
                }
            }
            Err(error) => {
                assert!(
                    expect_rejection,
                    "Expected the action to be accepted, but it was rejected: {error}"
                );

                // Atomic rejection: a rejected action must not touch state
                assert_eq!(
                    state, given,
                    "Rejected action mutated state; rejections must be atomic"
                );

                for assertion in self.rejection_assertions {
                    assertion(&error);
                }

                for assertion in self.state_assertions {
                    assertion(&state);
                }
            }
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use spotbase_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<N: std::fmt::Debug>(effects: &[Effect<N>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<N>(effects: &[Effect<N>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one published notification
    ///
    /// # Panics
    ///
    /// Panics if no `Publish` effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_published<N>(effects: &[Effect<N>]) {
        assert!(
            effects.iter().any(Effect::is_publish),
            "Expected at least one published notification, but none found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::{SmallVec, smallvec};

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Fail,
    }

    struct TestReducer;

    struct TestEnv;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;
        type Notification = i32;
        type Error = String;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> Result<SmallVec<[Effect<i32>; 4]>, String> {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    Ok(smallvec![Effect::Publish(state.count)])
                }
                TestAction::Fail => Err("failed".to_string()),
            }
        }
    }

    #[test]
    fn test_accepted_path() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_published(effects);
            })
            .run();
    }

    #[test]
    fn test_rejected_path() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 5 })
            .when_action(TestAction::Fail)
            .then_rejection(|error| {
                assert_eq!(error, "failed");
            })
            .then_state(|state| {
                assert_eq!(state.count, 5);
            })
            .run();
    }

    #[test]
    #[should_panic(expected = "Expected the action to be rejected")]
    fn test_unexpected_acceptance_panics() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_rejection(|_| {})
            .run();
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<i32>(&[Effect::None]);
        assertions::assert_no_effects::<i32>(&[]);
    }
}
